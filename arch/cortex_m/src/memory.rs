//! Linker layout and the storage primitives run before `.bss`/`.data` exist.

use core::ptr;

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// A run of bytes, typically `.bss`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MemoryRegion {
    pub start: *mut u8,
    pub len: usize,
}

/// Initialized storage: where the image keeps the values and where the
/// program reads them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct InitializedRegion {
    pub load: *const u8,
    pub run: *mut u8,
    pub len: usize,
}

/// The two regions prepared during boot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BootLayout {
    pub bss: MemoryRegion,
    pub data: InitializedRegion,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl MemoryRegion {
    /// Region spanning `[start, end)`.
    pub fn from_bounds(start: *mut u8, end: *mut u8) -> Self {
        Self {
            start,
            len: (end as usize).saturating_sub(start as usize),
        }
    }
}

impl InitializedRegion {
    /// Region whose run copy spans `[run_start, run_end)`.
    pub fn from_bounds(load: *const u8, run_start: *mut u8, run_end: *mut u8) -> Self {
        Self {
            load,
            run: run_start,
            len: (run_end as usize).saturating_sub(run_start as usize),
        }
    }

    /// `true` when the values already are where the program reads them.
    pub fn is_in_place(&self) -> bool {
        self.load == self.run as *const u8
    }
}

/// Zero every byte of `region`.
///
/// Volatile writes keep the compiler from turning the loop into a `memset`
/// call, which is not guaranteed to be usable yet.
///
/// # Safety
///
/// - `region` must be valid for writes and not in use by anything else.
#[inline(always)]
pub unsafe fn zero_volatile(region: MemoryRegion) {
    let mut ptr = region.start;
    let end = region.start.add(region.len);

    while ptr < end {
        ptr::write_volatile(ptr, 0);
        ptr = ptr.offset(1);
    }
}

/// Copy `region.len` bytes from the load address to the run address.
///
/// Nothing is copied when both addresses are the same.
///
/// # Safety
///
/// - The load range must be valid for reads, the run range for writes.
/// - The two ranges must not partially overlap.
#[inline(always)]
pub unsafe fn copy_volatile(region: InitializedRegion) {
    if region.is_in_place() {
        return;
    }

    for i in 0..region.len {
        let byte = ptr::read_volatile(region.load.add(i));
        ptr::write_volatile(region.run.add(i), byte);
    }
}

/// Compare the bytes at `start` with `expected`, reading memory every time.
///
/// For checking `.data`/`.bss` contents after boot: the compiler cannot fold
/// these reads into the statics' initial values.
///
/// # Safety
///
/// - `start` must be valid for reads of `expected.len()` bytes.
pub unsafe fn matches_volatile(start: *const u8, expected: &[u8]) -> bool {
    expected
        .iter()
        .enumerate()
        .all(|(i, &byte)| ptr::read_volatile(start.add(i)) == byte)
}

/// Regions as placed by the linker script.
///
/// Only the addresses of the linker symbols are taken, their contents are
/// never read.
///
/// # Safety
///
/// - The linker script must define the symbols below.
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub unsafe fn linker_layout() -> BootLayout {
    extern "C" {
        static mut __bss_start: u8;
        static mut __bss_end: u8;
        static mut __data_start: u8;
        static mut __data_end: u8;
        static __data_load_start: u8;
    }

    BootLayout {
        bss: MemoryRegion::from_bounds(ptr::addr_of_mut!(__bss_start), ptr::addr_of_mut!(__bss_end)),
        data: InitializedRegion::from_bounds(
            ptr::addr_of!(__data_load_start),
            ptr::addr_of_mut!(__data_start),
            ptr::addr_of_mut!(__data_end),
        ),
    }
}

//! Rust runtime initialization code.

use crate::{
    fpu,
    memory::{BootLayout, InitializedRegion, MemoryRegion},
    scs::SystemControl,
    variant::Variant,
    vector,
};

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// What the boot sequence hands off to: storage primitives and the kernel.
pub trait Runtime {
    /// Zero every byte of `region`.
    ///
    /// # Safety
    ///
    /// - Must not depend on static data.
    unsafe fn zero_storage(&mut self, region: MemoryRegion);

    /// Copy the initialized values from their load to their run location.
    ///
    /// # Safety
    ///
    /// - Must not depend on static data other than `.bss`.
    unsafe fn copy_storage(&mut self, region: InitializedRegion);

    /// Enter the kernel. Expected to never come back.
    ///
    /// # Safety
    ///
    /// - `.bss` and `.data` must be initialized.
    unsafe fn kernel_start(&mut self);

    /// Stop the core for good.
    fn halt(&mut self) -> !;
}

/// The runtime linked into the image: volatile storage primitives and the
/// kernel's `kernel_start` symbol.
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub struct LinkedRuntime;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Equivalent to `crt0` or `c0` code in C/C++ world. Relocates the vector
/// table, enables the FPU, clears `.bss`, copies `.data`, then jumps to the
/// kernel.
///
/// If the kernel ever returns the core is halted, execution never continues
/// past this point.
///
/// # Safety
///
/// - Only a single core must be active and running this function.
/// - Must run exactly once, on a valid stack, before any code reads or writes
///   static data.
pub unsafe fn prepare_runtime<V, S, R>(scs: &S, layout: BootLayout, runtime: &mut R) -> !
where
    V: Variant,
    S: SystemControl,
    R: Runtime,
{
    vector::relocate_vector_table::<V, S>(scs);
    fpu::enable_floating_point::<V, S>(scs);

    runtime.zero_storage(layout.bss);
    runtime.copy_storage(layout.data);

    runtime.kernel_start();
    runtime.halt()
}

#[cfg(all(target_arch = "arm", target_os = "none"))]
impl Runtime for LinkedRuntime {
    #[inline(always)]
    unsafe fn zero_storage(&mut self, region: MemoryRegion) {
        crate::memory::zero_volatile(region);
    }

    #[inline(always)]
    unsafe fn copy_storage(&mut self, region: InitializedRegion) {
        crate::memory::copy_volatile(region);
    }

    unsafe fn kernel_start(&mut self) {
        extern "Rust" {
            fn kernel_start() -> !;
        }

        kernel_start()
    }

    fn halt(&mut self) -> ! {
        crate::cpu::wait_forever()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::MemoryMap,
        testing::{run_boot, Event, FakeRuntime, FakeScs, Journal, KernelExit},
        variant::*,
    };

    struct Board;

    impl MemoryMap for Board {
        const FLASH_BASE: u32 = 0x0000_0000;
        const SRAM_BASE: u32 = 0x2000_0000;
    }

    type Mainline = Target<ArmV7M, LoadedIntoRam, HardFloat, Board>;

    fn empty_layout() -> BootLayout {
        BootLayout {
            bss: MemoryRegion {
                start: core::ptr::null_mut(),
                len: 0,
            },
            data: InitializedRegion {
                load: core::ptr::null(),
                run: core::ptr::null_mut(),
                len: 0,
            },
        }
    }

    #[test]
    fn steps_run_in_order() {
        let journal = Journal::new();
        let scs = FakeScs::at_reset(journal.clone());
        let mut runtime = FakeRuntime::new(journal.clone(), KernelExit::Diverge);

        let exit = run_boot::<Mainline>(&scs, empty_layout(), &mut runtime);

        assert_eq!(exit, Event::KernelStart);
        assert_eq!(
            journal.events(),
            vec![
                Event::Vtor(0x2000_0000),
                Event::Cpacr(0x00F0_0000),
                Event::Fpccr(0x8000_0000),
                Event::FpTouch,
                Event::ZeroStorage,
                Event::CopyStorage,
                Event::KernelStart,
            ]
        );
    }

    #[test]
    fn baseline_soft_float_only_prepares_storage() {
        let journal = Journal::new();
        let scs = FakeScs::at_reset(journal.clone());
        let mut runtime = FakeRuntime::new(journal.clone(), KernelExit::Diverge);

        run_boot::<Target<ArmV6M, ExecuteInPlace, SoftFloat, Board>>(
            &scs,
            empty_layout(),
            &mut runtime,
        );

        assert_eq!(scs.register_writes(), 0);
        assert_eq!(
            journal.events(),
            vec![Event::ZeroStorage, Event::CopyStorage, Event::KernelStart]
        );
    }

    #[test]
    fn returning_kernel_halts_the_core() {
        let journal = Journal::new();
        let scs = FakeScs::at_reset(journal.clone());
        let mut runtime = FakeRuntime::new(journal.clone(), KernelExit::Return);

        let exit = run_boot::<Mainline>(&scs, empty_layout(), &mut runtime);

        assert_eq!(exit, Event::Halt);
        let events = journal.events();
        assert_eq!(events.iter().filter(|e| **e == Event::KernelStart).count(), 1);
        assert_eq!(&events[events.len() - 2..], &[Event::KernelStart, Event::Halt]);
    }

    #[test]
    fn end_to_end_loaded_mainline_with_float() {
        const BSS_LEN: usize = 256;
        const DATA_LEN: usize = 64;

        let mut bss = vec![0xEEu8; BSS_LEN];
        let image: Vec<u8> = (0..DATA_LEN as u8).map(|b| b ^ 0x5A).collect();
        let mut ram = vec![0u8; DATA_LEN];

        let layout = BootLayout {
            bss: MemoryRegion {
                start: bss.as_mut_ptr(),
                len: BSS_LEN,
            },
            data: InitializedRegion {
                load: image.as_ptr(),
                run: ram.as_mut_ptr(),
                len: DATA_LEN,
            },
        };
        assert!(!layout.data.is_in_place());

        let journal = Journal::new();
        let scs = FakeScs::at_reset(journal.clone());
        let mut runtime = FakeRuntime::new(journal.clone(), KernelExit::Diverge);

        run_boot::<Mainline>(&scs, layout, &mut runtime);

        assert_eq!(scs.vtor.get(), Board::SRAM_BASE);
        assert_eq!(scs.cpacr.read(crate::scs::CPACR::CP10), 0b11);
        assert_eq!(scs.cpacr.read(crate::scs::CPACR::CP11), 0b11);
        assert!(scs.fpccr.is_set(crate::scs::FPCCR::ASPEN));
        assert!(!scs.fpccr.is_set(crate::scs::FPCCR::LSPEN));
        assert!(bss.iter().all(|&b| b == 0));
        assert_eq!(ram, image);

        let events = journal.events();
        assert_eq!(events.iter().filter(|e| **e == Event::KernelStart).count(), 1);
        assert_eq!(events.last(), Some(&Event::KernelStart));
    }
}

//! Board memory map, fixed at compile time.
//!
//! `BOOT_FLASH_BASE` and `BOOT_SRAM_BASE` are read from the build
//! environment as hex literals (`0x` prefix and `_` separators allowed).
//! A malformed or misaligned value stops the build.

/// Minimum alignment of a relocated vector table (VTOR.TBLOFF starts at bit 7).
pub const VECTOR_TABLE_ALIGN: u32 = 1 << 7;

/// Non-volatile storage base used when the environment does not set one.
pub const DEFAULT_FLASH_BASE: u32 = 0x0000_0000;
/// Runtime storage base used when the environment does not set one.
pub const DEFAULT_SRAM_BASE: u32 = 0x2000_0000;

/// Flash base address the image executes from in XIP builds.
pub const FLASH_BASE_ADDRESS: u32 = parse_address(option_env!("BOOT_FLASH_BASE"), DEFAULT_FLASH_BASE);
/// SRAM base address the image is loaded to in non-XIP builds.
pub const SRAM_BASE_ADDRESS: u32 = parse_address(option_env!("BOOT_SRAM_BASE"), DEFAULT_SRAM_BASE);

const _: () = assert!(
    FLASH_BASE_ADDRESS % VECTOR_TABLE_ALIGN == 0,
    "BOOT_FLASH_BASE is not aligned for the vector table"
);
const _: () = assert!(
    SRAM_BASE_ADDRESS % VECTOR_TABLE_ALIGN == 0,
    "BOOT_SRAM_BASE is not aligned for the vector table"
);

/// Where the two storage kinds start on a board.
pub trait MemoryMap {
    /// Start of non-volatile (flash/ROM) storage.
    const FLASH_BASE: u32;
    /// Start of runtime (RAM) storage.
    const SRAM_BASE: u32;
}

/// Memory map taken from the build environment.
pub struct ConfiguredMemoryMap;

impl MemoryMap for ConfiguredMemoryMap {
    const FLASH_BASE: u32 = FLASH_BASE_ADDRESS;
    const SRAM_BASE: u32 = SRAM_BASE_ADDRESS;
}

/// Parses a hex address, falling back to `default` when unset.
///
/// Used in const context: a bad digit or an overflow is a build error.
pub const fn parse_address(text: Option<&str>, default: u32) -> u32 {
    let bytes = match text {
        Some(text) => text.as_bytes(),
        None => return default,
    };

    let mut i = 0;
    if bytes.len() >= 2 && bytes[0] == b'0' && (bytes[1] == b'x' || bytes[1] == b'X') {
        i = 2;
    }
    if i == bytes.len() {
        panic!("empty address");
    }

    let mut value: u32 = 0;
    while i < bytes.len() {
        let digit = match bytes[i] {
            b'0'..=b'9' => bytes[i] - b'0',
            b'a'..=b'f' => bytes[i] - b'a' + 10,
            b'A'..=b'F' => bytes[i] - b'A' + 10,
            b'_' => {
                i += 1;
                continue;
            }
            _ => panic!("address is not a hex literal"),
        };
        if value > (u32::MAX >> 4) {
            panic!("address does not fit in 32 bits");
        }
        value = (value << 4) | digit as u32;
        i += 1;
    }
    value
}

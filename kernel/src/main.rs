//! Init kernel.

#![no_main]
#![no_std]

mod panic_wait;
mod print;
mod reset;

use arch::{
    memory::matches_volatile,
    variant::{Selected, Variant},
};
use core::ptr;
use cortex_m_semihosting::debug;

const DATA_PATTERN: [u8; 8] = *b"BOOTDATA";

/// Lands in `.data`: only correct if the load image was copied.
static mut DATA_SENTINEL: [u8; 8] = DATA_PATTERN;
/// Lands in `.bss`: only zero if the region was cleared.
static mut BSS_SENTINEL: [u8; 8] = [0; 8];

/// Early init code, entered once `.bss` and `.data` are valid.
///
/// # Safety
///
/// - Only a single core must be active and running this function.
#[no_mangle]
unsafe fn kernel_start() -> ! {
    println!(
        "[0] {:?}, {:?}, float {:?}",
        Selected::ARCHITECTURE,
        Selected::BOOT_MODE,
        Selected::FLOAT
    );
    println!("[0] Vector table: {:#x?}", Selected::VECTOR_TABLE_BASE);

    if !matches_volatile(ptr::addr_of!(DATA_SENTINEL) as *const u8, &DATA_PATTERN) {
        panic!(".data was not initialized");
    }
    if !matches_volatile(ptr::addr_of!(BSS_SENTINEL) as *const u8, &[0; 8]) {
        panic!(".bss was not cleared");
    }
    println!("[1] Runtime ready");

    debug::exit(debug::EXIT_SUCCESS);
    arch::cpu::wait_forever()
}

//! Reset vector and the architectural exception slots.
//!
//! The core loads the initial stack pointer from the first word of the table
//! (emitted by the linker script), so `Reset` already has a stack and can go
//! straight to `_prep_c`.

use arch::cpu::{boot::_prep_c, wait_forever};

/// One vector table slot.
#[repr(C)]
pub union Vector {
    handler: unsafe extern "C" fn(),
    reserved: usize,
}

#[allow(non_snake_case)]
#[no_mangle]
pub unsafe extern "C" fn Reset() -> ! {
    _prep_c()
}

#[link_section = ".vector_table.reset_vector"]
#[no_mangle]
pub static __RESET_VECTOR: unsafe extern "C" fn() -> ! = Reset;

/// NMI through SysTick.
#[link_section = ".vector_table.exceptions"]
#[no_mangle]
pub static __EXCEPTIONS: [Vector; 14] = [
    Vector { handler: DefaultHandler }, // NMI
    Vector { handler: DefaultHandler }, // HardFault
    Vector { handler: DefaultHandler }, // MemManage
    Vector { handler: DefaultHandler }, // BusFault
    Vector { handler: DefaultHandler }, // UsageFault
    Vector { reserved: 0 },
    Vector { reserved: 0 },
    Vector { reserved: 0 },
    Vector { reserved: 0 },
    Vector { handler: DefaultHandler }, // SVCall
    Vector { handler: DefaultHandler }, // DebugMonitor
    Vector { reserved: 0 },
    Vector { handler: DefaultHandler }, // PendSV
    Vector { handler: DefaultHandler }, // SysTick
];

/// Any exception taken before the kernel installs its own handlers.
#[allow(non_snake_case)]
#[no_mangle]
pub unsafe extern "C" fn DefaultHandler() {
    wait_forever()
}

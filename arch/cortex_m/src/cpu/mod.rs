/// Boot entry.
#[cfg(all(target_arch = "arm", target_os = "none"))]
pub mod boot;

use cortex_m::asm;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Pause execution on the core.
#[inline(always)]
pub fn wait_forever() -> ! {
    loop {
        asm::wfe()
    }
}

/// Mask configurable interrupts (`cpsid i`).
#[inline(always)]
pub fn mask_interrupts() {
    cortex_m::interrupt::disable()
}

/// Touch the FP register file, then `dsb; isb`.
///
/// With FPCCR.ASPEN set the core only starts stacking FP context once the FP
/// registers have been used at least once. `vmov s0, s0` is that first use:
/// it has no data-flow effect, so it is kept as volatile assembly together
/// with the barriers that make the new state visible before any exception
/// can be taken.
///
/// # Safety
///
/// - CP10/CP11 access must already be granted in CPACR, otherwise this
///   raises a UsageFault.
/// - The target must have a single precision FPU (`eabihf`).
///
/// Only assembled into builds with the `float` feature or an FPU target;
/// elsewhere there is no FP register file and this is empty.
#[inline(always)]
pub unsafe fn touch_fp_registers() {
    #[cfg(all(target_arch = "arm", any(feature = "float", target_feature = "vfp2")))]
    core::arch::asm!("vmov s0, s0", "dsb", "isb", options(nostack, preserves_flags));
}

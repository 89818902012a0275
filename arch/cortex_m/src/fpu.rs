//! Floating-point unit bring-up.

use crate::{
    scs::{SystemControl, CPACR, FPCCR},
    variant::{Float, FloatSupport, HardFloat, SoftFloat, Variant},
};

/// Enable the FP extension and set its exception stacking policy.
///
/// Dispatches to the float strategy of `V`; see [`HardFloat`] and
/// [`SoftFloat`].
#[inline(always)]
pub fn enable_floating_point<V: Variant, S: SystemControl>(scs: &S) {
    <V::FloatUnit as Float>::enable(scs)
}

impl Float for HardFloat {
    const SUPPORT: FloatSupport = FloatSupport::Enabled;

    /// 1. CPACR resets to all zeroes, which makes every FP instruction fault.
    ///    CP10 and CP11 get full access, privileged and unprivileged.
    /// 2. FPCCR resets with ASPEN and LSPEN set. Lazy stacking reserves space
    ///    for S0-S15/FPSCR but defers the save until the handler uses FP,
    ///    which loses state once the kernel switches context from an
    ///    exception. ASPEN stays set and LSPEN is cleared so the volatile bank
    ///    is stacked eagerly.
    /// 3. ASPEN only takes effect after the FP registers have been used once,
    ///    so they are touched here, before any thread or exception frame
    ///    exists.
    #[inline(always)]
    fn enable<S: SystemControl>(scs: &S) {
        scs.write_cpacr(CPACR::CP10::FullAccess + CPACR::CP11::FullAccess);
        scs.write_fpccr(FPCCR::ASPEN::SET + FPCCR::LSPEN::CLEAR);

        // CP10/CP11 were granted above.
        unsafe { scs.touch_fp_context() }
    }
}

impl Float for SoftFloat {
    const SUPPORT: FloatSupport = FloatSupport::Disabled;

    /// No register is touched and no FP instruction is emitted.
    #[inline(always)]
    fn enable<S: SystemControl>(_scs: &S) {}
}

//! Vector table relocation.

use crate::{
    scs::{SystemControl, VTOR},
    variant::Variant,
};

/// TBLOFF holds address bits [31:7].
const TBLOFF_SHIFT: u32 = 7;

/// Point VTOR at the table for this build.
///
/// ARMv6-M leaves the table at its hardware address and touches nothing.
/// ARMv7-M points VTOR at the start of flash (XIP) or of SRAM (loaded).
///
/// Must run before anything that can fault or be interrupted.
#[inline(always)]
pub fn relocate_vector_table<V: Variant, S: SystemControl>(scs: &S) {
    if let Some(base) = V::VECTOR_TABLE_BASE {
        scs.write_vtor(VTOR::TBLOFF.val(base >> TBLOFF_SHIFT));
    }
}

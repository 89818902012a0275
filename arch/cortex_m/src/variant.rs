//! Build variant selection.
//!
//! The architecture revision, boot mode and float support are picked by cargo
//! features and become marker types. Boot code is generic over [`Variant`],
//! so every decision below is made by the compiler and no flag is tested at
//! run time.

use crate::{
    config::{ConfiguredMemoryMap, MemoryMap},
    scs::SystemControl,
};
use core::marker::PhantomData;

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Architecture revision of the core.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ArchitectureVariant {
    /// Baseline (Cortex-M0/M0+/M1). VTOR is not relocated.
    ArmV6M,
    /// Mainline (Cortex-M3/M4/M7). VTOR is relocatable.
    ArmV7M,
}

/// Where the image runs from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BootMode {
    /// Code runs from flash, `.data` is copied to RAM.
    ExecuteInPlace,
    /// The whole image was loaded into RAM before reset.
    LoadedIntoRam,
}

/// Whether the FP extension is used.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FloatSupport {
    /// FP instructions are used, the FPU is brought up during boot.
    Enabled,
    /// Soft float only, the FPU registers are never touched.
    Disabled,
}

/// Architecture revision marker.
pub trait Architecture {
    const VARIANT: ArchitectureVariant;
}

/// Boot mode marker.
pub trait Mode {
    const MODE: BootMode;
}

/// Float support strategy.
///
/// The FPU bring-up lives in the implementation, so a soft-float build never
/// contains an FP instruction. Implemented in [`crate::fpu`].
pub trait Float {
    const SUPPORT: FloatSupport;

    /// Bring up the FP extension, or do nothing.
    fn enable<S: SystemControl>(scs: &S);
}

/// ARMv6-M.
pub struct ArmV6M;
/// ARMv7-M.
pub struct ArmV7M;
/// Execute-in-place.
pub struct ExecuteInPlace;
/// Loaded into RAM.
pub struct LoadedIntoRam;
/// FP extension in use.
pub struct HardFloat;
/// No FP extension.
pub struct SoftFloat;

impl Architecture for ArmV6M {
    const VARIANT: ArchitectureVariant = ArchitectureVariant::ArmV6M;
}

impl Architecture for ArmV7M {
    const VARIANT: ArchitectureVariant = ArchitectureVariant::ArmV7M;
}

impl Mode for ExecuteInPlace {
    const MODE: BootMode = BootMode::ExecuteInPlace;
}

impl Mode for LoadedIntoRam {
    const MODE: BootMode = BootMode::LoadedIntoRam;
}

/// A fully resolved build: what the boot sequence does and where.
pub trait Variant {
    const ARCHITECTURE: ArchitectureVariant;
    const BOOT_MODE: BootMode;
    const FLOAT: FloatSupport;

    /// FPU strategy of this build.
    type FloatUnit: Float;

    /// Address VTOR is pointed at, `None` when the table stays where the
    /// hardware put it.
    const VECTOR_TABLE_BASE: Option<u32>;
}

/// Combination of the three selectors on a board memory map.
pub struct Target<A, M, F, B = ConfiguredMemoryMap>(PhantomData<(A, M, F, B)>);

impl<A, M, F, B> Variant for Target<A, M, F, B>
where
    A: Architecture,
    M: Mode,
    F: Float,
    B: MemoryMap,
{
    const ARCHITECTURE: ArchitectureVariant = A::VARIANT;
    const BOOT_MODE: BootMode = M::MODE;
    const FLOAT: FloatSupport = F::SUPPORT;

    type FloatUnit = F;

    const VECTOR_TABLE_BASE: Option<u32> =
        vector_table_base(A::VARIANT, M::MODE, B::FLASH_BASE, B::SRAM_BASE);
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

/// Resolves the vector table address for a revision and boot mode.
pub const fn vector_table_base(
    arch: ArchitectureVariant,
    mode: BootMode,
    flash_base: u32,
    sram_base: u32,
) -> Option<u32> {
    match arch {
        ArchitectureVariant::ArmV6M => None,
        ArchitectureVariant::ArmV7M => match mode {
            // The table sits at the start of flash.
            BootMode::ExecuteInPlace => Some(flash_base),
            // The loader already placed it at the start of SRAM.
            BootMode::LoadedIntoRam => Some(sram_base),
        },
    }
}

//--------------------------------------------------------------------------------------------------
// Build selection
//--------------------------------------------------------------------------------------------------

#[cfg(not(any(feature = "armv6_m", feature = "armv7_m")))]
compile_error!("Unknown ARM architecture: enable `armv6_m` or `armv7_m`");
#[cfg(all(feature = "armv6_m", feature = "armv7_m"))]
compile_error!("Ambiguous ARM architecture: `armv6_m` and `armv7_m` are both enabled");
#[cfg(all(feature = "armv6_m", feature = "float"))]
compile_error!("ARMv6-M has no FP extension: `float` requires `armv7_m`");

#[cfg(all(feature = "armv6_m", not(feature = "armv7_m")))]
type SelectedArchitecture = ArmV6M;
#[cfg(all(feature = "armv7_m", not(feature = "armv6_m")))]
type SelectedArchitecture = ArmV7M;

#[cfg(feature = "xip")]
type SelectedMode = ExecuteInPlace;
#[cfg(not(feature = "xip"))]
type SelectedMode = LoadedIntoRam;

#[cfg(feature = "float")]
type SelectedFloat = HardFloat;
#[cfg(not(feature = "float"))]
type SelectedFloat = SoftFloat;

/// The variant this build was configured for.
#[cfg(any(
    all(feature = "armv6_m", not(feature = "armv7_m")),
    all(feature = "armv7_m", not(feature = "armv6_m"))
))]
pub type Selected = Target<SelectedArchitecture, SelectedMode, SelectedFloat>;

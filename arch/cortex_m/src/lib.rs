//! Cortex-M early runtime api.
//!
//! Everything here runs before `.bss` and `.data` are valid, so nothing in
//! this crate owns a `static`.
#![cfg_attr(not(test), no_std)]

/// Compile-time memory map.
pub mod config;
/// CPU api.
pub mod cpu;
/// FPU bring-up.
pub mod fpu;
/// Linker layout and storage primitives.
pub mod memory;
/// Boot sequence.
pub mod runtime_init;
/// System control space registers.
pub mod scs;
/// Build variant selection.
pub mod variant;
/// Vector table relocation.
pub mod vector;

#[cfg(test)]
mod testing;

pub use runtime_init::{prepare_runtime, Runtime};
pub use variant::{Selected, Variant};

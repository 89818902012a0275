//! System control space: the registers touched during boot.
//!
//! Only VTOR, CPACR and FPCCR are described. The boot code never reads them
//! back, it writes whole values built from named fields.

use core::{marker::PhantomData, ops::Deref};
use register::{mmio::*, register_bitfields, register_structs, FieldValue};

//--------------------------------------------------------------------------------------------------
// Register Definitions
//--------------------------------------------------------------------------------------------------

register_bitfields! {u32,
    /// Vector Table Offset Register.
    pub VTOR [
        /// Bits [31:7] of the vector table address.
        TBLOFF OFFSET(7) NUMBITS(25) []
    ],

    /// Coprocessor Access Control Register.
    pub CPACR [
        /// CP10, single precision FP.
        CP10 OFFSET(20) NUMBITS(2) [
            AccessDenied = 0b00,
            Privileged = 0b01,
            FullAccess = 0b11
        ],

        /// CP11, must match CP10.
        CP11 OFFSET(22) NUMBITS(2) [
            AccessDenied = 0b00,
            Privileged = 0b01,
            FullAccess = 0b11
        ]
    ],

    /// Floating-point Context Control Register.
    pub FPCCR [
        /// Lazy state preservation.
        LSPEN OFFSET(30) NUMBITS(1) [],

        /// Automatic state preservation on exception entry.
        ASPEN OFFSET(31) NUMBITS(1) []
    ]
}

register_structs! {
    #[allow(non_snake_case)]
    ScbRegisterBlock {
        (0x00 => CPUID: ReadOnly<u32>),
        (0x04 => ICSR: ReadWrite<u32>),
        (0x08 => VTOR: ReadWrite<u32, VTOR::Register>),
        (0x0c => _reserved0),
        (0x88 => CPACR: ReadWrite<u32, CPACR::Register>),
        (0x8c => @END),
    }
}

register_structs! {
    #[allow(non_snake_case)]
    FpuRegisterBlock {
        (0x00 => FPCCR: ReadWrite<u32, FPCCR::Register>),
        (0x04 => FPCAR: ReadWrite<u32>),
        (0x08 => FPDSCR: ReadWrite<u32>),
        (0x0c => @END),
    }
}

/// System Control Block base.
const SCB_START: usize = 0xE000_ED00;
/// FPCCR, first register of the FP extension block.
const FPU_START: usize = 0xE000_EF34;

/// Typed view of a register block at a fixed address.
struct MmioBlock<T> {
    start_addr: usize,
    phantom: PhantomData<fn() -> T>,
}

impl<T> MmioBlock<T> {
    const unsafe fn new(start_addr: usize) -> Self {
        Self {
            start_addr,
            phantom: PhantomData,
        }
    }
}

impl<T> Deref for MmioBlock<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        unsafe { &*(self.start_addr as *const _) }
    }
}

//--------------------------------------------------------------------------------------------------
// Public Definitions
//--------------------------------------------------------------------------------------------------

/// Write access to the boot-time control registers.
///
/// Implemented by [`Scs`] on hardware and by an in-memory fake in tests.
pub trait SystemControl {
    /// Write VTOR.
    fn write_vtor(&self, value: FieldValue<u32, VTOR::Register>);

    /// Write CPACR.
    fn write_cpacr(&self, value: FieldValue<u32, CPACR::Register>);

    /// Write FPCCR.
    fn write_fpccr(&self, value: FieldValue<u32, FPCCR::Register>);

    /// First use of the FP register file followed by `dsb; isb`.
    ///
    /// # Safety
    ///
    /// - CP10/CP11 must be accessible.
    unsafe fn touch_fp_context(&self);
}

/// The memory-mapped system control space of the running core.
pub struct Scs {
    scb: MmioBlock<ScbRegisterBlock>,
    fpu: MmioBlock<FpuRegisterBlock>,
}

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

impl Scs {
    /// Handles to the architectural SCS addresses.
    ///
    /// Building one is free: it lives on the stack and reads no static data.
    ///
    /// # Safety
    ///
    /// - Must run on a Cortex-M core.
    /// - The caller must be the only writer of these registers.
    pub const unsafe fn new() -> Self {
        Self {
            scb: MmioBlock::new(SCB_START),
            fpu: MmioBlock::new(FPU_START),
        }
    }
}

impl SystemControl for Scs {
    #[inline(always)]
    fn write_vtor(&self, value: FieldValue<u32, VTOR::Register>) {
        self.scb.VTOR.write(value);
    }

    #[inline(always)]
    fn write_cpacr(&self, value: FieldValue<u32, CPACR::Register>) {
        self.scb.CPACR.write(value);
    }

    #[inline(always)]
    fn write_fpccr(&self, value: FieldValue<u32, FPCCR::Register>) {
        self.fpu.FPCCR.write(value);
    }

    #[inline(always)]
    unsafe fn touch_fp_context(&self) {
        crate::cpu::touch_fp_registers();
    }
}

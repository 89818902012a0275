//! Fakes for the register backend and the boot collaborators.

use crate::{
    memory::{self, BootLayout, InitializedRegion, MemoryRegion},
    runtime_init::{prepare_runtime, Runtime},
    scs::{SystemControl, CPACR, FPCCR, VTOR},
    variant::Variant,
};
use register::{FieldValue, InMemoryRegister};
use std::{
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};

/// Something the boot sequence did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Vtor(u32),
    Cpacr(u32),
    Fpccr(u32),
    FpTouch,
    ZeroStorage,
    CopyStorage,
    KernelStart,
    Halt,
}

/// Ordered record shared by every fake of one boot.
#[derive(Clone, Default)]
pub struct Journal(Rc<RefCell<Vec<Event>>>);

impl Journal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: Event) {
        self.0.borrow_mut().push(event);
    }

    pub fn events(&self) -> Vec<Event> {
        self.0.borrow().clone()
    }
}

/// System control space held in memory, starting from reset values.
pub struct FakeScs {
    pub vtor: InMemoryRegister<u32, VTOR::Register>,
    pub cpacr: InMemoryRegister<u32, CPACR::Register>,
    pub fpccr: InMemoryRegister<u32, FPCCR::Register>,
    pub journal: Journal,
    writes: Cell<usize>,
}

impl FakeScs {
    pub fn at_reset(journal: Journal) -> Self {
        Self {
            vtor: InMemoryRegister::new(0),
            cpacr: InMemoryRegister::new(0),
            // ASPEN | LSPEN
            fpccr: InMemoryRegister::new(0xC000_0000),
            journal,
            writes: Cell::new(0),
        }
    }

    /// Register writes so far; the FP touch is not one.
    pub fn register_writes(&self) -> usize {
        self.writes.get()
    }

    fn count(&self) {
        self.writes.set(self.writes.get() + 1);
    }
}

impl SystemControl for FakeScs {
    fn write_vtor(&self, value: FieldValue<u32, VTOR::Register>) {
        self.vtor.write(value);
        self.count();
        self.journal.record(Event::Vtor(self.vtor.get()));
    }

    fn write_cpacr(&self, value: FieldValue<u32, CPACR::Register>) {
        self.cpacr.write(value);
        self.count();
        self.journal.record(Event::Cpacr(self.cpacr.get()));
    }

    fn write_fpccr(&self, value: FieldValue<u32, FPCCR::Register>) {
        self.fpccr.write(value);
        self.count();
        self.journal.record(Event::Fpccr(self.fpccr.get()));
    }

    unsafe fn touch_fp_context(&self) {
        self.journal.record(Event::FpTouch);
    }
}

/// How the fake kernel behaves once entered.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum KernelExit {
    /// Never comes back.
    Diverge,
    /// Returns to the boot sequence.
    Return,
}

/// Runs the real storage primitives and stands in for the kernel.
pub struct FakeRuntime {
    journal: Journal,
    exit: KernelExit,
}

impl FakeRuntime {
    pub fn new(journal: Journal, exit: KernelExit) -> Self {
        Self { journal, exit }
    }
}

impl Runtime for FakeRuntime {
    unsafe fn zero_storage(&mut self, region: MemoryRegion) {
        self.journal.record(Event::ZeroStorage);
        memory::zero_volatile(region);
    }

    unsafe fn copy_storage(&mut self, region: InitializedRegion) {
        self.journal.record(Event::CopyStorage);
        memory::copy_volatile(region);
    }

    unsafe fn kernel_start(&mut self) {
        self.journal.record(Event::KernelStart);
        if self.exit == KernelExit::Diverge {
            panic::panic_any(Event::KernelStart);
        }
    }

    fn halt(&mut self) -> ! {
        self.journal.record(Event::Halt);
        panic::panic_any(Event::Halt)
    }
}

/// Runs `prepare_runtime` and reports the event it left through.
///
/// The fakes leave by unwinding with an [`Event`] payload, the only way out
/// of a function that never returns.
pub fn run_boot<V: Variant>(scs: &FakeScs, layout: BootLayout, runtime: &mut FakeRuntime) -> Event {
    let result = panic::catch_unwind(AssertUnwindSafe(|| -> () {
        unsafe { prepare_runtime::<V, _, _>(scs, layout, runtime) }
    }));

    match result {
        Ok(()) => unreachable!("prepare_runtime returned"),
        Err(payload) => match payload.downcast::<Event>() {
            Ok(event) => *event,
            Err(_) => panic!("boot left through an unexpected panic"),
        },
    }
}

use crate::{
    cpu::mask_interrupts,
    memory::linker_layout,
    runtime_init::{prepare_runtime, LinkedRuntime},
    scs::Scs,
    variant::Selected,
};

/// Rust entry called by the reset handler once a stack is set up.
///
/// Takes no arguments and never returns. Interrupts are masked here and left
/// masked for the kernel to enable once its own handlers are in place.
///
/// # Safety
///
/// - Only a single core must be active and running this function.
/// - Must be called exactly once, before anything touches `.bss` or `.data`.
#[no_mangle]
pub unsafe extern "C" fn _prep_c() -> ! {
    mask_interrupts();

    let scs = Scs::new();
    let mut runtime = LinkedRuntime;

    prepare_runtime::<Selected, _, _>(&scs, linker_layout(), &mut runtime)
}

//! A panic handler that infinitely waits.

use crate::println;
use core::panic::PanicInfo;

#[panic_handler]
fn panic(info: &PanicInfo) -> ! {
    println!("\nKernel panic: {}", info);

    arch::cpu::wait_forever()
}

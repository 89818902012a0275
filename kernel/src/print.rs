//! Printing over the semihosting console.

use core::fmt::{self, Write};
use cortex_m_semihosting::hio;

//--------------------------------------------------------------------------------------------------
// Public Code
//--------------------------------------------------------------------------------------------------

#[doc(hidden)]
pub fn _print(args: fmt::Arguments) {
    // Without a debugger attached there is nowhere to print to.
    if let Ok(mut stdout) = hio::hstdout() {
        let _ = stdout.write_fmt(args);
    }
}

/// Prints without a newline.
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => ($crate::print::_print(format_args!($($arg)*)));
}

/// Prints with a newline.
#[macro_export]
macro_rules! println {
    () => ($crate::print!("\n"));
    ($($arg:tt)*) => ({
        $crate::print::_print(format_args!("{}\n", format_args!($($arg)*)));
    })
}

//! Raw-mode access to POSIX serial (TTY) devices.
//!
//! This crate opens a TTY device, puts it into a fixed binary-safe raw mode
//! (8N1, no flow control, no echo, no input or output translation), applies a
//! baud rate from the OS-recognized set, and exposes plain blocking reads and
//! writes. Reads block for at most a configurable inter-byte timeout with
//! decisecond (100 ms) granularity, implemented with the terminal driver's
//! `VTIME`/`VMIN` mechanism rather than polling.
//!
//! There is no protocol layer, no framing, and no retry logic; this is the
//! transport primitive beneath whatever speaks over the wire.
//!
//! ```no_run
//! use std::time::Duration;
//!
//! let mut port = serial_raw::open("/dev/ttyUSB0",
//!                                 serial_raw::BaudRate::Baud115200,
//!                                 Duration::from_millis(1000)).unwrap();
//!
//! port.write(b"hello").unwrap();
//!
//! let mut buf = [0u8; 64];
//! let n = port.read(&mut buf).unwrap();
//! println!("received {} bytes", n);
//! ```

use std::ffi::OsStr;
use std::path::Path;
use std::time::Duration;

pub use crate::baud::BaudRate;
pub use crate::error::{Error, ErrorKind, Result};
pub use crate::tty::TTYPort;

mod baud;
mod error;
mod tty;

/// A convenience function for opening a serial port.
///
/// The argument must be a path to a TTY device file, e.g., `/dev/ttyUSB0`.
/// Hard-coding the device name diminishes the utility of `serial_raw::open()`;
/// device names should come from external sources:
///
/// ```no_run
/// use std::env;
/// use std::time::Duration;
///
/// for arg in env::args_os().skip(1) {
///     let port = serial_raw::open(&arg,
///                                 serial_raw::BaudRate::Baud9600,
///                                 Duration::from_millis(500)).unwrap();
/// }
/// ```
pub fn open<T: AsRef<OsStr> + ?Sized>(
    port: &T,
    baud_rate: BaudRate,
    timeout: Duration,
) -> Result<TTYPort> {
    TTYPort::open(Path::new(port), baud_rate, timeout)
}

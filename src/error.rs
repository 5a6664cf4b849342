use std::error;
use std::fmt;
use std::io;

/// A type for results generated by this crate, where the `Err` type is
/// [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Categories of errors that can occur when opening or using a serial port.
///
/// Each variant identifies the operation that failed; the OS-level cause
/// travels alongside it in [`Error`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The device path could not be opened.
    Open,

    /// The device's current terminal attributes could not be read. This
    /// usually means the device is not a TTY.
    ReadAttributes,

    /// The mutated terminal attributes were rejected by the device.
    WriteAttributes,

    /// The requested baud rate was rejected by the device driver.
    SetBaudRate,

    /// The underlying read call failed. A timed-out read that returns no
    /// bytes is a success, not this error.
    Read,

    /// The underlying write call failed. A short write is a success, not
    /// this error.
    Write,
}

impl ErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Open => "could not open device",
            ErrorKind::ReadAttributes => "could not read terminal attributes",
            ErrorKind::WriteAttributes => "could not apply terminal attributes",
            ErrorKind::SetBaudRate => "could not set baud rate",
            ErrorKind::Read => "read from device failed",
            ErrorKind::Write => "write to device failed",
        }
    }
}

/// An error from a serial port operation.
///
/// Carries the failing operation as an [`ErrorKind`] and, when the failure
/// originated in a system call, the raw OS error code and its message.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    errno: Option<i32>,
    description: String,
}

impl Error {
    /// Creates an error with a custom description and no OS error code.
    pub fn new<T: Into<String>>(kind: ErrorKind, description: T) -> Self {
        Error {
            kind,
            errno: None,
            description: description.into(),
        }
    }

    pub(crate) fn last_os_error(kind: ErrorKind) -> Self {
        Error::from_io_error(kind, io::Error::last_os_error())
    }

    pub(crate) fn from_io_error(kind: ErrorKind, io_error: io::Error) -> Self {
        Error {
            kind,
            errno: io_error.raw_os_error(),
            description: io_error.to_string(),
        }
    }

    /// Returns the operation that failed.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the raw OS error code, if the failure came from a system call.
    pub fn errno(&self) -> Option<i32> {
        self.errno
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.description)
    }
}

impl error::Error for Error {}

impl From<Error> for io::Error {
    fn from(error: Error) -> io::Error {
        match error.errno {
            Some(errno) => io::Error::from_raw_os_error(errno),
            None => io::Error::new(io::ErrorKind::Other, error.description),
        }
    }
}

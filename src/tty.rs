use std::ffi::CString;
use std::io;
use std::path::Path;
use std::time::Duration;

use std::os::unix::prelude::*;

use libc::{c_void, size_t};
use log::{debug, info};

use crate::baud::BaudRate;
use crate::error::{Error, ErrorKind, Result};

/// A serial port handle for a TTY device.
///
/// The device is configured once, at open time, into a fixed raw mode; there
/// is no API to reconfigure an open port. The port owns the underlying file
/// descriptor and closes it when the value is dropped.
///
/// A `TTYPort` is not synchronized. If multiple threads share one port, the
/// caller must serialize access; interleaved reads and writes on the same
/// descriptor have no combined ordering guarantee.
pub struct TTYPort {
    fd: RawFd,
    timeout: Duration,
}

impl TTYPort {
    /// Opens a TTY device as a raw serial port.
    ///
    /// `path` should be the path to a TTY device, e.g., `/dev/ttyUSB0`. The
    /// device is switched to a fixed raw profile: 8 data bits, no parity, one
    /// stop bit, no flow control, no echo, no canonical buffering, and no
    /// input or output byte translation. Received bytes are never interpreted
    /// as control signals.
    ///
    /// `timeout` bounds how long a read blocks waiting for the first byte.
    /// The terminal driver counts it in deciseconds, so the value is rounded
    /// down to a multiple of 100 ms; anything under 100 ms yields
    /// immediate-return reads, and anything over 25.5 s is clamped.
    ///
    /// The attribute set is written to the device first; the output baud rate
    /// is applied afterwards as its own attribute write. On any failure after
    /// the device has been opened, the descriptor is closed before the error
    /// is returned; a `TTYPort` either exists fully configured or not at all.
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use std::time::Duration;
    ///
    /// use serial_raw::{BaudRate, TTYPort};
    ///
    /// TTYPort::open(Path::new("/dev/ttyS0"), BaudRate::Baud9600,
    ///               Duration::from_millis(1000)).unwrap();
    /// ```
    pub fn open(path: &Path, baud_rate: BaudRate, timeout: Duration) -> Result<Self> {
        use libc::{F_SETFL, O_NOCTTY, O_NONBLOCK, O_RDWR};

        use termios::os::target::CRTSCTS;
        use termios::{cfsetospeed, tcsetattr, Termios};
        use termios::{CLOCAL, CREAD, CS8, CSIZE, CSTOPB, PARENB, TCSANOW};
        use termios::{ECHO, ECHOE, ECHOK, ECHONL, ICANON, IEXTEN, ISIG};
        use termios::{BRKINT, ICRNL, IGNBRK, IGNCR, INLCR, ISTRIP, PARMRK};
        use termios::{IXANY, IXOFF, IXON};
        use termios::{ONLCR, OPOST};
        use termios::{VMIN, VTIME};

        debug!("opening serial device {:?}", path);

        let cstr = match CString::new(path.as_os_str().as_bytes()) {
            Ok(s) => s,
            Err(_) => {
                return Err(Error::new(
                    ErrorKind::Open,
                    "device path contains a NUL byte",
                ))
            }
        };

        // O_NONBLOCK keeps open() from hanging on a modem line waiting for
        // carrier; it is cleared again below so reads honor VTIME.
        let fd = unsafe { libc::open(cstr.as_ptr(), O_RDWR | O_NOCTTY | O_NONBLOCK, 0) };
        if fd < 0 {
            return Err(Error::last_os_error(ErrorKind::Open));
        }

        let vtime = vtime_deciseconds(timeout);

        // The port owns the descriptor from here on, so any early return
        // closes it via Drop rather than leaking an unconfigured device.
        let port = TTYPort {
            fd,
            timeout: Duration::from_millis(u64::from(vtime) * 100),
        };

        if unsafe { libc::fcntl(port.fd, F_SETFL, 0) } < 0 {
            return Err(Error::last_os_error(ErrorKind::Open));
        }

        let mut tty = match Termios::from_fd(port.fd) {
            Ok(t) => t,
            Err(err) => return Err(Error::from_io_error(ErrorKind::ReadAttributes, err)),
        };

        // 8N1, no flow control, receiver on, modem control lines ignored
        tty.c_cflag &= !(PARENB | CSTOPB | CSIZE | CRTSCTS);
        tty.c_cflag |= CS8 | CREAD | CLOCAL;

        // raw input: no line buffering, no echo, no signal characters
        tty.c_lflag &= !(ICANON | ECHO | ECHOE | ECHOK | ECHONL | ISIG | IEXTEN);

        // no software flow control, no special handling of received bytes
        tty.c_iflag &= !(IXON | IXOFF | IXANY);
        tty.c_iflag &= !(IGNBRK | BRKINT | PARMRK | ISTRIP | INLCR | IGNCR | ICRNL);

        // no output post-processing, no NL-to-CRLF translation
        tty.c_oflag &= !(OPOST | ONLCR);

        // return as soon as any data arrives, or after `vtime` deciseconds
        tty.c_cc[VMIN] = 0;
        tty.c_cc[VTIME] = vtime;

        if let Err(err) = tcsetattr(port.fd, TCSANOW, &tty) {
            return Err(Error::from_io_error(ErrorKind::WriteAttributes, err));
        }

        // The output speed is applied after the structural attributes, as its
        // own attribute write.
        if let Err(err) = cfsetospeed(&mut tty, termios_speed(baud_rate)) {
            return Err(Error::from_io_error(ErrorKind::SetBaudRate, err));
        }

        if let Err(err) = tcsetattr(port.fd, TCSANOW, &tty) {
            return Err(Error::from_io_error(ErrorKind::SetBaudRate, err));
        }

        info!(
            "serial device {:?} initialized at {} baud",
            path,
            baud_rate.speed()
        );

        Ok(port)
    }

    /// Returns the configured read timeout, quantized to deciseconds.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Reads up to `buf.len()` bytes from the device.
    ///
    /// Blocks until at least one byte is available or the configured timeout
    /// elapses, whichever comes first. A timeout with no data returns
    /// `Ok(0)`; a short read is a normal result. The call fails only when the
    /// underlying read reports an error, e.g. the device disconnected.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize> {
        let len = unsafe { libc::read(self.fd, buf.as_mut_ptr() as *mut c_void, buf.len() as size_t) };

        if len >= 0 {
            Ok(len as usize)
        } else {
            Err(Error::last_os_error(ErrorKind::Read))
        }
    }

    /// Writes up to `buf.len()` bytes to the device.
    ///
    /// Returns the number of bytes the device accepted, which may be less
    /// than requested; no retry loop is performed to force a complete write.
    pub fn write(&mut self, buf: &[u8]) -> Result<usize> {
        let len = unsafe { libc::write(self.fd, buf.as_ptr() as *const c_void, buf.len() as size_t) };

        if len >= 0 {
            Ok(len as usize)
        } else {
            Err(Error::last_os_error(ErrorKind::Write))
        }
    }
}

impl Drop for TTYPort {
    fn drop(&mut self) {
        unsafe {
            libc::close(self.fd);
        }
    }
}

impl AsRawFd for TTYPort {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl io::Read for TTYPort {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        TTYPort::read(self, buf).map_err(Into::into)
    }
}

impl io::Write for TTYPort {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        TTYPort::write(self, buf).map_err(Into::into)
    }

    fn flush(&mut self) -> io::Result<()> {
        termios::tcdrain(self.fd)
    }
}

/// Quantizes a timeout to the terminal driver's decisecond VTIME field.
fn vtime_deciseconds(timeout: Duration) -> termios::cc_t {
    let deciseconds = timeout.as_millis() / 100;

    deciseconds.min(u128::from(termios::cc_t::MAX)) as termios::cc_t
}

fn termios_speed(baud_rate: BaudRate) -> termios::speed_t {
    use termios::os::target::{B115200, B230400, B57600};
    use termios::{
        B110, B1200, B134, B150, B1800, B19200, B200, B2400, B300, B38400, B4800, B50, B600, B75,
        B9600,
    };

    #[cfg(target_os = "linux")]
    use termios::os::linux::{
        B1000000, B1152000, B1500000, B2000000, B2500000, B3000000, B3500000, B4000000, B460800,
        B500000, B576000, B921600,
    };

    match baud_rate {
        BaudRate::Baud50 => B50,
        BaudRate::Baud75 => B75,
        BaudRate::Baud110 => B110,
        BaudRate::Baud134 => B134,
        BaudRate::Baud150 => B150,
        BaudRate::Baud200 => B200,
        BaudRate::Baud300 => B300,
        BaudRate::Baud600 => B600,
        BaudRate::Baud1200 => B1200,
        BaudRate::Baud1800 => B1800,
        BaudRate::Baud2400 => B2400,
        BaudRate::Baud4800 => B4800,
        BaudRate::Baud9600 => B9600,
        BaudRate::Baud19200 => B19200,
        BaudRate::Baud38400 => B38400,
        BaudRate::Baud57600 => B57600,
        BaudRate::Baud115200 => B115200,
        BaudRate::Baud230400 => B230400,

        #[cfg(target_os = "linux")]
        BaudRate::Baud460800 => B460800,
        #[cfg(target_os = "linux")]
        BaudRate::Baud500000 => B500000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud576000 => B576000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud921600 => B921600,
        #[cfg(target_os = "linux")]
        BaudRate::Baud1000000 => B1000000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud1152000 => B1152000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud1500000 => B1500000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud2000000 => B2000000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud2500000 => B2500000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud3000000 => B3000000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud3500000 => B3500000,
        #[cfg(target_os = "linux")]
        BaudRate::Baud4000000 => B4000000,
    }
}

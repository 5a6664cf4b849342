//! Integration tests that exercise `TTYPort` against pseudo-terminal pairs.

use std::ffi::CStr;
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use std::os::unix::prelude::*;

use rstest::rstest;

use serial_raw::{BaudRate, ErrorKind, TTYPort};

/// The master side of a pseudo-terminal pair.
///
/// Must be kept alive for as long as the slave side is in use; dropping the
/// master hangs up the line.
struct PtyMaster {
    file: File,
    slave_path: PathBuf,
}

fn openpty() -> PtyMaster {
    unsafe {
        let fd = libc::posix_openpt(libc::O_RDWR | libc::O_NOCTTY);
        assert!(fd >= 0, "posix_openpt failed");

        assert_eq!(libc::grantpt(fd), 0, "grantpt failed");
        assert_eq!(libc::unlockpt(fd), 0, "unlockpt failed");

        let mut name = [0 as libc::c_char; 128];
        assert_eq!(
            libc::ptsname_r(fd, name.as_mut_ptr(), name.len()),
            0,
            "ptsname_r failed"
        );

        let slave_path = PathBuf::from(
            CStr::from_ptr(name.as_ptr())
                .to_str()
                .expect("pty slave path is not UTF-8"),
        );

        PtyMaster {
            file: File::from_raw_fd(fd),
            slave_path,
        }
    }
}

#[rstest]
#[case::baud50(BaudRate::Baud50)]
#[case::baud75(BaudRate::Baud75)]
#[case::baud110(BaudRate::Baud110)]
#[case::baud134(BaudRate::Baud134)]
#[case::baud150(BaudRate::Baud150)]
#[case::baud200(BaudRate::Baud200)]
#[case::baud300(BaudRate::Baud300)]
#[case::baud600(BaudRate::Baud600)]
#[case::baud1200(BaudRate::Baud1200)]
#[case::baud1800(BaudRate::Baud1800)]
#[case::baud2400(BaudRate::Baud2400)]
#[case::baud4800(BaudRate::Baud4800)]
#[case::baud9600(BaudRate::Baud9600)]
#[case::baud19200(BaudRate::Baud19200)]
#[case::baud38400(BaudRate::Baud38400)]
#[case::baud57600(BaudRate::Baud57600)]
#[case::baud115200(BaudRate::Baud115200)]
#[case::baud230400(BaudRate::Baud230400)]
fn open_succeeds_for_every_baud_rate(#[case] baud_rate: BaudRate) {
    let master = openpty();

    let port = TTYPort::open(&master.slave_path, baud_rate, Duration::from_millis(100));
    assert!(port.is_ok(), "open at {} baud failed: {:?}", baud_rate.speed(), port.err());
}

#[cfg(target_os = "linux")]
#[test_log::test]
fn open_succeeds_for_linux_extended_baud_rates() {
    for baud_rate in [
        BaudRate::Baud460800,
        BaudRate::Baud500000,
        BaudRate::Baud576000,
        BaudRate::Baud921600,
        BaudRate::Baud1000000,
        BaudRate::Baud1152000,
        BaudRate::Baud1500000,
        BaudRate::Baud2000000,
        BaudRate::Baud2500000,
        BaudRate::Baud3000000,
        BaudRate::Baud3500000,
        BaudRate::Baud4000000,
    ] {
        let master = openpty();

        let port = TTYPort::open(&master.slave_path, baud_rate, Duration::from_millis(100));
        assert!(port.is_ok(), "open at {} baud failed: {:?}", baud_rate.speed(), port.err());
    }
}

#[test_log::test]
fn open_nonexistent_path_fails_with_open_error() {
    let result = TTYPort::open(
        Path::new("/dev/serial-raw-does-not-exist"),
        BaudRate::Baud9600,
        Duration::from_millis(100),
    );

    let error = result.err().expect("open of a nonexistent path succeeded");
    assert_eq!(error.kind(), ErrorKind::Open);
    assert_eq!(error.errno(), Some(libc::ENOENT));
}

#[test_log::test]
fn open_non_tty_fails_with_attribute_read_error() {
    let result = TTYPort::open(
        Path::new("/dev/null"),
        BaudRate::Baud9600,
        Duration::from_millis(100),
    );

    let error = result.err().expect("open of /dev/null succeeded");
    assert_eq!(error.kind(), ErrorKind::ReadAttributes);
    assert_eq!(error.errno(), Some(libc::ENOTTY));
}

#[test_log::test]
fn open_applies_raw_profile() {
    use termios::os::target::CRTSCTS;
    use termios::{CS8, CSIZE, CSTOPB, PARENB};
    use termios::{CLOCAL, CREAD};
    use termios::{ECHO, ECHOE, ECHOK, ECHONL, ICANON, ISIG};
    use termios::{IXOFF, IXON};
    use termios::{ONLCR, OPOST};
    use termios::{VMIN, VTIME};

    let master = openpty();
    let port = TTYPort::open(&master.slave_path, BaudRate::Baud115200, Duration::from_millis(250))
        .unwrap();

    let tty = termios::Termios::from_fd(port.as_raw_fd()).unwrap();

    assert_eq!(tty.c_cflag & PARENB, 0, "parity still enabled");
    assert_eq!(tty.c_cflag & CSTOPB, 0, "two stop bits configured");
    assert_eq!(tty.c_cflag & CSIZE, CS8, "character size is not 8 bits");
    assert_eq!(tty.c_cflag & CRTSCTS, 0, "hardware flow control still enabled");
    assert_eq!(
        tty.c_cflag & (CREAD | CLOCAL),
        CREAD | CLOCAL,
        "receiver off or modem lines not ignored"
    );

    assert_eq!(
        tty.c_lflag & (ICANON | ECHO | ECHOE | ECHOK | ECHONL | ISIG),
        0,
        "canonical mode, echo, or signal characters still enabled"
    );

    assert_eq!(tty.c_iflag & (IXON | IXOFF), 0, "software flow control still enabled");
    assert_eq!(tty.c_oflag & (OPOST | ONLCR), 0, "output post-processing still enabled");

    assert_eq!(tty.c_cc[VMIN], 0);
    assert_eq!(tty.c_cc[VTIME], 2);
}

#[rstest]
#[case(250, 2)]
#[case(1000, 10)]
#[case(50, 0)]
fn timeout_quantizes_to_deciseconds_on_device(#[case] timeout_ms: u64, #[case] vtime: u8) {
    use termios::VTIME;

    let master = openpty();
    let port = TTYPort::open(
        &master.slave_path,
        BaudRate::Baud9600,
        Duration::from_millis(timeout_ms),
    )
    .unwrap();

    let tty = termios::Termios::from_fd(port.as_raw_fd()).unwrap();
    assert_eq!(tty.c_cc[VTIME], vtime);

    assert_eq!(port.timeout(), Duration::from_millis(u64::from(vtime) * 100));
}

#[test_log::test]
fn bytes_written_to_master_are_read_from_port() {
    let mut master = openpty();
    let mut port =
        TTYPort::open(&master.slave_path, BaudRate::Baud115200, Duration::from_millis(500))
            .unwrap();

    // includes CR, NL, and high-bit bytes that raw mode must pass untouched
    let payload = b"\x00\x01\x7f\x80\xff\r\nserial";
    master.file.write_all(payload).unwrap();

    let mut received = Vec::new();
    let mut buf = [0u8; 64];

    while received.len() < payload.len() {
        let n = port.read(&mut buf).unwrap();
        if n == 0 {
            break;
        }
        received.extend_from_slice(&buf[..n]);
    }

    assert_eq!(received, payload);
}

#[test_log::test]
fn bytes_written_to_port_are_read_from_master() {
    let mut master = openpty();
    let mut port =
        TTYPort::open(&master.slave_path, BaudRate::Baud115200, Duration::from_millis(500))
            .unwrap();

    let payload = b"\x02\x03\xfe\r\nresponse";
    let written = port.write(payload).unwrap();
    assert_eq!(written, payload.len());

    let mut received = Vec::new();
    let mut buf = [0u8; 64];

    while received.len() < payload.len() {
        let n = master.file.read(&mut buf).unwrap();
        received.extend_from_slice(&buf[..n]);
    }

    assert_eq!(received, payload);
}

#[test_log::test]
fn read_with_no_data_times_out_empty() {
    let master = openpty();
    let mut port =
        TTYPort::open(&master.slave_path, BaudRate::Baud9600, Duration::from_millis(250))
            .unwrap();

    let start = Instant::now();
    let mut buf = [0u8; 16];
    let n = port.read(&mut buf).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(n, 0, "read returned data on an idle line");
    assert!(
        elapsed >= Duration::from_millis(100),
        "read returned before the timeout: {:?}",
        elapsed
    );
    assert!(
        elapsed < Duration::from_secs(2),
        "read blocked well past the timeout: {:?}",
        elapsed
    );
}

#[test_log::test]
fn zero_timeout_read_returns_immediately() {
    let master = openpty();
    let mut port =
        TTYPort::open(&master.slave_path, BaudRate::Baud9600, Duration::from_millis(50))
            .unwrap();

    let start = Instant::now();
    let mut buf = [0u8; 16];
    let n = port.read(&mut buf).unwrap();

    assert_eq!(n, 0);
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[test_log::test]
fn round_trip_is_stable_across_repeated_runs() {
    let mut master = openpty();
    let mut port =
        TTYPort::open(&master.slave_path, BaudRate::Baud115200, Duration::from_millis(500))
            .unwrap();

    for round in 0u8..5 {
        let payload = [round, round.wrapping_add(1), 0xaa, 0x55];
        master.file.write_all(&payload).unwrap();

        let mut received = Vec::new();
        let mut buf = [0u8; 16];

        while received.len() < payload.len() {
            let n = port.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            received.extend_from_slice(&buf[..n]);
        }

        assert_eq!(received, payload, "round {} corrupted the payload", round);
    }
}

use std::env;
use std::time::Duration;

use serial_raw::BaudRate;

fn main() {
    for arg in env::args_os().skip(1) {
        println!("opening port: {:?}", arg);

        let mut port = serial_raw::open(&arg, BaudRate::Baud115200, Duration::from_millis(1000))
            .unwrap();

        let mut buf: Vec<u8> = (0..255).collect();

        println!("writing bytes");
        let written = port.write(&buf[..]).unwrap();
        println!("wrote {} bytes", written);

        println!("reading bytes");
        let read = port.read(&mut buf[..]).unwrap();
        println!("read {} bytes: {:?}", read, &buf[..read]);
    }
}

/// Serial port baud rates.
///
/// The variants mirror the line speeds the operating system's terminal driver
/// recognizes. Arbitrary integer rates are not representable; a rate outside
/// this set is a caller error, not something the driver gets to reject at
/// runtime. On Linux the extended high-speed constants are available as
/// additional variants.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BaudRate {
    /// 50 baud.
    Baud50,
    /// 75 baud.
    Baud75,
    /// 110 baud.
    Baud110,
    /// 134 baud.
    Baud134,
    /// 150 baud.
    Baud150,
    /// 200 baud.
    Baud200,
    /// 300 baud.
    Baud300,
    /// 600 baud.
    Baud600,
    /// 1200 baud.
    Baud1200,
    /// 1800 baud.
    Baud1800,
    /// 2400 baud.
    Baud2400,
    /// 4800 baud.
    Baud4800,
    /// 9600 baud.
    Baud9600,
    /// 19,200 baud.
    Baud19200,
    /// 38,400 baud.
    Baud38400,
    /// 57,600 baud.
    Baud57600,
    /// 115,200 baud.
    Baud115200,
    /// 230,400 baud.
    Baud230400,

    /// 460,800 baud.
    #[cfg(target_os = "linux")]
    Baud460800,
    /// 500,000 baud.
    #[cfg(target_os = "linux")]
    Baud500000,
    /// 576,000 baud.
    #[cfg(target_os = "linux")]
    Baud576000,
    /// 921,600 baud.
    #[cfg(target_os = "linux")]
    Baud921600,
    /// 1,000,000 baud.
    #[cfg(target_os = "linux")]
    Baud1000000,
    /// 1,152,000 baud.
    #[cfg(target_os = "linux")]
    Baud1152000,
    /// 1,500,000 baud.
    #[cfg(target_os = "linux")]
    Baud1500000,
    /// 2,000,000 baud.
    #[cfg(target_os = "linux")]
    Baud2000000,
    /// 2,500,000 baud.
    #[cfg(target_os = "linux")]
    Baud2500000,
    /// 3,000,000 baud.
    #[cfg(target_os = "linux")]
    Baud3000000,
    /// 3,500,000 baud.
    #[cfg(target_os = "linux")]
    Baud3500000,
    /// 4,000,000 baud.
    #[cfg(target_os = "linux")]
    Baud4000000,
}

impl BaudRate {
    /// Returns the numeric line speed in bits per second.
    pub fn speed(self) -> usize {
        match self {
            BaudRate::Baud50 => 50,
            BaudRate::Baud75 => 75,
            BaudRate::Baud110 => 110,
            BaudRate::Baud134 => 134,
            BaudRate::Baud150 => 150,
            BaudRate::Baud200 => 200,
            BaudRate::Baud300 => 300,
            BaudRate::Baud600 => 600,
            BaudRate::Baud1200 => 1200,
            BaudRate::Baud1800 => 1800,
            BaudRate::Baud2400 => 2400,
            BaudRate::Baud4800 => 4800,
            BaudRate::Baud9600 => 9600,
            BaudRate::Baud19200 => 19200,
            BaudRate::Baud38400 => 38400,
            BaudRate::Baud57600 => 57600,
            BaudRate::Baud115200 => 115200,
            BaudRate::Baud230400 => 230400,

            #[cfg(target_os = "linux")]
            BaudRate::Baud460800 => 460800,
            #[cfg(target_os = "linux")]
            BaudRate::Baud500000 => 500000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud576000 => 576000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud921600 => 921600,
            #[cfg(target_os = "linux")]
            BaudRate::Baud1000000 => 1000000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud1152000 => 1152000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud1500000 => 1500000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud2000000 => 2000000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud2500000 => 2500000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud3000000 => 3000000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud3500000 => 3500000,
            #[cfg(target_os = "linux")]
            BaudRate::Baud4000000 => 4000000,
        }
    }

    /// Looks up the variant for a numeric line speed.
    ///
    /// Returns `None` if the speed is not one the operating system recognizes.
    pub fn from_speed(speed: usize) -> Option<BaudRate> {
        match speed {
            50 => Some(BaudRate::Baud50),
            75 => Some(BaudRate::Baud75),
            110 => Some(BaudRate::Baud110),
            134 => Some(BaudRate::Baud134),
            150 => Some(BaudRate::Baud150),
            200 => Some(BaudRate::Baud200),
            300 => Some(BaudRate::Baud300),
            600 => Some(BaudRate::Baud600),
            1200 => Some(BaudRate::Baud1200),
            1800 => Some(BaudRate::Baud1800),
            2400 => Some(BaudRate::Baud2400),
            4800 => Some(BaudRate::Baud4800),
            9600 => Some(BaudRate::Baud9600),
            19200 => Some(BaudRate::Baud19200),
            38400 => Some(BaudRate::Baud38400),
            57600 => Some(BaudRate::Baud57600),
            115200 => Some(BaudRate::Baud115200),
            230400 => Some(BaudRate::Baud230400),

            #[cfg(target_os = "linux")]
            460800 => Some(BaudRate::Baud460800),
            #[cfg(target_os = "linux")]
            500000 => Some(BaudRate::Baud500000),
            #[cfg(target_os = "linux")]
            576000 => Some(BaudRate::Baud576000),
            #[cfg(target_os = "linux")]
            921600 => Some(BaudRate::Baud921600),
            #[cfg(target_os = "linux")]
            1000000 => Some(BaudRate::Baud1000000),
            #[cfg(target_os = "linux")]
            1152000 => Some(BaudRate::Baud1152000),
            #[cfg(target_os = "linux")]
            1500000 => Some(BaudRate::Baud1500000),
            #[cfg(target_os = "linux")]
            2000000 => Some(BaudRate::Baud2000000),
            #[cfg(target_os = "linux")]
            2500000 => Some(BaudRate::Baud2500000),
            #[cfg(target_os = "linux")]
            3000000 => Some(BaudRate::Baud3000000),
            #[cfg(target_os = "linux")]
            3500000 => Some(BaudRate::Baud3500000),
            #[cfg(target_os = "linux")]
            4000000 => Some(BaudRate::Baud4000000),

            _ => None,
        }
    }
}

//! DS3231 driver shell: transport, attach-time normalization, and the
//! time transcoder

use embedded_hal::i2c::I2c;
use log::error;
use ufmt::{uDebug, uWrite, Formatter};

use crate::{
    bcd, calendar,
    registers::{
        A1IE_MASK, A2IE_MASK, CENTURY_MASK, CONTROL, DAY, DAY_MASK, DS3231_ADDR, EOSC_MASK, HOURS,
        HOURS_MASK, HOUR_SELECT_MASK, INTCN_MASK, MINUTES, MINUTES_MASK, MONTH, MONTH_MASK,
        OSF_MASK, SECONDS, SECONDS_MASK, STATUS, TEN_DAYS_MASK, TEN_HOURS_MASK, TEN_MINUTES_MASK,
        TEN_MONTHS_MASK, TEN_SECONDS_MASK, TEN_YEARS_MASK, TWENTY_HOURS_MASK, WEEKDAY, YEAR,
        YEAR_MASK,
    },
    time::{CalendarTime, DEFAULT_EPOCH_YEAR},
};

/// Only diagnostic command code recognized by [`Ds3231::diagnostic`]
pub const DIAG_LAST_MESSAGE: u8 = 0xFF;

/// Control register flags that must all be clear in the baseline state:
/// oscillator running, no alarm interrupts, no interrupt routing
const BASELINE_CONTROL_MASK: u8 = EOSC_MASK | INTCN_MASK | A2IE_MASK | A1IE_MASK;

type DriverResult<T, E> = Result<T, Error<E>>;

/// Driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error<E> {
    /// A register transaction failed; carries the bus error unchanged
    Transport(E),
    /// Unrecognized diagnostic command code
    InvalidCommand,
}

impl<E> uDebug for Error<E>
where
    E: uDebug,
{
    fn fmt<W>(&self, f: &mut Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        match self {
            Self::Transport(e) => f.debug_tuple("Transport")?.field(e)?.finish(),
            Self::InvalidCommand => f.write_str("InvalidCommand"),
        }
    }
}

/// DS3231 real-time clock; interfaced via I2C
///
/// The driver holds no copy of the device's time: every read and write is a
/// fresh sequence of single-byte register transactions against the chip, and
/// any transport failure aborts the whole operation at the failing register.
/// Call [`Ds3231::attach`] once before using the device as a time source.
#[must_use]
pub struct Ds3231<I2C> {
    i2c: I2C,
    epoch: u16,
    last_diagnostic: u8,
}

// Lifecycle
impl<I2C> Ds3231<I2C> {
    /// Bind the device by taking ownership of the I2C bus, counting years
    /// from [`DEFAULT_EPOCH_YEAR`]
    pub const fn new(i2c: I2C) -> Self {
        Self::with_epoch(i2c, DEFAULT_EPOCH_YEAR)
    }

    /// Bind the device with an explicit epoch year for the two-century window
    pub const fn with_epoch(i2c: I2C, epoch: u16) -> Self {
        Self {
            i2c,
            epoch,
            last_diagnostic: 0,
        }
    }

    /// Unbind to release the I2C bus; no device-side action is taken
    #[must_use]
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Ds3231<I2C>
where
    I2C: I2c,
{
    /// One-shot normalization, run once at attach time before the device is
    /// used as a time source
    ///
    /// Reads the configuration registers and rewrites each only if it
    /// deviates from the baseline: oscillator running, no interrupts enabled
    /// or routed, oscillator-stop latch acknowledged, 24-hour mode. Running
    /// it again on an already-normalized device performs no writes.
    ///
    /// # Errors
    /// Returns the first transport error encountered; the device must not be
    /// exposed as a time source if normalization cannot complete
    pub fn attach(&mut self) -> DriverResult<(), I2C::Error> {
        self.last_diagnostic = 0;

        let control = self.read_register(CONTROL)?;
        if control & BASELINE_CONTROL_MASK != 0 {
            self.write_register(CONTROL, control & !BASELINE_CONTROL_MASK)?;
        }

        let status = self.read_register(STATUS)?;
        if status & OSF_MASK != 0 {
            self.write_register(STATUS, status & !OSF_MASK)?;
        }

        let hours = self.read_register(HOURS)?;
        if hours & HOUR_SELECT_MASK != 0 {
            self.write_register(HOURS, hours & !HOUR_SELECT_MASK)?;
        }

        Ok(())
    }

    /// Read the current date and time from the device
    ///
    /// The seven time/date registers are read one at a time in address
    /// order; the weekday register is read in sequence but its value is
    /// discarded, since the weekday and day-of-year fields are always derived
    /// from the date.
    ///
    /// # Errors
    /// Aborts at the first failing register read and returns its transport
    /// error; later registers are not touched and no partial result is
    /// produced
    pub fn get_time(&mut self) -> DriverResult<CalendarTime, I2C::Error> {
        let seconds = bcd::decode(
            self.read_register(SECONDS)?,
            SECONDS_MASK,
            TEN_SECONDS_MASK,
            4,
        );
        let minutes = bcd::decode(
            self.read_register(MINUTES)?,
            MINUTES_MASK,
            TEN_MINUTES_MASK,
            4,
        );
        let hours = bcd::decode(
            self.read_register(HOURS)?,
            HOURS_MASK,
            TEN_HOURS_MASK | TWENTY_HOURS_MASK,
            4,
        );
        let _ = self.read_register(WEEKDAY)?;
        let day = bcd::decode(self.read_register(DAY)?, DAY_MASK, TEN_DAYS_MASK, 4);

        let month_reg = self.read_register(MONTH)?;
        let month = bcd::decode(month_reg, MONTH_MASK, TEN_MONTHS_MASK, 4) - 1;
        let century = if month_reg & CENTURY_MASK == 0 { 0 } else { 100 };

        let year = bcd::decode(self.read_register(YEAR)?, YEAR_MASK, TEN_YEARS_MASK, 4);

        let mut time = CalendarTime {
            seconds,
            minutes,
            hours,
            day,
            month,
            year_offset: century + u16::from(year),
            weekday: 0,
            day_of_year: 0,
            dst: false,
        };
        time.refresh_derived(self.epoch);

        Ok(time)
    }

    /// Write a date and time to the device
    ///
    /// The seven time/date registers are written one at a time in address
    /// order. The weekday register receives the value derived from the date
    /// (device convention 1-7), never the caller's `weekday` field. The
    /// century bit is set when `year_offset` falls in the second century of
    /// the window; it changes only through this call. Out-of-range fields are
    /// encoded as-is and wrap per the register masks.
    ///
    /// # Errors
    /// Aborts at the first failing register write and returns its transport
    /// error. Registers already written stay written, so a failed call can
    /// leave the device time torn; re-read to confirm before relying on it
    pub fn set_time(&mut self, time: &CalendarTime) -> DriverResult<(), I2C::Error> {
        self.write_register(SECONDS, bcd::encode(time.seconds))?;
        self.write_register(MINUTES, bcd::encode(time.minutes))?;
        self.write_register(HOURS, bcd::encode_hours(time.hours))?;

        let weekday = calendar::weekday(time.year(self.epoch), time.month + 1, time.day);
        self.write_register(WEEKDAY, weekday + 1)?;

        self.write_register(DAY, bcd::encode(time.day))?;
        self.write_register(
            MONTH,
            bcd::encode_month(time.month + 1, time.year_offset >= 100),
        )?;
        self.write_register(YEAR, bcd::encode((time.year_offset % 100) as u8))?;

        Ok(())
    }

    /// Vendor diagnostic query channel; the response is always a single byte
    ///
    /// The only recognized command is [`DIAG_LAST_MESSAGE`], answering with
    /// the per-device diagnostic byte. The byte is zeroed at construction and
    /// on [`Ds3231::attach`] and is never assigned elsewhere.
    ///
    /// # Errors
    /// Fails with [`Error::InvalidCommand`] for any other command code
    pub const fn diagnostic(&self, command: u8) -> DriverResult<u8, I2C::Error> {
        match command {
            DIAG_LAST_MESSAGE => Ok(self.last_diagnostic),
            _ => Err(Error::InvalidCommand),
        }
    }

    fn read_register(&mut self, address: u8) -> DriverResult<u8, I2C::Error> {
        let mut buf = [0u8; 1];
        match self.i2c.write_read(DS3231_ADDR, &[address], &mut buf) {
            Ok(()) => Ok(buf[0]),
            Err(e) => {
                error!("error {:?} during register {:#04x} read", e, address);
                Err(Error::Transport(e))
            }
        }
    }

    fn write_register(&mut self, address: u8, value: u8) -> DriverResult<(), I2C::Error> {
        match self.i2c.write(DS3231_ADDR, &[address, value]) {
            Ok(()) => Ok(()),
            Err(e) => {
                error!("error {:?} during register {:#04x} write", e, address);
                Err(Error::Transport(e))
            }
        }
    }
}

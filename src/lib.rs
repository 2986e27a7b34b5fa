//! DS3231 real-time clock driver
//!
//! Translation layer between the DS3231's packed binary-coded-decimal
//! register protocol and a normalized calendar time value, over any blocking
//! [`embedded_hal::i2c::I2c`] bus. The host owns bus construction and device
//! discovery; this crate owns the bit-level codec, the Gregorian
//! weekday/day-of-year derivation, and the one-shot normalization that
//! brings the chip to a known configuration at attach time.
//!
//! Construct a [`Ds3231`] around the bus, call [`Ds3231::attach`] once, then
//! exchange [`CalendarTime`] values with [`Ds3231::get_time`] and
//! [`Ds3231::set_time`]. Every operation is a fresh sequence of single-byte
//! register transactions and aborts on the first transport error.
//!
//! Alarms, square-wave output, temperature conversion and 12-hour display
//! mode are out of scope; the normalizer actively disables the interrupt
//! routing and forces 24-hour mode.

#![cfg_attr(not(test), no_std)]

pub mod bcd;
pub mod calendar;
pub mod driver;
pub mod registers;
pub mod time;

pub use crate::{
    driver::{Ds3231, Error, DIAG_LAST_MESSAGE},
    time::{CalendarTime, DEFAULT_EPOCH_YEAR},
};

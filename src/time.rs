//! Normalized calendar time representation

use ufmt::derive::uDebug;

use crate::calendar;

/// Epoch year that `year_offset` counts from unless the driver is configured
/// otherwise; matches the `struct tm` convention of the device's two-century
/// window starting at 1900
pub const DEFAULT_EPOCH_YEAR: u16 = 1900;

/// A complete date and time reading, normalized out of the device's BCD
/// register layout
///
/// `weekday` and `day_of_year` are derived fields: they are recomputed from
/// (year, month, day) on every decode and never taken from the caller on a
/// write. The hour is always 24-hour format; 12-hour display mode is not
/// supported and is cleared on the device at attach time.
#[derive(uDebug, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarTime {
    /// Seconds, in [0, 59]
    pub seconds: u8,
    /// Minutes, in [0, 59]
    pub minutes: u8,
    /// Hours, in [0, 23]
    pub hours: u8,
    /// Day of the month, in [1, 31]
    pub day: u8,
    /// Month, zero-based in [0, 11]
    pub month: u8,
    /// Years since the configured epoch, in [0, 199]
    pub year_offset: u16,
    /// Day of the week, in [0, 6] with 0 denoting Monday; derived
    pub weekday: u8,
    /// Day of the year, in [1, 366]; derived
    pub day_of_year: u16,
    /// Daylight-saving flag; the device has no DST notion, so always `false`
    pub dst: bool,
}

impl CalendarTime {
    /// The full calendar year this reading denotes under `epoch`
    #[must_use]
    pub const fn year(&self, epoch: u16) -> u16 {
        epoch + self.year_offset
    }

    /// Recompute the derived `weekday` and `day_of_year` fields from the
    /// stored (year, month, day) under `epoch`, and pin `dst` down
    pub fn refresh_derived(&mut self, epoch: u16) {
        let year = self.year(epoch);
        self.weekday = calendar::weekday(year, self.month + 1, self.day);
        self.day_of_year = calendar::day_of_year(self.day, self.month + 1, year);
        self.dst = false;
    }
}

impl Default for CalendarTime {
    /// Midnight on January 1 of the epoch year
    fn default() -> Self {
        Self {
            seconds: 0,
            minutes: 0,
            hours: 0,
            day: 1,
            month: 0,
            year_offset: 0,
            weekday: calendar::weekday(DEFAULT_EPOCH_YEAR, 1, 1),
            day_of_year: 1,
            dst: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_epoch_start() {
        let time = CalendarTime::default();
        assert_eq!(time.year(DEFAULT_EPOCH_YEAR), 1900);
        assert_eq!(time.day, 1);
        assert_eq!(time.month, 0);
        assert_eq!(time.weekday, 0); // 1900-01-01 was a Monday
        assert_eq!(time.day_of_year, 1);
        assert!(!time.dst);
    }

    #[test]
    fn refresh_derived_overwrites_stale_fields() {
        let mut time = CalendarTime {
            seconds: 0,
            minutes: 30,
            hours: 12,
            day: 15,
            month: 2,
            year_offset: 124,
            weekday: 1,      // stale
            day_of_year: 12, // stale
            dst: true,       // stale
        };

        time.refresh_derived(1900);

        assert_eq!(time.weekday, 4); // 2024-03-15 was a Friday
        assert_eq!(time.day_of_year, 75);
        assert!(!time.dst);
    }
}

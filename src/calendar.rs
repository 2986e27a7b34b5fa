//! Gregorian calendar math for the derived time fields
//!
//! The device stores only (year, month, day); the day-of-week and day-of-year
//! fields of a time reading are always recomputed from those, never trusted
//! from the weekday register. All functions here are pure and total over
//! valid calendar inputs; callers supply range-checked values.

/// Cumulative days preceding each month in a common year
const COMMON_YEAR_DAYS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Cumulative days preceding each month in a leap year
const LEAP_YEAR_DAYS: [u16; 12] = [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Whether `year` is a Gregorian leap year
#[must_use]
pub const fn is_leap_year(year: u16) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Day of the week for a calendar date; 0 is Monday, 6 is Sunday
///
/// Zeller's congruence with January and February counted as months 13 and 14
/// of the previous year. Zeller's raw index (0 = Saturday) is remapped by a
/// fixed `+5` rotation to the device's weekday origin; the intermediate
/// modulo must stay non-negative, hence `rem_euclid`.
#[must_use]
pub const fn weekday(year: u16, month: u8, day: u8) -> u8 {
    let (year, month) = if month < 3 {
        (year as i32 - 1, month as i32 + 12)
    } else {
        (year as i32, month as i32)
    };

    let century = year / 100;
    let year_of_century = year % 100;

    let h = (day as i32 + (13 * (month + 1)) / 5 + year_of_century + year_of_century / 4
        + century / 4
        - 2 * century)
        .rem_euclid(7);

    ((h + 5) % 7) as u8
}

/// Day of the year for a calendar date, in [1, 366]
#[must_use]
pub const fn day_of_year(day: u8, month: u8, year: u16) -> u16 {
    let table = if is_leap_year(year) {
        &LEAP_YEAR_DAYS
    } else {
        &COMMON_YEAR_DAYS
    };

    table[(month - 1) as usize] + day as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Days, NaiveDate};

    #[test]
    fn leap_rule_honors_century_exceptions() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2096));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(!is_leap_year(2100));
    }

    #[test]
    fn weekday_of_known_dates() {
        // 0 = Monday
        assert_eq!(weekday(1900, 1, 1), 0); // Monday
        assert_eq!(weekday(2000, 1, 1), 5); // Saturday
        assert_eq!(weekday(2024, 3, 15), 4); // Friday
        assert_eq!(weekday(2099, 12, 31), 3); // Thursday
    }

    #[test]
    fn weekday_survives_negative_congruence_sums() {
        // Early-2000s dates drive the congruence sum negative before the
        // modulo; a truncating `%` would come out of the remap off by seven.
        assert_eq!(weekday(2000, 3, 12), 6); // Sunday
        assert_eq!(weekday(2000, 3, 13), 0); // Monday
        assert_eq!(weekday(2001, 3, 1), 3); // Thursday
    }

    #[test]
    fn weekday_matches_chrono_across_both_centuries() {
        let mut date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        while date.year() <= 2099 {
            assert_eq!(
                weekday(date.year() as u16, date.month() as u8, date.day() as u8),
                date.weekday().num_days_from_monday() as u8
            );
            date = date.checked_add_days(Days::new(97)).unwrap();
        }
    }

    #[test]
    fn day_of_year_matches_chrono_across_both_centuries() {
        let mut date = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
        while date.year() <= 2099 {
            assert_eq!(
                day_of_year(date.day() as u8, date.month() as u8, date.year() as u16),
                date.ordinal() as u16
            );
            date = date.checked_add_days(Days::new(89)).unwrap();
        }
    }

    #[test]
    fn day_of_year_at_month_boundaries() {
        assert_eq!(day_of_year(1, 1, 2024), 1);
        assert_eq!(day_of_year(1, 3, 2024), 61);
        assert_eq!(day_of_year(1, 3, 2023), 60);
        assert_eq!(day_of_year(31, 12, 2024), 366);
        assert_eq!(day_of_year(31, 12, 2023), 365);
    }
}

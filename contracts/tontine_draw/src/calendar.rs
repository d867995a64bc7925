//! # Calendar
//!
//! Date validation and the two pieces of arithmetic the payout schedule
//! needs: adding a number of days and adding calendar months.
//!
//! Dates are converted to a day count relative to 1970-01-01 with the
//! era-based civil algorithms, which are exact over the whole proleptic
//! Gregorian calendar and need no tables. Valid years are `1..=9999`;
//! arithmetic that leaves that range returns `None`.
//!
//! ## Month clamping
//!
//! `add_months` keeps the day of month and clamps it to the last day of the
//! target month: `2024-01-31 + 1 month = 2024-02-29`,
//! `2023-01-31 + 1 month = 2023-02-28`, `2024-03-31 + 1 month = 2024-04-30`.

use crate::types::{Date, Frequency};

pub const MIN_YEAR: u32 = 1;
pub const MAX_YEAR: u32 = 9999;

pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Days since 1970-01-01 for a civil date.
fn days_from_civil(year: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { year - 1 } else { year };
    let era = (if y >= 0 { y } else { y - 399 }) / 400;
    let yoe = y - era * 400;
    let mp = ((month + 9) % 12) as i64;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Inverse of [`days_from_civil`].
fn civil_from_days(days: i64) -> (i64, u32, u32) {
    let z = days + 719_468;
    let era = (if z >= 0 { z } else { z - 146_096 }) / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u32;
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}

impl Date {
    pub fn new(year: u32, month: u32, day: u32) -> Self {
        Date { year, month, day }
    }

    pub fn is_valid(&self) -> bool {
        (MIN_YEAR..=MAX_YEAR).contains(&self.year)
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
    }

    pub fn add_days(&self, days: u32) -> Option<Date> {
        let base = days_from_civil(self.year as i64, self.month, self.day);
        let (year, month, day) = civil_from_days(base + days as i64);
        if year > MAX_YEAR as i64 {
            return None;
        }
        Some(Date::new(year as u32, month, day))
    }

    pub fn add_months(&self, months: u32) -> Option<Date> {
        let index = self.month as u64 - 1 + months as u64;
        let year = self.year as u64 + index / 12;
        if year > MAX_YEAR as u64 {
            return None;
        }
        let year = year as u32;
        let month = (index % 12) as u32 + 1;
        let day = self.day.min(days_in_month(year, month));
        Some(Date::new(year, month, day))
    }
}

impl Frequency {
    /// Payout date following `previous` under this recurrence.
    pub fn next_after(&self, previous: &Date) -> Option<Date> {
        match self {
            Frequency::Days(n) => previous.add_days(*n),
            Frequency::Monthly => previous.add_months(1),
        }
    }

    /// `Days(0)` never advances, and `Days(30)` is refused because code 30
    /// means [`Frequency::Monthly`] (see [`Frequency::from_code`]).
    pub fn is_valid(&self) -> bool {
        match self {
            Frequency::Days(n) => *n >= 1 && *n != 30,
            Frequency::Monthly => true,
        }
    }
}

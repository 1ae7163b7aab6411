//! # Pricing
//!
//! The linear day-rate fee charged when a rental is returned.
//!
//! ## Rounding Policy
//! ```text
//! dateOut ──────────────────────────────────────► now
//!          |  day 1  |  day 2  | ... |  day N  | partial |
//!                                                 ▲
//!                                          not billed (floor)
//! ```
//! Only whole 24-hour periods count. A movie returned 6 days and 23 hours
//! after checkout is billed 6 days. A return on the same day costs nothing.

use chrono::{DateTime, Utc};

use crate::money::Money;

/// Whole days elapsed between `date_out` and `now`, rounded down.
///
/// These are elapsed 24-hour periods, not calendar dates crossed: out at
/// 23:00 and back at 01:00 two days later bills 1 day, not 2.
///
/// A clock that runs backwards (now < date_out) yields 0, never a
/// negative count.
pub fn days_rented(date_out: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - date_out).num_days().max(0)
}

/// Fee for `days` at `daily_rate`.
#[inline]
pub fn rental_fee(daily_rate: Money, days: i64) -> Money {
    daily_rate.times_days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn date_out() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 10, 18, 30, 0).unwrap()
    }

    #[test]
    fn test_counts_elapsed_periods_not_calendar_dates() {
        let out = Utc.with_ymd_and_hms(2026, 5, 1, 23, 0, 0).unwrap();
        let back = Utc.with_ymd_and_hms(2026, 5, 3, 1, 0, 0).unwrap();
        assert_eq!(days_rented(out, back), 1);
    }

    #[test]
    fn test_seven_days_at_two_per_day() {
        let now = date_out() + Duration::days(7);
        let days = days_rented(date_out(), now);
        assert_eq!(days, 7);
        assert_eq!(rental_fee(Money::from_cents(200), days).cents(), 1400);
    }

    #[test]
    fn test_partial_day_is_not_billed() {
        let now = date_out() + Duration::days(6) + Duration::hours(23);
        assert_eq!(days_rented(date_out(), now), 6);

        let same_day = date_out() + Duration::minutes(5);
        assert_eq!(days_rented(date_out(), same_day), 0);
    }

    #[test]
    fn test_clock_skew_never_goes_negative() {
        let now = date_out() - Duration::days(2);
        assert_eq!(days_rented(date_out(), now), 0);
    }
}

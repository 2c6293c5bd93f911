use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

#[cfg(test)]
impl Countdown {
    pub fn is_zero(&self) -> bool {
        *self == Countdown::default()
    }
}

// A Feb 29 birthday observed in a common year lands on Mar 1.
fn anniversary_in_year(birth: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, birth.month(), birth.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .unwrap_or(birth)
}

pub fn next_anniversary(birth: NaiveDate, today: NaiveDate) -> NaiveDate {
    let candidate = anniversary_in_year(birth, today.year());
    if candidate < today {
        anniversary_in_year(birth, today.year() + 1)
    } else {
        candidate
    }
}

pub fn next_anniversary_moment(birth: NaiveDate, now: NaiveDateTime) -> NaiveDateTime {
    let target = next_anniversary(birth, now.date());
    // past midnight of the target, count to the following year's observance
    if target.and_time(NaiveTime::MIN) <= now {
        return anniversary_in_year(birth, target.year() + 1).and_time(NaiveTime::MIN);
    }
    target.and_time(NaiveTime::MIN)
}

pub fn remaining(target: NaiveDateTime, now: NaiveDateTime) -> Countdown {
    let total = target.signed_duration_since(now).num_seconds();
    if total <= 0 {
        return Countdown::default();
    }
    Countdown {
        days: total / 86_400,
        hours: total / 3_600 % 24,
        minutes: total / 60 % 60,
        seconds: total % 60,
    }
}

pub fn is_anniversary(birth: NaiveDate, today: NaiveDate) -> bool {
    birth.month() == today.month() && birth.day() == today.day()
}

pub fn progress(birth: NaiveDate, today: NaiveDate) -> f64 {
    let mut last = anniversary_in_year(birth, today.year());
    if last > today {
        last = anniversary_in_year(birth, today.year() - 1);
    }
    let next = next_anniversary(birth, today);
    let total_days = next.signed_duration_since(last).num_days();
    // endpoints collapse on the anniversary day itself
    if total_days <= 0 {
        return 0.0;
    }
    let days_passed = today.signed_duration_since(last).num_days();
    (days_passed as f64 / total_days as f64 * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn moment(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn next_anniversary_later_this_year() {
        assert_eq!(
            next_anniversary(date(2000, 6, 15), date(2024, 3, 1)),
            date(2024, 6, 15)
        );
    }

    #[test]
    fn next_anniversary_rolls_to_next_year() {
        assert_eq!(
            next_anniversary(date(2000, 6, 15), date(2024, 6, 16)),
            date(2025, 6, 15)
        );
    }

    #[test]
    fn next_anniversary_same_day_counts_as_reached() {
        assert_eq!(
            next_anniversary(date(2000, 6, 15), date(2024, 6, 15)),
            date(2024, 6, 15)
        );
    }

    #[test]
    fn next_anniversary_never_before_today() {
        let birth = date(1988, 11, 3);
        let mut today = date(2024, 1, 1);
        for _ in 0..800 {
            assert!(next_anniversary(birth, today) >= today);
            today = today.succ_opt().unwrap();
        }
    }

    #[test]
    fn feb_29_observed_on_mar_1_in_common_years() {
        let birth = date(2000, 2, 29);
        assert_eq!(next_anniversary(birth, date(2023, 1, 10)), date(2023, 3, 1));
        assert_eq!(next_anniversary(birth, date(2024, 1, 10)), date(2024, 2, 29));
    }

    #[test]
    fn remaining_decomposes_difference() {
        let target = moment(2024, 6, 15, 0, 0, 0);
        let now = moment(2024, 6, 13, 21, 58, 57);
        assert_eq!(
            remaining(target, now),
            Countdown {
                days: 1,
                hours: 2,
                minutes: 1,
                seconds: 3,
            }
        );
    }

    #[test]
    fn remaining_zero_at_or_past_target() {
        let target = moment(2024, 6, 15, 0, 0, 0);
        assert!(remaining(target, target).is_zero());
        assert!(remaining(target, moment(2024, 6, 15, 0, 0, 1)).is_zero());
        assert!(remaining(target, moment(2024, 7, 1, 12, 0, 0)).is_zero());
    }

    #[test]
    fn remaining_decreases_toward_target() {
        let target = moment(2024, 6, 15, 0, 0, 0);
        let mut prev = i64::MAX;
        for offset in (1..=120).rev() {
            let now = target - chrono::Duration::seconds(offset);
            let c = remaining(target, now);
            let total = c.days * 86_400 + c.hours * 3_600 + c.minutes * 60 + c.seconds;
            assert!(total >= 0 && total < prev);
            prev = total;
        }
    }

    #[test]
    fn anniversary_check_ignores_year() {
        assert!(is_anniversary(date(2000, 6, 15), date(2024, 6, 15)));
        assert!(is_anniversary(date(1970, 6, 15), date(1999, 6, 15)));
        assert!(!is_anniversary(date(2000, 6, 15), date(2024, 6, 16)));
        assert!(!is_anniversary(date(2000, 6, 15), date(2024, 7, 15)));
    }

    #[test]
    fn progress_zero_on_anniversary_day() {
        assert_eq!(progress(date(2000, 6, 15), date(2024, 6, 15)), 0.0);
    }

    #[test]
    fn progress_nearly_complete_day_before() {
        let p = progress(date(2000, 6, 15), date(2024, 6, 14));
        assert!(p > 99.0 && p <= 100.0);
    }

    #[test]
    fn progress_monotone_within_cycle() {
        let birth = date(2000, 6, 15);
        let mut today = date(2023, 6, 16);
        let mut prev = progress(birth, today);
        while today < date(2024, 6, 15) {
            today = today.succ_opt().unwrap();
            let p = progress(birth, today);
            if today == date(2024, 6, 15) {
                // cycle boundary resets to the zero-guard value
                assert_eq!(p, 0.0);
            } else {
                assert!(p >= prev);
                assert!((0.0..=100.0).contains(&p));
                prev = p;
            }
        }
    }

    #[test]
    fn feb_29_observed_day_counts_to_next_observance() {
        let birth = date(2000, 2, 29);
        let now = moment(2025, 3, 1, 12, 0, 0);
        assert!(!is_anniversary(birth, now.date()));
        let target = next_anniversary_moment(birth, now);
        assert_eq!(target.date(), date(2026, 3, 1));
        assert!(!remaining(target, now).is_zero());
    }

    #[test]
    fn target_rolls_forward_once_midnight_passes() {
        let birth = date(2000, 6, 15);
        let now = moment(2024, 6, 15, 0, 0, 1);
        assert_eq!(next_anniversary_moment(birth, now).date(), date(2025, 6, 15));
        let before = moment(2024, 6, 14, 23, 59, 59);
        assert_eq!(next_anniversary_moment(birth, before).date(), date(2024, 6, 15));
    }

    #[test]
    fn countdown_scenario_day_after() {
        let birth = date(2000, 6, 15);
        let now = moment(2024, 6, 16, 9, 30, 0);
        let next = next_anniversary(birth, now.date());
        assert_eq!(next, date(2025, 6, 15));
        let left = remaining(next.and_time(NaiveTime::MIN), now);
        assert!(!left.is_zero());
        assert_eq!(left.days, 363);
    }
}

use chrono::{
    Datelike,
    Days,
    NaiveDate,
    Weekday
};

pub const ONE_DAY: Days = Days::new(1);

#[inline]
pub const fn is_leap (year: i32) -> bool {
    ((year % 4 == 0) && (year % 100!= 0)) || (year % 400 == 0)
}


pub const fn days_of_month (year: i32, month: u32) -> u32 {
    const NO_LEAP_EOM: [u32; 13] = [
        0, 31, 28, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    const LEAP_EOM: [u32; 13] = [
        0, 31, 29, 31, 30,
        31, 30, 31, 31, 30,
        31, 30, 31
    ];

    if is_leap(year) {
        LEAP_EOM[month as usize]
    } else {
        NO_LEAP_EOM[month as usize]
    }
}

/// Shifts `d` by a signed number of days, `None` past chrono's supported range.
#[inline]
pub fn shift_days(d: NaiveDate, n: i64) -> Option<NaiveDate> {
    if n >= 0 {
        d.checked_add_days(Days::new(n as u64))
    } else {
        d.checked_sub_days(Days::new(n.unsigned_abs()))
    }
}

/// The latest `weekday` on or before `d`.
pub fn previous_or_same(d: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    let days_back = (d.weekday().num_days_from_monday() + 7
                     - weekday.num_days_from_monday()) % 7;
    d.checked_sub_days(Days::new(days_back as u64))
}

/// The latest `weekday` strictly before `d`.
pub fn previous(d: NaiveDate, weekday: Weekday) -> Option<NaiveDate> {
    previous_or_same(d.checked_sub_days(ONE_DAY)?, weekday)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn leap_years_follow_gregorian_rules() {
        assert!(is_leap(2024));
        assert!(is_leap(2000));
        assert!(!is_leap(1900));
        assert!(!is_leap(2023));
        assert_eq!(days_of_month(2024, 2), 29);
        assert_eq!(days_of_month(2023, 2), 28);
    }

    #[test]
    fn previous_weekday_lookups() {
        // 2023-12-24 is a Sunday
        assert_eq!(previous_or_same(ymd(2023, 12, 24), Weekday::Sun), Some(ymd(2023, 12, 24)));
        assert_eq!(previous(ymd(2023, 12, 24), Weekday::Sun), Some(ymd(2023, 12, 17)));
        assert_eq!(previous_or_same(ymd(2023, 11, 22), Weekday::Wed), Some(ymd(2023, 11, 22)));
        assert_eq!(previous_or_same(ymd(2024, 11, 22), Weekday::Wed), Some(ymd(2024, 11, 20)));
    }

    #[test]
    fn shift_days_is_signed() {
        assert_eq!(shift_days(ymd(2024, 3, 1), -1), Some(ymd(2024, 2, 29)));
        assert_eq!(shift_days(ymd(2024, 2, 28), 2), Some(ymd(2024, 3, 1)));
        assert_eq!(shift_days(NaiveDate::MAX, 1), None);
    }
}

use chrono::{
    Datelike,
    NaiveDate
};

/// Number of years `roll_forward` looks at before giving up.
///
/// Two suffice for any yearly rule; the third covers rules whose date for
/// year `y` lands in the last days of `y - 1`.
pub const ROLL_FORWARD_YEARS: i32 = 3;

/// A pure rule producing the next qualifying date strictly after a reference.
pub trait RecurrenceRule: Send + Sync {
    fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate>;
}

impl<F> RecurrenceRule for F where
    F: Fn(NaiveDate) -> Option<NaiveDate> + Send + Sync {
    fn next_after(&self, reference: NaiveDate) -> Option<NaiveDate> {
        self(reference)
    }
}

/// Evaluates a yearly rule for the reference's year and the following ones,
/// returning the first candidate strictly after `reference`.
pub fn roll_forward<F>(reference: NaiveDate, candidate_for_year: F) -> Option<NaiveDate> where
    F: Fn(i32) -> Option<NaiveDate> {
    roll_forward_within(reference, ROLL_FORWARD_YEARS, candidate_for_year)
}

pub fn roll_forward_within<F>(reference: NaiveDate, n_years: i32, candidate_for_year: F) -> Option<NaiveDate> where
    F: Fn(i32) -> Option<NaiveDate> {
    let year = reference.year();
    (0..n_years)
        .filter_map(|i| year.checked_add(i))
        .filter_map(candidate_for_year)
        .find(|candidate| *candidate > reference)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_rolls_to_next_year() {
        let christmas = |y: i32| NaiveDate::from_ymd_opt(y, 12, 25);
        assert_eq!(roll_forward(ymd(2023, 12, 25), christmas), Some(ymd(2024, 12, 25)));
        assert_eq!(roll_forward(ymd(2023, 12, 24), christmas), Some(ymd(2023, 12, 25)));
    }

    #[test]
    fn skips_years_without_candidate() {
        let leap_day = |y: i32| NaiveDate::from_ymd_opt(y, 2, 29);
        assert_eq!(roll_forward_within(ymd(2021, 3, 1), 11, leap_day), Some(ymd(2024, 2, 29)));
        assert_eq!(roll_forward(ymd(2021, 3, 1), leap_day), None);
    }

    #[test]
    fn closures_are_rules() {
        let rule = |d: NaiveDate| d.succ_opt();
        assert_eq!(rule.next_after(ymd(2024, 2, 28)), Some(ymd(2024, 2, 29)));
    }
}

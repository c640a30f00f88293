use chrono::NaiveDate;
use serde::{
    Deserialize,
    Serialize
};

use super::generators::February29;
use super::holiday::Holiday;
use super::holidayerror::HolidayError;
use super::recurrencerule::{
    RecurrenceRule,
    roll_forward
};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum DiscordianSeason {
    Chaos,
    Discord,
    Confusion,
    Bureaucracy,
    TheAftermath
}

/// The holy days of the discordian calendar: the apostle day on the 5th and
/// the season day on the 50th of every season, plus St. Tib's Day.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, Serialize, Deserialize)]
pub enum DiscordianHoliday {
    Mungday,
    Chaoflux,
    StTibsDay,
    Mojoday,
    Discoflux,
    Syaday,
    Confuflux,
    Zaraday,
    Bureflux,
    Maladay,
    Afflux
}

impl DiscordianHoliday {
    pub const ALL: [DiscordianHoliday; 11] = [
        DiscordianHoliday::Mungday,
        DiscordianHoliday::Chaoflux,
        DiscordianHoliday::StTibsDay,
        DiscordianHoliday::Mojoday,
        DiscordianHoliday::Discoflux,
        DiscordianHoliday::Syaday,
        DiscordianHoliday::Confuflux,
        DiscordianHoliday::Zaraday,
        DiscordianHoliday::Bureflux,
        DiscordianHoliday::Maladay,
        DiscordianHoliday::Afflux
    ];

    /// Gregorian month and day; St. Tib's Day has none as it only exists in
    /// leap years.
    pub fn gregorian_month_day(&self) -> Option<(u32, u32)> {
        match self {
            DiscordianHoliday::Mungday   => Some((1, 5)),
            DiscordianHoliday::Chaoflux  => Some((2, 19)),
            DiscordianHoliday::StTibsDay => None,
            DiscordianHoliday::Mojoday   => Some((3, 19)),
            DiscordianHoliday::Discoflux => Some((5, 3)),
            DiscordianHoliday::Syaday    => Some((5, 31)),
            DiscordianHoliday::Confuflux => Some((7, 15)),
            DiscordianHoliday::Zaraday   => Some((8, 12)),
            DiscordianHoliday::Bureflux  => Some((9, 26)),
            DiscordianHoliday::Maladay   => Some((10, 24)),
            DiscordianHoliday::Afflux    => Some((12, 8))
        }
    }

    /// Season and day of season; St. Tib's Day lies outside every season.
    pub fn discordian_date(&self) -> Option<(DiscordianSeason, u32)> {
        match self {
            DiscordianHoliday::Mungday   => Some((DiscordianSeason::Chaos, 5)),
            DiscordianHoliday::Chaoflux  => Some((DiscordianSeason::Chaos, 50)),
            DiscordianHoliday::StTibsDay => None,
            DiscordianHoliday::Mojoday   => Some((DiscordianSeason::Discord, 5)),
            DiscordianHoliday::Discoflux => Some((DiscordianSeason::Discord, 50)),
            DiscordianHoliday::Syaday    => Some((DiscordianSeason::Confusion, 5)),
            DiscordianHoliday::Confuflux => Some((DiscordianSeason::Confusion, 50)),
            DiscordianHoliday::Zaraday   => Some((DiscordianSeason::Bureaucracy, 5)),
            DiscordianHoliday::Bureflux  => Some((DiscordianSeason::Bureaucracy, 50)),
            DiscordianHoliday::Maladay   => Some((DiscordianSeason::TheAftermath, 5)),
            DiscordianHoliday::Afflux    => Some((DiscordianSeason::TheAftermath, 50))
        }
    }
}

impl Holiday for DiscordianHoliday {
    fn name(&self) -> &str {
        match self {
            DiscordianHoliday::Mungday   => "Mungday",
            DiscordianHoliday::Chaoflux  => "Chaoflux",
            DiscordianHoliday::StTibsDay => "St. Tib's Day",
            DiscordianHoliday::Mojoday   => "Mojoday",
            DiscordianHoliday::Discoflux => "Discoflux",
            DiscordianHoliday::Syaday    => "Syaday",
            DiscordianHoliday::Confuflux => "Confuflux",
            DiscordianHoliday::Zaraday   => "Zaraday",
            DiscordianHoliday::Bureflux  => "Bureflux",
            DiscordianHoliday::Maladay   => "Maladay",
            DiscordianHoliday::Afflux    => "Afflux"
        }
    }

    fn next_date(&self, reference: NaiveDate) -> Result<Option<NaiveDate>, HolidayError> {
        Ok(match self.gregorian_month_day() {
            Some((month, day)) => roll_forward(reference, |year| NaiveDate::from_ymd_opt(year, month, day)),
            None => February29.next_after(reference)
        })
    }
}

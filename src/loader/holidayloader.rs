use std::collections::HashMap;
use std::sync::Arc;

use chrono::Weekday;
use serde::Deserialize;
use tracing::{
    debug,
    trace
};

use crate::holiday::bridgeday::BridgeDay;
use crate::holiday::dependentholiday::DependentHoliday;
use crate::holiday::discordianholiday::DiscordianHoliday;
use crate::holiday::fixedholiday::FixedHoliday;
use crate::holiday::floatingholiday::FloatingHoliday;
use crate::holiday::generators;
use crate::holiday::holiday::Holiday;
use crate::holiday::holidayerror::HolidayError;
use crate::holiday::lunarphaseoracle::MoonPhase;
use crate::holiday::moonphaseholiday::MoonPhaseHoliday;
use crate::holiday::recurrencerule::RecurrenceRule;
use crate::holiday::searchlimits::SearchLimits;

use super::loadererror::{
    LoaderError,
    parse_json_value
};
use super::namedobject::NamedJsonObject;

/// Holidays loaded so far, looked up by name when a later definition refers
/// to them.
#[derive(Default)]
pub struct HolidayRegistry {
    map: HashMap<String, Arc<dyn Holiday>>
}

impl HolidayRegistry {
    pub fn new() -> HolidayRegistry {
        HolidayRegistry { map: HashMap::new() }
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Holiday>, LoaderError> {
        self.map
            .get(name)
            .cloned()
            .ok_or_else(|| LoaderError::NameNotFound(name.to_owned()))
    }

    pub fn insert(&mut self, holiday: Arc<dyn Holiday>) {
        self.map.insert(holiday.name().to_owned(), holiday);
    }
}

#[derive(Deserialize)]
struct WeekdayInMonthJsonProp {
    month: u32,
    weekday: Weekday,
    ordinal: u8
}

#[derive(Deserialize)]
struct WeekdayBeforeDateJsonProp {
    weekday: Weekday,
    month: u32,
    day: u32
}

#[derive(Deserialize)]
struct DayOfYearJsonProp {
    day_of_year: u32
}

#[derive(Deserialize)]
enum RuleType {
    WeekdayInMonth,
    WeekdayBeforeDate,
    DayOfYear,
    EasterSunday,
    FirstAdvent,
    February29
}

#[derive(Deserialize)]
struct RuleTypedObject {
    rule_type: RuleType
}

fn rule_from_json(json: serde_json::Value) -> Result<Arc<dyn RecurrenceRule>, LoaderError> {
    let rule_typed_obj: RuleTypedObject = parse_json_value(json.clone())?;
    let rule = match rule_typed_obj.rule_type {
        RuleType::WeekdayInMonth => {
            let json_prop: WeekdayInMonthJsonProp = parse_json_value(json)?;
            generators::by_weekday_in_month(json_prop.month, json_prop.weekday, json_prop.ordinal)?
        },
        RuleType::WeekdayBeforeDate => {
            let json_prop: WeekdayBeforeDateJsonProp = parse_json_value(json)?;
            generators::by_weekday_before_date(json_prop.weekday, json_prop.month, json_prop.day)?
        },
        RuleType::DayOfYear => {
            let json_prop: DayOfYearJsonProp = parse_json_value(json)?;
            generators::by_day_of_year(json_prop.day_of_year)?
        },
        RuleType::EasterSunday => generators::easter_sunday(),
        RuleType::FirstAdvent  => generators::first_advent(),
        RuleType::February29   => generators::february_29()
    };
    Ok(rule)
}

#[derive(Deserialize)]
struct FixedHolidayJsonProp {
    month: u32,
    day: u32
}

#[derive(Deserialize)]
struct FloatingHolidayJsonProp {
    rule: serde_json::Value
}

#[derive(Deserialize)]
struct DependentHolidayJsonProp {
    anchor: String,
    offset_days: i64
}

#[derive(Deserialize)]
struct DiscordianHolidayJsonProp {
    day: DiscordianHoliday
}

#[derive(Deserialize)]
struct MoonPhaseHolidayJsonProp {
    phase: MoonPhase
}

#[derive(Deserialize)]
struct BridgeDayJsonProp {
    holidays: Vec<String>
}

#[derive(Deserialize)]
enum HolidayType {
    Fixed,
    Floating,
    Dependent,
    Discordian,
    MoonPhase,
    BridgeDay
}

#[derive(Deserialize)]
struct HolidayTypedObject {
    holiday_type: HolidayType
}

fn name_from_json(json: &serde_json::Value) -> Result<String, LoaderError> {
    let named_obj: NamedJsonObject = parse_json_value(json.clone())?;
    Ok(named_obj.into_name())
}

/// Builds one holiday from its JSON definition. Definitions that refer to
/// other holidays by name fail with `NameNotFound` until those are in
/// `registry`.
pub fn holiday_from_json(json: serde_json::Value,
                         registry: &HolidayRegistry,
                         limits: &SearchLimits) -> Result<Arc<dyn Holiday>, LoaderError> {
    let holiday_typed_obj: HolidayTypedObject = parse_json_value(json.clone())?;
    let holiday: Arc<dyn Holiday> = match holiday_typed_obj.holiday_type {
        HolidayType::Fixed => {
            let name = name_from_json(&json)?;
            let json_prop: FixedHolidayJsonProp = parse_json_value(json)?;
            Arc::new(FixedHoliday::new(name, json_prop.month, json_prop.day)?)
        },
        HolidayType::Floating => {
            let name = name_from_json(&json)?;
            let json_prop: FloatingHolidayJsonProp = parse_json_value(json)?;
            Arc::new(FloatingHoliday::new(name, rule_from_json(json_prop.rule)?)?)
        },
        HolidayType::Dependent => {
            let name = name_from_json(&json)?;
            let json_prop: DependentHolidayJsonProp = parse_json_value(json)?;
            let anchor = registry.get(&json_prop.anchor)?;
            Arc::new(DependentHoliday::new(name, anchor, json_prop.offset_days)?)
        },
        HolidayType::Discordian => {
            let json_prop: DiscordianHolidayJsonProp = parse_json_value(json)?;
            Arc::new(json_prop.day)
        },
        HolidayType::MoonPhase => {
            let json_prop: MoonPhaseHolidayJsonProp = parse_json_value(json)?;
            Arc::new(MoonPhaseHoliday::with_mean_lunation(json_prop.phase))
        },
        HolidayType::BridgeDay => {
            let json_prop: BridgeDayJsonProp = parse_json_value(json)?;
            let members = json_prop.holidays
                .iter()
                .map(|name| registry.get(name))
                .collect::<Result<Vec<Arc<dyn Holiday>>, LoaderError>>()?;
            Arc::new(BridgeDay::with_limits(&members, *limits)?)
        }
    };
    Ok(holiday)
}

/// Builds every holiday in `json_vec`, keeping their order.
///
/// Anchors and bridge-day members may be defined after the holidays that use
/// them, so failed definitions are retried round by round. Loading stops with
/// the last error once a round makes no progress.
pub fn holidays_from_json_vec(json_vec: &[serde_json::Value],
                              limits: &SearchLimits) -> Result<Vec<Arc<dyn Holiday>>, LoaderError> {
    if json_vec.is_empty() {
        return Err(LoaderError::Holiday(HolidayError::MissingArgument(
            "no holiday definitions".to_owned())));
    }

    let mut registry = HolidayRegistry::new();
    let mut slots: Vec<Option<Arc<dyn Holiday>>> = vec![None; json_vec.len()];
    let mut remain_indices: Vec<usize> = (0..json_vec.len()).collect();
    let mut round = 0;

    loop {
        round += 1;
        let mut new_remain_indices: Vec<usize> = Vec::new();
        let mut last_error: Option<LoaderError> = None;

        for &index in remain_indices.iter() {
            match holiday_from_json(json_vec[index].clone(), &registry, limits) {
                Ok(holiday) => {
                    trace!(round, holiday = holiday.name(), "holiday loaded");
                    registry.insert(Arc::clone(&holiday));
                    slots[index] = Some(holiday);
                },
                Err(error) => {
                    new_remain_indices.push(index);
                    last_error = Some(error);
                }
            }
        }

        debug!(round, loaded = json_vec.len() - new_remain_indices.len(), total = json_vec.len(), "holiday loading round");

        if new_remain_indices.is_empty() {
            return Ok(slots.into_iter().flatten().collect());
        }
        if remain_indices == new_remain_indices {
            return Err(last_error.unwrap_or_else(|| LoaderError::Holiday(HolidayError::InvalidArgument(
                "holiday definitions could not be resolved".to_owned()))));
        }
        remain_indices = new_remain_indices;
    }
}

pub mod configuration;

pub mod calendar {
    pub mod calendarentry;
    pub mod holidaymanager;
}

pub mod holiday {
    pub mod holidayerror;
    pub mod holiday;
    pub mod temporal;
    pub mod recurrencerule;
    pub mod generators;
    pub mod searchlimits;
    pub mod occurrences;
    pub mod fixedholiday;
    pub mod floatingholiday;
    pub mod dependentholiday;
    pub mod discordianholiday;
    pub mod lunarphaseoracle;
    pub mod moonphaseholiday;
    pub mod bridgeday;
}

pub mod loader {
    pub mod loadererror;
    pub mod namedobject;
    pub mod holidayloader;
}

pub mod time {
    pub mod utility;
    pub mod yearmonth;
    pub mod rangeofdates;
}

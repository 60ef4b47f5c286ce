//! Named time zones with daylight-saving rules.
//!
//! Each zone carries two change rules in the style of embedded timezone
//! tables: the rule that switches daylight time on and the rule that
//! switches it off. A rule's hour is wall-clock time in the offset that was
//! in force before the change. Fixed-offset zones use the same offset in
//! both rules.

use time::{Date, Month, OffsetDateTime, UtcOffset, Weekday};

/// Which occurrence of a weekday within the month a rule fires on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Week {
    First,
    Second,
    Third,
    Fourth,
    Last,
}

/// One daylight-saving change: "the clock becomes `offset_minutes` at
/// `hour`:00 on the `week`th `weekday` of `month`".
#[derive(Copy, Clone, Debug)]
pub struct ChangeRule {
    pub abbrev: &'static str,
    pub week: Week,
    pub weekday: Weekday,
    pub month: Month,
    pub hour: u8,
    pub offset_minutes: i16,
}

/// A display time zone.
#[derive(Copy, Clone, Debug)]
pub struct Zone {
    pub name: &'static str,
    /// Rule that turns daylight time on.
    pub dst: ChangeRule,
    /// Rule that turns daylight time off (standard time).
    pub std: ChangeRule,
}

impl Zone {
    #[must_use]
    pub const fn has_dst(&self) -> bool {
        self.dst.offset_minutes != self.std.offset_minutes
    }

    /// UTC offset in minutes at a UTC instant, daylight saving resolved.
    #[must_use]
    pub fn offset_minutes(&self, utc: OffsetDateTime) -> i16 {
        if !self.has_dst() {
            return self.std.offset_minutes;
        }
        let year = utc.year();
        let dst_on = change_instant(&self.dst, year, self.std.offset_minutes);
        let dst_off = change_instant(&self.std, year, self.dst.offset_minutes);

        let in_dst = if dst_on <= dst_off {
            // Northern hemisphere: daylight time within the year.
            utc >= dst_on && utc < dst_off
        } else {
            // Southern hemisphere: daylight time spans New Year.
            utc >= dst_on || utc < dst_off
        };
        if in_dst {
            self.dst.offset_minutes
        } else {
            self.std.offset_minutes
        }
    }

    /// Zone abbreviation in force at a UTC instant (e.g. CET vs CEST).
    #[must_use]
    pub fn abbrev(&self, utc: OffsetDateTime) -> &'static str {
        if self.offset_minutes(utc) == self.dst.offset_minutes && self.has_dst() {
            self.dst.abbrev
        } else {
            self.std.abbrev
        }
    }

    #[must_use]
    pub fn utc_offset(&self, utc: OffsetDateTime) -> UtcOffset {
        UtcOffset::from_whole_seconds(i32::from(self.offset_minutes(utc)) * 60)
            .unwrap_or(UtcOffset::UTC)
    }
}

/// UTC instant a rule fires in a given year.
fn change_instant(rule: &ChangeRule, year: i32, prior_offset_minutes: i16) -> OffsetDateTime {
    let date = nth_weekday(year, rule.month, rule.week, rule.weekday);
    let offset = UtcOffset::from_whole_seconds(i32::from(prior_offset_minutes) * 60)
        .unwrap_or(UtcOffset::UTC);
    date.midnight().assume_offset(offset) + time::Duration::hours(i64::from(rule.hour))
}

/// The `week`th `weekday` of a month (or the last one).
fn nth_weekday(year: i32, month: Month, week: Week, weekday: Weekday) -> Date {
    match week {
        Week::Last => {
            let mut date = Date::from_calendar_date(year, month, month.length(year))
                .unwrap_or(Date::MIN);
            while date.weekday() != weekday {
                match date.previous_day() {
                    Some(prev) => date = prev,
                    None => break,
                }
            }
            date
        }
        _ => {
            let mut date = Date::from_calendar_date(year, month, 1).unwrap_or(Date::MIN);
            while date.weekday() != weekday {
                match date.next_day() {
                    Some(next) => date = next,
                    None => break,
                }
            }
            let extra_weeks = match week {
                Week::First => 0,
                Week::Second => 1,
                Week::Third => 2,
                Week::Fourth => 3,
                Week::Last => unreachable!(),
            };
            date + time::Duration::weeks(extra_weeks)
        }
    }
}

const fn fixed(name: &'static str, abbrev: &'static str, offset_minutes: i16) -> Zone {
    let rule = ChangeRule {
        abbrev,
        week: Week::First,
        weekday: Weekday::Sunday,
        month: Month::January,
        hour: 0,
        offset_minutes,
    };
    Zone {
        name,
        dst: rule,
        std: rule,
    }
}

const fn rule(
    abbrev: &'static str,
    week: Week,
    weekday: Weekday,
    month: Month,
    hour: u8,
    offset_minutes: i16,
) -> ChangeRule {
    ChangeRule {
        abbrev,
        week,
        weekday,
        month,
        hour,
        offset_minutes,
    }
}

/// The zones offered in the setup menu, west to east from UTC.
pub const ZONES: &[Zone] = &[
    fixed("UTC", "UTC", 0),
    Zone {
        name: "UK",
        dst: rule("BST", Week::Last, Weekday::Sunday, Month::March, 1, 60),
        std: rule("GMT", Week::Last, Weekday::Sunday, Month::October, 2, 0),
    },
    Zone {
        name: "Central Europe",
        dst: rule("CEST", Week::Last, Weekday::Sunday, Month::March, 2, 120),
        std: rule("CET", Week::Last, Weekday::Sunday, Month::October, 3, 60),
    },
    Zone {
        name: "East Europe",
        dst: rule("EEST", Week::Last, Weekday::Sunday, Month::March, 3, 180),
        std: rule("EET", Week::Last, Weekday::Sunday, Month::October, 4, 120),
    },
    fixed("Moscow", "MSK", 180),
    fixed("India", "IST", 330),
    fixed("China", "CST", 480),
    fixed("Japan", "JST", 540),
    Zone {
        name: "Australia East",
        dst: rule("AEDT", Week::First, Weekday::Sunday, Month::October, 2, 660),
        std: rule("AEST", Week::First, Weekday::Sunday, Month::April, 3, 600),
    },
    Zone {
        name: "New Zealand",
        dst: rule("NZDT", Week::Last, Weekday::Sunday, Month::September, 2, 780),
        std: rule("NZST", Week::First, Weekday::Sunday, Month::April, 3, 720),
    },
    fixed("Hawaii", "HST", -600),
    Zone {
        name: "US Alaska",
        dst: rule("AKDT", Week::Second, Weekday::Sunday, Month::March, 2, -480),
        std: rule("AKST", Week::First, Weekday::Sunday, Month::November, 2, -540),
    },
    Zone {
        name: "US Pacific",
        dst: rule("PDT", Week::Second, Weekday::Sunday, Month::March, 2, -420),
        std: rule("PST", Week::First, Weekday::Sunday, Month::November, 2, -480),
    },
    Zone {
        name: "US Mountain",
        dst: rule("MDT", Week::Second, Weekday::Sunday, Month::March, 2, -360),
        std: rule("MST", Week::First, Weekday::Sunday, Month::November, 2, -420),
    },
    Zone {
        name: "US Central",
        dst: rule("CDT", Week::Second, Weekday::Sunday, Month::March, 2, -300),
        std: rule("CST", Week::First, Weekday::Sunday, Month::November, 2, -360),
    },
    Zone {
        name: "US Eastern",
        dst: rule("EDT", Week::Second, Weekday::Sunday, Month::March, 2, -240),
        std: rule("EST", Week::First, Weekday::Sunday, Month::November, 2, -300),
    },
    Zone {
        name: "Newfoundland",
        dst: rule("NDT", Week::Second, Weekday::Sunday, Month::March, 2, -150),
        std: rule("NST", Week::First, Weekday::Sunday, Month::November, 2, -210),
    },
    fixed("Brazil East", "BRT", -180),
];

/// Zone for a settings index, clamped to the table.
#[must_use]
pub fn zone(index: usize) -> &'static Zone {
    &ZONES[index.min(ZONES.len() - 1)]
}

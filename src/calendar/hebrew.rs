//! Hebrew calendar conversion (Dershowitz-Reingold arithmetic, including
//! the molad postponement rules).

use time::Date;

use super::rata_die;

/// Rata Die day of 1 Tishri, A.M. 1.
const HEBREW_EPOCH: i64 = -1_373_427;

/// Months are numbered the biblical way: Nisan = 1 .. Adar (II) = 12/13.
/// The year number changes at Tishri (month 7).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct HebrewDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl HebrewDate {
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        match self.month {
            1 => "Nisan",
            2 => "Iyar",
            3 => "Sivan",
            4 => "Tammuz",
            5 => "Av",
            6 => "Elul",
            7 => "Tishri",
            8 => "Heshvan",
            9 => "Kislev",
            10 => "Tevet",
            11 => "Shevat",
            12 if is_leap_year(self.year) => "Adar I",
            12 => "Adar",
            _ => "Adar II",
        }
    }
}

/// A Hebrew year is leap when it carries the thirteenth month.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (7 * i64::from(year) + 1).rem_euclid(19) < 7
}

fn last_month(year: i32) -> u8 {
    if is_leap_year(year) { 13 } else { 12 }
}

/// Days from the epoch to the mean conjunction of Tishri of `year`, with the
/// Monday/Wednesday/Friday postponement folded in.
fn elapsed_days(year: i32) -> i64 {
    let months_elapsed = (235 * (i64::from(year) - 1) + 1).div_euclid(19);
    let parts_elapsed = 12084 + 13753 * months_elapsed;
    let days = 29 * months_elapsed + parts_elapsed.div_euclid(25920);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

fn new_year_delay(year: i32) -> i64 {
    let ny0 = elapsed_days(year - 1);
    let ny1 = elapsed_days(year);
    let ny2 = elapsed_days(year + 1);
    if ny2 - ny1 == 356 {
        2
    } else if ny1 - ny0 == 382 {
        1
    } else {
        0
    }
}

/// Rata Die day of 1 Tishri of a Hebrew year.
#[must_use]
pub fn new_year(year: i32) -> i64 {
    HEBREW_EPOCH + elapsed_days(year) + new_year_delay(year)
}

/// Length of a Hebrew year in days. Always one of
/// {353, 354, 355, 383, 384, 385}.
#[must_use]
pub fn year_length(year: i32) -> i64 {
    new_year(year + 1) - new_year(year)
}

fn long_heshvan(year: i32) -> bool {
    year_length(year).rem_euclid(10) == 5
}

fn short_kislev(year: i32) -> bool {
    year_length(year).rem_euclid(10) == 3
}

/// Days in a month of a given year.
#[must_use]
pub fn month_length(year: i32, month: u8) -> u8 {
    match month {
        2 | 4 | 6 | 10 | 13 => 29,
        12 if !is_leap_year(year) => 29,
        8 if !long_heshvan(year) => 29,
        9 if short_kislev(year) => 29,
        _ => 30,
    }
}

/// Months of `year` in the order they occur, Tishri first.
fn months_in_year_order(year: i32) -> impl Iterator<Item = u8> {
    (7..=last_month(year)).chain(1..=6)
}

/// Rata Die day of a Hebrew date.
#[must_use]
pub fn to_rata_die(date: HebrewDate) -> i64 {
    let mut rd = new_year(date.year);
    for month in months_in_year_order(date.year) {
        if month == date.month {
            break;
        }
        rd += i64::from(month_length(date.year, month));
    }
    rd + i64::from(date.day) - 1
}

/// Hebrew date of a Rata Die day.
#[must_use]
pub fn from_rata_die(rd: i64) -> HebrewDate {
    // Close lower bound on the year, then step forward.
    let mut year = i32::try_from((rd - HEBREW_EPOCH) * 98496 / 35_975_351).unwrap_or(1) + 1;
    while new_year(year + 1) <= rd {
        year += 1;
    }
    while new_year(year) > rd {
        year -= 1;
    }

    let mut start = new_year(year);
    for month in months_in_year_order(year) {
        let len = i64::from(month_length(year, month));
        if rd < start + len {
            return HebrewDate {
                year,
                month,
                day: (rd - start + 1) as u8,
            };
        }
        start += len;
    }
    // Unreachable: the loop covers every day of the year.
    HebrewDate {
        year,
        month: 6,
        day: 29,
    }
}

/// Hebrew date of a Gregorian date.
#[must_use]
pub fn from_gregorian(date: Date) -> HebrewDate {
    from_rata_die(rata_die(date))
}

//! Tabular Islamic (civil) calendar. Arithmetic approximation of the
//! observational calendar; real months can differ by a day or two.

use libm::ceil;
use time::Date;

use super::rata_die;

/// Rata Die day of 1 Muharram, A.H. 1 (civil epoch, Friday).
const ISLAMIC_EPOCH: i64 = 227_015;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct IslamicDate {
    pub year: i32,
    /// 1 = Muharram .. 12 = Dhu al-Hijja.
    pub month: u8,
    pub day: u8,
}

impl IslamicDate {
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        match self.month {
            1 => "Muharram",
            2 => "Safar",
            3 => "Rabi I",
            4 => "Rabi II",
            5 => "Jumada I",
            6 => "Jumada II",
            7 => "Rajab",
            8 => "Shaban",
            9 => "Ramadan",
            10 => "Shawwal",
            11 => "Dhu al-Qada",
            _ => "Dhu al-Hijja",
        }
    }
}

/// Leap years of the 30-year cycle carry an extra day in Dhu al-Hijja.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (11 * i64::from(year) + 14).rem_euclid(30) < 11
}

/// Rata Die day of an Islamic date.
#[must_use]
pub fn to_rata_die(date: IslamicDate) -> i64 {
    let year = i64::from(date.year);
    let month = i64::from(date.month);
    i64::from(date.day)
        + 29 * (month - 1)
        + month.div_euclid(2)
        + (year - 1) * 354
        + (3 + 11 * year).div_euclid(30)
        + ISLAMIC_EPOCH
        - 1
}

/// Islamic date of a Rata Die day. Days before the epoch clamp to it.
#[must_use]
pub fn from_rata_die(rd: i64) -> IslamicDate {
    let rd = rd.max(ISLAMIC_EPOCH);
    let year_i64 = (30 * (rd - ISLAMIC_EPOCH) + 10646).div_euclid(10631);
    let year = i32::try_from(year_i64).unwrap_or(1);

    let year_start = to_rata_die(IslamicDate {
        year,
        month: 1,
        day: 1,
    });
    // Months alternate 30/29 days; ceil over the 29.5-day mean month picks
    // the right one directly.
    let prior = (rd - year_start - 29) as f64;
    let month = (ceil(prior / 29.5) as i64 + 1).clamp(1, 12) as u8;

    let month_start = to_rata_die(IslamicDate {
        year,
        month,
        day: 1,
    });
    IslamicDate {
        year,
        month,
        day: (rd - month_start + 1) as u8,
    }
}

/// Islamic date of a Gregorian date.
#[must_use]
pub fn from_gregorian(date: Date) -> IslamicDate {
    from_rata_die(rata_die(date))
}

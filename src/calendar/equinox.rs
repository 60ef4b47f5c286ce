//! Equinox and solstice instants (Meeus, Astronomical Algorithms ch. 27).
//!
//! Accurate to about a minute over 1000..=3000; the ~minute of TT-UTC
//! difference is ignored, which is below what the clock displays.

use libm::{cos, floor};
use time::{Date, PrimitiveDateTime, Time};

use crate::Result;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SeasonEvent {
    MarchEquinox,
    JuneSolstice,
    SeptemberEquinox,
    DecemberSolstice,
}

impl SeasonEvent {
    pub const ALL: [Self; 4] = [
        Self::MarchEquinox,
        Self::JuneSolstice,
        Self::SeptemberEquinox,
        Self::DecemberSolstice,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MarchEquinox => "Mar equ",
            Self::JuneSolstice => "Jun sol",
            Self::SeptemberEquinox => "Sep equ",
            Self::DecemberSolstice => "Dec sol",
        }
    }

    /// Mean-instant polynomial coefficients for years 1000..=3000.
    const fn mean_coefficients(self) -> [f64; 5] {
        match self {
            Self::MarchEquinox => [2_451_623.80984, 365_242.37404, 0.05169, -0.00411, -0.00057],
            Self::JuneSolstice => [2_451_716.56767, 365_241.62603, 0.00325, 0.00888, -0.00030],
            Self::SeptemberEquinox => {
                [2_451_810.21715, 365_242.01767, -0.11575, 0.00337, 0.00078]
            }
            Self::DecemberSolstice => {
                [2_451_900.05952, 365_242.74049, -0.06223, -0.00823, 0.00032]
            }
        }
    }

    /// UTC instant of the event in a given year.
    pub fn instant(self, year: i32) -> Result<PrimitiveDateTime> {
        let y = (f64::from(year) - 2000.0) / 1000.0;
        let [c0, c1, c2, c3, c4] = self.mean_coefficients();
        let jde0 = c0 + c1 * y + c2 * y * y + c3 * y * y * y + c4 * y * y * y * y;

        let t = (jde0 - 2_451_545.0) / 36525.0;
        let w = (35999.373 * t - 2.47).to_radians();
        let delta_lambda = 1.0 + 0.0334 * cos(w) + 0.0007 * cos(2.0 * w);

        let mut s = 0.0;
        for &(a, b, c) in &PERIODIC_TERMS {
            s += a * cos((b + c * t).to_radians());
        }

        datetime_from_julian(jde0 + 0.00001 * s / delta_lambda)
    }
}

/// The 24 periodic terms (A, B, C) of Meeus table 27.C.
const PERIODIC_TERMS: [(f64, f64, f64); 24] = [
    (485.0, 324.96, 1934.136),
    (203.0, 337.23, 32964.467),
    (199.0, 342.08, 20.186),
    (182.0, 27.85, 445_267.112),
    (156.0, 73.14, 45036.886),
    (136.0, 171.52, 22518.443),
    (77.0, 222.54, 65928.934),
    (74.0, 296.72, 3034.906),
    (70.0, 243.58, 9037.513),
    (58.0, 119.81, 33718.147),
    (52.0, 297.17, 150.678),
    (50.0, 21.02, 2281.226),
    (45.0, 247.54, 29929.562),
    (44.0, 325.15, 31555.956),
    (29.0, 60.93, 4443.417),
    (18.0, 155.12, 67555.328),
    (17.0, 288.79, 4562.452),
    (16.0, 198.04, 62894.029),
    (14.0, 199.76, 31436.921),
    (12.0, 95.39, 14577.848),
    (12.0, 287.11, 31931.756),
    (12.0, 320.81, 34777.259),
    (9.0, 227.73, 1222.114),
    (8.0, 15.45, 16859.074),
];

fn datetime_from_julian(jd: f64) -> Result<PrimitiveDateTime> {
    let jdn = floor(jd + 0.5);
    let day_fraction = jd + 0.5 - jdn;
    let date = Date::from_julian_day(jdn as i32)?;

    let seconds = (day_fraction * 86400.0) as u32;
    let time = Time::from_hms(
        (seconds / 3600).min(23) as u8,
        ((seconds / 60) % 60) as u8,
        (seconds % 60) as u8,
    )?;
    Ok(date.with_time(time))
}

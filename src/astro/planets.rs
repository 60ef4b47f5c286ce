//! Keplerian ephemerides for the classical planets: sky position,
//! illuminated phase, and visual magnitude.

use libm::{log10, sqrt};
use time::OffsetDateTime;

use super::{
    acosd, asind, atan2d, cosd, eccentric_anomaly, ecliptic_to_equatorial, epoch_day, hypot3,
    lst_degrees, rev, sind, sun, to_horizontal, Horizontal,
};
use crate::coords::LatLon;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Planet {
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Planet {
    pub const ALL: [Self; 7] = [
        Self::Mercury,
        Self::Venus,
        Self::Mars,
        Self::Jupiter,
        Self::Saturn,
        Self::Uranus,
        Self::Neptune,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mercury => "Mercury",
            Self::Venus => "Venus",
            Self::Mars => "Mars",
            Self::Jupiter => "Jupiter",
            Self::Saturn => "Saturn",
            Self::Uranus => "Uranus",
            Self::Neptune => "Neptune",
        }
    }

    /// Two-letter tag for dense screen layouts.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Mercury => "Me",
            Self::Venus => "Ve",
            Self::Mars => "Ma",
            Self::Jupiter => "Ju",
            Self::Saturn => "Sa",
            Self::Uranus => "Ur",
            Self::Neptune => "Ne",
        }
    }
}

/// Osculating orbital elements at an instant, degrees and AU.
struct Elements {
    /// Longitude of the ascending node.
    n: f64,
    /// Inclination to the ecliptic.
    i: f64,
    /// Argument of perihelion.
    w: f64,
    /// Semi-major axis.
    a: f64,
    /// Eccentricity.
    e: f64,
    /// Mean anomaly.
    m: f64,
}

fn elements(planet: Planet, d: f64) -> Elements {
    match planet {
        Planet::Mercury => Elements {
            n: 48.3313 + 3.24587e-5 * d,
            i: 7.0047 + 5.00e-8 * d,
            w: 29.1241 + 1.01444e-5 * d,
            a: 0.387098,
            e: 0.205635 + 5.59e-10 * d,
            m: 168.6562 + 4.092_334_436_8 * d,
        },
        Planet::Venus => Elements {
            n: 76.6799 + 2.46590e-5 * d,
            i: 3.3946 + 2.75e-8 * d,
            w: 54.8910 + 1.38374e-5 * d,
            a: 0.723330,
            e: 0.006773 - 1.302e-9 * d,
            m: 48.0052 + 1.602_130_224_4 * d,
        },
        Planet::Mars => Elements {
            n: 49.5574 + 2.11081e-5 * d,
            i: 1.8497 - 1.78e-8 * d,
            w: 286.5016 + 2.92961e-5 * d,
            a: 1.523688,
            e: 0.093405 + 2.516e-9 * d,
            m: 18.6021 + 0.524_020_776_6 * d,
        },
        Planet::Jupiter => Elements {
            n: 100.4542 + 2.76854e-5 * d,
            i: 1.3030 - 1.557e-7 * d,
            w: 273.8777 + 1.64505e-5 * d,
            a: 5.20256,
            e: 0.048498 + 4.469e-9 * d,
            m: 19.8950 + 0.083_085_300_1 * d,
        },
        Planet::Saturn => Elements {
            n: 113.6634 + 2.38980e-5 * d,
            i: 2.4886 - 1.081e-7 * d,
            w: 339.3939 + 2.97661e-5 * d,
            a: 9.55475,
            e: 0.055546 - 9.499e-9 * d,
            m: 316.9670 + 0.033_444_228_2 * d,
        },
        Planet::Uranus => Elements {
            n: 74.0005 + 1.3978e-5 * d,
            i: 0.7733 + 1.9e-8 * d,
            w: 96.6612 + 3.0565e-5 * d,
            a: 19.18171 - 1.55e-8 * d,
            e: 0.047318 + 7.45e-9 * d,
            m: 142.5905 + 0.011_725_806 * d,
        },
        Planet::Neptune => Elements {
            n: 131.7806 + 3.0173e-5 * d,
            i: 1.7700 - 2.55e-7 * d,
            w: 272.8461 - 6.027e-6 * d,
            a: 30.05826 + 3.313e-8 * d,
            e: 0.008606 + 2.15e-9 * d,
            m: 260.2471 + 0.005_995_147 * d,
        },
    }
}

/// Heliocentric ecliptic longitude/latitude (degrees) and distance (AU).
fn heliocentric(planet: Planet, d: f64) -> (f64, f64, f64) {
    let el = elements(planet, d);
    let ea = eccentric_anomaly(el.m, el.e);
    let xv = el.a * (cosd(ea) - el.e);
    let yv = el.a * sqrt(1.0 - el.e * el.e) * sind(ea);
    let v = atan2d(yv, xv);
    let r = sqrt(xv * xv + yv * yv);

    let u = v + el.w;
    let x = r * (cosd(el.n) * cosd(u) - sind(el.n) * sind(u) * cosd(el.i));
    let y = r * (sind(el.n) * cosd(u) + cosd(el.n) * sind(u) * cosd(el.i));
    let z = r * sind(u) * sind(el.i);

    let mut lon = rev(atan2d(y, x));
    let mut lat = asind(z / r);

    // Great mutual perturbations of the giant planets.
    let mj = rev(19.8950 + 0.083_085_300_1 * d);
    let ms = rev(316.9670 + 0.033_444_228_2 * d);
    let mu = rev(142.5905 + 0.011_725_806 * d);
    match planet {
        Planet::Jupiter => {
            lon += -0.332 * sind(2.0 * mj - 5.0 * ms - 67.6)
                - 0.056 * sind(2.0 * mj - 2.0 * ms + 21.0)
                + 0.042 * sind(3.0 * mj - 5.0 * ms + 21.0)
                - 0.036 * sind(mj - 2.0 * ms)
                + 0.022 * cosd(mj - ms)
                + 0.023 * sind(2.0 * mj - 3.0 * ms + 52.0)
                - 0.016 * sind(mj - 5.0 * ms - 69.0);
        }
        Planet::Saturn => {
            lon += 0.812 * sind(2.0 * mj - 5.0 * ms - 67.6)
                - 0.229 * cosd(2.0 * mj - 4.0 * ms - 2.0)
                + 0.119 * sind(mj - 2.0 * ms - 3.0)
                + 0.046 * sind(2.0 * mj - 6.0 * ms - 69.0)
                + 0.014 * sind(mj - 3.0 * ms + 32.0);
            lat += -0.020 * cosd(2.0 * mj - 4.0 * ms - 2.0)
                + 0.018 * sind(2.0 * mj - 6.0 * ms - 49.0);
        }
        Planet::Uranus => {
            lon += 0.040 * sind(ms - 2.0 * mu + 6.0)
                + 0.035 * sind(ms - 3.0 * mu + 33.0)
                - 0.015 * sind(mj - mu + 20.0);
        }
        _ => {}
    }

    (rev(lon), lat, r)
}

/// What an observer sees of a planet at an instant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PlanetView {
    pub horizontal: Horizontal,
    /// Illuminated fraction of the disc, 0..1.
    pub phase: f64,
    /// Apparent visual magnitude.
    pub magnitude: f64,
    /// Distance from Earth, AU.
    pub distance_au: f64,
}

/// Compute a planet's sky position, phase, and magnitude.
#[must_use]
pub fn view(planet: Planet, utc: OffsetDateTime, observer: LatLon) -> PlanetView {
    let d = epoch_day(utc);

    let (helio_lon, helio_lat, helio_r) = heliocentric(planet, d);
    let xh = helio_r * cosd(helio_lon) * cosd(helio_lat);
    let yh = helio_r * sind(helio_lon) * cosd(helio_lat);
    let zh = helio_r * sind(helio_lat);

    // The sun's geocentric position doubles as Earth's heliocentric one.
    let (sun_lon, sun_r) = sun::ecliptic(d);
    let xs = sun_r * cosd(sun_lon);
    let ys = sun_r * sind(sun_lon);

    let xg = xh + xs;
    let yg = yh + ys;
    let zg = zh;
    let geo_r = hypot3(xg, yg, zg);

    let equatorial = ecliptic_to_equatorial(xg, yg, zg, d);
    let horizontal = to_horizontal(equatorial, lst_degrees(utc, observer.lon), observer.lat);

    // Phase angle from the sun-planet-Earth triangle.
    let phase_angle = acosd(
        (helio_r * helio_r + geo_r * geo_r - sun_r * sun_r) / (2.0 * helio_r * geo_r),
    );
    let phase = (1.0 + cosd(phase_angle)) / 2.0;

    let dist_term = 5.0 * log10(helio_r * geo_r);
    let fv = phase_angle;
    let magnitude = match planet {
        Planet::Mercury => -0.36 + dist_term + 0.027 * fv + 2.2e-13 * pow6(fv),
        Planet::Venus => -4.34 + dist_term + 0.013 * fv + 4.2e-7 * fv * fv * fv,
        Planet::Mars => -1.51 + dist_term + 0.016 * fv,
        Planet::Jupiter => -9.25 + dist_term + 0.014 * fv,
        Planet::Saturn => {
            // Ring contribution from the ring-plane tilt as seen from Earth.
            let geo_lon = rev(atan2d(yg, xg));
            let geo_lat = asind(zg / geo_r);
            let ir = 28.06;
            let nr = 169.51 + 3.82e-5 * d;
            let b = asind(
                sind(geo_lat) * cosd(ir) - cosd(geo_lat) * sind(ir) * sind(geo_lon - nr),
            );
            -9.0 + dist_term + 0.044 * fv - 2.6 * sind(b.abs()) + 1.2 * sind(b) * sind(b)
        }
        Planet::Uranus => -7.15 + dist_term + 0.001 * fv,
        Planet::Neptune => -6.90 + dist_term + 0.001 * fv,
    };

    PlanetView {
        horizontal,
        phase,
        magnitude,
        distance_au: geo_r,
    }
}

fn pow6(x: f64) -> f64 {
    let x2 = x * x;
    x2 * x2 * x2
}

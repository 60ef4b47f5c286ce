//! Geographic coordinates: Maidenhead locators and great-circle distance.

use heapless::String;
use libm::{asin, cos, sin, sqrt};

use crate::{Error, Result};

/// Mean Earth radius, kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geographic position in degrees, north and east positive.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "pico1", derive(defmt::Format))]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Encode a position as a 6-character Maidenhead locator (field, square,
/// subsquare), e.g. Helsinki → `KP20le`.
#[must_use]
pub fn maidenhead(position: LatLon) -> String<6> {
    // Shift to the 0..360 / 0..180 frame the grid is defined on, then clamp
    // so +180 lon / +90 lat land in the last cell instead of one past it.
    let lon = (position.lon + 180.0).clamp(0.0, 359.999);
    let lat = (position.lat + 90.0).clamp(0.0, 179.999);

    let field_lon = (lon / 20.0) as u8;
    let field_lat = (lat / 10.0) as u8;
    let square_lon = ((lon % 20.0) / 2.0) as u8;
    let square_lat = (lat % 10.0) as u8;
    let sub_lon = ((lon % 2.0) * 12.0) as u8;
    let sub_lat = ((lat % 1.0) * 24.0) as u8;

    let mut locator = String::new();
    for byte in [
        b'A' + field_lon,
        b'A' + field_lat,
        b'0' + square_lon,
        b'0' + square_lat,
        b'a' + sub_lon.min(23),
        b'a' + sub_lat.min(23),
    ] {
        // Infallible: exactly six ASCII bytes into a String<6>.
        let _ = locator.push(byte as char);
    }
    locator
}

/// Decode a 4- or 6-character Maidenhead locator to the center of its square
/// (4 chars) or subsquare (6 chars).
pub fn locator_center(locator: &str) -> Result<LatLon> {
    let bytes = locator.as_bytes();
    if bytes.len() != 4 && bytes.len() != 6 {
        return Err(Error::InvalidLocator);
    }

    let field_lon = (bytes[0] & !0x20).wrapping_sub(b'A');
    let field_lat = (bytes[1] & !0x20).wrapping_sub(b'A');
    let square_lon = bytes[2].wrapping_sub(b'0');
    let square_lat = bytes[3].wrapping_sub(b'0');
    if field_lon > 17 || field_lat > 17 || square_lon > 9 || square_lat > 9 {
        return Err(Error::InvalidLocator);
    }

    let mut lon = f64::from(field_lon) * 20.0 + f64::from(square_lon) * 2.0;
    let mut lat = f64::from(field_lat) * 10.0 + f64::from(square_lat);

    if bytes.len() == 6 {
        let sub_lon = (bytes[4] | 0x20).wrapping_sub(b'a');
        let sub_lat = (bytes[5] | 0x20).wrapping_sub(b'a');
        if sub_lon > 23 || sub_lat > 23 {
            return Err(Error::InvalidLocator);
        }
        lon += f64::from(sub_lon) / 12.0 + 1.0 / 24.0;
        lat += f64::from(sub_lat) / 24.0 + 1.0 / 48.0;
    } else {
        lon += 1.0;
        lat += 0.5;
    }

    Ok(LatLon::new(lat - 90.0, lon - 180.0))
}

/// Great-circle distance between two positions, kilometers (haversine).
#[must_use]
pub fn distance_km(a: LatLon, b: LatLon) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = sin(d_lat / 2.0) * sin(d_lat / 2.0)
        + cos(lat_a) * cos(lat_b) * sin(d_lon / 2.0) * sin(d_lon / 2.0);
    2.0 * EARTH_RADIUS_KM * asin(sqrt(h.clamp(0.0, 1.0)))
}

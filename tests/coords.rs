//! Host-side checks for Maidenhead locator encoding/decoding and
//! great-circle distance.

use gps_clock::coords::{distance_km, locator_center, maidenhead, LatLon};

const HELSINKI: LatLon = LatLon::new(60.17, 24.94);
const LONDON: LatLon = LatLon::new(51.5074, -0.1278);

#[test]
fn known_locators() {
    assert_eq!(maidenhead(HELSINKI).as_str(), "KP20le");
    // Reference positions from the ARRL grid-square definition.
    assert_eq!(maidenhead(LatLon::new(59.945_556, 10.75)).as_str(), "JO59jw");
    assert_eq!(
        maidenhead(LatLon::new(41.714_775, -72.727_260)).as_str(),
        "FN31pr"
    );
    assert_eq!(maidenhead(LatLon::new(0.0, 0.0)).as_str(), "JJ00aa");
}

#[test]
fn poles_and_antimeridian_stay_in_grid() {
    assert_eq!(maidenhead(LatLon::new(90.0, 180.0)).as_str(), "RR99xx");
    assert_eq!(maidenhead(LatLon::new(-90.0, -180.0)).as_str(), "AA00aa");
}

#[test]
fn six_char_center_is_within_half_a_subsquare() {
    let center = locator_center("KP20le").unwrap();
    // Subsquare: 1/12 deg of longitude by 1/24 deg of latitude.
    assert!((center.lon - HELSINKI.lon).abs() <= 1.0 / 24.0 + 1e-9);
    assert!((center.lat - HELSINKI.lat).abs() <= 1.0 / 48.0 + 1e-9);
}

#[test]
fn four_char_center() {
    let center = locator_center("KP20").unwrap();
    assert!((center.lon - 25.0).abs() < 1e-9);
    assert!((center.lat - 60.5).abs() < 1e-9);
}

#[test]
fn locator_case_is_ignored() {
    assert_eq!(
        locator_center("kp20LE").unwrap(),
        locator_center("KP20le").unwrap()
    );
}

#[test]
fn invalid_locators_are_rejected() {
    assert!(locator_center("").is_err());
    assert!(locator_center("KP2").is_err());
    assert!(locator_center("KP20l").is_err());
    assert!(locator_center("ZZ99xx").is_err());
    assert!(locator_center("KPxx").is_err());
    assert!(locator_center("KP20zz").is_err());
}

#[test]
fn encode_then_decode_round_trips_to_the_same_subsquare() {
    for &pos in &[
        HELSINKI,
        LONDON,
        LatLon::new(-33.8688, 151.2093),
        LatLon::new(-54.8, -68.3),
    ] {
        let locator = maidenhead(pos);
        let center = locator_center(locator.as_str()).unwrap();
        assert_eq!(maidenhead(center), locator, "round trip for {locator}");
    }
}

#[test]
fn distance_of_a_point_to_itself_is_zero() {
    assert!(distance_km(HELSINKI, HELSINKI).abs() < 1e-9);
}

#[test]
fn one_equatorial_degree_is_about_111_km() {
    let d = distance_km(LatLon::new(0.0, 0.0), LatLon::new(0.0, 1.0));
    assert!((d - 111.19).abs() < 0.1, "got {d}");
}

#[test]
fn helsinki_to_london() {
    let d = distance_km(HELSINKI, LONDON);
    assert!((d - 1823.0).abs() < 30.0, "got {d}");
}

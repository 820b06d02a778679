//! Great-circle distance

use std::f64::consts::PI;

/// Earth radius used for every distance in the pipeline, in miles
pub const RADIUS_OF_EARTH_MILES: f64 = 3961.0;

pub fn deg_to_rad(deg: f64) -> f64 {
    PI * deg / 180.0
}

/// Haversine distance in miles between two points given in degrees
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (lat1, lon1, lat2, lon2) = (
        deg_to_rad(lat1),
        deg_to_rad(lon1),
        deg_to_rad(lat2),
        deg_to_rad(lon2),
    );
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    RADIUS_OF_EARTH_MILES * c
}

//! Radar detection between an aircraft and the player.
//!
//! Detection is symmetric: the same range check decides whether the enemy
//! shows up on the player's display and whether the enemy can see the player.

use jetstrike_core::components::Aircraft;
use jetstrike_core::constants::ALTITUDE_DETECTION_BONUS;
use jetstrike_core::enums::WeatherCondition;

use crate::profiles::AircraftProfile;

/// Effective detection range (cells) after stealth, altitude and weather.
pub fn effective_range(
    aircraft: &Aircraft,
    profile: &AircraftProfile,
    player_altitude: u8,
    weather: WeatherCondition,
) -> f64 {
    let base = aircraft.detection_range * profile.detection_factor(aircraft.stealth_mode);
    (base + player_altitude as f64 * ALTITUDE_DETECTION_BONUS) * weather.detection_range_modifier()
}

/// Whether `aircraft` and the player are within detection range of each other.
pub fn is_detected(
    aircraft: &Aircraft,
    profile: &AircraftProfile,
    player: &Aircraft,
    weather: WeatherCondition,
) -> bool {
    aircraft.position.range_to(player.position)
        <= effective_range(aircraft, profile, player.altitude, weather)
}

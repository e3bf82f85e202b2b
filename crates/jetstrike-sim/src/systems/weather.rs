//! Weather system: a persistent condition that occasionally shifts.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use jetstrike_core::constants::{WEATHER_PERSISTENCE, WEATHER_WEIGHTS};
use jetstrike_core::enums::WeatherCondition;
use jetstrike_core::events::EngineEvent;

/// Roll the next condition. Holds with `WEATHER_PERSISTENCE`, otherwise draws
/// from the weighted table (which may land on the same condition again).
pub fn next_weather(rng: &mut ChaCha8Rng, current: WeatherCondition) -> WeatherCondition {
    if rng.gen::<f64>() < WEATHER_PERSISTENCE {
        return current;
    }

    let total: u32 = WEATHER_WEIGHTS.iter().map(|&(_, w)| w).sum();
    let mut roll = rng.gen_range(0..total);
    for &(condition, weight) in &WEATHER_WEIGHTS {
        if roll < weight {
            return condition;
        }
        roll -= weight;
    }
    current
}

/// Advance the weather by one turn.
pub fn run(rng: &mut ChaCha8Rng, weather: &mut WeatherCondition, events: &mut Vec<EngineEvent>) {
    let next = next_weather(rng, *weather);
    if next != *weather {
        tracing::debug!("Weather changed: {:?} -> {:?}", *weather, next);
        events.push(EngineEvent::WeatherChanged {
            from: *weather,
            to: next,
        });
        *weather = next;
    }
}

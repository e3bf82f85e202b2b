//! Resource model: fuel, throttle, altitude and refueling.
//!
//! Every mutator clamps: fuel saturates at 0 and at capacity, altitude stays
//! within `0..=MAX_ALTITUDE`. Exhaustion is a game consequence, never an error.

use jetstrike_core::components::Aircraft;
use jetstrike_core::constants::*;
use jetstrike_core::enums::{Maneuver, RefuelSource, Terrain};
use jetstrike_ai::profiles::FuelSurcharges;
use jetstrike_grid::TerrainGrid;

/// Result of one fuel consumption call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelReport {
    pub spent: u32,
    /// The tank is empty after this call; the out-of-fuel handler must run once.
    pub exhausted: bool,
}

/// What the out-of-fuel handler did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutOfFuel {
    ForcedDescent { altitude: u8 },
    EmergencyRefuel { amount: u32 },
    CrashLanding { damage: u32 },
    /// Enemy ran dry on the deck: destroyed.
    Crashed,
}

/// Set velocity for a maneuver. Afterburner mode pins it at max.
pub fn set_throttle(aircraft: &mut Aircraft, maneuver: Maneuver) {
    let fraction = if aircraft.afterburner {
        1.0
    } else {
        match maneuver {
            Maneuver::Afterburner => 1.0,
            Maneuver::Regular => CRUISE_THROTTLE,
            Maneuver::Turn => TURN_THROTTLE,
            Maneuver::Climb => CLIMB_THROTTLE,
        }
    };
    aircraft.velocity = aircraft.max_velocity * fraction;
}

/// Fuel units a maneuver costs at the aircraft's current speed and altitude.
pub fn fuel_cost(aircraft: &Aircraft, maneuver: Maneuver, surcharges: &FuelSurcharges) -> u32 {
    let mut cost = FUEL_BASE_COST + surcharges.for_maneuver(maneuver);
    if aircraft.velocity > HIGH_SPEED_FRACTION * aircraft.max_velocity {
        cost += 1;
    }
    if aircraft.altitude == 0 {
        cost += 1;
    } else if aircraft.altitude >= MAX_ALTITUDE {
        cost = cost.saturating_sub(1).max(1);
    }
    if aircraft.afterburner {
        cost *= 2;
    }
    cost
}

/// Charge the cost of a maneuver. Fuel saturates at 0.
pub fn consume(aircraft: &mut Aircraft, maneuver: Maneuver, surcharges: &FuelSurcharges) -> FuelReport {
    let cost = fuel_cost(aircraft, maneuver, surcharges);
    let spent = cost.min(aircraft.fuel);
    aircraft.fuel -= spent;
    FuelReport {
        spent,
        exhausted: aircraft.fuel == 0,
    }
}

/// Set the throttle for a maneuver, then charge for it.
pub fn fly(aircraft: &mut Aircraft, maneuver: Maneuver, surcharges: &FuelSurcharges) -> FuelReport {
    set_throttle(aircraft, maneuver);
    consume(aircraft, maneuver, surcharges)
}

/// Climb one level. `None` at the ceiling, with no fuel spent.
pub fn climb(aircraft: &mut Aircraft, surcharges: &FuelSurcharges) -> Option<FuelReport> {
    if aircraft.altitude >= MAX_ALTITUDE {
        return None;
    }
    let report = fly(aircraft, Maneuver::Climb, surcharges);
    aircraft.altitude += 1;
    Some(report)
}

/// Descend one level for free. `false` when already on the deck.
pub fn descend(aircraft: &mut Aircraft) -> bool {
    if aircraft.altitude == 0 {
        return false;
    }
    aircraft.altitude -= 1;
    true
}

/// Fill up from a base underneath or a tanker within one cell.
///
/// Returns the source and the amount actually transferred.
pub fn refuel(aircraft: &mut Aircraft, grid: &TerrainGrid) -> Option<(RefuelSource, u32)> {
    let room = aircraft.max_fuel - aircraft.fuel;
    if grid.terrain_at(aircraft.position) == Terrain::Base {
        aircraft.fuel = aircraft.max_fuel;
        return Some((RefuelSource::Base, room));
    }

    let near_tanker = grid
        .tankers()
        .any(|tanker| tanker.chebyshev_to(aircraft.position) <= 1);
    if near_tanker {
        let amount = fraction_of(aircraft.max_fuel, TANKER_REFUEL_FRACTION).min(room);
        aircraft.fuel += amount;
        return Some((RefuelSource::Tanker, amount));
    }
    None
}

fn fraction_of(capacity: u32, fraction: f64) -> u32 {
    (capacity as f64 * fraction).round() as u32
}

/// Enemy tank ran dry: crash on the deck, otherwise damage and forced descent.
pub fn handle_enemy_out_of_fuel(aircraft: &mut Aircraft) -> OutOfFuel {
    if aircraft.altitude == 0 {
        aircraft.health = 0;
        return OutOfFuel::Crashed;
    }
    aircraft.health = aircraft.health.saturating_sub(ENEMY_FUEL_STARVATION_DAMAGE);
    aircraft.altitude -= 1;
    OutOfFuel::ForcedDescent {
        altitude: aircraft.altitude,
    }
}

/// Player tank ran dry: glide down, then either a base tops up the tank or the
/// landing is rough.
pub fn handle_player_out_of_fuel(aircraft: &mut Aircraft, over_base: bool) -> OutOfFuel {
    if aircraft.altitude > 0 {
        aircraft.altitude -= 1;
        return OutOfFuel::ForcedDescent {
            altitude: aircraft.altitude,
        };
    }
    if over_base {
        let amount = fraction_of(aircraft.max_fuel, EMERGENCY_REFUEL_FRACTION)
            .min(aircraft.max_fuel - aircraft.fuel);
        aircraft.fuel += amount;
        return OutOfFuel::EmergencyRefuel { amount };
    }
    aircraft.health = aircraft.health.saturating_sub(PLAYER_CRASH_DAMAGE);
    OutOfFuel::CrashLanding {
        damage: PLAYER_CRASH_DAMAGE,
    }
}

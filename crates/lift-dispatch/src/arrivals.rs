//! Destination draws.
//!
//! Generated passengers pick any other floor uniformly.  Seeded groups follow
//! an observed office-building pattern: people starting on the ground floor
//! go anywhere above it, people starting upstairs mostly head for the exit.

use lift_core::{FloorId, SimRng};

/// Uniform over every floor except `origin`.
pub fn generated_destination(rng: &mut SimRng, floors: u16, origin: FloorId) -> FloorId {
    skip_origin(rng.gen_range(0..floors - 1), origin)
}

/// Destination for a seeded passenger starting on `origin`.
///
/// - ground floor → uniform over `1..floors`
/// - above ground → ground floor with probability `ground_bias`, otherwise
///   uniform over `1..floors` minus `origin` (ground floor when that set is
///   empty, i.e. a two-floor building)
pub fn seeded_destination(rng: &mut SimRng, floors: u16, origin: FloorId, ground_bias: f64) -> FloorId {
    if origin == FloorId::GROUND {
        return FloorId(rng.gen_range(1..floors));
    }
    if floors <= 2 || rng.gen_bool(ground_bias) {
        return FloorId::GROUND;
    }
    skip_origin(rng.gen_range(1..floors - 1), origin)
}

/// Map a draw from a range one shorter than the candidate set onto the
/// candidates, stepping over `origin`.
#[inline]
fn skip_origin(pick: u16, origin: FloorId) -> FloorId {
    if pick >= origin.0 { FloorId(pick + 1) } else { FloorId(pick) }
}

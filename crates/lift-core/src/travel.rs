//! Car travel-time model.

use crate::FloorId;

/// Default minutes-per-√floor coefficient.
pub const DEFAULT_TRAVEL_COEFFICIENT: f64 = 5.0;

/// Virtual minutes a car needs to move from `from` to `to`:
/// `coefficient · √|to − from|`.
///
/// The square root approximates acceleration and deceleration: long runs
/// cost less per floor than short hops.  Staying put costs exactly zero.
#[inline]
pub fn travel_time(from: FloorId, to: FloorId, coefficient: f64) -> f64 {
    let floors = from.distance(to);
    if floors == 0 {
        return 0.0;
    }
    coefficient * f64::from(floors).sqrt()
}

//! `FloorRequestRegistry`: hall calls and car calls as plain flags.
//!
//! Passengers set flags, elevators clear them once served.  No locking: the
//! cooperative kernel never runs two processes at once.

use lift_core::{Direction, ElevatorId, FloorId};

#[derive(Clone, Debug)]
pub struct FloorRequestRegistry {
    want_up:   Vec<bool>,
    want_down: Vec<bool>,
    /// `want_off[elevator][floor]`
    want_off:  Vec<Vec<bool>>,
}

impl FloorRequestRegistry {
    pub fn new(floors: u16, elevators: u16) -> Self {
        let floors = floors as usize;
        Self {
            want_up:   vec![false; floors],
            want_down: vec![false; floors],
            want_off:  vec![vec![false; floors]; elevators as usize],
        }
    }

    // ── Hall calls ────────────────────────────────────────────────────────

    /// A passenger on `floor` wants to travel in `direction`.
    pub fn request(&mut self, floor: FloorId, direction: Direction) {
        *self.call_mut(floor, direction) = true;
    }

    /// Everyone waiting on `floor` for `direction` has been picked up.
    pub fn clear_call(&mut self, floor: FloorId, direction: Direction) {
        *self.call_mut(floor, direction) = false;
    }

    pub fn is_called(&self, floor: FloorId, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.want_up[floor.index()],
            Direction::Down => self.want_down[floor.index()],
        }
    }

    fn call_mut(&mut self, floor: FloorId, direction: Direction) -> &mut bool {
        match direction {
            Direction::Up => &mut self.want_up[floor.index()],
            Direction::Down => &mut self.want_down[floor.index()],
        }
    }

    // ── Car calls ─────────────────────────────────────────────────────────

    /// Someone aboard `elevator` is bound for `floor`.
    pub fn mark_off(&mut self, elevator: ElevatorId, floor: FloorId) {
        self.want_off[elevator.index()][floor.index()] = true;
    }

    /// Everyone bound for `floor` has left `elevator`.
    pub fn clear_off(&mut self, elevator: ElevatorId, floor: FloorId) {
        self.want_off[elevator.index()][floor.index()] = false;
    }

    pub fn wants_off(&self, elevator: ElevatorId, floor: FloorId) -> bool {
        self.want_off[elevator.index()][floor.index()]
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// `true` while any hall call is open or any car call of `elevator` is
    /// pending.  An elevator only sleeps once this turns false.
    pub fn has_work_for(&self, elevator: ElevatorId) -> bool {
        self.want_off[elevator.index()].iter().any(|&b| b)
            || self.want_up.iter().any(|&b| b)
            || self.want_down.iter().any(|&b| b)
    }

    /// Number of open hall calls across all floors and directions.
    pub fn open_calls(&self) -> usize {
        self.want_up.iter().chain(&self.want_down).filter(|&&b| b).count()
    }
}

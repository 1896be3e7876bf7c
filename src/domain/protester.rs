//! Protester state: the two-state lifecycle machine and its counters.
//!
//! The per-tick decision procedure lives in `sim::step`; this module holds
//! the data and the transitions that need no world access.

use std::collections::VecDeque;

use crate::domain::geometry::Direction;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProtesterKind {
    Regular,
    Hardcore,
}

impl ProtesterKind {
    pub fn starting_health(self) -> i32 {
        match self {
            ProtesterKind::Regular => 5,
            ProtesterKind::Hardcore => 20,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ProtesterState {
    InOilField,
    /// Moving out along the precomputed path; takes no further game
    /// actions other than pathing.
    LeaveOilField,
}

#[derive(Clone, Debug)]
pub struct Protester {
    pub kind: ProtesterKind,
    pub state: ProtesterState,
    /// Steps remaining before the wander direction is re-rolled.
    pub steps_left: u32,
    /// Non-resting actions since the last perpendicular turn.
    pub ticks_since_axis_swap: u32,
    /// Non-resting actions until the next shout is allowed.
    pub shout_cooldown: u32,
    /// Grace/stun counter; the protester does nothing while > 0.
    pub resting_ticks_left: u32,
    /// Reload value for the rest counter after each action.
    pub rest_ticks: u32,
    /// Whether the exit was bought with dropped gold. Kept for the host
    /// display; the leave behaviour itself keys off `state`.
    pub bribed: bool,
    /// Ordered directions out of the field, consumed while leaving.
    pub path_out: VecDeque<Direction>,
    /// Remembered pursuit path (hardcore only), resumed between
    /// recomputations.
    pub pursuit: VecDeque<Direction>,
}

impl Protester {
    pub fn new(kind: ProtesterKind, rest_ticks: u32) -> Self {
        Protester {
            kind,
            state: ProtesterState::InOilField,
            steps_left: 0,
            ticks_since_axis_swap: 0,
            shout_cooldown: 0,
            resting_ticks_left: rest_ticks,
            rest_ticks,
            bribed: false,
            path_out: VecDeque::new(),
            pursuit: VecDeque::new(),
        }
    }

    pub fn is_leaving(&self) -> bool {
        self.state == ProtesterState::LeaveOilField
    }

    /// Transition into `LeaveOilField` with the given path-out. Idempotent:
    /// returns false (and changes nothing) if the protester is already
    /// leaving, so re-applied damage can never re-award points.
    pub fn enter_leave_state(&mut self, path_out: VecDeque<Direction>) -> bool {
        if self.is_leaving() {
            return false;
        }
        self.state = ProtesterState::LeaveOilField;
        self.path_out = path_out;
        self.pursuit.clear();
        self.resting_ticks_left = 0;
        true
    }
}

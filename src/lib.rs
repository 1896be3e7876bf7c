//! Icefield: the simulation core of a tile-grid mining arcade game.
//!
//! A 64×64 field of ice, a player-controlled digger, protesters that chase
//! it off, boulders, squirts and buried goodies. The crate owns the rules
//! only; a host drives it by feeding one [`domain::actor::Command`] per
//! tick into [`sim::step::advance_tick`] and rendering from the returned
//! [`sim::event::GameEvent`] cues and the world snapshot.

pub mod config;
pub mod domain;
pub mod rng;
pub mod sim;

pub use config::TuningConfig;
pub use domain::actor::Command;
pub use rng::GameRng;
pub use sim::step::{advance_tick, TickOutcome, TickResult};
pub use sim::world::WorldState;

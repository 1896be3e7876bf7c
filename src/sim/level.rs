//! Level scaling and field generation.
//!
//! Every difficulty knob is a pure function of the level number, so the
//! whole table lives on a tiny copyable struct instead of a config file.
//! `generate` turns those numbers plus a seed into a playable WorldState.

use crate::config::TuningConfig;
use crate::domain::actor::{Actor, ItemKind, ItemLifetime};
use crate::domain::geometry::{Point, FIELD_SIZE, SURFACE_Y};
use crate::rng::GameRng;
use crate::sim::grid::CellTag;
use crate::sim::world::WorldState;

/// Columns of the pre-dug central mineshaft.
pub const SHAFT_X: std::ops::RangeInclusive<i32> = 30..=33;
/// Rows of the pre-dug central mineshaft.
pub const SHAFT_Y: std::ops::RangeInclusive<i32> = 4..=59;

/// Minimum Euclidean distance between anchors of generated objects.
const MIN_SEPARATION: f64 = 6.0;

#[derive(Clone, Copy, Debug)]
pub struct LevelParams {
    pub level: u32,
}

impl LevelParams {
    pub fn new(level: u32) -> Self {
        LevelParams { level }
    }

    pub fn boulders(&self) -> u32 {
        (self.level / 2 + 2).min(9)
    }

    pub fn gold_nuggets(&self) -> u32 {
        (5i64 - self.level as i64 / 2).max(2) as u32
    }

    pub fn barrels(&self) -> u32 {
        (self.level + 2).min(21)
    }

    /// Ticks a protester rests between actions. Zero from level 12 on.
    pub fn rest_ticks(&self) -> u32 {
        (3i64 - self.level as i64 / 4).max(0) as u32
    }

    /// Stun window after a protester survives a squirt hit.
    pub fn stun_ticks(&self) -> u32 {
        (100i64 - 10 * self.level as i64).max(50) as u32
    }

    pub fn protester_cap(&self) -> u32 {
        (2 + 3 * self.level / 2).min(15)
    }

    /// Ticks between protester admissions.
    pub fn protester_wait(&self) -> u32 {
        (200i64 - self.level as i64).max(25) as u32
    }

    /// Chance (percent) an admitted protester is hardcore.
    pub fn hardcore_percent(&self) -> u32 {
        (30 + 10 * self.level).min(90)
    }

    /// A goodie spawns on a given tick with probability 1/G.
    pub fn goodie_denominator(&self) -> u32 {
        self.level * 25 + 300
    }

    /// Maximum path length over which a hardcore protester smells the player.
    pub fn sense_range(&self) -> u32 {
        16 + 2 * self.level
    }

    pub fn temp_lifetime(&self) -> u32 {
        (300i64 - 10 * self.level as i64).max(100) as u32
    }
}

/// Build a fresh, fully populated world for `level`.
pub fn generate(
    level: u32,
    lives: u32,
    score: u32,
    tuning: TuningConfig,
    rng: GameRng,
) -> WorldState {
    let mut world = WorldState::new(level, lives, score, tuning, rng);
    fill_ice(&mut world);

    let mut placed: Vec<Point> = Vec::new();
    let params = world.params;

    for p in scatter(&mut world, params.boulders(), 20, 56, &mut placed) {
        world.grid.stamp(p.x, p.y, CellTag::Boulder);
        world.add_actor(Actor::boulder(p));
    }
    for p in scatter(&mut world, params.gold_nuggets(), 0, 56, &mut placed) {
        world.add_actor(Actor::item(p, ItemKind::GoldNugget, ItemLifetime::Permanent, false));
    }
    let barrels = scatter(&mut world, params.barrels(), 0, 56, &mut placed);
    world.barrels_total = barrels.len() as u32;
    for p in barrels {
        world.grid.stamp(p.x, p.y, CellTag::Barrel);
        world.add_actor(Actor::item(p, ItemKind::OilBarrel, ItemLifetime::Permanent, false));
    }

    world.update_status_text();
    world
}

/// Ice everywhere below the surface, minus the central mineshaft.
fn fill_ice(world: &mut WorldState) {
    for y in 0..SURFACE_Y {
        for x in 0..FIELD_SIZE {
            if SHAFT_X.contains(&x) && SHAFT_Y.contains(&y) {
                continue;
            }
            world.grid.set(x, y, CellTag::Ice);
        }
    }
}

/// Roll up to `count` anchors in rows `y_min..=y_max` whose footprints sit
/// entirely in undisturbed ice and keep clear of everything placed so far.
/// Rolls are bounded; an exhausted object is skipped rather than forced.
fn scatter(
    world: &mut WorldState,
    count: u32,
    y_min: i32,
    y_max: i32,
    placed: &mut Vec<Point>,
) -> Vec<Point> {
    let mut out = Vec::new();
    let tries_per_object = world.tuning.max_spawn_tries * 20;
    for _ in 0..count {
        let mut found = None;
        for _ in 0..tries_per_object {
            let x = world.rng.rn2(61) as i32;
            let y = y_min + world.rng.rn2((y_max - y_min + 1) as u32) as i32;
            let p = Point::new(x, y);
            if !footprint_all_ice(world, p) {
                continue;
            }
            if placed.iter().any(|q| p.distance_to(*q) <= MIN_SEPARATION) {
                continue;
            }
            found = Some(p);
            break;
        }
        if let Some(p) = found {
            placed.push(p);
            out.push(p);
        }
    }
    out
}

/// All 16 cells of the footprint carry the Ice tag. Automatically rejects
/// the mineshaft, the sky, and anything already stamped over.
fn footprint_all_ice(world: &WorldState, p: Point) -> bool {
    for dy in 0..4 {
        for dx in 0..4 {
            if world.grid.tag_at(p.x + dx, p.y + dy) != CellTag::Ice {
                return false;
            }
        }
    }
    true
}

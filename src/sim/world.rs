//! WorldState: the complete snapshot of a running level.
//!
//! The world exclusively owns the occupancy grid, the player, and every
//! other actor. Actors reach back into it only through the query methods
//! here; none of them may delete another actor — they flag it not-alive
//! and the step loop's reap pass destroys it.

use crate::config::TuningConfig;
use crate::domain::actor::{Actor, ActorKind, DamageSource, Player};
use crate::domain::geometry::Point;
use crate::domain::pathing;
use crate::domain::protester::ProtesterKind;
use crate::rng::GameRng;
use crate::sim::event::GameEvent;
use crate::sim::grid::OccupancyGrid;
use crate::sim::level::LevelParams;

pub struct WorldState {
    pub grid: OccupancyGrid,
    pub player: Player,
    /// Stable insertion order; the reap pass is the only erase point.
    pub actors: Vec<Actor>,

    pub params: LevelParams,
    pub lives: u32,
    pub score: u32,

    pub barrels_total: u32,
    pub barrels_collected: u32,

    pub active_protesters: u32,
    pub ticks_since_protester: u32,

    pub tick: u64,
    /// Fixed-width status line, republished at the top of every tick.
    pub status_line: String,

    pub tuning: TuningConfig,
    pub rng: GameRng,
}

impl WorldState {
    /// An empty field: no ice, no actors. `sim::level::generate` builds a
    /// playable one; tests stamp their own terrain.
    pub fn new(level: u32, lives: u32, score: u32, tuning: TuningConfig, rng: GameRng) -> Self {
        let params = LevelParams::new(level);
        WorldState {
            grid: OccupancyGrid::new(),
            player: Player::new(),
            actors: Vec::new(),
            params,
            lives,
            score,
            barrels_total: 0,
            barrels_collected: 0,
            active_protesters: 0,
            // First tick may admit a protester straight away.
            ticks_since_protester: params.protester_wait(),
            tick: 0,
            status_line: String::new(),
            tuning,
            rng,
        }
    }

    pub fn add_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    pub fn barrels_remaining(&self) -> u32 {
        self.barrels_total.saturating_sub(self.barrels_collected)
    }

    pub fn level_finished(&self) -> bool {
        self.barrels_collected >= self.barrels_total
    }

    // ── Queries exposed to actor behaviors ──

    /// Euclidean distance between two anchors ≤ radius.
    pub fn is_near(a: Point, b: Point, radius: f64) -> bool {
        a.distance_to(b) <= radius
    }

    /// Protester admission gate. True only when enough ticks have elapsed
    /// since the last admission AND the active count is under the level
    /// cap; a successful call books the slot (count incremented, elapsed
    /// counter reset).
    pub fn can_add_protester(&mut self) -> bool {
        if self.ticks_since_protester >= self.params.protester_wait()
            && self.active_protesters < self.params.protester_cap()
        {
            self.ticks_since_protester = 0;
            self.active_protesters += 1;
            return true;
        }
        self.ticks_since_protester += 1;
        false
    }

    /// Roll the kind of the next admitted protester.
    pub fn roll_protester_kind(&mut self) -> ProtesterKind {
        if self.rng.percent(self.params.hardcore_percent()) {
            ProtesterKind::Hardcore
        } else {
            ProtesterKind::Regular
        }
    }

    /// First protester (container order) whose anchor lies within `radius`
    /// cells of (x, y) on both axes.
    pub fn find_protester_near(&self, x: i32, y: i32, radius: i32) -> Option<usize> {
        self.actors.iter().position(|a| {
            a.is_protester()
                && a.core.alive
                && (a.core.pos.x - x).abs() <= radius
                && (a.core.pos.y - y).abs() <= radius
        })
    }

    /// Damage every protester within `radius` cells of (x, y) who is not
    /// already leaving the field. Handles stun and the give-up transition;
    /// returns whether anyone was hit.
    pub fn annoy_protesters(
        &mut self,
        x: i32,
        y: i32,
        radius: i32,
        amount: i32,
        src: DamageSource,
        events: &mut Vec<GameEvent>,
    ) -> bool {
        let mut hit = false;
        for i in 0..self.actors.len() {
            let pos = self.actors[i].core.pos;
            let leaving = match &self.actors[i].kind {
                ActorKind::Protester(p) => p.is_leaving(),
                _ => continue,
            };
            if !self.actors[i].core.alive || leaving {
                continue;
            }
            if (pos.x - x).abs() > radius || (pos.y - y).abs() > radius {
                continue;
            }

            hit = true;
            let depleted = self.actors[i].core.take_damage(amount);
            if depleted {
                self.give_up_protester(i, src, events);
            } else if src == DamageSource::WaterSpray {
                // Survived a squirt: stunned for the level's stun window.
                let stun = self.params.stun_ticks();
                if let ActorKind::Protester(p) = &mut self.actors[i].kind {
                    p.resting_ticks_left = stun;
                }
                events.push(GameEvent::ProtesterAnnoyed);
            }
        }
        hit
    }

    /// Health hit the floor: move the protester into `LeaveOilField` with a
    /// freshly computed path-out and award give-up points for the damage
    /// source. A protester already leaving is left untouched.
    pub fn give_up_protester(
        &mut self,
        index: usize,
        src: DamageSource,
        events: &mut Vec<GameEvent>,
    ) {
        let pos = self.actors[index].core.pos;
        let grid = &self.grid;
        let path = pathing::path_out(|p| grid.anchor_open(p), pos);

        let kind = match &self.actors[index].kind {
            ActorKind::Protester(p) => p.kind,
            _ => return,
        };
        let points = match src {
            DamageSource::RockFall => self.tuning.giveup_score_boulder,
            DamageSource::WaterSpray => match kind {
                ProtesterKind::Regular => self.tuning.giveup_score_squirt_regular,
                ProtesterKind::Hardcore => self.tuning.giveup_score_squirt_hardcore,
            },
            DamageSource::Protest => 0,
        };

        if let ActorKind::Protester(p) = &mut self.actors[index].kind {
            if p.enter_leave_state(path) {
                self.score += points;
                events.push(GameEvent::ProtesterGaveUp);
            }
        }
    }

    /// Clear the ice under a 4×4 footprint at (x, y).
    pub fn remove_ice_at(&mut self, x: i32, y: i32) -> bool {
        self.grid.remove_ice(x, y)
    }

    /// May a water pool settle here? Only on an ice-free footprint.
    pub fn can_add_water_at(&self, x: i32, y: i32) -> bool {
        !self.grid.has_ice_in_footprint(x, y)
    }

    // ── Display state ──

    /// Republish the status line the harness shows above the field.
    pub fn update_status_text(&mut self) {
        let health_pct = self.player.core.health * 10;
        self.status_line = format!(
            "Lvl: {:2}  Lives: {}  Hlth: {:3}%  Wtr: {:2}  Gld: {:2}  Oil Left: {:2}  Sonar: {:2}  Scr: {:06}",
            self.params.level,
            self.lives,
            health_pct,
            self.player.squirts,
            self.player.gold,
            self.barrels_remaining(),
            self.player.sonar,
            self.score,
        );
    }
}

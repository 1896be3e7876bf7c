//! Entities: the shared actor core, the player, and the non-AI actor kinds
//! (boulders, squirts, collectible items).
//!
//! Every simulated thing is owned by the world engine; actors never own one
//! another. Anything that wants another actor gone flags it not-alive and
//! lets the engine's reap pass destroy it.

use crate::domain::geometry::{BoundingBox, Direction, Point, FOOTPRINT};
use crate::domain::protester::Protester;

/// Where a hit came from. Scoring and stun behavior key off this.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DamageSource {
    WaterSpray,
    RockFall,
    Protest,
}

/// Per-tick input intent for the player, delivered by the owning harness.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Command {
    #[default]
    None,
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Dig,
    FireSquirt,
    Sonar,
    DropGold,
    /// Abort the level: unconditional player death.
    GiveUp,
}

impl Command {
    pub fn as_move(self) -> Option<Direction> {
        match self {
            Command::MoveUp => Some(Direction::Up),
            Command::MoveDown => Some(Direction::Down),
            Command::MoveLeft => Some(Direction::Left),
            Command::MoveRight => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Shared entity record: position, facing, liveness, health, and the
/// passable/damageable capability flags.
#[derive(Clone, Debug)]
pub struct ActorCore {
    pub pos: Point,
    pub facing: Direction,
    pub size: i32,
    /// Render z-order hint for the presentation layer (0 = front).
    pub depth: u32,
    pub alive: bool,
    pub health: i32,
    pub max_health: i32,
    pub damageable: bool,
    pub passable: bool,
    /// Invincibility window; damage is ignored while > 0. Decremented once
    /// per tick by the owner's update.
    pub iframes: u32,
    pub ticks_alive: u64,
}

impl ActorCore {
    pub fn new(
        pos: Point,
        facing: Direction,
        depth: u32,
        health: i32,
        damageable: bool,
        passable: bool,
    ) -> Self {
        ActorCore {
            pos,
            facing,
            size: FOOTPRINT,
            depth,
            alive: true,
            health,
            max_health: health,
            damageable,
            passable,
            iframes: 0,
            ticks_alive: 0,
        }
    }

    pub fn bb(&self) -> BoundingBox {
        BoundingBox::new(self.pos, self.size)
    }

    pub fn set_dead(&mut self) {
        self.alive = false;
    }

    /// Apply `amount` damage, clamping health at 0. Returns true when the
    /// hit depleted health. Undamageable actors and actors inside an
    /// invincibility window shrug the hit off.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if !self.damageable || self.iframes > 0 {
            return false;
        }
        self.health = (self.health - amount).max(0);
        self.health == 0
    }

    pub fn inc_health(&mut self, amount: i32) {
        self.health = (self.health + amount).min(self.max_health);
    }

    /// Start-of-update bookkeeping shared by every kind.
    pub fn begin_tick(&mut self) {
        self.ticks_alive += 1;
        if self.iframes > 0 {
            self.iframes -= 1;
        }
    }
}

// ── Player ──

/// The Iceman: the one actor driven by external input intent.
#[derive(Clone, Debug)]
pub struct Player {
    pub core: ActorCore,
    pub squirts: u32,
    pub sonar: u32,
    pub gold: u32,
}

pub const PLAYER_SPAWN: Point = Point { x: 30, y: 60 };
pub const PLAYER_HEALTH: i32 = 10;

impl Player {
    pub fn new() -> Self {
        Player {
            core: ActorCore::new(PLAYER_SPAWN, Direction::Right, 0, PLAYER_HEALTH, true, true),
            squirts: 5,
            sonar: 1,
            gold: 0,
        }
    }

    /// Unconditional death: boulder blast or the abort command. Bypasses
    /// health and the invincibility window by domain rule.
    pub fn give_up(&mut self) {
        self.core.health = 0;
        self.core.set_dead();
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

// ── Non-player actors ──

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoulderState {
    Stable,
    /// Instability grace countdown before the drop starts.
    Waiting { ticks_left: u32 },
    Falling,
}

#[derive(Clone, Debug)]
pub struct Boulder {
    pub state: BoulderState,
}

#[derive(Clone, Debug)]
pub struct Squirt {
    /// Cells of travel left before self-destruction.
    pub moves_left: u32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemKind {
    OilBarrel,
    GoldNugget,
    SonarKit,
    WaterPool,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ItemLifetime {
    Permanent,
    Temporary { ticks_left: u32 },
}

/// Who may pick an item up. Buried gold waits for the player; a nugget the
/// player drops as a bribe waits for a protester.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Claimant {
    Player,
    Protester,
}

#[derive(Clone, Debug)]
pub struct Item {
    pub kind: ItemKind,
    pub lifetime: ItemLifetime,
    /// Hidden items wait to be revealed by proximity or sonar.
    pub visible: bool,
    pub claimant: Claimant,
}

/// Closed set of engine-owned actor kinds, dispatched by the step loop.
/// Ice is not an actor; it lives entirely in the occupancy grid.
#[derive(Clone, Debug)]
pub enum ActorKind {
    Protester(Protester),
    Boulder(Boulder),
    Squirt(Squirt),
    Item(Item),
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub core: ActorCore,
    pub kind: ActorKind,
}

impl Actor {
    pub fn boulder(pos: Point) -> Self {
        Actor {
            core: ActorCore::new(pos, Direction::Down, 1, 1, false, false),
            kind: ActorKind::Boulder(Boulder { state: BoulderState::Stable }),
        }
    }

    pub fn squirt(pos: Point, dir: Direction, travel: u32) -> Self {
        Actor {
            core: ActorCore::new(pos, dir, 1, 1, false, true),
            kind: ActorKind::Squirt(Squirt { moves_left: travel }),
        }
    }

    pub fn item(pos: Point, kind: ItemKind, lifetime: ItemLifetime, visible: bool) -> Self {
        let claimant = match kind {
            ItemKind::GoldNugget if lifetime != ItemLifetime::Permanent => Claimant::Protester,
            _ => Claimant::Player,
        };
        Actor {
            core: ActorCore::new(pos, Direction::Right, 2, 1, false, true),
            kind: ActorKind::Item(Item { kind, lifetime, visible, claimant }),
        }
    }

    pub fn protester(pos: Point, protester: Protester, health: i32) -> Self {
        Actor {
            core: ActorCore::new(pos, Direction::Left, 0, health, true, true),
            kind: ActorKind::Protester(protester),
        }
    }

    pub fn is_protester(&self) -> bool {
        matches!(self.kind, ActorKind::Protester(_))
    }
}

//! The per-tick engine: one call to `advance_tick` drives the whole world
//! forward by a single simulation step.
//!
//! Strict phase order — status line, spawns, player, every pre-existing
//! live actor in container order, reap. Newly created actors never act on
//! the tick of their creation. Actors flagged not-alive mid-scan are left
//! in place until the reap phase; nothing erases during the scan.

use crate::domain::actor::{
    Actor, ActorCore, ActorKind, Boulder, BoulderState, Claimant, Command, DamageSource, Item,
    ItemKind, ItemLifetime, Squirt,
};
use crate::domain::geometry::{is_facing, Direction, Point, SURFACE_Y};
use crate::domain::pathing;
use crate::domain::protester::{Protester, ProtesterKind, ProtesterState};
use crate::sim::event::GameEvent;
use crate::sim::world::WorldState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TickOutcome {
    Continue,
    PlayerDied,
    LevelFinished,
}

#[derive(Clone, Debug)]
pub struct TickResult {
    pub outcome: TickOutcome,
    pub events: Vec<GameEvent>,
}

pub fn advance_tick(world: &mut WorldState, input: Command) -> TickResult {
    let mut events = Vec::new();
    world.tick += 1;
    world.update_status_text();

    // Everything spawned from here on waits until the next tick to act.
    let preexisting = world.actors.len();

    maybe_spawn_goodie(world, &mut events);
    maybe_spawn_protester(world);

    if world.player.core.alive {
        update_player(world, input, &mut events);
    }
    if !world.player.core.alive {
        events.push(GameEvent::PlayerKilled);
        return TickResult { outcome: TickOutcome::PlayerDied, events };
    }

    for i in 0..preexisting {
        if !world.actors[i].core.alive {
            continue;
        }
        // An actor's update must never reach its own slot through the
        // world, so it runs against a clone written back afterwards.
        let mut actor = world.actors[i].clone();
        update_actor(world, &mut actor, &mut events);
        world.actors[i] = actor;

        if !world.player.core.alive {
            events.push(GameEvent::PlayerKilled);
            return TickResult { outcome: TickOutcome::PlayerDied, events };
        }
        if world.barrels_total > 0 && world.level_finished() {
            events.push(GameEvent::LevelFinished);
            return TickResult { outcome: TickOutcome::LevelFinished, events };
        }
    }

    reap(world);

    if world.player.core.alive {
        TickResult { outcome: TickOutcome::Continue, events }
    } else {
        events.push(GameEvent::PlayerKilled);
        TickResult { outcome: TickOutcome::PlayerDied, events }
    }
}

// ── Spawning ──

/// One-in-G chance per tick of a goodie: usually a water pool at a random
/// ice-free anchor, occasionally a sonar kit at the top-left corner.
fn maybe_spawn_goodie(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    let g = world.params.goodie_denominator();
    if !world.rng.one_in(g) {
        return;
    }
    let lifetime = ItemLifetime::Temporary { ticks_left: world.params.temp_lifetime() };
    if world.rng.one_in(5) {
        world.add_actor(Actor::item(Point::new(0, SURFACE_Y), ItemKind::SonarKit, lifetime, true));
        events.push(GameEvent::ItemSpawned);
        return;
    }
    // Water settles only on an ice-free footprint; a bounded number of
    // rolls, and the spawn is skipped outright on exhaustion.
    for _ in 0..world.tuning.max_spawn_tries {
        let x = world.rng.rn2(61) as i32;
        let y = world.rng.rn2(61) as i32;
        if world.can_add_water_at(x, y) {
            world.add_actor(Actor::item(Point::new(x, y), ItemKind::WaterPool, lifetime, true));
            events.push(GameEvent::ItemSpawned);
            return;
        }
    }
}

fn maybe_spawn_protester(world: &mut WorldState) {
    if !world.can_add_protester() {
        return;
    }
    let kind = world.roll_protester_kind();
    let p = Protester::new(kind, world.params.rest_ticks());
    world.add_actor(Actor::protester(Point::new(60, SURFACE_Y), p, kind.starting_health()));
}

// ── Player ──

fn update_player(world: &mut WorldState, input: Command, events: &mut Vec<GameEvent>) {
    world.player.core.begin_tick();

    if let Some(dir) = input.as_move() {
        move_player(world, dir, events);
        return;
    }
    match input {
        Command::Dig => {
            let p = world.player.core.pos;
            if world.remove_ice_at(p.x, p.y) {
                events.push(GameEvent::Dig);
            }
        }
        Command::FireSquirt => fire_squirt(world, events),
        Command::Sonar => use_sonar(world, events),
        Command::DropGold => drop_gold(world, events),
        Command::GiveUp => world.player.give_up(),
        _ => {}
    }
}

/// A move toward a new heading turns in place; a move along the current
/// heading steps one cell unless out of range or boulder-blocked. Any ice
/// under the new footprint is dug away as part of the step.
fn move_player(world: &mut WorldState, dir: Direction, events: &mut Vec<GameEvent>) {
    if world.player.core.facing != dir {
        world.player.core.facing = dir;
        return;
    }
    let target = world.player.core.pos.adj(dir);
    if !target.is_valid_anchor() || world.grid.has_boulder_in_footprint(target.x, target.y) {
        return;
    }
    world.player.core.pos = target;
    if world.remove_ice_at(target.x, target.y) {
        events.push(GameEvent::Dig);
    }
}

/// Spend a charge and launch a squirt 4 cells ahead of the player. The cue
/// fires whether or not the spawn cell is clear.
fn fire_squirt(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.player.squirts == 0 {
        return;
    }
    world.player.squirts -= 1;
    events.push(GameEvent::SquirtFired);

    let dir = world.player.core.facing;
    let (dx, dy) = dir.delta();
    let pos = world.player.core.pos;
    let spawn = Point::new(pos.x + dx * 4, pos.y + dy * 4);
    if spawn.is_valid_anchor()
        && !world.grid.has_ice_in_footprint(spawn.x, spawn.y)
        && !world.grid.has_boulder_in_footprint(spawn.x, spawn.y)
    {
        world.add_actor(Actor::squirt(spawn, dir, world.tuning.squirt_travel));
    }
}

fn use_sonar(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.player.sonar == 0 {
        return;
    }
    world.player.sonar -= 1;
    events.push(GameEvent::SonarUsed);

    let ppos = world.player.core.pos;
    let range = world.tuning.sonar_range;
    for a in &mut world.actors {
        if let ActorKind::Item(item) = &mut a.kind {
            if !item.visible && WorldState::is_near(ppos, a.core.pos, range) {
                item.visible = true;
            }
        }
    }
}

fn drop_gold(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if world.player.gold == 0 {
        return;
    }
    world.player.gold -= 1;
    let lifetime = ItemLifetime::Temporary { ticks_left: world.tuning.gold_drop_lifetime };
    world.add_actor(Actor::item(world.player.core.pos, ItemKind::GoldNugget, lifetime, true));
    events.push(GameEvent::GoldDropped);
}

// ── Actor dispatch ──

fn update_actor(world: &mut WorldState, actor: &mut Actor, events: &mut Vec<GameEvent>) {
    debug_assert!(actor.core.alive, "dead actor advanced");
    actor.core.begin_tick();
    match &mut actor.kind {
        ActorKind::Boulder(b) => update_boulder(world, &mut actor.core, b, events),
        ActorKind::Squirt(s) => update_squirt(world, &mut actor.core, s, events),
        ActorKind::Item(item) => update_item(world, &mut actor.core, item, events),
        ActorKind::Protester(p) => update_protester(world, &mut actor.core, p, events),
    }
}

// ── Boulders ──

fn update_boulder(
    world: &mut WorldState,
    core: &mut ActorCore,
    b: &mut Boulder,
    events: &mut Vec<GameEvent>,
) {
    match b.state {
        BoulderState::Stable => {
            // Undermined: no ice left directly beneath the footprint.
            if core.pos.y > 0 && !world.grid.is_ice(core.pos.x, core.pos.y - 1, Direction::Down) {
                b.state = BoulderState::Waiting { ticks_left: world.tuning.boulder_grace_ticks };
                events.push(GameEvent::BoulderUnstable);
            }
        }
        BoulderState::Waiting { ticks_left } => {
            if ticks_left == 0 {
                b.state = BoulderState::Falling;
                world.grid.clear(core.pos.x, core.pos.y);
                events.push(GameEvent::BoulderFalling);
            } else {
                b.state = BoulderState::Waiting { ticks_left: ticks_left - 1 };
            }
        }
        BoulderState::Falling => {
            if !world.grid.can_fall(core.pos.x, core.pos.y) {
                core.set_dead();
                events.push(GameEvent::BoulderCrash);
                return;
            }
            core.pos.y -= 1;
            let (x, y) = (core.pos.x, core.pos.y);
            // A rock to the head is final regardless of health or iframes.
            if (world.player.core.pos.x - x).abs() <= 3 && (world.player.core.pos.y - y).abs() <= 3
            {
                world.player.give_up();
            }
            world.annoy_protesters(x, y, 3, world.tuning.boulder_damage, DamageSource::RockFall, events);
        }
    }
}

// ── Squirts ──

fn update_squirt(
    world: &mut WorldState,
    core: &mut ActorCore,
    s: &mut Squirt,
    events: &mut Vec<GameEvent>,
) {
    let (x, y) = (core.pos.x, core.pos.y);
    if world.annoy_protesters(x, y, 3, world.tuning.squirt_damage, DamageSource::WaterSpray, events)
    {
        core.set_dead();
        events.push(GameEvent::SquirtHit);
        return;
    }
    if s.moves_left == 0 {
        core.set_dead();
        return;
    }
    let next = core.pos.adj(core.facing);
    if !next.is_valid_anchor()
        || world.grid.is_ice(next.x, next.y, core.facing)
        || world.grid.is_boulder(next.x, next.y, core.facing)
    {
        core.set_dead();
        return;
    }
    core.pos = next;
    s.moves_left -= 1;
}

// ── Items ──

fn update_item(
    world: &mut WorldState,
    core: &mut ActorCore,
    item: &mut Item,
    events: &mut Vec<GameEvent>,
) {
    if let ItemLifetime::Temporary { ticks_left } = &mut item.lifetime {
        if *ticks_left == 0 {
            core.set_dead();
            return;
        }
        *ticks_left -= 1;
    }

    match item.claimant {
        Claimant::Player => player_claim(world, core, item, events),
        Claimant::Protester => protester_claim(world, core, item, events),
    }
}

fn player_claim(
    world: &mut WorldState,
    core: &mut ActorCore,
    item: &mut Item,
    events: &mut Vec<GameEvent>,
) {
    let ppos = world.player.core.pos;
    if !item.visible {
        // Buried goods surface when the player works close by; pickup
        // starts the tick after the reveal.
        if WorldState::is_near(ppos, core.pos, world.tuning.reveal_range) {
            item.visible = true;
        }
        return;
    }
    if !core.bb().intersects(world.player.core.bb()) {
        return;
    }
    core.set_dead();
    match item.kind {
        ItemKind::OilBarrel => {
            world.score += world.tuning.score_barrel;
            world.barrels_collected += 1;
            events.push(GameEvent::BarrelFound { remaining: world.barrels_remaining() });
        }
        ItemKind::GoldNugget => {
            world.score += world.tuning.score_gold;
            world.player.gold += 1;
            events.push(GameEvent::GoldFound);
        }
        ItemKind::SonarKit => {
            world.score += world.tuning.score_sonar;
            world.player.sonar += 1;
            events.push(GameEvent::GotGoodie);
        }
        ItemKind::WaterPool => {
            world.score += world.tuning.score_water;
            world.player.squirts += world.tuning.water_refill;
            events.push(GameEvent::GotGoodie);
        }
    }
}

/// Dropped gold waits for a protester. The first non-leaving protester
/// within 3 cells claims it: regular protesters are always bribed off the
/// field; hardcore ones only on a random check, and keep the nugget either
/// way it lands.
fn protester_claim(
    world: &mut WorldState,
    core: &mut ActorCore,
    _item: &mut Item,
    events: &mut Vec<GameEvent>,
) {
    let (x, y) = (core.pos.x, core.pos.y);
    let found = world.actors.iter().position(|a| match &a.kind {
        ActorKind::Protester(p) => {
            a.core.alive
                && !p.is_leaving()
                && (a.core.pos.x - x).abs() <= 3
                && (a.core.pos.y - y).abs() <= 3
        }
        _ => false,
    });
    let Some(j) = found else { return };

    let kind = match &world.actors[j].kind {
        ActorKind::Protester(p) => p.kind,
        _ => return,
    };
    match kind {
        ProtesterKind::Regular => {
            world.score += world.tuning.bribe_score_regular;
        }
        ProtesterKind::Hardcore => {
            let pickup_in = world.tuning.hardcore_gold_pickup_in;
            if !world.rng.one_in(pickup_in) {
                return; // eyes the nugget, doesn't take it this tick
            }
            world.score += world.tuning.bribe_score_hardcore;
        }
    }

    core.set_dead();
    events.push(GameEvent::ProtesterBribed);

    let pos = world.actors[j].core.pos;
    let grid = &world.grid;
    let path = pathing::path_out(|q| grid.anchor_open(q), pos);
    if let ActorKind::Protester(p) = &mut world.actors[j].kind {
        p.bribed = true;
        // Bribe-driven exit: no give-up bonus on top of the bribe score.
        p.enter_leave_state(path);
    }
}

// ── Protesters ──

fn update_protester(
    world: &mut WorldState,
    core: &mut ActorCore,
    p: &mut Protester,
    events: &mut Vec<GameEvent>,
) {
    if p.resting_ticks_left > 0 {
        p.resting_ticks_left -= 1;
        return;
    }

    if p.state == ProtesterState::LeaveOilField {
        match p.path_out.pop_front() {
            Some(dir) => {
                core.facing = dir;
                core.pos = core.pos.adj(dir);
            }
            None => {
                // Path exhausted at the boundary: off the field.
                core.set_dead();
                events.push(GameEvent::ProtesterLeft);
            }
        }
        p.resting_ticks_left = p.rest_ticks;
        return;
    }

    // Non-resting action bookkeeping.
    if p.shout_cooldown > 0 {
        p.shout_cooldown -= 1;
    }
    p.ticks_since_axis_swap += 1;

    let ppos = world.player.core.pos;
    let near_player = WorldState::is_near(core.pos, ppos, world.tuning.shout_range);

    // 1. Shout at a faced, in-range player.
    if near_player && is_facing(core.pos, core.facing, ppos) && p.shout_cooldown == 0 {
        events.push(GameEvent::ProtesterShout);
        let before = world.player.core.health;
        if world.player.core.take_damage(world.tuning.shout_damage) {
            world.player.core.set_dead();
        } else if world.player.core.health < before {
            events.push(GameEvent::PlayerAnnoyed);
            world.player.core.iframes = world.tuning.player_iframes;
        }
        p.shout_cooldown = world.tuning.shout_cooldown;
        p.resting_ticks_left = p.rest_ticks;
        return;
    }

    // 2. Hardcore pursuit when the player is out of shouting range.
    if p.kind == ProtesterKind::Hardcore && !near_player {
        let max_len = world.params.sense_range() as usize;
        let computed = {
            let grid = &world.grid;
            pathing::path_to(|q| grid.anchor_open(q), core.pos, ppos, max_len)
        };
        if let Some(mut path) = computed {
            if let Some(dir) = path.pop_front() {
                p.pursuit = path;
                core.facing = dir;
                core.pos = core.pos.adj(dir);
                p.resting_ticks_left = p.rest_ticks;
                return;
            }
        } else if let Some(dir) = p.pursuit.pop_front() {
            // Scent lost; retrace the remembered path while it stays open.
            if world.grid.anchor_open(core.pos.adj(dir)) {
                core.facing = dir;
                core.pos = core.pos.adj(dir);
                p.resting_ticks_left = p.rest_ticks;
                return;
            }
            p.pursuit.clear();
        }
    }

    // 3. Wander.
    if p.ticks_since_axis_swap >= 200 {
        let open: Vec<Direction> = core
            .facing
            .perpendicular()
            .into_iter()
            .filter(|&d| world.grid.anchor_open(core.pos.adj(d)))
            .collect();
        if !open.is_empty() {
            let pick = world.rng.rn2(open.len() as u32) as usize;
            core.facing = open[pick];
            p.steps_left = world.rng.rnd(53) + 7;
            p.ticks_since_axis_swap = 0;
        }
    }

    if p.steps_left == 0 || !world.grid.anchor_open(core.pos.adj(core.facing)) {
        let mut dir = None;
        for _ in 0..8 {
            let d = world.rng.direction();
            if world.grid.anchor_open(core.pos.adj(d)) {
                dir = Some(d);
                break;
            }
        }
        if dir.is_none() {
            dir = Direction::ALL
                .into_iter()
                .find(|&d| world.grid.anchor_open(core.pos.adj(d)));
        }
        match dir {
            Some(d) => {
                core.facing = d;
                p.steps_left = world.rng.rnd(53) + 7;
            }
            None => {
                // Boxed in on all four sides; nothing to do but wait.
                p.resting_ticks_left = p.rest_ticks;
                return;
            }
        }
    }

    core.pos = core.pos.adj(core.facing);
    p.steps_left -= 1;
    p.resting_ticks_left = p.rest_ticks;
}

// ── Reap ──

/// Destroy every actor flagged not-alive, clearing grid stamps and the
/// active-protester count as each one goes.
fn reap(world: &mut WorldState) {
    let mut i = 0;
    while i < world.actors.len() {
        if world.actors[i].core.alive {
            i += 1;
            continue;
        }
        let a = world.actors.remove(i);
        match &a.kind {
            ActorKind::Boulder(b) => {
                // Falling boulders surrendered their stamp at launch.
                if !matches!(b.state, BoulderState::Falling) {
                    world.grid.clear(a.core.pos.x, a.core.pos.y);
                }
            }
            ActorKind::Item(item) if item.kind == ItemKind::OilBarrel => {
                world.grid.clear(a.core.pos.x, a.core.pos.y);
            }
            ActorKind::Protester(_) => {
                world.active_protesters = world.active_protesters.saturating_sub(1);
            }
            _ => {}
        }
    }
}

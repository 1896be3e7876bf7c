//! Events emitted during a simulation tick.
//! The presentation layer consumes these for sprites/sound; the simulation
//! never reads them back.

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameEvent {
    Dig,
    SquirtFired,
    SquirtHit,
    ProtesterShout,
    ProtesterAnnoyed,
    ProtesterGaveUp,
    ProtesterLeft,
    ProtesterBribed,
    GoldDropped,
    BoulderUnstable,
    BoulderFalling,
    BoulderCrash,
    BarrelFound { remaining: u32 },
    GoldFound,
    SonarUsed,
    ItemSpawned,
    GotGoodie,
    PlayerAnnoyed,
    PlayerKilled,
    LevelFinished,
}

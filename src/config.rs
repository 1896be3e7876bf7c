//! External configuration loader.
//!
//! Reads `config.toml` from the executable's directory (or CWD).
//! Falls back to sensible defaults if the file is missing or incomplete.
//! Everything here is a tuning knob; the per-level difficulty formulas
//! live in `sim::level`.

use serde::Deserialize;
use std::path::PathBuf;

/// Tuning knobs for the simulation. One instance is owned by the world
/// and read by every behavior.
#[derive(Clone, Debug)]
pub struct TuningConfig {
    pub squirt_damage: i32,
    pub squirt_travel: u32,
    pub shout_damage: i32,
    pub shout_cooldown: u32,
    pub shout_range: f64,
    pub boulder_grace_ticks: u32,
    pub boulder_damage: i32,
    pub bribe_score_regular: u32,
    pub bribe_score_hardcore: u32,
    pub giveup_score_squirt_regular: u32,
    pub giveup_score_squirt_hardcore: u32,
    pub giveup_score_boulder: u32,
    pub score_barrel: u32,
    pub score_gold: u32,
    pub score_sonar: u32,
    pub score_water: u32,
    pub water_refill: u32,
    pub sonar_range: f64,
    pub reveal_range: f64,
    pub gold_drop_lifetime: u32,
    pub player_iframes: u32,
    /// Hardcore protesters claim a dropped nugget 1 time in this many.
    pub hardcore_gold_pickup_in: u32,
    /// Cap on rejected random placements before a spawn is skipped.
    pub max_spawn_tries: u32,
}

// ── TOML schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    tuning: TomlTuning,
}

#[derive(Deserialize, Debug)]
struct TomlTuning {
    #[serde(default = "default_squirt_damage")]
    squirt_damage: i32,
    #[serde(default = "default_squirt_travel")]
    squirt_travel: u32,
    #[serde(default = "default_shout_damage")]
    shout_damage: i32,
    #[serde(default = "default_shout_cooldown")]
    shout_cooldown: u32,
    #[serde(default = "default_shout_range")]
    shout_range: f64,
    #[serde(default = "default_boulder_grace")]
    boulder_grace_ticks: u32,
    #[serde(default = "default_boulder_damage")]
    boulder_damage: i32,
    #[serde(default = "default_bribe_regular")]
    bribe_score_regular: u32,
    #[serde(default = "default_bribe_hardcore")]
    bribe_score_hardcore: u32,
    #[serde(default = "default_giveup_squirt_regular")]
    giveup_score_squirt_regular: u32,
    #[serde(default = "default_giveup_squirt_hardcore")]
    giveup_score_squirt_hardcore: u32,
    #[serde(default = "default_giveup_boulder")]
    giveup_score_boulder: u32,
    #[serde(default = "default_score_barrel")]
    score_barrel: u32,
    #[serde(default = "default_score_gold")]
    score_gold: u32,
    #[serde(default = "default_score_sonar")]
    score_sonar: u32,
    #[serde(default = "default_score_water")]
    score_water: u32,
    #[serde(default = "default_water_refill")]
    water_refill: u32,
    #[serde(default = "default_sonar_range")]
    sonar_range: f64,
    #[serde(default = "default_reveal_range")]
    reveal_range: f64,
    #[serde(default = "default_gold_drop_lifetime")]
    gold_drop_lifetime: u32,
    #[serde(default = "default_player_iframes")]
    player_iframes: u32,
    #[serde(default = "default_hardcore_gold_pickup_in")]
    hardcore_gold_pickup_in: u32,
    #[serde(default = "default_max_spawn_tries")]
    max_spawn_tries: u32,
}

// ── Defaults ──

fn default_squirt_damage() -> i32 { 2 }
fn default_squirt_travel() -> u32 { 4 }
fn default_shout_damage() -> i32 { 2 }
fn default_shout_cooldown() -> u32 { 15 }
fn default_shout_range() -> f64 { 4.0 }
fn default_boulder_grace() -> u32 { 30 }
fn default_boulder_damage() -> i32 { 100 }
fn default_bribe_regular() -> u32 { 25 }
fn default_bribe_hardcore() -> u32 { 50 }
fn default_giveup_squirt_regular() -> u32 { 100 }
fn default_giveup_squirt_hardcore() -> u32 { 250 }
fn default_giveup_boulder() -> u32 { 500 }
fn default_score_barrel() -> u32 { 1000 }
fn default_score_gold() -> u32 { 10 }
fn default_score_sonar() -> u32 { 75 }
fn default_score_water() -> u32 { 100 }
fn default_water_refill() -> u32 { 5 }
fn default_sonar_range() -> f64 { 12.0 }
fn default_reveal_range() -> f64 { 4.0 }
fn default_gold_drop_lifetime() -> u32 { 100 }
fn default_player_iframes() -> u32 { 8 }
fn default_hardcore_gold_pickup_in() -> u32 { 2 }
fn default_max_spawn_tries() -> u32 { 30 }

impl Default for TomlTuning {
    fn default() -> Self {
        TomlTuning {
            squirt_damage: default_squirt_damage(),
            squirt_travel: default_squirt_travel(),
            shout_damage: default_shout_damage(),
            shout_cooldown: default_shout_cooldown(),
            shout_range: default_shout_range(),
            boulder_grace_ticks: default_boulder_grace(),
            boulder_damage: default_boulder_damage(),
            bribe_score_regular: default_bribe_regular(),
            bribe_score_hardcore: default_bribe_hardcore(),
            giveup_score_squirt_regular: default_giveup_squirt_regular(),
            giveup_score_squirt_hardcore: default_giveup_squirt_hardcore(),
            giveup_score_boulder: default_giveup_boulder(),
            score_barrel: default_score_barrel(),
            score_gold: default_score_gold(),
            score_sonar: default_score_sonar(),
            score_water: default_score_water(),
            water_refill: default_water_refill(),
            sonar_range: default_sonar_range(),
            reveal_range: default_reveal_range(),
            gold_drop_lifetime: default_gold_drop_lifetime(),
            player_iframes: default_player_iframes(),
            hardcore_gold_pickup_in: default_hardcore_gold_pickup_in(),
            max_spawn_tries: default_max_spawn_tries(),
        }
    }
}

impl Default for TuningConfig {
    fn default() -> Self {
        TomlTuning::default().into()
    }
}

impl From<TomlTuning> for TuningConfig {
    fn from(t: TomlTuning) -> Self {
        TuningConfig {
            squirt_damage: t.squirt_damage,
            squirt_travel: t.squirt_travel,
            shout_damage: t.shout_damage,
            shout_cooldown: t.shout_cooldown,
            shout_range: t.shout_range,
            boulder_grace_ticks: t.boulder_grace_ticks,
            boulder_damage: t.boulder_damage,
            bribe_score_regular: t.bribe_score_regular,
            bribe_score_hardcore: t.bribe_score_hardcore,
            giveup_score_squirt_regular: t.giveup_score_squirt_regular,
            giveup_score_squirt_hardcore: t.giveup_score_squirt_hardcore,
            giveup_score_boulder: t.giveup_score_boulder,
            score_barrel: t.score_barrel,
            score_gold: t.score_gold,
            score_sonar: t.score_sonar,
            score_water: t.score_water,
            water_refill: t.water_refill,
            sonar_range: t.sonar_range,
            reveal_range: t.reveal_range,
            gold_drop_lifetime: t.gold_drop_lifetime,
            player_iframes: t.player_iframes,
            hardcore_gold_pickup_in: t.hardcore_gold_pickup_in,
            max_spawn_tries: t.max_spawn_tries,
        }
    }
}

// ── Loading ──

impl TuningConfig {
    /// Load from `config.toml`. Search order: (1) exe directory, (2) current
    /// working directory. Missing file or missing keys fall back to defaults.
    pub fn load() -> Self {
        load_toml(&candidate_dirs()).tuning.into()
    }

    /// Parse from a TOML string (used by tests and embedding harnesses).
    pub fn from_toml_str(text: &str) -> Self {
        match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => cfg.tuning.into(),
            Err(e) => {
                eprintln!("Warning: config parse error: {e}");
                eprintln!("Using default settings.");
                TuningConfig::default()
            }
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        eprintln!("Warning: config.toml parse error: {e}");
                        eprintln!("Using default settings.");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    eprintln!("Warning: could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

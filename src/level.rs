//! Level descriptors
//!
//! Static level data fed into [`GameState`](crate::sim::GameState). Levels are
//! either built in or loaded from JSON; only the JSON path is validated.

use anyhow::{Context, Result, bail};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{LEVEL_LENGTH, PLAYER_START_X, PLAYER_START_Y};
use crate::sim::enemy::EnemyType;
use crate::sim::rect::Rect;
use crate::sim::state::PlatformKind;

/// Number of distinct built-in layouts; higher levels reuse the last one
pub const LEVEL_COUNT: u32 = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformDef {
    pub rect: Rect,
    #[serde(default)]
    pub kind: PlatformKind,
}

/// Enemy spawn record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemySpawn {
    #[serde(rename = "type")]
    pub kind: EnemyType,
    pub pos: Vec2,
    #[serde(default)]
    pub vel: Vec2,
    /// Horizontal bounds for patrol and flyer; ignored by turrets
    #[serde(default)]
    pub range: (f32, f32),
    /// Flyer starting phase or turret frames until first shot
    #[serde(default)]
    pub timer: f32,
}

/// `count` coins laid out to the right of `pos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinCluster {
    pub pos: Vec2,
    pub count: u32,
}

/// Everything needed to build one level attempt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// 1-based level number (drives the visual phase offset)
    pub index: u32,
    pub length: f32,
    #[serde(default = "default_player_start")]
    pub player_start: Vec2,
    pub platforms: Vec<PlatformDef>,
    #[serde(default)]
    pub enemies: Vec<EnemySpawn>,
    #[serde(default)]
    pub coin_clusters: Vec<CoinCluster>,
    /// Top-left corners of checkpoint posts
    #[serde(default)]
    pub checkpoints: Vec<Vec2>,
}

fn default_player_start() -> Vec2 {
    Vec2::new(PLAYER_START_X, PLAYER_START_Y)
}

impl LevelDescriptor {
    /// Built-in layout for `level` (1-based). Levels past the last layout
    /// reuse it with their own index.
    pub fn builtin(level: u32) -> Self {
        let index = level.max(1);
        let mut descriptor = match index {
            1 => level_one(),
            2 => level_two(),
            _ => level_three(),
        };
        descriptor.index = index;
        descriptor
    }

    /// Parse and validate an authored level
    pub fn from_json(json: &str) -> Result<Self> {
        let level: LevelDescriptor = serde_json::from_str(json).context("Failed to parse level descriptor")?;
        if let Err(e) = level.validate() {
            log::warn!("Rejected level {}: {e:#}", level.index);
            return Err(e);
        }
        log::info!("Loaded level {} from JSON", level.index);
        Ok(level)
    }

    /// Authoring checks. The simulation itself trusts its input.
    pub fn validate(&self) -> Result<()> {
        if !(self.length.is_finite() && self.length > 0.0) {
            bail!("level length must be positive, got {}", self.length);
        }
        if self.platforms.is_empty() {
            bail!("level has no platforms");
        }
        if !self.player_start.is_finite() {
            bail!("player start is not finite");
        }
        for (i, platform) in self.platforms.iter().enumerate() {
            if !platform.rect.is_well_formed() {
                bail!("platform {i} has a non-finite or empty rect");
            }
        }
        for (i, enemy) in self.enemies.iter().enumerate() {
            if !(enemy.pos.is_finite() && enemy.vel.is_finite() && enemy.timer.is_finite()) {
                bail!("enemy {i} has non-finite values");
            }
            let (min, max) = enemy.range;
            if enemy.kind != EnemyType::Turret && !(min.is_finite() && max.is_finite() && min <= max) {
                bail!("enemy {i} has an invalid range [{min}, {max}]");
            }
        }
        for (i, cluster) in self.coin_clusters.iter().enumerate() {
            if !cluster.pos.is_finite() {
                bail!("coin cluster {i} is not finite");
            }
        }
        if let Some(i) = self.checkpoints.iter().position(|p| !p.is_finite()) {
            bail!("checkpoint {i} is not finite");
        }
        Ok(())
    }
}

fn platform(x: f32, y: f32, w: f32, h: f32) -> PlatformDef {
    PlatformDef {
        rect: Rect::new(x, y, w, h),
        kind: PlatformKind::Normal,
    }
}

fn patrol(x: f32, y: f32, speed: f32, min: f32, max: f32) -> EnemySpawn {
    EnemySpawn {
        kind: EnemyType::Patrol,
        pos: Vec2::new(x, y),
        vel: Vec2::new(speed, 0.0),
        range: (min, max),
        timer: 0.0,
    }
}

fn flyer(x: f32, y: f32, speed: f32, min: f32, max: f32) -> EnemySpawn {
    EnemySpawn {
        kind: EnemyType::Flyer,
        ..patrol(x, y, speed, min, max)
    }
}

fn turret(x: f32, y: f32, first_shot: f32) -> EnemySpawn {
    EnemySpawn {
        kind: EnemyType::Turret,
        pos: Vec2::new(x, y),
        vel: Vec2::ZERO,
        range: (0.0, 0.0),
        timer: first_shot,
    }
}

fn coins(x: f32, y: f32, count: u32) -> CoinCluster {
    CoinCluster {
        pos: Vec2::new(x, y),
        count,
    }
}

fn level_one() -> LevelDescriptor {
    LevelDescriptor {
        index: 1,
        length: LEVEL_LENGTH,
        player_start: default_player_start(),
        platforms: vec![
            platform(0.0, 500.0, 800.0, 200.0),
            platform(950.0, 400.0, 400.0, 40.0),
            platform(1450.0, 550.0, 1200.0, 200.0),
            platform(2800.0, 500.0, 800.0, 200.0),
            platform(3800.0, 550.0, 1200.0, 200.0),
            platform(300.0, 320.0, 150.0, 20.0),
            platform(600.0, 220.0, 150.0, 20.0),
        ],
        enemies: vec![
            patrol(600.0, 462.0, 2.0, 200.0, 750.0),
            flyer(2000.0, 200.0, 2.0, 1800.0, 2400.0),
        ],
        coin_clusters: vec![
            coins(320.0, 320.0, 3),
            coins(620.0, 220.0, 3),
            coins(1000.0, 400.0, 4),
            coins(3000.0, 500.0, 5),
        ],
        checkpoints: vec![Vec2::new(2500.0, 380.0)],
    }
}

fn level_two() -> LevelDescriptor {
    LevelDescriptor {
        index: 2,
        length: LEVEL_LENGTH,
        player_start: default_player_start(),
        platforms: vec![
            platform(0.0, 500.0, 600.0, 200.0),
            platform(700.0, 350.0, 300.0, 40.0),
            platform(1100.0, 200.0, 300.0, 40.0),
            platform(1500.0, 350.0, 300.0, 40.0),
            platform(1900.0, 500.0, 800.0, 200.0),
            platform(2800.0, 400.0, 400.0, 40.0),
            platform(3300.0, 250.0, 250.0, 20.0),
            platform(3700.0, 500.0, 1300.0, 200.0),
        ],
        enemies: vec![
            turret(1200.0, 150.0, 60.0),
            flyer(2200.0, 150.0, 3.0, 1900.0, 2600.0),
            patrol(4000.0, 462.0, 4.0, 3800.0, 4500.0),
        ],
        coin_clusters: vec![
            coins(750.0, 350.0, 4),
            coins(1150.0, 200.0, 4),
            coins(2900.0, 400.0, 5),
            coins(3350.0, 250.0, 3),
        ],
        checkpoints: vec![Vec2::new(2300.0, 380.0)],
    }
}

fn level_three() -> LevelDescriptor {
    LevelDescriptor {
        index: 3,
        length: LEVEL_LENGTH,
        player_start: default_player_start(),
        platforms: vec![
            platform(0.0, 500.0, 400.0, 200.0),
            platform(500.0, 400.0, 150.0, 20.0),
            platform(750.0, 300.0, 150.0, 20.0),
            platform(1000.0, 200.0, 150.0, 20.0),
            platform(1300.0, 350.0, 400.0, 40.0),
            platform(1800.0, 250.0, 400.0, 40.0),
            platform(2300.0, 150.0, 400.0, 40.0),
            platform(2800.0, 500.0, 2200.0, 200.0),
        ],
        enemies: vec![
            turret(1450.0, 300.0, 60.0),
            turret(1950.0, 200.0, 120.0),
            flyer(3000.0, 200.0, 5.0, 2800.0, 3800.0),
            patrol(4000.0, 462.0, 10.0, 3500.0, 4800.0),
        ],
        coin_clusters: vec![
            coins(520.0, 400.0, 3),
            coins(770.0, 300.0, 3),
            coins(1350.0, 350.0, 5),
            coins(1850.0, 250.0, 5),
            coins(2350.0, 150.0, 5),
        ],
        checkpoints: vec![Vec2::new(2500.0, 380.0)],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_levels_are_valid() {
        for level in 1..=LEVEL_COUNT + 2 {
            let descriptor = LevelDescriptor::builtin(level);
            assert_eq!(descriptor.index, level);
            assert_eq!(descriptor.length, 5000.0);
            descriptor.validate().unwrap();
        }
    }

    #[test]
    fn test_levels_past_the_last_reuse_it() {
        let three = LevelDescriptor::builtin(3);
        let seven = LevelDescriptor::builtin(7);
        assert_eq!(seven.index, 7);
        assert_eq!(seven.platforms, three.platforms);
        assert_eq!(seven.enemies, three.enemies);
        // Level 0 is treated as level 1
        assert_eq!(LevelDescriptor::builtin(0).index, 1);
    }

    #[test]
    fn test_builtin_enemy_mix() {
        let kinds: Vec<_> = LevelDescriptor::builtin(3).enemies.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EnemyType::Turret, EnemyType::Turret, EnemyType::Flyer, EnemyType::Patrol]
        );
    }

    #[test]
    fn test_from_json_with_defaults() {
        let json = r#"{
            "index": 4,
            "length": 2000,
            "platforms": [ { "rect": { "pos": [0, 500], "size": [2000, 100] } } ],
            "enemies": [ { "type": "turret", "pos": [900, 462], "timer": 30 } ],
            "coin_clusters": [ { "pos": [400, 500], "count": 2 } ],
            "checkpoints": [ [1000, 380] ]
        }"#;
        let level = LevelDescriptor::from_json(json).unwrap();
        assert_eq!(level.player_start, Vec2::new(100.0, 300.0));
        assert_eq!(level.platforms[0].kind, PlatformKind::Normal);
        assert_eq!(level.enemies[0].kind, EnemyType::Turret);
        assert_eq!(level.enemies[0].vel, Vec2::ZERO);
        assert_eq!(level.enemies[0].timer, 30.0);
        assert_eq!(level.checkpoints, vec![Vec2::new(1000.0, 380.0)]);
    }

    #[test]
    fn test_from_json_rejects_bad_levels() {
        let no_platforms = r#"{ "index": 1, "length": 1000, "platforms": [] }"#;
        assert!(LevelDescriptor::from_json(no_platforms).is_err());

        let bad_length = r#"{
            "index": 1, "length": 0,
            "platforms": [ { "rect": { "pos": [0, 500], "size": [100, 100] } } ]
        }"#;
        assert!(LevelDescriptor::from_json(bad_length).is_err());

        let inverted_range = r#"{
            "index": 1, "length": 1000,
            "platforms": [ { "rect": { "pos": [0, 500], "size": [100, 100] } } ],
            "enemies": [ { "type": "patrol", "pos": [50, 462], "vel": [2, 0], "range": [400, 100] } ]
        }"#;
        assert!(LevelDescriptor::from_json(inverted_range).is_err());

        assert!(LevelDescriptor::from_json("not json").is_err());
    }

    #[test]
    fn test_descriptor_round_trips_through_json() {
        let level = LevelDescriptor::builtin(2);
        let json = serde_json::to_string(&level).unwrap();
        assert_eq!(LevelDescriptor::from_json(&json).unwrap(), level);
    }
}

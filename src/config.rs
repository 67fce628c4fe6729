use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::antiquity::{Antiquity, ChunkDescription, GenerationBracket, RockColor, RockShape};
use crate::common::CleaningError;
use crate::curve::{BonusCurve, Key};
use crate::geometry::{Rect, Vec2};
use crate::mines::smallest_region;

pub const START_TIME: f32 = 120.0;
pub const REQUIRED_EXPOSURE_FOR_COMPLETION: f32 = 0.95;
pub const REQUIRED_HEALTH_FOR_FAILURE: f32 = 0.1;
pub const REQUIRED_EXPOSURE_FOR_SCORING: f32 = 0.5;
pub const REQUIRED_HEALTH_FOR_PERFECT: f32 = 1.0;
pub const MINE_COUNT: usize = 4;
pub const MAX_MINE_COUNT: usize = 4096;
pub const MINE_MIN_LAYER: u32 = 1;
pub const MINE_RECT_SIZE: Vec2 = Vec2::new(8.0, 6.0);
/// Width and height of a single mine sprite.
pub const MINE_SIZE: Vec2 = Vec2::new(0.5, 0.5);
pub const MINE_DETONATION_DAMAGE: f32 = 1.5;

/// Mine field layout settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MineConfig {
    /// Size of the area mines are scattered over, centred on the rock.
    pub rect_size: Vec2,
    /// Shallowest chunk layer a mine may sit in.
    pub min_layer: u32,
    pub count: usize,
    pub mine_size: Vec2,
    /// Fossil damage dealt when a mine goes off.
    pub detonation_damage: f32,
}

impl Default for MineConfig {
    fn default() -> Self {
        Self {
            rect_size: MINE_RECT_SIZE,
            min_layer: MINE_MIN_LAYER,
            count: MINE_COUNT,
            mine_size: MINE_SIZE,
            detonation_damage: MINE_DETONATION_DAMAGE,
        }
    }
}

impl MineConfig {
    /// Check that `count` mines of `mine_size` always fit their regions.
    pub fn validate(&self) -> Result<(), CleaningError> {
        if self.count == 0 || self.count > MAX_MINE_COUNT {
            return Err(CleaningError::InvalidMineCount);
        }
        let root = Rect::centred(Vec2::default(), self.rect_size);
        if !root.is_well_formed() {
            return Err(CleaningError::InvalidRect {
                width: self.rect_size.x,
                height: self.rect_size.y,
            });
        }
        let size = self.mine_size;
        if !(size.x.is_finite() && size.y.is_finite() && size.x >= 0.0 && size.y >= 0.0) {
            return Err(CleaningError::InvalidRect {
                width: size.x,
                height: size.y,
            });
        }
        let smallest = smallest_region(root, self.count);
        if smallest.width < size.x || smallest.height < size.y {
            return Err(CleaningError::PaddingTooLarge {
                width: smallest.width,
                height: smallest.height,
                padding_x: size.x / 2.0,
                padding_y: size.y / 2.0,
            });
        }
        Ok(())
    }
}

/// Immutable settings shared by every manager of a cleaning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleaningConfig {
    pub start_time: f32,
    /// Seconds added to the clock per completed rock, keyed by artefact health.
    pub bonus_curve: BonusCurve,
    pub required_exposure_for_completion: f32,
    pub required_health_for_failure: f32,
    pub required_exposure_for_scoring: f32,
    pub required_health_for_perfect: f32,
    pub mines: MineConfig,
    pub bracket: GenerationBracket,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            start_time: START_TIME,
            bonus_curve: default_bonus_curve(),
            required_exposure_for_completion: REQUIRED_EXPOSURE_FOR_COMPLETION,
            required_health_for_failure: REQUIRED_HEALTH_FOR_FAILURE,
            required_exposure_for_scoring: REQUIRED_EXPOSURE_FOR_SCORING,
            required_health_for_perfect: REQUIRED_HEALTH_FOR_PERFECT,
            mines: MineConfig::default(),
            bracket: default_bracket(),
        }
    }
}

impl CleaningConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self, CleaningError> {
        let config: CleaningConfig =
            serde_json::from_str(json).map_err(|e| CleaningError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CleaningError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| CleaningError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), CleaningError> {
        if !(self.start_time.is_finite() && self.start_time > 0.0) {
            return Err(CleaningError::InvalidTime);
        }
        let thresholds = [
            (
                "required_exposure_for_completion",
                self.required_exposure_for_completion,
            ),
            ("required_health_for_failure", self.required_health_for_failure),
            (
                "required_exposure_for_scoring",
                self.required_exposure_for_scoring,
            ),
            ("required_health_for_perfect", self.required_health_for_perfect),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(CleaningError::InvalidThreshold(name));
            }
        }
        self.mines.validate()?;
        self.bracket.validate()?;
        for chunk in &self.bracket.chunk_descriptions {
            if self.mines.min_layer >= chunk.layers {
                return Err(CleaningError::InvalidLayerRange {
                    min_layer: self.mines.min_layer,
                    layers: chunk.layers,
                });
            }
        }
        Ok(())
    }
}

/// Healthy fossils earn up to six extra seconds; badly damaged ones nothing.
pub fn default_bonus_curve() -> BonusCurve {
    BonusCurve::from_keys(vec![
        Key {
            input: 0.0,
            output: 0.0,
        },
        Key {
            input: 0.5,
            output: 1.0,
        },
        Key {
            input: 1.0,
            output: 6.0,
        },
    ])
    .unwrap_or_else(|_| BonusCurve::identity())
}

pub fn default_bracket() -> GenerationBracket {
    GenerationBracket {
        name: "Quarry".to_string(),
        antiquities: vec![
            Antiquity::new("Ammonite", 1.0, 4.0, 100.0),
            Antiquity::new("Trilobite", 0.5, 3.0, 150.0),
            Antiquity::new("Raptor Claw", 0.25, 2.0, 250.0),
        ],
        rock_shapes: vec![
            RockShape {
                name: "Boulder".to_string(),
            },
            RockShape {
                name: "Slab".to_string(),
            },
        ],
        chunk_descriptions: vec![
            ChunkDescription {
                name: "Shallow".to_string(),
                layers: 3,
            },
            ChunkDescription {
                name: "Deep".to_string(),
                layers: 5,
            },
        ],
        rock_color: RockColor {
            r: 164,
            g: 132,
            b: 96,
        },
    }
}

//! Antiquity definitions and random artefact-rock generation.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::common::CleaningError;

/// A fossil type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Antiquity {
    pub display_name: String,
    /// Damage absorbed before the fossil starts losing health.
    pub breaking_health: f32,
    /// Damage the fossil can take in total once it is breaking.
    pub max_health: f32,
    /// Base score awarded for a fully healthy, fully exposed fossil.
    pub score: f32,
    #[serde(default)]
    pub set: Option<String>,
}

impl Antiquity {
    pub fn new(display_name: &str, breaking_health: f32, max_health: f32, score: f32) -> Self {
        Self {
            display_name: display_name.to_string(),
            breaking_health,
            max_health,
            score,
            set: None,
        }
    }
}

/// Outline of the rock surrounding the fossil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RockShape {
    pub name: String,
}

/// Layout of the destructible chunks making up the rock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkDescription {
    pub name: String,
    /// Number of chunk layers from the surface down.
    pub layers: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RockColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Candidate pools a session draws its rock from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationBracket {
    pub name: String,
    pub antiquities: Vec<Antiquity>,
    pub rock_shapes: Vec<RockShape>,
    pub chunk_descriptions: Vec<ChunkDescription>,
    pub rock_color: RockColor,
}

/// Antiquity, rock shape, chunk layout and color for one rock.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtefactRock {
    pub antiquity: Antiquity,
    pub rock_shape: RockShape,
    pub chunk_description: ChunkDescription,
    pub rock_color: RockColor,
}

impl GenerationBracket {
    /// Reject brackets with an empty candidate list or unusable antiquities.
    pub fn validate(&self) -> Result<(), CleaningError> {
        if self.antiquities.is_empty() {
            return Err(CleaningError::EmptyBracket("antiquities"));
        }
        if self.rock_shapes.is_empty() {
            return Err(CleaningError::EmptyBracket("rock shapes"));
        }
        if self.chunk_descriptions.is_empty() {
            return Err(CleaningError::EmptyBracket("chunk descriptions"));
        }
        for antiquity in &self.antiquities {
            if !(antiquity.max_health > 0.0) || antiquity.breaking_health < 0.0 {
                return Err(CleaningError::Config(format!(
                    "antiquity {} needs max_health > 0 and breaking_health >= 0",
                    antiquity.display_name
                )));
            }
        }
        Ok(())
    }

    /// Pick each component uniformly at random.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<ArtefactRock, CleaningError> {
        self.validate()?;
        let antiquity = &self.antiquities[rng.random_range(0..self.antiquities.len())];
        let rock_shape = &self.rock_shapes[rng.random_range(0..self.rock_shapes.len())];
        let chunk_description =
            &self.chunk_descriptions[rng.random_range(0..self.chunk_descriptions.len())];
        Ok(ArtefactRock {
            antiquity: antiquity.clone(),
            rock_shape: rock_shape.clone(),
            chunk_description: chunk_description.clone(),
            rock_color: self.rock_color,
        })
    }
}

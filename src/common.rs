//! Common types for fossil cleaning: the crate-wide error enum.

/// Errors returned by cleaning operations and configuration validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CleaningError {
    /// A generation bracket list has no candidates; carries the list name.
    EmptyBracket(&'static str),
    /// Mine count is zero or above `MAX_MINE_COUNT`.
    InvalidMineCount,
    /// A rectangle or size is not positive and finite.
    InvalidRect { width: f32, height: f32 },
    /// Padding does not fit inside a region on at least one axis.
    PaddingTooLarge { width: f32, height: f32, padding_x: f32, padding_y: f32 },
    /// `min_layer` is not below the chunk layer count.
    InvalidLayerRange { min_layer: u32, layers: u32 },
    /// Bonus curve keyframes are empty, unsorted or decreasing.
    InvalidCurve(String),
    /// A threshold is outside `[0, 1]`; carries the field name.
    InvalidThreshold(&'static str),
    /// Start time is not a positive finite number.
    InvalidTime,
    /// Operation is not allowed in the current cleaning state.
    InvalidState,
    /// No mine with the given id.
    MineNotFound(usize),
    /// Mine was already defused or detonated.
    MineAlreadyResolved(usize),
    /// Configuration could not be read or parsed.
    Config(String),
}

impl core::fmt::Display for CleaningError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CleaningError::EmptyBracket(list) => {
                write!(f, "Generation bracket has no {}", list)
            }
            CleaningError::InvalidMineCount => write!(
                f,
                "Mine count must be between 1 and {}",
                crate::config::MAX_MINE_COUNT
            ),
            CleaningError::InvalidRect { width, height } => {
                write!(f, "Rectangle {}x{} must be positive and finite", width, height)
            }
            CleaningError::PaddingTooLarge {
                width,
                height,
                padding_x,
                padding_y,
            } => write!(
                f,
                "Padding ({}, {}) does not fit in a {}x{} region",
                padding_x, padding_y, width, height
            ),
            CleaningError::InvalidLayerRange { min_layer, layers } => write!(
                f,
                "Minimum mine layer {} is not below layer count {}",
                min_layer, layers
            ),
            CleaningError::InvalidCurve(msg) => write!(f, "Invalid bonus curve: {}", msg),
            CleaningError::InvalidThreshold(name) => {
                write!(f, "Threshold {} must be within [0, 1]", name)
            }
            CleaningError::InvalidTime => write!(f, "Start time must be positive and finite"),
            CleaningError::InvalidState => {
                write!(f, "Operation not allowed in the current cleaning state")
            }
            CleaningError::MineNotFound(id) => write!(f, "Mine {} not found", id),
            CleaningError::MineAlreadyResolved(id) => {
                write!(f, "Mine {} was already defused or detonated", id)
            }
            CleaningError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CleaningError {}

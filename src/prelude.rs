//! Commonly used types and utilities for ease of import.

pub use crate::{
    CleaningBot, CleaningConfig, CleaningError, CleaningEvent, CleaningResults, CleaningSession,
    CleaningState, FossilShape, Tick,
};

//! Piecewise-linear curve mapping artefact health to bonus seconds.

use serde::{Deserialize, Serialize};

use crate::common::CleaningError;

/// One keyframe of a [`BonusCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub input: f32,
    pub output: f32,
}

/// Monotonic non-decreasing curve, linear between keys and clamped outside them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Key>", into = "Vec<Key>")]
pub struct BonusCurve {
    keys: Vec<Key>,
}

impl BonusCurve {
    /// Build a curve from keys sorted by strictly increasing input.
    pub fn from_keys(keys: Vec<Key>) -> Result<Self, CleaningError> {
        if keys.is_empty() {
            return Err(CleaningError::InvalidCurve("no keys".into()));
        }
        if keys
            .iter()
            .any(|k| !k.input.is_finite() || !k.output.is_finite())
        {
            return Err(CleaningError::InvalidCurve("non-finite key".into()));
        }
        for pair in keys.windows(2) {
            if pair[1].input <= pair[0].input {
                return Err(CleaningError::InvalidCurve(format!(
                    "key inputs must increase ({} after {})",
                    pair[1].input, pair[0].input
                )));
            }
            if pair[1].output < pair[0].output {
                return Err(CleaningError::InvalidCurve(format!(
                    "curve decreases between {} and {}",
                    pair[0].input, pair[1].input
                )));
            }
        }
        Ok(Self { keys })
    }

    /// Maps `x` to itself over `[0, 1]`.
    pub fn identity() -> Self {
        Self {
            keys: vec![
                Key {
                    input: 0.0,
                    output: 0.0,
                },
                Key {
                    input: 1.0,
                    output: 1.0,
                },
            ],
        }
    }

    /// Same output for every input.
    pub fn constant(value: f32) -> Self {
        Self {
            keys: vec![Key {
                input: 0.0,
                output: value,
            }],
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn evaluate(&self, x: f32) -> f32 {
        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if x <= first.input {
            return first.output;
        }
        if x >= last.input {
            return last.output;
        }
        // x lies strictly inside the key range, so some window brackets it
        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if x <= b.input {
                let t = (x - a.input) / (b.input - a.input);
                return a.output + (b.output - a.output) * t;
            }
        }
        last.output
    }
}

impl TryFrom<Vec<Key>> for BonusCurve {
    type Error = CleaningError;

    fn try_from(keys: Vec<Key>) -> Result<Self, Self::Error> {
        Self::from_keys(keys)
    }
}

impl From<BonusCurve> for Vec<Key> {
    fn from(curve: BonusCurve) -> Self {
        curve.keys
    }
}

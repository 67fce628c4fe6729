use serde::Serialize;

use crate::cleaning::{CleaningManager, CleaningState};
use crate::score::CleaningScoreManager;
use crate::timer::CleaningTimerManager;

/// End-of-session summary shown to the player.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleaningResults {
    pub state: CleaningState,
    pub total_score: f32,
    pub artefacts_cleaned: u32,
    pub artefacts_perfected: u32,
    /// Percent, rounded; `None` when nothing was cleaned.
    pub average_health: Option<f32>,
    pub average_exposure: Option<f32>,
    pub total_time: f32,
}

impl CleaningResults {
    pub fn collect(
        cleaning: &CleaningManager,
        score: &CleaningScoreManager,
        timer: &CleaningTimerManager,
    ) -> Self {
        Self {
            state: cleaning.state(),
            total_score: score.score(),
            artefacts_cleaned: score.artefacts_cleaned(),
            artefacts_perfected: score.artefacts_perfected(),
            average_health: score.average_health().map(percent),
            average_exposure: score.average_exposure().map(percent),
            total_time: timer.total_time(),
        }
    }
}

fn percent(fraction: f32) -> f32 {
    (fraction * 100.0).round()
}

impl core::fmt::Display for CleaningResults {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let pct = |v: Option<f32>| v.map_or_else(|| "-".to_string(), |v| format!("{}%", v));
        writeln!(f, "Result:              {:?}", self.state)?;
        writeln!(f, "Total score:         {}", self.total_score)?;
        writeln!(f, "Artefacts cleaned:   {}", self.artefacts_cleaned)?;
        writeln!(f, "Artefacts perfected: {}", self.artefacts_perfected)?;
        writeln!(f, "Average health:      {}", pct(self.average_health))?;
        writeln!(f, "Average exposure:    {}", pct(self.average_exposure))?;
        write!(f, "Total time:          {:.1}s", self.total_time)
    }
}

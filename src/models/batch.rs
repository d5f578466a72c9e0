use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Quality evaluation recorded after a batch is finished
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    /// Score from 1 (worst) to 5 (best)
    pub score: u8,
    /// Measured ending ambient temperature in °C, if taken
    pub actual_end_temp: Option<f64>,
    pub comment: Option<String>,
}

impl Evaluation {
    /// Creates an evaluation, rejecting scores outside 1..=5
    pub fn new(score: u8, actual_end_temp: Option<f64>, comment: Option<String>) -> AppResult<Self> {
        if !(1..=5).contains(&score) {
            return Err(AppError::InvalidInput(format!(
                "Evaluation score must be between 1 and 5, got {}",
                score
            )));
        }

        Ok(Self {
            score,
            actual_end_temp,
            comment,
        })
    }
}

/// One historical production batch with its ingredient quantities,
/// ambient conditions and (once scored) its evaluation.
///
/// The suggestion engine treats these as read-only evidence; they are
/// created and updated by the production-tracking and evaluation-entry
/// subsystems.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchRecord {
    pub id: i64,
    /// Flour in kilograms; the base quantity ratios are normalized against
    pub flour_kg: f64,
    /// Leavening agent in grams; the quantity the engine predicts
    pub leavening_grams: f64,
    /// Emulsifier in milliliters; carried through for display only
    pub emulsifier_ml: f64,
    /// Ambient temperature in °C when the batch was started; `None` means
    /// unknown, never zero
    pub ambient_temp_start: Option<f64>,
    /// Planned ambient temperature in °C at the end of fermentation
    pub ambient_temp_end_planned: Option<f64>,
    /// Fermentation duration in whole minutes, derived from the batch's
    /// start and end timestamps
    pub fermentation_minutes: Option<u32>,
    pub notes: Option<String>,
    pub evaluation: Option<Evaluation>,
}

impl BatchRecord {
    /// Derives the fermentation duration in whole minutes from the batch
    /// timestamps, truncating partial minutes.
    pub fn derive_fermentation_minutes(
        started_at: DateTime<Utc>,
        ended_at: DateTime<Utc>,
    ) -> AppResult<u32> {
        if ended_at <= started_at {
            return Err(AppError::InvalidInput(
                "Batch end time must be after its start time".to_string(),
            ));
        }

        let minutes = (ended_at - started_at).num_minutes();
        u32::try_from(minutes)
            .map_err(|_| AppError::InvalidInput("Fermentation duration out of range".to_string()))
    }

    /// Whether this batch may serve as evidence for a suggestion: scored at
    /// or above `min_score`, both ambient temperatures recorded, and a
    /// positive flour quantity. Batches failing any condition are silently
    /// excluded, never an error.
    pub fn is_eligible(&self, min_score: u8) -> bool {
        let scored_well = self
            .evaluation
            .as_ref()
            .is_some_and(|e| e.score >= min_score);

        scored_well
            && self.ambient_temp_start.is_some()
            && self.ambient_temp_end_planned.is_some()
            && self.flour_kg > 0.0
    }
}

use serde::{Deserialize, Serialize};

use super::batch::BatchRecord;

/// Parameters for a leavening suggestion
///
/// Only the flour target is required; supplying the current ambient
/// temperature switches the engine into similarity-weighted mode.
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestionQuery {
    /// Flour quantity of the planned batch in kilograms; must be positive
    /// (validated by [`crate::SuggestionService`], not by the engine)
    pub target_flour_kg: f64,
    /// Ambient temperature in °C right now
    pub current_ambient_temp: Option<f64>,
    /// Expected ambient temperature in °C at the end of fermentation
    pub target_end_temp: Option<f64>,
    /// Planned fermentation duration in minutes
    pub target_fermentation_minutes: Option<u32>,
}

/// One historical batch backing a suggestion, surfaced for transparency.
///
/// Numeric fields keep their original precision; only the final
/// suggestion is rounded.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EvidenceItem {
    pub batch_id: i64,
    pub flour_kg: f64,
    pub leavening_grams: f64,
    pub emulsifier_ml: f64,
    pub ambient_temp_start: Option<f64>,
    pub ambient_temp_end_planned: Option<f64>,
    /// Measured ending temperature from the evaluation, if taken
    pub actual_end_temp: Option<f64>,
    pub score: Option<u8>,
    pub fermentation_minutes: Option<u32>,
    pub notes: Option<String>,
    pub evaluation_comment: Option<String>,
}

impl From<&BatchRecord> for EvidenceItem {
    fn from(record: &BatchRecord) -> Self {
        Self {
            batch_id: record.id,
            flour_kg: record.flour_kg,
            leavening_grams: record.leavening_grams,
            emulsifier_ml: record.emulsifier_ml,
            ambient_temp_start: record.ambient_temp_start,
            ambient_temp_end_planned: record.ambient_temp_end_planned,
            actual_end_temp: record.evaluation.as_ref().and_then(|e| e.actual_end_temp),
            score: record.evaluation.as_ref().map(|e| e.score),
            fermentation_minutes: record.fermentation_minutes,
            notes: record.notes.clone(),
            evaluation_comment: record
                .evaluation
                .as_ref()
                .and_then(|e| e.comment.clone()),
        }
    }
}

/// Result of a suggestion: the quantity to pre-fill plus the evidence
/// that produced it
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Suggestion {
    /// Suggested leavening quantity in grams, rounded half away from zero
    pub suggested_leavening_grams: i64,
    /// Human-readable explanation of how many batches were used and
    /// which similarity factors were considered
    pub rationale: String,
    pub evidence: Vec<EvidenceItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Evaluation;

    #[test]
    fn test_evidence_item_carries_evaluation_fields() {
        let record = BatchRecord {
            id: 7,
            flour_kg: 12.5,
            leavening_grams: 130.0,
            emulsifier_ml: 8.0,
            ambient_temp_start: Some(24.0),
            ambient_temp_end_planned: Some(28.0),
            fermentation_minutes: Some(95),
            notes: Some("rainy day".to_string()),
            evaluation: Some(Evaluation {
                score: 4,
                actual_end_temp: Some(27.3),
                comment: Some("slightly dense crumb".to_string()),
            }),
        };

        let item = EvidenceItem::from(&record);
        assert_eq!(item.batch_id, 7);
        assert_eq!(item.flour_kg, 12.5);
        assert_eq!(item.score, Some(4));
        assert_eq!(item.actual_end_temp, Some(27.3));
        assert_eq!(item.evaluation_comment.as_deref(), Some("slightly dense crumb"));
        assert_eq!(item.notes.as_deref(), Some("rainy day"));
    }

    #[test]
    fn test_evidence_item_for_unevaluated_record() {
        let record = BatchRecord {
            id: 8,
            flour_kg: 10.0,
            leavening_grams: 100.0,
            emulsifier_ml: 0.0,
            ambient_temp_start: None,
            ambient_temp_end_planned: None,
            fermentation_minutes: None,
            notes: None,
            evaluation: None,
        };

        let item = EvidenceItem::from(&record);
        assert_eq!(item.score, None);
        assert_eq!(item.actual_end_temp, None);
        assert_eq!(item.evaluation_comment, None);
    }

    #[test]
    fn test_suggestion_serializes_full_precision_evidence() {
        let suggestion = Suggestion {
            suggested_leavening_grams: 100,
            rationale: "Suggested from 1 batch".to_string(),
            evidence: vec![EvidenceItem {
                batch_id: 1,
                flour_kg: 10.25,
                leavening_grams: 101.75,
                emulsifier_ml: 0.0,
                ambient_temp_start: Some(25.5),
                ambient_temp_end_planned: Some(30.0),
                actual_end_temp: None,
                score: Some(5),
                fermentation_minutes: Some(120),
                notes: None,
                evaluation_comment: None,
            }],
        };

        let json = serde_json::to_value(&suggestion).unwrap();
        assert_eq!(json["suggested_leavening_grams"], 100);
        assert_eq!(json["evidence"][0]["leavening_grams"], 101.75);
        assert_eq!(json["evidence"][0]["ambient_temp_start"], 25.5);
    }
}

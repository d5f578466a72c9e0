use std::cmp::Ordering;

use crate::config::EngineConfig;
use crate::models::{BatchRecord, EvidenceItem, Suggestion, SuggestionQuery};

/// Minute differences are scaled to hours so the time penalty is
/// commensurate with the temperature distance in °C.
const MINUTES_PER_HOUR: f64 = 60.0;

/// A selected historical batch with its averaging weight
struct Candidate<'a> {
    record: &'a BatchRecord,
    weight: f64,
}

/// Suggests a leavening quantity for a new batch
///
/// Averages the leavening-per-kilogram ratio of the supplied history and
/// rescales it to the target flour quantity. When the current ambient
/// temperature is known, each batch is weighted by the inverse of its
/// condition distance to the query (nearest neighbors dominate); without
/// it the engine falls back to an unweighted average of the most recent
/// batches.
///
/// `history` must already satisfy the eligibility invariant (evaluated at
/// or above the minimum score, both temperatures present, positive
/// flour); the engine re-checks only the flour quantity defensively.
/// It never fails: an empty history yields a zero suggestion with an
/// explanatory rationale.
pub fn suggest(
    history: &[BatchRecord],
    query: &SuggestionQuery,
    config: &EngineConfig,
) -> Suggestion {
    if history.is_empty() {
        tracing::info!("No eligible batch history, returning zero suggestion");
        return Suggestion {
            suggested_leavening_grams: 0,
            rationale: "No evaluated batches with a high enough score yet; record and \
                        evaluate a few batches to get suggestions."
                .to_string(),
            evidence: Vec::new(),
        };
    }

    let selected = match query.current_ambient_temp {
        Some(current) => select_by_similarity(history, current, query, config),
        None => select_recent(history, config.selection_window),
    };

    let (average_ratio, used) = weighted_ratio_average(&selected);

    // Round half away from zero; suggestions are integer grams shown to
    // end users and must be deterministic for identical inputs.
    let suggested_leavening_grams = (average_ratio * query.target_flour_kg).round() as i64;

    let evidence: Vec<EvidenceItem> = selected
        .iter()
        .take(config.evidence_limit)
        .map(|c| EvidenceItem::from(c.record))
        .collect();

    tracing::info!(
        eligible = history.len(),
        selected = selected.len(),
        used,
        weighted = query.current_ambient_temp.is_some(),
        suggested_grams = suggested_leavening_grams,
        "Computed leavening suggestion"
    );

    Suggestion {
        suggested_leavening_grams,
        rationale: build_rationale(used, query),
        evidence,
    }
}

/// Selects the batches nearest to the query conditions, weighted by
/// inverse distance
fn select_by_similarity<'a>(
    history: &'a [BatchRecord],
    current_temp: f64,
    query: &SuggestionQuery,
    config: &EngineConfig,
) -> Vec<Candidate<'a>> {
    let mut scored: Vec<(f64, &BatchRecord)> = history
        .iter()
        .filter_map(|record| {
            condition_distance(record, current_temp, query).map(|distance| (distance, record))
        })
        .collect();

    // Stable sort: equal distances keep their original order, which makes
    // tie-breaking deterministic.
    scored.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal));
    scored.truncate(config.selection_window);

    scored
        .into_iter()
        .map(|(distance, record)| Candidate {
            record,
            weight: 1.0 / (distance + config.distance_floor),
        })
        .collect()
}

/// Distance between a historical batch's conditions and the query
///
/// Returns `None` when the batch has no start temperature, in which case
/// it cannot be placed and is silently skipped (the eligibility filter
/// upstream should have excluded it already).
fn condition_distance(
    record: &BatchRecord,
    current_temp: f64,
    query: &SuggestionQuery,
) -> Option<f64> {
    let start = record.ambient_temp_start?;
    let mut distance = (start - current_temp).abs();

    if let Some(target_end) = query.target_end_temp {
        // A missing planned end temperature falls back to the start
        // temperature. Only the end side falls back, matching the
        // system's historical behavior.
        let effective_end = record.ambient_temp_end_planned.unwrap_or(start);
        distance += (effective_end - target_end).abs();
    }

    if let (Some(target), Some(actual)) = (query.target_fermentation_minutes, record.fermentation_minutes) {
        distance += (f64::from(actual) - f64::from(target)).abs() / MINUTES_PER_HOUR;
    }

    Some(distance)
}

/// Fallback selection when no current temperature is known: the trailing
/// window of the history (most recent last), all weighted equally
fn select_recent(history: &[BatchRecord], window: usize) -> Vec<Candidate<'_>> {
    let skip = history.len().saturating_sub(window);
    history[skip..]
        .iter()
        .map(|record| Candidate {
            record,
            weight: 1.0,
        })
        .collect()
}

/// Weighted average of leavening grams per kilogram of flour over the
/// selected batches
///
/// Batches with a non-positive flour quantity are skipped defensively.
/// Returns the average and the number of batches that contributed; a
/// zero weight total yields a zero average, not an error.
fn weighted_ratio_average(selected: &[Candidate<'_>]) -> (f64, usize) {
    let mut weighted_sum = 0.0;
    let mut weight_total = 0.0;
    let mut used = 0;

    for candidate in selected {
        if candidate.record.flour_kg <= 0.0 {
            continue;
        }
        let ratio = candidate.record.leavening_grams / candidate.record.flour_kg;
        weighted_sum += ratio * candidate.weight;
        weight_total += candidate.weight;
        used += 1;
    }

    if weight_total > 0.0 {
        (weighted_sum / weight_total, used)
    } else {
        (0.0, used)
    }
}

fn build_rationale(used: usize, query: &SuggestionQuery) -> String {
    match (query.current_ambient_temp, query.target_fermentation_minutes) {
        (Some(_), Some(_)) => format!(
            "Suggested from {} well-evaluated batches, weighted by ambient temperature \
             and fermentation time similarity.",
            used
        ),
        (Some(_), None) => format!(
            "Suggested from {} well-evaluated batches, weighted by ambient temperature \
             similarity.",
            used
        ),
        (None, _) => format!(
            "Suggested from the {} most recent well-evaluated batches; no current \
             temperature was given, so all batches counted equally.",
            used
        ),
    }
}

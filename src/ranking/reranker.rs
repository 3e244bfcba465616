use std::cmp::Ordering;
use tracing::debug;

use crate::constants::PIN_WINDOW;

use super::error::RankingError;
use super::types::{Candidate, RankingRequest, RankingResult, ScoredCandidate};

/// Preference-aware reranker and context selector.
///
/// Ranking is pure and synchronous: no I/O, no shared state, and identical
/// output for identical input.
#[derive(Debug, Clone)]
pub struct PreferenceReranker {
    pin_window: usize,
}

impl PreferenceReranker {
    pub fn new() -> Self {
        Self {
            pin_window: PIN_WINDOW,
        }
    }

    /// Overrides how many leading candidates the pin scan examines.
    pub fn with_pin_window(pin_window: usize) -> Self {
        Self { pin_window }
    }

    pub fn pin_window(&self) -> usize {
        self.pin_window
    }

    /// Selects and orders the final context set.
    ///
    /// 1. The first abandoned book within the pin window is pulled out and
    ///    placed first, unadjusted.
    /// 2. Every other candidate gets its preference adjustment.
    /// 3. Those are stably sorted by adjusted score, ascending.
    /// 4. The list is cut so the total (pin included) is at most `k`.
    pub fn rank(&self, request: RankingRequest) -> Result<RankingResult, RankingError> {
        request.validate()?;

        let RankingRequest {
            mut candidates,
            rating_boost,
            dnf_penalty,
            k,
        } = request;

        if candidates.is_empty() {
            debug!("No candidates to rank");
            return Ok(RankingResult::default());
        }

        let pool_size = candidates.len();
        let pinned = find_pin(&candidates, self.pin_window)
            .map(|index| ScoredCandidate::pinned(candidates.remove(index)));

        let mut scored: Vec<ScoredCandidate> = candidates
            .into_iter()
            .map(|candidate| {
                let adjustment = preference_adjustment(&candidate, rating_boost, dnf_penalty);
                ScoredCandidate::adjusted(candidate, adjustment)
            })
            .collect();

        // Vec::sort_by is stable, so ties keep retrieval order.
        scored.sort_by(|a, b| compare_scores(a.adjusted_score, b.adjusted_score));

        let entries = match pinned {
            Some(pin) => {
                debug!(
                    title = %pin.metadata().title,
                    raw_score = pin.raw_score(),
                    "Pinned abandoned match"
                );
                let mut entries = Vec::with_capacity(k.min(scored.len() + 1));
                entries.push(pin);
                entries.extend(scored.into_iter().take(k - 1));
                entries
            }
            None => {
                scored.truncate(k);
                scored
            }
        };

        debug!(
            pool_size,
            k,
            selected = entries.len(),
            rating_boost,
            dnf_penalty,
            "Ranking complete"
        );

        Ok(RankingResult::new(entries))
    }
}

impl Default for PreferenceReranker {
    fn default() -> Self {
        Self::new()
    }
}

/// Ranks with the default pin window.
pub fn rank(request: RankingRequest) -> Result<RankingResult, RankingError> {
    PreferenceReranker::new().rank(request)
}

/// Index of the first abandoned book among the first `window` candidates.
pub fn find_pin(candidates: &[Candidate], window: usize) -> Option<usize> {
    candidates
        .iter()
        .take(window)
        .position(|candidate| candidate.metadata.shelf.is_abandoned())
}

/// Signed score delta from the user's rating and shelf.
///
/// High ratings lower the score (more relevant); abandoned books raise it.
pub fn preference_adjustment(candidate: &Candidate, rating_boost: f64, dnf_penalty: f64) -> f64 {
    let mut adjustment = 0.0;

    if candidate.metadata.is_highly_rated() {
        adjustment -= rating_boost;
    }

    if candidate.metadata.shelf.is_abandoned() {
        adjustment += dnf_penalty;
    }

    adjustment
}

/// Ascending order; NaN sorts after every number.
fn compare_scores(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
    }
}

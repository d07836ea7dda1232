use crate::engine::par::ParInfo;
use crate::engine::rounds;
use crate::types::round::RoundRecord;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// A hole score of exactly 1. Derived per evaluation, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct AceEvent {
    pub date: DateTime<Utc>,
    pub course: String,
    pub layout: String,
    pub hole: usize,
}

/// Every ace across `rounds`, sorted by round date. The hole-major scan
/// keeps aces within one round ordered by hole index, which is the tie-break
/// for Nth-ace badges.
pub fn ace_events(rounds_in: &[&RoundRecord]) -> Vec<AceEvent> {
    let mut events = Vec::new();
    for round in rounds_in {
        for hole in 1..=rounds::resolved_hole_count(round) {
            if round.score(hole) == Some(1) {
                events.push(AceEvent {
                    date: round.started_at,
                    course: round.course.clone(),
                    layout: round.layout.clone(),
                    hole,
                });
            }
        }
    }
    // Stable sort preserves the within-round hole order.
    events.sort_by_key(|event| event.date);
    events
}

/// First date each hole was birdied (scored strictly under par), keyed by
/// 1-based hole. `rounds_in` must already be in chronological order; the
/// scan stops once every hole is covered.
pub fn first_birdies(
    rounds_in: &[&RoundRecord],
    par_info: &ParInfo,
) -> BTreeMap<usize, DateTime<Utc>> {
    let mut firsts = BTreeMap::new();
    for round in rounds_in {
        for hole in 1..=par_info.hole_count {
            if firsts.contains_key(&hole) {
                continue;
            }
            if let Some(strokes) = round.score(hole) {
                if strokes < par_info.par_for(hole) {
                    firsts.insert(hole, round.started_at);
                }
            }
        }
        if firsts.len() == par_info.hole_count {
            break;
        }
    }
    firsts
}

use crate::engine::rounds::{self, MIN_HOLES};
use crate::types::round::RoundRecord;
use std::collections::HashMap;

/// Hole count and per-hole pars for one course+layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ParInfo {
    pub hole_count: usize,
    pub pars: Vec<i32>,
    default_par: i32,
}

impl ParInfo {
    pub fn new(hole_count: usize, pars: Vec<i32>, default_par: i32) -> Self {
        Self {
            hole_count,
            pars,
            default_par,
        }
    }

    /// Par for the 1-based `hole`, defaulting when the index is unpopulated.
    pub fn par_for(&self, hole: usize) -> i32 {
        hole.checked_sub(1)
            .and_then(|index| self.pars.get(index))
            .copied()
            .unwrap_or(self.default_par)
    }
}

/// Mapping from course+layout to its par info, built from the `"Par"`
/// sentinel rows of the whole dataset.
#[derive(Debug, Clone)]
pub struct ParIndex {
    entries: HashMap<(String, String), ParInfo>,
    default_par: i32,
}

impl ParIndex {
    /// Scans every par sentinel row. A later row for the same course+layout
    /// overwrites an earlier one; `bagtag validate` flags that case.
    pub fn build(all_rounds: &[RoundRecord], default_par: i32) -> Self {
        let mut entries = HashMap::new();
        for row in all_rounds.iter().filter(|round| round.is_par_row()) {
            let hole_count = rounds::resolved_hole_count(row);
            let pars = (1..=hole_count)
                .map(|hole| row.score(hole).unwrap_or(default_par))
                .collect();
            let key = (row.course.clone(), row.layout.clone());
            let info = ParInfo::new(hole_count, pars, default_par);
            if entries.insert(key, info).is_some() {
                tracing::warn!(
                    course = %row.course,
                    layout = %row.layout,
                    "duplicate par row, keeping the later one"
                );
            }
        }
        Self {
            entries,
            default_par,
        }
    }

    pub fn get(&self, course: &str, layout: &str) -> Option<&ParInfo> {
        self.entries.get(&(course.to_string(), layout.to_string()))
    }

    /// The one shared resolver for hole count and pars: the index entry when
    /// present, otherwise `max(18, inferred from sample)` holes at the
    /// default par.
    pub fn resolve(
        &self,
        course: &str,
        layout: &str,
        sample: Option<&RoundRecord>,
    ) -> ParInfo {
        if let Some(info) = self.get(course, layout) {
            return info.clone();
        }
        let hole_count = sample.map(rounds::resolved_hole_count).unwrap_or(MIN_HOLES);
        ParInfo::new(
            hole_count,
            vec![self.default_par; hole_count],
            self.default_par,
        )
    }

    pub fn resolve_for(&self, round: &RoundRecord) -> ParInfo {
        self.resolve(&round.course, &round.layout, Some(round))
    }
}

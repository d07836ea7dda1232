use crate::engine::rounds;
use crate::types::report::Finding;
use crate::types::round::RoundRecord;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// Dataset sanity checks run before anyone trusts the badge output. The
/// engine itself never fails on these; this is where they get surfaced.
pub fn dataset_findings(rounds_in: &[RoundRecord]) -> Vec<Finding> {
    let mut findings = Vec::new();

    // The par index silently keeps the later of two par rows for the same
    // course+layout, which makes results depend on input order. Blocking.
    let mut par_rows: BTreeMap<(String, String), usize> = BTreeMap::new();
    for round in rounds_in.iter().filter(|round| round.is_par_row()) {
        *par_rows
            .entry((round.course.clone(), round.layout.clone()))
            .or_default() += 1;
    }
    for ((course, layout), count) in &par_rows {
        if *count > 1 {
            findings.push(Finding {
                id: "par.duplicate".to_string(),
                title: format!("Duplicate par rows for {course} ({layout})"),
                body: format!(
                    "{count} par rows found; the evaluator keeps the last one, \
                     so results change with input order."
                ),
                blocking: true,
            });
        }
    }

    // Unparsable start dates degrade to the epoch and sort as the oldest
    // rounds, skewing every awarded-date computation.
    let epoch_rounds = rounds_in
        .iter()
        .filter(|round| {
            !round.is_par_row() && round.started_at == DateTime::<Utc>::UNIX_EPOCH
        })
        .count();
    if epoch_rounds > 0 {
        findings.push(Finding {
            id: "dates.epoch".to_string(),
            title: "Rounds with unparsable start dates".to_string(),
            body: format!(
                "{epoch_rounds} round(s) fell back to the epoch and will sort as the oldest."
            ),
            blocking: false,
        });
    }

    // Courses played without any par row get the default par on every hole.
    let mut missing: BTreeSet<(String, String)> = BTreeSet::new();
    for round in rounds_in
        .iter()
        .filter(|round| !round.is_par_row() && rounds::is_round_complete(round))
    {
        let key = (round.course.clone(), round.layout.clone());
        if !par_rows.contains_key(&key) {
            missing.insert(key);
        }
    }
    for (course, layout) in &missing {
        findings.push(Finding {
            id: "par.missing".to_string(),
            title: format!("No par row for {course} ({layout})"),
            body: "Badge checks here assume the default par on every hole.".to_string(),
            blocking: false,
        });
    }

    findings
}

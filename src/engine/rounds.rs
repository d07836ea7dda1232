use crate::engine::par::ParInfo;
use crate::types::round::RoundRecord;

/// Courses are never treated as shorter than this many holes.
pub const MIN_HOLES: usize = 18;

// Hyphen and en-dash spellings both occur in the dataset.
const SHORT_COURSE_MARKERS: [&str; 2] = ["1-9", "1\u{2013}9"];

/// Highest 1-based hole index with a valid positive score, 0 if none.
pub fn infer_hole_count(round: &RoundRecord) -> usize {
    (1..=round.hole_scores.len())
        .rev()
        .find(|&hole| round.score(hole).is_some())
        .unwrap_or(0)
}

/// Inferred hole count with the 18-hole floor applied.
pub fn resolved_hole_count(round: &RoundRecord) -> usize {
    infer_hole_count(round).max(MIN_HOLES)
}

/// A round counts toward badges only when it is a full 18+ hole scorecard:
/// every hole up to the inferred count scored, and the course/layout not
/// flagged as a short 1-9 layout.
pub fn is_round_complete(round: &RoundRecord) -> bool {
    let holes = infer_hole_count(round);
    if holes < MIN_HOLES {
        return false;
    }
    if is_short_course(&round.course) || is_short_course(&round.layout) {
        return false;
    }
    (1..=holes).all(|hole| round.score(hole).is_some())
}

fn is_short_course(name: &str) -> bool {
    let lowered = name.to_lowercase();
    SHORT_COURSE_MARKERS
        .iter()
        .any(|marker| lowered.contains(marker))
}

/// True when any hole scores above its par. Holes without a valid score are
/// skipped.
pub fn has_bogey(round: &RoundRecord, par_info: &ParInfo) -> bool {
    (1..=par_info.hole_count).any(|hole| match round.score(hole) {
        Some(strokes) => strokes > par_info.par_for(hole),
        None => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_start_timestamp;
    use crate::engine::par::ParInfo;

    fn round(course: &str, layout: &str, scores: Vec<i32>) -> RoundRecord {
        RoundRecord {
            player: "Jobby".to_string(),
            course: course.to_string(),
            layout: layout.to_string(),
            started_at: parse_start_timestamp("2024-06-01 0900"),
            total: scores.iter().sum(),
            plus_minus: 0,
            rating: 0,
            hole_scores: scores,
        }
    }

    #[test]
    fn infer_hole_count_finds_highest_valid_index() {
        let mut scores = vec![3; 18];
        scores.push(0);
        scores.push(4);
        let r = round("Eddison Park", "Main", scores);
        assert_eq!(infer_hole_count(&r), 20);

        let r = round("Eddison Park", "Main", vec![3, 3, 0, 0]);
        assert_eq!(infer_hole_count(&r), 2);

        let r = round("Eddison Park", "Main", vec![]);
        assert_eq!(infer_hole_count(&r), 0);
        assert_eq!(resolved_hole_count(&r), MIN_HOLES);
    }

    #[test]
    fn complete_round_needs_eighteen_scored_holes() {
        assert!(is_round_complete(&round("Eddison Park", "Main", vec![3; 18])));

        let mut seventeen = vec![3; 18];
        seventeen[17] = 0;
        assert!(!is_round_complete(&round("Eddison Park", "Main", seventeen)));

        let mut gap = vec![4; 18];
        gap[7] = -1;
        assert!(!is_round_complete(&round("Eddison Park", "Main", gap)));
    }

    #[test]
    fn short_course_markers_exclude_both_dash_forms() {
        assert!(!is_round_complete(&round(
            "Gold Creek 1-9",
            "Main",
            vec![3; 18]
        )));
        assert!(!is_round_complete(&round(
            "Gold Creek",
            "Loop 1\u{2013}9",
            vec![3; 18]
        )));
        assert!(!is_round_complete(&round(
            "GOLD CREEK 1-9",
            "Main",
            vec![3; 18]
        )));
    }

    #[test]
    fn bogey_is_any_hole_over_par() {
        let pars = ParInfo::new(18, vec![3; 18], 3);

        let mut scores = vec![3; 18];
        scores[1] = 4;
        assert!(has_bogey(&round("Eddison Park", "Main", scores), &pars));

        let mut all_par_or_better = vec![3; 18];
        all_par_or_better[4] = 2;
        assert!(!has_bogey(
            &round("Eddison Park", "Main", all_par_or_better),
            &pars
        ));
    }

    #[test]
    fn unscored_holes_do_not_count_as_bogeys() {
        let pars = ParInfo::new(18, vec![3; 18], 3);
        let mut scores = vec![3; 18];
        scores[9] = 0;
        assert!(!has_bogey(&round("Eddison Park", "Main", scores), &pars));
    }
}

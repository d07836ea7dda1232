use crate::engine::rounds;
use crate::types::report::{CourseRecord, PersonalBest, RecordHolder};
use crate::types::round::RoundRecord;
use std::collections::BTreeMap;

/// League records per course+layout over every complete round: lowest total,
/// tie-broken by lowest +/-, with every co-holder kept on an exact tie.
pub fn course_records(all_rounds: &[RoundRecord]) -> Vec<CourseRecord> {
    let mut records: BTreeMap<(String, String), CourseRecord> = BTreeMap::new();
    for round in complete_rounds(all_rounds) {
        let key = (round.course.clone(), round.layout.clone());
        let holder = RecordHolder {
            player: round.player.clone(),
            date: round.started_at,
        };
        match records.get_mut(&key) {
            None => {
                records.insert(
                    key,
                    CourseRecord {
                        course: round.course.clone(),
                        layout: round.layout.clone(),
                        total: round.total,
                        plus_minus: round.plus_minus,
                        holders: vec![holder],
                    },
                );
            }
            Some(record) => {
                if beats(round, record.total, record.plus_minus) {
                    record.total = round.total;
                    record.plus_minus = round.plus_minus;
                    record.holders = vec![holder];
                } else if round.total == record.total && round.plus_minus == record.plus_minus {
                    record.holders.push(holder);
                }
            }
        }
    }
    let mut records: Vec<CourseRecord> = records.into_values().collect();
    for record in &mut records {
        record.holders.sort_by_key(|holder| std::cmp::Reverse(holder.date));
    }
    records
}

/// One player's best complete round per course+layout, same ordering rule as
/// the league records; an exact tie keeps the most recent date.
pub fn personal_bests(all_rounds: &[RoundRecord], player: &str) -> Vec<PersonalBest> {
    let mut bests: BTreeMap<(String, String), PersonalBest> = BTreeMap::new();
    for round in complete_rounds(all_rounds).filter(|round| round.player == player) {
        let key = (round.course.clone(), round.layout.clone());
        match bests.get_mut(&key) {
            None => {
                bests.insert(key, best_from(round));
            }
            Some(best) => {
                if beats(round, best.total, best.plus_minus) {
                    *best = best_from(round);
                } else if round.total == best.total
                    && round.plus_minus == best.plus_minus
                    && round.started_at > best.date
                {
                    best.date = round.started_at;
                }
            }
        }
    }
    bests.into_values().collect()
}

fn complete_rounds(all_rounds: &[RoundRecord]) -> impl Iterator<Item = &RoundRecord> {
    all_rounds
        .iter()
        .filter(|round| !round.is_par_row() && rounds::is_round_complete(round))
}

fn beats(round: &RoundRecord, total: i32, plus_minus: i32) -> bool {
    round.total < total || (round.total == total && round.plus_minus < plus_minus)
}

fn best_from(round: &RoundRecord) -> PersonalBest {
    PersonalBest {
        course: round.course.clone(),
        layout: round.layout.clone(),
        total: round.total,
        plus_minus: round.plus_minus,
        date: round.started_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_start_timestamp;

    fn round(
        player: &str,
        course: &str,
        date_raw: &str,
        total: i32,
        plus_minus: i32,
    ) -> RoundRecord {
        RoundRecord {
            player: player.to_string(),
            course: course.to_string(),
            layout: "Main".to_string(),
            started_at: parse_start_timestamp(date_raw),
            total,
            plus_minus,
            rating: 0,
            hole_scores: vec![3; 18],
        }
    }

    #[test]
    fn lowest_total_takes_the_record() {
        let rounds = vec![
            round("Jobby", "Eddison Park", "2024-01-01 0900", 54, 0),
            round("Miza", "Eddison Park", "2024-02-01 0900", 50, -4),
            round("Bucis", "Weston Park", "2024-01-15 0900", 60, 6),
        ];
        let records = course_records(&rounds);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].course, "Eddison Park");
        assert_eq!(records[0].total, 50);
        assert_eq!(records[0].holders.len(), 1);
        assert_eq!(records[0].holders[0].player, "Miza");
    }

    #[test]
    fn equal_totals_break_ties_on_plus_minus() {
        let rounds = vec![
            round("Jobby", "Eddison Park", "2024-01-01 0900", 54, 0),
            round("Miza", "Eddison Park", "2024-02-01 0900", 54, -2),
        ];
        let records = course_records(&rounds);
        assert_eq!(records[0].plus_minus, -2);
        assert_eq!(records[0].holders[0].player, "Miza");
    }

    #[test]
    fn exact_ties_keep_every_holder_newest_first() {
        let rounds = vec![
            round("Jobby", "Eddison Park", "2024-01-01 0900", 54, 0),
            round("Miza", "Eddison Park", "2024-03-01 0900", 54, 0),
            round("Bucis", "Eddison Park", "2024-02-01 0900", 54, 0),
        ];
        let records = course_records(&rounds);
        let holders: Vec<&str> = records[0]
            .holders
            .iter()
            .map(|holder| holder.player.as_str())
            .collect();
        assert_eq!(holders, ["Miza", "Bucis", "Jobby"]);
    }

    #[test]
    fn par_and_incomplete_rounds_never_hold_records() {
        let mut nine_holes = round("Jobby", "Eddison Park", "2024-01-01 0900", 27, 0);
        nine_holes.hole_scores = vec![3; 9];
        let rounds = vec![
            round("Par", "Eddison Park", "2023-12-01 0900", 54, 0),
            nine_holes,
            round("Miza", "Eddison Park", "2024-02-01 0900", 55, 1),
        ];
        let records = course_records(&rounds);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].total, 55);
        assert_eq!(records[0].holders[0].player, "Miza");
    }

    #[test]
    fn personal_bests_track_one_entry_per_course() {
        let rounds = vec![
            round("Jobby", "Eddison Park", "2024-01-01 0900", 56, 2),
            round("Jobby", "Eddison Park", "2024-02-01 0900", 52, -2),
            round("Jobby", "Weston Park", "2024-01-15 0900", 60, 6),
            round("Miza", "Eddison Park", "2024-03-01 0900", 48, -6),
        ];
        let bests = personal_bests(&rounds, "Jobby");
        assert_eq!(bests.len(), 2);
        assert_eq!(bests[0].course, "Eddison Park");
        assert_eq!(bests[0].total, 52);
        assert_eq!(bests[1].course, "Weston Park");
    }

    #[test]
    fn personal_best_exact_tie_keeps_the_most_recent_date() {
        let rounds = vec![
            round("Jobby", "Eddison Park", "2024-01-01 0900", 52, -2),
            round("Jobby", "Eddison Park", "2024-04-01 0900", 52, -2),
        ];
        let bests = personal_bests(&rounds, "Jobby");
        assert_eq!(bests[0].date, parse_start_timestamp("2024-04-01 0900"));
    }
}

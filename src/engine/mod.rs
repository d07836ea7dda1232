pub mod events;
pub mod par;
pub mod rating;
pub mod records;
pub mod rounds;

use crate::config::EngineDefaults;
use crate::types::badge::{BadgeResult, BadgeRule, BadgeSpec, Progress};
use crate::types::report::{PlayerSummary, RatingTimeline, TimelinePoint};
use crate::types::round::RoundRecord;
use std::collections::BTreeSet;
use events::AceEvent;
use par::ParIndex;
use rating::RatingPoint;

/// Evaluates every badge definition against one player's history. Pure and
/// deterministic: one result per spec, in input order, recomputed from
/// scratch on every call.
pub fn evaluate(
    all_rounds: &[RoundRecord],
    player: &str,
    specs: &[BadgeSpec],
    defaults: &EngineDefaults,
) -> Vec<BadgeResult> {
    let ctx = EvalContext::new(all_rounds, player, defaults);
    specs.iter().map(|spec| ctx.evaluate(spec)).collect()
}

/// The rolling-rating history backing the `rating` subcommand.
pub fn rating_timeline(
    all_rounds: &[RoundRecord],
    player: &str,
    defaults: &EngineDefaults,
) -> RatingTimeline {
    let ctx = EvalContext::new(all_rounds, player, defaults);
    let points = ctx
        .points
        .iter()
        .enumerate()
        .map(|(idx, point)| TimelinePoint {
            date: point.date,
            rating: point.rating,
            rolling: rating::rating_at(&ctx.points, idx),
        })
        .collect();
    RatingTimeline {
        player: player.to_string(),
        current: ctx.latest_rolling,
        points,
    }
}

/// One roster line per player with a complete round, sorted by name:
/// round and ace counts, current rolling rating, and its movement against
/// the same window with the best round excluded.
pub fn player_summaries(
    all_rounds: &[RoundRecord],
    defaults: &EngineDefaults,
) -> Vec<PlayerSummary> {
    let names: BTreeSet<&str> = all_rounds
        .iter()
        .filter(|round| !round.is_par_row() && rounds::is_round_complete(round))
        .map(|round| round.player.as_str())
        .collect();

    names
        .into_iter()
        .map(|name| {
            let ctx = EvalContext::new(all_rounds, name, defaults);
            let movement = match ctx.points.len() {
                0 => None,
                len => {
                    let previous = rating::previous_rating_at(&ctx.points, len - 1);
                    (previous > 0.0).then(|| ctx.latest_rolling - previous)
                }
            };
            PlayerSummary {
                player: name.to_string(),
                rounds: ctx.chronological.len(),
                aces: ctx.aces.len(),
                rating: ctx.latest_rolling,
                movement,
            }
        })
        .collect()
}

/// Preprocessing shared by every badge rule, computed once per call.
struct EvalContext<'a> {
    par_index: ParIndex,
    /// The player's complete rounds, chronological (stable sort, so equal
    /// timestamps keep dataset order).
    chronological: Vec<&'a RoundRecord>,
    /// Subset of `chronological` carrying an official rating.
    rated: Vec<&'a RoundRecord>,
    points: Vec<RatingPoint>,
    aces: Vec<AceEvent>,
    best_round_rating: i32,
    latest_rolling: f64,
}

impl<'a> EvalContext<'a> {
    fn new(all_rounds: &'a [RoundRecord], player: &str, defaults: &EngineDefaults) -> Self {
        let par_index = ParIndex::build(all_rounds, defaults.par);

        let mut chronological: Vec<&RoundRecord> = all_rounds
            .iter()
            .filter(|round| {
                !round.is_par_row()
                    && round.player == player
                    && rounds::is_round_complete(round)
            })
            .collect();
        chronological.sort_by_key(|round| round.started_at);

        let rated: Vec<&RoundRecord> = chronological
            .iter()
            .copied()
            .filter(|round| round.is_rated())
            .collect();
        let points: Vec<RatingPoint> = rated
            .iter()
            .map(|round| RatingPoint {
                date: round.started_at,
                rating: round.rating,
            })
            .collect();
        let aces = events::ace_events(&chronological);
        let best_round_rating = rated.iter().map(|round| round.rating).max().unwrap_or(0);
        let latest_rolling = match points.len() {
            0 => 0.0,
            len => rating::rating_at(&points, len - 1),
        };

        Self {
            par_index,
            chronological,
            rated,
            points,
            aces,
            best_round_rating,
            latest_rolling,
        }
    }

    fn evaluate(&self, spec: &BadgeSpec) -> BadgeResult {
        let mut result = BadgeResult::locked(spec);
        match &spec.rule {
            BadgeRule::AceCount { count } => self.ace_count(*count, &mut result),
            BadgeRule::NoMugsy { course, layout } => {
                self.no_mugsy(course.as_deref(), layout.as_deref(), &mut result)
            }
            BadgeRule::RoundRating { threshold } => self.round_rating(*threshold, &mut result),
            BadgeRule::DiscRating { threshold } => self.disc_rating(*threshold, &mut result),
            BadgeRule::RoundsMilestone { count } => self.rounds_milestone(*count, &mut result),
            BadgeRule::BirdieSweep { course, layout } => {
                self.birdie_sweep(course, layout, &mut result)
            }
            BadgeRule::Unknown => {}
        }
        result
    }

    fn ace_count(&self, target: u32, out: &mut BadgeResult) {
        if target >= 1 && self.aces.len() >= target as usize {
            let hit = &self.aces[target as usize - 1];
            out.achieved = true;
            out.awarded = Some(hit.date);
            out.description = if target == 1 {
                format!(
                    "Ace on Hole {} at {} ({}).",
                    hit.hole, hit.course, hit.layout
                )
            } else {
                format!(
                    "Your {} ace was on Hole {} at {} ({}).",
                    ordinal(target),
                    hit.hole,
                    hit.course,
                    hit.layout
                )
            };
        } else {
            out.description = if target == 1 {
                "Record an ace (a hole score of 1).".to_string()
            } else {
                format!("Record {target} total aces.")
            };
        }
        let current = (self.aces.len() as i64).min(i64::from(target));
        out.progress = Some(Progress::new(current, i64::from(target)));
    }

    fn no_mugsy(&self, course: Option<&str>, layout: Option<&str>, out: &mut BadgeResult) {
        let hit = self.chronological.iter().copied().find(|round| {
            name_matches(&round.course, course)
                && name_matches(&round.layout, layout)
                && !rounds::has_bogey(round, &self.par_index.resolve_for(round))
        });
        match hit {
            Some(round) => {
                out.achieved = true;
                out.awarded = Some(round.started_at);
                out.description = format!(
                    "No bogeys at {} ({}). Score: {} ({:+}).",
                    round.course, round.layout, round.total, round.plus_minus
                );
            }
            None => {
                out.description =
                    "First round on this course with no bogeys (no hole worse than par)."
                        .to_string();
            }
        }
        // Binary badge: no progress bar.
    }

    fn round_rating(&self, threshold: i32, out: &mut BadgeResult) {
        match self
            .rated
            .iter()
            .copied()
            .find(|round| round.rating >= threshold)
        {
            Some(round) => {
                out.achieved = true;
                out.awarded = Some(round.started_at);
                out.description = format!(
                    "Round rating {} at {} ({}).",
                    round.rating, round.course, round.layout
                );
            }
            None => {
                out.description = format!("Achieve a round rating of {threshold}+.");
            }
        }
        out.progress = Some(Progress::new(
            i64::from(self.best_round_rating),
            i64::from(threshold),
        ));
    }

    fn disc_rating(&self, threshold: i32, out: &mut BadgeResult) {
        let hit = (0..self.points.len()).find_map(|idx| {
            let value = rating::rating_at(&self.points, idx);
            (value >= f64::from(threshold)).then_some((idx, value))
        });
        match hit {
            Some((idx, value)) => {
                out.achieved = true;
                out.awarded = Some(self.points[idx].date);
                out.description = format!(
                    "All-time rating reached {} (best 8 of last 20).",
                    value.round() as i64
                );
            }
            None => {
                out.description = format!(
                    "Reach an all-time rating of {threshold} (best 8 of last 20 rounds)."
                );
            }
        }
        out.progress = Some(Progress::new(
            self.latest_rolling.round() as i64,
            i64::from(threshold),
        ));
    }

    fn rounds_milestone(&self, target: u32, out: &mut BadgeResult) {
        let needed = target as usize;
        if needed >= 1 && self.rated.len() >= needed {
            let round = self.rated[needed - 1];
            out.achieved = true;
            out.awarded = Some(round.started_at);
            out.description = format!(
                "Reached {target} rated rounds at {} ({}).",
                round.course, round.layout
            );
        } else {
            out.description = format!("Play {target} rated rounds.");
        }
        out.progress = Some(Progress::new(self.rated.len() as i64, i64::from(target)));
    }

    fn birdie_sweep(&self, course: &str, layout: &str, out: &mut BadgeResult) {
        let eligible: Vec<&RoundRecord> = self
            .chronological
            .iter()
            .copied()
            .filter(|round| round.course == course && round.layout == layout)
            .collect();
        let par_info = self
            .par_index
            .resolve(course, layout, eligible.first().copied());

        let firsts = events::first_birdies(&eligible, &par_info);
        if par_info.hole_count > 0 && firsts.len() == par_info.hole_count {
            out.achieved = true;
            // Awarded when the last still-missing hole was first birdied.
            out.awarded = firsts.values().max().copied();
            out.description = format!("Birdied every hole at {course} ({layout}).");
        } else {
            out.description =
                format!("Birdie every hole at {course} ({layout}) at least once.");
        }
        out.progress = Some(Progress::new(
            firsts.len() as i64,
            par_info.hole_count as i64,
        ));
    }
}

fn name_matches(value: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(needle) => value.to_lowercase().contains(&needle.to_lowercase()),
    }
}

fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{n}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_start_timestamp;
    use chrono::{DateTime, Utc};

    fn defaults() -> EngineDefaults {
        EngineDefaults::default()
    }

    fn date(raw: &str) -> DateTime<Utc> {
        parse_start_timestamp(raw)
    }

    fn round(player: &str, date_raw: &str, scores: Vec<i32>) -> RoundRecord {
        RoundRecord {
            player: player.to_string(),
            course: "Eddison Park".to_string(),
            layout: "Main".to_string(),
            started_at: date(date_raw),
            total: scores.iter().sum(),
            plus_minus: 0,
            rating: 0,
            hole_scores: scores,
        }
    }

    fn rated(player: &str, date_raw: &str, rating: i32) -> RoundRecord {
        let mut r = round(player, date_raw, vec![3; 18]);
        r.rating = rating;
        r
    }

    fn par_row() -> RoundRecord {
        round("Par", "2023-01-01 0900", vec![3; 18])
    }

    fn spec(id: &str, rule: BadgeRule) -> BadgeSpec {
        BadgeSpec {
            id: id.to_string(),
            category: "Test".to_string(),
            title: id.to_string(),
            rule,
            image: None,
            locked_image: None,
        }
    }

    #[test]
    fn results_match_input_order_and_unknown_stays_locked() {
        let rounds = vec![par_row(), rated("Jobby", "2024-01-05 0900", 170)];
        let specs = vec![
            spec("first", BadgeRule::RoundsMilestone { count: 1 }),
            spec("mystery", BadgeRule::Unknown),
        ];
        let results = evaluate(&rounds, "Jobby", &specs, &defaults());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "first");
        assert!(results[0].achieved);
        assert!(!results[1].achieved);
        assert!(results[1].description.is_empty());
        assert!(results[1].progress.is_none());
        assert!(results[1].awarded.is_none());
    }

    #[test]
    fn ace_count_awards_the_nth_ace_with_hole_major_tiebreak() {
        let mut two_aces = vec![3; 18];
        two_aces[4] = 1;
        two_aces[11] = 1;
        let mut one_ace = vec![3; 18];
        one_ace[2] = 1;
        let rounds = vec![
            par_row(),
            round("Jobby", "2024-01-10 0900", two_aces),
            round("Jobby", "2024-02-10 0900", one_ace),
        ];

        let results = evaluate(
            &rounds,
            "Jobby",
            &[
                spec("ace2", BadgeRule::AceCount { count: 2 }),
                spec("ace3", BadgeRule::AceCount { count: 3 }),
                spec("ace5", BadgeRule::AceCount { count: 5 }),
            ],
            &defaults(),
        );

        assert!(results[0].achieved);
        assert_eq!(results[0].awarded, Some(date("2024-01-10 0900")));
        assert!(results[0].description.contains("Hole 12"));

        assert!(results[1].achieved);
        assert_eq!(results[1].awarded, Some(date("2024-02-10 0900")));
        assert!(results[1].description.contains("3rd ace"));
        assert!(results[1].description.contains("Hole 3"));

        assert!(!results[2].achieved);
        let progress = results[2].progress.as_ref().expect("progress should exist");
        assert_eq!((progress.current, progress.target), (3, 5));
        assert_eq!(progress.pct, 60.0);
    }

    #[test]
    fn aces_in_incomplete_rounds_do_not_count() {
        let mut nine = vec![0; 18];
        nine[..9].copy_from_slice(&[1, 3, 3, 3, 3, 3, 3, 3, 3]);
        let rounds = vec![round("Jobby", "2024-01-10 0900", nine)];
        let results = evaluate(
            &rounds,
            "Jobby",
            &[spec("ace1", BadgeRule::AceCount { count: 1 })],
            &defaults(),
        );
        assert!(!results[0].achieved);
    }

    #[test]
    fn no_mugsy_takes_first_clean_round_and_has_no_progress() {
        let mut bogey = vec![3; 18];
        bogey[7] = 5;
        let rounds = vec![
            par_row(),
            round("Jobby", "2024-01-01 0900", bogey),
            round("Jobby", "2024-02-01 0900", vec![3; 18]),
            round("Jobby", "2024-03-01 0900", vec![2; 18]),
        ];
        let results = evaluate(
            &rounds,
            "Jobby",
            &[spec(
                "mugsy",
                BadgeRule::NoMugsy {
                    course: Some("eddison".to_string()),
                    layout: None,
                },
            )],
            &defaults(),
        );
        assert!(results[0].achieved);
        assert_eq!(results[0].awarded, Some(date("2024-02-01 0900")));
        assert!(results[0].progress.is_none());
    }

    #[test]
    fn no_mugsy_course_filter_misses_other_courses() {
        let rounds = vec![par_row(), round("Jobby", "2024-02-01 0900", vec![3; 18])];
        let results = evaluate(
            &rounds,
            "Jobby",
            &[spec(
                "mugsy",
                BadgeRule::NoMugsy {
                    course: Some("Weston Park".to_string()),
                    layout: None,
                },
            )],
            &defaults(),
        );
        assert!(!results[0].achieved);
        assert!(results[0].progress.is_none());
    }

    #[test]
    fn round_rating_awards_first_qualifying_round() {
        let rounds = vec![
            rated("Jobby", "2024-01-01 0900", 180),
            rated("Jobby", "2024-02-01 0900", 205),
            rated("Jobby", "2024-03-01 0900", 210),
        ];
        let results = evaluate(
            &rounds,
            "Jobby",
            &[
                spec("r200", BadgeRule::RoundRating { threshold: 200 }),
                spec("r250", BadgeRule::RoundRating { threshold: 250 }),
            ],
            &defaults(),
        );
        assert!(results[0].achieved);
        assert_eq!(results[0].awarded, Some(date("2024-02-01 0900")));

        assert!(!results[1].achieved);
        let progress = results[1].progress.as_ref().expect("progress should exist");
        assert_eq!((progress.current, progress.target), (210, 250));
    }

    #[test]
    fn disc_rating_crosses_at_the_computed_index() {
        // Means climb 150 + 5i (see rating tests): 180 is reached at the
        // seventh rated round, 190 never.
        let ratings = [150, 160, 170, 180, 190, 200, 210, 220];
        let rounds: Vec<RoundRecord> = ratings
            .iter()
            .enumerate()
            .map(|(day, &r)| rated("Jobby", &format!("2024-03-{:02} 0900", day + 1), r))
            .collect();
        let results = evaluate(
            &rounds,
            "Jobby",
            &[
                spec("d180", BadgeRule::DiscRating { threshold: 180 }),
                spec("d190", BadgeRule::DiscRating { threshold: 190 }),
            ],
            &defaults(),
        );
        assert!(results[0].achieved);
        assert_eq!(results[0].awarded, Some(date("2024-03-07 0900")));
        assert!(results[0].description.contains("180"));

        assert!(!results[1].achieved);
        let progress = results[1].progress.as_ref().expect("progress should exist");
        assert_eq!((progress.current, progress.target), (185, 190));
    }

    #[test]
    fn milestone_is_exact_and_ignores_unrated_rounds() {
        let rounds = vec![
            rated("Jobby", "2024-01-01 0900", 150),
            round("Jobby", "2024-01-15 0900", vec![3; 18]),
            rated("Jobby", "2024-02-01 0900", 160),
        ];
        let locked = evaluate(
            &rounds,
            "Jobby",
            &[spec("m3", BadgeRule::RoundsMilestone { count: 3 })],
            &defaults(),
        );
        assert!(!locked[0].achieved);
        let progress = locked[0].progress.as_ref().expect("progress should exist");
        assert_eq!((progress.current, progress.target), (2, 3));

        let mut grown = rounds.clone();
        grown.push(round("Jobby", "2024-02-15 0900", vec![3; 18]));
        grown.push(rated("Jobby", "2024-03-01 0900", 170));
        let unlocked = evaluate(
            &grown,
            "Jobby",
            &[spec("m3", BadgeRule::RoundsMilestone { count: 3 })],
            &defaults(),
        );
        assert!(unlocked[0].achieved);
        assert_eq!(unlocked[0].awarded, Some(date("2024-03-01 0900")));
    }

    #[test]
    fn birdie_sweep_awards_when_last_missing_hole_falls() {
        // Hole 18 is only birdied in the final round; every other hole is
        // birdied in the first.
        let mut almost = vec![2; 18];
        almost[17] = 4;
        let mut finisher = vec![3; 18];
        finisher[17] = 2;
        let rounds = vec![
            par_row(),
            round("Jobby", "2024-01-01 0900", almost),
            round("Jobby", "2024-03-01 0900", finisher),
        ];
        let sweep = spec(
            "sweep",
            BadgeRule::BirdieSweep {
                course: "Eddison Park".to_string(),
                layout: "Main".to_string(),
            },
        );

        let results = evaluate(&rounds, "Jobby", &[sweep.clone()], &defaults());
        assert!(results[0].achieved);
        assert_eq!(results[0].awarded, Some(date("2024-03-01 0900")));
        let progress = results[0].progress.as_ref().expect("progress should exist");
        assert_eq!((progress.current, progress.target), (18, 18));

        // Before the finishing round the sweep sits at 17/18.
        let partial = evaluate(&rounds[..2], "Jobby", &[sweep], &defaults());
        assert!(!partial[0].achieved);
        let progress = partial[0].progress.as_ref().expect("progress should exist");
        assert_eq!((progress.current, progress.target), (17, 18));
    }

    #[test]
    fn birdie_sweep_without_par_row_uses_default_par() {
        let rounds = vec![round("Jobby", "2024-01-01 0900", vec![2; 18])];
        let results = evaluate(
            &rounds,
            "Jobby",
            &[spec(
                "sweep",
                BadgeRule::BirdieSweep {
                    course: "Eddison Park".to_string(),
                    layout: "Main".to_string(),
                },
            )],
            &defaults(),
        );
        assert!(results[0].achieved);
        assert_eq!(results[0].awarded, Some(date("2024-01-01 0900")));
    }

    #[test]
    fn achieved_badges_keep_their_dates_as_history_grows() {
        let mut ace_scores = vec![3; 18];
        ace_scores[0] = 1;
        let mut h1 = vec![
            par_row(),
            round("Jobby", "2024-01-01 0900", ace_scores),
            rated("Jobby", "2024-02-01 0900", 205),
        ];
        let specs = vec![
            spec("ace1", BadgeRule::AceCount { count: 1 }),
            spec("r200", BadgeRule::RoundRating { threshold: 200 }),
            spec("m1", BadgeRule::RoundsMilestone { count: 1 }),
            spec("mugsy", BadgeRule::NoMugsy { course: None, layout: None }),
        ];
        let before = evaluate(&h1, "Jobby", &specs, &defaults());

        h1.push(rated("Jobby", "2024-06-01 0900", 220));
        h1.push(round("Jobby", "2024-07-01 0900", vec![2; 18]));
        let after = evaluate(&h1, "Jobby", &specs, &defaults());

        for (earlier, later) in before.iter().zip(after.iter()) {
            if earlier.achieved {
                assert!(later.achieved, "{} regressed", later.id);
                assert_eq!(earlier.awarded, later.awarded, "{} date moved", later.id);
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let rounds = vec![par_row(), rated("Jobby", "2024-01-01 0900", 190)];
        let specs = vec![spec("r180", BadgeRule::RoundRating { threshold: 180 })];
        let first = evaluate(&rounds, "Jobby", &specs, &defaults());
        let second = evaluate(&rounds, "Jobby", &specs, &defaults());
        assert_eq!(first[0].achieved, second[0].achieved);
        assert_eq!(first[0].awarded, second[0].awarded);
        assert_eq!(first[0].progress, second[0].progress);
    }

    #[test]
    fn other_players_rounds_are_invisible() {
        let rounds = vec![rated("Miza", "2024-01-01 0900", 250)];
        let results = evaluate(
            &rounds,
            "Jobby",
            &[spec("r200", BadgeRule::RoundRating { threshold: 200 })],
            &defaults(),
        );
        assert!(!results[0].achieved);
        let progress = results[0].progress.as_ref().expect("progress should exist");
        assert_eq!(progress.current, 0);
    }

    #[test]
    fn timeline_reports_rolling_values_per_rated_round() {
        let rounds = vec![
            rated("Jobby", "2024-01-01 0900", 150),
            rated("Jobby", "2024-01-02 0900", 170),
            round("Jobby", "2024-01-03 0900", vec![3; 18]),
        ];
        let timeline = rating_timeline(&rounds, "Jobby", &defaults());
        assert_eq!(timeline.points.len(), 2);
        assert_eq!(timeline.points[0].rolling, 150.0);
        assert_eq!(timeline.points[1].rolling, 160.0);
        assert_eq!(timeline.current, 160.0);
    }

    #[test]
    fn summaries_cover_every_player_with_complete_rounds() {
        let mut ace_scores = vec![3; 18];
        ace_scores[0] = 1;
        let rounds = vec![
            par_row(),
            rated("Jobby", "2024-01-01 0900", 180),
            rated("Jobby", "2024-02-01 0900", 205),
            round("Jobby", "2024-03-01 0900", ace_scores),
            rated("Miza", "2024-01-10 0900", 150),
        ];
        let summaries = player_summaries(&rounds, &defaults());
        assert_eq!(summaries.len(), 2);

        let jobby = &summaries[0];
        assert_eq!(jobby.player, "Jobby");
        assert_eq!(jobby.rounds, 3);
        assert_eq!(jobby.aces, 1);
        assert_eq!(jobby.rating, 192.5);
        // Current 192.5 against 180 without the best round.
        assert_eq!(jobby.movement, Some(12.5));

        let miza = &summaries[1];
        assert_eq!(miza.rounds, 1);
        assert_eq!(miza.rating, 150.0);
        assert_eq!(miza.movement, None);
    }

    #[test]
    fn ordinals_read_naturally() {
        assert_eq!(ordinal(1), "1st");
        assert_eq!(ordinal(2), "2nd");
        assert_eq!(ordinal(3), "3rd");
        assert_eq!(ordinal(4), "4th");
        assert_eq!(ordinal(11), "11th");
        assert_eq!(ordinal(13), "13th");
        assert_eq!(ordinal(21), "21st");
    }
}

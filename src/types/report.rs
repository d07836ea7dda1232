use super::badge::BadgeResult;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Evaluated badge set for one player, ready for rendering. The presentation
/// layer groups by category and shows unlocked entries first.
#[derive(Debug, Clone, Serialize)]
pub struct BadgeReport {
    pub player: String,
    pub earned: usize,
    pub total: usize,
    pub badges: Vec<BadgeResult>,
}

impl BadgeReport {
    pub fn new(player: String, badges: Vec<BadgeResult>) -> Self {
        let earned = badges.iter().filter(|badge| badge.achieved).count();
        let total = badges.len();
        Self {
            player,
            earned,
            total,
            badges,
        }
    }
}

/// Rolling-rating history for one player: each rated round with the
/// best-8-of-last-20 value at that point in time.
#[derive(Debug, Clone, Serialize)]
pub struct RatingTimeline {
    pub player: String,
    /// Rolling rating after the most recent rated round, 0 if none.
    pub current: f64,
    pub points: Vec<TimelinePoint>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelinePoint {
    pub date: DateTime<Utc>,
    pub rating: i32,
    pub rolling: f64,
}

/// League-wide best score for one course+layout. Lower `total` wins, then
/// lower `plus_minus`; exact ties keep every holder.
#[derive(Debug, Clone, Serialize)]
pub struct CourseRecord {
    pub course: String,
    pub layout: String,
    pub total: i32,
    pub plus_minus: i32,
    /// Newest holder first.
    pub holders: Vec<RecordHolder>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordHolder {
    pub player: String,
    pub date: DateTime<Utc>,
}

/// One player's best round on every course+layout they have played.
#[derive(Debug, Clone, Serialize)]
pub struct PersonalBests {
    pub player: String,
    pub bests: Vec<PersonalBest>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PersonalBest {
    pub course: String,
    pub layout: String,
    pub total: i32,
    pub plus_minus: i32,
    /// Most recent round that matched the best score exactly.
    pub date: DateTime<Utc>,
}

/// Per-player roster line for the `players` subcommand.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummary {
    pub player: String,
    pub rounds: usize,
    pub aces: usize,
    /// Rolling rating after the most recent rated round, 0 if none.
    pub rating: f64,
    /// Difference against the same window with the best round excluded,
    /// absent until a second rated round exists.
    pub movement: Option<f64>,
}

/// A dataset-validation finding.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub id: String,
    pub title: String,
    pub body: String,
    pub blocking: bool,
}

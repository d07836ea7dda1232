use chrono::{DateTime, Utc};

/// Reserved player name marking a synthetic row that carries the par values
/// for its course+layout instead of a real player's scores.
pub const PAR_PLAYER: &str = "Par";

/// One player's scorecard for one round at one course/layout. Constructed
/// once during ingestion and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RoundRecord {
    pub player: String,
    pub course: String,
    pub layout: String,
    pub started_at: DateTime<Utc>,
    pub total: i32,
    pub plus_minus: i32,
    /// 0 when the round produced no official rating.
    pub rating: i32,
    /// Strokes per hole, index 0 = hole 1. Values <= 0 mean not played
    /// or invalid.
    pub hole_scores: Vec<i32>,
}

impl RoundRecord {
    pub fn is_par_row(&self) -> bool {
        self.player == PAR_PLAYER
    }

    /// Valid stroke count for the 1-based `hole`, if the hole was played.
    pub fn score(&self, hole: usize) -> Option<i32> {
        match self.hole_scores.get(hole.checked_sub(1)?) {
            Some(&strokes) if strokes > 0 => Some(strokes),
            _ => None,
        }
    }

    pub fn is_rated(&self) -> bool {
        self.rating > 0
    }
}

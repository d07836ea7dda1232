use chrono::{DateTime, Utc};

/// One rated round in a chronological sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingPoint {
    pub date: DateTime<Utc>,
    pub rating: i32,
}

/// How many recent rated rounds the rolling window spans.
pub const WINDOW: usize = 20;
/// How many of the window's best ratings are averaged.
pub const TOP_K: usize = 8;

/// The rolling "disc rating" at position `idx` of a chronological sequence
/// of rated rounds: the mean of the best `TOP_K` ratings among the window of
/// at most `WINDOW` points ending at `idx`. Early in a history the window is
/// simply smaller, so the metric is defined from the first rated round.
/// Returns 0.0 for an empty window, which is unambiguous because callers
/// filter inputs to rating > 0.
pub fn rating_at(points: &[RatingPoint], idx: usize) -> f64 {
    mean(&take_top(points, idx, 0))
}

/// The comparison value for rating movement: the same window with the single
/// best round excluded. 0.0 when fewer than two rated rounds are in range.
pub fn previous_rating_at(points: &[RatingPoint], idx: usize) -> f64 {
    mean(&take_top(points, idx, 1))
}

/// Ratings ranked `skip..skip + TOP_K` within the window ending at `idx`.
fn take_top(points: &[RatingPoint], idx: usize, skip: usize) -> Vec<i32> {
    if idx >= points.len() {
        return Vec::new();
    }
    let lo = idx.saturating_sub(WINDOW - 1);
    let mut window: Vec<i32> = points[lo..=idx]
        .iter()
        .map(|point| point.rating)
        .filter(|&rating| rating > 0)
        .collect();
    window.sort_unstable_by(|a, b| b.cmp(a));
    window.into_iter().skip(skip).take(TOP_K).collect()
}

fn mean(ratings: &[i32]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().map(|&rating| f64::from(rating)).sum::<f64>() / ratings.len() as f64
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

fn default_count() -> u32 {
    1
}

fn default_threshold() -> i32 {
    200
}

/// One achievement rule, loaded from the badge definition document. The
/// engine dispatches on `rule` and ignores parameters that do not apply.
/// Image paths are opaque presentation references carried through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct BadgeSpec {
    pub id: String,
    pub category: String,
    pub title: String,
    #[serde(flatten)]
    pub rule: BadgeRule,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub locked_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BadgeRule {
    /// Record `count` total aces (a hole score of exactly 1).
    AceCount {
        #[serde(default = "default_count")]
        count: u32,
    },
    /// A bogey-free round, optionally restricted to rounds whose course or
    /// layout name contains the given filter (case-insensitive).
    NoMugsy {
        #[serde(default)]
        course: Option<String>,
        #[serde(default)]
        layout: Option<String>,
    },
    /// A single round rated at or above `threshold`.
    RoundRating {
        #[serde(default = "default_threshold")]
        threshold: i32,
    },
    /// The rolling rating (best 8 of last 20) reaching `threshold`.
    DiscRating {
        #[serde(default = "default_threshold")]
        threshold: i32,
    },
    /// Playing `count` rated rounds.
    RoundsMilestone {
        #[serde(default = "default_count")]
        count: u32,
    },
    /// Birdieing every hole of the given course+layout at least once.
    BirdieSweep { course: String, layout: String },
    /// Unrecognized rule types evaluate to a permanently locked result
    /// instead of failing the batch.
    #[serde(other)]
    Unknown,
}

/// Distance to an unmet badge. `pct` is clamped to [0, 100] and forced to 0
/// when the target is not positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub current: i64,
    pub target: i64,
    pub pct: f64,
    pub label: String,
}

impl Progress {
    pub fn new(current: i64, target: i64) -> Self {
        let pct = if target <= 0 {
            0.0
        } else {
            (current as f64 / target as f64 * 100.0).clamp(0.0, 100.0)
        };
        Self {
            current,
            target,
            pct,
            label: format!("{current} / {target}"),
        }
    }
}

/// The computed achievement state for one badge definition.
#[derive(Debug, Clone, Serialize)]
pub struct BadgeResult {
    pub id: String,
    pub category: String,
    pub title: String,
    pub achieved: bool,
    pub awarded: Option<DateTime<Utc>>,
    pub description: String,
    pub progress: Option<Progress>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked_image: Option<String>,
}

impl BadgeResult {
    /// The default, locked state every evaluation starts from.
    pub fn locked(spec: &BadgeSpec) -> Self {
        Self {
            id: spec.id.clone(),
            category: spec.category.clone(),
            title: spec.title.clone(),
            achieved: false,
            awarded: None,
            description: String::new(),
            progress: None,
            image: spec.image.clone(),
            locked_image: spec.locked_image.clone(),
        }
    }
}

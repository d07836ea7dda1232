use crate::error::{BagtagError, Result};
use crate::types::badge::{BadgeRule, BadgeSpec};
use serde::{Deserialize, Deserializer};
use std::path::Path;

pub const DEFAULT_BADGES_FILE: &str = "badges.toml";

fn default_par() -> i32 {
    3
}

/// Engine-wide defaults, tunable from the `[defaults]` table of the badge
/// document. Holds the par assumed for holes without a par row entry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct EngineDefaults {
    #[serde(default = "default_par")]
    pub par: i32,
}

impl Default for EngineDefaults {
    fn default() -> Self {
        Self { par: default_par() }
    }
}

/// The externally supplied badge definition document.
#[derive(Debug, Clone, Deserialize)]
pub struct BadgeDocument {
    #[serde(default)]
    pub defaults: EngineDefaults,
    #[serde(default, rename = "badge", deserialize_with = "lenient_badges")]
    pub badges: Vec<BadgeSpec>,
}

/// One malformed entry must never reject the rest of the document. Entries
/// that fail to deserialize (a known type with a missing required parameter,
/// say) degrade to a permanently locked `Unknown` rule, keeping whatever
/// identity fields can be salvaged.
fn lenient_badges<'de, D>(deserializer: D) -> std::result::Result<Vec<BadgeSpec>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<toml::Value> = Vec::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|value| match value.clone().try_into::<BadgeSpec>() {
            Ok(spec) => spec,
            Err(error) => {
                let text = |key: &str| {
                    value
                        .get(key)
                        .and_then(toml::Value::as_str)
                        .unwrap_or("")
                        .to_string()
                };
                let image = |key: &str| {
                    value
                        .get(key)
                        .and_then(toml::Value::as_str)
                        .map(str::to_string)
                };
                tracing::warn!(id = %text("id"), %error, "malformed badge definition, keeping it locked");
                BadgeSpec {
                    id: text("id"),
                    category: text("category"),
                    title: text("title"),
                    rule: BadgeRule::Unknown,
                    image: image("image"),
                    locked_image: image("locked_image"),
                }
            }
        })
        .collect())
}

pub fn load_badges(path: &Path) -> Result<BadgeDocument> {
    if !path.exists() {
        return Err(BagtagError::DefinitionsNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let document: BadgeDocument = toml::from_str(&content)
        .map_err(|e| BagtagError::DefinitionsParse(format!("{}: {}", path.display(), e)))?;
    tracing::debug!(
        badges = document.badges.len(),
        default_par = document.defaults.par,
        "loaded badge definitions"
    );
    Ok(document)
}

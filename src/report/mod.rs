pub mod json;
pub mod md;

use crate::error::BagtagError;
use crate::types::report::{BadgeReport, CourseRecord, PersonalBests, RatingTimeline};

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render(report: &BadgeReport, format: OutputFormat) -> Result<String, BagtagError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(BagtagError::Json),
        OutputFormat::Md => Ok(md::to_markdown(report)),
    }
}

pub fn render_timeline(
    timeline: &RatingTimeline,
    format: OutputFormat,
) -> Result<String, BagtagError> {
    match format {
        OutputFormat::Json => json::timeline_to_json(timeline).map_err(BagtagError::Json),
        OutputFormat::Md => Ok(md::timeline_to_markdown(timeline)),
    }
}

pub fn render_records(
    records: &[CourseRecord],
    format: OutputFormat,
) -> Result<String, BagtagError> {
    match format {
        OutputFormat::Json => json::records_to_json(records).map_err(BagtagError::Json),
        OutputFormat::Md => Ok(md::records_to_markdown(records)),
    }
}

pub fn render_bests(bests: &PersonalBests, format: OutputFormat) -> Result<String, BagtagError> {
    match format {
        OutputFormat::Json => json::bests_to_json(bests).map_err(BagtagError::Json),
        OutputFormat::Md => Ok(md::bests_to_markdown(bests)),
    }
}

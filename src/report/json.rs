use crate::types::report::{BadgeReport, CourseRecord, PersonalBests, RatingTimeline};

pub fn to_json(report: &BadgeReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn timeline_to_json(timeline: &RatingTimeline) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(timeline)
}

pub fn records_to_json(records: &[CourseRecord]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(records)
}

pub fn bests_to_json(bests: &PersonalBests) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(bests)
}

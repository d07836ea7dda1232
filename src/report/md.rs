use crate::dates;
use crate::types::badge::BadgeResult;
use crate::types::report::{BadgeReport, CourseRecord, PersonalBests, RatingTimeline};

pub fn to_markdown(report: &BadgeReport) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Badges: {}\n\n", report.player));
    output.push_str(&format!(
        "Unlocked {} of {}.\n\n",
        report.earned, report.total
    ));

    for category in categories(report) {
        output.push_str(&format!("## {category}\n\n"));
        let (unlocked, locked): (Vec<&BadgeResult>, Vec<&BadgeResult>) = report
            .badges
            .iter()
            .filter(|badge| badge.category == category)
            .partition(|badge| badge.achieved);
        for badge in unlocked.iter().chain(locked.iter()) {
            output.push_str(&badge_line(badge));
        }
        output.push('\n');
    }

    output
}

// Categories keep their first-appearance order from the definition list.
fn categories(report: &BadgeReport) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for badge in &report.badges {
        if !seen.contains(&badge.category) {
            seen.push(badge.category.clone());
        }
    }
    seen
}

fn badge_line(badge: &BadgeResult) -> String {
    let status = if badge.achieved { "unlocked" } else { "locked" };
    let mut line = format!("- [{status}] {}", badge.title);
    if let Some(awarded) = badge.awarded {
        line.push_str(&format!(" ({})", dates::format_awarded(awarded)));
    }
    if !badge.description.is_empty() {
        line.push_str(&format!(": {}", badge.description));
    }
    if !badge.achieved {
        if let Some(progress) = &badge.progress {
            line.push_str(&format!(" [{}, {:.0}%]", progress.label, progress.pct));
        }
    }
    line.push('\n');
    line
}

pub fn timeline_to_markdown(timeline: &RatingTimeline) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Rating: {}\n\n", timeline.player));
    output.push_str(&format!(
        "Current rolling rating (best 8 of last 20): {:.1}\n\n",
        timeline.current
    ));
    if timeline.points.is_empty() {
        output.push_str("- no rated rounds\n");
        return output;
    }
    output.push_str("| Date | Round | Rolling |\n|---|---|---|\n");
    for point in &timeline.points {
        output.push_str(&format!(
            "| {} | {} | {:.1} |\n",
            dates::format_awarded(point.date),
            point.rating,
            point.rolling
        ));
    }
    output
}

pub fn records_to_markdown(records: &[CourseRecord]) -> String {
    let mut output = String::from("# Course Records\n\n");
    if records.is_empty() {
        output.push_str("- no complete rounds\n");
        return output;
    }
    for record in records {
        output.push_str(&format!("## {} ({})\n\n", record.course, record.layout));
        for holder in &record.holders {
            output.push_str(&format!(
                "- {} ({:+}) by {} on {}\n",
                record.total,
                record.plus_minus,
                holder.player,
                dates::format_awarded(holder.date)
            ));
        }
        output.push('\n');
    }
    output
}

pub fn bests_to_markdown(bests: &PersonalBests) -> String {
    let mut output = format!("# Personal Bests: {}\n\n", bests.player);
    if bests.bests.is_empty() {
        output.push_str("- no complete rounds\n");
        return output;
    }
    for best in &bests.bests {
        output.push_str(&format!(
            "- {} ({}): {} ({:+}) on {}\n",
            best.course,
            best.layout,
            best.total,
            best.plus_minus,
            dates::format_awarded(best.date)
        ));
    }
    output
}

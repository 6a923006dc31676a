//! Narrative formatter
//!
//! Human-readable messages built from section results. In the status
//! message only the compensation section quotes a missing item; every other
//! section falls back to "Complete {section}". The next action always asks
//! to add the first missing item.

use crate::lot::LotProgress;
use crate::section::{Section, SectionResult, SectionStatus};

/// Message for a lot with every section complete
pub const CELEBRATION: &str = "All sections completed! 🎉";

/// Message for a lot with nothing recorded
pub const READY_TO_START: &str = "Ready to start - Please add owner details first";

/// Status message when no section is left
pub const ALL_SECTIONS_COMPLETE: &str = "All sections complete";

/// Next action when no section is left
pub const ALL_DONE: &str = "All done!";

/// Next action for a blocked section
pub const COMPLETE_PREREQUISITES: &str = "Complete prerequisites first";

/// One-line summary of a lot
#[must_use]
pub fn format_message(progress: &LotProgress) -> String {
    match progress.overall_percent {
        100 => CELEBRATION.to_string(),
        0 => READY_TO_START.to_string(),
        percent => format!("{percent}% complete — {}", progress.status_message),
    }
}

/// Hint for the first section that is not complete
#[must_use]
pub fn status_message(sections: &[SectionResult]) -> String {
    sections
        .iter()
        .find(|r| !r.is_complete())
        .map_or_else(|| ALL_SECTIONS_COMPLETE.to_string(), section_hint)
}

/// Most actionable step for the lot, scanning sections in order
#[must_use]
pub fn next_action(sections: &[SectionResult]) -> String {
    let Some(pending) = sections.iter().find(|r| !r.is_complete()) else {
        return ALL_DONE.to_string();
    };
    if pending.status == SectionStatus::Blocked {
        return COMPLETE_PREREQUISITES.to_string();
    }
    pending.missing.first().map_or_else(
        || format!("Complete {}", pending.section),
        |item| format!("Add {item}"),
    )
}

fn section_hint(result: &SectionResult) -> String {
    match (result.section, result.status, result.missing.first()) {
        (Section::Compensation, SectionStatus::NotStarted | SectionStatus::Partial, Some(item)) => {
            format!("Missing: {item}")
        }
        (section, ..) => format!("Complete {section}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete(section: Section) -> SectionResult {
        SectionResult::scored(section, 1.0, vec![])
    }

    fn lot_sections(compensation: SectionResult) -> Vec<SectionResult> {
        vec![
            complete(Section::OwnerDetails),
            complete(Section::LandDetails),
            complete(Section::Valuation),
            compensation,
        ]
    }

    #[test]
    fn compensation_quotes_first_missing() {
        let sections = lot_sections(SectionResult::scored(
            Section::Compensation,
            0.5,
            vec!["balance due".into()],
        ));
        assert_eq!(status_message(&sections), "Missing: balance due");
        assert_eq!(next_action(&sections), "Add balance due");
    }

    #[test]
    fn other_sections_use_generic_hint() {
        let sections = vec![
            complete(Section::OwnerDetails),
            SectionResult::scored(Section::LandDetails, 0.5, vec!["land extent".into()]),
            SectionResult::blocked(Section::Valuation, Section::LandDetails),
            SectionResult::blocked(Section::Compensation, Section::Valuation),
        ];
        assert_eq!(status_message(&sections), "Complete Land Details");
        assert_eq!(next_action(&sections), "Add land extent");
    }

    #[test]
    fn blocked_section_asks_for_prerequisites() {
        let sections = vec![SectionResult::blocked(Section::LandDetails, Section::OwnerDetails)];
        assert_eq!(next_action(&sections), COMPLETE_PREREQUISITES);
        assert_eq!(status_message(&sections), "Complete Land Details");
    }

    #[test]
    fn everything_done() {
        let sections = lot_sections(complete(Section::Compensation));
        assert_eq!(next_action(&sections), ALL_DONE);
        assert_eq!(status_message(&sections), ALL_SECTIONS_COMPLETE);
    }
}

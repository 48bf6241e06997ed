use serde::Serialize;

use crate::sections::segmenter::SectionMap;
use crate::sections::SectionLabel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSuggestion {
    pub section: SectionLabel,
    pub suggestion: String,
}

fn canned_suggestion(label: SectionLabel) -> &'static str {
    match label {
        SectionLabel::Objective => "Consider making your objective more concise and focused.",
        SectionLabel::Education => {
            "List degrees with institution and year, and note any Canadian credential assessment."
        }
        SectionLabel::Experience => {
            "Lead each role with measurable outcomes: patient ratios, unit size, or time saved."
        }
        SectionLabel::Skills => {
            "Mirror the wording of the job description and group clinical and technical skills."
        }
        SectionLabel::Certifications => {
            "Include issuing body and expiry date for each certification (e.g. BLS, ACLS)."
        }
        SectionLabel::Awards => "Add the year and a one-line reason for each award.",
        SectionLabel::Volunteering => {
            "Highlight volunteer work that shows transferable clinical or community skills."
        }
    }
}

/// Produces one suggestion per present section, in table order.
/// A heading with no content gets a prompt to fill it instead.
pub fn suggest_improvements(sections: &SectionMap) -> Vec<SectionSuggestion> {
    sections
        .iter()
        .map(|(section, body)| {
            let suggestion = if body.is_empty() {
                format!(
                    "The {} heading has no content under it; add details or remove the heading.",
                    section.name()
                )
            } else {
                canned_suggestion(section).to_string()
            };
            SectionSuggestion {
                section,
                suggestion,
            }
        })
        .collect()
}

// Resume section segmentation.
// Splits extracted document text into labeled sections, picks the section a
// free-text query refers to, and produces canned per-section suggestions.

pub mod handlers;
pub mod query;
pub mod segmenter;
pub mod suggestions;

use serde::{Deserialize, Serialize};

/// Canonical resume section names, declared in table order.
/// `Ord` follows declaration order, so a `SectionMap` iterates in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SectionLabel {
    Objective,
    Education,
    Experience,
    Skills,
    Certifications,
    Awards,
    Volunteering,
}

impl SectionLabel {
    pub const ALL: [SectionLabel; 7] = [
        SectionLabel::Objective,
        SectionLabel::Education,
        SectionLabel::Experience,
        SectionLabel::Skills,
        SectionLabel::Certifications,
        SectionLabel::Awards,
        SectionLabel::Volunteering,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SectionLabel::Objective => "Objective",
            SectionLabel::Education => "Education",
            SectionLabel::Experience => "Experience",
            SectionLabel::Skills => "Skills",
            SectionLabel::Certifications => "Certifications",
            SectionLabel::Awards => "Awards",
            SectionLabel::Volunteering => "Volunteering",
        }
    }

    /// Heading synonyms, matched case-insensitively as literal text.
    pub fn patterns(self) -> &'static [&'static str] {
        match self {
            SectionLabel::Objective => &["Objective"],
            SectionLabel::Education => &["Education", "Academic Background", "Degrees"],
            SectionLabel::Experience => &[
                "Experience",
                "Work History",
                "Professional Experience",
                "Employment History",
            ],
            SectionLabel::Skills => &["Skills", "Abilities", "Competencies"],
            SectionLabel::Certifications => &["Certifications"],
            SectionLabel::Awards => &["Awards"],
            SectionLabel::Volunteering => &["Volunteering"],
        }
    }
}

impl std::fmt::Display for SectionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

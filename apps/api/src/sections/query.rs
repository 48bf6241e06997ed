//! Query relevance selection — picks the section a free-text question is about.
//!
//! First match in table order wins: a section is relevant when any word of its
//! label appears in the query, case-insensitively. No ranking.

use crate::sections::segmenter::SectionMap;
use crate::sections::SectionLabel;

/// Returned when no section label appears in the query.
pub const NOT_FOUND: &str = "Sorry, I couldn't find relevant information.";

/// Returns the first present section whose label occurs in `query`.
pub fn relevant_section<'a>(
    sections: &'a SectionMap,
    query: &str,
) -> Option<(SectionLabel, &'a str)> {
    let query = query.to_lowercase();
    sections.iter().find(|(label, _)| {
        label
            .name()
            .split_whitespace()
            .any(|keyword| query.contains(&keyword.to_lowercase()))
    })
}

/// Returns the body of the relevant section, or [`NOT_FOUND`].
/// Handlers use [`relevant_section`] since they also report the label.
#[allow(dead_code)]
pub fn find_relevant_section<'a>(sections: &'a SectionMap, query: &str) -> &'a str {
    relevant_section(sections, query)
        .map(|(_, body)| body)
        .unwrap_or(NOT_FOUND)
}

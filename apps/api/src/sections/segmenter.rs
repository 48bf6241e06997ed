//! Section Segmenter — splits raw document text into a label → body map.
//!
//! Each label's heading is the leftmost case-insensitive match of any of its
//! synonyms. A body runs from the end of its heading to the nearest heading of
//! another label (or end of document), trimmed. Labels without a heading are
//! omitted. Segmentation never fails and performs no I/O.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::sections::SectionLabel;

static STANDARD: LazyLock<SectionSegmenter> = LazyLock::new(SectionSegmenter::new);

/// How a section's end boundary is chosen among other labels' heading starts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Only headings starting strictly after this section's heading count.
    #[default]
    AfterHeading,
    /// Every other label's first heading counts, wherever it sits in the
    /// document. A heading earlier than this section yields an empty body.
    WholeDocument,
}

/// Mapping of section label to trimmed body. Iterates in table order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionMap(BTreeMap<SectionLabel, String>);

impl SectionMap {
    pub fn get(&self, label: SectionLabel) -> Option<&str> {
        self.0.get(&label).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (SectionLabel, &str)> {
        self.0.iter().map(|(label, body)| (*label, body.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SectionLabel, String)> for SectionMap {
    fn from_iter<I: IntoIterator<Item = (SectionLabel, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// A compiled heading table.
#[derive(Debug, Clone)]
pub struct SectionSegmenter {
    headings: Vec<(SectionLabel, Regex)>,
}

/// Position of a label's first heading match.
#[derive(Debug, Clone, Copy)]
struct Heading {
    label: SectionLabel,
    start: usize,
    end: usize,
}

impl SectionSegmenter {
    /// Builds the segmenter for the standard label table.
    pub fn new() -> Self {
        let table: Vec<_> = SectionLabel::ALL
            .iter()
            .map(|label| (*label, label.patterns()))
            .collect();
        // Escaped literal alternations always compile.
        Self::with_table(&table).expect("standard heading table must compile")
    }

    /// Shared instance for the standard label table.
    pub fn standard() -> &'static SectionSegmenter {
        &STANDARD
    }

    /// Builds a segmenter from `(label, synonyms)` rows. Rows with no
    /// synonyms are skipped since they can never match a heading.
    pub fn with_table(table: &[(SectionLabel, &[&str])]) -> Result<Self, regex::Error> {
        let mut headings = Vec::with_capacity(table.len());
        for (label, patterns) in table {
            if patterns.is_empty() {
                continue;
            }
            let alternation = patterns
                .iter()
                .map(|p| regex::escape(p))
                .collect::<Vec<_>>()
                .join("|");
            let regex = RegexBuilder::new(&alternation)
                .case_insensitive(true)
                .build()?;
            headings.push((*label, regex));
        }
        Ok(Self { headings })
    }

    /// Splits `text` into sections.
    pub fn segment(&self, text: &str, policy: BoundaryPolicy) -> SectionMap {
        let found: Vec<Heading> = self
            .headings
            .iter()
            .filter_map(|(label, regex)| {
                regex.find(text).map(|m| Heading {
                    label: *label,
                    start: m.start(),
                    end: m.end(),
                })
            })
            .collect();

        found
            .iter()
            .map(|heading| {
                let body_start = heading.end;
                let body_end = found
                    .iter()
                    .filter(|other| other.label != heading.label)
                    .map(|other| other.start)
                    .filter(|&start| match policy {
                        BoundaryPolicy::AfterHeading => start > body_start,
                        BoundaryPolicy::WholeDocument => true,
                    })
                    .min()
                    .unwrap_or(text.len());

                // An end before the start is an empty body, not an error.
                let body = text.get(body_start..body_end).unwrap_or_default().trim();
                (heading.label, body.to_string())
            })
            .collect()
    }
}

impl Default for SectionSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

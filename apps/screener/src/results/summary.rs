//! Compact per-candidate cards for the ranked list.

use std::collections::HashSet;

use crate::results::normalize::{CandidateRecord, ResultId};

pub const TOP_SKILL_COUNT: usize = 6;
pub const HIGHLIGHT_PREVIEW_COUNT: usize = 2;
pub const SEPARATOR: &str = " · ";

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCard {
    pub id: ResultId,
    pub filename: String,
    pub score: f64,
    pub subtitle: String,
    pub top_skills: Vec<String>,
    pub highlight_preview: String,
    pub visible: bool,
}

impl SummaryCard {
    pub fn from_record(record: &CandidateRecord, visible: bool) -> Self {
        Self {
            id: record.id,
            filename: record.filename.clone(),
            score: record.match_score,
            subtitle: subtitle(record),
            top_skills: record
                .flattened_skills()
                .take(TOP_SKILL_COUNT)
                .map(str::to_string)
                .collect(),
            highlight_preview: record
                .key_highlights
                .iter()
                .take(HIGHLIGHT_PREVIEW_COUNT)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(SEPARATOR),
            visible,
        }
    }

    /// Score as shown on the card, e.g. `72%` or `72.5%`.
    pub fn score_display(&self) -> String {
        format!("{}%", self.score)
    }
}

/// One card per record, in store order. Filtering only flips `visible`, so the card at
/// position `i` always describes `records[i]`.
pub fn render_cards(records: &[CandidateRecord], visible: &HashSet<ResultId>) -> Vec<SummaryCard> {
    records
        .iter()
        .map(|r| SummaryCard::from_record(r, visible.contains(&r.id)))
        .collect()
}

/// `strength · Rank #n · comparison`; absent segments stay in place as empty strings.
fn subtitle(record: &CandidateRecord) -> String {
    let rank = record
        .rank
        .map(|r| r.to_string())
        .unwrap_or_else(|| "-".to_string());
    let rank = format!("Rank #{rank}");
    [
        record.strength_level.as_deref().unwrap_or(""),
        rank.as_str(),
        record.comparison_note.as_deref().unwrap_or(""),
    ]
    .join(SEPARATOR)
}

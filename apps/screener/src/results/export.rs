//! CSV export of the full, unfiltered result batch.
//!
//! Fields are written verbatim: no quoting or escaping, so a value containing a comma
//! or newline produces a malformed row. Consumers of the file rely on this exact shape.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::results::normalize::CandidateRecord;

pub const CSV_HEADER: [&str; 4] = ["filename", "matchScore", "rank", "strength_level"];
pub const DEFAULT_EXPORT_FILE: &str = "results.csv";

/// Header plus one row per record, `\n`-separated, without a trailing newline.
pub fn to_csv(records: &[CandidateRecord]) -> Result<String, csv::Error> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for record in records {
        writer.write_record(row(record))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }
    Ok(text)
}

fn row(record: &CandidateRecord) -> [String; 4] {
    [
        record.filename.clone(),
        record.match_score.to_string(),
        record.rank.map(|r| r.to_string()).unwrap_or_default(),
        record.strength_level.clone().unwrap_or_default(),
    ]
}

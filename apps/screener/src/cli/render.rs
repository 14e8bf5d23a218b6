//! Plain-text rendering of the workspace views.

use std::fmt::Write as _;

use crate::queue::InputQueue;
use crate::results::{DetailView, Profile, SummaryCard, Threshold};

const BAR_WIDTH: usize = 20;
const LABEL_WIDTH: usize = 16;

pub fn queue(queue: &InputQueue) -> String {
    if queue.is_empty() {
        return "No files selected".to_string();
    }
    queue
        .list()
        .iter()
        .enumerate()
        .map(|(i, f)| format!("{:>3}. {}  [{}]", i + 1, f.name, f.size_kib()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Visible cards only, each numbered by its position in the full result list so the
/// number can be passed to `details`.
pub fn cards(cards: &[SummaryCard], threshold: Threshold) -> String {
    if cards.is_empty() {
        return "No results yet. Queue resumes and run 'analyze'.".to_string();
    }

    let mut out = String::new();
    let mut shown = 0;
    for (position, card) in cards.iter().enumerate().filter(|(_, c)| c.visible) {
        shown += 1;
        let _ = writeln!(
            out,
            "[{}] {}  {}",
            position + 1,
            card.filename,
            card.score_display()
        );
        let _ = writeln!(out, "    {}", card.subtitle);
        if !card.top_skills.is_empty() {
            let _ = writeln!(out, "    Skills: {}", card.top_skills.join(", "));
        }
        if !card.highlight_preview.is_empty() {
            let _ = writeln!(out, "    {}", card.highlight_preview);
        }
    }
    let _ = write!(
        out,
        "Showing {shown} of {} result(s) with match score >= {}",
        cards.len(),
        threshold.value()
    );
    out
}

pub fn detail(view: &DetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", view.filename);
    let _ = writeln!(out, "{}", view.headline);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", profile_chart(&view.profile));

    section(&mut out, "Contact", std::slice::from_ref(&view.contact));
    section(&mut out, "Education", &view.education);
    section(&mut out, "Experience", std::slice::from_ref(&view.experience));
    let _ = writeln!(out, "\nSkills\n  {}", view.skills.join(", "));
    section(&mut out, "Projects", &view.projects);
    section(&mut out, "Certifications", &view.certifications);
    section(&mut out, "Highlights", &view.highlights);
    section(&mut out, "Recommendations", &view.recommendations);
    out.trim_end().to_string()
}

/// One horizontal bar per profile axis, scaled to 0–100.
pub fn profile_chart(profile: &Profile) -> String {
    profile
        .axes
        .iter()
        .map(|axis| {
            let filled = ((axis.value / 100.0) * BAR_WIDTH as f64).round() as usize;
            let filled = filled.min(BAR_WIDTH);
            format!(
                "{:<width$} {}{} {:>3}",
                axis.label,
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled),
                axis.value.round(),
                width = LABEL_WIDTH
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn section(out: &mut String, title: &str, lines: &[String]) {
    let _ = writeln!(out, "\n{title}");
    for line in lines {
        let _ = writeln!(out, "  • {line}");
    }
}

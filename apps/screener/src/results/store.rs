//! The current batch of analysis results: the single source of truth for every
//! result view.
//!
//! Submissions are ordered by ticket. A batch is only stored if it answers the most
//! recently issued ticket, so a slow response to an earlier submission can never
//! overwrite the answer to a later one.

use tracing::{info, warn};

use crate::models::AnalysisResult;
use crate::results::normalize::{CandidateRecord, ResultId};

/// Issued when a submission starts; presented again when its response arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket(u64);

impl SubmissionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct ResultStore {
    records: Vec<CandidateRecord>,
    generation: u64,
}

impl ResultStore {
    pub fn issue_ticket(&mut self) -> SubmissionTicket {
        self.generation += 1;
        SubmissionTicket(self.generation)
    }

    pub fn is_current(&self, ticket: SubmissionTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Replaces the whole batch. Returns `false`, leaving the store untouched, when the
    /// ticket has been superseded by a later submission or a clear.
    pub fn replace(&mut self, ticket: SubmissionTicket, results: Vec<AnalysisResult>) -> bool {
        if !self.is_current(ticket) {
            warn!(
                "Discarding stale results for submission #{} (current #{})",
                ticket.0, self.generation
            );
            return false;
        }
        self.records = results
            .into_iter()
            .map(CandidateRecord::from_result)
            .collect();
        info!(
            "Stored {} result(s) for submission #{}",
            self.records.len(),
            ticket.0
        );
        true
    }

    /// Empties the store and invalidates any in-flight submission.
    pub fn clear(&mut self) {
        self.records.clear();
        self.generation += 1;
    }

    pub fn records(&self) -> &[CandidateRecord] {
        &self.records
    }

    pub fn get(&self, id: ResultId) -> Option<&CandidateRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn find_by_filename(&self, filename: &str) -> Option<&CandidateRecord> {
        self.records.iter().find(|r| r.filename == filename)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

//! The screening workspace: the one owner of queue, results, threshold and job
//! description. Every user action goes through here; every view is derived on read.

use tracing::{info, warn};

use crate::client::{AnalysisBatch, AnalysisService, SubmissionRequest};
use crate::errors::ScreenError;
use crate::models::CandidateFile;
use crate::queue::InputQueue;
use crate::results::{
    compose, render_cards, to_csv, visible, CandidateRecord, DetailView, ResultId, ResultStore,
    SubmissionTicket, SummaryCard, Threshold,
};

pub const STATUS_NO_FILES: &str = "No files selected";
pub const STATUS_ANALYZING: &str = "Uploading & analyzing...";

/// A submission that has been started but not yet answered.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub ticket: SubmissionTicket,
    pub request: SubmissionRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Applied { count: usize },
    /// A later submission or a clear superseded this one; nothing changed.
    Stale,
    Failed,
}

#[derive(Debug, Default)]
pub struct Workspace {
    queue: InputQueue,
    results: ResultStore,
    threshold: Threshold,
    jd_text: Option<String>,
    jd_file: Option<CandidateFile>,
    status: String,
}

impl Workspace {
    pub fn new() -> Self {
        let mut workspace = Self::default();
        workspace.refresh_queue_status();
        workspace
    }

    pub fn queue(&self) -> &InputQueue {
        &self.queue
    }

    pub fn results(&self) -> &ResultStore {
        &self.results
    }

    pub fn threshold(&self) -> Threshold {
        self.threshold
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn jd_text(&self) -> Option<&str> {
        self.jd_text.as_deref()
    }

    pub fn jd_file(&self) -> Option<&CandidateFile> {
        self.jd_file.as_ref()
    }

    // ── Queue ───────────────────────────────────────────────────────────────

    pub fn add_files(&mut self, files: impl IntoIterator<Item = CandidateFile>) -> usize {
        let accepted = self.queue.add(files);
        self.refresh_queue_status();
        accepted
    }

    pub fn remove_file(&mut self, name: &str) -> bool {
        let removed = self.queue.remove(name).is_some();
        self.refresh_queue_status();
        removed
    }

    /// Empties the queue and the result batch. Any in-flight submission is orphaned.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.results.clear();
        self.refresh_queue_status();
    }

    // ── Job description ─────────────────────────────────────────────────────

    /// Trimmed; blank text clears it.
    pub fn set_jd_text(&mut self, text: &str) {
        let text = text.trim();
        self.jd_text = (!text.is_empty()).then(|| text.to_string());
    }

    pub fn set_jd_file(&mut self, file: CandidateFile) {
        self.jd_file = Some(file);
    }

    pub fn clear_jd(&mut self) {
        self.jd_text = None;
        self.jd_file = None;
    }

    // ── Filtering ───────────────────────────────────────────────────────────

    pub fn set_threshold(&mut self, threshold: Threshold) {
        self.threshold = threshold;
    }

    // ── Submission ──────────────────────────────────────────────────────────

    /// Snapshots the queue and job description and issues a ticket for the reply.
    /// Fails with `EmptyQueue` before anything is issued when nothing is queued.
    pub fn begin_submission(&mut self) -> Result<PendingSubmission, ScreenError> {
        if self.queue.is_empty() {
            self.status = ScreenError::EmptyQueue.user_message();
            return Err(ScreenError::EmptyQueue);
        }
        let ticket = self.results.issue_ticket();
        self.status = STATUS_ANALYZING.to_string();
        info!(
            "Starting submission #{} with {} file(s)",
            ticket.generation(),
            self.queue.len()
        );
        Ok(PendingSubmission {
            ticket,
            request: SubmissionRequest {
                files: self.queue.list().to_vec(),
                jd_text: self.jd_text.clone(),
                jd_file: self.jd_file.clone(),
            },
        })
    }

    /// Applies the reply to a submission. Failures and stale replies leave the stored
    /// results exactly as they were.
    pub fn complete_submission(
        &mut self,
        ticket: SubmissionTicket,
        reply: Result<AnalysisBatch, ScreenError>,
    ) -> SubmissionOutcome {
        if !self.results.is_current(ticket) {
            warn!(
                "Ignoring reply to superseded submission #{}",
                ticket.generation()
            );
            return SubmissionOutcome::Stale;
        }
        match reply {
            Ok(batch) => {
                let count = batch.results.len();
                self.results.replace(ticket, batch.results);
                self.status = format!("Analyzed {} resume(s).", batch.total_count);
                SubmissionOutcome::Applied { count }
            }
            Err(e) => {
                warn!("Submission #{} failed: {e}", ticket.generation());
                self.status = format!("Error: {}", e.user_message());
                SubmissionOutcome::Failed
            }
        }
    }

    /// Begin, submit and complete in one step.
    pub async fn analyze(
        &mut self,
        service: &dyn AnalysisService,
    ) -> Result<SubmissionOutcome, ScreenError> {
        let pending = self.begin_submission()?;
        let reply = service.submit(&pending.request).await;
        Ok(self.complete_submission(pending.ticket, reply))
    }

    // ── Views ───────────────────────────────────────────────────────────────

    pub fn visible_ids(&self) -> std::collections::HashSet<ResultId> {
        visible(self.results.records(), self.threshold)
    }

    /// Every card in store order, visibility set by the current threshold.
    pub fn cards(&self) -> Vec<SummaryCard> {
        render_cards(self.results.records(), &self.visible_ids())
    }

    pub fn detail(&self, id: ResultId) -> Option<DetailView> {
        self.results.get(id).map(compose)
    }

    /// Looks a result up by 1-based store position or exact filename.
    pub fn find(&self, selector: &str) -> Option<&CandidateRecord> {
        let records = self.results.records();
        match selector.trim().parse::<usize>() {
            Ok(position) if position >= 1 => records.get(position - 1),
            _ => self.results.find_by_filename(selector.trim()),
        }
    }

    /// The full, unfiltered batch as CSV. `None` when there is nothing to export.
    pub fn export_csv(&self) -> Result<Option<String>, ScreenError> {
        if self.results.is_empty() {
            return Ok(None);
        }
        Ok(Some(to_csv(self.results.records())?))
    }

    fn refresh_queue_status(&mut self) {
        self.status = if self.queue.is_empty() {
            STATUS_NO_FILES.to_string()
        } else {
            format!("{} file(s) ready", self.queue.len())
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EMPTY_QUEUE_MESSAGE;
    use crate::models::AnalysisResult;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scores each submitted file from a fixed table, or fails with a canned error.
    struct StubService {
        scores: Vec<(&'static str, f64)>,
        fail_with: Option<u16>,
        seen: Mutex<Vec<SubmissionRequest>>,
    }

    impl StubService {
        fn scoring(scores: Vec<(&'static str, f64)>) -> Self {
            Self {
                scores,
                fail_with: None,
                seen: Mutex::new(Vec::new()),
            }
        }

        fn failing(status: u16) -> Self {
            Self {
                scores: Vec::new(),
                fail_with: Some(status),
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AnalysisService for StubService {
        async fn submit(&self, request: &SubmissionRequest) -> Result<AnalysisBatch, ScreenError> {
            self.seen.lock().unwrap().push(request.clone());
            if let Some(status) = self.fail_with {
                return Err(ScreenError::Service {
                    status,
                    message: Some("Analysis backend unavailable".to_string()),
                });
            }
            let results: Vec<AnalysisResult> = request
                .files
                .iter()
                .map(|f| AnalysisResult {
                    filename: f.name.clone(),
                    match_score: self
                        .scores
                        .iter()
                        .find(|(name, _)| *name == f.name)
                        .map(|(_, s)| *s),
                    ..Default::default()
                })
                .collect();
            Ok(AnalysisBatch {
                total_count: results.len(),
                results,
            })
        }
    }

    fn file(name: &str) -> CandidateFile {
        CandidateFile::from_bytes(name, b"content".to_vec())
    }

    fn batch(names: &[&str]) -> AnalysisBatch {
        AnalysisBatch {
            results: names
                .iter()
                .map(|n| AnalysisResult {
                    filename: n.to_string(),
                    ..Default::default()
                })
                .collect(),
            total_count: names.len(),
        }
    }

    fn filenames(workspace: &Workspace) -> Vec<String> {
        workspace
            .results()
            .records()
            .iter()
            .map(|r| r.filename.clone())
            .collect()
    }

    #[test]
    fn test_queue_status_messages() {
        let mut ws = Workspace::new();
        assert_eq!(ws.status(), STATUS_NO_FILES);
        ws.add_files([file("a.pdf"), file("b.pdf"), file("notes.txt")]);
        assert_eq!(ws.status(), "2 file(s) ready");
        ws.remove_file("a.pdf");
        assert_eq!(ws.status(), "1 file(s) ready");
        ws.clear();
        assert_eq!(ws.status(), STATUS_NO_FILES);
    }

    #[test]
    fn test_empty_queue_is_rejected_before_submitting() {
        let mut ws = Workspace::new();
        let err = ws.begin_submission().unwrap_err();
        assert!(matches!(err, ScreenError::EmptyQueue));
        assert_eq!(ws.status(), EMPTY_QUEUE_MESSAGE);
    }

    #[test]
    fn test_jd_text_is_trimmed_and_blank_clears() {
        let mut ws = Workspace::new();
        ws.set_jd_text("  Rust engineer \n");
        assert_eq!(ws.jd_text(), Some("Rust engineer"));
        ws.set_jd_text("   ");
        assert!(ws.jd_text().is_none());
    }

    #[tokio::test]
    async fn test_analyze_populates_results_in_response_order() {
        let mut ws = Workspace::new();
        ws.add_files([file("a.pdf"), file("b.pdf")]);
        ws.set_jd_text("Backend engineer");
        let service = StubService::scoring(vec![("a.pdf", 40.0), ("b.pdf", 90.0)]);

        let outcome = ws.analyze(&service).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Applied { count: 2 });
        assert_eq!(filenames(&ws), vec!["a.pdf", "b.pdf"]);
        assert_eq!(ws.status(), "Analyzed 2 resume(s).");

        let seen = service.seen.lock().unwrap();
        assert_eq!(seen[0].jd_text.as_deref(), Some("Backend engineer"));
        assert_eq!(seen[0].files.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_submission_keeps_existing_results_and_cards() {
        let mut ws = Workspace::new();
        ws.add_files([file("a.pdf"), file("b.pdf")]);
        ws.analyze(&StubService::scoring(vec![("a.pdf", 40.0), ("b.pdf", 90.0)]))
            .await
            .unwrap();
        ws.set_threshold(Threshold::new(50));
        let cards_before = ws.cards();

        let outcome = ws.analyze(&StubService::failing(503)).await.unwrap();
        assert_eq!(outcome, SubmissionOutcome::Failed);
        assert_eq!(ws.cards(), cards_before);
        assert_eq!(ws.status(), "Error: Analysis backend unavailable");
    }

    #[test]
    fn test_late_reply_to_older_submission_is_discarded() {
        let mut ws = Workspace::new();
        ws.add_files([file("a.pdf")]);
        let first = ws.begin_submission().unwrap();
        ws.add_files([file("b.pdf")]);
        let second = ws.begin_submission().unwrap();

        assert_eq!(
            ws.complete_submission(second.ticket, Ok(batch(&["a.pdf", "b.pdf"]))),
            SubmissionOutcome::Applied { count: 2 }
        );
        assert_eq!(
            ws.complete_submission(first.ticket, Ok(batch(&["a.pdf"]))),
            SubmissionOutcome::Stale
        );
        assert_eq!(filenames(&ws), vec!["a.pdf", "b.pdf"]);
        assert_eq!(ws.status(), "Analyzed 2 resume(s).");
    }

    #[test]
    fn test_reply_after_clear_is_discarded() {
        let mut ws = Workspace::new();
        ws.add_files([file("a.pdf")]);
        let pending = ws.begin_submission().unwrap();
        ws.clear();
        assert_eq!(
            ws.complete_submission(pending.ticket, Ok(batch(&["a.pdf"]))),
            SubmissionOutcome::Stale
        );
        assert!(ws.results().is_empty());
    }

    #[test]
    fn test_pending_request_is_a_snapshot() {
        let mut ws = Workspace::new();
        ws.add_files([file("a.pdf")]);
        let pending = ws.begin_submission().unwrap();
        ws.add_files([file("b.pdf")]);
        assert_eq!(pending.request.files.len(), 1);
    }

    #[tokio::test]
    async fn test_cards_follow_threshold() {
        let mut ws = Workspace::new();
        ws.add_files([file("a.pdf"), file("b.pdf"), file("c.pdf")]);
        ws.analyze(&StubService::scoring(vec![("a.pdf", 75.0), ("c.pdf", 55.0)]))
            .await
            .unwrap();

        ws.set_threshold(Threshold::new(60));
        let flags: Vec<bool> = ws.cards().iter().map(|c| c.visible).collect();
        assert_eq!(flags, vec![true, false, false]);

        ws.set_threshold(Threshold::new(0));
        assert!(ws.cards().iter().all(|c| c.visible));
    }

    #[tokio::test]
    async fn test_find_by_position_or_filename_and_detail() {
        let mut ws = Workspace::new();
        ws.add_files([file("a.pdf"), file("b.pdf")]);
        ws.analyze(&StubService::scoring(vec![("b.pdf", 80.0)]))
            .await
            .unwrap();

        assert_eq!(ws.find("2").unwrap().filename, "b.pdf");
        assert_eq!(ws.find("a.pdf").unwrap().filename, "a.pdf");
        assert!(ws.find("0").is_none());
        assert!(ws.find("3").is_none());

        let id = ws.find("b.pdf").unwrap().id;
        let detail = ws.detail(id).unwrap();
        assert_eq!(detail.filename, "b.pdf");
        assert_eq!(detail.profile.axes[0].value, 80.0);
    }

    #[tokio::test]
    async fn test_export_reads_unfiltered_store() {
        let mut ws = Workspace::new();
        assert!(ws.export_csv().unwrap().is_none());

        ws.add_files([file("a.pdf"), file("b.pdf")]);
        ws.analyze(&StubService::scoring(vec![("a.pdf", 10.0), ("b.pdf", 90.0)]))
            .await
            .unwrap();
        ws.set_threshold(Threshold::new(50));

        let csv = ws.export_csv().unwrap().unwrap();
        assert_eq!(csv.lines().count(), 3);
        assert!(csv.contains("a.pdf,10,,"));
    }
}

//! The interactive event loop.
//!
//! Commands are handled one at a time. A submission runs as a spawned task so the
//! prompt stays usable while the service works; its reply is applied on this loop,
//! never concurrently with a command.

use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::cli::{parse, render, Command};
use crate::client::{AnalysisBatch, AnalysisClient, AnalysisService};
use crate::errors::ScreenError;
use crate::models::CandidateFile;
use crate::results::export::DEFAULT_EXPORT_FILE;
use crate::results::SubmissionTicket;
use crate::session::{SubmissionOutcome, Workspace};
use crate::settings::SettingsStore;

type SubmissionReply = (SubmissionTicket, Result<AnalysisBatch, ScreenError>);

enum Flow {
    Continue,
    Quit,
}

pub struct Repl {
    workspace: Workspace,
    client: AnalysisClient,
    settings: SettingsStore,
    request_timeout: Option<Duration>,
    in_flight: JoinSet<SubmissionReply>,
}

impl Repl {
    pub fn new(
        client: AnalysisClient,
        settings: SettingsStore,
        request_timeout: Option<Duration>,
    ) -> Self {
        Self {
            workspace: Workspace::new(),
            client,
            settings,
            request_timeout,
            in_flight: JoinSet::new(),
        }
    }

    pub async fn run(mut self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        println!(
            "Resume screener. Backend: {}. Type 'help' for commands.",
            self.client.base_url()
        );
        prompt();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read from stdin")? else {
                        break;
                    };
                    if let Flow::Quit = self.handle_line(&line).await {
                        break;
                    }
                    prompt();
                }
                Some(joined) = self.in_flight.join_next() => {
                    match joined {
                        Ok((ticket, reply)) => self.on_reply(ticket, reply),
                        Err(e) => warn!("Submission task ended abnormally: {e}"),
                    }
                    prompt();
                }
            }
        }

        if !self.in_flight.is_empty() {
            info!(
                "Exiting with {} submission(s) still in flight",
                self.in_flight.len()
            );
        }
        Ok(())
    }

    async fn handle_line(&mut self, line: &str) -> Flow {
        let command = match parse(line) {
            Ok(Some(command)) => command,
            Ok(None) => return Flow::Continue,
            Err(e) => {
                println!("{e}");
                return Flow::Continue;
            }
        };

        match command {
            Command::Add { paths } => self.add(paths).await,
            Command::Remove { name } => {
                if !self.workspace.remove_file(&name) {
                    println!("'{name}' is not queued");
                }
                println!("{}", self.workspace.status());
            }
            Command::Files => {
                println!("{}", render::queue(self.workspace.queue()));
                self.print_jd();
            }
            Command::Clear => {
                self.workspace.clear();
                println!("Cleared queue and results.");
            }
            Command::JdText { words } => {
                self.workspace.set_jd_text(&words.join(" "));
                self.print_jd();
            }
            Command::JdFile { path } => match CandidateFile::from_path(&path).await {
                Ok(file) => {
                    self.workspace.set_jd_file(file);
                    self.print_jd();
                }
                Err(e) => println!("{}", e.user_message()),
            },
            Command::JdClear => {
                self.workspace.clear_jd();
                println!("Job description cleared.");
            }
            Command::Analyze => self.analyze(),
            Command::Results => self.print_cards(),
            Command::Filter { threshold } => {
                self.workspace.set_threshold(threshold);
                self.print_cards();
            }
            Command::Details { selector } => match self.workspace.find(&selector) {
                Some(record) => match self.workspace.detail(record.id) {
                    Some(view) => println!("{}", render::detail(&view)),
                    None => println!("No result matches '{selector}'"),
                },
                None => println!("No result matches '{selector}'"),
            },
            Command::Export { path } => self.export(path).await,
            Command::Backend { url: None } => println!("Current backend: {}", self.client.base_url()),
            Command::Backend { url: Some(url) } => self.set_backend(&url),
            Command::Health => {
                println!("Testing...");
                println!("{}", self.client.health().await.message());
            }
            Command::Status => println!("{}", self.workspace.status()),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    async fn add(&mut self, paths: Vec<PathBuf>) {
        let mut candidates = Vec::new();
        for path in paths {
            match expand(&path).await {
                Ok(files) => candidates.extend(files),
                Err(e) => println!("{}", e.user_message()),
            }
        }
        let offered = candidates.len();
        let accepted = self.workspace.add_files(candidates);
        if accepted < offered {
            println!(
                "Added {accepted} file(s); skipped {} duplicate or unsupported file(s).",
                offered - accepted
            );
        } else {
            println!("Added {accepted} file(s).");
        }
        println!("{}", self.workspace.status());
    }

    fn analyze(&mut self) {
        let busy = !self.in_flight.is_empty();
        match self.workspace.begin_submission() {
            Ok(pending) => {
                if busy {
                    println!("An earlier submission is still running; its reply will be discarded.");
                }
                let client = self.client.clone();
                self.in_flight.spawn(async move {
                    let reply = client.submit(&pending.request).await;
                    (pending.ticket, reply)
                });
            }
            Err(e) => info!("Submission not started: {e}"),
        }
        println!("{}", self.workspace.status());
    }

    fn on_reply(&mut self, ticket: SubmissionTicket, reply: Result<AnalysisBatch, ScreenError>) {
        println!();
        match self.workspace.complete_submission(ticket, reply) {
            SubmissionOutcome::Applied { .. } => {
                println!("{}", self.workspace.status());
                self.print_cards();
            }
            SubmissionOutcome::Stale => {
                println!("Discarded the reply to an earlier submission.");
            }
            SubmissionOutcome::Failed => println!("{}", self.workspace.status()),
        }
    }

    async fn export(&self, path: Option<PathBuf>) {
        let csv = match self.workspace.export_csv() {
            Ok(Some(csv)) => csv,
            Ok(None) => {
                println!("Nothing to export yet.");
                return;
            }
            Err(e) => {
                warn!("CSV export failed: {e}");
                println!("{}", e.user_message());
                return;
            }
        };
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE));
        match tokio::fs::write(&path, csv).await {
            Ok(()) => println!(
                "Exported {} result(s) to {}",
                self.workspace.results().len(),
                path.display()
            ),
            Err(e) => {
                warn!("Export to {} failed: {e}", path.display());
                println!("Could not write {}: {e}", path.display());
            }
        }
    }

    fn set_backend(&mut self, url: &str) {
        let client = match AnalysisClient::new(url, self.request_timeout) {
            Ok(client) => client,
            Err(e) => {
                println!("{}", e.user_message());
                return;
            }
        };
        if let Err(e) = self.settings.set_api_base(client.base_url()) {
            warn!("Could not save settings: {e:#}");
            println!("Backend changed for this session only (settings not saved).");
        }
        info!("Backend set to {}", client.base_url());
        println!("Saved. Current backend: {}", client.base_url());
        self.client = client;
    }

    fn print_cards(&self) {
        println!(
            "{}",
            render::cards(&self.workspace.cards(), self.workspace.threshold())
        );
    }

    fn print_jd(&self) {
        let text = self
            .workspace
            .jd_text()
            .map(|t| format!("{} chars of text", t.chars().count()));
        let file = self.workspace.jd_file().map(|f| format!("file {}", f.name));
        match (text, file) {
            (None, None) => println!("Job description: none"),
            (Some(t), None) => println!("Job description: {t}"),
            (None, Some(f)) => println!("Job description: {f}"),
            (Some(t), Some(f)) => println!("Job description: {t} + {f}"),
        }
    }
}

/// A file becomes one candidate; a directory contributes its files, sorted by name,
/// without recursing.
async fn expand(path: &Path) -> Result<Vec<CandidateFile>, ScreenError> {
    let io_error = |source| ScreenError::Io {
        path: path.to_path_buf(),
        source,
    };
    let metadata = tokio::fs::metadata(path).await.map_err(io_error)?;
    if !metadata.is_dir() {
        return Ok(vec![CandidateFile::from_path(path).await?]);
    }

    let mut entries = tokio::fs::read_dir(path).await.map_err(io_error)?;
    let mut paths = Vec::new();
    while let Some(entry) = entries.next_entry().await.map_err(io_error)? {
        if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
            paths.push(entry.path());
        }
    }
    paths.sort();

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(CandidateFile::from_path(&path).await?);
    }
    Ok(files)
}

fn prompt() {
    print!("> ");
    let _ = std::io::stdout().flush();
}

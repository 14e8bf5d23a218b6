//! Line-oriented command parsing for the interactive front end.
//!
//! Each line is tokenized, then parsed by clap in multicall mode: the first word
//! names the command.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::results::Threshold;

/// Resume screener commands
#[derive(Debug, Clone, PartialEq, Parser)]
#[command(
    name = "screener",
    multicall = true,
    subcommand_value_name = "COMMAND",
    subcommand_help_heading = "Commands"
)]
pub enum Command {
    /// Queue resumes (pdf, doc, docx); directories add their files
    Add {
        #[arg(required = true, value_name = "PATH")]
        paths: Vec<PathBuf>,
    },
    /// Remove a queued resume by file name
    #[command(visible_alias = "rm")]
    Remove { name: String },
    /// List queued resumes
    #[command(visible_alias = "ls")]
    Files,
    /// Clear the queue and the results
    Clear,
    /// Set the job description text
    #[command(name = "jd")]
    JdText {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true, value_name = "TEXT")]
        words: Vec<String>,
    },
    /// Attach a job description document
    JdFile { path: PathBuf },
    /// Drop the job description
    JdClear,
    /// Upload the queue for analysis
    #[command(alias = "analyse")]
    Analyze,
    /// Show result cards at or above the filter threshold
    Results,
    /// Set the minimum match score (0-100)
    #[command(alias = "min-score")]
    Filter {
        #[arg(allow_negative_numbers = true)]
        threshold: Threshold,
    },
    /// Show the full profile of one result, by list number or file name
    #[command(visible_alias = "show")]
    Details { selector: String },
    /// Write all results as CSV (default results.csv)
    Export { path: Option<PathBuf> },
    /// Show or set the analysis service URL
    Backend { url: Option<String> },
    /// Check that the analysis service is reachable
    Health,
    /// Show the status line
    Status,
    /// Exit
    #[command(visible_aliases = ["exit", "q"])]
    Quit,
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Unterminated quote")]
    UnterminatedQuote,

    /// Unknown command, bad arguments, or a help request. Displays clap's rendered text.
    #[error("{}", .0.to_string().trim_end())]
    Invalid(#[from] clap::Error),
}

/// Parses one input line. Blank lines yield `None`. Command names are case-insensitive.
pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
    let mut args = split_args(line)?;
    let Some(verb) = args.first_mut() else {
        return Ok(None);
    };
    *verb = verb.to_ascii_lowercase();
    Ok(Some(Command::try_parse_from(args)?))
}

/// Whitespace-separated arguments; double quotes group words.
fn split_args(input: &str) -> Result<Vec<String>, ParseError> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in input.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }
    if in_quotes {
        return Err(ParseError::UnterminatedQuote);
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}

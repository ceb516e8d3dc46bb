//! Console output formatter for chat turns

use super::markdown::render_markdown;
use colored::Colorize;
use promptlog_application::{LogAppendError, LogOrigin, Reply, TurnOutcome};
use promptlog_domain::DomainError;

/// Width of the line printed above each reply.
const SEPARATOR_WIDTH: usize = 37;

/// Formats session output for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Blocks to print for one submitted line, in order.
    ///
    /// Each choice of a successful reply is its own block.
    pub fn format_turn(outcome: &TurnOutcome) -> Vec<String> {
        match outcome {
            TurnOutcome::Skipped => Vec::new(),
            TurnOutcome::Rejected(error) => vec![Self::format_rejection(error)],
            TurnOutcome::Completed(report) => {
                let mut blocks: Vec<String> = match &report.reply {
                    Reply::Choices(texts) => texts.iter().map(|t| Self::format_reply(t)).collect(),
                    Reply::Failed(_) => vec![Self::format_request_failed()],
                };

                if let Err(error) = &report.persistence {
                    blocks.push(Self::format_persistence_warning(error, report.unpersisted));
                }

                blocks
            }
        }
    }

    /// One reply rendered from markdown, under a separator line
    pub fn format_reply(text: &str) -> String {
        format!(
            "{}\n🤖 - {}\n",
            "-".repeat(SEPARATOR_WIDTH),
            render_markdown(text)
        )
    }

    pub fn format_request_failed() -> String {
        "❌ Error with the request, please try again."
            .bright_red()
            .to_string()
    }

    pub fn format_rejection(error: &DomainError) -> String {
        format!("❌ {}", error).bright_red().to_string()
    }

    pub fn format_persistence_warning(error: &LogAppendError, unpersisted: usize) -> String {
        format!(
            "⚠️  {}. History may be incomplete ({} exchange(s) not saved yet).",
            error, unpersisted
        )
        .yellow()
        .to_string()
    }

    pub fn format_prompt_header() -> String {
        "📝 Enter your prompt:".yellow().to_string()
    }

    pub fn format_goodbye() -> String {
        "✅ Goodbye!".green().to_string()
    }

    /// Startup line describing the log in use
    pub fn format_welcome(location: &str, records: usize, origin: LogOrigin) -> String {
        let status = match origin {
            LogOrigin::Created => format!("created {}", location),
            LogOrigin::Repaired => format!("cleared {}", location),
            LogOrigin::Loaded => format!("{} previous exchange(s) in {}", records, location),
        };
        format!("{} {}", "Log:".cyan().bold(), status.dimmed())
    }
}

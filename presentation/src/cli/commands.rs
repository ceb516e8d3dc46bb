//! CLI command definitions

use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for promptlog
#[derive(Parser, Debug)]
#[command(name = "promptlog")]
#[command(author, version, about = "Chat with a completion service and keep a log of every exchange")]
#[command(long_about = r#"
promptlog reads prompts one line at a time, sends each to a chat completion
endpoint and prints the reply. Every exchange (prompt, raw response,
timestamp) is appended to a JSON log file.

Environment:
  OPENAI_API_KEY   Bearer credential (required)
  OPENAI_URL       Completion endpoint (default: OpenAI chat completions)

Configuration files are loaded from (in priority order):
1. --config <path>     Explicit config file
2. ./promptlog.toml    Project-level config
3. ~/.config/promptlog/config.toml   Global config

Press Ctrl-D or Ctrl-C at the prompt to exit.
"#)]
pub struct Cli {
    /// Path of the JSON log file (default: ./logs.json)
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the progress spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

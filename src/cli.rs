use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "sqlpilot")]
#[command(about = "Chat with a store database through an LLM-driven SQL agent", long_about = None)]
pub struct Args {
    #[arg(
        short = 'm',
        long = "model",
        help = "Backing model: gemini-2.5-pro, gemini-2.5-flash, or an Ollama tag such as llama3.2"
    )]
    pub model: Option<String>,

    #[arg(
        long = "db",
        help = "Path to the SQLite database (created and seeded on first run)"
    )]
    pub db_path: Option<PathBuf>,

    #[arg(long = "audit-log", help = "Path to the CSV audit log")]
    pub audit_log: Option<PathBuf>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(
        long = "no-steps",
        help = "Do not print the agent's step-by-step transcript after each answer"
    )]
    pub no_steps: bool,

    #[arg(
        short = 'v',
        long = "verbose",
        help = "Print request and tool diagnostics to stderr"
    )]
    pub verbose: bool,
}

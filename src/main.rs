use std::io;
use std::process;

use clap::Parser;
use colored::*;

use sqlpilot::agent::ChatApiAgent;
use sqlpilot::audit::AuditLog;
use sqlpilot::cli::Args;
use sqlpilot::config::Config;
use sqlpilot::db::Database;
use sqlpilot::session::{ChatSession, GREETING};
use sqlpilot::toolkit::SqlToolkit;
use sqlpilot::turn::{run_turn, TurnOptions};
use sqlpilot::ui;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let db = match Database::bootstrap(&config.db_path) {
        Ok(db) => db,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let toolkit = SqlToolkit::new(db);
    let agent = match ChatApiAgent::new(&config, toolkit) {
        Ok(agent) => agent,
        Err(e) => {
            eprintln!("{} {}", "Error:".red(), e);
            process::exit(1);
        }
    };

    let audit = AuditLog::new(&config.audit_log);
    let options = TurnOptions {
        show_steps: !args.no_steps,
    };
    let mut session = ChatSession::new();
    if config.verbose {
        eprintln!(
            "{}",
            format!(
                "[session] {} started {}",
                session.session_id(),
                session.started_at().format("%Y-%m-%d %H:%M:%S")
            )
            .dimmed()
        );
    }

    ui::print_banner(&config.model, &config.db_path, audit.path());
    ui::print_assistant(GREETING);

    let stdin = io::stdin();
    loop {
        ui::print_prompt();

        let mut line = String::new();
        match stdin.read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                eprintln!("{}", format!("Failed to read input: {}", e).red());
                break;
            }
        }

        let instruction = line.trim();
        if instruction.is_empty() {
            continue;
        }
        if instruction.eq_ignore_ascii_case("exit") || instruction.eq_ignore_ascii_case("quit") {
            break;
        }

        ui::print_thinking();
        run_turn(&agent, &audit, &mut session, instruction, &options).await;
    }

    println!("{}", "Bye.".dimmed());
}

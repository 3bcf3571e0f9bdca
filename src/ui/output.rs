use std::io::{self, Write};
use std::path::Path;

use colored::*;
use terminal_size::{terminal_size, Width};

use super::highlight::Highlighter;
use crate::error::SqlPilotError;
use crate::transcript::DisplayBlock;

const MAX_RULE_WIDTH: usize = 72;

fn rule() -> String {
    let width = terminal_size()
        .map(|(Width(w), _)| w as usize)
        .unwrap_or(MAX_RULE_WIDTH)
        .min(MAX_RULE_WIDTH);
    "─".repeat(width)
}

pub fn print_banner(model: &str, db_path: &Path, audit_log: &Path) {
    println!("{}", "sqlpilot".bold());
    println!(
        "{}",
        format!(
            "model: {}  db: {}  audit: {}",
            model,
            db_path.display(),
            audit_log.display()
        )
        .dimmed()
    );
    println!("{}", "Type a request, or 'exit' to quit.".dimmed());
    println!();
}

pub fn print_prompt() {
    print!("{}", "you> ".green().bold());
    let _ = io::stdout().flush();
}

pub fn print_thinking() {
    println!("{}", "Thinking...".dimmed());
}

/// Print an assistant reply, rendering fenced code blocks with syntax
/// highlighting.
pub fn print_assistant(text: &str) {
    let highlighter = Highlighter::new();
    println!("{}", render_fenced(text, &highlighter).trim_end());
    println!();
}

fn render_fenced(text: &str, highlighter: &Highlighter) -> String {
    let mut out = String::new();
    let mut rest = text;

    while let Some(start) = rest.find("```") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 3..];

        let newline = match after.find('\n') {
            Some(pos) => pos,
            None => {
                // Fence never opens a block; emit the tail as-is.
                out.push_str(&rest[start..]);
                return out;
            }
        };

        let lang_line = after[..newline].trim();
        let lang = if lang_line.is_empty() {
            None
        } else {
            Some(lang_line)
        };
        let body = &after[newline + 1..];

        // An unterminated block runs to the end of the reply.
        let (code, tail) = match body.find("```") {
            Some(end) => (&body[..end], &body[end + 3..]),
            None => (body, ""),
        };

        out.push_str(&format!(
            "{}[{}]{}\n",
            "┌─".dimmed(),
            lang.unwrap_or("code").cyan(),
            "─────────────────────────────────────────────────".dimmed()
        ));
        let mut block = code.to_string();
        if !block.is_empty() && !block.ends_with('\n') {
            block.push('\n');
        }
        out.push_str(&highlighter.highlight(&block, lang));
        out.push_str(&format!(
            "{}\n",
            "└──────────────────────────────────────────────────────────".dimmed()
        ));

        rest = tail;
    }

    out.push_str(rest);
    out
}

/// Print the step-by-step transcript of an agent turn.
pub fn print_transcript(blocks: &[DisplayBlock]) {
    if blocks.is_empty() {
        return;
    }
    let highlighter = Highlighter::new();

    println!("{}", rule().dimmed());
    println!("{}", "Agent steps".cyan().bold());
    for (i, block) in blocks.iter().enumerate() {
        println!("{}", format!("Step {}", i + 1).cyan());
        println!("  {} {}", "thought:".bold(), block.thought);
        println!("  {} {}", "action:".bold(), block.action.yellow());
        if let Some(input) = &block.input {
            if !input.is_empty() {
                println!("  {}", "input:".bold());
                print_indented(&highlighter.highlight_sql(input), 4);
            }
        }
        println!("  {}", "result:".bold());
        print_indented(&block.observation.dimmed().to_string(), 4);
    }
    println!("{}", rule().dimmed());
}

fn print_indented(text: &str, pad: usize) {
    let prefix = " ".repeat(pad);
    for line in text.trim_end().lines() {
        println!("{}{}", prefix, line);
    }
}

pub fn print_turn_error(err: &SqlPilotError) {
    eprintln!("{}", "Something went wrong while the agent was working.".red());
    eprintln!("{}", format!("  {}", err).dimmed());
    eprintln!("{}", "Try again, or rephrase the request.".dimmed());
}

pub fn warn_audit_failure(err: &SqlPilotError) {
    eprintln!(
        "{}",
        format!("Warning: failed to write audit log: {}", err).yellow()
    );
}

//! Reference `OperatorUi` implementation: a plain stdin/stdout console.
//!
//! Not a substitute for a production terminal layer (no colour, no paging,
//! no redraw) — just enough for `inj-bin`'s demo and for anyone wiring this
//! engine into a script that talks to a real TTY.

use core_contracts::OperatorUi;
use std::io::{self, Write};

/// Formats and emits retrieval info lines to stdout, prompts on stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleUi;

impl OperatorUi for ConsoleUi {
    fn read_input(&self, prompt: &str, default: &str) -> String {
        print!("{prompt} ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => default.to_string(),
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    default.to_string()
                } else {
                    trimmed.to_string()
                }
            }
        }
    }

    fn emit_retrieval(&self, resumed: bool, display_value: &str) {
        let now = chrono::Local::now();
        let kind = if resumed { "resumed" } else { "retrieved" };
        print!(
            "[{}] [INFO] {kind}: {display_value}\r\n",
            now.format("%H:%M:%S")
        );
        let _ = io::stdout().flush();
    }
}

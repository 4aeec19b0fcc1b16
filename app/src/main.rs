//! FILENAME: app/src/main.rs
// PURPOSE: Line-oriented entry point for front ends.
// FORMAT: one JSON invocation per stdin line, one JSON reply per stdout line.
//         Log lines go to the configured log file only.

use std::io::{BufRead, Write};

fn main() {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "trivium.json".to_string());

    app_lib::logging::set_console_echo(false);
    let state = match app_lib::run(std::path::Path::new(&config_path)) {
        Ok(state) => state,
        Err(e) => {
            eprintln!("[INIT] {}", e);
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        if line.trim().is_empty() {
            continue;
        }
        let reply = app_lib::invoke::handle_line(&state, &line);
        match serde_json::to_string(&reply) {
            Ok(text) => {
                let _ = writeln!(stdout, "{}", text);
                let _ = stdout.flush();
            }
            Err(e) => eprintln!("[REPLY] {}", e),
        }
    }
}

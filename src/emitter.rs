//! Code Validator & Emitter: duplicate-emission lockout, line formatting,
//! and the append-at-head log sink.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Local;
use log::error;

use crate::dictionary::Dictionary;
use crate::validator::Code;

pub struct Emitter {
    log_path: PathBuf,
    lockout: std::time::Duration,
    last_code: Option<Code>,
    last_emit_time: Option<Instant>,
}

impl Emitter {
    pub fn new(log_path: PathBuf, lockout: std::time::Duration) -> Self {
        Self {
            log_path,
            lockout,
            last_code: None,
            last_emit_time: None,
        }
    }

    /// Emit `code` at time `now` if it passes the duplicate-emission
    /// lockout. Returns the formatted line if an emission happened.
    pub fn emit(&mut self, code: Code, now: Instant, dictionary: &Dictionary) -> Option<String> {
        if !self.should_emit(code, now) {
            return None;
        }

        let line = format_line(code, dictionary);
        println!("{line}");
        if let Err(err) = prepend_line(&self.log_path, &line) {
            error!("failed to write log file '{}': {err}", self.log_path.display());
        }

        self.last_code = Some(code);
        self.last_emit_time = Some(now);
        Some(line)
    }

    fn should_emit(&self, code: Code, now: Instant) -> bool {
        match (self.last_code, self.last_emit_time) {
            (Some(last_code), Some(last_time)) if last_code == code => {
                now.duration_since(last_time) >= self.lockout
            }
            _ => true,
        }
    }
}

fn format_line(code: Code, dictionary: &Dictionary) -> String {
    let now = Local::now();
    let timestamp = now.format("%d/%m/%y %H:%M:%S");
    let code_str = code.as_str();
    match dictionary.lookup(&code_str) {
        Some(entry) => format!("{timestamp} {code_str} ({})", entry.parenthetical()),
        None => format!("{timestamp} {code_str} ()"),
    }
}

/// Insert `line` at the head of the file at `path`, creating it if absent.
///
/// This is a read-all-then-rewrite prepend: O(size) per emission, and the
/// file is briefly empty under a crash mid-write. Acceptable at the
/// emission rate expected here (minutes between codes).
fn prepend_line(path: &Path, line: &str) -> std::io::Result<()> {
    let existing = fs::read_to_string(path).unwrap_or_default();
    let mut contents = String::with_capacity(line.len() + 1 + existing.len());
    contents.push_str(line);
    contents.push('\n');
    contents.push_str(&existing);
    fs::write(path, contents)
}

// src/prompt.rs
// Interactive selection of the URL path each item is mounted under

use crate::mount::{Mount, Target};
use std::io::{self, BufRead, Write};

pub struct MountPrompter<R, W> {
    input: R,
    output: W,
}

impl MountPrompter<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> MountPrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Show the item and its default path, then read one line as an override.
    ///
    /// Blank input, end of input and read errors all keep the default.
    pub fn ask(&mut self, target: Target) -> Mount {
        let default = target.default_pattern();

        let shown = writeln!(self.output, "item: {}", target.path.display())
            .and_then(|_| write!(self.output, "path ({}): ", default))
            .and_then(|_| self.output.flush());
        if let Err(e) = shown {
            log::debug!("Could not write prompt: {}", e);
        }

        let answer = self.read_answer();
        let pattern = answer.as_deref().unwrap_or(&default);
        target.into_mount(pattern)
    }

    fn read_answer(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            Err(e) => {
                log::debug!("Could not read path override: {}", e);
                None
            }
        }
    }
}

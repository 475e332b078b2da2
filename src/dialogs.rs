use crate::domain::ScreenView;
use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

/// Modal dialogs provided by the host UI.
/// Every call blocks until the user answers.
pub trait Dialogs {
    /// Informational message with a single button
    fn alert(&mut self, title: &str, message: &str, ok: &str) -> Result<()>;

    /// Two-button question. True when `accept` was chosen.
    fn confirm(&mut self, title: &str, message: &str, accept: &str, cancel: &str) -> Result<bool>;

    /// Text prompt pre-filled with `initial`. None when cancelled.
    fn prompt(&mut self, title: &str, message: &str, initial: &str) -> Result<Option<String>>;

    /// Screen to show behind the next dialogs. Hosts without a screen ignore it.
    fn show_screen(&mut self, _view: &ScreenView, _selected: usize) {}
}

/// Line-based dialogs for the non-interactive subcommands
pub struct ConsoleDialogs<R, W> {
    input: R,
    output: W,
}

impl ConsoleDialogs<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> ConsoleDialogs<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read answer")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Dialogs for ConsoleDialogs<R, W> {
    fn alert(&mut self, title: &str, message: &str, _ok: &str) -> Result<()> {
        writeln!(self.output, "{}\n{}\n", title, message)?;
        Ok(())
    }

    fn confirm(&mut self, title: &str, message: &str, accept: &str, cancel: &str) -> Result<bool> {
        write!(
            self.output,
            "{}\n{}\n[y] {}  [N] {}: ",
            title, message, accept, cancel
        )?;
        self.output.flush()?;

        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(answer.trim(), "y" | "Y" | "yes" | "Yes"))
    }

    fn prompt(&mut self, title: &str, message: &str, initial: &str) -> Result<Option<String>> {
        write!(self.output, "{}\n{} [{}]: ", title, message, initial)?;
        self.output.flush()?;

        // An empty line keeps the pre-filled value
        Ok(self.read_line()?.map(|answer| {
            if answer.trim().is_empty() {
                initial.to_string()
            } else {
                answer
            }
        }))
    }
}

/// Scripted dialogs for tests
#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;

    #[derive(Debug, Default)]
    pub struct ScriptedDialogs {
        /// Answers for `confirm`, in order. Missing answers decline.
        pub confirms: VecDeque<bool>,
        /// Answers for `prompt`, in order. Missing answers cancel.
        pub prompts: VecDeque<Option<String>>,
        /// (title, message) of every dialog shown
        pub shown: Vec<(String, String)>,
        /// Initial values offered by prompts
        pub prompt_initials: Vec<String>,
        /// Latest screen handed over with `show_screen`
        pub screen: Option<ScreenView>,
        /// Total shown behind each dialog, None before any screen was handed over
        pub backdrop_totals: Vec<Option<usize>>,
    }

    impl ScriptedDialogs {
        pub fn titles(&self) -> Vec<&str> {
            self.shown.iter().map(|(title, _)| title.as_str()).collect()
        }

        fn remember(&mut self, title: &str, message: &str) {
            self.shown.push((title.to_string(), message.to_string()));
            let total = self.screen.as_ref().map(|view| view.summary.total);
            self.backdrop_totals.push(total);
        }
    }

    impl Dialogs for ScriptedDialogs {
        fn alert(&mut self, title: &str, message: &str, _ok: &str) -> Result<()> {
            self.remember(title, message);
            Ok(())
        }

        fn confirm(&mut self, title: &str, message: &str, _accept: &str, _cancel: &str) -> Result<bool> {
            self.remember(title, message);
            Ok(self.confirms.pop_front().unwrap_or(false))
        }

        fn prompt(&mut self, title: &str, message: &str, initial: &str) -> Result<Option<String>> {
            self.remember(title, message);
            self.prompt_initials.push(initial.to_string());
            Ok(self.prompts.pop_front().flatten())
        }

        fn show_screen(&mut self, view: &ScreenView, _selected: usize) {
            self.screen = Some(view.clone());
        }
    }
}

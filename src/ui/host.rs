use crate::dialogs::Dialogs;
use crate::domain::ScreenView;
use crate::input::{handle_alert_key, handle_confirm_key, handle_prompt_key};
use crate::ui::{modal::render_modal, render, Modal};
use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, Terminal};

/// Terminal-backed dialogs. Modals are drawn over the last rendered screen
/// and block until answered.
pub struct TerminalHost<B: Backend> {
    terminal: Terminal<B>,
    backdrop: ScreenView,
    selected: usize,
}

impl<B: Backend> TerminalHost<B> {
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            backdrop: ScreenView::default(),
            selected: 0,
        }
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Draw the main screen and remember it as the backdrop for dialogs
    pub fn draw(&mut self, view: &ScreenView, selected: usize) -> Result<()> {
        if *view != self.backdrop {
            self.backdrop = view.clone();
        }
        self.selected = selected;

        let backdrop = &self.backdrop;
        self.terminal.draw(|f| render(f, backdrop, selected))?;
        Ok(())
    }

    /// Show `modal` until `on_key` produces an answer
    fn run_modal<T>(
        &mut self,
        mut modal: Modal,
        mut on_key: impl FnMut(&mut Modal, KeyEvent) -> Option<T>,
    ) -> Result<T> {
        loop {
            let backdrop = &self.backdrop;
            let selected = self.selected;
            self.terminal.draw(|f| {
                render(f, backdrop, selected);
                let area = f.size();
                render_modal(f, &modal, area);
            })?;

            if let Event::Key(key) = event::read()? {
                // Only process key press events (ignore key release)
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if let Some(answer) = on_key(&mut modal, key) {
                    return Ok(answer);
                }
            }
        }
    }
}

impl<B: Backend> Dialogs for TerminalHost<B> {
    fn alert(&mut self, title: &str, message: &str, ok: &str) -> Result<()> {
        let modal = Modal::Alert {
            title: title.to_string(),
            message: message.to_string(),
            ok: ok.to_string(),
        };
        self.run_modal(modal, |_, key| handle_alert_key(key).then_some(()))
    }

    fn confirm(&mut self, title: &str, message: &str, accept: &str, cancel: &str) -> Result<bool> {
        let modal = Modal::Confirm {
            title: title.to_string(),
            message: message.to_string(),
            accept: accept.to_string(),
            cancel: cancel.to_string(),
        };
        self.run_modal(modal, |_, key| handle_confirm_key(key))
    }

    fn prompt(&mut self, title: &str, message: &str, initial: &str) -> Result<Option<String>> {
        let modal = Modal::Prompt {
            title: title.to_string(),
            message: message.to_string(),
            input: initial.to_string(),
        };
        self.run_modal(modal, |modal, key| match modal {
            Modal::Prompt { input, .. } => handle_prompt_key(input, key),
            _ => Some(None),
        })
    }

    fn show_screen(&mut self, view: &ScreenView, selected: usize) {
        self.backdrop = view.clone();
        self.selected = selected;
    }
}

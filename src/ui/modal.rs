use crate::ui::{
    layout::create_modal_area,
    styles::{modal_bg_style, modal_title_style},
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

/// A dialog currently on screen
#[derive(Debug, Clone, PartialEq)]
pub enum Modal {
    Alert {
        title: String,
        message: String,
        ok: String,
    },
    Confirm {
        title: String,
        message: String,
        accept: String,
        cancel: String,
    },
    Prompt {
        title: String,
        message: String,
        input: String,
    },
}

impl Modal {
    fn title(&self) -> &str {
        match self {
            Modal::Alert { title, .. } | Modal::Confirm { title, .. } | Modal::Prompt { title, .. } => title,
        }
    }

    fn message(&self) -> &str {
        match self {
            Modal::Alert { message, .. }
            | Modal::Confirm { message, .. }
            | Modal::Prompt { message, .. } => message,
        }
    }
}

/// Render a modal over `area`
pub fn render_modal(f: &mut Frame, modal: &Modal, area: Rect) {
    let modal_area = create_modal_area(area);

    // Clear the area behind the modal
    f.render_widget(Clear, modal_area);

    let paragraph = Paragraph::new(modal_lines(modal))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(format!(" {} ", modal.title()), modal_title_style()))
                .style(modal_bg_style()),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, modal_area);
}

fn modal_lines(modal: &Modal) -> Vec<Line<'static>> {
    let mut lines = vec![Line::raw("")];
    for text in modal.message().lines() {
        lines.push(Line::raw(format!("  {}", text)));
    }
    lines.push(Line::raw(""));

    match modal {
        Modal::Alert { ok, .. } => {
            lines.push(Line::from(vec![
                Span::styled("  [Enter]", modal_title_style()),
                Span::raw(format!(" {}", ok)),
            ]));
        }
        Modal::Confirm { accept, cancel, .. } => {
            lines.push(Line::from(vec![
                Span::styled("  [y]", modal_title_style()),
                Span::raw(format!(" {}  ", accept)),
                Span::styled("[n]", modal_title_style()),
                Span::raw(format!(" {}", cancel)),
            ]));
        }
        Modal::Prompt { input, .. } => {
            lines.push(Line::from(vec![
                Span::raw("  > "),
                Span::styled(input.clone(), modal_title_style()),
                Span::styled("█", modal_title_style()), // Cursor
            ]));
            lines.push(Line::raw(""));
            lines.push(Line::raw("  Enter to submit  ·  Esc to cancel"));
        }
    }

    lines
}

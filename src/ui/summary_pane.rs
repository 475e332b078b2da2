use crate::domain::{NextReminder, Summary};
use crate::ui::styles::{border_style, default_style, overdue_style, title_style, upcoming_style};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the summary labels
pub fn render_summary_pane(f: &mut Frame, summary: &Summary, area: Rect) {
    let paragraph = Paragraph::new(summary_lines(summary)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style())
            .title(Span::styled(" Minoxidil Tracker 💧 ", title_style())),
    );

    f.render_widget(paragraph, area);
}

fn summary_lines(summary: &Summary) -> Vec<Line<'static>> {
    let reminder_style = match summary.next_reminder {
        NextReminder::Overdue => overdue_style(),
        NextReminder::At(_) => upcoming_style(),
        NextReminder::NotApplicable => default_style(),
    };

    vec![
        Line::from(Span::styled(summary.total_label(), default_style())),
        Line::from(Span::styled(summary.today_label(), default_style())),
        Line::from(Span::styled(summary.last_application_label(), default_style())),
        Line::from(Span::styled(summary.next_reminder_label(), reminder_style)),
    ]
}

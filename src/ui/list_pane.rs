use crate::domain::RecordRow;
use crate::ui::styles::{border_style, default_style, hint_style, selected_style, title_style};
use ratatui::{
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

/// Render the record list, newest first
pub fn render_list_pane(f: &mut Frame, rows: &[RecordRow], selected: usize, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(" Applications ", title_style()));

    if rows.is_empty() {
        let empty = List::new(vec![ListItem::new("  No applications yet. Press r to record one.")
            .style(hint_style())])
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| ListItem::new(format!("  {}", row.text)).style(default_style()))
        .collect();

    let list = List::new(items).block(block).highlight_style(selected_style());

    // Scroll so the selection stays visible
    let mut state = ListState::default().with_selected(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

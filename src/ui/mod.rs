pub mod host;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;
pub mod summary_pane;

use crate::domain::ScreenView;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use ratatui::Frame;
use summary_pane::render_summary_pane;

pub use host::TerminalHost;
pub use modal::Modal;

/// Main render function - draws the entire screen
pub fn render(f: &mut Frame, view: &ScreenView, selected: usize) {
    let layout = create_layout(f.size());

    render_keybindings(f, layout.keybindings_area);
    render_summary_pane(f, &view.summary, layout.summary_area);
    render_list_pane(f, &view.rows, selected, layout.list_area);
}

use crate::app::AppState;
use crate::domain::{Tab, UiMode};
use crate::ui::styles::hint_style;
use ratatui::{layout::Rect, text::Line, widgets::Paragraph, Frame};

/// Hints for the current screen and mode
pub fn hints(app: &AppState) -> &'static str {
    match app.ui_mode {
        UiMode::Editing => " type item name   Enter add   Esc cancel",
        UiMode::ConfirmDelete => " y delete   n/Esc cancel",
        UiMode::History => " ↑/↓ scroll   r refresh   Esc/h back   q quit",
        UiMode::Normal => match app.tab {
            Tab::ShoppingList => {
                " ↑/↓ select   a add   Enter/Space toggle   x delete   Tab switch   q quit"
            }
            Tab::Counter => " Enter done the thing   h history   Tab switch   q quit",
            Tab::Idea => " Tab switch   q quit",
        },
    }
}

/// Render the keybindings hint bar
pub fn render_keybindings(f: &mut Frame, app: &AppState, area: Rect) {
    let paragraph = Paragraph::new(Line::raw(hints(app))).style(hint_style());
    f.render_widget(paragraph, area);
}

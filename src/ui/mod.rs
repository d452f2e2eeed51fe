pub mod counter_pane;
pub mod history_pane;
pub mod idea_pane;
pub mod keybindings;
pub mod layout;
pub mod list_pane;
pub mod modal;
pub mod styles;

use crate::app::AppState;
use crate::domain::{Signal, Tab, UiMode};
use counter_pane::render_counter_pane;
use history_pane::render_history_pane;
use idea_pane::render_idea_pane;
use keybindings::render_keybindings;
use layout::create_layout;
use list_pane::render_list_pane;
use modal::render_confirm_delete_modal;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};
use std::time::Instant;
use styles::{
    border_style, error_style, hint_style, impact_flash_style, selected_style,
    success_flash_style,
};

/// Main render function - draws the entire UI
pub fn render(f: &mut Frame, app: &AppState) {
    let size = f.size();
    let layout = create_layout(size);

    render_tabs(f, app, layout.tabs_area);

    match app.tab {
        Tab::ShoppingList => render_list_pane(f, app, layout.content_area),
        Tab::Counter if app.ui_mode == UiMode::History => {
            render_history_pane(f, app, layout.content_area)
        }
        Tab::Counter => render_counter_pane(f, app, layout.content_area),
        Tab::Idea => render_idea_pane(f, layout.content_area),
    }

    render_status_line(f, app, layout.status_area);
    render_keybindings(f, app, layout.keybindings_area);

    // Confirmation prompt goes on top of everything
    render_confirm_delete_modal(f, app, size);
}

fn render_tabs(f: &mut Frame, app: &AppState, area: Rect) {
    let titles: Vec<Line> = Tab::all().iter().map(|tab| Line::raw(tab.title())).collect();
    let selected = Tab::all().iter().position(|tab| *tab == app.tab).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .highlight_style(selected_style())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(" Taskly "),
        );
    f.render_widget(tabs, area);
}

fn render_status_line(f: &mut Frame, app: &AppState, area: Rect) {
    let line = if let Some(signal) = app.active_signal(Instant::now()) {
        match signal {
            Signal::Success => Line::from(Span::styled(" ✓ Done! ", success_flash_style())),
            Signal::Impact => Line::from(Span::styled(" • Updated ", impact_flash_style())),
        }
    } else if let Some(message) = &app.message {
        Line::from(Span::styled(format!(" {}", message), error_style()))
    } else {
        let pending = app.pending_reminders();
        let text = match pending {
            0 => " No reminder scheduled".to_string(),
            1 => " 1 reminder scheduled".to_string(),
            n => format!(" {} reminders scheduled", n),
        };
        Line::from(Span::styled(text, hint_style()))
    };

    f.render_widget(Paragraph::new(line), area);
}

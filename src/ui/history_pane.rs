use crate::app::AppState;
use crate::ui::styles::{border_style, default_style, title_style};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Render the completion history
pub fn render_history_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let count = app.history.as_ref().map_or(0, |h| h.len());

    let title = if app.history_scroll_offset > 0 {
        format!(" History ({}) [scrolled +{}] ", count, app.history_scroll_offset)
    } else {
        format!(" History ({}) ", count)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(title, title_style()));

    let Some(history) = app.history.as_ref().filter(|h| !h.is_empty()) else {
        let paragraph = Paragraph::new(Line::raw("No History"))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, area);
        return;
    };

    let items: Vec<ListItem> = history
        .formatted_local()
        .skip(app.history_scroll_offset)
        .take(area.height as usize)
        .map(|entry| ListItem::new(Line::raw(format!(" {}", entry))).style(default_style()))
        .collect();

    f.render_widget(List::new(items).block(block), area);
}

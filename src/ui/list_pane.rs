use crate::app::AppState;
use crate::domain::{ShoppingItem, UiMode};
use crate::ui::layout::split_shopping;
use crate::ui::styles::{
    active_border_style, border_style, completed_style, default_style, done_style, hint_style,
    selected_style, title_style,
};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const EMPTY_MESSAGE: &str = "Your shopping list is empty";
const PLACEHOLDER: &str = "EX: Coffee";

/// Create a single line for a shopping item
/// Format: ○ Coffee   /   ✓ Coffee (struck through)
fn create_item_line(item: &ShoppingItem) -> Line<'static> {
    if item.is_completed() {
        Line::from(vec![
            Span::styled("✓ ".to_string(), done_style()),
            Span::styled(item.name.clone(), completed_style()),
        ])
    } else {
        Line::from(vec![
            Span::raw("○ ".to_string()),
            Span::raw(item.name.clone()),
        ])
    }
}

fn render_input(f: &mut Frame, app: &AppState, area: Rect) {
    let editing = app.ui_mode == UiMode::Editing;

    let line = if app.input.is_empty() && !editing {
        Line::from(Span::styled(PLACEHOLDER, hint_style()))
    } else if editing {
        Line::from(vec![Span::raw(app.input.clone()), Span::raw("▏")])
    } else {
        Line::raw(app.input.clone())
    };

    let border = if editing {
        active_border_style()
    } else {
        border_style()
    };

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" New item "),
    );
    f.render_widget(paragraph, area);
}

/// Render the shopping list screen
pub fn render_list_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let (input_area, list_area) = split_shopping(area);
    render_input(f, app, input_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style())
        .title(Span::styled(
            format!(" Shopping List ({}) ", app.shopping.len()),
            title_style(),
        ));

    if app.shopping.is_empty() {
        let paragraph = Paragraph::new(Line::raw(EMPTY_MESSAGE))
            .alignment(ratatui::layout::Alignment::Center)
            .block(block);
        f.render_widget(paragraph, list_area);
        return;
    }

    let items: Vec<ListItem> = app
        .shopping
        .items()
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            let style = if idx == app.selected_index {
                selected_style()
            } else {
                default_style()
            };
            ListItem::new(create_item_line(item)).style(style)
        })
        .collect();

    f.render_widget(List::new(items).block(block), list_area);
}

use crate::app::AppState;
use crate::domain::history::format_timestamp;
use crate::domain::{CountdownStatus, DurationParts};
use crate::ui::styles::{border_style, hint_style, overdue_style, segment_style, title_style};
use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const SEGMENT_WIDTH: usize = 9;

/// "Thing Due In..." or "Thing Overdue By..."
pub fn headline(status: &CountdownStatus) -> &'static str {
    if status.is_overdue {
        "Thing Overdue By..."
    } else {
        "Thing Due In..."
    }
}

/// Label of the completion action
pub fn action_label(status: &CountdownStatus) -> &'static str {
    if status.is_overdue {
        "I'VE DONE THE THING!"
    } else {
        "SCHEDULE NOTIFICATION"
    }
}

/// Numbers row and units row, each segment centered in a fixed width
fn segment_lines(distance: &DurationParts) -> (Line<'static>, Line<'static>) {
    let segments = [
        (distance.days, "Days"),
        (distance.hours, "Hours"),
        (distance.minutes, "Minutes"),
        (distance.seconds, "Seconds"),
    ];

    let numbers: Vec<Span> = segments
        .iter()
        .map(|(value, _)| {
            Span::styled(
                format!("{:^width$}", value, width = SEGMENT_WIDTH),
                segment_style(),
            )
        })
        .collect();
    let units: Vec<Span> = segments
        .iter()
        .map(|(_, unit)| Span::raw(format!("{:^width$}", unit, width = SEGMENT_WIDTH)))
        .collect();

    (Line::from(numbers), Line::from(units))
}

/// Render the counter screen
pub fn render_counter_pane(f: &mut Frame, app: &AppState, area: Rect) {
    let status = &app.status;
    let (numbers, units) = segment_lines(&status.distance);

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(headline(status), title_style())),
        Line::raw(""),
        numbers,
        units,
        Line::raw(""),
        Line::from(Span::styled(
            format!("[ {} ]", action_label(status)),
            segment_style(),
        )),
        Line::raw(""),
    ];

    match app.countdown.last_completed() {
        Some(ts) => lines.push(Line::from(Span::styled(
            format!(
                "Last done {} ({} total)",
                format_timestamp(ts, &Local),
                app.countdown.state().completed_at_time_stamps.len()
            ),
            hint_style(),
        ))),
        None => lines.push(Line::from(Span::styled("Never done", hint_style()))),
    }

    let style = if status.is_overdue {
        overdue_style()
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style())
                .title(Span::styled(" Counter ", title_style())),
        );
    f.render_widget(paragraph, area);
}

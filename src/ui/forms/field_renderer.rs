//! Field rendering utilities for forms

use crate::state::{FieldValue, FormField};
use crate::validation::Service;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows a field needs, borders included
pub fn field_height(field: &FormField) -> u16 {
    match field.value {
        FieldValue::Choices { .. } => Service::ALL.len() as u16 + 2,
        _ => 3,
    }
}

/// Draw a form field, with its validation error (if any) in the bottom border
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let content = match &field.value {
        FieldValue::Text(_) => text_content(field, is_active),
        FieldValue::Choices { selected, cursor } => {
            let lines: Vec<Line> = Service::ALL
                .iter()
                .enumerate()
                .map(|(idx, service)| {
                    let mark = if selected.contains(service) { "[x]" } else { "[ ]" };
                    let style = if is_active && idx == *cursor {
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    Line::from(Span::styled(format!("{mark} {}", service.label()), style))
                })
                .collect();
            Paragraph::new(lines)
        }
        FieldValue::Toggle(on) => {
            let mark = if *on { "[x]" } else { "[ ]" };
            let style = if is_active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            Paragraph::new(Line::from(Span::styled(
                format!("{mark} {}", field.label),
                style,
            )))
        }
    };

    let title = match field.value {
        FieldValue::Toggle(_) => " Terms ".to_string(),
        _ => format!(" {} ", field.label),
    };
    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn text_content(field: &FormField, is_active: bool) -> Paragraph<'static> {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    let cursor = if is_active { "▌" } else { "" };

    Paragraph::new(Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]))
}

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

use crate::conversation::{Message, Role};

const TYPING_FRAMES: [&str; 3] = ["·", "··", "···"];

/// Renders one message as bubble lines for the chat pane. User bubbles
/// are nudged right; system notices render as a single dim line with
/// no frame around them.
pub fn render_message(message: &Message, area: Rect, frame_idx: usize) -> Vec<Line<'static>> {
    if message.role == Role::System {
        return vec![Line::from(Span::styled(
            message.text.clone(),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ))];
    }

    let style = base_style(message);
    let indent = indent_for(message.role);
    let mut lines = Vec::new();

    let label = match message.role {
        Role::User => "You",
        _ => "AI",
    };
    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─ ".to_string(), style),
        Span::styled(label.to_string(), style.add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" {}", message.timestamp.format("%H:%M")),
            style.add_modifier(Modifier::DIM),
        ),
    ]));

    if message.is_typing {
        let dots = TYPING_FRAMES[frame_idx % TYPING_FRAMES.len()];
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(dots.to_string(), style.add_modifier(Modifier::DIM)),
        ]));
    } else {
        let wrap_width = (area.width as usize).saturating_sub(4).max(1);
        for text_line in message.text.lines() {
            if text_line.is_empty() {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│".to_string(), style),
                ]));
                continue;
            }
            for wrapped in wrap(text_line, wrap_width) {
                lines.push(Line::from(vec![
                    Span::styled(indent.to_string(), style),
                    Span::styled("│ ".to_string(), style),
                    Span::styled(wrapped.to_string(), style),
                ]));
            }
        }
    }

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));

    lines
}

fn base_style(message: &Message) -> Style {
    match message.role {
        Role::User => Style::default().fg(Color::Rgb(255, 223, 128)),
        Role::Assistant if message.text.starts_with("Error: ") => {
            Style::default().fg(Color::Red)
        }
        Role::Assistant => Style::default().fg(Color::Rgb(144, 238, 144)),
        Role::System => Style::default().fg(Color::DarkGray),
    }
}

fn indent_for(role: Role) -> &'static str {
    match role {
        Role::User => "  ",
        _ => "",
    }
}

use crate::app::App;
use crate::chat_message::render_message;
use crate::prompts::QUICK_PROMPTS;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

pub fn draw_chat(f: &mut Frame, app: &mut App, area: Rect) {
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(area);

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_messages(f, app, chat_vertical_chunks[0]);

    app.status_indicator.update_spinner();
    app.status_indicator
        .render(f, chat_vertical_chunks[1], app.session.in_flight());

    draw_input(f, app, chat_vertical_chunks[2]);

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(QUICK_PROMPTS.len() as u16 + 2),
            Constraint::Min(1),
        ])
        .split(horizontal_chunks[1]);

    draw_prompts(f, side_chunks[0]);
    draw_logs(f, app, side_chunks[1]);
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    let frame_idx = app.status_indicator.frame_index();
    let mut lines = Vec::new();
    for message in app.session.conversation().messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area, frame_idx));
    }

    let total_lines = lines.len() as u16;
    let max_scroll = total_lines.saturating_sub(area.height);
    if app.stick_to_bottom {
        app.chat_scroll = max_scroll;
    } else if app.chat_scroll >= max_scroll {
        // Scrolled back down to the end, follow new messages again
        app.chat_scroll = max_scroll;
        app.stick_to_bottom = true;
    }

    let msgs_para = Paragraph::new(lines)
        .style(Style::default())
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(msgs_para.scroll((app.chat_scroll, 0)), area);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    // Two separator rows plus the text line
    if area.height < 3 {
        return;
    }

    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    // History browsing gets its own prefix so the mode is visible
    let prefix = if app.command_index.is_some() {
        "⌃ "
    } else {
        "→ "
    };

    let prefix_style = if app.command_index.is_some() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display: String = app.input.replace('\n', "⏎");
    let input = Line::from(vec![
        Span::styled(prefix, prefix_style),
        Span::styled(display.clone(), Style::default().fg(Color::White)),
    ]);

    let visible_width = area.width.saturating_sub(2);
    let text_width = display.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        },
    );

    if let Some(index) = app.command_index {
        let history_text = format!(" [Ctrl History {}/{}] ", index + 1, app.command_history.len());
        let indicator_width = history_text.len() as u16;
        let indicator_x = area.x + area.width.saturating_sub(indicator_width);

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                history_text,
                Style::default().fg(Color::Yellow).bg(Color::Black),
            ))),
            Rect {
                x: indicator_x,
                y: area.y + 1,
                width: indicator_width,
                height: 1,
            },
        );
    }

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    let cursor_x = (area.x + 2 + text_width.saturating_sub(scroll_offset))
        .min(area.x + area.width.saturating_sub(1));
    f.set_cursor_position((cursor_x, area.y + 1));
}

fn draw_prompts(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Prompts ")
        .style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines: Vec<Line> = QUICK_PROMPTS
        .iter()
        .enumerate()
        .map(|(i, prompt)| {
            Line::from(vec![
                Span::styled(format!("F{} ", i + 1), Style::default().fg(Color::Yellow)),
                Span::styled(prompt.label, Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_logs(f: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Activity ")
        .style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let log_lines: Vec<Line> = app
        .logs
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.clone()),
            ])
        })
        .collect();

    // Offset counts back from the live end; zero follows new entries
    let max_scroll = (log_lines.len() as u16).saturating_sub(inner.height);
    app.logs.scroll_offset = app.logs.scroll_offset.min(max_scroll);
    let logs_scroll = max_scroll - app.logs.scroll_offset;

    let logs_para = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_para.scroll((logs_scroll, 0)), inner);
}

#[cfg(test)]
mod tests {
    use crate::app::{App, AppScreen};
    use crate::config::Config;
    use crate::ui::ui;
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_draw_survives_short_terminals() {
        let mut app = App::new(&Config::default());
        for (width, height) in [(40, 6), (12, 4), (5, 2), (1, 1)] {
            let backend = TestBackend::new(width, height);
            let mut terminal = Terminal::new(backend).unwrap();
            terminal.draw(|f| ui(f, &mut app)).unwrap();
        }

        app.screen = AppScreen::QuitConfirm;
        let backend = TestBackend::new(40, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();
    }

    #[test]
    fn test_full_size_draw_shows_input_and_prompts() {
        let mut app = App::new(&Config::default());
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        let text = rendered_text(&terminal);
        assert!(text.contains("→"));
        assert!(text.contains("Prompts"));
        assert!(text.contains("Activity"));
    }

    #[test]
    fn test_activity_scroll_is_clamped_at_draw() {
        let mut app = App::new(&Config::default());
        app.logs.scroll_offset = 999;

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, &mut app)).unwrap();

        assert_eq!(app.logs.scroll_offset, 0);
    }
}

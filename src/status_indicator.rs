use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const DOT_FRAMES: [&str; 3] = ["·  ", "·· ", "···"];

/// One-line activity readout under the conversation. Animates typing
/// dots while replies are pending and shows how many are in flight
/// when sends overlap.
#[derive(Debug)]
pub struct StatusIndicator {
    thinking: bool,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            thinking: false,
            status_text: String::new(),
            spinner_idx: 0,
        }
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }

    pub fn clear_status(&mut self) {
        self.status_text.clear();
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    /// Current animation frame, shared with the typing placeholder in
    /// the message pane so both pulse in step.
    pub fn frame_index(&self) -> usize {
        self.spinner_idx
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, in_flight: usize) {
        let dots = if self.thinking {
            DOT_FRAMES[self.spinner_idx % DOT_FRAMES.len()]
        } else {
            "   "
        };

        let status_text = if !self.status_text.is_empty() {
            self.status_text.clone()
        } else if self.thinking {
            "Waiting for reply...".to_string()
        } else {
            String::new()
        };

        let mut spans = vec![
            Span::styled(dots, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(status_text, Style::default().fg(Color::DarkGray)),
        ];

        if in_flight > 1 {
            spans.push(Span::styled(
                format!(" ({} in flight)", in_flight),
                Style::default().fg(Color::Yellow),
            ));
        }

        frame.render_widget(
            Paragraph::new(Line::from(spans)).alignment(ratatui::layout::Alignment::Left),
            Rect {
                x: area.x,
                y: area.y + 1,
                width: area.width,
                height: 1,
            },
        );
    }
}

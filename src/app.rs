use crate::api::ReplyClient;
use crate::config::Config;
use crate::controller::{ChatOptions, ChatSession};
use crate::log_view::LogView;
use crate::status_indicator::StatusIndicator;

const HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Chat,
    QuitConfirm,
}

/// Shared application state. Lives behind an async mutex; the draw
/// loop and the spawned send tasks both lock it.
pub struct App {
    pub screen: AppScreen,
    pub session: ChatSession,
    pub client: ReplyClient,
    pub input: String,
    pub command_history: Vec<String>,
    pub command_index: Option<usize>,
    pub chat_scroll: u16,
    pub stick_to_bottom: bool,
    pub logs: LogView,
    pub status_indicator: StatusIndicator,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config) -> App {
        let mut logs = LogView::new();
        logs.add(format!("Ready. Reply server at {}", config.endpoint));

        App {
            screen: AppScreen::Chat,
            session: ChatSession::new(ChatOptions::from_config(config)),
            client: ReplyClient::new(config.endpoint.clone()),
            input: String::new(),
            command_history: Vec::new(),
            command_index: None,
            chat_scroll: 0,
            stick_to_bottom: true,
            logs,
            status_indicator: StatusIndicator::new(),
            should_quit: false,
        }
    }

    pub fn scroll_up(&mut self) {
        self.stick_to_bottom = false;
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    /// Records a sent message for Ctrl+Up/Down recall. Consecutive
    /// repeats collapse into one entry.
    pub fn push_history(&mut self, entry: &str) {
        if self.command_history.last().map(String::as_str) != Some(entry) {
            self.command_history.push(entry.to_string());
        }
        if self.command_history.len() > HISTORY_LIMIT {
            self.command_history.remove(0);
        }
        self.command_index = None;
    }

    pub fn history_prev(&mut self) {
        if self.command_history.is_empty() {
            return;
        }
        let index = match self.command_index {
            None => self.command_history.len() - 1,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.command_index = Some(index);
        self.input = self.command_history[index].clone();
    }

    /// Steps forward; walking past the newest entry leaves browsing
    /// mode with an empty input box.
    pub fn history_next(&mut self) {
        match self.command_index {
            None => {}
            Some(i) if i + 1 < self.command_history.len() => {
                self.command_index = Some(i + 1);
                self.input = self.command_history[i + 1].clone();
            }
            Some(_) => {
                self.command_index = None;
                self.input.clear();
            }
        }
    }

    /// Any editing keystroke leaves history browsing mode.
    pub fn reset_history_cursor(&mut self) {
        self.command_index = None;
    }
}

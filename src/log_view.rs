use chrono::Local;

const MAX_ENTRIES: usize = 200;

/// In-app activity feed shown beside the conversation. Entries are
/// timestamped on arrival and the oldest are dropped past the cap.
/// `scroll_offset` is measured from the live end; at zero the pane
/// follows new entries.
#[derive(Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
    pub scroll_offset: u16,
}

impl LogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        let stamped = format!("[{}] {}", Local::now().format("%H:%M:%S"), entry.into());
        self.entries.push(stamped);
        if self.entries.len() > MAX_ENTRIES {
            self.entries.remove(0);
        }
    }

    /// One entry toward the oldest retained line. The draw side clamps
    /// the offset to what the backlog actually holds.
    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }
}

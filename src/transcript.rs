// src/transcript.rs
//
// Writes the conversation out as a standalone HTML page. All message
// text flows through the markup pipeline, so a transcript is safe to
// open in a browser no matter what the server sent back.

use std::fs;
use std::path::Path;

use crate::conversation::Conversation;
use crate::errors::ConfabResult;
use crate::markup;

const TRANSCRIPT_CSS: &str = "\
body { font-family: sans-serif; background: #f6f7f9; margin: 2rem; }
.chat { max-width: 46rem; margin: 0 auto; }
.msg { margin: 0.75rem 0; }
.msg .stamp { color: #8a8f98; font-size: 0.75rem; margin-right: 0.5rem; }
.msg .bubble { display: inline-block; padding: 0.5rem 0.75rem; border-radius: 0.5rem; }
.msg.user .bubble { background: #2563eb; color: #fff; }
.msg.assistant .bubble { background: #fff; border: 1px solid #e3e5e8; }
.msg.system .bubble { background: transparent; color: #6b7280; font-style: italic; }
";

/// Renders the conversation to an HTML document. With `sanitize` set,
/// text gets the full markup treatment (links, break tags); without
/// it, text is escaped and nothing more.
pub fn render_transcript(conversation: &Conversation, sanitize: bool) -> String {
    let mut html = String::new();
    html.push_str("<!doctype html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>confab transcript</title>\n<style>\n");
    html.push_str(TRANSCRIPT_CSS);
    html.push_str("</style>\n</head>\n<body>\n<main class=\"chat\">\n");

    for message in conversation.messages() {
        // Pending placeholders are a live-view affair
        if message.is_typing {
            continue;
        }

        let body = if sanitize {
            markup::render_markup(&message.text)
        } else {
            markup::escape_html(&message.text)
        };

        html.push_str(&format!(
            "<div class=\"msg {}\"><span class=\"stamp\">{}</span><div class=\"bubble\">{}</div></div>\n",
            message.role.as_str(),
            message.timestamp.format("%H:%M"),
            body
        ));
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

pub fn export_transcript(
    conversation: &Conversation,
    sanitize: bool,
    path: &Path,
) -> ConfabResult<()> {
    fs::write(path, render_transcript(conversation, sanitize))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Message;

    #[test]
    fn test_typing_placeholders_are_skipped() {
        let mut conversation = Conversation::new();
        conversation.append(Message::user("hello"));
        conversation.append(Message::typing_placeholder());

        let html = render_transcript(&conversation, true);
        assert_eq!(html.matches("class=\"msg ").count(), 1);
    }

    #[test]
    fn test_message_text_is_escaped() {
        let mut conversation = Conversation::new();
        conversation.append(Message::assistant("<b>bold</b> & more"));

        let html = render_transcript(&conversation, true);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt; &amp; more"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn test_sanitized_mode_links_urls() {
        let mut conversation = Conversation::new();
        conversation.append(Message::assistant("see https://docs.rs today"));

        let html = render_transcript(&conversation, true);
        assert!(html.contains("<a href=\"https://docs.rs\""));
    }

    #[test]
    fn test_plain_mode_escapes_but_adds_nothing() {
        let mut conversation = Conversation::new();
        conversation.append(Message::assistant("<x> https://docs.rs line\nbreak"));

        let html = render_transcript(&conversation, false);
        assert!(html.contains("&lt;x&gt;"));
        assert!(!html.contains("<a href"));
        assert!(!html.contains("<br/>"));
    }

    #[test]
    fn test_role_classes_are_emitted() {
        let mut conversation = Conversation::new();
        conversation.append(Message::system("sys"));
        conversation.append(Message::user("usr"));
        conversation.append(Message::assistant("asst"));

        let html = render_transcript(&conversation, true);
        assert!(html.contains("class=\"msg system\""));
        assert!(html.contains("class=\"msg user\""));
        assert!(html.contains("class=\"msg assistant\""));
    }

    #[test]
    fn test_export_writes_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transcript.html");

        let mut conversation = Conversation::new();
        conversation.append(Message::user("hello"));
        export_transcript(&conversation, true, &path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("<!doctype html>"));
        assert!(written.ends_with("</html>\n"));
    }
}

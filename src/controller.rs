// src/controller.rs
//
// Message lifecycle for one conversation. A send is two halves:
// begin_send applies the optimistic updates and hands back a ticket,
// complete_send reconciles the outcome against that ticket. The
// network call happens between the two, outside any lock.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::app::App;
use crate::config::Config;
use crate::conversation::{Conversation, Message, MessageId};
use crate::errors::ConfabResult;

pub const WELCOME_BANNER: &str = "Welcome — ask anything or try a prompt below.";

/// Behavior toggles for a chat session.
#[derive(Debug, Clone, Copy)]
pub struct ChatOptions {
    /// Show an animated placeholder while a reply is pending.
    pub show_typing_indicator: bool,
    /// Enrich transcript output with links and explicit line breaks.
    /// Escaping is not optional and happens in every mode.
    pub sanitize_output: bool,
}

impl Default for ChatOptions {
    fn default() -> Self {
        Self {
            show_typing_indicator: true,
            sanitize_output: true,
        }
    }
}

impl ChatOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            show_typing_indicator: config.show_typing_indicator,
            sanitize_output: config.sanitize_output,
        }
    }
}

/// Claim on an in-flight send: the trimmed text that went out and the
/// placeholder to reconcile once the outcome arrives.
#[derive(Debug)]
pub struct SendTicket {
    text: String,
    placeholder: Option<MessageId>,
}

impl SendTicket {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn placeholder(&self) -> Option<MessageId> {
        self.placeholder
    }
}

#[derive(Debug)]
pub struct ChatSession {
    conversation: Conversation,
    options: ChatOptions,
    in_flight: usize,
}

impl ChatSession {
    pub fn new(options: ChatOptions) -> Self {
        let mut conversation = Conversation::new();
        conversation.append(Message::system(WELCOME_BANNER));
        ChatSession {
            conversation,
            options,
            in_flight: 0,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn options(&self) -> ChatOptions {
        self.options
    }

    /// True while at least one send is awaiting its reply.
    pub fn is_sending(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Starts a send: appends the user message, then the typing
    /// placeholder when enabled. Returns None for input that trims to
    /// empty, leaving the session untouched.
    pub fn begin_send(&mut self, raw_input: &str) -> Option<SendTicket> {
        let text = raw_input.trim();
        if text.is_empty() {
            return None;
        }

        self.conversation.append(Message::user(text));

        let placeholder = if self.options.show_typing_indicator {
            let placeholder = Message::typing_placeholder();
            let id = placeholder.id;
            self.conversation.append(placeholder);
            Some(id)
        } else {
            None
        };

        self.in_flight += 1;

        Some(SendTicket {
            text: text.to_string(),
            placeholder,
        })
    }

    /// Finishes a send. The reply, or the failure dressed up as an
    /// assistant message, takes the placeholder's slot. Without a
    /// placeholder the message lands at the end.
    pub fn complete_send(&mut self, ticket: SendTicket, outcome: ConfabResult<String>) {
        let message = match outcome {
            Ok(reply) => Message::assistant(reply),
            Err(err) => Message::assistant(format!("Error: {}", err)),
        };

        match ticket.placeholder {
            Some(id) if self.conversation.position(id).is_some() => {
                self.conversation.replace(id, message);
            }
            _ => self.conversation.append(message),
        }

        self.in_flight = self.in_flight.saturating_sub(1);
    }
}

/// Runs one full send against the reply server. Spawned per send;
/// holds the app lock only before and after the network call, so the
/// UI keeps drawing while the request is in flight.
pub async fn send_message(app: Arc<Mutex<App>>, raw_input: String) {
    let (ticket, client) = {
        let mut guard = app.lock().await;
        let ticket = match guard.session.begin_send(&raw_input) {
            Some(ticket) => ticket,
            None => return,
        };

        guard.push_history(ticket.text());
        guard.stick_to_bottom = true;
        guard.status_indicator.set_thinking(true);
        guard.status_indicator.set_status("Sending...");

        let endpoint = guard.client.endpoint().to_string();
        guard.logs.add(format!("Sending message to {}", endpoint));

        (ticket, guard.client.clone())
    };

    let started = Instant::now();
    let outcome = client.send_message(ticket.text()).await;

    {
        let mut guard = app.lock().await;
        match &outcome {
            Ok(reply) => guard.logs.add(format!(
                "Reply received ({} chars, {} ms)",
                reply.chars().count(),
                started.elapsed().as_millis()
            )),
            Err(err) => guard.logs.add(format!("Request failed: {}", err)),
        }

        guard.session.complete_send(ticket, outcome);

        if !guard.session.is_sending() {
            guard.status_indicator.set_thinking(false);
            guard.status_indicator.clear_status();
        }
        guard.stick_to_bottom = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::Role;
    use crate::errors::ConfabError;

    fn session() -> ChatSession {
        ChatSession::new(ChatOptions::default())
    }

    #[test]
    fn test_welcome_banner_is_seeded() {
        let session = session();
        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[0].text, WELCOME_BANNER);
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let mut session = session();
        assert!(session.begin_send("").is_none());
        assert!(session.begin_send("   \n\t ").is_none());
        assert_eq!(session.conversation().len(), 1);
        assert!(!session.is_sending());
    }

    #[test]
    fn test_begin_send_appends_user_then_placeholder() {
        let mut session = session();
        let ticket = session.begin_send("hello").unwrap();

        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].text, "hello");
        assert!(messages[2].is_typing);
        assert_eq!(ticket.placeholder(), Some(messages[2].id));
        assert!(session.is_sending());
    }

    #[test]
    fn test_input_is_trimmed_before_everything() {
        let mut session = session();
        let ticket = session.begin_send("  hi there  ").unwrap();
        assert_eq!(ticket.text(), "hi there");
        assert_eq!(session.conversation().messages()[1].text, "hi there");
    }

    #[test]
    fn test_reply_takes_the_placeholder_slot() {
        let mut session = session();
        let ticket = session.begin_send("hello").unwrap();
        session.complete_send(ticket, Ok("hi".to_string()));

        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].text, "hi");
        assert!(!messages[2].is_typing);
        assert!(!session.is_sending());
    }

    #[test]
    fn test_failure_becomes_error_message_in_slot() {
        let mut session = session();
        let ticket = session.begin_send("hello").unwrap();
        session.complete_send(ticket, Err(ConfabError::api_error("boom")));

        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[2].text, "Error: boom");
        assert!(!session.is_sending());
    }

    #[test]
    fn test_disabled_indicator_appends_instead() {
        let mut session = ChatSession::new(ChatOptions {
            show_typing_indicator: false,
            ..ChatOptions::default()
        });

        let ticket = session.begin_send("hello").unwrap();
        assert_eq!(session.conversation().len(), 2);
        assert!(ticket.placeholder().is_none());
        assert!(session.is_sending());

        session.complete_send(ticket, Ok("hi".to_string()));
        let messages = session.conversation().messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[2].text, "hi");
    }

    #[test]
    fn test_overlapping_sends_keep_their_slots() {
        let mut session = session();
        let first = session.begin_send("one").unwrap();
        let second = session.begin_send("two").unwrap();

        // welcome, user one, placeholder one, user two, placeholder two
        assert_eq!(session.conversation().len(), 5);
        assert_eq!(session.in_flight(), 2);

        // Second reply lands before the first.
        session.complete_send(second, Ok("reply two".to_string()));
        let messages = session.conversation().messages();
        assert_eq!(messages[4].text, "reply two");
        assert!(messages[2].is_typing);
        assert!(session.is_sending());

        session.complete_send(first, Ok("reply one".to_string()));
        let messages = session.conversation().messages();
        assert_eq!(messages[2].text, "reply one");
        assert_eq!(messages[4].text, "reply two");
        assert!(!session.is_sending());
    }
}

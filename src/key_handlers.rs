use std::path::PathBuf;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::Mutex;

use crate::app::{App, AppScreen};
use crate::config::get_config;
use crate::controller;
use crate::prompts;
use crate::transcript;

/// Handles a key press on the chat screen. Enter hands the drained
/// input to a spawned send task; everything else edits state in place.
pub async fn handle_chat_input(key: KeyEvent, app: &Arc<Mutex<App>>) {
    match key.code {
        KeyCode::Esc => {
            app.lock().await.screen = AppScreen::QuitConfirm;
        }
        KeyCode::Enter => {
            if key.modifiers.contains(KeyModifiers::SHIFT)
                || key.modifiers.contains(KeyModifiers::ALT)
            {
                let mut guard = app.lock().await;
                guard.input.push('\n');
                guard.reset_history_cursor();
            } else {
                let pending = {
                    let mut guard = app.lock().await;
                    if guard.session.is_sending() || guard.input.trim().is_empty() {
                        None
                    } else {
                        Some(guard.input.drain(..).collect::<String>())
                    }
                };
                if let Some(raw_input) = pending {
                    tokio::spawn(controller::send_message(app.clone(), raw_input));
                }
            }
        }
        KeyCode::F(n) => {
            if let Some(text) = prompts::prompt_text(n.saturating_sub(1) as usize) {
                let mut guard = app.lock().await;
                guard.input = text.to_string();
                guard.reset_history_cursor();
            }
        }
        KeyCode::PageUp if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.lock().await.logs.scroll_up();
        }
        KeyCode::PageDown if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.lock().await.logs.scroll_down();
        }
        KeyCode::PageUp => app.lock().await.scroll_up(),
        KeyCode::PageDown => app.lock().await.scroll_down(),
        KeyCode::Up if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.lock().await.history_prev();
        }
        KeyCode::Down if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.lock().await.history_next();
        }
        KeyCode::Backspace => {
            let mut guard = app.lock().await;
            guard.input.pop();
            guard.reset_history_cursor();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.lock().await.screen = AppScreen::QuitConfirm,
                    's' => export_transcript(app).await,
                    'u' => app.lock().await.scroll_up(),
                    'd' => app.lock().await.scroll_down(),
                    _ => {}
                }
            } else {
                let mut guard = app.lock().await;
                guard.input.push(c);
                guard.reset_history_cursor();
            }
        }
        _ => {}
    }
}

async fn export_transcript(app: &Arc<Mutex<App>>) {
    let config = get_config();
    let path = PathBuf::from(&config.transcript_path);

    let mut guard = app.lock().await;
    let sanitize = guard.session.options().sanitize_output;
    match transcript::export_transcript(guard.session.conversation(), sanitize, &path) {
        Ok(()) => {
            guard
                .logs
                .add(format!("Transcript saved to {}", path.display()));
        }
        Err(err) => {
            guard.logs.add(format!("Transcript export failed: {}", err));
            log::warn!("transcript export failed: {}", err);
        }
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.should_quit = true;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.screen = AppScreen::Chat;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn shared_app() -> Arc<Mutex<App>> {
        Arc::new(Mutex::new(App::new(&Config::default())))
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_typed_characters_reach_the_input() {
        let app = shared_app();
        handle_chat_input(key(KeyCode::Char('h')), &app).await;
        handle_chat_input(key(KeyCode::Char('i')), &app).await;
        assert_eq!(app.lock().await.input, "hi");
    }

    #[tokio::test]
    async fn test_backspace_removes_last_character() {
        let app = shared_app();
        handle_chat_input(key(KeyCode::Char('h')), &app).await;
        handle_chat_input(key(KeyCode::Backspace), &app).await;
        assert!(app.lock().await.input.is_empty());
    }

    #[tokio::test]
    async fn test_shift_enter_inserts_newline() {
        let app = shared_app();
        handle_chat_input(key(KeyCode::Char('a')), &app).await;
        handle_chat_input(
            KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT),
            &app,
        )
        .await;
        handle_chat_input(key(KeyCode::Char('b')), &app).await;
        assert_eq!(app.lock().await.input, "a\nb");
    }

    #[tokio::test]
    async fn test_enter_on_blank_input_sends_nothing() {
        let app = shared_app();
        handle_chat_input(key(KeyCode::Char(' ')), &app).await;
        handle_chat_input(key(KeyCode::Enter), &app).await;

        let guard = app.lock().await;
        assert_eq!(guard.session.conversation().len(), 1);
        assert!(!guard.session.is_sending());
    }

    #[tokio::test]
    async fn test_function_key_loads_prompt_text() {
        let app = shared_app();
        handle_chat_input(key(KeyCode::F(1)), &app).await;
        assert_eq!(
            app.lock().await.input,
            "Write a short summary of the novel \"Dune\"."
        );
    }

    #[tokio::test]
    async fn test_ctrl_page_keys_move_the_activity_pane() {
        let app = shared_app();

        handle_chat_input(KeyEvent::new(KeyCode::PageUp, KeyModifiers::CONTROL), &app).await;
        {
            let guard = app.lock().await;
            assert_eq!(guard.logs.scroll_offset, 1);
            assert!(guard.stick_to_bottom);
        }

        handle_chat_input(KeyEvent::new(KeyCode::PageDown, KeyModifiers::CONTROL), &app).await;
        assert_eq!(app.lock().await.logs.scroll_offset, 0);
    }

    #[tokio::test]
    async fn test_escape_asks_for_quit_confirmation() {
        let app = shared_app();
        handle_chat_input(key(KeyCode::Esc), &app).await;
        assert_eq!(app.lock().await.screen, AppScreen::QuitConfirm);
    }

    #[test]
    fn test_quit_confirm_yes_and_no() {
        let mut app = App::new(&Config::default());

        app.screen = AppScreen::QuitConfirm;
        handle_quit_confirm_input(key(KeyCode::Char('n')), &mut app);
        assert_eq!(app.screen, AppScreen::Chat);
        assert!(!app.should_quit);

        app.screen = AppScreen::QuitConfirm;
        handle_quit_confirm_input(key(KeyCode::Char('y')), &mut app);
        assert!(app.should_quit);
    }
}

// src/prompts.rs

/// A canned prompt offered in the sidebar. Activating one loads the
/// full text into the input box so it can be edited before sending.
#[derive(Debug, Clone, Copy)]
pub struct QuickPrompt {
    pub label: &'static str,
    pub text: &'static str,
}

pub const QUICK_PROMPTS: &[QuickPrompt] = &[
    QuickPrompt {
        label: "Summarize Dune",
        text: "Write a short summary of the novel \"Dune\".",
    },
    QuickPrompt {
        label: "Startup ideas",
        text: "Give me 3 ideas for a startup in healthcare",
    },
    QuickPrompt {
        label: "Sea haiku",
        text: "Write a haiku about the sea",
    },
];

pub fn prompt_text(index: usize) -> Option<&'static str> {
    QUICK_PROMPTS.get(index).map(|p| p.text)
}

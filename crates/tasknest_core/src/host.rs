//! Host-environment capabilities injected into a session.
//!
//! The core never reaches for global environment state; whatever the host
//! offers (color-scheme preference, a blocking prompt, a place to apply the
//! theme) comes in through these traits.

/// Read-only "does the host prefer a dark color scheme" signal.
///
/// Consulted only when no theme was stored yet.
pub trait AmbientPreference {
    fn prefers_dark(&self) -> bool;
}

/// Constant preference, for hosts without a color-scheme signal and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedPreference(pub bool);

impl AmbientPreference for FixedPreference {
    fn prefers_dark(&self) -> bool {
        self.0
    }
}

impl<F: Fn() -> bool> AmbientPreference for F {
    fn prefers_dark(&self) -> bool {
        self()
    }
}

/// Asks the user for a string; `None` means the prompt was cancelled.
pub trait NamePrompt {
    fn ask(&mut self, message: &str) -> Option<String>;
}

/// Prompt that returns queued answers in order, then cancels.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: std::collections::VecDeque<Option<String>>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = Option<String>>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }

    /// Messages shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl NamePrompt for ScriptedPrompt {
    fn ask(&mut self, message: &str) -> Option<String> {
        self.asked.push(message.to_string());
        self.answers.pop_front().flatten()
    }
}

/// Applies the theme marker to the presentation root.
pub trait ThemeSink {
    fn apply_theme(&mut self, dark_mode: bool);
}

/// Sink for hosts that render no theme.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopThemeSink;

impl ThemeSink for NoopThemeSink {
    fn apply_theme(&mut self, _dark_mode: bool) {}
}

/// Sink that records every applied value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordingThemeSink {
    pub applied: Vec<bool>,
}

impl ThemeSink for RecordingThemeSink {
    fn apply_theme(&mut self, dark_mode: bool) {
        self.applied.push(dark_mode);
    }
}

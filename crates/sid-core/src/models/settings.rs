//! Journal settings model

use serde::{Deserialize, Serialize};

use crate::fonts::FontChoice;
use crate::timer::TimerState;

/// Font sizes offered by the size toggle, in pixels.
pub const FONT_SIZES: [u32; 8] = [16, 18, 20, 22, 26, 32, 40, 52];

const DEFAULT_FONT_FAMILY: &str = "Lato, Manrope, sans-serif";

/// Editor font option
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FontOption {
    #[default]
    Lato,
    Arial,
    System,
    Serif,
    /// Uses the family picked by the font rotation.
    Random,
}

impl FontOption {
    /// CSS family stack for a named option; `None` for `Random`.
    #[must_use]
    pub const fn family(self) -> Option<&'static str> {
        match self {
            Self::Lato => Some(DEFAULT_FONT_FAMILY),
            Self::Arial => Some("Arial, Helvetica, sans-serif"),
            Self::System => Some("system-ui, -apple-system, Segoe UI, sans-serif"),
            Self::Serif => Some("Georgia, 'Times New Roman', serif"),
            Self::Random => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Lato => "Lato",
            Self::Arial => "Arial",
            Self::System => "System",
            Self::Serif => "Serif",
            Self::Random => "Random",
        }
    }
}

/// Which capture surface is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InputMode {
    /// Typed entries
    #[default]
    Chat,
    /// Voice clips
    Voice,
}

/// The single settings record for the process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// Editor font size in pixels
    pub font_size: u32,
    pub font_option: FontOption,
    /// Family of the last random pick
    pub random_font_family: String,
    /// Name of the last random pick; empty after choosing a named option
    pub random_font_name: String,
    pub mode: InputMode,
    /// Whether backspace edits the draft
    pub backspace_on: bool,
    pub dark_mode: bool,
    #[serde(flatten)]
    pub timer: TimerState,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_size: 18,
            font_option: FontOption::Lato,
            random_font_family: DEFAULT_FONT_FAMILY.to_string(),
            random_font_name: String::new(),
            mode: InputMode::Chat,
            backspace_on: true,
            dark_mode: false,
            timer: TimerState::default(),
        }
    }
}

impl Settings {
    /// Normalize a record freshly read from storage.
    ///
    /// A capture session cannot survive a reload, so the mode always comes back
    /// as `Chat`.
    #[must_use]
    pub fn into_loaded(mut self) -> Self {
        self.mode = InputMode::Chat;
        self
    }

    /// Family stack the editor should render with.
    #[must_use]
    pub fn editor_font_family(&self) -> &str {
        self.font_option
            .family()
            .unwrap_or(self.random_font_family.as_str())
    }

    /// Label for a font option button, e.g. `Random {Lora}`.
    #[must_use]
    pub fn font_label(&self, option: FontOption) -> String {
        if option == FontOption::Random && !self.random_font_name.is_empty() {
            format!("Random {{{}}}", self.random_font_name)
        } else {
            option.name().to_string()
        }
    }

    /// Record a random pick from the font rotation.
    pub fn apply_random_font(&mut self, choice: &FontChoice) {
        self.font_option = FontOption::Random;
        self.random_font_family = choice.family.to_string();
        self.random_font_name = choice.name.to_string();
    }

    /// Switch to a named font option.
    pub fn apply_named_font(&mut self, option: FontOption) {
        self.font_option = option;
        self.random_font_name.clear();
    }

    /// Advance to the next size in [`FONT_SIZES`], wrapping around.
    ///
    /// A size that is not in the list restarts the cycle at the smallest size.
    pub fn cycle_font_size(&mut self) -> u32 {
        let next = FONT_SIZES
            .iter()
            .position(|&size| size == self.font_size)
            .map_or(0, |index| (index + 1) % FONT_SIZES.len());
        self.font_size = FONT_SIZES[next];
        self.font_size
    }

    pub fn toggle_backspace(&mut self) -> bool {
        self.backspace_on = !self.backspace_on;
        self.backspace_on
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }
}

#![forbid(unsafe_code)]

//! Style handles carried by widgets for the renderer.
//!
//! The tree never resolves these; they are passed through untouched.

/// Terminal color: one of the 16 ANSI colors or 24-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
    /// True color.
    Rgb(u8, u8, u8),
}

/// Foreground/background pair. `None` inherits from the parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
}

impl Style {
    /// Empty style.
    #[must_use]
    pub const fn new() -> Self {
        Self { fg: None, bg: None }
    }

    /// Set the foreground color.
    #[must_use]
    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    /// Set the background color.
    #[must_use]
    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }
}

/// Dialog background.
pub const DEFAULT_BACKGROUND: Color = Color::BrightWhite;
/// Focused button background and frame color.
pub const DEFAULT_BUTTON: Color = Color::Blue;
/// Focused button text.
pub const DEFAULT_BUTTON_TEXT: Color = Color::BrightYellow;
/// Dialog text.
pub const DEFAULT_TEXT: Color = Color::Black;

/// Yellow on dark blue.
#[must_use]
pub const fn default_button_style() -> Style {
    Style::new().fg(DEFAULT_BUTTON_TEXT).bg(DEFAULT_BUTTON)
}

/// Black on white.
#[must_use]
pub const fn default_background_style() -> Style {
    Style::new().fg(DEFAULT_TEXT).bg(DEFAULT_BACKGROUND)
}

/// Dark blue on white, for the frame and divider.
#[must_use]
pub const fn default_border_style() -> Style {
    Style::new().fg(DEFAULT_BUTTON).bg(DEFAULT_BACKGROUND)
}

//! Rendering configuration
//!
//! Defaults match a 100-column terminal with 4-column tab stops. The
//! environment can override width and color; bad values are logged and
//! ignored.

use std::io::IsTerminal;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Narrowest width that still leaves room for a gutter and one column
pub const MIN_WIDTH: usize = 8;

pub const ENV_WIDTH: &str = "DEEPCHECK_WIDTH";
pub const ENV_COLOR: &str = "DEEPCHECK_COLOR";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    Always,
    Never,
    /// On when stderr is a terminal and `NO_COLOR` is unset
    #[default]
    Auto,
}

impl ColorMode {
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "always" => Some(ColorMode::Always),
            "never" => Some(ColorMode::Never),
            "auto" => Some(ColorMode::Auto),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Terminal width in columns, gutter included
    pub width: usize,
    pub tab_width: usize,
    pub color: ColorMode,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            tab_width: DEFAULT_TAB_WIDTH,
            color: ColorMode::Auto,
        }
    }
}

impl RenderConfig {
    /// Defaults with styling turned off
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            ..Self::default()
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(MIN_WIDTH);
        self
    }

    pub fn with_color(mut self, color: ColorMode) -> Self {
        self.color = color;
        self
    }

    /// Defaults overridden by `DEEPCHECK_WIDTH`, `DEEPCHECK_COLOR` and `NO_COLOR`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_WIDTH) {
            match raw.trim().parse::<usize>() {
                Ok(width) if width >= MIN_WIDTH => config.width = width,
                _ => tracing::warn!(
                    var = ENV_WIDTH,
                    value = %raw,
                    "ignoring invalid width, using {}",
                    DEFAULT_WIDTH
                ),
            }
        }

        if let Some(raw) = lookup(ENV_COLOR) {
            match ColorMode::parse(&raw) {
                Some(mode) => config.color = mode,
                None => tracing::warn!(var = ENV_COLOR, value = %raw, "ignoring invalid color mode"),
            }
        }

        if config.color == ColorMode::Auto && lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            config.color = ColorMode::Never;
        }

        config
    }

    /// Whether ANSI styling should be emitted
    pub fn colors_enabled(&self) -> bool {
        match self.color {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os(ENV_NO_COLOR).is_none() && std::io::stderr().is_terminal()
            }
        }
    }
}

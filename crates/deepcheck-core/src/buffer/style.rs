//! ANSI SGR styling for diagnostic output.

const ANSI_RESET: &str = "\x1b[0m";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    BrightBlack,
}

impl Color {
    fn fg_code(self) -> &'static str {
        match self {
            Color::Red => "31",
            Color::Green => "32",
            Color::Yellow => "33",
            Color::Blue => "34",
            Color::Magenta => "35",
            Color::Cyan => "36",
            Color::BrightBlack => "90",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
}

impl Style {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    fn is_plain(&self) -> bool {
        self.fg.is_none() && !self.bold && !self.dim
    }

    /// Append `content` to `out`, wrapped in SGR codes when `enabled`
    pub fn render_to(&self, out: &mut String, content: &str, enabled: bool) {
        if !enabled || self.is_plain() || content.is_empty() {
            out.push_str(content);
            return;
        }

        let mut codes: Vec<&str> = Vec::with_capacity(3);
        if self.bold {
            codes.push("1");
        }
        if self.dim {
            codes.push("2");
        }
        if let Some(fg) = self.fg {
            codes.push(fg.fg_code());
        }

        out.push_str("\x1b[");
        out.push_str(&codes.join(";"));
        out.push('m');
        out.push_str(content);
        out.push_str(ANSI_RESET);
    }

    pub fn paint(&self, content: &str, enabled: bool) -> String {
        let mut out = String::with_capacity(content.len() + 12);
        self.render_to(&mut out, content, enabled);
        out
    }
}

/// Remove SGR escape sequences, leaving the visible text
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

//! String visualizer
//!
//! Renders bytes as escaped, gutter-numbered rows wrapped to the configured
//! width. Rendering is byte-wise: every byte becomes exactly one glyph except
//! tabs, which fill to the next tab stop.
//!
//! ```text
//! 1 │ Simple,·small·string.
//! ```
//!
//! LF, VT and FF each draw their glyph and start a new numbered row. CR is
//! drawn as its control picture and never starts a row. Rows that reach the
//! width continue on a row with a blank gutter.

pub mod glyph;

use crate::buffer::{titled_rule, Color, RuleWeight, Style};
use crate::config::RenderConfig;
use glyph::Glyph;

const GUTTER_RULE: &str = " │ ";
const GUTTER_RULE_WIDTH: usize = 3;

/// Lines counted for gutter sizing: one plus every LF, VT and FF
pub fn count_lines(bytes: &[u8]) -> usize {
    1 + bytes.iter().filter(|b| glyph::is_break(**b)).count()
}

/// `max(digits(lines) + 3, 4)`
pub fn gutter_width(lines: usize) -> usize {
    let digits = lines.max(1).ilog10() as usize + 1;
    (digits + GUTTER_RULE_WIDTH).max(4)
}

/// Index of the first differing byte, or of the end of the shorter input
pub fn first_divergence(expected: &[u8], actual: &[u8]) -> Option<usize> {
    let common = expected
        .iter()
        .zip(actual)
        .position(|(e, a)| e != a)
        .unwrap_or_else(|| expected.len().min(actual.len()));
    if common == expected.len() && common == actual.len() {
        None
    } else {
        Some(common)
    }
}

#[derive(Debug, Clone)]
pub struct Visualizer {
    config: RenderConfig,
    colors: bool,
}

impl Visualizer {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            colors: config.colors_enabled(),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `bytes` as numbered rows; the result always ends in a newline
    pub fn render(&self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len() * 2 + 16);
        let gutter = gutter_width(count_lines(bytes));
        self.block(&mut out, bytes, 1, gutter, Style::new(), false);
        out
    }

    /// Render the shared prefix once, then each side's remainder in its own
    /// titled block. Identical inputs render like [`Visualizer::render`].
    pub fn render_divergence(&self, expected: &[u8], actual: &[u8]) -> String {
        let Some(at) = first_divergence(expected, actual) else {
            return self.render(expected);
        };

        let gutter = gutter_width(count_lines(expected).max(count_lines(actual)));
        let prefix = &expected[..at];
        let resume_line = count_lines(prefix);
        let mut out = String::with_capacity((expected.len() + actual.len()) * 2 + 64);

        if !prefix.is_empty() {
            self.block(&mut out, prefix, 1, gutter, Style::new(), true);
        }

        let sides = [
            ("expected", &expected[at..], Color::Green),
            ("actual", &actual[at..], Color::Red),
        ];
        for (title, suffix, color) in sides {
            let style = Style::new().fg(color);
            let rule = titled_rule(title, RuleWeight::Thin, self.config.width);
            style.dim().render_to(&mut out, &rule, self.colors);
            out.push('\n');
            self.block(&mut out, suffix, resume_line, gutter, style, false);
        }
        out
    }

    fn block(
        &self,
        out: &mut String,
        bytes: &[u8],
        first_line: usize,
        gutter: usize,
        style: Style,
        drop_empty_tail: bool,
    ) {
        let mut rows = Rows {
            out,
            gutter,
            content_width: self.config.width.saturating_sub(gutter).max(1),
            tab_width: self.config.tab_width.max(1),
            line: first_line,
            col: 0,
            row: String::new(),
            row_start: 0,
            style,
            colors: self.colors,
        };
        rows.start_row(true);
        for &byte in bytes {
            rows.push(glyph::classify(byte));
        }
        let ends_on_break = bytes.last().is_some_and(|b| glyph::is_break(*b));
        if drop_empty_tail && ends_on_break {
            // the prefix's fresh row is continued by the suffix blocks
            let start = rows.row_start;
            rows.out.truncate(start);
        } else {
            rows.end_row();
        }
    }
}

struct Rows<'a> {
    out: &'a mut String,
    gutter: usize,
    content_width: usize,
    tab_width: usize,
    line: usize,
    col: usize,
    row: String,
    row_start: usize,
    style: Style,
    colors: bool,
}

impl Rows<'_> {
    fn start_row(&mut self, numbered: bool) {
        self.row_start = self.out.len();
        let label = if numbered {
            self.line.to_string()
        } else {
            String::new()
        };
        let gutter = format!(
            "{:>w$}{}",
            label,
            GUTTER_RULE,
            w = self.gutter - GUTTER_RULE_WIDTH
        );
        Style::new().dim().render_to(self.out, &gutter, self.colors);
        self.col = 0;
    }

    fn end_row(&mut self) {
        self.style.render_to(self.out, &self.row, self.colors);
        self.row.clear();
        self.out.push('\n');
    }

    fn wrap_if_full(&mut self) {
        if self.col >= self.content_width {
            self.end_row();
            self.start_row(false);
        }
    }

    fn push(&mut self, glyph: Glyph) {
        match glyph {
            Glyph::Char(c) => {
                self.wrap_if_full();
                self.row.push(c);
                self.col += 1;
            }
            Glyph::Tab => {
                self.wrap_if_full();
                let to_stop = self.tab_width - self.col % self.tab_width;
                let fill = to_stop.min(self.content_width - self.col);
                self.row.extend(std::iter::repeat(glyph::TAB_FILL).take(fill));
                self.col += fill;
            }
            Glyph::Break(c) => {
                self.wrap_if_full();
                self.row.push(c);
                self.end_row();
                self.line += 1;
                self.start_row(true);
            }
        }
    }
}

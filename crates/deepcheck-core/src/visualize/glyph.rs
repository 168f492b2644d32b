//! Byte to glyph mapping.

pub const SPACE: char = '·';
pub const TAB_FILL: char = '→';
pub const LINE_FEED: char = '↵';
pub const DELETE: char = '␡';
pub const REPLACEMENT: char = '\u{FFFD}';

const CONTROL_PICTURES: u32 = 0x2400;

/// How one byte is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Char(char),
    /// Fill to the next tab stop
    Tab,
    /// Draw the char, then start a new numbered row
    Break(char),
}

pub fn classify(byte: u8) -> Glyph {
    match byte {
        b'\t' => Glyph::Tab,
        b'\n' => Glyph::Break(LINE_FEED),
        0x0B | 0x0C => Glyph::Break(control_picture(byte)),
        b' ' => Glyph::Char(SPACE),
        0x21..=0x7E => Glyph::Char(byte as char),
        0x7F => Glyph::Char(DELETE),
        0x00..=0x1F => Glyph::Char(control_picture(byte)),
        _ => Glyph::Char(REPLACEMENT),
    }
}

/// True for bytes that start a new row
pub fn is_break(byte: u8) -> bool {
    matches!(byte, b'\n' | 0x0B | 0x0C)
}

fn control_picture(byte: u8) -> char {
    char::from_u32(CONTROL_PICTURES + u32::from(byte)).unwrap_or(REPLACEMENT)
}

//! Titled horizontal rules.

/// Character weight of a rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleWeight {
    #[default]
    Thin,
    Thick,
    Double,
}

impl RuleWeight {
    pub fn glyph(&self) -> char {
        match self {
            RuleWeight::Thin => '─',
            RuleWeight::Thick => '━',
            RuleWeight::Double => '═',
        }
    }
}

/// A `width`-column rule with `title` centred in it.
///
/// The title is padded with one space on each side. Titles too long to leave
/// at least one rule character on each side are cut and end in `…`. An empty
/// title yields a bare rule. The result has no trailing newline.
pub fn titled_rule(title: &str, weight: RuleWeight, width: usize) -> String {
    let glyph = weight.glyph();
    if title.is_empty() {
        return std::iter::repeat(glyph).take(width).collect();
    }

    // one rule char and one space on each side
    let room = width.saturating_sub(4);
    let title_len = title.chars().count();
    let shown: String = if title_len > room {
        let keep = room.saturating_sub(1);
        title.chars().take(keep).chain(std::iter::once('…')).collect()
    } else {
        title.to_string()
    };

    let shown_len = shown.chars().count();
    let fill = width.saturating_sub(shown_len + 2);
    let left = fill / 2;
    let right = fill - left;

    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat(glyph).take(left));
    out.push(' ');
    out.push_str(&shown);
    out.push(' ');
    out.extend(std::iter::repeat(glyph).take(right));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_title() {
        let rule = titled_rule("expected", RuleWeight::Thin, 20);
        assert_eq!(rule.chars().count(), 20);
        assert_eq!(rule, "───── expected ─────");
    }

    #[test]
    fn test_weights() {
        assert!(titled_rule("x", RuleWeight::Thick, 10).starts_with('━'));
        assert!(titled_rule("x", RuleWeight::Double, 10).ends_with('═'));
    }

    #[test]
    fn test_long_title_truncated() {
        let rule = titled_rule("a very long section title", RuleWeight::Thin, 16);
        assert_eq!(rule.chars().count(), 16);
        assert_eq!(rule, "─ a very long… ─");
        assert!(rule.starts_with('─'));
        assert!(rule.ends_with('─'));
    }

    #[test]
    fn test_empty_title_is_bare_rule() {
        assert_eq!(titled_rule("", RuleWeight::Double, 3), "═══");
    }
}

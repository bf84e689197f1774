//! ANSI styles used by the console renderer.

use crossterm::style::{Attribute, Color, SetAttribute, SetForegroundColor};

/// A foreground color plus text attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    fg: Color,
    attributes: &'static [Attribute],
}

impl Style {
    pub const fn new(fg: Color, attributes: &'static [Attribute]) -> Self {
        Self { fg, attributes }
    }

    fn escape(&self) -> String {
        let mut out = SetForegroundColor(self.fg).to_string();
        for attribute in self.attributes {
            out.push_str(&SetAttribute(*attribute).to_string());
        }
        out
    }
}

// Index corresponds to the heading level, h4 and deeper share the last entry.
const HEADING_STYLES: [Style; 4] = [
    Style::new(Color::Green, &[Attribute::Bold, Attribute::Underlined]),
    Style::new(Color::Green, &[Attribute::Bold]),
    Style::new(Color::DarkGreen, &[]),
    Style::new(Color::DarkGreen, &[]),
];

// Emphasis, strong, and the two combined.
const EMPHASIS_STYLES: [Style; 3] = [
    Style::new(Color::Cyan, &[Attribute::Bold]),
    Style::new(Color::Cyan, &[Attribute::Bold, Attribute::Underlined]),
    Style::new(Color::Cyan, &[Attribute::Bold, Attribute::Reverse]),
];

pub const LINK: Style = Style::new(Color::White, &[Attribute::Underlined]);
pub const CODE: Style = Style::new(Color::DarkRed, &[]);
pub const BULLET: Style = Style::new(Color::Red, &[Attribute::Bold]);
pub const STRIKETHROUGH: Style = Style::new(Color::DarkGrey, &[Attribute::CrossedOut]);
pub const HTML: Style = Style::new(Color::DarkMagenta, &[]);
pub const QUOTE: Style = Style::new(Color::DarkGrey, &[]);

/// Emphasis strength: `*a*`, `**a**`, and `***a***`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmphasisTier {
    Emphasis,
    Strong,
    Triple,
}

/// Turns styles into escape sequences, or into nothing when color is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn colored() -> Self {
        Self::new(true)
    }

    /// A palette that emits no escape sequences at all.
    pub fn plain() -> Self {
        Self::new(false)
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn paint(&self, style: Style) -> String {
        if self.enabled {
            style.escape()
        } else {
            String::new()
        }
    }

    pub fn heading(&self, level: u8) -> String {
        let tier = usize::from(level.clamp(1, 4)) - 1;
        self.paint(HEADING_STYLES[tier])
    }

    pub fn emphasis(&self, tier: EmphasisTier) -> String {
        let index = match tier {
            EmphasisTier::Emphasis => 0,
            EmphasisTier::Strong => 1,
            EmphasisTier::Triple => 2,
        };
        self.paint(EMPHASIS_STYLES[index])
    }

    pub fn reset(&self) -> String {
        if self.enabled {
            SetAttribute(Attribute::Reset).to_string()
        } else {
            String::new()
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::colored()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_palette_is_empty() {
        let palette = Palette::plain();
        assert!(palette.heading(1).is_empty());
        assert!(palette.paint(LINK).is_empty());
        assert!(palette.reset().is_empty());
    }

    #[test]
    fn test_heading_tiers_cap_at_four() {
        let palette = Palette::colored();
        assert_eq!(palette.heading(4), palette.heading(6));
        assert_ne!(palette.heading(1), palette.heading(2));
        assert_ne!(palette.heading(2), palette.heading(3));
    }

    #[test]
    fn test_emphasis_tiers_are_distinct() {
        let palette = Palette::colored();
        let tiers = [
            palette.emphasis(EmphasisTier::Emphasis),
            palette.emphasis(EmphasisTier::Strong),
            palette.emphasis(EmphasisTier::Triple),
        ];
        assert_ne!(tiers[0], tiers[1]);
        assert_ne!(tiers[1], tiers[2]);
        assert_ne!(tiers[0], tiers[2]);
    }

    #[test]
    fn test_reset_sequence() {
        assert_eq!(Palette::colored().reset(), "\x1b[0m");
    }
}

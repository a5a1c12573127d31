//! Chat text components — a small tree of styled text, serialized to the
//! legacy section-sign format when a flat string is needed.

use serde::{Deserialize, Serialize};

/// The sixteen named chat colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedColor {
    Black,
    DarkBlue,
    DarkGreen,
    DarkAqua,
    DarkRed,
    DarkPurple,
    Gold,
    Gray,
    DarkGray,
    Blue,
    Green,
    Aqua,
    Red,
    LightPurple,
    Yellow,
    White,
}

impl NamedColor {
    /// The legacy color code character for this color.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Black => '0',
            Self::DarkBlue => '1',
            Self::DarkGreen => '2',
            Self::DarkAqua => '3',
            Self::DarkRed => '4',
            Self::DarkPurple => '5',
            Self::Gold => '6',
            Self::Gray => '7',
            Self::DarkGray => '8',
            Self::Blue => '9',
            Self::Green => 'a',
            Self::Aqua => 'b',
            Self::Red => 'c',
            Self::LightPurple => 'd',
            Self::Yellow => 'e',
            Self::White => 'f',
        }
    }

    /// Parse a legacy color code character.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_lowercase() {
            '0' => Some(Self::Black),
            '1' => Some(Self::DarkBlue),
            '2' => Some(Self::DarkGreen),
            '3' => Some(Self::DarkAqua),
            '4' => Some(Self::DarkRed),
            '5' => Some(Self::DarkPurple),
            '6' => Some(Self::Gold),
            '7' => Some(Self::Gray),
            '8' => Some(Self::DarkGray),
            '9' => Some(Self::Blue),
            'a' => Some(Self::Green),
            'b' => Some(Self::Aqua),
            'c' => Some(Self::Red),
            'd' => Some(Self::LightPurple),
            'e' => Some(Self::Yellow),
            'f' => Some(Self::White),
            _ => None,
        }
    }
}

/// A styled chat message: a text run with optional color/bold and children
/// appended after it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextComponent {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<NamedColor>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TextComponent>,
}

impl TextComponent {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn color_named(mut self, color: NamedColor) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    #[must_use]
    pub fn add_child(mut self, child: TextComponent) -> Self {
        self.children.push(child);
        self
    }

    /// Flatten the component tree to plain text with no formatting.
    #[must_use]
    pub fn get_text(&self) -> String {
        let mut out = self.text.clone();
        for child in &self.children {
            out.push_str(&child.get_text());
        }
        out
    }

    /// Render the component tree to the legacy section-sign format.
    #[must_use]
    pub fn to_legacy(&self) -> String {
        let mut out = String::new();
        self.render_legacy(&mut out);
        out
    }

    fn render_legacy(&self, out: &mut String) {
        if let Some(color) = self.color {
            out.push(crate::color::COLOR_CHAR);
            out.push(color.code());
        }
        if self.bold {
            out.push(crate::color::COLOR_CHAR);
            out.push('l');
        }
        out.push_str(&self.text);
        for child in &self.children {
            child.render_legacy(out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattens_children_in_order() {
        let component = TextComponent::text("[+]")
            .color_named(NamedColor::Green)
            .add_child(TextComponent::text(" ").add_child(TextComponent::text("Steve")));
        assert_eq!(component.get_text(), "[+] Steve");
    }

    #[test]
    fn legacy_render_carries_codes() {
        let component = TextComponent::text("hi").color_named(NamedColor::Red).bold();
        assert_eq!(component.to_legacy(), "\u{a7}c\u{a7}lhi");
    }

    #[test]
    fn color_code_round_trip() {
        for color in [
            NamedColor::Black,
            NamedColor::Gold,
            NamedColor::Green,
            NamedColor::White,
        ] {
            assert_eq!(NamedColor::from_code(color.code()), Some(color));
        }
        assert_eq!(NamedColor::from_code('z'), None);
    }
}

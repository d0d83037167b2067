use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Notion's block and text colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    #[default]
    Default,
    Gray,
    Brown,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
    GrayBackground,
    BrownBackground,
    RedBackground,
    OrangeBackground,
    YellowBackground,
    GreenBackground,
    BlueBackground,
    PurpleBackground,
    PinkBackground,
}

impl std::str::FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Color::Default),
            "gray" => Ok(Color::Gray),
            "brown" => Ok(Color::Brown),
            "red" => Ok(Color::Red),
            "orange" => Ok(Color::Orange),
            "yellow" => Ok(Color::Yellow),
            "green" => Ok(Color::Green),
            "blue" => Ok(Color::Blue),
            "purple" => Ok(Color::Purple),
            "pink" => Ok(Color::Pink),
            "gray_background" => Ok(Color::GrayBackground),
            "brown_background" => Ok(Color::BrownBackground),
            "red_background" => Ok(Color::RedBackground),
            "orange_background" => Ok(Color::OrangeBackground),
            "yellow_background" => Ok(Color::YellowBackground),
            "green_background" => Ok(Color::GreenBackground),
            "blue_background" => Ok(Color::BlueBackground),
            "purple_background" => Ok(Color::PurpleBackground),
            "pink_background" => Ok(Color::PinkBackground),
            _ => Err(ValidationError::InvalidColor(s.to_string())),
        }
    }
}

impl Color {
    /// Parses a wire color, falling back to `Default` for values this crate doesn't know.
    pub fn from_wire(s: &str) -> Self {
        s.parse().unwrap_or_else(|_| {
            log::debug!("Unknown color: {}", s);
            Color::Default
        })
    }

    /// Convert to the Notion string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Default => "default",
            Color::Gray => "gray",
            Color::Brown => "brown",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Purple => "purple",
            Color::Pink => "pink",
            Color::GrayBackground => "gray_background",
            Color::BrownBackground => "brown_background",
            Color::RedBackground => "red_background",
            Color::OrangeBackground => "orange_background",
            Color::YellowBackground => "yellow_background",
            Color::GreenBackground => "green_background",
            Color::BlueBackground => "blue_background",
            Color::PurpleBackground => "purple_background",
            Color::PinkBackground => "pink_background",
        }
    }

    /// CSS class used by the page stylesheet, `None` for the default color.
    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            Color::Default => None,
            Color::Gray => Some("text-gray"),
            Color::Brown => Some("text-brown"),
            Color::Red => Some("text-red"),
            Color::Orange => Some("text-orange"),
            Color::Yellow => Some("text-yellow"),
            Color::Green => Some("text-green"),
            Color::Blue => Some("text-blue"),
            Color::Purple => Some("text-purple"),
            Color::Pink => Some("text-pink"),
            Color::GrayBackground => Some("bg-gray"),
            Color::BrownBackground => Some("bg-brown"),
            Color::RedBackground => Some("bg-red"),
            Color::OrangeBackground => Some("bg-orange"),
            Color::YellowBackground => Some("bg-yellow"),
            Color::GreenBackground => Some("bg-green"),
            Color::BlueBackground => Some("bg-blue"),
            Color::PurpleBackground => Some("bg-purple"),
            Color::PinkBackground => Some("bg-pink"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_color_parsing() {
        assert_eq!(Color::from_str("red").unwrap(), Color::Red);
        assert_eq!(
            Color::from_str("gray_background").unwrap(),
            Color::GrayBackground
        );
        assert!(Color::from_str("invalid").is_err());
        assert_eq!(Color::from_wire("invalid"), Color::Default);
    }

    #[test]
    fn test_background_colors() {
        assert_eq!(Color::Default.css_class(), None);
        assert_eq!(Color::BlueBackground.css_class(), Some("bg-blue"));
    }
}

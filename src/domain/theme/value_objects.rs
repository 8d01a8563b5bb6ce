use serde::{Deserialize, Serialize};

// ============================================================================
// Theme Value Objects
// ============================================================================

/// Color with channels in `0.0..=1.0`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RgbaColor {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl RgbaColor {
    pub const WHITE: RgbaColor = RgbaColor::new(1.0, 1.0, 1.0, 0.0);
    pub const RED: RgbaColor = RgbaColor::new(1.0, 0.0, 0.0, 0.0);
    pub const BLACK: RgbaColor = RgbaColor::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self { red, green, blue, alpha }
    }

    /// CSS `rgba()` notation: 0-255 color channels, alpha kept as a fraction
    pub fn to_css(&self) -> String {
        fn channel(value: f64) -> u8 {
            (value.clamp(0.0, 1.0) * 255.0).round() as u8
        }

        format!(
            "rgba({}, {}, {}, {})",
            channel(self.red),
            channel(self.green),
            channel(self.blue),
            self.alpha.clamp(0.0, 1.0)
        )
    }

    /// Text color readable on top of this one: BLACK on light backgrounds, WHITE on dark
    pub fn contrasting(&self) -> RgbaColor {
        let luminance = 0.299 * self.red + 0.587 * self.green + 0.114 * self.blue;
        if luminance > 0.5 {
            RgbaColor::BLACK
        } else {
            RgbaColor::WHITE
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Align {
    #[default]
    Center,
    Left,
    Right,
}

impl Align {
    pub fn as_css(&self) -> &'static str {
        match self {
            Align::Center => "center",
            Align::Left => "left",
            Align::Right => "right",
        }
    }
}

/// Theme lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThemeState {
    Active,
    #[default]
    Inactive,
    Default,
}

/// Header styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderRule {
    pub color: RgbaColor,
    pub align: Align,
}

impl Default for HeaderRule {
    fn default() -> Self {
        Self {
            color: RgbaColor::WHITE,
            align: Align::default(),
        }
    }
}

/// Logo placement, in pixels from the top-left corner
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LogoRule {
    pub left: f64,
    pub top: f64,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_to_css() {
        assert_eq!(RgbaColor::RED.to_css(), "rgba(255, 0, 0, 0)");
        assert_eq!(RgbaColor::new(0.5, 0.0, 1.0, 0.25).to_css(), "rgba(128, 0, 255, 0.25)");
    }

    #[test]
    fn test_color_to_css_clamps_out_of_range_channels() {
        assert_eq!(RgbaColor::new(2.0, -1.0, 0.0, 3.0).to_css(), "rgba(255, 0, 0, 1)");
    }

    #[test]
    fn test_contrasting_text_color() {
        assert_eq!(RgbaColor::WHITE.contrasting(), RgbaColor::BLACK);
        assert_eq!(RgbaColor::BLACK.contrasting(), RgbaColor::WHITE);
        assert_eq!(RgbaColor::RED.contrasting(), RgbaColor::WHITE);
        assert_eq!(RgbaColor::new(1.0, 1.0, 0.0, 1.0).contrasting(), RgbaColor::BLACK);
    }

    #[test]
    fn test_defaults() {
        assert_eq!(ThemeState::default(), ThemeState::Inactive);
        assert_eq!(HeaderRule::default().color, RgbaColor::WHITE);
        assert_eq!(HeaderRule::default().align, Align::Center);
        assert_eq!(LogoRule::default(), LogoRule { left: 0.0, top: 0.0 });
    }

    #[test]
    fn test_theme_state_serialization() {
        assert_eq!(serde_json::to_string(&ThemeState::Active).unwrap(), "\"ACTIVE\"");
        let state: ThemeState = serde_json::from_str("\"INACTIVE\"").unwrap();
        assert_eq!(state, ThemeState::Inactive);
    }

    #[test]
    fn test_align_serialization() {
        let align: Align = serde_json::from_str("\"RIGHT\"").unwrap();
        assert_eq!(align, Align::Right);
        assert_eq!(align.as_css(), "right");
    }
}

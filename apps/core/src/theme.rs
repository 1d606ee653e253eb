//! Light/dark theme. The shell owns a [`ThemeContext`] and hands it to every
//! renderer; nothing else reaches for global state to decide colours.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark mode",
            Self::Light => "light mode",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub const fn palette(self) -> Palette {
        match self {
            Self::Dark => Palette {
                background: Rgb(18, 18, 24),
                foreground: Rgb(230, 230, 235),
                muted: Rgb(130, 130, 145),
                accent: Rgb(0, 200, 220),
                focus: Rgb(255, 210, 70),
                error: Rgb(255, 95, 95),
            },
            Self::Light => Palette {
                background: Rgb(245, 245, 240),
                foreground: Rgb(30, 30, 35),
                muted: Rgb(110, 110, 120),
                accent: Rgb(0, 0, 238),
                focus: Rgb(200, 110, 0),
                error: Rgb(190, 20, 20),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub background: Rgb,
    pub foreground: Rgb,
    pub muted: Rgb,
    pub accent: Rgb,
    pub focus: Rgb,
    pub error: Rgb,
}

/// Application-wide theme handle.
#[derive(Debug, Clone, Default)]
pub struct ThemeContext {
    theme: Theme,
}

impl ThemeContext {
    pub const fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn toggle(&mut self) {
        self.theme = self.theme.toggled();
    }

    pub const fn theme(&self) -> Theme {
        self.theme
    }

    pub const fn is_light(&self) -> bool {
        matches!(self.theme, Theme::Light)
    }

    pub const fn palette(&self) -> Palette {
        self.theme.palette()
    }
}

#[cfg(test)]
mod tests {
    use super::{Theme, ThemeContext};

    #[test]
    fn starts_dark_and_flips_on_toggle() {
        let mut context = ThemeContext::default();
        assert_eq!(context.theme(), Theme::Dark);
        context.toggle();
        assert!(context.is_light());
        assert_eq!(context.theme().label(), "light mode");
        context.toggle();
        assert_eq!(context.theme(), Theme::Dark);
    }

    #[test]
    fn modes_have_distinct_palettes() {
        assert_ne!(Theme::Dark.palette(), Theme::Light.palette());
    }

    #[test]
    fn parse_accepts_either_mode() {
        assert_eq!(Theme::parse(" Light "), Some(Theme::Light));
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("sepia"), None);
    }
}

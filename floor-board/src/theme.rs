//! Theme passed into rendering code
//!
//! Rendering reads colors from a [`Theme`] value it is given, never from a
//! process-wide dark-mode flag.

use serde::{Deserialize, Serialize};
use shared::models::Occasion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Theme {
    pub mode: ThemeMode,
}

impl Theme {
    pub const LIGHT: Theme = Theme {
        mode: ThemeMode::Light,
    };
    pub const DARK: Theme = Theme {
        mode: ThemeMode::Dark,
    };

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Fill for a reservation, keyed by occasion
    pub fn occasion_color(&self, occasion: Option<Occasion>) -> Rgb {
        let dark = self.is_dark();
        match occasion {
            Some(Occasion::Birthday) if dark => Rgb(0xb4, 0x5c, 0x8c),
            Some(Occasion::Birthday) => Rgb(0xf4, 0xa6, 0xcd),
            Some(Occasion::Anniversary) if dark => Rgb(0x9b, 0x3b, 0x3b),
            Some(Occasion::Anniversary) => Rgb(0xf2, 0x8b, 0x82),
            Some(Occasion::Business) if dark => Rgb(0x2f, 0x55, 0x8a),
            Some(Occasion::Business) => Rgb(0x8a, 0xb4, 0xf8),
            Some(Occasion::Date) if dark => Rgb(0x7a, 0x3e, 0x9d),
            Some(Occasion::Date) => Rgb(0xd7, 0xae, 0xfb),
            Some(Occasion::Celebration) if dark => Rgb(0x8a, 0x6d, 0x1f),
            Some(Occasion::Celebration) => Rgb(0xfd, 0xd6, 0x63),
            Some(Occasion::Other) | None if dark => Rgb(0x3c, 0x40, 0x43),
            Some(Occasion::Other) | None => Rgb(0xe8, 0xea, 0xed),
        }
    }

    /// Background for cards and table outlines
    pub fn surface(&self) -> Rgb {
        if self.is_dark() {
            Rgb(0x20, 0x21, 0x24)
        } else {
            Rgb(0xff, 0xff, 0xff)
        }
    }

    /// Text color readable on [`Theme::surface`]
    pub fn text(&self) -> Rgb {
        if self.is_dark() {
            Rgb(0xe8, 0xea, 0xed)
        } else {
            Rgb(0x20, 0x21, 0x24)
        }
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModePref {
    /// Follow the system color-scheme signal.
    #[default]
    System,
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    #[default]
    Tropical,
    Neutral,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectiveMode {
    Light,
    Dark,
}

/// Resolved colors for one (mode, accent) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub accent: &'static str,
    pub background: &'static str,
    pub paper: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub chip_background: &'static str,
}

/// User theme preferences. The effective mode is always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeSettings {
    pub mode_pref: ModePref,
    pub accent: Accent,
}

impl ThemeSettings {
    /// Builds settings from raw stored strings; unknown values fall back to defaults.
    pub fn from_stored(mode: Option<&str>, accent: Option<&str>) -> Self {
        Self {
            mode_pref: mode.and_then(|raw| raw.parse().ok()).unwrap_or_default(),
            accent: accent.and_then(|raw| raw.parse().ok()).unwrap_or_default(),
        }
    }

    pub fn effective_mode(&self, system_prefers_dark: bool) -> EffectiveMode {
        match self.mode_pref {
            ModePref::System if system_prefers_dark => EffectiveMode::Dark,
            ModePref::System | ModePref::Light => EffectiveMode::Light,
            ModePref::Dark => EffectiveMode::Dark,
        }
    }

    /// Switches between explicit light and dark, leaving "system" behind.
    pub fn toggle_mode(&mut self) {
        self.mode_pref = match self.mode_pref {
            ModePref::Dark => ModePref::Light,
            ModePref::System | ModePref::Light => ModePref::Dark,
        };
    }

    pub fn palette(&self, system_prefers_dark: bool) -> Palette {
        let accent = self.accent.color();
        match self.effective_mode(system_prefers_dark) {
            EffectiveMode::Dark => Palette {
                accent,
                background: "#0F1414",
                paper: "#151C1C",
                text: "#E6F1F1",
                muted: "#A9C0C0",
                chip_background: "rgba(92,165,165,0.16)",
            },
            EffectiveMode::Light => Palette {
                accent,
                background: "#F2FAFA",
                paper: "#FFFFFF",
                text: "#2C3A3A",
                muted: "#7C8F8F",
                chip_background: "rgba(92,165,165,0.12)",
            },
        }
    }
}

impl ModePref {
    pub fn as_str(self) -> &'static str {
        match self {
            ModePref::System => "system",
            ModePref::Light => "light",
            ModePref::Dark => "dark",
        }
    }
}

impl Accent {
    pub fn as_str(self) -> &'static str {
        match self {
            Accent::Tropical => "tropical",
            Accent::Neutral => "neutral",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Accent::Tropical => "#5CA5A5",
            Accent::Neutral => "#6C7A89",
        }
    }
}

impl EffectiveMode {
    pub fn as_str(self) -> &'static str {
        match self {
            EffectiveMode::Light => "light",
            EffectiveMode::Dark => "dark",
        }
    }
}

impl FromStr for ModePref {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "system" => Ok(ModePref::System),
            "light" => Ok(ModePref::Light),
            "dark" => Ok(ModePref::Dark),
            other => Err(format!("unknown theme mode `{other}`")),
        }
    }
}

impl FromStr for Accent {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "tropical" => Ok(Accent::Tropical),
            "neutral" => Ok(Accent::Neutral),
            other => Err(format!("unknown accent `{other}`")),
        }
    }
}

impl fmt::Display for ModePref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Accent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use anyhow::Result;
use async_trait::async_trait;
use strum_macros::{Display, EnumIter, EnumString};

pub const FONT_SIZE_MIN: u16 = 10;
pub const FONT_SIZE_MAX: u16 = 24;
pub const FONT_SIZE_STEP: u16 = 2;
pub const FONT_SIZE_DEFAULT: u16 = 14;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }
}

/// The two display preferences that survive across sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preferences {
    pub theme: Theme,
    pub font_size: u16,
}

impl Default for Preferences {
    fn default() -> Preferences {
        return Preferences {
            theme: Theme::default(),
            font_size: FONT_SIZE_DEFAULT,
        };
    }
}

/// Persistence seam for [`Preferences`], so the storage medium can be mocked
/// or swapped. Loaded once at startup, saved whenever either field changes.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn load(&self) -> Result<Preferences>;
    async fn save(&self, preferences: &Preferences) -> Result<()>;
}

pub type PreferenceStoreBox = Box<dyn PreferenceStore>;

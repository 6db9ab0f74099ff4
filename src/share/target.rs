//! Share destinations

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Where an article can be shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SharePlatform {
    Facebook,
    Twitter,
    LinkedIn,
    WhatsApp,
    Telegram,
    /// Put the article link on the clipboard
    Copy,
}

/// A trigger carried a tag no platform answers to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported share platform: {0}")]
pub struct UnknownPlatform(pub String);

impl SharePlatform {
    /// Every platform, in the order the share triggers are shown
    pub const ALL: [Self; 6] = [
        Self::Facebook,
        Self::Twitter,
        Self::LinkedIn,
        Self::WhatsApp,
        Self::Telegram,
        Self::Copy,
    ];

    /// Tag carried by share triggers
    pub fn tag(self) -> &'static str {
        match self {
            Self::Facebook => "facebook",
            Self::Twitter => "twitter",
            Self::LinkedIn => "linkedin",
            Self::WhatsApp => "whatsapp",
            Self::Telegram => "telegram",
            Self::Copy => "copy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::Twitter => "Twitter",
            Self::LinkedIn => "LinkedIn",
            Self::WhatsApp => "WhatsApp",
            Self::Telegram => "Telegram",
            Self::Copy => "Copiar link",
        }
    }

    /// Keyboard shortcut on the article view
    pub fn shortcut(self) -> char {
        match self {
            Self::Facebook => 'f',
            Self::Twitter => 't',
            Self::LinkedIn => 'l',
            Self::WhatsApp => 'w',
            Self::Telegram => 'g',
            Self::Copy => 'c',
        }
    }

    pub fn from_shortcut(key: char) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.shortcut() == key)
    }
}

impl fmt::Display for SharePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for SharePlatform {
    type Err = UnknownPlatform;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.tag() == tag)
            .ok_or_else(|| UnknownPlatform(tag.to_string()))
    }
}

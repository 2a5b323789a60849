//! Closed catalog of sharing platforms.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A sharing platform a vanity URL can be decorated for.
///
/// The set is closed by design: each platform carries a fixed one-letter
/// path suffix (e.g. `-f`) that disambiguates which platform a redirect
/// request targets. Suffixes are collision-free within the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Platform {
    Facebook,
    Twitter,
    Linkedin,
    Pinterest,
    Email,
    VanityUrl,
}

impl Platform {
    /// Every platform, in the order share links are rendered.
    pub const ALL: [Platform; 6] = [
        Platform::Facebook,
        Platform::Twitter,
        Platform::Linkedin,
        Platform::Pinterest,
        Platform::Email,
        Platform::VanityUrl,
    ];

    /// Stable key used in UTM parameters and hit counter rows.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Linkedin => "linkedin",
            Platform::Pinterest => "pinterest",
            Platform::Email => "email",
            Platform::VanityUrl => "vanity-url",
        }
    }

    /// Path suffix appended to a vanity slug, dash included.
    pub fn suffix(&self) -> &'static str {
        match self {
            Platform::Facebook => "-f",
            Platform::Twitter => "-t",
            Platform::Linkedin => "-l",
            Platform::Pinterest => "-p",
            Platform::Email => "-e",
            Platform::VanityUrl => "-c",
        }
    }

    /// `utm_medium` value for links shared through this platform.
    ///
    /// Email and copied vanity URLs report themselves verbatim; everything
    /// else is plain `social`.
    pub fn medium(&self) -> &'static str {
        match self {
            Platform::Email => "email",
            Platform::VanityUrl => "vanity-url",
            _ => "social",
        }
    }

    /// Resolves a platform from a dash-prefixed path suffix.
    ///
    /// Matching is exact-string over the closed catalog; unknown suffixes
    /// return `None`.
    pub fn from_suffix(suffix: &str) -> Option<Platform> {
        Platform::ALL.iter().copied().find(|p| p.suffix() == suffix)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Platform {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .iter()
            .copied()
            .find(|p| p.key() == s)
            .ok_or(())
    }
}

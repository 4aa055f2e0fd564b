//! # Image Extension Module
//!
//! This module defines the [`Extension`] enum, the file extension an archived image is saved
//! with. Only a small allow-list of image formats is accepted; anything else found at the end
//! of a URL (query-only URLs, `.php` endpoints, missing extensions) falls back to
//! [`Extension::JPG`].
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use log::debug;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::error::ExtensionError;

/// Extensions accepted when parsing an image URL.
///
/// `jpg` and `jpeg` are kept apart so that the archived file keeps the spelling the server used.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Extension {
    JPG,
    JPEG,
    PNG,
    GIF,
    WEBP,
    SVG,
    BMP,
}

impl Extension {
    /// Used whenever a URL yields nothing on the allow-list.
    pub const FALLBACK: Self = Self::JPG;

    /// Parses an extension string (case-insensitively), falling back to [`Extension::FALLBACK`].
    ///
    /// This function will never panic.
    ///
    /// ```
    /// # use imgzip_common::extension::Extension;
    /// assert_eq!(Extension::guess_format("PNG"), Extension::PNG);
    /// assert_eq!(Extension::guess_format("php"), Extension::JPG);
    /// ```
    pub fn guess_format(s: &str) -> Self {
        Self::from_str(s).unwrap_or(Self::FALLBACK)
    }

    /// Extracts the extension of the file a URL points to.
    ///
    /// Takes whatever follows the last `.` of the URL's path, lower-cases it and checks it
    /// against the allow-list. Malformed URLs and unlisted or absent extensions all yield
    /// [`Extension::FALLBACK`].
    ///
    /// ```
    /// # use imgzip_common::extension::Extension;
    /// assert_eq!(Extension::from_url("https://a.com/img/Cat.PNG?w=300"), Extension::PNG);
    /// assert_eq!(Extension::from_url("https://a.com/render"), Extension::JPG);
    /// assert_eq!(Extension::from_url("not even a url"), Extension::JPG);
    /// ```
    pub fn from_url(url: &str) -> Self {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(error) => {
                debug!("Failed to parse {} for its extension: {}", url, error);
                return Self::FALLBACK;
            }
        };

        match parsed.path().rsplit('.').next() {
            Some(ext) => Self::guess_format(ext),
            None => Self::FALLBACK,
        }
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::JPG => "jpg",
            Self::JPEG => "jpeg",
            Self::PNG => "png",
            Self::GIF => "gif",
            Self::WEBP => "webp",
            Self::SVG => "svg",
            Self::BMP => "bmp",
        }
    }
}

impl FromStr for Extension {
    type Err = ExtensionError;

    /// Parses a string slice into an `Extension` variant.
    ///
    /// The parsing is case-insensitive. Anything off the allow-list is an
    /// [`ExtensionError::NotAllowed`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" => Ok(Self::JPG),
            "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "gif" => Ok(Self::GIF),
            "webp" => Ok(Self::WEBP),
            "svg" => Ok(Self::SVG),
            "bmp" => Ok(Self::BMP),
            _ => Err(ExtensionError::NotAllowed {
                extension: s.to_string(),
            }),
        }
    }
}

impl Display for Extension {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

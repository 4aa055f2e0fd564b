//! Representation of an image found on a page
//!
//! # ImageDescriptor
//! An [`ImageDescriptor` struct](ImageDescriptor) is what the page scraper hands over for every
//! image it found: where to fetch it, its alt text and the dimensions it was rendered with.
//!
//! Descriptors are plain input records. They are read once per run and never modified.
use std::collections::BTreeMap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::extension::Extension;
use crate::sanitize::sanitize_name;
use crate::tier::{classify_size, SizeTier};

/// Catchall model for one image the scraper found.
///
/// Serializes to the same shape the scraper emits (`url`, `alt`, `width`, `height`).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDescriptor {
    /// Absolute URL of the image.
    pub url: String,
    /// Alt text or any other label the scraper came up with. May be empty.
    #[serde(rename = "alt", alias = "altText", default)]
    pub alt_text: String,
    /// Width in pixels, `0` if unknown.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels, `0` if unknown.
    #[serde(default)]
    pub height: u32,
}

impl Debug for ImageDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageDescriptor")
            .field("Image URL", &self.url)
            .field("Alt Text", &self.alt_text)
            .field("Dimensions", &format_args!("{}x{}", self.width, self.height))
            .finish()
    }
}

impl ImageDescriptor {
    pub fn new(url: impl Into<String>, alt_text: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            alt_text: alt_text.into(),
            width,
            height,
        }
    }

    #[inline]
    pub fn tier(&self) -> SizeTier {
        classify_size(self.width, self.height)
    }

    #[inline]
    pub fn extension(&self) -> Extension {
        Extension::from_url(&self.url)
    }

    /// File name this image is archived under, e.g. `Cat_Photo_300x300.png`.
    ///
    /// `fallback_name` is used when the alt text sanitizes down to nothing.
    pub fn file_name(&self, fallback_name: &str) -> String {
        let sanitized = sanitize_name(&self.alt_text);
        let name = if sanitized.is_empty() {
            fallback_name
        } else {
            sanitized.as_str()
        };

        format!(
            "{}_{}x{}.{}",
            name,
            self.width,
            self.height,
            self.extension()
        )
    }
}

/// How many descriptors fall in each size tier.
///
/// Lets a host show what a run is about to produce before any image is fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSummary {
    pub total: usize,
    pub tiers: BTreeMap<SizeTier, usize>,
}

impl TierSummary {
    pub fn from_descriptors(descriptors: &[ImageDescriptor]) -> Self {
        let mut tiers = BTreeMap::new();

        descriptors.iter().for_each(|descriptor| {
            *tiers.entry(descriptor.tier()).or_insert(0) += 1;
        });

        Self {
            total: descriptors.len(),
            tiers,
        }
    }

    /// Number of descriptors in `tier`, `0` if none.
    #[inline]
    pub fn count(&self, tier: SizeTier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or_default()
    }
}

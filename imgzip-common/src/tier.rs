//! # Size Tier Module
//!
//! Images are sorted into one folder per [`SizeTier`], picked from the largest of their two
//! pixel dimensions. A dimension of `0` means the producer couldn't measure the image, so
//! unmeasured images always land in [`SizeTier::Thumbnail`].
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Upper bound (exclusive) of [`SizeTier::Thumbnail`].
pub const THUMBNAIL_MAX: u32 = 200;
/// Upper bound (exclusive) of [`SizeTier::Small`].
pub const SMALL_MAX: u32 = 800;
/// Upper bound (inclusive) of [`SizeTier::Medium`].
pub const MEDIUM_MAX: u32 = 1920;

/// Folder an image is filed under inside the archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeTier {
    /// Longest side below 200px.
    Thumbnail,
    /// Longest side from 200px up to 799px.
    Small,
    /// Longest side from 800px up to and including 1920px.
    Medium,
    /// Longest side above 1920px.
    Large,
}

impl SizeTier {
    /// Every tier, smallest first.
    pub const ALL: [SizeTier; 4] = [
        SizeTier::Thumbnail,
        SizeTier::Small,
        SizeTier::Medium,
        SizeTier::Large,
    ];

    /// Name of the tier as used for the archive folder.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }
}

impl Display for SizeTier {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies an image by the larger of its two dimensions.
///
/// Total over every input; there is no error case.
///
/// ```
/// # use imgzip_common::tier::{classify_size, SizeTier};
/// assert_eq!(classify_size(300, 120), SizeTier::Small);
/// assert_eq!(classify_size(0, 0), SizeTier::Thumbnail);
/// ```
#[inline]
pub fn classify_size(width: u32, height: u32) -> SizeTier {
    let max_dimension = width.max(height);

    if max_dimension < THUMBNAIL_MAX {
        SizeTier::Thumbnail
    } else if max_dimension < SMALL_MAX {
        SizeTier::Small
    } else if max_dimension <= MEDIUM_MAX {
        SizeTier::Medium
    } else {
        SizeTier::Large
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_200_is_thumbnail() {
        for w in 0..THUMBNAIL_MAX {
            assert_eq!(classify_size(w, THUMBNAIL_MAX - 1 - w), SizeTier::Thumbnail);
        }
        assert_eq!(classify_size(199, 199), SizeTier::Thumbnail);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(classify_size(200, 0), SizeTier::Small);
        assert_eq!(classify_size(799, 10), SizeTier::Small);
        assert_eq!(classify_size(0, 800), SizeTier::Medium);
        assert_eq!(classify_size(1920, 1920), SizeTier::Medium);
        assert_eq!(classify_size(1921, 1), SizeTier::Large);
        assert_eq!(classify_size(u32::MAX, u32::MAX), SizeTier::Large);
    }

    #[test]
    fn uses_the_longest_side() {
        assert_eq!(classify_size(150, 2400), SizeTier::Large);
        assert_eq!(classify_size(2400, 150), SizeTier::Large);
    }

    #[test]
    fn folder_names() {
        let names: Vec<String> = SizeTier::ALL.iter().map(|t| t.to_string()).collect();
        assert_eq!(names, ["thumbnail", "small", "medium", "large"]);
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage category of an object, derived from its sniffed MIME type.
///
/// Categories determine which secondary-store bucket receives the mirrored
/// copy of an object. [`Category::Unsupported`] content is never mirrored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Image,
    Audio,
    Video,
    Unsupported,
}

impl Category {
    /// Route a MIME type to its category by prefix match.
    pub fn from_mime(mime: &str) -> Self {
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("audio/") {
            Self::Audio
        } else if mime.starts_with("video/") {
            Self::Video
        } else {
            Self::Unsupported
        }
    }

    /// Lowercase name, used in log lines and bucket selection.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Unsupported => "unsupported",
        }
    }

    /// Whether objects of this category are mirrored to the secondary store.
    pub fn is_mirrored(&self) -> bool {
        !matches!(self, Self::Unsupported)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_prefix_routes_to_image() {
        assert_eq!(Category::from_mime("image/jpeg"), Category::Image);
        assert_eq!(Category::from_mime("image/png"), Category::Image);
    }

    #[test]
    fn audio_prefix_routes_to_audio() {
        assert_eq!(Category::from_mime("audio/mpeg"), Category::Audio);
    }

    #[test]
    fn video_prefix_routes_to_video() {
        assert_eq!(Category::from_mime("video/mp4"), Category::Video);
    }

    #[test]
    fn anything_else_is_unsupported() {
        assert_eq!(Category::from_mime("application/pdf"), Category::Unsupported);
        assert_eq!(Category::from_mime("text/html; charset=utf-8"), Category::Unsupported);
        assert_eq!(Category::from_mime("application/octet-stream"), Category::Unsupported);
        assert_eq!(Category::from_mime(""), Category::Unsupported);
    }

    #[test]
    fn prefix_match_requires_the_slash() {
        // "imagex/y" must not route to Image.
        assert_eq!(Category::from_mime("imagex/weird"), Category::Unsupported);
    }

    #[test]
    fn only_unsupported_is_excluded_from_mirroring() {
        assert!(Category::Image.is_mirrored());
        assert!(Category::Audio.is_mirrored());
        assert!(Category::Video.is_mirrored());
        assert!(!Category::Unsupported.is_mirrored());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(Category::Image.to_string(), "image");
        assert_eq!(Category::Unsupported.to_string(), "unsupported");
    }
}

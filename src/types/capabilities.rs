//! Provider model capability reporting

use serde::{Deserialize, Serialize};

/// What generation modes a provider model supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationCapabilities {
    pub text_to_image: bool,
    pub image_to_image: bool,
    pub text_to_video: bool,
    pub image_to_video: bool,
    pub upscale: bool,
    pub inpaint: bool,
}

impl GenerationCapabilities {
    /// Still-image generation only.
    pub fn image_only() -> Self {
        Self {
            text_to_image: true,
            image_to_image: true,
            ..Default::default()
        }
    }

    /// Video generation only.
    pub fn video_only() -> Self {
        Self {
            text_to_video: true,
            image_to_video: true,
            ..Default::default()
        }
    }

    /// Everything (multi-modal providers).
    pub fn full() -> Self {
        Self {
            text_to_image: true,
            image_to_image: true,
            text_to_video: true,
            image_to_video: true,
            upscale: true,
            inpaint: true,
        }
    }

    /// Merge capabilities using OR logic (combines two capability sets).
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            text_to_image: self.text_to_image || other.text_to_image,
            image_to_image: self.image_to_image || other.image_to_image,
            text_to_video: self.text_to_video || other.text_to_video,
            image_to_video: self.image_to_video || other.image_to_video,
            upscale: self.upscale || other.upscale,
            inpaint: self.inpaint || other.inpaint,
        }
    }

    /// Whether any video mode is supported.
    pub fn supports_video(&self) -> bool {
        self.text_to_video || self.image_to_video
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_is_union() {
        let merged =
            GenerationCapabilities::image_only().merge(&GenerationCapabilities::video_only());
        assert!(merged.text_to_image);
        assert!(merged.text_to_video);
        assert!(!merged.upscale);
        assert!(merged.supports_video());
    }
}

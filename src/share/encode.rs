use std::io::Cursor;

use crate::foundation::error::{DoodleError, DoodleResult};
use crate::render::frame::FrameRGBA;

/// Encoded container of an [`ImageBuffer`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImageFormat {
    #[default]
    Png,
}

impl ImageFormat {
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
        }
    }
}

/// Encoded image ready to hand to a share target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    /// Encoded file bytes.
    pub bytes: Vec<u8>,
}

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

impl ImageBuffer {
    /// Whether the bytes start with the signature of `format`.
    pub fn has_valid_signature(&self) -> bool {
        match self.format {
            ImageFormat::Png => self.bytes.starts_with(&PNG_MAGIC),
        }
    }
}

/// Encode a frame as PNG with straight alpha.
pub fn encode_png(frame: &FrameRGBA) -> DoodleResult<ImageBuffer> {
    let straight = frame.to_straight_rgba8();
    let img = image::RgbaImage::from_raw(frame.width, frame.height, straight)
        .ok_or_else(|| DoodleError::encode("frame byte length does not match its dimensions"))?;

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
        .map_err(|e| DoodleError::encode(format!("png: {e}")))?;

    Ok(ImageBuffer {
        width: frame.width,
        height: frame.height,
        format: ImageFormat::Png,
        bytes,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/share/encode.rs"]
mod tests;

//! QR visual codec capabilities
//!
//! Pixel-level QR rendering and camera-frame decoding live outside this
//! crate. The core only needs these two seams.

use crate::error::QuickSignResult;

/// Renders payload text into a displayable QR image
pub trait QrRenderer {
    type Image;

    fn render(&self, text: &str) -> QuickSignResult<Self::Image>;
}

/// Decodes one camera frame into payload text
///
/// Frames without a readable code produce `None`; they are not errors.
pub trait FrameDecoder {
    type Frame;

    fn decode(&self, frame: &Self::Frame) -> Option<String>;
}

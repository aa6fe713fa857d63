//! Video frame acquisition seam

use bytes::Bytes;

use crate::error::CaptureError;

/// Encoding of an acquired frame buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Jpeg,
    Rgb565,
    Grayscale,
    Yuv422,
}

impl PixelFormat {
    pub fn name(&self) -> &'static str {
        match self {
            PixelFormat::Jpeg => "JPEG",
            PixelFormat::Rgb565 => "RGB565",
            PixelFormat::Grayscale => "GRAYSCALE",
            PixelFormat::Yuv422 => "YUV422",
        }
    }
}

/// One encoded frame.
///
/// Owns its buffer; dropping the frame releases the underlying capture
/// buffer back to the source. Holding a frame across acquisitions is not
/// supported: acquire, emit, drop, every iteration.
#[derive(Debug, Clone)]
pub struct Frame {
    pub bytes: Bytes,
    pub format: PixelFormat,
}

impl Frame {
    pub fn new(bytes: Bytes, format: PixelFormat) -> Self {
        Self { bytes, format }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Produces one encoded frame per acquisition call.
///
/// Acquisition may block until a frame is ready. At most one consumer drives
/// a source at a time; the server enforces this with an exclusive handle.
pub trait FrameSource: Send {
    fn acquire(&mut self) -> Result<Frame, CaptureError>;
}

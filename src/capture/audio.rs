//! PCM audio acquisition seam

use crate::error::CaptureError;

/// Produces raw PCM on demand.
///
/// `read_block` blocks until data is available and fills up to `buf.len()`
/// bytes, returning the number written. Zero is a valid return and means no
/// data was ready; callers must not emit anything for it. The hardware
/// sample clock behind the read is the pacing mechanism for audio streaming.
pub trait AudioSource: Send {
    fn read_block(&mut self, buf: &mut [u8]) -> Result<usize, CaptureError>;
}

//! Multipart JPEG stream framing
//!
//! Each frame travels as one part of a `multipart/x-mixed-replace` response:
//! boundary marker, a part header declaring the exact payload length, the raw
//! JPEG bytes, then the next boundary marker.

use bytes::Bytes;

/// Boundary token baked into the stock control panel
pub const PART_BOUNDARY: &str = "123456789000000000000987654321";

/// Content type of the video streaming response
pub const STREAM_CONTENT_TYPE: &str =
    "multipart/x-mixed-replace;boundary=123456789000000000000987654321";

/// Marker separating two parts
pub const STREAM_BOUNDARY: &str = "\r\n--123456789000000000000987654321\r\n";

/// Boundary marker as a chunk payload
pub fn boundary() -> Bytes {
    Bytes::from_static(STREAM_BOUNDARY.as_bytes())
}

/// Part header declaring the byte length of the JPEG payload that follows
pub fn part_header(len: usize) -> Bytes {
    Bytes::from(format!(
        "Content-Type: image/jpeg\r\nContent-Length: {len}\r\n\r\n"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_marker_wraps_token() {
        let marker = boundary();
        let text = std::str::from_utf8(&marker).unwrap();
        assert!(text.starts_with("\r\n--"));
        assert!(text.ends_with("\r\n"));
        assert!(text.contains(PART_BOUNDARY));
    }

    #[test]
    fn content_type_carries_token() {
        assert!(STREAM_CONTENT_TYPE.starts_with("multipart/x-mixed-replace;boundary="));
        assert!(STREAM_CONTENT_TYPE.ends_with(PART_BOUNDARY));
    }

    #[test]
    fn part_header_declares_length() {
        let header = part_header(31337);
        let text = std::str::from_utf8(&header).unwrap();
        assert_eq!(
            text,
            "Content-Type: image/jpeg\r\nContent-Length: 31337\r\n\r\n"
        );
    }
}

/// Errors that can occur during frame encoding/decoding.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// The first byte of the frame is not the sync byte.
    #[error("invalid frame sync byte 0x{found:02X} (expected 0xA4)")]
    BadSync { found: u8 },

    /// The buffer size does not match the declared payload length.
    #[error("frame length mismatch: declared payload {declared}, expected {expected} bytes, got {actual}")]
    LengthMismatch {
        declared: u8,
        expected: usize,
        actual: usize,
    },

    /// The checksum byte does not match the XOR of the preceding bytes.
    #[error("frame checksum mismatch: computed 0x{expected:02X}, received 0x{actual:02X}")]
    ChecksumMismatch { expected: u8, actual: u8 },

    /// The message id byte is not a recognized protocol id.
    #[error("unknown message id 0x{0:02X}")]
    UnknownId(u8),

    /// A read ran past the end of the available bytes.
    #[error("truncated input: needed {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },

    /// The payload exceeds the single-byte length field or the configured maximum.
    #[error("payload too large ({size} bytes, max {max})")]
    PayloadTooLarge { size: usize, max: usize },

    /// An I/O error occurred while reading or writing frames.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The stream was closed before a complete frame was received.
    #[error("connection closed (incomplete frame)")]
    ConnectionClosed,
}

impl FrameError {
    /// True for errors raised because received bytes are not a well-formed frame.
    pub fn is_invalid_frame(&self) -> bool {
        matches!(
            self,
            Self::BadSync { .. }
                | Self::LengthMismatch { .. }
                | Self::ChecksumMismatch { .. }
                | Self::UnknownId(_)
                | Self::Truncated { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, FrameError>;

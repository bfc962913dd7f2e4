use antwire_frame::{FrameError, MessageId};

/// Errors that can occur while encoding or decoding typed messages.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The raw bytes are not a well-formed frame.
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// A decoder was applied to a frame carrying a different message id.
    #[error("wrong message id: received {received}, expected {expected}")]
    WrongMessageId {
        received: MessageId,
        expected: MessageId,
    },

    /// The channel response carries a code outside the response code table.
    #[error("unknown response code 0x{0:02X}")]
    UnknownResponseCode(u8),

    /// The channel type byte is not a known channel type.
    #[error("unknown channel type 0x{0:02X}")]
    UnknownChannelType(u8),

    /// The version string is not valid UTF-8.
    #[error("version text is not valid UTF-8: {0}")]
    InvalidText(#[from] std::string::FromUtf8Error),

    /// The codec registered for this id can only encode.
    #[error("no decoder for {0}")]
    NotDecodable(MessageId),

    /// No codec is registered for this id.
    #[error("no codec registered for {0}")]
    NoCodec(MessageId),
}

impl MessageError {
    /// True when the input bytes themselves were malformed.
    pub fn is_invalid_data(&self) -> bool {
        match self {
            Self::Frame(err) => err.is_invalid_frame(),
            Self::WrongMessageId { .. }
            | Self::UnknownResponseCode(_)
            | Self::UnknownChannelType(_)
            | Self::InvalidText(_) => true,
            Self::NotDecodable(_) | Self::NoCodec(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, MessageError>;

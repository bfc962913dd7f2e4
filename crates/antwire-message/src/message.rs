//! Codec capability traits and field layouts.
//!
//! Every concrete message type implements [`Message`], which fixes its id and
//! wire layout. Types that can be sent to the dongle add [`Encodable`]; types
//! the dongle sends back add [`Decodable`]. A type may implement both.

use antwire_frame::{decompose, DecodedFrame, Frame, FrameError, MessageId};
use bytes::{Bytes, BytesMut};
use serde::Serialize;

use crate::error::{MessageError, Result};

/// Wire encoding of a single payload field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    U8,
    U16,
    U64,
    /// One byte decoded into named flags.
    Bitfield,
    /// Variable-length NUL-terminated text.
    Text,
}

impl FieldKind {
    /// Width on the wire, or `None` for variable-length fields.
    pub fn width(self) -> Option<usize> {
        match self {
            Self::U8 | Self::Bitfield => Some(1),
            Self::U16 => Some(2),
            Self::U64 => Some(8),
            Self::Text => None,
        }
    }
}

/// One named field of a message layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self { name, kind }
    }
}

/// Total width of a layout, or `None` if any field is variable-length.
pub fn layout_width(layout: &[Field]) -> Option<usize> {
    layout.iter().map(|field| field.kind.width()).sum()
}

/// A message type with a fixed id and payload layout.
pub trait Message {
    const ID: MessageId;
    const LAYOUT: &'static [Field];
}

macro_rules! impl_message {
    ($ty:ty, $id:ident, [$($name:literal: $kind:ident),* $(,)?]) => {
        impl $crate::message::Message for $ty {
            const ID: ::antwire_frame::MessageId = ::antwire_frame::MessageId::$id;
            const LAYOUT: &'static [$crate::message::Field] = &[
                $($crate::message::Field::new($name, $crate::message::FieldKind::$kind)),*
            ];
        }
    };
}
pub(crate) use impl_message;

/// A message that can be composed into a frame.
pub trait Encodable: Message {
    /// Append the packed payload fields to `dst`.
    fn encode_payload(&self, dst: &mut BytesMut);

    fn to_frame(&self) -> Frame {
        let mut payload = BytesMut::new();
        self.encode_payload(&mut payload);
        Frame::new(Self::ID, payload.freeze())
    }

    /// Compose the complete wire frame.
    fn to_bytes(&self) -> Result<Bytes> {
        Ok(self.to_frame().to_bytes()?)
    }
}

/// A message that can be read back from a decoded frame.
pub trait Decodable: Message + Sized {
    /// Parse the payload of a frame already known to carry [`Message::ID`].
    fn decode_payload(frame: &DecodedFrame) -> Result<Self>;

    /// Parse a decoded frame, checking its id first.
    fn from_frame(frame: &DecodedFrame) -> Result<Self> {
        if frame.id != Self::ID {
            return Err(MessageError::WrongMessageId {
                received: frame.id,
                expected: Self::ID,
            });
        }
        Self::decode_payload(frame)
    }

    /// Decompose raw wire bytes and parse the result.
    fn from_bytes(raw: &[u8]) -> Result<Self> {
        let frame = decompose(raw)?;
        Self::from_frame(&frame)
    }
}

/// Borrow the first `needed` payload bytes or fail with `Truncated`.
pub(crate) fn fixed_payload(frame: &DecodedFrame, needed: usize) -> Result<&[u8]> {
    frame.payload.get(..needed).ok_or_else(|| {
        MessageError::Frame(FrameError::Truncated {
            needed,
            available: frame.payload.len(),
        })
    })
}

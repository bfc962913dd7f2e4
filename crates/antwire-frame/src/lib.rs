//! Frame codec for the ANT serial interface of USB radio dongles.
//!
//! Every message is framed as:
//! - A sync byte (0xA4)
//! - A 1-byte payload length
//! - A 1-byte message id
//! - The payload
//! - A 1-byte XOR checksum over everything before it
//!
//! Broadcast, acknowledged and burst data may carry an extended-data block
//! after their 9-byte payload; see [`extended`].

pub mod codec;
pub mod error;
pub mod extended;
pub mod id;
pub mod reader;
pub mod view;
pub mod writer;

pub use codec::{
    checksum, compose, decode_frame, decompose, decompose_to_view, decompose_with_config,
    encode_frame, DecodedFrame, Frame, FrameConfig, TrailingBytes, FRAME_OVERHEAD, HEADER_SIZE,
    MAX_PAYLOAD, SYNC,
};
pub use error::{FrameError, Result};
pub use extended::{decode_extended, ChannelIdentity, ExtendedData, Rssi};
pub use id::{manufacturer, MessageId};
pub use reader::FrameReader;
pub use view::{to_hex, FrameView};
pub use writer::FrameWriter;

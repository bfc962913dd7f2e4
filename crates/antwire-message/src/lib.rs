//! Typed ANT messages on top of [`antwire_frame`].
//!
//! Each message kind is a plain struct implementing [`Message`] plus
//! [`Encodable`] (host to dongle), [`Decodable`] (dongle to host), or both.
//! [`MessageTypeRegistry`] maps message ids to type-erased codecs for dynamic
//! decoding into [`Record`]; [`Command`] is the structured form of every
//! outbound message.

pub mod capabilities;
pub mod channel_id;
pub mod command;
pub mod error;
pub mod message;
pub mod record;
pub mod registry;
pub mod response;
pub mod startup;
pub mod version;

pub use capabilities::{AdvancedOptions, AdvancedOptions2, Capabilities, StandardOptions};
pub use channel_id::ChannelId;
pub use command::{
    AssignChannel, ChannelPeriod, ChannelRfFrequency, ChannelSearchTimeout, ChannelTransmitPower,
    ChannelType, CloseChannel, Command, EnableExtendedMessages, LibConfig, OpenChannel,
    OpenRxScan, RequestMessage, ResetSystem, SetNetworkKey, UnassignChannel, DEFAULT_NETWORK_KEY,
};
pub use error::{MessageError, Result};
pub use message::{layout_width, Decodable, Encodable, Field, FieldKind, Message};
pub use record::Record;
pub use registry::{resolve_codec, CodecDescriptor, Direction, MessageTypeRegistry};
pub use response::{ChannelResponse, ResponseCode};
pub use startup::{StartUp, StartupReason};
pub use version::AntVersion;

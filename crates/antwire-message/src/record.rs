use antwire_frame::MessageId;
use serde::Serialize;

use crate::capabilities::Capabilities;
use crate::channel_id::ChannelId;
use crate::message::Message;
use crate::response::ChannelResponse;
use crate::startup::StartUp;
use crate::version::AntVersion;

/// Any decoded inbound message, tagged by `"message"` in structured form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "message", rename_all = "snake_case")]
pub enum Record {
    ChannelResponse(ChannelResponse),
    ChannelId(ChannelId),
    StartUp(StartUp),
    Capabilities(Capabilities),
    AntVersion(AntVersion),
}

impl Record {
    pub fn id(&self) -> MessageId {
        match self {
            Self::ChannelResponse(_) => ChannelResponse::ID,
            Self::ChannelId(_) => ChannelId::ID,
            Self::StartUp(_) => StartUp::ID,
            Self::Capabilities(_) => Capabilities::ID,
            Self::AntVersion(_) => AntVersion::ID,
        }
    }
}

macro_rules! impl_from {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Record {
                fn from(value: $variant) -> Self {
                    Self::$variant(value)
                }
            }
        )*
    };
}

impl_from!(ChannelResponse, ChannelId, StartUp, Capabilities, AntVersion);

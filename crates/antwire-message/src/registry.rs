use std::collections::HashMap;

use antwire_frame::{decompose, DecodedFrame, MessageId};
use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing::debug;

use crate::capabilities::Capabilities;
use crate::channel_id::ChannelId;
use crate::command::{
    AssignChannel, ChannelPeriod, ChannelRfFrequency, ChannelSearchTimeout, ChannelTransmitPower,
    CloseChannel, EnableExtendedMessages, LibConfig, OpenChannel, OpenRxScan, RequestMessage,
    ResetSystem, SetNetworkKey, UnassignChannel,
};
use crate::error::{MessageError, Result};
use crate::message::{Decodable, Encodable, Field};
use crate::record::Record;
use crate::response::ChannelResponse;
use crate::startup::StartUp;
use crate::version::AntVersion;

/// Which way a codec can carry its message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Host to dongle only.
    Send,
    /// Dongle to host only.
    Receive,
    Both,
}

type DecodeFn = fn(&DecodedFrame) -> Result<Record>;

/// Type-erased handle on one concrete message codec.
#[derive(Debug, Clone, Copy)]
pub struct CodecDescriptor {
    id: MessageId,
    layout: &'static [Field],
    encodes: bool,
    decode: Option<DecodeFn>,
}

impl CodecDescriptor {
    /// Descriptor for a send-only message.
    pub fn encoder<M: Encodable>() -> Self {
        Self {
            id: M::ID,
            layout: M::LAYOUT,
            encodes: true,
            decode: None,
        }
    }

    /// Descriptor for a receive-only message.
    pub fn decoder<M: Decodable + Into<Record>>() -> Self {
        Self {
            id: M::ID,
            layout: M::LAYOUT,
            encodes: false,
            decode: Some(decode_record::<M>),
        }
    }

    /// Descriptor for a message that travels both ways.
    pub fn bidirectional<M: Encodable + Decodable + Into<Record>>() -> Self {
        Self {
            encodes: true,
            ..Self::decoder::<M>()
        }
    }

    pub fn id(&self) -> MessageId {
        self.id
    }

    /// Protocol name of the message.
    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn layout(&self) -> &'static [Field] {
        self.layout
    }

    pub fn direction(&self) -> Direction {
        match (self.encodes, self.decode.is_some()) {
            (true, true) => Direction::Both,
            (false, true) => Direction::Receive,
            _ => Direction::Send,
        }
    }

    pub fn can_decode(&self) -> bool {
        self.decode.is_some()
    }

    /// Decode a frame into its typed record.
    pub fn decode(&self, frame: &DecodedFrame) -> Result<Record> {
        match self.decode {
            Some(decode) => decode(frame),
            None => Err(MessageError::NotDecodable(self.id)),
        }
    }
}

fn decode_record<M: Decodable + Into<Record>>(frame: &DecodedFrame) -> Result<Record> {
    M::from_frame(frame).map(Into::into)
}

/// Every built-in codec, in registration order.
fn builtin_codecs() -> Vec<CodecDescriptor> {
    vec![
        CodecDescriptor::encoder::<OpenRxScan>(),
        CodecDescriptor::encoder::<EnableExtendedMessages>(),
        CodecDescriptor::encoder::<LibConfig>(),
        CodecDescriptor::encoder::<UnassignChannel>(),
        CodecDescriptor::encoder::<AssignChannel>(),
        CodecDescriptor::encoder::<ChannelPeriod>(),
        CodecDescriptor::encoder::<ChannelSearchTimeout>(),
        CodecDescriptor::encoder::<ChannelRfFrequency>(),
        CodecDescriptor::encoder::<SetNetworkKey>(),
        CodecDescriptor::encoder::<ResetSystem>(),
        CodecDescriptor::encoder::<OpenChannel>(),
        CodecDescriptor::encoder::<CloseChannel>(),
        CodecDescriptor::encoder::<RequestMessage>(),
        CodecDescriptor::bidirectional::<ChannelId>(),
        CodecDescriptor::encoder::<ChannelTransmitPower>(),
        CodecDescriptor::decoder::<ChannelResponse>(),
        CodecDescriptor::decoder::<StartUp>(),
        CodecDescriptor::decoder::<Capabilities>(),
        CodecDescriptor::decoder::<AntVersion>(),
    ]
}

/// Id-keyed lookup of message codecs.
///
/// Built from an explicit registration list. When two codecs declare the
/// same id the one registered later replaces the earlier one.
#[derive(Debug, Clone)]
pub struct MessageTypeRegistry {
    codecs: HashMap<MessageId, CodecDescriptor>,
}

impl MessageTypeRegistry {
    /// Registry holding every built-in codec.
    pub fn new() -> Self {
        Self::from_codecs(builtin_codecs())
    }

    /// Registry built from an explicit list of codecs, in order.
    pub fn from_codecs(codecs: impl IntoIterator<Item = CodecDescriptor>) -> Self {
        let mut registry = Self {
            codecs: HashMap::new(),
        };
        let mut replaced = 0usize;
        for codec in codecs {
            if registry.register(codec).is_some() {
                replaced += 1;
            }
        }
        debug!(
            codecs = registry.codecs.len(),
            replaced, "built message type registry"
        );
        registry
    }

    /// Process-wide registry of the built-in codecs, built on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceCell<MessageTypeRegistry> = OnceCell::new();
        GLOBAL.get_or_init(Self::new)
    }

    /// Register a codec, returning the one it replaced.
    pub fn register(&mut self, codec: CodecDescriptor) -> Option<CodecDescriptor> {
        let previous = self.codecs.insert(codec.id, codec);
        if previous.is_some() {
            debug!(id = %codec.id, "codec replaced by later registration");
        }
        previous
    }

    /// Look up the codec for `id`. Unregistered ids yield `None`.
    pub fn resolve(&self, id: MessageId) -> Option<&CodecDescriptor> {
        self.codecs.get(&id)
    }

    /// Decode an already-decomposed frame with its registered codec.
    pub fn decode_frame(&self, frame: &DecodedFrame) -> Result<Record> {
        self.resolve(frame.id)
            .ok_or(MessageError::NoCodec(frame.id))?
            .decode(frame)
    }

    /// Decompose raw wire bytes and decode them with the registered codec.
    pub fn decode(&self, raw: &[u8]) -> Result<Record> {
        let frame = decompose(raw)?;
        self.decode_frame(&frame)
    }

    /// Registered codecs ordered by message id.
    pub fn codecs(&self) -> Vec<&CodecDescriptor> {
        let mut codecs: Vec<_> = self.codecs.values().collect();
        codecs.sort_by_key(|codec| codec.id);
        codecs
    }

    pub fn len(&self) -> usize {
        self.codecs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
}

impl Default for MessageTypeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolve `id` against the process-wide registry.
pub fn resolve_codec(id: MessageId) -> Option<&'static CodecDescriptor> {
    MessageTypeRegistry::global().resolve(id)
}

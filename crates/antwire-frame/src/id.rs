//! Protocol message identifiers.
//!
//! The numeric values are fixed by the dongle firmware and must never be
//! renumbered.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::error::FrameError;

/// Every message id the codec recognizes.
#[repr(u8)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    IntoPrimitive,
    TryFromPrimitive,
    Serialize,
    Deserialize,
)]
pub enum MessageId {
    /// Channel event; only seen as the `id` field of a channel response.
    RfEvent = 0x01,

    AntVersion = 0x3E,
    ChannelResponse = 0x40,
    UnassignChannel = 0x41,
    AssignChannel = 0x42,
    ChannelPeriod = 0x43,
    ChannelSearchTimeout = 0x44,
    ChannelRfFrequency = 0x45,
    SetNetworkKey = 0x46,
    ResetSystem = 0x4A,
    OpenChannel = 0x4B,
    CloseChannel = 0x4C,
    RequestMessage = 0x4D,
    BroadcastData = 0x4E,
    AcknowledgedData = 0x4F,
    BurstData = 0x50,
    ChannelId = 0x51,
    ChannelStatus = 0x52,
    Capabilities = 0x54,
    OpenRxScan = 0x5B,
    ChannelTransmitPower = 0x60,
    EnableExtendedMessages = 0x66,
    LibConfig = 0x6E,
    StartUp = 0x6F,
}

impl MessageId {
    /// All recognized ids in ascending numeric order.
    pub const ALL: [MessageId; 24] = [
        Self::RfEvent,
        Self::AntVersion,
        Self::ChannelResponse,
        Self::UnassignChannel,
        Self::AssignChannel,
        Self::ChannelPeriod,
        Self::ChannelSearchTimeout,
        Self::ChannelRfFrequency,
        Self::SetNetworkKey,
        Self::ResetSystem,
        Self::OpenChannel,
        Self::CloseChannel,
        Self::RequestMessage,
        Self::BroadcastData,
        Self::AcknowledgedData,
        Self::BurstData,
        Self::ChannelId,
        Self::ChannelStatus,
        Self::Capabilities,
        Self::OpenRxScan,
        Self::ChannelTransmitPower,
        Self::EnableExtendedMessages,
        Self::LibConfig,
        Self::StartUp,
    ];

    /// Parse a wire byte, failing with [`FrameError::UnknownId`].
    pub fn from_byte(byte: u8) -> Result<Self, FrameError> {
        Self::try_from(byte).map_err(|_| FrameError::UnknownId(byte))
    }

    /// The wire byte for this id.
    pub fn as_byte(self) -> u8 {
        self.into()
    }

    /// Returns the protocol name for this id.
    pub fn name(self) -> &'static str {
        match self {
            Self::RfEvent => "RF_EVENT",
            Self::AntVersion => "ANTversion",
            Self::ChannelResponse => "ChannelResponse",
            Self::UnassignChannel => "UnassignChannel",
            Self::AssignChannel => "AssignChannel",
            Self::ChannelPeriod => "ChannelPeriod",
            Self::ChannelSearchTimeout => "ChannelSearchTimeout",
            Self::ChannelRfFrequency => "ChannelRfFrequency",
            Self::SetNetworkKey => "SetNetworkKey",
            Self::ResetSystem => "ResetSystem",
            Self::OpenChannel => "OpenChannel",
            Self::CloseChannel => "CloseChannel",
            Self::RequestMessage => "RequestMessage",
            Self::BroadcastData => "BroadcastData",
            Self::AcknowledgedData => "AcknowledgedData",
            Self::BurstData => "BurstData",
            Self::ChannelId => "ChannelID",
            Self::ChannelStatus => "ChannelStatus",
            Self::Capabilities => "Capabilities",
            Self::OpenRxScan => "OpenRxScan",
            Self::ChannelTransmitPower => "ChannelTransmitPower",
            Self::EnableExtendedMessages => "EnableExtendedMessages",
            Self::LibConfig => "LibConfig",
            Self::StartUp => "StartUp",
        }
    }

    /// Returns true for the data messages that may carry a trailing extended-data block.
    pub fn carries_extended_data(self) -> bool {
        matches!(
            self,
            Self::BroadcastData | Self::AcknowledgedData | Self::BurstData
        )
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:02X})", self.name(), self.as_byte())
    }
}

/// Manufacturer ids, as listed in the FIT profile.
///
/// These identify the maker of a device in the manufacturer-information
/// common data page (page 80), a little-endian `u16` at bytes 4 and 5 of
/// the 8-byte page.
/// They never appear in the frame header.
pub mod manufacturer {
    pub const GARMIN: u16 = 1;
    pub const DYNASTREAM: u16 = 15;
    pub const TACX: u16 = 89;
    pub const TRAINER_ROAD: u16 = 281;
    pub const DEVELOPMENT: u16 = 255;
}

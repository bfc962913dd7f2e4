//! Host-to-dongle configuration and control messages.

use antwire_frame::extended::{FLAG_CHANNEL_ID, FLAG_RSSI, FLAG_TIMESTAMP};
use antwire_frame::{Frame, MessageId};
use bytes::{BufMut, Bytes, BytesMut};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};

use crate::channel_id::ChannelId;
use crate::error::{MessageError, Result};
use crate::message::{impl_message, Encodable, Message};

/// Public ANT+ network key, packed little-endian on the wire.
pub const DEFAULT_NETWORK_KEY: u64 = 0x45C3_72BD_FB21_A5B9;

/// Channel role used by [`AssignChannel`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize, Deserialize,
)]
#[repr(u8)]
#[serde(rename_all = "snake_case")]
pub enum ChannelType {
    Receive = 0x00,
    Transmit = 0x10,
    SharedBidirectionalReceive = 0x20,
    SharedBidirectionalTransmit = 0x30,
    ReceiveOnly = 0x40,
    TransmitOnly = 0x50,
}

impl ChannelType {
    pub fn from_byte(byte: u8) -> Result<Self> {
        Self::try_from(byte).map_err(|_| MessageError::UnknownChannelType(byte))
    }
}

/// Open channel 0 in continuous scan mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenRxScan {}

impl_message!(OpenRxScan, OpenRxScan, ["reserved": U8, "reserved": U8]);

impl Encodable for OpenRxScan {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(0);
        dst.put_u8(0);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnableExtendedMessages {
    #[serde(default)]
    pub enable: bool,
}

impl_message!(EnableExtendedMessages, EnableExtendedMessages, ["reserved": U8, "enable": U8]);

impl Encodable for EnableExtendedMessages {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(0);
        dst.put_u8(u8::from(self.enable));
    }
}

/// Select which extended-data blocks the dongle appends to data messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibConfig {
    pub timestamp: bool,
    pub rssi: bool,
    pub channel_id: bool,
}

impl LibConfig {
    /// Flag byte using the same bits as the extended-data flag.
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.timestamp {
            flags |= FLAG_TIMESTAMP;
        }
        if self.rssi {
            flags |= FLAG_RSSI;
        }
        if self.channel_id {
            flags |= FLAG_CHANNEL_ID;
        }
        flags
    }
}

impl_message!(LibConfig, LibConfig, ["reserved": U8, "flags": U8]);

impl Encodable for LibConfig {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(0);
        dst.put_u8(self.flags());
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnassignChannel {
    pub channel: u8,
}

impl_message!(UnassignChannel, UnassignChannel, ["channel": U8]);

impl Encodable for UnassignChannel {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignChannel {
    pub channel: u8,
    pub channel_type: ChannelType,
    #[serde(default)]
    pub network: u8,
}

impl_message!(AssignChannel, AssignChannel, ["channel": U8, "channel_type": U8, "network": U8]);

impl Encodable for AssignChannel {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
        dst.put_u8(self.channel_type.into());
        dst.put_u8(self.network);
    }
}

/// Message period in 1/32768 s units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelPeriod {
    pub channel: u8,
    pub period: u16,
}

impl_message!(ChannelPeriod, ChannelPeriod, ["channel": U8, "period": U16]);

impl Encodable for ChannelPeriod {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
        dst.put_u16_le(self.period);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelSearchTimeout {
    pub channel: u8,
    pub timeout: u16,
}

impl_message!(ChannelSearchTimeout, ChannelSearchTimeout, ["channel": U8, "timeout": U16]);

impl Encodable for ChannelSearchTimeout {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
        dst.put_u16_le(self.timeout);
    }
}

/// RF channel as an offset from 2400 MHz.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRfFrequency {
    pub channel: u8,
    pub frequency: u8,
}

impl_message!(ChannelRfFrequency, ChannelRfFrequency, ["channel": U8, "frequency": U8]);

impl Encodable for ChannelRfFrequency {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
        dst.put_u8(self.frequency);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetNetworkKey {
    #[serde(default)]
    pub network: u8,
    #[serde(default = "default_network_key")]
    pub key: u64,
}

fn default_network_key() -> u64 {
    DEFAULT_NETWORK_KEY
}

impl Default for SetNetworkKey {
    fn default() -> Self {
        Self {
            network: 0,
            key: DEFAULT_NETWORK_KEY,
        }
    }
}

impl_message!(SetNetworkKey, SetNetworkKey, ["network": U8, "key": U64]);

impl Encodable for SetNetworkKey {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.network);
        dst.put_u64_le(self.key);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResetSystem {}

impl_message!(ResetSystem, ResetSystem, ["reserved": U8]);

impl Encodable for ResetSystem {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(0);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenChannel {
    pub channel: u8,
}

impl_message!(OpenChannel, OpenChannel, ["channel": U8]);

impl Encodable for OpenChannel {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseChannel {
    pub channel: u8,
}

impl_message!(CloseChannel, CloseChannel, ["channel": U8]);

impl Encodable for CloseChannel {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
    }
}

/// Ask the dongle to send a message of kind `requested`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestMessage {
    #[serde(default)]
    pub channel: u8,
    pub requested: MessageId,
}

impl RequestMessage {
    pub fn new(requested: MessageId) -> Self {
        Self {
            channel: 0,
            requested,
        }
    }
}

impl_message!(RequestMessage, RequestMessage, ["channel": U8, "requested": U8]);

impl Encodable for RequestMessage {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
        dst.put_u8(self.requested.into());
    }
}

/// Transmit power level 0..=4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTransmitPower {
    pub channel: u8,
    pub power: u8,
}

impl_message!(ChannelTransmitPower, ChannelTransmitPower, ["channel": U8, "power": U8]);

impl Encodable for ChannelTransmitPower {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
        dst.put_u8(self.power);
    }
}

/// Any outbound message, tagged by `"message"` in structured form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "message", rename_all = "snake_case")]
pub enum Command {
    OpenRxScan(OpenRxScan),
    EnableExtendedMessages(EnableExtendedMessages),
    LibConfig(LibConfig),
    UnassignChannel(UnassignChannel),
    AssignChannel(AssignChannel),
    ChannelPeriod(ChannelPeriod),
    ChannelSearchTimeout(ChannelSearchTimeout),
    ChannelRfFrequency(ChannelRfFrequency),
    SetNetworkKey(SetNetworkKey),
    ResetSystem(ResetSystem),
    OpenChannel(OpenChannel),
    CloseChannel(CloseChannel),
    RequestMessage(RequestMessage),
    ChannelId(ChannelId),
    ChannelTransmitPower(ChannelTransmitPower),
}

macro_rules! each_command {
    ($command:expr, $m:ident => $body:expr) => {
        match $command {
            Command::OpenRxScan($m) => $body,
            Command::EnableExtendedMessages($m) => $body,
            Command::LibConfig($m) => $body,
            Command::UnassignChannel($m) => $body,
            Command::AssignChannel($m) => $body,
            Command::ChannelPeriod($m) => $body,
            Command::ChannelSearchTimeout($m) => $body,
            Command::ChannelRfFrequency($m) => $body,
            Command::SetNetworkKey($m) => $body,
            Command::ResetSystem($m) => $body,
            Command::OpenChannel($m) => $body,
            Command::CloseChannel($m) => $body,
            Command::RequestMessage($m) => $body,
            Command::ChannelId($m) => $body,
            Command::ChannelTransmitPower($m) => $body,
        }
    };
}

impl Command {
    pub fn id(&self) -> MessageId {
        each_command!(self, m => id_of(m))
    }

    pub fn to_frame(&self) -> Frame {
        each_command!(self, m => m.to_frame())
    }

    /// Compose the complete wire frame.
    pub fn to_bytes(&self) -> Result<Bytes> {
        Ok(self.to_frame().to_bytes()?)
    }
}

fn id_of<M: Message>(_: &M) -> MessageId {
    M::ID
}

#[cfg(test)]
mod tests {
    use antwire_frame::decompose;

    use super::*;

    #[test]
    fn open_rx_scan_payload() {
        let frame = OpenRxScan {}.to_frame();
        assert_eq!(frame.id, MessageId::OpenRxScan);
        assert_eq!(frame.payload.as_ref(), &[0, 0]);
    }

    #[test]
    fn enable_extended_messages_payload() {
        let on = EnableExtendedMessages { enable: true }.to_frame();
        let off = EnableExtendedMessages { enable: false }.to_frame();
        assert_eq!(on.payload.as_ref(), &[0, 1]);
        assert_eq!(off.payload.as_ref(), &[0, 0]);
    }

    #[test]
    fn lib_config_flags() {
        let all = LibConfig {
            timestamp: true,
            rssi: true,
            channel_id: true,
        };
        assert_eq!(all.flags(), 0xE0);
        assert_eq!(all.to_frame().payload.as_ref(), &[0, 0xE0]);

        let rssi_only = LibConfig {
            rssi: true,
            ..LibConfig::default()
        };
        assert_eq!(rssi_only.flags(), 0x40);
        assert_eq!(LibConfig::default().flags(), 0);
    }

    #[test]
    fn assign_channel_payload() {
        let msg = AssignChannel {
            channel: 1,
            channel_type: ChannelType::SharedBidirectionalTransmit,
            network: 2,
        };
        assert_eq!(msg.to_frame().payload.as_ref(), &[1, 0x30, 2]);
    }

    #[test]
    fn channel_type_lookup() {
        assert_eq!(ChannelType::from_byte(0x40).unwrap(), ChannelType::ReceiveOnly);
        assert!(matches!(
            ChannelType::from_byte(0x11),
            Err(MessageError::UnknownChannelType(0x11))
        ));
    }

    #[test]
    fn u16_fields_are_little_endian() {
        let period = ChannelPeriod {
            channel: 0,
            period: 8070,
        };
        assert_eq!(period.to_frame().payload.as_ref(), &[0, 0x86, 0x1F]);

        let timeout = ChannelSearchTimeout {
            channel: 3,
            timeout: 0x0102,
        };
        assert_eq!(timeout.to_frame().payload.as_ref(), &[3, 0x02, 0x01]);
    }

    #[test]
    fn default_network_key_on_wire() {
        let wire = SetNetworkKey::default().to_bytes().unwrap();
        assert_eq!(
            wire.as_ref(),
            &[
                0xA4, 0x09, 0x46, 0x00, 0xB9, 0xA5, 0x21, 0xFB, 0xBD, 0x72, 0xC3, 0x45,
                antwire_frame::checksum(&wire)
            ]
        );
        let frame = decompose(&wire).unwrap();
        assert_eq!(frame.length, 9);
        assert_eq!(frame.channel, Some(0));
    }

    #[test]
    fn reset_and_channel_control() {
        assert_eq!(
            ResetSystem {}.to_bytes().unwrap().as_ref(),
            &[0xA4, 0x01, 0x4A, 0x00, 0xEF]
        );
        assert_eq!(
            OpenChannel { channel: 0 }.to_bytes().unwrap().as_ref(),
            &[0xA4, 0x01, 0x4B, 0x00, 0xEE]
        );
        assert_eq!(CloseChannel { channel: 2 }.to_frame().payload.as_ref(), &[2]);
        assert_eq!(UnassignChannel { channel: 4 }.to_frame().payload.as_ref(), &[4]);
    }

    #[test]
    fn request_message_defaults_to_channel_zero() {
        let msg = RequestMessage::new(MessageId::Capabilities);
        assert_eq!(msg.to_frame().payload.as_ref(), &[0, 0x54]);
    }

    #[test]
    fn frequency_and_power() {
        let freq = ChannelRfFrequency {
            channel: 0,
            frequency: 57,
        };
        assert_eq!(freq.to_frame().payload.as_ref(), &[0, 57]);
        let power = ChannelTransmitPower {
            channel: 1,
            power: 3,
        };
        assert_eq!(power.to_frame().payload.as_ref(), &[1, 3]);
    }

    #[test]
    fn encoded_payload_matches_layout_width() {
        let frame = SetNetworkKey::default().to_frame();
        assert_eq!(
            Some(frame.payload.len()),
            crate::message::layout_width(SetNetworkKey::LAYOUT)
        );
        let frame = ChannelPeriod::default().to_frame();
        assert_eq!(
            Some(frame.payload.len()),
            crate::message::layout_width(ChannelPeriod::LAYOUT)
        );
    }

    #[test]
    fn command_from_json() {
        let cmd: Command = serde_json::from_str(
            r#"{"message":"assign_channel","channel":0,"channel_type":"receive"}"#,
        )
        .unwrap();
        assert_eq!(cmd.id(), MessageId::AssignChannel);
        assert_eq!(cmd.to_frame().payload.as_ref(), &[0, 0, 0]);
    }

    #[test]
    fn command_defaults_apply() {
        let cmd: Command = serde_json::from_str(r#"{"message":"set_network_key"}"#).unwrap();
        assert_eq!(cmd, Command::SetNetworkKey(SetNetworkKey::default()));

        let cmd: Command =
            serde_json::from_str(r#"{"message":"request_message","requested":"AntVersion"}"#)
                .unwrap();
        assert_eq!(cmd.to_frame().payload.as_ref(), &[0, 0x3E]);

        let cmd: Command = serde_json::from_str(r#"{"message":"reset_system"}"#).unwrap();
        assert_eq!(cmd.to_bytes().unwrap(), ResetSystem {}.to_bytes().unwrap());
    }

    #[test]
    fn command_matches_direct_encoding() {
        let direct = ChannelId {
            channel: 0,
            device_number: 12345,
            device_type_id: 120,
            transmission_type: 5,
        };
        let cmd = Command::ChannelId(direct);
        assert_eq!(cmd.id(), MessageId::ChannelId);
        assert_eq!(cmd.to_bytes().unwrap(), direct.to_bytes().unwrap());
    }

    #[test]
    fn command_rejects_unknown_message() {
        let result: std::result::Result<Command, _> =
            serde_json::from_str(r#"{"message":"start_up"}"#);
        assert!(result.is_err());
    }
}

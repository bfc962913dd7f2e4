use antwire_frame::DecodedFrame;
use bytes::{Buf, BufMut, BytesMut};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::message::{fixed_payload, impl_message, Decodable, Encodable};

/// Identity of the device paired on a channel.
///
/// Sent to set the identity a channel searches for and received in reply to a
/// request for it, so it is both [`Encodable`] and [`Decodable`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChannelId {
    pub channel: u8,
    pub device_number: u16,
    pub device_type_id: u8,
    pub transmission_type: u8,
}

impl_message!(ChannelId, ChannelId, [
    "channel": U8,
    "device_number": U16,
    "device_type_id": U8,
    "transmission_type": U8,
]);

impl Encodable for ChannelId {
    fn encode_payload(&self, dst: &mut BytesMut) {
        dst.put_u8(self.channel);
        dst.put_u16_le(self.device_number);
        dst.put_u8(self.device_type_id);
        dst.put_u8(self.transmission_type);
    }
}

impl Decodable for ChannelId {
    fn decode_payload(frame: &DecodedFrame) -> Result<Self> {
        let mut buf = fixed_payload(frame, 5)?;
        Ok(Self {
            channel: buf.get_u8(),
            device_number: buf.get_u16_le(),
            device_type_id: buf.get_u8(),
            transmission_type: buf.get_u8(),
        })
    }
}

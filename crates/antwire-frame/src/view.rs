use serde::Serialize;

use crate::codec::DecodedFrame;
use crate::error::Result;
use crate::extended::ExtendedData;
use crate::id::MessageId;

/// Flat, serializable view of a decoded frame.
///
/// Byte strings are rendered as uppercase hex. The burst sequence number is
/// only present for burst frames, and the extended-data fields only when the
/// frame carried a non-zero flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameView {
    pub sync: u8,
    pub length: u8,
    pub id: MessageId,
    pub payload: String,
    pub checksum: u8,
    pub rest: String,
    pub channel: Option<u8>,
    pub page_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence_number: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flag: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_extended_data: Option<ExtendedData>,
}

impl FrameView {
    pub fn from_frame(frame: &DecodedFrame) -> Result<Self> {
        let (flag, extended_data) = if frame.extended_flag != 0 {
            (
                Some(frame.extended_flag),
                Some(to_hex(&frame.extended_data)),
            )
        } else {
            (None, None)
        };

        Ok(Self {
            sync: frame.sync,
            length: frame.length,
            id: frame.id,
            payload: to_hex(&frame.payload),
            checksum: frame.checksum,
            rest: to_hex(&frame.remainder),
            channel: frame.channel,
            page_number: frame.data_page_number,
            sequence_number: frame.burst_sequence_number,
            flag,
            extended_data,
            parsed_extended_data: frame.extended()?,
        })
    }
}

/// Uppercase hex without separators.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode_upper(bytes)
}

use antwire_frame::DecodedFrame;
use serde::Serialize;

use crate::error::Result;
use crate::message::{impl_message, Decodable};

/// Firmware version string reported by the dongle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AntVersion {
    pub version: String,
}

impl_message!(AntVersion, AntVersion, ["version": Text]);

impl Decodable for AntVersion {
    fn decode_payload(frame: &DecodedFrame) -> Result<Self> {
        let text = match frame.payload.split_last() {
            Some((0, rest)) => rest,
            _ => frame.payload.as_ref(),
        };
        Ok(Self {
            version: String::from_utf8(text.to_vec())?,
        })
    }
}

use std::fmt;

use antwire_frame::DecodedFrame;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::message::{fixed_payload, impl_message, Decodable};

const COMMAND_RESET_BIT: u8 = 0x20;

/// Why the dongle (re)started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartupReason {
    PowerOnReset,
    CommandReset,
    /// Any other combination of reason bits.
    Other(u8),
}

impl StartupReason {
    pub fn from_bits(bits: u8) -> Self {
        if bits == 0 {
            Self::PowerOnReset
        } else if bits & COMMAND_RESET_BIT != 0 {
            Self::CommandReset
        } else {
            Self::Other(bits)
        }
    }
}

impl fmt::Display for StartupReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PowerOnReset => f.write_str("POWER_ON_RESET"),
            Self::CommandReset => f.write_str("COMMAND_RESET"),
            Self::Other(bits) => write!(f, "{bits:08b}"),
        }
    }
}

impl Serialize for StartupReason {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Sent by the dongle once it has finished starting up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StartUp {
    #[serde(serialize_with = "crate::capabilities::serialize_bits")]
    pub bits: u8,
    #[serde(rename = "type")]
    pub reason: StartupReason,
}

impl_message!(StartUp, StartUp, ["reason": Bitfield]);

impl Decodable for StartUp {
    fn decode_payload(frame: &DecodedFrame) -> Result<Self> {
        let bits = fixed_payload(frame, 1)?[0];
        Ok(Self {
            bits,
            reason: StartupReason::from_bits(bits),
        })
    }
}

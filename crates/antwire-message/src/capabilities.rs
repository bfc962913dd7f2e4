use std::collections::BTreeMap;

use antwire_frame::DecodedFrame;
use bitflags::Flags;
use serde::{Serialize, Serializer};

use crate::error::Result;
use crate::message::{impl_message, Decodable};

bitflags::bitflags! {
    /// Features the dongle does *not* support.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StandardOptions: u8 {
        const NO_RECEIVE_CHANNELS = 0x01;
        const NO_TRANSMIT_CHANNELS = 0x02;
        const NO_RECEIVE_MESSAGES = 0x04;
        const NO_TRANSMIT_MESSAGES = 0x08;
        const NO_ACKD_MESSAGES = 0x10;
        const NO_BURST_MESSAGES = 0x20;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AdvancedOptions: u8 {
        const NETWORK_ENABLED = 0x02;
        const SERIAL_NUMBER_ENABLED = 0x08;
        const PER_CHANNEL_TX_POWER_ENABLED = 0x10;
        const LOW_PRIORITY_SEARCH_ENABLED = 0x20;
        const SCRIPT_ENABLED = 0x40;
        const SEARCH_LIST_ENABLED = 0x80;
    }
}

bitflags::bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AdvancedOptions2: u8 {
        const LED_ENABLED = 0x01;
        const EXT_MESSAGE_ENABLED = 0x02;
        const SCAN_MODE_ENABLED = 0x04;
        const PROX_SEARCH_ENABLED = 0x10;
        const EXT_ASSIGN_ENABLED = 0x20;
        const FS_ANTFS_ENABLED = 0x40;
        const FIT1_ENABLED = 0x80;
    }
}

/// Dongle capabilities.
///
/// The reply is variable-length; each field is present only when the payload
/// reaches it. Reserved bits are kept in the flag values but have no name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_channels: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_networks: Option<u8>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_options"
    )]
    pub standard_options: Option<StandardOptions>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_options"
    )]
    pub advanced_options: Option<AdvancedOptions>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_options"
    )]
    pub advanced_options2: Option<AdvancedOptions2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sensrcore_channels: Option<u8>,
}

impl_message!(Capabilities, Capabilities, [
    "max_channels": U8,
    "max_networks": U8,
    "standard_options": Bitfield,
    "advanced_options": Bitfield,
    "advanced_options2": Bitfield,
    "max_sensrcore_channels": U8,
]);

impl Decodable for Capabilities {
    fn decode_payload(frame: &DecodedFrame) -> Result<Self> {
        let byte = |index: usize| frame.payload.get(index).copied();
        Ok(Self {
            max_channels: byte(0),
            max_networks: byte(1),
            standard_options: byte(2).map(StandardOptions::from_bits_retain),
            advanced_options: byte(3).map(AdvancedOptions::from_bits_retain),
            advanced_options2: byte(4).map(AdvancedOptions2::from_bits_retain),
            max_sensrcore_channels: byte(5),
        })
    }
}

/// Structured rendering of one flag byte.
#[derive(Debug, Serialize)]
struct BitfieldView {
    bits: String,
    flags: BTreeMap<&'static str, bool>,
}

impl BitfieldView {
    fn new<F: Flags<Bits = u8> + Copy>(value: F) -> Self {
        Self {
            bits: format!("{:08b}", value.bits()),
            flags: F::FLAGS
                .iter()
                .map(|flag| (flag.name(), value.contains(*flag.value())))
                .collect(),
        }
    }
}

fn serialize_options<F, S>(value: &Option<F>, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    F: Flags<Bits = u8> + Copy,
    S: Serializer,
{
    value.map(BitfieldView::new).serialize(serializer)
}

/// Render a byte as an 8-character binary string.
pub(crate) fn serialize_bits<S: Serializer>(
    bits: &u8,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("{bits:08b}"))
}

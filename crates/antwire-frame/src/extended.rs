//! Extended data trailing broadcast, acknowledged and burst payloads.
//!
//! The flag byte selects which blocks are present. Present blocks are packed
//! back to back in a fixed order: channel id, RSSI, timestamp.

use serde::Serialize;

use crate::error::{FrameError, Result};

/// Flag bit: a 4-byte channel id block is present.
pub const FLAG_CHANNEL_ID: u8 = 0x80;
/// Flag bit: an RSSI block is present.
pub const FLAG_RSSI: u8 = 0x40;
/// Flag bit: a 2-byte RX timestamp is present.
pub const FLAG_TIMESTAMP: u8 = 0x20;

/// RSSI measurement type: AGC reading.
pub const RSSI_TYPE_AGC: u8 = 0x10;
/// RSSI measurement type: dBm reading.
pub const RSSI_TYPE_DBM: u8 = 0x20;

const CHANNEL_ID_LEN: usize = 4;
const RSSI_LEN: usize = 3;
const TIMESTAMP_LEN: usize = 2;

/// Identity of the transmitting device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChannelIdentity {
    pub device_number: u16,
    pub device_type_id: u8,
    pub transmission_type: u8,
}

/// Received signal strength block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Rssi {
    /// Type 0x20.
    Dbm { value: i8, threshold: i8 },
    /// Type 0x10.
    Agc { agc: i8, threshold: i8 },
    /// Any other measurement type; only the type byte is interpreted.
    Other { measurement_type: u8 },
}

impl Rssi {
    /// The raw measurement type byte.
    pub fn measurement_type(&self) -> u8 {
        match self {
            Self::Dbm { .. } => RSSI_TYPE_DBM,
            Self::Agc { .. } => RSSI_TYPE_AGC,
            Self::Other { measurement_type } => *measurement_type,
        }
    }
}

/// Parsed extended data. Only the blocks selected by the flag are populated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExtendedData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<ChannelIdentity>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rssi: Option<Rssi>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u16>,
}

/// Bounds-checked reads over the extended-data bytes.
struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn byte(&self, offset: usize) -> Result<u8> {
        let index = self.pos + offset;
        self.bytes
            .get(index)
            .copied()
            .ok_or(FrameError::Truncated {
                needed: index + 1,
                available: self.bytes.len(),
            })
    }

    fn signed(&self, offset: usize) -> Result<i8> {
        self.byte(offset).map(|byte| byte as i8)
    }

    fn u16_le(&self, offset: usize) -> Result<u16> {
        Ok(u16::from_le_bytes([self.byte(offset)?, self.byte(offset + 1)?]))
    }
}

/// Decode the extended-data block selected by `flag`.
///
/// Reads past the end of `bytes` fail with [`FrameError::Truncated`].
pub fn decode_extended(flag: u8, bytes: &[u8]) -> Result<ExtendedData> {
    let mut cursor = Cursor { bytes, pos: 0 };
    let mut data = ExtendedData::default();

    if flag & FLAG_CHANNEL_ID != 0 {
        data.channel_id = Some(ChannelIdentity {
            device_number: cursor.u16_le(0)?,
            device_type_id: cursor.byte(2)?,
            transmission_type: cursor.byte(3)?,
        });
        cursor.pos += CHANNEL_ID_LEN;
    }

    if flag & FLAG_RSSI != 0 {
        let measurement_type = cursor.byte(0)?;
        let rssi = match measurement_type {
            RSSI_TYPE_DBM => Rssi::Dbm {
                value: cursor.signed(1)?,
                threshold: cursor.signed(2)?,
            },
            RSSI_TYPE_AGC => Rssi::Agc {
                agc: cursor.signed(1)?,
                threshold: cursor.signed(2)?,
            },
            other => Rssi::Other {
                measurement_type: other,
            },
        };
        cursor.pos += RSSI_LEN;
        // AGC blocks occupy one byte more than the other RSSI variants.
        if measurement_type == RSSI_TYPE_AGC {
            cursor.pos += 1;
        }
        data.rssi = Some(rssi);
    }

    if flag & FLAG_TIMESTAMP != 0 {
        data.timestamp = Some(cursor.u16_le(0)?);
        cursor.pos += TIMESTAMP_LEN;
    }

    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_id_only() {
        let data = decode_extended(0x80, &[0x34, 0x12, 0x02, 0x03]).unwrap();
        assert_eq!(
            data.channel_id,
            Some(ChannelIdentity {
                device_number: 0x1234,
                device_type_id: 0x02,
                transmission_type: 0x03,
            })
        );
        assert_eq!(data.rssi, None);
        assert_eq!(data.timestamp, None);
    }

    #[test]
    fn timestamp_only() {
        let data = decode_extended(0x20, &[0x01, 0x02]).unwrap();
        assert_eq!(data.timestamp, Some(0x0201));
        assert_eq!(data.channel_id, None);
    }

    #[test]
    fn channel_id_and_timestamp_are_packed() {
        let data = decode_extended(0xA0, &[0x34, 0x12, 0x02, 0x03, 0x99, 0x00]).unwrap();
        assert_eq!(data.channel_id.unwrap().device_number, 0x1234);
        assert_eq!(data.timestamp, Some(0x0099));
    }

    #[test]
    fn dbm_rssi_is_signed() {
        let data = decode_extended(0x40, &[0x20, 0xC4, 0xA6]).unwrap();
        assert_eq!(
            data.rssi,
            Some(Rssi::Dbm {
                value: -60,
                threshold: -90
            })
        );
    }

    #[test]
    fn agc_rssi_advances_four_bytes() {
        let bytes = [0x10, 0x05, 0xF6, 0x00, 0x10, 0x27];
        let data = decode_extended(0x60, &bytes).unwrap();
        assert_eq!(
            data.rssi,
            Some(Rssi::Agc {
                agc: 5,
                threshold: -10
            })
        );
        assert_eq!(data.timestamp, Some(0x2710));
    }

    #[test]
    fn all_blocks() {
        let bytes = [0x39, 0x30, 0x78, 0x05, 0x20, 0xC4, 0xA6, 0xE8, 0x03];
        let data = decode_extended(0xE0, &bytes).unwrap();
        assert_eq!(data.channel_id.unwrap().device_number, 12345);
        assert_eq!(data.rssi.unwrap().measurement_type(), RSSI_TYPE_DBM);
        assert_eq!(data.timestamp, Some(1000));
    }

    #[test]
    fn unknown_rssi_type_keeps_type_byte() {
        let data = decode_extended(0x40, &[0x30, 0x00, 0x00]).unwrap();
        assert_eq!(
            data.rssi,
            Some(Rssi::Other {
                measurement_type: 0x30
            })
        );
    }

    #[test]
    fn no_flags_no_reads() {
        assert_eq!(decode_extended(0x00, &[]).unwrap(), ExtendedData::default());
    }

    #[test]
    fn truncated_blocks_fail_closed() {
        assert!(matches!(
            decode_extended(0x80, &[0x34, 0x12, 0x02]),
            Err(FrameError::Truncated {
                needed: 4,
                available: 3
            })
        ));
        assert!(matches!(
            decode_extended(0xA0, &[0x34, 0x12, 0x02, 0x03, 0x99]),
            Err(FrameError::Truncated { .. })
        ));
        assert!(matches!(
            decode_extended(0x40, &[0x20, 0x01]),
            Err(FrameError::Truncated { .. })
        ));
    }

    #[test]
    fn serializes_only_present_blocks() {
        let data = decode_extended(0x60, &[0x20, 0xC4, 0xA6, 0x01, 0x00]).unwrap();
        let json = serde_json::to_value(data).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "rssi": { "type": "dbm", "value": -60, "threshold": -90 },
                "timestamp": 1
            })
        );
    }
}

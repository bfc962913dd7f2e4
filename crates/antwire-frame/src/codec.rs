use bytes::{Buf, BufMut, Bytes, BytesMut};
use tracing::{debug, trace, warn};

use crate::error::{FrameError, Result};
use crate::extended::{decode_extended, ExtendedData};
use crate::id::MessageId;
use crate::view::FrameView;

/// Sync byte that starts every frame.
pub const SYNC: u8 = 0xA4;

/// Frame header: sync (1) + length (1) + id (1) = 3 bytes.
pub const HEADER_SIZE: usize = 3;

/// Header plus the trailing checksum byte.
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + 1;

/// Largest payload the single length byte can describe.
pub const MAX_PAYLOAD: usize = u8::MAX as usize;

/// Payload offset of the extended-data flag on data messages.
pub const EXTENDED_FLAG_OFFSET: usize = 9;

/// An outbound frame: a message id and its packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub id: MessageId,
    pub payload: Bytes,
}

impl Frame {
    /// Create a new frame.
    pub fn new(id: MessageId, payload: impl Into<Bytes>) -> Self {
        Self {
            id,
            payload: payload.into(),
        }
    }

    /// The total wire size of this frame (header + payload + checksum).
    pub fn wire_size(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Compose the wire bytes for this frame.
    pub fn to_bytes(&self) -> Result<Bytes> {
        compose(self.id, &self.payload)
    }
}

/// How [`decompose_with_config`] treats bytes beyond `length + 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrailingBytes {
    /// The buffer must be exactly one frame long.
    #[default]
    Reject,
    /// Extra bytes are accepted and returned in [`DecodedFrame::remainder`].
    Capture,
}

/// Configuration for the frame codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameConfig {
    /// Maximum payload size in bytes. Default and upper bound: 255.
    pub max_payload_size: usize,
    /// Policy for bytes following the checksum.
    pub trailing: TrailingBytes,
}

impl FrameConfig {
    fn payload_limit(&self) -> usize {
        self.max_payload_size.min(MAX_PAYLOAD)
    }
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_payload_size: MAX_PAYLOAD,
            trailing: TrailingBytes::Reject,
        }
    }
}

/// A received frame split into its fields, plus the derived protocol fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedFrame {
    pub sync: u8,
    /// Declared payload length, including any extended-data bytes.
    pub length: u8,
    pub id: MessageId,
    /// Payload bytes. Truncated to the first 9 bytes when extended data is present.
    pub payload: Bytes,
    pub checksum: u8,
    /// Bytes after the checksum. Only ever non-empty under [`TrailingBytes::Capture`].
    pub remainder: Bytes,
    /// First payload byte; for burst frames the lower 5 bits only.
    pub channel: Option<u8>,
    /// Second payload byte.
    pub data_page_number: Option<u8>,
    /// Upper 3 bits of the channel byte on burst frames.
    pub burst_sequence_number: Option<u8>,
    /// Extended-data flag byte, 0 when the frame carries none.
    pub extended_flag: u8,
    pub extended_data: Bytes,
}

impl DecodedFrame {
    /// Parse the extended-data block, if the frame carries one.
    pub fn extended(&self) -> Result<Option<ExtendedData>> {
        if self.extended_flag == 0 {
            return Ok(None);
        }
        decode_extended(self.extended_flag, &self.extended_data).map(Some)
    }

    /// Structured view of this frame.
    pub fn view(&self) -> Result<FrameView> {
        FrameView::from_frame(self)
    }

    /// Total bytes this frame occupied on the wire, excluding the remainder.
    pub fn wire_size(&self) -> usize {
        usize::from(self.length) + FRAME_OVERHEAD
    }
}

/// XOR of the sync, length, id and payload bytes of `frame`.
///
/// The range is taken from the length byte; bytes past the end of `frame`
/// are not read.
pub fn checksum(frame: &[u8]) -> u8 {
    let length = frame.get(1).copied().map_or(0, usize::from);
    frame
        .iter()
        .take(length + HEADER_SIZE)
        .fold(0, |acc, byte| acc ^ byte)
}

/// Compose a complete frame from an id and payload.
pub fn compose(id: MessageId, payload: &[u8]) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(FRAME_OVERHEAD + payload.len());
    encode_frame(id, payload, &mut dst)?;
    Ok(dst.freeze())
}

/// Encode a frame into the wire format, appending to `dst`.
///
/// Wire format:
/// ```text
/// ┌──────┬────────┬──────┬──────────────────┬──────────┐
/// │ Sync │ Length │ Id   │ Payload          │ Checksum │
/// │ 0xA4 │ (1B)   │ (1B) │ (Length bytes)   │ XOR (1B) │
/// └──────┴────────┴──────┴──────────────────┴──────────┘
/// ```
pub fn encode_frame(id: MessageId, payload: &[u8], dst: &mut BytesMut) -> Result<()> {
    let length = u8::try_from(payload.len()).map_err(|_| FrameError::PayloadTooLarge {
        size: payload.len(),
        max: MAX_PAYLOAD,
    })?;

    let start = dst.len();
    dst.reserve(FRAME_OVERHEAD + payload.len());
    dst.put_u8(SYNC);
    dst.put_u8(length);
    dst.put_u8(id.as_byte());
    dst.put_slice(payload);
    let sum = checksum(&dst[start..]);
    dst.put_u8(sum);

    trace!(id = %id, length, "composed frame");
    Ok(())
}

/// Decompose a single frame using the default (strict) configuration.
pub fn decompose(raw: &[u8]) -> Result<DecodedFrame> {
    decompose_with_config(raw, &FrameConfig::default())
}

/// Decompose a single frame into its fields.
///
/// Validation runs in wire order: sync, length, id, checksum. Derived fields
/// are computed from the payload before it is truncated for extended data.
pub fn decompose_with_config(raw: &[u8], config: &FrameConfig) -> Result<DecodedFrame> {
    let Some(&sync) = raw.first() else {
        return Err(FrameError::Truncated {
            needed: 1,
            available: 0,
        });
    };
    if sync != SYNC {
        return Err(FrameError::BadSync { found: sync });
    }

    let Some(&length) = raw.get(1) else {
        return Err(FrameError::Truncated {
            needed: 2,
            available: raw.len(),
        });
    };
    let payload_len = usize::from(length);
    let expected = payload_len + FRAME_OVERHEAD;
    let size_ok = match config.trailing {
        TrailingBytes::Reject => raw.len() == expected,
        TrailingBytes::Capture => raw.len() >= expected,
    };
    if !size_ok {
        return Err(FrameError::LengthMismatch {
            declared: length,
            expected,
            actual: raw.len(),
        });
    }
    if payload_len > config.payload_limit() {
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: config.payload_limit(),
        });
    }

    let id = MessageId::from_byte(raw[2])?;

    let end = HEADER_SIZE + payload_len;
    let received = raw[end];
    let computed = checksum(raw);
    if received != computed {
        warn!(id = %id, computed, received, "frame checksum mismatch");
        return Err(FrameError::ChecksumMismatch {
            expected: computed,
            actual: received,
        });
    }

    let mut payload = &raw[HEADER_SIZE..end];
    let remainder = &raw[end + 1..];
    if !remainder.is_empty() {
        warn!(id = %id, extra = remainder.len(), "captured trailing bytes after frame");
    }

    let mut channel = payload.first().copied();
    let data_page_number = payload.get(1).copied();

    let mut burst_sequence_number = None;
    if id == MessageId::BurstData {
        if let Some(packed) = channel {
            burst_sequence_number = Some((packed & 0b1110_0000) >> 5);
            channel = Some(packed & 0b0001_1111);
        }
    }

    let mut extended_flag = 0;
    let mut extended_data: &[u8] = &[];
    if id.carries_extended_data() && payload_len > EXTENDED_FLAG_OFFSET {
        extended_flag = payload[EXTENDED_FLAG_OFFSET];
        extended_data = &payload[EXTENDED_FLAG_OFFSET + 1..];
        payload = &payload[..EXTENDED_FLAG_OFFSET];
    }

    debug!(id = %id, length, "decomposed frame");

    Ok(DecodedFrame {
        sync,
        length,
        id,
        payload: Bytes::copy_from_slice(payload),
        checksum: received,
        remainder: Bytes::copy_from_slice(remainder),
        channel,
        data_page_number,
        burst_sequence_number,
        extended_flag,
        extended_data: Bytes::copy_from_slice(extended_data),
    })
}

/// Decompose a frame and return its structured view.
pub fn decompose_to_view(raw: &[u8]) -> Result<FrameView> {
    decompose(raw)?.view()
}

/// Decode the next frame from a stream buffer.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete frame yet.
/// A complete frame is consumed from the buffer whether or not it decodes;
/// a leading byte that is not [`SYNC`] is consumed and reported as
/// [`FrameError::BadSync`] so the caller can keep reading.
pub fn decode_frame(src: &mut BytesMut, config: &FrameConfig) -> Result<Option<DecodedFrame>> {
    let Some(&first) = src.first() else {
        return Ok(None);
    };
    if first != SYNC {
        src.advance(1);
        warn!(found = first, "discarding non-sync byte");
        return Err(FrameError::BadSync { found: first });
    }
    if src.len() < 2 {
        return Ok(None); // Need more data
    }

    let payload_len = usize::from(src[1]);
    if payload_len > config.payload_limit() {
        src.advance(1);
        return Err(FrameError::PayloadTooLarge {
            size: payload_len,
            max: config.payload_limit(),
        });
    }

    let total = payload_len + FRAME_OVERHEAD;
    if src.len() < total {
        return Ok(None); // Need more data
    }

    let raw = src.split_to(total);
    let strict = FrameConfig {
        trailing: TrailingBytes::Reject,
        ..*config
    };
    decompose_with_config(&raw, &strict).map(Some)
}

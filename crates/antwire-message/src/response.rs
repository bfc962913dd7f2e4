use antwire_frame::{DecodedFrame, MessageId};
use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::Serialize;

use crate::error::{MessageError, Result};
use crate::message::{fixed_payload, impl_message, Decodable};

/// Event and error codes reported in a [`ChannelResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive, Serialize)]
#[repr(u8)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseCode {
    ResponseNoError = 0,
    EventRxSearchTimeout = 1,
    EventRxFail = 2,
    EventTx = 3,
    EventTransferRxFailed = 4,
    EventTransferTxCompleted = 5,
    EventTransferTxFailed = 6,
    EventChannelClosed = 7,
    EventRxFailGoToSearch = 8,
    EventChannelCollision = 9,
    EventTransferTxStart = 10,
    EventTransferNextDataBlock = 17,
    ChannelInWrongState = 21,
    ChannelNotOpened = 22,
    ChannelIdNotSet = 24,
    CloseAllChannels = 25,
    TransferInProgress = 31,
    TransferSequenceNumberError = 32,
    TransferInError = 33,
    MessageSizeExceedsLimit = 39,
    InvalidMessage = 40,
    InvalidNetworkNumber = 41,
    InvalidListId = 48,
    InvalidScanTxChannel = 49,
    InvalidParameterProvided = 51,
    EventSerialQueOverflow = 52,
    EventQueOverflow = 53,
    EncryptNegotiationSuccess = 56,
    EncryptNegotiationFail = 57,
    NvmFullError = 64,
    NvmWriteError = 65,
    UsbStringWriteFail = 112,
    MesgSerialErrorId = 174,
}

impl ResponseCode {
    pub fn from_byte(byte: u8) -> Result<Self> {
        Self::try_from(byte).map_err(|_| MessageError::UnknownResponseCode(byte))
    }
}

/// Reply to a command, or an asynchronous channel event.
///
/// For command replies `id` is the id of the command being answered; events
/// carry [`MessageId::RfEvent`] instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelResponse {
    pub channel: u8,
    pub id: MessageId,
    pub code: ResponseCode,
}

impl ChannelResponse {
    pub fn is_event(&self) -> bool {
        self.id == MessageId::RfEvent
    }
}

impl_message!(ChannelResponse, ChannelResponse, [
    "channel": U8,
    "id": U8,
    "code": U8,
]);

impl Decodable for ChannelResponse {
    fn decode_payload(frame: &DecodedFrame) -> Result<Self> {
        let payload = fixed_payload(frame, 3)?;
        Ok(Self {
            channel: payload[0],
            id: MessageId::from_byte(payload[1])?,
            code: ResponseCode::from_byte(payload[2])?,
        })
    }
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

use tkey_x25519_proto::ProtoError;

/// [Dispatcher][crate::dispatch::Dispatcher] errors, each a path on
/// which no application reply is sent
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum Error {
    /// Malformed frame header, no reply possible
    #[cfg_attr(feature = "thiserror", error("Invalid frame header"))]
    InvalidHeader = 0x00,

    /// Frame addressed to firmware, answered with NOK
    #[cfg_attr(feature = "thiserror", error("Frame addressed to firmware"))]
    FirmwareEndpoint = 0x01,

    /// Frame addressed to neither firmware nor application
    #[cfg_attr(feature = "thiserror", error("Misrouted frame"))]
    Misrouted = 0x02,

    /// Request payload could not be decoded
    #[cfg_attr(feature = "thiserror", error("Invalid request"))]
    InvalidRequest = 0x03,

    /// Reply requested with a non-response code
    #[cfg_attr(feature = "thiserror", error("Unknown response code"))]
    UnknownResponse = 0x04,

    /// Response encoding failed
    #[cfg_attr(feature = "thiserror", error("Response encoding failed"))]
    EncodingFailed = 0x05,

    /// Underlying transport failed
    #[cfg_attr(feature = "thiserror", error("Transport error"))]
    Transport = 0x06,
}

impl From<ProtoError> for Error {
    fn from(e: ProtoError) -> Self {
        match e {
            ProtoError::InvalidHeader => Error::InvalidHeader,
            _ => Error::InvalidRequest,
        }
    }
}

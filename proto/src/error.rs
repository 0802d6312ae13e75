// Copyright (c) 2022-2023 The MobileCoin Foundation

/// Protocol encoding / decoding errors
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "thiserror", derive(thiserror::Error))]
#[repr(u8)]
pub enum ProtoError {
    /// Frame header reserved bits set
    #[cfg_attr(feature = "thiserror", error("Invalid frame header"))]
    InvalidHeader = 0x00,

    /// Buffer too short for object
    #[cfg_attr(feature = "thiserror", error("Invalid length"))]
    InvalidLength = 0x01,

    /// Invalid object encoding
    #[cfg_attr(feature = "thiserror", error("Invalid encoding"))]
    InvalidEncoding = 0x02,

    /// Unrecognised status byte
    #[cfg_attr(feature = "thiserror", error("Unknown status"))]
    UnknownStatus = 0x03,
}

impl From<encdec::Error> for ProtoError {
    fn from(e: encdec::Error) -> Self {
        match e {
            encdec::Error::Length => ProtoError::InvalidLength,
            #[allow(unreachable_patterns)]
            _ => ProtoError::InvalidEncoding,
        }
    }
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Frame header encoding
//!
//! ## Encoding
//!
//! ```text
//!   7   6   5   4   3   2   1   0
//! +---+-------+-------+---+-------+
//! | R |  ID   |  DST  | S |  LEN  |
//! +---+-------+-------+---+-------+
//! ```
//!
//! - `R`: reserved, must be zero
//! - `ID`: correlation id, echoed in the response
//! - `DST`: destination [`Endpoint`]
//! - `S`: response [`FrameStatus`], must be zero in requests
//! - `LEN`: payload [`CmdLen`] class

use num_enum::TryFromPrimitive;
use strum::Display;

use crate::ProtoError;

/// Maximum frame payload length
pub const CMDLEN_MAXBYTES: usize = 128;

const RESERVED_BIT: u8 = 1 << 7;
const STATUS_BIT: u8 = 1 << 2;

/// Frame destination
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, Display)]
#[repr(u8)]
pub enum Endpoint {
    /// Hardware in interface FPGA
    HwIfpga = 0,
    /// Hardware in application FPGA
    HwAfpga = 1,
    /// Device firmware
    Firmware = 2,
    /// Loaded device application
    Software = 3,
}

/// Frame payload length class
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, Display)]
#[repr(u8)]
pub enum CmdLen {
    Len1 = 0,
    Len4 = 1,
    Len32 = 2,
    Len128 = 3,
}

impl CmdLen {
    /// Payload length in bytes for a length class
    pub const fn bytes(&self) -> usize {
        match self {
            CmdLen::Len1 => 1,
            CmdLen::Len4 => 4,
            CmdLen::Len32 => 32,
            CmdLen::Len128 => 128,
        }
    }
}

/// Response status carried in the frame header
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, Display)]
#[repr(u8)]
pub enum FrameStatus {
    Ok = 0,
    NotOk = 1,
}

/// Decoded frame header
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameHeader {
    /// Correlation id (2 bits)
    pub id: u8,
    /// Frame destination
    pub endpoint: Endpoint,
    /// Payload length class
    pub len: CmdLen,
}

impl FrameHeader {
    /// Create a new frame header
    pub const fn new(id: u8, endpoint: Endpoint, len: CmdLen) -> Self {
        Self {
            id: id & 0x03,
            endpoint,
            len,
        }
    }

    /// Parse a request header byte
    pub fn parse(b: u8) -> Result<Self, ProtoError> {
        if b & (RESERVED_BIT | STATUS_BIT) != 0 {
            return Err(ProtoError::InvalidHeader);
        }

        Self::decode_fields(b)
    }

    /// Parse a response header byte, returning the header and frame status
    pub fn parse_response(b: u8) -> Result<(Self, FrameStatus), ProtoError> {
        if b & RESERVED_BIT != 0 {
            return Err(ProtoError::InvalidHeader);
        }

        let status = match b & STATUS_BIT != 0 {
            true => FrameStatus::NotOk,
            false => FrameStatus::Ok,
        };

        Ok((Self::decode_fields(b)?, status))
    }

    fn decode_fields(b: u8) -> Result<Self, ProtoError> {
        // Two bit fields, conversions cannot fail
        let endpoint =
            Endpoint::try_from((b >> 3) & 0x03).map_err(|_| ProtoError::InvalidHeader)?;
        let len = CmdLen::try_from(b & 0x03).map_err(|_| ProtoError::InvalidHeader)?;

        Ok(Self {
            id: (b >> 5) & 0x03,
            endpoint,
            len,
        })
    }

    /// Encode this header as a request
    pub fn request_byte(&self) -> u8 {
        self.encode(FrameStatus::Ok, self.len)
    }

    /// Build the header byte for a reply to this request, echoing the
    /// request id and endpoint
    pub fn reply_byte(&self, status: FrameStatus, len: CmdLen) -> u8 {
        self.encode(status, len)
    }

    fn encode(&self, status: FrameStatus, len: CmdLen) -> u8 {
        ((self.id & 0x03) << 5)
            | ((self.endpoint as u8) << 3)
            | ((status as u8) << 2)
            | (len as u8)
    }
}

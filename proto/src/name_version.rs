// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Application name / version objects

use encdec::{Decode, DecodeOwned, Encode};

use super::{AppCmd, AppReq, CmdLen, ProtoError};
use crate::helpers::arr;

/// Application name, first field
pub const APP_NAME0: [u8; 4] = *b"x255";

/// Application name, second field
pub const APP_NAME1: [u8; 4] = *b"19  ";

/// Application version
pub const APP_VERSION: u32 = 0x0000_0001;

/// Fetch application name and version request.
///
/// The request is the bare command byte, sent in the shortest length class.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct NameVersionReq {}

impl AppReq for NameVersionReq {
    const CMD: AppCmd = AppCmd::GetNameVersion;
    const LEN: CmdLen = CmdLen::Len1;
}

impl Encode for NameVersionReq {
    type Error = ProtoError;

    fn encode_len(&self) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn encode(&self, _buff: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }
}

impl DecodeOwned for NameVersionReq {
    type Output = Self;

    type Error = ProtoError;

    fn decode_owned(_buff: &[u8]) -> Result<(Self::Output, usize), Self::Error> {
        Ok((Self {}, 0))
    }
}

/// Application name and version response.
///
/// Sent as [`AppCmd::RspGetNameVersion`] in a 32 byte frame, with
/// remaining bytes zeroed. A request with an unexpected length is
/// answered with an all-zero response rather than an error status.
///
/// ## Encoding
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                             NAME0                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                             NAME1                             |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                            VERSION                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
#[derive(Copy, Clone, PartialEq, Debug, Default, Encode, Decode)]
#[encdec(error = "ProtoError")]
pub struct NameVersionResp {
    #[encdec(with = "arr")]
    pub name0: [u8; 4],
    #[encdec(with = "arr")]
    pub name1: [u8; 4],
    pub version: u32,
}

impl NameVersionResp {
    /// Create a new name / version response
    pub fn new(name0: [u8; 4], name1: [u8; 4], version: u32) -> Self {
        Self {
            name0,
            name1,
            version,
        }
    }

    /// Response for this application
    pub fn app() -> Self {
        Self::new(APP_NAME0, APP_NAME1, APP_VERSION)
    }

    /// All-zero response for malformed requests
    pub fn zeroed() -> Self {
        Self::default()
    }
}

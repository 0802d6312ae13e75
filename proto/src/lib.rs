// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Protocol / frame definitions for the TKey X25519 application
//!
//! This module provides a protocol specification and reference implementation for
//! communication with the X25519 device application, used by both the device
//! [engine](https://docs.rs/tkey-x25519-core) and host-side tooling.
//!
//! Each exchange is a single request/response pair. A request is a one-byte
//! [`FrameHeader`][frame::FrameHeader] followed by a payload of exactly the
//! header's length class, the first payload byte being an [`AppCmd`]:
//!
//! ```text
//! +--------+--------+--------------------------------------+
//! | HEADER |  CMD   |  ARGS (len_class - 1 bytes)          |
//! +--------+--------+--------------------------------------+
//! ```
//!
//! Responses echo the request id / endpoint in their header, followed by the
//! response [`AppCmd`] and `len_class - 1` bytes of response data.
//!
//! Object encodings are packed and little-endian, and start immediately
//! after the command / response code byte.

#![cfg_attr(not(feature = "std"), no_std)]

use num_enum::TryFromPrimitive;
use strum::Display;

pub mod frame;
pub use frame::{CmdLen, Endpoint, FrameHeader, FrameStatus, CMDLEN_MAXBYTES};

pub mod name_version;
pub mod public_key;
pub mod ecdh;

mod status;
pub use status::Status;

mod error;
pub use error::ProtoError;

pub mod prelude;

mod helpers;

/// Length of the domain separation argument
pub const DOMAIN_LEN: usize = 32;

/// Length of the user supplied secret argument
pub const USER_SECRET_LEN: usize = 32;

/// Length of the require-touch flag argument
pub const REQUIRE_TOUCH_LEN: usize = 1;

/// Length of X25519 public keys, scalars and shared secrets
pub const KEY_LEN: usize = 32;

// Command byte and the largest request must fit the largest frame
static_assertions::const_assert!(
    1 + DOMAIN_LEN + USER_SECRET_LEN + REQUIRE_TOUCH_LEN + KEY_LEN <= CMDLEN_MAXBYTES
);

/// Application command and response codes
///
/// Requests and responses share a single code space, each response
/// being the request code plus one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, TryFromPrimitive, Display)]
#[repr(u8)]
pub enum AppCmd {
    /// Fetch application name and version
    GetNameVersion = 0x01,
    RspGetNameVersion = 0x02,

    /// Derive and fetch the public key for a domain / user secret pair
    GetPublicKey = 0x03,
    RspGetPublicKey = 0x04,

    /// Compute an X25519 shared secret with a peer public key
    #[doc(alias = "COMPUTE_SHARED")]
    DoEcdh = 0x05,
    RspDoEcdh = 0x06,

    /// Response to unrecognised commands
    RspUnknownCmd = 0xff,
}

impl AppCmd {
    /// Fetch the fixed length class for a response code,
    /// returns `None` for request codes.
    pub const fn rsp_len(&self) -> Option<CmdLen> {
        match self {
            AppCmd::RspGetNameVersion => Some(CmdLen::Len32),
            AppCmd::RspGetPublicKey | AppCmd::RspDoEcdh => Some(CmdLen::Len128),
            AppCmd::RspUnknownCmd => Some(CmdLen::Len1),
            _ => None,
        }
    }

    /// Fetch the response code for a request code
    pub const fn rsp(&self) -> Option<AppCmd> {
        match self {
            AppCmd::GetNameVersion => Some(AppCmd::RspGetNameVersion),
            AppCmd::GetPublicKey => Some(AppCmd::RspGetPublicKey),
            AppCmd::DoEcdh => Some(AppCmd::RspDoEcdh),
            _ => None,
        }
    }
}

/// Request objects with a fixed command code and length class
pub trait AppReq {
    /// Command code preceding the encoded request
    const CMD: AppCmd;

    /// Length class the request must be sent with
    const LEN: CmdLen;
}

/// Helper macro for encoding single byte `#[repr(u8)]` enums
#[macro_export]
macro_rules! encdec_u8_enum {
    ($b:ty, $e:expr) => {
        impl encdec::Encode for $b {
            type Error = $crate::ProtoError;

            fn encode(&self, buff: &mut [u8]) -> Result<usize, Self::Error> {
                if buff.is_empty() {
                    return Err($crate::ProtoError::InvalidLength);
                }

                buff[0] = *self as u8;

                Ok(1)
            }

            fn encode_len(&self) -> Result<usize, Self::Error> {
                Ok(1)
            }
        }

        impl encdec::DecodeOwned for $b {
            type Output = $b;
            type Error = $crate::ProtoError;

            fn decode_owned(buff: &[u8]) -> Result<(Self, usize), Self::Error> {
                if buff.is_empty() {
                    return Err($crate::ProtoError::InvalidLength);
                }

                let v = <$b>::try_from(buff[0]).map_err(|_| $e)?;

                Ok((v, 1))
            }
        }
    };
}

#[cfg(test)]
pub(crate) mod test {
    use encdec::EncDec;

    use super::*;

    /// Helper for request / response encode / decode tests
    pub fn encode_decode<'a, A: EncDec<'a, ProtoError> + PartialEq>(
        buff: &'a mut [u8],
        obj: &A,
    ) -> usize {
        // Encode object
        let n = obj.encode(buff).expect("encode failed");

        // Ensure encoded data fits the largest frame (less command byte)
        let m = CMDLEN_MAXBYTES - 1;
        assert!(n <= m, "encoded length {n} exceeds maximum payload {m}");

        // Check encoded length matches expected length
        let expected_n = obj.encode_len().expect("get length failed");
        assert_eq!(n, expected_n, "encode length mismatch");

        // Decode object
        let (decoded, decoded_n) = A::decode(&buff[..n]).expect("decode failed");

        // Check decoded object and length match
        assert_eq!(obj, &decoded);
        assert_eq!(expected_n, decoded_n);

        n
    }

    #[test]
    fn response_lengths() {
        let tests = &[
            (AppCmd::GetNameVersion, None),
            (AppCmd::RspGetNameVersion, Some(CmdLen::Len32)),
            (AppCmd::GetPublicKey, None),
            (AppCmd::RspGetPublicKey, Some(CmdLen::Len128)),
            (AppCmd::DoEcdh, None),
            (AppCmd::RspDoEcdh, Some(CmdLen::Len128)),
            (AppCmd::RspUnknownCmd, Some(CmdLen::Len1)),
        ];

        for (cmd, len) in tests {
            assert_eq!(cmd.rsp_len(), *len, "length class mismatch for {cmd}");
        }
    }

    #[test]
    fn request_response_codes() {
        for cmd in [AppCmd::GetNameVersion, AppCmd::GetPublicKey, AppCmd::DoEcdh] {
            let rsp = cmd.rsp().unwrap();
            assert_eq!(rsp as u8, cmd as u8 + 1);
            assert!(rsp.rsp_len().is_some());
        }

        assert_eq!(AppCmd::try_from(0x05).ok(), Some(AppCmd::DoEcdh));
        assert!(AppCmd::try_from(0x07).is_err());
    }
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Public key objects, for fetching the X25519 public key derived
//! for a domain / user secret pair

use core::fmt;

use encdec::{Decode, Encode};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{AppCmd, AppReq, CmdLen, ProtoError, Status, KEY_LEN};
use crate::helpers::arr;

/// Public key request.
///
/// Sent as [`AppCmd::GetPublicKey`] in a 128 byte frame, trailing bytes zeroed.
///
/// ## Encoding
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                       DOMAIN (32-byte)                        /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// /                     USER_SECRET (32-byte)                     /
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// | REQUIRE_TOUCH |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Encode, Decode, Zeroize, ZeroizeOnDrop)]
#[encdec(error = "ProtoError")]
pub struct PublicKeyReq {
    /// Domain separation value
    #[encdec(with = "arr")]
    pub domain: [u8; 32],
    /// User provided secret
    #[encdec(with = "arr")]
    pub user_secret: [u8; 32],
    /// Non-zero where the key is to be touch-protected
    pub require_touch: u8,
}

impl PublicKeyReq {
    /// Create a new [PublicKeyReq]
    pub fn new(domain: [u8; 32], user_secret: [u8; 32], require_touch: bool) -> Self {
        Self {
            domain,
            user_secret,
            require_touch: require_touch as u8,
        }
    }
}

impl AppReq for PublicKeyReq {
    const CMD: AppCmd = AppCmd::GetPublicKey;
    const LEN: CmdLen = CmdLen::Len128;
}

impl fmt::Debug for PublicKeyReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PublicKeyReq")
            .field("domain", &self.domain)
            .field("require_touch", &self.require_touch)
            .finish_non_exhaustive()
    }
}

/// Public key response.
///
/// Sent as [`AppCmd::RspGetPublicKey`] in a 128 byte frame.
/// The key is all-zero unless `status` is [`Status::Ok`].
///
/// ## Encoding
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    STATUS     |                                               |
/// +-+-+-+-+-+-+-+-+                                               +
/// /                  X25519_PUBLIC_KEY (32-byte)                  /
/// +               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |               |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Debug, Encode, Decode)]
#[encdec(error = "ProtoError")]
pub struct PublicKeyResp {
    pub status: Status,
    #[encdec(with = "arr")]
    pub public_key: [u8; KEY_LEN],
}

impl PublicKeyResp {
    /// Create a successful response containing `public_key`
    pub fn ok(public_key: [u8; KEY_LEN]) -> Self {
        Self {
            status: Status::Ok,
            public_key,
        }
    }

    /// Create a failure response with no key material
    pub fn error(status: Status) -> Self {
        Self {
            status,
            public_key: [0u8; KEY_LEN],
        }
    }
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! ECDH objects, for computing an X25519 shared secret between the
//! derived device key and a peer public key

use core::fmt;

use encdec::{Decode, Encode};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{AppCmd, AppReq, CmdLen, ProtoError, Status, KEY_LEN};
use crate::helpers::arr;

/// ECDH request.
///
/// Sent as [`AppCmd::DoEcdh`] in a 128 byte frame, trailing bytes zeroed.
/// Where `require_touch` is set the device waits for touch confirmation
/// before deriving any key material.
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
/// | REQUIRE_TOUCH |                                               |
/// +-+-+-+-+-+-+-+-+                                               +
/// /                PEER_PUBLIC_KEY (32-byte)                      /
/// +               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |               |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Encode, Decode, Zeroize, ZeroizeOnDrop)]
#[encdec(error = "ProtoError")]
pub struct EcdhReq {
    /// Domain separation value
    #[encdec(with = "arr")]
    pub domain: [u8; 32],
    /// User provided secret
    #[encdec(with = "arr")]
    pub user_secret: [u8; 32],
    /// Non-zero where touch confirmation is required
    pub require_touch: u8,
    /// Peer X25519 public key
    #[encdec(with = "arr")]
    pub peer_public_key: [u8; KEY_LEN],
}

impl EcdhReq {
    /// Create a new [EcdhReq]
    pub fn new(
        domain: [u8; 32],
        user_secret: [u8; 32],
        require_touch: bool,
        peer_public_key: [u8; KEY_LEN],
    ) -> Self {
        Self {
            domain,
            user_secret,
            require_touch: require_touch as u8,
            peer_public_key,
        }
    }
}

impl AppReq for EcdhReq {
    const CMD: AppCmd = AppCmd::DoEcdh;
    const LEN: CmdLen = CmdLen::Len128;
}

impl fmt::Debug for EcdhReq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdhReq")
            .field("domain", &self.domain)
            .field("require_touch", &self.require_touch)
            .field("peer_public_key", &self.peer_public_key)
            .finish_non_exhaustive()
    }
}

/// ECDH response.
///
/// Sent as [`AppCmd::RspDoEcdh`] in a 128 byte frame.
/// The shared secret is all-zero unless `status` is [`Status::Ok`].
///
/// ## Encoding
///
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |    STATUS     |                                               |
/// +-+-+-+-+-+-+-+-+                                               +
/// /                 X25519_SHARED_SECRET (32-byte)                /
/// +               +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |               |
/// +-+-+-+-+-+-+-+-+
/// ```
#[derive(Clone, PartialEq, Encode, Decode, Zeroize, ZeroizeOnDrop)]
#[encdec(error = "ProtoError")]
pub struct EcdhResp {
    #[zeroize(skip)]
    pub status: Status,
    #[encdec(with = "arr")]
    pub shared_secret: [u8; KEY_LEN],
}

impl EcdhResp {
    /// Create a successful response containing `shared_secret`
    pub fn ok(shared_secret: [u8; KEY_LEN]) -> Self {
        Self {
            status: Status::Ok,
            shared_secret,
        }
    }

    /// Create a failure response with no key material
    pub fn error(status: Status) -> Self {
        Self {
            status,
            shared_secret: [0u8; KEY_LEN],
        }
    }
}

impl fmt::Debug for EcdhResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EcdhResp")
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod test {
    use rand::random;

    use super::*;
    use crate::test::encode_decode;

    #[test]
    fn ecdh_req() {
        let req = EcdhReq::new(random(), random(), false, random());

        let mut buff = [0u8; 128];
        let n = encode_decode(&mut buff, &req);
        assert_eq!(n, 97);

        assert_eq!(buff[64], 0);
        assert_eq!(&buff[65..97], &req.peer_public_key);
    }

    #[test]
    fn ecdh_resp() {
        let mut buff = [0u8; 128];
        let n = encode_decode(&mut buff, &EcdhResp::ok(random()));
        assert_eq!(n, 33);
    }

    #[test]
    fn timeout_resp_has_no_secret() {
        let mut buff = [0xffu8; 128];
        let r = EcdhResp::error(Status::TouchTimeout);

        let n = r.encode(&mut buff).unwrap();
        assert_eq!(buff[0], 2);
        assert!(buff[1..n].iter().all(|b| *b == 0));
    }
}

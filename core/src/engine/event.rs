// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::Decode;

use tkey_x25519_proto::{
    ecdh::EcdhReq, public_key::PublicKeyReq, AppCmd, AppReq, CmdLen, ProtoError,
};

/// [`Engine`][super::Engine] input events, decoded from request frames
#[derive(Clone, PartialEq, Debug)]
pub enum Event {
    /// Fetch application name and version
    GetNameVersion,

    /// Name / version request in an unexpected length class
    NameVersionMalformed,

    /// Fetch public key
    GetPublicKey(PublicKeyReq),

    /// Compute shared secret
    DoEcdh(EcdhReq),

    /// Key request with a payload not matching the required length class
    WrongLength(AppCmd),

    /// Unrecognised command byte
    Unknown(u8),
}

impl Event {
    /// Parse a request payload read for the length class `len`,
    /// the first byte being the command code
    pub fn parse(len: CmdLen, cmd: &[u8]) -> Result<Self, ProtoError> {
        let n = len.bytes();
        if cmd.len() < n {
            return Err(ProtoError::InvalidLength);
        }

        // Length classes are always at least one byte
        let code = cmd[0];
        let args = &cmd[1..n];

        let evt = match AppCmd::try_from(code) {
            Ok(AppCmd::GetNameVersion) if len == CmdLen::Len1 => Event::GetNameVersion,
            Ok(AppCmd::GetNameVersion) => Event::NameVersionMalformed,

            Ok(AppCmd::GetPublicKey) if len == PublicKeyReq::LEN => {
                let (req, _) = PublicKeyReq::decode(args)?;
                Event::GetPublicKey(req)
            }
            Ok(AppCmd::DoEcdh) if len == EcdhReq::LEN => {
                let (req, _) = EcdhReq::decode(args)?;
                Event::DoEcdh(req)
            }
            Ok(c @ (AppCmd::GetPublicKey | AppCmd::DoEcdh)) => Event::WrongLength(c),

            // Response codes are not valid requests
            _ => Event::Unknown(code),
        };

        Ok(evt)
    }
}

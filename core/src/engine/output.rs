// Copyright (c) 2022-2023 The MobileCoin Foundation

use encdec::Encode;

use tkey_x25519_proto::{
    ecdh::EcdhResp, name_version::NameVersionResp, public_key::PublicKeyResp, AppCmd,
    ProtoError,
};

/// [`Engine`][super::Engine] outputs (in response to events), encoded to response frames
#[derive(Clone, PartialEq, Debug)]
pub enum Output {
    /// Application name and version
    NameVersion(NameVersionResp),

    /// Derived public key
    PublicKey(PublicKeyResp),

    /// Computed shared secret
    Ecdh(EcdhResp),

    /// Unrecognised command
    UnknownCmd,
}

impl Output {
    /// Fetch the response code for an output
    pub fn rsp_code(&self) -> AppCmd {
        match self {
            Output::NameVersion(_) => AppCmd::RspGetNameVersion,
            Output::PublicKey(_) => AppCmd::RspGetPublicKey,
            Output::Ecdh(_) => AppCmd::RspDoEcdh,
            Output::UnknownCmd => AppCmd::RspUnknownCmd,
        }
    }

    /// Encode an output to the response payload following the response code
    pub fn encode(&self, buff: &mut [u8]) -> Result<usize, ProtoError> {
        match self {
            Output::NameVersion(r) => r.encode(buff),
            Output::PublicKey(r) => r.encode(buff),
            Output::Ecdh(r) => r.encode(buff),
            Output::UnknownCmd => Ok(0),
        }
    }
}

#[cfg(test)]
mod test {
    use tkey_x25519_proto::Status;

    use super::*;

    #[test]
    fn encode_outputs() {
        let tests = &[
            (
                Output::NameVersion(NameVersionResp::app()),
                AppCmd::RspGetNameVersion,
                12,
            ),
            (
                Output::PublicKey(PublicKeyResp::ok([0xaa; 32])),
                AppCmd::RspGetPublicKey,
                33,
            ),
            (
                Output::Ecdh(EcdhResp::error(Status::TouchTimeout)),
                AppCmd::RspDoEcdh,
                33,
            ),
            (Output::UnknownCmd, AppCmd::RspUnknownCmd, 0),
        ];

        for (o, code, len) in tests {
            let mut buff = [0u8; 127];

            assert_eq!(o.rsp_code(), *code);
            assert_eq!(o.encode(&mut buff), Ok(*len), "length mismatch for {o:?}");

            // Payload must fit the response length class (less code byte)
            let class = code.rsp_len().unwrap().bytes();
            assert!(*len < class || *len == 0);
        }
    }

    #[test]
    fn encode_name_version() {
        let mut buff = [0u8; 31];
        let n = Output::NameVersion(NameVersionResp::app())
            .encode(&mut buff)
            .unwrap();

        assert_eq!(&buff[..n], b"x25519  \x01\x00\x00\x00");
    }
}

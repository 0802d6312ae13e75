//! Prelude to simplify downstream use of protocol objects
//!

pub use crate::{
    ecdh::{EcdhReq, EcdhResp},
    frame::{CmdLen, Endpoint, FrameHeader, FrameStatus, CMDLEN_MAXBYTES},
    name_version::{NameVersionReq, NameVersionResp},
    public_key::{PublicKeyReq, PublicKeyResp},
    AppCmd, AppReq, ProtoError, Status,
};

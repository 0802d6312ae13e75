// Copyright (c) 2022-2023 The MobileCoin Foundation

use num_enum::TryFromPrimitive;
use strum::Display;

use crate::{encdec_u8_enum, ProtoError};

/// Status byte leading key-bearing responses
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default, TryFromPrimitive, Display)]
#[repr(u8)]
pub enum Status {
    #[default]
    Ok = 0,
    /// Request payload did not match the expected length class
    WrongLength = 1,
    /// Touch confirmation was not received in time
    TouchTimeout = 2,
}

encdec_u8_enum!(Status, ProtoError::UnknownStatus);

impl Status {
    pub fn is_ok(&self) -> bool {
        *self == Status::Ok
    }
}

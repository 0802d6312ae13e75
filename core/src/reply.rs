// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Frame reply encoder
//!
//! Replies are a header echoing the request id and endpoint, the response
//! code, then `class - 1` bytes of payload zero-padded to the length class
//! fixed for that response code.

use tkey_x25519_proto::{AppCmd, CmdLen, FrameHeader, FrameStatus, CMDLEN_MAXBYTES};

use crate::{
    engine::Error,
    io::{transport_error, Io},
};

const ZEROS: [u8; CMDLEN_MAXBYTES] = [0u8; CMDLEN_MAXBYTES];

/// Write a reply for the request `hdr` with response `code` and payload `data`.
///
/// Payload beyond the response length class is truncated. Request codes are
/// rejected with [Error::UnknownResponse] without writing anything.
#[cfg_attr(feature = "noinline", inline(never))]
pub fn reply<IO: Io>(
    io: &mut IO,
    hdr: &FrameHeader,
    code: AppCmd,
    data: &[u8],
) -> Result<(), Error> {
    let len = match code.rsp_len() {
        Some(v) => v,
        None => {
            #[cfg(feature = "log")]
            log::error!("reply with non-response code: {}", code);

            return Err(Error::UnknownResponse);
        }
    };

    let n = len.bytes() - 1;
    let data = &data[..data.len().min(n)];

    io.write_byte(hdr.reply_byte(FrameStatus::Ok, len))
        .map_err(transport_error)?;
    io.write_byte(code as u8).map_err(transport_error)?;

    io.write(data).map_err(transport_error)?;
    if data.len() < n {
        io.write(&ZEROS[..n - data.len()]).map_err(transport_error)?;
    }

    Ok(())
}

/// Write a NOK reply for the request `hdr`
pub fn reply_nok<IO: Io>(io: &mut IO, hdr: &FrameHeader) -> Result<(), Error> {
    io.write_byte(hdr.reply_byte(FrameStatus::NotOk, CmdLen::Len1))
        .map_err(transport_error)?;
    io.write_byte(0).map_err(transport_error)?;

    Ok(())
}

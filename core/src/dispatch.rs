// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Command dispatcher, running one request / response exchange per [Dispatcher::poll]

use zeroize::Zeroize;

use tkey_x25519_proto::{AppCmd, Endpoint, FrameHeader, CMDLEN_MAXBYTES};

use crate::{
    engine::{Dalek, Driver, Engine, Error, Event, X25519},
    io::{transport_error, Io},
    reply::{reply, reply_nok},
};

/// [Dispatcher] reads request frames from an [Io] transport, passes them to
/// the [Engine] and writes the replies
pub struct Dispatcher<DRV: Driver, IO: Io, X: X25519 = Dalek> {
    engine: Engine<DRV, X>,
    io: IO,

    cmd: [u8; CMDLEN_MAXBYTES],
    rsp: [u8; CMDLEN_MAXBYTES],
}

impl<DRV: Driver, IO: Io, X: X25519> Dispatcher<DRV, IO, X> {
    /// Create a new dispatcher over the provided engine and transport
    pub const fn new(engine: Engine<DRV, X>, io: IO) -> Self {
        Self {
            engine,
            io,
            cmd: [0u8; CMDLEN_MAXBYTES],
            rsp: [0u8; CMDLEN_MAXBYTES],
        }
    }

    pub fn engine(&self) -> &Engine<DRV, X> {
        &self.engine
    }

    pub fn io(&self) -> &IO {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut IO {
        &mut self.io
    }

    /// Check request / response buffers have been cleared
    pub fn is_clear(&self) -> bool {
        self.cmd.iter().all(|b| *b == 0) && self.rsp.iter().all(|b| *b == 0)
    }

    /// Handle a single request, returning the response code sent.
    ///
    /// Errors indicate the request was dropped or answered with NOK,
    /// callers should log these and continue polling.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn poll(&mut self) -> Result<AppCmd, Error> {
        self.engine.idle();

        let r = self.handle();

        // Clear request and response buffers on all paths
        self.cmd.zeroize();
        self.rsp.zeroize();

        r
    }

    fn handle(&mut self) -> Result<AppCmd, Error> {
        // Read and parse header
        let b = self.io.read_byte().map_err(transport_error)?;

        #[cfg(feature = "log")]
        log::trace!("read byte: {:02x}", b);

        let hdr = match FrameHeader::parse(b) {
            Ok(v) => v,
            Err(_) => {
                #[cfg(feature = "log")]
                log::warn!("could not parse header: {:02x}", b);

                return Err(Error::InvalidHeader);
            }
        };

        // Read command payload, always consumed so the stream stays aligned
        let n = hdr.len.bytes();
        self.io
            .read(&mut self.cmd[..n])
            .map_err(transport_error)?;

        // Check routing
        match hdr.endpoint {
            Endpoint::Software => (),
            Endpoint::Firmware => {
                reply_nok(&mut self.io, &hdr)?;

                #[cfg(feature = "log")]
                log::warn!("responded NOK to frame for firmware");

                return Err(Error::FirmwareEndpoint);
            }
            _e => {
                #[cfg(feature = "log")]
                log::warn!("frame not addressed to application: {}", _e);

                return Err(Error::Misrouted);
            }
        }

        // Decode and handle event
        let evt = Event::parse(hdr.len, &self.cmd)?;
        let out = self.engine.update(&evt);
        drop(evt);

        // Encode and send response
        let code = out.rsp_code();
        let n = out
            .encode(&mut self.rsp)
            .map_err(|_| Error::EncodingFailed)?;
        drop(out);

        reply(&mut self.io, &hdr, code, &self.rsp[..n])?;

        Ok(code)
    }
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Blocking byte transport used by the [Dispatcher][crate::dispatch::Dispatcher]

use core::fmt::Debug;

use crate::engine::Error;

/// [`Io`] trait provides a blocking byte transport between host and device
pub trait Io {
    /// Transport error type
    type Error: Debug;

    /// Read exactly `buff.len()` bytes, blocking until complete
    fn read(&mut self, buff: &mut [u8]) -> Result<(), Self::Error>;

    /// Write all of `buff`
    fn write(&mut self, buff: &[u8]) -> Result<(), Self::Error>;

    /// Read a single byte
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut b = [0u8; 1];
        self.read(&mut b)?;
        Ok(b[0])
    }

    /// Write a single byte
    fn write_byte(&mut self, b: u8) -> Result<(), Self::Error> {
        self.write(&[b])
    }
}

impl<T: Io> Io for &mut T {
    type Error = T::Error;

    fn read(&mut self, buff: &mut [u8]) -> Result<(), Self::Error> {
        T::read(self, buff)
    }

    fn write(&mut self, buff: &[u8]) -> Result<(), Self::Error> {
        T::write(self, buff)
    }
}

/// Map transport errors to [Error::Transport], logging the cause
pub(crate) fn transport_error<E: Debug>(_e: E) -> Error {
    #[cfg(feature = "log")]
    log::error!("transport error: {:?}", _e);

    Error::Transport
}

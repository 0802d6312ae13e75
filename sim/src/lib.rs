// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Hosted simulator for the TKey X25519 application
//!
//! This runs the device [Dispatcher] over TCP, with a wall-clock touch timer
//! and a scriptable presence source in place of the TKey hardware, for
//! exercising host tooling without a device.

use std::{
    cell::Cell,
    io::{Read, Write},
    net::TcpListener,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::{Duration, Instant},
};

use byteorder::{ByteOrder, LittleEndian};
use log::{debug, info, warn};
use strum::Display;

use tkey_x25519_core::{
    dispatch::Dispatcher,
    engine::{Driver, Engine, Error, Led},
    io::Io,
    secret::{CDI_LEN, CDI_WORDS},
    touch::TouchConfig,
};

/// Interval between presence polls while awaiting touch
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Touch configuration for hosted use, blinking at ~2Hz with [POLL_INTERVAL]
pub const SIM_TOUCH: TouchConfig = TouchConfig {
    blink_polls: 250,
    ..TouchConfig::DEFAULT
};

/// Simulated presence source
#[derive(Copy, Clone, PartialEq, Debug, Display, clap::ValueEnum)]
#[strum(serialize_all = "snake_case")]
pub enum TouchMode {
    /// Touch is always confirmed
    Auto,
    /// Touch is never received
    Never,
    /// Touch is signalled by a line on stdin
    Stdin,
}

/// Simulated hardware [Driver]
pub struct SimDriver {
    cdi: [u8; CDI_LEN],
    mode: TouchMode,
    presence: Arc<AtomicBool>,
    deadline: Cell<Option<Instant>>,
    led: Cell<Led>,
}

impl SimDriver {
    /// Create a new simulated driver with the provided CDI and presence source
    pub fn new(cdi: [u8; CDI_LEN], mode: TouchMode) -> Self {
        Self {
            cdi,
            mode,
            presence: Arc::new(AtomicBool::new(false)),
            deadline: Cell::new(None),
            led: Cell::new(Led::empty()),
        }
    }

    /// Fetch a handle to the presence flag, set to signal a touch
    pub fn presence(&self) -> Arc<AtomicBool> {
        self.presence.clone()
    }

    /// Fetch current LED state
    pub fn led(&self) -> Led {
        self.led.get()
    }
}

impl Driver for SimDriver {
    fn read_cdi(&self, words: &mut [u32; CDI_WORDS]) {
        LittleEndian::read_u32_into(&self.cdi, words);
    }

    fn set_led(&self, led: Led) {
        if self.led.replace(led) != led {
            debug!("led: {:?}", led);
        }
    }

    fn touch_event(&self) -> bool {
        match self.mode {
            TouchMode::Auto => true,
            TouchMode::Never | TouchMode::Stdin => {
                // Stand in for the hardware poll loop timing
                std::thread::sleep(POLL_INTERVAL);
                self.presence.load(Ordering::SeqCst)
            }
        }
    }

    fn touch_clear(&self) {
        self.presence.store(false, Ordering::SeqCst);
    }

    fn timer_start(&self, timeout_s: u32) {
        let d = Instant::now() + Duration::from_secs(timeout_s as u64);
        self.deadline.set(Some(d));
    }

    fn timer_expired(&self) -> bool {
        // A timer that was never started reads as stopped
        match self.deadline.get() {
            Some(d) => Instant::now() >= d,
            None => true,
        }
    }
}

/// [Io] adaptor for blocking byte streams
pub struct StreamIo<S: Read + Write> {
    s: S,
}

impl<S: Read + Write> StreamIo<S> {
    pub fn new(s: S) -> Self {
        Self { s }
    }

    pub fn into_inner(self) -> S {
        self.s
    }
}

impl<S: Read + Write> Io for StreamIo<S> {
    type Error = std::io::Error;

    fn read(&mut self, buff: &mut [u8]) -> Result<(), Self::Error> {
        self.s.read_exact(buff)
    }

    fn write(&mut self, buff: &[u8]) -> Result<(), Self::Error> {
        self.s.write_all(buff)?;
        self.s.flush()
    }
}

/// Serve requests on a single stream until the transport fails
pub fn serve_stream<S: Read + Write>(drv: &SimDriver, touch: &TouchConfig, s: S) {
    let engine = Engine::new(drv).with_touch_config(*touch);
    let mut d = Dispatcher::new(engine, StreamIo::new(s));

    loop {
        match d.poll() {
            Ok(code) => debug!("sent {}", code),
            Err(Error::Transport) => break,
            Err(e) => warn!("request dropped: {}", e),
        }
    }
}

/// Accept and serve connections, one at a time
pub fn serve(listener: &TcpListener, drv: &SimDriver, touch: &TouchConfig) -> anyhow::Result<()> {
    loop {
        let (s, addr) = listener.accept()?;
        info!("connection from {}", addr);

        serve_stream(drv, touch, s);

        info!("connection closed");
    }
}

/// Parse a hex encoded CDI
pub fn parse_cdi(s: &str) -> anyhow::Result<[u8; CDI_LEN]> {
    let mut b = [0u8; CDI_LEN];
    hex::decode_to_slice(s.trim(), &mut b)?;
    Ok(b)
}

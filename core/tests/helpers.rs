#![allow(unused)]
// Copyright (c) 2022-2023 The MobileCoin Foundation

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
};

use byteorder::{ByteOrder, LittleEndian};
use encdec::Encode;
use log::{debug, trace};

use tkey_x25519_core::{
    dispatch::Dispatcher,
    engine::{Dalek, Driver, Engine, Led, X25519},
    io::Io,
    proto::{prelude::*, KEY_LEN},
    secret::{Secret, CDI_LEN, CDI_WORDS},
    touch::TouchConfig,
};

/// Test CDI, bytes `0x00..0x1f`
pub const CDI: [u8; CDI_LEN] = {
    let mut b = [0u8; CDI_LEN];
    let mut i = 0;
    while i < CDI_LEN {
        b[i] = i as u8;
        i += 1;
    }
    b
};

/// Test user secret
pub const USER_SECRET: [u8; 32] = [0x22; 32];

/// Test peer private scalar
pub const PEER_SECRET: [u8; 32] = [0x33; 32];

/// Known-answer vectors for [CDI], [domain], [USER_SECRET] and [PEER_SECRET]:
/// (require_touch, public key, shared secret)
pub const VECTORS: &[(bool, &str, &str)] = &[
    (
        false,
        "7b60569c771f6680d07aee0e85990b5dc7fa849a5be4d05a781fa3493bc63e4f",
        "bb68f82a4743dd17e7b695592f78bc9f7c215cb951e67c6438931dd0eaea0967",
    ),
    (
        true,
        "bd0f63e5b6de73be2f9e6b8c480ddcfbd5fae635df077740b21fd8c11967210b",
        "e5307f2fd5a92be880e47cf198e4f5f70bb660db24a9f6200094493e98316b48",
    ),
];

/// Test domain, `"tkey-x25519 test"` zero padded
pub fn domain() -> [u8; 32] {
    let mut d = [0u8; 32];
    d[..16].copy_from_slice(b"tkey-x25519 test");
    d
}

pub fn hex32(s: &str) -> [u8; 32] {
    let mut b = [0u8; 32];
    for (i, v) in b.iter_mut().enumerate() {
        *v = u8::from_str_radix(&s[i * 2..][..2], 16).unwrap();
    }
    b
}

/// Setup test logging
pub fn setup() {
    let _ = simplelog::SimpleLogger::init(
        log::LevelFilter::Debug,
        simplelog::Config::default(),
    );
}

/// Scripted touch behaviour
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Presence {
    /// Touch appears after N polls
    After(usize),
    /// No touch ever received
    Never,
}

/// Test driver with simulated CDI, presence, timer and LED trace
pub struct TestDriver {
    pub cdi: [u8; CDI_LEN],
    pub presence: Presence,
    /// Timer expires after N expiry checks
    pub timer_checks: usize,

    pub polls: Cell<usize>,
    pub checks: Cell<usize>,
    pub pending: Cell<bool>,
    pub timer_starts: Cell<usize>,
    pub cdi_reads: Cell<usize>,
    pub leds: RefCell<Vec<Led>>,
}

impl TestDriver {
    pub fn new(presence: Presence) -> Self {
        Self::new_with_cdi(CDI, presence)
    }

    pub fn new_with_cdi(cdi: [u8; CDI_LEN], presence: Presence) -> Self {
        Self {
            cdi,
            presence,
            timer_checks: 1_000,
            polls: Cell::new(0),
            checks: Cell::new(0),
            pending: Cell::new(false),
            timer_starts: Cell::new(0),
            cdi_reads: Cell::new(0),
            leds: RefCell::new(Vec::new()),
        }
    }

    /// Fetch the most recent LED state
    pub fn led(&self) -> Option<Led> {
        self.leds.borrow().last().copied()
    }
}

impl Driver for TestDriver {
    fn read_cdi(&self, words: &mut [u32; CDI_WORDS]) {
        LittleEndian::read_u32_into(&self.cdi, words);
        self.cdi_reads.set(self.cdi_reads.get() + 1);
    }

    fn set_led(&self, led: Led) {
        trace!("led: {:?}", led);
        self.leds.borrow_mut().push(led);
    }

    fn touch_event(&self) -> bool {
        let n = self.polls.get();
        self.polls.set(n + 1);

        if self.presence == Presence::After(n) {
            debug!("touch!");
            self.pending.set(true);
        }

        self.pending.get()
    }

    fn touch_clear(&self) {
        self.pending.set(false);
    }

    fn timer_start(&self, _timeout_s: u32) {
        self.checks.set(0);
        self.timer_starts.set(self.timer_starts.get() + 1);
    }

    fn timer_expired(&self) -> bool {
        let n = self.checks.get();
        self.checks.set(n + 1);

        n >= self.timer_checks
    }
}

/// Curve wrapper counting operations
#[derive(Default)]
pub struct CountingCurve {
    pub ops: Cell<usize>,
}

impl X25519 for CountingCurve {
    fn public_key(&self, secret: &Secret) -> [u8; KEY_LEN] {
        self.ops.set(self.ops.get() + 1);
        Dalek.public_key(secret)
    }

    fn shared_secret(&self, secret: &Secret, peer: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
        self.ops.set(self.ops.get() + 1);
        Dalek.shared_secret(secret, peer)
    }
}

/// Loopback transport, reads from a queued input and records output
#[derive(Default)]
pub struct Loopback {
    pub rx: VecDeque<u8>,
    pub tx: Vec<u8>,
}

impl Loopback {
    /// Queue a frame for reading
    pub fn push(&mut self, frame: &[u8]) {
        self.rx.extend(frame.iter());
    }

    /// Take written bytes
    pub fn take(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.tx)
    }
}

/// Loopback errors
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum LoopbackError {
    /// No more queued input
    Empty,
}

impl Io for Loopback {
    type Error = LoopbackError;

    fn read(&mut self, buff: &mut [u8]) -> Result<(), Self::Error> {
        if self.rx.len() < buff.len() {
            return Err(LoopbackError::Empty);
        }

        for b in buff.iter_mut() {
            *b = self.rx.pop_front().ok_or(LoopbackError::Empty)?;
        }

        Ok(())
    }

    fn write(&mut self, buff: &[u8]) -> Result<(), Self::Error> {
        self.tx.extend_from_slice(buff);
        Ok(())
    }
}

/// Test dispatcher instance
pub type TestDispatcher = Dispatcher<TestDriver, Loopback, CountingCurve>;

/// Create a dispatcher with a short touch blink period
pub fn dispatcher(drv: TestDriver) -> TestDispatcher {
    let engine = Engine::new_with_curve(drv, CountingCurve::default()).with_touch_config(
        TouchConfig {
            blink_polls: 16,
            ..TouchConfig::DEFAULT
        },
    );

    Dispatcher::new(engine, Loopback::default())
}

/// Build a request frame for an encodable request object
pub fn frame<R: Encode<Error = ProtoError> + AppReq>(id: u8, req: &R) -> Vec<u8> {
    frame_with(id, Endpoint::Software, R::LEN, R::CMD as u8, req)
}

/// Build a request frame with explicit endpoint, length class and command code
pub fn frame_with<R: Encode<Error = ProtoError>>(
    id: u8,
    endpoint: Endpoint,
    len: CmdLen,
    cmd: u8,
    req: &R,
) -> Vec<u8> {
    let hdr = FrameHeader::new(id, endpoint, len);

    let mut buff = vec![0u8; 1 + CMDLEN_MAXBYTES];
    buff[0] = hdr.request_byte();
    buff[1] = cmd;

    let n = req.encode(&mut buff[2..]).unwrap();
    trace!("encoded: {:02x?}", &buff[2..][..n]);

    // Truncate to the length class
    buff.truncate(1 + len.bytes());
    buff
}

/// Split a reply into header, response code and payload
pub fn split_reply(r: &[u8]) -> (FrameHeader, FrameStatus, u8, &[u8]) {
    let (hdr, status) = FrameHeader::parse_response(r[0]).unwrap();

    assert_eq!(
        r.len(),
        1 + hdr.len.bytes(),
        "reply length does not match length class"
    );

    (hdr, status, r[1], &r[2..])
}

// Copyright (c) 2022-2023 The MobileCoin Foundation

//! The [Engine] provides the X25519 application functionality.
//!
//! This handles [Event] inputs and returns [Output] responses to the caller,
//! see [proto][crate::proto] for frame and object encoding specifications.

use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};
use zeroize::Zeroize;

use tkey_x25519_proto::{
    ecdh::{EcdhReq, EcdhResp},
    name_version::NameVersionResp,
    public_key::{PublicKeyReq, PublicKeyResp},
    AppCmd, Status, KEY_LEN,
};

use crate::{
    secret::{Kdf, Secret, CDI_WORDS},
    touch::{wait_touch, TouchConfig, TouchState},
};

mod event;
pub use event::Event;

mod output;
pub use output::Output;

mod error;
pub use error::Error;

bitflags::bitflags! {
    /// Status LED colours
    pub struct Led: u32 {
        const BLUE = 1 << 0;
        const GREEN = 1 << 1;
        const RED = 1 << 2;

        /// Indicator shown while waiting for a command
        const IDLE = Self::GREEN.bits | Self::BLUE.bits;
    }
}

/// [`Driver`] trait provides platform support for [`Engine`] instances
pub trait Driver {
    /// Read the hardware compound device identifier, word-by-word
    fn read_cdi(&self, words: &mut [u32; CDI_WORDS]);

    /// Set status LED state
    fn set_led(&self, led: Led);

    /// Check for a pending touch event
    fn touch_event(&self) -> bool;

    /// Acknowledge / clear any pending touch event
    fn touch_clear(&self);

    /// (Re)arm the countdown timer
    fn timer_start(&self, timeout_s: u32);

    /// Check whether the countdown timer has elapsed
    fn timer_expired(&self) -> bool;
}

impl<T: Driver> Driver for &T {
    fn read_cdi(&self, words: &mut [u32; CDI_WORDS]) {
        T::read_cdi(self, words)
    }

    fn set_led(&self, led: Led) {
        T::set_led(self, led)
    }

    fn touch_event(&self) -> bool {
        T::touch_event(self)
    }

    fn touch_clear(&self) {
        T::touch_clear(self)
    }

    fn timer_start(&self, timeout_s: u32) {
        T::timer_start(self, timeout_s)
    }

    fn timer_expired(&self) -> bool {
        T::timer_expired(self)
    }
}

/// X25519 curve operations, split out so platforms (and tests) can
/// substitute or observe them
pub trait X25519 {
    /// Compute the public key for a secret scalar
    fn public_key(&self, secret: &Secret) -> [u8; KEY_LEN];

    /// Compute the shared secret between a secret scalar and peer public key
    fn shared_secret(&self, secret: &Secret, peer: &[u8; KEY_LEN]) -> [u8; KEY_LEN];
}

/// Default [X25519] implementation using `x25519-dalek`
#[derive(Copy, Clone, Debug, Default)]
pub struct Dalek;

impl X25519 for Dalek {
    fn public_key(&self, secret: &Secret) -> [u8; KEY_LEN] {
        self.shared_secret(secret, &X25519_BASEPOINT_BYTES)
    }

    fn shared_secret(&self, secret: &Secret, peer: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
        let mut k = *secret.as_bytes();
        let r = x25519(k, *peer);
        k.zeroize();
        r
    }
}

/// [Engine] provides hardware-independent support for X25519 application operations
pub struct Engine<DRV: Driver, X: X25519 = Dalek> {
    drv: DRV,
    curve: X,
    touch: TouchConfig,

    kdf: Kdf,
    secret: Secret,
}

impl<DRV: Driver> Engine<DRV> {
    /// Create a new engine instance with the provided driver,
    /// using the default [Dalek] curve implementation
    pub const fn new(drv: DRV) -> Self {
        Self::new_with_curve(drv, Dalek)
    }
}

impl<DRV: Driver, X: X25519> Engine<DRV, X> {
    /// Create a new engine instance with the provided driver and curve
    pub const fn new_with_curve(drv: DRV, curve: X) -> Self {
        Self {
            drv,
            curve,
            touch: TouchConfig::DEFAULT,
            kdf: Kdf::new(),
            secret: Secret::new(),
        }
    }

    /// Override touch confirmation configuration
    pub fn with_touch_config(mut self, touch: TouchConfig) -> Self {
        self.touch = touch;
        self
    }

    /// Fetch driver reference
    pub fn drv(&self) -> &DRV {
        &self.drv
    }

    /// Fetch curve implementation reference
    pub fn curve(&self) -> &X {
        &self.curve
    }

    /// Show idle indicator
    pub fn idle(&self) {
        self.drv.set_led(Led::IDLE);
    }

    /// Handle incoming events
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn update(&mut self, evt: &Event) -> Output {
        #[cfg(feature = "log")]
        log::debug!("event: {:02x?}", evt);

        let r = match evt {
            // Fetch application name and version
            Event::GetNameVersion => Output::NameVersion(NameVersionResp::app()),

            // Malformed name / version requests get an all-zero reply
            Event::NameVersionMalformed => Output::NameVersion(NameVersionResp::zeroed()),

            // Derive public key
            Event::GetPublicKey(req) => Output::PublicKey(self.public_key(req)),

            // Touch gated ECDH
            Event::DoEcdh(req) => Output::Ecdh(self.ecdh(req)),

            // Length mismatches never reach key derivation
            Event::WrongLength(AppCmd::DoEcdh) => {
                Output::Ecdh(EcdhResp::error(Status::WrongLength))
            }
            Event::WrongLength(_) => Output::PublicKey(PublicKeyResp::error(Status::WrongLength)),

            Event::Unknown(_) => Output::UnknownCmd,
        };

        #[cfg(feature = "log")]
        log::debug!("output: {:?}", r);

        r
    }

    /// Check derivation buffers and secret have been cleared
    pub fn is_clear(&self) -> bool {
        self.kdf.is_clear() && self.secret.is_zero()
    }

    #[cfg_attr(feature = "noinline", inline(never))]
    fn public_key(&mut self, req: &PublicKeyReq) -> PublicKeyResp {
        self.kdf.derive(
            &self.drv,
            &mut self.secret,
            &req.domain,
            &req.user_secret,
            req.require_touch,
        );

        let public_key = self.curve.public_key(&self.secret);
        self.secret.zeroize();

        PublicKeyResp::ok(public_key)
    }

    #[cfg_attr(feature = "noinline", inline(never))]
    fn ecdh(&mut self, req: &EcdhReq) -> EcdhResp {
        // Wait for confirmation prior to deriving anything
        if req.require_touch != 0 {
            match wait_touch(&self.drv, &self.touch) {
                TouchState::Confirmed => (),
                _s => {
                    #[cfg(feature = "log")]
                    log::warn!("touch not confirmed: {}", _s);

                    return EcdhResp::error(Status::TouchTimeout);
                }
            }
        }

        self.kdf.derive(
            &self.drv,
            &mut self.secret,
            &req.domain,
            &req.user_secret,
            req.require_touch,
        );

        let shared_secret = self.curve.shared_secret(&self.secret, &req.peer_public_key);
        self.secret.zeroize();

        EcdhResp::ok(shared_secret)
    }
}

#[cfg(test)]
mod test {
    use core::cell::Cell;

    use byteorder::{ByteOrder, LittleEndian};
    use rand::random;

    use super::*;
    use crate::secret::CDI_LEN;

    /// Minimal driver, touch is either immediate or never
    struct Drv {
        cdi: [u8; CDI_LEN],
        touch: bool,
        led: Cell<u32>,
    }

    impl Drv {
        fn new(touch: bool) -> Self {
            let mut cdi = [0u8; CDI_LEN];
            for (i, v) in cdi.iter_mut().enumerate() {
                *v = i as u8;
            }

            Self {
                cdi,
                touch,
                led: Cell::new(0),
            }
        }
    }

    impl Driver for Drv {
        fn read_cdi(&self, words: &mut [u32; CDI_WORDS]) {
            LittleEndian::read_u32_into(&self.cdi, words);
        }

        fn set_led(&self, led: Led) {
            self.led.set(led.bits());
        }

        fn touch_event(&self) -> bool {
            self.touch
        }

        fn touch_clear(&self) {}

        fn timer_start(&self, _timeout_s: u32) {}

        fn timer_expired(&self) -> bool {
            !self.touch
        }
    }

    /// Curve wrapper counting operations
    #[derive(Default)]
    struct Counting {
        ops: Cell<usize>,
    }

    impl X25519 for Counting {
        fn public_key(&self, secret: &Secret) -> [u8; KEY_LEN] {
            self.ops.set(self.ops.get() + 1);
            Dalek.public_key(secret)
        }

        fn shared_secret(&self, secret: &Secret, peer: &[u8; KEY_LEN]) -> [u8; KEY_LEN] {
            self.ops.set(self.ops.get() + 1);
            Dalek.shared_secret(secret, peer)
        }
    }

    fn hex32(s: &str) -> [u8; 32] {
        let mut b = [0u8; 32];
        for (i, v) in b.iter_mut().enumerate() {
            *v = u8::from_str_radix(&s[i * 2..][..2], 16).unwrap();
        }
        b
    }

    fn domain() -> [u8; 32] {
        let mut d = [0u8; 32];
        d[..16].copy_from_slice(b"tkey-x25519 test");
        d
    }

    const USER_SECRET: [u8; 32] = [0x22; 32];

    const PEER_PUBLIC: &str = "7b0d47d93427f8311160781c7c733fd89f88970aef490d8aa0ee19a4cb8a1b14";

    #[test]
    fn name_version() {
        let mut e = Engine::new(Drv::new(true));

        let o = e.update(&Event::GetNameVersion);
        assert_eq!(o, Output::NameVersion(NameVersionResp::app()));

        let o = e.update(&Event::NameVersionMalformed);
        assert_eq!(o, Output::NameVersion(NameVersionResp::zeroed()));
    }

    #[test]
    fn public_key_known_answer() {
        let mut e = Engine::new(Drv::new(false));

        let tests = &[
            (
                false,
                "7b60569c771f6680d07aee0e85990b5dc7fa849a5be4d05a781fa3493bc63e4f",
            ),
            (
                true,
                "bd0f63e5b6de73be2f9e6b8c480ddcfbd5fae635df077740b21fd8c11967210b",
            ),
        ];

        for (touch, expected) in tests {
            let req = PublicKeyReq::new(domain(), USER_SECRET, *touch);
            let o = e.update(&Event::GetPublicKey(req));

            // Public key requests are never touch-gated
            assert_eq!(o, Output::PublicKey(PublicKeyResp::ok(hex32(expected))));
            assert!(e.is_clear());
        }
    }

    #[test]
    fn ecdh_known_answer() {
        let mut e = Engine::new(Drv::new(true));

        let tests = &[
            (
                false,
                "bb68f82a4743dd17e7b695592f78bc9f7c215cb951e67c6438931dd0eaea0967",
            ),
            (
                true,
                "e5307f2fd5a92be880e47cf198e4f5f70bb660db24a9f6200094493e98316b48",
            ),
        ];

        for (touch, expected) in tests {
            let req = EcdhReq::new(domain(), USER_SECRET, *touch, hex32(PEER_PUBLIC));
            let o = e.update(&Event::DoEcdh(req));

            assert_eq!(o, Output::Ecdh(EcdhResp::ok(hex32(expected))));
            assert!(e.is_clear());
        }
    }

    #[test]
    fn ecdh_touch_timeout() {
        let mut e = Engine::new_with_curve(Drv::new(false), Counting::default());

        let req = EcdhReq::new(random(), random(), true, random());
        let o = e.update(&Event::DoEcdh(req));

        assert_eq!(o, Output::Ecdh(EcdhResp::error(Status::TouchTimeout)));
        assert_eq!(e.curve().ops.get(), 0, "curve operation after touch timeout");
        assert!(e.is_clear());

        // Indicator is turned off after timeout
        assert_eq!(e.drv().led.get(), 0);

        // Without touch required the operation proceeds
        let req = EcdhReq::new(random(), random(), false, random());
        let o = e.update(&Event::DoEcdh(req));

        assert!(matches!(o, Output::Ecdh(EcdhResp { status: Status::Ok, .. })));
        assert_eq!(e.curve().ops.get(), 1);
    }

    #[test]
    fn wrong_length() {
        let mut e = Engine::new_with_curve(Drv::new(true), Counting::default());

        let o = e.update(&Event::WrongLength(AppCmd::GetPublicKey));
        assert_eq!(o, Output::PublicKey(PublicKeyResp::error(Status::WrongLength)));

        let o = e.update(&Event::WrongLength(AppCmd::DoEcdh));
        assert_eq!(o, Output::Ecdh(EcdhResp::error(Status::WrongLength)));

        assert_eq!(e.curve().ops.get(), 0);
    }

    #[test]
    fn unknown_command() {
        let mut e = Engine::new(Drv::new(true));

        assert_eq!(e.update(&Event::Unknown(0x42)), Output::UnknownCmd);
    }
}

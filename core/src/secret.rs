// Copyright (c) 2022-2023 The MobileCoin Foundation

//! Device-bound secret derivation
//!
//! Secrets are derived as `BLAKE2s-256(CDI ‖ DOMAIN ‖ USER_SECRET ‖ REQUIRE_TOUCH)`,
//! binding each key to the device (via the hardware CDI), the calling
//! context (via the domain), the user, and whether the key is touch-protected.
//! Keys derived with and without touch required are therefore distinct.

use core::fmt;

use blake2::{digest::generic_array::GenericArray, Blake2s256, Digest};
use byteorder::{ByteOrder, LittleEndian};
use static_assertions::const_assert_eq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use tkey_x25519_proto::{DOMAIN_LEN, KEY_LEN, REQUIRE_TOUCH_LEN, USER_SECRET_LEN};

use crate::engine::Driver;

/// CDI length in 32-bit words
pub const CDI_WORDS: usize = 8;

/// CDI length in bytes
pub const CDI_LEN: usize = CDI_WORDS * 4;

/// Length of the key derivation input
pub const KDF_INPUT_LEN: usize = CDI_LEN + DOMAIN_LEN + USER_SECRET_LEN + REQUIRE_TOUCH_LEN;

const_assert_eq!(KDF_INPUT_LEN, 97);

/// Derived secret, used directly as an X25519 scalar
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Secret([u8; KEY_LEN]);

impl Secret {
    /// Create a new (zeroed) secret
    pub const fn new() -> Self {
        Self([0u8; KEY_LEN])
    }

    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Check whether the secret has been cleared
    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.0
    }
}

impl Default for Secret {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(..)")
    }
}

/// Key derivation context, owning the transient derivation buffers.
///
/// Buffers are zeroed before [`Kdf::derive`] returns.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Kdf {
    input: [u8; KDF_INPUT_LEN],
    cdi: [u32; CDI_WORDS],
}

impl Kdf {
    /// Create a new key derivation context
    pub const fn new() -> Self {
        Self {
            input: [0u8; KDF_INPUT_LEN],
            cdi: [0u32; CDI_WORDS],
        }
    }

    /// Derive a secret for the provided domain, user secret and touch flag,
    /// writing the result to `out`.
    #[cfg_attr(feature = "noinline", inline(never))]
    pub fn derive<DRV: Driver>(
        &mut self,
        drv: &DRV,
        out: &mut Secret,
        domain: &[u8; DOMAIN_LEN],
        user_secret: &[u8; USER_SECRET_LEN],
        require_touch: u8,
    ) {
        // Fetch local copy of the CDI (hardware requires word access)
        drv.read_cdi(&mut self.cdi);

        // Build derivation input
        let (cdi, args) = self.input.split_at_mut(CDI_LEN);
        LittleEndian::write_u32_into(&self.cdi, cdi);

        args[..DOMAIN_LEN].copy_from_slice(domain);
        args[DOMAIN_LEN..][..USER_SECRET_LEN].copy_from_slice(user_secret);
        args[DOMAIN_LEN + USER_SECRET_LEN] = require_touch;

        // Unkeyed BLAKE2s with 32-byte output, written in place
        let mut h = Blake2s256::new();
        h.update(&self.input[..]);
        h.finalize_into(GenericArray::from_mut_slice(&mut out.as_mut_bytes()[..]));

        // Clear CDI copy and input
        self.zeroize();
    }

    /// Check derivation buffers have been cleared
    pub fn is_clear(&self) -> bool {
        self.input.iter().all(|b| *b == 0) && self.cdi.iter().all(|w| *w == 0)
    }
}

impl Default for Kdf {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper to derive a secret using a temporary [Kdf] context
pub fn derive_secret<DRV: Driver>(
    drv: &DRV,
    domain: &[u8; DOMAIN_LEN],
    user_secret: &[u8; USER_SECRET_LEN],
    require_touch: u8,
) -> Secret {
    let mut secret = Secret::new();
    let mut kdf = Kdf::new();

    kdf.derive(drv, &mut secret, domain, user_secret, require_touch);

    secret
}

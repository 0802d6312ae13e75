// Copyright (c) 2022-2023 The MobileCoin Foundation

//! TKey X25519 device application core
//!
//! This provides a hardware-independent [Engine][engine::Engine] deriving
//! device-bound X25519 keys from a hardware unique secret (the CDI) and
//! caller-supplied domain / user secret material, optionally gated on
//! physical touch confirmation.
//!
//! Platforms supply a [Driver][engine::Driver] for hardware access and an
//! [Io][io::Io] byte transport, and call [Dispatcher::poll][dispatch::Dispatcher::poll]
//! in a loop. See [tkey_x25519_proto] for frame and object encodings.
//!
//! ## Operations
//!
//! ### Fetching application name / version
//!
//! A bare [`AppCmd::GetNameVersion`][proto::AppCmd::GetNameVersion] in a one
//! byte frame returns a [`NameVersionResp`][proto::name_version::NameVersionResp]
//! identifying the application.
//!
//! ### Fetching a public key
//!
//! A [`PublicKeyReq`][proto::public_key::PublicKeyReq] returns the X25519
//! public key for the secret derived from `CDI ‖ domain ‖ user_secret ‖ require_touch`.
//! The same inputs always produce the same key on the same device.
//! Public key requests are never touch-gated.
//!
//! ### Computing a shared secret
//!
//! An [`EcdhReq`][proto::ecdh::EcdhReq] with the same domain / user secret /
//! touch flag and a peer public key returns the X25519 shared secret.
//! Where `require_touch` is set the device blinks its LED and waits for
//! touch confirmation before deriving anything, responding with
//! [`Status::TouchTimeout`][proto::Status::TouchTimeout] if none arrives.
//!

#![cfg_attr(not(feature = "std"), no_std)]

pub use tkey_x25519_proto::{self as proto};

pub mod engine;

pub mod secret;

pub mod touch;

pub mod io;

pub mod reply;

pub mod dispatch;

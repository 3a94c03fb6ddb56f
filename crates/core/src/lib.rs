//! Biometric Login Core - Shared types library.
//!
//! This crate provides the value types threaded through the biometric login
//! pipelines:
//! - user and tag identifiers handed to and received from the face API
//! - namespacing of user identifiers within the vendor's shared id space
//! - vendor call options with explicit override precedence
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O and no
//! HTTP clients. The orchestration lives in the `biometric-login` crate.
//!
//! # Modules
//!
//! - [`types`] - Identifier newtypes, namespaces, confidence scores and options

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

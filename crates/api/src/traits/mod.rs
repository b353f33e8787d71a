//! Trait definitions for the gmcrypt public API

pub mod pke;

pub use pke::Pke;

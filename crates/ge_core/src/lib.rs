//! ge_core: Core types, domains, and integer helpers for the GE simulator.
//!
//! This crate is **I/O-free**. It defines stable types/APIs used across the
//! workspace (`ge_io`, `ge_algo`, `ge_pipeline`, `ge_report`, `ge_cli`).
//!
//! - Keys & tokens: `DistrictKey`, `PartyCode`
//! - Domain entities: `District`, `DistrictKind`, `Catalog`
//! - Domains: `Pct` (0..=100), `Params` (parliament size, walkover rules)
//! - Integer-first rounding (half-up vote counts, one-decimal shares)
//! - Name normalization and display formatting
//!
//! Serialization derives are gated behind the `serde` feature.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod errors {
    use core::fmt;

    /// Minimal error set for core-domain validation & parsing.
    #[derive(Clone, Debug, Eq, PartialEq)]
    pub enum CoreError {
        InvalidToken,
        EmptyName,
        PctOutOfRange(u32),
        DuplicateDistrict(alloc::string::String),
        UnknownDistrictKind(alloc::string::String),
        DomainOutOfRange(&'static str),
    }

    impl fmt::Display for CoreError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            match self {
                CoreError::InvalidToken => write!(f, "invalid token"),
                CoreError::EmptyName => write!(f, "empty name"),
                CoreError::PctOutOfRange(v) => write!(f, "percentage out of range: {v}"),
                CoreError::DuplicateDistrict(k) => write!(f, "duplicate district: {k}"),
                CoreError::UnknownDistrictKind(s) => write!(f, "unknown district type: {s}"),
                CoreError::DomainOutOfRange(k) => write!(f, "domain out of range: {k}"),
            }
        }
    }

    #[cfg(feature = "std")]
    impl std::error::Error for CoreError {}
}

pub mod ids;
pub mod names;
pub mod entities;
pub mod rounding;
pub mod variables;

pub use errors::CoreError;
pub use ids::{DistrictKey, PartyCode};
pub use entities::{Catalog, District, DistrictKind};
pub use variables::{Params, Pct};

//! crates/ge_core/src/ids.rs
//! Catalog keys and party tokens. Deterministic, strict shapes; no I/O.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

use crate::errors::CoreError;
use crate::names::normalize_key;

const TOKEN_MAX_LEN: usize = 64;

/// Token for PartyCode: ^[A-Za-z0-9_.:-]{1,64}$ (ASCII only)
#[inline]
pub fn is_valid_token(s: &str) -> bool {
    let bs = s.as_bytes();
    if bs.is_empty() || bs.len() > TOKEN_MAX_LEN {
        return false;
    }
    bs.iter().all(|&b| {
        b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b':' || b == b'-'
    })
}

macro_rules! simple_string_newtype {
    ($(#[$m:meta])* $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(String);

        impl $name {
            #[inline] pub fn as_str(&self) -> &str { &self.0 }
        }

        impl fmt::Display for $name {
            #[inline]
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
        }

        impl TryFrom<&str> for $name {
            type Error = CoreError;
            #[inline]
            fn try_from(value: &str) -> Result<Self, Self::Error> { value.parse() }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str { &self.0 }
        }

        #[cfg(feature = "serde")]
        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
                s.serialize_str(&self.0)
            }
        }

        #[cfg(feature = "serde")]
        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
                use serde::de::{Error as _, Unexpected};
                let s = String::deserialize(d)?;
                s.parse().map_err(|_| {
                    D::Error::invalid_value(Unexpected::Str(&s), &stringify!($name))
                })
            }
        }
    }
}

simple_string_newtype!(
    /// Normalized district name: lowercase, `-` → space, trimmed.
    ///
    /// Two spellings that differ only in case or hyphenation map to the same key,
    /// so map features and catalog rows can be matched directly.
    DistrictKey
);

simple_string_newtype!(
    /// Party token, e.g. `PAP`, `WP`: ^[A-Za-z0-9_.:-]{1,64}$
    PartyCode
);

impl DistrictKey {
    /// Normalize any display spelling into a key. Fails only on blank input.
    pub fn normalize(name: &str) -> Result<Self, CoreError> {
        let k = normalize_key(name);
        if k.is_empty() {
            return Err(CoreError::EmptyName);
        }
        Ok(DistrictKey(k))
    }
}

impl FromStr for DistrictKey {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DistrictKey::normalize(s)
    }
}

impl PartyCode {
    /// Build from a compile-time constant known to be a valid token.
    pub(crate) fn from_static(s: &'static str) -> Self {
        debug_assert!(is_valid_token(s), "invalid party constant: {s}");
        PartyCode(s.to_string())
    }
}

impl FromStr for PartyCode {
    type Err = CoreError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !is_valid_token(s) {
            return Err(CoreError::InvalidToken);
        }
        Ok(PartyCode(s.to_string()))
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

const CHARMAP: &[u8; 32] = b".12345abcdefghijklmnopqrstuvwxyz";
const MAX_LEN: usize = 13;

/// Namespaced 64-bit account identifier.
///
/// A `Name` packs up to 13 characters from the alphabet
/// `.12345abcdefghijklmnopqrstuvwxyz` into a `u64`: five bits per character
/// for the first twelve, four bits for the thirteenth (which is therefore
/// limited to `.1-5a-j`). Documents carry a `Name` as their creator; the raw
/// value keys the creator index.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Name(u64);

impl Name {
    /// Wrap a raw encoded value.
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// The encoded 64-bit value.
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// Returns `true` for the empty name.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    fn symbol(c: u8) -> Option<u64> {
        match c {
            b'a'..=b'z' => Some(u64::from(c - b'a') + 6),
            b'1'..=b'5' => Some(u64::from(c - b'1') + 1),
            b'.' => Some(0),
            _ => None,
        }
    }

    fn invalid(s: &str, reason: impl Into<String>) -> TypeError {
        TypeError::InvalidName {
            name: s.to_string(),
            reason: reason.into(),
        }
    }
}

impl FromStr for Name {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_LEN {
            return Err(Self::invalid(s, "longer than 13 characters"));
        }

        let mut value = 0u64;
        for (i, c) in s.bytes().enumerate() {
            let sym = Self::symbol(c)
                .ok_or_else(|| Self::invalid(s, format!("character {:?} not allowed", c as char)))?;
            if i < 12 {
                value |= (sym & 0x1f) << (64 - 5 * (i + 1));
            } else {
                if sym > 0x0f {
                    return Err(Self::invalid(s, "13th character must be one of .1-5a-j"));
                }
                value |= sym & 0x0f;
            }
        }

        let name = Self(value);
        // Trailing dots encode to the same value as the trimmed name.
        if name.to_string() != s {
            return Err(Self::invalid(s, "not in normalized form"));
        }
        Ok(name)
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const MASK: u64 = 0xF800_0000_0000_0000;

        let mut out = String::with_capacity(MAX_LEN);
        let mut v = self.0;
        for i in 0..MAX_LEN {
            if v == 0 {
                break;
            }
            let index = (v & MASK) >> if i == 12 { 60 } else { 59 };
            out.push(CHARMAP[index as usize] as char);
            v <<= 5;
        }
        f.write_str(out.trim_end_matches('.'))
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({self})")
    }
}

impl Serialize for Name {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Name {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

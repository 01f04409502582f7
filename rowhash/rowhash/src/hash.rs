//! Hash functions applied to raw concatenated values.

use std::{fmt, str::FromStr};

use md5::{Digest, Md5};

/// Selectable hash function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashFunction {
    /// MD5 over the UTF-8 bytes, rendered as 32 lowercase hex characters.
    #[default]
    Md5,
    /// The raw string itself, unchanged.
    Raw,
}

impl HashFunction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Raw => "raw",
        }
    }

    pub fn digest(&self, raw: &str) -> String {
        match self {
            Self::Md5 => hex::encode(Md5::digest(raw.as_bytes())),
            Self::Raw => raw.to_string(),
        }
    }
}

impl FromStr for HashFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md5" => Ok(Self::Md5),
            "raw" => Ok(Self::Raw),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for HashFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hash `raw` with `function`.
pub fn digest(raw: &str, function: HashFunction) -> String {
    function.digest(raw)
}

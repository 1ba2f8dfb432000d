//! Core type definitions for Minter

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::WalletError;

/// Externally-owned or contract account (`0x` + 40 hex chars)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(pub String);

impl Address {
    pub fn new(addr: impl Into<String>) -> Self {
        Self(addr.into())
    }

    /// Parse and validate a hex address. Case is preserved.
    pub fn parse(addr: &str) -> Result<Self, WalletError> {
        let addr = addr.trim();
        let body = addr
            .strip_prefix("0x")
            .or_else(|| addr.strip_prefix("0X"))
            .ok_or_else(|| WalletError::InvalidAddress {
                address: addr.to_string(),
            })?;

        if body.len() != 40 || !body.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(WalletError::InvalidAddress {
                address: addr.to_string(),
            });
        }

        Ok(Self(addr.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Shortened form for display: first 6 and last 4 characters.
    pub fn display_address(&self) -> String {
        shorten(&self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `abcdef...wxyz` style shortening. Strings of 10 chars or fewer are returned unchanged.
pub fn shorten(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 10 {
        return s.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Transaction hash (32 bytes, `0x`-prefixed hex)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(pub String);

impl TxHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check for the `0x` + 64 hex chars shape
    pub fn is_well_formed(&self) -> bool {
        self.0
            .strip_prefix("0x")
            .is_some_and(|h| h.len() == 64 && h.chars().all(|c| c.is_ascii_hexdigit()))
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Network type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Mainnet,
    Sepolia,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Sepolia => "sepolia",
        }
    }

    pub fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => 1,
            Self::Sepolia => 11_155_111,
        }
    }

    /// Default block-explorer transaction URL template
    pub fn explorer_tx_template(&self) -> &'static str {
        match self {
            Self::Mainnet => "https://etherscan.io/tx/{hash}",
            Self::Sepolia => "https://sepolia.etherscan.io/tx/{hash}",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mainnet" => Ok(Self::Mainnet),
            "sepolia" => Ok(Self::Sepolia),
            other => Err(format!("unknown network '{}'", other)),
        }
    }
}

/// Block height
pub type BlockHeight = u64;

/// Wei amount (1 ether = 10^18 wei)
pub type Wei = u128;

/// Constants
pub mod constants {
    use super::Wei;

    /// 1 ether in wei
    pub const WEI_PER_ETHER: Wei = 1_000_000_000_000_000_000;
}

/// Format a wei amount as decimal ether, trimming trailing zeros.
pub fn format_ether(wei: Wei) -> String {
    let whole = wei / constants::WEI_PER_ETHER;
    let frac = wei % constants::WEI_PER_ETHER;
    if frac == 0 {
        return whole.to_string();
    }
    let frac = format!("{:018}", frac);
    format!("{}.{}", whole, frac.trim_end_matches('0'))
}

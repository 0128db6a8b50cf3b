//! c32check encoding of Stacks addresses.
//!
//! A Stacks address is the letter `S`, one c32 character for the address version, and the
//! c32 encoding of `hash160 || checksum`, where the checksum is the first four bytes of
//! `sha256(sha256(version || hash160))`.

use sha2::{Digest, Sha256};
use std::{fmt, str::FromStr};

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Mainnet single-signature address version (`SP`).
pub const MAINNET_SINGLESIG: u8 = 22;
/// Mainnet multi-signature address version (`SM`).
pub const MAINNET_MULTISIG: u8 = 20;
/// Testnet single-signature address version (`ST`).
pub const TESTNET_SINGLESIG: u8 = 26;
/// Testnet multi-signature address version (`SN`).
pub const TESTNET_MULTISIG: u8 = 21;

/// Errors produced while decoding c32 strings and Stacks addresses.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum C32Error {
    /// A character outside the c32 alphabet.
    #[error("invalid c32 character {0:?}")]
    InvalidCharacter(char),
    /// Fewer bytes than the checksum needs.
    #[error("c32check payload is too short")]
    TooShort,
    /// The checksum does not match the payload.
    #[error("c32check checksum mismatch")]
    BadChecksum,
    /// The address lacks the `S` prefix.
    #[error("address must start with 'S'")]
    MissingPrefix,
    /// The payload is not a hash160.
    #[error("address payload must be 20 bytes, got {0}")]
    InvalidLength(usize),
    /// Not a Stacks address version.
    #[error("unknown address version {0}")]
    UnknownVersion(u8),
}

fn c32_digit(c: char) -> Result<u8, C32Error> {
    let normalized = match c.to_ascii_uppercase() {
        'O' => '0',
        'I' | 'L' => '1',
        other => other,
    };
    C32_ALPHABET
        .iter()
        .position(|&b| b as char == normalized)
        .map(|pos| pos as u8)
        .ok_or(C32Error::InvalidCharacter(c))
}

/// Encodes bytes as a c32 string.
///
/// Leading zero bytes are preserved as leading `0` characters.
pub fn encode(input: &[u8]) -> String {
    let mut out = Vec::with_capacity(input.len() * 8 / 5 + 1);
    let mut carry: u16 = 0;
    let mut carry_bits: u32 = 0;

    for &byte in input.iter().rev() {
        carry |= u16::from(byte) << carry_bits;
        carry_bits += 8;
        while carry_bits >= 5 {
            out.push(C32_ALPHABET[(carry & 0x1f) as usize]);
            carry >>= 5;
            carry_bits -= 5;
        }
    }
    if carry_bits > 0 {
        out.push(C32_ALPHABET[(carry & 0x1f) as usize]);
    }

    // strip the zero digits produced by the bit packing, then restore the ones that stand for
    // leading zero bytes of the input
    while out.last() == Some(&C32_ALPHABET[0]) {
        out.pop();
    }
    out.extend(input.iter().take_while(|&&b| b == 0).map(|_| C32_ALPHABET[0]));

    out.iter().rev().map(|&b| b as char).collect()
}

/// Decodes a c32 string into bytes.
pub fn decode(input: &str) -> Result<Vec<u8>, C32Error> {
    let digits = input.chars().map(c32_digit).collect::<Result<Vec<_>, _>>()?;

    let mut out = Vec::with_capacity(digits.len() * 5 / 8 + 1);
    let mut carry: u16 = 0;
    let mut carry_bits: u32 = 0;
    for &digit in digits.iter().rev() {
        carry |= u16::from(digit) << carry_bits;
        carry_bits += 5;
        if carry_bits >= 8 {
            out.push((carry & 0xff) as u8);
            carry >>= 8;
            carry_bits -= 8;
        }
    }
    if carry_bits > 0 && carry > 0 {
        out.push(carry as u8);
    }

    while out.last() == Some(&0) {
        out.pop();
    }
    out.extend(digits.iter().take_while(|&&d| d == 0).map(|_| 0u8));

    out.reverse();
    Ok(out)
}

fn checksum(version: u8, payload: &[u8]) -> [u8; 4] {
    let mut hasher = Sha256::new();
    hasher.update([version]);
    hasher.update(payload);
    let first = hasher.finalize();
    let second = Sha256::digest(first);
    [second[0], second[1], second[2], second[3]]
}

/// Encodes `payload` with the given version using c32check.
pub fn check_encode(version: u8, payload: &[u8]) -> String {
    let mut data = payload.to_vec();
    data.extend_from_slice(&checksum(version, payload));
    let mut out = String::with_capacity(data.len() * 2);
    out.push(C32_ALPHABET[(version & 0x1f) as usize] as char);
    out.push_str(&encode(&data));
    out
}

/// Decodes a c32check string into its version and payload, verifying the checksum.
pub fn check_decode(input: &str) -> Result<(u8, Vec<u8>), C32Error> {
    let mut chars = input.chars();
    let version = chars.next().ok_or(C32Error::TooShort).and_then(c32_digit)?;
    let mut data = decode(chars.as_str())?;
    if data.len() < 4 {
        return Err(C32Error::TooShort);
    }
    let expected = data.split_off(data.len() - 4);
    if checksum(version, &data)[..] != expected[..] {
        return Err(C32Error::BadChecksum);
    }
    Ok((version, data))
}

/// A standard Stacks principal: an address version and a 20 byte public key hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StandardPrincipal {
    /// The address version byte.
    pub version: u8,
    /// The hash160 of the public key (or multisig redeem script).
    pub hash160: [u8; 20],
}

impl StandardPrincipal {
    /// Creates a new principal, rejecting versions that are not Stacks address versions.
    pub fn new(version: u8, hash160: [u8; 20]) -> Result<Self, C32Error> {
        match version {
            MAINNET_SINGLESIG | MAINNET_MULTISIG | TESTNET_SINGLESIG | TESTNET_MULTISIG => {
                Ok(Self { version, hash160 })
            }
            other => Err(C32Error::UnknownVersion(other)),
        }
    }

    /// Returns `true` if this is a mainnet address.
    pub fn is_mainnet(&self) -> bool {
        matches!(self.version, MAINNET_SINGLESIG | MAINNET_MULTISIG)
    }
}

impl FromStr for StandardPrincipal {
    type Err = C32Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s.strip_prefix('S').ok_or(C32Error::MissingPrefix)?;
        let (version, payload) = check_decode(rest)?;
        let hash160: [u8; 20] =
            payload.as_slice().try_into().map_err(|_| C32Error::InvalidLength(payload.len()))?;
        Self::new(version, hash160)
    }
}

impl fmt::Display for StandardPrincipal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", check_encode(self.version, &self.hash160))
    }
}

impl serde::Serialize for StandardPrincipal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for StandardPrincipal {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

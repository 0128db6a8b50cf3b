//! Consensus serialization of Clarity values.
//!
//! Both the node's read-only endpoint and the wallet's contract-call API exchange function
//! arguments and results as hex encoded, consensus-serialized Clarity values.

use crate::{
    c32::{C32Error, StandardPrincipal},
    contract::{ContractId, ContractIdError},
};
use std::{collections::BTreeMap, fmt};

const TYPE_INT: u8 = 0x00;
const TYPE_UINT: u8 = 0x01;
const TYPE_BUFFER: u8 = 0x02;
const TYPE_TRUE: u8 = 0x03;
const TYPE_FALSE: u8 = 0x04;
const TYPE_PRINCIPAL: u8 = 0x05;
const TYPE_CONTRACT_PRINCIPAL: u8 = 0x06;
const TYPE_OK: u8 = 0x07;
const TYPE_ERR: u8 = 0x08;
const TYPE_NONE: u8 = 0x09;
const TYPE_SOME: u8 = 0x0a;
const TYPE_LIST: u8 = 0x0b;
const TYPE_TUPLE: u8 = 0x0c;
const TYPE_STRING_ASCII: u8 = 0x0d;
const TYPE_STRING_UTF8: u8 = 0x0e;

/// Maximum nesting depth accepted while decoding.
pub const MAX_DEPTH: usize = 32;

/// Errors produced while decoding Clarity values or parsing Clarity arguments.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ClarityError {
    /// The input is not valid hex.
    #[error("invalid hex: {0}")]
    Hex(String),
    /// The input ended inside a value.
    #[error("unexpected end of input")]
    Truncated,
    /// An unknown type prefix.
    #[error("unknown type prefix {0:#04x}")]
    UnknownType(u8),
    /// Bytes left over after the value.
    #[error("{0} trailing bytes after value")]
    TrailingBytes(usize),
    /// The value nests deeper than [`MAX_DEPTH`].
    #[error("value nesting exceeds {MAX_DEPTH} levels")]
    TooDeep,
    /// A `string-utf8` that is not UTF-8.
    #[error("invalid utf-8 in string value")]
    InvalidUtf8,
    /// A malformed standard principal.
    #[error("invalid principal: {0}")]
    Principal(#[from] C32Error),
    /// A malformed contract principal.
    #[error(transparent)]
    ContractId(#[from] ContractIdError),
    /// Not a decimal `uint`.
    #[error("invalid uint `{0}`")]
    InvalidUint(String),
}

/// A Clarity value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClarityValue {
    /// `int`
    Int(i128),
    /// `uint`
    UInt(u128),
    /// `bool`
    Bool(bool),
    /// `(buff n)`
    Buffer(Vec<u8>),
    /// A standard principal.
    Principal(StandardPrincipal),
    /// A contract principal.
    ContractPrincipal(ContractId),
    /// `(ok value)`
    ResponseOk(Box<Self>),
    /// `(err value)`
    ResponseErr(Box<Self>),
    /// `none`
    OptionalNone,
    /// `(some value)`
    OptionalSome(Box<Self>),
    /// `(list ...)`
    List(Vec<Self>),
    /// `(tuple ...)`, keyed by field name.
    Tuple(BTreeMap<String, Self>),
    /// `(string-ascii n)`
    StringAscii(String),
    /// `(string-utf8 n)`
    StringUtf8(String),
}

impl ClarityValue {
    /// Parses a decimal string into a `uint` value.
    pub fn parse_uint(s: &str) -> Result<Self, ClarityError> {
        s.trim()
            .parse::<u128>()
            .map(Self::UInt)
            .map_err(|_| ClarityError::InvalidUint(s.to_string()))
    }

    /// Parses a principal argument, either `SP...` or `SP....contract-name`.
    pub fn parse_principal(s: &str) -> Result<Self, ClarityError> {
        let s = s.trim();
        if s.contains('.') {
            Ok(Self::ContractPrincipal(s.parse()?))
        } else {
            Ok(Self::Principal(s.parse()?))
        }
    }

    /// Serializes the value into its consensus encoding.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        self.serialize_into(&mut out);
        out
    }

    fn serialize_into(&self, out: &mut Vec<u8>) {
        match self {
            Self::Int(v) => {
                out.push(TYPE_INT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Self::UInt(v) => {
                out.push(TYPE_UINT);
                out.extend_from_slice(&v.to_be_bytes());
            }
            Self::Bool(true) => out.push(TYPE_TRUE),
            Self::Bool(false) => out.push(TYPE_FALSE),
            Self::Buffer(bytes) => {
                out.push(TYPE_BUFFER);
                write_len_prefixed(out, bytes);
            }
            Self::Principal(p) => {
                out.push(TYPE_PRINCIPAL);
                write_standard_principal(out, p);
            }
            Self::ContractPrincipal(id) => {
                out.push(TYPE_CONTRACT_PRINCIPAL);
                write_standard_principal(out, &id.address);
                out.push(id.name.len() as u8);
                out.extend_from_slice(id.name.as_bytes());
            }
            Self::ResponseOk(inner) => {
                out.push(TYPE_OK);
                inner.serialize_into(out);
            }
            Self::ResponseErr(inner) => {
                out.push(TYPE_ERR);
                inner.serialize_into(out);
            }
            Self::OptionalNone => out.push(TYPE_NONE),
            Self::OptionalSome(inner) => {
                out.push(TYPE_SOME);
                inner.serialize_into(out);
            }
            Self::List(items) => {
                out.push(TYPE_LIST);
                out.extend_from_slice(&(items.len() as u32).to_be_bytes());
                for item in items {
                    item.serialize_into(out);
                }
            }
            Self::Tuple(fields) => {
                out.push(TYPE_TUPLE);
                out.extend_from_slice(&(fields.len() as u32).to_be_bytes());
                // `BTreeMap` iterates in lexicographic key order, which is the canonical order
                for (name, value) in fields {
                    out.push(name.len() as u8);
                    out.extend_from_slice(name.as_bytes());
                    value.serialize_into(out);
                }
            }
            Self::StringAscii(s) => {
                out.push(TYPE_STRING_ASCII);
                write_len_prefixed(out, s.as_bytes());
            }
            Self::StringUtf8(s) => {
                out.push(TYPE_STRING_UTF8);
                write_len_prefixed(out, s.as_bytes());
            }
        }
    }

    /// Returns the `0x` prefixed hex encoding of the serialized value.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.serialize()))
    }

    /// Decodes a value from its consensus encoding, rejecting trailing bytes.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, ClarityError> {
        let mut reader = Reader { bytes, pos: 0 };
        let value = reader.value(0)?;
        let rest = bytes.len() - reader.pos;
        if rest != 0 {
            return Err(ClarityError::TrailingBytes(rest));
        }
        Ok(value)
    }

    /// Decodes a value from a hex string, with or without the `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, ClarityError> {
        let s = s.trim();
        let s = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(s).map_err(|e| ClarityError::Hex(e.to_string()))?;
        Self::deserialize(&bytes)
    }

    /// Unwraps responses and optionals down to the value a caller displays.
    ///
    /// `(ok v)`, `(err v)` and `(some v)` become `v`, recursively.
    pub fn into_plain(self) -> Self {
        match self {
            Self::ResponseOk(inner) | Self::ResponseErr(inner) | Self::OptionalSome(inner) => {
                inner.into_plain()
            }
            other => other,
        }
    }

    /// Returns the boolean, if this is a `bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the unsigned integer, if this is a `uint`.
    pub fn as_uint(&self) -> Option<u128> {
        match self {
            Self::UInt(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns `true` if this is an `(err ..)` response.
    pub fn is_err_response(&self) -> bool {
        matches!(self, Self::ResponseErr(_))
    }
}

impl From<StandardPrincipal> for ClarityValue {
    fn from(p: StandardPrincipal) -> Self {
        Self::Principal(p)
    }
}

impl From<u128> for ClarityValue {
    fn from(v: u128) -> Self {
        Self::UInt(v)
    }
}

impl From<bool> for ClarityValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl fmt::Display for ClarityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "u{v}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Buffer(bytes) => write!(f, "0x{}", hex::encode(bytes)),
            Self::Principal(p) => write!(f, "'{p}"),
            Self::ContractPrincipal(id) => write!(f, "'{id}"),
            Self::ResponseOk(inner) => write!(f, "(ok {inner})"),
            Self::ResponseErr(inner) => write!(f, "(err {inner})"),
            Self::OptionalNone => f.write_str("none"),
            Self::OptionalSome(inner) => write!(f, "(some {inner})"),
            Self::List(items) => {
                f.write_str("(list")?;
                for item in items {
                    write!(f, " {item}")?;
                }
                f.write_str(")")
            }
            Self::Tuple(fields) => {
                f.write_str("(tuple")?;
                for (name, value) in fields {
                    write!(f, " ({name} {value})")?;
                }
                f.write_str(")")
            }
            Self::StringAscii(s) => write!(f, "{s:?}"),
            Self::StringUtf8(s) => write!(f, "u{s:?}"),
        }
    }
}

fn write_len_prefixed(out: &mut Vec<u8>, bytes: &[u8]) {
    out.extend_from_slice(&(bytes.len() as u32).to_be_bytes());
    out.extend_from_slice(bytes);
}

fn write_standard_principal(out: &mut Vec<u8>, p: &StandardPrincipal) {
    out.push(p.version);
    out.extend_from_slice(&p.hash160);
}

struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize) -> Result<&'a [u8], ClarityError> {
        let end = self.pos.checked_add(n).ok_or(ClarityError::Truncated)?;
        let slice = self.bytes.get(self.pos..end).ok_or(ClarityError::Truncated)?;
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8, ClarityError> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32, ClarityError> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    fn u128_bytes(&mut self) -> Result<[u8; 16], ClarityError> {
        let mut buf = [0u8; 16];
        buf.copy_from_slice(self.take(16)?);
        Ok(buf)
    }

    fn standard_principal(&mut self) -> Result<StandardPrincipal, ClarityError> {
        let version = self.u8()?;
        let mut hash160 = [0u8; 20];
        hash160.copy_from_slice(self.take(20)?);
        Ok(StandardPrincipal::new(version, hash160)?)
    }

    fn string(&mut self) -> Result<String, ClarityError> {
        let len = self.u32()? as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| ClarityError::InvalidUtf8)
    }

    fn value(&mut self, depth: usize) -> Result<ClarityValue, ClarityError> {
        if depth > MAX_DEPTH {
            return Err(ClarityError::TooDeep);
        }
        let value = match self.u8()? {
            TYPE_INT => ClarityValue::Int(i128::from_be_bytes(self.u128_bytes()?)),
            TYPE_UINT => ClarityValue::UInt(u128::from_be_bytes(self.u128_bytes()?)),
            TYPE_BUFFER => {
                let len = self.u32()? as usize;
                ClarityValue::Buffer(self.take(len)?.to_vec())
            }
            TYPE_TRUE => ClarityValue::Bool(true),
            TYPE_FALSE => ClarityValue::Bool(false),
            TYPE_PRINCIPAL => ClarityValue::Principal(self.standard_principal()?),
            TYPE_CONTRACT_PRINCIPAL => {
                let address = self.standard_principal()?;
                let len = self.u8()? as usize;
                let name = String::from_utf8(self.take(len)?.to_vec())
                    .map_err(|_| ClarityError::InvalidUtf8)?;
                ClarityValue::ContractPrincipal(ContractId::new(address, name)?)
            }
            TYPE_OK => ClarityValue::ResponseOk(Box::new(self.value(depth + 1)?)),
            TYPE_ERR => ClarityValue::ResponseErr(Box::new(self.value(depth + 1)?)),
            TYPE_NONE => ClarityValue::OptionalNone,
            TYPE_SOME => ClarityValue::OptionalSome(Box::new(self.value(depth + 1)?)),
            TYPE_LIST => {
                let len = self.u32()?;
                // the length is untrusted, so the vector grows as items actually decode
                let mut items = Vec::new();
                for _ in 0..len {
                    items.push(self.value(depth + 1)?);
                }
                ClarityValue::List(items)
            }
            TYPE_TUPLE => {
                let len = self.u32()?;
                let mut fields = BTreeMap::new();
                for _ in 0..len {
                    let name_len = self.u8()? as usize;
                    let name = String::from_utf8(self.take(name_len)?.to_vec())
                        .map_err(|_| ClarityError::InvalidUtf8)?;
                    let value = self.value(depth + 1)?;
                    fields.insert(name, value);
                }
                ClarityValue::Tuple(fields)
            }
            TYPE_STRING_ASCII => ClarityValue::StringAscii(self.string()?),
            TYPE_STRING_UTF8 => ClarityValue::StringUtf8(self.string()?),
            other => return Err(ClarityError::UnknownType(other)),
        };
        Ok(value)
    }
}

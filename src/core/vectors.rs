// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Test vectors for subtract-with-borrow.
//!
//! The built-in table covers the 16-bit operation. Additional vectors can be
//! loaded from a JSON file of the form:
//!
//! ```json
//! { "width": 16, "vectors": [
//!     { "a": "0x8FFF", "b": "0x0FFF", "borrow_in": 0,
//!       "difference": "0x8000", "borrow_out": 0 } ] }
//! ```

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};

use crate::core::borrow::BorrowingSub;
use crate::core::error::{CheckError, CheckErrorKind};
use crate::core::report::hex_word;

/// Word width of a vector set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    W8,
    W16,
    W32,
    W64,
}

impl Width {
    pub fn from_bits(bits: u64) -> Option<Self> {
        match bits {
            8 => Some(Self::W8),
            16 => Some(Self::W16),
            32 => Some(Self::W32),
            64 => Some(Self::W64),
            _ => None,
        }
    }

    pub fn bits(&self) -> u32 {
        match self {
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W32 => 32,
            Self::W64 => 64,
        }
    }
}

/// One input/expected-output tuple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestVector<T> {
    pub minuend: T,
    pub subtrahend: T,
    pub borrow_in: bool,
    pub difference: T,
    pub borrow_out: bool,
}

impl<T: BorrowingSub> TestVector<T> {
    pub const fn new(
        minuend: T,
        subtrahend: T,
        borrow_in: bool,
        difference: T,
        borrow_out: bool,
    ) -> Self {
        Self {
            minuend,
            subtrahend,
            borrow_in,
            difference,
            borrow_out,
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{} - {} - {} -> ({}, {})",
            hex_word(self.minuend.to_u64(), T::BITS),
            hex_word(self.subtrahend.to_u64(), T::BITS),
            self.borrow_in as u8,
            hex_word(self.difference.to_u64(), T::BITS),
            self.borrow_out as u8
        )
    }

    pub fn to_json(&self) -> Value {
        json!({
            "a": hex_word(self.minuend.to_u64(), T::BITS),
            "b": hex_word(self.subtrahend.to_u64(), T::BITS),
            "borrow_in": self.borrow_in as u8,
            "difference": hex_word(self.difference.to_u64(), T::BITS),
            "borrow_out": self.borrow_out as u8,
        })
    }
}

const fn v16(a: u16, b: u16, bin: u8, diff: u16, bout: u8) -> TestVector<u16> {
    TestVector {
        minuend: a,
        subtrahend: b,
        borrow_in: bin != 0,
        difference: diff,
        borrow_out: bout != 0,
    }
}

/// Built-in 16-bit table, checked in order.
pub static USUB_I16_VECTORS: &[TestVector<u16>] = &[
    v16(0x0000, 0x0000, 0, 0x0000, 0),
    v16(0xFFFF, 0x0000, 0, 0xFFFF, 0),
    v16(0x0000, 0xFFFF, 0, 0x0001, 1),
    v16(0xFFFF, 0x0001, 0, 0xFFFE, 0),
    v16(0x0001, 0xFFFF, 0, 0x0002, 1),
    v16(0xFFFF, 0xFFFF, 0, 0x0000, 0),
    v16(0x8FFF, 0x0FFF, 0, 0x8000, 0),
    v16(0x0000, 0xFFFE, 1, 0x0001, 1),
    v16(0x0000, 0xFFFF, 1, 0x0000, 1),
    v16(0xFFFE, 0x0000, 1, 0xFFFD, 0),
    v16(0xFFFE, 0xFFFE, 1, 0xFFFF, 1),
    v16(0xFFFE, 0xFFFF, 0, 0xFFFF, 1),
    v16(0xFFFE, 0xFFFF, 1, 0xFFFE, 1),
    v16(0xFFFF, 0x0000, 1, 0xFFFE, 0),
    v16(0xFFFF, 0xFFFF, 1, 0xFFFF, 1),
    v16(0x000F, 0x0001, 0, 0x000E, 0),
    v16(0x000F, 0x0001, 1, 0x000D, 0),
];

/// Vectors loaded from a file, tagged with their width.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VectorSet {
    W8(Vec<TestVector<u8>>),
    W16(Vec<TestVector<u16>>),
    W32(Vec<TestVector<u32>>),
    W64(Vec<TestVector<u64>>),
}

impl VectorSet {
    pub fn width(&self) -> Width {
        match self {
            Self::W8(_) => Width::W8,
            Self::W16(_) => Width::W16,
            Self::W32(_) => Width::W32,
            Self::W64(_) => Width::W64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::W8(v) => v.len(),
            Self::W16(v) => v.len(),
            Self::W32(v) => v.len(),
            Self::W64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn vectors_error(message: impl Into<String>) -> CheckError {
    CheckError::new(CheckErrorKind::Vectors, message)
}

/// Read and parse a vector file.
pub fn load_vector_file(path: &Path) -> Result<VectorSet, CheckError> {
    let text = fs::read_to_string(path).map_err(|err| {
        CheckError::new(
            CheckErrorKind::Io,
            format!("failed to read {}: {err}", path.display()),
        )
    })?;
    parse_vector_set(&text).map_err(|err| err.with_context(&path.display().to_string()))
}

/// Parse a vector set from JSON text.
pub fn parse_vector_set(text: &str) -> Result<VectorSet, CheckError> {
    let root: Value = serde_json::from_str(text)
        .map_err(|err| vectors_error(format!("invalid JSON: {err}")))?;
    let root = root
        .as_object()
        .ok_or_else(|| vectors_error("top level must be an object"))?;
    let bits = root
        .get("width")
        .and_then(Value::as_u64)
        .ok_or_else(|| vectors_error("missing or non-integer `width`"))?;
    let width =
        Width::from_bits(bits).ok_or_else(|| vectors_error(format!("unsupported width {bits}")))?;
    let entries = root
        .get("vectors")
        .and_then(Value::as_array)
        .ok_or_else(|| vectors_error("missing `vectors` array"))?;

    Ok(match width {
        Width::W8 => VectorSet::W8(parse_entries(entries)?),
        Width::W16 => VectorSet::W16(parse_entries(entries)?),
        Width::W32 => VectorSet::W32(parse_entries(entries)?),
        Width::W64 => VectorSet::W64(parse_entries(entries)?),
    })
}

fn parse_entries<T: BorrowingSub>(entries: &[Value]) -> Result<Vec<TestVector<T>>, CheckError> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            parse_entry(entry).map_err(|err| err.with_vector_index(index))
        })
        .collect()
}

fn parse_entry<T: BorrowingSub>(entry: &Value) -> Result<TestVector<T>, CheckError> {
    let obj = entry
        .as_object()
        .ok_or_else(|| vectors_error("vector must be an object"))?;
    Ok(TestVector::new(
        word_field(obj, "a")?,
        word_field(obj, "b")?,
        bit_field(obj, "borrow_in")?,
        word_field(obj, "difference")?,
        bit_field(obj, "borrow_out")?,
    ))
}

fn word_field<T: BorrowingSub>(obj: &Map<String, Value>, key: &str) -> Result<T, CheckError> {
    let value = obj
        .get(key)
        .ok_or_else(|| vectors_error(format!("missing field `{key}`")))?;
    let raw = match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| vectors_error(format!("`{key}` must be a non-negative integer")))?,
        Value::String(s) => parse_word(s)
            .ok_or_else(|| vectors_error(format!("`{key}` is not a number: {s:?}")))?,
        _ => return Err(vectors_error(format!("`{key}` must be a number or string"))),
    };
    T::from_u64(raw)
        .ok_or_else(|| vectors_error(format!("`{key}` = {raw:#X} exceeds {} bits", T::BITS)))
}

fn bit_field(obj: &Map<String, Value>, key: &str) -> Result<bool, CheckError> {
    match obj.get(key) {
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Number(n)) => match n.as_u64() {
            Some(0) => Ok(false),
            Some(1) => Ok(true),
            _ => Err(vectors_error(format!("`{key}` must be 0 or 1"))),
        },
        Some(_) => Err(vectors_error(format!("`{key}` must be 0, 1, true or false"))),
        None => Err(vectors_error(format!("missing field `{key}`"))),
    }
}

/// Parse a decimal or `0x`-prefixed hex word, allowing `_` separators.
pub fn parse_word(text: &str) -> Option<u64> {
    let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
    if cleaned.is_empty() {
        return None;
    }
    if let Some(hex) = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
    {
        u64::from_str_radix(hex, 16).ok()
    } else {
        cleaned.parse::<u64>().ok()
    }
}

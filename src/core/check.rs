// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Fail-fast vector checking.

use std::fmt;

use serde_json::{json, Value};

use crate::core::borrow::{BorrowingSub, SubProvider};
use crate::core::error::{CheckError, CheckErrorKind};
use crate::core::report::hex_word;
use crate::core::vectors::{TestVector, VectorSet};

/// Result of a passing run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheckReport {
    pub checked: usize,
}

/// First vector whose computed result differs from the expected one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    pub bits: u32,
    pub vector: String,
    pub actual_difference: u64,
    pub actual_borrow: bool,
    pub expected_difference: u64,
    pub expected_borrow: bool,
}

impl Mismatch {
    fn new<T: BorrowingSub>(index: usize, vector: &TestVector<T>, actual: (T, bool)) -> Self {
        Self {
            index,
            bits: T::BITS,
            vector: vector.describe(),
            actual_difference: actual.0.to_u64(),
            actual_borrow: actual.1,
            expected_difference: vector.difference.to_u64(),
            expected_borrow: vector.borrow_out,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "index": self.index,
            "width": self.bits,
            "vector": self.vector,
            "expected": {
                "difference": hex_word(self.expected_difference, self.bits),
                "borrow_out": self.expected_borrow as u8,
            },
            "actual": {
                "difference": hex_word(self.actual_difference, self.bits),
                "borrow_out": self.actual_borrow as u8,
            },
        })
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "expected {}, got ({}, {})",
            self.vector,
            hex_word(self.actual_difference, self.bits),
            self.actual_borrow as u8
        )
    }
}

impl std::error::Error for Mismatch {}

impl From<Mismatch> for CheckError {
    fn from(mismatch: Mismatch) -> Self {
        CheckError::new(CheckErrorKind::Mismatch, mismatch.to_string())
            .with_vector_index(mismatch.index)
    }
}

/// Run `vectors` in order against `provider`, stopping at the first
/// mismatch. `offset` is added to reported indices so that tables run
/// back to back share one index space.
pub fn check_vectors<T: BorrowingSub>(
    provider: SubProvider,
    vectors: &[TestVector<T>],
    offset: usize,
    mut on_pass: impl FnMut(usize, &TestVector<T>),
) -> Result<CheckReport, Mismatch> {
    for (i, vector) in vectors.iter().enumerate() {
        let actual = provider.sub(vector.minuend, vector.subtrahend, vector.borrow_in);
        if actual != (vector.difference, vector.borrow_out) {
            return Err(Mismatch::new(offset + i, vector, actual));
        }
        on_pass(offset + i, vector);
    }
    Ok(CheckReport {
        checked: vectors.len(),
    })
}

/// Pass callback for [`check_vector_set`], with the vector pre-rendered.
pub type PassFn<'a> = dyn FnMut(usize, String) + 'a;

/// Check a loaded vector set of any width.
pub fn check_vector_set(
    provider: SubProvider,
    set: &VectorSet,
    offset: usize,
    on_pass: &mut PassFn<'_>,
) -> Result<CheckReport, Mismatch> {
    match set {
        VectorSet::W8(v) => check_vectors(provider, v, offset, |i, t| on_pass(i, t.describe())),
        VectorSet::W16(v) => check_vectors(provider, v, offset, |i, t| on_pass(i, t.describe())),
        VectorSet::W32(v) => check_vectors(provider, v, offset, |i, t| on_pass(i, t.describe())),
        VectorSet::W64(v) => check_vectors(provider, v, offset, |i, t| on_pass(i, t.describe())),
    }
}

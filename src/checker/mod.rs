// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Check planning and execution for the `subcs` binary.

pub mod cli;

use std::fmt;

use serde_json::{json, Value};

use crate::checker::cli::CliConfig;
use crate::core::borrow::{BorrowingSub, SubProvider};
use crate::core::check::{check_vector_set, check_vectors, CheckReport, Mismatch, PassFn};
use crate::core::error::CheckError;
use crate::core::vectors::{load_vector_file, TestVector, VectorSet, Width, USUB_I16_VECTORS};

/// Ordered vector tables for one run.
#[derive(Clone, Debug)]
pub struct CheckPlan {
    builtin: bool,
    file: Option<VectorSet>,
}

/// One row of `--list` output.
#[derive(Clone, Debug, PartialEq)]
pub struct ListedVector {
    pub index: usize,
    pub bits: u32,
    pub text: String,
    pub json: Value,
}

impl CheckPlan {
    pub fn new(builtin: bool, file: Option<VectorSet>) -> Self {
        // Built-in vectors are 16-bit; they only share a run with 16-bit files.
        let builtin = builtin
            && file
                .as_ref()
                .is_none_or(|set| set.width() == Width::W16);
        Self { builtin, file }
    }

    pub fn from_config(config: &CliConfig) -> Result<Self, CheckError> {
        let file = match &config.vectors_file {
            Some(path) => Some(load_vector_file(path)?),
            None => None,
        };
        Ok(Self::new(config.run_builtin, file))
    }

    pub fn runs_builtin(&self) -> bool {
        self.builtin
    }

    pub fn len(&self) -> usize {
        let builtin = if self.builtin {
            USUB_I16_VECTORS.len()
        } else {
            0
        };
        builtin + self.file.as_ref().map_or(0, VectorSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Run every table in order, stopping at the first mismatch.
    pub fn run(
        &self,
        provider: SubProvider,
        on_pass: &mut PassFn<'_>,
    ) -> Result<CheckReport, Mismatch> {
        let mut checked = 0;
        if self.builtin {
            let report = check_vectors(provider, USUB_I16_VECTORS, 0, |i, v| {
                on_pass(i, v.describe())
            })?;
            checked += report.checked;
        }
        if let Some(set) = &self.file {
            checked += check_vector_set(provider, set, checked, on_pass)?.checked;
        }
        Ok(CheckReport { checked })
    }

    pub fn listing(&self) -> Vec<ListedVector> {
        let mut rows = Vec::with_capacity(self.len());
        if self.builtin {
            push_rows(&mut rows, USUB_I16_VECTORS);
        }
        match &self.file {
            Some(VectorSet::W8(v)) => push_rows(&mut rows, v),
            Some(VectorSet::W16(v)) => push_rows(&mut rows, v),
            Some(VectorSet::W32(v)) => push_rows(&mut rows, v),
            Some(VectorSet::W64(v)) => push_rows(&mut rows, v),
            None => {}
        }
        rows
    }
}

fn push_rows<T: BorrowingSub>(rows: &mut Vec<ListedVector>, vectors: &[TestVector<T>]) {
    for vector in vectors {
        rows.push(ListedVector {
            index: rows.len(),
            bits: T::BITS,
            text: vector.describe(),
            json: vector.to_json(),
        });
    }
}

/// Why a run did not pass.
#[derive(Debug, Clone)]
pub enum RunError {
    Mismatch(Mismatch),
    Setup(CheckError),
}

impl RunError {
    pub fn exit_status(&self) -> i32 {
        self.as_check_error().kind().exit_status()
    }

    pub fn as_check_error(&self) -> CheckError {
        match self {
            Self::Mismatch(mismatch) => mismatch.clone().into(),
            Self::Setup(err) => err.clone(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut value = self.as_check_error().to_json();
        if let Self::Mismatch(mismatch) = self {
            value["detail"] = mismatch.to_json();
        }
        value
    }
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_check_error())
    }
}

impl std::error::Error for RunError {}

impl From<CheckError> for RunError {
    fn from(err: CheckError) -> Self {
        Self::Setup(err)
    }
}

impl From<Mismatch> for RunError {
    fn from(mismatch: Mismatch) -> Self {
        Self::Mismatch(mismatch)
    }
}

/// Summary of a passing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub provider: SubProvider,
    pub checked: usize,
}

impl RunSummary {
    pub fn to_text(&self) -> String {
        format!(
            "{} vectors passed ({})",
            self.checked,
            self.provider.as_str()
        )
    }

    pub fn to_json(&self) -> Value {
        json!({
            "status": "pass",
            "provider": self.provider.as_str(),
            "checked": self.checked,
        })
    }
}

/// Load the configured tables and check them.
pub fn run_with_config(
    config: &CliConfig,
    on_pass: &mut PassFn<'_>,
) -> Result<RunSummary, RunError> {
    let plan = CheckPlan::from_config(config)?;
    let report = plan.run(config.provider, on_pass)?;
    Ok(RunSummary {
        provider: config.provider,
        checked: report.checked,
    })
}

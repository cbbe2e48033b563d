// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Error types and diagnostics for the checker.

use std::fmt;

use serde_json::json;

use crate::core::report::severity_prefix;

/// Categories of checker errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckErrorKind {
    Cli,
    Io,
    Mismatch,
    Operand,
    Vectors,
}

impl CheckErrorKind {
    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Cli => "sbc001",
            Self::Io => "sbc002",
            Self::Vectors => "sbc003",
            Self::Operand => "sbc004",
            Self::Mismatch => "sbc100",
        }
    }

    /// Process exit status reported for this kind.
    pub fn exit_status(&self) -> i32 {
        match self {
            Self::Mismatch => 1,
            Self::Cli | Self::Io | Self::Operand | Self::Vectors => 2,
        }
    }
}

/// A checker error with a kind and message.
#[derive(Debug, Clone)]
pub struct CheckError {
    kind: CheckErrorKind,
    message: String,
    vector_index: Option<usize>,
}

impl CheckError {
    pub fn new(kind: CheckErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            vector_index: None,
        }
    }

    pub fn with_vector_index(mut self, index: usize) -> Self {
        self.vector_index = Some(index);
        self
    }

    /// Prefix the message with `context`, keeping kind and index.
    pub fn with_context(mut self, context: &str) -> Self {
        self.message = format!("{context}: {}", self.message);
        self
    }

    pub fn kind(&self) -> CheckErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn vector_index(&self) -> Option<usize> {
        self.vector_index
    }

    /// Render as a single diagnostic line.
    pub fn to_text_line(&self, use_color: bool) -> String {
        format!(
            "{} [{}]: {}",
            severity_prefix(use_color),
            self.kind.code(),
            self
        )
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "code": self.kind.code(),
            "severity": "error",
            "message": self.message,
            "vector": self.vector_index,
        })
    }
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.vector_index {
            Some(index) => write!(f, "vector {index}: {}", self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for CheckError {}

impl From<std::io::Error> for CheckError {
    fn from(err: std::io::Error) -> Self {
        Self::new(CheckErrorKind::Io, err.to_string())
    }
}

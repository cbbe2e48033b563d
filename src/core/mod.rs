// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Borrow-subtract primitives, vectors, and the checker.

pub mod borrow;
pub mod check;
pub mod error;
pub mod report;
pub mod vectors;

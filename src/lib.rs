// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Library entry exposing the borrow-subtract checker modules.
pub mod checker;
pub mod core;

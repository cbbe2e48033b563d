// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

// Shared reporting helpers used by the checker and the CLI.

pub fn severity_prefix(use_color: bool) -> &'static str {
    if use_color {
        "\x1b[31merror\x1b[0m"
    } else {
        "error"
    }
}

pub fn pass_prefix(use_color: bool) -> &'static str {
    if use_color {
        "\x1b[32mok\x1b[0m"
    } else {
        "ok"
    }
}

/// Zero-padded hex for a value of the given bit width.
pub fn hex_word(value: u64, bits: u32) -> String {
    let digits = (bits as usize).div_ceil(4);
    format!("0x{value:0digits$X}")
}

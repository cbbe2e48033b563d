// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Subtract-with-borrow primitives.
//!
//! `BorrowingSub` is the operation under test. The native implementation
//! chains two wrapping subtractions and ORs their borrow flags; the
//! reference implementation computes the true difference in `i128` and
//! derives both outputs from it.

use std::fmt;

use crate::core::error::{CheckError, CheckErrorKind};

/// Unsigned machine word supporting subtract-with-borrow.
pub trait BorrowingSub: Copy + Eq + fmt::Debug {
    /// Width in bits.
    const BITS: u32;

    /// Compute `self - rhs - borrow`, returning the wrapped difference and
    /// the outgoing borrow.
    fn sub_with_borrow(self, rhs: Self, borrow: bool) -> (Self, bool);

    fn to_u64(self) -> u64;

    /// Narrow a `u64` into this width, or `None` when it does not fit.
    fn from_u64(value: u64) -> Option<Self>;
}

macro_rules! impl_borrowing_sub {
    ($($ty:ty),*) => {
        $(
            impl BorrowingSub for $ty {
                const BITS: u32 = <$ty>::BITS;

                fn sub_with_borrow(self, rhs: Self, borrow: bool) -> (Self, bool) {
                    let (diff, b1) = self.overflowing_sub(rhs);
                    let (diff, b2) = diff.overflowing_sub(borrow as $ty);
                    (diff, b1 || b2)
                }

                fn to_u64(self) -> u64 {
                    self as u64
                }

                fn from_u64(value: u64) -> Option<Self> {
                    <$ty>::try_from(value).ok()
                }
            }
        )*
    };
}

impl_borrowing_sub!(u8, u16, u32, u64);

/// Compute subtract-with-borrow in wide signed arithmetic.
pub fn reference_borrowing_sub<T: BorrowingSub>(a: T, b: T, borrow: bool) -> (T, bool) {
    let t = a.to_u64() as i128 - b.to_u64() as i128 - borrow as i128;
    let modulus = 1i128 << T::BITS;
    let wrapped = t.rem_euclid(modulus) as u64;
    // rem_euclid keeps the value below 2^BITS.
    let diff = T::from_u64(wrapped).unwrap_or_else(|| unreachable!("{wrapped:#X} exceeds width"));
    (diff, t < 0)
}

/// Implementation of the primitive selected for checking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubProvider {
    Native,
    Reference,
}

impl SubProvider {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "native" => Some(Self::Native),
            "reference" | "ref" => Some(Self::Reference),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Native => "native",
            Self::Reference => "reference",
        }
    }

    pub fn sub<T: BorrowingSub>(&self, a: T, b: T, borrow: bool) -> (T, bool) {
        match self {
            Self::Native => a.sub_with_borrow(b, borrow),
            Self::Reference => reference_borrowing_sub(a, b, borrow),
        }
    }
}

/// Subtract two little-endian multi-word integers of equal length.
///
/// Returns the difference limbs and the borrow out of the most significant
/// limb.
pub fn sub_words<T: BorrowingSub>(a: &[T], b: &[T]) -> Result<(Vec<T>, bool), CheckError> {
    if a.len() != b.len() {
        return Err(CheckError::new(
            CheckErrorKind::Operand,
            format!(
                "limb count mismatch: minuend has {}, subtrahend has {}",
                a.len(),
                b.len()
            ),
        ));
    }
    let mut borrow = false;
    let mut out = Vec::with_capacity(a.len());
    for (&x, &y) in a.iter().zip(b) {
        let (diff, next) = x.sub_with_borrow(y, borrow);
        out.push(diff);
        borrow = next;
    }
    Ok((out, borrow))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn native_u16_known_results() {
        assert_eq!(0x0000u16.sub_with_borrow(0x0000, false), (0x0000, false));
        assert_eq!(0x0000u16.sub_with_borrow(0xFFFF, false), (0x0001, true));
        assert_eq!(0x8FFFu16.sub_with_borrow(0x0FFF, false), (0x8000, false));
        assert_eq!(0xFFFEu16.sub_with_borrow(0xFFFE, true), (0xFFFF, true));
        assert_eq!(0xFFFFu16.sub_with_borrow(0xFFFF, true), (0xFFFF, true));
        assert_eq!(0x000Fu16.sub_with_borrow(0x0001, true), (0x000D, false));
    }

    #[test]
    fn borrow_in_alone_wraps_zero() {
        assert_eq!(0u8.sub_with_borrow(0, true), (0xFF, true));
        assert_eq!(0u32.sub_with_borrow(0, true), (u32::MAX, true));
        assert_eq!(0u64.sub_with_borrow(0, true), (u64::MAX, true));
    }

    #[test]
    fn reference_handles_full_u64_range() {
        assert_eq!(
            reference_borrowing_sub(0u64, u64::MAX, true),
            (0, true)
        );
        assert_eq!(
            reference_borrowing_sub(u64::MAX, 0u64, true),
            (u64::MAX - 1, false)
        );
    }

    #[test]
    fn provider_names_parse() {
        assert_eq!(SubProvider::parse("native"), Some(SubProvider::Native));
        assert_eq!(SubProvider::parse(" Reference "), Some(SubProvider::Reference));
        assert_eq!(SubProvider::parse("ref"), Some(SubProvider::Reference));
        assert_eq!(SubProvider::parse("llvm"), None);
    }

    #[test]
    fn sub_words_propagates_borrow_across_limbs() {
        // 0x0001_0000 - 0x0000_0001 = 0x0000_FFFF
        let (diff, borrow) = sub_words(&[0x0000u16, 0x0001], &[0x0001, 0x0000]).expect("sub");
        assert_eq!(diff, vec![0xFFFF, 0x0000]);
        assert!(!borrow);

        let (diff, borrow) = sub_words(&[0u16, 0], &[1, 0]).expect("sub");
        assert_eq!(diff, vec![0xFFFF, 0xFFFF]);
        assert!(borrow);
    }

    #[test]
    fn sub_words_rejects_unequal_lengths() {
        let err = sub_words(&[1u8, 2], &[1u8]).expect_err("length mismatch");
        assert_eq!(err.kind(), CheckErrorKind::Operand);
    }

    #[test]
    fn sub_words_empty_is_zero_without_borrow() {
        let (diff, borrow) = sub_words::<u32>(&[], &[]).expect("sub");
        assert!(diff.is_empty());
        assert!(!borrow);
    }

    proptest! {
        #[test]
        fn native_u16_matches_true_difference(a in any::<u16>(), b in any::<u16>(), bin in any::<bool>()) {
            let t = a as i32 - b as i32 - bin as i32;
            let (diff, bout) = a.sub_with_borrow(b, bin);
            prop_assert_eq!(diff as i32, t.rem_euclid(0x1_0000));
            prop_assert_eq!(bout, t < 0);
        }

        #[test]
        fn native_agrees_with_reference_u8(a in any::<u8>(), b in any::<u8>(), bin in any::<bool>()) {
            prop_assert_eq!(a.sub_with_borrow(b, bin), reference_borrowing_sub(a, b, bin));
        }

        #[test]
        fn native_agrees_with_reference_u64(a in any::<u64>(), b in any::<u64>(), bin in any::<bool>()) {
            prop_assert_eq!(a.sub_with_borrow(b, bin), reference_borrowing_sub(a, b, bin));
        }

        #[test]
        fn repeated_calls_are_identical(a in any::<u16>(), b in any::<u16>(), bin in any::<bool>()) {
            prop_assert_eq!(a.sub_with_borrow(b, bin), a.sub_with_borrow(b, bin));
            prop_assert_eq!(
                SubProvider::Reference.sub(a, b, bin),
                SubProvider::Reference.sub(a, b, bin)
            );
        }

        #[test]
        fn sub_words_u16_limbs_match_u64(a in any::<u64>(), b in any::<u64>()) {
            let split = |v: u64| -> Vec<u16> { (0..4).map(|i| (v >> (16 * i)) as u16).collect() };
            let (limbs, borrow) = sub_words(&split(a), &split(b)).expect("sub");
            let joined = limbs
                .iter()
                .enumerate()
                .fold(0u64, |acc, (i, &limb)| acc | (limb as u64) << (16 * i));
            prop_assert_eq!((joined, borrow), a.overflowing_sub(b));
        }
    }
}

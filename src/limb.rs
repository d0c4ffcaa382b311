// Copyright 2025 Brian Smith.
//
// Permission to use, copy, modify, and/or distribute this software for any
// purpose with or without fee is hereby granted, provided that the above
// copyright notice and this permission notice appear in all copies.
//
// THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHOR DISCLAIMS ALL WARRANTIES
// WITH REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF
// MERCHANTABILITY AND FITNESS. IN NO EVENT SHALL THE AUTHOR BE LIABLE FOR ANY
// SPECIAL, DIRECT, INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES
// WHATSOEVER RESULTING FROM LOSS OF USE, DATA OR PROFITS, WHETHER IN AN ACTION
// OF CONTRACT, NEGLIGENCE OR OTHER TORTIOUS ACTION, ARISING OUT OF OR IN
// CONNECTION WITH THE USE OR PERFORMANCE OF THIS SOFTWARE.

//! Single-limb primitives.
//!
//! Limbs are ordered least-significant-limb first everywhere in this crate.

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        /// One machine-word component of a magnitude.
        pub type Limb = u64;
        /// The signed counterpart of [`Limb`], used by the scalar (`_int`)
        /// operations.
        pub type SignedLimb = i64;
        pub(crate) type DoubleLimb = u128;
        /// The width of a [`Limb`] in bits.
        pub const LIMB_BITS: usize = 64;
    } else if #[cfg(target_pointer_width = "32")] {
        /// One machine-word component of a magnitude.
        pub type Limb = u32;
        /// The signed counterpart of [`Limb`], used by the scalar (`_int`)
        /// operations.
        pub type SignedLimb = i32;
        pub(crate) type DoubleLimb = u64;
        /// The width of a [`Limb`] in bits.
        pub const LIMB_BITS: usize = 32;
    }
}

/// The width of a [`Limb`] in bytes.
pub const LIMB_BYTES: usize = LIMB_BITS / 8;

/// `a + b + *carry`, with `*carry` updated to the outgoing carry (0 or 1).
#[inline]
pub(crate) fn adc(a: Limb, b: Limb, carry: &mut Limb) -> Limb {
    let t = DoubleLimb::from(a) + DoubleLimb::from(b) + DoubleLimb::from(*carry);
    *carry = (t >> LIMB_BITS) as Limb;
    t as Limb
}

/// `a - b - *borrow`, with `*borrow` updated to the outgoing borrow (0 or 1).
#[inline]
pub(crate) fn sbb(a: Limb, b: Limb, borrow: &mut Limb) -> Limb {
    let t = DoubleLimb::from(a)
        .wrapping_sub(DoubleLimb::from(b))
        .wrapping_sub(DoubleLimb::from(*borrow));
    *borrow = ((t >> LIMB_BITS) as Limb) & 1;
    t as Limb
}

/// `acc + (a * b) + *carry`; the high limb of the double-limb sum goes out
/// through `*carry`. The sum always fits: the maximum value is exactly
/// `2^(2W) - 1`.
#[inline]
pub(crate) fn mac(acc: Limb, a: Limb, b: Limb, carry: &mut Limb) -> Limb {
    let t = DoubleLimb::from(acc)
        + DoubleLimb::from(a) * DoubleLimb::from(b)
        + DoubleLimb::from(*carry);
    *carry = (t >> LIMB_BITS) as Limb;
    t as Limb
}

/// The quotient of the double-limb value `(hi, lo)` divided by `d`.
/// Requires `hi < d` so that the quotient fits in one limb.
#[inline]
pub(crate) fn div_double_limb(hi: Limb, lo: Limb, d: Limb) -> Limb {
    debug_assert!(hi < d);
    let n = (DoubleLimb::from(hi) << LIMB_BITS) | DoubleLimb::from(lo);
    (n / DoubleLimb::from(d)) as Limb
}

/// `r += a * b`; returns the carry out of the top of `r`.
/// `r` and `a` must have the same length.
pub(crate) fn limbs_mul_add_limb(r: &mut [Limb], a: &[Limb], b: Limb) -> Limb {
    debug_assert_eq!(r.len(), a.len());
    let mut carry = 0;
    for (ri, &ai) in r.iter_mut().zip(a) {
        *ri = mac(*ri, ai, b, &mut carry);
    }
    carry
}

/// An all-ones or all-zeros limb from a boolean, without branching on it.
#[inline]
pub(crate) fn mask_from_bool(cond: bool) -> Limb {
    (cond as Limb).wrapping_neg()
}

/// `if mask { r = a; }`, where `mask` is all-ones or all-zeros. Reads and
/// writes every limb regardless of `mask`.
pub(crate) fn limbs_cmov(mask: Limb, r: &mut [Limb], a: &[Limb]) {
    debug_assert_eq!(r.len(), a.len());
    for (ri, &ai) in r.iter_mut().zip(a) {
        *ri = (*ri & !mask) | (ai & mask);
    }
}

/// `if mask { swap(a, b); }`, where `mask` is all-ones or all-zeros. Reads
/// and writes every limb of both slices regardless of `mask`.
pub(crate) fn limbs_cswap(mask: Limb, a: &mut [Limb], b: &mut [Limb]) {
    debug_assert_eq!(a.len(), b.len());
    for (ai, bi) in a.iter_mut().zip(b) {
        let t = mask & (*ai ^ *bi);
        *ai ^= t;
        *bi ^= t;
    }
}

/// Equivalent to `r = if (hi:a) >= m { (hi:a) - m } else { a }`, evaluated
/// with a memory-access pattern independent of the values. `hi` is the limb
/// above the top of `a` and must be 0 or 1 (the value is known to be less
/// than `2m`, so the subtraction can only wrap when `hi` is 0).
pub(crate) fn limbs_reduce_once(hi: Limb, r: &mut [Limb], a: &[Limb], m: &[Limb]) {
    debug_assert_eq!(r.len(), m.len());
    debug_assert_eq!(a.len(), m.len());
    debug_assert!(hi <= 1);
    let mut borrow = 0;
    for i in 0..m.len() {
        r[i] = sbb(a[i], m[i], &mut borrow);
    }
    // The subtraction wrapped iff it borrowed past `hi`.
    let keep_a = ((borrow ^ hi) & borrow).wrapping_neg();
    limbs_cmov(keep_a, r, a);
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: Limb = Limb::MAX;

    #[test]
    fn test_adc_sbb() {
        let mut carry = 0;
        assert_eq!(adc(MAX, 1, &mut carry), 0);
        assert_eq!(carry, 1);
        assert_eq!(adc(0, 0, &mut carry), 1);
        assert_eq!(carry, 0);

        let mut borrow = 0;
        assert_eq!(sbb(0, 1, &mut borrow), MAX);
        assert_eq!(borrow, 1);
        assert_eq!(sbb(5, 2, &mut borrow), 2);
        assert_eq!(borrow, 0);
    }

    #[test]
    fn test_mac_extremes() {
        // acc = MAX, a*b = MAX*MAX, carry = MAX is the largest possible
        // input and must not wrap.
        let mut carry = MAX;
        let lo = mac(MAX, MAX, MAX, &mut carry);
        // MAX + MAX*MAX + MAX = 2^(2W) - 1.
        assert_eq!(lo, MAX);
        assert_eq!(carry, MAX);
    }

    #[test]
    fn test_div_double_limb() {
        assert_eq!(div_double_limb(0, 7, 2), 3);
        assert_eq!(div_double_limb(1, 0, 2), 1 << (LIMB_BITS - 1));
        assert_eq!(div_double_limb(MAX - 1, MAX, MAX), MAX);
    }

    #[test]
    fn test_limbs_mul_add_limb() {
        static TEST_CASES: &[(&[Limb], &[Limb], Limb, Limb, &[Limb])] = &[
            (&[0], &[0], 0, 0, &[0]),
            (&[MAX], &[0], MAX, 0, &[MAX]),
            (&[0], &[MAX], MAX, MAX - 1, &[1]),
            (&[MAX], &[MAX], MAX, MAX, &[0]),
            (&[0, 0], &[MAX, MAX], MAX, MAX - 1, &[1, MAX]),
            (&[1, 0], &[MAX, MAX], MAX, MAX - 1, &[2, MAX]),
            (&[MAX, 0], &[MAX, MAX], MAX, MAX, &[0, 0]),
            (&[0, 1], &[MAX, MAX], MAX, MAX, &[1, 0]),
            (&[MAX, MAX], &[MAX, MAX], MAX, MAX, &[0, MAX]),
        ];
        for (i, (r_input, a, w, expected_carry, expected_r)) in TEST_CASES.iter().enumerate() {
            let mut r = [0; 8];
            let r = &mut r[..r_input.len()];
            r.copy_from_slice(r_input);
            let carry = limbs_mul_add_limb(r, a, *w);
            assert_eq!(&*r, *expected_r, "case {i}");
            assert_eq!(carry, *expected_carry, "case {i}");
        }
    }

    #[test]
    fn test_cmov_cswap() {
        let mut r = [1, 2, 3];
        limbs_cmov(0, &mut r, &[7, 8, 9]);
        assert_eq!(r, [1, 2, 3]);
        limbs_cmov(MAX, &mut r, &[7, 8, 9]);
        assert_eq!(r, [7, 8, 9]);

        let mut a = [1, 2];
        let mut b = [3, 4];
        limbs_cswap(0, &mut a, &mut b);
        assert_eq!((a, b), ([1, 2], [3, 4]));
        limbs_cswap(MAX, &mut a, &mut b);
        assert_eq!((a, b), ([3, 4], [1, 2]));
    }

    #[test]
    fn test_reduce_once() {
        let m = [5, 1];
        // (0: [4, 1]) < m: unchanged.
        let mut r = [0, 0];
        limbs_reduce_once(0, &mut r, &[4, 1], &m);
        assert_eq!(r, [4, 1]);
        // (0: [5, 1]) == m: reduced to zero.
        limbs_reduce_once(0, &mut r, &[5, 1], &m);
        assert_eq!(r, [0, 0]);
        // (1: [0, 0]) = 2^(2W) > m: subtracts m.
        limbs_reduce_once(1, &mut r, &[0, 0], &m);
        assert_eq!(r, [MAX - 4, MAX - 1]);
    }
}

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

//! Long division.

use super::{alloc_limbs, Mpi, Sign};
use crate::{
    error::Error,
    limb::{self, DoubleLimb, Limb, SignedLimb, LIMB_BITS},
};
use alloc::vec;
use core::cmp::Ordering;

impl Mpi {
    /// Truncated division: `(Q, R)` with `self = Q * divisor + R`,
    /// `|R| < |divisor|`, `Q` signed by `self * divisor` and `R` signed by
    /// `self` (or canonical zero).
    ///
    /// Schoolbook long division (Knuth's Algorithm D): the divisor is
    /// normalized by a left shift, each quotient limb is estimated from
    /// the top two limbs of the running remainder, the estimate is refined
    /// against the top three limbs, and an add-back corrects the rare
    /// overshoot.
    pub fn div_rem(&self, divisor: &Self) -> Result<(Self, Self), Error> {
        if divisor.is_zero() {
            return Err(Error::DivisionByZero);
        }
        if self.cmp_abs(divisor) == Ordering::Less {
            return Ok((Self::new(), self.clone()));
        }

        let mut x = self.clone();
        x.sign = Sign::Positive;
        let mut y = divisor.clone();
        y.sign = Sign::Positive;

        let bits = y.bit_len() % LIMB_BITS;
        let norm = if bits < LIMB_BITS - 1 {
            LIMB_BITS - 1 - bits
        } else {
            0
        };
        x.shift_left(norm)?;
        y.shift_left(norm)?;

        let n = x.significant_limbs() - 1;
        let t = y.significant_limbs() - 1;
        let mut z = alloc_limbs(n - t + 1)?;

        // The leading quotient limb: after normalization the shifted
        // divisor is more than half of X's range, so this loop runs at
        // most a few times.
        let mut y_top = y.clone();
        y_top.shift_left(LIMB_BITS * (n - t))?;
        while x.cmp(&y_top) != Ordering::Less {
            z[n - t] = z[n - t].wrapping_add(1);
            x = x.sub(&y_top)?;
        }
        drop(y_top);

        for i in ((t + 1)..=n).rev() {
            let zi = i - t - 1;
            z[zi] = if x.limb(i) >= y.limb(t) {
                Limb::MAX
            } else {
                limb::div_double_limb(x.limb(i), x.limb(i - 1), y.limb(t))
            };

            // Refine the estimate against the top three remainder limbs.
            let t2 = Self::from_limb_vec(
                Sign::Positive,
                vec![
                    if i < 2 { 0 } else { x.limb(i - 2) },
                    x.limb(i - 1),
                    x.limb(i),
                ],
            );
            z[zi] = z[zi].wrapping_add(1);
            loop {
                z[zi] = z[zi].wrapping_sub(1);
                let t1 = Self::from_limb_vec(
                    Sign::Positive,
                    vec![if t < 1 { 0 } else { y.limb(t - 1) }, y.limb(t)],
                )
                .mul_int(z[zi])?;
                if t1.cmp(&t2) != Ordering::Greater {
                    break;
                }
            }

            let mut t1 = y.mul_int(z[zi])?;
            t1.shift_left(LIMB_BITS * zi)?;
            x = x.sub(&t1)?;
            if x.is_negative() {
                let mut back = y.clone();
                back.shift_left(LIMB_BITS * zi)?;
                x = x.add(&back)?;
                z[zi] = z[zi].wrapping_sub(1);
            }
        }

        let q_sign = if self.sign == divisor.sign {
            Sign::Positive
        } else {
            Sign::Negative
        };
        let q = Self::from_limb_vec(q_sign, z);
        x.shift_right(norm);
        x.sign = self.sign;
        x.fixup_zero_sign();
        Ok((q, x))
    }

    /// [`div_rem`](Self::div_rem) with a one-limb signed divisor.
    pub fn div_rem_int(&self, b: SignedLimb) -> Result<(Self, Self), Error> {
        self.div_rem(&Self::from_int(b))
    }

    /// `self mod modulus` with the result in `[0, modulus)`. The modulus
    /// must be positive: a negative one fails with
    /// [`Error::NegativeValue`], zero with [`Error::DivisionByZero`].
    pub fn modulo(&self, modulus: &Self) -> Result<Self, Error> {
        if modulus.is_negative() {
            return Err(Error::NegativeValue);
        }
        let (_, mut r) = self.div_rem(modulus)?;
        while r.is_negative() {
            r = r.add(modulus)?;
        }
        while r.cmp(modulus) != Ordering::Less {
            r = r.sub(modulus)?;
        }
        Ok(r)
    }

    /// `self mod b` for a one-limb positive scalar, without allocating.
    /// The result is non-negative, as for [`modulo`](Self::modulo).
    pub fn mod_int(&self, b: SignedLimb) -> Result<Limb, Error> {
        if b == 0 {
            return Err(Error::DivisionByZero);
        }
        if b < 0 {
            return Err(Error::NegativeValue);
        }
        let d = b.unsigned_abs();
        if d == 1 {
            return Ok(0);
        }
        let mut r: Limb = 0;
        for i in (0..self.significant_limbs()).rev() {
            let x = (DoubleLimb::from(r) << LIMB_BITS) | DoubleLimb::from(self.limbs[i]);
            r = (x % DoubleLimb::from(d)) as Limb;
        }
        if self.is_negative() && r != 0 {
            r = d - r;
        }
        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mpi(z: SignedLimb) -> Mpi {
        Mpi::from_int(z)
    }

    fn hex(s: &str) -> Mpi {
        Mpi::from_str_radix(s, 16).unwrap()
    }

    #[test]
    fn test_div_rem_single_limb_pair() {
        let a = hex("DEADBEEFCAFEBABE");
        let b = hex("100000001");
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q, hex("DEADBEEE"));
        assert_eq!(r, hex("EC50FBD0"));
        assert_eq!(q.mul(&b).unwrap().add(&r).unwrap(), a);
    }

    #[test]
    fn test_div_rem_signs() {
        // Truncated division: R takes the dividend's sign.
        for (a, b, q, r) in [
            (7, 2, 3, 1),
            (-7, 2, -3, -1),
            (7, -2, -3, 1),
            (-7, -2, 3, -1),
            (6, 2, 3, 0),
            (-6, 2, -3, 0),
        ] {
            let (qq, rr) = mpi(a).div_rem(&mpi(b)).unwrap();
            assert_eq!(qq, mpi(q), "{a}/{b}");
            assert_eq!(rr, mpi(r), "{a}%{b}");
            assert_eq!(rr.sign() == Sign::Negative, r < 0);
        }
    }

    #[test]
    fn test_div_rem_small_dividend() {
        let (q, r) = mpi(3).div_rem(&mpi(10)).unwrap();
        assert!(q.is_zero());
        assert_eq!(r, mpi(3));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(mpi(3).div_rem(&Mpi::new()), Err(Error::DivisionByZero));
        assert_eq!(mpi(3).mod_int(0), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_div_rem_multi_limb_identity() {
        // A = 2^200 + 12345, B = 2^100 + 3: check A = Q*B + R, |R| < |B|.
        let mut a = Mpi::from_int(1);
        a.shift_left(200).unwrap();
        a = a.add_int(12_345).unwrap();
        let mut b = Mpi::from_int(1);
        b.shift_left(100).unwrap();
        b = b.add_int(3).unwrap();

        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(q.mul(&b).unwrap().add(&r).unwrap(), a);
        assert_eq!(r.cmp_abs(&b), Ordering::Less);
        assert!(!r.is_negative());
    }

    #[test]
    fn test_div_rem_equal_operands() {
        let a = hex("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF");
        let (q, r) = a.div_rem(&a).unwrap();
        assert_eq!(q, mpi(1));
        assert!(r.is_zero());
    }

    #[test]
    fn test_modulo() {
        // -17 mod 5 = 3.
        assert_eq!(mpi(-17).modulo(&mpi(5)).unwrap(), mpi(3));
        assert_eq!(mpi(17).modulo(&mpi(5)).unwrap(), mpi(2));
        assert_eq!(mpi(-15).modulo(&mpi(5)).unwrap(), mpi(0));
        assert_eq!(mpi(17).modulo(&mpi(-5)), Err(Error::NegativeValue));
        assert_eq!(mpi(17).modulo(&Mpi::new()), Err(Error::DivisionByZero));
    }

    #[test]
    fn test_mod_int() {
        assert_eq!(mpi(-17).mod_int(5).unwrap(), 3);
        assert_eq!(mpi(17).mod_int(5).unwrap(), 2);
        assert_eq!(mpi(17).mod_int(1).unwrap(), 0);
        assert_eq!(mpi(17).mod_int(-5), Err(Error::NegativeValue));
        // Matches modulo() on a multi-limb value.
        let a = hex("DEADBEEFCAFEBABE123456789");
        let m = a.mod_int(997).unwrap();
        assert_eq!(a.modulo(&mpi(997)).unwrap(), Mpi::from_int(m as SignedLimb));
    }
}

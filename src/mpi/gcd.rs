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

//! Greatest common divisor and modular inversion.

use super::{Mpi, Sign};
use crate::error::Error;
use core::cmp::Ordering;

impl Mpi {
    /// `gcd(|self|, |other|)` by the binary algorithm: strip the common
    /// power of two, then subtract-and-halve until one side reaches zero.
    pub fn gcd(&self, other: &Self) -> Result<Self, Error> {
        let mut ta = self.clone();
        ta.sign = Sign::Positive;
        let mut tb = other.clone();
        tb.sign = Sign::Positive;

        if ta.is_zero() {
            return Ok(tb);
        }
        if tb.is_zero() {
            return Ok(ta);
        }

        let lz = core::cmp::min(ta.lsb(), tb.lsb());
        ta.shift_right(lz);
        tb.shift_right(lz);

        while !ta.is_zero() {
            ta.shift_right(ta.lsb());
            tb.shift_right(tb.lsb());
            // The difference of two odd values is even, so each pass
            // halves one side.
            if ta.cmp(&tb) != Ordering::Less {
                ta = ta.sub_abs(&tb)?;
                ta.shift_right(1);
            } else {
                tb = tb.sub_abs(&ta)?;
                tb.shift_right(1);
            }
        }

        tb.shift_left(lz)?;
        Ok(tb)
    }

    /// The inverse of `self` modulo `modulus`: the `X` in `[0, modulus)`
    /// with `self * X ≡ 1 (mod modulus)`.
    ///
    /// Fails with [`Error::BadInput`] when `modulus <= 1` and with
    /// [`Error::NotAcceptable`] when `gcd(self, modulus) != 1` (no inverse
    /// exists). Extended binary Euclidean algorithm; variable-time.
    pub fn inv_mod(&self, modulus: &Self) -> Result<Self, Error> {
        if modulus.cmp_int(1) != Ordering::Greater {
            return Err(Error::BadInput);
        }
        if self.gcd(modulus)?.cmp_int(1) != Ordering::Equal {
            return Err(Error::NotAcceptable);
        }

        let ta = self.modulo(modulus)?;
        let mut tu = ta.clone();
        let tb = modulus.clone();
        let mut tv = modulus.clone();

        let mut u1 = Self::from_int(1);
        let mut u2 = Self::new();
        let mut v1 = Self::new();
        let mut v2 = Self::from_int(1);

        loop {
            while !tu.is_zero() && !tu.bit(0) {
                tu.shift_right(1);
                if u1.bit(0) || u2.bit(0) {
                    u1 = u1.add(&tb)?;
                    u2 = u2.sub(&ta)?;
                }
                u1.shift_right(1);
                u2.shift_right(1);
            }
            while !tv.bit(0) {
                tv.shift_right(1);
                if v1.bit(0) || v2.bit(0) {
                    v1 = v1.add(&tb)?;
                    v2 = v2.sub(&ta)?;
                }
                v1.shift_right(1);
                v2.shift_right(1);
            }

            if tu.cmp(&tv) != Ordering::Less {
                tu = tu.sub(&tv)?;
                u1 = u1.sub(&v1)?;
                u2 = u2.sub(&v2)?;
            } else {
                tv = tv.sub(&tu)?;
                v1 = v1.sub(&u1)?;
                v2 = v2.sub(&u2)?;
            }

            if tu.is_zero() {
                break;
            }
        }

        let mut x = v1;
        while x.is_negative() {
            x = x.add(modulus)?;
        }
        while x.cmp(modulus) != Ordering::Less {
            x = x.sub(modulus)?;
        }
        Ok(x)
    }
}

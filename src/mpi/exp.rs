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

//! Montgomery multiplication and sliding-window modular exponentiation.

use super::{alloc_limbs, Mpi, Sign};
use crate::{
    error::Error,
    limb::{self, Limb, LIMB_BITS},
};
use alloc::{vec, vec::Vec};
use core::{cmp::Ordering, mem};
use zeroize::Zeroize;

/// The maximum window width used by `exp_mod`. The precomputed table holds
/// `2^(w-1)` odd powers of the base, so widening this trades memory for
/// fewer multiplications on large exponents.
const WINDOW_SIZE: usize = 6;

/// `-n0^-1 mod 2^W` for odd `n0`, the per-limb Montgomery constant.
///
/// Newton's iteration: an odd `m` satisfies `m*m ≡ 1 (mod 8)`, so `m` is
/// its own inverse to 3 bits, and each step doubles the number of valid
/// bits. Five steps reach 96 bits, covering both limb widths.
fn montg_init(n0: Limb) -> Limb {
    debug_assert_eq!(n0 & 1, 1);
    let mut x = n0;
    for _ in 0..5 {
        x = x.wrapping_mul((2u8 as Limb).wrapping_sub(n0.wrapping_mul(x)));
    }
    x.wrapping_neg()
}

/// `R² mod N`, where `R = 2^(W*k)` and `k = sig(N)`.
fn rr_mod_n(modulus: &Mpi, k: usize) -> Result<Mpi, Error> {
    let mut rr = Mpi::from_int(1);
    rr.shift_left(2 * k * LIMB_BITS)?;
    rr.modulo(modulus)
}

/// One modulus' worth of Montgomery state: the modulus limbs, the
/// `-N^-1 mod 2^W` constant, and the shared accumulator.
struct MontyReducer<'a> {
    n: &'a [Limb],
    n0: Limb,
    t: Vec<Limb>,
}

impl<'a> MontyReducer<'a> {
    fn new(n: &'a [Limb]) -> Self {
        Self {
            n,
            n0: montg_init(n[0]),
            t: vec![0; n.len() + 2],
        }
    }

    /// `r = a * b * R^-1 mod n` for `a, b < n`, by interleaving each
    /// one-limb multiply with a Montgomery reduction step that clears the
    /// accumulator's low limb. The final subtraction of `n` is conditional
    /// on the value but performed by masking, never by branching.
    ///
    /// `r` must not alias `a` or `b`; all three are `n.len()` limbs.
    fn mul(&mut self, r: &mut [Limb], a: &[Limb], b: &[Limb]) {
        let k = self.n.len();
        debug_assert_eq!(r.len(), k);
        debug_assert_eq!(a.len(), k);
        debug_assert_eq!(b.len(), k);
        let t = &mut self.t;
        t.fill(0);
        for i in 0..k {
            // t += a[i] * b
            let mut carry = 0;
            for j in 0..k {
                t[j] = limb::mac(t[j], a[i], b[j], &mut carry);
            }
            let (s, o) = t[k].overflowing_add(carry);
            t[k] = s;
            t[k + 1] += o as Limb;

            // t += u * n, then t >>= W; u is chosen so the low limb of the
            // sum is zero.
            let u = t[0].wrapping_mul(self.n0);
            let mut carry = 0;
            let _low = limb::mac(t[0], u, self.n[0], &mut carry);
            for j in 1..k {
                t[j - 1] = limb::mac(t[j], u, self.n[j], &mut carry);
            }
            let (s, o) = t[k].overflowing_add(carry);
            t[k - 1] = s;
            t[k] = t[k + 1] + o as Limb;
            t[k + 1] = 0;
        }
        // 0 <= t < 2n, with t[k] the (0 or 1) limb above the top.
        limb::limbs_reduce_once(t[k], r, &t[..k], self.n);
    }
}

impl Mpi {
    /// `self^exponent mod modulus`.
    ///
    /// The modulus must be positive and odd and the exponent non-negative;
    /// anything else fails with [`Error::BadInput`]. Even moduli are
    /// rejected outright: the Montgomery path cannot reduce by them and
    /// no fallback is provided. The result is the canonical residue in
    /// `[0, modulus)`, also for a negative base.
    ///
    /// `rr_cache` optionally carries `R² mod N` between calls sharing a
    /// modulus: pass an empty [`Mpi`] the first time and the computed
    /// constant is stored into it; pass it back unchanged to skip the
    /// recomputation. The cache is caller-owned state. This function
    /// cannot tell that the modulus changed, so the caller must reset the
    /// cache when it does.
    pub fn exp_mod(
        &self,
        exponent: &Self,
        modulus: &Self,
        rr_cache: Option<&mut Self>,
    ) -> Result<Self, Error> {
        if modulus.cmp_int(0) != Ordering::Greater || modulus.limb(0) & 1 == 0 {
            return Err(Error::BadInput);
        }
        if exponent.is_negative() {
            return Err(Error::BadInput);
        }

        let k = modulus.significant_limbs();

        let rr_owned;
        let rr: &Self = match rr_cache {
            Some(cache) => {
                if cache.limbs.is_empty() {
                    *cache = rr_mod_n(modulus, k)?;
                }
                cache
            }
            None => {
                rr_owned = rr_mod_n(modulus, k)?;
                &rr_owned
            }
        };

        let ebits = exponent.bit_len();
        if ebits == 0 {
            // A^0 = 1, reduced (a modulus of one gives zero).
            return Self::from_int(1).modulo(modulus);
        }

        let neg = self.is_negative();
        let mut base = self.clone();
        base.sign = Sign::Positive;
        if base.cmp(modulus) != Ordering::Less {
            base = base.modulo(modulus)?;
        }
        base.grow(k)?;

        let mut rr_limbs = alloc_limbs(k)?;
        let s = rr.significant_limbs();
        if s > k {
            // A cache left over from a wider modulus.
            return Err(Error::BadInput);
        }
        rr_limbs[..s].copy_from_slice(&rr.limbs[..s]);

        let mut mr = MontyReducer::new(&modulus.limbs[..k]);

        let mut one = alloc_limbs(k)?;
        one[0] = 1;

        // Convert into Montgomery form: Ā = A * R² * R^-1 = A * R.
        let mut a_bar = alloc_limbs(k)?;
        mr.mul(&mut a_bar, &base.limbs[..k], &rr_limbs);

        // The accumulator starts at 1 in Montgomery form, i.e. R mod N.
        let mut x = alloc_limbs(k)?;
        mr.mul(&mut x, &one, &rr_limbs);
        let mut scratch = alloc_limbs(k)?;

        let wsize = if ebits > 671 {
            6
        } else if ebits > 239 {
            5
        } else if ebits > 79 {
            4
        } else if ebits > 23 {
            3
        } else {
            1
        };
        let wsize = core::cmp::min(wsize, WINDOW_SIZE);

        // Precompute the odd powers Ā, Ā³, ..., Ā^(2^w - 1).
        let mut table: Vec<Vec<Limb>> = Vec::with_capacity(1 << (wsize - 1));
        table.push(a_bar);
        if wsize > 1 {
            let mut sq = alloc_limbs(k)?;
            mr.mul(&mut sq, &table[0], &table[0]);
            for i in 1..(1 << (wsize - 1)) {
                let mut next = alloc_limbs(k)?;
                mr.mul(&mut next, &table[i - 1], &sq);
                table.push(next);
            }
            sq.zeroize();
        }

        // Scan the exponent MSB-first: square per bit; when a set bit is
        // reached, the window runs down to its lowest set bit within
        // `wsize` bits, selecting an odd table entry.
        let mut i = ebits;
        while i > 0 {
            if !exponent.bit(i - 1) {
                mr.mul(&mut scratch, &x, &x);
                mem::swap(&mut x, &mut scratch);
                i -= 1;
                continue;
            }
            let mut l = i.saturating_sub(wsize);
            while !exponent.bit(l) {
                l += 1;
            }
            for _ in 0..(i - l) {
                mr.mul(&mut scratch, &x, &x);
                mem::swap(&mut x, &mut scratch);
            }
            let mut idx = 0usize;
            for b in (l..i).rev() {
                idx = (idx << 1) | usize::from(exponent.bit(b));
            }
            mr.mul(&mut scratch, &x, &table[(idx - 1) / 2]);
            mem::swap(&mut x, &mut scratch);
            i = l;
        }

        // One final reduction by 1 cancels the remaining R factor.
        mr.mul(&mut scratch, &x, &one);
        mem::swap(&mut x, &mut scratch);

        // Scrub the Montgomery residues before the buffers go away.
        for e in &mut table {
            e.zeroize();
        }
        scratch.zeroize();
        mr.t.zeroize();

        let out = Self::from_limb_vec(Sign::Positive, x);
        if neg && exponent.bit(0) && !out.is_zero() {
            let mut out = out;
            out.sign = Sign::Negative;
            return modulus.add(&out);
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limb::SignedLimb;

    fn mpi(z: SignedLimb) -> Mpi {
        Mpi::from_int(z)
    }

    fn hex(s: &str) -> Mpi {
        Mpi::from_str_radix(s, 16).unwrap()
    }

    #[test]
    fn test_montg_init() {
        for n0 in [1u8 as Limb, 3, 5, 0x2b, 0xffff_fff1, Limb::MAX] {
            let m = montg_init(n0);
            // n0 * (-m) ≡ 1 (mod 2^W), i.e. n0 * m ≡ -1 ≡ Limb::MAX.
            assert_eq!(n0.wrapping_mul(m), Limb::MAX, "n0 = {n0:#x}");
        }
    }

    #[test]
    fn test_exp_mod_small() {
        // 4^13 mod 497 = 445.
        let x = mpi(4).exp_mod(&mpi(13), &mpi(497), None).unwrap();
        assert_eq!(x, mpi(445));
    }

    #[test]
    fn test_exp_mod_edge_exponents() {
        let n = mpi(497);
        let a = mpi(1234);
        // A^0 = 1; A^1 = A mod N.
        assert_eq!(a.exp_mod(&Mpi::new(), &n, None).unwrap(), mpi(1));
        assert_eq!(a.exp_mod(&mpi(1), &n, None).unwrap(), a.modulo(&n).unwrap());
        // Modulus one collapses everything to zero.
        assert!(a.exp_mod(&mpi(7), &mpi(1), None).unwrap().is_zero());
        assert!(a.exp_mod(&Mpi::new(), &mpi(1), None).unwrap().is_zero());
    }

    #[test]
    fn test_exp_mod_rejects() {
        let a = mpi(2);
        assert_eq!(a.exp_mod(&mpi(3), &mpi(10), None), Err(Error::BadInput));
        assert_eq!(a.exp_mod(&mpi(3), &mpi(-7), None), Err(Error::BadInput));
        assert_eq!(a.exp_mod(&mpi(3), &Mpi::new(), None), Err(Error::BadInput));
        assert_eq!(a.exp_mod(&mpi(-3), &mpi(7), None), Err(Error::BadInput));
    }

    #[test]
    fn test_exp_mod_negative_base() {
        let n = hex("FFFFFFFFFFFFFFC5FFFFFFFFFFFFFF61");
        let mut a = hex("1234567890ABCDEF1122334455667788");
        a.sign = Sign::Negative;
        let x = a.exp_mod(&mpi(13), &n, None).unwrap();
        assert_eq!(x, hex("BC361CD293242F4ABB7460994DFE647B"));
        assert!(!x.is_negative());
        // An even exponent drops the sign entirely.
        let y = a.exp_mod(&mpi(2), &n, None).unwrap();
        let mut abs_a = a.clone();
        abs_a.sign = Sign::Positive;
        assert_eq!(y, abs_a.exp_mod(&mpi(2), &n, None).unwrap());
    }

    #[test]
    fn test_exp_mod_multi_limb_window() {
        // An 81-bit exponent exercises the 4-bit window path.
        let a = hex("1234567890ABCDEF1122334455667788");
        let e = hex("100000000000000003039");
        let n = hex("FFFFFFFFFFFFFFC5FFFFFFFFFFFFFF61");
        let x = a.exp_mod(&e, &n, None).unwrap();
        assert_eq!(x, hex("BD441E34AF16E10F2AEA909C1B617CEC"));
    }

    #[test]
    fn test_exp_mod_rr_cache() {
        let a = hex("1234567890ABCDEF1122334455667788");
        let n = hex("FFFFFFFFFFFFFFC5FFFFFFFFFFFFFF61");
        let mut rr = Mpi::new();
        let x1 = a.exp_mod(&mpi(65_537), &n, Some(&mut rr)).unwrap();
        // The cache was populated and reusing it gives the same answer.
        assert!(!rr.limbs.is_empty());
        let x2 = a.exp_mod(&mpi(65_537), &n, Some(&mut rr)).unwrap();
        assert_eq!(x1, x2);
        assert_eq!(x1, a.exp_mod(&mpi(65_537), &n, None).unwrap());
    }

    #[test]
    fn test_exp_mod_base_larger_than_modulus() {
        let n = mpi(497);
        let a = mpi(4).add(&n.mul(&mpi(3)).unwrap()).unwrap();
        assert_eq!(a.exp_mod(&mpi(13), &n, None).unwrap(), mpi(445));
    }
}

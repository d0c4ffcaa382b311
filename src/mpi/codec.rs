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

//! Import and export: big-endian binary, radix strings, random fill, and
//! the optional file helpers.

use super::{alloc_limbs, Mpi, Sign};
use crate::{
    error::Error,
    limb::{Limb, SignedLimb, LIMB_BITS, LIMB_BYTES},
    rand::SecureRandom,
    MAX_SIZE,
};
use alloc::{string::String, vec, vec::Vec};
use core::fmt;
use zeroize::Zeroize;

const RADIX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

impl Mpi {
    /// Imports an unsigned big-endian magnitude. Leading zero bytes are
    /// accepted (they become zero high limbs); an empty slice is zero.
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self, Error> {
        let n = (bytes.len() + LIMB_BYTES - 1) / LIMB_BYTES;
        let mut limbs = alloc_limbs(n)?;

        // The highest-order limb takes whatever bytes are left over.
        let mut bytes_in_limb = bytes.len() % LIMB_BYTES;
        if bytes_in_limb == 0 {
            bytes_in_limb = LIMB_BYTES;
        }
        untrusted::Input::from(bytes).read_all(Error::BadInput, |reader| {
            for i in 0..n {
                let mut limb: Limb = 0;
                for _ in 0..bytes_in_limb {
                    limb = (limb << 8) | Limb::from(reader.read_byte()?);
                }
                limbs[n - 1 - i] = limb;
                bytes_in_limb = LIMB_BYTES;
            }
            Ok(())
        })?;

        Ok(Self {
            sign: Sign::Positive,
            limbs,
        })
    }

    fn write_magnitude(&self, out: &mut [u8]) {
        debug_assert!(out.len() >= self.byte_len());
        for b in out.iter_mut() {
            *b = 0;
        }
        let stop = out.len() - self.byte_len();
        let mut idx = out.len();
        'limbs: for i in 0..self.significant_limbs() {
            let mut limb = self.limbs[i];
            for _ in 0..LIMB_BYTES {
                if idx == stop {
                    break 'limbs;
                }
                idx -= 1;
                out[idx] = limb as u8;
                limb >>= 8;
            }
        }
    }

    /// Exports the magnitude big-endian into `out`, left-padded with
    /// zeros. Fails with [`Error::BufferTooSmall`] when `out` is shorter
    /// than [`byte_len`](Self::byte_len). The sign is not encoded.
    pub fn write_be_bytes(&self, out: &mut [u8]) -> Result<(), Error> {
        if out.len() < self.byte_len() {
            return Err(Error::BufferTooSmall);
        }
        self.write_magnitude(out);
        Ok(())
    }

    /// The magnitude as an exactly-[`byte_len`](Self::byte_len)-long
    /// big-endian vector.
    pub fn to_be_bytes(&self) -> Vec<u8> {
        let mut out = vec![0; self.byte_len()];
        self.write_magnitude(&mut out);
        out
    }

    /// Parses a value from digits in the given radix (2..=16). A leading
    /// `-` makes the value negative; hex digits are case-insensitive; no
    /// `0x` prefix is accepted. An empty digit string is zero.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<Self, Error> {
        if !(2..=16).contains(&radix) {
            return Err(Error::BadInput);
        }
        let (neg, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let mut x = Self::new();
        if radix == 16 {
            // Nibble at a time, straight into the limbs.
            let bytes = digits.as_bytes();
            x.grow((bytes.len() * 4 + LIMB_BITS - 1) / LIMB_BITS)?;
            for (j, &c) in bytes.iter().rev().enumerate() {
                let d = char::from(c).to_digit(16).ok_or(Error::InvalidCharacter)?;
                x.limbs[j / (LIMB_BITS / 4)] |= Limb::from(d) << (4 * (j % (LIMB_BITS / 4)));
            }
        } else {
            for c in digits.chars() {
                let d = c.to_digit(radix).ok_or(Error::InvalidCharacter)?;
                x = x.mul_int(Limb::from(radix))?;
                x = x.add_int(d as SignedLimb)?;
            }
        }
        if neg {
            x.sign = Sign::Negative;
            x.fixup_zero_sign();
        }
        Ok(x)
    }

    /// Writes the value as digits in the given radix (2..=16), with a
    /// leading `-` for negative values and uppercase hex. Zero is `"0"`.
    pub fn to_radix_string(&self, radix: u32) -> Result<String, Error> {
        if !(2..=16).contains(&radix) {
            return Err(Error::BadInput);
        }
        if self.is_zero() {
            return Ok(String::from("0"));
        }

        // Digits accumulate least-significant first.
        let mut digits = Vec::new();
        if radix == 16 {
            let nibbles = (self.bit_len() + 3) / 4;
            for j in 0..nibbles {
                let d = (self.limb(j / (LIMB_BITS / 4)) >> (4 * (j % (LIMB_BITS / 4)))) & 0xf;
                digits.push(RADIX_DIGITS[d as usize]);
            }
        } else {
            let mut t = self.clone();
            t.sign = Sign::Positive;
            while !t.is_zero() {
                let (q, r) = t.div_rem_int(radix as SignedLimb)?;
                digits.push(RADIX_DIGITS[r.limb(0) as usize]);
                t = q;
            }
        }

        let mut s = String::with_capacity(digits.len() + 1);
        if self.is_negative() {
            s.push('-');
        }
        for &d in digits.iter().rev() {
            s.push(char::from(d));
        }
        Ok(s)
    }

    /// A value of exactly `size` random bytes from `rng`, interpreted as a
    /// big-endian magnitude. Fails with [`Error::BadInput`] past
    /// [`MAX_SIZE`]; an `rng` failure is propagated unchanged.
    pub fn fill_random(size: usize, rng: &mut dyn SecureRandom) -> Result<Self, Error> {
        if size > MAX_SIZE {
            return Err(Error::BadInput);
        }
        let mut buf = vec![0u8; size];
        rng.fill(&mut buf)?;
        let x = Self::from_be_bytes(&buf);
        buf.zeroize();
        x
    }
}

#[cfg(feature = "std")]
impl Mpi {
    /// Reads one line from `reader` and parses it in the given radix,
    /// after trimming whitespace and, for radix 16, stripping one optional
    /// `0x`/`0X` prefix. I/O failures map to [`Error::FileIo`].
    pub fn read_file(radix: u32, reader: &mut dyn std::io::BufRead) -> Result<Self, Error> {
        let mut line = String::new();
        reader.read_line(&mut line).map_err(|_| Error::FileIo)?;
        let mut s = line.trim();
        if radix == 16 {
            s = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")).unwrap_or(s);
        }
        Self::from_str_radix(s, radix)
    }

    /// Writes `prefix`, the value in the given radix, and a newline to
    /// `writer`. I/O failures map to [`Error::FileIo`].
    pub fn write_file(
        &self,
        prefix: &str,
        radix: u32,
        writer: &mut dyn std::io::Write,
    ) -> Result<(), Error> {
        let s = self.to_radix_string(radix)?;
        writer.write_all(prefix.as_bytes()).map_err(|_| Error::FileIo)?;
        writer.write_all(s.as_bytes()).map_err(|_| Error::FileIo)?;
        writer.write_all(b"\n").map_err(|_| Error::FileIo)?;
        Ok(())
    }
}

impl fmt::Display for Mpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_radix_string(10) {
            Ok(s) => f.write_str(&s),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl fmt::Debug for Mpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_radix_string(16) {
            Ok(s) => write!(f, "Mpi({s})"),
            Err(_) => Err(fmt::Error),
        }
    }
}

impl core::str::FromStr for Mpi {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        Self::from_str_radix(s, 10)
    }
}

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

//! Error reporting.

use core::fmt;

/// The failure kinds reported by this crate.
///
/// Every fallible operation returns `Result<_, Error>`. The first failing
/// step aborts the operation; destinations keep their prior value. Nothing
/// is retried internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// An I/O failure in the (optional) file codec, or in the system
    /// entropy source backing [`SystemRandom`](crate::rand::SystemRandom).
    FileIo,
    /// An argument violated a precondition (unsupported radix, negative
    /// exponent, even or non-positive modulus, oversized request, ...).
    BadInput,
    /// A digit outside the requested radix.
    InvalidCharacter,
    /// The output buffer is too small for the encoded value.
    BufferTooSmall,
    /// The operation would require or produce a forbidden sign
    /// (`sub_abs` with `|A| < |B|`; a negative modulus).
    NegativeValue,
    /// The divisor is zero.
    DivisionByZero,
    /// The operation has no solution: a non-coprime modular inverse, or a
    /// composite input to a primality test.
    NotAcceptable,
    /// Allocation failed or would exceed [`MAX_LIMBS`](crate::MAX_LIMBS).
    Alloc,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Self::FileIo => "I/O error",
            Self::BadInput => "bad input data",
            Self::InvalidCharacter => "invalid character in digit string",
            Self::BufferTooSmall => "output buffer too small",
            Self::NegativeValue => "negative value not allowed",
            Self::DivisionByZero => "division by zero",
            Self::NotAcceptable => "value not acceptable",
            Self::Alloc => "allocation failed",
        };
        f.write_str(msg)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<untrusted::EndOfInput> for Error {
    fn from(_: untrusted::EndOfInput) -> Self {
        Self::BadInput
    }
}

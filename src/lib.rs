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

//! Multi-precision integer arithmetic for cryptographic protocols.
//!
//! `bignum` provides arbitrary-precision signed integers ([`Mpi`]) backed by
//! a little-endian vector of machine-word limbs, together with the
//! arithmetic, modular, and number-theoretic primitives that RSA,
//! Diffie-Hellman, DSA, and elliptic-curve scalar work need: schoolbook
//! multiplication and long division, Montgomery-form sliding-window modular
//! exponentiation, binary GCD, modular inversion, Miller-Rabin primality
//! testing, and prime generation (optionally of safe primes).
//!
//! # Constant-time scope
//!
//! Only [`Mpi::conditional_assign`], [`Mpi::conditional_swap`], and the
//! final conditional subtraction inside Montgomery reduction are
//! constant-time with respect to the values they operate on. Every other
//! operation (comparison, division, the string codecs, bit-length) is
//! variable-time and must not be used on secrets without caller-side
//! hardening.
//!
//! # Concurrency
//!
//! An `Mpi` owns its limb buffer and performs no internal synchronization.
//! Distinct values may be used from distinct threads; a shared value must
//! be serialized by the caller.

#![no_std]
#![forbid(unsafe_code)]
#![deny(trivial_numeric_casts, unused_qualifications, variant_size_differences)]
#![warn(missing_docs)]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
mod limb;
mod mpi;
pub mod rand;

pub use self::{
    error::Error,
    limb::{Limb, SignedLimb, LIMB_BITS, LIMB_BYTES},
    mpi::{Mpi, Sign},
};

/// Hard upper bound on the number of limbs a value may occupy. Growing a
/// value past this limit fails with [`Error::Alloc`].
pub const MAX_LIMBS: usize = 10_000;

/// The largest byte length accepted by the user-facing codec and RNG
/// surfaces.
pub const MAX_SIZE: usize = 1024;

/// The largest bit length for user-facing sizes (prime generation in
/// particular); derived from [`MAX_SIZE`].
pub const MAX_BITS: usize = 8 * MAX_SIZE;

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

//! Cryptographic random byte generation.
//!
//! Operations that consume randomness ([`Mpi::fill_random`],
//! [`Mpi::is_prime`], [`Mpi::generate_prime`]) take a
//! `&mut dyn SecureRandom` instead of instantiating their own source. This
//! documents where non-deterministic outputs occur and lets tests substitute
//! a deterministic implementation so results can be replayed.
//!
//! [`Mpi::fill_random`]: crate::Mpi::fill_random
//! [`Mpi::is_prime`]: crate::Mpi::is_prime
//! [`Mpi::generate_prime`]: crate::Mpi::generate_prime

use crate::error::Error;

/// A secure random number generator.
pub trait SecureRandom {
    /// Fills `dest` with random bytes.
    ///
    /// On success, every byte of `dest` has been written. A failure is
    /// propagated unchanged to the caller of the operation that consumed
    /// the randomness.
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), Error>;
}

/// A [`SecureRandom`] whose output comes directly from the operating
/// system's preferred entropy source.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRandom;

impl SystemRandom {
    /// Constructs a new `SystemRandom`. Always succeeds; any work is
    /// deferred to the first [`fill`](SecureRandom::fill).
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl SecureRandom for SystemRandom {
    fn fill(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        // An entropy-source failure is an I/O failure.
        getrandom::getrandom(dest).map_err(|_| Error::FileIo)
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Default auth code generation.
//
// The code is a convenience default shown to the user the first time the
// settings are opened. It is not a secret in any cryptographic sense, so a
// thread-local PRNG is enough.

use netremote_core::config::AUTH_CODE_RANGE;
use rand::Rng;

/// Produces the initial auth code when none is persisted.
pub trait AuthCodeGenerator {
    /// A value in `0..100_000`.
    fn generate(&self) -> u32;
}

/// Draws codes from the thread-local random generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomAuthCode;

impl AuthCodeGenerator for RandomAuthCode {
    fn generate(&self) -> u32 {
        default_code()
    }
}

/// Pseudo-random five-digit code in `0..100_000`.
pub fn default_code() -> u32 {
    rand::rng().random_range(0..AUTH_CODE_RANGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_stay_within_five_digits() {
        let generator = RandomAuthCode;
        for _ in 0..1_000 {
            assert!(generator.generate() < 100_000);
        }
    }
}

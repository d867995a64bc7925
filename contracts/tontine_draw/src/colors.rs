//! # Colour allocation
//!
//! Each participant gets a random `0xRRGGBB` colour for its pie slice. A
//! colour is never handed out twice in a session, even after the participant
//! holding it is removed, so a slice never changes owner on screen.

use soroban_sdk::{log, Env, Vec};

use crate::Error;

/// Largest representable colour (`#ffffff`).
pub const MAX_COLOR: u32 = 0x00FF_FFFF;

/// Attempts before giving up. With at most 24 seats a collision is already
/// improbable, so hitting this means the caller's ledger is broken.
pub const MAX_COLOR_ATTEMPTS: u32 = 10_000;

/// Draw a fresh colour from the contract PRNG.
pub fn allocate(env: &Env, used: &Vec<u32>) -> Result<u32, Error> {
    let color = allocate_with(used, || env.prng().gen_range::<u64>(0..=MAX_COLOR as u64) as u32);
    if color.is_err() {
        log!(env, "colour space exhausted after {} attempts", MAX_COLOR_ATTEMPTS);
    }
    color
}

/// Retry `next` until it yields a colour not in `used`.
pub fn allocate_with(used: &Vec<u32>, mut next: impl FnMut() -> u32) -> Result<u32, Error> {
    for _ in 0..MAX_COLOR_ATTEMPTS {
        let candidate = next() & MAX_COLOR;
        if !used.iter().any(|c| c == candidate) {
            return Ok(candidate);
        }
    }
    Err(Error::ColorSpaceExhausted)
}

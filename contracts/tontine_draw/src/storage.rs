//! # Storage
//!
//! Typed helpers over the contract's instance storage. The whole tontine is
//! small (at most 24 participants), so it is kept as one value rather than one
//! entry per participant.
//!
//! | Key           | Type          | Description                           |
//! |---------------|---------------|---------------------------------------|
//! | `Organizer`   | `Address`     | Owner of the session, set by `init`   |
//! | `Session`     | `Session`     | Settings, participants, draw counters |
//! | `Preferences` | `Preferences` | Client flags (sound, tutorial)        |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Loading
//!
//! A missing session, or a stored value that no longer decodes as a
//! [`Session`], loads as a fresh empty session. Loading never fails.

use soroban_sdk::{contracttype, log, Address, Env, TryFromVal, Val};

use crate::types::{Preferences, Session};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    Organizer,
    Session,
    Preferences,
}

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

// ─────────────────────────────────────────────────────────
// Organizer
// ─────────────────────────────────────────────────────────

pub fn has_organizer(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Organizer)
}

pub fn get_organizer(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Organizer)
}

pub fn set_organizer(env: &Env, organizer: &Address) {
    env.storage().instance().set(&DataKey::Organizer, organizer);
    bump_instance(env);
}

// ─────────────────────────────────────────────────────────
// Session
// ─────────────────────────────────────────────────────────

/// Load the session, falling back to an empty one.
pub fn load_session(env: &Env) -> Session {
    let raw: Option<Val> = env.storage().instance().get(&DataKey::Session);
    let Some(raw) = raw else {
        return Session::new(env);
    };
    bump_instance(env);
    match Session::try_from_val(env, &raw) {
        Ok(session) => session,
        Err(_) => {
            log!(env, "stored session is unreadable, starting empty");
            Session::new(env)
        }
    }
}

pub fn save_session(env: &Env, session: &Session) {
    env.storage().instance().set(&DataKey::Session, session);
    bump_instance(env);
}

// ─────────────────────────────────────────────────────────
// Preferences
// ─────────────────────────────────────────────────────────

pub fn load_preferences(env: &Env) -> Preferences {
    env.storage()
        .instance()
        .get(&DataKey::Preferences)
        .unwrap_or_default()
}

pub fn save_preferences(env: &Env, preferences: &Preferences) {
    env.storage()
        .instance()
        .set(&DataKey::Preferences, preferences);
    bump_instance(env);
}

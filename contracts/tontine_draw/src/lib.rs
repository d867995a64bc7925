//! # Tontine Draw Contract
//!
//! Root crate of the **tontine draw engine**: participants join a rotating
//! savings circle, a random draw without replacement fixes who is paid in
//! which round, and each winner's payout date follows the configured
//! recurrence. The contract `TontineDraw` exposes the full session lifecycle:
//!
//! | Phase        | Entry Point(s)                                              |
//! |--------------|-------------------------------------------------------------|
//! | Bootstrap    | [`TontineDraw::init`]                                       |
//! | Settings     | [`TontineDraw::configure`], `settings`                      |
//! | Participants | `add_participant`, `rename_participant`, `edit_participant`, `remove_participant`, `reset_all` |
//! | Draw         | [`TontineDraw::draw`], [`TontineDraw::reveal`]              |
//! | Export       | `compute_results`, `export_report`, `missing_contacts`      |
//! | Queries      | `participants`, `participant`, `undrawn`, `last_winner`, `check_details` |
//!
//! ## Architecture
//!
//! Domain rules live in [`registry`], [`settings`], [`draw`] and [`export`],
//! all operating on one [`Session`] value. Persistence is delegated to
//! [`storage`]. This file loads the session, calls into those modules, saves
//! the session and emits events; it holds no business rules itself.
//!
//! Every entry point returning `Err` is rolled back by the host, so a
//! rejected operation never leaves a partial change behind.

#![no_std]

use soroban_sdk::{contract, contracterror, contractimpl, Address, Env, String, Vec};

pub mod calendar;
pub mod colors;
pub mod draw;
pub mod events;
pub mod export;
pub mod registry;
pub mod settings;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_events;

pub use types::{
    ContactMethod, Date, DetailField, ExportReport, Frequency, MaybeDate, Participant, ParticipantDetails,
    Preferences, ResultRow, Session, TontineSettings,
};

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    DuplicateName = 1,
    CapacityExceeded = 2,
    SettingsNotConfigured = 3,
    SettingsIncomplete = 4,
    SettingsLocked = 5,
    ValidationError = 6,
    DrawInProgress = 7,
    /// Soft: every participant is already drawn, nothing happened.
    NoEligibleParticipants = 8,
    ColorSpaceExhausted = 9,
    InternalInconsistency = 10,
    ParticipantNotFound = 11,
    NoDrawPending = 12,
    ScheduleOverflow = 13,
    AlreadyInitialized = 14,
    NotInitialized = 15,
    Unauthorized = 16,
}

#[contract]
pub struct TontineDraw;

#[contractimpl]
impl TontineDraw {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Bind the session to its organizer.
    ///
    /// Must be called exactly once after deployment; later calls fail with
    /// `Error::AlreadyInitialized`.
    pub fn init(env: Env, organizer: Address) -> Result<(), Error> {
        organizer.require_auth();
        if storage::has_organizer(&env) {
            return Err(Error::AlreadyInitialized);
        }
        storage::set_organizer(&env, &organizer);
        Ok(())
    }

    pub fn organizer(env: Env) -> Result<Address, Error> {
        storage::get_organizer(&env).ok_or(Error::NotInitialized)
    }

    // ─────────────────────────────────────────────────────────
    // Settings
    // ─────────────────────────────────────────────────────────

    /// Replace the tontine settings atomically.
    ///
    /// Fails with `SettingsLocked` once anyone has been drawn and with
    /// `ValidationError` for out-of-range values.
    pub fn configure(env: Env, organizer: Address, new: TontineSettings) -> Result<(), Error> {
        Self::require_organizer(&env, &organizer)?;
        let mut session = storage::load_session(&env);
        settings::configure(&mut session, new)?;
        storage::save_session(&env, &session);
        events::emit_settings_configured(&env, &session.settings);
        Ok(())
    }

    pub fn settings(env: Env) -> TontineSettings {
        storage::load_session(&env).settings
    }

    // ─────────────────────────────────────────────────────────
    // Participants
    // ─────────────────────────────────────────────────────────

    /// Add a participant with an initial contact method and value.
    pub fn add_participant(
        env: Env,
        organizer: Address,
        name: String,
        contact_method: ContactMethod,
        contact_value: String,
    ) -> Result<Participant, Error> {
        Self::require_organizer(&env, &organizer)?;
        let mut session = storage::load_session(&env);
        let participant =
            registry::add(&env, &mut session, name, contact_method, contact_value)?;
        storage::save_session(&env, &session);
        events::emit_participant_added(&env, &participant);
        Ok(participant)
    }

    /// Remove a participant. Refused while a draw is waiting to be revealed.
    pub fn remove_participant(env: Env, organizer: Address, id: u32) -> Result<(), Error> {
        Self::require_organizer(&env, &organizer)?;
        let mut session = storage::load_session(&env);
        let removed = registry::remove(&mut session, id)?;
        storage::save_session(&env, &session);
        events::emit_participant_removed(&env, removed.id);
        Ok(())
    }

    /// Rename a participant. Blank or unchanged names are ignored.
    pub fn rename_participant(
        env: Env,
        organizer: Address,
        id: u32,
        new_name: String,
    ) -> Result<Participant, Error> {
        Self::require_organizer(&env, &organizer)?;
        let mut session = storage::load_session(&env);
        let participant = registry::rename(&env, &mut session, id, new_name)?;
        storage::save_session(&env, &session);
        Ok(participant)
    }

    /// Set contact details and payout date. Use `check_details` to learn
    /// which fields a rejected edit was missing.
    pub fn edit_participant(
        env: Env,
        organizer: Address,
        id: u32,
        details: ParticipantDetails,
    ) -> Result<Participant, Error> {
        Self::require_organizer(&env, &organizer)?;
        let mut session = storage::load_session(&env);
        let participant = registry::edit(&env, &mut session, id, details)?;
        storage::save_session(&env, &session);
        Ok(participant)
    }

    pub fn check_details(env: Env, details: ParticipantDetails) -> Vec<DetailField> {
        registry::missing_fields(&env, &details)
    }

    /// Forget every participant, colour and draw. Settings are kept.
    pub fn reset_all(env: Env, organizer: Address) -> Result<(), Error> {
        Self::require_organizer(&env, &organizer)?;
        let mut session = storage::load_session(&env);
        registry::reset_all(&env, &mut session)?;
        storage::save_session(&env, &session);
        events::emit_session_reset(&env);
        Ok(())
    }

    pub fn participants(env: Env) -> Vec<Participant> {
        storage::load_session(&env).participants
    }

    pub fn participant(env: Env, id: u32) -> Result<Participant, Error> {
        storage::load_session(&env)
            .find(id)
            .ok_or(Error::ParticipantNotFound)
    }

    /// Participants still in the draw, in insertion order.
    pub fn undrawn(env: Env) -> Vec<Participant> {
        storage::load_session(&env).undrawn(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Draw
    // ─────────────────────────────────────────────────────────

    /// Pick the next winner uniformly among undrawn participants.
    ///
    /// The winner, its rank and its payout date are committed by this call;
    /// the returned value is the rank. The winner itself is handed out by
    /// [`TontineDraw::reveal`], and no other draw may start before that.
    pub fn draw(env: Env, organizer: Address) -> Result<u32, Error> {
        Self::require_organizer(&env, &organizer)?;
        let mut session = storage::load_session(&env);
        let rank = draw::draw(&env, &mut session)?;
        storage::save_session(&env, &session);
        Ok(rank)
    }

    /// Return the winner committed by the last `draw` and release the guard.
    pub fn reveal(env: Env, organizer: Address) -> Result<Participant, Error> {
        Self::require_organizer(&env, &organizer)?;
        let mut session = storage::load_session(&env);
        let winner = draw::reveal(&mut session)?;
        storage::save_session(&env, &session);
        events::emit_draw_completed(&env, &winner);
        Ok(winner)
    }

    pub fn is_draw_pending(env: Env) -> bool {
        storage::load_session(&env).pending_draw.is_some()
    }

    /// Most recently drawn participant, if any.
    pub fn last_winner(env: Env) -> Option<Participant> {
        draw::last_winner(&storage::load_session(&env))
    }

    // ─────────────────────────────────────────────────────────
    // Export
    // ─────────────────────────────────────────────────────────

    /// Drawn participants ordered by rank, with payout amount and date.
    pub fn compute_results(env: Env) -> Result<Vec<ResultRow>, Error> {
        export::compute_results(&env, &storage::load_session(&env))
    }

    /// Results stamped with the current ledger time, for the exporter.
    /// Fails with `ValidationError` until every drawn participant has a
    /// contact value; `missing_contacts` lists the ones to fix.
    pub fn export_report(env: Env) -> Result<ExportReport, Error> {
        export::export_report(&env, &storage::load_session(&env))
    }

    /// Drawn participants the exporter cannot list yet (no contact value).
    pub fn missing_contacts(env: Env) -> Vec<u32> {
        export::missing_contacts(&env, &storage::load_session(&env))
    }

    // ─────────────────────────────────────────────────────────
    // Client preferences
    // ─────────────────────────────────────────────────────────

    pub fn preferences(env: Env) -> Preferences {
        storage::load_preferences(&env)
    }

    pub fn set_preferences(
        env: Env,
        organizer: Address,
        preferences: Preferences,
    ) -> Result<(), Error> {
        Self::require_organizer(&env, &organizer)?;
        storage::save_preferences(&env, &preferences);
        Ok(())
    }

    // ─────────────────────────────────────────────────────────
    // Internal Helpers
    // ─────────────────────────────────────────────────────────

    fn require_organizer(env: &Env, caller: &Address) -> Result<(), Error> {
        caller.require_auth();
        let organizer = storage::get_organizer(env).ok_or(Error::NotInitialized)?;
        if *caller != organizer {
            return Err(Error::Unauthorized);
        }
        Ok(())
    }
}

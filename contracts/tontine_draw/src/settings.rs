//! # Tontine settings
//!
//! Seat count, contribution, recurrence and start date. Settings can be
//! replaced freely until the first draw; from then on the schedule is fixed
//! until `reset_all`.

use crate::types::{Session, TontineSettings};
use crate::Error;

pub const MIN_PARTICIPANTS: u32 = 2;
pub const MAX_PARTICIPANTS: u32 = 24;
/// Upper bound on the contribution so the payout (`(count - 1) * amount`)
/// can never overflow.
pub const MAX_AMOUNT: i128 = 1_000_000_000_000_000_000_000_000_000_000; // 10^30

/// Replace the session settings with `new`, all or nothing.
///
/// An amount of zero or a missing start date is accepted here; such
/// settings are simply incomplete and `draw` refuses to run on them.
pub fn configure(session: &mut Session, new: TontineSettings) -> Result<(), Error> {
    // `draw_count` stays set after a drawn participant is removed. `any_drawn`
    // also covers an unrevealed draw, whose winner is already marked drawn.
    if session.draw_count > 0 || session.any_drawn() {
        return Err(Error::SettingsLocked);
    }
    validate(&new, session.participants.len())?;
    session.settings = new;
    Ok(())
}

fn validate(settings: &TontineSettings, current_participants: u32) -> Result<(), Error> {
    if !(MIN_PARTICIPANTS..=MAX_PARTICIPANTS).contains(&settings.participant_count) {
        return Err(Error::ValidationError);
    }
    if settings.participant_count < current_participants {
        return Err(Error::ValidationError);
    }
    if settings.amount < 0 || settings.amount > MAX_AMOUNT {
        return Err(Error::ValidationError);
    }
    if !settings.frequency.is_valid() {
        return Err(Error::ValidationError);
    }
    if let Some(date) = settings.start_date.get() {
        if !date.is_valid() {
            return Err(Error::ValidationError);
        }
    }
    Ok(())
}

//! # Draw engine
//!
//! A draw is split in two calls:
//!
//! ```text
//! draw()   ── selects, ranks and schedules the winner, sets `pending_draw`
//! reveal() ── hands the winner to the presentation layer, clears `pending_draw`
//! ```
//!
//! The outcome is fixed by `draw`; `reveal` only releases it. While a draw is
//! pending, `draw`, `remove`, `reset_all` and `configure` are refused.
//! If `draw` fails half way the whole invocation is rolled back, so the guard
//! can never be left set by a failed draw.

use soroban_sdk::{log, Env};

use crate::types::{Date, MaybeDate, Participant, Session};
use crate::Error;

/// Commit the next winner and return the rank it was given.
pub fn draw(env: &Env, session: &mut Session) -> Result<u32, Error> {
    if session.pending_draw.is_some() {
        return Err(Error::DrawInProgress);
    }
    if !session.settings.is_complete() {
        return Err(Error::SettingsIncomplete);
    }

    let undrawn = session.undrawn(env);
    if undrawn.is_empty() {
        return Err(Error::NoEligibleParticipants);
    }

    // Uniform over the undrawn subset, no weighting.
    let pick = env.prng().gen_range::<u64>(0..undrawn.len() as u64) as u32;
    let mut winner = undrawn.get(pick).ok_or(Error::InternalInconsistency)?;

    let rank = session.draw_count + 1;
    let payout_date = payout_date_for(env, session, rank)?;

    winner.drawn = true;
    winner.rank = Some(rank);
    winner.payout_date = MaybeDate::Set(payout_date);

    let index = session
        .position(winner.id)
        .ok_or(Error::InternalInconsistency)?;
    session.participants.set(index, winner.clone());
    session.draw_count = rank;
    session.pending_draw = Some(winner.id);

    Ok(rank)
}

/// Release the committed winner.
pub fn reveal(session: &mut Session) -> Result<Participant, Error> {
    let id = session.pending_draw.ok_or(Error::NoDrawPending)?;
    session.pending_draw = None;
    session.find(id).ok_or(Error::InternalInconsistency)
}

/// Rank 1 is paid on the start date; every later rank one recurrence after
/// the payout date of the previous rank.
fn payout_date_for(env: &Env, session: &Session, rank: u32) -> Result<Date, Error> {
    let settings = &session.settings;
    if rank == 1 {
        return settings.start_date.get().ok_or(Error::SettingsIncomplete);
    }

    let previous = match session.find_by_rank(rank - 1).and_then(|p| p.payout_date.get()) {
        Some(date) => date,
        None => {
            log!(env, "no payout date for predecessor rank {}", rank - 1);
            return Err(Error::InternalInconsistency);
        }
    };
    settings
        .frequency
        .next_after(&previous)
        .ok_or(Error::ScheduleOverflow)
}

/// The most recently drawn participant, for highlighting.
pub fn last_winner(session: &Session) -> Option<Participant> {
    session
        .participants
        .iter()
        .filter(|p| p.drawn)
        .max_by_key(|p| p.rank)
}

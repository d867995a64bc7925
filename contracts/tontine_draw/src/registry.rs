//! # Participant registry
//!
//! Add, rename, edit and remove operations over [`Session::participants`].
//!
//! Names are compared after trimming and with Unicode lowercase folding, so
//! `"Élodie"` and `" élodie "` are the same participant. Text is handled in a
//! fixed stack buffer (`MAX_TEXT_LEN` bytes); longer values are rejected.

use soroban_sdk::{Env, String, Vec};

use crate::colors;
use crate::types::{ContactMethod, DetailField, MaybeDate, Participant, ParticipantDetails, Session};
use crate::Error;

pub const MAX_TEXT_LEN: usize = 128;

/// Borrow the UTF-8 contents of `s` through `buf`.
fn as_str<'a>(s: &String, buf: &'a mut [u8; MAX_TEXT_LEN]) -> Result<&'a str, Error> {
    let len = s.len() as usize;
    if len > MAX_TEXT_LEN {
        return Err(Error::ValidationError);
    }
    s.copy_into_slice(&mut buf[..len]);
    core::str::from_utf8(&buf[..len]).map_err(|_| Error::ValidationError)
}

/// Trimmed copy of `s`, or `ValidationError` if nothing is left.
fn normalize_name(env: &Env, s: &String) -> Result<String, Error> {
    let mut buf = [0u8; MAX_TEXT_LEN];
    let trimmed = as_str(s, &mut buf)?.trim();
    if trimmed.is_empty() {
        return Err(Error::ValidationError);
    }
    Ok(String::from_str(env, trimmed))
}

fn fold_eq(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

/// True if another participant (any but `except`) already uses `name`.
fn name_taken(session: &Session, name: &String, except: Option<u32>) -> Result<bool, Error> {
    let mut wanted_buf = [0u8; MAX_TEXT_LEN];
    let wanted = as_str(name, &mut wanted_buf)?;
    let mut other_buf = [0u8; MAX_TEXT_LEN];
    for p in session.participants.iter() {
        if Some(p.id) == except {
            continue;
        }
        if fold_eq(wanted, as_str(&p.name, &mut other_buf)?) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Trimmed contact value, or `None` when it is blank or not acceptable for
/// `method`. Phone numbers are kept as typed; only the character set is
/// checked (digits and the usual separators).
fn normalize_contact(env: &Env, method: &ContactMethod, value: &String) -> Option<String> {
    let mut buf = [0u8; MAX_TEXT_LEN];
    let trimmed = as_str(value, &mut buf).ok()?.trim();
    if trimmed.is_empty() {
        return None;
    }
    if *method == ContactMethod::Phone {
        let allowed = |c: char| c.is_ascii_digit() || " +-.()".contains(c);
        if !trimmed.chars().all(allowed) || !trimmed.chars().any(|c| c.is_ascii_digit()) {
            return None;
        }
    }
    Some(String::from_str(env, trimmed))
}

/// Append a new, undrawn participant.
///
/// Checks run in this order: settings configured, capacity, name, then
/// uniqueness. A blank `contact_value` is allowed at this stage.
pub fn add(
    env: &Env,
    session: &mut Session,
    name: String,
    contact_method: ContactMethod,
    contact_value: String,
) -> Result<Participant, Error> {
    if session.settings.participant_count == 0 {
        return Err(Error::SettingsNotConfigured);
    }
    if session.participants.len() >= session.settings.participant_count {
        return Err(Error::CapacityExceeded);
    }
    let name = normalize_name(env, &name)?;
    let contact_value = if contact_value.is_empty() {
        contact_value
    } else {
        normalize_contact(env, &contact_method, &contact_value).ok_or(Error::ValidationError)?
    };
    if name_taken(session, &name, None)? {
        return Err(Error::DuplicateName);
    }

    let color = colors::allocate(env, &session.used_colors)?;
    session.used_colors.push_back(color);

    let participant = Participant {
        id: session.next_id,
        name,
        color,
        drawn: false,
        rank: None,
        contact_method,
        contact_value,
        payout_date: MaybeDate::Unset,
    };
    session.next_id += 1;
    session.participants.push_back(participant.clone());
    Ok(participant)
}

/// Remove participant `id`.
///
/// Drawn participants may be removed too; nothing in the draw flow calls
/// this for them, and a later draw whose predecessor is gone fails with
/// `InternalInconsistency`.
pub fn remove(session: &mut Session, id: u32) -> Result<Participant, Error> {
    if session.pending_draw.is_some() {
        return Err(Error::DrawInProgress);
    }
    let index = session.position(id).ok_or(Error::ParticipantNotFound)?;
    let removed = session
        .participants
        .get(index)
        .ok_or(Error::ParticipantNotFound)?;
    session.participants.remove(index);
    Ok(removed)
}

/// Rename participant `id`. A blank or identical name leaves it unchanged.
pub fn rename(
    env: &Env,
    session: &mut Session,
    id: u32,
    new_name: String,
) -> Result<Participant, Error> {
    let index = session.position(id).ok_or(Error::ParticipantNotFound)?;
    let mut participant = session
        .participants
        .get(index)
        .ok_or(Error::ParticipantNotFound)?;

    let name = match normalize_name(env, &new_name) {
        Ok(name) => name,
        Err(_) => return Ok(participant),
    };
    if name == participant.name {
        return Ok(participant);
    }
    if name_taken(session, &name, Some(id))? {
        return Err(Error::DuplicateName);
    }

    participant.name = name;
    session.participants.set(index, participant.clone());
    Ok(participant)
}

/// Required sub-fields that `details` is missing or has in an unusable form.
pub fn missing_fields(env: &Env, details: &ParticipantDetails) -> Vec<DetailField> {
    let mut missing = Vec::new(env);
    if normalize_contact(env, &details.contact_method, &details.contact_value).is_none() {
        missing.push_back(DetailField::ContactValue);
    }
    match details.payout_date.get() {
        Some(date) if date.is_valid() => {}
        _ => missing.push_back(DetailField::PayoutDate),
    }
    missing
}

/// Replace the contact method, contact value and payout date of `id`.
pub fn edit(
    env: &Env,
    session: &mut Session,
    id: u32,
    details: ParticipantDetails,
) -> Result<Participant, Error> {
    let index = session.position(id).ok_or(Error::ParticipantNotFound)?;
    let mut participant = session
        .participants
        .get(index)
        .ok_or(Error::ParticipantNotFound)?;

    if !missing_fields(env, &details).is_empty() {
        return Err(Error::ValidationError);
    }
    participant.contact_value = normalize_contact(env, &details.contact_method, &details.contact_value)
        .ok_or(Error::ValidationError)?;
    participant.contact_method = details.contact_method;
    participant.payout_date = details.payout_date;

    session.participants.set(index, participant.clone());
    Ok(participant)
}

/// Drop every participant and the colour ledger. Settings are kept.
pub fn reset_all(env: &Env, session: &mut Session) -> Result<(), Error> {
    if session.pending_draw.is_some() {
        return Err(Error::DrawInProgress);
    }
    session.participants = Vec::new(env);
    session.used_colors = Vec::new(env);
    session.draw_count = 0;
    session.next_id = 0;
    Ok(())
}

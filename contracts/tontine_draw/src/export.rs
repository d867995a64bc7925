use soroban_sdk::{Env, Vec};

use crate::types::{ExportReport, ResultRow, Session};
use crate::Error;

/// Drawn participants as result rows, ascending by rank.
///
/// Pure read over the session: the same session always yields the same rows.
pub fn compute_results(env: &Env, session: &Session) -> Result<Vec<ResultRow>, Error> {
    let payout_amount = session.settings.payout_amount();
    let mut rows = Vec::new(env);
    // Ranks are dense, so walking 1..=draw_count is already sorted. A rank
    // whose holder was removed is skipped.
    for rank in 1..=session.draw_count {
        let Some(p) = session.find_by_rank(rank) else {
            continue;
        };
        let payout_date = p.payout_date.get().ok_or(Error::InternalInconsistency)?;
        rows.push_back(ResultRow {
            rank,
            name: p.name,
            contact_value: p.contact_value,
            payout_amount,
            payout_date,
        });
    }
    Ok(rows)
}

/// Results stamped with the ledger time. Refused with `ValidationError`
/// while any drawn participant has no contact value.
pub fn export_report(env: &Env, session: &Session) -> Result<ExportReport, Error> {
    if !missing_contacts(env, session).is_empty() {
        return Err(Error::ValidationError);
    }
    Ok(ExportReport {
        generated_at: env.ledger().timestamp(),
        rows: compute_results(env, session)?,
    })
}

/// Ids of drawn participants that still have no contact value.
pub fn missing_contacts(env: &Env, session: &Session) -> Vec<u32> {
    let mut ids = Vec::new(env);
    for p in session.participants.iter() {
        if p.drawn && p.contact_value.is_empty() {
            ids.push_back(p.id);
        }
    }
    ids
}

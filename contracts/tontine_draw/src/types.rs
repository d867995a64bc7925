//! # Types
//!
//! Shared data structures used across all modules of the tontine draw engine.
//!
//! ## Design decisions
//!
//! ### One session aggregate
//!
//! Settings, participants, the colour ledger and the draw counters live in a
//! single [`Session`] value. Every entry point loads it, mutates it, and saves
//! it back whole, so derived views (pie slices, export rows) are always
//! recomputed from one consistent snapshot and never stored.
//!
//! ### Participant lifecycle
//!
//! ```text
//! added ──► drawn (rank, payout_date assigned)
//!   └──► removed
//! drawn ──► removed        (policy, see `registry::remove`)
//! any   ──► gone           (reset_all)
//! ```
//!
//! `drawn` never goes back to `false` except through a full reset.

use soroban_sdk::{contracttype, Env, String, Vec};

/// How a winner is reached once drawn.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContactMethod {
    Phone,
    Email,
}

/// Sub-fields of [`ParticipantDetails`] that `edit_participant` requires.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DetailField {
    ContactValue,
    PayoutDate,
}

/// A calendar date (proleptic Gregorian). Arithmetic lives in `calendar.rs`.
///
/// Field order makes the derived `Ord` chronological.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub struct Date {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

/// A date that may not be known yet.
///
/// Stored form of an optional [`Date`]; `Option<Date>` has no ledger encoding.
/// Variant order keeps the derived `Ord` in line with `Option`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
pub enum MaybeDate {
    Unset,
    Set(Date),
}

impl MaybeDate {
    pub fn get(&self) -> Option<Date> {
        match self {
            MaybeDate::Unset => None,
            MaybeDate::Set(date) => Some(date.clone()),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, MaybeDate::Set(_))
    }
}

impl From<Date> for MaybeDate {
    fn from(date: Date) -> Self {
        MaybeDate::Set(date)
    }
}

impl From<Option<Date>> for MaybeDate {
    fn from(date: Option<Date>) -> Self {
        match date {
            Some(date) => MaybeDate::Set(date),
            None => MaybeDate::Unset,
        }
    }
}

/// Payout recurrence between two consecutive winners.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Frequency {
    /// Fixed number of days after the previous payout.
    Days(u32),
    /// Same day of the next calendar month, clamped to the month length.
    Monthly,
}

impl Frequency {
    /// Map the legacy frequency codes (`7`, `14`, `30`, ...) to a recurrence.
    /// Code `30` has always meant "monthly"; it is the only code that does not
    /// map to `Days`. `Days(30)` is refused by `configure`.
    pub fn from_code(code: u32) -> Self {
        if code == 30 {
            Frequency::Monthly
        } else {
            Frequency::Days(code)
        }
    }
}

/// Tontine configuration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TontineSettings {
    /// Seats in the tontine (2–24). `0` means "never configured".
    pub participant_count: u32,
    /// Contribution each member pays per round.
    pub amount: i128,
    pub frequency: Frequency,
    /// Payout date of the first winner.
    pub start_date: MaybeDate,
}

impl TontineSettings {
    pub fn unconfigured() -> Self {
        TontineSettings {
            participant_count: 0,
            amount: 0,
            frequency: Frequency::Days(7),
            start_date: MaybeDate::Unset,
        }
    }

    /// A draw may only run once count, amount and start date are all set.
    pub fn is_complete(&self) -> bool {
        self.participant_count > 0 && self.amount > 0 && self.start_date.is_set()
    }

    /// What each winner receives: every other member's contribution.
    pub fn payout_amount(&self) -> i128 {
        (self.participant_count.saturating_sub(1) as i128) * self.amount
    }
}

/// A member of the tontine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Participant {
    /// Session-unique handle, never reused before a reset.
    pub id: u32,
    /// Trimmed display name, unique ignoring case.
    pub name: String,
    /// `0xRRGGBB`, unique among every colour allocated this session.
    pub color: u32,
    pub drawn: bool,
    /// Draw order, `1..=draw_count`. `None` until drawn.
    pub rank: Option<u32>,
    pub contact_method: ContactMethod,
    /// May be empty until the organizer fills it in.
    pub contact_value: String,
    pub payout_date: MaybeDate,
}

/// Editable contact and schedule fields of a participant.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantDetails {
    pub contact_method: ContactMethod,
    pub contact_value: String,
    pub payout_date: MaybeDate,
}

/// The whole persisted state of one tontine.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Session {
    pub settings: TontineSettings,
    /// Insertion order is preserved.
    pub participants: Vec<Participant>,
    /// Every colour handed out since the last reset, removed members included.
    pub used_colors: Vec<u32>,
    /// Number of draws committed; also the highest rank assigned.
    pub draw_count: u32,
    pub next_id: u32,
    /// Id of the winner committed by `draw` and not yet revealed.
    pub pending_draw: Option<u32>,
}

impl Session {
    pub fn new(env: &Env) -> Self {
        Session {
            settings: TontineSettings::unconfigured(),
            participants: Vec::new(env),
            used_colors: Vec::new(env),
            draw_count: 0,
            next_id: 0,
            pending_draw: None,
        }
    }

    /// Position of participant `id` in the ordered list.
    pub fn position(&self, id: u32) -> Option<u32> {
        self.participants.iter().position(|p| p.id == id).map(|i| i as u32)
    }

    pub fn find(&self, id: u32) -> Option<Participant> {
        self.participants.iter().find(|p| p.id == id)
    }

    pub fn find_by_rank(&self, rank: u32) -> Option<Participant> {
        self.participants.iter().find(|p| p.rank == Some(rank))
    }

    pub fn any_drawn(&self) -> bool {
        self.participants.iter().any(|p| p.drawn)
    }

    pub fn undrawn(&self, env: &Env) -> Vec<Participant> {
        let mut out = Vec::new(env);
        for p in self.participants.iter() {
            if !p.drawn {
                out.push_back(p);
            }
        }
        out
    }
}

/// One line of the exported results.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ResultRow {
    pub rank: u32,
    pub name: String,
    pub contact_value: String,
    pub payout_amount: i128,
    pub payout_date: Date,
}

/// Export projection stamped with the ledger time it was generated at.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExportReport {
    pub generated_at: u64,
    pub rows: Vec<ResultRow>,
}

/// Client-side flags stored alongside the session. The engine never reads them.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Preferences {
    pub sound_enabled: bool,
    pub tutorial_completed: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            sound_enabled: true,
            tutorial_completed: false,
        }
    }
}

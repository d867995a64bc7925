use soroban_sdk::{contracttype, symbol_short, Env, String};

use crate::types::{MaybeDate, Participant, TontineSettings};

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParticipantAdded {
    pub participant_id: u32,
    pub name: String,
    pub color: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DrawCompleted {
    pub participant_id: u32,
    pub name: String,
    pub rank: u32,
    pub payout_date: MaybeDate,
}

pub fn emit_participant_added(env: &Env, participant: &Participant) {
    let topics = (symbol_short!("added"), participant.id);
    let data = ParticipantAdded {
        participant_id: participant.id,
        name: participant.name.clone(),
        color: participant.color,
    };
    env.events().publish(topics, data);
}

pub fn emit_draw_completed(env: &Env, winner: &Participant) {
    let topics = (symbol_short!("drawn"), winner.id);
    let data = DrawCompleted {
        participant_id: winner.id,
        name: winner.name.clone(),
        rank: winner.rank.unwrap_or(0),
        payout_date: winner.payout_date.clone(),
    };
    env.events().publish(topics, data);
}

pub fn emit_participant_removed(env: &Env, participant_id: u32) {
    env.events()
        .publish((symbol_short!("removed"), participant_id), ());
}

pub fn emit_settings_configured(env: &Env, settings: &TontineSettings) {
    env.events()
        .publish((symbol_short!("settings"),), settings.clone());
}

pub fn emit_session_reset(env: &Env) {
    env.events().publish((symbol_short!("reset"),), ());
}

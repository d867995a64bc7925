
#![allow(dead_code)]

extern crate std;

use std::vec::Vec;

use crate::types::{Participant, ResultRow};

fn lowercase(p: &Participant) -> std::string::String {
    let mut buf = std::vec![0u8; p.name.len() as usize];
    p.name.copy_into_slice(&mut buf);
    std::string::String::from_utf8(buf).unwrap().to_lowercase()
}

/// INV-1: No two participants share a name, ignoring case.
pub fn assert_unique_names(participants: &[Participant]) {
    for (i, a) in participants.iter().enumerate() {
        for b in &participants[i + 1..] {
            assert_ne!(
                lowercase(a),
                lowercase(b),
                "INV-1 violated: participants {} and {} share a name",
                a.id,
                b.id
            );
        }
    }
}

/// INV-2: No two participants share a colour.
pub fn assert_unique_colors(participants: &[Participant]) {
    for (i, a) in participants.iter().enumerate() {
        for b in &participants[i + 1..] {
            assert_ne!(
                a.color, b.color,
                "INV-2 violated: participants {} and {} share colour {:06x}",
                a.id, b.id, a.color
            );
        }
    }
}

/// INV-3: Ranks among drawn participants are exactly `1..=k`.
pub fn assert_dense_ranks(participants: &[Participant], k: u32) {
    let mut ranks: Vec<u32> = participants.iter().filter_map(|p| p.rank).collect();
    ranks.sort_unstable();
    let expected: Vec<u32> = (1..=k).collect();
    assert_eq!(ranks, expected, "INV-3 violated: ranks are not dense");
}

/// INV-4: `drawn`, `rank` and `payout_date` are set together or not at all.
pub fn assert_draw_fields_consistent(participant: &Participant) {
    assert_eq!(
        participant.drawn,
        participant.rank.is_some(),
        "INV-4 violated: participant {} drawn={} rank={:?}",
        participant.id,
        participant.drawn,
        participant.rank
    );
    if participant.drawn {
        assert!(
            participant.payout_date.is_set(),
            "INV-4 violated: drawn participant {} has no payout date",
            participant.id
        );
    }
}

/// INV-5: Payout dates never go backwards with rank.
pub fn assert_dates_follow_rank(participants: &[Participant]) {
    let mut drawn: Vec<&Participant> = participants.iter().filter(|p| p.drawn).collect();
    drawn.sort_by_key(|p| p.rank);
    for pair in drawn.windows(2) {
        assert!(
            pair[0].payout_date < pair[1].payout_date,
            "INV-5 violated: rank {:?} is not paid before rank {:?}",
            pair[0].rank,
            pair[1].rank
        );
    }
}

/// INV-6: Export rows are sorted by rank and all carry the same amount.
pub fn assert_rows_ordered(rows: &[ResultRow], payout_amount: i128) {
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.rank, i as u32 + 1, "INV-6 violated: row {} out of order", i);
        assert_eq!(
            row.payout_amount, payout_amount,
            "INV-6 violated: row {} has payout {}",
            i, row.payout_amount
        );
    }
}

/// Run every participant-level invariant over a snapshot.
pub fn assert_all_session_invariants(participants: &[Participant], draws: u32) {
    assert_unique_names(participants);
    assert_unique_colors(participants);
    assert_dense_ranks(participants, draws);
    assert_dates_follow_rank(participants);
    for p in participants {
        assert_draw_fields_consistent(p);
    }
}

/// Copy a contract vector into a std vector for slice-based checks.
pub fn snapshot(participants: &soroban_sdk::Vec<Participant>) -> Vec<Participant> {
    participants.iter().collect()
}

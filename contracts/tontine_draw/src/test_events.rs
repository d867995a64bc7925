extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, Symbol, TryIntoVal,
};

use crate::events::{DrawCompleted, ParticipantAdded};
use crate::{
    ContactMethod, Date, Frequency, MaybeDate, TontineDraw, TontineDrawClient, TontineSettings,
};

fn setup_configured() -> (Env, TontineDrawClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(TontineDraw, ());
    let client = TontineDrawClient::new(&env, &contract_id);
    let organizer = Address::generate(&env);
    client.init(&organizer);
    client.configure(&organizer, &settings());
    (env, client, organizer)
}

fn settings() -> TontineSettings {
    TontineSettings {
        participant_count: 4,
        amount: 100,
        frequency: Frequency::Days(7),
        start_date: MaybeDate::Set(Date::new(2024, 1, 1)),
    }
}

fn add(env: &Env, client: &TontineDrawClient, organizer: &Address, name: &str) -> u32 {
    client
        .add_participant(
            organizer,
            &String::from_str(env, name),
            &ContactMethod::Email,
            &String::from_str(env, ""),
        )
        .id
}

fn count_with_topic(env: &Env, topic: Symbol) -> usize {
    env.events()
        .all()
        .iter()
        .filter(|(_, topics, _)| {
            let first: Option<Symbol> = topics.get(0).and_then(|t| t.try_into_val(env).ok());
            first == Some(topic.clone())
        })
        .count()
}

#[test]
fn test_settings_event() {
    let (env, client, _organizer) = setup_configured();

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("settings").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TontineSettings = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, settings());
}

#[test]
fn test_participant_added_event() {
    let (env, client, organizer) = setup_configured();
    let participant = client.add_participant(
        &organizer,
        &String::from_str(&env, "  Ana "),
        &ContactMethod::Phone,
        &String::from_str(&env, "0612345678"),
    );

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("added"), participant_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("added").into_val(&env),
        participant.id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ParticipantAdded = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        ParticipantAdded {
            participant_id: participant.id,
            name: String::from_str(&env, "Ana"),
            color: participant.color,
        }
    );
}

#[test]
fn test_draw_completed_emitted_on_reveal_only() {
    let (env, client, organizer) = setup_configured();
    add(&env, &client, &organizer, "Ana");
    add(&env, &client, &organizer, "Ben");

    client.draw(&organizer);
    assert_eq!(count_with_topic(&env, symbol_short!("drawn")), 0);

    let winner = client.reveal(&organizer);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("drawn"), participant_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("drawn").into_val(&env),
        winner.id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: DrawCompleted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        event_data,
        DrawCompleted {
            participant_id: winner.id,
            name: winner.name.clone(),
            rank: 1,
            payout_date: MaybeDate::Set(Date::new(2024, 1, 1)),
        }
    );
}

#[test]
fn test_rejected_draw_emits_nothing() {
    let (env, client, organizer) = setup_configured();
    let _ = client.try_reveal(&organizer);
    let _ = client.try_draw(&organizer);
    assert_eq!(count_with_topic(&env, symbol_short!("drawn")), 0);
}

#[test]
fn test_participant_removed_event() {
    let (env, client, organizer) = setup_configured();
    let id = add(&env, &client, &organizer, "Ana");
    client.remove_participant(&organizer, &id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("removed").into_val(&env),
        id.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);
}

#[test]
fn test_session_reset_event() {
    let (env, client, organizer) = setup_configured();
    add(&env, &client, &organizer, "Ana");
    client.reset_all(&organizer);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("reset").into_val(&env)];
    assert_eq!(last_event.1, expected_topics);
}

mod utils;

use paperdate::{
    ErrorKind, GameError, GameEvent, GameStatus, GatewayError, RoundAdvance, SubmissionAck,
};
use utils::{count_of, drain, significant_types, TestSetupBuilder};

const SEVEN_SCORES: [u32; 7] = [100, 87, 0, 45, 100, 62, 13];

#[tokio::test]
async fn full_game_ends_after_seven_rounds() {
    let mut setup = TestSetupBuilder::new()
        .with_scores(SEVEN_SCORES.to_vec())
        .build()
        .await;
    let controller = &mut setup.controller;

    controller.start_game().await.unwrap();

    for round in 1..=7u32 {
        assert_eq!(controller.status(), GameStatus::AwaitingGuess);
        assert_eq!(controller.current_round(), round);
        assert_eq!(controller.ledger().len() as u32, round - 1);

        let outcome = controller.submit_guess("2016-04-10").await.unwrap();
        assert_eq!(outcome.round_index, round);
        assert_eq!(outcome.score, SEVEN_SCORES[round as usize - 1]);
        assert_eq!(controller.ledger().len() as u32, round);

        let expected_total: u32 = SEVEN_SCORES[..round as usize].iter().sum();
        assert_eq!(controller.ledger().total(), expected_total);

        controller.advance_round().await.unwrap();
    }

    controller.wait_for_submission().await;

    let final_total: u32 = SEVEN_SCORES.iter().sum();
    assert_eq!(controller.status(), GameStatus::GameOver);
    assert_eq!(controller.ledger().entries().len(), 7);
    assert_eq!(controller.ledger().total(), final_total);
    assert_eq!(setup.gateway.fetch_calls().await, 7);
    assert_eq!(setup.gateway.submitted_totals().await, vec![final_total]);

    let events = drain(&mut setup.events);
    assert_eq!(count_of(&events, "challenge_ready"), 7);
    assert_eq!(count_of(&events, "round_resolved"), 7);
    assert_eq!(count_of(&events, "game_over"), 1);

    let (total, rounds) = events
        .iter()
        .find_map(|e| match e {
            GameEvent::GameOver {
                final_total,
                rounds,
                ..
            } => Some((*final_total, rounds.clone())),
            _ => None,
        })
        .expect("game over event should be emitted");
    assert_eq!(total, final_total);
    assert_eq!(rounds.len(), 7);
    assert_eq!(
        rounds.iter().map(|r| r.round_index).collect::<Vec<_>>(),
        (1..=7).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn last_advance_never_fetches_another_paper() {
    let mut setup = TestSetupBuilder::new()
        .with_total_rounds(2)
        .with_scores(vec![10, 20])
        .build()
        .await;
    let controller = &mut setup.controller;

    controller.start_game().await.unwrap();
    controller.submit_guess("2015-01-01").await.unwrap();
    assert_eq!(
        controller.advance_round().await.unwrap(),
        RoundAdvance::NextRound { round: 2 }
    );
    controller.submit_guess("2015-01-01").await.unwrap();
    assert_eq!(
        controller.advance_round().await.unwrap(),
        RoundAdvance::GameOver { final_total: 30 }
    );

    assert_eq!(setup.gateway.fetch_calls().await, 2);
}

#[tokio::test]
async fn round_events_arrive_in_lifecycle_order() {
    let mut setup = TestSetupBuilder::new()
        .with_total_rounds(1)
        .with_scores(vec![100])
        .with_paper("Deep residual learning", "2015-12-10")
        .build()
        .await;

    setup.controller.start_game().await.unwrap();
    setup.controller.submit_guess("2015-12-01").await.unwrap();
    setup.controller.advance_round().await.unwrap();
    setup.controller.wait_for_submission().await;

    let events = drain(&mut setup.events);
    assert_eq!(
        significant_types(&events),
        vec![
            "challenge_ready",
            "round_resolved",
            "game_over",
            "score_submitted"
        ]
    );

    let transitions: Vec<(GameStatus, GameStatus)> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::StatusChanged { from, to, .. } => Some((*from, *to)),
            _ => None,
        })
        .collect();
    assert_eq!(
        transitions,
        vec![
            (GameStatus::Idle, GameStatus::AwaitingPaper),
            (GameStatus::AwaitingPaper, GameStatus::AwaitingGuess),
            (GameStatus::AwaitingGuess, GameStatus::RoundResolved),
            (GameStatus::RoundResolved, GameStatus::GameOver),
        ]
    );

    let outcome = events
        .iter()
        .find_map(|e| match e {
            GameEvent::RoundResolved { outcome, .. } => Some(outcome.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(outcome.difference_days, 9);
    assert_eq!(
        outcome.summary(),
        "Round 1: You guessed December 1, 2015, actual was December 10, 2015 (100 points)"
    );
}

#[tokio::test]
async fn challenge_event_never_reveals_the_answer() {
    let mut setup = TestSetupBuilder::new()
        .with_paper("Secret abstract", "2013-08-21")
        .build()
        .await;

    setup.controller.start_game().await.unwrap();

    for event in drain(&mut setup.events) {
        let json = serde_json::to_string(&event).unwrap();
        assert!(!json.contains("2013-08"), "leaked answer in {json}");
    }
}

#[tokio::test]
async fn out_of_range_guesses_are_rejected_until_valid() {
    let mut setup = TestSetupBuilder::new().with_scores(vec![55]).build().await;
    let controller = &mut setup.controller;
    controller.start_game().await.unwrap();

    for guess in ["2009-12-31", "2024-03-16", "2030-01-01", "15/03/2020"] {
        let result = controller.submit_guess(guess).await;
        assert!(
            matches!(result, Err(GameError::InvalidGuess(_))),
            "{guess} should be rejected"
        );
        assert_eq!(controller.status(), GameStatus::AwaitingGuess);
    }
    assert!(setup.gateway.guesses().await.is_empty());

    let outcome = controller.submit_guess("2024-03-15").await.unwrap();
    assert_eq!(outcome.score, 55);

    let errors = drain(&mut setup.events)
        .into_iter()
        .filter(|e| {
            matches!(
                e,
                GameEvent::Error {
                    kind: ErrorKind::InvalidGuess,
                    ..
                }
            )
        })
        .count();
    assert_eq!(errors, 4);
}

#[tokio::test]
async fn unavailable_paper_can_be_retried() {
    let mut setup = TestSetupBuilder::new().build().await;
    setup.gateway.fail_next_fetch().await;

    let result = setup.controller.start_game().await;
    assert!(matches!(result, Err(GameError::ChallengeUnavailable(_))));
    assert_eq!(setup.controller.status(), GameStatus::AwaitingPaper);

    // Guessing is still illegal while the paper is missing
    assert!(matches!(
        setup.controller.submit_guess("2020-01-01").await,
        Err(GameError::InvalidState { .. })
    ));

    setup.controller.retry_challenge().await.unwrap();
    assert_eq!(setup.controller.status(), GameStatus::AwaitingGuess);
    assert_eq!(setup.gateway.fetch_calls().await, 2);
}

#[tokio::test]
async fn high_score_event_reaches_subscribers() {
    let mut setup = TestSetupBuilder::new()
        .with_total_rounds(1)
        .with_scores(vec![91])
        .build()
        .await;
    setup
        .gateway
        .set_submission(Ok(SubmissionAck::from_message("New high score!")))
        .await;

    setup.controller.start_game().await.unwrap();
    setup.controller.submit_guess("2016-04-01").await.unwrap();
    setup.controller.advance_round().await.unwrap();
    setup.controller.wait_for_submission().await;

    let events = drain(&mut setup.events);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::NewHighScore { total: 91, .. })));
}

#[tokio::test]
async fn failed_submission_still_shows_game_over() {
    let mut setup = TestSetupBuilder::new()
        .with_total_rounds(1)
        .with_scores(vec![5])
        .build()
        .await;
    setup
        .gateway
        .set_submission(Err(GatewayError::Transport("connection reset".into())))
        .await;

    setup.controller.start_game().await.unwrap();
    setup.controller.submit_guess("2016-04-01").await.unwrap();
    let advance = setup.controller.advance_round().await.unwrap();
    setup.controller.wait_for_submission().await;

    assert_eq!(advance, RoundAdvance::GameOver { final_total: 5 });
    assert_eq!(setup.controller.status(), GameStatus::GameOver);

    let events = drain(&mut setup.events);
    assert_eq!(count_of(&events, "game_over"), 1);
    assert!(events.iter().any(|e| matches!(
        e,
        GameEvent::Error {
            kind: ErrorKind::ScoreSubmissionFailed,
            ..
        }
    )));
}

#[tokio::test]
async fn subscription_handler_sees_the_same_events() {
    let mut setup = TestSetupBuilder::new()
        .with_total_rounds(1)
        .with_scores(vec![40])
        .build()
        .await;

    setup.controller.start_game().await.unwrap();
    setup.controller.submit_guess("2016-04-01").await.unwrap();
    setup.controller.advance_round().await.unwrap();
    setup.controller.wait_for_submission().await;

    let expected = drain(&mut setup.events);

    // Dropping the controller closes the bus, which ends the subscription task
    drop(setup.controller);
    setup._subscription_handle.await.unwrap();

    assert_eq!(setup.recorder.events().await, expected);
}

#[tokio::test]
async fn game_over_total_reaches_the_service_once() {
    let mut setup = TestSetupBuilder::new()
        .with_total_rounds(1)
        .with_scores(vec![42])
        .build()
        .await;

    setup.controller.start_game().await.unwrap();
    setup.controller.submit_guess("2016-04-01").await.unwrap();
    setup.controller.advance_round().await.unwrap();

    for _ in 0..2 {
        assert!(matches!(
            setup.controller.finalize_score(),
            Err(GameError::InvalidState { .. })
        ));
    }
    setup.controller.wait_for_submission().await;

    assert_eq!(setup.gateway.submitted_totals().await, vec![42]);
    assert_eq!(count_of(&drain(&mut setup.events), "score_submitted"), 1);
}

//! Place-value game integration tests.

use coin_drill::core::{GameRng, Millis, RandomSource, ScriptedRng};
use coin_drill::games::place_value::{
    builtin_place_levels, PlaceEvent, PlacePhase, PlaceResponse, PlaceValueSession,
    CORRECT_PAUSE_MS, TOTAL_QUESTIONS, WRONG_PAUSE_MS,
};
use coin_drill::Outcome;

fn started<R: RandomSource>(
    mut session: PlaceValueSession<R>,
    level: usize,
) -> PlaceValueSession<R> {
    session.handle(PlaceEvent::SelectLevel(level), Millis(0));
    session.handle(PlaceEvent::Start, Millis(0));
    session
}

/// Type the correct answer, skipping leading zero columns.
fn answer<R: RandomSource>(session: &mut PlaceValueSession<R>, now: Millis) -> PlaceResponse {
    let question = session.question().unwrap().clone();
    let first = question.first_significant();
    session.handle(PlaceEvent::Focus(first), now);
    for &digit in &question.digits[first..] {
        session.handle(PlaceEvent::Digit(digit), now);
    }
    session.handle(PlaceEvent::Submit, now)
}

/// Hundreds 0, tens 4, ones 7: hundreds left empty.
#[test]
fn test_forty_seven_on_three_columns() {
    let rng = ScriptedRng::new(vec![0, 4, 7]);
    let session = PlaceValueSession::with_rng(builtin_place_levels(), rng);
    let mut session = started(session, 2);
    assert_eq!(session.question().unwrap().digits, vec![0, 4, 7]);

    session.handle(PlaceEvent::Focus(1), Millis(100));
    session.handle(PlaceEvent::Digit(4), Millis(200));
    session.handle(PlaceEvent::Digit(7), Millis(300));
    assert_eq!(session.pad().preview(), "47");

    assert_eq!(
        session.handle(PlaceEvent::Submit, Millis(400)),
        PlaceResponse::Checked(Outcome::Correct)
    );
    assert_eq!(session.feedback(Millis(500)), Some(Outcome::Correct));
    assert_eq!(session.handle(PlaceEvent::Digit(1), Millis(500)), PlaceResponse::Ignored);
    assert_eq!(
        session.handle(PlaceEvent::Poll, Millis(400 + CORRECT_PAUSE_MS)),
        PlaceResponse::NewQuestion { number: 2 }
    );
}

/// An explicit 0 in the leading column fails the whole answer.
#[test]
fn test_explicit_leading_zero_is_wrong() {
    let rng = ScriptedRng::new(vec![0, 4, 7]);
    let session = PlaceValueSession::with_rng(builtin_place_levels(), rng);
    let mut session = started(session, 2);

    for digit in [0, 4, 7] {
        session.handle(PlaceEvent::Digit(digit), Millis(0));
    }
    assert_eq!(session.pad().preview(), "047");
    assert_eq!(
        session.handle(PlaceEvent::Submit, Millis(0)),
        PlaceResponse::Checked(Outcome::Incorrect)
    );
    assert_eq!(session.handle(PlaceEvent::Poll, Millis(WRONG_PAUSE_MS)), PlaceResponse::Cleared);
    assert_eq!(session.pad().preview(), "");
    assert_eq!(session.phase(), PlacePhase::Question { number: 1 });
}

/// Ten questions, then the result carries the stopwatch at the last pause.
#[test]
fn test_full_game_and_retry() {
    let mut session = started(PlaceValueSession::new(builtin_place_levels(), 31), 3);

    for n in 1..=TOTAL_QUESTIONS {
        assert_eq!(session.phase(), PlacePhase::Question { number: n });
        let submit_at = Millis(n as u64 * 2_000);
        assert_eq!(answer(&mut session, submit_at), PlaceResponse::Checked(Outcome::Correct));

        let poll_at = if n == TOTAL_QUESTIONS {
            Millis(25_000)
        } else {
            submit_at.after(CORRECT_PAUSE_MS)
        };
        let response = session.handle(PlaceEvent::Poll, poll_at);
        if n < TOTAL_QUESTIONS {
            assert_eq!(response, PlaceResponse::NewQuestion { number: n + 1 });
        } else {
            assert_eq!(response, PlaceResponse::Finished { elapsed_tenths: 210 });
        }
    }

    assert_eq!(session.phase(), PlacePhase::Result { elapsed_tenths: 210 });
    assert_eq!(session.elapsed_display(Millis(90_000)), "21.0");

    assert_eq!(
        session.handle(PlaceEvent::Retry, Millis(100_000)),
        PlaceResponse::NewQuestion { number: 1 }
    );
    assert_eq!(session.selected_level(), Some(3));
    assert_eq!(session.elapsed_tenths(Millis(100_500)), 5);
}

/// Back in the middle of a game freezes the stopwatch.
#[test]
fn test_back_abandons_game() {
    let mut session = started(PlaceValueSession::new(builtin_place_levels(), 8), 0);
    answer(&mut session, Millis(1_000));

    assert_eq!(session.handle(PlaceEvent::Back, Millis(1_500)), PlaceResponse::BackToSelect);
    assert_eq!(session.handle(PlaceEvent::Poll, Millis(5_000)), PlaceResponse::Ignored);
    assert_eq!(session.phase(), PlacePhase::LevelSelect);
    assert_eq!(session.elapsed_tenths(Millis(9_000)), 15);

    assert_eq!(
        session.handle(PlaceEvent::SelectLevel(1), Millis(6_000)),
        PlaceResponse::LevelSelected(1)
    );
    assert_eq!(
        session.handle(PlaceEvent::Start, Millis(6_000)),
        PlaceResponse::NewQuestion { number: 1 }
    );
    assert_eq!(session.pad().len(), 2);
}

/// Consecutive questions never share the same digits.
#[test]
fn test_consecutive_questions_differ() {
    let mut session = started(PlaceValueSession::new(builtin_place_levels(), 12), 0);
    let mut previous = session.question().unwrap().digits.clone();
    let mut now = Millis(0);

    for _ in 1..TOTAL_QUESTIONS {
        now = now.after(2_000);
        answer(&mut session, now);
        session.handle(PlaceEvent::Poll, now.after(CORRECT_PAUSE_MS));
        let digits = session.question().unwrap().digits.clone();
        assert_ne!(digits, previous);
        assert!(digits.iter().any(|&d| d != 0));
        previous = digits;
    }
}

/// Level 2 shows every digit of 5 or more with a half coin.
#[test]
fn test_half_coin_level() {
    let mut rng = GameRng::new(6);
    let level = &builtin_place_levels()[1];
    for _ in 0..100 {
        let digits = level.draw_digits(&mut rng);
        assert_eq!(digits.len(), 2);
        assert!(digits.iter().any(|&d| d != 0));
    }

    let session = PlaceValueSession::with_rng(builtin_place_levels(), ScriptedRng::new(vec![8, 6]));
    let session = started(session, 1);
    let question = session.question().unwrap();
    assert_eq!(question.value(), 86);
    assert!(question.coins.iter().all(|c| c.half == 1));
    assert_eq!(question.coins[0].base, 3);
    assert_eq!(question.coins[1].base, 1);
}

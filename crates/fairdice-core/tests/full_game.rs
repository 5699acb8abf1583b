//! End-to-end games over scripted input and entropy.
//!
//! Each test runs a whole session against in-memory buffers: the entropy
//! source pops scripted draws, stdin is a byte slice, and the transcript
//! is checked for the commit-before-answer and reveal lines.

use fairdice_core::{
    parse_dice, CommitKey, Commitment, GameReport, GameSession, MockEntropy, Player, RollResult,
    SessionEnd,
};

const MOCK_KEY: [u8; 32] = [7u8; 32];

fn canonical_dice() -> Vec<fairdice_core::Die> {
    parse_dice(&["2,2,4,4,9,9", "1,1,6,6,8,8", "3,3,5,5,7,7"]).unwrap()
}

fn play(
    dice: Vec<fairdice_core::Die>,
    entropy_values: &[u64],
    input: &str,
) -> (SessionEnd, String) {
    let entropy = MockEntropy::with_key(MOCK_KEY, entropy_values.iter().copied());
    let mut transcript = Vec::new();
    let session = GameSession::new(dice, entropy, input.as_bytes(), &mut transcript);
    let end = session.run().unwrap();
    (end, String::from_utf8(transcript).unwrap())
}

#[test]
fn test_human_moves_first_and_wins() {
    // Flip secret 0, guess 0 -> result 0 -> human first.
    // Human takes die 0, computer draws 1 from the two remaining -> die 2.
    // Human roll: secret 2 + answer 3 -> index 5 -> face 9.
    // Computer roll: secret 1 + drawn answer 4 -> index 5 -> face 7.
    let (end, transcript) = play(canonical_dice(), &[0, 1, 2, 1, 4], "0\n0\n3\n");

    assert_eq!(
        end,
        SessionEnd::Completed(GameReport {
            first_mover: Player::Human,
            human_die: 0,
            computer_die: 2,
            human_roll: 9,
            computer_roll: 7,
            result: RollResult::Win(Player::Human),
        })
    );
    assert!(transcript.contains("You win (9 > 7)!"));
}

#[test]
fn test_computer_moves_first_and_wins() {
    // Flip secret 1, guess 0 -> result 1 -> computer first.
    // Computer draws 0 -> die 0; human takes menu option 1 of the
    // remaining pool -> die 2.
    // Computer roll: secret 3 + drawn answer 1 -> index 4 -> face 9.
    // Human roll: secret 5 + answer 1 -> index 0 -> face 3.
    let (end, transcript) = play(canonical_dice(), &[1, 0, 3, 1, 5], "0\n1\n1\n");

    assert_eq!(
        end,
        SessionEnd::Completed(GameReport {
            first_mover: Player::Computer,
            human_die: 2,
            computer_die: 0,
            human_roll: 3,
            computer_roll: 9,
            result: RollResult::Win(Player::Computer),
        })
    );
    assert!(transcript.contains("I make the first move."));
    assert!(transcript.contains("I win (9 > 3)."));
}

#[test]
fn test_equal_rolls_are_a_tie() {
    let dice = parse_dice(&["3,3,3", "3,3,3", "1,2,3"]).unwrap();
    let (end, transcript) = play(dice, &[0, 0, 0, 0, 0], "0\n0\n0\n");

    match end {
        SessionEnd::Completed(report) => {
            assert_eq!(report.result, RollResult::Tie);
            assert_eq!(report.human_roll, report.computer_roll);
        }
        other => panic!("expected a completed game, got {other:?}"),
    }
    assert!(transcript.contains("It's a tie (3 = 3)."));
}

#[test]
fn test_digest_is_shown_before_the_answer_and_verifies() {
    let (_, transcript) = play(canonical_dice(), &[0, 1, 2, 1, 4], "0\n0\n3\n");

    // The flip committed to secret 0 under the mock key; the transcript
    // must show exactly that digest before the first prompt, and the
    // matching key in the reveal line.
    let digest = Commitment::new(&CommitKey::from_bytes(MOCK_KEY), 0).to_string();
    let digest_at = transcript
        .find(&format!("HMAC={digest}"))
        .expect("flip digest missing from transcript");
    let prompt_at = transcript
        .find("Your selection:")
        .expect("prompt missing from transcript");
    assert!(digest_at < prompt_at, "digest must precede the user's answer");

    let key_rendering = CommitKey::from_bytes(MOCK_KEY).to_string();
    assert!(transcript.contains(&format!("My selection: 0 (KEY={key_rendering}).")));

    // The roll commitments verify against their revealed secrets too.
    for secret in [2u64, 1] {
        let roll_digest = Commitment::new(&CommitKey::from_bytes(MOCK_KEY), secret);
        assert!(transcript.contains(&format!("HMAC={roll_digest}")));
        assert!(roll_digest.verify(&CommitKey::from_bytes(MOCK_KEY), secret));
    }
}

#[test]
fn test_exit_at_first_prompt_ends_quietly() {
    let (end, transcript) = play(canonical_dice(), &[0], "x\n");
    assert_eq!(end, SessionEnd::Exited);
    assert!(!transcript.contains("win"));
}

#[test]
fn test_exit_mid_selection() {
    // Computer first, picks a die, then the human bails out of the menu.
    let (end, _) = play(canonical_dice(), &[1, 0], "0\nX\n");
    assert_eq!(end, SessionEnd::Exited);
}

#[test]
fn test_end_of_input_counts_as_exit() {
    let (end, _) = play(canonical_dice(), &[0], "");
    assert_eq!(end, SessionEnd::Exited);
}

#[test]
fn test_help_redisplays_table_without_consuming_the_turn() {
    let (end, transcript) = play(canonical_dice(), &[0, 1, 2, 1, 4], "?\n0\n0\n3\n");

    assert!(matches!(end, SessionEnd::Completed(_)));
    // Once for the pre-game display, once for the help request.
    assert!(transcript.matches("user \\ rival").count() >= 2);
}

#[test]
fn test_invalid_input_reprompts_with_range() {
    let (end, transcript) = play(canonical_dice(), &[0, 1, 2, 1, 4], "7\nabc\n0\n0\n3\n");

    assert!(matches!(end, SessionEnd::Completed(_)));
    assert!(transcript.contains("Enter a number between 0 and 1, X to exit or ? for help."));
}

#[test]
fn test_transcript_shows_roll_arithmetic() {
    let (_, transcript) = play(canonical_dice(), &[0, 1, 2, 1, 4], "0\n0\n3\n");

    assert!(transcript.contains("The result is 2 + 3 = 5 (mod 6)."));
    assert!(transcript.contains("The result is 1 + 4 = 5 (mod 6)."));
    assert!(transcript.contains("Your roll result is 9."));
    assert!(transcript.contains("My roll result is 7."));
}

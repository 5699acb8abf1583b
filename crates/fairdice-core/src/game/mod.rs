//! The interactive game session.
//!
//! Drives the four phases of a game over a line-oriented text protocol:
//! first-move determination, alternating die selection, committed rolls,
//! and scoring. The session is generic over the entropy source and both
//! I/O handles so a full game can run against in-memory buffers in tests.

use crate::crypto::{EntropyError, EntropySource};
use crate::dice::Die;
use crate::fairness::FairCommit;
use crate::probability::ProbabilityTable;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{BufRead, Write};
use thiserror::Error;

/// Errors that end a session
///
/// Bad menu input is not an error: the session re-prompts. Only entropy
/// and terminal failures are fatal.
#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Entropy(#[from] EntropyError),

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// One of the two parties
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Player {
    Human,
    Computer,
}

impl Player {
    /// Get the other party
    pub fn opponent(&self) -> Player {
        match self {
            Player::Human => Player::Computer,
            Player::Computer => Player::Human,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Human => write!(f, "you"),
            Player::Computer => write!(f, "the computer"),
        }
    }
}

/// Final comparison of the two rolls
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RollResult {
    Win(Player),
    Tie,
}

/// Everything a completed game decided
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub first_mover: Player,
    /// Index of the human's die in the configured dice list
    pub human_die: usize,
    /// Index of the computer's die in the configured dice list
    pub computer_die: usize,
    pub human_roll: i64,
    pub computer_roll: i64,
    pub result: RollResult,
}

/// How a session ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEnd {
    Completed(GameReport),
    /// The user typed the exit keyword (or closed the input stream)
    Exited,
}

/// Outcome of parsing one response line against a menu.
///
/// `None` from [`Selection::parse`] means the line was not a valid
/// response and the caller should re-prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Resolved(usize),
    HelpRequested,
    ExitRequested,
}

impl Selection {
    /// Parse a response line for a menu of `option_count` options
    pub fn parse(line: &str, option_count: usize) -> Option<Selection> {
        let token = line.trim();
        if token.eq_ignore_ascii_case("x") {
            return Some(Selection::ExitRequested);
        }
        if token == "?" {
            return Some(Selection::HelpRequested);
        }
        match token.parse::<usize>() {
            Ok(n) if n < option_count => Some(Selection::Resolved(n)),
            _ => None,
        }
    }
}

/// A single game from first-move flip to scoring
pub struct GameSession<E, R, W> {
    dice: Vec<Die>,
    table: ProbabilityTable,
    entropy: E,
    input: R,
    output: W,
}

impl<E: EntropySource, R: BufRead, W: Write> GameSession<E, R, W> {
    pub fn new(dice: Vec<Die>, entropy: E, input: R, output: W) -> Self {
        let table = ProbabilityTable::new(&dice);
        Self {
            dice,
            table,
            entropy,
            input,
            output,
        }
    }

    /// Play one game to completion or exit.
    ///
    /// Every internal phase returns `Ok(None)` when the user asked to
    /// exit, which unwinds here into [`SessionEnd::Exited`] with no
    /// further output.
    pub fn run(mut self) -> Result<SessionEnd, GameError> {
        self.show_dice()?;

        let first_mover = match self.determine_first_mover()? {
            Some(player) => player,
            None => return Ok(SessionEnd::Exited),
        };

        let (human_die, computer_die) = match self.select_dice(first_mover)? {
            Some(selection) => selection,
            None => return Ok(SessionEnd::Exited),
        };

        let mut rolls = (None, None);
        for party in [first_mover, first_mover.opponent()] {
            let die_index = match party {
                Player::Human => human_die,
                Player::Computer => computer_die,
            };
            match self.roll(party, die_index)? {
                Some(face) => match party {
                    Player::Human => rolls.0 = Some(face),
                    Player::Computer => rolls.1 = Some(face),
                },
                None => return Ok(SessionEnd::Exited),
            }
        }
        let (Some(human_roll), Some(computer_roll)) = rolls else {
            // Both arms of the loop above fill exactly one slot each.
            unreachable!("both parties rolled");
        };

        let result = score(human_roll, computer_roll);
        match result {
            RollResult::Win(Player::Human) => {
                writeln!(self.output, "You win ({human_roll} > {computer_roll})!")?
            }
            RollResult::Win(Player::Computer) => {
                writeln!(self.output, "I win ({computer_roll} > {human_roll}).")?
            }
            RollResult::Tie => {
                writeln!(self.output, "It's a tie ({human_roll} = {computer_roll}).")?
            }
        }

        Ok(SessionEnd::Completed(GameReport {
            first_mover,
            human_die,
            computer_die,
            human_roll,
            computer_roll,
            result,
        }))
    }

    fn show_dice(&mut self) -> Result<(), GameError> {
        writeln!(self.output, "Probability of the win for the user:")?;
        write!(self.output, "{}", self.table)?;
        Ok(())
    }

    /// Phase 1: the committed coin flip.
    ///
    /// Result 0 means the human moves first, 1 the computer.
    fn determine_first_mover(&mut self) -> Result<Option<Player>, GameError> {
        writeln!(self.output, "Let's determine who makes the first move.")?;
        let commit = FairCommit::begin(&mut self.entropy, 1)?;
        writeln!(
            self.output,
            "I selected a random value in the range 0..1 (HMAC={}).",
            commit.commitment()
        )?;
        writeln!(self.output, "Try to guess my selection.")?;

        let guess = match self.prompt_value(1)? {
            Some(guess) => guess,
            None => return Ok(None),
        };
        let outcome = commit.open(guess);
        writeln!(
            self.output,
            "My selection: {} (KEY={}).",
            outcome.secret, outcome.key
        )?;

        let first_mover = if outcome.result == 0 {
            writeln!(self.output, "You guessed right, you make the first move.")?;
            Player::Human
        } else {
            writeln!(self.output, "I make the first move.")?;
            Player::Computer
        };
        Ok(Some(first_mover))
    }

    /// Phase 2: alternating die selection, first mover first
    fn select_dice(
        &mut self,
        first_mover: Player,
    ) -> Result<Option<(usize, usize)>, GameError> {
        let mut pool: Vec<usize> = (0..self.dice.len()).collect();

        let (human_die, computer_die) = match first_mover {
            Player::Human => {
                let human = match self.human_pick(&mut pool)? {
                    Some(index) => index,
                    None => return Ok(None),
                };
                let computer = self.computer_pick(&mut pool)?;
                (human, computer)
            }
            Player::Computer => {
                let computer = self.computer_pick(&mut pool)?;
                let human = match self.human_pick(&mut pool)? {
                    Some(index) => index,
                    None => return Ok(None),
                };
                (human, computer)
            }
        };
        Ok(Some((human_die, computer_die)))
    }

    fn computer_pick(&mut self, pool: &mut Vec<usize>) -> Result<usize, GameError> {
        let pick = self.entropy.uniform((pool.len() - 1) as u64)? as usize;
        let index = pool.remove(pick);
        writeln!(self.output, "I choose the [{}] die.", self.dice[index])?;
        Ok(index)
    }

    fn human_pick(&mut self, pool: &mut Vec<usize>) -> Result<Option<usize>, GameError> {
        loop {
            writeln!(self.output, "Choose your die:")?;
            for (option, &index) in pool.iter().enumerate() {
                writeln!(self.output, "{option} - {}", self.dice[index])?;
            }
            writeln!(self.output, "X - exit")?;
            writeln!(self.output, "? - help")?;

            match self.read_selection(pool.len())? {
                Some(Selection::Resolved(option)) => {
                    let index = pool.remove(option);
                    writeln!(self.output, "You choose the [{}] die.", self.dice[index])?;
                    return Ok(Some(index));
                }
                Some(Selection::HelpRequested) => self.show_dice()?,
                Some(Selection::ExitRequested) | None => return Ok(None),
            }
        }
    }

    /// Phase 3: one committed roll for `party`'s die.
    ///
    /// The rolling party supplies the added value; the computer draws its
    /// own answer from the same entropy source.
    fn roll(&mut self, party: Player, die_index: usize) -> Result<Option<i64>, GameError> {
        let die = self.dice[die_index].clone();
        let face_count = die.face_count();
        let max_index = (face_count - 1) as u64;

        match party {
            Player::Human => writeln!(self.output, "It's time for your roll.")?,
            Player::Computer => writeln!(self.output, "It's time for my roll.")?,
        }
        let commit = FairCommit::begin(&mut self.entropy, max_index)?;
        writeln!(
            self.output,
            "I selected a random value in the range 0..{max_index} (HMAC={}).",
            commit.commitment()
        )?;

        let answer = match party {
            Player::Human => {
                writeln!(self.output, "Add your number modulo {face_count}.")?;
                match self.prompt_value(max_index)? {
                    Some(answer) => answer,
                    None => return Ok(None),
                }
            }
            Player::Computer => {
                let answer = self.entropy.uniform(max_index)?;
                writeln!(self.output, "I add my own number {answer}.")?;
                answer
            }
        };

        let outcome = commit.open(answer);
        writeln!(
            self.output,
            "My number is {} (KEY={}).",
            outcome.secret, outcome.key
        )?;
        writeln!(
            self.output,
            "The result is {} + {answer} = {} (mod {face_count}).",
            outcome.secret, outcome.result
        )?;

        let face = die.face(outcome.result as usize);
        match party {
            Player::Human => writeln!(self.output, "Your roll result is {face}.")?,
            Player::Computer => writeln!(self.output, "My roll result is {face}.")?,
        }
        Ok(Some(face))
    }

    /// Menu over the integers `0..=max`, re-prompting on invalid input
    fn prompt_value(&mut self, max: u64) -> Result<Option<u64>, GameError> {
        loop {
            for value in 0..=max {
                writeln!(self.output, "{value} - {value}")?;
            }
            writeln!(self.output, "X - exit")?;
            writeln!(self.output, "? - help")?;

            match self.read_selection((max + 1) as usize)? {
                Some(Selection::Resolved(value)) => return Ok(Some(value as u64)),
                Some(Selection::HelpRequested) => self.show_dice()?,
                Some(Selection::ExitRequested) | None => return Ok(None),
            }
        }
    }

    /// Read one response line; `Ok(None)` means the input stream ended.
    ///
    /// Invalid input prints the valid range and returns through the caller's
    /// re-prompt loop, never an error.
    fn read_selection(&mut self, option_count: usize) -> Result<Option<Selection>, GameError> {
        loop {
            write!(self.output, "Your selection: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            match Selection::parse(&line, option_count) {
                Some(selection) => return Ok(Some(selection)),
                None => writeln!(
                    self.output,
                    "Enter a number between 0 and {}, X to exit or ? for help.",
                    option_count - 1
                )?,
            }
        }
    }
}

/// Phase 4: strictly greater face value wins, equal values tie
fn score(human_roll: i64, computer_roll: i64) -> RollResult {
    if human_roll > computer_roll {
        RollResult::Win(Player::Human)
    } else if computer_roll > human_roll {
        RollResult::Win(Player::Computer)
    } else {
        RollResult::Tie
    }
}

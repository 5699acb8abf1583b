//! Dice values and the die-specification parser.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Minimum number of dice a game needs
pub const MIN_DICE: usize = 3;
/// Maximum faces on a single die
pub const MAX_FACES: usize = 6;

/// Errors from validating the configured dice
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("at least 3 dice are required, got {0}")]
    TooFewDice(usize),

    #[error("die specification '{0}' has no faces")]
    NoFaces(String),

    #[error("die specification '{spec}' has {count} faces, the maximum is 6")]
    TooManyFaces { spec: String, count: usize },

    #[error("invalid face value '{token}' in die specification '{spec}'")]
    BadFaceValue { spec: String, token: String },
}

/// An immutable die: an ordered multiset of integer face values
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Die {
    faces: Vec<i64>,
}

impl Die {
    /// Create a die from face values
    pub fn new(faces: Vec<i64>) -> Self {
        assert!(!faces.is_empty(), "a die must have at least one face");
        Self { faces }
    }

    /// Face value at `index`, resolved modulo the face count
    pub fn face(&self, index: usize) -> i64 {
        self.faces[index % self.faces.len()]
    }

    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// All face values in order
    pub fn faces(&self) -> &[i64] {
        &self.faces
    }
}

/// Comma-joined face list, used as the menu and table label
impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, face) in self.faces.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{face}")?;
        }
        Ok(())
    }
}

/// Parse and validate die specifications, preserving input order.
///
/// Each specification is a comma-separated list of 1 to 6 integers. Fewer
/// than [`MIN_DICE`] specifications, an empty specification, or a
/// non-integer token is a fatal configuration error naming the offender.
pub fn parse_dice<S: AsRef<str>>(specs: &[S]) -> Result<Vec<Die>, ConfigError> {
    if specs.len() < MIN_DICE {
        return Err(ConfigError::TooFewDice(specs.len()));
    }

    let mut dice = Vec::with_capacity(specs.len());
    for spec in specs {
        let spec = spec.as_ref();
        if spec.trim().is_empty() {
            return Err(ConfigError::NoFaces(spec.to_string()));
        }

        let mut faces = Vec::new();
        for token in spec.split(',') {
            let token = token.trim();
            let value = token.parse::<i64>().map_err(|_| ConfigError::BadFaceValue {
                spec: spec.to_string(),
                token: token.to_string(),
            })?;
            faces.push(value);
        }
        if faces.len() > MAX_FACES {
            return Err(ConfigError::TooManyFaces {
                spec: spec.to_string(),
                count: faces.len(),
            });
        }

        dice.push(Die::new(faces));
    }
    Ok(dice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_three_valid_dice() {
        let dice = parse_dice(&["1,2,3", "4,5,6", "7,8,9"]).unwrap();
        assert_eq!(dice.len(), 3);
        assert!(dice.iter().all(|die| die.face_count() == 3));
        assert_eq!(dice[0].faces(), &[1, 2, 3]);
        assert_eq!(dice[2].faces(), &[7, 8, 9]);
    }

    #[test]
    fn test_too_few_dice_rejected() {
        assert_eq!(
            parse_dice(&["1,2,3", "4,5,6"]),
            Err(ConfigError::TooFewDice(2))
        );
    }

    #[test]
    fn test_seven_faces_rejected() {
        let err = parse_dice(&["1,2,3,4,5,6,7", "1,2", "3,4"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TooManyFaces {
                spec: "1,2,3,4,5,6,7".to_string(),
                count: 7,
            }
        );
    }

    #[test]
    fn test_empty_spec_rejected() {
        let err = parse_dice(&["1,2,3", "", "4,5,6"]).unwrap_err();
        assert_eq!(err, ConfigError::NoFaces(String::new()));
    }

    #[test]
    fn test_non_integer_token_rejected() {
        let err = parse_dice(&["1,2,3", "4,five,6", "7,8,9"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BadFaceValue {
                spec: "4,five,6".to_string(),
                token: "five".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_token_rejected() {
        let err = parse_dice(&["1,,3", "4,5,6", "7,8,9"]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::BadFaceValue {
                spec: "1,,3".to_string(),
                token: String::new(),
            }
        );
    }

    #[test]
    fn test_negative_and_single_faces_accepted() {
        let dice = parse_dice(&["-5", "0,-1", "2,2,4,4,9,9"]).unwrap();
        assert_eq!(dice[0].faces(), &[-5]);
        assert_eq!(dice[1].faces(), &[0, -1]);
        assert_eq!(dice[2].face_count(), 6);
    }

    #[test]
    fn test_error_messages_name_the_offender() {
        let err = parse_dice(&["1,2", "4,x,6", "7,8"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("4,x,6"));
        assert!(message.contains('x'));
    }

    #[test]
    fn test_face_access_wraps_modulo_length() {
        let die = Die::new(vec![10, 20, 30]);
        assert_eq!(die.face(0), 10);
        assert_eq!(die.face(2), 30);
        assert_eq!(die.face(3), 10);
        assert_eq!(die.face(7), 20);
    }

    #[test]
    fn test_die_label_is_comma_joined() {
        let die = Die::new(vec![2, 2, 4, 4, 9, 9]);
        assert_eq!(die.to_string(), "2,2,4,4,9,9");
    }
}

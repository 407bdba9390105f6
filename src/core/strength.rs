//! Five-point password strength score.

use std::fmt;

const LABELS: [&str; 5] = ["Very weak", "Weak", "Medium", "Good", "Excellent"];

/// A strength score in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Strength(u8);

impl Strength {
    pub const MAX: u8 = 5;

    pub fn score(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        LABELS[usize::from(self.0 - 1)]
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}/{})", self.label(), self.0, Self::MAX)
    }
}

/// Score a password: length earns up to 2 points, lowercase, uppercase and
/// ASCII digits 1 each, non-alphanumeric symbols 2.
pub fn score(password: &str) -> Strength {
    let len = password.chars().count();
    let mut points: u8 = 0;

    if len >= 12 {
        points += 2;
    } else if len >= 8 {
        points += 1;
    }
    if password.chars().any(char::is_lowercase) {
        points += 1;
    }
    if password.chars().any(char::is_uppercase) {
        points += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        points += 1;
    }
    if password.chars().any(|c| !c.is_alphanumeric()) {
        points += 2;
    }

    Strength(points.clamp(1, Strength::MAX))
}

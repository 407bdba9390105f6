//! Random password generation with per-class guarantees.
//!
//! Lowercase letters are always in the pool. Each enabled optional class
//! (uppercase, digits, special) contributes one guaranteed character; the rest
//! is drawn uniformly from the union of enabled classes and the result is
//! shuffled.

use crate::constants;
use crate::error::{Error, Result};
use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, Rng};
use tracing::debug;

/// The character sets a generator draws from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterSets {
    lowercase: Vec<char>,
    uppercase: Vec<char>,
    digits: Vec<char>,
    special: Vec<char>,
}

impl Default for CharacterSets {
    fn default() -> Self {
        Self {
            lowercase: constants::LOWERCASE_CHARS.chars().collect(),
            uppercase: constants::UPPERCASE_CHARS.chars().collect(),
            digits: constants::DIGIT_CHARS.chars().collect(),
            special: constants::SPECIAL_CHARS.chars().collect(),
        }
    }
}

impl CharacterSets {
    /// Default sets with the special symbols replaced. Duplicates are dropped.
    pub fn with_special(special: &str) -> Result<Self> {
        let mut chars: Vec<char> = Vec::new();
        for c in special.chars() {
            if !chars.contains(&c) {
                chars.push(c);
            }
        }
        if chars.is_empty() {
            return Err(Error::EmptyCharacterSet("special"));
        }
        Ok(Self {
            special: chars,
            ..Self::default()
        })
    }

    pub fn lowercase(&self) -> &[char] {
        &self.lowercase
    }

    pub fn uppercase(&self) -> &[char] {
        &self.uppercase
    }

    pub fn digits(&self) -> &[char] {
        &self.digits
    }

    pub fn special(&self) -> &[char] {
        &self.special
    }
}

/// Requested composition of one password.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorOptions {
    pub length: usize,
    pub uppercase: bool,
    pub digits: bool,
    pub special: bool,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            length: constants::DEFAULT_LENGTH,
            uppercase: true,
            digits: true,
            special: true,
        }
    }
}

impl GeneratorOptions {
    /// Number of guaranteed slots (one per enabled optional class).
    pub fn required_slots(&self) -> usize {
        [self.uppercase, self.digits, self.special]
            .iter()
            .filter(|enabled| **enabled)
            .count()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Generator {
    sets: CharacterSets,
}

impl Generator {
    pub fn new(sets: CharacterSets) -> Self {
        Self { sets }
    }

    pub fn sets(&self) -> &CharacterSets {
        &self.sets
    }

    /// Generate a password using the operating system's CSPRNG.
    pub fn generate(&self, options: &GeneratorOptions) -> Result<String> {
        self.generate_with(options, &mut OsRng)
    }

    /// Generate a password from the given cryptographically secure source.
    pub fn generate_with<R>(&self, options: &GeneratorOptions, rng: &mut R) -> Result<String>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        let required = options.required_slots();
        if options.length < required {
            return Err(Error::InvalidLength {
                length: options.length,
                required,
            });
        }

        let mut pool: Vec<char> = self.sets.lowercase.clone();
        let mut password: Vec<char> = Vec::with_capacity(options.length);
        for (enabled, set) in [
            (options.uppercase, &self.sets.uppercase),
            (options.digits, &self.sets.digits),
            (options.special, &self.sets.special),
        ] {
            if !enabled {
                continue;
            }
            pool.extend_from_slice(set);
            password.push(pick(set, rng)?);
        }

        for _ in required..options.length {
            password.push(pick(&pool, rng)?);
        }
        password.shuffle(rng);

        debug!(
            length = options.length,
            uppercase = options.uppercase,
            digits = options.digits,
            special = options.special,
            "generated password"
        );
        Ok(password.into_iter().collect())
    }
}

fn pick<R: Rng + ?Sized>(set: &[char], rng: &mut R) -> Result<char> {
    set.choose(rng)
        .copied()
        .ok_or(Error::EmptyCharacterSet("pool"))
}

//! ============================================================================
//! Code Generator - Where new access codes come from
//! ============================================================================
//! `RandomCodeSource` picks one letter and one three-digit number per code,
//! independently. No uniqueness is enforced, so a batch may repeat a code.
//! ============================================================================

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::{AccessCode, CODE_ALPHABET, CODE_NUMBER_MAX, CODE_NUMBER_MIN};

/// Produces the next access code on demand
pub trait CodeSource {
    fn next_code(&mut self) -> AccessCode;
}

/// Random codes backed by any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomCodeSource<R = StdRng> {
    rng: R,
}

impl RandomCodeSource<StdRng> {
    /// OS-seeded generator for real use
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Deterministic generator for demos and reproducible runs
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomCodeSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CodeSource for RandomCodeSource<R> {
    fn next_code(&mut self) -> AccessCode {
        let letters = CODE_ALPHABET.as_bytes();
        let letter = letters[self.rng.gen_range(0..letters.len())] as char;
        let number = self.rng.gen_range(CODE_NUMBER_MIN..=CODE_NUMBER_MAX);
        AccessCode::from_parts(letter, number)
    }
}

/// Replays a fixed list of codes, starting over when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedCodeSource {
    codes: Vec<AccessCode>,
    next: usize,
}

impl ScriptedCodeSource {
    /// Panics if `codes` is empty
    pub fn new(codes: Vec<AccessCode>) -> Self {
        assert!(!codes.is_empty(), "scripted code source needs at least one code");
        Self { codes, next: 0 }
    }

    /// Convenience constructor from display strings such as `"Txa123"`.
    ///
    /// Panics if any string is not a well-formed code.
    pub fn from_strs(codes: &[&str]) -> Self {
        Self::new(
            codes
                .iter()
                .map(|c| {
                    AccessCode::parse(c)
                        .unwrap_or_else(|| panic!("scripted code {:?} is not well formed", c))
                })
                .collect(),
        )
    }
}

impl CodeSource for ScriptedCodeSource {
    fn next_code(&mut self) -> AccessCode {
        let code = self.codes[self.next].clone();
        self.next = (self.next + 1) % self.codes.len();
        code
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_codes_are_well_formed() {
        let mut source = RandomCodeSource::seeded(7);
        for _ in 0..500 {
            let code = source.next_code();
            assert!(AccessCode::is_well_formed(code.as_str()), "bad code {}", code);
            assert!(code.as_str().starts_with("Tx"));
        }
    }

    #[test]
    fn test_seeded_sources_agree() {
        let mut a = RandomCodeSource::seeded(42);
        let mut b = RandomCodeSource::seeded(42);
        for _ in 0..20 {
            assert_eq!(a.next_code(), b.next_code());
        }
    }

    #[test]
    fn test_random_source_covers_alphabet() {
        let mut source = RandomCodeSource::seeded(1);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..5_000 {
            let letter = source.next_code().as_str().chars().nth(2).unwrap();
            seen.insert(letter);
        }
        assert_eq!(seen.len(), CODE_ALPHABET.len());
    }

    #[test]
    fn test_scripted_source_cycles() {
        let mut source = ScriptedCodeSource::from_strs(&["Txa123", "Txb456"]);
        assert_eq!(source.next_code().as_str(), "Txa123");
        assert_eq!(source.next_code().as_str(), "Txb456");
        assert_eq!(source.next_code().as_str(), "Txa123");
    }

    #[test]
    fn test_scripted_source_keeps_input_case() {
        let mut source = ScriptedCodeSource::from_strs(&["TXA123"]);
        assert_eq!(source.next_code().as_str(), "TxA123");
    }

    #[test]
    #[should_panic(expected = "not well formed")]
    fn test_scripted_source_rejects_malformed_code() {
        ScriptedCodeSource::from_strs(&["Txa123", "TxZZZ999"]);
    }

    #[test]
    #[should_panic(expected = "not well formed")]
    fn test_scripted_source_rejects_short_code() {
        ScriptedCodeSource::from_strs(&["Txk38"]);
    }
}

//! Secret generation.
//!
//! Produces unpredictable blob keys and download secrets. File ids are
//! UUIDv4 and generated by the registry; everything else comes from here.

use rand::Rng;

const CHARSET: &[u8] = b"0123456789abcdef";

/// Generator for random lowercase-hex strings of a fixed length
#[derive(Debug, Clone, Copy)]
pub struct SecretGenerator {
    length: usize,
}

impl SecretGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Generate a fresh secret
    pub fn generate(&self) -> String {
        Self::generate_with_length(self.length)
    }

    /// Generate a random hex string of the given length
    pub fn generate_with_length(length: usize) -> String {
        let mut rng = rand::rng();
        (0..length)
            .map(|_| {
                let idx = rng.random_range(0..CHARSET.len());
                CHARSET[idx] as char
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_length() {
        let generator = SecretGenerator::new(32);
        assert_eq!(generator.generate().len(), 32);
        assert_eq!(SecretGenerator::generate_with_length(8).len(), 8);
    }

    #[test]
    fn test_generated_charset() {
        let secret = SecretGenerator::new(64).generate();
        assert!(secret.bytes().all(|b| CHARSET.contains(&b)));
    }

    #[test]
    fn test_consecutive_secrets_differ() {
        let generator = SecretGenerator::new(32);
        // 16^32 values; a collision here means the generator is broken
        assert_ne!(generator.generate(), generator.generate());
    }
}

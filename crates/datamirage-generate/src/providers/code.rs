use std::sync::Arc;

use crate::errors::GenerationError;
use crate::random::{DIGIT_PLACEHOLDER, LETTER_PLACEHOLDER, RandomService};

const ISBN_PREFIXES: &[&str] = &["978", "979"];
const ASIN_PREFIX: &str = "B0";
const ASIN_BODY_LEN: usize = 8;

/// Book, product and periodical identifiers with valid check characters.
///
/// Codes are the same in every locale, so this provider reads no locale
/// tables.
#[derive(Debug)]
pub struct CodeProvider {
    random: Arc<RandomService>,
}

impl CodeProvider {
    pub fn new(random: Arc<RandomService>) -> Self {
        Self { random }
    }

    /// ISBN-13: a `978` or `979` prefix, nine digits and the check digit.
    pub fn isbn(&self) -> Result<String, GenerationError> {
        let prefix = self.random.element(ISBN_PREFIXES)?;
        Ok(with_ean_check(format!("{prefix}{}", self.random.digits(9))))
    }

    /// EAN-13: twelve digits and the check digit.
    pub fn ean(&self) -> Result<String, GenerationError> {
        Ok(with_ean_check(self.random.digits(12)))
    }

    /// ISSN `NNNN-NNNC`, where `C` is a digit or `X`.
    pub fn issn(&self) -> Result<String, GenerationError> {
        let body = self.random.digits(7);
        let check = issn_check(&body);
        Ok(format!("{}-{}{check}", &body[..4], &body[4..]))
    }

    /// `B0` followed by eight upper-case letters or digits.
    pub fn asin(&self) -> Result<String, GenerationError> {
        let mut pattern = String::from(ASIN_PREFIX);
        for _ in 0..ASIN_BODY_LEN {
            let marker = if self.random.weighted_bool(0.5)? {
                DIGIT_PLACEHOLDER
            } else {
                LETTER_PLACEHOLDER
            };
            pattern.push(marker);
        }
        Ok(self.random.bothify(&pattern))
    }
}

fn digit_values(digits: &str) -> impl Iterator<Item = u32> + '_ {
    digits.chars().filter_map(|ch| ch.to_digit(10))
}

/// Append the EAN-13 check digit. Weights alternate 1 and 3 from the left.
fn with_ean_check(mut body: String) -> String {
    let sum: u32 = digit_values(&body)
        .enumerate()
        .map(|(idx, digit)| if idx % 2 == 0 { digit } else { digit * 3 })
        .sum();
    let check = (10 - sum % 10) % 10;
    body.push(char::from(b'0' + check as u8));
    body
}

/// ISSN check character for seven digits: weights 8 down to 2, modulo 11.
fn issn_check(body: &str) -> char {
    let sum: u32 = digit_values(body)
        .zip((2..=8).rev())
        .map(|(digit, weight)| digit * weight)
        .sum();
    match (11 - sum % 11) % 11 {
        10 => 'X',
        check => char::from(b'0' + check as u8),
    }
}

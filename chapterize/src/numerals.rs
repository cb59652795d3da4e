//! Numeral parsing: Arabic digits, Roman numerals, and English word numbers.

use crate::error::{ChapterizeError, Result};

/// Roman numeral symbols and their values (lowercase).
const ROMAN_VALUES: &[(char, i64)] = &[
    ('i', 1),
    ('v', 5),
    ('x', 10),
    ('l', 50),
    ('c', 100),
    ('d', 500),
    ('m', 1000),
];

/// Word numbers that map directly to a value (zero through nineteen).
const UNITS: &[(&str, i64)] = &[
    ("zero", 0),
    ("one", 1),
    ("two", 2),
    ("three", 3),
    ("four", 4),
    ("five", 5),
    ("six", 6),
    ("seven", 7),
    ("eight", 8),
    ("nine", 9),
    ("ten", 10),
    ("eleven", 11),
    ("twelve", 12),
    ("thirteen", 13),
    ("fourteen", 14),
    ("fifteen", 15),
    ("sixteen", 16),
    ("seventeen", 17),
    ("eighteen", 18),
    ("nineteen", 19),
];

/// Tens words that combine additively with a following unit.
const TENS: &[(&str, i64)] = &[
    ("twenty", 20),
    ("thirty", 30),
    ("forty", 40),
    ("fifty", 50),
    ("sixty", 60),
    ("seventy", 70),
    ("eighty", 80),
    ("ninety", 90),
];

/// Multiplier words. These scale the running total accumulated so far.
const SCALES: &[(&str, i64)] = &[("hundred", 100), ("thousand", 1000)];

/// Convert a Roman numeral to an integer.
///
/// Case-insensitive. Uses standard subtractive notation: a symbol smaller
/// than the one after it is subtracted (IV=4, IX=9, XL=40, XC=90, CD=400,
/// CM=900). Returns an error for empty input or any character outside
/// {I,V,X,L,C,D,M}; callers that want soft failure go through [`parse_num`].
pub fn roman_to_int(numeral: &str) -> Result<i64> {
    if numeral.is_empty() {
        return Err(ChapterizeError::InvalidRomanNumeral {
            numeral: numeral.to_string(),
            position: 0,
        });
    }

    let mut values = Vec::with_capacity(numeral.len());
    for (position, c) in numeral.chars().enumerate() {
        let lower = c.to_ascii_lowercase();
        let value = ROMAN_VALUES
            .iter()
            .find(|(symbol, _)| *symbol == lower)
            .map(|(_, v)| *v)
            .ok_or_else(|| ChapterizeError::InvalidRomanNumeral {
                numeral: numeral.to_string(),
                position,
            })?;
        values.push(value);
    }

    let mut total = 0;
    for (i, &value) in values.iter().enumerate() {
        if values[i + 1..].first().is_some_and(|&next| next > value) {
            total -= value;
        } else {
            total += value;
        }
    }
    Ok(total)
}

/// Convert an English word number to an integer.
///
/// Words are separated by spaces or hyphens. Units and tens add to a running
/// value; "hundred" and "thousand" multiply it ("nineteen hundred ninety
/// four" = 1994, "one thousand one hundred one" = 1101).
fn words_to_int(token: &str) -> Result<i64> {
    let mut total: i64 = 0;
    let mut current: i64 = 0;
    let mut saw_word = false;

    for word in token
        .split(|c: char| c == ' ' || c == '-')
        .filter(|w| !w.is_empty())
    {
        let lower = word.to_ascii_lowercase();
        saw_word = true;

        if let Some((_, v)) = UNITS.iter().find(|(w, _)| *w == lower) {
            current += v;
        } else if let Some((_, v)) = TENS.iter().find(|(w, _)| *w == lower) {
            current += v;
        } else if let Some((_, scale)) = SCALES.iter().find(|(w, _)| *w == lower) {
            // Bare "hundred" reads as one hundred
            if current == 0 {
                current = 1;
            }
            current *= scale;
            if *scale >= 1000 {
                total += current;
                current = 0;
            }
        } else {
            return Err(ChapterizeError::UnknownNumberWord(word.to_string()));
        }
    }

    if !saw_word {
        return Err(ChapterizeError::UnknownNumberWord(token.to_string()));
    }
    Ok(total + current)
}

/// Parse a numeral token into an integer.
///
/// Accepts, in order: plain digit strings ("7", "007"), Roman numerals
/// ("XIV"), English word numbers ("twenty-one", "nineteen hundred ninety
/// four"), and finally a digit-run fallback for tokens with no letters at
/// all. The fallback folds successive digit runs as
/// `acc = acc * 100 + run * 5`, so "1.5" parses to 125; sub-chapter tokens
/// stay ordered between their surrounding whole chapters.
///
/// Returns `None` for `None`/empty input, for tokens carrying leading or
/// trailing whitespace (this function never trims), and for anything else
/// unrecognized, including mixed Roman/Arabic tokens.
pub fn parse_num(token: Option<&str>) -> Option<i64> {
    let token = token?;
    if token.is_empty() || token.trim() != token {
        return None;
    }

    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse::<i64>().ok();
    }

    if token
        .chars()
        .all(|c| ROMAN_VALUES.iter().any(|(s, _)| *s == c.to_ascii_lowercase()))
    {
        return roman_to_int(token).ok();
    }

    if token
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c == ' ' || c == '-')
    {
        return words_to_int(token).ok();
    }

    if !token.chars().any(|c| c.is_alphabetic()) {
        return fold_digit_runs(token);
    }

    None
}

/// Permissive numeral parse used by heading extraction.
///
/// Trims the token, then tries [`parse_num`]; on failure also accepts a
/// digit run with a trailing letter suffix ("14a" -> 14) and ordinal forms
/// ("1st", "21st") by extracting the digit runs.
pub fn parse_num_loose(token: &str) -> Option<i64> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    if let Some(n) = parse_num(Some(token)) {
        return Some(n);
    }

    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    let rest = &token[digits.len()..];
    if !digits.is_empty() && rest.chars().all(|c| c.is_ascii_alphabetic()) {
        return digits.parse::<i64>().ok();
    }

    fold_digit_runs(token)
}

/// Fold every digit run in the token into one integer.
///
/// The first run seeds the accumulator; each later run contributes
/// `acc * 100 + run * 5`.
fn fold_digit_runs(token: &str) -> Option<i64> {
    let mut acc: Option<i64> = None;
    let mut run = String::new();

    for c in token.chars().chain(std::iter::once('\0')) {
        if c.is_ascii_digit() {
            run.push(c);
            continue;
        }
        if !run.is_empty() {
            let value = run.parse::<i64>().ok()?;
            acc = Some(match acc {
                None => value,
                Some(a) => a.checked_mul(100)?.checked_add(value.checked_mul(5)?)?,
            });
            run.clear();
        }
    }
    acc
}

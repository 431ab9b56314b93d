//! SELCAL-16 tone table: the fixed mapping from letter to audio frequency.
//!
//! The table itself is an external collaborator (§1) — loaded once at
//! startup from a small JSON document and treated as immutable thereafter.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::SelcalError;

/// Number of letters in the ICAO SELCAL-16 alphabet.
pub const ALPHABET_SIZE: usize = 16;

/// The standard ICAO SELCAL-16 alphabet, in ascending tone-table order.
pub const SELCAL16_LETTERS: [char; ALPHABET_SIZE] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'J', 'K', 'L', 'M', 'P', 'Q', 'R', 'S',
];

/// The standard ICAO SELCAL-16 frequencies (Hz), parallel to [`SELCAL16_LETTERS`].
pub const SELCAL16_FREQUENCIES_HZ: [f64; ALPHABET_SIZE] = [
    312.6, 346.7, 384.6, 426.6, 473.2, 524.8, 582.1, 645.7, 716.1, 794.3, 881.0, 977.2, 1202.3,
    1333.7, 1479.1, 1638.9,
];

#[derive(Debug, Deserialize)]
struct ToneTableFile {
    #[serde(rename = "SELCAL16")]
    selcal16: HashMap<String, f64>,
}

/// Immutable `Letter -> Frequency(Hz)` mapping, established once at startup.
///
/// Invariants: exactly sixteen entries, all frequencies distinct and within
/// `(0, sample_rate / 2)`.
#[derive(Debug, Clone)]
pub struct ToneTable {
    letters: [char; ALPHABET_SIZE],
    frequencies: [f64; ALPHABET_SIZE],
}

impl ToneTable {
    /// The built-in standard SELCAL-16 table (used when no file is given).
    pub fn standard() -> Self {
        Self {
            letters: SELCAL16_LETTERS,
            frequencies: SELCAL16_FREQUENCIES_HZ,
        }
    }

    /// Load and validate a tone table from a JSON file keyed `"SELCAL16"`.
    pub fn load(path: &Path, sample_rate: u32) -> Result<Self, SelcalError> {
        let text = fs::read_to_string(path).map_err(|source| SelcalError::ToneTableIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text, sample_rate)
    }

    fn from_json_str(text: &str, sample_rate: u32) -> Result<Self, SelcalError> {
        let parsed: ToneTableFile =
            serde_json::from_str(text).map_err(|source| SelcalError::ToneTableParse { source })?;
        Self::from_map(parsed.selcal16, sample_rate)
    }

    fn from_map(map: HashMap<String, f64>, sample_rate: u32) -> Result<Self, SelcalError> {
        if map.len() != ALPHABET_SIZE {
            return Err(SelcalError::ToneTableShape {
                expected: ALPHABET_SIZE,
                found: map.len(),
            });
        }

        let mut entries: Vec<(char, f64)> = Vec::with_capacity(ALPHABET_SIZE);
        for (key, freq) in map {
            let mut chars = key.chars();
            let letter = match (chars.next(), chars.next()) {
                (Some(c), None) if c.is_ascii_uppercase() => c,
                _ => return Err(SelcalError::ToneTableBadLetter { key }),
            };
            let nyquist = sample_rate as f64 / 2.0;
            if !(freq > 0.0 && freq < nyquist) {
                return Err(SelcalError::ToneTableBadFrequency { letter, freq });
            }
            entries.push((letter, freq));
        }

        entries.sort_by(|a, b| a.1.partial_cmp(&b.1).expect("frequency is never NaN"));

        let mut seen_letters = entries.iter().map(|(l, _)| *l).collect::<Vec<_>>();
        seen_letters.sort_unstable();
        seen_letters.dedup();
        if seen_letters.len() != ALPHABET_SIZE {
            return Err(SelcalError::ToneTableDuplicateLetter);
        }

        let mut prev = None;
        for &(_, freq) in &entries {
            if let Some(p) = prev {
                if (freq - p).abs() < f64::EPSILON {
                    return Err(SelcalError::ToneTableDuplicateFrequency { freq });
                }
            }
            prev = Some(freq);
        }

        let mut letters = ['\0'; ALPHABET_SIZE];
        let mut frequencies = [0.0; ALPHABET_SIZE];
        for (i, (letter, freq)) in entries.into_iter().enumerate() {
            letters[i] = letter;
            frequencies[i] = freq;
        }

        Ok(Self {
            letters,
            frequencies,
        })
    }

    /// Letters in ascending-frequency (canonical) order.
    pub fn letters(&self) -> &[char; ALPHABET_SIZE] {
        &self.letters
    }

    /// Frequencies in ascending order, parallel to [`ToneTable::letters`].
    pub fn frequencies(&self) -> &[f64; ALPHABET_SIZE] {
        &self.frequencies
    }

    /// Index of `letter` in canonical (ascending-frequency) order, if present.
    pub fn index_of(&self, letter: char) -> Option<usize> {
        self.letters.iter().position(|&l| l == letter)
    }

    /// Frequency in Hz for `letter`, if present.
    pub fn frequency_of(&self, letter: char) -> Option<f64> {
        self.index_of(letter).map(|i| self.frequencies[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_sixteen_distinct_entries() {
        let table = ToneTable::standard();
        assert_eq!(table.letters().len(), ALPHABET_SIZE);
        let mut freqs = table.frequencies().to_vec();
        freqs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        freqs.dedup_by(|a, b| (*a - *b).abs() < f64::EPSILON);
        assert_eq!(freqs.len(), ALPHABET_SIZE);
    }

    #[test]
    fn loads_valid_json_table() {
        let json = r#"{"SELCAL16": {
            "A": 312.6, "B": 346.7, "C": 384.6, "D": 426.6,
            "E": 473.2, "F": 524.8, "G": 582.1, "H": 645.7,
            "J": 716.1, "K": 794.3, "L": 881.0, "M": 977.2,
            "P": 1202.3, "Q": 1333.7, "R": 1479.1, "S": 1638.9
        }}"#;
        let table = ToneTable::from_json_str(json, 8000).unwrap();
        assert_eq!(table.index_of('A'), Some(0));
        assert_eq!(table.index_of('S'), Some(15));
        assert!(table.frequency_of('Z').is_none());
    }

    #[test]
    fn rejects_wrong_entry_count() {
        let json = r#"{"SELCAL16": {"A": 312.6}}"#;
        assert!(matches!(
            ToneTable::from_json_str(json, 8000),
            Err(SelcalError::ToneTableShape { .. })
        ));
    }

    #[test]
    fn rejects_frequency_above_nyquist() {
        let mut map = HashMap::new();
        for (l, f) in SELCAL16_LETTERS.iter().zip(SELCAL16_FREQUENCIES_HZ.iter()) {
            map.insert(l.to_string(), *f);
        }
        map.insert("A".to_string(), 5000.0);
        let err = ToneTable::from_map(map, 8000).unwrap_err();
        assert!(matches!(err, SelcalError::ToneTableBadFrequency { .. }));
    }
}

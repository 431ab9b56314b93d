//! Registry dictionary: a tab-separated lookup from SELCAL code to a
//! human-readable owner string. An external collaborator — loaded once at
//! startup, malformed lines are skipped rather than fatal.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::warn;

use crate::error::SelcalError;

#[derive(Debug, Clone)]
pub struct DictionaryEntry {
    pub registration: String,
    pub aircraft_type: String,
    pub operator: String,
}

impl DictionaryEntry {
    /// The parenthetical shown after a code in the emitted log line.
    pub fn parenthetical(&self) -> String {
        format!(
            "{} {} {}",
            self.registration, self.aircraft_type, self.operator
        )
    }
}

#[derive(Debug, Default)]
pub struct Dictionary {
    entries: HashMap<String, DictionaryEntry>,
}

impl Dictionary {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load a tab-separated dictionary file. Lines with fewer than four
    /// fields are skipped with a warning; later duplicate codes overwrite
    /// earlier ones.
    pub fn load(path: &Path) -> Result<Self, SelcalError> {
        let text = fs::read_to_string(path).map_err(|source| SelcalError::DictionaryIo {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_str(&text))
    }

    fn from_str(text: &str) -> Self {
        let mut entries = HashMap::new();
        for (lineno, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 4 {
                warn!(
                    "dictionary line {}: expected at least 4 tab-separated fields, found {}",
                    lineno + 1,
                    fields.len()
                );
                continue;
            }
            let code = fields[0].trim().to_uppercase();
            if code.is_empty() {
                warn!("dictionary line {}: empty code field", lineno + 1);
                continue;
            }
            entries.insert(
                code,
                DictionaryEntry {
                    registration: fields[1].trim().to_string(),
                    aircraft_type: fields[2].trim().to_string(),
                    operator: fields[3].trim().to_string(),
                },
            );
        }
        Self { entries }
    }

    pub fn lookup(&self, code: &str) -> Option<&DictionaryEntry> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

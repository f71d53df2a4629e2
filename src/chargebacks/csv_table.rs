use crate::chargebacks::{ChargebackError, ChargebackSource};
use crate::types::UserId;
use csv::{ReaderBuilder, Trim};
use serde::{de, Deserialize, Deserializer};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::{info, warn};

const USER_ID_COLUMN: &str = "user_id";
const FLAG_COLUMN: &str = "has_cbk";

#[derive(Debug, Deserialize)]
struct ChargebackRow {
    user_id: UserId,
    #[serde(deserialize_with = "deserialize_flag")]
    has_cbk: bool
}

fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;

    match value.trim().to_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(de::Error::custom(format!("Invalid chargeback flag '{other}'")))
    }
}

/// Chargeback history exported as CSV with a `user_id,has_cbk` header.
///
/// Loaded once at startup; extra columns are ignored, the first row for a user
/// wins and malformed rows are skipped.
pub struct CsvChargebackTable {
    records: HashMap<UserId, bool>
}

impl CsvChargebackTable {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ChargebackError> {
        let file = File::open(path.as_ref())?;
        let table = Self::from_reader(BufReader::new(file))?;

        info!("Loaded chargeback history for [{}] users from {}", table.len(), path.as_ref().display());

        Ok(table)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ChargebackError> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()?;

        for column in [USER_ID_COLUMN, FLAG_COLUMN] {
            if !headers.iter().any(|header| header == column) {
                return Err(ChargebackError::MissingColumn(column));
            }
        }

        let mut records = HashMap::new();

        for result in reader.deserialize::<ChargebackRow>() {
            match result {
                Ok(row) => {
                    records.entry(row.user_id).or_insert(row.has_cbk);
                }
                Err(error) => {
                    warn!("Skipping malformed chargeback row: {error}");
                }
            }
        }

        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

impl ChargebackSource for CsvChargebackTable {
    fn has_chargeback(&self, user_id: UserId) -> Result<Option<bool>, ChargebackError> {
        Ok(self.records.get(&user_id).copied())
    }
}

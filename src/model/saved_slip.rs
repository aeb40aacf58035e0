use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;
use utoipa::ToSchema;

use crate::model::salary_record::SalaryRecord;
use crate::store::sticky::Decoded;

/// Snapshot of the record taken on an explicit save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SavedSlip {
    #[schema(example = "5b1f7a4e-2f52-4f8e-9d0c-0c1b1f2a8c11")]
    pub id: String,

    #[serde(default)]
    #[schema(example = "Budi Santoso - Januari 2026")]
    pub title: String,

    /// Creation time, epoch milliseconds
    #[serde(default)]
    #[schema(example = 1767225600000i64)]
    pub timestamp: i64,

    /// Older snapshots are filled in from the current defaults on load.
    #[serde(default, deserialize_with = "reconciled_record")]
    pub data: SalaryRecord,
}

impl SavedSlip {
    /// Decode the stored list entry by entry. Entries that cannot be read
    /// are skipped and the result is marked partial; a stored value that is
    /// not a list at all is an error.
    pub fn decode_list(stored: Value) -> Result<Decoded<Vec<SavedSlip>>, serde_json::Error> {
        let Value::Array(entries) = stored else {
            return Err(serde_json::Error::custom("saved slips are not a list"));
        };

        let mut complete = true;
        let mut slips = Vec::with_capacity(entries.len());
        for entry in entries {
            match Self::decode_entry(entry) {
                Ok(decoded) => {
                    complete &= decoded.complete;
                    slips.push(decoded.value);
                }
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable saved slip");
                    complete = false;
                }
            }
        }
        Ok(Decoded {
            value: slips,
            complete,
        })
    }

    fn decode_entry(entry: Value) -> Result<Decoded<SavedSlip>, serde_json::Error> {
        let Value::Object(mut fields) = entry else {
            return Err(serde_json::Error::custom("saved slip is not an object"));
        };
        let stored = fields.remove("data").unwrap_or(Value::Null);
        let data = SalaryRecord::decode_stored(&SalaryRecord::default(), stored)?;
        fields.insert("data".to_string(), serde_json::to_value(&data.value)?);

        let slip = serde_json::from_value(Value::Object(fields))?;
        Ok(Decoded {
            value: slip,
            complete: data.complete,
        })
    }
}

fn reconciled_record<'de, D>(deserializer: D) -> Result<SalaryRecord, D::Error>
where
    D: Deserializer<'de>,
{
    let stored = Value::deserialize(deserializer)?;
    SalaryRecord::decode_stored(&SalaryRecord::default(), stored)
        .map(|decoded| decoded.value)
        .map_err(D::Error::custom)
}

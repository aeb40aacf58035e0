use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Number, Value};
use tracing::{debug, warn};

use crate::store::storage::Storage;

/// A value mirrored into keyed storage: read once on construction, written
/// back after every change.
pub struct StickyState<T> {
    key: String,
    value: T,
    storage: Arc<dyn Storage>,
}

impl<T> StickyState<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Never fails. Missing, unreadable or unparsable data yields `default`;
    /// anything else is reconciled against `default` field by field.
    pub fn load(storage: Arc<dyn Storage>, key: impl Into<String>, default: T) -> Self {
        Self::load_with(storage, key, default, |default, stored| {
            reconcile_typed(default, stored).map(Decoded::whole)
        })
    }

    /// `load` with a custom decoder for the stored JSON. The reconciled value
    /// is written back only when nothing stored was lost; otherwise the
    /// stored data stays on disk until the next change.
    pub fn load_with<F>(storage: Arc<dyn Storage>, key: impl Into<String>, default: T, decode: F) -> Self
    where
        F: FnOnce(&T, Value) -> Result<Decoded<T>, serde_json::Error>,
    {
        let key = key.into();
        let (value, origin) = read_stored(storage.as_ref(), &key, default, decode);
        let state = Self {
            key,
            value,
            storage,
        };

        match origin {
            Origin::Missing | Origin::Merged => state.persist(),
            Origin::Partial | Origin::Fallback => {
                warn!(key = %state.key, "Stored state left untouched until the next change")
            }
        }
        state
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.persist();
    }

    pub fn update<R>(&mut self, f: impl FnOnce(&mut T) -> R) -> R {
        let out = f(&mut self.value);
        self.persist();
        out
    }

    /// Like `update`, but nothing is written when `f` fails. `f` must not
    /// mutate before it knows it will succeed.
    pub fn try_update<R, E>(&mut self, f: impl FnOnce(&mut T) -> Result<R, E>) -> Result<R, E> {
        let out = f(&mut self.value)?;
        self.persist();
        Ok(out)
    }

    fn persist(&self) {
        let raw = match serde_json::to_string(&self.value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Error serializing state for storage");
                return;
            }
        };

        match self.storage.set_item(&self.key, &raw) {
            Ok(()) => debug!(key = %self.key, bytes = raw.len(), "State persisted"),
            Err(e) => warn!(key = %self.key, error = %e, "Error saving to storage"),
        }
    }
}

/// Outcome of decoding stored JSON. `complete` is false when parts of the
/// stored value could not be kept.
#[derive(Debug)]
pub struct Decoded<T> {
    pub value: T,
    pub complete: bool,
}

impl<T> Decoded<T> {
    pub fn whole(value: T) -> Self {
        Self {
            value,
            complete: true,
        }
    }

    pub fn partial(value: T) -> Self {
        Self {
            value,
            complete: false,
        }
    }
}

/// Where a loaded value came from.
enum Origin {
    Missing,
    Merged,
    Partial,
    Fallback,
}

fn read_stored<T, F>(storage: &dyn Storage, key: &str, default: T, decode: F) -> (T, Origin)
where
    F: FnOnce(&T, Value) -> Result<Decoded<T>, serde_json::Error>,
{
    let raw = match storage.get_item(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (default, Origin::Missing),
        Err(e) => {
            warn!(key, error = %e, "Error reading from storage");
            return (default, Origin::Fallback);
        }
    };

    let stored: Value = match serde_json::from_str(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(key, error = %e, "Error parsing stored state");
            return (default, Origin::Fallback);
        }
    };

    match decode(&default, stored) {
        Ok(Decoded {
            value,
            complete: true,
        }) => (value, Origin::Merged),
        Ok(Decoded {
            value,
            complete: false,
        }) => {
            warn!(key, "Parts of the stored state were unreadable and skipped");
            (value, Origin::Partial)
        }
        Err(e) => {
            warn!(key, error = %e, "Stored state does not fit the current schema");
            (default, Origin::Fallback)
        }
    }
}

/// Reconcile `stored` against the serialized `default` and decode the result.
pub fn reconcile_typed<T>(default: &T, stored: Value) -> Result<T, serde_json::Error>
where
    T: Serialize + DeserializeOwned,
{
    let defaults = serde_json::to_value(default)?;
    serde_json::from_value(reconcile(defaults, stored))
}

/// Merge persisted JSON into the current schema's defaults.
///
/// - objects merge key by key, recursively;
/// - a key missing or `null` in `stored` keeps the default;
/// - a stored value whose JSON kind differs from a non-null default keeps the
///   default, which is what guards collection fields against scalars;
/// - keys the defaults do not know pass through untouched;
/// - an array default only accepts an array;
/// - a stored number is truncated into the integer range of its default.
pub fn reconcile(defaults: Value, stored: Value) -> Value {
    match (defaults, stored) {
        (defaults, Value::Null) => defaults,
        (Value::Object(mut merged), Value::Object(stored)) => {
            for (field, value) in stored {
                match merged.remove(&field) {
                    None => {
                        merged.insert(field, value);
                    }
                    Some(default) if default.is_null() => {
                        merged.insert(field, value);
                    }
                    Some(default) if value.is_null() => {
                        merged.insert(field, default);
                    }
                    Some(default) if !same_kind(&default, &value) => {
                        warn!(field = %field, "Stored field has the wrong type, using default");
                        merged.insert(field, default);
                    }
                    Some(default) => {
                        merged.insert(field, reconcile(default, value));
                    }
                }
            }
            Value::Object(merged)
        }
        (Value::Number(default), Value::Number(stored)) => Value::Number(coerce_number(&default, stored)),
        (defaults, stored) if !same_kind(&defaults, &stored) => {
            warn!("Stored value has the wrong type, using default");
            defaults
        }
        (_, stored) => stored,
    }
}

/// Bring a stored number into the integer range of its default, so that a
/// `1500.5` or `-3` never fails to decode into an unsigned amount.
fn coerce_number(default: &Number, stored: Number) -> Number {
    if default.is_u64() && !stored.is_u64() {
        let n = stored.as_f64().unwrap_or_default().max(0.0).trunc();
        Number::from(n as u64)
    } else if default.is_i64() && !stored.is_i64() {
        Number::from(stored.as_f64().unwrap_or_default().trunc() as i64)
    } else {
        stored
    }
}

fn same_kind(a: &Value, b: &Value) -> bool {
    std::mem::discriminant(a) == std::mem::discriminant(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LineItem, SalaryRecord};
    use crate::store::storage::MemoryStorage;
    use serde_json::json;

    fn defaults() -> Value {
        serde_json::to_value(SalaryRecord::default()).unwrap()
    }

    #[test]
    fn merging_defaults_with_itself_is_identity() {
        assert_eq!(reconcile(defaults(), defaults()), defaults());
    }

    #[test]
    fn merging_empty_object_yields_defaults() {
        assert_eq!(reconcile(defaults(), json!({})), defaults());
    }

    #[test]
    fn non_collection_allowances_fall_back() {
        let merged = reconcile(
            defaults(),
            json!({ "allowances": "oops", "otherDeductions": {"id": "1"} }),
        );
        assert_eq!(merged["allowances"], defaults()["allowances"]);
        assert_eq!(merged["otherDeductions"], json!([]));
    }

    #[test]
    fn stored_values_win_and_extra_fields_pass_through() {
        let merged = reconcile(
            defaults(),
            json!({
                "employeeName": "Dewi",
                "basicSalary": 7000000,
                "signatureImage": "data:image/png;base64,AA==",
                "legacyField": 1,
                "note": null
            }),
        );
        assert_eq!(merged["employeeName"], "Dewi");
        assert_eq!(merged["basicSalary"], 7_000_000);
        assert_eq!(merged["signatureImage"], "data:image/png;base64,AA==");
        assert_eq!(merged["legacyField"], 1);
        assert_eq!(merged["note"], "");
    }

    #[test]
    fn array_default_rejects_non_array() {
        assert_eq!(reconcile(json!([]), json!({"a": 1})), json!([]));
        assert_eq!(reconcile(json!([]), json!([1, 2])), json!([1, 2]));
    }

    #[test]
    fn load_falls_back_on_garbage_and_leaves_it_alone() {
        let storage = Arc::new(MemoryStorage::with_item("salary-slip-data", "{not json"));
        let state = StickyState::load(storage.clone(), "salary-slip-data", SalaryRecord::default());

        assert_eq!(state.get().basic_salary, 5_000_000);
        assert_eq!(
            storage.get_item("salary-slip-data").unwrap().as_deref(),
            Some("{not json")
        );
    }

    #[test]
    fn first_change_after_fallback_overwrites() {
        let storage = Arc::new(MemoryStorage::with_item("salary-slip-data", "{not json"));
        let mut state = StickyState::load(storage.clone(), "salary-slip-data", SalaryRecord::default());

        state.update(|r| r.employee_name = "Dewi".into());

        let raw = storage.get_item("salary-slip-data").unwrap().unwrap();
        let stored: SalaryRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.employee_name, "Dewi");
    }

    #[test]
    fn fractional_and_negative_amounts_are_truncated() {
        assert_eq!(reconcile(json!(0), json!(1500.75)), json!(1500));
        assert_eq!(reconcile(json!(0), json!(-3)), json!(0));
        assert_eq!(reconcile(json!(-1), json!(2.9)), json!(2));

        let storage = Arc::new(MemoryStorage::with_item(
            "salary-slip-data",
            r#"{"employeeName":"Rina","basicSalary":6000000.5}"#,
        ));
        let state = StickyState::load(storage.clone(), "salary-slip-data", SalaryRecord::default());

        assert_eq!(state.get().employee_name, "Rina");
        assert_eq!(state.get().basic_salary, 6_000_000);
        let raw = storage.get_item("salary-slip-data").unwrap().unwrap();
        assert!(raw.contains("\"basicSalary\":6000000"));
    }

    #[test]
    fn partial_decode_keeps_what_it_can_without_rewriting() {
        let raw = r#"[{"id":"1","name":"A","amount":1},"junk"]"#;
        let storage = Arc::new(MemoryStorage::with_item("items", raw));
        let state = StickyState::load_with(storage.clone(), "items", Vec::<LineItem>::new(), |_, stored| {
            let kept: Vec<LineItem> = stored
                .as_array()
                .into_iter()
                .flatten()
                .filter_map(|v| serde_json::from_value(v.clone()).ok())
                .collect();
            Ok(Decoded::partial(kept))
        });

        assert_eq!(state.get(), &vec![LineItem::new("1", "A", 1)]);
        assert_eq!(storage.get_item("items").unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn load_reconciles_old_shape() {
        let storage = Arc::new(MemoryStorage::with_item(
            "salary-slip-data",
            r#"{"employeeName":"Rina","basicSalary":6000000,"allowances":null}"#,
        ));
        let state = StickyState::load(storage, "salary-slip-data", SalaryRecord::default());

        assert_eq!(state.get().employee_name, "Rina");
        assert_eq!(state.get().basic_salary, 6_000_000);
        assert_eq!(state.get().allowances, SalaryRecord::default().allowances);
        assert!(state.get().other_deductions.is_empty());
    }

    #[test]
    fn every_change_is_written_through() {
        let storage = Arc::new(MemoryStorage::new());
        let mut state = StickyState::load(storage.clone(), "salary-slip-data", SalaryRecord::default());

        state.update(|r| r.allowances.push(LineItem::new("9", "Bonus", 1_000)));

        let raw = storage.get_item("salary-slip-data").unwrap().unwrap();
        let stored: SalaryRecord = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.allowances.len(), 3);
    }

    #[test]
    fn failed_try_update_writes_nothing() {
        let storage = Arc::new(MemoryStorage::new());
        let mut state = StickyState::load(storage.clone(), "saved-slips", Vec::<LineItem>::new());
        storage.set_item("saved-slips", "sentinel").unwrap();

        let out: Result<(), &str> = state.try_update(|_| Err("nope"));
        assert!(out.is_err());
        assert_eq!(storage.get_item("saved-slips").unwrap().as_deref(), Some("sentinel"));
    }
}

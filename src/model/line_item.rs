use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{AsRefStr, Display};
use tracing::warn;
use utoipa::ToSchema;

use crate::store::sticky::reconcile;

/// A named amount in one of the record's variable-length lists.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct LineItem {
    #[schema(example = "1767225600000")]
    pub id: String,

    #[serde(default)]
    #[schema(example = "Tunjangan Transport")]
    pub name: String,

    #[serde(default)]
    #[schema(example = 500000)]
    pub amount: u64,
}

impl LineItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, amount: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
        }
    }

    /// Reconcile one stored item against an empty one. Numeric ids become
    /// strings; anything that is not an object or has no id is dropped.
    pub(crate) fn salvage(stored: Value) -> Option<Value> {
        let Value::Object(mut fields) = stored else {
            warn!("Dropping stored line item that is not an object");
            return None;
        };
        if let Some(Value::Number(id)) = fields.get("id") {
            let id = id.to_string();
            fields.insert("id".to_string(), Value::String(id));
        }

        let defaults = serde_json::to_value(LineItem::default()).ok()?;
        let merged = reconcile(defaults, Value::Object(fields));
        match merged.get("id") {
            Some(Value::String(id)) if !id.is_empty() => Some(merged),
            _ => {
                warn!("Dropping stored line item without an id");
                None
            }
        }
    }
}

/// Which list of the record a line item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LineItemKind {
    /// `allowances`, added to earnings
    #[serde(rename = "allowances")]
    #[strum(serialize = "allowances")]
    Allowance,
    /// `otherDeductions`, added to deductions
    #[serde(rename = "deductions")]
    #[strum(serialize = "deductions")]
    OtherDeduction,
}

impl LineItemKind {
    /// Name given to a freshly added item.
    pub fn default_name(&self) -> &'static str {
        match self {
            LineItemKind::Allowance => "Tunjangan Baru",
            LineItemKind::OtherDeduction => "Potongan Lain",
        }
    }
}

/// Partial update of a line item; absent fields keep their value.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LineItemPatch {
    #[schema(example = "Tunjangan Jabatan")]
    pub name: Option<String>,

    #[schema(example = 750000)]
    pub amount: Option<u64>,
}

impl LineItemPatch {
    pub fn apply(&self, item: &mut LineItem) {
        if let Some(name) = &self.name {
            item.name = name.clone();
        }
        if let Some(amount) = self.amount {
            item.amount = amount;
        }
    }
}

/// Sum of the amounts, saturating instead of wrapping.
pub fn sum_amounts(items: &[LineItem]) -> u64 {
    items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(item.amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_and_amount_default() {
        let item: LineItem = serde_json::from_str(r#"{"id":"7"}"#).unwrap();
        assert_eq!(item, LineItem::new("7", "", 0));
    }

    #[test]
    fn salvage_repairs_single_fields() {
        let item = LineItem::salvage(serde_json::json!({"id": "3", "name": "Bonus", "amount": null}));
        assert_eq!(item, Some(serde_json::json!({"id": "3", "name": "Bonus", "amount": 0})));

        let item = LineItem::salvage(serde_json::json!({"id": 1767225600000u64, "amount": "lots"}));
        assert_eq!(
            item,
            Some(serde_json::json!({"id": "1767225600000", "name": "", "amount": 0}))
        );
    }

    #[test]
    fn salvage_drops_items_without_identity() {
        assert_eq!(LineItem::salvage(serde_json::json!("Bonus")), None);
        assert_eq!(LineItem::salvage(serde_json::json!({"name": "Bonus"})), None);
        assert_eq!(LineItem::salvage(serde_json::json!({"id": null})), None);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut item = LineItem::new("1", "Tunjangan Makan", 500_000);
        LineItemPatch {
            name: None,
            amount: Some(650_000),
        }
        .apply(&mut item);
        assert_eq!(item.name, "Tunjangan Makan");
        assert_eq!(item.amount, 650_000);
    }

    #[test]
    fn kind_path_names() {
        let kind: LineItemKind = serde_json::from_str(r#""deductions""#).unwrap();
        assert_eq!(kind, LineItemKind::OtherDeduction);
        assert_eq!(LineItemKind::Allowance.to_string(), "allowances");
    }

    #[test]
    fn sum_saturates() {
        let items = vec![LineItem::new("1", "a", u64::MAX), LineItem::new("2", "b", 5)];
        assert_eq!(sum_amounts(&items), u64::MAX);
        assert_eq!(sum_amounts(&[]), 0);
    }
}

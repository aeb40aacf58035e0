use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::model::image_slot::ImageSlot;
use crate::model::line_item::{LineItem, LineItemKind};
use crate::store::sticky::{Decoded, reconcile};

const ITEM_LISTS: [&str; 2] = ["allowances", "otherDeductions"];

/// Everything that describes one salary slip. The JSON shape (camelCase keys)
/// is also the persisted layout, so renaming a field orphans stored data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalaryRecord {
    // Employee
    #[schema(example = "Budi Santoso")]
    pub employee_name: String,
    #[serde(rename = "employeeNIK")]
    #[schema(example = "3174010101900001")]
    pub employee_nik: String,
    #[schema(example = "Staff Keuangan")]
    pub employee_role: String,
    #[serde(rename = "employeeNPWP")]
    #[schema(example = "09.254.294.3-407.000")]
    pub employee_npwp: String,
    /// Tax status such as `TK/0` or `K/1`
    #[schema(example = "TK/0")]
    pub employee_status: String,

    // Company
    pub company_name: String,
    pub company_address: String,
    pub company_phone: String,
    pub company_email: String,
    pub company_website: String,
    /// base64 data URI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,

    // Slip
    pub slip_title: String,
    pub slip_number: String,
    #[schema(example = "Januari 2026")]
    pub period: String,
    #[schema(example = "2026-01-31", format = "date")]
    pub date: String,

    // Earnings
    #[schema(example = 5000000)]
    pub basic_salary: u64,
    pub allowances: Vec<LineItem>,

    // Statutory deductions, counted only when switched on
    pub include_tax_pph21: bool,
    pub include_bpjs_health: bool,
    pub include_bpjs_labor: bool,
    pub tax_pph21: u64,
    pub bpjs_health: u64,
    pub bpjs_labor: u64,
    pub other_deductions: Vec<LineItem>,

    pub note: String,
    pub hr_name: String,
    pub hr_title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stamp_image: Option<String>,
}

impl Default for SalaryRecord {
    fn default() -> Self {
        Self {
            employee_name: String::new(),
            employee_nik: String::new(),
            employee_role: String::new(),
            employee_npwp: String::new(),
            employee_status: "TK/0".to_string(),

            company_name: "PT. MAJU MUNDUR SEJAHTERA".to_string(),
            company_address: "Jl. Sudirman No. 123, Jakarta Selatan".to_string(),
            company_phone: "(021) 555-1234".to_string(),
            company_email: "hrd@company.com".to_string(),
            company_website: "www.company.com".to_string(),
            company_logo: None,

            slip_title: "SLIP GAJI".to_string(),
            slip_number: "INV/2024/001".to_string(),
            period: "Januari 2026".to_string(),
            date: Local::now().date_naive().format("%Y-%m-%d").to_string(),

            basic_salary: 5_000_000,
            allowances: vec![
                LineItem::new("1", "Tunjangan Transport", 500_000),
                LineItem::new("2", "Tunjangan Makan", 500_000),
            ],

            include_tax_pph21: false,
            include_bpjs_health: false,
            include_bpjs_labor: false,
            tax_pph21: 0,
            bpjs_health: 0,
            bpjs_labor: 0,
            other_deductions: Vec::new(),

            note: String::new(),
            hr_name: "Manager HRD".to_string(),
            hr_title: "HRD Manager".to_string(),

            signature_image: None,
            stamp_image: None,
        }
    }
}

impl SalaryRecord {
    /// Decode a stored record against `default`. Line items are reconciled
    /// one by one; the result is partial when any of them had to be dropped.
    pub fn decode_stored(default: &SalaryRecord, stored: Value) -> Result<Decoded<SalaryRecord>, serde_json::Error> {
        let mut merged = reconcile(serde_json::to_value(default)?, stored);
        let mut complete = true;
        for list in ITEM_LISTS {
            if let Some(Value::Array(items)) = merged.get_mut(list) {
                let before = items.len();
                let kept: Vec<Value> = std::mem::take(items)
                    .into_iter()
                    .filter_map(LineItem::salvage)
                    .collect();
                complete &= kept.len() == before;
                *items = kept;
            }
        }

        let value = serde_json::from_value(merged)?;
        Ok(Decoded { value, complete })
    }

    pub fn items_mut(&mut self, kind: LineItemKind) -> &mut Vec<LineItem> {
        match kind {
            LineItemKind::Allowance => &mut self.allowances,
            LineItemKind::OtherDeduction => &mut self.other_deductions,
        }
    }

    pub fn image(&self, slot: ImageSlot) -> Option<&str> {
        match slot {
            ImageSlot::Logo => self.company_logo.as_deref(),
            ImageSlot::Signature => self.signature_image.as_deref(),
            ImageSlot::Stamp => self.stamp_image.as_deref(),
        }
    }

    pub fn set_image(&mut self, slot: ImageSlot, data_uri: Option<String>) {
        let target = match slot {
            ImageSlot::Logo => &mut self.company_logo,
            ImageSlot::Signature => &mut self.signature_image,
            ImageSlot::Stamp => &mut self.stamp_image,
        };
        *target = data_uri;
    }
}

/// Partial update of the scalar fields. Line items and images have their own
/// operations.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    pub employee_name: Option<String>,
    #[serde(rename = "employeeNIK")]
    pub employee_nik: Option<String>,
    pub employee_role: Option<String>,
    #[serde(rename = "employeeNPWP")]
    pub employee_npwp: Option<String>,
    pub employee_status: Option<String>,

    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_phone: Option<String>,
    pub company_email: Option<String>,
    pub company_website: Option<String>,

    pub slip_title: Option<String>,
    pub slip_number: Option<String>,
    pub period: Option<String>,
    pub date: Option<String>,

    #[schema(example = 5500000)]
    pub basic_salary: Option<u64>,

    pub include_tax_pph21: Option<bool>,
    pub include_bpjs_health: Option<bool>,
    pub include_bpjs_labor: Option<bool>,
    pub tax_pph21: Option<u64>,
    pub bpjs_health: Option<u64>,
    pub bpjs_labor: Option<u64>,

    pub note: Option<String>,
    pub hr_name: Option<String>,
    pub hr_title: Option<String>,
}

macro_rules! patch_fields {
    ($patch:expr, $record:expr, $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = $patch.$field.clone() {
                $record.$field = value;
            }
        )+
    };
}

impl RecordPatch {
    pub fn apply(&self, record: &mut SalaryRecord) {
        patch_fields!(
            self,
            record,
            employee_name,
            employee_nik,
            employee_role,
            employee_npwp,
            employee_status,
            company_name,
            company_address,
            company_phone,
            company_email,
            company_website,
            slip_title,
            slip_number,
            period,
            date,
            basic_salary,
            include_tax_pph21,
            include_bpjs_health,
            include_bpjs_labor,
            tax_pph21,
            bpjs_health,
            bpjs_labor,
            note,
            hr_name,
            hr_title,
        );
    }
}

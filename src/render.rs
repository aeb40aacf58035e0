//! Fixed-layout slip document built from a record and its totals. This is
//! what the live preview returns and what the PDF exporter draws.

use serde::Serialize;
use utoipa::ToSchema;

use crate::format::{amount_in_words, format_currency, format_long_date};
use crate::model::{ImageSlot, SalaryRecord};
use crate::totals::Totals;

pub const SIGN_PLACE: &str = "Jakarta";
pub const FOOTER: &str = "Dokumen ini dibuat secara otomatis dan sah.";

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct InfoField {
    #[schema(example = "NIK")]
    pub label: String,
    #[schema(example = "3174010101900001")]
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AmountRow {
    #[schema(example = "Gaji Pokok")]
    pub label: String,
    #[schema(example = 5000000)]
    pub amount: i64,
    #[schema(example = "Rp 5.000.000")]
    pub formatted: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AmountSection {
    #[schema(example = "Penerimaan")]
    pub title: String,
    pub rows: Vec<AmountRow>,
    pub total: AmountRow,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct HeaderView {
    pub company_name: String,
    pub company_address: String,
    /// `phone | email`
    pub contact_line: String,
    pub company_website: Option<String>,
    pub logo: Option<String>,
    pub slip_title: String,
    /// `No: <slip number>`
    pub slip_number_line: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SignatureView {
    /// `Jakarta, 10 Januari 2026`
    pub place_date: String,
    pub salutation: String,
    pub stamp_image: Option<String>,
    pub signature_image: Option<String>,
    pub signer_name: String,
    pub signer_title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SlipView {
    pub header: HeaderView,
    /// Nama / NIK / Jabatan
    pub employee_left: Vec<InfoField>,
    /// Periode / Status / NPWP
    pub employee_right: Vec<InfoField>,
    pub earnings: AmountSection,
    pub deductions: AmountSection,
    pub net: AmountRow,
    /// `Terbilang: ... Rupiah`
    pub net_in_words: String,
    pub note: Option<String>,
    pub signature: SignatureView,
    pub footer: String,
    pub totals: Totals,
}

fn or_dash(value: &str) -> String {
    if value.trim().is_empty() {
        "-".to_string()
    } else {
        value.to_string()
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.trim().is_empty()).then(|| value.to_string())
}

fn field(label: &str, value: String) -> InfoField {
    InfoField {
        label: label.to_string(),
        value,
    }
}

fn row(label: &str, amount: u64) -> AmountRow {
    signed_row(label, i64::try_from(amount).unwrap_or(i64::MAX))
}

fn signed_row(label: &str, amount: i64) -> AmountRow {
    AmountRow {
        label: label.to_string(),
        amount,
        formatted: format_currency(amount),
    }
}

impl SlipView {
    pub fn build(record: &SalaryRecord, totals: &Totals) -> Self {
        let header = HeaderView {
            company_name: record.company_name.clone(),
            company_address: record.company_address.clone(),
            contact_line: format!("{} | {}", record.company_phone, record.company_email),
            company_website: non_empty(&record.company_website),
            logo: record.image(ImageSlot::Logo).map(str::to_string),
            slip_title: record.slip_title.clone(),
            slip_number_line: format!("No: {}", record.slip_number),
        };

        let employee_left = vec![
            field("NIK", or_dash(&record.employee_nik)),
            field("Nama", or_dash(&record.employee_name)),
            field("Jabatan", or_dash(&record.employee_role)),
        ];
        let employee_right = vec![
            field("Periode", or_dash(&record.period)),
            field("Status", record.employee_status.clone()),
            field("NPWP", or_dash(&record.employee_npwp)),
        ];

        let mut earning_rows = vec![row("Gaji Pokok", record.basic_salary)];
        earning_rows.extend(record.allowances.iter().map(|a| row(&a.name, a.amount)));

        let mut deduction_rows = Vec::new();
        if record.include_tax_pph21 {
            deduction_rows.push(row("PPh 21", record.tax_pph21));
        }
        if record.include_bpjs_health {
            deduction_rows.push(row("BPJS Kesehatan", record.bpjs_health));
        }
        if record.include_bpjs_labor {
            deduction_rows.push(row("BPJS Ketenagakerjaan", record.bpjs_labor));
        }
        deduction_rows.extend(record.other_deductions.iter().map(|d| row(&d.name, d.amount)));

        let signer_title = if record.hr_title.trim().is_empty() {
            "HRD Manager".to_string()
        } else {
            record.hr_title.clone()
        };

        Self {
            header,
            employee_left,
            employee_right,
            earnings: AmountSection {
                title: "Penerimaan".to_string(),
                rows: earning_rows,
                total: row("Total Penerimaan (A)", totals.total_earnings),
            },
            deductions: AmountSection {
                title: "Potongan".to_string(),
                rows: deduction_rows,
                total: row("Total Potongan (B)", totals.total_deductions),
            },
            net: signed_row("Penerimaan Bersih (A - B)", totals.net_income),
            net_in_words: format!("Terbilang: {}", amount_in_words(totals.net_income)),
            note: non_empty(&record.note),
            signature: SignatureView {
                place_date: format!("{SIGN_PLACE}, {}", format_long_date(&record.date)),
                salutation: "Hormat Kami,".to_string(),
                stamp_image: record.image(ImageSlot::Stamp).map(str::to_string),
                signature_image: record.image(ImageSlot::Signature).map(str::to_string),
                signer_name: record.hr_name.clone(),
                signer_title,
            },
            footer: FOOTER.to_string(),
            totals: *totals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::LineItem;
    use crate::totals;

    fn sample() -> SalaryRecord {
        SalaryRecord {
            employee_name: "Budi Santoso".into(),
            employee_nik: String::new(),
            date: "2026-01-31".into(),
            include_bpjs_health: true,
            bpjs_health: 100_000,
            tax_pph21: 999_999,
            other_deductions: vec![LineItem::new("5", "Kasbon", 150_000)],
            note: "Bonus dibayar terpisah".into(),
            hr_title: String::new(),
            ..SalaryRecord::default()
        }
    }

    #[test]
    fn rows_follow_the_record() {
        let record = sample();
        let view = SlipView::build(&record, &totals::compute(&record));

        let earning_labels: Vec<_> = view.earnings.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(earning_labels, ["Gaji Pokok", "Tunjangan Transport", "Tunjangan Makan"]);

        // PPh 21 is switched off, so it is not listed even though it has an amount
        let deduction_labels: Vec<_> = view.deductions.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(deduction_labels, ["BPJS Kesehatan", "Kasbon"]);

        assert_eq!(view.earnings.total.formatted, "Rp\u{a0}6.000.000");
        assert_eq!(view.deductions.total.amount, 250_000);
        assert_eq!(view.net.amount, 5_750_000);
        assert_eq!(
            view.net_in_words,
            "Terbilang: Lima Juta Tujuh Ratus Lima Puluh Ribu Rupiah"
        );
    }

    #[test]
    fn empty_fields_and_defaults() {
        let record = sample();
        let view = SlipView::build(&record, &totals::compute(&record));

        assert_eq!(view.employee_left[0], InfoField { label: "NIK".into(), value: "-".into() });
        assert_eq!(view.employee_left[1].value, "Budi Santoso");
        assert_eq!(view.signature.signer_title, "HRD Manager");
        assert_eq!(view.signature.place_date, "Jakarta, 31 Januari 2026");
        assert_eq!(view.note.as_deref(), Some("Bonus dibayar terpisah"));
        assert_eq!(view.header.slip_number_line, "No: INV/2024/001");
        assert_eq!(view.footer, FOOTER);
    }

    #[test]
    fn building_does_not_touch_the_record() {
        let record = sample();
        let before = record.clone();
        let _ = SlipView::build(&record, &totals::compute(&record));
        assert_eq!(record, before);
    }
}

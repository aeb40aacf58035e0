use serde::Serialize;
use utoipa::ToSchema;

use crate::model::SalaryRecord;
use crate::model::line_item::sum_amounts;

/// Sums of the two line-item lists, the part worth memoizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineItemSums {
    pub allowances: u64,
    pub other_deductions: u64,
}

impl LineItemSums {
    pub fn of(record: &SalaryRecord) -> Self {
        Self {
            allowances: sum_amounts(&record.allowances),
            other_deductions: sum_amounts(&record.other_deductions),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Totals {
    #[schema(example = 1000000)]
    pub total_allowances: u64,
    #[schema(example = 0)]
    pub total_other_deductions: u64,
    #[schema(example = 6000000)]
    pub total_earnings: u64,
    #[schema(example = 250000)]
    pub total_deductions: u64,
    /// Signed, never clamped
    #[schema(example = 5750000)]
    pub net_income: i64,
}

/// Totals of a record. Pure; call it on every read.
pub fn compute(record: &SalaryRecord) -> Totals {
    compute_with(record, LineItemSums::of(record))
}

/// Same as [`compute`] with the list sums supplied by the caller.
pub fn compute_with(record: &SalaryRecord, sums: LineItemSums) -> Totals {
    let total_earnings = record.basic_salary.saturating_add(sums.allowances);

    let statutory = [
        (record.include_tax_pph21, record.tax_pph21),
        (record.include_bpjs_health, record.bpjs_health),
        (record.include_bpjs_labor, record.bpjs_labor),
    ]
    .into_iter()
    .filter(|(enabled, _)| *enabled)
    .fold(0u64, |acc, (_, amount)| acc.saturating_add(amount));

    let total_deductions = statutory.saturating_add(sums.other_deductions);

    Totals {
        total_allowances: sums.allowances,
        total_other_deductions: sums.other_deductions,
        total_earnings,
        total_deductions,
        net_income: signed_difference(total_earnings, total_deductions),
    }
}

fn signed_difference(a: u64, b: u64) -> i64 {
    let diff = i128::from(a) - i128::from(b);
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

use moka::future::Cache;
use once_cell::sync::Lazy;
use std::time::Duration;

use crate::model::LineItem;
use crate::model::line_item::sum_amounts;
use crate::totals::LineItemSums;

type SumsKey = (Vec<LineItem>, Vec<LineItem>);

/// Keyed on the two lists themselves, so a hit is always exact.
static LINE_ITEM_SUMS: Lazy<Cache<SumsKey, LineItemSums>> = Lazy::new(|| {
    Cache::builder()
        .max_capacity(1_024)
        .time_to_idle(Duration::from_secs(600))
        .build()
});

/// Memoized sums of the allowance and other-deduction lists.
pub async fn line_item_sums(allowances: &[LineItem], other_deductions: &[LineItem]) -> LineItemSums {
    let key = (allowances.to_vec(), other_deductions.to_vec());

    LINE_ITEM_SUMS
        .get_with(key, async {
            LineItemSums {
                allowances: sum_amounts(allowances),
                other_deductions: sum_amounts(other_deductions),
            }
        })
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SalaryRecord;
    use crate::totals;

    #[actix_web::test]
    async fn memoized_sums_match_direct_computation() {
        let mut record = SalaryRecord::default();
        record
            .other_deductions
            .push(LineItem::new("10", "Koperasi", 125_000));

        let first = line_item_sums(&record.allowances, &record.other_deductions).await;
        let second = line_item_sums(&record.allowances, &record.other_deductions).await;

        assert_eq!(first, second);
        assert_eq!(totals::compute_with(&record, first), totals::compute(&record));
    }

    #[actix_web::test]
    async fn changed_amount_is_a_different_key() {
        let a = vec![LineItem::new("1", "Transport", 100)];
        let b = vec![LineItem::new("1", "Transport", 200)];

        assert_eq!(line_item_sums(&a, &[]).await.allowances, 100);
        assert_eq!(line_item_sums(&b, &[]).await.allowances, 200);
    }
}

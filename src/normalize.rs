use crate::types::Transaction;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeSet, HashMap};

/// Two amounts closer than this are treated as the same value.
const AMOUNT_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

fn within_tolerance(a: Decimal, b: Decimal) -> bool {
    a.checked_sub(b)
        .is_some_and(|diff| diff.abs() < AMOUNT_TOLERANCE)
}

/// Whether `kept` holds an amount within the tolerance of `amount`. Only the
/// closest kept value on each side can qualify.
fn has_near_amount(kept: &BTreeSet<Decimal>, amount: Decimal) -> bool {
    let above = kept.range(amount..).next();
    let below = kept.range(..amount).next_back();
    above
        .into_iter()
        .chain(below)
        .any(|near| within_tolerance(*near, amount))
}

/// Drop repeated entries (first occurrence wins) and order by date.
///
/// Entries repeat when date and description match and the amounts differ by
/// less than one cent. The sort is stable, so entries sharing a date keep their
/// statement order.
pub fn normalize(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let total = transactions.len();
    let mut unique: Vec<Transaction> = Vec::with_capacity(total);
    let mut seen: HashMap<(NaiveDate, String), BTreeSet<Decimal>> = HashMap::new();

    for txn in transactions {
        let kept = seen.entry((txn.date, txn.description.clone())).or_default();
        if has_near_amount(kept, txn.amount) {
            tracing::trace!(date = %txn.date, description = %txn.description, "dropping duplicate");
            continue;
        }
        kept.insert(txn.amount);
        unique.push(txn);
    }

    unique.sort_by_key(|txn| txn.date);

    tracing::debug!(total, kept = unique.len(), "normalized transactions");
    unique
}

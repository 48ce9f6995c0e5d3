use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{CalendarDay, Transaction};

/// Append-only, insertion ordered store of a single transaction variant.
///
/// Queries hand back owned copies, so nothing a caller does with a result
/// can reach the ledger's own entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ledger<T> {
    entries: Vec<T>,
}

impl<T> Default for Ledger<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T: Transaction> Ledger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&mut self, entry: T) {
        tracing::debug!(
            id = entry.id(),
            date = %entry.date(),
            amount = %entry.amount(),
            kind = %entry.kind(),
            "ledger entry added"
        );
        self.entries.push(entry);
    }

    pub fn get_all(&self) -> Vec<T> {
        self.entries.clone()
    }

    pub fn get_transactions_by_date(&self, date: impl CalendarDay) -> Vec<T> {
        let day: NaiveDate = date.to_day();
        self.entries
            .iter()
            .filter(|entry| entry.date() == day)
            .cloned()
            .collect()
    }

    pub fn calculate_total(&self) -> Decimal {
        self.entries.iter().map(|entry| entry.amount()).sum()
    }

    /// Summary lines in insertion order.
    pub fn summaries(&self, date_format: &str) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| entry.summary_with(date_format))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Transaction> Extend<T> for Ledger<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for entry in iter {
            self.add_entry(entry);
        }
    }
}

impl<T: Transaction> FromIterator<T> for Ledger<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut ledger = Ledger::new();
        ledger.extend(iter);
        ledger
    }
}

/// Cloneable handle for sharing one ledger between threads.
///
/// Appends take the write lock and queries take the read lock, so an append
/// is never observed half done.
#[derive(Debug)]
pub struct SharedLedger<T> {
    inner: Arc<RwLock<Ledger<T>>>,
}

impl<T> Clone for SharedLedger<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Default for SharedLedger<T> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Ledger::default())),
        }
    }
}

impl<T: Transaction> SharedLedger<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_entry(&self, entry: T) {
        self.write().add_entry(entry);
    }

    pub fn get_all(&self) -> Vec<T> {
        self.read().get_all()
    }

    pub fn get_transactions_by_date(&self, date: impl CalendarDay) -> Vec<T> {
        self.read().get_transactions_by_date(date)
    }

    pub fn calculate_total(&self) -> Decimal {
        self.read().calculate_total()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Copy of the current contents as a plain ledger.
    pub fn snapshot(&self) -> Ledger<T> {
        self.read().clone()
    }

    // A panic while holding the lock can only interrupt a Vec push, which
    // leaves the entries intact, so poisoned guards are reused.
    fn read(&self) -> RwLockReadGuard<'_, Ledger<T>> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger<T>> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T: Transaction> From<Ledger<T>> for SharedLedger<T> {
    fn from(ledger: Ledger<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::transaction::{ExpenseTransaction, IncomeTransaction, DEFAULT_DATE_FORMAT};
    use rust_decimal_macros::dec;
    use std::thread;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn empty_ledger_has_zero_total_and_no_entries() {
        let ledger: Ledger<ExpenseTransaction> = Ledger::new();
        assert_eq!(ledger.calculate_total(), Decimal::ZERO);
        assert!(ledger.get_all().is_empty());
        assert!(ledger.get_transactions_by_date(day(1)).is_empty());
        assert!(ledger.is_empty());
    }

    #[test]
    fn keeps_duplicates_and_insertion_order() {
        let mut ledger = Ledger::new();
        ledger.add_entry(IncomeTransaction::new(1, day(1), dec!(10), "a", "Bank"));
        ledger.add_entry(IncomeTransaction::new(1, day(1), dec!(10), "a", "Bank"));
        ledger.add_entry(IncomeTransaction::new(9, day(2), dec!(5), "b", "Cash"));
        let ids: Vec<u32> = ledger.get_all().iter().map(|t| t.id()).collect();
        assert_eq!(ids, vec![1, 1, 9]);
        assert_eq!(ledger.calculate_total(), dec!(25));
    }

    #[test]
    fn returned_vectors_do_not_alias_storage() {
        let mut ledger = Ledger::new();
        ledger.add_entry(ExpenseTransaction::new(1, day(3), dec!(4.25), "tea", "Food"));
        let mut copy = ledger.get_all();
        copy.clear();
        let mut filtered = ledger.get_transactions_by_date(day(3));
        filtered.push(ExpenseTransaction::new(2, day(3), dec!(1), "x", "y"));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get_transactions_by_date(day(3)).len(), 1);
    }

    #[test]
    fn date_filter_ignores_time_of_day() {
        let mut ledger = Ledger::new();
        ledger.add_entry(ExpenseTransaction::new(1, day(3), dec!(1), "a", "Food"));
        let evening = day(3).and_hms_opt(21, 30, 0).unwrap();
        assert_eq!(ledger.get_transactions_by_date(evening).len(), 1);
    }

    #[test]
    fn collect_and_summaries_follow_insertion_order() {
        let ledger: Ledger<ExpenseTransaction> = vec![
            ExpenseTransaction::new(1, day(1), dec!(1), "first", "A"),
            ExpenseTransaction::new(2, day(1), dec!(2), "second", "B"),
        ]
        .into_iter()
        .collect();
        let lines = ledger.summaries(DEFAULT_DATE_FORMAT);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("first"));
        assert!(lines[1].contains("second"));
    }

    #[test]
    fn shared_ledger_serialises_concurrent_appends() {
        let shared: SharedLedger<IncomeTransaction> = SharedLedger::new();
        let handles: Vec<_> = (0..4u32)
            .map(|worker| {
                let ledger = shared.clone();
                thread::spawn(move || {
                    for n in 0..25u32 {
                        ledger.add_entry(IncomeTransaction::new(
                            worker * 100 + n,
                            day(1),
                            dec!(1.10),
                            "worker",
                            "Cash",
                        ));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(shared.len(), 100);
        assert_eq!(shared.calculate_total(), dec!(110.00));
        assert_eq!(shared.snapshot().len(), 100);
    }

    #[test]
    fn shared_ledger_answers_after_poisoned_write() {
        let shared: SharedLedger<ExpenseTransaction> = SharedLedger::new();
        shared.add_entry(ExpenseTransaction::new(1, day(2), dec!(3.30), "ink", "Office"));

        let handle = shared.clone();
        let outcome = thread::spawn(move || {
            let _guard = handle.write();
            panic!("writer died holding the lock");
        })
        .join();
        assert!(outcome.is_err());
        assert!(shared.inner.is_poisoned());

        assert_eq!(shared.len(), 1);
        assert_eq!(shared.calculate_total(), dec!(3.30));
        shared.add_entry(ExpenseTransaction::new(2, day(2), dec!(0.70), "tape", "Office"));
        assert_eq!(shared.calculate_total(), dec!(4.00));
    }
}

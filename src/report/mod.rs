//! End-of-run aggregation across the income and expense ledgers.

use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::ledger::{ExpenseTransaction, IncomeTransaction, Ledger, Reportable, DEFAULT_DATE_FORMAT};

/// Income minus expenses, exact.
pub fn net_balance(total_income: Decimal, total_expense: Decimal) -> Decimal {
    total_income - total_expense
}

/// Summaries for a mixed list of entries, in the order given.
pub fn combined_summaries(entries: &[&dyn Reportable], date_format: &str) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry.summary_with(date_format))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerReport {
    pub total_income: Decimal,
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    pub lines: Vec<String>,
}

impl LedgerReport {
    pub fn build(
        income: &Ledger<IncomeTransaction>,
        expense: &Ledger<ExpenseTransaction>,
    ) -> Self {
        Self::build_with(income, expense, DEFAULT_DATE_FORMAT)
    }

    /// Totals both ledgers and lists every income entry, then every expense,
    /// each group in insertion order.
    pub fn build_with(
        income: &Ledger<IncomeTransaction>,
        expense: &Ledger<ExpenseTransaction>,
        date_format: &str,
    ) -> Self {
        let total_income = income.calculate_total();
        let total_expense = expense.calculate_total();

        let incomes = income.get_all();
        let expenses = expense.get_all();
        let entries: Vec<&dyn Reportable> = incomes
            .iter()
            .map(|entry| entry as &dyn Reportable)
            .chain(expenses.iter().map(|entry| entry as &dyn Reportable))
            .collect();
        let lines = combined_summaries(&entries, date_format);

        tracing::info!(
            incomes = incomes.len(),
            expenses = expenses.len(),
            %total_income,
            %total_expense,
            "ledger report built"
        );

        Self {
            total_income,
            total_expense,
            net_balance: net_balance(total_income, total_expense),
            lines,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for LedgerReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Income: {}", self.total_income)?;
        writeln!(f, "Total Expenses: {}", self.total_expense)?;
        writeln!(f, "Net Balance: {}", self.net_balance)?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

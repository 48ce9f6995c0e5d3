use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::cli::{output, parse_amount, prompts::PromptSource};
use crate::config::Config;
use crate::errors::LedgerResult;
use crate::ledger::{ExpenseTransaction, IncomeTransaction, Ledger};
use crate::report::LedgerReport;

/// Owns the two ledgers for one console run and hands out entry ids.
pub struct Session {
    config: Config,
    income: Ledger<IncomeTransaction>,
    expense: Ledger<ExpenseTransaction>,
    next_id: u32,
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            income: Ledger::new(),
            expense: Ledger::new(),
            next_id: 1,
        }
    }

    pub fn record_income(&mut self, date: NaiveDate, amount: Decimal, source: &str) -> u32 {
        let id = self.allocate_id();
        self.income.add_entry(IncomeTransaction::new(
            id,
            date,
            amount,
            self.config.income_description.clone(),
            source,
        ));
        id
    }

    pub fn record_expense(&mut self, date: NaiveDate, amount: Decimal, category: &str) -> u32 {
        let id = self.allocate_id();
        self.expense.add_entry(ExpenseTransaction::new(
            id,
            date,
            amount,
            self.config.expense_description.clone(),
            category,
        ));
        id
    }

    pub fn income(&self) -> &Ledger<IncomeTransaction> {
        &self.income
    }

    pub fn expense(&self) -> &Ledger<ExpenseTransaction> {
        &self.expense
    }

    pub fn report(&self) -> LedgerReport {
        LedgerReport::build_with(&self.income, &self.expense, &self.config.date_format)
    }

    /// Ids wrap after `u32::MAX`; the ledger does not require them unique.
    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }
}

/// Asks for one income and one expense, both dated `today`, and returns the
/// resulting report.
pub fn run<P: PromptSource>(
    prompts: &mut P,
    config: Config,
    today: NaiveDate,
) -> LedgerResult<LedgerReport> {
    let mut session = Session::new(config);

    let income_amount = prompt_amount(prompts, "Enter income amount:")?;
    let income_source = prompts.text("Enter income source:")?;
    session.record_income(today, income_amount, &income_source);

    let expense_amount = prompt_amount(prompts, "Enter expense amount:")?;
    let expense_category = prompts.text("Enter expense category:")?;
    session.record_expense(today, expense_amount, &expense_category);

    Ok(session.report())
}

fn prompt_amount<P: PromptSource>(prompts: &mut P, label: &str) -> LedgerResult<Decimal> {
    loop {
        let raw = prompts.text(label)?;
        match parse_amount(&raw) {
            Ok(amount) => return Ok(amount),
            Err(err) => {
                tracing::warn!(input = %raw, "rejected amount input");
                output::error(err);
            }
        }
    }
}

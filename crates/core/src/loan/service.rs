//! EMI and repayment progress calculations.

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};

use super::error::LoanError;
use super::types::{AmortizationRow, LoanProgress, LoanTerms};

/// Loan service for amortization math.
pub struct LoanService;

impl LoanService {
    /// Fixed monthly installment for the given terms.
    ///
    /// `P / N` when the rate is zero, otherwise the annuity formula
    /// `P·R·(1+R)^N / ((1+R)^N − 1)` with `R = annual_rate / 12 / 100`.
    /// A zero tenure yields zero.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::Overflow` if `(1+R)^N` leaves decimal range.
    pub fn monthly_payment(terms: &LoanTerms) -> Result<Decimal, LoanError> {
        if terms.tenure_months == 0 {
            return Ok(Decimal::ZERO);
        }

        let n = Decimal::from(terms.tenure_months);
        let rate = terms.monthly_rate();
        if rate.is_zero() {
            return Ok(terms.principal / n);
        }

        let growth = (Decimal::ONE + rate)
            .checked_powu(u64::from(terms.tenure_months))
            .ok_or(LoanError::Overflow)?;

        terms
            .principal
            .checked_mul(rate)
            .and_then(|v| v.checked_mul(growth))
            .and_then(|v| v.checked_div(growth - Decimal::ONE))
            .ok_or(LoanError::Overflow)
    }

    /// Due date of installment `installment` for a loan starting on `start`.
    ///
    /// Calendar month arithmetic: a start on the 31st falls due on the last
    /// day of shorter months.
    #[must_use]
    pub fn due_date(start: NaiveDate, installment: u32) -> NaiveDate {
        start
            .checked_add_months(Months::new(installment))
            .unwrap_or(NaiveDate::MAX)
    }

    /// Installments that have fallen due between `start` and `as_of`, clamped to
    /// `[0, tenure]`.
    ///
    /// Installment `k` counts once `as_of` reaches [`Self::due_date`]`(start, k)`,
    /// so progress and the schedule agree on month-end starts.
    #[must_use]
    pub fn months_elapsed(start: NaiveDate, as_of: NaiveDate, tenure_months: u32) -> u32 {
        if as_of <= start {
            return 0;
        }

        let calendar = (as_of.year() - start.year()) * 12
            + (i32::try_from(as_of.month()).unwrap_or(0) - i32::try_from(start.month()).unwrap_or(0));
        let mut months = u32::try_from(calendar.max(0))
            .unwrap_or(0)
            .min(tenure_months);

        // The calendar difference overshoots by at most the current month.
        while months > 0 && Self::due_date(start, months) > as_of {
            months -= 1;
        }
        months
    }

    /// Repayment progress as of `as_of`.
    ///
    /// # Errors
    ///
    /// Propagates `LoanError::Overflow` from the installment calculation.
    pub fn progress(terms: &LoanTerms, as_of: NaiveDate) -> Result<LoanProgress, LoanError> {
        let payment = Self::monthly_payment(terms)?;
        let months_paid = Self::months_elapsed(terms.start_date, as_of, terms.tenure_months);

        let total_payable = payment * Decimal::from(terms.tenure_months);
        let amount_paid = payment * Decimal::from(months_paid);
        let progress_percent = if total_payable.is_zero() {
            Decimal::ZERO
        } else {
            amount_paid / total_payable * Decimal::ONE_HUNDRED
        };

        Ok(LoanProgress {
            monthly_payment: payment,
            total_payable,
            total_interest: (total_payable - terms.principal).max(Decimal::ZERO),
            months_paid,
            months_remaining: terms.tenure_months - months_paid,
            amount_paid,
            amount_remaining: total_payable - amount_paid,
            progress_percent,
        })
    }

    /// Month-by-month split of each installment into interest and principal.
    ///
    /// Balances follow the exact annuity and are rounded to 2 decimal places
    /// for display. Each row's principal is the drop in the displayed balance
    /// and its payment is `interest + principal`, so principals sum to the loan
    /// amount and the balance first reaches zero on the final installment.
    ///
    /// # Errors
    ///
    /// Returns `LoanError::Overflow` if `(1+R)^N` leaves decimal range.
    pub fn schedule(terms: &LoanTerms) -> Result<Vec<AmortizationRow>, LoanError> {
        let tenure = terms.tenure_months;
        let rate = terms.monthly_rate();
        let growth = (Decimal::ONE + rate)
            .checked_powu(u64::from(tenure))
            .ok_or(LoanError::Overflow)?;

        let mut compounded = Decimal::ONE;
        let mut opening = terms.principal;
        let mut opening_shown = terms.principal.round_dp(2);
        let mut rows = Vec::with_capacity(tenure as usize);

        for installment in 1..=tenure {
            compounded = compounded
                .checked_mul(Decimal::ONE + rate)
                .ok_or(LoanError::Overflow)?;
            let closing = if installment == tenure {
                Decimal::ZERO
            } else {
                Self::outstanding(terms, growth, compounded, installment)
            };
            let closing_shown = closing.round_dp(2);

            let interest = (opening * rate).round_dp(2);
            let principal = opening_shown - closing_shown;

            rows.push(AmortizationRow {
                installment,
                due_date: Self::due_date(terms.start_date, installment),
                payment: interest + principal,
                interest,
                principal,
                balance: closing_shown,
            });

            opening = closing;
            opening_shown = closing_shown;
        }

        Ok(rows)
    }

    /// Exact balance left after `paid` installments.
    ///
    /// `P·((1+R)^N − (1+R)^k) / ((1+R)^N − 1)`, or `P·(N − k) / N` at a zero
    /// rate. Evaluated in closed form so rounding does not compound.
    fn outstanding(terms: &LoanTerms, growth: Decimal, compounded: Decimal, paid: u32) -> Decimal {
        let tenure = Decimal::from(terms.tenure_months);
        let share = if terms.monthly_rate().is_zero() {
            (tenure - Decimal::from(paid)) / tenure
        } else {
            (growth - compounded) / (growth - Decimal::ONE)
        };
        terms.principal * share
    }
}

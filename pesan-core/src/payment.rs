use std::collections::HashMap;
use std::sync::{Mutex, PoisonError, RwLock};

/// Charges an account for an order
pub trait PaymentService: Send + Sync {
    /// Debit `amount` from the account. Returns false, leaving the balance
    /// untouched, when the account cannot cover it.
    fn process_payment(&self, account_number: &str, amount: i64) -> bool;
}

/// Single balance shared by every account number
pub struct PaymentAccount {
    balance: Mutex<i64>,
}

impl PaymentAccount {
    pub fn new(initial_balance: i64) -> Self {
        Self {
            balance: Mutex::new(initial_balance),
        }
    }

    pub fn balance(&self) -> i64 {
        *self.balance.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PaymentService for PaymentAccount {
    fn process_payment(&self, account_number: &str, amount: i64) -> bool {
        let mut balance = self.balance.lock().unwrap_or_else(PoisonError::into_inner);

        if *balance < amount {
            tracing::info!(account_number, amount, balance = *balance, "Insufficient balance");
            return false;
        }

        tracing::info!(
            account_number,
            amount,
            "Processing payment of {} from account {}",
            amount,
            account_number
        );
        *balance = balance.saturating_sub(amount);
        true
    }
}

/// Balances keyed by account number, each behind its own lock
#[derive(Default)]
pub struct AccountLedger {
    accounts: RwLock<HashMap<String, Mutex<i64>>>,
}

impl AccountLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open (or reset) an account with a starting balance
    pub fn open(&self, account_number: impl Into<String>, balance: i64) {
        self.accounts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(account_number.into(), Mutex::new(balance));
    }

    pub fn balance(&self, account_number: &str) -> Option<i64> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        accounts
            .get(account_number)
            .map(|balance| *balance.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Credit an existing account, returning the new balance
    pub fn deposit(&self, account_number: &str, amount: i64) -> Result<i64, PaymentError> {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let mut balance = accounts
            .get(account_number)
            .ok_or_else(|| PaymentError::AccountNotFound(account_number.to_string()))?
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        *balance = balance.saturating_add(amount);
        Ok(*balance)
    }
}

impl PaymentService for AccountLedger {
    fn process_payment(&self, account_number: &str, amount: i64) -> bool {
        let accounts = self.accounts.read().unwrap_or_else(PoisonError::into_inner);
        let Some(slot) = accounts.get(account_number) else {
            tracing::warn!(account_number, "Unknown account, payment refused");
            return false;
        };
        let mut balance = slot.lock().unwrap_or_else(PoisonError::into_inner);

        if *balance < amount {
            tracing::info!(account_number, amount, balance = *balance, "Insufficient balance");
            return false;
        }

        tracing::info!(
            account_number,
            amount,
            "Processing payment of {} from account {}",
            amount,
            account_number
        );
        *balance = balance.saturating_sub(amount);
        true
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum PaymentError {
    #[error("Account not found: {0}")]
    AccountNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_debits_when_covered() {
        let account = PaymentAccount::new(450_000);

        assert!(account.process_payment("ACC123", 300_000));
        assert_eq!(account.balance(), 150_000);
    }

    #[test]
    fn test_payment_refused_leaves_balance() {
        let account = PaymentAccount::new(100_000);

        assert!(!account.process_payment("ACC123", 300_000));
        assert_eq!(account.balance(), 100_000);
    }

    #[test]
    fn test_exact_balance_is_enough() {
        let account = PaymentAccount::new(500);

        assert!(account.process_payment("any", 500));
        assert_eq!(account.balance(), 0);
    }

    #[test]
    fn test_account_number_is_not_used_to_select() {
        let account = PaymentAccount::new(1_000);

        assert!(account.process_payment("A", 600));
        // Different number, same pool
        assert!(!account.process_payment("B", 600));
        assert_eq!(account.balance(), 400);
    }

    #[test]
    fn test_negative_amount_is_accepted() {
        let account = PaymentAccount::new(10);

        assert!(account.process_payment("ACC123", -5));
        assert_eq!(account.balance(), 15);
    }

    #[test]
    fn test_ledger_keeps_accounts_apart() {
        let ledger = AccountLedger::new();
        ledger.open("ACC1", 1_000);
        ledger.open("ACC2", 50);

        assert!(ledger.process_payment("ACC1", 700));
        assert!(!ledger.process_payment("ACC2", 700));
        assert_eq!(ledger.balance("ACC1"), Some(300));
        assert_eq!(ledger.balance("ACC2"), Some(50));
    }

    #[test]
    fn test_ledger_unknown_account() {
        let ledger = AccountLedger::new();

        assert!(!ledger.process_payment("NOPE", 1));
        assert_eq!(ledger.balance("NOPE"), None);
        assert_eq!(
            ledger.deposit("NOPE", 10),
            Err(PaymentError::AccountNotFound("NOPE".to_string()))
        );
    }

    #[test]
    fn test_ledger_deposit() {
        let ledger = AccountLedger::new();
        ledger.open("ACC1", 100);

        assert_eq!(ledger.deposit("ACC1", 250), Ok(350));
        assert!(ledger.process_payment("ACC1", 350));
        assert_eq!(ledger.balance("ACC1"), Some(0));
    }
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{EntityRecord, RecordMeta};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Payment,
    Refund,
    Payout,
    Commission,
    Topup,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Payment => "payment",
            TransactionKind::Refund => "refund",
            TransactionKind::Payout => "payout",
            TransactionKind::Commission => "commission",
            TransactionKind::Topup => "topup",
        }
    }

    pub fn all() -> [TransactionKind; 5] {
        [
            TransactionKind::Payment,
            TransactionKind::Refund,
            TransactionKind::Payout,
            TransactionKind::Commission,
            TransactionKind::Topup,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    #[default]
    Pending,
    Completed,
    Failed,
}

impl TransactionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionStatus::Pending => "pending",
            TransactionStatus::Completed => "completed",
            TransactionStatus::Failed => "failed",
        }
    }

    pub fn all() -> [TransactionStatus; 3] {
        [
            TransactionStatus::Pending,
            TransactionStatus::Completed,
            TransactionStatus::Failed,
        ]
    }
}

/// Денежная операция
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(flatten)]
    pub meta: RecordMeta,
    pub user_id: Uuid,
    pub amount: f64,
    pub kind: TransactionKind,
    #[serde(default)]
    pub ride_id: Option<Uuid>,
    #[serde(default)]
    pub status: TransactionStatus,
    #[serde(default)]
    pub description: String,
}

impl Transaction {
    /// Знак суммы для итогов: возвраты и выплаты уменьшают оборот
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Refund | TransactionKind::Payout => -self.amount,
            _ => self.amount,
        }
    }
}

impl EntityRecord for Transaction {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn validate(&self) -> Result<(), String> {
        if self.amount < 0.0 {
            return Err("Amount cannot be negative".to_string());
        }
        Ok(())
    }

    fn entity_index() -> &'static str {
        "a014"
    }

    fn collection_name() -> &'static str {
        "transaction"
    }

    fn element_name() -> &'static str {
        "Transaction"
    }

    fn list_name() -> &'static str {
        "Transactions"
    }
}

/// Сумма завершённых операций с учётом знака
pub fn completed_total(items: &[Transaction]) -> f64 {
    items
        .iter()
        .filter(|t| t.status == TransactionStatus::Completed)
        .map(Transaction::signed_amount)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(amount: f64, kind: TransactionKind, status: TransactionStatus) -> Transaction {
        Transaction {
            meta: RecordMeta::new(),
            user_id: Uuid::new_v4(),
            amount,
            kind,
            ride_id: None,
            status,
            description: String::new(),
        }
    }

    #[test]
    fn test_completed_total_respects_sign_and_status() {
        let items = vec![
            tx(20.0, TransactionKind::Payment, TransactionStatus::Completed),
            tx(5.0, TransactionKind::Refund, TransactionStatus::Completed),
            tx(100.0, TransactionKind::Payment, TransactionStatus::Failed),
        ];
        assert_eq!(completed_total(&items), 15.0);
    }
}

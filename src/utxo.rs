use crate::{OutputIndex, TransactionId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Identifies a spendable output by the transaction that produced it and the position of the
/// output in that transaction.
/// Ordering is by transaction id first and output index second.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Utxo {
    transaction_id: TransactionId,
    output_index: OutputIndex,
}

impl Utxo {
    pub fn new(transaction_id: TransactionId, output_index: OutputIndex) -> Self {
        Self {
            transaction_id,
            output_index,
        }
    }

    pub fn transaction_id(&self) -> &TransactionId {
        &self.transaction_id
    }

    pub fn output_index(&self) -> OutputIndex {
        self.output_index
    }
}

impl Display for Utxo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.transaction_id, self.output_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sha256;

    fn id(byte: u8) -> TransactionId {
        TransactionId::new(Sha256::from_raw([byte; 32]))
    }

    #[test]
    fn orders_by_transaction_id_then_index() {
        let mut utxos = vec![
            Utxo::new(id(2), OutputIndex::new(0)),
            Utxo::new(id(1), OutputIndex::new(7)),
            Utxo::new(id(1), OutputIndex::new(3)),
        ];
        utxos.sort();
        assert_eq!(
            utxos,
            vec![
                Utxo::new(id(1), OutputIndex::new(3)),
                Utxo::new(id(1), OutputIndex::new(7)),
                Utxo::new(id(2), OutputIndex::new(0)),
            ]
        );
    }

    #[test]
    fn equality_uses_both_fields() {
        assert_eq!(
            Utxo::new(id(1), OutputIndex::new(0)),
            Utxo::new(id(1), OutputIndex::new(0))
        );
        assert_ne!(
            Utxo::new(id(1), OutputIndex::new(0)),
            Utxo::new(id(1), OutputIndex::new(1))
        );
    }

    #[test]
    fn display() {
        let utxo = Utxo::new(id(0), OutputIndex::new(5));
        assert_eq!(utxo.to_string(), format!("{}:5", "00".repeat(32)));
    }
}

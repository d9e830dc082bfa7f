use crate::error::{LedgerError, LedgerResult};
use crate::{Coin, Transaction, TransactionOutput, Utxo};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Iter;
use std::collections::{HashMap, HashSet};

/// A pool of confirmed and unspent transaction outputs.
/// Cloning the pool produces an independent copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtxoPool {
    // Unspent transaction outputs, indexed by their transaction ID and their index in the
    // transaction.
    utxos: HashMap<Utxo, TransactionOutput>,
}

impl UtxoPool {
    pub fn new() -> Self {
        Self {
            utxos: HashMap::new(),
        }
    }

    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.utxos.contains_key(utxo)
    }

    pub fn get_output(&self, utxo: &Utxo) -> LedgerResult<&TransactionOutput> {
        self.utxos
            .get(utxo)
            .ok_or(LedgerError::UtxoNotFound(*utxo))
    }

    /// Inserts the output, returning the one previously stored under `utxo`, if any.
    pub fn add(&mut self, utxo: Utxo, output: TransactionOutput) -> Option<TransactionOutput> {
        self.utxos.insert(utxo, output)
    }

    /// Removes the output stored under `utxo`.
    /// Removing an absent UTXO is an error and leaves the pool unchanged.
    pub fn remove(&mut self, utxo: &Utxo) -> LedgerResult<TransactionOutput> {
        self.utxos
            .remove(utxo)
            .ok_or(LedgerError::UtxoNotFound(*utxo))
    }

    /// Spends every input of the transaction and adds its outputs.
    /// Either all changes are applied or, on error, none are.
    pub fn apply(&mut self, transaction: &Transaction) -> LedgerResult<()> {
        let mut spent = HashSet::with_capacity(transaction.num_inputs());
        for utxo in transaction.spent_utxos() {
            if !self.contains(utxo) {
                return Err(LedgerError::UtxoNotFound(*utxo));
            }
            if !spent.insert(utxo) {
                return Err(LedgerError::DuplicateInput(*utxo));
            }
        }

        for utxo in spent {
            self.utxos.remove(utxo);
        }
        for (utxo, output) in transaction.created_utxos() {
            self.utxos.insert(utxo, output.clone());
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Utxo, TransactionOutput> {
        self.utxos.iter()
    }

    /// Returns all unspent outputs in ascending order.
    pub fn utxos(&self) -> Vec<Utxo> {
        let mut utxos = self.utxos.keys().copied().collect::<Vec<Utxo>>();
        utxos.sort();
        utxos
    }

    pub fn total_value(&self) -> LedgerResult<Coin> {
        Coin::checked_sum(self.utxos.values().map(TransactionOutput::amount))
            .ok_or(LedgerError::Overflow)
    }
}

impl FromIterator<(Utxo, TransactionOutput)> for UtxoPool {
    fn from_iter<T: IntoIterator<Item = (Utxo, TransactionOutput)>>(iter: T) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Utxo, TransactionOutput)> for UtxoPool {
    fn extend<T: IntoIterator<Item = (Utxo, TransactionOutput)>>(&mut self, iter: T) {
        self.utxos.extend(iter)
    }
}

impl<'a> IntoIterator for &'a UtxoPool {
    type Item = (&'a Utxo, &'a TransactionOutput);
    type IntoIter = Iter<'a, Utxo, TransactionOutput>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

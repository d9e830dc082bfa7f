use crate::error::ValidationResult;
use crate::{
    Coin, HandlerParams, SelectionPolicy, SignatureVerifier, Transaction, TransactionValidator,
    Utxo, UtxoPool,
};
use std::collections::HashSet;
use tracing::{debug, info, trace};

/// The result of processing one batch of candidate transactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EpochOutcome {
    // Accepted transactions, in the order defined by the selection policy.
    pub accepted: Vec<Transaction>,
    // Sum of the fees of the accepted transactions.
    pub total_fees: Coin,
    // Number of candidates that were not accepted, malformed ones included.
    pub rejected: usize,
}

/// Processes batches of proposed transactions against a ledger that it owns exclusively.
///
/// Each accepted transaction is applied to the ledger: the outputs it spends are removed and
/// the outputs it creates are added. The ledger after a batch is the starting point of the
/// next one.
pub struct TxHandler<V> {
    utxo_pool: UtxoPool,
    verifier: V,
    params: HandlerParams,
}

impl<V: SignatureVerifier> TxHandler<V> {
    pub fn new(utxo_pool: UtxoPool, verifier: V) -> Self {
        Self::with_params(utxo_pool, verifier, HandlerParams::default())
    }

    pub fn with_params(utxo_pool: UtxoPool, verifier: V, params: HandlerParams) -> Self {
        Self {
            utxo_pool,
            verifier,
            params,
        }
    }

    /// Creates a handler over a copy of `utxo_pool`. Later batches never modify the caller's pool.
    pub fn from_snapshot(utxo_pool: &UtxoPool, verifier: V) -> Self {
        Self::new(utxo_pool.clone(), verifier)
    }

    pub fn policy(&self) -> SelectionPolicy {
        self.params.policy
    }

    pub fn utxo_pool(&self) -> &UtxoPool {
        &self.utxo_pool
    }

    /// Returns a copy of the current ledger.
    pub fn snapshot(&self) -> UtxoPool {
        self.utxo_pool.clone()
    }

    pub fn into_utxo_pool(self) -> UtxoPool {
        self.utxo_pool
    }

    pub fn is_valid_tx(&self, transaction: &Transaction) -> bool {
        TransactionValidator::is_valid(transaction, &self.utxo_pool, &self.verifier)
    }

    /// Returns the fee of the transaction if it is valid against the current ledger.
    pub fn validate(&self, transaction: &Transaction) -> ValidationResult<Coin> {
        TransactionValidator::validate(transaction, &self.utxo_pool, &self.verifier)
    }

    /// Accepts a mutually valid subset of `candidates`, updates the ledger accordingly and
    /// returns the accepted transactions.
    pub fn handle_txs(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        self.handle_epoch(candidates).accepted
    }

    pub fn handle_epoch(&mut self, candidates: &[Transaction]) -> EpochOutcome {
        let well_formed = Self::well_formed(candidates);
        let selected = match self.params.policy {
            SelectionPolicy::InOrder => self.select_in_order(&well_formed),
            SelectionPolicy::MaxFee => self.select_by_fee(&well_formed),
        };

        let total_fees = selected
            .iter()
            .fold(Coin::zero(), |total, (_, fee)| total.saturating_add(*fee));
        let accepted = selected
            .into_iter()
            .map(|(transaction, _)| transaction.clone())
            .collect::<Vec<Transaction>>();
        let rejected = candidates.len() - accepted.len();
        info!(
            policy = %self.params.policy,
            candidates = candidates.len(),
            accepted = accepted.len(),
            total_fees = total_fees.value(),
            "Processed transaction batch"
        );

        EpochOutcome {
            accepted,
            total_fees,
            rejected,
        }
    }

    fn well_formed(candidates: &[Transaction]) -> Vec<&Transaction> {
        candidates
            .iter()
            .filter(
                |transaction| match TransactionValidator::validate_well_formed(transaction) {
                    Ok(()) => true,
                    Err(e) => {
                        debug!(transaction = %transaction.id(), reason = %e, "Skipping transaction");
                        false
                    }
                },
            )
            .collect()
    }

    // Visits the candidates once in batch order. Each one is validated against the ledger as
    // updated by the previous acceptances, so a candidate may spend outputs created earlier in
    // the same batch.
    fn select_in_order<'a>(
        &mut self,
        candidates: &[&'a Transaction],
    ) -> Vec<(&'a Transaction, Coin)> {
        let mut accepted = vec![];
        for transaction in candidates {
            let fee = match self.validate(transaction) {
                Ok(fee) => fee,
                Err(e) => {
                    debug!(transaction = %transaction.id(), reason = %e, "Rejected transaction");
                    continue;
                }
            };
            if self.accept(transaction) {
                accepted.push((*transaction, fee));
            }
        }
        accepted
    }

    // Validates every candidate against the ledger as it is at the start of the batch, then
    // accepts them by descending fee unless they spend an output already spent by an accepted
    // one. Candidates that are only valid because of another candidate in the batch are not
    // accepted.
    fn select_by_fee<'a>(
        &mut self,
        candidates: &[&'a Transaction],
    ) -> Vec<(&'a Transaction, Coin)> {
        let mut by_fee = candidates
            .iter()
            .filter_map(|transaction| match self.validate(transaction) {
                Ok(fee) => Some((*transaction, fee)),
                Err(e) => {
                    debug!(transaction = %transaction.id(), reason = %e, "Rejected transaction");
                    None
                }
            })
            .collect::<Vec<(&Transaction, Coin)>>();
        // Stable, so equal fees keep the batch order.
        by_fee.sort_by(|(_, lhs), (_, rhs)| rhs.cmp(lhs));

        let mut spent: HashSet<Utxo> = HashSet::new();
        let mut accepted = vec![];
        for (transaction, fee) in by_fee {
            if let Some(utxo) = transaction.spent_utxos().find(|utxo| spent.contains(*utxo)) {
                debug!(
                    transaction = %transaction.id(),
                    utxo = %utxo,
                    "Rejected transaction spending an output spent by a higher fee transaction"
                );
                continue;
            }
            if self.accept(transaction) {
                spent.extend(transaction.spent_utxos().copied());
                accepted.push((transaction, fee));
            }
        }
        accepted
    }

    fn accept(&mut self, transaction: &Transaction) -> bool {
        match self.utxo_pool.apply(transaction) {
            Ok(()) => {
                trace!(transaction = %transaction.id(), "Accepted transaction");
                true
            }
            Err(e) => {
                debug!(
                    transaction = %transaction.id(),
                    reason = %e,
                    "Failed to apply transaction"
                );
                false
            }
        }
    }
}

use crate::error::{ValidationError, ValidationResult};
use crate::{Coin, SignatureVerifier, Transaction, TransactionOutput, UtxoPool};
use std::collections::HashSet;

// Responsible for checking a single transaction against a ledger.
// A transaction is valid if all of the following hold:
//   1. Every output it spends is in the ledger.
//   2. Every input is signed by the owner of the output it spends.
//   3. No output is spent by more than one of its inputs.
//   4. None of its outputs has a negative amount.
//   5. The spent amount is at least the amount of its outputs.
// The difference between 5.'s sides is the transaction fee.
// The ledger is never modified.
pub struct TransactionValidator {}

impl TransactionValidator {
    /// Returns the fee of the transaction if it is valid.
    pub fn validate<V: SignatureVerifier + ?Sized>(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
        verifier: &V,
    ) -> ValidationResult<Coin> {
        let inputs = Self::validate_inputs(transaction, utxo_pool, verifier)?;
        let outputs = Self::validate_outputs(transaction)?;
        Self::validate_inputs_cover_outputs(inputs, outputs)
    }

    pub fn is_valid<V: SignatureVerifier + ?Sized>(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
        verifier: &V,
    ) -> bool {
        Self::validate(transaction, utxo_pool, verifier).is_ok()
    }

    /// Malformed transactions are dropped from a batch before any policy sees them.
    pub fn validate_well_formed(transaction: &Transaction) -> ValidationResult<()> {
        if transaction.is_well_formed() {
            Ok(())
        } else {
            Err(ValidationError::Malformed)
        }
    }

    // Checks conditions 1 to 3 and returns the total spent amount.
    fn validate_inputs<V: SignatureVerifier + ?Sized>(
        transaction: &Transaction,
        utxo_pool: &UtxoPool,
        verifier: &V,
    ) -> ValidationResult<Coin> {
        let mut spent = HashSet::with_capacity(transaction.num_inputs());
        let mut total = Coin::zero();
        for (index, input) in transaction.inputs().iter().enumerate() {
            let utxo = input.utxo();
            let output = utxo_pool
                .get_output(utxo)
                .map_err(|_| ValidationError::MissingUtxo { index, utxo: *utxo })?;

            let message = transaction.signable_bytes(index)?;
            if !verifier.verify(output.owner(), &message, input.signature()) {
                return Err(ValidationError::InvalidSignature { index });
            }

            if !spent.insert(utxo) {
                return Err(ValidationError::DuplicateInput { index, utxo: *utxo });
            }

            total = total
                .checked_add(output.amount())
                .ok_or(ValidationError::AmountOverflow)?;
        }
        Ok(total)
    }

    // Checks condition 4 and returns the total output amount.
    fn validate_outputs(transaction: &Transaction) -> ValidationResult<Coin> {
        if let Some((index, output)) = transaction
            .outputs()
            .iter()
            .enumerate()
            .find(|(_, output)| output.amount().is_negative())
        {
            return Err(ValidationError::NegativeOutput {
                index,
                amount: output.amount(),
            });
        }
        Coin::checked_sum(transaction.outputs().iter().map(TransactionOutput::amount))
            .ok_or(ValidationError::AmountOverflow)
    }

    fn validate_inputs_cover_outputs(inputs: Coin, outputs: Coin) -> ValidationResult<Coin> {
        if inputs < outputs {
            return Err(ValidationError::InsufficientInputs { inputs, outputs });
        }
        inputs
            .checked_sub(outputs)
            .ok_or(ValidationError::AmountOverflow)
    }
}

use crate::{Coin, Utxo};
use thiserror::Error;

/// Errors raised by [`UtxoPool`](crate::UtxoPool) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("UTXO not found: {0}")]
    UtxoNotFound(Utxo),

    #[error("UTXO referenced more than once: {0}")]
    DuplicateInput(Utxo),

    #[error("Ledger value overflow")]
    Overflow,
}

/// Errors raised while building or encoding a transaction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Input index {index} is out of range for a transaction with {len} inputs")]
    InputIndexOutOfRange { index: usize, len: usize },

    #[error("Input {0} has no signature")]
    MissingSignature(usize),

    #[error("Encoding error: {0}")]
    Encoding(String),
}

/// The reason a transaction is not valid against a ledger.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Transaction has no inputs or no outputs")]
    Malformed,

    #[error("Input {index} spends {utxo}, which is not in the ledger")]
    MissingUtxo { index: usize, utxo: Utxo },

    #[error("Input {index} has an invalid signature")]
    InvalidSignature { index: usize },

    #[error("Input {index} spends {utxo}, which is already spent by an earlier input")]
    DuplicateInput { index: usize, utxo: Utxo },

    #[error("Output {index} has a negative amount: {amount}")]
    NegativeOutput { index: usize, amount: Coin },

    #[error("Inputs: {inputs} are less than outputs: {outputs}")]
    InsufficientInputs { inputs: Coin, outputs: Coin },

    #[error("Amount overflow")]
    AmountOverflow,

    #[error(transparent)]
    Transaction(#[from] TransactionError),
}

pub type LedgerResult<T> = Result<T, LedgerError>;
pub type ValidationResult<T> = Result<T, ValidationError>;

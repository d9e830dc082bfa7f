pub mod amount;
pub mod config;
pub mod error;
pub mod handler;
pub mod hash;
pub mod keys;
pub mod signature;
pub mod transaction;
pub mod utxo;
pub mod utxo_pool;
pub mod validation;

#[cfg(test)]
mod test_helpers;

pub use self::{
    amount::*, config::*, error::*, handler::*, hash::*, keys::*, signature::*, transaction::*,
    utxo::*, utxo_pool::*, validation::*,
};

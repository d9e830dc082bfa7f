//! Keys, ledgers and signed transactions shared by the unit tests.

use crate::{
    Coin, OutputIndex, PublicKey, Sha256, Signature, SignatureVerifier, Transaction,
    TransactionBuilder, TransactionId, TransactionOutput, Utxo, UtxoPool,
};
use ed25519_dalek::{Signer, SigningKey};

pub struct Wallet {
    signing_key: SigningKey,
}

impl Wallet {
    pub fn new(seed: u8) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(&[seed; 32]),
        }
    }

    pub fn public_key(&self) -> PublicKey {
        PublicKey::from(self.signing_key.verifying_key().to_bytes())
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from(self.signing_key.sign(message).to_bytes())
    }
}

/// A UTXO that doesn't come from any transaction in the tests, e.g. a genesis output.
pub fn genesis_utxo(byte: u8, index: u32) -> Utxo {
    Utxo::new(
        TransactionId::new(Sha256::from_raw([byte; 32])),
        OutputIndex::new(index),
    )
}

pub fn pool(entries: &[(Utxo, i64, &Wallet)]) -> UtxoPool {
    entries
        .iter()
        .map(|(utxo, amount, owner)| {
            (
                *utxo,
                TransactionOutput::new(Coin::new(*amount), owner.public_key()),
            )
        })
        .collect()
}

/// Builds a transaction where each input is signed by the given wallet.
pub fn signed_tx(inputs: &[(Utxo, &Wallet)], outputs: &[(i64, &Wallet)]) -> Transaction {
    let mut builder = TransactionBuilder::new();
    for (utxo, _) in inputs {
        builder.add_input(*utxo);
    }
    for (amount, owner) in outputs {
        builder.add_output(Coin::new(*amount), owner.public_key());
    }
    builder
        .sign_all(|index, data| inputs[index].1.sign(data))
        .unwrap();
    builder.finalize().unwrap()
}

/// Accepts a signature iff it is the SHA-256 of the public key followed by the message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FakeVerifier;

impl FakeVerifier {
    pub fn sign(public_key: &PublicKey, message: &[u8]) -> Signature {
        let mut data = public_key.as_bytes().to_vec();
        data.extend_from_slice(message);
        Signature::new(Sha256::digest(&data).as_slice().to_vec())
    }
}

impl SignatureVerifier for FakeVerifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        Self::sign(public_key, message) == *signature
    }
}

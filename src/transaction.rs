use crate::error::TransactionError;
use crate::{Coin, PublicKey, Sha256, Signature, Utxo};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A double SHA-256 hash of the transaction data.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize)]
pub struct TransactionId(Sha256);

impl Display for TransactionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TransactionId {
    pub fn new(data: Sha256) -> Self {
        Self(data)
    }

    pub fn as_sha256(&self) -> &Sha256 {
        &self.0
    }

    pub fn as_slice(&self) -> &[u8] {
        self.0.as_slice()
    }
}

/// The index of the transaction output, the first one is 0.
#[derive(Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Copy, Clone, Serialize, Deserialize)]
pub struct OutputIndex(u32);

impl Display for OutputIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl OutputIndex {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    // The output being spent.
    utxo: Utxo,
    // Signature by the owner of the spent output over the signable data at this input's position.
    signature: Signature,
}

impl Display for TransactionInput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.utxo)
    }
}

impl TransactionInput {
    pub fn new(utxo: Utxo, signature: Signature) -> Self {
        Self { utxo, signature }
    }

    pub fn utxo(&self) -> &Utxo {
        &self.utxo
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionOutput {
    amount: Coin,
    owner: PublicKey,
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.amount, self.owner)
    }
}

impl TransactionOutput {
    pub fn new(amount: Coin, owner: PublicKey) -> Self {
        Self { amount, owner }
    }

    pub fn amount(&self) -> Coin {
        self.amount
    }

    pub fn owner(&self) -> &PublicKey {
        &self.owner
    }
}

/// A finalized transaction. Its id is derived from its inputs, including signatures, and its
/// outputs, and it can't be modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transaction {
    id: TransactionId,
    inputs: Vec<TransactionInput>,
    outputs: Vec<TransactionOutput>,
}

#[derive(Serialize)]
struct TransactionData<'a> {
    inputs: &'a [TransactionInput],
    outputs: &'a [TransactionOutput],
}

// Everything an input's signature commits to. Signatures themselves are left out.
#[derive(Serialize)]
struct SignableData<'a> {
    input_index: u64,
    spent: &'a [Utxo],
    outputs: &'a [TransactionOutput],
}

impl Transaction {
    pub fn new(
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
    ) -> Result<Self, TransactionError> {
        let id = Self::hash_transaction_data(&inputs, &outputs)?;
        Ok(Self {
            id,
            inputs,
            outputs,
        })
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn inputs(&self) -> &[TransactionInput] {
        &self.inputs
    }

    pub fn outputs(&self) -> &[TransactionOutput] {
        &self.outputs
    }

    pub fn input(&self, index: usize) -> Option<&TransactionInput> {
        self.inputs.get(index)
    }

    pub fn output(&self, index: usize) -> Option<&TransactionOutput> {
        self.outputs.get(index)
    }

    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// A transaction is well-formed if it has at least one input and at least one output.
    pub fn is_well_formed(&self) -> bool {
        !self.inputs.is_empty() && !self.outputs.is_empty()
    }

    /// Returns the outputs spent by this transaction, in input order.
    pub fn spent_utxos(&self) -> impl Iterator<Item = &Utxo> + '_ {
        self.inputs.iter().map(TransactionInput::utxo)
    }

    /// Returns the outputs created by this transaction, keyed by (this transaction's id, position).
    pub fn created_utxos(&self) -> impl Iterator<Item = (Utxo, &TransactionOutput)> + '_ {
        self.outputs.iter().enumerate().map(move |(index, output)| {
            (
                Utxo::new(self.id, OutputIndex::new(index as u32)),
                output,
            )
        })
    }

    /// Returns the data that the signature of the input at `input_index` must cover.
    pub fn signable_bytes(&self, input_index: usize) -> Result<Vec<u8>, TransactionError> {
        let spent = self.spent_utxos().copied().collect::<Vec<Utxo>>();
        signable_bytes(input_index, &spent, &self.outputs)
    }

    fn hash_transaction_data(
        inputs: &[TransactionInput],
        outputs: &[TransactionOutput],
    ) -> Result<TransactionId, TransactionError> {
        let data = bincode::serialize(&TransactionData { inputs, outputs })
            .map_err(|e| TransactionError::Encoding(e.to_string()))?;
        Ok(TransactionId(Sha256::double_digest(&data)))
    }
}

impl Display for Transaction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

fn signable_bytes(
    input_index: usize,
    spent: &[Utxo],
    outputs: &[TransactionOutput],
) -> Result<Vec<u8>, TransactionError> {
    if input_index >= spent.len() {
        return Err(TransactionError::InputIndexOutOfRange {
            index: input_index,
            len: spent.len(),
        });
    }
    bincode::serialize(&SignableData {
        input_index: input_index as u64,
        spent,
        outputs,
    })
    .map_err(|e| TransactionError::Encoding(e.to_string()))
}

/// Assembles a transaction: add inputs and outputs, sign every input over
/// [`TransactionBuilder::signable_bytes`], then [`TransactionBuilder::finalize`].
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    spent: Vec<Utxo>,
    signatures: Vec<Option<Signature>>,
    outputs: Vec<TransactionOutput>,
}

impl TransactionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an input spending `utxo` and returns its position.
    pub fn add_input(&mut self, utxo: Utxo) -> usize {
        self.spent.push(utxo);
        self.signatures.push(None);
        self.spent.len() - 1
    }

    pub fn add_output(&mut self, amount: Coin, owner: PublicKey) -> &mut Self {
        self.outputs.push(TransactionOutput::new(amount, owner));
        self
    }

    pub fn signable_bytes(&self, input_index: usize) -> Result<Vec<u8>, TransactionError> {
        signable_bytes(input_index, &self.spent, &self.outputs)
    }

    pub fn set_signature(
        &mut self,
        input_index: usize,
        signature: Signature,
    ) -> Result<&mut Self, TransactionError> {
        let len = self.signatures.len();
        let slot = self
            .signatures
            .get_mut(input_index)
            .ok_or(TransactionError::InputIndexOutOfRange {
                index: input_index,
                len,
            })?;
        *slot = Some(signature);
        Ok(self)
    }

    /// Signs every input with `sign`, which receives the input position and its signable data.
    pub fn sign_all<F>(&mut self, mut sign: F) -> Result<&mut Self, TransactionError>
    where
        F: FnMut(usize, &[u8]) -> Signature,
    {
        for index in 0..self.spent.len() {
            let data = self.signable_bytes(index)?;
            self.signatures[index] = Some(sign(index, &data));
        }
        Ok(self)
    }

    pub fn finalize(&self) -> Result<Transaction, TransactionError> {
        let inputs = self
            .spent
            .iter()
            .zip(&self.signatures)
            .enumerate()
            .map(|(index, (utxo, signature))| {
                signature
                    .clone()
                    .map(|signature| TransactionInput::new(*utxo, signature))
                    .ok_or(TransactionError::MissingSignature(index))
            })
            .collect::<Result<Vec<TransactionInput>, TransactionError>>()?;
        Transaction::new(inputs, self.outputs.clone())
    }
}

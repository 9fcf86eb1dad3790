//! Raw governance actions: the parallel-array form a governance contract stores.

use camp_types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use crate::error::TransactionError;

/// One on-chain action: a call (or plain value transfer) the DAO executes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub target: Address,
    /// Wei attached to the call.
    pub value: U256,
    /// Human-readable signature, empty for a plain value transfer.
    pub signature: String,
    /// ABI-encoded arguments without a selector.
    pub calldata: Bytes,
}

impl RawTransaction {
    /// A value transfer with no signature and no calldata.
    pub fn transfer(target: Address, value: U256) -> Self {
        Self {
            target,
            value,
            signature: String::new(),
            calldata: Bytes::new(),
        }
    }

    pub fn call(target: Address, value: U256, signature: impl Into<String>, calldata: Bytes) -> Self {
        Self {
            target,
            value,
            signature: signature.into(),
            calldata,
        }
    }

    /// The signature, or `None` when the action carries none.
    pub fn signature(&self) -> Option<&str> {
        if self.signature.is_empty() {
            None
        } else {
            Some(&self.signature)
        }
    }
}

/// A batch of actions as four parallel, equal-length arrays.
///
/// The equal-length invariant is enforced on construction; the arrays cannot be
/// modified independently.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTransactionsParts")]
pub struct RawTransactions {
    targets: Vec<Address>,
    values: Vec<U256>,
    signatures: Vec<String>,
    calldatas: Vec<Bytes>,
}

#[derive(Deserialize)]
struct RawTransactionsParts {
    targets: Vec<Address>,
    values: Vec<U256>,
    signatures: Vec<String>,
    calldatas: Vec<Bytes>,
}

impl TryFrom<RawTransactionsParts> for RawTransactions {
    type Error = TransactionError;

    fn try_from(parts: RawTransactionsParts) -> Result<Self, Self::Error> {
        Self::from_parts(parts.targets, parts.values, parts.signatures, parts.calldatas)
    }
}

impl RawTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a batch from the four arrays, rejecting mismatched lengths.
    pub fn from_parts(
        targets: Vec<Address>,
        values: Vec<U256>,
        signatures: Vec<String>,
        calldatas: Vec<Bytes>,
    ) -> Result<Self, TransactionError> {
        let len = targets.len();
        if values.len() != len || signatures.len() != len || calldatas.len() != len {
            return Err(TransactionError::MismatchedBatch {
                targets: targets.len(),
                values: values.len(),
                signatures: signatures.len(),
                calldatas: calldatas.len(),
            });
        }
        Ok(Self {
            targets,
            values,
            signatures,
            calldatas,
        })
    }

    pub fn push(&mut self, tx: RawTransaction) {
        self.targets.push(tx.target);
        self.values.push(tx.value);
        self.signatures.push(tx.signature);
        self.calldatas.push(tx.calldata);
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<RawTransaction> {
        Some(RawTransaction {
            target: *self.targets.get(index)?,
            value: *self.values.get(index)?,
            signature: self.signatures.get(index)?.clone(),
            calldata: self.calldatas.get(index)?.clone(),
        })
    }

    /// Zip the arrays into per-action records.
    pub fn iter(&self) -> impl Iterator<Item = RawTransaction> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn targets(&self) -> &[Address] {
        &self.targets
    }

    pub fn values(&self) -> &[U256] {
        &self.values
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    pub fn calldatas(&self) -> &[Bytes] {
        &self.calldatas
    }
}

impl FromIterator<RawTransaction> for RawTransactions {
    fn from_iter<I: IntoIterator<Item = RawTransaction>>(iter: I) -> Self {
        let mut batch = Self::new();
        for tx in iter {
            batch.push(tx);
        }
        batch
    }
}

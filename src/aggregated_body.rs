// Copyright 2019. The Tari Project
//
// Redistribution and use in source and binary forms, with or without modification, are permitted provided that the
// following conditions are met:
//
// 1. Redistributions of source code must retain the above copyright notice, this list of conditions and the following
// disclaimer.
//
// 2. Redistributions in binary form must reproduce the above copyright notice, this list of conditions and the
// following disclaimer in the documentation and/or other materials provided with the distribution.
//
// 3. Neither the name of the copyright holder nor the names of its contributors may be used to endorse or promote
// products derived from this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS" AND ANY EXPRESS OR IMPLIED WARRANTIES,
// INCLUDING, BUT NOT LIMITED TO, THE IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE FOR ANY DIRECT, INDIRECT, INCIDENTAL,
// SPECIAL, EXEMPLARY, OR CONSEQUENTIAL DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER CAUSED AND ON ANY THEORY OF LIABILITY,
// WHETHER IN CONTRACT, STRICT LIABILITY, OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE
// USE OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::{
    amount::Amount,
    transaction::{
        TransactionError,
        TransactionInput,
        TransactionKernel,
        TransactionOutput,
        MAX_TRANSACTION_INPUTS,
        MAX_TRANSACTION_OUTPUTS,
    },
    types::{BlindingFactor, Commitment, CommitmentFactory, CryptoFactories, Height, PrivateKey, RangeProofService},
};
use log::*;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Error, Formatter};
use tari_crypto::{commitment::HomomorphicCommitmentFactory, tari_utilities::hex::Hex};

pub const LOG_TARGET: &str = "wallet::aggregated_body";

/// Running totals gathered from the kernel list while checking a body's balance
struct KernelSum {
    sum: Commitment,
    fees: Amount,
}

/// The components of a transaction. Both parties contribute inputs and outputs; the body is only complete once both
/// contributions have been merged and brought into canonical order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AggregateBody {
    sorted: bool,
    /// List of inputs spent by the transaction.
    inputs: Vec<TransactionInput>,
    /// List of outputs the transaction produces.
    outputs: Vec<TransactionOutput>,
    /// Kernels contain the excesses and their signatures for the transaction
    kernels: Vec<TransactionKernel>,
}

impl AggregateBody {
    /// Create an empty aggregate body
    pub fn empty() -> AggregateBody {
        AggregateBody {
            sorted: true,
            inputs: vec![],
            outputs: vec![],
            kernels: vec![],
        }
    }

    /// Create a new aggregate body from provided inputs, outputs and kernels
    pub fn new(
        inputs: Vec<TransactionInput>,
        outputs: Vec<TransactionOutput>,
        kernels: Vec<TransactionKernel>,
    ) -> AggregateBody {
        AggregateBody {
            sorted: false,
            inputs,
            outputs,
            kernels,
        }
    }

    /// Provide read-only access to the input list
    pub fn inputs(&self) -> &Vec<TransactionInput> {
        &self.inputs
    }

    /// Provide read-only access to the output list
    pub fn outputs(&self) -> &Vec<TransactionOutput> {
        &self.outputs
    }

    /// Provide read-only access to the kernel list
    pub fn kernels(&self) -> &Vec<TransactionKernel> {
        &self.kernels
    }

    /// Add an input to the existing aggregate body
    pub fn add_input(&mut self, input: TransactionInput) {
        self.inputs.push(input);
        self.sorted = false;
    }

    /// Add a series of inputs to the existing aggregate body
    pub fn add_inputs(&mut self, inputs: &mut Vec<TransactionInput>) {
        self.inputs.append(inputs);
        self.sorted = false;
    }

    /// Add an output to the existing aggregate body
    pub fn add_output(&mut self, output: TransactionOutput) {
        self.outputs.push(output);
        self.sorted = false;
    }

    /// Add a series of outputs to the existing aggregate body
    pub fn add_outputs(&mut self, outputs: &mut Vec<TransactionOutput>) {
        self.outputs.append(outputs);
        self.sorted = false;
    }

    /// Set the kernel of the aggregate body, replacing any previous kernels
    pub fn set_kernel(&mut self, kernel: TransactionKernel) {
        self.kernels = vec![kernel];
    }

    pub fn contains_duplicated_inputs(&self) -> bool {
        // If the body is sorted, can do a linear check instead of n^2
        if self.sorted {
            for i in 1..self.inputs().len() {
                if self.inputs()[i] == self.inputs()[i - 1] {
                    return true;
                }
            }
            return false;
        }
        for i in 0..self.inputs().len() {
            for j in (i + 1)..self.inputs().len() {
                if self.inputs()[i] == self.inputs()[j] {
                    return true;
                }
            }
        }
        false
    }

    pub fn contains_duplicated_outputs(&self) -> bool {
        if self.sorted {
            for i in 1..self.outputs().len() {
                if self.outputs()[i] == self.outputs()[i - 1] {
                    return true;
                }
            }
            return false;
        }
        for i in 0..self.outputs().len() {
            for j in (i + 1)..self.outputs().len() {
                if self.outputs()[i] == self.outputs()[j] {
                    return true;
                }
            }
        }
        false
    }

    /// Sort the component lists of the aggregate body into canonical order (ascending by commitment bytes)
    pub fn sort(&mut self) {
        if self.sorted {
            return;
        }
        self.inputs.sort();
        self.outputs.sort();
        self.kernels.sort();
        self.sorted = true;
    }

    /// Verify the signatures in all kernels contained in this aggregate body.
    pub fn verify_kernel_signatures(&self) -> Result<(), TransactionError> {
        trace!(target: LOG_TARGET, "Checking kernel signatures");
        for kernel in self.kernels.iter() {
            kernel.verify_signature().map_err(|e| {
                warn!(target: LOG_TARGET, "Kernel ({}) signature failed {:?}.", kernel, e);
                e
            })?;
        }
        Ok(())
    }

    pub fn get_total_fee(&self) -> Amount {
        let mut fee = Amount::from(0);
        for kernel in &self.kernels {
            fee += kernel.fee;
        }
        fee
    }

    /// This function will check spent kernel rules like tx lock height etc
    pub fn check_kernel_rules(&self, height: Height) -> Result<(), TransactionError> {
        for kernel in self.kernels() {
            if kernel.lock_height > height {
                warn!(target: LOG_TARGET, "Kernel lock height was not reached: {}", kernel);
                return Err(TransactionError::InvalidKernel);
            }
        }
        Ok(())
    }

    /// Validate this body in isolation:
    /// 1. The number of inputs and outputs is sane and free of duplicates
    /// 1. All kernel signatures verify against their excess and metadata
    /// 1. The sum of inputs, outputs, offset and fees equal the kernel excess
    /// 1. All range proofs are valid
    /// 1. All kernel lock heights have been reached at `height`
    pub fn validate_internal_consistency(
        &self,
        offset: &BlindingFactor,
        height: Height,
        factories: &CryptoFactories,
    ) -> Result<(), TransactionError> {
        self.validate_shape()?;
        self.verify_kernel_signatures()?;
        self.validate_kernel_sum(offset, &factories.commitment)?;
        self.validate_range_proofs(&factories.range_proof)?;
        self.check_kernel_rules(height)
    }

    pub fn dissolve(self) -> (Vec<TransactionInput>, Vec<TransactionOutput>, Vec<TransactionKernel>) {
        (self.inputs, self.outputs, self.kernels)
    }

    fn validate_shape(&self) -> Result<(), TransactionError> {
        if self.inputs.is_empty() {
            return Err(TransactionError::ValidationError(
                "A transaction cannot have zero inputs".into(),
            ));
        }
        if self.inputs.len() > MAX_TRANSACTION_INPUTS {
            return Err(TransactionError::ValidationError(
                "Too many inputs in transaction".into(),
            ));
        }
        if self.outputs.len() > MAX_TRANSACTION_OUTPUTS {
            return Err(TransactionError::ValidationError(
                "Too many outputs in transaction".into(),
            ));
        }
        if self.contains_duplicated_inputs() {
            return Err(TransactionError::ValidationError(
                "Transaction spends the same input twice".into(),
            ));
        }
        if self.contains_duplicated_outputs() {
            return Err(TransactionError::ValidationError(
                "Transaction creates the same output twice".into(),
            ));
        }
        Ok(())
    }

    /// Calculate the sum of the inputs - outputs
    fn sum_commitments(&self) -> Commitment {
        let sum_inputs = self.inputs.iter().map(|i| i.commitment()).sum::<Commitment>();
        let sum_outputs = self.outputs.iter().map(|o| &o.commitment).sum::<Commitment>();
        &sum_inputs - &sum_outputs
    }

    /// Calculate the sum of the kernel excesses and their constituent fees
    fn sum_kernels(&self) -> KernelSum {
        self.kernels.iter().fold(
            KernelSum {
                fees: Amount(0),
                sum: CommitmentFactory::default().zero(),
            },
            |acc, val| KernelSum {
                fees: acc.fees + val.fee,
                sum: &acc.sum + &val.excess,
            },
        )
    }

    /// Confirm that the balance of blinding factors holds:
    ///
    /// (sum of inputs) - (sum of outputs) + offset·G == (sum of kernel excesses) + fee·H
    fn validate_kernel_sum(&self, offset: &BlindingFactor, factory: &CommitmentFactory) -> Result<(), TransactionError> {
        trace!(target: LOG_TARGET, "Checking kernel total");
        let KernelSum { sum: excess, fees } = self.sum_kernels();
        let sum_io = &self.sum_commitments() + &factory.commit_value(offset, 0);
        let fees = factory.commit_value(&PrivateKey::default(), fees.into());
        trace!(
            target: LOG_TARGET,
            "Comparing sum. In - out + offset: {} excess: {} fees: {}",
            sum_io.to_hex(),
            excess.to_hex(),
            fees.to_hex()
        );
        if sum_io != &excess + &fees {
            return Err(TransactionError::ValidationError(
                "Sum of inputs and outputs did not equal sum of kernels with fees".into(),
            ));
        }

        Ok(())
    }

    fn validate_range_proofs(&self, range_proof_service: &RangeProofService) -> Result<(), TransactionError> {
        trace!(target: LOG_TARGET, "Checking range proofs");
        for o in &self.outputs {
            if !o.verify_range_proof(range_proof_service)? {
                return Err(TransactionError::ValidationError(
                    "Range proof could not be verified".into(),
                ));
            }
        }
        Ok(())
    }
}

impl Display for AggregateBody {
    fn fmt(&self, fmt: &mut Formatter) -> Result<(), Error> {
        if !self.sorted {
            fmt.write_str("WARNING: Body is not sorted.\n")?;
        }
        fmt.write_str("--- Transaction Kernels ---\n")?;
        for (i, kernel) in self.kernels.iter().enumerate() {
            fmt.write_str(&format!("Kernel {}:\n", i))?;
            fmt.write_str(&format!("{}\n", kernel))?;
        }
        fmt.write_str(&format!("--- Inputs ({}) ---\n", self.inputs.len()))?;
        for input in self.inputs.iter() {
            fmt.write_str(&format!("{}", input))?;
        }
        fmt.write_str(&format!("--- Outputs ({}) ---\n", self.outputs.len()))?;
        for output in self.outputs.iter() {
            fmt.write_str(&format!("{}\n", output))?;
        }
        Ok(())
    }
}

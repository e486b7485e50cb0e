//! Use cases (orchestration)
//!
//! This module contains use cases that orchestrate operations across multiple ports.
//! Use cases coordinate between adapters and logic to fulfill signing requirements.

mod custodian;
mod issue_proof;

pub use custodian::{CustodianConfig, KeyCustodian};
pub use issue_proof::{issue_proof, ProofPayloads};

//! Deterministic contract IDs.
//!
//! Fuel derives a contract's ID from `sha256("FUEL" ++ salt ++ code_root ++ storage_root)`,
//! so the same bytecode deployed with the same salt and initial storage always lands at the
//! same address. That ID is what makes redeploys detectable before anything is submitted.

use fuel_tx::{Bytes32, Contract, ContractId, Salt, StorageSlot};

/// Sparse merkle root over a contract's initial storage slots.
pub fn storage_root(slots: &[StorageSlot]) -> Bytes32 {
    Contract::initial_state_root(slots.iter())
}

/// The ID a contract will be assigned when `bytecode` is deployed with `salt` and initial
/// storage committing to `storage_root`.
pub fn compute_contract_id(bytecode: &[u8], salt: &Salt, storage_root: &Bytes32) -> ContractId {
    let contract = Contract::from(bytecode.to_vec());
    let code_root = contract.root();
    contract.id(salt, &code_root, storage_root)
}

//! # Integration Flows
//!
//! Each module drives a fully wired service through its public entry points.

pub mod offchain_flows;
pub mod registry_contract_flows;
pub mod wildcard_flows;

//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that external callers use
//! - **Outbound (Driven)**: Registry, ledger and gateway this subsystem reads

pub mod inbound;
pub mod outbound;

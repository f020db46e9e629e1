//! Shared test harness for stage implementations.

pub mod stage_contract;

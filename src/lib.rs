//! Rule-based quality validation and gap remediation for brand-strategy
//! documents: a deterministic checkpoint battery, weighted scoring, gap
//! prioritization, and a persisted fix-tracking state machine.

pub mod checkpoints;
pub mod cli;
pub mod commands;
pub mod context;
pub mod engine;
pub mod fixes;
pub mod gaps;
pub mod model;
pub mod util;

//! Solution reporting.
//!
//! Decodes chromosomes into the tables consumed by presentation layers
//! (allocation boards, charts) and extracts representative solutions.
//!
//! # Tables
//!
//! | Table | Row | Content |
//! |-------|-----|---------|
//! | Allocation | [`AllocationRow`] | task, professional, estimated time, billable hours, cost |
//! | Workload | [`WorkloadRow`] | professional, total time, task count |
//!
//! # Representatives
//!
//! | Name | Criterion |
//! |------|-----------|
//! | Balanced | min `0.7·cost + 0.3·time` (configurable) |
//! | Min-cost | min adjusted cost |
//! | Min-time | min adjusted time |

mod allocation;
mod representatives;

pub use allocation::{AllocationReport, AllocationRow, SolutionReporter, WorkloadRow};
pub use representatives::{select_representatives, BalanceWeights, Representatives};

pub(crate) use representatives::arg_min;

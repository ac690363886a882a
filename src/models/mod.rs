//! Allocation domain models.
//!
//! Provides the plain data types supplied by callers: tasks with an
//! effort demand and professionals with a throughput and an hourly rate.
//! A [`Catalog`] bundles both after validation.
//!
//! # Domain Mappings
//!
//! | u-allocate | Help desk | Consulting | Manufacturing |
//! |------------|-----------|------------|---------------|
//! | Task | Ticket | Work package | Job |
//! | Professional | Agent | Consultant | Operator |
//! | weight | Ticket size | Effort points | Work content |
//! | capacity | Points/hour | Points/hour | Units/hour |

mod catalog;
pub mod generate;
mod professional;
mod task;

pub use catalog::Catalog;
pub use professional::Professional;
pub use task::Task;

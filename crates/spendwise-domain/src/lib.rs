//! spendwise-domain
//!
//! Plain finance records (Expense, Income, Bill), the snapshot that bundles them,
//! and the derived summary types produced by the aggregation engine.
//! No I/O, no formatting beyond labels. Only data types and calendar helpers.

pub mod bill;
pub mod common;
pub mod expense;
pub mod income;
pub mod palette;
pub mod serde_date;
pub mod snapshot;
pub mod summary;
pub mod window;

pub use bill::*;
pub use common::*;
pub use expense::*;
pub use income::*;
pub use palette::*;
pub use snapshot::*;
pub use summary::*;
pub use window::*;

//! spendwise-core
//!
//! The aggregation engine: pure functions from a record snapshot plus a reference
//! date to totals, category breakdowns, trends and bill lists.
//! Depends on spendwise-domain. No I/O, no rendering, no shared mutable state.

pub mod bill_service;
pub mod category_service;
pub mod error;
pub mod format;
pub mod reminder_service;
pub mod report_service;
pub mod search_service;
pub mod settings;
pub mod summary_service;
pub mod time;
pub mod trend_service;
pub mod validation;


pub use bill_service::*;
pub use category_service::*;
pub use error::CoreError;
pub use format::*;
pub use reminder_service::*;
pub use report_service::*;
pub use search_service::*;
pub use settings::AggregationSettings;
pub use summary_service::*;
pub use time::Clock;
pub use trend_service::*;
pub use validation::*;

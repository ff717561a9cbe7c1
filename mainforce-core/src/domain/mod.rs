//! Domain types: input bar tables, validated bar sets, and series views.

pub mod bars;
pub mod frame;
pub mod series;

pub use bars::{Bar, IndexBars, SecurityBars};
pub use frame::{BarFrame, Table, ValidationError};
pub use series::TimeSeries;

//! Core data shaping for the Opsboard dashboard.
//!
//! The app fetches raw record collections from the record store, decodes them
//! at the [`snapshot`] boundary, and renders whatever these modules compute:
//! filtered lists ([`filter`]), stat cards ([`stats`]), the month calendar
//! ([`calendar_grid`]), urgency badges ([`deadline`]), and the nested task
//! view ([`task_tree`]). Everything downstream of the decode boundary is a
//! pure function over in-memory slices, with "today" resolved once by the
//! caller and passed in explicitly.

pub mod calendar_grid;
pub mod dates;
pub mod deadline;
pub mod filter;
pub mod settings;
pub mod snapshot;
pub mod stats;
pub mod task_tree;
pub mod types;

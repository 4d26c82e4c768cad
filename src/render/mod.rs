//! Deterministic contract source composers.
//!
//! Both composers are pure: the same spec always yields the same bytes, and
//! nothing here touches the filesystem. Writing the result is the caller's job.

mod arbiter;
mod format;
mod imports;
mod obligation;

pub use arbiter::compose_arbiter;
pub use imports::is_table_symbol;
pub use obligation::compose_obligation;

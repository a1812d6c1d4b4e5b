//! # Domain Models
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Trimmed, non-empty ticker text |
//! | [`Quote`] | Latest price for a symbol |
//! | [`SearchMatch`] | One ranked symbol search candidate |

mod models;
mod symbol;

pub use models::{Quote, SearchMatch};
pub use symbol::Symbol;

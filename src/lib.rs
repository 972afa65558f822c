// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference
    clippy::module_name_repetitions
)]

//! # Amort
//!
//! A terminal mortgage calculator with live-formatted money inputs.
//!
//! Amounts are grouped as you type (`8500000` displays as `8 500 000`)
//! with the caret held at a stable position relative to the digits around
//! it. Enter computes the monthly annuity payment, the overpayment, and a
//! full amortization schedule, which can be exported as CSV.
//!
//! ## Architecture
//!
//! Amort uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`money`]: Pure input formatting and caret anchoring
//! - [`field`]: Editable input fields and the formatter binding
//! - [`mortgage`]: Terms, validation, annuity math, schedule
//! - [`export`]: CSV export of the schedule
//! - [`ui`]: Terminal UI components

pub mod app;
pub mod export;
pub mod field;
pub mod money;
pub mod mortgage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::field::{FieldBuffer, MoneyFormatBinding, TextFieldHost};
    pub use crate::money::format_money_input;
    pub use crate::mortgage::{MortgageSummary, MortgageTerms, ScheduleRow};
}

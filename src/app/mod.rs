//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete application state
//! - [`Message`]: All possible events and actions
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Form, FormField, Model, Prefill, Toast, ToastLevel, field_enabled};
pub use update::{Message, update};

use std::path::PathBuf;

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    prefill: Prefill,
    installment: bool,
    export_path: PathBuf,
}

impl App {
    /// Create a new application with empty form fields.
    pub fn new() -> Self {
        Self {
            prefill: Prefill::default(),
            installment: false,
            export_path: PathBuf::from("amortization.csv"),
        }
    }

    /// Pre-populate the home price field.
    pub fn with_price(mut self, price: Option<String>) -> Self {
        self.prefill.home_price = price;
        self
    }

    /// Pre-populate the down payment field.
    pub fn with_down_payment(mut self, down: Option<String>) -> Self {
        self.prefill.down_payment = down;
        self
    }

    /// Pre-populate the loan term field.
    pub fn with_years(mut self, years: Option<String>) -> Self {
        self.prefill.years = years;
        self
    }

    /// Pre-populate the interest rate field.
    pub fn with_rate(mut self, rate: Option<String>) -> Self {
        self.prefill.annual_rate_percent = rate;
        self
    }

    /// Start in installment mode (zero interest, rate field disabled).
    pub const fn with_installment(mut self, enabled: bool) -> Self {
        self.installment = enabled;
        self
    }

    /// Set the path the schedule is exported to.
    pub fn with_export_path(mut self, path: PathBuf) -> Self {
        self.export_path = path;
        self
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

use std::path::PathBuf;
use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::field::{FieldBuffer, MoneyFormatBinding};
use crate::mortgage::{MortgageError, MortgageSummary, MortgageTerms, ScheduleRow, parse_amount};

/// Form field names, used for wiring and lookup.
pub const FIELD_HOME_PRICE: &str = "home_price";
pub const FIELD_DOWN_PAYMENT: &str = "down_payment";
pub const FIELD_YEARS: &str = "years";
pub const FIELD_RATE: &str = "annual_rate_percent";

/// Fields that carry a live money-format binding.
const MONEY_FIELDS: [&str; 2] = [FIELD_HOME_PRICE, FIELD_DOWN_PAYMENT];

/// How long a toast stays visible.
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Initial field values supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct Prefill {
    pub home_price: Option<String>,
    pub down_payment: Option<String>,
    pub years: Option<String>,
    pub annual_rate_percent: Option<String>,
}

/// One labeled input of the form.
#[derive(Debug, Clone)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub buffer: FieldBuffer,
    pub binding: Option<MoneyFormatBinding>,
}

impl FormField {
    fn new(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            buffer: FieldBuffer::empty(),
            binding: None,
        }
    }

    /// Run the field's formatter binding, if it has one.
    pub fn refresh_binding(&mut self) {
        if let Some(binding) = self.binding {
            binding.refresh(&mut self.buffer);
        }
    }
}

/// The four-field input form with a focus cursor.
#[derive(Debug, Clone)]
pub struct Form {
    fields: Vec<FormField>,
    focus: usize,
}

impl Form {
    /// Build the form and attach money-format bindings to the amount
    /// fields. Attachment is by name lookup; a missing name is skipped.
    pub fn new() -> Self {
        let mut form = Self {
            fields: vec![
                FormField::new(FIELD_HOME_PRICE, "Home price"),
                FormField::new(FIELD_DOWN_PAYMENT, "Down payment"),
                FormField::new(FIELD_YEARS, "Term, years"),
                FormField::new(FIELD_RATE, "Rate, % annual"),
            ],
            focus: 0,
        };
        for name in MONEY_FIELDS {
            if let Some(field) = form.field_mut(name) {
                field.binding = Some(MoneyFormatBinding::attach(&mut field.buffer));
            }
        }
        form
    }

    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub const fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused(&self) -> &FormField {
        &self.fields[self.focus.min(self.fields.len() - 1)]
    }

    pub fn focused_mut(&mut self) -> &mut FormField {
        let idx = self.focus.min(self.fields.len() - 1);
        &mut self.fields[idx]
    }

    /// Move focus forward, skipping disabled fields.
    pub fn focus_next(&mut self, installment: bool) {
        self.cycle_focus(1, installment);
    }

    /// Move focus backward, skipping disabled fields.
    pub fn focus_prev(&mut self, installment: bool) {
        self.cycle_focus(self.fields.len() - 1, installment);
    }

    fn cycle_focus(&mut self, step: usize, installment: bool) {
        let len = self.fields.len();
        let mut next = self.focus;
        for _ in 0..len {
            next = (next + step) % len;
            if field_enabled(&self.fields[next], installment) {
                break;
            }
        }
        self.focus = next;
    }

    /// Set a field's initial text and run its binding once, the same path
    /// a pre-populated page value takes.
    fn prefill(&mut self, name: &str, value: Option<&str>) {
        if let Some(value) = value
            && let Some(field) = self.field_mut(name)
        {
            field.buffer = FieldBuffer::from_text(value);
            field.refresh_binding();
        }
    }
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a field currently accepts input.
pub fn field_enabled(field: &FormField, installment: bool) -> bool {
    !(installment && field.name == FIELD_RATE)
}

/// Severity of a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

/// A transient status message shown in the status line.
#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub text: String,
    pub expires_at: Instant,
}

/// The complete application state.
#[derive(Debug, Clone)]
pub struct Model {
    pub form: Form,
    /// Installment mode: rate is fixed at zero and its field disabled.
    pub installment: bool,
    pub summary: Option<MortgageSummary>,
    pub schedule: Vec<ScheduleRow>,
    /// Terms the current summary and schedule were computed from. The form
    /// may have been edited since; exports use these, not the live form.
    pub calculated_terms: Option<MortgageTerms>,
    /// Validation error from the last calculation attempt.
    pub error: Option<String>,
    /// First schedule row shown in the table.
    pub schedule_offset: usize,
    /// Terminal size (width, height).
    pub size: (u16, u16),
    pub toast: Option<Toast>,
    pub export_path: PathBuf,
    /// Export requested by `update`, performed by the event loop.
    pub pending_export: Option<PathBuf>,
    pub should_quit: bool,
}

impl Model {
    /// Create a model for the given terminal size.
    pub fn new(size: (u16, u16)) -> Self {
        Self {
            form: Form::new(),
            installment: false,
            summary: None,
            schedule: Vec::new(),
            calculated_terms: None,
            error: None,
            schedule_offset: 0,
            size,
            toast: None,
            export_path: PathBuf::from("amortization.csv"),
            pending_export: None,
            should_quit: false,
        }
    }

    /// Apply command-line prefill values through the normal binding path.
    pub fn apply_prefill(&mut self, prefill: &Prefill) {
        self.form.prefill(FIELD_HOME_PRICE, prefill.home_price.as_deref());
        self.form.prefill(FIELD_DOWN_PAYMENT, prefill.down_payment.as_deref());
        self.form.prefill(FIELD_YEARS, prefill.years.as_deref());
        self.form
            .prefill(FIELD_RATE, prefill.annual_rate_percent.as_deref());
    }

    /// Parse the form into mortgage terms. In installment mode the rate is
    /// zero regardless of the rate field's content.
    pub fn parse_terms(&self) -> Result<MortgageTerms, MortgageError> {
        let text = |name: &str| self.form.field(name).map(|f| f.buffer.text().to_string());
        let home_price = parse_amount("home price", &text(FIELD_HOME_PRICE).unwrap_or_default())?;
        let down_payment =
            parse_amount("down payment", &text(FIELD_DOWN_PAYMENT).unwrap_or_default())?;
        let years = parse_amount("loan term", &text(FIELD_YEARS).unwrap_or_default())?;
        let annual_rate_percent = if self.installment {
            Decimal::ZERO
        } else {
            parse_amount("interest rate", &text(FIELD_RATE).unwrap_or_default())?
        };
        Ok(MortgageTerms {
            home_price,
            down_payment,
            years,
            annual_rate_percent,
        })
    }

    /// Apply a finished calculation along with the terms it was run with.
    pub fn set_result(
        &mut self,
        terms: MortgageTerms,
        summary: MortgageSummary,
        schedule: Vec<ScheduleRow>,
    ) {
        self.calculated_terms = Some(terms);
        self.summary = Some(summary);
        self.schedule = schedule;
        self.error = None;
        self.schedule_offset = 0;
    }

    /// Record a failed calculation, keeping the form as typed.
    pub fn set_error(&mut self, message: String) {
        self.calculated_terms = None;
        self.summary = None;
        self.schedule.clear();
        self.error = Some(message);
        self.schedule_offset = 0;
    }

    /// Rows of the schedule table visible at the current terminal size.
    pub fn schedule_view_rows(&self) -> usize {
        crate::ui::schedule_view_rows(self.size.1)
    }

    /// Largest valid schedule offset.
    pub fn max_schedule_offset(&self) -> usize {
        self.schedule.len().saturating_sub(self.schedule_view_rows())
    }

    pub fn scroll_schedule_down(&mut self, n: usize) {
        self.schedule_offset = (self.schedule_offset + n).min(self.max_schedule_offset());
    }

    pub fn scroll_schedule_up(&mut self, n: usize) {
        self.schedule_offset = self.schedule_offset.saturating_sub(n);
    }

    /// Show a transient status message.
    pub fn show_toast(&mut self, level: ToastLevel, text: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            text: text.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    /// Drop an expired toast. Returns `true` if one was removed.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|t| now >= t.expires_at) {
            self.toast = None;
            return true;
        }
        false
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new((80, 24))
    }
}

use crate::field::FieldBuffer;
use crate::money::{digits_before, format_money_input, index_after_digits};

/// Capability seam between a formatter binding and whatever holds the text.
///
/// The formatting logic never touches a concrete widget; it reads and
/// writes through this trait, so it stays unit-testable against a plain
/// buffer or a fake host.
pub trait TextFieldHost {
    /// The field's current content.
    fn value(&self) -> String;

    /// Replace the field's content.
    fn set_value(&mut self, value: &str);

    /// The caret position as a byte offset, if the host tracks one.
    fn selection(&self) -> Option<usize>;

    /// Place the caret at a byte offset, best-effort.
    ///
    /// Returns `false` when the host cannot place the caret right now.
    /// Caret placement is cosmetic; a `false` return is never an error and
    /// callers must not treat it as one.
    fn set_selection(&mut self, index: usize) -> bool;
}

impl TextFieldHost for FieldBuffer {
    fn value(&self) -> String {
        self.text().to_string()
    }

    fn set_value(&mut self, value: &str) {
        self.set_text(value);
    }

    fn selection(&self) -> Option<usize> {
        Some(self.cursor())
    }

    fn set_selection(&mut self, index: usize) -> bool {
        self.move_to(index);
        true
    }
}

/// Keeps one text field formatted as a grouped money string.
///
/// Attach it to a field and call [`refresh`](Self::refresh) from the event
/// loop after every edit (and on blur-style events). Each refresh is
/// stateless: it reads the live value, reformats it, and relocates the
/// caret so the same number of digits sit to its left as before. Dropping
/// the binding detaches it; there is no registry anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoneyFormatBinding {
    _private: (),
}

impl MoneyFormatBinding {
    /// Bind money formatting to a field, formatting any pre-populated
    /// value immediately.
    pub fn attach<H: TextFieldHost>(host: &mut H) -> Self {
        let binding = Self { _private: () };
        binding.refresh(host);
        binding
    }

    /// Re-format the field's value and restore the caret's digit anchor.
    ///
    /// Does nothing when the value is already formatted, which also avoids
    /// redundant selection writes.
    pub fn refresh<H: TextFieldHost>(&self, host: &mut H) {
        let value = host.value();
        let caret = host.selection().unwrap_or(value.len());
        let anchor = digits_before(&value, caret);

        let formatted = format_money_input(&value);
        if formatted == value {
            return;
        }

        host.set_value(&formatted);
        let caret = index_after_digits(&formatted, anchor);
        if !host.set_selection(caret) {
            tracing::trace!(caret, "host declined caret placement");
        }
    }
}

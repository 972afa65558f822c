//! Editable input fields and reactive money formatting.
//!
//! [`FieldBuffer`] is a single-line text buffer with cursor management,
//! the in-crate stand-in for a form input element. [`TextFieldHost`] is the
//! capability seam a formatter binding talks through, and
//! [`MoneyFormatBinding`] keeps one field's value grouped while the user
//! types, preserving the caret's position relative to the digits around it.

mod binding;
mod buffer;

pub use binding::{MoneyFormatBinding, TextFieldHost};
pub use buffer::FieldBuffer;

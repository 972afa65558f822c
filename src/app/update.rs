use crate::app::Model;
use crate::app::model::ToastLevel;
use crate::mortgage;

/// All possible events and actions in the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    // Form focus
    /// Focus the next form field (blurs the current one)
    FocusNext,
    /// Focus the previous form field (blurs the current one)
    FocusPrev,

    // Editing the focused field
    /// Type a character at the caret
    Input(char),
    /// Delete the character before the caret (Backspace)
    Backspace,
    /// Delete the character at the caret (Delete)
    Delete,
    /// Move the caret one character left
    CursorLeft,
    /// Move the caret one character right
    CursorRight,
    /// Move the caret to the start of the field (Home)
    CursorHome,
    /// Move the caret to the end of the field (End)
    CursorEnd,

    // Calculation
    /// Toggle installment mode (zero rate, rate field disabled)
    ToggleInstallment,
    /// Parse the form and compute payment, overpayment, and schedule
    Calculate,

    // Schedule table
    /// Scroll the schedule up by n rows
    ScheduleUp(usize),
    /// Scroll the schedule down by n rows
    ScheduleDown(usize),
    /// Scroll the schedule up one page
    SchedulePageUp,
    /// Scroll the schedule down one page
    SchedulePageDown,

    // Side-effect requests
    /// Export the schedule as CSV (performed by the event loop)
    Export,

    // System
    /// Terminal was resized
    Resize(u16, u16),
    /// Quit the application
    Quit,
}

/// Pure state transition: apply a message to the model.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        // Form focus. Moving away from a field is its blur event, so the
        // formatter binding runs once more before focus leaves.
        Message::FocusNext => {
            model.form.focused_mut().refresh_binding();
            model.form.focus_next(model.installment);
        }
        Message::FocusPrev => {
            model.form.focused_mut().refresh_binding();
            model.form.focus_prev(model.installment);
        }

        // Editing: every edit is followed by a binding refresh, which
        // reformats the value and relocates the caret.
        Message::Input(ch) => {
            let field = model.form.focused_mut();
            field.buffer.insert_char(ch);
            field.refresh_binding();
        }
        Message::Backspace => {
            let field = model.form.focused_mut();
            if field.buffer.delete_back() {
                field.refresh_binding();
            }
        }
        Message::Delete => {
            let field = model.form.focused_mut();
            if field.buffer.delete_forward() {
                field.refresh_binding();
            }
        }
        Message::CursorLeft => model.form.focused_mut().buffer.move_left(),
        Message::CursorRight => model.form.focused_mut().buffer.move_right(),
        Message::CursorHome => model.form.focused_mut().buffer.move_home(),
        Message::CursorEnd => model.form.focused_mut().buffer.move_end(),

        Message::ToggleInstallment => {
            model.installment = !model.installment;
            // Focus may be sitting on the now-disabled rate field.
            if !crate::app::model::field_enabled(model.form.focused(), model.installment) {
                model.form.focus_next(model.installment);
            }
        }
        Message::Calculate => {
            let result = model
                .parse_terms()
                .and_then(|terms| mortgage::calculate(&terms).map(|r| (terms, r)));
            match result {
                Ok((terms, (summary, schedule))) => {
                    tracing::debug!(months = schedule.len(), "calculated schedule");
                    model.set_result(terms, summary, schedule);
                }
                Err(err) => model.set_error(err.to_string()),
            }
        }

        Message::ScheduleUp(n) => model.scroll_schedule_up(n),
        Message::ScheduleDown(n) => model.scroll_schedule_down(n),
        Message::SchedulePageUp => {
            let page = model.schedule_view_rows().max(1);
            model.scroll_schedule_up(page);
        }
        Message::SchedulePageDown => {
            let page = model.schedule_view_rows().max(1);
            model.scroll_schedule_down(page);
        }

        Message::Export => {
            if model.summary.is_some() {
                model.pending_export = Some(model.export_path.clone());
            } else {
                model.show_toast(ToastLevel::Warning, "Nothing to export — calculate first");
            }
        }

        Message::Resize(width, height) => {
            model.size = (width, height);
            model.schedule_offset = model.schedule_offset.min(model.max_schedule_offset());
        }
        Message::Quit => model.should_quit = true,
    }
    model
}

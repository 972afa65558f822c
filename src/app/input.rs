use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

use crate::app::{App, Message};

impl App {
    pub(super) fn handle_event(event: &Event) -> Option<Message> {
        match event {
            Event::Key(key) => Self::handle_key(*key),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    fn handle_key(key: KeyEvent) -> Option<Message> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Char('c') if ctrl => Some(Message::Quit),
            KeyCode::Esc => Some(Message::Quit),

            KeyCode::Enter => Some(Message::Calculate),
            KeyCode::Char('e') if ctrl => Some(Message::Export),
            KeyCode::Char('t') if ctrl => Some(Message::ToggleInstallment),

            KeyCode::Tab | KeyCode::Down => Some(Message::FocusNext),
            KeyCode::BackTab | KeyCode::Up => Some(Message::FocusPrev),

            KeyCode::PageUp => Some(Message::SchedulePageUp),
            KeyCode::PageDown => Some(Message::SchedulePageDown),

            KeyCode::Left => Some(Message::CursorLeft),
            KeyCode::Right => Some(Message::CursorRight),
            KeyCode::Home => Some(Message::CursorHome),
            KeyCode::End => Some(Message::CursorEnd),

            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Delete => Some(Message::Delete),

            // Plain typing goes into the focused field; the formatter
            // strips anything that isn't money-shaped on the next refresh.
            KeyCode::Char(ch) if !ctrl => Some(Message::Input(ch)),
            _ => None,
        }
    }

    fn handle_mouse(mouse: MouseEvent) -> Option<Message> {
        match mouse.kind {
            MouseEventKind::ScrollUp => Some(Message::ScheduleUp(3)),
            MouseEventKind::ScrollDown => Some(Message::ScheduleDown(3)),
            _ => None,
        }
    }
}

use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::app::{App, Model, ToastLevel, update};
use crate::export;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal — amort requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new((size.width, size.height));
        model.installment = self.installment;
        model.export_path.clone_from(&self.export_path);
        model.apply_prefill(&self.prefill);

        execute!(stdout(), EnableMouseCapture)?;
        let result = Self::event_loop(&mut terminal, &mut model);

        let _ = execute!(stdout(), DisableMouseCapture);
        ratatui::restore();

        result
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { 250 };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = Self::handle_event(&event::read()?) {
                    tracing::trace!(?msg, "event message");
                    *model = update(std::mem::take(model), msg);
                    Self::run_side_effects(model);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?) {
                        *model = update(std::mem::take(model), msg);
                        Self::run_side_effects(model);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::view(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }

    /// Perform effects `update` requested but must not run itself.
    fn run_side_effects(model: &mut Model) {
        if let Some(path) = model.pending_export.take() {
            // Export what was calculated, not the possibly re-edited form.
            let terms = model.calculated_terms;
            match export::write_schedule_csv(
                &path,
                terms.as_ref(),
                model.summary.as_ref(),
                &model.schedule,
            ) {
                Ok(()) => {
                    model.show_toast(ToastLevel::Info, format!("Exported {}", path.display()));
                }
                Err(err) => {
                    tracing::warn!(path = %path.display(), "export failed: {err:#}");
                    model.show_toast(ToastLevel::Error, format!("Export failed: {err}"));
                }
            }
        }
    }
}

use super::Workbench;
use crate::kernel::services::adapters::AppMessage;
use crate::kernel::{Action, FormatDialect};
use std::sync::mpsc;
use std::time::{Duration, Instant};

impl Workbench {
    /// Periodic work from the main loop: script results and the format
    /// deadline.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        let mut changed = self.poll_messages(now);
        if self.scheduler.poll(now) {
            changed |= self.run_format(now, false);
        }
        changed |= self.pump_widget_events(now);
        changed
    }

    fn poll_messages(&mut self, now: Instant) -> bool {
        let Some(rx) = self.runtime_rx.take() else {
            return false;
        };

        let mut changed = false;
        let mut disconnected = false;
        let mut drained = 0usize;

        loop {
            if drained >= super::MAX_MESSAGE_DRAIN_PER_TICK {
                break;
            }
            match rx.try_recv() {
                Ok(msg) => {
                    drained += 1;
                    changed |= self.handle_message(msg, now);
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }

        if !disconnected {
            self.runtime_rx = Some(rx);
        }
        changed
    }

    /// Blocks up to `timeout` for one runtime message and applies it.
    pub fn wait_for_message(&mut self, timeout: Duration) -> bool {
        let Some(rx) = self.runtime_rx.as_ref() else {
            return false;
        };
        let received = rx.recv_timeout(timeout);
        match received {
            Ok(msg) => {
                self.handle_message(msg, Instant::now());
                true
            }
            Err(_) => false,
        }
    }

    pub fn handle_message(&mut self, msg: AppMessage, now: Instant) -> bool {
        match msg {
            AppMessage::RuntimeReady {
                runtime,
                elapsed_ms,
            } => self.apply(
                Action::AppendLog(format!("{runtime} runtime ready ({elapsed_ms} ms)")),
                now,
            ),
            AppMessage::ScriptFinished { name, result } => {
                self.pending_runs = self.pending_runs.saturating_sub(1);
                self.apply(Action::ScriptFinished { name, result }, now)
            }
        }
    }

    /// Formats the active buffer. Unavailable formatters and failures leave
    /// the text untouched; only an explicit request reports them in the log.
    pub(super) fn run_format(&mut self, now: Instant, explicit: bool) -> bool {
        let Some(name) = self
            .store
            .state()
            .workspace
            .active_name()
            .map(str::to_string)
        else {
            return false;
        };

        if !self.formatter.is_ready() {
            tracing::debug!(name = %name, "formatter not ready, skipping");
            if explicit {
                return self.apply(
                    Action::AppendLog("Formatter is not available".to_string()),
                    now,
                );
            }
            return false;
        }

        let Some(buffer) = self.buffers.id_of(&name) else {
            return false;
        };
        let Some(text) = self.buffers.widget().text(buffer) else {
            return false;
        };

        let started = Instant::now();
        match self.formatter.format(&text, FormatDialect::from_name(&name)) {
            Ok(formatted) if formatted == text => {
                tracing::debug!(name = %name, "already formatted");
                false
            }
            Ok(formatted) => {
                tracing::debug!(
                    name = %name,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "formatted"
                );
                let cursor = self.buffers.widget().cursor(buffer).unwrap_or_default();
                let widget = self.buffers.widget_mut();
                widget.set_text(buffer, &formatted);
                widget.set_cursor(buffer, cursor);

                let mut changed = self.pump_widget_events(now);
                changed |= self.apply(Action::AppendLog(format!("Auto formatted {name}")), now);
                changed
            }
            Err(e) => {
                tracing::warn!(name = %name, error = %e, "format failed");
                if explicit {
                    return self.apply(
                        Action::AppendLog(format!("Format failed for {name}: {e}")),
                        now,
                    );
                }
                false
            }
        }
    }
}

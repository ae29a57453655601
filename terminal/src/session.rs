//! Interactive converter session.

use std::io::Write;
use std::sync::Arc;

use chrono::Utc;
use quickfx_common::{Currency, CurrencyCatalog};
use quickfx_converter::{Coordinator, ConverterView, Event};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

use crate::command::{Command, HELP};

/// Reads commands, forwards them to the coordinator, and redraws the view.
pub struct Session<W: Write> {
    coordinator: Arc<Coordinator>,
    catalog: CurrencyCatalog,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(coordinator: Arc<Coordinator>, catalog: CurrencyCatalog, out: W) -> Self {
        Self {
            coordinator,
            catalog,
            out,
        }
    }

    /// Run the first refresh, then process commands until `quit` or end of input.
    pub async fn run<R>(&mut self, input: R) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        self.apply(Event::Started).await?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.out, "{}", e)?;
                    continue;
                }
            };

            debug!(?command, "Command received");

            match command {
                Command::Quit => break,
                Command::Help => writeln!(self.out, "{}", HELP)?,
                Command::List => self.list()?,
                Command::Amount(text) => self.apply(Event::AmountChanged(text)).await?,
                Command::From(code) => {
                    if self.check_code(&code)? {
                        self.apply(Event::FromChanged(code)).await?;
                    }
                }
                Command::To(code) => {
                    if self.check_code(&code)? {
                        self.apply(Event::ToChanged(code)).await?;
                    }
                }
                Command::Swap => self.apply(Event::Swapped).await?,
                Command::Retry => self.apply(Event::RetryRequested).await?,
            }
        }

        let metrics = self.coordinator.metrics();
        info!(
            events = metrics.events_total,
            fetches = metrics.fetches_started,
            failed = metrics.fetches_failed,
            "Session ended"
        );

        Ok(())
    }

    /// Dispatch an event; show the loading view while a fetch runs.
    async fn apply(&mut self, event: Event) -> anyhow::Result<()> {
        if let Some(request) = self.coordinator.dispatch(event) {
            self.render()?;
            self.coordinator.execute(request).await;
        }
        self.render()
    }

    fn render(&mut self) -> anyhow::Result<()> {
        let view = ConverterView::build(&self.coordinator.snapshot(), &self.catalog, Utc::now());
        writeln!(self.out, "{}", view.render_text())?;
        self.out.flush()?;
        Ok(())
    }

    /// Selectors only offer catalog codes; mirror that here.
    fn check_code(&mut self, code: &Currency) -> anyhow::Result<bool> {
        if self.catalog.contains(code) {
            Ok(true)
        } else {
            writeln!(self.out, "Unknown currency: {} (try `list`)", code)?;
            Ok(false)
        }
    }

    fn list(&mut self) -> anyhow::Result<()> {
        for entry in self.catalog.entries() {
            writeln!(self.out, "{:<4} {}", entry.code, entry.name)?;
        }
        Ok(())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.out
    }
}

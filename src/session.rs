use std::io::{BufRead, Write};

use anyhow::Result;

use crate::config::Config;
use crate::data::loader;
use crate::stats;
use crate::ui::console::{Console, PromptError};
use crate::ui::filters::collect_filters;

// ---------------------------------------------------------------------------
// Session – the interactive explore / report / restart loop
// ---------------------------------------------------------------------------

pub struct Session<R, W> {
    config: Config,
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(config: Config, console: Console<R, W>) -> Self {
        Session { config, console }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Run until the user declines to restart.
    ///
    /// Load failures, running out of input while choosing filters, and
    /// exhausting the retry limit all end the session with an error.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.run_once()?;

            match self
                .console
                .confirm("\nWould you like to restart? Enter yes or no.\n")
            {
                Ok(true) => continue,
                Ok(false) | Err(PromptError::EndOfInput) => break,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// One pass: choose filters, load the matching trips, print every report.
    pub fn run_once(&mut self) -> Result<()> {
        let selection = collect_filters(&mut self.console, self.config.max_attempts)?;
        let dataset = loader::load(&self.config.data_dir, self.config.format, &selection)?;

        let out = self.console.out();
        stats::time::report(out, &dataset)?;
        stats::station::report(out, &dataset)?;
        stats::duration::report(out, &dataset)?;
        stats::user::report(out, &dataset, selection.city)?;
        Ok(())
    }
}

//! # Read-Eval-Print Loop
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  draw ──► prompt ──► read line ──► parse ──► dispatch ──► Outcome      │
//! │   ▲                                                          │          │
//! │   └────────────── Redraw / Notice ◄──────────────────────────┘          │
//! │                                   Print ──► write text, prompt again    │
//! │                                   Quit / EOF ──► return                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so the loop can be driven from a test with
//! an in-memory script.

use std::io::{BufRead, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use marketcalc_core::preferences::KeyValueStore;
use marketcalc_core::session::AppContext;
use tracing::debug;

use crate::commands::{self, Outcome};
use crate::error::AppResult;
use crate::state::AppConfig;
use crate::view::{self, Palette};

/// Terminal behaviour switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplOptions {
    /// Clear the screen before each redraw.
    pub clear_screen: bool,
    /// Colour output with the theme palette.
    pub color: bool,
}

impl From<&AppConfig> for ReplOptions {
    fn from(config: &AppConfig) -> Self {
        ReplOptions {
            clear_screen: config.clear_screen,
            color: config.color,
        }
    }
}

pub struct Repl<S> {
    ctx: AppContext<S>,
    options: ReplOptions,
}

impl<S: KeyValueStore> Repl<S> {
    pub fn new(ctx: AppContext<S>, options: ReplOptions) -> Self {
        Repl { ctx, options }
    }

    /// Runs until `quit` or end of input.
    ///
    /// Command errors are printed and the loop carries on; only I/O errors
    /// end it early.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> AppResult<()> {
        self.draw(out, None)?;

        let mut lines = input.lines();
        loop {
            write!(out, "{}", view::prompt(self.ctx.dialog()))?;
            out.flush()?;

            let Some(line) = lines.next() else {
                writeln!(out)?;
                break;
            };
            let line = line?;

            let outcome = commands::parse(&line, self.ctx.dialog()).and_then(|command| {
                command
                    .map(|command| commands::dispatch(&mut self.ctx, command))
                    .transpose()
            });

            match outcome {
                Ok(None) => {}
                Ok(Some(Outcome::Redraw)) => self.draw(out, None)?,
                Ok(Some(Outcome::Notice(message))) => self.draw(out, Some(&message))?,
                Ok(Some(Outcome::Print(text))) => writeln!(out, "{}", text)?,
                Ok(Some(Outcome::Quit)) => break,
                Err(e) => {
                    debug!(code = ?e.code, input = %line, "Command failed");
                    let palette = self.palette();
                    writeln!(out, "{}", palette.danger(&format!("error: {}", e)))?;
                }
            }
        }

        Ok(())
    }

    pub fn context(&self) -> &AppContext<S> {
        &self.ctx
    }

    pub fn into_context(self) -> AppContext<S> {
        self.ctx
    }

    fn palette(&self) -> Palette {
        Palette::for_theme(self.ctx.preferences().theme, self.options.color)
    }

    fn draw<W: Write>(&self, out: &mut W, notice: Option<&str>) -> AppResult<()> {
        if self.options.clear_screen {
            queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        }

        let palette = self.palette();
        write!(out, "{}", view::render(&self.ctx.snapshot(), &palette))?;
        if let Some(message) = notice {
            writeln!(out, "\n{}", palette.accent(message))?;
        }
        writeln!(out)?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use marketcalc_core::preferences::{MemoryStore, CURRENCY_KEY, THEME_KEY};
    use marketcalc_core::Theme;
    use std::io::Cursor;

    const PLAIN: ReplOptions = ReplOptions {
        clear_screen: false,
        color: false,
    };

    fn run_script(store: MemoryStore, script: &str) -> (AppContext<MemoryStore>, String) {
        let mut repl = Repl::new(AppContext::new(store), PLAIN);
        let mut out = Vec::new();
        repl.run(Cursor::new(script), &mut out).unwrap();
        (repl.into_context(), String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_shopping_session() {
        let script = "\
weighed
name Tomatoes
price 100
qty 400
add
mrp
name Bread
price 25
add
quit
";
        let (ctx, out) = run_script(MemoryStore::new(), script);

        assert_eq!(ctx.bill().len(), 2);
        assert_eq!(ctx.bill().total().cents(), 6500);
        assert!(out.contains("Added #1 Tomatoes ₹40.00"));
        assert!(out.contains("Added #2 Bread ₹25.00"));
        assert!(out.contains("Total Amount  ₹65.00  (2 items)"));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (ctx, out) = run_script(MemoryStore::new(), "dance\nmrp\nadd\ncancel\n");

        assert!(out.contains("error: Unknown command: 'dance'"));
        assert!(out.contains("error: "));
        assert!(ctx.bill().is_empty());
        assert_eq!(ctx.dialog(), marketcalc_core::session::Dialog::None);
    }

    #[test]
    fn test_reset_confirmation() {
        let script = "mrp\nname Milk\nprice 30\nadd\nreset\nconfirm\n";
        let (ctx, out) = run_script(MemoryStore::new(), script);

        assert!(out.contains(view::RESET_DESCRIPTION));
        assert!(out.contains("Bill cleared (1 item removed)"));
        assert!(ctx.bill().is_empty());
    }

    #[test]
    fn test_preferences_are_loaded_and_saved() {
        let store = MemoryStore::with_entries([(THEME_KEY, "dark"), (CURRENCY_KEY, "USD")]);
        let (ctx, out) = run_script(store, "theme\ncurrency eur\n");

        assert!(out.contains("🇺🇸 USD · dark"));
        assert_eq!(ctx.preferences().theme, Theme::Light);
        assert_eq!(
            ctx.preferences_store().store().get(CURRENCY_KEY).unwrap().as_deref(),
            Some("EUR")
        );
    }

    #[test]
    fn test_print_outcome_is_not_redrawn() {
        let (_, out) = run_script(MemoryStore::new(), "currencies\n");
        assert!(out.contains("* 🇮🇳 INR"));
        assert_eq!(out.matches(view::TITLE).count(), 1);
    }

    #[test]
    fn test_clear_screen_writes_escape_codes() {
        let options = ReplOptions {
            clear_screen: true,
            color: false,
        };
        let mut repl = Repl::new(AppContext::new(MemoryStore::new()), options);
        let mut out = Vec::new();
        repl.run(Cursor::new(""), &mut out).unwrap();

        assert!(out.starts_with(b"\x1b["));
    }
}

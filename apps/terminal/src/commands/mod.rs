//! # Commands Module
//!
//! Turns typed lines into intents on the application context.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs          ◄─── You are here (parse, dispatch, help)
//! ├── bill.rs         ◄─── delete, reset flow
//! ├── form.rs         ◄─── dialog fields, add, cancel
//! └── preferences.rs  ◄─── currency, theme
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  "qty 400"  ──► parse(line, Dialog::Weighed) ──► Command::SetQuantity   │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                              dispatch(&mut ctx, command)                │
//! │                                                        │                │
//! │                                                        ▼                │
//! │                           Outcome::Redraw / Notice / Print / Quit      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The words accepted depend on the open dialog, so `price 25` means the
//! base price in the weighed form and the fixed price in the MRP form.

pub mod bill;
pub mod form;
pub mod preferences;

use marketcalc_core::preferences::KeyValueStore;
use marketcalc_core::session::{AppContext, Dialog};
use marketcalc_core::units::{BaseUnit, MeasuredUnit};
use marketcalc_core::ItemId;

use crate::error::{AppError, AppResult};

/// One user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Bill view
    OpenWeighed,
    OpenMrp,
    Delete(ItemId),
    RequestReset,
    SetCurrency(String),
    ListCurrencies,
    ToggleTheme,

    // Form dialogs
    SetName(String),
    SetPrice(String),
    SetBaseUnit(BaseUnit),
    SetQuantity(String),
    SetMeasuredUnit(MeasuredUnit),
    Submit,
    CancelDialog,

    // Reset dialog
    ConfirmReset,
    CancelReset,

    // Anywhere
    Show,
    Json,
    Help,
    Quit,
}

/// What the front end should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Draw the screen again.
    Redraw,
    /// Draw the screen again with a one-line message under it.
    Notice(String),
    /// Print text as-is, without redrawing.
    Print(String),
    /// End the session.
    Quit,
}

/// Words that only work with no dialog open.
const BILL_VIEW_WORDS: &[&str] = &[
    "weighed", "w", "mrp", "m", "delete", "del", "rm", "reset", "currency", "currencies",
    "theme",
];

/// Parses one typed line.
///
/// ## Returns
/// * `Ok(None)` - blank line
/// * `Ok(Some(command))` - recognized command
/// * `Err(_)` - unknown word, missing argument, or a word not usable in
///   the open dialog
pub fn parse(line: &str, dialog: Dialog) -> AppResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let word = word.to_ascii_lowercase();

    let anywhere = match word.as_str() {
        "help" | "?" => Some(Command::Help),
        "quit" | "exit" | "q" => Some(Command::Quit),
        "show" => Some(Command::Show),
        "json" => Some(Command::Json),
        _ => None,
    };
    if anywhere.is_some() {
        return Ok(anywhere);
    }

    let command = match dialog {
        Dialog::None => parse_bill_view(&word, rest),
        Dialog::Weighed => parse_weighed(&word, rest),
        Dialog::Mrp => parse_mrp(&word, rest),
        Dialog::ConfirmReset => parse_confirm_reset(&word),
    };

    match command {
        Some(result) => result.map(Some),
        None if dialog != Dialog::None && BILL_VIEW_WORDS.contains(&word.as_str()) => Err(
            AppError::wrong_dialog("Finish or cancel the open dialog first ('cancel')"),
        ),
        None => Err(AppError::unknown_command(line)),
    }
}

fn parse_bill_view(word: &str, rest: &str) -> Option<AppResult<Command>> {
    let command = match word {
        "weighed" | "w" => Ok(Command::OpenWeighed),
        "mrp" | "m" => Ok(Command::OpenMrp),
        "delete" | "del" | "rm" => {
            if rest.is_empty() {
                Err(AppError::validation("Usage: delete <item number>"))
            } else {
                rest.parse::<ItemId>()
                    .map(Command::Delete)
                    .map_err(AppError::from)
            }
        }
        "reset" => Ok(Command::RequestReset),
        "currency" if rest.is_empty() => Ok(Command::ListCurrencies),
        "currency" => Ok(Command::SetCurrency(rest.to_string())),
        "currencies" => Ok(Command::ListCurrencies),
        "theme" => Ok(Command::ToggleTheme),
        _ => return None,
    };
    Some(command)
}

fn parse_weighed(word: &str, rest: &str) -> Option<AppResult<Command>> {
    let command = match word {
        "name" => Ok(Command::SetName(rest.to_string())),
        "price" => Ok(Command::SetPrice(rest.to_string())),
        "per" => rest
            .parse::<BaseUnit>()
            .map(Command::SetBaseUnit)
            .map_err(AppError::from),
        "qty" | "quantity" => Ok(Command::SetQuantity(rest.to_string())),
        "unit" => rest
            .parse::<MeasuredUnit>()
            .map(Command::SetMeasuredUnit)
            .map_err(AppError::from),
        "add" => Ok(Command::Submit),
        "cancel" => Ok(Command::CancelDialog),
        _ => return None,
    };
    Some(command)
}

fn parse_mrp(word: &str, rest: &str) -> Option<AppResult<Command>> {
    let command = match word {
        "name" => Command::SetName(rest.to_string()),
        "price" => Command::SetPrice(rest.to_string()),
        "add" => Command::Submit,
        "cancel" => Command::CancelDialog,
        _ => return None,
    };
    Some(Ok(command))
}

fn parse_confirm_reset(word: &str) -> Option<AppResult<Command>> {
    let command = match word {
        "confirm" | "yes" | "y" | "reset" => Command::ConfirmReset,
        "cancel" | "no" | "n" => Command::CancelReset,
        _ => return None,
    };
    Some(Ok(command))
}

/// Applies `command` to the context.
pub fn dispatch<S: KeyValueStore>(
    ctx: &mut AppContext<S>,
    command: Command,
) -> AppResult<Outcome> {
    tracing::debug!(?command, dialog = ?ctx.dialog(), "Dispatching command");

    match command {
        Command::OpenWeighed => form::open_weighed(ctx),
        Command::OpenMrp => form::open_mrp(ctx),
        Command::Delete(id) => bill::delete(ctx, id),
        Command::RequestReset => bill::request_reset(ctx),
        Command::SetCurrency(code) => preferences::set_currency(ctx, &code),
        Command::ListCurrencies => preferences::list_currencies(ctx),
        Command::ToggleTheme => preferences::toggle_theme(ctx),

        Command::SetName(text) => form::set_name(ctx, text),
        Command::SetPrice(text) => form::set_price(ctx, text),
        Command::SetBaseUnit(unit) => form::set_base_unit(ctx, unit),
        Command::SetQuantity(text) => form::set_quantity(ctx, text),
        Command::SetMeasuredUnit(unit) => form::set_measured_unit(ctx, unit),
        Command::Submit => form::submit(ctx),
        Command::CancelDialog => form::cancel(ctx),

        Command::ConfirmReset => bill::confirm_reset(ctx),
        Command::CancelReset => bill::cancel_reset(ctx),

        Command::Show => Ok(Outcome::Redraw),
        Command::Json => {
            let json = serde_json::to_string_pretty(&ctx.snapshot())
                .map_err(|e| AppError::internal(e.to_string()))?;
            Ok(Outcome::Print(json))
        }
        Command::Help => Ok(Outcome::Print(help_text(ctx.dialog()).to_string())),
        Command::Quit => Ok(Outcome::Quit),
    }
}

/// Command reference for the open dialog.
pub fn help_text(dialog: Dialog) -> &'static str {
    match dialog {
        Dialog::None => {
            "\
Commands:
  weighed            Calculate & Add Item (price per unit x quantity)
  mrp                Add Fixed Price Item
  delete <n>         Remove item number n
  reset              Clear the bill (asks for confirmation)
  currency <code>    Change currency, e.g. 'currency usd'
  currencies         List available currencies
  theme              Switch between light and dark
  show               Redraw the bill
  json               Print the current state as JSON
  help               This list
  quit               Leave MarketCalc"
        }
        Dialog::Weighed => {
            "\
Calculate & Add Item:
  name <text>        Item name (optional, defaults to 'Item')
  price <amount>     Base price, e.g. 'price 100'
  per <unit>         Base unit: kg, litre, quintal, dozen
  qty <amount>       Quantity bought, e.g. 'qty 400'
  unit <unit>        Unit of the quantity, e.g. 'unit gram'
  add                Add to the bill
  cancel             Close without adding (fields are kept)"
        }
        Dialog::Mrp => {
            "\
Add Fixed Price Item:
  name <text>        Item name (required)
  price <amount>     Printed price, e.g. 'price 25'
  add                Add to the bill
  cancel             Close without adding (fields are kept)"
        }
        Dialog::ConfirmReset => {
            "\
Reset Bill?
  confirm            Clear all items
  cancel             Keep the bill"
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

//! # Bill Commands
//!
//! Deleting lines and the two-step reset.

use marketcalc_core::preferences::KeyValueStore;
use marketcalc_core::session::{AppContext, Dialog};
use marketcalc_core::ItemId;

use super::Outcome;
use crate::error::{AppError, AppResult};

/// Removes a line. An unknown number is reported but changes nothing.
pub fn delete<S: KeyValueStore>(ctx: &mut AppContext<S>, id: ItemId) -> AppResult<Outcome> {
    match ctx.delete_item(id) {
        Some(item) => Ok(Outcome::Notice(format!("Removed #{} {}", item.id, item.name))),
        None => Ok(Outcome::Notice(format!("No item #{} on the bill", id))),
    }
}

pub fn request_reset<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    if ctx.bill().is_empty() {
        return Ok(Outcome::Notice("The bill is already empty".to_string()));
    }

    ctx.request_reset();
    Ok(Outcome::Redraw)
}

pub fn confirm_reset<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    let removed = ctx.confirm_reset()?;
    Ok(Outcome::Notice(format!(
        "Bill cleared ({} item{} removed)",
        removed,
        if removed == 1 { "" } else { "s" }
    )))
}

pub fn cancel_reset<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    if ctx.dialog() != Dialog::ConfirmReset {
        return Err(AppError::wrong_dialog("No reset is waiting for confirmation"));
    }

    ctx.cancel_reset();
    Ok(Outcome::Redraw)
}

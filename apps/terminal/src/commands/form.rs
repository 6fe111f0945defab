//! # Form Commands
//!
//! Opening the two entry dialogs, editing their fields, adding and
//! cancelling.

use marketcalc_core::preferences::KeyValueStore;
use marketcalc_core::session::{AppContext, Dialog};
use marketcalc_core::units::{BaseUnit, MeasuredUnit};
use marketcalc_core::LineItem;

use super::Outcome;
use crate::error::{AppError, AppResult};

pub fn open_weighed<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    ctx.open_weighed_form();
    Ok(Outcome::Redraw)
}

pub fn open_mrp<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    ctx.open_mrp_form();
    Ok(Outcome::Redraw)
}

pub fn set_name<S: KeyValueStore>(ctx: &mut AppContext<S>, text: String) -> AppResult<Outcome> {
    match ctx.dialog() {
        Dialog::Weighed => ctx.weighed_form_mut().item_name = text,
        Dialog::Mrp => ctx.mrp_form_mut().item_name = text,
        _ => return Err(no_form_open()),
    }
    Ok(Outcome::Redraw)
}

/// Base price in the weighed form, fixed price in the MRP form.
pub fn set_price<S: KeyValueStore>(ctx: &mut AppContext<S>, text: String) -> AppResult<Outcome> {
    match ctx.dialog() {
        Dialog::Weighed => ctx.weighed_form_mut().base_price = text,
        Dialog::Mrp => ctx.mrp_form_mut().price = text,
        _ => return Err(no_form_open()),
    }
    Ok(Outcome::Redraw)
}

pub fn set_base_unit<S: KeyValueStore>(
    ctx: &mut AppContext<S>,
    unit: BaseUnit,
) -> AppResult<Outcome> {
    require_weighed(ctx)?;
    ctx.weighed_form_mut().set_base_unit(unit);
    Ok(Outcome::Redraw)
}

pub fn set_quantity<S: KeyValueStore>(
    ctx: &mut AppContext<S>,
    text: String,
) -> AppResult<Outcome> {
    require_weighed(ctx)?;
    ctx.weighed_form_mut().quantity = text;
    Ok(Outcome::Redraw)
}

pub fn set_measured_unit<S: KeyValueStore>(
    ctx: &mut AppContext<S>,
    unit: MeasuredUnit,
) -> AppResult<Outcome> {
    require_weighed(ctx)?;
    ctx.weighed_form_mut().set_measured_unit(unit)?;
    Ok(Outcome::Redraw)
}

/// Adds the open form to the bill.
pub fn submit<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    let item = match ctx.dialog() {
        Dialog::Weighed => ctx.submit_weighed()?,
        Dialog::Mrp => ctx.submit_mrp()?,
        _ => return Err(no_form_open()),
    };

    Ok(Outcome::Notice(added_notice(ctx, &item)))
}

/// Closes the dialog; field contents stay for next time.
pub fn cancel<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    ctx.close_dialog();
    Ok(Outcome::Redraw)
}

fn added_notice<S: KeyValueStore>(ctx: &AppContext<S>, item: &LineItem) -> String {
    let symbol = ctx.preferences().currency.symbol;
    format!(
        "Added #{} {} {}",
        item.id,
        item.name,
        item.price.format_with_symbol(symbol)
    )
}

fn require_weighed<S: KeyValueStore>(ctx: &AppContext<S>) -> AppResult<()> {
    if ctx.dialog() != Dialog::Weighed {
        return Err(AppError::wrong_dialog(
            "Units can only be set in the weighed form ('weighed')",
        ));
    }
    Ok(())
}

fn no_form_open() -> AppError {
    AppError::wrong_dialog("Open a form first ('weighed' or 'mrp')")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use marketcalc_core::preferences::MemoryStore;

    #[test]
    fn test_field_edits_need_open_form() {
        let mut ctx = AppContext::new(MemoryStore::new());
        let err = set_name(&mut ctx, "Milk".to_string()).unwrap_err();
        assert_eq!(err.code, ErrorCode::WrongDialog);

        ctx.open_mrp_form();
        let err = set_base_unit(&mut ctx, BaseUnit::Dozen).unwrap_err();
        assert_eq!(err.code, ErrorCode::WrongDialog);
    }

    #[test]
    fn test_measured_unit_outside_base_set() {
        let mut ctx = AppContext::new(MemoryStore::new());
        open_weighed(&mut ctx).unwrap();
        set_base_unit(&mut ctx, BaseUnit::Litre).unwrap();

        let err = set_measured_unit(&mut ctx, MeasuredUnit::Gram).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(ctx.weighed_form().measured_unit(), MeasuredUnit::Ml);
    }

    #[test]
    fn test_mrp_submit_notice_uses_currency() {
        let mut ctx = AppContext::new(MemoryStore::new());
        ctx.set_currency("GBP").unwrap();
        open_mrp(&mut ctx).unwrap();
        set_name(&mut ctx, "Tea".to_string()).unwrap();
        set_price(&mut ctx, "3.5".to_string()).unwrap();

        let outcome = submit(&mut ctx).unwrap();
        assert_eq!(outcome, Outcome::Notice("Added #1 Tea £3.50".to_string()));
        assert_eq!(ctx.mrp_form().item_name, "");
    }

    #[test]
    fn test_cancel_keeps_fields() {
        let mut ctx = AppContext::new(MemoryStore::new());
        open_mrp(&mut ctx).unwrap();
        set_name(&mut ctx, "Tea".to_string()).unwrap();
        cancel(&mut ctx).unwrap();

        assert_eq!(ctx.dialog(), Dialog::None);
        assert_eq!(ctx.mrp_form().item_name, "Tea");
    }
}

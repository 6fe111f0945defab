//! # Preference Commands
//!
//! Currency selection and the theme switch. Both are saved immediately.

use marketcalc_core::currency::Currency;
use marketcalc_core::preferences::KeyValueStore;
use marketcalc_core::session::AppContext;

use super::Outcome;
use crate::error::AppResult;

pub fn set_currency<S: KeyValueStore>(ctx: &mut AppContext<S>, code: &str) -> AppResult<Outcome> {
    let currency = ctx.set_currency(code)?;
    Ok(Outcome::Notice(format!(
        "Currency set to {} {} ({})",
        currency.flag, currency.code, currency.name
    )))
}

/// The catalog, with the selected entry marked.
pub fn list_currencies<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    let selected = ctx.preferences().currency.code;

    let lines: Vec<String> = Currency::all()
        .iter()
        .map(|c| {
            let marker = if c.code == selected { "*" } else { " " };
            format!("{} {} {:<4} {:<4} {}", marker, c.flag, c.code, c.symbol, c.name)
        })
        .collect();

    Ok(Outcome::Print(lines.join("\n")))
}

pub fn toggle_theme<S: KeyValueStore>(ctx: &mut AppContext<S>) -> AppResult<Outcome> {
    let theme = ctx.toggle_theme();
    Ok(Outcome::Notice(format!("Theme: {}", theme)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use marketcalc_core::preferences::{MemoryStore, CURRENCY_KEY};
    use marketcalc_core::Theme;

    #[test]
    fn test_set_currency() {
        let mut ctx = AppContext::new(MemoryStore::new());
        let outcome = set_currency(&mut ctx, "jpy").unwrap();
        assert_eq!(
            outcome,
            Outcome::Notice("Currency set to 🇯🇵 JPY (Japanese Yen)".to_string())
        );
        assert_eq!(
            ctx.preferences_store()
                .store()
                .get(CURRENCY_KEY)
                .unwrap()
                .as_deref(),
            Some("JPY")
        );
    }

    #[test]
    fn test_unknown_currency() {
        let mut ctx = AppContext::new(MemoryStore::new());
        let err = set_currency(&mut ctx, "XYZ").unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownCurrency);
        assert_eq!(ctx.preferences().currency.code, "INR");
    }

    #[test]
    fn test_list_marks_selected() {
        let mut ctx = AppContext::new(MemoryStore::new());
        ctx.set_currency("EUR").unwrap();

        let Outcome::Print(text) = list_currencies(&mut ctx).unwrap() else {
            panic!("expected Print");
        };
        assert_eq!(text.lines().count(), Currency::all().len());
        assert!(text.lines().any(|l| l.starts_with('*') && l.contains("EUR")));
        assert_eq!(text.lines().filter(|l| l.starts_with('*')).count(), 1);
    }

    #[test]
    fn test_toggle_theme() {
        let mut ctx = AppContext::new(MemoryStore::new());
        toggle_theme(&mut ctx).unwrap();
        assert_eq!(ctx.preferences().theme, Theme::Dark);
    }
}

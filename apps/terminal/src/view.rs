//! # View
//!
//! Renders a [`Snapshot`] as plain text, coloured with the palette of the
//! selected theme.
//!
//! ```text
//! MarketCalc                                      🇮🇳 INR · light
//! Easily calculate prices for weighed and fixed-rate items.
//!
//! Total Amount  ₹40.00  (1 item)
//!
//!   #  Item Name   Details              Price
//!   1  Tomatoes    400gram @ ₹100/kg   ₹40.00
//! ```

use crossterm::style::{style, Color, Stylize};
use marketcalc_core::session::{Dialog, Snapshot};
use marketcalc_core::{LineItem, Theme};

pub const TITLE: &str = "MarketCalc";
pub const TAGLINE: &str = "Easily calculate prices for weighed and fixed-rate items.";
pub const EMPTY_BILL: &str = "Your cart is empty. Add an item to get started!";
pub const RESET_TITLE: &str = "Reset Bill?";
pub const RESET_DESCRIPTION: &str =
    "This will clear all items and reset the total to zero. This action cannot be undone.";

// =============================================================================
// Palette
// =============================================================================

/// Foreground colours for one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    accent: Color,
    muted: Color,
    total: Color,
    danger: Color,
    enabled: bool,
}

impl Palette {
    pub const LIGHT: Palette = Palette {
        accent: Color::DarkBlue,
        muted: Color::DarkGrey,
        total: Color::DarkGreen,
        danger: Color::DarkRed,
        enabled: true,
    };

    pub const DARK: Palette = Palette {
        accent: Color::Cyan,
        muted: Color::Grey,
        total: Color::Green,
        danger: Color::Red,
        enabled: true,
    };

    /// A palette that leaves text untouched.
    pub const PLAIN: Palette = Palette {
        enabled: false,
        ..Palette::LIGHT
    };

    pub fn for_theme(theme: Theme, enabled: bool) -> Palette {
        let palette = if theme.is_dark() {
            Palette::DARK
        } else {
            Palette::LIGHT
        };
        Palette { enabled, ..palette }
    }

    pub fn accent(&self, text: &str) -> String {
        self.paint(text, self.accent)
    }

    pub fn muted(&self, text: &str) -> String {
        self.paint(text, self.muted)
    }

    pub fn total(&self, text: &str) -> String {
        self.paint(text, self.total)
    }

    pub fn danger(&self, text: &str) -> String {
        self.paint(text, self.danger)
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Draws the whole screen for one frame.
pub fn render(snapshot: &Snapshot, palette: &Palette) -> String {
    let mut out = String::new();
    let symbol = snapshot.currency.symbol.as_str();

    let badge = format!(
        "{} {} · {}",
        snapshot.currency.flag, snapshot.currency.code, snapshot.theme
    );
    out.push_str(&format!("{}    {}\n", palette.accent(TITLE), palette.muted(&badge)));
    out.push_str(&palette.muted(TAGLINE));
    out.push_str("\n\n");

    let count = snapshot.items.len();
    out.push_str(&format!(
        "Total Amount  {}  ({} item{})\n\n",
        palette.total(&snapshot.total.format_with_symbol(symbol)),
        count,
        if count == 1 { "" } else { "s" }
    ));

    if snapshot.items.is_empty() {
        out.push_str(&palette.muted(EMPTY_BILL));
        out.push('\n');
    } else {
        out.push_str(&render_table(&snapshot.items, symbol, palette));
    }

    match snapshot.dialog {
        Dialog::None => {}
        Dialog::Weighed => out.push_str(&render_weighed(snapshot, palette)),
        Dialog::Mrp => out.push_str(&render_mrp(snapshot, palette)),
        Dialog::ConfirmReset => {
            out.push('\n');
            out.push_str(&palette.danger(RESET_TITLE));
            out.push('\n');
            out.push_str(RESET_DESCRIPTION);
            out.push_str("\nType 'confirm' to clear or 'cancel' to keep the bill.\n");
        }
    }

    out
}

/// The prompt shown before each typed line.
pub fn prompt(dialog: Dialog) -> &'static str {
    match dialog {
        Dialog::None => "> ",
        Dialog::Weighed => "weighed> ",
        Dialog::Mrp => "mrp> ",
        Dialog::ConfirmReset => "reset? ",
    }
}

fn render_table(items: &[LineItem], symbol: &str, palette: &Palette) -> String {
    let rows: Vec<[String; 4]> = items
        .iter()
        .map(|item| {
            [
                item.id.to_string(),
                item.name.clone(),
                item.details.clone(),
                item.price.format_with_symbol(symbol),
            ]
        })
        .collect();

    let headings = ["#", "Item Name", "Details", "Price"];
    let mut widths = headings.map(width);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(width(cell));
        }
    }

    let mut out = String::new();
    let heading = format_row(&headings.map(str::to_string), &widths);
    out.push_str(&palette.muted(&heading));
    out.push('\n');
    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }
    out
}

/// Price is right-aligned, the rest left-aligned.
fn format_row(cells: &[String; 4], widths: &[usize; 4]) -> String {
    let mut line = String::from(" ");
    for (i, (cell, w)) in cells.iter().zip(widths).enumerate() {
        let pad = " ".repeat(w - width(cell));
        line.push_str("  ");
        if i == 3 {
            line.push_str(&pad);
            line.push_str(cell);
        } else {
            line.push_str(cell);
            line.push_str(&pad);
        }
    }
    line.trim_end().to_string()
}

fn width(text: &str) -> usize {
    text.chars().count()
}

fn render_weighed(snapshot: &Snapshot, palette: &Palette) -> String {
    let form = &snapshot.weighed_form;
    let symbol = snapshot.currency.symbol.as_str();

    let mut out = format!("\n{}\n", palette.accent("Calculate & Add Item"));
    out.push_str(&field("Item Name", &form.item_name, "e.g., Tomatoes", palette));
    out.push_str(&field(
        &format!("Price per {}", form.base_unit()),
        &form.base_price,
        "e.g., 100",
        palette,
    ));
    out.push_str(&field(
        &format!("Quantity ({})", form.measured_unit()),
        &form.quantity,
        "e.g., 400",
        palette,
    ));

    match snapshot.weighed_preview {
        Some(price) => out.push_str(&format!(
            "  Calculated Price  {}\n",
            palette.total(&price.format_with_symbol(symbol))
        )),
        None => {
            out.push_str(&palette.muted("  Enter a price and quantity to add this item."));
            out.push('\n');
        }
    }
    out
}

fn render_mrp(snapshot: &Snapshot, palette: &Palette) -> String {
    let form = &snapshot.mrp_form;

    let mut out = format!("\n{}\n", palette.accent("Add Fixed Price Item"));
    out.push_str(&field("Item Name", &form.item_name, "e.g., Bread", palette));
    out.push_str(&field(
        &format!("Price ({})", snapshot.currency.symbol),
        &form.price,
        "e.g., 25",
        palette,
    ));
    if !snapshot.mrp_submittable {
        out.push_str(&palette.muted("  Enter a name and price to add this item."));
        out.push('\n');
    }
    out
}

fn field(label: &str, value: &str, placeholder: &str, palette: &Palette) -> String {
    let shown = if value.is_empty() {
        palette.muted(placeholder)
    } else {
        value.to_string()
    };
    format!("  {:<18}{}\n", label, shown)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use marketcalc_core::preferences::MemoryStore;
    use marketcalc_core::session::AppContext;

    fn context() -> AppContext<MemoryStore> {
        AppContext::new(MemoryStore::new())
    }

    #[test]
    fn test_empty_bill() {
        let text = render(&context().snapshot(), &Palette::PLAIN);
        assert!(text.starts_with("MarketCalc"));
        assert!(text.contains("🇮🇳 INR · light"));
        assert!(text.contains(TAGLINE));
        assert!(text.contains("Total Amount  ₹0.00  (0 items)"));
        assert!(text.contains(EMPTY_BILL));
    }

    #[test]
    fn test_table_rows() {
        let mut ctx = context();
        ctx.open_mrp_form();
        ctx.mrp_form_mut().item_name = "Bread".to_string();
        ctx.mrp_form_mut().price = "25".to_string();
        ctx.submit_mrp().unwrap();

        let text = render(&ctx.snapshot(), &Palette::PLAIN);
        assert!(text.contains("Total Amount  ₹25.00  (1 item)"));
        assert!(text.contains("#  Item Name  Details   Price"));
        assert!(text.contains("1  Bread      MRP      ₹25.00"));
        assert!(!text.contains(EMPTY_BILL));
    }

    #[test]
    fn test_weighed_dialog_preview() {
        let mut ctx = context();
        ctx.open_weighed_form();
        ctx.weighed_form_mut().base_price = "100".to_string();
        ctx.weighed_form_mut().quantity = "400".to_string();

        let text = render(&ctx.snapshot(), &Palette::PLAIN);
        assert!(text.contains("Calculate & Add Item"));
        assert!(text.contains("e.g., Tomatoes"));
        assert!(text.contains("Calculated Price  ₹40.00"));

        ctx.weighed_form_mut().quantity.clear();
        let text = render(&ctx.snapshot(), &Palette::PLAIN);
        assert!(!text.contains("Calculated Price"));
    }

    #[test]
    fn test_reset_dialog() {
        let mut ctx = context();
        ctx.open_mrp_form();
        ctx.mrp_form_mut().item_name = "Bread".to_string();
        ctx.mrp_form_mut().price = "25".to_string();
        ctx.submit_mrp().unwrap();
        ctx.request_reset();

        let text = render(&ctx.snapshot(), &Palette::PLAIN);
        assert!(text.contains(RESET_TITLE));
        assert!(text.contains(RESET_DESCRIPTION));
    }

    #[test]
    fn test_palette_disabled_is_plain() {
        let palette = Palette::for_theme(Theme::Dark, false);
        assert_eq!(palette.accent("x"), "x");

        let palette = Palette::for_theme(Theme::Dark, true);
        assert_ne!(palette.accent("x"), "x");
        assert_ne!(Palette::for_theme(Theme::Light, true), palette);
    }
}

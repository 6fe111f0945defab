//! # Application Context
//!
//! One object owning everything a rendering surface needs: the bill, the
//! preferences, both entry forms and which dialog is open.
//!
//! ## Intent Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Rendering surface                 AppContext                           │
//! │  ─────────────────                 ──────────                           │
//! │  "Calculate & Add" ──────────────► open_weighed_form()                  │
//! │  typing in a field ──────────────► weighed_form_mut().quantity = ..     │
//! │  "Add" ──────────────────────────► submit_weighed() ──► Bill::add_item  │
//! │  trash icon ─────────────────────► delete_item(id)                      │
//! │  "Reset" ────────────────────────► request_reset()                      │
//! │  "Confirm" ──────────────────────► confirm_reset() ──► Bill::reset      │
//! │  currency picker ────────────────► set_currency(code)                   │
//! │  theme switch ───────────────────► toggle_theme()                       │
//! │                                                                         │
//! │  after every intent ◄──────────── snapshot()                            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All calls are synchronous; the context is owned by a single front end.

use serde::Serialize;
use ts_rs::TS;

use crate::currency::Currency;
use crate::error::{CoreError, CoreResult};
use crate::form::{MrpForm, WeighedForm};
use crate::ledger::Bill;
use crate::money::Money;
use crate::preferences::{KeyValueStore, Preferences, PreferencesStore};
use crate::types::{ItemId, LineItem, Theme};

/// Which dialog is in front of the bill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum Dialog {
    #[default]
    None,
    Weighed,
    Mrp,
    ConfirmReset,
}

/// Everything needed to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub items: Vec<LineItem>,
    pub total: Money,
    pub theme: Theme,
    pub currency: CurrencyView,
    pub dialog: Dialog,
    pub weighed_form: WeighedForm,
    pub mrp_form: MrpForm,
    /// Calculated price of the weighed form, when it is valid.
    pub weighed_preview: Option<Money>,
    pub weighed_submittable: bool,
    pub mrp_submittable: bool,
}

/// Owned copy of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CurrencyView {
    pub code: String,
    pub symbol: String,
    pub flag: String,
    pub name: String,
}

impl From<&Currency> for CurrencyView {
    fn from(currency: &Currency) -> Self {
        CurrencyView {
            code: currency.code.to_string(),
            symbol: currency.symbol.to_string(),
            flag: currency.flag.to_string(),
            name: currency.name.to_string(),
        }
    }
}

/// Session state for one running front end.
#[derive(Debug)]
pub struct AppContext<S> {
    bill: Bill,
    preferences: PreferencesStore<S>,
    weighed_form: WeighedForm,
    mrp_form: MrpForm,
    dialog: Dialog,
}

impl<S: KeyValueStore> AppContext<S> {
    /// Starts an empty bill and loads preferences from `store`.
    pub fn new(store: S) -> Self {
        AppContext {
            bill: Bill::new(),
            preferences: PreferencesStore::load(store),
            weighed_form: WeighedForm::new(),
            mrp_form: MrpForm::new(),
            dialog: Dialog::None,
        }
    }

    // -------------------------------------------------------------------------
    // Reads
    // -------------------------------------------------------------------------

    pub fn bill(&self) -> &Bill {
        &self.bill
    }

    pub fn preferences(&self) -> Preferences {
        self.preferences.current()
    }

    pub fn preferences_store(&self) -> &PreferencesStore<S> {
        &self.preferences
    }

    pub fn dialog(&self) -> Dialog {
        self.dialog
    }

    pub fn weighed_form(&self) -> &WeighedForm {
        &self.weighed_form
    }

    pub fn weighed_form_mut(&mut self) -> &mut WeighedForm {
        &mut self.weighed_form
    }

    pub fn mrp_form(&self) -> &MrpForm {
        &self.mrp_form
    }

    pub fn mrp_form_mut(&mut self) -> &mut MrpForm {
        &mut self.mrp_form
    }

    /// Everything the rendering surface shows, as owned data.
    pub fn snapshot(&self) -> Snapshot {
        let prefs = self.preferences.current();

        Snapshot {
            items: self.bill.items().to_vec(),
            total: self.bill.total(),
            theme: prefs.theme,
            currency: prefs.currency.into(),
            dialog: self.dialog,
            weighed_form: self.weighed_form.clone(),
            mrp_form: self.mrp_form.clone(),
            weighed_preview: self.weighed_form.preview(),
            weighed_submittable: self.weighed_form.is_submittable(),
            mrp_submittable: self.mrp_form.is_submittable(),
        }
    }

    // -------------------------------------------------------------------------
    // Dialogs
    // -------------------------------------------------------------------------

    /// Opens the weighed form with whatever it held when last cancelled.
    pub fn open_weighed_form(&mut self) {
        self.dialog = Dialog::Weighed;
    }

    pub fn open_mrp_form(&mut self) {
        self.dialog = Dialog::Mrp;
    }

    /// Closes any dialog. Form contents are kept; a pending reset is
    /// cancelled.
    pub fn close_dialog(&mut self) {
        self.dialog = Dialog::None;
    }

    // -------------------------------------------------------------------------
    // Bill
    // -------------------------------------------------------------------------

    /// Adds the weighed form as a line item.
    ///
    /// On success the form is reset and the dialog closed. On failure the
    /// bill, the form and the dialog are untouched.
    pub fn submit_weighed(&mut self) -> CoreResult<LineItem> {
        let symbol = self.preferences.currency().symbol;
        let new_item = self.weighed_form.validate()?.to_new_line_item(symbol)?;

        let item = self.bill.add_item(new_item)?.clone();
        self.weighed_form.reset();
        self.close_dialog();

        tracing::debug!(item_id = %item.id, price = %item.price, "Weighed item added");
        Ok(item)
    }

    /// Adds the MRP form as a line item. Same rules as
    /// [`submit_weighed`](Self::submit_weighed).
    pub fn submit_mrp(&mut self) -> CoreResult<LineItem> {
        let new_item = self.mrp_form.validate()?.to_new_line_item()?;

        let item = self.bill.add_item(new_item)?.clone();
        self.mrp_form.reset();
        self.close_dialog();

        tracing::debug!(item_id = %item.id, price = %item.price, "MRP item added");
        Ok(item)
    }

    /// Removes a line. Unknown ids are ignored.
    pub fn delete_item(&mut self, id: ItemId) -> Option<LineItem> {
        let removed = self.bill.remove_item(id);
        if removed.is_none() {
            tracing::debug!(item_id = %id, "Delete ignored, no such item");
        }
        removed
    }

    /// First step of a reset: asks for confirmation.
    pub fn request_reset(&mut self) {
        self.dialog = Dialog::ConfirmReset;
    }

    /// Second step of a reset: empties the bill.
    ///
    /// ## Returns
    /// How many lines were removed.
    ///
    /// ## Errors
    /// [`CoreError::ResetNotRequested`] unless [`request_reset`](Self::request_reset)
    /// was the last dialog opened.
    pub fn confirm_reset(&mut self) -> CoreResult<usize> {
        if self.dialog != Dialog::ConfirmReset {
            return Err(CoreError::ResetNotRequested);
        }

        let removed = self.bill.len();
        self.bill.reset();
        self.close_dialog();

        tracing::info!(removed, "Bill reset");
        Ok(removed)
    }

    pub fn cancel_reset(&mut self) {
        if self.dialog == Dialog::ConfirmReset {
            self.close_dialog();
        }
    }

    // -------------------------------------------------------------------------
    // Preferences
    // -------------------------------------------------------------------------

    /// Changes the display currency. Existing line details keep the symbol
    /// they were added with.
    pub fn set_currency(&mut self, code: &str) -> CoreResult<&'static Currency> {
        self.preferences.set_currency(code)
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.preferences.toggle_theme()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

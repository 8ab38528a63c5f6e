//! # Store Configuration
//!
//! Display and connection settings for one embedded session. Read-only
//! after construction: build the value you want, hand it to the session,
//! done. There is no environment or file loading here.

use serde::Serialize;
use ts_rs::TS;

/// Store identity, currency display, and the order service base URL.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct StoreConfig {
    /// Shown in the page header and on receipts.
    pub store_name: String,

    /// Currency symbol, rendered before the amount.
    pub currency_symbol: String,

    /// Fraction digits to render. Totals are whole amounts by the display
    /// rounding policy, so this only pads zeros ("1500" vs "1500.00").
    pub currency_decimals: u32,

    /// Base URL of the order service, without a trailing slash.
    pub server_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_name: "MiniMart Dev Store".to_string(),
            currency_symbol: "₫".to_string(),
            currency_decimals: 0,
            server_url: "http://127.0.0.1:5000".to_string(),
        }
    }
}

impl StoreConfig {
    /// Formats a rounded display amount with the store's currency settings.
    ///
    /// ## Example
    /// Defaults render `60000` as `"₫60000"`; a two-decimal store renders
    /// it as `"$60000.00"`.
    pub fn format_price(&self, amount: i64) -> String {
        if self.currency_decimals == 0 {
            format!("{}{}", self.currency_symbol, amount)
        } else {
            format!(
                "{}{}.{:0width$}",
                self.currency_symbol,
                amount,
                0,
                width = self.currency_decimals as usize
            )
        }
    }
}

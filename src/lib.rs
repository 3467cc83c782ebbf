//! [Open Exchange Rates](https://openexchangerates.org/) API library.
//!
//! Rates are decoded into [`rust_decimal::Decimal`] by default, straight from the JSON literal
//! text, so `0.862199` stays exactly `0.862199`. Other rate types plug in through
//! [`FromScientific`] and [`Client::with_rate`].

#![deny(missing_docs)]

pub mod client;
pub mod endpoint;
pub mod error;
pub mod rates;
pub mod scientific;

pub use client::{Builder, Client, DEFAULT_BASE, DEFAULT_TIME_SERIES_BASE};
pub use endpoint::{Endpoint, DEFAULT_BASE_URL};
pub use error::Error;
pub use rates::{CurrencyCatalog, RateSnapshot, TimeSeries};
pub use scientific::FromScientific;

pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;

//! Response data: [`RateSnapshot`], [`TimeSeries`] and [`CurrencyCatalog`].

use std::{collections::BTreeMap, fmt::Display, ops::{Div, Mul}};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::scientific::{self, FromScientific};

/// Currency code → display name, e.g. `"AED"` → `"United Arab Emirates Dirham"`.
pub type CurrencyCatalog = BTreeMap<String, String>;

/// Point-in-time exchange rates against a base currency.
///
/// Returned by the [`latest`](crate::Client::latest) and [`historical`](crate::Client::historical) endpoints.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "R: FromScientific, R::Error: Display"))]
pub struct RateSnapshot<R = Decimal> {
	/// Usage disclaimer.
	pub disclaimer: String,
	/// License terms.
	pub license: String,
	/// When the rates were published, in seconds since the Unix epoch.
	pub timestamp: i64,
	/// The base currency code.
	pub base: String,
	/// Units of each currency per one unit of [`base`](Self::base).
	#[serde(deserialize_with = "scientific::rates")]
	pub rates: BTreeMap<String, R>,
}

impl<R> RateSnapshot<R> {
	/// Gets the rate for the given currency, if exists.
	pub fn get(&self, currency: &str) -> Option<&R> {
		self.rates.get(currency)
	}

	/// The [`timestamp`](Self::timestamp) as a date-time.
	///
	/// Returns [`None`] if the timestamp is out of range.
	pub fn updated_at(&self) -> Option<DateTime<Utc>> {
		DateTime::from_timestamp(self.timestamp, 0)
	}

	/// Converts an amount between currencies.
	///
	/// The base currency may be used even when it is not listed in [`rates`](Self::rates).
	/// Returns [`None`] if either the `from` or `to` currencies are missing, or `from` has a zero rate.
	pub fn convert(&self, amount: &R, from: &str, to: &str) -> Option<R>
	where
		R: From<u8> + PartialEq,
		for<'x> &'x R: Div<&'x R, Output = R>,
		for<'x> &'x R: Mul<R, Output = R>,
	{
		let one = R::from(1);
		let rate = |currency: &str| match self.rates.get(currency) {
			Some(rate) => Some(rate),
			None if currency == self.base => Some(&one),
			None => None,
		};
		let from_value = rate(from)?;
		let to_value = rate(to)?;
		if *from_value == R::from(0) {
			return None;
		}
		Some(amount * (to_value / from_value))
	}
}

/// Per-date exchange rates over a date range.
///
/// Returned by the [`time-series`](crate::Client::time_series) endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "R: FromScientific, R::Error: Display"))]
pub struct TimeSeries<R = Decimal> {
	/// Usage disclaimer.
	pub disclaimer: String,
	/// License terms.
	pub license: String,
	/// First date of the range.
	pub start_date: NaiveDate,
	/// Last date of the range.
	pub end_date: NaiveDate,
	/// The base currency code.
	pub base: String,
	/// Rates per date, each as currency code → units per one unit of [`base`](Self::base).
	#[serde(deserialize_with = "scientific::series")]
	pub rates: BTreeMap<NaiveDate, BTreeMap<String, R>>,
}

impl<R> TimeSeries<R> {
	/// Gets the rates of the given date, if exists.
	pub fn on(&self, date: NaiveDate) -> Option<&BTreeMap<String, R>> {
		self.rates.get(&date)
	}

	/// Iterates over the dates and their rates, in date order.
	pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &BTreeMap<String, R>)> {
		self.rates.iter().map(|(date, rates)| (*date, rates))
	}

	/// Iterates over the rates of one currency, in date order.
	///
	/// Dates missing the currency are skipped.
	pub fn currency<'a>(&'a self, currency: &'a str) -> impl Iterator<Item = (NaiveDate, &'a R)> + 'a {
		self.iter().filter_map(move |(date, rates)| rates.get(currency).map(|rate| (date, rate)))
	}
}

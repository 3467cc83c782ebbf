//! [`FromScientific`] and the serde glue that feeds it raw JSON number literals.

use std::{collections::BTreeMap, fmt::Display};

use chrono::NaiveDate;
use serde::{de::Error as _, Deserialize, Deserializer};
use serde_json::value::RawValue;

/// Scientific notation parsing.
///
/// Rates are decoded from the literal text of the JSON number, so implementors see exactly what
/// the service sent, never an intermediate `f64`.
pub trait FromScientific: Sized {
	/// The parse error type.
	type Error;

	/// Parses a decimal number from a string.
	///
	/// The number representation may or may not be in scientific notation.
	fn parse_scientific(s: &str) -> Result<Self, Self::Error>;
}

impl FromScientific for f64 {
	type Error = serde_json::Error;
	fn parse_scientific(s: &str) -> Result<Self, Self::Error> { serde_json::from_str::<f64>(s) }
}

impl FromScientific for f32 {
	type Error = serde_json::Error;
	fn parse_scientific(s: &str) -> Result<Self, Self::Error> { serde_json::from_str::<f32>(s) }
}

impl FromScientific for rust_decimal::Decimal {
	type Error = rust_decimal::Error;
	fn parse_scientific(s: &str) -> Result<Self, Self::Error> {
		// from_scientific rejects non-scientific so trying both.
		// from_str_exact errors instead of rounding past 28 digits.
		Self::from_str_exact(s).or_else(|_| Self::from_scientific(s))
	}
}

/// A value decoded from its raw JSON literal through [`FromScientific`].
pub(crate) struct Scientific<T>(pub T);

impl<'de, T> Deserialize<'de> for Scientific<T>
where
	T: FromScientific,
	T::Error: Display,
{
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let raw = <Box<RawValue>>::deserialize(deserializer)?;
		T::parse_scientific(raw.get())
			.map(Scientific)
			.map_err(|e| D::Error::custom(format_args!("invalid rate {}: {e}", raw.get())))
	}
}

/// `deserialize_with` for a currency → rate map.
pub(crate) fn rates<'de, D, R>(deserializer: D) -> Result<BTreeMap<String, R>, D::Error>
where
	D: Deserializer<'de>,
	R: FromScientific,
	R::Error: Display,
{
	let rates = BTreeMap::<String, Scientific<R>>::deserialize(deserializer)?;
	Ok(rates.into_iter().map(|(currency, Scientific(rate))| (currency, rate)).collect())
}

/// `deserialize_with` for a date → currency → rate map.
pub(crate) fn series<'de, D, R>(
	deserializer: D,
) -> Result<BTreeMap<NaiveDate, BTreeMap<String, R>>, D::Error>
where
	D: Deserializer<'de>,
	R: FromScientific,
	R::Error: Display,
{
	let series = BTreeMap::<NaiveDate, BTreeMap<String, Scientific<R>>>::deserialize(deserializer)?;
	Ok(series
		.into_iter()
		.map(|(date, rates)| {
			let rates = rates.into_iter().map(|(currency, Scientific(rate))| (currency, rate)).collect();
			(date, rates)
		})
		.collect())
}

#[cfg(test)]
mod tests {
	use rust_decimal::Decimal;

	use super::*;

	fn dec(s: &str) -> Decimal { s.parse().unwrap() }

	#[test]
	fn test_decimal_plain_and_scientific() {
		assert_eq!(Decimal::parse_scientific("1.1").unwrap(), dec("1.1"));
		assert_eq!(Decimal::parse_scientific("104").unwrap(), dec("104"));
		assert_eq!(Decimal::parse_scientific("1.5e2").unwrap(), dec("150"));
		assert_eq!(Decimal::parse_scientific("2.5e-3").unwrap(), dec("0.0025"));
		assert!(Decimal::parse_scientific("EUR").is_err());
	}

	#[test]
	fn test_literal_is_not_rounded_through_f64() {
		let Scientific(rate) = serde_json::from_str::<Scientific<Decimal>>("0.12345678901234567891").unwrap();
		assert_eq!(rate, dec("0.12345678901234567891"));
		assert_ne!(rate, Decimal::try_from(0.12345678901234567891_f64).unwrap());
	}

	#[test]
	fn test_overlong_literal_is_rejected() {
		assert!(Decimal::parse_scientific("0.123456789012345678901234567891234").is_err());
		assert!(serde_json::from_str::<Scientific<Decimal>>("0.123456789012345678901234567891234").is_err());
		assert_eq!(Decimal::parse_scientific("0.1234567890123456789012345678").unwrap(), dec("0.1234567890123456789012345678"));
	}

	#[test]
	fn test_string_literal_is_rejected() {
		assert!(serde_json::from_str::<Scientific<Decimal>>("\"1.1\"").is_err());
		assert!(serde_json::from_str::<Scientific<f64>>("null").is_err());
	}

	#[test]
	fn test_series_keys_are_dates() {
		#[derive(Deserialize)]
		struct Wrapper {
			#[serde(deserialize_with = "series")]
			rates: BTreeMap<NaiveDate, BTreeMap<String, Decimal>>,
		}
		let wrapper: Wrapper = serde_json::from_str(
			r#"{"rates": {"2018-09-02": {"EUR": 0.862199}, "2018-09-01": {"EUR": 0.8612}}}"#,
		).unwrap();
		let dates: Vec<_> = wrapper.rates.keys().map(|d| d.to_string()).collect();
		assert_eq!(dates, ["2018-09-01", "2018-09-02"]);
		assert_eq!(wrapper.rates[&NaiveDate::from_ymd_opt(2018, 9, 2).unwrap()]["EUR"], dec("0.862199"));
	}
}

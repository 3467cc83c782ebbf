//! Endpoint paths and URL building.

use chrono::NaiveDate;
use url::Url;

/// The default base URL of the service.
pub const DEFAULT_BASE_URL: &str = "https://openexchangerates.org/api";

/// Wire format of dates, in paths and query parameters alike.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// An API endpoint.
#[derive(Debug, Hash, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
	/// `latest.json`
	Latest,
	/// `currencies.json`
	Currencies,
	/// `historical/<YYYY-MM-DD>.json`
	Historical(NaiveDate),
	/// `time-series.json`
	TimeSeries,
}

impl Endpoint {
	/// Joins the endpoint path onto the `base` URL.
	///
	/// `base` keeps its own path, e.g. `https://host/api` becomes `https://host/api/latest.json`.
	///
	/// `base` must be able to be a base; base URLs from the [`Builder`](crate::Builder) always are.
	pub fn url(self, base: &Url) -> Url {
		debug_assert!(!base.cannot_be_a_base(), "{base} cannot be a base");
		let mut url = base.clone();
		// Only fails for cannot-be-a-base URLs.
		if let Ok(mut segments) = url.path_segments_mut() {
			segments.pop_if_empty();
			match self {
				Endpoint::Latest => { segments.push("latest.json"); }
				Endpoint::Currencies => { segments.push("currencies.json"); }
				Endpoint::Historical(date) => {
					segments.push("historical").push(&format!("{}.json", format_date(date)));
				}
				Endpoint::TimeSeries => { segments.push("time-series.json"); }
			}
		}
		url
	}
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
	date.format(DATE_FORMAT).to_string()
}

/// Parses and normalizes a base URL.
///
/// Trailing slashes are dropped so endpoint paths are appended, not substituted.
pub(crate) fn parse_base(base: &str) -> Result<Url, url::ParseError> {
	let mut url = Url::parse(base)?;
	if url.cannot_be_a_base() {
		return Err(url::ParseError::RelativeUrlWithCannotBeABaseBase);
	}
	let path = url.path().trim_end_matches('/').to_owned();
	url.set_path(&path);
	url.set_query(None);
	Ok(url)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn date(y: i32, m: u32, d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(y, m, d).unwrap() }

	#[test]
	fn test_format_date_zero_padded() {
		assert_eq!(format_date(date(2018, 9, 1)), "2018-09-01");
		assert_eq!(format_date(date(987, 1, 2)), "0987-01-02");
		assert_eq!(format_date(date(2024, 12, 31)), "2024-12-31");
	}

	#[test]
	fn test_endpoint_urls() {
		let base = parse_base(DEFAULT_BASE_URL).unwrap();
		assert_eq!(Endpoint::Latest.url(&base).as_str(), "https://openexchangerates.org/api/latest.json");
		assert_eq!(Endpoint::Currencies.url(&base).as_str(), "https://openexchangerates.org/api/currencies.json");
		assert_eq!(
			Endpoint::Historical(date(2013, 1, 4)).url(&base).as_str(),
			"https://openexchangerates.org/api/historical/2013-01-04.json",
		);
		assert_eq!(Endpoint::TimeSeries.url(&base).as_str(), "https://openexchangerates.org/api/time-series.json");
	}

	#[test]
	fn test_base_trailing_slash_and_root() {
		let base = parse_base("http://127.0.0.1:8080/api/").unwrap();
		assert_eq!(Endpoint::Latest.url(&base).as_str(), "http://127.0.0.1:8080/api/latest.json");
		let base = parse_base("http://127.0.0.1:8080").unwrap();
		assert_eq!(Endpoint::Latest.url(&base).as_str(), "http://127.0.0.1:8080/latest.json");
	}

	#[test]
	#[should_panic(expected = "cannot be a base")]
	fn test_url_requires_base_url() {
		Endpoint::Latest.url(&Url::parse("mailto:someone@example.com").unwrap());
	}

	#[test]
	fn test_invalid_base() {
		assert!(parse_base("not a url").is_err());
		assert!(parse_base("mailto:someone@example.com").is_err());
	}
}

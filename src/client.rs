//! [`Client`] and its [`Builder`].

use std::{fmt::{self, Debug, Display, Formatter}, marker::PhantomData, time::Duration};

use chrono::NaiveDate;
use reqwest::blocking::Request;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::{
	endpoint::{self, format_date, Endpoint, DEFAULT_BASE_URL},
	error::Error,
	rates::{CurrencyCatalog, RateSnapshot, TimeSeries},
	scientific::FromScientific,
};

/// Base currency of [`Client::latest`] and [`Client::historical`] when none is given.
pub const DEFAULT_BASE: &str = "USD";

/// Base currency of [`Client::time_series`] when none is given.
pub const DEFAULT_TIME_SERIES_BASE: &str = "EUR";

/// [Open Exchange Rates](https://openexchangerates.org/) API client.
///
/// `R` is the rate type every rate-bearing response is decoded into, [`Decimal`] by default.
/// Rates are parsed from the literal JSON text through [`FromScientific`].
///
/// Calls are blocking; don't make them from within an async runtime.
/// The client is cheap to clone and may be shared between threads.
///
/// # Examples
/// ```no_run
/// # use openexchangerates::Client;
/// let client = Client::new("…");
/// let snapshot = client.latest(Some("EUR"))?;
/// println!("{:?}", snapshot.get("USD"));
/// # Ok::<(), openexchangerates::Error>(())
/// ```
pub struct Client<R = Decimal> {
	app_id: String,
	base_url: Url,
	timeout: Option<Duration>,
	http: reqwest::blocking::Client,
	rate: PhantomData<fn() -> R>,
}

impl Client<Decimal> {
	/// Creates a new [`Client`] with the given [API key](https://docs.openexchangerates.org/reference/authentication)
	/// and default configuration.
	pub fn new(app_id: impl Into<String>) -> Self {
		Client {
			app_id: app_id.into(),
			base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
			timeout: None,
			http: reqwest::blocking::Client::new(),
			rate: PhantomData,
		}
	}

	/// Creates a [`Builder`] with the given API key.
	pub fn builder(app_id: impl Into<String>) -> Builder {
		Builder::new(app_id)
	}
}

impl<R> Client<R> {
	/// Changes the rate type responses are decoded into.
	pub fn with_rate<R2>(self) -> Client<R2> {
		Client {
			app_id: self.app_id,
			base_url: self.base_url,
			timeout: self.timeout,
			http: self.http,
			rate: PhantomData,
		}
	}

	/// The base URL endpoints are resolved against.
	pub fn base_url(&self) -> &Url {
		&self.base_url
	}

	/// Builds a GET request to `endpoint`, with the API key followed by `params` as the query.
	fn request(&self, endpoint: Endpoint, params: &[(&str, &str)]) -> Result<Request, Error> {
		let mut request = self
			.http
			.get(endpoint.url(&self.base_url))
			.query(&[("app_id", self.app_id.as_str())])
			.query(params);
		if let Some(timeout) = self.timeout {
			request = request.timeout(timeout);
		}
		Ok(request.build()?)
	}

	/// Sends the request and decodes the response body.
	///
	/// Non-2xx responses are errors, whatever their body.
	fn send<T: DeserializeOwned>(&self, request: Request) -> Result<T, Error> {
		let path = request.url().path().to_owned();
		debug!(%path, "sending request");
		let response = self.http.execute(request)?;
		let status = response.status();
		debug!(%path, %status, "received response");
		if let Err(e) = response.error_for_status_ref() {
			warn!(%path, %status, "request failed");
			return Err(e.into());
		}
		let body = response.bytes()?;
		serde_json::from_slice(&body).map_err(|e| {
			warn!(%path, error = %e, "failed to decode response");
			e.into()
		})
	}

	fn latest_request(&self, base: Option<&str>) -> Result<Request, Error> {
		self.request(Endpoint::Latest, &[("base", base.unwrap_or(DEFAULT_BASE))])
	}

	fn currencies_request(&self) -> Result<Request, Error> {
		self.request(Endpoint::Currencies, &[])
	}

	fn historical_request(&self, date: NaiveDate, base: Option<&str>) -> Result<Request, Error> {
		self.request(Endpoint::Historical(date), &[("base", base.unwrap_or(DEFAULT_BASE))])
	}

	fn time_series_request(&self, start: NaiveDate, end: NaiveDate, base: Option<&str>) -> Result<Request, Error> {
		let base = base.unwrap_or(DEFAULT_TIME_SERIES_BASE);
		let (start, end) = (format_date(start), format_date(end));
		self.request(Endpoint::TimeSeries, &[("start", &start), ("end", &end), ("base", base)])
	}

	/// Fetches the currency catalog into any deserializable type.
	///
	/// The body is decoded as plain JSON, numbers are not routed through [`FromScientific`].
	pub fn currencies_as<T: DeserializeOwned>(&self) -> Result<T, Error> {
		self.send(self.currencies_request()?)
	}

	/// Fetches the currency catalog from the `currencies.json` endpoint.
	pub fn currencies(&self) -> Result<CurrencyCatalog, Error> {
		self.currencies_as()
	}
}

impl<R> Client<R>
where
	R: FromScientific,
	R::Error: Display,
{
	/// Fetches the latest rates from the `latest.json` endpoint.
	///
	/// `base` defaults to [`DEFAULT_BASE`]. It is not validated locally.
	pub fn latest(&self, base: Option<&str>) -> Result<RateSnapshot<R>, Error> {
		self.send(self.latest_request(base)?)
	}

	/// Fetches the rates of a past `date` from the `historical/<YYYY-MM-DD>.json` endpoint.
	///
	/// `base` defaults to [`DEFAULT_BASE`].
	pub fn historical(&self, date: NaiveDate, base: Option<&str>) -> Result<RateSnapshot<R>, Error> {
		self.send(self.historical_request(date, base)?)
	}

	/// Fetches daily rates between `start` and `end` from the `time-series.json` endpoint.
	///
	/// `base` defaults to [`DEFAULT_TIME_SERIES_BASE`].
	/// The range isn't checked locally, the service rejects invalid ones.
	pub fn time_series(&self, start: NaiveDate, end: NaiveDate, base: Option<&str>) -> Result<TimeSeries<R>, Error> {
		self.send(self.time_series_request(start, end, base)?)
	}
}

impl<R> Clone for Client<R> {
	fn clone(&self) -> Self {
		Client {
			app_id: self.app_id.clone(),
			base_url: self.base_url.clone(),
			timeout: self.timeout,
			http: self.http.clone(),
			rate: PhantomData,
		}
	}
}

impl<R> Debug for Client<R> {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		f.debug_struct("Client")
			.field("app_id", &"<redacted>")
			.field("base_url", &self.base_url.as_str())
			.field("timeout", &self.timeout)
			.finish_non_exhaustive()
	}
}

/// [`Client`] builder.
///
/// # Examples
/// ```
/// # use std::time::Duration;
/// # use openexchangerates::Client;
/// let client = Client::builder("…")
/// 	.base_url("http://127.0.0.1:8080/api")
/// 	.timeout(Duration::from_secs(10))
/// 	.build()?;
/// # Ok::<(), openexchangerates::Error>(())
/// ```
#[derive(Debug)]
pub struct Builder {
	app_id: String,
	base_url: String,
	timeout: Option<Duration>,
	http: Option<reqwest::blocking::Client>,
}

impl Builder {
	/// Creates a new [`Builder`] with the given API key.
	pub fn new(app_id: impl Into<String>) -> Self {
		Builder {
			app_id: app_id.into(),
			base_url: DEFAULT_BASE_URL.to_owned(),
			timeout: None,
			http: None,
		}
	}

	/// Sets the base URL, [`DEFAULT_BASE_URL`] by default.
	///
	/// Endpoint paths are appended to it; trailing slashes don't matter.
	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = base_url.into();
		self
	}

	/// Sets a per-request timeout.
	pub fn timeout(mut self, timeout: Duration) -> Self {
		self.timeout = Some(timeout);
		self
	}

	/// Sets the HTTP client to send requests with.
	pub fn http_client(mut self, http: reqwest::blocking::Client) -> Self {
		self.http = Some(http);
		self
	}

	/// Builds the [`Client`].
	pub fn build(self) -> Result<Client, Error> {
		let base_url = endpoint::parse_base(&self.base_url)?;
		let http = match self.http {
			Some(http) => http,
			None => reqwest::blocking::Client::builder().build()?,
		};
		Ok(Client {
			app_id: self.app_id,
			base_url,
			timeout: self.timeout,
			http,
			rate: PhantomData,
		})
	}
}

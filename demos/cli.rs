use clap::{Parser, Subcommand};
use openexchangerates::{Client, Decimal, NaiveDate, DEFAULT_BASE_URL};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
pub struct Cli {
	/// Open Exchange Rates App ID.
	app_id: String,
	#[clap(long, default_value = DEFAULT_BASE_URL)]
	base_url: String,
	/// Log requests.
	#[clap(short, long)]
	verbose: bool,
	#[clap(subcommand)]
	command: CliCommand,
}

#[derive(Subcommand, Debug)]
pub enum CliCommand {
	Latest {
		base: Option<String>,
	},
	Currencies,
	Historical {
		date: NaiveDate,
		base: Option<String>,
	},
	TimeSeries {
		start: NaiveDate,
		end: NaiveDate,
		base: Option<String>,
	},
	Convert {
		from: String,
		to: String,
		amount: Decimal,
	},
}

fn main() -> Result<(), openexchangerates::Error> {
	let cli = Cli::parse();
	let filter = if cli.verbose { "openexchangerates=debug" } else { "openexchangerates=warn" };
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
		.with_target(false)
		.compact()
		.init();

	let client = Client::builder(cli.app_id).base_url(cli.base_url).build()?;
	match cli.command {
		CliCommand::Latest { base } => {
			let snapshot = client.latest(base.as_deref())?;
			println!("Fetched {} {} rates as of {}", snapshot.rates.len(), snapshot.base, snapshot.timestamp);
			for (currency, rate) in &snapshot.rates { println!("{currency} {rate}"); }
		}
		CliCommand::Currencies => {
			for (currency, name) in client.currencies()? { println!("{currency} {name}"); }
		}
		CliCommand::Historical { date, base } => {
			let snapshot = client.historical(date, base.as_deref())?;
			println!("Fetched {} {} rates for {date}", snapshot.rates.len(), snapshot.base);
			for (currency, rate) in &snapshot.rates { println!("{currency} {rate}"); }
		}
		CliCommand::TimeSeries { start, end, base } => {
			let series = client.time_series(start, end, base.as_deref())?;
			for (date, rates) in series.iter() {
				for (currency, rate) in rates { println!("{date} {currency} {rate}"); }
			}
		}
		CliCommand::Convert { from, to, amount } => {
			let snapshot = client.latest(None)?;
			match snapshot.convert(&amount, &from, &to) {
				Some(converted) => println!("{amount} {from} = {converted} {to}"),
				None => eprintln!("no rate for {from} or {to}"),
			}
		}
	}
	Ok(())
}

use crate::agent::{Agent, run_once};
use crate::configuration::Configuration;
use crate::context::ApplicationContext;
use crate::error::PlaytimeError;
use crate::host::snapshot_page::SnapshotPage;
use crate::host::{HostPage, HostSignal};
use crate::popup::query_statistics;
use futures_util::StreamExt;
use std::future::ready;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader, stdin};
use tokio_stream::wrappers::LinesStream;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser)]
#[clap(version, about)]
pub struct Commandline {
	#[clap(short = 'c', long = "config-file", default_value = "configuration.toml")]
	pub configuration_file_path: String,
	#[clap(subcommand)]
	pub command: BaseCommand,
}

#[derive(clap::Subcommand)]
pub enum BaseCommand {
	/// Keep the overlay of a captured page up to date. Host signals are read from stdin, one per
	/// line: `navigate <address>`, `mutate` or `mutate <address>`.
	Run {
		#[clap(long)]
		page: PathBuf,
	},
	/// Print the popup statistics of a captured page as JSON
	Query {
		#[clap(long)]
		page: PathBuf,
	},
	/// Scrape a captured page once and print the overlay
	Render {
		#[clap(long)]
		page: PathBuf,
	},
	/// Print the configuration
	Configuration,
}

impl Commandline {
	pub async fn run(self) -> Result<(), PlaytimeError> {
		let configuration = Configuration::from_file(&self.configuration_file_path)?;
		tracing_subscriber::fmt()
			.with_env_filter(EnvFilter::try_new(&configuration.log_filters)?)
			.with_writer(std::io::stderr)
			.init();
		let application_context = ApplicationContext::new(configuration);

		match self.command {
			BaseCommand::Run { page } => {
				let page = SnapshotPage::from_file(page)?;
				run_agent(&application_context, page).await?;
			}
			BaseCommand::Query { page } => {
				let page = SnapshotPage::from_file(page)?;
				let statistics = query_statistics(&page);
				println!("{}", serde_json::to_string_pretty(&statistics)?);
			}
			BaseCommand::Render { page } => {
				let mut page = SnapshotPage::from_file(page)?;
				let outcome = run_once(&mut page)?;
				info!("Rendered: {outcome:?}");
				print_overlay(&page);
			}
			BaseCommand::Configuration => println!("{:?}", application_context.configuration),
		}
		Ok(())
	}
}

async fn run_agent(application_context: &ApplicationContext, page: SnapshotPage) -> Result<(), PlaytimeError> {
	let mut current_address = page.address()?;
	let signals = LinesStream::new(BufReader::new(stdin()).lines())
		.take_while(|line| ready(line.is_ok()))
		.filter_map(|line| ready(line.ok()))
		.filter_map(move |line| ready(parse_signal(&line, &mut current_address)));

	info!("Agent started, reading host signals from stdin.");
	let agent = Agent::new(
		page,
		application_context.configuration.scheduler.clone(),
		application_context.reference_timer,
	);
	let page = agent.run(signals).await;

	print_overlay(&page);
	Ok(())
}

/// Parses a signal line. `current_address` tracks the address for `mutate` lines without one.
fn parse_signal(line: &str, current_address: &mut String) -> Option<HostSignal> {
	let mut words = line.split_whitespace();
	match (words.next(), words.next()) {
		(Some("navigate"), Some(address)) => {
			address.clone_into(current_address);
			Some(HostSignal::Navigated {
				address: address.to_string(),
			})
		}
		(Some("mutate"), Some(address)) => {
			address.clone_into(current_address);
			Some(HostSignal::ContentChanged {
				address: address.to_string(),
			})
		}
		(Some("mutate"), None) => Some(HostSignal::ContentChanged {
			address: current_address.clone(),
		}),
		(None, _) => None,
		_ => {
			warn!("Ignoring unknown signal '{line}'.");
			None
		}
	}
}

fn print_overlay(page: &SnapshotPage) {
	let mut injected = false;
	for element in page.injected_elements() {
		injected = true;
		println!("#{}: {}", element.id, element.text);
	}

	if !injected {
		info!("No overlay was injected.");
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use clap::Parser;

	const PLAYLIST: &str = "https://www.youtube.com/playlist?list=PL1";
	const WATCH: &str = "https://www.youtube.com/watch?v=1&list=PL1";

	#[test]
	fn should_parse_navigation() {
		let mut current_address = PLAYLIST.to_string();

		let signal = parse_signal(&format!("navigate {WATCH}"), &mut current_address);

		assert_eq!(
			Some(HostSignal::Navigated {
				address: WATCH.to_string()
			}),
			signal
		);
		assert_eq!(WATCH, current_address);
	}

	#[test]
	fn should_parse_content_changes_with_and_without_address() {
		let mut current_address = PLAYLIST.to_string();

		assert_eq!(
			Some(HostSignal::ContentChanged {
				address: PLAYLIST.to_string()
			}),
			parse_signal("  mutate ", &mut current_address)
		);
		assert_eq!(
			Some(HostSignal::ContentChanged {
				address: WATCH.to_string()
			}),
			parse_signal(&format!("mutate {WATCH}"), &mut current_address)
		);
		assert_eq!(WATCH, current_address);
	}

	#[test]
	fn should_ignore_empty_and_unknown_lines() {
		let mut current_address = PLAYLIST.to_string();

		assert_eq!(None, parse_signal("", &mut current_address));
		assert_eq!(None, parse_signal("reload", &mut current_address));
		assert_eq!(None, parse_signal("navigate", &mut current_address));
		assert_eq!(PLAYLIST, current_address);
	}

	#[test]
	fn should_parse_the_commandline() {
		let commandline = Commandline::try_parse_from(["playtime-agent", "-c", "other.toml", "query", "--page", "page.json"])
			.expect("Failed to parse commandline");

		assert_eq!("other.toml", commandline.configuration_file_path);
		assert!(matches!(&commandline.command, BaseCommand::Query { page } if page == &PathBuf::from("page.json")));
	}

	#[test]
	fn should_default_the_configuration_file() {
		let commandline =
			Commandline::try_parse_from(["playtime-agent", "configuration"]).expect("Failed to parse commandline");

		assert_eq!("configuration.toml", commandline.configuration_file_path);
		assert!(matches!(commandline.command, BaseCommand::Configuration));
	}
}

use clap::Parser;
use playtime_agent::commandline::Commandline;
use playtime_agent::error::PlaytimeError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), PlaytimeError> {
	let commandline = Commandline::parse();
	commandline.run().await
}

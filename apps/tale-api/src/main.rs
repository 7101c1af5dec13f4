use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = tale_api::Args::parse();
	tale_api::run(args).await
}

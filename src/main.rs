use std::env;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use postmill::config::{read_config, Config};
use postmill::logger::configure_logger;
use postmill::server::server_run;

#[derive(Parser)]
#[command(name = "postmill", about = "Markdown blog content engine")]
struct Args {
    /// Configuration file, defaults to postmill.toml next to the executable
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn open_config(args: &Args) -> anyhow::Result<Config> {
    let cfg_path = match &args.config {
        Some(path) => path.clone(),
        None => {
            let exe_path = env::current_exe()?;
            let exe_dir = exe_path.parent().context("Executable has no parent dir")?;
            exe_dir.join("postmill.toml")
        }
    };
    Ok(read_config(&cfg_path)?)
}

#[ntex::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = open_config(&args)?;
    configure_logger(&config)?;
    server_run(config).await?;
    Ok(())
}

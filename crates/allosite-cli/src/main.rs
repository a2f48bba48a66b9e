use clap::error::ErrorKind;
use clap::Parser;
use log::error;
mod cli;
mod commands;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = match cli::Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            let _ = err.print();
            std::process::exit(1);
        }
    };
    cli.execute().inspect_err(|e| error!("program failed: {e:#}"))
}

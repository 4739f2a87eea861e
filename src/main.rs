use actplot::cli::Cli;
use anyhow::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.execute()
}

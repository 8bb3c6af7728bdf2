use clap::Parser;

use worktrack_cli::{run, Cli};
use worktrack_observability::LogFormat;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let format = if cli.log_json { LogFormat::Json } else { LogFormat::Compact };
    let filter = if cli.verbose { "debug" } else { "warn" };
    worktrack_observability::init_with_filter(format, filter);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run(cli, &mut out)
}

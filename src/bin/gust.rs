use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use gust::config_file::Config;
use gust::process::SystemExecutor;
use gust::runner::Runner;

// Auto help/version are disabled so unknown flags flow through to git; only
// wrapper-level flags before the first passthrough token are matched.
#[derive(Parser, Debug)]
#[command(
    name = "gust",
    about = "A git wrapper that rewrites, augments, and chains git commands",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Print the resolved command(s) instead of executing them
    #[arg(long)]
    noop: bool,

    /// Path to config file (auto-detected if not specified)
    #[arg(long)]
    config: Option<String>,

    /// Arguments passed through to git
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    gust::logger::init();
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_deref().map(Path::new))?;
    let tool = gust::tool_name(&config);
    let rules = gust::build_rules(&config, &tool);
    let runner = Runner::new(tool, cli.args, &rules);

    if cli.noop {
        println!("{}", runner.command());
        return Ok(ExitCode::SUCCESS);
    }

    let code = runner.execute(&mut SystemExecutor)?;
    Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)))
}

use std::ffi::OsString;
use std::process::ExitCode;

use anyhow::Context;
use netlify_subdomain::cli::{self, Cli, Subdomains};
use netlify_subdomain::{Config, Netlify};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("❌ {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<OsString> = std::env::args_os().collect();

    // Loaded before parsing so `--help` can list the current aliases.
    let mut config_path = cli::resolve_config_path(cli::config_arg(&args))?;
    let mut config = Config::load(&config_path);

    let cli = Cli::parse_with_config(args, &config);

    let parsed_path = cli::resolve_config_path(cli.config.clone())?;
    if parsed_path != config_path {
        config = Config::load(&parsed_path);
        config_path = parsed_path;
    }

    let project_dir = std::env::current_dir().context("cannot read current directory")?;
    let mut subdomains = Subdomains::new(config, config_path, project_dir);
    subdomains.run(&cli.command, Netlify::from_credentials)?;
    Ok(())
}

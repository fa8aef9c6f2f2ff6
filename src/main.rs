use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use merge_semver::cli::{run_generate_workflow, GenerateArgs};
use merge_semver::config;
use merge_semver::git::Git2Repository;
use merge_semver::params::{Params, ParamsInput};
use merge_semver::ui;

mod exit_codes;

fn main() {
    let args = GenerateArgs::parse();

    let code = match run(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(err) => {
            ui::display_error(&format!("{:#}", err));
            exit_codes::for_error(&err)
        }
    };

    std::process::exit(code);
}

fn run(args: GenerateArgs) -> Result<()> {
    let json = args.json;
    let config_path = args.config.clone();

    // the config file carries no debug setting, so the flag and the
    // environment decide it before the file is read
    init_tracing(args.debug || debug_from_env());

    let config = config::load_config(config_path.as_deref()).context("loading configuration")?;
    let params = Params::load(args.into_input(), config)?;
    debug!(%params, "parameters");

    let repo = Git2Repository::new(&params.repo_dir);
    let result = run_generate_workflow(&params, &repo)?;

    ui::print_result(&result, json)?;
    if ui::publish_github_output(&result).context("writing step outputs")? {
        debug!("appended outputs to {}", ui::GITHUB_OUTPUT_ENV);
    }
    ui::display_summary(&result);

    Ok(())
}

/// Invalid values are reported later, when the parameters are validated.
fn debug_from_env() -> bool {
    ParamsInput::from_env()
        .ok()
        .and_then(|input| input.debug)
        .unwrap_or(false)
}

/// Log to stderr so stdout stays machine-readable.
///
/// `RUST_LOG` takes precedence over the `debug` parameter.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

use swiftcube::cli::commands::{CliArgs, Commands};
use swiftcube::cli::handlers::{handle_config, handle_inspect, handle_render};
use swiftcube::util::logging;
use swiftcube::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("swiftcube v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match &args.command {
        Commands::Render(render_args) => handle_render(render_args, args.quiet),
        Commands::Inspect(inspect_args) => handle_inspect(inspect_args),
        Commands::Config(config_args) => handle_config(config_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        Some(level_str.as_str())
    } else if args.verbose {
        Some("debug")
    } else if args.quiet {
        Some("error")
    } else {
        None
    };

    logging::init_with_level(level);
}

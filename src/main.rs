use clap::Parser;

use pt100_calib::cli::commands::eval::{self, EvalCurveArgs};
use pt100_calib::cli::commands::{fit, init};
use pt100_calib::cli::{Cli, Commands};
use pt100_calib::config::Settings;
use pt100_calib::logging;

fn main() {
    let cli = Cli::parse();

    // Load configuration; a broken config file is reported but never fatal,
    // explicit CLI arguments still work with defaults.
    let settings = match &cli.config {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
    .unwrap_or_else(|e| {
        eprintln!("Configuration error: {e}");
        eprintln!("Using default configuration.");
        Settings::default()
    });

    logging::init_with_config(&settings.logging);

    let result = match cli.command {
        Commands::Fit {
            points,
            json,
            snippet,
        } => fit::run_fit(&settings, &points, json, snippet),

        Commands::Eval {
            adc,
            a,
            b,
            c,
            slope,
            y_intercept,
            adc_max,
        } => eval::run_eval(
            &settings,
            EvalCurveArgs {
                a,
                b,
                c,
                slope,
                y_intercept,
            },
            adc,
            adc_max,
        ),

        Commands::Config => init::run_config(&settings),

        Commands::Init { force } => init::run_init(force),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

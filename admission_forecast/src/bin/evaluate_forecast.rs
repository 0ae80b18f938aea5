use admission_forecast::config::Args;
use admission_forecast::pipeline;
use admission_forecast::plot::SvgPlotter;
use admission_forecast::Reporter;
use clap::Parser;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let default_filter = if args.verbose {
        "admission_forecast=debug,evaluate_forecast=debug"
    } else {
        "admission_forecast=info,evaluate_forecast=info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "evaluation failed");
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), admission_forecast::EvalError> {
    let json = args.json;
    let config = args.into_config()?;
    let forecaster = config.model.build(config.alpha, config.beta)?;

    tracing::info!(
        "{} v{}: {} from {} for {} days",
        admission_forecast::NAME,
        admission_forecast::VERSION,
        forecaster.name(),
        config.prediction_start,
        config.period.num_days()
    );

    let plotter = SvgPlotter::new(&config.output_dir)?;
    let mut reporter = Reporter::new(plotter, io::stdout());
    let summary = pipeline::evaluate(&config, forecaster.as_ref(), &mut reporter)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

use abtest::{
    cli::{Cli, OutputFormat},
    config::AnalysisConfig,
    csv_output::CsvOutput,
    json_output::JsonOutput,
    session::AnalysisSession,
};
use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Resolve analysis parameters: config file or preset, then flag overrides
fn build_config(args: &Cli) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => AnalysisConfig::from_file(path)?,
        None => AnalysisConfig::from(args.preset),
    };

    if let Some(alpha) = args.alpha {
        config.alpha = alpha;
    }
    if let Some(mde) = args.mde {
        config.min_detectable_diff = mde / 100.0;
    }

    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let counts = match args.counts() {
        Ok(counts) => counts,
        Err(missing) => anyhow::bail!("Missing count arguments: {}", missing.join(", ")),
    };

    let config = build_config(&args)?;
    tracing::debug!(?config, "resolved configuration");

    let mut session = AnalysisSession::with_config(config)?;
    if let Some((success_a, total_a, success_b, total_b)) = counts {
        session.set_counts(success_a, total_a, success_b, total_b)?;
    } else if let Some(path) = &args.file {
        if let Some(format) = session.load_file(path)? {
            tracing::info!(?format, path = %path.display(), "loaded data file");
        }
    }

    let analysis = session.analyze()?;

    match args.format {
        OutputFormat::Text => print!("{}", analysis.to_report_string()),
        OutputFormat::Json => println!("{}", JsonOutput::new(&analysis).to_json()?),
        OutputFormat::Csv => print!("{}", CsvOutput::new(&analysis).to_csv()),
    }

    Ok(())
}

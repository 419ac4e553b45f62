use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use shortlister::config::Cli;
use shortlister::errors::ShortlistError;
use shortlister::report;
use shortlister::shortlist::run_shortlist;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so cards and JSON on stdout stay clean
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let uploads = cli.load_uploads()?;
    let ingestor = cli.ingestor();

    if cli.extract_only {
        let report = ingestor.ingest(uploads).await;
        print_warnings(&report.warnings());
        for resume in &report.resumes {
            println!("{}", serde_json::to_string(resume)?);
        }
        return Ok(());
    }

    let job_description = cli.job_description()?;
    let verdicts = cli.verdict_client();
    info!("Sending verdict requests to {}", cli.api_url);

    let outcome = match run_shortlist(&ingestor, &verdicts, uploads, &job_description).await {
        Ok(outcome) => outcome,
        Err(err) => {
            let ShortlistError::MissingInput { warnings } = &err;
            print_warnings(warnings);
            return Err(err.into());
        }
    };
    print_warnings(&outcome.warnings);

    print!("{}", report::render_cards(&outcome.records, cli.show_text));

    report::export_to_path(&outcome.records, &cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;
    println!("Verdicts exported to {}", cli.output.display());

    Ok(())
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}

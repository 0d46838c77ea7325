//! CrediCheck CLI

use cc_core::{
    generate_report, parse_response, ClientConfig, CoreResult, HttpVerifier,
    ReportFormat, Resolution, VerificationService, VerificationSession,
};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "credicheck")]
#[command(about = "Check the credibility of a post or article snippet")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit text to the verification service and print the report
    Verify {
        /// Text to verify (reads stdin when neither --text nor --file is given)
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Read the text to verify from a file
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Verification service address (overrides CREDICHECK_ENDPOINT)
        #[arg(short, long)]
        endpoint: Option<String>,

        /// Request timeout in seconds (overrides CREDICHECK_TIMEOUT_SECS)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Output format (text, markdown, html, json)
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Output file (defaults to stdout)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },

    /// Validate a saved service response and render it
    Render {
        /// Path to a JSON response body
        #[arg(short, long)]
        file: PathBuf,

        /// Output format (text, markdown, html, json)
        #[arg(short, long, default_value = "text")]
        output: String,

        /// Output file (defaults to stdout)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    match cli.command {
        Commands::Verify {
            text,
            file,
            endpoint,
            timeout,
            output,
            output_file,
        } => {
            cmd_verify(text, file, endpoint, timeout, output, output_file).await;
        }
        Commands::Render {
            file,
            output,
            output_file,
        } => {
            cmd_render(file, output, output_file);
        }
    }
}

async fn cmd_verify(
    text: Option<String>,
    file: Option<PathBuf>,
    endpoint: Option<String>,
    timeout: Option<u64>,
    output_format: String,
    output_file: Option<PathBuf>,
) {
    let format = parse_format(&output_format);
    let text = read_input(text, file).unwrap_or_else(|e| fail(&format!("Failed to read input: {}", e)));

    // Flags win; the environment only fills what they leave unset.
    let config = ClientConfig::resolve(endpoint.as_deref(), timeout, |key| std::env::var(key).ok())
        .unwrap_or_else(|e| fail(&format!("Invalid configuration: {}", e)));

    let verifier = match HttpVerifier::new(&config) {
        Ok(verifier) => verifier,
        Err(e) => fail(&format!("Failed to create client: {}", e)),
    };

    info!("Verifying {} characters via {}", text.chars().count(), verifier.verify_url());

    let mut session = VerificationSession::new();
    session.update_input(text);
    let submission = session.submit();
    let outcome = verifier.verify(&submission.request.text).await;
    let resolution = session.resolve(submission.seq, outcome);
    debug!("Submission {} resolved: {:?}", submission.seq, resolution);

    if resolution == Resolution::Failed {
        if let Some(err) = session.error() {
            fail(&err.message);
        }
    }

    let Some(result) = session.result() else {
        fail("No verification result was received");
    };

    info!(
        "Received {} claims with {} sources",
        result.claims.len(),
        result.source_count()
    );

    let written = generate_report(result, format).and_then(|report| write_output(&report, output_file));
    if let Err(e) = written {
        fail(&format!("Failed to write report: {}", e));
    }
}

fn cmd_render(file: PathBuf, output_format: String, output_file: Option<PathBuf>) {
    let format = parse_format(&output_format);

    let written = render_file(&file, format).and_then(|report| write_output(&report, output_file));
    if let Err(e) = written {
        fail(&format!("Failed to render {}: {}", file.display(), e));
    }
}

/// Validate a saved response body and render it
fn render_file(file: &Path, format: ReportFormat) -> CoreResult<String> {
    let body = std::fs::read_to_string(file)?;
    let result = parse_response(&body)?;
    generate_report(&result, format)
}

fn parse_format(raw: &str) -> ReportFormat {
    match raw.parse() {
        Ok(format) => format,
        Err(e) => fail(&e.to_string()),
    }
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> CoreResult<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return Ok(std::fs::read_to_string(&path)?);
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;
    Ok(text)
}

fn write_output(content: &str, output_file: Option<PathBuf>) -> CoreResult<()> {
    if let Some(out_path) = output_file {
        std::fs::write(&out_path, content)?;
        info!("Report written to: {}", out_path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn fail(message: &str) -> ! {
    error!("{}", message);
    std::process::exit(1);
}

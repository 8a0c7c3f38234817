use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod config;
mod engine;
mod engines;
mod error;
mod loader;
mod preprocessing;
mod report;

#[derive(Parser, Debug)]
#[command(name = "handwriting-ocr")]
#[command(about = "Convert handwritten text in images to digital text")]
#[command(version)]
pub struct Args {
    /// Path to the image file
    pub image_path: PathBuf,

    /// Path to output text file (optional)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Language for OCR (e.g., "eng", "deu", "eng+fra")
    #[arg(long, env = "OCR_LANGUAGE", default_value = "eng")]
    pub language: String,

    /// Tesseract OCR engine mode
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(0..=3))]
    pub oem: u8,

    /// Tesseract page segmentation mode
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(u8).range(0..=13))]
    pub psm: u8,

    /// Path to tessdata directory (downloaded to the cache dir if not set)
    #[arg(long, env = "TESSDATA_PREFIX")]
    pub tessdata_path: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the extracted text report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config::Config::from(args);

    tracing::info!("Starting handwriting-ocr v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Recognizer config: {}", config.recognizer);

    let mut stdout = std::io::stdout().lock();
    match app::run(&config, engines::create_engine, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!("Pipeline failed: {:?}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use hocr_translate::core::{
    print_error_message, print_stats, print_warning_message, translate_hocr_file,
    HocrTranslateOptions,
};
use hocr_translate::env::{self, core::LogLevel, EnvVar};
use hocr_translate::translation::{TranslationConfig, TranslationResult};

/// Translate hOCR documents word by word
#[derive(Parser, Debug)]
#[command(name = "hocr-translate", version, about, after_help = env_help())]
struct Cli {
    /// hOCR file to translate
    input: PathBuf,

    /// Output file, .hocr for a translated hOCR document or .html for an HTML report
    output: PathBuf,

    /// Target language as a two-letter ISO 639-1 code
    lang: String,

    /// Google translate API key
    #[arg(short = 'a', long = "api-key", env = "HOCR_TRANSLATE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Dictionary file with cached translations
    #[arg(long, env = "HOCR_TRANSLATE_DICTIONARY")]
    dictionary: Option<PathBuf>,

    /// Template used for HTML output
    #[arg(long, env = "HOCR_TRANSLATE_TEMPLATE")]
    template: Option<PathBuf>,

    /// Do not print statistics or warnings
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print debug logs to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn env_help() -> String {
    let mut help = String::from("Environment variables:\n");
    for (name, description) in env::describe() {
        help.push_str(&format!("  {name:<34} {description}\n"));
    }
    help
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        LogLevel::get().unwrap_or_else(|_| "warn".to_string())
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .init();
}

fn build_config(cli: &Cli) -> TranslationResult<TranslationConfig> {
    let mut config = TranslationConfig::from_env(&cli.lang)?.with_api_key(cli.api_key.clone());

    if let Some(dictionary) = &cli.dictionary {
        config = config.with_dictionary_path(dictionary);
    }
    if let Some(template) = &cli.template {
        config = config.with_template_path(template);
    }

    Ok(config)
}

fn run(cli: &Cli) -> TranslationResult<()> {
    let config = build_config(cli)?;
    let options = HocrTranslateOptions::new(&cli.input, &cli.output, config);
    options.validate()?;

    if options.config.api_key.is_none() && !cli.quiet {
        print_warning_message("Google translate ApiKey was not set");
    }

    let stats = translate_hocr_file(&options)?;

    if !cli.quiet {
        print_stats(&stats);
    }

    Ok(())
}

fn main() {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        print_error_message(&format!("Error: {e}"));
        process::exit(1);
    }
}

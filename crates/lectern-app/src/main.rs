mod cli;
mod page;

use lectern_common::ConfigError;
use lectern_config::LecternConfig;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

use crate::page::PageRequest;

const DEFAULT_DIRECTIVE: &str = "lectern=info";

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        eprintln!("\n--- Lectern crashed ---");
        eprintln!("Re-run with --log-level lectern=debug and report the output.");
        eprintln!("-----------------------\n");
        default_hook(info);
    }));
}

fn load_config(args: &cli::Args) -> Result<LecternConfig, ConfigError> {
    match &args.config {
        Some(path) => {
            let config = lectern_config::toml_loader::load_from_path(path)?;
            lectern_config::validation::validate(&config)?;
            Ok(config)
        }
        None => lectern_config::load_config(),
    }
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Config is read before logging starts because it may pick the level.
    let loaded = load_config(&args);
    let directive = args.log_level.clone().unwrap_or_else(|| match &loaded {
        Ok(config) => config.logging.level.as_directive().to_string(),
        Err(_) => DEFAULT_DIRECTIVE.to_string(),
    });
    let filter = match directive.parse::<Directive>() {
        Ok(directive) => EnvFilter::from_default_env().add_directive(directive),
        Err(_) => EnvFilter::new(DEFAULT_DIRECTIVE),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Lectern v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        LecternConfig::default()
    });

    let lines = match page::read_lines(&args.file) {
        Ok(lines) => lines,
        Err(e) => {
            tracing::error!("Failed to read {}: {e}", args.file.display());
            std::process::exit(1);
        }
    };
    tracing::debug!(lines = lines.len(), file = %args.file.display(), "input loaded");

    let request = PageRequest {
        query: args.query,
        custom: args.custom,
        use_regex: args.regex,
        case_sensitive: args.case_sensitive,
        select: args.select,
    };
    match page::render_page(&config, &lines, &request) {
        Ok(page) => println!("{}", page.html),
        Err(e) => {
            tracing::error!("Render failed: {e}");
            std::process::exit(1);
        }
    }
}

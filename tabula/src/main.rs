#![deny(unused_crate_dependencies)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod backend;
mod catalog;

use std::time::Duration;

use camino::Utf8PathBuf;
use clap::Parser;
use eyre::Result;
use libtabula::config::TabulaConfig;
use libtabula::logs;
use libtabula::table::TableMode;
use tracing::info;

use crate::app::TabulaApp;
use crate::catalog::{load_items, sample_items};

/// Delay the simulated catalog service takes to answer a query.
const BACKEND_LATENCY: Duration = Duration::from_millis(250);
const SAMPLE_ITEMS: usize = 240;

#[derive(clap::Parser, Default)]
#[command(version, about)]
struct Args {
    /// JSON file holding an array of catalog items. A built-in sample is used when omitted.
    records: Option<Utf8PathBuf>,

    /// Who filters, sorts and pages the catalog: `client` or `server`
    #[clap(long, default_value_t = TableMode::Client)]
    mode: TableMode,

    /// Rows per page, overriding the configured default
    #[clap(long)]
    page_size: Option<usize>,

    /// Ignore user and local config files
    #[clap(long, action)]
    default_config: bool,
}

impl Args {
    fn config(&self) -> Result<TabulaConfig> {
        let mut config = TabulaConfig::new(self.default_config)?;
        if let Some(page_size) = self.page_size.filter(|&size| size > 0) {
            config.table.default_page_size = page_size;
        }
        Ok(config)
    }
}

fn main() -> Result<()> {
    simple_eyre::install()?;

    logs::start_logging()?;

    std::panic::set_hook(Box::new(panic_handler));

    let args = Args::parse();
    let config = args.config()?;
    let items = match &args.records {
        Some(path) => load_items(path)?,
        None => sample_items(SAMPLE_ITEMS),
    };
    info!(
        "Showing {} catalog items in {} mode",
        items.len(),
        args.mode
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_app_id("org.tabula-project.tabula")
            .with_title("Tabula")
            .with_inner_size(egui::vec2(1100.0, 720.0)),
        ..Default::default()
    };

    let app = TabulaApp::new(config, args.mode, items, BACKEND_LATENCY);
    eframe::run_native("Tabula", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| eyre::eyre!("Failed to run the GUI: {e}"))?;

    Ok(())
}

fn panic_handler(info: &std::panic::PanicHookInfo) {
    let backtrace = std::backtrace::Backtrace::force_capture();

    eprintln!();
    eprintln!("Tabula crashed due to a panic");
    eprintln!("Please report this issue together with the information below.");
    eprintln!();

    let msg = if let Some(msg) = info.payload().downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = info.payload().downcast_ref::<String>() {
        msg.clone()
    } else {
        "<panic message not a string>".to_owned()
    };

    eprintln!("Tabula version: {}", env!("CARGO_PKG_VERSION"));
    match info.location() {
        Some(location) => eprintln!(
            "thread '{}' panicked at {}:{}:{}",
            std::thread::current().name().unwrap_or("unknown"),
            location.file(),
            location.line(),
            location.column(),
        ),
        None => eprintln!(
            "thread '{}' panicked",
            std::thread::current().name().unwrap_or("unknown"),
        ),
    }
    eprintln!("  {msg}");
    eprintln!();
    eprintln!("backtrace:");
    eprintln!("{backtrace}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn defaults_to_client_mode_with_sample_items() {
        let args = Args::parse_from(["tabula"]);
        assert_eq!(args.mode, TableMode::Client);
        assert!(args.records.is_none());
        assert!(args.page_size.is_none());
        assert!(!args.default_config);
    }

    #[test]
    fn parses_mode_page_size_and_records() {
        let args = Args::parse_from([
            "tabula",
            "--mode",
            "server",
            "--page-size",
            "25",
            "--default-config",
            "items.json",
        ]);
        assert_eq!(args.mode, TableMode::Server);
        assert_eq!(args.page_size, Some(25));
        assert!(args.default_config);
        assert_eq!(args.records.as_deref().map(|p| p.as_str()), Some("items.json"));
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["tabula", "--mode", "hybrid"]).is_err());
    }

    #[test]
    fn page_size_overrides_config() {
        let args = Args::parse_from(["tabula", "--default-config", "--page-size", "42"]);
        assert_eq!(args.config().expect("config").table.default_page_size, 42);

        let args = Args::parse_from(["tabula", "--default-config", "--page-size", "0"]);
        assert_eq!(args.config().expect("config").table.default_page_size, 10);
    }
}

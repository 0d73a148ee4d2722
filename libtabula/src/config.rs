use config::Config;
#[cfg(not(target_arch = "wasm32"))]
use config::{Environment, File};
#[cfg(not(target_arch = "wasm32"))]
use directories::ProjectDirs;
use eyre::{Result, WrapErr};
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
#[cfg(not(target_arch = "wasm32"))]
use std::sync::LazyLock;

pub const DEFAULT_CONFIG: &str = include_str!("../../default_config.toml");

#[cfg(not(target_arch = "wasm32"))]
pub static PROJECT_DIR: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("org", "tabula-project", "tabula"));
#[cfg(not(target_arch = "wasm32"))]
const CONFIG_FILE: &str = "config.toml";
#[cfg(not(target_arch = "wasm32"))]
pub const LOCAL_DIR: &str = ".tabula";

#[derive(Debug, Clone, Deserialize)]
pub struct TabulaConfig {
    pub table: TableConfig,
    pub labels: TableLabels,
}

/// Layout and paging defaults for every table.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableConfig {
    /// Rows per page when neither the caller nor the user picked one
    pub default_page_size: usize,
    /// Entries offered by the page size selector
    pub page_size_options: Vec<usize>,
    /// Number of leading columns shown per record in the narrow layout
    pub mobile_columns: usize,
    /// Available width below which the narrow layout is used
    pub mobile_breakpoint: f32,
    pub row_height: f32,
    pub dense_row_height: f32,
    /// Use the smaller row height and font
    pub dense_rows: bool,
    pub striped: bool,
    /// Width of columns without a width hint
    pub default_column_width: f32,
}

impl TableConfig {
    #[must_use]
    pub fn effective_row_height(&self) -> f32 {
        if self.dense_rows {
            self.dense_row_height
        } else {
            self.row_height
        }
    }

    /// Whether a table given `available_width` should use the narrow card layout.
    #[must_use]
    pub fn use_mobile_layout(&self, available_width: f32) -> bool {
        available_width < self.mobile_breakpoint
    }
}

/// User-facing strings. Translating them is up to whoever ships the config.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableLabels {
    /// Badge for `true` values
    pub yes: String,
    /// Badge for `false` values
    pub no: String,
    pub search_hint: String,
    /// Entry of an enumerated filter that selects nothing
    pub all_option: String,
    pub clear: String,
    pub previous: String,
    pub next: String,
    pub loading: String,
    pub page_size: String,
    /// Range summary with `{from}`, `{to}` and `{total}` placeholders
    pub rows_summary: String,
}

impl TableLabels {
    #[must_use]
    pub fn bool_label(&self, value: bool) -> &str {
        if value { &self.yes } else { &self.no }
    }

    #[must_use]
    pub fn format_rows_summary(&self, from: usize, to: usize, total: usize) -> String {
        self.rows_summary
            .replace("{from}", &from.to_string())
            .replace("{to}", &to.to_string())
            .replace("{total}", &total.to_string())
    }
}

impl TabulaConfig {
    #[cfg(target_arch = "wasm32")]
    pub fn new(_force_default_config: bool) -> Result<Self> {
        Self::new_from_toml(DEFAULT_CONFIG)
    }

    /// Layers the embedded defaults, the user config file, local `.tabula`
    /// directories (outermost first) and `TABULA_*` environment variables.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn new(force_default_config: bool) -> Result<Self> {
        let mut config = Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));

        if !force_default_config {
            if let Some(proj_dirs) = &*PROJECT_DIR {
                let config_file = proj_dirs.config_dir().join(CONFIG_FILE);
                config = config.add_source(File::from(config_file).required(false));
            }

            config = find_local_configs()
                .into_iter()
                .fold(config, |c, p| {
                    c.add_source(File::from(p.join(CONFIG_FILE)).required(false))
                })
                .add_source(
                    Environment::with_prefix("tabula")
                        .prefix_separator("_")
                        .separator("__")
                        .list_separator(",")
                        .with_list_parse_key("table.page_size_options")
                        .try_parsing(true),
                );
        }

        config
            .build()
            .wrap_err("Failed to assemble configuration sources")?
            .try_deserialize()
            .wrap_err("Failed to parse config")
    }

    pub fn new_from_toml(config: &str) -> Result<Self> {
        toml::from_str(config).wrap_err("Failed to parse config")
    }
}

impl Default for TabulaConfig {
    fn default() -> Self {
        Self::new_from_toml(DEFAULT_CONFIG).expect("Embedded default config is invalid")
    }
}

/// Searches upward from `start` for `item`, closest first, staying within `end`.
#[cfg(not(target_arch = "wasm32"))]
fn search_upward(
    start: impl AsRef<Path>,
    end: impl AsRef<Path>,
    item: impl AsRef<Path>,
) -> Vec<PathBuf> {
    start
        .as_ref()
        .ancestors()
        .take_while(|p| p.starts_with(end.as_ref()))
        .map(|p| p.join(&item))
        .filter(|p| p.try_exists().is_ok_and(std::convert::identity))
        .collect()
}

/// `.tabula` directories from the filesystem root down to the working directory.
#[cfg(not(target_arch = "wasm32"))]
fn find_local_configs() -> Vec<PathBuf> {
    match std::env::current_dir() {
        Ok(dir) => search_upward(dir, "/", LOCAL_DIR)
            .into_iter()
            .filter(|p| p.is_dir())
            .rev()
            .collect(),
        Err(_) => vec![],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let config = TabulaConfig::default();
        assert_eq!(config.table.default_page_size, 10);
        assert_eq!(config.table.page_size_options, vec![10, 20, 50, 100]);
        assert_eq!(config.table.mobile_columns, 3);
        assert_eq!(config.labels.yes, "Yes");
        assert_eq!(config.labels.no, "No");
    }

    #[test]
    fn forced_defaults_match_embedded_toml() {
        let forced = TabulaConfig::new(true).expect("forced default config");
        assert_eq!(forced.table, TabulaConfig::default().table);
        assert_eq!(forced.labels, TabulaConfig::default().labels);
    }

    #[test]
    fn explicit_toml_overrides_everything() {
        let config = TabulaConfig::new_from_toml(
            r#"
            [table]
            default_page_size = 25
            page_size_options = [25, 75]
            mobile_columns = 2
            mobile_breakpoint = 480.0
            row_height = 20.0
            dense_row_height = 14.0
            dense_rows = true
            striped = false
            default_column_width = 90.0

            [labels]
            yes = "Ja"
            no = "Nein"
            search_hint = "Suchen..."
            all_option = "Alle"
            clear = "Leeren"
            previous = "Zurück"
            next = "Weiter"
            loading = "Lädt..."
            page_size = "Zeilen"
            rows_summary = "{from}–{to} von {total}"
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.table.default_page_size, 25);
        assert_eq!(config.table.effective_row_height(), 14.0);
        assert!(config.table.use_mobile_layout(479.0));
        assert!(!config.table.use_mobile_layout(480.0));
        assert_eq!(config.labels.bool_label(true), "Ja");
        assert_eq!(
            config.labels.format_rows_summary(11, 20, 57),
            "11–20 von 57"
        );
    }

    #[test]
    fn missing_section_is_an_error() {
        assert!(TabulaConfig::new_from_toml("[table]\ndefault_page_size = 5\n").is_err());
    }

    #[test]
    fn search_upward_finds_nothing_for_missing_item() {
        let found = search_upward(std::env::temp_dir(), "/", ".tabula-does-not-exist");
        assert!(found.is_empty());
    }
}

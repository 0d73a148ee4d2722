use std::{
    collections::{BTreeMap, VecDeque},
    sync::Mutex,
};

use egui::{Color32, RichText};
use eyre::Result;
use tracing::{
    Level,
    field::{Field, Visit},
};
use tracing_subscriber::Layer;

use crate::config::TabulaConfig;
use crate::table::{
    TableCell, TableColumn, TableController, TableFilterOption, TableFilterSpec, TableProps,
    TableValue, draw_table,
};

/// Oldest events are dropped once the log window holds this many.
pub const MAX_RECORDED_LOGS: usize = 2000;

static RECORD_MUTEX: Mutex<VecDeque<LogMessage>> = Mutex::new(VecDeque::new());

#[macro_export]
macro_rules! try_log_error {
    ($expr:expr, $what:expr $(,)?) => {
        if let Err(e) = $expr {
            tracing::error!("{}: {}", $what, e)
        }
    };
}

#[derive(Debug, Clone)]
pub struct LogMessage {
    pub name: String,
    pub msg: String,
    pub level: Level,
}

struct RecordingLayer {}

struct FieldVisitor<'a>(&'a mut BTreeMap<String, String>);

impl Visit for FieldVisitor<'_> {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.0
            .insert(field.name().to_string(), format!("{value:?}"));
    }
}

impl<S> Layer<S> for RecordingLayer
where
    S: tracing::Subscriber,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut fields = BTreeMap::new();
        event.record(&mut FieldVisitor(&mut fields));

        if let Ok(mut records) = RECORD_MUTEX.lock() {
            push_bounded(
                &mut records,
                LogMessage {
                    name: event.metadata().module_path().unwrap_or("-").to_string(),
                    msg: fields.get("message").cloned().unwrap_or("-".to_string()),
                    level: *event.metadata().level(),
                },
                MAX_RECORDED_LOGS,
            );
        }
    }
}

fn push_bounded(records: &mut VecDeque<LogMessage>, message: LogMessage, limit: usize) {
    while records.len() >= limit.max(1) {
        records.pop_front();
    }
    records.push_back(message);
}

/// Snapshot of the most recent [`MAX_RECORDED_LOGS`] events.
pub fn recorded_logs() -> Vec<LogMessage> {
    RECORD_MUTEX
        .lock()
        .map(|records| records.iter().cloned().collect())
        .unwrap_or_default()
}

fn level_color(level: Level) -> Color32 {
    match level {
        Level::ERROR => Color32::RED,
        Level::WARN => Color32::YELLOW,
        Level::INFO => Color32::GREEN,
        Level::DEBUG => Color32::BLUE,
        Level::TRACE => Color32::GRAY,
    }
}

/// Table controller backing the log window.
pub fn log_table() -> TableController<LogMessage> {
    let columns = vec![
        TableColumn::new("level", "Level", |record: &LogMessage| {
            TableValue::from(record.level.as_str())
        })
        .width(60.0)
        .render(|value, record: &LogMessage| {
            TableCell::RichText(
                RichText::new(value.to_display_string()).color(level_color(record.level)),
            )
        }),
        TableColumn::new("source", "Source", |record: &LogMessage| {
            TableValue::from(&record.name)
        })
        .width(200.0)
        .render(|value, _| {
            TableCell::RichText(
                RichText::new(value.to_display_string())
                    .color(Color32::GRAY)
                    .monospace(),
            )
        }),
        TableColumn::new("message", "Message", |record: &LogMessage| {
            TableValue::from(&record.msg)
        })
        .width(480.0)
        .render(|value, _| {
            TableCell::RichText(RichText::new(value.to_display_string()).monospace())
        }),
    ];
    let levels = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE]
        .into_iter()
        .map(|level| TableFilterOption::new(level.as_str(), level.as_str()))
        .collect();
    let filters = vec![TableFilterSpec::enumerated("level", "Level", levels)];
    TableController::new(columns, filters)
}

/// Draws the log window. Clears `open` when the user closes it.
pub fn draw_log_window(
    ctx: &egui::Context,
    table: &mut TableController<LogMessage>,
    config: &TabulaConfig,
    open: &mut bool,
) {
    let records = recorded_logs();
    egui::Window::new("Logs")
        .open(open)
        .collapsible(true)
        .resizable(true)
        .show(ctx, |ui| {
            let mut props = TableProps::default();
            draw_table(ui, "log_window", table, &records, &mut props, config);
        });
}

/// Starts the logging and error handling. Can be used by unittests to get more insights.
#[cfg(not(target_arch = "wasm32"))]
pub fn start_logging() -> Result<()> {
    use std::io::stdout;

    use eyre::WrapErr;
    use tracing_subscriber::{Registry, fmt, layer::SubscriberExt};

    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let subscriber = Registry::default()
        .with(
            fmt::layer()
                .without_time()
                .with_writer(stdout)
                .with_filter(filter.clone()),
        )
        .with(RecordingLayer {}.with_filter(filter));

    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("unable to set global subscriber")?;

    Ok(())
}

//! Toolkit-independent render tree for a prepared table.
//!
//! [`build_layout`] turns descriptors, the resolved state and the derived slice
//! into plain data. The egui view draws it; tests inspect it directly.

use super::controller::PreparedTable;
use super::model::{
    ColumnAlign, EmptyState, TableCell, TableColumn, TableColumnKey, TableValue, sort_indicator,
};
use super::slice::{PaginationState, page_range, page_size_choices};
use crate::config::{TableConfig, TableLabels};
use egui::RichText;

/// Content of one rendered cell.
#[derive(Debug, Clone)]
pub enum DisplayCell {
    Text(String),
    /// A boolean shown as an affirmative or negative badge.
    Badge { value: bool, label: String },
    Rich(RichText),
}

impl DisplayCell {
    /// Plain text of the cell, as shown to the user.
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Badge { label, .. } => label.clone(),
            Self::Rich(text) => text.text().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderCell {
    pub key: TableColumnKey,
    pub title: String,
    pub sortable: bool,
    pub indicator: Option<&'static str>,
    pub align: ColumnAlign,
    pub width: Option<f32>,
}

impl HeaderCell {
    /// Title followed by the sort arrow, if any.
    #[must_use]
    pub fn label(&self) -> String {
        match self.indicator {
            Some(arrow) => format!("{} {arrow}", self.title),
            None => self.title.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BodyRow {
    /// Index of the record in the caller's collection.
    pub record_index: usize,
    pub cells: Vec<DisplayCell>,
}

#[derive(Debug, Clone)]
pub enum TableBody {
    Loading,
    Empty(EmptyState),
    Rows(Vec<BodyRow>),
}

/// One record in the narrow layout.
#[derive(Debug, Clone)]
pub struct MobileCard {
    pub record_index: usize,
    pub fields: Vec<(String, DisplayCell)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginationControls {
    pub state: PaginationState,
    pub window: Vec<usize>,
    pub page_size: usize,
    pub page_size_choices: Vec<usize>,
    pub total_count: usize,
    /// Range summary, `None` when there are no rows.
    pub summary: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TableLayout {
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
    pub pagination: Option<PaginationControls>,
}

/// Cell content: the column's renderer if present, otherwise the coerced value.
pub fn display_cell<R>(
    column: &TableColumn<R>,
    record: &R,
    labels: &TableLabels,
    mobile: bool,
) -> DisplayCell {
    let value = column.value(record);
    let renderer = if mobile {
        column.mobile_renderer()
    } else {
        column.renderer()
    };
    match renderer {
        Some(render) => match render(&value, record) {
            TableCell::Text(text) => DisplayCell::Text(text),
            TableCell::RichText(text) => DisplayCell::Rich(text),
        },
        None => coerce_value(&value, labels),
    }
}

fn coerce_value(value: &TableValue, labels: &TableLabels) -> DisplayCell {
    match value {
        TableValue::Bool(value) => DisplayCell::Badge {
            value: *value,
            label: labels.bool_label(*value).to_string(),
        },
        other => DisplayCell::Text(other.to_display_string()),
    }
}

pub fn header_cells<R>(columns: &[TableColumn<R>], prepared: &PreparedTable) -> Vec<HeaderCell> {
    let sort = prepared.resolved.sort.value();
    columns
        .iter()
        .map(|column| HeaderCell {
            key: column.key.clone(),
            title: column.title.clone(),
            sortable: column.sortable,
            indicator: sort_indicator(sort, &column.key),
            align: column.align,
            width: column.width,
        })
        .collect()
}

pub fn pagination_controls(
    prepared: &PreparedTable,
    table_config: &TableConfig,
    labels: &TableLabels,
) -> PaginationControls {
    let state = prepared.pagination();
    let page_size = *prepared.resolved.page_size.value();
    let total_count = prepared.slice.total_count;
    PaginationControls {
        state,
        window: state.window().collect(),
        page_size,
        page_size_choices: page_size_choices(&table_config.page_size_options, page_size),
        total_count,
        summary: page_range(state.page, page_size, total_count)
            .map(|(from, to)| labels.format_rows_summary(from, to, total_count)),
    }
}

/// Builds the full render tree for the current page.
pub fn build_layout<R>(
    columns: &[TableColumn<R>],
    records: &[R],
    prepared: &PreparedTable,
    loading: bool,
    empty_state: &EmptyState,
    table_config: &TableConfig,
    labels: &TableLabels,
) -> TableLayout {
    let body = if loading {
        TableBody::Loading
    } else if prepared.slice.is_empty() {
        TableBody::Empty(empty_state.clone())
    } else {
        TableBody::Rows(
            prepared
                .slice
                .rows(records)
                .map(|(record_index, record)| BodyRow {
                    record_index,
                    cells: columns
                        .iter()
                        .map(|column| display_cell(column, record, labels, false))
                        .collect(),
                })
                .collect(),
        )
    };

    TableLayout {
        header: header_cells(columns, prepared),
        body,
        pagination: prepared
            .resolved
            .paginated
            .then(|| pagination_controls(prepared, table_config, labels)),
    }
}

/// Label/value pairs of the first `mobile_columns` columns for each visible record.
pub fn build_mobile_cards<R>(
    columns: &[TableColumn<R>],
    records: &[R],
    prepared: &PreparedTable,
    table_config: &TableConfig,
    labels: &TableLabels,
) -> Vec<MobileCard> {
    prepared
        .slice
        .rows(records)
        .map(|(record_index, record)| MobileCard {
            record_index,
            fields: columns
                .iter()
                .take(table_config.mobile_columns)
                .map(|column| {
                    (
                        column.title.clone(),
                        display_cell(column, record, labels, true),
                    )
                })
                .collect(),
        })
        .collect()
}

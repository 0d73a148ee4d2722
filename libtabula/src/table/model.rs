use derive_more::{Display, FromStr};
use egui::RichText;
use enum_iterator::Sequence;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Stable field identity shared by columns and filters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display)]
#[serde(transparent)]
pub struct TableColumnKey(pub String);

impl From<&str> for TableColumnKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for TableColumnKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl TableColumnKey {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Who performs filtering, sorting and paging.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr, Sequence,
)]
pub enum TableMode {
    /// The controller derives the visible slice from an in-memory collection.
    #[default]
    #[display("client")]
    Client,
    /// The caller hands over an already processed page plus total counts.
    #[display("server")]
    Server,
}

/// Value extracted from one field of a record.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum TableValue {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl TableValue {
    /// Returns the string payload, if any. Only text values take part in free-text search.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// String form used when rendering a cell without a renderer.
    #[must_use]
    pub fn to_display_string(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => format_number(*value),
            Self::Text(text) => text.clone(),
        }
    }

    /// String form compared against a selected filter value.
    #[must_use]
    pub fn to_filter_string(&self) -> String {
        self.to_display_string()
    }
}

fn format_number(value: f64) -> String {
    // Whole numbers print without a trailing `.0`.
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

impl From<&str> for TableValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for TableValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for TableValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<bool> for TableValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for TableValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for TableValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<u32> for TableValue {
    fn from(value: u32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<usize> for TableValue {
    fn from(value: usize) -> Self {
        Self::Number(value as f64)
    }
}

impl<T: Into<TableValue>> From<Option<T>> for TableValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Empty, Into::into)
    }
}

fn value_rank(value: &TableValue) -> u8 {
    match value {
        TableValue::Number(_) => 0,
        TableValue::Text(_) => 1,
        TableValue::Bool(_) => 2,
        TableValue::Empty => 3,
    }
}

/// Natural ordering of extracted values.
///
/// Values of different kinds order by kind (numbers, text, booleans, empty);
/// numbers compare numerically and text lexicographically.
#[must_use]
pub fn compare_values(a: &TableValue, b: &TableValue) -> Ordering {
    let rank_a = value_rank(a);
    let rank_b = value_rank(b);
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    match (a, b) {
        (TableValue::Number(left), TableValue::Number(right)) => left.total_cmp(right),
        (TableValue::Text(left), TableValue::Text(right)) => left.cmp(right),
        (TableValue::Bool(left), TableValue::Bool(right)) => left.cmp(right),
        _ => Ordering::Equal,
    }
}

/// Display-ready cell content produced by a column renderer.
#[derive(Debug, Clone)]
pub enum TableCell {
    Text(String),
    RichText(RichText),
}

impl From<&str> for TableCell {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TableCell {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<RichText> for TableCell {
    fn from(text: RichText) -> Self {
        Self::RichText(text)
    }
}

pub type ValueExtractor<R> = Arc<dyn Fn(&R) -> TableValue + Send + Sync>;
pub type CellRenderer<R> = Arc<dyn Fn(&TableValue, &R) -> TableCell + Send + Sync>;

/// Horizontal alignment of a column's cells.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr, Sequence,
)]
pub enum ColumnAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Describes how to extract, label and render one column of `R`.
pub struct TableColumn<R> {
    pub key: TableColumnKey,
    pub title: String,
    pub sortable: bool,
    pub align: ColumnAlign,
    pub width: Option<f32>,
    extractor: ValueExtractor<R>,
    render: Option<CellRenderer<R>>,
    mobile_render: Option<CellRenderer<R>>,
}

impl<R> TableColumn<R> {
    pub fn new(
        key: impl Into<TableColumnKey>,
        title: impl Into<String>,
        extractor: impl Fn(&R) -> TableValue + Send + Sync + 'static,
    ) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            sortable: false,
            align: ColumnAlign::Left,
            width: None,
            extractor: Arc::new(extractor),
            render: None,
            mobile_render: None,
        }
    }

    #[must_use]
    pub fn sortable(mut self, sortable: bool) -> Self {
        self.sortable = sortable;
        self
    }

    #[must_use]
    pub fn align(mut self, align: ColumnAlign) -> Self {
        self.align = align;
        self
    }

    #[must_use]
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    #[must_use]
    pub fn render(
        mut self,
        render: impl Fn(&TableValue, &R) -> TableCell + Send + Sync + 'static,
    ) -> Self {
        self.render = Some(Arc::new(render));
        self
    }

    /// Renderer used by the narrow layout instead of `render`.
    #[must_use]
    pub fn mobile_render(
        mut self,
        render: impl Fn(&TableValue, &R) -> TableCell + Send + Sync + 'static,
    ) -> Self {
        self.mobile_render = Some(Arc::new(render));
        self
    }

    pub fn value(&self, record: &R) -> TableValue {
        (self.extractor)(record)
    }

    pub fn renderer(&self) -> Option<&CellRenderer<R>> {
        self.render.as_ref()
    }

    pub fn mobile_renderer(&self) -> Option<&CellRenderer<R>> {
        self.mobile_render.as_ref().or(self.render.as_ref())
    }
}

impl<R> Clone for TableColumn<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            title: self.title.clone(),
            sortable: self.sortable,
            align: self.align,
            width: self.width,
            extractor: Arc::clone(&self.extractor),
            render: self.render.clone(),
            mobile_render: self.mobile_render.clone(),
        }
    }
}

impl<R> fmt::Debug for TableColumn<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableColumn")
            .field("key", &self.key)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("align", &self.align)
            .field("width", &self.width)
            .field("render", &self.render.as_ref().map(|_| "..."))
            .field("mobile_render", &self.mobile_render.as_ref().map(|_| "..."))
            .finish()
    }
}

/// One entry of an enumerated filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableFilterOption {
    pub value: String,
    pub label: String,
}

impl TableFilterOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Kind of control offered for a filter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableFilterKind {
    FreeText,
    Enumerated(Vec<TableFilterOption>),
}

/// Describes one filter control and the field it restricts.
///
/// Without an explicit extractor the filter reads the column sharing its key.
pub struct TableFilterSpec<R> {
    pub key: TableColumnKey,
    pub label: String,
    pub kind: TableFilterKind,
    extractor: Option<ValueExtractor<R>>,
}

impl<R> TableFilterSpec<R> {
    pub fn enumerated(
        key: impl Into<TableColumnKey>,
        label: impl Into<String>,
        options: Vec<TableFilterOption>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: TableFilterKind::Enumerated(options),
            extractor: None,
        }
    }

    pub fn free_text(key: impl Into<TableColumnKey>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            kind: TableFilterKind::FreeText,
            extractor: None,
        }
    }

    #[must_use]
    pub fn extractor(
        mut self,
        extractor: impl Fn(&R) -> TableValue + Send + Sync + 'static,
    ) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    pub fn own_extractor(&self) -> Option<&ValueExtractor<R>> {
        self.extractor.as_ref()
    }

    /// Label of the option carrying `value`, if this is an enumerated filter.
    #[must_use]
    pub fn option_label(&self, value: &str) -> Option<&str> {
        match &self.kind {
            TableFilterKind::Enumerated(options) => options
                .iter()
                .find(|option| option.value == value)
                .map(|option| option.label.as_str()),
            TableFilterKind::FreeText => None,
        }
    }
}

impl<R> Clone for TableFilterSpec<R> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            kind: self.kind.clone(),
            extractor: self.extractor.clone(),
        }
    }
}

impl<R> fmt::Debug for TableFilterSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableFilterSpec")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("extractor", &self.extractor.as_ref().map(|_| "..."))
            .finish()
    }
}

/// Sort order for a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableSortDirection {
    #[default]
    Ascending,
    Descending,
}

impl TableSortDirection {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Active sort column and direction. `key == None` means collection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TableSortState {
    pub key: Option<TableColumnKey>,
    pub direction: TableSortDirection,
}

impl TableSortState {
    pub fn by(key: impl Into<TableColumnKey>, direction: TableSortDirection) -> Self {
        Self {
            key: Some(key.into()),
            direction,
        }
    }
}

/// Computes the sort state after a header click.
/// - Non-sortable or unknown column: unchanged
/// - Column is the active sort key: toggle direction
/// - Any other sortable column: sort by it ascending
#[must_use]
pub fn sort_spec_on_click<R>(
    current: &TableSortState,
    columns: &[TableColumn<R>],
    clicked_key: &TableColumnKey,
) -> TableSortState {
    let sortable = columns
        .iter()
        .any(|col| &col.key == clicked_key && col.sortable);
    if !sortable {
        return current.clone();
    }

    if current.key.as_ref() == Some(clicked_key) {
        TableSortState {
            key: current.key.clone(),
            direction: current.direction.toggled(),
        }
    } else {
        TableSortState {
            key: Some(clicked_key.clone()),
            direction: TableSortDirection::Ascending,
        }
    }
}

/// Returns the header arrow for `column_key`, or `None` when it is not the sort column.
///
/// Uses arrow symbols that are included in the default egui fonts.
#[must_use]
pub fn sort_indicator(sort: &TableSortState, column_key: &TableColumnKey) -> Option<&'static str> {
    if sort.key.as_ref() != Some(column_key) {
        return None;
    }
    Some(match sort.direction {
        TableSortDirection::Ascending => "⬆",
        TableSortDirection::Descending => "⬇",
    })
}

/// Block shown instead of the body when the visible slice is empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyState {
    pub icon: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub action_label: Option<String>,
}

impl EmptyState {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }
}

use super::controller::{PreparedTable, TableController};
use super::layout::{
    BodyRow, DisplayCell, HeaderCell, MobileCard, PaginationControls, TableBody, build_layout,
    build_mobile_cards,
};
use super::message::TableMessage;
use super::model::{ColumnAlign, EmptyState, TableFilterKind, TableFilterSpec};
use super::state::TableProps;
use crate::config::{TableConfig, TableLabels, TabulaConfig};
use egui::{Align, Color32, Layout, RichText, Sense};
use egui_extras::{Column, TableBuilder};
use std::hash::Hash;

/// Draws one list view and applies the gestures made on it.
///
/// Intents are collected while drawing and dispatched afterwards, so callbacks
/// in `props` fire after the frame's widgets are laid out.
pub fn draw_table<R>(
    ui: &mut egui::Ui,
    id_salt: impl Hash,
    controller: &mut TableController<R>,
    records: &[R],
    props: &mut TableProps<'_, R>,
    config: &TabulaConfig,
) {
    let prepared = controller.prepare(records, props);
    let layout = build_layout(
        controller.columns(),
        records,
        &prepared,
        props.loading,
        &props.empty_state,
        &config.table,
        &config.labels,
    );
    let cards = (matches!(layout.body, TableBody::Rows(_))
        && config.table.use_mobile_layout(ui.available_width()))
    .then(|| {
        build_mobile_cards(
            controller.columns(),
            records,
            &prepared,
            &config.table,
            &config.labels,
        )
    });

    let mut msgs = vec![];
    ui.push_id(id_salt, |ui| {
        ui.vertical(|ui| {
            draw_toolbar(ui, &mut msgs, controller.filters(), &prepared, &config.labels);
            ui.separator();

            match (&layout.body, &cards) {
                (TableBody::Loading, _) => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(&config.labels.loading);
                    });
                }
                (TableBody::Empty(empty_state), _) => {
                    draw_empty_state(ui, &mut msgs, empty_state);
                }
                (TableBody::Rows(_), Some(cards)) => {
                    draw_cards(ui, &mut msgs, cards, &config.table, layout.pagination.is_some());
                }
                (TableBody::Rows(rows), None) => {
                    draw_rows(
                        ui,
                        &mut msgs,
                        &layout.header,
                        rows,
                        &config.table,
                        layout.pagination.is_some(),
                    );
                }
            }

            if let Some(pagination) = &layout.pagination {
                ui.separator();
                draw_pagination_bar(ui, &mut msgs, pagination, &config.labels);
            }
        });
    });

    for message in msgs {
        controller.dispatch(message, &prepared, records, props);
    }
}

fn draw_toolbar<R>(
    ui: &mut egui::Ui,
    msgs: &mut Vec<TableMessage>,
    filters: &[TableFilterSpec<R>],
    prepared: &PreparedTable,
    labels: &TableLabels,
) {
    let resolved = &prepared.resolved;
    ui.horizontal_wrapped(|ui| {
        let mut search_text = resolved.search_text.value().clone();
        if ui
            .add(
                egui::TextEdit::singleline(&mut search_text)
                    .hint_text(&labels.search_hint)
                    .desired_width(180.0),
            )
            .changed()
        {
            msgs.push(TableMessage::SetSearch(search_text));
        }

        for filter in filters {
            let current = resolved
                .filter_values
                .value()
                .get(&filter.key)
                .cloned()
                .unwrap_or_default();
            ui.label(&filter.label);
            match &filter.kind {
                TableFilterKind::Enumerated(options) => {
                    let mut selected = current.clone();
                    let selected_text = if current.is_empty() {
                        labels.all_option.clone()
                    } else {
                        filter
                            .option_label(&current)
                            .map_or_else(|| current.clone(), str::to_string)
                    };
                    egui::ComboBox::from_id_salt(("filter", filter.key.as_str()))
                        .selected_text(selected_text)
                        .show_ui(ui, |ui| {
                            ui.selectable_value(&mut selected, String::new(), &labels.all_option);
                            for option in options {
                                ui.selectable_value(
                                    &mut selected,
                                    option.value.clone(),
                                    &option.label,
                                );
                            }
                        });
                    if selected != current {
                        msgs.push(TableMessage::SetFilter {
                            key: filter.key.clone(),
                            value: selected,
                        });
                    }
                }
                TableFilterKind::FreeText => {
                    let mut value = current.clone();
                    if ui
                        .add(egui::TextEdit::singleline(&mut value).desired_width(100.0))
                        .changed()
                    {
                        msgs.push(TableMessage::SetFilter {
                            key: filter.key.clone(),
                            value,
                        });
                    }
                }
            }
        }

        let narrowed =
            !resolved.search_text.value().is_empty() || resolved.active_filters().next().is_some();
        if ui
            .add_enabled(narrowed, egui::Button::new(&labels.clear))
            .clicked()
        {
            msgs.push(TableMessage::ClearFilters);
        }
    });
}

fn cell_layout(align: ColumnAlign) -> Layout {
    match align {
        ColumnAlign::Left => Layout::left_to_right(Align::Center),
        ColumnAlign::Center => Layout::centered_and_justified(egui::Direction::LeftToRight),
        ColumnAlign::Right => Layout::right_to_left(Align::Center),
    }
}

fn draw_cell(ui: &mut egui::Ui, cell: &DisplayCell, dense: bool) {
    match cell {
        DisplayCell::Text(text) => {
            let text = RichText::new(text);
            ui.label(if dense { text.small() } else { text });
        }
        DisplayCell::Badge { value, label } => {
            let color = if *value {
                Color32::from_rgb(46, 160, 67)
            } else {
                Color32::from_rgb(218, 54, 51)
            };
            egui::Frame::new()
                .stroke(egui::Stroke::new(1.0, color))
                .corner_radius(4.0)
                .inner_margin(egui::Margin::symmetric(4, 0))
                .show(ui, |ui| {
                    ui.label(RichText::new(label).small().color(color));
                });
        }
        DisplayCell::Rich(text) => {
            ui.label(text.clone());
        }
    }
}

/// Height left for the body once the pagination bar is accounted for.
fn body_height(ui: &egui::Ui, row_height: f32, with_pagination: bool) -> f32 {
    let bar = if with_pagination {
        ui.spacing().interact_size.y + ui.spacing().item_spacing.y * 3.0
    } else {
        0.0
    };
    (ui.available_height() - bar).max(row_height)
}

fn draw_rows(
    ui: &mut egui::Ui,
    msgs: &mut Vec<TableMessage>,
    header: &[HeaderCell],
    rows: &[BodyRow],
    table_config: &TableConfig,
    with_pagination: bool,
) {
    let row_height = table_config.effective_row_height();
    let dense = table_config.dense_rows;
    let max_height = body_height(ui, row_height, with_pagination);

    let mut builder = TableBuilder::new(ui)
        .striped(table_config.striped)
        .vscroll(true)
        .max_scroll_height(max_height)
        .sense(Sense::click())
        .cell_layout(Layout::left_to_right(Align::Center));
    for cell in header {
        let width = cell.width.unwrap_or(table_config.default_column_width);
        builder = builder.column(Column::initial(width).at_least(32.0).resizable(true).clip(true));
    }

    builder
        .header(row_height, |mut header_row| {
            for cell in header {
                header_row.col(|ui| {
                    let text = RichText::new(cell.label()).strong();
                    let label = egui::Label::new(if dense { text.small() } else { text })
                        .selectable(false);
                    if cell.sortable {
                        let response = ui.add(label.sense(Sense::click()));
                        if response.clicked() {
                            msgs.push(TableMessage::ToggleSort(cell.key.clone()));
                        }
                    } else {
                        ui.add(label);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut row| {
                let Some(body_row) = rows.get(row.index()) else {
                    return;
                };
                for (cell, column) in body_row.cells.iter().zip(header) {
                    row.col(|ui| {
                        ui.with_layout(cell_layout(column.align), |ui| {
                            draw_cell(ui, cell, dense);
                        });
                    });
                }
                if row.response().clicked() {
                    msgs.push(TableMessage::RowClicked(body_row.record_index));
                }
            });
        });
}

fn draw_cards(
    ui: &mut egui::Ui,
    msgs: &mut Vec<TableMessage>,
    cards: &[MobileCard],
    table_config: &TableConfig,
    with_pagination: bool,
) {
    let max_height = body_height(ui, table_config.effective_row_height(), with_pagination);
    egui::ScrollArea::vertical()
        .max_height(max_height)
        .auto_shrink([false, true])
        .show(ui, |ui| {
            for card in cards {
                let frame = egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    for (title, cell) in &card.fields {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(title).weak());
                            draw_cell(ui, cell, table_config.dense_rows);
                        });
                    }
                });
                if frame.response.interact(Sense::click()).clicked() {
                    msgs.push(TableMessage::RowClicked(card.record_index));
                }
            }
        });
}

fn draw_empty_state(ui: &mut egui::Ui, msgs: &mut Vec<TableMessage>, empty_state: &EmptyState) {
    ui.vertical_centered(|ui| {
        ui.add_space(ui.spacing().item_spacing.y * 4.0);
        if let Some(icon) = &empty_state.icon {
            ui.label(RichText::new(icon).size(32.0));
        }
        ui.label(RichText::new(&empty_state.title).heading());
        if let Some(description) = &empty_state.description {
            ui.label(RichText::new(description).weak());
        }
        if let Some(action) = &empty_state.action_label
            && ui.button(action).clicked()
        {
            msgs.push(TableMessage::EmptyStateAction);
        }
    });
}

fn draw_pagination_bar(
    ui: &mut egui::Ui,
    msgs: &mut Vec<TableMessage>,
    pagination: &PaginationControls,
    labels: &TableLabels,
) {
    let state = pagination.state;
    ui.horizontal(|ui| {
        if ui
            .add_enabled(state.can_go_previous(), egui::Button::new(&labels.previous))
            .clicked()
        {
            msgs.push(TableMessage::PreviousPage);
        }
        for &page in &pagination.window {
            if ui
                .selectable_label(page == state.page, page.to_string())
                .clicked()
            {
                msgs.push(TableMessage::SetPage(page));
            }
        }
        if ui
            .add_enabled(state.can_go_next(), egui::Button::new(&labels.next))
            .clicked()
        {
            msgs.push(TableMessage::NextPage);
        }

        ui.separator();
        ui.label(&labels.page_size);
        let mut page_size = pagination.page_size;
        egui::ComboBox::from_id_salt("page_size")
            .selected_text(page_size.to_string())
            .width(60.0)
            .show_ui(ui, |ui| {
                for &choice in &pagination.page_size_choices {
                    ui.selectable_value(&mut page_size, choice, choice.to_string());
                }
            });
        if page_size != pagination.page_size {
            msgs.push(TableMessage::SetPageSize(page_size));
        }

        if let Some(summary) = &pagination.summary {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.label(summary);
            });
        }
    });
}

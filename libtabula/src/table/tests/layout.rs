use super::support::*;
use crate::config::TabulaConfig;
use crate::table::*;
use test_log::test;

fn layout_for(
    controller: &TableController<Person>,
    records: &[Person],
    props: &TableProps<'_, Person>,
) -> TableLayout {
    let config = TabulaConfig::default();
    let prepared = controller.prepare(records, props);
    build_layout(
        controller.columns(),
        records,
        &prepared,
        props.loading,
        &props.empty_state,
        &config.table,
        &config.labels,
    )
}

fn body_rows(layout: &TableLayout) -> &[BodyRow] {
    match &layout.body {
        TableBody::Rows(rows) => rows,
        other => panic!("expected rows, got {other:?}"),
    }
}

#[test]
fn booleans_without_renderer_become_badges() {
    let records = vec![person("tea", 3, "active", true), person("mate", 4, "inactive", false)];
    let layout = layout_for(&controller(), &records, &TableProps::default());
    let rows = body_rows(&layout);

    match &rows[0].cells[3] {
        DisplayCell::Badge { value, label } => {
            assert!(*value);
            assert_eq!(label, "Yes");
        }
        other => panic!("expected badge, got {other:?}"),
    }
    assert_eq!(rows[1].cells[3].text(), "No");
    assert_eq!(rows[0].cells[1].text(), "3");
    assert_eq!(rows[0].cells[0].text(), "tea");
}

#[test]
fn renderer_output_replaces_coercion() {
    let columns = vec![
        TableColumn::new("name", "Name", |p: &Person| TableValue::from(&p.name))
            .render(|value, p: &Person| format!("{} ({})", value.to_display_string(), p.age).into()),
    ];
    let controller = TableController::new(columns, vec![]);
    let records = vec![person("tea", 3, "active", true)];
    let layout = layout_for(&controller, &records, &TableProps::default());

    assert_eq!(body_rows(&layout)[0].cells[0].text(), "tea (3)");
}

#[test]
fn header_carries_indicator_alignment_and_width() {
    let controller = controller_with(ViewState::default().apply(StateChange::Sort(
        TableSortState::by("age", TableSortDirection::Ascending),
    )));
    let layout = layout_for(&controller, &numbered(2), &TableProps::default());

    let age = &layout.header[1];
    assert_eq!(age.indicator, Some("⬆"));
    assert_eq!(age.label(), "Age ⬆");
    assert_eq!(age.align, ColumnAlign::Right);
    assert_eq!(age.width, Some(60.0));
    assert!(age.sortable);
    assert_eq!(layout.header[2].indicator, None);
    assert!(!layout.header[2].sortable);
}

#[test]
fn empty_slice_renders_the_empty_state() {
    let empty = EmptyState::new("No people").with_action("Add person");
    let props = TableProps::default().empty_state(empty.clone());
    let layout = layout_for(&controller(), &[], &props);

    match layout.body {
        TableBody::Empty(state) => assert_eq!(state, empty),
        other => panic!("expected empty state, got {other:?}"),
    }
    let pagination = layout.pagination.expect("pagination");
    assert_eq!(pagination.summary, None);
    assert_eq!(pagination.state.position(), PaginationPosition::Single);
}

#[test]
fn loading_replaces_the_body() {
    let props = TableProps::default().loading(true);
    let layout = layout_for(&controller(), &numbered(3), &props);
    assert!(matches!(layout.body, TableBody::Loading));
}

#[test]
fn pagination_controls_summarise_the_page() {
    let controller = controller_with(ViewState {
        page: 2,
        ..ViewState::default()
    });
    let layout = layout_for(&controller, &numbered(57), &TableProps::default());
    let pagination = layout.pagination.expect("pagination");

    assert_eq!(pagination.summary.as_deref(), Some("11-20 of 57"));
    assert_eq!(pagination.window, [1, 2, 3, 4, 5]);
    assert_eq!(pagination.page_size, 10);
    assert_eq!(pagination.page_size_choices, [10, 20, 50, 100]);
    assert_eq!(pagination.total_count, 57);
}

#[test]
fn unpaginated_table_has_no_pagination_controls() {
    let props = TableProps::default().paginated(false);
    let layout = layout_for(&controller(), &numbered(30), &props);
    assert!(layout.pagination.is_none());
    assert_eq!(body_rows(&layout).len(), 30);
}

#[test]
fn rows_point_back_into_the_collection() {
    let controller = controller_with(ViewState::default().apply(StateChange::Sort(
        TableSortState::by("age", TableSortDirection::Descending),
    )));
    let layout = layout_for(&controller, &numbered(3), &TableProps::default());
    let indices: Vec<_> = body_rows(&layout).iter().map(|row| row.record_index).collect();
    assert_eq!(indices, [2, 1, 0]);
}

#[test]
fn mobile_cards_use_leading_columns_and_mobile_render() {
    let mut columns = person_columns();
    columns[0] = columns[0]
        .clone()
        .render(|value, _| value.to_display_string().into())
        .mobile_render(|value, _| format!("» {}", value.to_display_string()).into());
    let controller = TableController::new(columns, vec![]);
    let records = numbered(2);
    let config = TabulaConfig::default();
    let prepared = controller.prepare(&records, &TableProps::default());
    let cards = build_mobile_cards(
        controller.columns(),
        &records,
        &prepared,
        &config.table,
        &config.labels,
    );

    assert_eq!(cards.len(), 2);
    let fields: Vec<_> = cards[0]
        .fields
        .iter()
        .map(|(title, cell)| (title.as_str(), cell.text()))
        .collect();
    assert_eq!(
        fields,
        [
            ("Name", "» p01".to_string()),
            ("Age", "1".to_string()),
            ("Status", "active".to_string()),
        ]
    );
}

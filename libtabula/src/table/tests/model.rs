use super::support::*;
use crate::table::*;
use std::cmp::Ordering;
use test_log::test;

#[test]
fn column_key_is_transparent_in_ron() {
    let key = TableColumnKey::from("name");
    let encoded = ron::ser::to_string(&key).expect("serialize TableColumnKey");
    assert_eq!(encoded, "\"name\"");

    let decoded: TableColumnKey = ron::de::from_str(&encoded).expect("deserialize TableColumnKey");
    assert_eq!(decoded, key);
}

#[test]
fn table_mode_display_and_parse() {
    assert_eq!(TableMode::Client.to_string(), "client");
    assert_eq!(TableMode::Server.to_string(), "server");
    assert_eq!("server".parse::<TableMode>().ok(), Some(TableMode::Server));
    assert_eq!(TableMode::default(), TableMode::Client);
    assert_eq!(enum_iterator::all::<TableMode>().count(), 2);
}

#[test]
fn whole_numbers_display_without_fraction() {
    assert_eq!(TableValue::from(42u32).to_display_string(), "42");
    assert_eq!(TableValue::from(-3i64).to_display_string(), "-3");
    assert_eq!(TableValue::from(2.5).to_display_string(), "2.5");
    assert_eq!(TableValue::from(None::<bool>).to_display_string(), "");
    assert_eq!(TableValue::from(true).to_filter_string(), "true");
}

#[test]
fn only_text_values_are_searchable_text() {
    assert_eq!(TableValue::from("tea").as_text(), Some("tea"));
    assert_eq!(TableValue::from(7usize).as_text(), None);
    assert_eq!(TableValue::from(false).as_text(), None);
    assert_eq!(TableValue::Empty.as_text(), None);
}

#[test]
fn numbers_compare_numerically() {
    assert_eq!(
        compare_values(&TableValue::from(9u32), &TableValue::from(10u32)),
        Ordering::Less
    );
    assert_eq!(
        compare_values(&TableValue::from("9"), &TableValue::from("10")),
        Ordering::Greater
    );
}

#[test]
fn mixed_kinds_rank_numbers_text_bools_empty() {
    let ranked = [
        TableValue::from(100u32),
        TableValue::from("a"),
        TableValue::from(false),
        TableValue::Empty,
    ];
    for pair in ranked.windows(2) {
        assert_eq!(compare_values(&pair[0], &pair[1]), Ordering::Less, "{pair:?}");
    }
    assert_eq!(
        compare_values(&TableValue::from(false), &TableValue::from(true)),
        Ordering::Less
    );
}

#[test]
fn click_on_new_column_sorts_ascending() {
    let columns = person_columns();
    let current = TableSortState::by("age", TableSortDirection::Descending);
    let next = sort_spec_on_click(&current, &columns, &"name".into());
    assert_eq!(next, TableSortState::by("name", TableSortDirection::Ascending));
}

#[test]
fn click_on_sorted_column_toggles_direction() {
    let columns = person_columns();
    let ascending = TableSortState::by("name", TableSortDirection::Ascending);
    let descending = sort_spec_on_click(&ascending, &columns, &"name".into());
    assert_eq!(
        descending,
        TableSortState::by("name", TableSortDirection::Descending)
    );
    assert_eq!(
        sort_spec_on_click(&descending, &columns, &"name".into()),
        ascending
    );
}

#[test]
fn click_on_non_sortable_or_unknown_column_is_ignored() {
    let columns = person_columns();
    let current = TableSortState::by("name", TableSortDirection::Ascending);
    assert_eq!(
        sort_spec_on_click(&current, &columns, &"status".into()),
        current
    );
    assert_eq!(
        sort_spec_on_click(&current, &columns, &"missing".into()),
        current
    );
}

#[test]
fn sort_indicator_marks_only_the_sort_column() {
    let sort = TableSortState::by("age", TableSortDirection::Descending);
    assert_eq!(sort_indicator(&sort, &"age".into()), Some("⬇"));
    assert_eq!(sort_indicator(&sort, &"name".into()), None);
    assert_eq!(sort_indicator(&TableSortState::default(), &"age".into()), None);
}

#[test]
fn mobile_renderer_falls_back_to_render() {
    let plain = TableColumn::new("name", "Name", |p: &Person| TableValue::from(&p.name));
    assert!(plain.mobile_renderer().is_none());

    let rendered = plain
        .clone()
        .render(|value, _| TableCell::from(value.to_display_string().to_uppercase()));
    assert!(rendered.mobile_renderer().is_some());
}

#[test]
fn enumerated_filter_option_labels() {
    let filters = person_filters();
    assert_eq!(filters[0].option_label("inactive"), Some("Inactive"));
    assert_eq!(filters[0].option_label("retired"), None);
    assert_eq!(filters[1].option_label("anything"), None);
}

#[test]
fn empty_state_builder() {
    let empty = EmptyState::new("Nothing here")
        .with_icon("🗀")
        .with_description("Try another search")
        .with_action("Reset");
    let encoded = ron::ser::to_string(&empty).expect("serialize EmptyState");
    let decoded: EmptyState = ron::de::from_str(&encoded).expect("deserialize EmptyState");
    assert_eq!(decoded, empty);
    assert_eq!(decoded.action_label.as_deref(), Some("Reset"));
}

use crate::table::*;

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Person {
    pub name: String,
    pub age: u32,
    pub status: String,
    pub active: bool,
}

pub(super) fn person(name: &str, age: u32, status: &str, active: bool) -> Person {
    Person {
        name: name.to_string(),
        age,
        status: status.to_string(),
        active,
    }
}

/// `count` people named `p01`, `p02`, ... with ages `1..=count`.
pub(super) fn numbered(count: u32) -> Vec<Person> {
    (1..=count)
        .map(|i| {
            let status = if i % 2 == 0 { "inactive" } else { "active" };
            person(&format!("p{i:02}"), i, status, i % 2 == 1)
        })
        .collect()
}

pub(super) fn person_columns() -> Vec<TableColumn<Person>> {
    vec![
        TableColumn::new("name", "Name", |p: &Person| TableValue::from(&p.name)).sortable(true),
        TableColumn::new("age", "Age", |p: &Person| TableValue::from(p.age))
            .sortable(true)
            .align(ColumnAlign::Right)
            .width(60.0),
        TableColumn::new("status", "Status", |p: &Person| TableValue::from(&p.status)),
        TableColumn::new("active", "Active", |p: &Person| TableValue::from(p.active)),
    ]
}

pub(super) fn person_filters() -> Vec<TableFilterSpec<Person>> {
    vec![
        TableFilterSpec::enumerated(
            "status",
            "Status",
            vec![
                TableFilterOption::new("active", "Active"),
                TableFilterOption::new("inactive", "Inactive"),
            ],
        ),
        TableFilterSpec::free_text("name", "Name"),
    ]
}

pub(super) fn controller() -> TableController<Person> {
    TableController::new(person_columns(), person_filters())
}

pub(super) fn controller_with(state: ViewState) -> TableController<Person> {
    controller().with_state(state)
}

/// Names of the visible records, in display order.
pub(super) fn visible_names(prepared: &PreparedTable, records: &[Person]) -> Vec<String> {
    prepared
        .slice
        .rows(records)
        .map(|(_, record)| record.name.clone())
        .collect()
}

pub(super) fn names(records: &[Person], indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| records[i].name.clone()).collect()
}

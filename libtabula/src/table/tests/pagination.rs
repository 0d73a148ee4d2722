use crate::table::*;
use test_log::test;

fn window(page: usize, total_pages: usize) -> Vec<usize> {
    page_window(page, total_pages).collect()
}

#[test]
fn small_page_counts_show_every_page() {
    assert_eq!(window(1, 3), [1, 2, 3]);
    assert_eq!(window(5, 5), [1, 2, 3, 4, 5]);
    assert!(window(1, 0).is_empty());
}

#[test]
fn window_pins_to_first_pages() {
    assert_eq!(window(1, 20), [1, 2, 3, 4, 5]);
    assert_eq!(window(3, 20), [1, 2, 3, 4, 5]);
}

#[test]
fn window_pins_to_last_pages() {
    assert_eq!(window(18, 20), [16, 17, 18, 19, 20]);
    assert_eq!(window(20, 20), [16, 17, 18, 19, 20]);
}

#[test]
fn window_centres_on_the_current_page() {
    assert_eq!(window(4, 20), [2, 3, 4, 5, 6]);
    assert_eq!(window(10, 20), [8, 9, 10, 11, 12]);
    assert_eq!(window(17, 20), [15, 16, 17, 18, 19]);
}

#[test]
fn positions() {
    assert_eq!(PaginationState::new(1, 1).position(), PaginationPosition::Single);
    assert_eq!(PaginationState::new(1, 0).position(), PaginationPosition::Single);
    assert_eq!(PaginationState::new(1, 4).position(), PaginationPosition::First);
    assert_eq!(PaginationState::new(2, 4).position(), PaginationPosition::Middle);
    assert_eq!(PaginationState::new(4, 4).position(), PaginationPosition::Last);
}

#[test]
fn single_page_disables_both_directions() {
    let state = PaginationState::new(1, 1);
    assert!(!state.can_go_previous());
    assert!(!state.can_go_next());
    assert_eq!(state.window().collect::<Vec<_>>(), [1]);
}

#[test]
fn transitions_are_clamped() {
    let first = PaginationState::new(1, 4);
    assert!(!first.can_go_previous());
    assert!(first.can_go_next());
    assert_eq!(first.previous(), 1);
    assert_eq!(first.next(), 2);

    let last = PaginationState::new(4, 4);
    assert!(last.can_go_previous());
    assert!(!last.can_go_next());
    assert_eq!(last.previous(), 3);
    assert_eq!(last.next(), 4);

    assert_eq!(first.go_to(3), 3);
}

#[test]
fn new_clamps_the_page() {
    assert_eq!(PaginationState::new(10, 4).page, 4);
    assert_eq!(PaginationState::new(0, 4).page, 1);
}

#[test]
fn range_summary_bounds() {
    assert_eq!(page_range(1, 10, 57), Some((1, 10)));
    assert_eq!(page_range(6, 10, 57), Some((51, 57)));
    assert_eq!(page_range(7, 10, 57), None);
    assert_eq!(page_range(1, 10, 0), None);
}

#[test]
fn page_size_choices_include_the_current_size() {
    assert_eq!(page_size_choices(&[10, 20, 50], 20), [10, 20, 50]);
    assert_eq!(page_size_choices(&[10, 20, 50], 25), [10, 20, 25, 50]);
    assert_eq!(page_size_choices(&[50, 10, 0, 10], 10), [10, 50]);
}

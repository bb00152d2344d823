use std::cell::RefCell;
use std::rc::Rc;

use lassoplot::{
    HeadlessCanvas, Key, SelectionConfig, SelectionController, UiEvent, ViewBounds,
};

/// Five points spaced 2 apart along the x axis.
fn line_points() -> Vec<[f64; 2]> {
    (0..5).map(|i| [i as f64 * 2.0, 0.0]).collect()
}

fn canvas() -> HeadlessCanvas {
    HeadlessCanvas::new(ViewBounds::new((0.0, 10.0), (-5.0, 5.0))).with_style(vec![1.0], vec![4.0])
}

fn connected(points: Vec<[f64; 2]>) -> SelectionController<HeadlessCanvas> {
    let mut c = SelectionController::new(canvas(), points, SelectionConfig::default());
    c.connect();
    c
}

fn record_changes(c: &mut SelectionController<HeadlessCanvas>) -> Rc<RefCell<Vec<Vec<usize>>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    c.on_selection_changed(move |inds| sink.borrow_mut().push(inds.to_vec()));
    log
}

fn click(c: &mut SelectionController<HeadlessCanvas>, at: [f64; 2]) {
    c.handle_event(&UiEvent::GestureComplete(vec![at]));
}

fn lasso(c: &mut SelectionController<HeadlessCanvas>, x0: f64, y0: f64, x1: f64, y1: f64) {
    c.handle_event(&UiEvent::GestureComplete(vec![
        [x0, y0],
        [x1, y0],
        [x1, y1],
        [x0, y1],
    ]));
}

#[test]
fn click_near_point_selects_only_that_point() {
    let mut c = connected(line_points());
    click(&mut c, [2.05, 0.0]);
    assert_eq!(c.selected_indices(), &[1]);
    assert!(c.has_selection());
}

#[test]
fn click_far_from_points_clears_selection() {
    let mut c = connected(line_points());
    c.set_selection([0, 1]);
    // threshold is 0.02 * 10 = 0.2
    click(&mut c, [3.0, 0.0]);
    assert!(!c.has_selection());
}

#[test]
fn click_on_coincident_points_yields_one_index() {
    let mut c = connected(vec![[1.0, 1.0], [1.0, 1.0], [1.0, 1.0]]);
    click(&mut c, [1.0, 1.0]);
    assert_eq!(c.selected_indices(), &[0]);
}

#[test]
fn additive_subset_click_removes_point() {
    let mut c = connected(line_points());
    let changes = record_changes(&mut c);
    c.set_selection([1, 2, 3]);
    c.handle_event(&UiEvent::KeyDown(Key::Shift));
    click(&mut c, [4.0, 0.0]);
    assert_eq!(c.selected_indices(), &[1, 3]);
    assert_eq!(*changes.borrow(), vec![vec![1, 3]]);
}

#[test]
fn additive_lasso_adds_new_points() {
    let mut c = connected(line_points());
    c.set_selection([1, 2]);
    c.handle_event(&UiEvent::KeyDown(Key::Shift));
    lasso(&mut c, 5.0, -1.0, 9.0, 1.0);
    assert_eq!(c.selected_indices(), &[1, 2, 3, 4]);
}

#[test]
fn releasing_shift_returns_to_replace_mode() {
    let mut c = connected(line_points());
    c.set_selection([1, 2]);
    c.handle_event(&UiEvent::KeyDown(Key::Shift));
    c.handle_event(&UiEvent::KeyUp(Key::Shift));
    assert!(!c.is_additive());
    lasso(&mut c, 5.0, -1.0, 9.0, 1.0);
    assert_eq!(c.selected_indices(), &[3, 4]);
}

#[test]
fn additive_empty_gesture_keeps_selection_but_redraws() {
    let mut c = connected(line_points());
    let changes = record_changes(&mut c);
    c.set_selection([0, 4]);
    c.handle_event(&UiEvent::KeyDown(Key::Shift));
    let redraws = c.canvas().redraw_count();
    click(&mut c, [5.0, 3.0]);
    assert_eq!(c.selected_indices(), &[0, 4]);
    assert!(changes.borrow().is_empty());
    assert_eq!(c.canvas().redraw_count(), redraws + 1);
}

#[test]
fn repeating_the_same_gesture_notifies_once() {
    let mut c = connected(line_points());
    let changes = record_changes(&mut c);
    lasso(&mut c, -1.0, -1.0, 3.0, 1.0);
    lasso(&mut c, -1.0, -1.0, 3.0, 1.0);
    assert_eq!(c.selected_indices(), &[0, 1]);
    assert_eq!(changes.borrow().len(), 1);
}

#[test]
fn programmatic_selection_never_notifies() {
    let mut c = connected(line_points());
    let changes = record_changes(&mut c);
    c.set_selection([3, 1, 3]);
    assert_eq!(c.selected_indices(), &[1, 3]);
    c.clear_selection();
    assert!(!c.has_selection());
    assert!(changes.borrow().is_empty());
}

#[test]
fn out_of_range_indices_are_dropped() {
    let mut c = connected(line_points());
    c.set_selection([2, 40]);
    assert_eq!(c.selected_indices(), &[2]);
    assert_eq!(c.canvas().style().alphas.len(), 5);
}

#[test]
fn style_expands_selected_point_and_dims_others() {
    let mut c = connected(line_points());
    c.set_selection([0]);
    let style = c.canvas().style();
    assert_eq!(style.sizes, vec![12.0, 4.0, 4.0, 4.0, 4.0]);
    assert_eq!(style.alphas, vec![1.0, 0.25, 0.25, 0.25, 0.25]);
}

#[test]
fn clearing_restores_default_style() {
    let mut c = connected(line_points());
    c.set_selection([1, 3]);
    c.set_selection(Vec::new());
    let style = c.canvas().style();
    assert_eq!(style.alphas, vec![1.0; 5]);
    assert_eq!(style.sizes, vec![4.0; 5]);
}

#[test]
fn disabled_expansion_keeps_canvas_sizes() {
    let cfg = SelectionConfig {
        expand_selected: None,
        alpha_other: 0.5,
        ..SelectionConfig::default()
    };
    let mut c = SelectionController::new(canvas(), line_points(), cfg);
    c.set_selection([2]);
    assert_eq!(c.canvas().style().sizes, vec![4.0]);
    assert_eq!(c.canvas().style().alphas[2], 1.0);
    assert_eq!(c.canvas().style().alphas[0], 0.5);
}

#[test]
fn custom_additive_key() {
    let cfg = SelectionConfig {
        additive_key: Key::Ctrl,
        ..SelectionConfig::default()
    };
    let mut c = SelectionController::new(canvas(), line_points(), cfg);
    c.connect();
    c.handle_event(&UiEvent::KeyDown(Key::Shift));
    assert!(!c.is_additive());
    c.handle_event(&UiEvent::KeyDown(Key::Ctrl));
    assert!(c.is_additive());
}

#[test]
fn gesture_uses_current_view_extent() {
    let mut c = connected(line_points());
    // zoomed in: threshold becomes 0.02 * 1 = 0.02
    c.canvas_mut()
        .set_view_bounds(ViewBounds::new((1.5, 2.5), (-0.5, 0.5)));
    click(&mut c, [2.05, 0.0]);
    assert!(!c.has_selection());
    click(&mut c, [2.01, 0.0]);
    assert_eq!(c.selected_indices(), &[1]);
}

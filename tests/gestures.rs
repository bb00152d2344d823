use lassoplot::data::geometry::{
    classify, click_threshold, lasso_select, select_gesture, GestureKind, ViewBounds,
};

/// Three points clustered near (1.3, 1.3) at indices 2, 5 and 7; the rest
/// are scattered away from them.
fn layout() -> Vec<[f64; 2]> {
    vec![
        [0.0, 0.0],
        [5.0, 5.0],
        [1.0, 1.0],
        [9.0, 0.0],
        [0.0, 9.0],
        [1.5, 1.2],
        [8.0, 8.0],
        [1.2, 1.8],
        [3.0, 3.0],
    ]
}

fn view() -> ViewBounds {
    ViewBounds::new((0.0, 10.0), (0.0, 10.0))
}

#[test]
fn lasso_around_cluster_selects_exactly_cluster() {
    let lasso = [[0.8, 0.8], [2.0, 0.8], [2.0, 2.0], [0.8, 2.0]];
    let out = select_gesture(&layout(), &lasso, &view(), 0.02);
    assert_eq!(out.kind, GestureKind::Drag);
    assert_eq!(out.selection.as_slice(), &[2, 5, 7]);
}

#[test]
fn freehand_lasso_with_concave_notch() {
    // U shape whose notch excludes point 5 at (1.5, 1.2)
    let lasso = [
        [0.8, 0.8],
        [1.3, 0.8],
        [1.3, 1.5],
        [1.7, 1.5],
        [1.7, 0.8],
        [2.0, 0.8],
        [2.0, 2.0],
        [0.8, 2.0],
    ];
    assert_eq!(lasso_select(&layout(), &lasso).as_slice(), &[2, 7]);
}

#[test]
fn single_vertex_is_always_a_click() {
    for tolerance in [0.0, 0.02, 1.0] {
        let t = click_threshold(&view(), tolerance);
        assert_eq!(classify(&[[4.0, 4.0]], t), GestureKind::Click);
        let out = select_gesture(&layout(), &[[4.0, 4.0]], &view(), tolerance);
        assert_eq!(out.kind, GestureKind::Click);
        assert!(out.selection.len() <= 1);
    }
}

#[test]
fn click_needs_point_within_threshold() {
    let out = select_gesture(&layout(), &[[5.1, 5.1]], &view(), 0.02);
    assert_eq!(out.selection.as_slice(), &[1]);
    let out = select_gesture(&layout(), &[[5.5, 5.5]], &view(), 0.02);
    assert!(out.selection.is_empty());
}

#[test]
fn short_wiggle_is_still_a_click() {
    let path = [[5.0, 5.0], [5.05, 5.0], [5.05, 5.05]];
    let out = select_gesture(&layout(), &path, &view(), 0.02);
    assert_eq!(out.kind, GestureKind::Click);
    assert_eq!(out.selection.as_slice(), &[1]);
}

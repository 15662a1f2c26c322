use flamefold::aggregator::{fold, CallTree, Frame};
use flamefold::flamegraph::color::{hot_color, legacy_color};
use flamefold::flamegraph::generator::get_truncated_name;
use flamefold::flamegraph::{assign_offsets, graph_height, ColorScheme, LaidOutTree, Renderer};
use flamefold::utils::RenderError;
use pretty_assertions::assert_eq;

fn chain(names: &[&str]) -> Vec<Frame> {
    names.iter().map(|name| Frame::new(*name, "app")).collect()
}

fn scenario() -> LaidOutTree {
    let mut tree = CallTree::new();
    fold(&mut tree, &chain(&["main", "foo", "bar"]), 5).unwrap();
    fold(&mut tree, &chain(&["main", "foo", "baz"]), 3).unwrap();
    fold(&mut tree, &chain(&["main", "qux"]), 2).unwrap();
    assign_offsets(tree)
}

#[test]
fn test_scenario_offsets() {
    let laid_out = scenario();
    let offsets: Vec<(String, u64)> = laid_out
        .preorder()
        .map(|id| (laid_out.node(id).function_name().to_string(), laid_out.offset(id)))
        .collect();

    let expected: Vec<(String, u64)> = [("", 0), ("main", 0), ("foo", 0), ("bar", 0), ("baz", 5), ("qux", 8)]
        .iter()
        .map(|(name, offset)| (name.to_string(), *offset))
        .collect();
    assert_eq!(offsets, expected);
}

#[test]
fn test_tiling_with_self_weight_at_every_level() {
    let mut tree = CallTree::new();
    fold(&mut tree, &chain(&["a"]), 3).unwrap();
    fold(&mut tree, &chain(&["a", "b"]), 2).unwrap();
    fold(&mut tree, &chain(&["a", "b", "c"]), 4).unwrap();
    fold(&mut tree, &[], 1).unwrap();
    fold(&mut tree, &chain(&["d", "a", "b"]), 6).unwrap();
    fold(&mut tree, &chain(&["a", "e"]), 1).unwrap();

    let laid_out = assign_offsets(tree);
    laid_out.check_tiling().unwrap();

    // Children first, self weight trails
    let a = laid_out.tree().find_path(&["a"]).unwrap();
    let e = laid_out.tree().find_path(&["a", "e"]).unwrap();
    assert_eq!(laid_out.offset(a), 0);
    assert_eq!(laid_out.offset(e), 6);
    let d = laid_out.tree().find_path(&["d"]).unwrap();
    assert_eq!(laid_out.offset(d), 10);
}

#[test]
fn test_identical_input_gives_identical_offsets() {
    let first = scenario();
    let second = scenario();
    let offsets = |t: &LaidOutTree| t.preorder().map(|id| t.offset(id)).collect::<Vec<_>>();
    assert_eq!(offsets(&first), offsets(&second));
}

#[test]
fn test_chain_at_resolves_samples() {
    let laid_out = scenario();
    let names = |index: u64| -> Vec<String> {
        laid_out
            .chain_at(index)
            .unwrap()
            .into_iter()
            .skip(1)
            .map(|id| laid_out.node(id).function_name().to_string())
            .collect()
    };

    assert_eq!(names(0), vec!["main", "foo", "bar"]);
    assert_eq!(names(4), vec!["main", "foo", "bar"]);
    assert_eq!(names(5), vec!["main", "foo", "baz"]);
    assert_eq!(names(9), vec!["main", "qux"]);
    assert!(laid_out.chain_at(10).is_none());
}

#[test]
fn test_render_scenario_geometry() {
    let laid_out = scenario();
    let rects = Renderer::new(ColorScheme::Hot).render(&laid_out, 1000.0).unwrap();

    assert_eq!(rects.len(), 5);
    assert_eq!(graph_height(laid_out.tree()), 51);

    let main = &rects[0];
    assert_eq!(main.label, "main");
    assert_eq!((main.x, main.width, main.y), (0.0, 1000.0, 34.0));

    let baz = &rects[3];
    assert_eq!(baz.label, "baz");
    assert_eq!((baz.x, baz.width, baz.y), (500.0, 300.0, 0.0));
    assert_eq!(baz.depth, 2);

    let qux = &rects[4];
    assert_eq!((qux.x, qux.width, qux.y), (800.0, 200.0, 17.0));
    assert_eq!(qux.percentage, 20.0);
}

#[test]
fn test_render_empty_tree_fails() {
    let laid_out = assign_offsets(CallTree::new());
    let result = Renderer::new(ColorScheme::Hot).render(&laid_out, 1000.0);
    assert!(matches!(result, Err(RenderError::EmptyTree)));
}

#[test]
fn test_hot_color_depends_only_on_ratio() {
    let mut tree = CallTree::new();
    fold(&mut tree, &chain(&["left", "deep", "deeper"]), 5).unwrap();
    fold(&mut tree, &[Frame::new("right", "libc.so")], 5).unwrap();
    let laid_out = assign_offsets(tree);

    let rects = Renderer::new(ColorScheme::Hot).render(&laid_out, 1200.0).unwrap();
    let right = rects.iter().find(|r| r.label == "right").unwrap();
    let deeper = rects.iter().find(|r| r.label == "deeper").unwrap();

    assert_eq!(right.fill, deeper.fill);
    assert_eq!(right.fill, hot_color(0.5));
}

#[test]
fn test_legacy_colors_repeat_across_runs() {
    let first = Renderer::new(ColorScheme::Legacy).render(&scenario(), 1200.0).unwrap();
    let second = Renderer::new(ColorScheme::Legacy).render(&scenario(), 1200.0).unwrap();

    let fills = |rects: &[flamefold::flamegraph::FlameRect]| {
        rects.iter().map(|r| r.fill).collect::<Vec<_>>()
    };
    assert_eq!(fills(&first), fills(&second));
    assert_eq!(first[0].fill, legacy_color(&Frame::new("main", "app")));
}

#[test]
fn test_dso_colors_follow_module() {
    let mut tree = CallTree::new();
    fold(&mut tree, &[Frame::new("a", "libc.so"), Frame::new("b", "app")], 3).unwrap();
    fold(&mut tree, &[Frame::new("c", "libc.so")], 1).unwrap();
    let rects = Renderer::new(ColorScheme::Dso)
        .render(&assign_offsets(tree), 1200.0)
        .unwrap();

    let a = rects.iter().find(|r| r.label == "a").unwrap();
    let b = rects.iter().find(|r| r.label == "b").unwrap();
    let c = rects.iter().find(|r| r.label == "c").unwrap();
    assert_eq!(a.fill, c.fill);
    assert_ne!(a.fill, b.fill);
}

#[test]
fn test_unknown_scheme_lists_valid_names() {
    let err = Renderer::from_name("rainbow").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Unknown color scheme 'rainbow' (valid: hot, dso, legacy)"
    );
}

#[test]
fn test_labels_truncate_by_width() {
    assert_eq!(get_truncated_name("main", 35.0), None);
    assert_eq!(get_truncated_name("main", 36.0), Some("main".to_string()));
    assert_eq!(
        get_truncated_name("very_long_function_name", 70.0),
        Some("very_lon..".to_string())
    );
}

//! End-to-end scenarios: layout, merge and highlight on small fixed trees, and
//! a full session over a database directory.

use std::fs;
use std::path::Path;

use churnmap::highlight::{normalize, HighlightConfig};
use churnmap::layout::{squarify, LayoutConfig, LayoutStats};
use churnmap::tree::merge::insert_subtree;
use churnmap::tree::path::resolve;
use churnmap::{App, Config, DirSource, QueryParams, TreeNode};
use pretty_assertions::assert_eq;

#[test]
fn seven_three_split_of_a_ten_by_one_strip() {
    let tree = TreeNode::from_json(
        r#"{"name":"root","val":10,"children":[{"name":"a","val":7},{"name":"b","val":3}]}"#,
    )
    .expect("valid tree");

    let mut stats = LayoutStats::default();
    let rects = squarify(0.0, 0.0, 10.0, 1.0, tree.children(), "", 0, &LayoutConfig::default(), &mut stats);

    let boxes: Vec<(&str, f64, f64, f64, f64)> = rects
        .iter()
        .map(|r| (r.label.as_str(), r.x, r.y, r.width, r.height))
        .collect();
    assert_eq!(boxes, vec![("a", 0.0, 0.0, 7.0, 1.0), ("b", 7.0, 0.0, 3.0, 1.0)]);
    assert_eq!(rects.iter().map(|r| r.extent()).sum::<f64>(), 10.0);
}

#[test]
fn merge_updates_every_ancestor() {
    let mut host = TreeNode::from_json(
        r#"{"name":"root","val":10,"children":[{"name":"a","val":7,"children":[{"name":"x","val":7}]},{"name":"b","val":3}]}"#,
    )
    .expect("valid host");
    let sub = TreeNode::from_json(r#"{"name":"sub","val":5,"children":[{"name":"lib.rs","val":5}]}"#)
        .expect("valid subtree");

    assert_eq!(insert_subtree(&mut host, sub, "/a/sub"), 15.0);
    assert_eq!(resolve(&host, "/a").map(TreeNode::weight), Some(12.0));
    assert_eq!(resolve(&host, "/a/sub").map(TreeNode::is_submodule), Some(true));
    assert_eq!(host.weight(), 15.0);
}

#[test]
fn fraction_extremes_map_to_zero_and_one() {
    let tree = TreeNode::internal("root", vec![TreeNode::leaf("leafA", 10.0), TreeNode::leaf("leafB", 10.0)]);
    let highlight = TreeNode::internal("root", vec![TreeNode::leaf("leafA", 2.0), TreeNode::leaf("leafB", 8.0)]);

    let mut layout = churnmap::compute_layout(&tree, 0.0, 0.0, 2.0, "", &LayoutConfig::default());
    let summary = normalize(&mut layout.rects, &highlight, &HighlightConfig::default());

    assert_eq!(summary.min_score, Some(0.2));
    assert_eq!(summary.max_score, Some(0.8));
    assert_eq!(layout.find("/leafA").and_then(|r| r.intensity()), Some(0.0));
    assert_eq!(layout.find("/leafB").and_then(|r| r.intensity()), Some(1.0));
}

fn write(dir: &Path, rel: &str, text: &str) {
    let file = dir.join(rel);
    if let Some(parent) = file.parent() {
        fs::create_dir_all(parent).expect("create dirs");
    }
    fs::write(file, text).expect("write file");
}

#[test]
fn session_over_a_database_directory() {
    let db = tempfile::tempdir().expect("tempdir");
    write(
        db.path(),
        "filetree.json",
        r#"{"name":"/","children":[
            {"name":"src","children":[{"name":"main.rs","val":40},{"name":"util.rs","val":20}]},
            {"name":"README.md","val":10},
            {"name":"vendor","children":[{"name":"dep","val":0}]}
        ]}"#,
    );
    write(
        db.path(),
        "highlight.json",
        r#"{"name":"/","children":[{"name":"src","children":[{"name":"main.rs","val":4},{"name":"util.rs","val":8}]}]}"#,
    );
    write(db.path(), ".gitmodules", "vendor/dep\n");
    write(
        db.path(),
        "vendor/dep/filetree.json",
        r#"{"name":"dep","children":[{"name":"lib.rs","val":30}]}"#,
    );
    write(
        db.path(),
        "vendor/dep/highlight.json",
        r#"{"name":"dep","children":[{"name":"lib.rs","val":3}]}"#,
    );

    let params = QueryParams::new().with("since", "2024-01-01");
    let mut app = App::load(
        Box::new(DirSource::new(db.path())),
        QueryParams::new(),
        Some(params),
        Config::default(),
    )
    .expect("session loads");

    assert_eq!(app.tree().weight(), 100.0);
    let order: Vec<&str> = app.tree().children().iter().map(TreeNode::name).collect();
    assert_eq!(order, vec!["src", "vendor", "README.md"]);

    let view = app.view(1.0).expect("root view");
    assert_eq!(view.highlight.annotated, 3);
    // main.rs 4/40, util.rs 8/20, lib.rs 3/30
    assert_eq!(view.highlight.min_score, Some(0.1));
    assert_eq!(view.highlight.max_score, Some(0.4));
    assert_eq!(view.layout.find("/vendor/dep/lib.rs").and_then(|r| r.intensity()), Some(0.0));
    assert_eq!(view.layout.find("/src/util.rs").and_then(|r| r.intensity()), Some(1.0));
    assert_eq!(view.extensions.get(Some("rs")).map(|e| e.files), Some(3));

    assert!(app.drill_down("/vendor/dep"));
    let dep = app.view(1.0).expect("submodule view");
    assert_eq!(dep.layout.rects.len(), 1);
    assert_eq!(dep.layout.rects[0].path(), "/vendor/dep/lib.rs");
    assert_eq!(dep.titles.get("/vendor/dep/lib.rs"), Some(&3.0));
}

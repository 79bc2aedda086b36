use goaltree_core::{
    max_depth, sample_forest, slice, slice_by_depth, DepthWindow, DepthWindowError, GoalNode,
    SlicedNode, TreeItem,
};

fn chain() -> Vec<GoalNode> {
    vec![GoalNode::new("A", "Root")
        .with_children([GoalNode::new("B", "Middle").with_children([GoalNode::new("C", "Leaf")])])]
}

fn assert_isomorphic(original: &[GoalNode], sliced: &[SlicedNode], depth: usize) {
    assert_eq!(original.len(), sliced.len());
    for (source, copy) in original.iter().zip(sliced) {
        assert_eq!(source.record, copy.record);
        assert_eq!(copy.depth, depth);
        assert_eq!(copy.abs_depth, depth);
        assert_isomorphic(&source.children, &copy.children, depth + 1);
    }
}

#[test]
fn full_window_slice_is_isomorphic_to_input() {
    let forest = sample_forest().unwrap();
    let deepest = max_depth(&forest).unwrap();
    let sliced = slice(&forest, 0, deepest).unwrap();
    assert_isomorphic(&forest, &sliced, 0);
}

#[test]
fn nodes_above_min_are_dropped_and_children_promoted() {
    let sliced = slice(&chain(), 1, 2).unwrap();
    assert_eq!(sliced.len(), 1);
    let root = &sliced[0];
    assert_eq!(root.id().as_str(), "B");
    assert_eq!((root.depth, root.abs_depth), (0, 1));
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].id().as_str(), "C");
    assert_eq!(root.children[0].depth, 1);
}

#[test]
fn nodes_at_max_lose_children_field() {
    let sliced = slice(&chain(), 0, 0).unwrap();
    assert_eq!(sliced.len(), 1);
    assert!(sliced[0].children.is_empty());

    let json = serde_json::to_value(&sliced).unwrap();
    assert_eq!(json[0]["id"], "A");
    assert!(json[0].get("children").is_none());
}

#[test]
fn window_below_every_node_yields_empty_forest() {
    assert!(slice(&chain(), 5, 7).unwrap().is_empty());
}

#[test]
fn middle_window_rebases_sample_roots() {
    let forest = sample_forest().unwrap();
    let sliced = slice_by_depth(&forest, DepthWindow::new(1, 1).unwrap());
    let ids: Vec<&str> = sliced.iter().map(|node| node.id().as_str()).collect();
    assert_eq!(ids, ["6", "8", "4"]);
    assert!(sliced.iter().all(|node| node.children.is_empty() && node.depth == 0));
}

#[test]
fn inverted_window_is_a_caller_error() {
    let err = slice(&chain(), 2, 1).unwrap_err();
    assert_eq!(err, DepthWindowError::Inverted { min: 2, max: 1 });
}

#[test]
fn slicing_does_not_touch_the_input() {
    let forest = chain();
    let before = forest.clone();
    let _ = slice(&forest, 1, 1).unwrap();
    assert_eq!(forest, before);
}

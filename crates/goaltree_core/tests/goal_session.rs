use goaltree_core::{
    load_forest_file, sample_forest, GoalField, GoalTreeSession, GridMode, GridView, IngestError,
    NodeId, SessionError,
};
use std::io::Write;

fn session() -> GoalTreeSession {
    GoalTreeSession::new(sample_forest().unwrap())
}

fn flat_ids(view: &GridView) -> Vec<String> {
    match view {
        GridView::Flat(rows) => rows.iter().map(|row| row.record.id.to_string()).collect(),
        GridView::Tree(_) => panic!("expected flat rows"),
    }
}

#[test]
fn default_session_shows_whole_tree() {
    let session = session();
    assert_eq!(session.window().min(), 0);
    assert_eq!(session.window().max(), 5);
    match session.grid_view() {
        GridView::Tree(rows) => {
            assert_eq!(rows.len(), 3);
            assert_eq!(rows[0].children.len(), 2);
        }
        GridView::Flat(_) => panic!("tree mode is the default"),
    }
    assert_eq!(session.graph_layout().nodes.len(), 8);
}

#[test]
fn depth_window_drives_grid_and_graph() {
    let mut session = session();
    let window = session.set_depth_window(1, 1);
    assert_eq!((window.min(), window.max()), (1, 1));

    session.set_grid_mode(GridMode::Flat);
    assert_eq!(flat_ids(&session.grid_view()), ["6", "8", "4"]);

    let graph = session.graph_layout();
    assert_eq!(graph.nodes.len(), 3);
    assert!(graph.nodes.iter().all(|node| node.y == 0.0));
    assert!(graph.edges.is_empty());
}

#[test]
fn inverted_window_raises_max_to_min() {
    let mut session = session();
    let window = session.set_depth_window(2, 0);
    assert_eq!((window.min(), window.max()), (2, 2));
}

#[test]
fn toggle_rejects_unknown_ids_and_hides_children() {
    let mut session = session();
    let err = session.toggle(&NodeId::from("404")).unwrap_err();
    assert!(matches!(err, SessionError::NodeNotFound(id) if id.as_str() == "404"));
    assert!(session.collapsed().is_empty());

    assert!(session.toggle(&NodeId::from("1")).unwrap());
    let graph = session.visible_graph();
    let ids: Vec<&str> = graph.nodes.iter().map(|node| node.id.as_str()).collect();
    assert_eq!(ids, ["1", "3", "4", "5"]);

    session.collapse_all();
    assert_eq!(session.collapsed().len(), 3);
    assert_eq!(session.graph_layout().nodes.len(), 3);
    session.expand_all();
    assert_eq!(session.graph_layout().nodes.len(), 8);
}

#[test]
fn repeated_collapse_keeps_node_collapsed() {
    let mut session = session();
    let id = NodeId::from("1");
    session.collapse(&id).unwrap();
    session.collapse(&id).unwrap();
    assert!(session.collapsed().is_collapsed(&id));
    assert_eq!(session.visible_graph().nodes.len(), 4);

    assert!(matches!(
        session.collapse(&NodeId::from("404")),
        Err(SessionError::NodeNotFound(_))
    ));
    assert_eq!(session.collapsed().len(), 1);
}

#[test]
fn set_done_updates_grid_rows() {
    let mut session = session();
    session.set_done(&NodeId::from("4"), true).unwrap();
    session.set_grid_mode(GridMode::Flat);
    let GridView::Flat(rows) = session.grid_view() else {
        panic!("expected flat rows");
    };
    let root = rows.iter().find(|row| row.record.id.as_str() == "3").unwrap();
    assert!(root.record.done);
    assert_eq!(root.record.progress, 100);
}

#[test]
fn edit_field_changes_canonical_node_and_stats() {
    let mut session = session();
    assert_eq!(session.fill_stats(GoalField::Specific).to_string(), "✓ 8/8");

    session
        .edit_field(&NodeId::from("9"), GoalField::Specific, "")
        .unwrap();
    let stats = session.fill_stats(GoalField::Specific);
    assert_eq!((stats.empty, stats.filled, stats.total), (1, 7, 8));

    session
        .edit_field(&NodeId::from("9"), GoalField::Name, "Renamed")
        .unwrap();
    let graph = session.graph_layout();
    let renamed = graph.node(&NodeId::from("9")).unwrap();
    assert_eq!(renamed.label, "Renamed");

    assert!(session
        .edit_field(&NodeId::from("missing"), GoalField::Name, "x")
        .is_err());
}

#[test]
fn tree_filter_keeps_ancestors_of_matches() {
    let mut session = session();
    session.set_filter(GoalField::Name, "SUB-SUB-GOAL 2").unwrap();

    let GridView::Tree(rows) = session.grid_view() else {
        panic!("expected tree rows");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].record.id.as_str(), "1");
    assert_eq!(rows[0].children.len(), 1);
    assert_eq!(rows[0].children[0].record.id.as_str(), "6");
    assert_eq!(rows[0].children[0].children.len(), 1);
    assert_eq!(rows[0].children[0].children[0].record.id.as_str(), "9");
}

#[test]
fn flat_filter_matches_rows_independently() {
    let mut session = session();
    session.set_grid_mode(GridMode::Flat);
    session.set_filter(GoalField::Description, "loyalty").unwrap();
    assert_eq!(flat_ids(&session.grid_view()), ["7", "9"]);

    session.set_filter(GoalField::Description, "  ").unwrap();
    assert!(session.filter().is_none());
    assert_eq!(session.grid_view().len(), 8);
}

#[test]
fn grid_view_serializes_with_mode_tag() {
    let mut session = session();
    session.set_depth_window(2, 2);
    session.set_grid_mode(GridMode::Flat);
    let json = serde_json::to_value(session.grid_view()).unwrap();
    assert_eq!(json["mode"], "flat");
    assert_eq!(json["rows"][0]["id"], "7");
    assert_eq!(json["rows"][0]["depth"], 0);
}

#[test]
fn forest_loads_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"[{{"id": 10, "name": "Root", "children": [{{"name": "Child"}}]}}]"#).unwrap();

    let forest = load_forest_file(file.path()).unwrap();
    assert_eq!(forest[0].id().as_str(), "10");
    assert_eq!(forest[0].children[0].id().as_str(), "10-0");

    let err = load_forest_file(file.path().with_extension("missing")).unwrap_err();
    assert!(matches!(err, IngestError::Io { .. }));
}

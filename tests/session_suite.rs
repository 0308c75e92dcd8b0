use std::cell::RefCell;
use std::rc::Rc;

use pbt_formulation::{
    Category, Change, EdgePatch, GraphSession, LayoutConfig, NodePatch, Polarity, RegionKey,
    Weight, records::parse_payload,
};

fn session_with(payload: &str) -> GraphSession {
    let mut session = GraphSession::new(LayoutConfig::default());
    session.load(parse_payload(payload).unwrap());
    session
}

fn two_node_session() -> GraphSession {
    session_with(
        r#"{
            "nodes": [
                {"id": "a", "label": "Worry", "category": "Cognitiva", "change": "increased"},
                {"id": "b", "label": "Avoidance", "category": "Comportamental"}
            ],
            "edges": []
        }"#,
    )
}

#[test]
fn deleting_a_node_cascades_to_incident_edges() {
    let mut session = two_node_session();
    session.connect("a", "b").unwrap();
    assert_eq!(session.edges().len(), 1);

    assert!(session.delete_node("a"));
    assert!(session.edges().is_empty());
    assert_eq!(session.nodes().len(), 1);
    assert_eq!(session.nodes()[0].node.id, "b");
}

#[test]
fn connect_uses_clinical_defaults_and_requires_endpoints() {
    let mut session = two_node_session();
    let id = session.connect("a", "b").unwrap();
    let edge = session.edges().iter().find(|edge| edge.id == id).unwrap();
    assert_eq!(edge.relation, "Influence");
    assert_eq!(edge.weight, Weight::Moderate);
    assert_eq!(edge.polarity, Polarity::Positive);
    assert!(!edge.bidirectional);

    assert!(session.connect("a", "ghost").is_none());
    assert_eq!(session.edges().len(), 1);

    // Self-loops are allowed.
    assert!(session.connect("a", "a").is_some());
}

#[test]
fn add_node_places_near_region_center_with_jitter() {
    let mut session = two_node_session();
    let id = session.add_node(Category::Affective, "Shame", Change::New, true, None);
    let placed = session
        .nodes()
        .iter()
        .find(|placed| placed.node.id == id)
        .unwrap();
    assert_eq!(placed.region, RegionKey::Affective);
    assert!(placed.node.is_target);
    assert!(!placed.node.is_moderator);

    let config = LayoutConfig::default();
    let region = session
        .regions()
        .iter()
        .find(|region| region.key == RegionKey::Affective)
        .unwrap();
    let center_x = (region.width - config.node_width) / 2.0;
    let center_y = (region.height - config.node_height) / 2.0;
    assert!((placed.x - center_x).abs() <= config.jitter + 1e-3);
    assert!((placed.y - center_y).abs() <= config.jitter + 1e-3);
}

#[test]
fn moderator_default_follows_category_on_add() {
    let mut session = GraphSession::new(LayoutConfig::default());
    let ctx = session.add_node(Category::Context, "Family", Change::Stable, false, None);
    let overridden =
        session.add_node(Category::Context, "Family", Change::Stable, false, Some(false));
    let nodes = session.nodes();
    assert!(nodes.iter().find(|p| p.node.id == ctx).unwrap().node.is_moderator);
    assert!(!nodes.iter().find(|p| p.node.id == overridden).unwrap().node.is_moderator);
}

#[test]
fn editing_a_node_category_moves_it_to_the_new_region() {
    let mut session = two_node_session();
    assert!(session.edit_node(
        "a",
        NodePatch {
            category: Some(Category::Affective),
            label: Some("Dread".to_string()),
            ..NodePatch::default()
        },
    ));
    let placed = session
        .nodes()
        .iter()
        .find(|placed| placed.node.id == "a")
        .unwrap();
    assert_eq!(placed.region, RegionKey::Affective);
    assert_eq!(placed.node.label, "Dread");
}

#[test]
fn stale_ids_are_silent_noops() {
    let mut session = two_node_session();
    assert!(!session.edit_node("ghost", NodePatch::default()));
    assert!(!session.delete_node("ghost"));
    assert!(!session.edit_edge("ghost", EdgePatch::default()));
    assert!(!session.delete_edge("ghost"));
    assert_eq!(session.nodes().len(), 2);
    assert!(!session.can_redo());
}

#[test]
fn edge_patch_updates_reverse_fields() {
    let mut session = two_node_session();
    let id = session.connect("a", "b").unwrap();
    assert!(session.edit_edge(
        &id,
        EdgePatch {
            bidirectional: Some(true),
            weight: Some(Weight::Strong),
            reverse_polarity: Some(Some(Polarity::Negative)),
            ..EdgePatch::default()
        },
    ));
    let edge = session.edges().iter().find(|edge| edge.id == id).unwrap();
    assert!(edge.bidirectional);
    assert_eq!(edge.effective_reverse_polarity(), Polarity::Negative);
    // Reverse weight was never overridden: follows the forward value.
    assert_eq!(edge.effective_reverse_weight(), Weight::Strong);
}

#[test]
fn listener_receives_position_free_payload_per_mutation() {
    let calls: Rc<RefCell<Vec<(usize, usize)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&calls);
    let mut session = two_node_session();
    session.set_on_change(Box::new(move |nodes, edges| {
        sink.borrow_mut().push((nodes.len(), edges.len()));
        for record in nodes {
            let value = serde_json::to_value(record).unwrap();
            assert!(value.get("x").is_none());
            assert!(value.get("region").is_none());
        }
    }));

    session.connect("a", "b").unwrap();
    session.add_node(Category::SelfConcept, "Critic", Change::Stable, false, None);
    session.delete_node("b");

    let calls = calls.borrow();
    assert_eq!(calls.as_slice(), &[(2, 1), (3, 1), (2, 0)]);
}

#[test]
fn undo_redo_walk_the_session_linearly() {
    let mut session = two_node_session();
    session.connect("a", "b").unwrap();
    session.delete_node("b");
    assert_eq!(session.nodes().len(), 1);

    assert!(session.undo());
    assert_eq!(session.nodes().len(), 2);
    assert_eq!(session.edges().len(), 1);

    assert!(session.undo());
    assert!(session.edges().is_empty());
    // Back at the loaded state; nothing further to undo.
    assert!(!session.undo());

    assert!(session.redo());
    assert!(session.redo());
    assert_eq!(session.nodes().len(), 1);
    assert!(session.edges().is_empty());
    assert!(!session.redo());
}

#[test]
fn fresh_edit_after_undo_discards_the_redo_branch() {
    let mut session = two_node_session();
    session.connect("a", "b").unwrap();
    session.undo();
    assert!(session.can_redo());
    session.add_node(Category::Motivational, "Values", Change::New, false, None);
    assert!(!session.can_redo());
}

#[test]
fn history_shortcuts_are_ignored_while_a_dialog_is_open() {
    let mut session = two_node_session();
    session.connect("a", "b").unwrap();
    session.set_modal_open(true);
    assert!(!session.undo());
    assert_eq!(session.edges().len(), 1);
    session.set_modal_open(false);
    assert!(session.undo());
    assert!(session.edges().is_empty());
}

#[test]
fn drag_collision_pushes_the_resting_neighbor() {
    let mut session = session_with(
        r#"{
            "nodes": [
                {"id": "a", "label": "Worry", "category": "Cognitiva"},
                {"id": "b", "label": "Rumination", "category": "Cognitiva"}
            ],
            "edges": []
        }"#,
    );
    let config = LayoutConfig::default();
    let before_b = session
        .nodes()
        .iter()
        .find(|placed| placed.node.id == "b")
        .map(|placed| (placed.x, placed.y))
        .unwrap();

    // Drop a directly onto b.
    assert!(session.set_node_position("a", before_b.0, before_b.1));
    session.on_drag_end("a");

    let after_b = session
        .nodes()
        .iter()
        .find(|placed| placed.node.id == "b")
        .map(|placed| (placed.x, placed.y))
        .unwrap();
    assert_ne!(before_b, after_b);
    let moved_x = (after_b.0 - before_b.0).abs();
    let moved_y = (after_b.1 - before_b.1).abs();
    assert!(moved_x <= config.collision_step + 1e-3);
    assert!(moved_y <= config.collision_step + 1e-3);

    // The pushed node stays a margin inside its region.
    let region = session
        .regions()
        .iter()
        .find(|region| region.key == RegionKey::Cognitive)
        .unwrap();
    assert!(after_b.0 >= config.edge_margin);
    assert!(after_b.1 >= config.edge_margin);
    assert!(after_b.0 <= region.width - config.node_width - config.edge_margin);
    assert!(after_b.1 <= region.height - config.node_height - config.edge_margin);
}

#[test]
fn drags_do_not_enter_history() {
    let mut session = two_node_session();
    session.connect("a", "b").unwrap();
    assert!(session.can_undo());

    session.set_node_position("a", 5.0, 5.0);
    session.on_drag_end("a");
    session.undo();
    // The single undo reverts the connect, not the drag.
    assert!(session.edges().is_empty());
}

#[test]
fn distant_neighbors_are_left_alone() {
    let mut session = session_with(
        r#"{
            "nodes": [
                {"id": "a", "label": "Worry", "category": "Cognitiva"},
                {"id": "b", "label": "Rumination", "category": "Cognitiva"},
                {"id": "c", "label": "Shame", "category": "Afetiva"}
            ],
            "edges": []
        }"#,
    );
    let config = LayoutConfig::default();
    // Park a far away from b on both axes, and c lives in another region.
    session.set_node_position("a", 0.0, 0.0);
    session.set_node_position(
        "b",
        config.collision_width + config.collision_buffer + 5.0,
        config.collision_height + config.collision_buffer + 5.0,
    );
    let before: Vec<(f32, f32)> = session.nodes().iter().map(|p| (p.x, p.y)).collect();
    session.on_drag_end("a");
    let after: Vec<(f32, f32)> = session.nodes().iter().map(|p| (p.x, p.y)).collect();
    assert_eq!(before, after);
}

#[test]
fn reorganize_restores_canonical_placement() {
    let mut session = session_with(
        r#"{
            "nodes": [
                {"id": "a", "label": "Worry", "category": "Cognitiva"},
                {"id": "b", "label": "Rumination", "category": "Cognitiva"}
            ],
            "edges": []
        }"#,
    );
    // Drag a aside, then commit that placement into history via an edit.
    session.set_node_position("a", 3.0, 7.0);
    session.connect("a", "b").unwrap();
    session.reorganize();

    // Two cognitive occupants: back on the ring, first slot at the top.
    let config = LayoutConfig::default();
    let region = session
        .regions()
        .iter()
        .find(|region| region.key == RegionKey::Cognitive)
        .unwrap()
        .clone();
    let center_x = (region.width - config.node_width) / 2.0;
    let center_y = (region.height - config.node_height) / 2.0;
    let radius = (region.width - config.node_width)
        .min(region.height - config.node_height)
        / config.ring_radius_divisor;
    let placed = session
        .nodes()
        .iter()
        .find(|placed| placed.node.id == "a")
        .unwrap();
    assert!((placed.x - center_x).abs() < 1e-3);
    assert!((placed.y - (center_y - radius)).abs() < 1e-3);

    // Undoing the reflow restores the manually dragged placement.
    assert!(session.undo());
    let placed = session
        .nodes()
        .iter()
        .find(|placed| placed.node.id == "a")
        .unwrap();
    assert_eq!((placed.x, placed.y), (3.0, 7.0));
}

#[test]
fn empty_session_reports_awaiting_data() {
    let session = GraphSession::new(LayoutConfig::default());
    assert!(session.awaiting_data());
    assert_eq!(session.regions().len(), 9);

    let mut session = session;
    session.add_node(Category::Cognitive, "Worry", Change::New, false, None);
    assert!(!session.awaiting_data());
}

use pagecraft_document::{IdGenerator, PageDocument, Row, Section, WidgetBase};
use pagecraft_editor::{
    drop_zone::parse_zone_id, DragPayload, DropOutcome, DropTarget, EditorCommand, EditorOptions,
    EditorSession, Selection,
};
use pagecraft_registry::{initialize, WidgetRegistry};
use serde_json::json;
use std::sync::Arc;

fn registry() -> Arc<WidgetRegistry> {
    Arc::new(initialize().unwrap())
}

fn text(id: &str) -> WidgetBase {
    WidgetBase::new(id, "text", 1).with_props(json!({ "content": id }))
}

/// s1: r1 [A, B, C], r2 [D]; s2: r3 []
fn page() -> PageDocument {
    let r1 = Row::new("r1")
        .with_widget(text("A"))
        .with_widget(text("B"))
        .with_widget(text("C"));
    let r2 = Row::new("r2").with_widget(text("D"));
    let s1 = Section::new("s1").with_row(r1).with_row(r2);
    let s2 = Section::new("s2").with_row(Row::new("r3"));
    PageDocument::new("page-1", "Home", "/", vec![s1, s2])
}

fn session() -> EditorSession {
    EditorSession::new(page(), registry(), &EditorOptions::default())
        .with_id_generator(IdGenerator::from_seed("test"))
}

fn row_ids(session: &EditorSession, row_id: &str) -> Vec<String> {
    session
        .document()
        .row(row_id)
        .unwrap()
        .widgets
        .iter()
        .map(|w| w.id.clone())
        .collect()
}

fn drag(session: &mut EditorSession, payload: DragPayload, over: Option<DropTarget>) -> DropOutcome {
    session.drag_start(payload);
    if let Some(target) = &over {
        session.drag_over(Some(target));
    }
    session.drag_end(over.as_ref()).unwrap()
}

fn existing(id: &str) -> DragPayload {
    DragPayload::Widget {
        widget_id: id.to_string(),
    }
}

#[test]
fn test_reorder_last_widget_onto_first() {
    let mut session = session();
    let outcome = drag(&mut session, existing("C"), Some(DropTarget::widget("A")));

    assert_eq!(outcome, DropOutcome::Reordered { widget_id: "C".into() });
    assert_eq!(row_ids(&session, "r1"), vec!["C", "A", "B"]);
    assert_eq!(row_ids(&session, "r2"), vec!["D"]);
}

#[test]
fn test_reorder_across_rows_is_noop() {
    let mut session = session();
    let before = session.document().clone();
    let outcome = drag(&mut session, existing("A"), Some(DropTarget::widget("D")));

    assert_eq!(outcome, DropOutcome::Discarded);
    assert_eq!(session.document(), &before);
    assert!(!session.can_undo());
}

#[test]
fn test_move_widget_lands_in_exactly_one_row() {
    let mut session = session();
    let outcome = drag(&mut session, existing("B"), parse_zone_id("row-r3"));

    assert_eq!(
        outcome,
        DropOutcome::Moved {
            widget_id: "B".into(),
            row_id: "r3".into()
        }
    );
    let holders: Vec<_> = session
        .document()
        .rows()
        .filter(|r| r.position("B").is_some())
        .map(|r| r.id.clone())
        .collect();
    assert_eq!(holders, vec!["r3"]);
    assert_eq!(row_ids(&session, "r1"), vec!["A", "C"]);
}

#[test]
fn test_move_to_section_uses_first_row() {
    let mut session = session();
    drag(&mut session, existing("D"), parse_zone_id("section-s2"));
    assert_eq!(row_ids(&session, "r3"), vec!["D"]);
    assert!(row_ids(&session, "r2").is_empty());
}

#[test]
fn test_failed_move_leaves_document_identical() {
    let mut session = session();
    let before = session.document().clone();
    let before_json = serde_json::to_string(&before).unwrap();

    let outcome = drag(&mut session, existing("B"), parse_zone_id("row-missing"));

    assert_eq!(outcome, DropOutcome::Discarded);
    assert_eq!(session.document(), &before);
    assert_eq!(serde_json::to_string(session.document()).unwrap(), before_json);
    assert!(!session.is_dirty());
}

#[test]
fn test_new_widget_from_library() {
    let mut session = session();
    let outcome = drag(
        &mut session,
        DragPayload::NewWidget {
            widget_type: "button".into(),
        },
        Some(DropTarget::row("r2")),
    );

    let DropOutcome::Inserted { widget_id, row_id } = outcome else {
        panic!("expected insert");
    };
    assert_eq!(row_id, "r2");
    assert_eq!(row_ids(&session, "r2"), vec!["D".to_string(), widget_id.clone()]);
    assert_eq!(session.selection(), Some(&Selection::Widget(widget_id.clone())));

    let widget = session.document().widget(&widget_id).unwrap();
    assert_eq!(widget.widget_type, "button");
    assert_eq!(widget.version, 2);
}

#[test]
fn test_undo_redo_round_trip() {
    let mut session = session();
    let d0 = session.document().clone();

    drag(&mut session, existing("C"), Some(DropTarget::widget("A")));
    let d1 = session.document().clone();
    assert_ne!(d0, d1);

    assert!(session.execute(EditorCommand::Undo).unwrap());
    assert_eq!(session.document(), &d0);

    assert!(session.execute(EditorCommand::Redo).unwrap());
    assert_eq!(session.document(), &d1);
}

#[test]
fn test_undo_history_is_bounded() {
    let options = EditorOptions::default().with_undo_limit(3);
    let mut session = EditorSession::new(page(), registry(), &options);
    for i in 0..5 {
        session
            .update_widget("A", json!({ "content": format!("edit {}", i) }))
            .unwrap();
    }

    let mut undone = 0;
    while session.undo() {
        undone += 1;
    }
    assert_eq!(undone, 3);
    assert_eq!(session.document().widget("A").unwrap().props["content"], "edit 1");
}

#[test]
fn test_new_edit_clears_redo() {
    let mut session = session();
    session.delete_widget("A").unwrap();
    session.undo();
    assert!(session.can_redo());

    session.delete_widget("B").unwrap();
    assert!(!session.can_redo());
    assert!(session.document().widget("A").is_some());
}

#[test]
fn test_structural_editing() {
    let mut session = session();
    let section_id = session.add_section(Some(0)).unwrap();
    assert_eq!(session.document().sections[0].id, section_id);
    assert_eq!(session.document().sections[0].rows.len(), 1);

    let row_id = session.add_row("s2").unwrap();
    assert_eq!(session.document().section("s2").unwrap().rows.len(), 2);

    session.select(Selection::Row(row_id.clone())).unwrap();
    assert!(session.execute(EditorCommand::Delete).unwrap());
    assert!(session.document().row(&row_id).is_none());
    assert!(session.selection().is_none());

    session.move_section("s1", 2).unwrap();
    let order: Vec<_> = session.document().sections.iter().map(|s| s.id.clone()).collect();
    assert_eq!(order, vec![section_id, "s2".to_string(), "s1".to_string()]);
}

#[test]
fn test_escape_clears_selection_and_drag() {
    let mut session = session();
    session.select(Selection::Widget("A".into())).unwrap();
    session.drag_start(existing("A"));

    assert!(session.execute(EditorCommand::Escape).unwrap());
    assert!(session.selection().is_none());
    assert!(!session.canvas().is_dragging());
    assert!(!session.execute(EditorCommand::Escape).unwrap());
}

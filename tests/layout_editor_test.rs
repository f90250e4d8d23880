//! Layout editor behaviour tests
//!
//! Drives the editor against the in-memory store: loading, dragging,
//! selection, the edit/add forms, deletion and the session callbacks.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use greenhouse::layout::{
    CanvasTransform, ComponentDraft, ComponentStatus, ComponentType, EditorCallbacks,
    LayoutEditor, LayoutStore, MemoryLayoutStore, Point, PointerTarget,
};

fn bed_and_pump() -> Arc<MemoryLayoutStore> {
    Arc::new(MemoryLayoutStore::with_components([
        ComponentDraft::new("Bed A", ComponentType::Growbed).at(10.0, 10.0),
        ComponentDraft::new("Pump", ComponentType::Pump)
            .at(200.0, 50.0)
            .with_status(ComponentStatus::Inactive)
            .on_layer(1),
    ]))
}

async fn loaded_editor(store: &Arc<MemoryLayoutStore>) -> LayoutEditor {
    let mut editor = LayoutEditor::new(store.clone(), EditorCallbacks::noop());
    assert!(editor.load().await);
    editor
}

#[tokio::test]
async fn test_load_orders_by_layer() {
    let store = Arc::new(MemoryLayoutStore::with_components([
        ComponentDraft::new("Sensor", ComponentType::Sensor).on_layer(4),
        ComponentDraft::new("Bed", ComponentType::Growbed).on_layer(0),
    ]));
    let editor = loaded_editor(&store).await;

    let names: Vec<_> = editor.components().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Bed", "Sensor"]);
}

#[tokio::test]
async fn test_load_failure_leaves_empty_canvas() {
    let store = bed_and_pump();
    store.set_unavailable(true);
    let mut editor = LayoutEditor::new(store.clone(), EditorCallbacks::noop());

    assert!(!editor.load().await);
    assert!(editor.components().is_empty());
}

#[tokio::test]
async fn test_status_dots_render() {
    let store = bed_and_pump();
    let editor = loaded_editor(&store).await;

    let rendered = editor.render();
    assert_eq!(rendered[0].id, 1);
    assert_eq!(rendered[0].status_dot, "#10B981");
    assert_eq!(rendered[1].status_dot, "#EF4444");
}

#[tokio::test]
async fn test_drag_clamps_to_origin() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    // Grab the bed 5px right and below its corner, then pull it past the edge.
    assert!(editor.pointer_down(PointerTarget::Rectangle(1), Point::new(15.0, 15.0)));
    editor.pointer_move(Point::new(3.0, 3.0));

    let bed = editor.component(1).unwrap();
    assert_eq!((bed.x_position, bed.y_position), (0.0, 0.0));
}

#[tokio::test]
async fn test_drag_positions_never_negative() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.pointer_down(PointerTarget::Rectangle(2), Point::new(210.0, 60.0));
    for (x, y) in [(-50.0, 10.0), (300.0, -1.0), (-0.01, -0.01), (5.0, 5.0), (-999.0, 400.0)] {
        editor.pointer_move(Point::new(x, y));
        let pump = editor.component(2).unwrap();
        assert!(pump.x_position >= 0.0, "x went negative at ({x}, {y})");
        assert!(pump.y_position >= 0.0, "y went negative at ({x}, {y})");
    }
}

#[tokio::test]
async fn test_drag_respects_canvas_scale() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;
    editor.set_transform(CanvasTransform::new(Point::new(100.0, 100.0), 2.0, 2.0).unwrap());

    // Screen (130, 130) is canvas (15, 15): 5px inside the bed's corner.
    editor.pointer_down(PointerTarget::Rectangle(1), Point::new(130.0, 130.0));
    editor.pointer_move(Point::new(230.0, 170.0));

    let bed = editor.component(1).unwrap();
    assert_eq!((bed.x_position, bed.y_position), (60.0, 30.0));
}

#[tokio::test]
async fn test_non_rectangle_targets_do_not_drag() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    for target in [
        PointerTarget::Label(1),
        PointerTarget::StatusDot(1),
        PointerTarget::Background,
    ] {
        assert!(!editor.pointer_down(target, Point::new(15.0, 15.0)));
        assert_eq!(editor.dragged_component(), None);
    }

    editor.pointer_move(Point::new(80.0, 80.0));
    assert_eq!(editor.component(1).unwrap().x_position, 10.0);
}

#[tokio::test]
async fn test_moves_stay_local_until_release() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.pointer_down(PointerTarget::Rectangle(1), Point::new(15.0, 15.0));
    for step in 1..=20 {
        editor.pointer_move(Point::new(15.0 + step as f64, 15.0));
    }
    assert_eq!(store.write_count(), 0);

    assert!(editor.pointer_up().await);
    assert_eq!(store.write_count(), 1);
    assert_eq!(editor.dragged_component(), None);

    let stored = store.snapshot();
    assert_eq!(stored[0].x_position, 30.0);
    assert_eq!(stored[0].y_position, 10.0);
}

#[tokio::test]
async fn test_release_without_movement_writes_nothing() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.pointer_down(PointerTarget::Rectangle(1), Point::new(15.0, 15.0));
    assert!(!editor.pointer_up().await);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_failed_drag_write_snaps_back() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.pointer_down(PointerTarget::Rectangle(1), Point::new(15.0, 15.0));
    editor.pointer_move(Point::new(105.0, 205.0));
    store.set_unavailable(true);

    assert!(!editor.pointer_up().await);
    let bed = editor.component(1).unwrap();
    assert_eq!((bed.x_position, bed.y_position), (10.0, 10.0));
}

#[tokio::test]
async fn test_drag_from_negative_position_is_saved() {
    let store = Arc::new(MemoryLayoutStore::with_components([ComponentDraft::new(
        "Edge bed",
        ComponentType::Growbed,
    )
    .at(-20.0, 10.0)]));
    let mut editor = loaded_editor(&store).await;

    editor.pointer_down(PointerTarget::Rectangle(1), Point::new(-15.0, 15.0));
    editor.pointer_move(Point::new(-15.0, 15.0));
    assert_eq!(editor.component(1).unwrap().x_position, 0.0);

    assert!(editor.pointer_up().await);
    assert_eq!(store.write_count(), 1);
    assert_eq!(store.snapshot()[0].x_position, 0.0);
    assert_eq!(editor.component(1).unwrap().x_position, 0.0);
}

#[tokio::test]
async fn test_failed_drag_restores_negative_position() {
    let store = Arc::new(MemoryLayoutStore::with_components([ComponentDraft::new(
        "Edge bed",
        ComponentType::Growbed,
    )
    .at(-20.0, 10.0)]));
    let mut editor = loaded_editor(&store).await;

    editor.pointer_down(PointerTarget::Rectangle(1), Point::new(-15.0, 15.0));
    editor.pointer_move(Point::new(100.0, 100.0));
    store.set_unavailable(true);

    assert!(!editor.pointer_up().await);
    let bed = editor.component(1).unwrap();
    assert_eq!((bed.x_position, bed.y_position), (-20.0, 10.0));
    assert_eq!(store.snapshot()[0].x_position, -20.0);
}

#[tokio::test]
async fn test_click_selects_unless_dragging() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.pointer_down(PointerTarget::Rectangle(1), Point::new(15.0, 15.0));
    assert!(editor.is_editing());
    assert!(!editor.click(2));
    assert!(editor.detail_panel().is_none());
    editor.pointer_up().await;

    assert!(editor.click(2));
    let panel = editor.detail_panel().unwrap();
    assert_eq!(panel.id, 2);
    assert_eq!(panel.component_type, ComponentType::Pump);
    assert_eq!(panel.status, ComponentStatus::Inactive);
}

#[tokio::test]
async fn test_detail_panel_rounds_geometry() {
    let store = Arc::new(MemoryLayoutStore::with_components([ComponentDraft::new(
        "Tank",
        ComponentType::Fishtank,
    )
    .at(10.4, 20.6)
    .sized(99.5, 50.2)]));
    let mut editor = loaded_editor(&store).await;

    editor.click(1);
    let panel = editor.detail_panel().unwrap();
    assert_eq!((panel.x, panel.y), (10, 21));
    assert_eq!((panel.width, panel.height), (100, 50));
}

#[tokio::test]
async fn test_edit_type_change_resets_color() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.click(1);
    assert!(editor.begin_edit());
    let form = editor.edit_form_mut().unwrap();
    form.set_component_type(ComponentType::Fishtank);
    form.set_component_type(ComponentType::Filter);
    assert!(editor.submit_edit().await);

    let bed = editor.component(1).unwrap();
    assert_eq!(bed.component_type, ComponentType::Filter);
    assert_eq!(bed.color, "#6B7280");
    assert_eq!(store.snapshot()[0].color, "#6B7280");
    assert!(editor.edit_form().is_none());
}

#[tokio::test]
async fn test_edit_commits_all_fields() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.click(2);
    editor.begin_edit();
    let form = editor.edit_form_mut().unwrap();
    form.set_name("Main pump");
    form.set_status(ComponentStatus::Maintenance);
    form.set_x("250");
    form.set_width("not a number");
    form.set_color("#FF0000");
    assert!(editor.submit_edit().await);

    let stored = store
        .list_components()
        .await
        .unwrap()
        .into_iter()
        .find(|c| c.id() == 2)
        .unwrap();
    assert_eq!(stored.name, "Main pump");
    assert_eq!(stored.status, ComponentStatus::Maintenance);
    assert_eq!(stored.x_position, 250.0);
    assert_eq!(stored.width, 100.0);
    assert_eq!(stored.color, "#FF0000");
    assert_eq!(editor.component(2).unwrap(), &stored);
}

#[tokio::test]
async fn test_cancelled_edit_discards_changes() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.click(1);
    editor.begin_edit();
    editor.edit_form_mut().unwrap().set_name("Scratch");
    editor.cancel_edit();

    assert_eq!(editor.component(1).unwrap().name, "Bed A");
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_failed_edit_keeps_local_state() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.click(1);
    editor.begin_edit();
    editor.edit_form_mut().unwrap().set_name("Renamed");
    store.set_unavailable(true);

    assert!(!editor.submit_edit().await);
    assert_eq!(editor.component(1).unwrap().name, "Bed A");
    assert!(editor.edit_form().is_some());
}

#[tokio::test]
async fn test_add_requires_name() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.open_add_form();
    assert!(!editor.add_form().unwrap().can_submit());
    assert_eq!(editor.submit_add().await, None);
    assert_eq!(store.write_count(), 0);
    assert_eq!(editor.components().len(), 2);
}

#[tokio::test]
async fn test_add_appends_store_row() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.open_add_form();
    let form = editor.add_form_mut().unwrap();
    form.set_name("Bed B");
    let draft = form.draft().clone();
    assert_eq!(draft.component_type, ComponentType::Growbed);
    assert_eq!(draft.color, "#4CAF50");
    assert_eq!((draft.width, draft.height), (100.0, 100.0));

    let id = editor.submit_add().await.unwrap();
    assert_eq!(editor.components().len(), 3);
    let added = editor.components().last().unwrap();
    assert_eq!(added.id(), id);
    assert_eq!(store.snapshot().iter().filter(|c| c.id() == id).count(), 1);

    // The form starts over from its defaults.
    assert!(editor.add_form().is_none());
    editor.open_add_form();
    assert_eq!(editor.add_form().unwrap().draft().name, "");
}

#[tokio::test]
async fn test_delete_removes_only_target() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.click(2);
    assert!(editor.delete(2, |_| true).await);

    let ids: Vec<_> = editor.components().iter().map(|c| c.id()).collect();
    assert_eq!(ids, vec![1]);
    assert!(editor.detail_panel().is_none());
    assert_eq!(store.snapshot().len(), 1);
}

#[tokio::test]
async fn test_delete_keeps_other_panel_open() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    editor.click(1);
    assert!(editor.delete(2, |_| true).await);
    assert_eq!(editor.detail_panel().unwrap().id, 1);
}

#[tokio::test]
async fn test_declined_delete_writes_nothing() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;

    let mut asked_about = None;
    assert!(
        !editor
            .delete(1, |c| {
                asked_about = Some(c.name.clone());
                false
            })
            .await
    );
    assert_eq!(asked_about.as_deref(), Some("Bed A"));
    assert_eq!(editor.components().len(), 2);
    assert_eq!(store.write_count(), 0);
}

#[tokio::test]
async fn test_failed_delete_keeps_component() {
    let store = bed_and_pump();
    let mut editor = loaded_editor(&store).await;
    store.set_unavailable(true);

    editor.click(1);
    assert!(!editor.delete(1, |_| true).await);
    assert!(editor.component(1).is_some());
    assert!(editor.detail_panel().is_some());
}

#[tokio::test]
async fn test_save_and_cancel_invoke_callbacks() {
    let saves = Arc::new(AtomicUsize::new(0));
    let cancels = Arc::new(AtomicUsize::new(0));
    let callbacks = {
        let saves = saves.clone();
        let cancels = cancels.clone();
        EditorCallbacks::new(
            move || {
                saves.fetch_add(1, Ordering::SeqCst);
            },
            move || {
                cancels.fetch_add(1, Ordering::SeqCst);
            },
        )
    };
    let store = bed_and_pump();
    let mut editor = LayoutEditor::new(store.clone(), callbacks);

    editor.save();
    editor.save();
    editor.cancel();

    assert_eq!(saves.load(Ordering::SeqCst), 2);
    assert_eq!(cancels.load(Ordering::SeqCst), 1);
    assert_eq!(store.write_count(), 0);
}

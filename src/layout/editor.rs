use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::component::{ComponentId, ComponentStatus, ComponentType, LayoutComponent};
use super::drag::{DragState, PointerTarget};
use super::form::ComponentForm;
use super::geometry::{CanvasTransform, Point};
use super::render::{render_canvas, RenderedComponent};
use super::store::LayoutStore;

type SessionCallback = Box<dyn FnMut() + Send>;

/// Hooks supplied by the page hosting the editor; invoked when the user ends
/// the editing session.
pub struct EditorCallbacks {
    on_save: SessionCallback,
    on_cancel: SessionCallback,
}

impl EditorCallbacks {
    pub fn new(
        on_save: impl FnMut() + Send + 'static,
        on_cancel: impl FnMut() + Send + 'static,
    ) -> Self {
        Self {
            on_save: Box::new(on_save),
            on_cancel: Box::new(on_cancel),
        }
    }

    pub fn noop() -> Self {
        Self::new(|| {}, || {})
    }
}

/// Read-only summary shown when a component is selected.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DetailPanel {
    pub id: ComponentId,
    pub name: String,
    pub component_type: ComponentType,
    pub status: ComponentStatus,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl DetailPanel {
    fn for_component(component: &LayoutComponent) -> Self {
        Self {
            id: component.id(),
            name: component.name.clone(),
            component_type: component.component_type,
            status: component.status.clone(),
            x: component.x_position.round() as i64,
            y: component.y_position.round() as i64,
            width: component.width.round() as i64,
            height: component.height.round() as i64,
        }
    }
}

struct EditSession {
    id: ComponentId,
    form: ComponentForm,
}

/// Interactive greenhouse layout editor.
///
/// Holds the single working set of components ("the canvas"). Pointer moves
/// only touch the working set; a finished drag, the edit form, the add form
/// and deletes each issue exactly one store write. Store failures are logged
/// and leave the working set as it was.
pub struct LayoutEditor {
    store: Arc<dyn LayoutStore>,
    canvas: Vec<LayoutComponent>,
    transform: CanvasTransform,
    drag: DragState,
    selected: Option<ComponentId>,
    edit: Option<EditSession>,
    add_form: Option<ComponentForm>,
    callbacks: EditorCallbacks,
}

impl LayoutEditor {
    pub fn new(store: Arc<dyn LayoutStore>, callbacks: EditorCallbacks) -> Self {
        Self {
            store,
            canvas: Vec::new(),
            transform: CanvasTransform::identity(),
            drag: DragState::Idle,
            selected: None,
            edit: None,
            add_form: None,
            callbacks,
        }
    }

    /// Replaces the working set with every stored component in layer order.
    /// On failure the canvas is left empty.
    pub async fn load(&mut self) -> bool {
        self.drag = DragState::Idle;
        self.selected = None;
        self.edit = None;
        match self.store.list_components().await {
            Ok(components) => {
                info!("Loaded {} layout components", components.len());
                self.canvas = components;
                true
            }
            Err(e) => {
                error!("Failed to load greenhouse layout: {}", e);
                self.canvas.clear();
                false
            }
        }
    }

    pub fn components(&self) -> &[LayoutComponent] {
        &self.canvas
    }

    pub fn component(&self, id: ComponentId) -> Option<&LayoutComponent> {
        self.canvas.iter().find(|c| c.id() == id)
    }

    pub fn render(&self) -> Vec<RenderedComponent> {
        render_canvas(&self.canvas, self.drag.dragged())
    }

    pub fn set_transform(&mut self, transform: CanvasTransform) {
        self.transform = transform;
    }

    // ----- Drag ------------------------------------------------------------

    pub fn dragged_component(&self) -> Option<ComponentId> {
        self.drag.dragged()
    }

    /// While a drag is in progress clicks do not change the selection.
    pub fn is_editing(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn pointer_down(&mut self, target: PointerTarget, screen: Point) -> bool {
        let pointer = self.transform.to_canvas(screen);
        let started = self.drag.start(target, pointer, &self.canvas);
        if started {
            debug!("Drag started on component {:?}", self.drag.dragged());
        }
        started
    }

    pub fn pointer_move(&mut self, screen: Point) {
        let pointer = self.transform.to_canvas(screen);
        let Some((id, position)) = self.drag.track(pointer) else {
            return;
        };
        if let Some(component) = self.canvas.iter_mut().find(|c| c.id() == id) {
            component.move_to(position);
        }
    }

    /// Ends the drag and persists the final position if it differs from the
    /// stored one. When the write fails the component returns to where the
    /// drag began.
    pub async fn pointer_up(&mut self) -> bool {
        let Some(release) = self.drag.release() else {
            return false;
        };
        let Some(component) = self.component(release.id) else {
            return false;
        };
        if Point::new(component.x_position, component.y_position) == release.origin {
            return false;
        }
        let position = component.position();

        match self.store.update_position(release.id, position).await {
            Ok(_) => {
                debug!(
                    "Component {} moved to ({}, {})",
                    release.id,
                    position.x(),
                    position.y()
                );
                true
            }
            Err(e) => {
                error!("Failed to save position of component {}: {}", release.id, e);
                if let Some(component) = self.canvas.iter_mut().find(|c| c.id() == release.id) {
                    component.x_position = release.origin.x;
                    component.y_position = release.origin.y;
                }
                false
            }
        }
    }

    // ----- Selection -------------------------------------------------------

    pub fn click(&mut self, id: ComponentId) -> bool {
        if self.is_editing() || self.component(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        true
    }

    pub fn detail_panel(&self) -> Option<DetailPanel> {
        self.selected
            .and_then(|id| self.component(id))
            .map(DetailPanel::for_component)
    }

    pub fn close_detail_panel(&mut self) {
        self.selected = None;
    }

    // ----- Edit ------------------------------------------------------------

    /// Opens the edit form for the selected component.
    pub fn begin_edit(&mut self) -> bool {
        let Some(component) = self.selected.and_then(|id| self.component(id)) else {
            return false;
        };
        self.edit = Some(EditSession {
            id: component.id(),
            form: ComponentForm::from_component(component),
        });
        true
    }

    pub fn edit_form(&self) -> Option<&ComponentForm> {
        self.edit.as_ref().map(|session| &session.form)
    }

    pub fn edit_form_mut(&mut self) -> Option<&mut ComponentForm> {
        self.edit.as_mut().map(|session| &mut session.form)
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub async fn submit_edit(&mut self) -> bool {
        let Some(session) = self.edit.as_ref() else {
            return false;
        };
        let id = session.id;
        let draft = session.form.draft().clone();

        match self.store.update_component(id, &draft).await {
            Ok(updated) => {
                if let Some(component) = self.canvas.iter_mut().find(|c| c.id() == id) {
                    *component = updated;
                }
                self.edit = None;
                info!("Updated layout component {}", id);
                true
            }
            Err(e) => {
                error!("Failed to update layout component {}: {}", id, e);
                false
            }
        }
    }

    // ----- Add -------------------------------------------------------------

    pub fn open_add_form(&mut self) {
        if self.add_form.is_none() {
            self.add_form = Some(ComponentForm::for_new());
        }
    }

    pub fn add_form(&self) -> Option<&ComponentForm> {
        self.add_form.as_ref()
    }

    pub fn add_form_mut(&mut self) -> Option<&mut ComponentForm> {
        self.add_form.as_mut()
    }

    pub fn close_add_form(&mut self) {
        self.add_form = None;
    }

    /// Inserts the add form's component and appends the stored row to the
    /// canvas. Nothing is written while the name is blank.
    pub async fn submit_add(&mut self) -> Option<ComponentId> {
        let form = self.add_form.as_ref()?;
        if !form.can_submit() {
            warn!("Add form submitted without a name");
            return None;
        }

        match self.store.insert_component(form.draft()).await {
            Ok(component) => {
                let id = component.id();
                info!("Added layout component {} ({})", id, component.component_type);
                self.canvas.push(component);
                self.add_form = None;
                Some(id)
            }
            Err(e) => {
                error!("Failed to add layout component: {}", e);
                None
            }
        }
    }

    // ----- Delete ----------------------------------------------------------

    /// Deletes a component once `confirm` agrees.
    pub async fn delete(
        &mut self,
        id: ComponentId,
        confirm: impl FnOnce(&LayoutComponent) -> bool,
    ) -> bool {
        let Some(component) = self.component(id) else {
            return false;
        };
        if !confirm(component) {
            return false;
        }

        match self.store.delete_component(id).await {
            Ok(()) => {
                self.canvas.retain(|c| c.id() != id);
                if self.selected == Some(id) {
                    self.selected = None;
                }
                if self.edit.as_ref().is_some_and(|session| session.id == id) {
                    self.edit = None;
                }
                info!("Deleted layout component {}", id);
                true
            }
            Err(e) => {
                error!("Failed to delete layout component {}: {}", id, e);
                false
            }
        }
    }

    // ----- Session ---------------------------------------------------------

    pub fn save(&mut self) {
        (self.callbacks.on_save)();
    }

    pub fn cancel(&mut self) {
        (self.callbacks.on_cancel)();
    }
}

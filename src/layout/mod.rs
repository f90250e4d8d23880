//! Greenhouse layout canvas: the component model, the drag and form state
//! behind the editor, and the store contract it writes through.

pub mod component;
pub mod drag;
pub mod editor;
pub mod form;
pub mod geometry;
pub mod render;
pub mod store;

pub use component::{
    ComponentDraft, ComponentId, ComponentStatus, ComponentType, LayoutComponent, Position,
};
pub use drag::{DragState, PointerTarget};
pub use editor::{DetailPanel, EditorCallbacks, LayoutEditor};
pub use form::ComponentForm;
pub use geometry::{CanvasTransform, Point};
pub use render::{render_canvas, RenderedComponent};
pub use store::{LayoutStore, MemoryLayoutStore};

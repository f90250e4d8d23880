use std::sync::Mutex;

use async_trait::async_trait;

use super::component::{ComponentDraft, ComponentId, LayoutComponent, Position};
use crate::errors::{LayoutError, LayoutResult};

/// Row-level access to persisted layout components.
///
/// There is no versioning: concurrent writers race and the last write wins.
#[async_trait]
pub trait LayoutStore: Send + Sync {
    /// All components, ascending by `layer_order` (ties broken by id).
    async fn list_components(&self) -> LayoutResult<Vec<LayoutComponent>>;

    /// Inserts a row and returns it with its assigned id.
    async fn insert_component(&self, draft: &ComponentDraft) -> LayoutResult<LayoutComponent>;

    /// Replaces every editable field of the row with `id`.
    async fn update_component(
        &self,
        id: ComponentId,
        draft: &ComponentDraft,
    ) -> LayoutResult<LayoutComponent>;

    async fn update_position(
        &self,
        id: ComponentId,
        position: Position,
    ) -> LayoutResult<LayoutComponent>;

    async fn delete_component(&self, id: ComponentId) -> LayoutResult<()>;
}

#[derive(Default)]
struct MemoryState {
    rows: Vec<LayoutComponent>,
    next_id: ComponentId,
    writes: usize,
    unavailable: bool,
}

/// Process-local store, used by tests and offline tooling.
#[derive(Default)]
pub struct MemoryLayoutStore {
    state: Mutex<MemoryState>,
}

impl MemoryLayoutStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(drafts: impl IntoIterator<Item = ComponentDraft>) -> Self {
        let store = Self::new();
        {
            let mut state = store.lock();
            for draft in drafts {
                state.next_id += 1;
                let id = state.next_id;
                state.rows.push(LayoutComponent::from_draft(id, draft));
            }
        }
        store
    }

    /// Makes every following call fail as if the backend were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Number of successful insert, update and delete calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    pub fn snapshot(&self) -> Vec<LayoutComponent> {
        self.lock().rows.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_available(state: &MemoryState) -> LayoutResult<()> {
        if state.unavailable {
            return Err(LayoutError::Unavailable("memory store switched off".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl LayoutStore for MemoryLayoutStore {
    async fn list_components(&self) -> LayoutResult<Vec<LayoutComponent>> {
        let state = self.lock();
        Self::check_available(&state)?;
        let mut rows = state.rows.clone();
        rows.sort_by_key(|row| (row.layer_order, row.id()));
        Ok(rows)
    }

    async fn insert_component(&self, draft: &ComponentDraft) -> LayoutResult<LayoutComponent> {
        let mut state = self.lock();
        Self::check_available(&state)?;
        draft.validate()?;
        state.next_id += 1;
        let component = LayoutComponent::from_draft(state.next_id, draft.clone());
        state.rows.push(component.clone());
        state.writes += 1;
        Ok(component)
    }

    async fn update_component(
        &self,
        id: ComponentId,
        draft: &ComponentDraft,
    ) -> LayoutResult<LayoutComponent> {
        let mut state = self.lock();
        Self::check_available(&state)?;
        let row = state
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(LayoutError::NotFound(id))?;
        row.apply(draft.clone());
        let updated = row.clone();
        state.writes += 1;
        Ok(updated)
    }

    async fn update_position(
        &self,
        id: ComponentId,
        position: Position,
    ) -> LayoutResult<LayoutComponent> {
        let mut state = self.lock();
        Self::check_available(&state)?;
        let row = state
            .rows
            .iter_mut()
            .find(|row| row.id() == id)
            .ok_or(LayoutError::NotFound(id))?;
        row.move_to(position);
        let updated = row.clone();
        state.writes += 1;
        Ok(updated)
    }

    async fn delete_component(&self, id: ComponentId) -> LayoutResult<()> {
        let mut state = self.lock();
        Self::check_available(&state)?;
        let before = state.rows.len();
        state.rows.retain(|row| row.id() != id);
        if state.rows.len() == before {
            return Err(LayoutError::NotFound(id));
        }
        state.writes += 1;
        Ok(())
    }
}

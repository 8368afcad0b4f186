//! In-memory board surface: the columns, their card nodes, and the visual
//! marks that the page renders.
//!
//! Columns are keyed by [`TaskStatus`], so every column has exactly one
//! status and every status has exactly one column.

use kanban_core::{KanbanError, KanbanResult};
use kanban_domain::{BoardFilter, CardView, TaskId, TaskStatus};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

pub type SharedSurface = Arc<Mutex<BoardSurface>>;

/// Handle for a registered delete-affordance activation handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HandlerId(u64);

/// What activating a card's delete affordance asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeleteRequest {
    pub task_id: TaskId,
    pub title: String,
}

/// An optimistic status change still waiting for the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PendingStatus {
    pub token: u64,
    pub previous: TaskStatus,
}

/// Synchronization state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CardSync {
    Idle,
    /// A status change was applied locally and awaits the server.
    PendingSync { token: u64, previous: TaskStatus },
    /// Delete confirmed and awaiting the server. A status request that was
    /// already in flight stays resolvable through `pending`.
    Removing { pending: Option<PendingStatus> },
}

impl CardSync {
    pub fn is_removing(self) -> bool {
        matches!(self, CardSync::Removing { .. })
    }

    /// The outstanding status request, whether or not a delete is also running.
    pub fn pending_status(self) -> Option<PendingStatus> {
        match self {
            CardSync::PendingSync { token, previous } => Some(PendingStatus { token, previous }),
            CardSync::Removing { pending } => pending,
            CardSync::Idle => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CardNode {
    view: CardView,
    dragging: bool,
    sync: CardSync,
    delete_handler: Option<HandlerId>,
}

impl CardNode {
    pub fn new(view: CardView) -> Self {
        Self {
            view,
            dragging: false,
            sync: CardSync::Idle,
            delete_handler: None,
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.view.task_id
    }

    pub fn dom_id(&self) -> &str {
        &self.view.dom_id
    }

    pub fn view(&self) -> &CardView {
        &self.view
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn sync(&self) -> CardSync {
        self.sync
    }

    /// Registers the delete handler unless one is already attached.
    ///
    /// Returns `true` only when a new registration was made.
    pub fn attach_delete_handler(&mut self, id: HandlerId) -> bool {
        if self.delete_handler.is_some() {
            return false;
        }
        self.delete_handler = Some(id);
        true
    }

    pub fn delete_handler(&self) -> Option<HandlerId> {
        self.delete_handler
    }

    pub fn handler_registrations(&self) -> usize {
        usize::from(self.delete_handler.is_some())
    }

    pub fn activate_delete(&self) -> Option<DeleteRequest> {
        self.delete_handler.map(|_| DeleteRequest {
            task_id: self.view.task_id,
            title: self.view.title.clone(),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ColumnSlot {
    status: TaskStatus,
    cards: Vec<CardNode>,
    displayed_count: usize,
    drop_target: bool,
}

impl ColumnSlot {
    fn new(status: TaskStatus) -> Self {
        Self {
            status,
            cards: Vec::new(),
            displayed_count: 0,
            drop_target: false,
        }
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn cards(&self) -> &[CardNode] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Count as last rendered in the column header.
    pub fn displayed_count(&self) -> usize {
        self.displayed_count
    }

    pub fn is_drop_target(&self) -> bool {
        self.drop_target
    }

    pub fn contains(&self, task_id: TaskId) -> bool {
        self.cards.iter().any(|c| c.task_id() == task_id)
    }
}

/// Identifies the load that is allowed to populate the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Serialize)]
pub struct BoardSurface {
    columns: [ColumnSlot; 4],
    active_filter: BoardFilter,
    #[serde(skip)]
    load_generation: u64,
    #[serde(skip)]
    next_token: u64,
    #[serde(skip)]
    next_handler: u64,
}

impl Default for BoardSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardSurface {
    pub fn new() -> Self {
        Self {
            columns: TaskStatus::ALL.map(ColumnSlot::new),
            active_filter: BoardFilter::All,
            load_generation: 0,
            next_token: 0,
            next_handler: 0,
        }
    }

    pub fn shared(self) -> SharedSurface {
        Arc::new(Mutex::new(self))
    }

    pub fn columns(&self) -> &[ColumnSlot] {
        &self.columns
    }

    pub fn column(&self, status: TaskStatus) -> &ColumnSlot {
        &self.columns[status.index()]
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut ColumnSlot {
        &mut self.columns[status.index()]
    }

    pub fn active_filter(&self) -> &BoardFilter {
        &self.active_filter
    }

    pub fn card_count(&self) -> usize {
        self.columns.iter().map(ColumnSlot::len).sum()
    }

    pub fn handler_registrations(&self) -> usize {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .map(CardNode::handler_registrations)
            .sum()
    }

    /// Column currently holding the card.
    pub fn locate(&self, task_id: TaskId) -> Option<TaskStatus> {
        self.columns
            .iter()
            .find(|c| c.contains(task_id))
            .map(|c| c.status)
    }

    pub fn card(&self, task_id: TaskId) -> Option<&CardNode> {
        self.columns
            .iter()
            .flat_map(|c| c.cards.iter())
            .find(|card| card.task_id() == task_id)
    }

    fn card_mut(&mut self, task_id: TaskId) -> Option<&mut CardNode> {
        self.columns
            .iter_mut()
            .flat_map(|c| c.cards.iter_mut())
            .find(|card| card.task_id() == task_id)
    }

    fn require_card_mut(&mut self, task_id: TaskId) -> KanbanResult<&mut CardNode> {
        self.card_mut(task_id)
            .ok_or_else(|| KanbanError::NotFound(format!("card task-{} is not on the board", task_id)))
    }

    pub fn allocate_handler(&mut self) -> HandlerId {
        self.next_handler += 1;
        HandlerId(self.next_handler)
    }

    /// Appends a card to the column. At most one node may exist per task id.
    pub fn mount(&mut self, status: TaskStatus, node: CardNode) -> KanbanResult<()> {
        if let Some(existing) = self.locate(node.task_id()) {
            return Err(KanbanError::Internal(format!(
                "card {} already mounted in column '{}'",
                node.dom_id(),
                existing
            )));
        }
        self.column_mut(status).cards.push(node);
        Ok(())
    }

    /// Moves the card node to the end of `to`. Returns the column it left.
    pub fn move_card(&mut self, task_id: TaskId, to: TaskStatus) -> KanbanResult<TaskStatus> {
        let from = self
            .locate(task_id)
            .ok_or_else(|| KanbanError::NotFound(format!("card task-{} is not on the board", task_id)))?;
        if from == to {
            return Ok(from);
        }
        let column = self.column_mut(from);
        let idx = column
            .cards
            .iter()
            .position(|c| c.task_id() == task_id)
            .ok_or_else(|| KanbanError::Internal(format!("card task-{} vanished", task_id)))?;
        let mut node = column.cards.remove(idx);
        node.view.status = to;
        self.column_mut(to).cards.push(node);
        Ok(from)
    }

    pub fn remove_card(&mut self, task_id: TaskId) -> KanbanResult<CardNode> {
        for column in self.columns.iter_mut() {
            if let Some(idx) = column.cards.iter().position(|c| c.task_id() == task_id) {
                return Ok(column.cards.remove(idx));
            }
        }
        Err(KanbanError::NotFound(format!(
            "card task-{} is not on the board",
            task_id
        )))
    }

    /// Drops every card node, and with them their handler registrations.
    pub fn clear(&mut self) {
        for column in self.columns.iter_mut() {
            column.cards.clear();
            column.drop_target = false;
        }
    }

    pub fn recompute_counts(&mut self) {
        for column in self.columns.iter_mut() {
            column.displayed_count = column.cards.len();
        }
    }

    /// Invalidates the visible set and makes `filter` the active scope.
    ///
    /// Any ticket issued earlier stops being current.
    pub fn begin_load(&mut self, filter: BoardFilter) -> LoadTicket {
        self.load_generation += 1;
        self.active_filter = filter;
        self.clear();
        self.recompute_counts();
        LoadTicket(self.load_generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.load_generation
    }

    pub fn set_dragging(&mut self, task_id: TaskId, dragging: bool) -> KanbanResult<()> {
        self.require_card_mut(task_id)?.dragging = dragging;
        Ok(())
    }

    pub fn set_drop_target(&mut self, status: TaskStatus, marked: bool) {
        self.column_mut(status).drop_target = marked;
    }

    /// Puts the card into `PendingSync` with a fresh token, superseding any earlier one.
    ///
    /// Refused while the card is being deleted.
    pub fn begin_pending(&mut self, task_id: TaskId, previous: TaskStatus) -> KanbanResult<u64> {
        let card = self.require_card_mut(task_id)?;
        if card.sync.is_removing() {
            return Err(KanbanError::Validation(format!(
                "card task-{} is being deleted",
                task_id
            )));
        }
        self.next_token += 1;
        let token = self.next_token;
        if let Some(card) = self.card_mut(task_id) {
            card.sync = CardSync::PendingSync { token, previous };
        }
        Ok(token)
    }

    /// Whether `token` is still the card's outstanding status request.
    pub fn is_pending(&self, task_id: TaskId, token: u64) -> bool {
        self.card(task_id)
            .and_then(|card| card.sync.pending_status())
            .is_some_and(|pending| pending.token == token)
    }

    /// Clears the outstanding status request, keeping a running delete marked.
    pub fn settle_pending(&mut self, task_id: TaskId) -> KanbanResult<()> {
        let card = self.require_card_mut(task_id)?;
        card.sync = match card.sync {
            CardSync::Removing { .. } => CardSync::Removing { pending: None },
            _ => CardSync::Idle,
        };
        Ok(())
    }

    /// Marks the card as being deleted, carrying over any pending status request.
    pub fn begin_removal(&mut self, task_id: TaskId) -> KanbanResult<()> {
        let card = self.require_card_mut(task_id)?;
        if card.sync.is_removing() {
            return Err(KanbanError::Validation(format!(
                "card task-{} is already being deleted",
                task_id
            )));
        }
        card.sync = CardSync::Removing {
            pending: card.sync.pending_status(),
        };
        Ok(())
    }

    /// Undoes [`Self::begin_removal`] after a failed delete.
    pub fn abort_removal(&mut self, task_id: TaskId) -> KanbanResult<()> {
        let card = self.require_card_mut(task_id)?;
        card.sync = match card.sync {
            CardSync::Removing {
                pending: Some(PendingStatus { token, previous }),
            } => CardSync::PendingSync { token, previous },
            CardSync::Removing { pending: None } => CardSync::Idle,
            other => other,
        };
        Ok(())
    }

    pub fn set_sync(&mut self, task_id: TaskId, sync: CardSync) -> KanbanResult<()> {
        self.require_card_mut(task_id)?.sync = sync;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kanban_domain::{TaskPriority, UiTask};

    fn node(surface: &mut BoardSurface, id: TaskId) -> CardNode {
        let view = CardView::build(&UiTask {
            id,
            title: format!("Task {}", id),
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            assignee: "Unassigned".to_string(),
            due: "TBD".to_string(),
            project_id: "1".to_string(),
        });
        let mut node = CardNode::new(view);
        node.attach_delete_handler(surface.allocate_handler());
        node
    }

    #[test]
    fn test_mount_rejects_duplicate_ids() {
        let mut surface = BoardSurface::new();
        let first = node(&mut surface, 1);
        let second = node(&mut surface, 1);
        surface.mount(TaskStatus::Todo, first).unwrap();
        assert!(surface.mount(TaskStatus::Done, second).is_err());
        assert_eq!(surface.card_count(), 1);
    }

    #[test]
    fn test_counts_only_change_on_recompute() {
        let mut surface = BoardSurface::new();
        let card = node(&mut surface, 1);
        surface.mount(TaskStatus::Todo, card).unwrap();
        assert_eq!(surface.column(TaskStatus::Todo).displayed_count(), 0);

        surface.recompute_counts();
        assert_eq!(surface.column(TaskStatus::Todo).displayed_count(), 1);
    }

    #[test]
    fn test_move_card_updates_status() {
        let mut surface = BoardSurface::new();
        let card = node(&mut surface, 4);
        surface.mount(TaskStatus::Todo, card).unwrap();

        let from = surface.move_card(4, TaskStatus::InReview).unwrap();
        assert_eq!(from, TaskStatus::Todo);
        assert_eq!(surface.locate(4), Some(TaskStatus::InReview));
        assert_eq!(surface.card(4).unwrap().view().status, TaskStatus::InReview);
        assert!(surface.move_card(99, TaskStatus::Done).is_err());
    }

    #[test]
    fn test_removal_keeps_pending_status_request() {
        let mut surface = BoardSurface::new();
        let card = node(&mut surface, 3);
        surface.mount(TaskStatus::Todo, card).unwrap();
        surface.move_card(3, TaskStatus::Done).unwrap();
        let token = surface.begin_pending(3, TaskStatus::Todo).unwrap();

        surface.begin_removal(3).unwrap();
        assert!(surface.card(3).unwrap().sync().is_removing());
        assert!(surface.is_pending(3, token));
        assert!(surface.begin_removal(3).is_err());
        assert!(surface.begin_pending(3, TaskStatus::Done).is_err());

        surface.abort_removal(3).unwrap();
        assert_eq!(
            surface.card(3).unwrap().sync(),
            CardSync::PendingSync {
                token,
                previous: TaskStatus::Todo
            }
        );
    }

    #[test]
    fn test_settle_during_removal_keeps_removing() {
        let mut surface = BoardSurface::new();
        let card = node(&mut surface, 3);
        surface.mount(TaskStatus::Todo, card).unwrap();
        let token = surface.begin_pending(3, TaskStatus::Todo).unwrap();
        surface.begin_removal(3).unwrap();

        surface.settle_pending(3).unwrap();
        assert_eq!(
            surface.card(3).unwrap().sync(),
            CardSync::Removing { pending: None }
        );
        assert!(!surface.is_pending(3, token));

        surface.abort_removal(3).unwrap();
        assert_eq!(surface.card(3).unwrap().sync(), CardSync::Idle);
    }

    #[test]
    fn test_attach_is_idempotent() {
        let mut surface = BoardSurface::new();
        let mut card = node(&mut surface, 1);
        let again = surface.allocate_handler();
        assert!(!card.attach_delete_handler(again));
        assert_eq!(card.handler_registrations(), 1);
    }

    #[test]
    fn test_begin_load_invalidates_previous_ticket() {
        let mut surface = BoardSurface::new();
        let first = surface.begin_load(BoardFilter::All);
        let card = node(&mut surface, 1);
        surface.mount(TaskStatus::Todo, card).unwrap();

        let second = surface.begin_load(BoardFilter::parse("2"));
        assert!(!surface.is_current(first));
        assert!(surface.is_current(second));
        assert_eq!(surface.card_count(), 0);
        assert_eq!(surface.active_filter(), &BoardFilter::parse("2"));
    }

    #[test]
    fn test_pending_token_supersedes() {
        let mut surface = BoardSurface::new();
        let card = node(&mut surface, 1);
        surface.mount(TaskStatus::Todo, card).unwrap();

        let first = surface.begin_pending(1, TaskStatus::Todo).unwrap();
        let second = surface.begin_pending(1, TaskStatus::InProgress).unwrap();
        assert!(!surface.is_pending(1, first));
        assert!(surface.is_pending(1, second));
    }
}

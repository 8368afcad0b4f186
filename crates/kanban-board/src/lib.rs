//! Kanban board surface and its task-state synchronization.

pub mod drag;
pub mod engine;
pub mod loader;
pub mod page;
pub mod renderer;
pub mod surface;

pub use drag::{DragController, DragState, DropOutcome, PendingMove};
pub use engine::{CreateOutcome, DeleteOutcome, MoveResolution, SyncSettings, TaskSyncEngine};
pub use loader::{BoardLoader, LoadReport, SharedDirectory};
pub use page::BoardPage;
pub use renderer::CardRenderer;
pub use surface::{
    BoardSurface, CardNode, CardSync, ColumnSlot, DeleteRequest, HandlerId, LoadTicket, PendingStatus,
    SharedSurface,
};

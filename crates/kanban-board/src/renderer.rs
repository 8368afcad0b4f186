use kanban_domain::{CardView, UiTask};

use crate::surface::{BoardSurface, CardNode};

/// Builds card nodes from UI tasks. Never touches the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct CardRenderer;

impl CardRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, surface: &mut BoardSurface, task: &UiTask) -> CardNode {
        let mut node = CardNode::new(CardView::build(task));
        self.attach_handlers(surface, &mut node);
        node
    }

    /// Safe to call repeatedly; a card keeps its first registration.
    pub fn attach_handlers(&self, surface: &mut BoardSurface, node: &mut CardNode) {
        if node.delete_handler().is_none() {
            let id = surface.allocate_handler();
            node.attach_delete_handler(id);
        }
    }

    /// Renders `task` into the column of its status and returns the card's DOM id.
    pub fn render_into(
        &self,
        surface: &mut BoardSurface,
        task: &UiTask,
    ) -> kanban_core::KanbanResult<String> {
        let node = self.render(surface, task);
        let dom_id = node.dom_id().to_string();
        surface.mount(task.status, node)?;
        Ok(dom_id)
    }
}

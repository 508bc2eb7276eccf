//! In-place edits an editor applies between import and export.
use super::workflow::{Edge, Endpoint, Node, PortDirection, Position, Workflow, port_id};

/// Category used when a connection does not name one.
pub const DEFAULT_CATEGORY: &str = "main";

impl Workflow {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    /// Repositions a node. Returns `false` if no node has this id.
    pub fn move_node(&mut self, id: &str, position: Position) -> bool {
        match self.node_mut(id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => false,
        }
    }

    /// Adds an edge between two existing nodes and returns its id.
    ///
    /// Categories default to `main`. The new id is `edge-N` with N one past the highest
    /// numeric suffix in use, so ids stay unique after deletions. Returns `None` when
    /// either node is missing.
    pub fn connect(
        &mut self,
        from_node: &str,
        from_category: Option<&str>,
        to_node: &str,
        to_category: Option<&str>,
    ) -> Option<String> {
        if self.node(from_node).is_none() || self.node(to_node).is_none() {
            return None;
        }
        let from_category = from_category.unwrap_or(DEFAULT_CATEGORY);
        let to_category = to_category.unwrap_or(from_category);

        let id = format!("edge-{}", self.next_edge_index());
        self.edges.push(Edge {
            id: id.clone(),
            from: Endpoint::new(from_node, port_id(from_node, from_category, PortDirection::Out)),
            to: Endpoint::new(to_node, port_id(to_node, to_category, PortDirection::In)),
        });
        Some(id)
    }

    /// Removes an edge by id, returning it.
    pub fn disconnect(&mut self, edge_id: &str) -> Option<Edge> {
        let index = self.edges.iter().position(|e| e.id == edge_id)?;
        Some(self.edges.remove(index))
    }

    fn next_edge_index(&self) -> usize {
        self.edges
            .iter()
            .filter_map(|e| e.id.strip_prefix("edge-")?.parse::<usize>().ok())
            .max()
            .map_or(0, |max| max + 1)
    }
}

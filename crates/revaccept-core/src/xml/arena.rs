use super::node::XmlNodeData;
use super::xname::XName;
use indextree::{Arena, NodeId};

/// Mutable XML tree. Node ids stay valid while nodes move around the tree,
/// which lets callers collect ids first and mutate afterwards.
#[derive(Debug)]
pub struct XmlDocument {
    arena: Arena<XmlNodeData>,
    root: Option<NodeId>,
}

impl XmlDocument {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Node data, or `None` if the id was removed from the tree.
    pub fn get(&self, id: NodeId) -> Option<&XmlNodeData> {
        self.arena
            .get(id)
            .filter(|node| !node.is_removed())
            .map(|node| node.get())
    }

    pub fn add_root(&mut self, data: XmlNodeData) -> NodeId {
        let id = self.arena.new_node(data);
        self.root = Some(id);
        id
    }

    pub fn add_child(&mut self, parent: NodeId, data: XmlNodeData) -> NodeId {
        let child = self.arena.new_node(data);
        parent.append(child, &mut self.arena);
        child
    }

    /// Detach `node` from wherever it is and reattach it as the previous sibling of `anchor`.
    pub fn move_before(&mut self, node: NodeId, anchor: NodeId) {
        node.detach(&mut self.arena);
        anchor.insert_before(node, &mut self.arena);
    }

    /// Remove a single node. Children, if any, are spliced into its place.
    pub fn remove(&mut self, node: NodeId) {
        node.remove(&mut self.arena);
    }

    /// Remove a node together with all of its descendants.
    pub fn remove_subtree(&mut self, node: NodeId) {
        node.remove_subtree(&mut self.arena);
    }

    pub fn is_removed(&self, node: NodeId) -> bool {
        self.arena.get(node).map_or(true, |n| n.is_removed())
    }

    pub fn children(&self, parent: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        parent.children(&self.arena)
    }

    /// Pre-order walk starting with `node` itself.
    pub fn descendants(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.descendants(&self.arena)
    }

    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.arena.get(node)?.parent()
    }

    /// Ancestors of `node`, nearest first, excluding `node` itself.
    pub fn ancestors_of(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        node.ancestors(&self.arena).skip(1)
    }

    pub fn is_element_named(&self, node: NodeId, name: &XName) -> bool {
        self.get(node).is_some_and(|data| data.is_named(name))
    }

    /// Every element named `name` strictly below `root`, in document order.
    ///
    /// The result is a snapshot: mutating the tree afterwards does not
    /// change which nodes it contains.
    pub fn descendants_named(&self, root: NodeId, name: &XName) -> Vec<NodeId> {
        self.descendants(root)
            .skip(1)
            .filter(|&id| self.is_element_named(id, name))
            .collect()
    }

    pub fn elements_by_name<'a>(
        &'a self,
        parent: NodeId,
        name: &'a XName,
    ) -> impl Iterator<Item = NodeId> + 'a {
        self.children(parent)
            .filter(move |&child| self.is_element_named(child, name))
    }

    /// Concatenated text of every text node under `node`.
    pub fn text(&self, node: NodeId) -> String {
        self.descendants(node)
            .filter_map(|id| self.get(id).and_then(|data| data.text_value()))
            .collect()
    }
}

impl Default for XmlDocument {
    fn default() -> Self {
        Self::new()
    }
}

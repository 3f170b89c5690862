use fxhash::FxHashSet;

use crate::{link_id::LinkId, types::NodeId};

/// Nodes and links that must not be used while searching paths.
#[derive(Debug, Clone, Default)]
pub struct Restrictions {
    nodes: FxHashSet<NodeId>,
    links: FxHashSet<LinkId>,
}

impl Restrictions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.add_node(node);
        self
    }

    pub fn with_link(mut self, link: LinkId) -> Self {
        self.add_link(link);
        self
    }

    pub fn add_node(&mut self, node: NodeId) {
        self.nodes.insert(node);
    }

    /// Restricts the link in both directions.
    pub fn add_link(&mut self, link: LinkId) {
        self.links.insert(link.canonical());
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.links.is_empty()
    }

    pub fn is_node_restricted(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// A link is unusable when it is restricted itself or when one of its
    /// nodes is.
    pub fn is_link_restricted(&self, a: NodeId, b: NodeId) -> bool {
        self.is_node_restricted(a)
            || self.is_node_restricted(b)
            || self.links.contains(&LinkId::new(a, b).canonical())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_restricted_both_ways() {
        let restrictions = Restrictions::new().with_link(LinkId::new(5, 2));
        assert!(restrictions.is_link_restricted(2, 5));
        assert!(restrictions.is_link_restricted(5, 2));
        assert!(!restrictions.is_link_restricted(2, 6));
    }

    #[test]
    fn test_restricted_node_blocks_its_links() {
        let restrictions = Restrictions::new().with_node(3);
        assert!(restrictions.is_link_restricted(1, 3));
        assert!(restrictions.is_link_restricted(3, 9));
        assert!(!restrictions.is_link_restricted(1, 2));
        assert!(!restrictions.is_empty());
    }
}

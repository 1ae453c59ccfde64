//! In-memory visual tree.

use std::collections::HashMap;

use crate::animation::compositor::VisualTree;
use crate::animation::types::{ChannelSet, LayerRole, VisualHandle, VisualId};

/// Indicator layers: one dot, `ring_count` rings and an optional container.
///
/// Every layer gets a fresh [`VisualId`] when the tree is built or rebuilt,
/// the way a host's styling pass replaces its elements.
#[derive(Debug)]
pub struct SimTree {
    ring_count: usize,
    with_container: bool,
    next_id: u64,
    layers: HashMap<LayerRole, VisualHandle>,
}

impl SimTree {
    pub fn new(ring_count: usize, with_container: bool) -> Self {
        let mut tree = Self {
            ring_count,
            with_container,
            next_id: 1,
            layers: HashMap::new(),
        };
        tree.rebuild();
        tree
    }

    /// Replace every layer with a new one of the same role.
    pub fn rebuild(&mut self) {
        self.layers.clear();
        self.insert(LayerRole::Dot, ChannelSet::all());
        for index in 0..self.ring_count {
            self.insert(LayerRole::Ring(index), ChannelSet::OVERLAY);
        }
        if self.with_container {
            self.insert(LayerRole::Container, ChannelSet::OVERLAY);
        }
    }

    /// Drop a layer, leaving any handle to it stale. Pair with
    /// [`SimCompositor::retire`](crate::sim::SimCompositor::retire) so the
    /// backend rejects the old handle.
    pub fn remove(&mut self, role: LayerRole) -> Option<VisualHandle> {
        self.layers.remove(&role)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    fn insert(&mut self, role: LayerRole, channels: ChannelSet) {
        let id = VisualId(self.next_id);
        self.next_id += 1;
        self.layers.insert(role, VisualHandle::new(id, role, channels));
    }
}

impl VisualTree for SimTree {
    fn resolve(&self, role: LayerRole) -> Option<VisualHandle> {
        self.layers.get(&role).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::types::Channel;

    #[test]
    fn test_layers_and_capabilities() {
        let tree = SimTree::new(2, true);
        assert_eq!(tree.len(), 4);

        let dot = tree.resolve(LayerRole::Dot).unwrap();
        assert!(dot.supports(Channel::Translation));
        let ring = tree.resolve(LayerRole::Ring(1)).unwrap();
        assert!(!ring.supports(Channel::Translation));
        assert!(tree.resolve(LayerRole::Ring(2)).is_none());
    }

    #[test]
    fn test_rebuild_issues_fresh_ids() {
        let mut tree = SimTree::new(1, false);
        let before = tree.resolve(LayerRole::Dot).unwrap();
        tree.rebuild();
        let after = tree.resolve(LayerRole::Dot).unwrap();
        assert_ne!(before.id, after.id);
        assert!(tree.resolve(LayerRole::Container).is_none());
    }

    #[test]
    fn test_remove() {
        let mut tree = SimTree::new(1, true);
        assert!(tree.remove(LayerRole::Container).is_some());
        assert!(tree.resolve(LayerRole::Container).is_none());
        assert!(tree.remove(LayerRole::Container).is_none());
    }
}

//! Role-keyed child table.
//!
//! Children of a composed node are not an open-ended list: each child fills
//! one slot of a small fixed set of roles. The registry stores them in a
//! table indexed by role, so lookup is O(1) and iteration always follows the
//! canonical role order no matter which subset is present.

use std::fmt::Debug;
use std::marker::PhantomData;

/// A slot a child node can occupy inside its parent.
pub trait NodeRole: Copy + Eq + Debug + 'static {
    /// Every role in canonical child order.
    const ORDER: &'static [Self];

    /// Position of this role in [`NodeRole::ORDER`].
    fn index(self) -> usize;
}

/// Children of one parent node, at most one per role.
#[derive(Debug)]
pub struct NodeRegistry<R: NodeRole, N> {
    slots: Vec<Option<N>>,
    _role: PhantomData<R>,
}

impl<R: NodeRole, N> NodeRegistry<R, N> {
    /// Create a registry with every slot empty.
    pub fn new() -> Self {
        Self {
            slots: R::ORDER.iter().map(|_| None).collect(),
            _role: PhantomData,
        }
    }

    /// The child tagged with `role`, if any.
    pub fn find(&self, role: R) -> Option<&N> {
        self.slots.get(role.index()).and_then(Option::as_ref)
    }

    pub fn find_mut(&mut self, role: R) -> Option<&mut N> {
        self.slots.get_mut(role.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, role: R) -> bool {
        self.find(role).is_some()
    }

    /// Detach the child tagged with `role` and hand it to the caller.
    pub fn take(&mut self, role: R) -> Option<N> {
        self.slots.get_mut(role.index()).and_then(Option::take)
    }

    /// Put `node` into the slot for `role` (or empty the slot when `None`).
    ///
    /// Returns the child that was detached, if there was one.
    pub fn replace(&mut self, role: R, node: Option<N>) -> Option<N> {
        match self.slots.get_mut(role.index()) {
            Some(slot) => std::mem::replace(slot, node),
            None => {
                log::warn!("role {role:?} has no slot in this registry");
                node
            },
        }
    }

    /// Present children in canonical role order.
    pub fn iter(&self) -> impl Iterator<Item = (R, &N)> + '_ {
        R::ORDER
            .iter()
            .filter_map(move |role| self.find(*role).map(|node| (*role, node)))
    }

    /// Roles currently occupied, in canonical order.
    pub fn roles(&self) -> Vec<R> {
        self.iter().map(|(role, _)| role).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Detach every child. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.len();
        self.slots.iter_mut().for_each(|slot| *slot = None);
        removed
    }
}

impl<R: NodeRole, N> Default for NodeRegistry<R, N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Slot {
        Back,
        Middle,
        Front,
    }

    impl NodeRole for Slot {
        const ORDER: &'static [Self] = &[Slot::Back, Slot::Middle, Slot::Front];

        fn index(self) -> usize {
            self as usize
        }
    }

    #[test]
    fn new_registry_is_empty() {
        let reg: NodeRegistry<Slot, &str> = NodeRegistry::new();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
        assert!(reg.find(Slot::Middle).is_none());
    }

    #[test]
    fn replace_returns_previous_child() {
        let mut reg = NodeRegistry::new();
        assert_eq!(reg.replace(Slot::Middle, Some("a")), None);
        assert_eq!(reg.replace(Slot::Middle, Some("b")), Some("a"));
        assert_eq!(reg.find(Slot::Middle), Some(&"b"));
        assert_eq!(reg.replace(Slot::Middle, None), Some("b"));
        assert!(reg.is_empty());
    }

    #[test]
    fn take_detaches() {
        let mut reg = NodeRegistry::new();
        reg.replace(Slot::Front, Some(7));
        assert_eq!(reg.take(Slot::Front), Some(7));
        assert_eq!(reg.take(Slot::Front), None);
        assert!(!reg.contains(Slot::Front));
    }

    #[test]
    fn iteration_follows_canonical_order() {
        let mut reg = NodeRegistry::new();
        reg.replace(Slot::Front, Some("front"));
        reg.replace(Slot::Back, Some("back"));
        let order: Vec<_> = reg.iter().map(|(_, n)| *n).collect();
        assert_eq!(order, vec!["back", "front"]);
        assert_eq!(reg.roles(), vec![Slot::Back, Slot::Front]);
    }

    #[test]
    fn find_mut_edits_in_place() {
        let mut reg = NodeRegistry::new();
        reg.replace(Slot::Back, Some(1));
        if let Some(n) = reg.find_mut(Slot::Back) {
            *n += 41;
        }
        assert_eq!(reg.find(Slot::Back), Some(&42));
    }

    #[test]
    fn clear_counts_removed_children() {
        let mut reg = NodeRegistry::new();
        reg.replace(Slot::Back, Some(1));
        reg.replace(Slot::Front, Some(2));
        assert_eq!(reg.clear(), 2);
        assert!(reg.is_empty());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_ops() -> impl Strategy<Value = Vec<(usize, Option<u32>)>> {
            proptest::collection::vec((0usize..3, proptest::option::of(any::<u32>())), 0..40)
        }

        proptest! {
            #[test]
            fn at_most_one_child_per_role_in_canonical_order(ops in arb_ops()) {
                let mut reg = NodeRegistry::new();
                let mut model: [Option<u32>; 3] = [None; 3];
                for (slot, node) in ops {
                    let role = Slot::ORDER[slot];
                    let old = reg.replace(role, node);
                    prop_assert_eq!(old, model[slot]);
                    model[slot] = node;
                }
                let roles = reg.roles();
                let expected: Vec<Slot> = Slot::ORDER
                    .iter()
                    .copied()
                    .filter(|r| model[r.index()].is_some())
                    .collect();
                prop_assert_eq!(roles, expected);
                prop_assert_eq!(reg.len(), model.iter().filter(|m| m.is_some()).count());
            }
        }
    }
}

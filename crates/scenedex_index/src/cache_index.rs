//! The counting and adjacency structure shared by every index scope.

use std::collections::HashMap;

use scenedex_common::{Anchor, Guid};
use serde::{Deserialize, Serialize};

/// Reference counts and component attachments for one scope.
///
/// A missing key reads as a count of `0` or an empty component list. Counts
/// that fall to zero and lists that become empty are removed, so two indexes
/// that answer every query the same way also compare equal.
///
/// Under [`merge`](Self::merge) counts add and component lists concatenate.
/// [`subtract`](Self::subtract) undoes counts exactly but drops a subtracted
/// anchor's component list as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheIndex {
    id_usages: HashMap<Anchor, u64>,
    guid_usages: HashMap<Guid, u64>,
    attached_components: HashMap<Anchor, Vec<Anchor>>,
}

impl CacheIndex {
    /// Creates an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns how many times `anchor` is referenced.
    pub fn anchor_usages(&self, anchor: Anchor) -> u64 {
        self.id_usages.get(&anchor).copied().unwrap_or(0)
    }

    /// Returns how many times `guid` is referenced.
    pub fn guid_usages(&self, guid: &str) -> u64 {
        self.guid_usages.get(guid).copied().unwrap_or(0)
    }

    /// Returns the components attached to `anchor`, in contribution order.
    pub fn attached_components(&self, anchor: Anchor) -> &[Anchor] {
        self.attached_components
            .get(&anchor)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Counts one more reference to `anchor`.
    pub fn increment_anchor(&mut self, anchor: Anchor) {
        self.add_anchor_usages(anchor, 1);
    }

    /// Adds `delta` references to `anchor`. [`Anchor::NONE`] is never counted.
    pub fn add_anchor_usages(&mut self, anchor: Anchor, delta: u64) {
        if anchor.is_none() || delta == 0 {
            return;
        }
        let count = self.id_usages.entry(anchor).or_insert(0);
        *count = count.saturating_add(delta);
    }

    /// Removes `delta` references from `anchor`, stopping at zero.
    pub fn remove_anchor_usages(&mut self, anchor: Anchor, delta: u64) {
        if let Some(count) = self.id_usages.get_mut(&anchor) {
            *count = count.saturating_sub(delta);
            if *count == 0 {
                self.id_usages.remove(&anchor);
            }
        }
    }

    /// Counts one more reference to `guid`.
    pub fn increment_guid(&mut self, guid: &str) {
        self.add_guid_usages(guid, 1);
    }

    /// Adds `delta` references to `guid`.
    pub fn add_guid_usages(&mut self, guid: &str, delta: u64) {
        if delta == 0 {
            return;
        }
        match self.guid_usages.get_mut(guid) {
            Some(count) => *count = count.saturating_add(delta),
            None => {
                self.guid_usages.insert(Guid::from(guid), delta);
            }
        }
    }

    /// Removes `delta` references from `guid`, stopping at zero.
    pub fn remove_guid_usages(&mut self, guid: &str, delta: u64) {
        if let Some(count) = self.guid_usages.get_mut(guid) {
            *count = count.saturating_sub(delta);
            if *count == 0 {
                self.guid_usages.remove(guid);
            }
        }
    }

    /// Replaces the component list of `anchor` wholesale.
    pub fn set_attached(&mut self, anchor: Anchor, components: Vec<Anchor>) {
        if components.is_empty() {
            self.attached_components.remove(&anchor);
        } else {
            self.attached_components.insert(anchor, components);
        }
    }

    /// Appends `components` after any already attached to `anchor`.
    pub fn append_attached(&mut self, anchor: Anchor, components: &[Anchor]) {
        if components.is_empty() {
            return;
        }
        self.attached_components
            .entry(anchor)
            .or_default()
            .extend_from_slice(components);
    }

    /// Adds every count of `other` into `self` and appends its component
    /// lists after the existing ones.
    pub fn merge(&mut self, other: &CacheIndex) {
        for (&anchor, &count) in &other.id_usages {
            self.add_anchor_usages(anchor, count);
        }
        for (guid, &count) in &other.guid_usages {
            self.add_guid_usages(guid.as_str(), count);
        }
        for (&anchor, components) in &other.attached_components {
            self.append_attached(anchor, components);
        }
    }

    /// Removes every count of `other` from `self`, flooring at zero, and
    /// drops the component list of every anchor `other` attaches to.
    ///
    /// The component half is only an exact inverse of [`merge`](Self::merge)
    /// when `other` was the sole contributor of that anchor's list.
    pub fn subtract(&mut self, other: &CacheIndex) {
        for (&anchor, &count) in &other.id_usages {
            self.remove_anchor_usages(anchor, count);
        }
        for (guid, &count) in &other.guid_usages {
            self.remove_guid_usages(guid.as_str(), count);
        }
        for anchor in other.attached_components.keys() {
            self.attached_components.remove(anchor);
        }
    }

    /// Returns `true` if the index holds no references and no attachments.
    pub fn is_empty(&self) -> bool {
        self.id_usages.is_empty()
            && self.guid_usages.is_empty()
            && self.attached_components.is_empty()
    }

    /// Returns the number of distinct referenced anchors.
    pub fn anchor_count(&self) -> usize {
        self.id_usages.len()
    }

    /// Returns the number of distinct referenced guids.
    pub fn guid_count(&self) -> usize {
        self.guid_usages.len()
    }

    /// Returns the total number of anchor and guid references.
    pub fn reference_count(&self) -> u64 {
        self.id_usages.values().sum::<u64>() + self.guid_usages.values().sum::<u64>()
    }

    /// Iterates over `(anchor, count)` pairs in arbitrary order.
    pub fn anchors(&self) -> impl Iterator<Item = (Anchor, u64)> + '_ {
        self.id_usages.iter().map(|(&a, &n)| (a, n))
    }

    /// Iterates over `(guid, count)` pairs in arbitrary order.
    pub fn guids(&self) -> impl Iterator<Item = (&Guid, u64)> + '_ {
        self.guid_usages.iter().map(|(g, &n)| (g, n))
    }

    /// Iterates over `(anchor, components)` pairs in arbitrary order.
    pub fn attachments(&self) -> impl Iterator<Item = (Anchor, &[Anchor])> + '_ {
        self.attached_components
            .iter()
            .map(|(&a, list)| (a, list.as_slice()))
    }
}

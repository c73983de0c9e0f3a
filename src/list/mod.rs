use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ListError, Result};

mod iter;
mod order;
mod transform;

#[cfg(test)]
mod properties;

pub use iter::{IntoIter, Iter, IterMut};
pub use order::DEFAULT_SHUFFLE_DEPTH;

type Link<T> = Option<Box<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

impl<T> Node<T> {
    fn new(value: T, next: Link<T>) -> Box<Self> {
        Box::new(Node { value, next })
    }
}

// =============================================================================
// Milestone 1: The list itself
// =============================================================================

/// A singly-linked list owning its whole node chain.
///
/// `length` is cached and always equals the number of nodes reachable from
/// `head`; an empty list has no head.
pub struct List<T> {
    head: Link<T>,
    length: usize,
}

impl<T> List<T> {
    pub fn new() -> Self {
        List {
            head: None,
            length: 0,
        }
    }

    /// Builds a list holding `values` in iteration order.
    pub fn from_sequence<I: IntoIterator<Item = T>>(values: I) -> Self {
        values.into_iter().collect()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn clear(&mut self) {
        let mut link = self.head.take();
        while let Some(mut node) = link {
            link = node.next.take();
        }
        self.length = 0;
    }

    // -------------------------------------------------------------------------
    // Chain walking
    // -------------------------------------------------------------------------

    fn node_at(&self, position: usize) -> Option<&Node<T>> {
        let mut cursor = self.head.as_deref();
        for _ in 0..position {
            cursor = cursor?.next.as_deref();
        }
        cursor
    }

    fn node_at_mut(&mut self, position: usize) -> Option<&mut Node<T>> {
        let mut cursor = self.head.as_deref_mut();
        for _ in 0..position {
            cursor = cursor?.next.as_deref_mut();
        }
        cursor
    }

    /// The empty link after the last node (the head link when empty).
    fn tail_link(&mut self) -> &mut Link<T> {
        let mut link = &mut self.head;
        while let Some(node) = link {
            link = &mut node.next;
        }
        link
    }

    /// Splices `value` in so that it ends up at `position`.
    /// Callers guarantee `position <= length`.
    fn link(&mut self, value: T, position: usize) {
        debug_assert!(position <= self.length);
        match position.checked_sub(1).and_then(|prev| self.node_at_mut(prev)) {
            Some(prev) => {
                let next = prev.next.take();
                prev.next = Some(Node::new(value, next));
            }
            None => {
                let next = self.head.take();
                self.head = Some(Node::new(value, next));
            }
        }
        self.length += 1;
    }

    /// Detaches the node at `position` and hands back its value.
    fn unlink(&mut self, position: usize) -> Option<T> {
        let node = match position.checked_sub(1) {
            None => {
                let mut head = self.head.take()?;
                self.head = head.next.take();
                head
            }
            Some(prev) => {
                let prev = self.node_at_mut(prev)?;
                let mut node = prev.next.take()?;
                prev.next = node.next.take();
                node
            }
        };
        self.length -= 1;
        Some(node.value)
    }

    // =========================================================================
    // Milestone 2: Insertion
    // =========================================================================

    pub fn push_front(&mut self, value: T) {
        self.link(value, 0);
    }

    pub fn push_back(&mut self, value: T) {
        *self.tail_link() = Some(Node::new(value, None));
        self.length += 1;
    }

    /// Inserts `value` so that it ends up at `position` (`0..=len`).
    pub fn insert_at(&mut self, value: T, position: usize) -> Result<()> {
        if position > self.length {
            return Err(ListError::out_of_range(position, self.length));
        }
        if position == 0 {
            self.push_front(value);
        } else if position == self.length {
            self.push_back(value);
        } else {
            self.link(value, position);
        }
        Ok(())
    }

    // =========================================================================
    // Milestone 3: Removal
    // =========================================================================

    pub fn pop_front(&mut self) -> Result<T> {
        self.unlink(0).ok_or(ListError::EmptyContainer)
    }

    pub fn pop_back(&mut self) -> Result<T> {
        let last = self
            .length
            .checked_sub(1)
            .ok_or(ListError::EmptyContainer)?;
        self.unlink(last).ok_or(ListError::EmptyContainer)
    }

    /// Removes and returns the value at `position` (`0..len`).
    pub fn remove_at(&mut self, position: usize) -> Result<T> {
        if position >= self.length {
            return Err(ListError::out_of_range(position, self.length));
        }
        if position == 0 {
            return self.pop_front();
        }
        if position == self.length - 1 {
            return self.pop_back();
        }
        self.unlink(position)
            .ok_or_else(|| ListError::out_of_range(position, self.length))
    }

    // =========================================================================
    // Milestone 4: Access
    // =========================================================================

    pub fn front(&self) -> Result<&T> {
        self.head
            .as_deref()
            .map(|node| &node.value)
            .ok_or(ListError::EmptyContainer)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.head
            .as_deref_mut()
            .map(|node| &mut node.value)
            .ok_or(ListError::EmptyContainer)
    }

    pub fn back(&self) -> Result<&T> {
        let last = self
            .length
            .checked_sub(1)
            .ok_or(ListError::EmptyContainer)?;
        self.node_at(last)
            .map(|node| &node.value)
            .ok_or(ListError::EmptyContainer)
    }

    pub fn at(&self, position: usize) -> Result<&T> {
        if position >= self.length {
            return Err(ListError::out_of_range(position, self.length));
        }
        self.node_at(position)
            .map(|node| &node.value)
            .ok_or_else(|| ListError::out_of_range(position, self.length))
    }

    pub fn at_mut(&mut self, position: usize) -> Result<&mut T> {
        let len = self.length;
        if position >= len {
            return Err(ListError::out_of_range(position, len));
        }
        self.node_at_mut(position)
            .map(|node| &mut node.value)
            .ok_or_else(|| ListError::out_of_range(position, len))
    }
}

// =============================================================================
// Milestone 5: Standard trait integration
// =============================================================================

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

// Releases nodes one by one; the default recursive drop of a long
// `Box` chain can exhaust the stack.
impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let mut added = 0;
        let mut link = self.tail_link();
        for value in iter {
            let node = link.insert(Node::new(value, None));
            link = &mut node.next;
            added += 1;
        }
        self.length += added;
    }
}

impl<T: Clone> Clone for List<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: PartialEq> PartialEq for List<T> {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for List<T> {}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Arrow-chained rendering: `1 -> 2 -> 3 -> /`.
impl<T: fmt::Display> fmt::Display for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for value in self.iter() {
            write!(f, "{value} -> ")?;
        }
        write!(f, "/")
    }
}

impl<T: Serialize> Serialize for List<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for List<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(List::from_sequence)
    }
}

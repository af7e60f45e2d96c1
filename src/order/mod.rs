//! Ordered sibling lists used by the canvas tables (API inputs, outputs and operations,
//! sprint backlogs).
//!
//! An item's `order` is a display hint, not a dense sequence. New items get the current
//! sibling count; moves change array position only; removals leave gaps. Callers that
//! persist explicit order values call [`OrderedList::renumber`] after a move and write back
//! the indices it reports.

use crate::error::OrderError;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

/// A list member with an optional explicit order hint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderedItem<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(flatten)]
    pub value: T,
}

impl<T> OrderedItem<T> {
    pub fn new(value: T) -> Self {
        Self { order: None, value }
    }

    pub fn with_order(value: T, order: i64) -> Self {
        Self {
            order: Some(order),
            value,
        }
    }
}

impl<T> Deref for OrderedItem<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> DerefMut for OrderedItem<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.value
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderedList<T> {
    items: Vec<OrderedItem<T>>,
}

impl<T> Default for OrderedList<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> OrderedList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_items(items: Vec<OrderedItem<T>>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&OrderedItem<T>> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[OrderedItem<T>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<OrderedItem<T>> {
        self.items
    }

    /// Pushes a new item with `order` set to the sibling count before the push.
    pub fn append(&mut self, value: T) -> &OrderedItem<T> {
        let order = self.items.len() as i64;
        let index = self.items.len();
        self.items.push(OrderedItem::with_order(value, order));
        &self.items[index]
    }

    /// Inserts at a position; like [`append`](Self::append), the order hint is the sibling count.
    pub fn insert(&mut self, index: usize, value: T) -> Result<&OrderedItem<T>, OrderError> {
        if index > self.items.len() {
            return Err(OrderError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        let order = self.items.len() as i64;
        self.items.insert(index, OrderedItem::with_order(value, order));
        Ok(&self.items[index])
    }

    /// Moves an item to a new position. Order hints are left untouched.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<(), OrderError> {
        let len = self.items.len();
        for index in [from, to] {
            if index >= len {
                return Err(OrderError::IndexOutOfBounds { index, len });
            }
        }
        if from != to {
            let item = self.items.remove(from);
            self.items.insert(to, item);
        }
        Ok(())
    }

    /// Removes an item. Remaining order hints are not compacted.
    pub fn remove(&mut self, index: usize) -> Result<OrderedItem<T>, OrderError> {
        if index >= self.items.len() {
            return Err(OrderError::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Sets every order hint to its array position and returns the positions that changed.
    pub fn renumber(&mut self) -> Vec<usize> {
        self.items
            .iter_mut()
            .enumerate()
            .filter_map(|(index, item)| {
                let order = index as i64;
                if item.order == Some(order) {
                    None
                } else {
                    item.order = Some(order);
                    Some(index)
                }
            })
            .collect()
    }

    /// Display order: ascending by order hint, falling back to array index; stable on ties.
    pub fn sorted(&self) -> Vec<&OrderedItem<T>> {
        self.items
            .iter()
            .enumerate()
            .sorted_by_key(|(index, item)| item.order.unwrap_or(*index as i64))
            .map(|(_, item)| item)
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderedItem<T>> {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for OrderedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.append(value);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a OrderedList<T> {
    type Item = &'a OrderedItem<T>;
    type IntoIter = std::slice::Iter<'a, OrderedItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_past_end_is_rejected() {
        let mut list: OrderedList<&str> = ["a"].into_iter().collect();
        assert!(matches!(
            list.insert(3, "b"),
            Err(OrderError::IndexOutOfBounds { index: 3, len: 1 })
        ));
        assert_eq!(list.insert(1, "b").unwrap().order, Some(1));
    }

    #[test]
    fn move_to_same_index_is_a_no_op() {
        let mut list: OrderedList<&str> = ["a", "b"].into_iter().collect();
        list.move_item(1, 1).unwrap();
        assert_eq!(list.get(1).map(|i| i.value), Some("b"));
    }
}

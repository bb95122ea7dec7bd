use super::config::Limits;
use super::item::{ListItem, NAME_MAX_LEN, bounded};

/// Error type for item store mutations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("capacity exceeded")]
    CapacityExceeded,
    #[error("no head at index {0}")]
    InvalidHead(usize),
    #[error("no item at index {0}")]
    InvalidIndex(usize),
    #[error("the standalone head cannot be removed or moved")]
    ReservedHead,
}

/// A named, ordered group of items
#[derive(Debug, Clone)]
pub struct Head<T> {
    /// Display-only id, assigned when the head is created
    pub id: u32,
    pub name: String,
    items: Vec<T>,
    next_item_id: u32,
}

impl<T: ListItem> Head<T> {
    fn new(id: u32, name: &str) -> Self {
        Head {
            id,
            name: bounded(name, NAME_MAX_LEN),
            items: Vec::new(),
            next_item_id: 1,
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    pub fn item_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }
}

/// The two-level store: an ordered list of heads, each holding ordered items.
///
/// Both levels are capacity-bounded by [`Limits`]. All mutations keep the
/// sequences contiguous; indices past a head's length are never touched.
#[derive(Debug, Clone)]
pub struct Collection<T> {
    heads: Vec<Head<T>>,
    limits: Limits,
    next_head_id: u32,
}

impl<T: ListItem> Collection<T> {
    /// An empty collection. Variants with a reserved head start with it in place.
    pub fn new(limits: Limits) -> Self {
        let mut collection = Collection {
            heads: Vec::new(),
            limits,
            next_head_id: 1,
        };
        if T::RESERVED_HEAD {
            collection.push_head("");
        }
        collection
    }

    pub fn limits(&self) -> Limits {
        self.limits
    }

    pub fn heads(&self) -> &[Head<T>] {
        &self.heads
    }

    pub fn head(&self, index: usize) -> Option<&Head<T>> {
        self.heads.get(index)
    }

    pub fn head_count(&self) -> usize {
        self.heads.len()
    }

    pub fn total_items(&self) -> usize {
        self.heads.iter().map(Head::len).sum()
    }

    pub fn item(&self, head: usize, index: usize) -> Option<&T> {
        self.heads.get(head)?.item(index)
    }

    pub fn item_mut(&mut self, head: usize, index: usize) -> Option<&mut T> {
        self.heads.get_mut(head)?.item_mut(index)
    }

    /// Index of the first head a user can name, select or move
    pub fn first_named_head(&self) -> usize {
        usize::from(T::RESERVED_HEAD)
    }

    /// Whether `index` is the reserved standalone head
    pub fn is_reserved(&self, index: usize) -> bool {
        T::RESERVED_HEAD && index == 0
    }

    /// Look a named head up by exact name, skipping the reserved head
    pub fn find_head(&self, name: &str) -> Option<usize> {
        let start = self.first_named_head();
        self.heads
            .iter()
            .skip(start)
            .position(|h| h.name == name)
            .map(|i| i + start)
    }

    pub fn can_add_head(&self) -> bool {
        self.heads.len() < self.limits.max_heads
    }

    pub fn head_has_room(&self, head: usize) -> bool {
        self.heads
            .get(head)
            .is_some_and(|h| h.len() < self.limits.max_items_per_head)
    }

    /// Append a new empty head, returning its index
    pub fn add_head(&mut self, name: &str) -> Result<usize, StoreError> {
        if !self.can_add_head() {
            return Err(StoreError::CapacityExceeded);
        }
        Ok(self.push_head(name))
    }

    fn push_head(&mut self, name: &str) -> usize {
        self.heads.push(Head::new(self.next_head_id, name));
        self.next_head_id += 1;
        self.heads.len() - 1
    }

    /// Insert `item` into `head` at `position` (clamped to `[0, len]`),
    /// shifting later items right. Returns the position used.
    pub fn insert_item(
        &mut self,
        head: usize,
        position: usize,
        item: T,
    ) -> Result<usize, StoreError> {
        let max_items = self.limits.max_items_per_head;
        let target = self
            .heads
            .get_mut(head)
            .ok_or(StoreError::InvalidHead(head))?;
        if target.len() >= max_items {
            return Err(StoreError::CapacityExceeded);
        }
        let position = position.min(target.len());
        target.next_item_id = target.next_item_id.max(item.id() + 1);
        target.items.insert(position, item);
        Ok(position)
    }

    /// Create an item from user text with the head's next id and insert it
    pub fn create_item(
        &mut self,
        head: usize,
        position: usize,
        text: String,
    ) -> Result<usize, StoreError> {
        let id = self
            .heads
            .get(head)
            .ok_or(StoreError::InvalidHead(head))?
            .next_item_id;
        self.insert_item(head, position, T::create(text, id))
    }

    /// Remove a head and everything in it
    pub fn delete_head(&mut self, index: usize) -> Result<Head<T>, StoreError> {
        if self.is_reserved(index) {
            return Err(StoreError::ReservedHead);
        }
        if index >= self.heads.len() {
            return Err(StoreError::InvalidHead(index));
        }
        Ok(self.heads.remove(index))
    }

    pub fn delete_item(&mut self, head: usize, index: usize) -> Result<T, StoreError> {
        let target = self
            .heads
            .get_mut(head)
            .ok_or(StoreError::InvalidHead(head))?;
        if index >= target.len() {
            return Err(StoreError::InvalidIndex(index));
        }
        Ok(target.items.remove(index))
    }

    /// Swap heads `index` and `index + 1`
    pub fn swap_adjacent_heads(&mut self, index: usize) -> Result<(), StoreError> {
        if self.is_reserved(index) {
            return Err(StoreError::ReservedHead);
        }
        if index + 1 >= self.heads.len() {
            return Err(StoreError::InvalidHead(index + 1));
        }
        self.heads.swap(index, index + 1);
        Ok(())
    }

    /// Swap items `index` and `index + 1` within one head
    pub fn swap_adjacent_items(&mut self, head: usize, index: usize) -> Result<(), StoreError> {
        let target = self
            .heads
            .get_mut(head)
            .ok_or(StoreError::InvalidHead(head))?;
        if index + 1 >= target.len() {
            return Err(StoreError::InvalidIndex(index + 1));
        }
        target.items.swap(index, index + 1);
        Ok(())
    }

    /// Move one item into another head at `to_index` (clamped).
    /// Nothing changes when the destination is full. Returns the final position.
    pub fn move_item_across_heads(
        &mut self,
        from_head: usize,
        from_index: usize,
        to_head: usize,
        to_index: usize,
    ) -> Result<usize, StoreError> {
        if to_head >= self.heads.len() {
            return Err(StoreError::InvalidHead(to_head));
        }
        if from_head != to_head && !self.head_has_room(to_head) {
            return Err(StoreError::CapacityExceeded);
        }
        let item = self.delete_item(from_head, from_index)?;
        let target = &mut self.heads[to_head];
        let position = to_index.min(target.len());
        target.items.insert(position, item);
        Ok(position)
    }

    /// Every item in display order, mutably
    pub fn items_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.heads.iter_mut().flat_map(|h| h.items.iter_mut())
    }
}

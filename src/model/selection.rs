use super::collection::Collection;
use super::item::ListItem;

/// Which stops the cursor may land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    /// Items only; used while browsing
    Items,
    /// Items plus a stop on every selectable head, just before its first item
    ItemsAndHeads,
}

/// The focused (head, item) pair. `item == None` means the head itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    pub head: usize,
    pub item: Option<usize>,
}

impl Selection {
    pub fn on_head(head: usize) -> Self {
        Selection { head, item: None }
    }

    pub fn on_item(head: usize, item: usize) -> Self {
        Selection {
            head,
            item: Some(item),
        }
    }

    pub fn is_head(&self) -> bool {
        self.item.is_none()
    }

    /// Position in the flattened order; a head stop sorts before its items
    fn order(&self) -> (usize, usize) {
        (self.head, self.item.map_or(0, |i| i + 1))
    }

    /// Whether the selection is a stop under `rule`
    pub fn is_valid<T: ListItem>(&self, collection: &Collection<T>, rule: Traversal) -> bool {
        let Some(head) = collection.head(self.head) else {
            return false;
        };
        match self.item {
            Some(i) => i < head.len(),
            None => rule == Traversal::ItemsAndHeads && !collection.is_reserved(self.head),
        }
    }

    pub fn move_up<T: ListItem>(&mut self, collection: &Collection<T>) {
        self.step(collection, Traversal::Items, false);
    }

    pub fn move_down<T: ListItem>(&mut self, collection: &Collection<T>) {
        self.step(collection, Traversal::Items, true);
    }

    pub fn move_up_including_heads<T: ListItem>(&mut self, collection: &Collection<T>) {
        self.step(collection, Traversal::ItemsAndHeads, false);
    }

    pub fn move_down_including_heads<T: ListItem>(&mut self, collection: &Collection<T>) {
        self.step(collection, Traversal::ItemsAndHeads, true);
    }

    /// Advance one stop in the flattened sequence, wrapping at either end.
    /// From a position that is not a stop, lands on the nearest stop in
    /// the direction of travel.
    fn step<T: ListItem>(&mut self, collection: &Collection<T>, rule: Traversal, forward: bool) {
        let stops = stops(collection, rule);
        let here = self.order();
        let next = if forward {
            stops
                .iter()
                .find(|s| s.order() > here)
                .or_else(|| stops.first())
        } else {
            stops
                .iter()
                .rev()
                .find(|s| s.order() < here)
                .or_else(|| stops.last())
        };
        if let Some(next) = next {
            *self = *next;
        }
    }

    /// Repair a selection left dangling by a mutation. Idempotent.
    pub fn ensure_valid<T: ListItem>(&mut self, collection: &Collection<T>, rule: Traversal) {
        if self.is_valid(collection, rule) {
            return;
        }
        if let Some(head) = collection.heads().iter().position(|h| !h.is_empty()) {
            *self = Selection::on_item(head, 0);
            return;
        }
        let first_named = collection.first_named_head();
        *self = if rule == Traversal::ItemsAndHeads && first_named < collection.head_count() {
            Selection::on_head(first_named)
        } else {
            Selection::default()
        };
    }
}

/// The flattened sequence of stops under `rule`, in display order
pub fn stops<T: ListItem>(collection: &Collection<T>, rule: Traversal) -> Vec<Selection> {
    let mut out = Vec::new();
    for (h, head) in collection.heads().iter().enumerate() {
        if rule == Traversal::ItemsAndHeads && !collection.is_reserved(h) {
            out.push(Selection::on_head(h));
        }
        out.extend((0..head.len()).map(|i| Selection::on_item(h, i)));
    }
    out
}

use crate::model::item::NAME_MAX_LEN;
use crate::model::{Collection, ListItem, Selection, StoreError, Traversal};

/// Interaction mode of a list editor. `Move` is only reachable from `Edit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditMode {
    #[default]
    Normal,
    Edit,
    Move,
}

impl EditMode {
    pub fn is_editing(self) -> bool {
        self != EditMode::Normal
    }
}

/// A key as the list editor understands it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKey {
    Up,
    Down,
    Esc,
    Char(char),
    /// Anything the editor has no binding for
    Other,
}

/// What a handled key did to the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Unchanged,
    Changed,
    Deleted,
}

/// Borrowed snapshot handed to the renderer
#[derive(Debug)]
pub struct EditorView<'a, T> {
    pub collection: &'a Collection<T>,
    pub selection: Selection,
    pub mode: EditMode,
}

impl<T> Clone for EditorView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for EditorView<'_, T> {}

/// The blocking collaborator the editor reads chord keys and text from.
pub trait Interaction<T: ListItem> {
    /// Block until one more key arrives. `None` when input is closed.
    fn next_key(&mut self) -> Option<EditorKey>;

    /// Ask the user for up to `max_len` characters while `view` stays on screen.
    /// Returns `None` when cancelled or left empty.
    fn prompt(&mut self, label: &str, max_len: usize, view: EditorView<'_, T>) -> Option<String>;
}

/// Two-level list editor: owns the collection, the cursor and the mode, and
/// turns keys into store mutations and cursor moves.
#[derive(Debug, Clone)]
pub struct ListEditor<T> {
    collection: Collection<T>,
    selection: Selection,
    mode: EditMode,
}

impl<T: ListItem> ListEditor<T> {
    pub fn new(collection: Collection<T>) -> Self {
        let mut selection = Selection::default();
        selection.ensure_valid(&collection, Traversal::Items);
        ListEditor {
            collection,
            selection,
            mode: EditMode::Normal,
        }
    }

    pub fn collection(&self) -> &Collection<T> {
        &self.collection
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn view(&self) -> EditorView<'_, T> {
        EditorView {
            collection: &self.collection,
            selection: self.selection,
            mode: self.mode,
        }
    }

    /// Swap in a whole new collection (e.g. after loading) and re-seat the cursor
    pub fn replace_collection(&mut self, collection: Collection<T>) {
        self.collection = collection;
        self.mode = EditMode::Normal;
        self.selection.ensure_valid(&self.collection, Traversal::Items);
    }

    /// Apply the once-per-day reset to every item
    pub fn roll_over(&mut self) {
        super::rollover::roll_over(&mut self.collection);
    }

    fn traversal(&self) -> Traversal {
        match self.mode {
            EditMode::Normal => Traversal::Items,
            EditMode::Edit | EditMode::Move => Traversal::ItemsAndHeads,
        }
    }

    fn revalidate(&mut self) {
        let rule = self.traversal();
        self.selection.ensure_valid(&self.collection, rule);
    }

    /// Handle one input event to completion
    pub fn handle_key(&mut self, key: EditorKey, io: &mut dyn Interaction<T>) -> EditOutcome {
        match self.mode {
            EditMode::Normal => self.handle_normal(key, io),
            EditMode::Edit => self.handle_edit(key, io),
            EditMode::Move => self.handle_move(key, io),
        }
    }

    fn handle_normal(&mut self, key: EditorKey, io: &mut dyn Interaction<T>) -> EditOutcome {
        self.selection
            .ensure_valid(&self.collection, Traversal::Items);
        match key {
            EditorKey::Char('e' | 'E') => {
                if read_chord(io, 'i') {
                    self.mode = EditMode::Edit;
                    self.revalidate();
                }
                EditOutcome::Unchanged
            }
            EditorKey::Up => {
                self.selection.move_up(&self.collection);
                EditOutcome::Unchanged
            }
            EditorKey::Down => {
                self.selection.move_down(&self.collection);
                EditOutcome::Unchanged
            }
            EditorKey::Char(' ') => self.toggle_selected(),
            _ => EditOutcome::Unchanged,
        }
    }

    fn handle_edit(&mut self, key: EditorKey, io: &mut dyn Interaction<T>) -> EditOutcome {
        match key {
            EditorKey::Char('e' | 'E') => {
                if read_chord(io, 'i') {
                    self.leave_edit();
                }
                EditOutcome::Unchanged
            }
            EditorKey::Char('r' | 'R') => {
                let outcome = match io.next_key() {
                    Some(EditorKey::Char('u' | 'U')) => self.new_head(io),
                    Some(EditorKey::Char('i' | 'I')) => self.new_item(io),
                    _ => EditOutcome::Unchanged,
                };
                self.revalidate();
                outcome
            }
            EditorKey::Char('s' | 'S') => {
                if self.collection.head_count() > 0 {
                    self.mode = EditMode::Move;
                }
                EditOutcome::Unchanged
            }
            EditorKey::Char(c) if c.eq_ignore_ascii_case(&T::DELETE_KEY) => self.delete_selected(),
            EditorKey::Up => {
                self.selection.move_up_including_heads(&self.collection);
                EditOutcome::Unchanged
            }
            EditorKey::Down => {
                self.selection.move_down_including_heads(&self.collection);
                EditOutcome::Unchanged
            }
            EditorKey::Esc => {
                self.leave_edit();
                EditOutcome::Unchanged
            }
            _ => EditOutcome::Unchanged,
        }
    }

    fn handle_move(&mut self, key: EditorKey, io: &mut dyn Interaction<T>) -> EditOutcome {
        match key {
            EditorKey::Char('s' | 'S') | EditorKey::Esc => {
                self.mode = EditMode::Edit;
                EditOutcome::Unchanged
            }
            // Creating something always drops back to plain Edit first
            EditorKey::Char('r' | 'R') => {
                self.mode = EditMode::Edit;
                self.handle_edit(key, io)
            }
            EditorKey::Up => self.move_selected(false),
            EditorKey::Down => self.move_selected(true),
            _ => EditOutcome::Unchanged,
        }
    }

    fn leave_edit(&mut self) {
        self.mode = EditMode::Normal;
        self.revalidate();
    }

    fn toggle_selected(&mut self) -> EditOutcome {
        let Selection {
            head,
            item: Some(index),
        } = self.selection
        else {
            return EditOutcome::Unchanged;
        };
        match self.collection.item_mut(head, index) {
            Some(item) => {
                item.toggle();
                EditOutcome::Changed
            }
            None => EditOutcome::Unchanged,
        }
    }

    fn new_head(&mut self, io: &mut dyn Interaction<T>) -> EditOutcome {
        if !self.collection.can_add_head() {
            log::debug!("new head ignored: {}", StoreError::CapacityExceeded);
            return EditOutcome::Unchanged;
        }
        let Some(name) = io.prompt("Enter head name: ", NAME_MAX_LEN, self.view()) else {
            return EditOutcome::Unchanged;
        };
        match self.collection.add_head(&name) {
            Ok(head) => {
                self.selection = Selection::on_head(head);
                EditOutcome::Changed
            }
            Err(e) => {
                log::debug!("new head ignored: {}", e);
                EditOutcome::Unchanged
            }
        }
    }

    fn new_item(&mut self, io: &mut dyn Interaction<T>) -> EditOutcome {
        let head = self.selection.head;
        if !self.collection.head_has_room(head) {
            log::debug!("new item ignored: head {} is full or missing", head);
            return EditOutcome::Unchanged;
        }
        let position = self.selection.item.map_or(0, |i| i + 1);
        let Some(text) = io.prompt(T::PROMPT, T::TEXT_LIMIT, self.view()) else {
            return EditOutcome::Unchanged;
        };
        match self.collection.create_item(head, position, text) {
            Ok(index) => {
                self.selection = Selection::on_item(head, index);
                EditOutcome::Changed
            }
            Err(e) => {
                log::debug!("new item ignored: {}", e);
                EditOutcome::Unchanged
            }
        }
    }

    fn delete_selected(&mut self) -> EditOutcome {
        let Selection { head, item } = self.selection;
        match item {
            None => {
                if let Err(e) = self.collection.delete_head(head) {
                    log::debug!("delete ignored: {}", e);
                    return EditOutcome::Unchanged;
                }
                let count = self.collection.head_count();
                self.selection = Selection::on_head(head.min(count.saturating_sub(1)));
            }
            Some(index) => {
                if let Err(e) = self.collection.delete_item(head, index) {
                    log::debug!("delete ignored: {}", e);
                    return EditOutcome::Unchanged;
                }
                let remaining = self.collection.head(head).map_or(0, |h| h.len());
                self.selection.item = match remaining {
                    0 => None,
                    n => Some(index.min(n - 1)),
                };
            }
        }
        self.revalidate();
        EditOutcome::Deleted
    }

    /// Reorder the selection one step. Items cross into the neighbouring head
    /// at a boundary; heads swap as whole blocks.
    fn move_selected(&mut self, down: bool) -> EditOutcome {
        let Selection { head, item } = self.selection;
        let result = match item {
            None => self.move_head(head, down),
            Some(index) => self.move_item(head, index, down),
        };
        match result {
            Ok(Some(selection)) => {
                self.selection = selection;
                EditOutcome::Changed
            }
            Ok(None) => EditOutcome::Unchanged,
            Err(e) => {
                log::debug!("move ignored: {}", e);
                EditOutcome::Unchanged
            }
        }
    }

    fn move_head(&mut self, head: usize, down: bool) -> Result<Option<Selection>, StoreError> {
        if down {
            if head + 1 >= self.collection.head_count() {
                return Ok(None);
            }
            self.collection.swap_adjacent_heads(head)?;
            Ok(Some(Selection::on_head(head + 1)))
        } else {
            if head == 0 {
                return Ok(None);
            }
            self.collection.swap_adjacent_heads(head - 1)?;
            Ok(Some(Selection::on_head(head - 1)))
        }
    }

    /// Crossing into a neighbouring head keeps the selection on the moved
    /// item, not on the head it left, even when that head is now empty.
    /// An up move followed by a down move restores both the order and the selection.
    fn move_item(
        &mut self,
        head: usize,
        index: usize,
        down: bool,
    ) -> Result<Option<Selection>, StoreError> {
        let len = self
            .collection
            .head(head)
            .ok_or(StoreError::InvalidHead(head))?
            .len();
        if down {
            if index + 1 < len {
                self.collection.swap_adjacent_items(head, index)?;
                return Ok(Some(Selection::on_item(head, index + 1)));
            }
            if head + 1 >= self.collection.head_count() {
                return Ok(None);
            }
            let to = self
                .collection
                .move_item_across_heads(head, index, head + 1, 0)?;
            Ok(Some(Selection::on_item(head + 1, to)))
        } else {
            if index > 0 {
                self.collection.swap_adjacent_items(head, index - 1)?;
                return Ok(Some(Selection::on_item(head, index - 1)));
            }
            if head == 0 {
                return Ok(None);
            }
            let to = self
                .collection
                .move_item_across_heads(head, index, head - 1, usize::MAX)?;
            Ok(Some(Selection::on_item(head - 1, to)))
        }
    }
}

/// Read the second key of a two-key chord; anything else cancels it
fn read_chord<T: ListItem>(io: &mut dyn Interaction<T>, second: char) -> bool {
    matches!(io.next_key(), Some(EditorKey::Char(c)) if c.eq_ignore_ascii_case(&second))
}

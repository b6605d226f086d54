use crate::entity::{Note, NoteDraft};
use crate::error::{PinnotesError, Result};

use super::ordering::{self, PinPolicy, Placement};
use super::KeyValueBackend;

/// Storage key holding the whole collection
pub const NOTES_KEY: &str = "notes";

/// The ordered, pinnable notes collection.
///
/// The whole collection is loaded on open and written back in full on
/// every mutation. A mutation only replaces the in-memory collection once
/// the backend write has succeeded, so a failed write leaves the store as
/// it was.
pub struct NotesStore<B: KeyValueBackend> {
    backend: B,
    key: String,
    notes: Vec<Note>,
}

impl<B: KeyValueBackend> NotesStore<B> {
    /// Load the collection stored under [`NOTES_KEY`]
    pub fn open(backend: B) -> Result<Self> {
        Self::open_with_key(backend, NOTES_KEY)
    }

    /// Load the collection stored under `key`
    pub fn open_with_key(backend: B, key: &str) -> Result<Self> {
        let mut notes: Vec<Note> = match backend.read(key)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => Vec::new(),
        };

        if let Some(id) = ordering::find_duplicate_id(&notes) {
            return Err(PinnotesError::DuplicateId(id));
        }
        if notes.iter().any(|n| n.id == 0) {
            return Err(PinnotesError::InvalidArgument(
                "stored note has id 0".to_string(),
            ));
        }

        ordering::sort_canonical(&mut notes);
        tracing::debug!(key, count = notes.len(), "loaded notes");

        Ok(Self {
            backend,
            key: key.to_string(),
            notes,
        })
    }

    /// All notes, pinned first, then by ascending order
    pub fn get_all(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: u64) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Give the backend back, e.g. to reopen a fresh store over it
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Append a fully formed note.
    ///
    /// The caller picks `id` (at least 1), `order` and `pinned`; see [`NotesStore::create`]
    /// for the variant that allocates them.
    pub fn add(&mut self, note: Note) -> Result<()> {
        if note.id == 0 {
            return Err(PinnotesError::InvalidArgument(
                "note id must be at least 1".to_string(),
            ));
        }
        if self.position(note.id).is_some() {
            return Err(PinnotesError::DuplicateId(note.id));
        }

        let id = note.id;
        let mut next = self.notes.clone();
        next.push(note);
        self.commit(next)?;

        tracing::info!(note_id = id, "note added");
        Ok(())
    }

    /// Delete a note without renumbering the rest of its partition
    pub fn remove(&mut self, id: u64) -> Result<Note> {
        let idx = self.position(id).ok_or(PinnotesError::NotFound(id))?;

        let mut next = self.notes.clone();
        let removed = next.remove(idx);
        self.commit(next)?;

        tracing::info!(note_id = id, "note removed");
        Ok(removed)
    }

    /// Replace the note with the same id
    pub fn update(&mut self, note: Note) -> Result<()> {
        let idx = self.position(note.id).ok_or(PinnotesError::NotFound(note.id))?;

        let id = note.id;
        let mut next = self.notes.clone();
        next[idx] = note;
        self.commit(next)?;

        tracing::info!(note_id = id, "note updated");
        Ok(())
    }

    /// Move a note to `arrival` within its own partition.
    ///
    /// Notes at or after `arrival` shift down by one to make room and the
    /// slot the moved note left is closed. `arrival` past the end of the
    /// partition lands on the last slot.
    pub fn reorder_after_drag(&mut self, moved_id: u64, arrival: u32) -> Result<()> {
        let idx = self
            .position(moved_id)
            .ok_or(PinnotesError::NotFound(moved_id))?;

        let pinned = self.notes[idx].pinned;
        let from = self.notes[idx].order;
        let last = ordering::partition_len(&self.notes, pinned).saturating_sub(1) as u32;
        let to = arrival.min(last);

        if from == to {
            tracing::debug!(note_id = moved_id, position = to, "note already in place");
            return Ok(());
        }

        let mut next = self.notes.clone();
        for note in next
            .iter_mut()
            .filter(|n| n.pinned == pinned && n.id != moved_id && n.order > from)
        {
            note.order -= 1;
        }
        ordering::open_gap(&mut next, pinned, to, Some(moved_id))?;
        next[idx].order = to;
        self.commit(next)?;

        tracing::info!(note_id = moved_id, from, to, "note moved");
        Ok(())
    }

    /// Create a new unpinned note from user input.
    ///
    /// The id is `max(id) + 1`; the rank follows `placement`.
    pub fn create(&mut self, draft: NoteDraft, placement: Placement) -> Result<Note> {
        let mut next = self.notes.clone();
        let id = ordering::next_id(&next)?;

        let order = match placement {
            Placement::Append => ordering::next_order(&next, false)?,
            Placement::Prepend => {
                ordering::open_gap(&mut next, false, 0, None)?;
                0
            }
        };

        let mut note = Note::new(id, draft.title, &draft.content, order);
        note.reminder = draft.reminder;

        next.push(note.clone());
        self.commit(next)?;

        tracing::info!(note_id = id, order, %placement, "note created");
        Ok(note)
    }

    /// Remove a note and close the gap it leaves in its partition
    pub fn delete(&mut self, id: u64) -> Result<Note> {
        let idx = self.position(id).ok_or(PinnotesError::NotFound(id))?;

        let mut next = self.notes.clone();
        let removed = next.remove(idx);
        let shifted = ordering::close_gap(&mut next, removed.pinned, removed.order);
        self.commit(next)?;

        tracing::info!(note_id = id, shifted, "note deleted");
        Ok(removed)
    }

    /// Pin an unpinned note or unpin a pinned one
    pub fn toggle_pin(&mut self, id: u64, policy: PinPolicy) -> Result<Note> {
        let idx = self.position(id).ok_or(PinnotesError::NotFound(id))?;

        let mut next = self.notes.clone();
        let was_pinned = next[idx].pinned;

        if policy == PinPolicy::Renumber {
            let vacated = next[idx].order;
            let target_order = ordering::next_order(&next, !was_pinned)?;
            next[idx].order = target_order;
            next[idx].pinned = !was_pinned;
            ordering::close_gap(&mut next, was_pinned, vacated);
        } else {
            next[idx].pinned = !was_pinned;
        }

        let toggled = next[idx].clone();
        self.commit(next)?;

        tracing::info!(note_id = id, pinned = toggled.pinned, %policy, "note pin toggled");
        Ok(toggled)
    }

    /// Rank both partitions `0..k`, keeping the current display order.
    ///
    /// Returns how many notes changed rank; nothing is written if none did.
    pub fn compact(&mut self) -> Result<usize> {
        let mut next = self.notes.clone();
        let changed = ordering::renumber(&mut next);
        if changed > 0 {
            self.commit(next)?;
            tracing::info!(changed, "notes compacted");
        }
        Ok(changed)
    }

    fn position(&self, id: u64) -> Option<usize> {
        self.notes.iter().position(|n| n.id == id)
    }

    fn commit(&mut self, mut next: Vec<Note>) -> Result<()> {
        ordering::sort_canonical(&mut next);
        let raw = serde_json::to_string(&next)?;
        self.backend.write(&self.key, &raw)?;
        self.notes = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::ordering::is_dense;
    use crate::storage::{JsonFileBackend, MemoryBackend, SqliteBackend};
    use tempfile::TempDir;

    /// Delegates to a memory backend but can be told to fail writes
    #[derive(Default)]
    struct FlakyBackend {
        inner: MemoryBackend,
        fail_writes: bool,
    }

    impl KeyValueBackend for FlakyBackend {
        fn read(&self, key: &str) -> Result<Option<String>> {
            self.inner.read(key)
        }

        fn write(&mut self, key: &str, value: &str) -> Result<()> {
            if self.fail_writes {
                return Err(PinnotesError::Persistence("disk full".to_string()));
            }
            self.inner.write(key, value)
        }
    }

    fn empty_store() -> NotesStore<MemoryBackend> {
        NotesStore::open(MemoryBackend::new()).unwrap()
    }

    fn draft(title: &str) -> NoteDraft {
        NoteDraft::new(title, "")
    }

    fn stored(store: &NotesStore<MemoryBackend>) -> Vec<Note> {
        let raw = store.backend().get(NOTES_KEY).unwrap_or("[]");
        serde_json::from_str(raw).unwrap()
    }

    fn assert_dense(store: &NotesStore<impl KeyValueBackend>) {
        assert!(is_dense(store.get_all(), true), "pinned partition has gaps");
        assert!(is_dense(store.get_all(), false), "unpinned partition has gaps");
    }

    #[test]
    fn test_open_empty_backend() {
        let store = empty_store();
        assert!(store.is_empty());
        assert!(store.backend().get(NOTES_KEY).is_none());
    }

    #[test]
    fn test_open_sorts_loaded_notes() {
        let raw = r#"[
            {"id":1,"title":"a","content":"","order":1,"pinned":false},
            {"id":2,"title":"b","content":"","order":0,"pinned":false},
            {"id":3,"title":"c","content":"","order":0,"pinned":true}
        ]"#;
        let store = NotesStore::open(MemoryBackend::new().with_value(NOTES_KEY, raw)).unwrap();
        let ids: Vec<u64> = store.get_all().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_open_rejects_corrupt_value() {
        let backend = MemoryBackend::new().with_value(NOTES_KEY, "{not json");
        assert!(matches!(
            NotesStore::open(backend),
            Err(PinnotesError::Json(_))
        ));
    }

    #[test]
    fn test_open_rejects_duplicate_ids() {
        let raw = r#"[
            {"id":1,"title":"a","content":"","order":0},
            {"id":1,"title":"b","content":"","order":1}
        ]"#;
        let backend = MemoryBackend::new().with_value(NOTES_KEY, raw);
        assert!(matches!(
            NotesStore::open(backend),
            Err(PinnotesError::DuplicateId(1))
        ));
    }

    #[test]
    fn test_open_with_custom_key() {
        let mut store =
            NotesStore::open_with_key(MemoryBackend::new(), "work-notes").unwrap();
        store.create(draft("A"), Placement::Append).unwrap();
        let backend = store.into_backend();
        assert!(backend.get("work-notes").is_some());
        assert!(backend.get(NOTES_KEY).is_none());
    }

    #[test]
    fn test_create_first_note() {
        let mut store = empty_store();
        let note = store
            .create(NoteDraft::new("A", "x"), Placement::Append)
            .unwrap();
        assert_eq!(note.id, 1);
        assert_eq!(note.order, 0);
        assert!(!note.pinned);
        assert_eq!(store.get_all(), &[note]);
    }

    #[test]
    fn test_create_normalizes_content_and_keeps_reminder() {
        let mut store = empty_store();
        let mut d = NoteDraft::new("Shopping", "milk\r\nbread");
        d.reminder = Some(serde_json::json!({"date": "2026-11-01"}));
        let note = store.create(d, Placement::Append).unwrap();
        assert_eq!(note.content, "milk<br>bread");
        assert_eq!(note.reminder.unwrap()["date"], "2026-11-01");
    }

    #[test]
    fn test_create_append_is_partition_scoped() {
        let mut store = empty_store();
        let a = store.create(draft("A"), Placement::Append).unwrap();
        let b = store.create(draft("B"), Placement::Append).unwrap();
        store.toggle_pin(a.id, PinPolicy::Renumber).unwrap();
        store.toggle_pin(b.id, PinPolicy::Renumber).unwrap();

        // Pinned notes hold orders 0 and 1, but the unpinned partition is empty
        let c = store.create(draft("C"), Placement::Append).unwrap();
        assert_eq!(c.id, 3);
        assert_eq!(c.order, 0);
        assert_dense(&store);
    }

    #[test]
    fn test_create_prepend_shifts_unpinned() {
        let mut store = empty_store();
        let a = store.create(draft("A"), Placement::Append).unwrap();
        let b = store.create(draft("B"), Placement::Prepend).unwrap();
        assert_eq!(b.order, 0);
        assert_eq!(store.get(a.id).unwrap().order, 1);
        let ids: Vec<u64> = store.get_all().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![b.id, a.id]);
        assert_dense(&store);
    }

    #[test]
    fn test_ids_are_max_plus_one() {
        let mut store = empty_store();
        store.create(draft("A"), Placement::Append).unwrap();
        store.create(draft("B"), Placement::Append).unwrap();
        store.create(draft("C"), Placement::Append).unwrap();
        store.delete(2).unwrap();
        assert_eq!(store.create(draft("D"), Placement::Append).unwrap().id, 4);
        store.delete(4).unwrap();
        assert_eq!(store.create(draft("E"), Placement::Append).unwrap().id, 4);
    }

    #[test]
    fn test_add_rejects_duplicate_id() {
        let mut store = empty_store();
        store.add(Note::new(1, "A", "", 0)).unwrap();
        let before = store.backend().get(NOTES_KEY).map(str::to_string);

        let err = store.add(Note::new(1, "Other", "", 1)).unwrap_err();
        assert!(matches!(err, PinnotesError::DuplicateId(1)));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().title, "A");
        assert_eq!(store.backend().get(NOTES_KEY).map(str::to_string), before);
    }

    #[test]
    fn test_add_persists_full_collection() {
        let mut store = empty_store();
        store.add(Note::new(1, "A", "", 0)).unwrap();
        store.add(Note::new(2, "B", "", 1)).unwrap();
        assert_eq!(stored(&store).len(), 2);
    }

    #[test]
    fn test_remove_does_not_renumber() {
        let mut store = empty_store();
        store.add(Note::new(1, "A", "", 0)).unwrap();
        store.add(Note::new(2, "B", "", 1)).unwrap();

        let removed = store.remove(1).unwrap();
        assert_eq!(removed.title, "A");
        assert_eq!(store.get(2).unwrap().order, 1);
    }

    #[test]
    fn test_remove_missing_leaves_storage_untouched() {
        let mut store = empty_store();
        store.create(draft("A"), Placement::Append).unwrap();
        let before = stored(&store);

        assert!(matches!(store.remove(42), Err(PinnotesError::NotFound(42))));
        assert_eq!(stored(&store), before);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_update_replaces_record() {
        let mut store = empty_store();
        let mut note = store.create(draft("A"), Placement::Append).unwrap();
        note.title = "Renamed".to_string();
        store.update(note.clone()).unwrap();
        assert_eq!(store.get(note.id).unwrap().title, "Renamed");
        assert_eq!(stored(&store)[0].title, "Renamed");
    }

    #[test]
    fn test_update_missing_signals_not_found() {
        let mut store = empty_store();
        store.create(draft("A"), Placement::Append).unwrap();
        let before = stored(&store);

        let ghost = Note::new(9, "ghost", "", 0);
        assert!(matches!(store.update(ghost), Err(PinnotesError::NotFound(9))));
        assert_eq!(stored(&store), before);
        assert_eq!(store.get_all(), before.as_slice());
    }

    #[test]
    fn test_delete_closes_gap() {
        let mut store = empty_store();
        let a = store.create(draft("A"), Placement::Append).unwrap();
        let b = store.create(draft("B"), Placement::Append).unwrap();
        assert_eq!((a.order, b.order), (0, 1));

        store.delete(a.id).unwrap();
        assert_eq!(store.get(b.id).unwrap().order, 0);
        assert_eq!(stored(&store)[0].order, 0);
    }

    #[test]
    fn test_delete_leaves_other_partition_alone() {
        let mut store = empty_store();
        let a = store.create(draft("A"), Placement::Append).unwrap();
        let b = store.create(draft("B"), Placement::Append).unwrap();
        let c = store.create(draft("C"), Placement::Append).unwrap();
        store.toggle_pin(c.id, PinPolicy::Renumber).unwrap();

        store.delete(a.id).unwrap();
        assert_eq!(store.get(b.id).unwrap().order, 0);
        assert_eq!(store.get(c.id).unwrap().order, 0);
        assert!(store.get(c.id).unwrap().pinned);
        assert_dense(&store);
    }

    #[test]
    fn test_drag_to_current_position_is_noop() {
        let mut store = empty_store();
        let mut pinned = Note::new(1, "P", "", 0);
        pinned.pinned = true;
        store.add(pinned).unwrap();
        store.add(Note::new(2, "U", "", 0)).unwrap();
        let before = stored(&store);

        store.reorder_after_drag(2, 0).unwrap();
        assert_eq!(store.get(1).unwrap().order, 0);
        assert_eq!(store.get(2).unwrap().order, 0);
        assert_eq!(stored(&store), before);
    }

    #[test]
    fn test_drag_down_and_up() {
        let mut store = empty_store();
        for t in ["A", "B", "C", "D"] {
            store.create(draft(t), Placement::Append).unwrap();
        }

        // A to the third slot: B C A D
        store.reorder_after_drag(1, 2).unwrap();
        let titles: Vec<&str> = store.get_all().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A", "D"]);
        assert_dense(&store);

        // D to the top: D B C A
        store.reorder_after_drag(4, 0).unwrap();
        let titles: Vec<&str> = store.get_all().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["D", "B", "C", "A"]);
        assert_dense(&store);
    }

    #[test]
    fn test_drag_past_end_clamps() {
        let mut store = empty_store();
        for t in ["A", "B", "C"] {
            store.create(draft(t), Placement::Append).unwrap();
        }
        store.reorder_after_drag(1, 99).unwrap();
        let titles: Vec<&str> = store.get_all().iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "C", "A"]);
        assert_dense(&store);
    }

    #[test]
    fn test_drag_stays_inside_partition() {
        let mut store = empty_store();
        for t in ["A", "B", "C"] {
            store.create(draft(t), Placement::Append).unwrap();
        }
        store.toggle_pin(3, PinPolicy::Renumber).unwrap();

        store.reorder_after_drag(2, 0).unwrap();
        assert_eq!(store.get(3).unwrap().order, 0);
        assert_eq!(store.get(2).unwrap().order, 0);
        assert_eq!(store.get(1).unwrap().order, 1);
        assert_dense(&store);
    }

    #[test]
    fn test_drag_missing_note() {
        let mut store = empty_store();
        assert!(matches!(
            store.reorder_after_drag(5, 0),
            Err(PinnotesError::NotFound(5))
        ));
    }

    #[test]
    fn test_toggle_pin_renumber_keeps_density() {
        let mut store = empty_store();
        for t in ["A", "B", "C"] {
            store.create(draft(t), Placement::Append).unwrap();
        }

        let b = store.toggle_pin(2, PinPolicy::Renumber).unwrap();
        assert!(b.pinned);
        assert_eq!(b.order, 0);
        assert_eq!(store.get(3).unwrap().order, 1);
        assert_dense(&store);

        let a = store.toggle_pin(1, PinPolicy::Renumber).unwrap();
        assert_eq!(a.order, 1);
        let ids: Vec<u64> = store.get_all().iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_dense(&store);

        let b = store.toggle_pin(2, PinPolicy::Renumber).unwrap();
        assert!(!b.pinned);
        assert_eq!(b.order, 1);
        assert_eq!(store.get(1).unwrap().order, 0);
        assert_dense(&store);
    }

    #[test]
    fn test_toggle_pin_flip_allows_gap_until_compact() {
        let mut store = empty_store();
        for t in ["A", "B", "C"] {
            store.create(draft(t), Placement::Append).unwrap();
        }

        let b = store.toggle_pin(2, PinPolicy::Flip).unwrap();
        assert!(b.pinned);
        assert_eq!(b.order, 1);
        assert!(!is_dense(store.get_all(), true));
        assert!(!is_dense(store.get_all(), false));

        let changed = store.compact().unwrap();
        assert_eq!(changed, 2);
        assert_eq!(store.get(2).unwrap().order, 0);
        assert_eq!(store.get(3).unwrap().order, 1);
        assert_dense(&store);
    }

    #[test]
    fn test_compact_on_dense_collection_writes_nothing() {
        let mut store = empty_store();
        assert_eq!(store.compact().unwrap(), 0);
        assert!(store.backend().get(NOTES_KEY).is_none());
    }

    #[test]
    fn test_mixed_sequence_stays_dense() {
        let mut store = empty_store();
        for i in 0..8 {
            let placement = if i % 3 == 0 {
                Placement::Prepend
            } else {
                Placement::Append
            };
            store.create(draft(&format!("n{}", i)), placement).unwrap();
        }
        store.toggle_pin(3, PinPolicy::Renumber).unwrap();
        store.toggle_pin(6, PinPolicy::Renumber).unwrap();
        store.delete(1).unwrap();
        store.reorder_after_drag(5, 0).unwrap();
        store.reorder_after_drag(6, 0).unwrap();
        store.delete(3).unwrap();
        store.toggle_pin(6, PinPolicy::Renumber).unwrap();
        store.reorder_after_drag(8, 3).unwrap();
        assert_dense(&store);

        let all = store.get_all();
        let first_unpinned = all.iter().position(|n| !n.pinned).unwrap_or(all.len());
        assert!(all[first_unpinned..].iter().all(|n| !n.pinned));
        assert!(all.windows(2).all(|w| ordering::canonical_cmp(&w[0], &w[1]).is_lt()));
    }

    #[test]
    fn test_failed_write_leaves_state_unchanged() {
        let mut store = NotesStore::open(FlakyBackend::default()).unwrap();
        store.create(draft("A"), Placement::Append).unwrap();
        store.create(draft("B"), Placement::Append).unwrap();
        let snapshot = store.get_all().to_vec();

        let mut backend = store.into_backend();
        backend.fail_writes = true;
        let mut store = NotesStore::open(backend).unwrap();

        assert!(matches!(
            store.create(draft("C"), Placement::Prepend),
            Err(PinnotesError::Persistence(_))
        ));
        assert!(store.delete(1).is_err());
        assert!(store.reorder_after_drag(2, 0).is_err());
        assert!(store.toggle_pin(1, PinPolicy::Renumber).is_err());
        assert_eq!(store.get_all(), snapshot.as_slice());

        assert!(matches!(
            store.add(Note::new(9, "C", "", 2)),
            Err(PinnotesError::Persistence(_))
        ));
        assert_eq!(store.get_all(), snapshot.as_slice());

        assert!(matches!(store.remove(1), Err(PinnotesError::Persistence(_))));
        assert_eq!(store.get_all(), snapshot.as_slice());

        let mut renamed = snapshot[1].clone();
        renamed.title = "Renamed".to_string();
        assert!(matches!(
            store.update(renamed),
            Err(PinnotesError::Persistence(_))
        ));
        assert_eq!(store.get_all(), snapshot.as_slice());
        assert!(store.get(9).is_none());
    }

    fn saturated_store() -> NotesStore<MemoryBackend> {
        let raw = r#"[{"id":1,"title":"a","content":"","order":4294967295}]"#;
        NotesStore::open(MemoryBackend::new().with_value(NOTES_KEY, raw)).unwrap()
    }

    #[test]
    fn test_create_after_max_order_errors() {
        let mut store = saturated_store();
        let before = stored(&store);

        for placement in [Placement::Append, Placement::Prepend] {
            assert!(matches!(
                store.create(draft("b"), placement),
                Err(PinnotesError::Persistence(_))
            ));
        }
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().order, u32::MAX);
        assert_eq!(stored(&store), before);
    }

    #[test]
    fn test_toggle_pin_into_saturated_partition_errors() {
        let mut store = saturated_store();
        let mut pinned = Note::new(2, "p", "", 0);
        pinned.pinned = true;
        store.add(pinned).unwrap();
        let before = stored(&store);

        assert!(matches!(
            store.toggle_pin(2, PinPolicy::Renumber),
            Err(PinnotesError::Persistence(_))
        ));
        assert!(store.get(2).unwrap().pinned);
        assert_eq!(stored(&store), before);

        // The other direction still has room
        let a = store.toggle_pin(1, PinPolicy::Renumber).unwrap();
        assert!(a.pinned);
        assert_eq!(a.order, 1);
    }

    #[test]
    fn test_create_after_max_id_errors() {
        let raw = r#"[{"id":18446744073709551615,"title":"a","content":"","order":0}]"#;
        let mut store = NotesStore::open(MemoryBackend::new().with_value(NOTES_KEY, raw)).unwrap();
        assert!(matches!(
            store.create(draft("b"), Placement::Append),
            Err(PinnotesError::Persistence(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_add_rejects_id_zero() {
        let mut store = empty_store();
        assert!(matches!(
            store.add(Note::new(0, "A", "", 0)),
            Err(PinnotesError::InvalidArgument(_))
        ));
        assert!(store.is_empty());
        assert!(store.backend().get(NOTES_KEY).is_none());
    }

    #[test]
    fn test_open_rejects_id_zero() {
        let raw = r#"[{"id":0,"title":"a","content":"","order":0}]"#;
        let backend = MemoryBackend::new().with_value(NOTES_KEY, raw);
        assert!(matches!(
            NotesStore::open(backend),
            Err(PinnotesError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_reopen_round_trip_memory() {
        let mut store = empty_store();
        store.create(NoteDraft::new("A", "one\ntwo"), Placement::Append).unwrap();
        store.create(draft("B"), Placement::Append).unwrap();
        store.toggle_pin(2, PinPolicy::Renumber).unwrap();
        let expected = store.get_all().to_vec();

        let reopened = NotesStore::open(store.into_backend()).unwrap();
        assert_eq!(reopened.get_all(), expected.as_slice());
    }

    #[test]
    fn test_reopen_round_trip_file_backend() {
        let tmp = TempDir::new().unwrap();
        let expected = {
            let mut store = NotesStore::open(JsonFileBackend::open(tmp.path()).unwrap()).unwrap();
            store.create(draft("A"), Placement::Append).unwrap();
            store.create(draft("B"), Placement::Append).unwrap();
            store.reorder_after_drag(2, 0).unwrap();
            store.get_all().to_vec()
        };

        let store = NotesStore::open(JsonFileBackend::open(tmp.path()).unwrap()).unwrap();
        assert_eq!(store.get_all(), expected.as_slice());
    }

    #[test]
    fn test_reopen_round_trip_sqlite_backend() {
        let tmp = TempDir::new().unwrap();
        let expected = {
            let mut store = NotesStore::open(SqliteBackend::open(tmp.path()).unwrap()).unwrap();
            store.create(draft("A"), Placement::Append).unwrap();
            store.create(draft("B"), Placement::Append).unwrap();
            store.delete(1).unwrap();
            store.get_all().to_vec()
        };

        let store = NotesStore::open(SqliteBackend::open(tmp.path()).unwrap()).unwrap();
        assert_eq!(store.get_all(), expected.as_slice());
        assert_eq!(store.get_all()[0].order, 0);
    }
}

// crates/snapask-types/src/composer.rs
// Pending attachment list kept in step with its rendered previews
//
// The list and the surface are two parallel representations of the same
// sequence: the i-th preview entry always shows the i-th attachment. All
// operations run to completion on the UI thread, so no locking is involved.

use crate::attachment::{Attachment, DisplayInfo};

/// The UI layer that displays preview entries
pub trait RenderingSurface {
    /// Handle to one rendered entry, compared by identity
    type Entry: Clone + PartialEq;

    /// Render a new entry after all existing ones, with a removal control.
    /// `None` when nothing could be rendered.
    fn create_entry(&mut self, info: &DisplayInfo) -> Option<Self::Entry>;

    fn remove_entry(&mut self, entry: &Self::Entry);

    /// Live entries in display order
    fn entries(&self) -> Vec<Self::Entry>;

    fn clear(&mut self) {
        for entry in self.entries() {
            self.remove_entry(&entry);
        }
    }
}

/// The native file picker whose transient selection must be reset,
/// otherwise picking the same files again raises no new event
pub trait FilePicker {
    fn reset_selection(&mut self);
}

/// Outcome of a removal request
#[derive(Debug, Clone, PartialEq)]
pub enum Removal<P> {
    /// Attachment and preview both removed
    Removed(Attachment<P>),
    /// Preview removed, but the position had no attachment behind it
    Skewed { position: usize },
    /// The entry is not rendered (anymore); nothing changed
    NotRendered,
}

impl<P> Removal<P> {
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed(_))
    }
}

/// Ordered pending attachments plus the surface that renders them
pub struct AttachmentList<P, S, F> {
    items: Vec<Attachment<P>>,
    surface: S,
    picker: F,
}

impl<P, S, F> AttachmentList<P, S, F>
where
    S: RenderingSurface,
    F: FilePicker,
{
    pub fn new(surface: S, picker: F) -> Self {
        Self {
            items: Vec::new(),
            surface,
            picker,
        }
    }

    /// Append one file-selection batch, dropping duplicates of `(name, size)`.
    /// Returns how many candidates were accepted.
    pub fn add_selection(&mut self, candidates: impl IntoIterator<Item = Attachment<P>>) -> usize {
        let mut accepted = 0;
        for candidate in candidates {
            if self.items.iter().any(|a| a.same_file(&candidate)) {
                log::debug!(
                    "Skipping duplicate attachment {} ({} bytes)",
                    candidate.name,
                    candidate.size
                );
                continue;
            }
            if self.surface.create_entry(&candidate.display_info()).is_none() {
                log::warn!("No preview rendered for {}; not attaching it", candidate.name);
                continue;
            }
            self.items.push(candidate);
            accepted += 1;
        }

        // Always, including for an empty (cancelled) batch
        self.picker.reset_selection();

        if accepted > 0 {
            log::debug!("Added {} attachment(s), {} pending", accepted, self.items.len());
        }
        accepted
    }

    /// Remove by position among the currently rendered entries
    pub fn remove_at(&mut self, position: usize) -> Removal<P> {
        match self.surface.entries().get(position).cloned() {
            Some(entry) => self.remove_resolved(entry, position),
            None => {
                log::warn!(
                    "Remove requested at position {} but only {} preview(s) are rendered",
                    position,
                    self.surface.entries().len()
                );
                Removal::NotRendered
            }
        }
    }

    /// Remove the clicked entry. Its position is looked up among the live
    /// entries now; earlier removals shift it.
    pub fn remove_entry(&mut self, entry: &S::Entry) -> Removal<P> {
        match self.surface.entries().iter().position(|e| e == entry) {
            Some(position) => self.remove_resolved(entry.clone(), position),
            None => {
                log::warn!("Remove requested for a preview entry that is no longer rendered");
                Removal::NotRendered
            }
        }
    }

    fn remove_resolved(&mut self, entry: S::Entry, position: usize) -> Removal<P> {
        // The preview goes even when the list side cannot be resolved
        self.surface.remove_entry(&entry);

        let outcome = if position < self.items.len() {
            let removed = self.items.remove(position);
            log::debug!("Removed attachment {} at position {}", removed.name, position);
            Removal::Removed(removed)
        } else {
            log::warn!(
                "Preview position {} has no matching attachment ({} pending); list left unchanged",
                position,
                self.items.len()
            );
            Removal::Skewed { position }
        };

        if self.items.is_empty() {
            self.picker.reset_selection();
        }
        outcome
    }

    /// Drop everything: attachments, previews and the picker's selection
    pub fn reset(&mut self) {
        self.items.clear();
        self.surface.clear();
        self.picker.reset_selection();
    }

    pub fn attachments(&self) -> &[Attachment<P>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Rendered entry count matches the list length
    pub fn is_consistent(&self) -> bool {
        self.surface.entries().len() == self.items.len()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn picker(&self) -> &F {
        &self.picker
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Surface that records entries as (id, info) pairs
    #[derive(Default)]
    struct FakeSurface {
        next_id: u32,
        entries: Vec<(u32, DisplayInfo)>,
        /// Names the surface fails to render
        unrenderable: Vec<String>,
    }

    impl RenderingSurface for FakeSurface {
        type Entry = u32;

        fn create_entry(&mut self, info: &DisplayInfo) -> Option<u32> {
            if self.unrenderable.contains(&info.full_name) {
                return None;
            }
            self.next_id += 1;
            self.entries.push((self.next_id, info.clone()));
            Some(self.next_id)
        }

        fn remove_entry(&mut self, entry: &u32) {
            self.entries.retain(|(id, _)| id != entry);
        }

        fn entries(&self) -> Vec<u32> {
            self.entries.iter().map(|(id, _)| *id).collect()
        }
    }

    #[derive(Default)]
    struct FakePicker {
        resets: usize,
    }

    impl FilePicker for FakePicker {
        fn reset_selection(&mut self) {
            self.resets += 1;
        }
    }

    type TestList = AttachmentList<(), FakeSurface, FakePicker>;

    fn file(name: &str, size: u64) -> Attachment<()> {
        Attachment::new(name, size, "image/png", ())
    }

    fn names(list: &TestList) -> Vec<String> {
        list.attachments().iter().map(|a| a.name.clone()).collect()
    }

    fn rendered_names(list: &TestList) -> Vec<String> {
        list.surface().entries.iter().map(|(_, i)| i.full_name.clone()).collect()
    }

    fn list_xyz() -> TestList {
        let mut list = TestList::new(FakeSurface::default(), FakePicker::default());
        list.add_selection(vec![file("x.png", 100), file("y.png", 200), file("z.png", 300)]);
        list
    }

    // ============================================================================
    // add_selection tests
    // ============================================================================

    #[test]
    fn test_add_renders_in_order() {
        let list = list_xyz();
        assert_eq!(names(&list), vec!["x.png", "y.png", "z.png"]);
        assert_eq!(rendered_names(&list), names(&list));
        assert!(list.is_consistent());
    }

    #[test]
    fn test_add_skips_duplicates_against_existing() {
        let mut list = list_xyz();
        let accepted = list.add_selection(vec![file("y.png", 200), file("w.png", 50)]);
        assert_eq!(accepted, 1);
        assert_eq!(names(&list), vec!["x.png", "y.png", "z.png", "w.png"]);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_add_skips_duplicates_within_batch() {
        let mut list = TestList::new(FakeSurface::default(), FakePicker::default());
        let accepted = list.add_selection(vec![file("a.txt", 10), file("a.txt", 10)]);
        assert_eq!(accepted, 1);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_same_name_different_size_is_distinct() {
        let mut list = TestList::new(FakeSurface::default(), FakePicker::default());
        list.add_selection(vec![file("a.txt", 10), file("a.txt", 11)]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_empty_batch_is_noop_but_resets_picker() {
        let mut list = list_xyz();
        let resets_before = list.picker().resets;
        let accepted = list.add_selection(Vec::new());
        assert_eq!(accepted, 0);
        assert_eq!(list.len(), 3);
        assert_eq!(list.surface().entries.len(), 3);
        assert_eq!(list.picker().resets, resets_before + 1);
    }

    #[test]
    fn test_add_resets_picker_every_time() {
        let mut list = TestList::new(FakeSurface::default(), FakePicker::default());
        list.add_selection(vec![file("a", 1)]);
        list.add_selection(vec![file("a", 1)]);
        assert_eq!(list.picker().resets, 2);
    }

    #[test]
    fn test_unrendered_candidate_is_not_attached() {
        let surface = FakeSurface {
            unrenderable: vec!["broken.png".to_string()],
            ..FakeSurface::default()
        };
        let mut list = TestList::new(surface, FakePicker::default());
        let accepted = list.add_selection(vec![
            file("x.png", 100),
            file("broken.png", 7),
            file("z.png", 300),
        ]);
        assert_eq!(accepted, 2);
        assert_eq!(names(&list), vec!["x.png", "z.png"]);
        assert!(list.is_consistent());

        // Positions still line up, so the click on z.png removes z.png
        let last = list.surface().entries()[1];
        let removal = list.remove_entry(&last);
        assert!(matches!(removal, Removal::Removed(ref a) if a.name == "z.png"));
        assert_eq!(names(&list), vec!["x.png"]);
    }

    #[test]
    fn test_preview_shows_formatted_info() {
        let mut list = TestList::new(FakeSurface::default(), FakePicker::default());
        list.add_selection(vec![Attachment::new("report.pdf", 3 * 1024 * 1024, "application/pdf", ())]);
        let info = &list.surface().entries[0].1;
        assert_eq!(info.size_text, "3.00 MB");
        assert_eq!(info.icon, crate::IconCategory::Pdf);
    }

    // ============================================================================
    // remove tests
    // ============================================================================

    #[test]
    fn test_remove_middle() {
        let mut list = list_xyz();
        let removal = list.remove_at(1);
        assert!(matches!(removal, Removal::Removed(ref a) if a.name == "y.png"));
        assert_eq!(names(&list), vec!["x.png", "z.png"]);
        assert_eq!(rendered_names(&list), vec!["x.png", "z.png"]);
    }

    #[test]
    fn test_remove_entry_recomputes_position() {
        let mut list = list_xyz();
        let entries = list.surface().entries();
        let (first, last) = (entries[0], entries[2]);

        // Removing the first shifts z.png from position 2 to 1
        assert!(list.remove_entry(&first).is_removed());
        let removal = list.remove_entry(&last);
        assert!(matches!(removal, Removal::Removed(ref a) if a.name == "z.png"));
        assert_eq!(names(&list), vec!["y.png"]);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_remove_stale_entry_is_not_rendered() {
        let mut list = list_xyz();
        let entry = list.surface().entries()[0];
        list.remove_entry(&entry);
        assert_eq!(list.remove_entry(&entry), Removal::NotRendered);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_at_out_of_range() {
        let mut list = list_xyz();
        assert_eq!(list.remove_at(7), Removal::NotRendered);
        assert_eq!(list.len(), 3);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_remove_last_resets_picker() {
        let mut list = TestList::new(FakeSurface::default(), FakePicker::default());
        list.add_selection(vec![file("only.png", 5)]);
        let resets = list.picker().resets;
        list.remove_at(0);
        assert!(list.is_empty());
        assert_eq!(list.picker().resets, resets + 1);
    }

    #[test]
    fn test_remove_not_last_keeps_picker() {
        let mut list = list_xyz();
        let resets = list.picker().resets;
        list.remove_at(0);
        assert_eq!(list.picker().resets, resets);
    }

    #[test]
    fn test_skewed_removal_keeps_list() {
        let mut list = list_xyz();
        // A preview the list knows nothing about
        list.surface.create_entry(&file("ghost.png", 1).display_info());

        let removal = list.remove_at(3);
        assert_eq!(removal, Removal::Skewed { position: 3 });
        assert_eq!(list.len(), 3);
        assert_eq!(list.surface().entries.len(), 3);
        assert!(list.is_consistent());
    }

    #[test]
    fn test_skewed_removal_drops_one_orphan_at_a_time() {
        let mut list = list_xyz();
        list.surface.create_entry(&file("ghost-1.png", 1).display_info());
        list.surface.create_entry(&file("ghost-2.png", 2).display_info());
        assert!(!list.is_consistent());

        // Two orphan previews: one skewed removal still leaves one behind
        assert_eq!(list.remove_at(4), Removal::Skewed { position: 4 });
        assert_eq!(list.len(), 3);
        assert_eq!(list.surface().entries.len(), 4);
        assert!(!list.is_consistent());

        assert_eq!(list.remove_at(3), Removal::Skewed { position: 3 });
        assert_eq!(names(&list), vec!["x.png", "y.png", "z.png"]);
        assert_eq!(rendered_names(&list), names(&list));
        assert!(list.is_consistent());
    }

    #[test]
    fn test_skew_reported_by_consistency_check() {
        let mut list = list_xyz();
        // Preview vanished behind the manager's back
        let entry = list.surface().entries()[2];
        list.surface.remove_entry(&entry);
        assert!(!list.is_consistent());

        list.reset();
        assert!(list.is_consistent());
    }

    // ============================================================================
    // reset tests
    // ============================================================================

    #[test]
    fn test_reset_clears_everything() {
        let mut list = list_xyz();
        let resets = list.picker().resets;
        list.reset();
        assert!(list.is_empty());
        assert!(list.surface().entries.is_empty());
        assert_eq!(list.picker().resets, resets + 1);
    }

    #[test]
    fn test_refill_after_reset() {
        let mut list = list_xyz();
        list.reset();
        assert_eq!(list.add_selection(vec![file("x.png", 100)]), 1);
        assert_eq!(rendered_names(&list), vec!["x.png"]);
    }
}

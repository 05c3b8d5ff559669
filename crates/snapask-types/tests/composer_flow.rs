// crates/snapask-types/tests/composer_flow.rs
// Composer scenarios driven through a recording surface

use std::cell::RefCell;
use std::rc::Rc;

use snapask_types::{
    Attachment, AttachmentList, ChatSubmission, ChatTurn, DisplayInfo, FilePicker, Removal,
    RenderingSurface, TransportError, parse_chat_response,
};

/// Rendered previews, shared so the test can inspect them from outside
#[derive(Clone, Default)]
struct PreviewLog {
    next: Rc<RefCell<u64>>,
    rendered: Rc<RefCell<Vec<(u64, DisplayInfo)>>>,
}

impl PreviewLog {
    fn sizes(&self) -> Vec<String> {
        self.rendered.borrow().iter().map(|(_, i)| i.size_text.clone()).collect()
    }

    fn titles(&self) -> Vec<String> {
        self.rendered.borrow().iter().map(|(_, i)| i.full_name.clone()).collect()
    }

    fn len(&self) -> usize {
        self.rendered.borrow().len()
    }
}

impl RenderingSurface for PreviewLog {
    type Entry = u64;

    fn create_entry(&mut self, info: &DisplayInfo) -> Option<u64> {
        let mut next = self.next.borrow_mut();
        *next += 1;
        self.rendered.borrow_mut().push((*next, info.clone()));
        Some(*next)
    }

    fn remove_entry(&mut self, entry: &u64) {
        self.rendered.borrow_mut().retain(|(id, _)| id != entry);
    }

    fn entries(&self) -> Vec<u64> {
        self.rendered.borrow().iter().map(|(id, _)| *id).collect()
    }
}

/// Models an `<input type=file>`: a change event only fires when the new
/// selection differs from what the input still holds
#[derive(Clone, Default)]
struct Picker {
    held: Rc<RefCell<Vec<String>>>,
}

impl Picker {
    /// Returns the batch if the browser would raise a change event
    fn choose(&self, files: &[(&str, u64)]) -> Option<Vec<Attachment<()>>> {
        let names: Vec<String> = files.iter().map(|(n, _)| n.to_string()).collect();
        if *self.held.borrow() == names {
            return None;
        }
        *self.held.borrow_mut() = names;
        Some(
            files
                .iter()
                .map(|(name, size)| Attachment::new(*name, *size, "text/plain", ()))
                .collect(),
        )
    }
}

impl FilePicker for Picker {
    fn reset_selection(&mut self) {
        self.held.borrow_mut().clear();
    }
}

fn setup() -> (AttachmentList<(), PreviewLog, Picker>, PreviewLog, Picker) {
    let log = PreviewLog::default();
    let picker = Picker::default();
    let list = AttachmentList::new(log.clone(), picker.clone());
    (list, log, picker)
}

#[test]
fn test_select_reselect_remove_scenario() {
    let (mut list, log, picker) = setup();

    let batch = picker.choose(&[("a.txt", 500), ("b.txt", 1500)]).expect("change event");
    list.add_selection(batch);
    assert_eq!(list.len(), 2);
    assert_eq!(log.sizes(), vec!["500 B", "1.46 KB"]);

    // Same files again: the input was reset, so the event fires, and both are duplicates
    let batch = picker.choose(&[("a.txt", 500), ("b.txt", 1500)]).expect("change event");
    assert_eq!(list.add_selection(batch), 0);
    assert_eq!(list.len(), 2);
    assert_eq!(log.len(), 2);

    let first = log.entries()[0];
    assert!(list.remove_entry(&first).is_removed());
    assert_eq!(list.len(), 1);
    assert_eq!(list.attachments()[0].size, 1500);
    assert_eq!(log.titles(), vec!["b.txt"]);
}

#[test]
fn test_preview_count_tracks_list_after_every_call() {
    let (mut list, log, _picker) = setup();
    let batches: Vec<Vec<(&str, u64)>> = vec![
        vec![("a", 1), ("b", 2)],
        vec![],
        vec![("b", 2), ("c", 3), ("c", 3)],
        vec![("a", 1)],
        vec![("d", 4)],
    ];
    for batch in batches {
        list.add_selection(batch.into_iter().map(|(n, s)| Attachment::new(n, s, "", ())));
        assert_eq!(log.len(), list.len());
        assert!(list.is_consistent());
    }
    assert_eq!(log.titles(), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_removing_last_lets_same_file_be_picked_again() {
    let (mut list, log, picker) = setup();
    let batch = picker.choose(&[("only.png", 42)]).expect("change event");
    list.add_selection(batch);

    assert!(matches!(list.remove_at(0), Removal::Removed(_)));
    assert!(list.is_empty());
    assert!(picker.held.borrow().is_empty());

    let again = picker.choose(&[("only.png", 42)]).expect("fresh change event");
    assert_eq!(list.add_selection(again), 1);
    assert_eq!(log.len(), 1);
}

#[test]
fn test_burst_removal_by_clicked_entries() {
    let (mut list, log, _picker) = setup();
    list.add_selection(
        ["x.png", "y.png", "z.png", "w.png"]
            .iter()
            .enumerate()
            .map(|(i, n)| Attachment::new(*n, (i as u64 + 1) * 100, "image/png", ())),
    );

    // Handles captured at creation, clicked back to back
    let handles = log.entries();
    list.remove_entry(&handles[1]);
    list.remove_entry(&handles[3]);
    list.remove_entry(&handles[0]);

    let left: Vec<&str> = list.attachments().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(left, vec!["z.png"]);
    assert_eq!(log.titles(), vec!["z.png"]);
}

#[test]
fn test_failed_submit_keeps_state_then_success_resets() {
    let (mut list, log, _picker) = setup();
    list.add_selection(vec![Attachment::new("notes.md", 900, "text/markdown", ())]);

    let submission = ChatSubmission {
        request_id: "req-42".to_string(),
        prompt: "summarise".to_string(),
        history: vec![ChatTurn::user("earlier")],
        pasted_images: Vec::new(),
        model_id: "gpt-4o".to_string(),
        provider: "openai".to_string(),
        streaming: false,
    };
    assert!(!submission.is_empty(list.len()));

    let failure = parse_chat_response(500, r#"{"error":"boom"}"#).unwrap_err();
    assert!(matches!(failure, TransportError::Server { status: 500, .. }));
    // Caller leaves the composer alone on failure
    assert_eq!(list.len(), 1);

    let accepted = parse_chat_response(202, r#"{"status":"processing","request_id":"req-42"}"#).unwrap();
    assert_eq!(accepted.request_id.as_deref(), Some("req-42"));
    list.reset();
    assert!(list.is_empty());
    assert_eq!(log.len(), 0);
}

//! Pending candidate files, deduplicated by name.

use tracing::debug;

use crate::models::CandidateFile;

#[derive(Debug, Default)]
pub struct InputQueue {
    files: Vec<CandidateFile>,
}

impl InputQueue {
    /// Appends every file with an accepted extension whose name is not already queued.
    /// Unsupported files are dropped silently, before the duplicate check.
    /// Returns how many files were accepted.
    pub fn add(&mut self, files: impl IntoIterator<Item = CandidateFile>) -> usize {
        let mut accepted = 0;
        for file in files {
            if !file.has_accepted_extension() {
                debug!("Skipping unsupported file {}", file.name);
                continue;
            }
            if self.contains(&file.name) {
                debug!("Skipping duplicate file {}", file.name);
                continue;
            }
            self.files.push(file);
            accepted += 1;
        }
        accepted
    }

    pub fn remove(&mut self, name: &str) -> Option<CandidateFile> {
        let index = self.files.iter().position(|f| f.name == name)?;
        Some(self.files.remove(index))
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn list(&self) -> &[CandidateFile] {
        &self.files
    }

    pub fn contains(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> CandidateFile {
        CandidateFile::from_bytes(name, name.as_bytes().to_vec())
    }

    fn names(queue: &InputQueue) -> Vec<&str> {
        queue.list().iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_add_keeps_input_order() {
        let mut queue = InputQueue::default();
        queue.add([file("b.pdf"), file("a.docx")]);
        queue.add([file("c.doc")]);
        assert_eq!(names(&queue), vec!["b.pdf", "a.docx", "c.doc"]);
    }

    #[test]
    fn test_duplicate_name_is_noop() {
        let mut queue = InputQueue::default();
        assert_eq!(queue.add([file("jane.pdf")]), 1);
        assert_eq!(queue.add([file("jane.pdf")]), 0);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_duplicates_within_one_batch_are_dropped() {
        let mut queue = InputQueue::default();
        assert_eq!(queue.add([file("jane.pdf"), file("jane.pdf")]), 1);
        assert_eq!(names(&queue), vec!["jane.pdf"]);
    }

    #[test]
    fn test_name_identity_is_case_sensitive() {
        let mut queue = InputQueue::default();
        queue.add([file("Jane.pdf"), file("jane.pdf")]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_unsupported_extension_never_enters() {
        let mut queue = InputQueue::default();
        assert_eq!(queue.add([file("notes.txt"), file("photo.png")]), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_remove_drops_exactly_one() {
        let mut queue = InputQueue::default();
        queue.add([file("a.pdf"), file("b.pdf"), file("c.pdf")]);
        let removed = queue.remove("b.pdf").unwrap();
        assert_eq!(removed.name, "b.pdf");
        assert_eq!(queue.len(), 2);
        assert!(!names(&queue).contains(&"b.pdf"));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut queue = InputQueue::default();
        queue.add([file("a.pdf")]);
        assert!(queue.remove("z.pdf").is_none());
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_clear_empties_queue() {
        let mut queue = InputQueue::default();
        queue.add([file("a.pdf"), file("b.pdf")]);
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.list().is_empty());
    }
}

use std::sync::Mutex;

use crate::types::Notice;

pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Collects notices raised while handling one interaction.
#[derive(Debug, Default)]
pub struct NoticeBuffer {
    notices: Mutex<Vec<Notice>>,
}

impl NoticeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.notices.lock().map(|n| n.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn take(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut notices) => std::mem::take(&mut *notices),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl NoticeSink for NoticeBuffer {
    fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut notices) => notices.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_buffer() {
        let buffer = NoticeBuffer::new();
        assert!(buffer.is_empty());
        buffer.notify(Notice::error("Failed to fetch news"));
        buffer.notify(Notice::warning("Select at least one category"));
        assert_eq!(buffer.len(), 2);

        let notices = buffer.take();
        assert_eq!(notices[0], Notice::error("Failed to fetch news"));
        assert!(buffer.is_empty());
    }
}

use std::collections::VecDeque;

use parking_lot::Mutex;

/// An append-only queue of opaque application messages destined for EE2,
/// drained in full at the next fork-choice boundary.
///
/// Append and drain share a single lock, so a drain always sees a
/// consistent snapshot of everything appended before it started - no
/// message can be appended mid-drain and silently skipped or duplicated.
#[derive(Debug, Default)]
pub struct MsgBuf {
    queue: Mutex<VecDeque<Vec<u8>>>,
}

impl MsgBuf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, msg: Vec<u8>) {
        self.queue.lock().push_back(msg);
    }

    /// Removes and returns every message currently buffered, in append
    /// order. The buffer is empty afterwards.
    pub fn drain(&self) -> Vec<Vec<u8>> {
        self.queue.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_returns_messages_in_append_order() {
        let buf = MsgBuf::new();
        buf.append(vec![1]);
        buf.append(vec![2]);
        buf.append(vec![3]);
        assert_eq!(buf.drain(), vec![vec![1], vec![2], vec![3]]);
    }

    #[test]
    fn drain_empties_the_buffer() {
        let buf = MsgBuf::new();
        buf.append(vec![1]);
        buf.drain();
        assert!(buf.is_empty());
        assert!(buf.drain().is_empty());
    }
}

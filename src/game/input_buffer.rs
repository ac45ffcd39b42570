//! Lock-free key event buffer
//!
//! Key callbacks push events through a bounded crossbeam channel; the game
//! loop drains everything pending at the start of each tick, so the key state
//! never changes in the middle of a step.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::game::input::KeyEvent;

/// Bounded buffer between key callbacks and the game loop
pub struct InputBuffer {
    sender: Sender<KeyEvent>,
    receiver: Receiver<KeyEvent>,
    capacity: usize,
}

impl InputBuffer {
    /// Create a new input buffer with given capacity
    ///
    /// Capacity only needs to cover the key events that can pile up between
    /// two ticks.
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Create a new sender handle for a key event source
    pub fn sender(&self) -> InputSender {
        InputSender {
            sender: self.sender.clone(),
        }
    }

    /// Drain all pending events, oldest first
    pub fn drain(&self) -> Vec<KeyEvent> {
        self.receiver.try_iter().collect()
    }

    #[inline]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new(256)
    }
}

/// Clonable sender handle for key event sources
#[derive(Clone)]
pub struct InputSender {
    sender: Sender<KeyEvent>,
}

impl InputSender {
    /// Submit a key event (non-blocking)
    #[inline]
    pub fn try_send(&self, event: KeyEvent) -> Result<(), InputBufferError> {
        self.sender.try_send(event).map_err(|e| match e {
            TrySendError::Full(_) => InputBufferError::Full,
            TrySendError::Disconnected(_) => InputBufferError::Disconnected,
        })
    }

    pub fn press(&self, key: &str) -> Result<(), InputBufferError> {
        self.try_send(KeyEvent::press(key))
    }

    pub fn release(&self, key: &str) -> Result<(), InputBufferError> {
        self.try_send(KeyEvent::release(key))
    }
}

/// Input buffer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputBufferError {
    /// Buffer is full (backpressure)
    #[error("input buffer is full")]
    Full,
    /// Game loop dropped its end of the channel
    #[error("input buffer disconnected")]
    Disconnected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_buffer_submit_and_drain() {
        let buffer = InputBuffer::new(10);
        let sender = buffer.sender();

        sender.press("a").unwrap();
        sender.press("w").unwrap();
        sender.release("a").unwrap();

        assert_eq!(buffer.pending_count(), 3);

        let events = buffer.drain();
        assert_eq!(
            events,
            vec![
                KeyEvent::press("a"),
                KeyEvent::press("w"),
                KeyEvent::release("a"),
            ]
        );
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_input_buffer_backpressure() {
        let buffer = InputBuffer::new(2);
        let sender = buffer.sender();

        assert!(sender.press("a").is_ok());
        assert!(sender.press("d").is_ok());
        assert_eq!(sender.press("w"), Err(InputBufferError::Full));

        buffer.drain();
        assert!(sender.press("w").is_ok());
    }

    #[test]
    fn test_input_sender_clone() {
        let buffer = InputBuffer::new(10);
        let keyboard = buffer.sender();
        let script = keyboard.clone();

        keyboard.press("ArrowLeft").unwrap();
        script.press("k").unwrap();

        assert_eq!(buffer.drain().len(), 2);
    }

    #[test]
    fn test_sender_after_buffer_dropped() {
        let buffer = InputBuffer::new(4);
        let sender = buffer.sender();
        drop(buffer);
        assert_eq!(sender.press("a"), Err(InputBufferError::Disconnected));
    }

    #[test]
    fn test_input_buffer_default() {
        let buffer = InputBuffer::default();
        assert_eq!(buffer.capacity(), 256);
    }
}

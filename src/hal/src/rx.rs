//! Receive queue shared between the line-driver interrupt and the poll loop.
//!
//! The wire clocks bytes in asynchronously; the converter only looks for
//! them once per scan tick. Port implementations bridge the two with this
//! fixed-capacity queue: the receive interrupt pushes, `KeyboardPort::recv`
//! pops.

use heapless::Deque;
use spin::Mutex;

/// Capacity of the receive queue, in bytes. Two full Pause sequences.
pub const RX_CAPACITY: usize = 16;

/// A lock-guarded byte queue, const-constructible so it can back a `static`.
///
/// ```ignore
/// static RX: RxQueue = RxQueue::new();
///
/// fn on_receive_irq(byte: u8) {
///     if RX.push(byte).is_err() {
///         // latch PortError::BUFFER_FULL
///     }
/// }
/// ```
pub struct RxQueue {
    inner: Mutex<Deque<u8, RX_CAPACITY>>,
}

impl RxQueue {
    /// Create an empty queue.
    pub const fn new() -> Self {
        RxQueue {
            inner: Mutex::new(Deque::new()),
        }
    }

    /// Append a received byte; `Err` returns it when the queue is full.
    pub fn push(&self, byte: u8) -> Result<(), u8> {
        self.inner.lock().push_back(byte)
    }

    /// Pop the oldest byte.
    pub fn pop(&self) -> Option<u8> {
        self.inner.lock().pop_front()
    }

    /// Number of queued bytes.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Whether the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Drop everything queued.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }
}

impl Default for RxQueue {
    fn default() -> Self {
        Self::new()
    }
}

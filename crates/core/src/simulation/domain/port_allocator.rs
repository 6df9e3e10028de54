/// Hands out simulator ports for successive environments.
///
/// Each environment gets the current port and the next one counts down, so
/// several simulators can run side by side without colliding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PortAllocator {
    next: u16,
}

impl PortAllocator {
    pub fn new(start: u16) -> Self {
        Self { next: start }
    }

    /// The port the next call to [`allocate`](Self::allocate) will return.
    pub fn peek(&self) -> u16 {
        self.next
    }

    /// Returns `None` once the range below `start` is exhausted.
    pub fn allocate(&mut self) -> Option<u16> {
        if self.next == 0 {
            return None;
        }
        let port = self.next;
        self.next -= 1;
        Some(port)
    }
}

/// Single-slot redraw request flag.
///
/// Any number of requests made before the next pass collapse into one frame.
/// A resize request also marks the canvas for re-measuring on that pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawScheduler {
    pending: bool,
    resize_pending: bool,
}

impl RedrawScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when the caller must schedule a frame, i.e. when no
    /// redraw was pending yet.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    pub fn request_resize(&mut self) -> bool {
        self.resize_pending = true;
        self.request()
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_pending
    }

    /// Consumes the resize flag.
    pub fn take_resize(&mut self) -> bool {
        std::mem::take(&mut self.resize_pending)
    }

    /// Marks the pending pass as done.
    pub fn complete(&mut self) {
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::RedrawScheduler;

    #[test]
    fn repeated_requests_coalesce() {
        let mut scheduler = RedrawScheduler::new();
        assert!(scheduler.request());
        assert!(!scheduler.request());
        assert!(!scheduler.request());
        assert!(scheduler.is_pending());
        scheduler.complete();
        assert!(!scheduler.is_pending());
        assert!(scheduler.request());
    }

    #[test]
    fn resize_is_consumed_once() {
        let mut scheduler = RedrawScheduler::new();
        assert!(scheduler.request_resize());
        assert!(!scheduler.request_resize());
        assert!(scheduler.resize_pending());
        assert!(scheduler.take_resize());
        assert!(!scheduler.resize_pending());
        assert!(!scheduler.take_resize());
        assert!(scheduler.is_pending());
    }
}

//! Helpers shared by unit tests

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// In-memory stream whose clones share one buffer
#[derive(Clone, Default)]
pub(crate) struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Poll `condition` for up to two seconds
pub(crate) fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(5));
    }
    condition()
}

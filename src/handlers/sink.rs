//! Shared output sinks
//!
//! Handlers derived with `with_attrs` keep writing to the same sink as the
//! handler they came from, so the writer lives behind `Arc<Mutex<..>>`.

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;

pub type Sink = Arc<Mutex<Box<dyn Write + Send>>>;

/// Wrap a writer so it can be shared between handlers.
pub fn sink<W: Write + Send + 'static>(writer: W) -> Sink {
    Arc::new(Mutex::new(Box::new(writer)))
}

/// In-memory writer whose clones all append to the same buffer.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.inner.lock()).into_owned()
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(String::from).collect()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_buffer_clones_share_storage() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        writeln!(writer, "first").unwrap();
        writeln!(writer, "second").unwrap();

        assert_eq!(buffer.lines(), vec!["first", "second"]);
        buffer.clear();
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_sink_writes_through() {
        let buffer = SharedBuffer::new();
        let shared = sink(buffer.clone());
        shared.lock().write_all(b"hello").unwrap();
        assert_eq!(buffer.contents(), "hello");
    }
}

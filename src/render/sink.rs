//! Results containers that rendered markup is written into.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A container whose entire content is replaced by each render.
pub trait ResultSink {
    /// Replace everything currently in the container with `markup`.
    fn replace(&mut self, markup: String) -> io::Result<()>;

    /// Short description used in log lines
    fn describe(&self) -> String {
        "results container".to_string()
    }
}

/// In-memory container, the equivalent of a page element's inner HTML
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryContainer {
    content: String,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a container that already holds some content
    pub fn with_content(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl ResultSink for MemoryContainer {
    fn replace(&mut self, markup: String) -> io::Result<()> {
        self.content = markup;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory container".to_string()
    }
}

/// A file on disk, swapped out whole on every render.
///
/// Markup is written to a temporary file in the same directory and renamed
/// over the target, so a failed write leaves the previous results in place.
#[derive(Debug, Clone)]
pub struct FileContainer {
    path: PathBuf,
}

impl FileContainer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for FileContainer {
    fn replace(&mut self, markup: String) -> io::Result<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !dir.exists() {
            std::fs::create_dir_all(dir)?;
        }

        let mut staged = tempfile::NamedTempFile::new_in(dir)?;
        staged.write_all(markup.as_bytes())?;
        staged.flush()?;
        staged.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Any writer, e.g. stdout. Each render writes the markup and a trailing newline.
#[derive(Debug)]
pub struct WriterContainer<W: Write> {
    writer: W,
}

impl<W: Write> WriterContainer<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterContainer<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ResultSink for WriterContainer<W> {
    fn replace(&mut self, markup: String) -> io::Result<()> {
        self.writer.write_all(markup.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }

    fn describe(&self) -> String {
        "output stream".to_string()
    }
}

/// A container shared between concurrent searches.
///
/// Searches are not sequenced: whichever render finishes last owns the content.
#[derive(Debug, Clone, Default)]
pub struct SharedContainer {
    inner: Arc<Mutex<String>>,
}

impl SharedContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current content
    pub fn content(&self) -> String {
        match self.inner.lock() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl ResultSink for SharedContainer {
    fn replace(&mut self, markup: String) -> io::Result<()> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "results container lock poisoned"))?;
        *guard = markup;
        Ok(())
    }

    fn describe(&self) -> String {
        "shared container".to_string()
    }
}

use std::{
    fmt,
    fs::OpenOptions,
    io::{Cursor, Read, Seek, SeekFrom, Write},
    path::Path,
    sync::{Arc, Mutex, MutexGuard, PoisonError},
};

use super::error::Error;

/// Anything a [`Stream`] can wrap: a readable, writable, seekable byte
/// resource which may be handed to another thread.
///
/// [`Stream`]: struct.Stream.html
pub trait Resource: Read + Write + Seek + Send {}

impl<T> Resource for T where T: Read + Write + Seek + Send {}

struct Inner {
    resource: Option<Box<dyn Resource>>,
    readable: bool,
    writable: bool,
    seekable: bool,
    eof: bool,
}

impl Inner {
    fn resource(&mut self) -> Result<&mut Box<dyn Resource>, Error> {
        self.resource.as_mut().ok_or(Error::StreamDetached)
    }

    fn check(&self, allowed: bool, error: Error) -> Result<(), Error> {
        if self.resource.is_none() {
            Err(Error::StreamDetached)
        } else if !allowed {
            Err(error)
        } else {
            Ok(())
        }
    }
}

// Translate an fopen-style mode into open options plus the
// readable/writable flags it implies.
fn open_options(mode: &str) -> Result<(OpenOptions, bool, bool), Error> {
    let mut chars = mode.chars();
    let base = chars.next();
    let rest = chars.collect::<String>();
    if !rest.chars().all(|c| matches!(c, '+' | 'b' | 't')) || rest.matches('+').count() > 1 {
        return Err(Error::InvalidStreamMode(mode.to_string()));
    }
    let plus = rest.contains('+');
    let mut options = OpenOptions::new();
    let (readable, writable) = match base {
        Some('r') => {
            options.read(true).write(plus);
            (true, plus)
        }
        Some('w') => {
            options.write(true).create(true).truncate(true).read(plus);
            (plus, true)
        }
        Some('a') => {
            options.append(true).create(true).read(plus);
            (plus, true)
        }
        Some('x') => {
            options.write(true).create_new(true).read(plus);
            (plus, true)
        }
        Some('c') => {
            options.write(true).create(true).read(plus);
            (plus, true)
        }
        _ => return Err(Error::InvalidStreamMode(mode.to_string())),
    };
    Ok((options, readable, writable))
}

/// A handle on a byte resource used as the body of a message or the
/// content of an uploaded file.
///
/// Cloning a `Stream` yields another handle on the same resource, sharing
/// its position, so a message copied by one of the `with_*` methods keeps
/// the same body.  Once [`detach`]ed or [`close`]d, every operation on any
/// of the handles fails with
/// [`Error::StreamDetached`](enum.Error.html#variant.StreamDetached).
///
/// [`detach`]: #method.detach
/// [`close`]: #method.close
#[derive(Clone)]
pub struct Stream {
    inner: Arc<Mutex<Inner>>,
}

impl Stream {
    /// Wrap an arbitrary resource, stating what it may be used for.
    pub fn from_resource<R>(resource: R, readable: bool, writable: bool, seekable: bool) -> Self
    where
        R: Resource + 'static,
    {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                resource: Some(Box::new(resource)),
                readable,
                writable,
                seekable,
                eof: false,
            })),
        }
    }

    /// Create an in-memory stream holding the given bytes, positioned at
    /// the start.
    pub fn from_bytes<T>(content: T) -> Self
    where
        T: Into<Vec<u8>>,
    {
        Self::from_resource(Cursor::new(content.into()), true, true, true)
    }

    /// Open a file with an fopen-style mode such as `r`, `w+` or `ab`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidStreamMode`](enum.Error.html#variant.InvalidStreamMode)
    /// is returned for an unknown mode, and
    /// [`Error::Io`](enum.Error.html#variant.Io) if the file cannot be
    /// opened.
    pub fn open<P>(path: P, mode: &str) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let (options, readable, writable) = open_options(mode)?;
        let file = options.open(path.as_ref())?;
        tracing::trace!(path = %path.as_ref().display(), mode, "opened stream");
        Ok(Self::from_resource(file, readable, writable, true))
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Determine whether the stream can be read from.
    #[must_use]
    pub fn is_readable(&self) -> bool {
        let inner = self.lock();
        inner.resource.is_some() && inner.readable
    }

    /// Determine whether the stream can be written to.
    #[must_use]
    pub fn is_writable(&self) -> bool {
        let inner = self.lock();
        inner.resource.is_some() && inner.writable
    }

    /// Determine whether the stream position can be moved.
    #[must_use]
    pub fn is_seekable(&self) -> bool {
        let inner = self.lock();
        inner.resource.is_some() && inner.seekable
    }

    /// Read up to `length` bytes from the current position.  Fewer bytes
    /// are returned only when the end of the stream is reached.
    ///
    /// # Errors
    ///
    /// Fails if the stream is detached, not readable, or the read fails.
    pub fn read(&self, length: usize) -> Result<Vec<u8>, Error> {
        let mut inner = self.lock();
        let readable = inner.readable;
        inner.check(readable, Error::NotReadable)?;
        let mut buffer = Vec::with_capacity(length);
        Read::take(inner.resource()?, length as u64).read_to_end(&mut buffer)?;
        inner.eof = buffer.len() < length;
        Ok(buffer)
    }

    /// Read everything from the current position to the end.
    ///
    /// # Errors
    ///
    /// Fails if the stream is detached, not readable, or the read fails.
    pub fn contents(&self) -> Result<Vec<u8>, Error> {
        let mut inner = self.lock();
        let readable = inner.readable;
        inner.check(readable, Error::NotReadable)?;
        let mut buffer = Vec::new();
        inner.resource()?.read_to_end(&mut buffer)?;
        inner.eof = true;
        Ok(buffer)
    }

    /// Write all of the given bytes at the current position, returning how
    /// many were written.
    ///
    /// # Errors
    ///
    /// Fails if the stream is detached, not writable, or the write fails.
    pub fn write<T>(&self, bytes: T) -> Result<usize, Error>
    where
        T: AsRef<[u8]>,
    {
        let bytes = bytes.as_ref();
        let mut inner = self.lock();
        let writable = inner.writable;
        inner.check(writable, Error::NotWritable)?;
        let resource = inner.resource()?;
        resource.write_all(bytes)?;
        resource.flush()?;
        Ok(bytes.len())
    }

    /// Move the stream position, returning the new position from the start.
    ///
    /// # Errors
    ///
    /// Fails if the stream is detached, not seekable, or the seek fails.
    pub fn seek(&self, position: SeekFrom) -> Result<u64, Error> {
        let mut inner = self.lock();
        let seekable = inner.seekable;
        inner.check(seekable, Error::NotSeekable)?;
        let position = inner.resource()?.seek(position)?;
        inner.eof = false;
        Ok(position)
    }

    /// Move the stream position back to the start.
    ///
    /// # Errors
    ///
    /// See [`seek`](#method.seek).
    pub fn rewind(&self) -> Result<(), Error> {
        self.seek(SeekFrom::Start(0)).map(|_| ())
    }

    /// Return the current position from the start of the stream.
    ///
    /// # Errors
    ///
    /// Fails if the stream is detached or the position cannot be told.
    pub fn tell(&self) -> Result<u64, Error> {
        Ok(self.lock().resource()?.stream_position()?)
    }

    /// Determine whether the last read hit the end of the stream.  A
    /// detached stream is always at its end.
    #[must_use]
    pub fn eof(&self) -> bool {
        let inner = self.lock();
        inner.resource.is_none() || inner.eof
    }

    /// Return the size of the stream in bytes, if it can be known.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        let mut inner = self.lock();
        if !inner.seekable {
            return None;
        }
        let resource = inner.resource().ok()?;
        let position = resource.stream_position().ok()?;
        let size = resource.seek(SeekFrom::End(0)).ok()?;
        resource.seek(SeekFrom::Start(position)).ok()?;
        Some(size)
    }

    /// Separate the underlying resource from the stream (and from every
    /// clone of it), leaving the stream unusable.
    pub fn detach(&self) -> Option<Box<dyn Resource>> {
        let mut inner = self.lock();
        inner.readable = false;
        inner.writable = false;
        inner.seekable = false;
        inner.resource.take()
    }

    /// Detach and drop the underlying resource.
    pub fn close(&self) {
        if let Some(mut resource) = self.detach() {
            if let Err(error) = resource.flush() {
                tracing::debug!(%error, "flushing stream on close failed");
            }
        }
    }
}

impl Default for Stream {
    fn default() -> Self {
        Self::from_bytes(Vec::new())
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.lock();
        f.debug_struct("Stream")
            .field("detached", &inner.resource.is_none())
            .field("readable", &inner.readable)
            .field("writable", &inner.writable)
            .field("seekable", &inner.seekable)
            .finish()
    }
}

/// Reads the whole stream from the start (when seekable) and writes it
/// lossily as UTF-8.  Nothing is written if the stream cannot be read.
impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let read_all = || -> Result<Vec<u8>, Error> {
            if self.is_seekable() {
                self.rewind()?;
            }
            self.contents()
        };
        match read_all() {
            Ok(bytes) => f.write_str(&String::from_utf8_lossy(&bytes)),
            Err(error) => {
                tracing::debug!(%error, "unable to read stream for display");
                Ok(())
            }
        }
    }
}

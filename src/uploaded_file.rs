use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use super::{error::Error, stream::Stream};

/// The outcome reported by the server for a single file upload.  The
/// numeric values match the conventional upload error codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UploadErrorCode {
    /// The upload succeeded.
    Ok = 0,
    /// The file exceeds the server's configured size limit.
    IniSize = 1,
    /// The file exceeds the size limit declared by the form.
    FormSize = 2,
    /// Only part of the file arrived.
    Partial = 3,
    /// No file was sent.
    NoFile = 4,
    /// There is no temporary directory to receive the file.
    NoTmpDir = 6,
    /// The file could not be written to disk.
    CantWrite = 7,
    /// A server extension stopped the upload.
    Extension = 8,
}

impl Default for UploadErrorCode {
    fn default() -> Self {
        UploadErrorCode::Ok
    }
}

impl fmt::Display for UploadErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UploadErrorCode::Ok => "no error",
            UploadErrorCode::IniSize => "file exceeds the server size limit",
            UploadErrorCode::FormSize => "file exceeds the form size limit",
            UploadErrorCode::Partial => "file was only partially uploaded",
            UploadErrorCode::NoFile => "no file was uploaded",
            UploadErrorCode::NoTmpDir => "missing temporary directory",
            UploadErrorCode::CantWrite => "failed to write file to disk",
            UploadErrorCode::Extension => "upload stopped by an extension",
        })
    }
}

impl TryFrom<u8> for UploadErrorCode {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => UploadErrorCode::Ok,
            1 => UploadErrorCode::IniSize,
            2 => UploadErrorCode::FormSize,
            3 => UploadErrorCode::Partial,
            4 => UploadErrorCode::NoFile,
            6 => UploadErrorCode::NoTmpDir,
            7 => UploadErrorCode::CantWrite,
            8 => UploadErrorCode::Extension,
            _ => return Err(Error::InvalidUploadErrorCode(code)),
        })
    }
}

#[derive(Debug)]
enum Source {
    Stream(Stream),
    Path(PathBuf),
}

/// A file received as part of a request, either still held in a
/// [`Stream`](struct.Stream.html) or sitting in a temporary file on disk.
///
/// The content can be moved to its final location exactly once.
#[derive(Debug)]
pub struct UploadedFile {
    source: Source,
    size: Option<u64>,
    error: UploadErrorCode,
    client_filename: Option<String>,
    client_media_type: Option<String>,
    moved: bool,
}

impl UploadedFile {
    fn new(source: Source) -> Self {
        Self {
            source,
            size: None,
            error: UploadErrorCode::Ok,
            client_filename: None,
            client_media_type: None,
            moved: false,
        }
    }

    /// Describe an upload whose content is held by a stream.
    #[must_use]
    pub fn from_stream(stream: Stream) -> Self {
        Self::new(Source::Stream(stream))
    }

    /// Describe an upload whose content was stored in a file.
    #[must_use]
    pub fn from_path<P>(path: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self::new(Source::Path(path.into()))
    }

    /// Set the size reported for the upload.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the outcome reported for the upload.
    #[must_use]
    pub fn with_error(mut self, error: UploadErrorCode) -> Self {
        self.error = error;
        self
    }

    /// Set the file name sent by the client.
    #[must_use]
    pub fn with_client_filename<T>(mut self, filename: T) -> Self
    where
        T: Into<String>,
    {
        self.client_filename = Some(filename.into());
        self
    }

    /// Set the media type sent by the client.
    #[must_use]
    pub fn with_client_media_type<T>(mut self, media_type: T) -> Self
    where
        T: Into<String>,
    {
        self.client_media_type = Some(media_type.into());
        self
    }

    /// Return the size reported for the upload, if known.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Return the outcome reported for the upload.
    #[must_use]
    pub fn error(&self) -> UploadErrorCode {
        self.error
    }

    /// Return the file name sent by the client.  It is not to be trusted.
    #[must_use]
    pub fn client_filename(&self) -> Option<&str> {
        self.client_filename.as_deref()
    }

    /// Return the media type sent by the client.  It is not to be trusted.
    #[must_use]
    pub fn client_media_type(&self) -> Option<&str> {
        self.client_media_type.as_deref()
    }

    fn check_available(&self) -> Result<(), Error> {
        if self.error != UploadErrorCode::Ok {
            Err(Error::UploadFailed(self.error))
        } else if self.moved {
            Err(Error::UploadAlreadyMoved)
        } else {
            Ok(())
        }
    }

    /// Open the uploaded content as a stream.
    ///
    /// # Errors
    ///
    /// Fails if the upload failed, was already moved, or its file cannot be
    /// opened.
    pub fn stream(&self) -> Result<Stream, Error> {
        self.check_available()?;
        match &self.source {
            Source::Stream(stream) => Ok(stream.clone()),
            Source::Path(path) => Stream::open(path, "r"),
        }
    }

    /// Move the uploaded content to `target`.  After a successful move the
    /// content is no longer available through this value.
    ///
    /// # Errors
    ///
    /// Fails if the upload failed, was already moved, the target path is
    /// empty, or the content cannot be written there.
    pub fn move_to<P>(&mut self, target: P) -> Result<(), Error>
    where
        P: AsRef<Path>,
    {
        self.check_available()?;
        let target = target.as_ref();
        if target.as_os_str().is_empty() {
            return Err(Error::InvalidTargetPath(target.display().to_string()));
        }
        match &self.source {
            Source::Stream(stream) => {
                if stream.is_seekable() {
                    stream.rewind()?;
                }
                fs::write(target, stream.contents()?)?;
                stream.close();
            }
            Source::Path(path) => {
                if let Err(error) = fs::rename(path, target) {
                    tracing::debug!(%error, "rename failed, copying instead");
                    fs::copy(path, target)?;
                    fs::remove_file(path)?;
                }
            }
        }
        self.moved = true;
        tracing::debug!(target = %target.display(), "moved uploaded file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("psr7-upload-{}-{}", std::process::id(), name))
    }

    #[test]
    fn error_codes() {
        struct Test {
            code: u8,
            error: UploadErrorCode,
        }
        let test_vectors: &[Test] = &[
            Test {
                code: 0,
                error: UploadErrorCode::Ok,
            },
            Test {
                code: 3,
                error: UploadErrorCode::Partial,
            },
            Test {
                code: 6,
                error: UploadErrorCode::NoTmpDir,
            },
            Test {
                code: 8,
                error: UploadErrorCode::Extension,
            },
        ];
        for test_vector in test_vectors {
            assert_eq!(
                test_vector.error,
                UploadErrorCode::try_from(test_vector.code).unwrap()
            );
            assert_eq!(test_vector.code, test_vector.error as u8);
        }
        for code in &[5_u8, 9, 255] {
            assert!(matches!(
                UploadErrorCode::try_from(*code),
                Err(Error::InvalidUploadErrorCode(c)) if c == *code
            ));
        }
    }

    #[test]
    fn metadata() {
        let upload = UploadedFile::from_stream(Stream::from_bytes("data"))
            .with_size(4)
            .with_client_filename("report.pdf")
            .with_client_media_type("application/pdf");
        assert_eq!(Some(4), upload.size());
        assert_eq!(UploadErrorCode::Ok, upload.error());
        assert_eq!(Some("report.pdf"), upload.client_filename());
        assert_eq!(Some("application/pdf"), upload.client_media_type());
        assert_eq!("data", upload.stream().unwrap().to_string());
    }

    #[test]
    fn move_stream_upload() {
        let target = temp_path("from-stream");
        let mut upload = UploadedFile::from_stream(Stream::from_bytes("payload"));
        upload.move_to(&target).unwrap();
        assert_eq!("payload", fs::read_to_string(&target).unwrap());
        assert!(matches!(upload.stream(), Err(Error::UploadAlreadyMoved)));
        assert!(matches!(upload.move_to(&target), Err(Error::UploadAlreadyMoved)));
        fs::remove_file(&target).unwrap();
    }

    #[test]
    fn move_file_upload() {
        let source = temp_path("source");
        let target = temp_path("target");
        fs::write(&source, "on disk").unwrap();
        let mut upload = UploadedFile::from_path(&source);
        assert_eq!("on disk", upload.stream().unwrap().to_string());
        upload.move_to(&target).unwrap();
        assert!(!source.exists());
        assert_eq!("on disk", fs::read_to_string(&target).unwrap());
        fs::remove_file(&target).unwrap();
    }

    #[test]
    fn failed_upload() {
        let mut upload = UploadedFile::from_stream(Stream::default()).with_error(UploadErrorCode::NoFile);
        assert!(matches!(
            upload.stream(),
            Err(Error::UploadFailed(UploadErrorCode::NoFile))
        ));
        assert!(matches!(
            upload.move_to(temp_path("never")),
            Err(Error::UploadFailed(UploadErrorCode::NoFile))
        ));
    }

    #[test]
    fn empty_target() {
        let mut upload = UploadedFile::from_stream(Stream::from_bytes("x"));
        assert!(matches!(upload.move_to(""), Err(Error::InvalidTargetPath(_))));
        assert!(upload.stream().is_ok());
    }
}

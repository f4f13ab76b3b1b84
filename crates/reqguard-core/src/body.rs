//! # Replayable Request Body
//!
//! A request body is a single-use byte stream at the source, but the strict
//! decoder must leave it readable for whoever consumes the request next.
//! [`RequestBody`] drains its source into memory exactly once and serves
//! every later read from that buffer.

use std::fmt;
use std::io::{self, Cursor, Read};

use bytes::Bytes;

enum Inner {
    /// Source stream not yet read.
    Stream(Box<dyn Read + Send>),
    /// Buffered contents; reads are served from the cursor.
    Buffered(Cursor<Bytes>),
}

/// An HTTP request body that can be re-read after it has been inspected.
pub struct RequestBody {
    inner: Inner,
}

impl RequestBody {
    /// Wrap a single-use byte stream.
    pub fn from_reader<R: Read + Send + 'static>(reader: R) -> Self {
        Self {
            inner: Inner::Stream(Box::new(reader)),
        }
    }

    /// A body already held in memory.
    pub fn from_bytes(bytes: impl Into<Bytes>) -> Self {
        Self {
            inner: Inner::Buffered(Cursor::new(bytes.into())),
        }
    }

    pub fn empty() -> Self {
        Self::from_bytes(Bytes::new())
    }

    /// Whether the source stream has already been drained into memory.
    pub fn is_buffered(&self) -> bool {
        matches!(self.inner, Inner::Buffered(_))
    }

    /// Drain the source (once) and return the full contents.
    ///
    /// Afterwards the body reads again from its first byte. The source stream
    /// is dropped whether or not reading it succeeded; on failure the bytes
    /// read so far become the body.
    pub fn buffer(&mut self) -> io::Result<Bytes> {
        let placeholder = Inner::Buffered(Cursor::new(Bytes::new()));
        match std::mem::replace(&mut self.inner, placeholder) {
            Inner::Buffered(mut cursor) => {
                cursor.set_position(0);
                let bytes = cursor.get_ref().clone();
                self.inner = Inner::Buffered(cursor);
                Ok(bytes)
            }
            Inner::Stream(mut stream) => {
                let mut buf = Vec::new();
                let result = stream.read_to_end(&mut buf);
                drop(stream);
                let bytes = Bytes::from(buf);
                self.inner = Inner::Buffered(Cursor::new(bytes.clone()));
                result.map(|_| bytes)
            }
        }
    }
}

impl Read for RequestBody {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        match &mut self.inner {
            Inner::Stream(stream) => stream.read(out),
            Inner::Buffered(cursor) => cursor.read(out),
        }
    }
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Bytes> for RequestBody {
    fn from(bytes: Bytes) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for RequestBody {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<&'static str> for RequestBody {
    fn from(s: &'static str) -> Self {
        Self::from_bytes(Bytes::from_static(s.as_bytes()))
    }
}

impl From<String> for RequestBody {
    fn from(s: String) -> Self {
        Self::from_bytes(s)
    }
}

impl fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.inner {
            Inner::Stream(_) => f.write_str("RequestBody::Stream"),
            Inner::Buffered(cursor) => f
                .debug_struct("RequestBody::Buffered")
                .field("len", &cursor.get_ref().len())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Yields a prefix, then fails.
    struct FailingReader {
        sent: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            if self.sent {
                return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
            }
            self.sent = true;
            out[..2].copy_from_slice(b"{\"");
            Ok(2)
        }
    }

    fn read_to_string(body: &mut RequestBody) -> String {
        let mut s = String::new();
        body.read_to_string(&mut s).unwrap();
        s
    }

    #[test]
    fn stream_is_buffered_once_and_replayable() {
        let mut body = RequestBody::from_reader(Cursor::new(b"{\"a\":1}".to_vec()));
        assert!(!body.is_buffered());
        let bytes = body.buffer().unwrap();
        assert_eq!(&bytes[..], b"{\"a\":1}");
        assert!(body.is_buffered());
        assert_eq!(read_to_string(&mut body), "{\"a\":1}");
    }

    #[test]
    fn buffer_rewinds_after_partial_read() {
        let mut body = RequestBody::from("hello world");
        let mut first = [0u8; 5];
        body.read_exact(&mut first).unwrap();
        assert_eq!(&first, b"hello");
        assert_eq!(&body.buffer().unwrap()[..], b"hello world");
        assert_eq!(read_to_string(&mut body), "hello world");
    }

    #[test]
    fn failed_read_keeps_partial_bytes_and_drops_stream() {
        let mut body = RequestBody::from_reader(FailingReader { sent: false });
        let err = body.buffer().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::ConnectionReset);
        assert!(body.is_buffered());
        assert_eq!(read_to_string(&mut body), "{\"");
    }

    #[test]
    fn empty_body() {
        let mut body = RequestBody::default();
        assert!(body.buffer().unwrap().is_empty());
    }
}

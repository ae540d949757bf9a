//! Bridges a blocking `Write` into an async response body.

use axum::body::Bytes;
use std::io::{self, Write};

pub type Chunk = Result<Bytes, io::Error>;

/// A `Write` that forwards fixed-size chunks over a bounded channel.
///
/// Must be used from a blocking thread: a full channel blocks the writer
/// until the client catches up. A dropped receiver makes writes fail with
/// `BrokenPipe`.
pub struct ChannelWriter {
    tx: async_channel::Sender<Chunk>,
    buffer: Vec<u8>,
    chunk_size: usize,
    bytes_sent: usize,
}

impl ChannelWriter {
    pub fn new(tx: async_channel::Sender<Chunk>, chunk_size: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            tx,
            buffer: Vec::with_capacity(chunk_size),
            chunk_size,
            bytes_sent: 0,
        }
    }

    pub fn bytes_sent(&self) -> usize {
        self.bytes_sent
    }

    fn send_buffer(&mut self) -> io::Result<()> {
        if self.buffer.is_empty() {
            return Ok(());
        }
        let chunk = Bytes::from(std::mem::replace(
            &mut self.buffer,
            Vec::with_capacity(self.chunk_size),
        ));
        let len = chunk.len();
        self.tx
            .send_blocking(Ok(chunk))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "client disconnected"))?;
        self.bytes_sent += len;
        Ok(())
    }
}

impl Write for ChannelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        if self.buffer.len() >= self.chunk_size {
            self.send_buffer()?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.send_buffer()
    }
}

/// Whether `err` means the receiving side went away.
pub fn is_disconnect(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::BrokenPipe
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_are_forwarded_in_order() {
        let (tx, rx) = async_channel::unbounded();
        let mut writer = ChannelWriter::new(tx, 4);
        writer.write_all(b"abcdefghij").unwrap();
        writer.flush().unwrap();
        assert_eq!(writer.bytes_sent(), 10);
        drop(writer);

        let mut out = Vec::new();
        while let Ok(chunk) = rx.try_recv() {
            out.extend_from_slice(&chunk.unwrap());
        }
        assert_eq!(out, b"abcdefghij");
    }

    #[test]
    fn test_closed_receiver_is_broken_pipe() {
        let (tx, rx) = async_channel::bounded(1);
        drop(rx);
        let mut writer = ChannelWriter::new(tx, 2);
        let err = writer.write_all(b"abcd").unwrap_err();
        assert!(is_disconnect(&err));
    }
}

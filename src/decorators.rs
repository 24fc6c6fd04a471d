//! Ready-made audio stream decorators

use crate::backend::AudioStream;
use std::io::{self, Read, Seek, SeekFrom};

/// Repeats one period of a stream forever
pub struct InfiniteLoop {
    inner: Box<dyn AudioStream>,
    period: u64,
    pos: u64,
}

impl InfiniteLoop {
    pub fn new(inner: Box<dyn AudioStream>) -> Self {
        let period = inner.length();
        Self {
            inner,
            period,
            pos: 0,
        }
    }

    fn rewind(&mut self) -> io::Result<()> {
        self.inner.seek(SeekFrom::Start(0))?;
        self.pos = 0;
        Ok(())
    }
}

impl Read for InfiniteLoop {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.period == 0 || buf.is_empty() {
            return Ok(0);
        }
        // A second attempt covers inner streams that end before `period`.
        for _ in 0..2 {
            if self.pos >= self.period {
                self.rewind()?;
            }
            let left = self.period - self.pos;
            let limit = buf.len().min(usize::try_from(left).unwrap_or(usize::MAX));
            let n = self.inner.read(&mut buf[..limit])?;
            if n > 0 {
                self.pos += n as u64;
                return Ok(n);
            }
            self.pos = self.period;
        }
        Ok(0)
    }
}

impl Seek for InfiniteLoop {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(n) => i128::from(n),
            SeekFrom::Current(d) => i128::from(self.pos) + i128::from(d),
            SeekFrom::End(d) => i128::from(self.period) + i128::from(d),
        };
        if target < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "seek before start of stream",
            ));
        }
        let wrapped = if self.period == 0 {
            0
        } else {
            (target % i128::from(self.period)) as u64
        };
        self.inner.seek(SeekFrom::Start(wrapped))?;
        self.pos = wrapped;
        Ok(wrapped)
    }
}

impl AudioStream for InfiniteLoop {
    /// Length of one period
    fn length(&self) -> u64 {
        self.period
    }
}

/// Wrap a stream into an infinite loop.
///
/// This is what OGG resources get when no decorator is registered.
pub fn loop_stream(stream: Box<dyn AudioStream>) -> Box<dyn AudioStream> {
    Box::new(InfiniteLoop::new(stream))
}

/// Return the stream as is.
///
/// Only useful on WAV resources you don't want eagerly loaded into memory:
/// any decorator disables materialization, so they are decoded while
/// playing instead. Saves memory, costs CPU.
pub fn nop_decorator(stream: Box<dyn AudioStream>) -> Box<dyn AudioStream> {
    stream
}

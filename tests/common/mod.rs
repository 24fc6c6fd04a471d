//! Shared test backend and openers

#![allow(dead_code)]

use archetype_resource::{AssetOpener, AssetStream, AudioStream, Backend, BoxError, FaceOptions, MemoryOpener};
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Bytes a mock player pulls from a stream when it is built
pub const PLAYER_PROBE: usize = 8;

#[derive(Debug)]
pub struct MockImage {
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct MockFace {
    pub size: f64,
    pub dpi: f64,
    pub line_height: Option<f64>,
}

#[derive(Debug)]
pub struct MockShader {
    pub source: String,
}

#[derive(Debug, PartialEq)]
pub enum MockPlayer {
    /// Built from materialized PCM
    Bytes(Vec<u8>),
    /// Built from a stream; `head` is what the player read first
    Stream { head: Vec<u8>, length: u64 },
}

pub struct Pcm(Cursor<Vec<u8>>);

impl Pcm {
    pub fn boxed(data: Vec<u8>) -> Box<dyn AudioStream> {
        Box::new(Pcm(Cursor::new(data)))
    }
}

impl Read for Pcm {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl Seek for Pcm {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.0.seek(pos)
    }
}

impl AudioStream for Pcm {
    fn length(&self) -> u64 {
        self.0.get_ref().len() as u64
    }
}

/// Stream that reports more PCM than it actually holds
pub struct Truncated {
    inner: Pcm,
    missing: u64,
}

impl Read for Truncated {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for Truncated {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl AudioStream for Truncated {
    fn length(&self) -> u64 {
        self.inner.length() + self.missing
    }
}

/// Call counters, shared with the test through an `Arc`
#[derive(Debug, Default)]
pub struct Calls {
    pub images: AtomicUsize,
    pub faces: AtomicUsize,
    pub shaders: AtomicUsize,
    pub wavs: AtomicUsize,
    pub vorbis: AtomicUsize,
    pub players_from_bytes: AtomicUsize,
    pub players_from_stream: AtomicUsize,
}

impl Calls {
    pub fn get(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }
}

/// Decodes by convention instead of by codec:
/// images fail when they start with `BAD`, shaders fail on `syntax error`,
/// WAV data must start with `RIFF` and OGG data with `OggS`; the PCM is
/// whatever follows the magic. WAV PCM starting with `TRUNC` decodes into a
/// stream that claims 10 more bytes than it has, and `HUGE` into one that
/// claims `u64::MAX` bytes.
#[derive(Default)]
pub struct MockBackend {
    pub calls: Arc<Calls>,
}

impl MockBackend {
    pub fn new() -> (Self, Arc<Calls>) {
        let backend = Self::default();
        let calls = backend.calls.clone();
        (backend, calls)
    }
}

fn strip_magic(encoded: Vec<u8>, magic: &[u8]) -> Result<Vec<u8>, BoxError> {
    if encoded.starts_with(magic) {
        Ok(encoded[magic.len()..].to_vec())
    } else {
        Err(format!("missing {} header", String::from_utf8_lossy(magic)).into())
    }
}

impl Backend for MockBackend {
    type Image = MockImage;
    type Face = MockFace;
    type Shader = MockShader;
    type Player = MockPlayer;

    fn decode_image(&self, bytes: &[u8]) -> Result<MockImage, BoxError> {
        self.calls.images.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(std::time::Duration::from_millis(5));
        if bytes.starts_with(b"BAD") {
            return Err("image: unknown format".into());
        }
        Ok(MockImage {
            bytes: bytes.to_vec(),
        })
    }

    fn new_face(&self, _bytes: &[u8], options: &FaceOptions) -> Result<MockFace, BoxError> {
        self.calls.faces.fetch_add(1, Ordering::SeqCst);
        Ok(MockFace {
            size: options.size,
            dpi: options.dpi,
            line_height: None,
        })
    }

    fn face_height(&self, face: &MockFace) -> f64 {
        face.size * 1.25
    }

    fn face_with_line_height(&self, mut face: MockFace, line_height: f64) -> MockFace {
        face.line_height = Some(line_height);
        face
    }

    fn compile_shader(&self, source: &[u8]) -> Result<MockShader, BoxError> {
        self.calls.shaders.fetch_add(1, Ordering::SeqCst);
        let source = String::from_utf8(source.to_vec())?;
        if source.contains("syntax error") {
            return Err("1:1: syntax error".into());
        }
        Ok(MockShader { source })
    }

    fn decode_wav(&self, encoded: Vec<u8>) -> Result<Box<dyn AudioStream>, BoxError> {
        self.calls.wavs.fetch_add(1, Ordering::SeqCst);
        let pcm = strip_magic(encoded, b"RIFF")?;
        if pcm.starts_with(b"HUGE") {
            let missing = u64::MAX - pcm.len() as u64;
            return Ok(Box::new(Truncated {
                inner: Pcm(Cursor::new(pcm)),
                missing,
            }));
        }
        if pcm.starts_with(b"TRUNC") {
            return Ok(Box::new(Truncated {
                inner: Pcm(Cursor::new(pcm)),
                missing: 10,
            }));
        }
        Ok(Pcm::boxed(pcm))
    }

    fn decode_vorbis(&self, encoded: Vec<u8>) -> Result<Box<dyn AudioStream>, BoxError> {
        self.calls.vorbis.fetch_add(1, Ordering::SeqCst);
        Ok(Pcm::boxed(strip_magic(encoded, b"OggS")?))
    }

    fn player_from_bytes(&self, pcm: Vec<u8>) -> Result<MockPlayer, BoxError> {
        self.calls.players_from_bytes.fetch_add(1, Ordering::SeqCst);
        Ok(MockPlayer::Bytes(pcm))
    }

    fn player_from_stream(&self, mut stream: Box<dyn AudioStream>) -> Result<MockPlayer, BoxError> {
        self.calls.players_from_stream.fetch_add(1, Ordering::SeqCst);
        let mut head = Vec::new();
        let mut buf = [0u8; PLAYER_PROBE];
        while head.len() < PLAYER_PROBE {
            let n = stream.read(&mut buf[..PLAYER_PROBE - head.len()])?;
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        Ok(MockPlayer::Stream {
            head,
            length: stream.length(),
        })
    }
}

/// Memory opener that counts opens and closes
pub struct CountingOpener {
    inner: MemoryOpener,
    pub opens: Arc<AtomicUsize>,
    pub closes: Arc<AtomicUsize>,
}

impl CountingOpener {
    pub fn new(inner: MemoryOpener) -> Self {
        Self {
            inner,
            opens: Arc::new(AtomicUsize::new(0)),
            closes: Arc::new(AtomicUsize::new(0)),
        }
    }
}

struct Counted {
    inner: Box<dyn AssetStream>,
    closes: Arc<AtomicUsize>,
}

impl Read for Counted {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl AssetStream for Counted {
    fn close(self: Box<Self>) -> io::Result<()> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        self.inner.close()
    }
}

impl AssetOpener for CountingOpener {
    fn open(&self, path: &str) -> io::Result<Box<dyn AssetStream>> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        let inner = self.inner.open(path)?;
        Ok(Box::new(Counted {
            inner,
            closes: self.closes.clone(),
        }))
    }
}

/// Stream that reads fine but refuses to close
pub struct StickyStream(pub Cursor<Vec<u8>>);

impl Read for StickyStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.0.read(buf)
    }
}

impl AssetStream for StickyStream {
    fn close(self: Box<Self>) -> io::Result<()> {
        Err(io::Error::other("file already closed"))
    }
}

pub fn wav(pcm: &[u8]) -> Vec<u8> {
    [b"RIFF".as_slice(), pcm].concat()
}

pub fn ogg(pcm: &[u8]) -> Vec<u8> {
    [b"OggS".as_slice(), pcm].concat()
}

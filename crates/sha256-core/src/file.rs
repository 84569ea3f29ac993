//! Streaming a file or reader through the accumulator.
//!
//! Full blocks are read through a fixed-size buffer and compressed as they
//! arrive; only the trailing `len % 64` bytes are read into a block-sized
//! scratch array for padding. Memory use is bounded by the configured buffer
//! regardless of file size.

use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

use crate::consts::BLOCK_BYTES;
use crate::digest::Digest;
use crate::error::{Result, Sha256Error};
use crate::hasher::Sha256;

/// Default read buffer: 64 blocks (4 KiB).
pub const DEFAULT_READ_BUFFER_BLOCKS: usize = 64;

/// Tuning knobs for streamed hashing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FileHashConfig {
    /// Number of 64-byte blocks read per I/O call.
    pub read_buffer_blocks: usize,
}

impl Default for FileHashConfig {
    fn default() -> Self {
        Self {
            read_buffer_blocks: DEFAULT_READ_BUFFER_BLOCKS,
        }
    }
}

impl FileHashConfig {
    fn buffer_bytes(&self, full_blocks: u64) -> Result<usize> {
        let blocks = self.read_buffer_blocks;
        if blocks == 0 {
            return Err(Sha256Error::InvalidBufferSize { blocks });
        }
        let wanted = u64::try_from(blocks).map_or(full_blocks, |b| b.min(full_blocks));
        usize::try_from(wanted)
            .ok()
            .and_then(|w| w.checked_mul(BLOCK_BYTES))
            .ok_or(Sha256Error::InvalidBufferSize { blocks })
    }
}

/// Hashes the file at `path` with the default configuration.
pub fn sha256_of_file<P: AsRef<Path>>(path: P) -> Result<Digest> {
    sha256_of_file_with(path, &FileHashConfig::default())
}

/// Hashes the file at `path`.
///
/// The length is taken from the file metadata when it is opened. Full blocks are
/// streamed from the start, then the trailing partial block is read from offset
/// `len - len % 64`. A file that shrinks while being hashed yields an I/O error.
pub fn sha256_of_file_with<P: AsRef<Path>>(path: P, config: &FileHashConfig) -> Result<Digest> {
    let path = path.as_ref();
    let _span = tracing::debug_span!("sha256_file", path = %path.display()).entered();
    let io_err = |source: io::Error| Sha256Error::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut file = File::open(path).map_err(io_err)?;
    let len = file.metadata().map_err(io_err)?.len();
    let block = BLOCK_BYTES as u64;
    let full_blocks = len / block;
    tracing::debug!(len, full_blocks, "hashing file");

    let mut buf = reserve_buffer(config, full_blocks)?;
    let mut hasher = Sha256::new();
    stream_blocks(&mut file, full_blocks, &mut buf, &mut hasher).map_err(io_err)?;

    let tail_len = (len % block) as usize;
    let mut tail = [0u8; BLOCK_BYTES];
    file.seek(SeekFrom::Start(full_blocks * block))
        .map_err(io_err)?;
    file.read_exact(&mut tail[..tail_len]).map_err(io_err)?;

    let digest = hasher.finish(&tail[..tail_len]);
    tracing::debug!(%digest, "file hashed");
    Ok(digest)
}

/// Hashes exactly `len` bytes from `reader`.
pub fn sha256_of_reader<R: Read>(
    reader: &mut R,
    len: u64,
    config: &FileHashConfig,
) -> Result<Digest> {
    let block = BLOCK_BYTES as u64;
    let full_blocks = len / block;
    let mut buf = reserve_buffer(config, full_blocks)?;
    let mut hasher = Sha256::new();
    stream_blocks(reader, full_blocks, &mut buf, &mut hasher)?;

    let tail_len = (len % block) as usize;
    let mut tail = [0u8; BLOCK_BYTES];
    reader.read_exact(&mut tail[..tail_len])?;
    Ok(hasher.finish(&tail[..tail_len]))
}

fn reserve_buffer(config: &FileHashConfig, full_blocks: u64) -> Result<Vec<u8>> {
    let bytes = config.buffer_bytes(full_blocks)?;
    let mut buf = Vec::new();
    buf.try_reserve_exact(bytes)?;
    buf.resize(bytes, 0);
    Ok(buf)
}

fn stream_blocks<R: Read>(
    reader: &mut R,
    full_blocks: u64,
    buf: &mut [u8],
    hasher: &mut Sha256,
) -> io::Result<()> {
    let per_read = (buf.len() / BLOCK_BYTES) as u64;
    let mut remaining = full_blocks;
    while remaining > 0 {
        let n = remaining.min(per_read) as usize;
        let chunk = &mut buf[..n * BLOCK_BYTES];
        reader.read_exact(chunk)?;
        hasher.ingest_full_blocks(chunk);
        remaining -= n as u64;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hasher::sha256;
    use rand::RngCore;
    use std::io::Cursor;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    struct ScratchFile(PathBuf);

    impl ScratchFile {
        fn with_contents(data: &[u8]) -> Self {
            let n = COUNTER.fetch_add(1, Ordering::Relaxed);
            let path = std::env::temp_dir().join(format!(
                "sha256-core-{}-{}.bin",
                std::process::id(),
                n
            ));
            std::fs::write(&path, data).unwrap();
            Self(path)
        }
    }

    impl Drop for ScratchFile {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.0);
        }
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| i as u8).collect()
    }

    #[test]
    fn file_known_answers() {
        let empty = ScratchFile::with_contents(b"");
        assert_eq!(
            sha256_of_file(&empty.0).unwrap().to_hex(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let abc = ScratchFile::with_contents(b"abc");
        assert_eq!(
            sha256_of_file(&abc.0).unwrap().to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        let partial = ScratchFile::with_contents(&pattern(1000));
        assert_eq!(
            sha256_of_file(&partial.0).unwrap().to_hex(),
            "a8af099bf2e878609558dbf69d8f88f4a31040a8cf84b549a0cfa912f12ffc3f"
        );

        let aligned = ScratchFile::with_contents(&pattern(1280));
        assert_eq!(
            sha256_of_file(&aligned.0).unwrap().to_hex(),
            "d414b085826eb06778483ba35564dc849e643359f69ed9747878ba6e54985bed"
        );
    }

    #[test]
    fn file_and_bytes_agree_across_buffer_sizes() {
        let mut rng = rand::thread_rng();
        for len in [1usize, 55, 56, 63, 64, 65, 127, 128, 129, 4095, 4096, 10_000] {
            let mut data = vec![0u8; len];
            rng.fill_bytes(&mut data);
            let scratch = ScratchFile::with_contents(&data);
            let expected = sha256(&data);
            for blocks in [1usize, 3, 64, usize::MAX] {
                let config = FileHashConfig {
                    read_buffer_blocks: blocks,
                };
                let digest = sha256_of_file_with(&scratch.0, &config).unwrap();
                assert_eq!(digest, expected, "len {len} buffer {blocks}");
            }
        }
    }

    #[test]
    fn reader_matches_bytes() {
        let data = pattern(777);
        let config = FileHashConfig {
            read_buffer_blocks: 2,
        };
        let digest = sha256_of_reader(&mut Cursor::new(&data), data.len() as u64, &config).unwrap();
        assert_eq!(digest, sha256(&data));
    }

    #[test]
    fn short_reader_is_an_io_error() {
        let data = pattern(100);
        let err = sha256_of_reader(&mut Cursor::new(&data), 200, &FileHashConfig::default())
            .unwrap_err();
        assert!(matches!(err, Sha256Error::Read(_)));
        assert!(err.is_io());
    }

    #[test]
    fn missing_file_reports_path() {
        let path = std::env::temp_dir().join("sha256-core-definitely-missing.bin");
        let err = sha256_of_file(&path).unwrap_err();
        match err {
            Sha256Error::Io { path: p, source } => {
                assert_eq!(p, path);
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn zero_buffer_is_rejected() {
        let scratch = ScratchFile::with_contents(b"abc");
        let config = FileHashConfig {
            read_buffer_blocks: 0,
        };
        let err = sha256_of_file_with(&scratch.0, &config).unwrap_err();
        assert!(matches!(err, Sha256Error::InvalidBufferSize { blocks: 0 }));
        assert!(!err.is_io());
    }
}

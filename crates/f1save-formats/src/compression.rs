//! Zlib compression and decompression of the database payload

use crate::error::{ContainerError, ContainerResult};
use flate2::{Compress, Compression, Decompress, FlushCompress, FlushDecompress, Status};
use tracing::{debug, trace};

/// Initial output capacity for compression, as a multiple of the input length
///
/// A starting size only: the output buffer grows if the encoder needs more.
pub const COMPRESS_HEADROOM_FACTOR: usize = 4;

/// Smallest initial output capacity for compression
///
/// Covers the zlib header and trailer when the input is empty or tiny.
const MIN_COMPRESS_CAPACITY: usize = 64;

/// Size of the intermediate buffer used while inflating
pub const DECOMPRESS_CHUNK_SIZE: usize = 1024;

/// Maximum allowed decompression size (1 GB)
///
/// Limits decompression output so a malformed payload cannot exhaust memory.
/// Career saves hold databases of a few hundred megabytes at most.
pub const MAX_DECOMPRESSION_SIZE: usize = 1024 * 1024 * 1024;

/// Compress `data` into a zlib stream at the default level
///
/// Only the produced bytes are returned, never unused buffer capacity.
pub fn compress(data: &[u8]) -> ContainerResult<Vec<u8>> {
    let capacity = data
        .len()
        .saturating_mul(COMPRESS_HEADROOM_FACTOR)
        .max(MIN_COMPRESS_CAPACITY);
    compress_with_capacity(data, capacity)
}

/// Compress `data` starting from an output buffer of `capacity` bytes
///
/// The buffer grows whenever the encoder fills it before the stream ends.
pub fn compress_with_capacity(data: &[u8], capacity: usize) -> ContainerResult<Vec<u8>> {
    let mut output = Vec::with_capacity(capacity);
    let mut deflater = Compress::new(Compression::default(), true);

    loop {
        let consumed = deflater.total_in() as usize;
        let status = deflater
            .compress_vec(&data[consumed..], &mut output, FlushCompress::Finish)
            .map_err(|e| ContainerError::Compression(e.to_string()))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                trace!(
                    "compress output full at {} bytes, growing buffer",
                    output.len()
                );
                output.reserve(output.capacity().max(MIN_COMPRESS_CAPACITY));
            }
        }
    }

    debug!("Zlib: {} bytes -> {} bytes", data.len(), output.len());
    Ok(output)
}

/// Inflate a zlib stream
///
/// Output is collected through a [`DECOMPRESS_CHUNK_SIZE`] buffer until the
/// stream's end marker. Input after the end marker is ignored. A stream that
/// stops making progress before its end marker is reported as
/// [`ContainerError::CorruptStream`].
pub fn decompress(data: &[u8]) -> ContainerResult<Vec<u8>> {
    decompress_with_limit(data, MAX_DECOMPRESSION_SIZE)
}

/// Inflate a zlib stream, failing once the output would exceed `limit` bytes
pub fn decompress_with_limit(data: &[u8], limit: usize) -> ContainerResult<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut output = Vec::new();
    let mut chunk = [0u8; DECOMPRESS_CHUNK_SIZE];

    loop {
        let in_before = inflater.total_in() as usize;
        let out_before = inflater.total_out();

        let status = inflater
            .decompress(&data[in_before..], &mut chunk, FlushDecompress::None)
            .map_err(|e| ContainerError::CorruptStream(e.to_string()))?;

        let consumed = inflater.total_in() as usize - in_before;
        let produced = (inflater.total_out() - out_before) as usize;

        if output.len() + produced > limit {
            return Err(ContainerError::DecompressionLimit { limit });
        }
        output.extend_from_slice(&chunk[..produced]);

        match status {
            Status::StreamEnd => {
                let trailing = data.len() - inflater.total_in() as usize;
                if trailing > 0 {
                    trace!("ignoring {trailing} bytes after end of zlib stream");
                }
                break;
            }
            Status::Ok | Status::BufError => {
                if consumed == 0 && produced == 0 {
                    return Err(ContainerError::CorruptStream(format!(
                        "premature end of stream after {} of {} input bytes",
                        inflater.total_in(),
                        data.len()
                    )));
                }
            }
        }
    }

    debug!("Zlib: {} bytes -> {} bytes", data.len(), output.len());
    Ok(output)
}

//! Core WAV writing and sample conversion functions.

use std::io::{self, Write};

use super::format::{WavFormat, FORMAT_IEEE_FLOAT, HEADER_LEN};

/// Writes a complete WAV file to a writer.
///
/// # Arguments
/// * `writer` - Output writer
/// * `format` - WAV format parameters
/// * `data` - Raw sample bytes
///
/// # Returns
/// Result indicating success or I/O error
pub fn write_wav<W: Write>(writer: &mut W, format: &WavFormat, data: &[u8]) -> io::Result<()> {
    let data_size = u32::try_from(data.len())
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "sample data exceeds 4 GiB"))?;
    let file_size = data_size
        .checked_add(36)
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "sample data exceeds 4 GiB"))?;

    // RIFF header
    writer.write_all(b"RIFF")?;
    writer.write_all(&file_size.to_le_bytes())?;
    writer.write_all(b"WAVE")?;

    // fmt chunk
    writer.write_all(b"fmt ")?;
    writer.write_all(&16u32.to_le_bytes())?;
    writer.write_all(&FORMAT_IEEE_FLOAT.to_le_bytes())?;
    writer.write_all(&format.channels.to_le_bytes())?;
    writer.write_all(&format.sample_rate.to_le_bytes())?;
    writer.write_all(&format.byte_rate().to_le_bytes())?;
    writer.write_all(&format.block_align().to_le_bytes())?;
    writer.write_all(&format.bits_per_sample.to_le_bytes())?;

    // data chunk
    writer.write_all(b"data")?;
    writer.write_all(&data_size.to_le_bytes())?;
    writer.write_all(data)?;

    Ok(())
}

/// Writes a WAV file to a byte vector.
///
/// # Errors
/// Fails only when the sample data does not fit the 32-bit size fields.
pub fn write_wav_to_vec(format: &WavFormat, data: &[u8]) -> io::Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(HEADER_LEN + data.len());
    write_wav(&mut buffer, format, data)?;
    Ok(buffer)
}

/// Converts samples to little-endian 32-bit float bytes.
///
/// Samples are written as-is, without clipping.
pub fn samples_to_f32le(samples: &[f32]) -> Vec<u8> {
    samples.iter().flat_map(|s| s.to_le_bytes()).collect()
}

//! Sample payload extraction and hashing.

/// Extracts the `data` chunk payload from a WAV file buffer.
///
/// Chunks before `data` are skipped, honoring RIFF word alignment. Returns
/// `None` when the buffer is not a RIFF/WAVE file or the chunk is truncated.
pub fn extract_pcm_data(wav_data: &[u8]) -> Option<&[u8]> {
    if wav_data.get(0..4)? != b"RIFF" || wav_data.get(8..12)? != b"WAVE" {
        return None;
    }

    let mut pos = 12;
    while let Some(header) = wav_data.get(pos..pos + 8) {
        let chunk_size = u32::from_le_bytes([header[4], header[5], header[6], header[7]]) as usize;
        let body = pos + 8;

        if &header[0..4] == b"data" {
            return wav_data.get(body..body.checked_add(chunk_size)?);
        }

        pos = body.checked_add(chunk_size)? + chunk_size % 2;
    }

    None
}

/// Computes the BLAKE3 hash of a WAV file's sample payload.
pub fn compute_pcm_hash(wav_data: &[u8]) -> Option<String> {
    extract_pcm_data(wav_data).map(|pcm| blake3::hash(pcm).to_hex().to_string())
}

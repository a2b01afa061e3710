use crate::error::StoreError;

const F32_WIDTH: usize = std::mem::size_of::<f32>();

/// Serializes an embedding as contiguous little-endian `f32` values.
pub fn encode_embedding(vector: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(vector.len() * F32_WIDTH);
    for value in vector {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    bytes
}

pub fn decode_embedding(bytes: &[u8]) -> Result<Vec<f32>, StoreError> {
    if bytes.len() % F32_WIDTH != 0 {
        return Err(StoreError::CorruptEmbedding(bytes.len()));
    }

    Ok(bytes
        .chunks_exact(F32_WIDTH)
        .map(|chunk| f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect())
}

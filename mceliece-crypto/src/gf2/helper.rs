use crate::gf2::{Bit, BitMatrix, BitVector};

use rand::Rng;

/// Samples a `rows`×`cols` matrix of uniformly random bits.
pub fn random_matrix<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> BitMatrix {
    (0..rows)
        .map(|_| (0..cols).map(|_| rng.random::<bool>() as Bit).collect())
        .collect()
}

/// Packs bits MSB-first into bytes; the last byte is zero-padded on the right.
pub fn pack_bits(bits: &[Bit]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |byte, (i, &bit)| byte | ((bit & 1) << (7 - i)))
        })
        .collect()
}

/// Inverse of [`pack_bits`], keeping the first `len` bits.
pub fn unpack_bits(bytes: &[u8], len: usize) -> BitVector {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |i| (byte >> i) & 1))
        .take(len)
        .collect()
}

/// Serde adapter storing a [`BitMatrix`] as its shape plus base64 of the packed row-major bits.
pub mod packed_matrix {
    use super::{pack_bits, unpack_bits};
    use crate::gf2::BitMatrix;

    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;

    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    struct Packed {
        rows: usize,
        cols: usize,
        bits: String,
    }

    pub fn serialize<S: Serializer>(matrix: &BitMatrix, serializer: S) -> Result<S::Ok, S::Error> {
        let cols = matrix.first().map_or(0, |row| row.len());
        let flat: Vec<u8> = matrix.iter().flatten().copied().collect();
        Packed {
            rows: matrix.len(),
            cols,
            bits: STANDARD.encode(pack_bits(&flat)),
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BitMatrix, D::Error> {
        let packed = Packed::deserialize(deserializer)?;
        let bytes = STANDARD
            .decode(&packed.bits)
            .map_err(|e| D::Error::custom(format!("Base64 decoding failed: {}", e)))?;

        let total = packed
            .rows
            .checked_mul(packed.cols)
            .ok_or_else(|| D::Error::custom("matrix shape overflows"))?;
        if bytes.len() * 8 < total {
            return Err(D::Error::custom(format!(
                "expected {} bits for a {}x{} matrix, got {}",
                total,
                packed.rows,
                packed.cols,
                bytes.len() * 8
            )));
        }

        let flat = unpack_bits(&bytes, total);
        if packed.cols == 0 {
            return Ok(vec![Vec::new(); packed.rows]);
        }
        Ok(flat.chunks(packed.cols).map(|row| row.to_vec()).collect())
    }
}

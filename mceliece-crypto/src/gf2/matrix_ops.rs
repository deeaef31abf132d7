use crate::errors::McElieceError;
use crate::gf2::{Bit, BitMatrix, BitVector};

/// Returns `(rows, cols)` of `a`, rejecting ragged matrices.
fn shape(a: &BitMatrix, name: &str) -> Result<(usize, usize), McElieceError> {
    let rows = a.len();
    let cols = a.first().map_or(0, |row| row.len());
    for (i, row) in a.iter().enumerate() {
        if row.len() != cols {
            return Err(McElieceError::DimensionMismatch(format!(
                "Matrix {} row {} has length {} but expected {}",
                name,
                i,
                row.len(),
                cols
            )));
        }
    }
    Ok((rows, cols))
}

/// x·A where x is a length–m row‐vector and A is m×n.
/// Returns a length–n row‐vector.
pub fn vector_matrix_mul(x: &BitVector, a: &BitMatrix) -> Result<BitVector, McElieceError> {
    let m = x.len();
    if m == 0 {
        return Ok(Vec::new());
    }
    if a.len() != m {
        return Err(McElieceError::DimensionMismatch(format!(
            "Vector length ({}) must match matrix rows ({})",
            m,
            a.len()
        )));
    }
    let (_, n) = shape(a, "A")?;

    let mut y = vec![0; n];
    for (&xi, row) in x.iter().zip(a) {
        if xi & 1 == 0 {
            continue;
        }
        for (yj, &aij) in y.iter_mut().zip(row) {
            *yj ^= aij & 1;
        }
    }
    Ok(y)
}

/// Computes the vector sum `c = a + b` over GF(2).
///
/// # Errors
///
/// Returns `McElieceError::DimensionMismatch` if the vectors have different lengths.
pub fn vector_add(a: &BitVector, b: &BitVector) -> Result<BitVector, McElieceError> {
    if a.len() != b.len() {
        return Err(McElieceError::DimensionMismatch(format!(
            "Vector lengths must match for addition ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b).map(|(&x, &y)| (x ^ y) & 1).collect())
}

/// Computes the matrix product `C = AB` with every accumulation reduced mod 2.
///
/// # Errors
///
/// Returns `McElieceError::DimensionMismatch` if the inner dimensions of the matrices do not match
/// or if rows within the matrices have inconsistent lengths.
pub fn matrix_mul(a: &BitMatrix, b: &BitMatrix) -> Result<BitMatrix, McElieceError> {
    let (n, m_common) = shape(a, "A")?;
    if n == 0 {
        return Ok(BitMatrix::new());
    }
    let (b_rows, p) = shape(b, "B")?;

    if b_rows != m_common {
        return Err(McElieceError::DimensionMismatch(format!(
            "Inner dimensions must match for matrix multiplication ({} vs {})",
            m_common, b_rows
        )));
    }

    let mut c = vec![vec![0; p]; n];
    for (c_row, a_row) in c.iter_mut().zip(a) {
        // Row i of C is the sum of the rows of B selected by row i of A.
        for (&aik, b_row) in a_row.iter().zip(b) {
            if aik & 1 == 0 {
                continue;
            }
            for (cij, &bkj) in c_row.iter_mut().zip(b_row) {
                *cij ^= bkj & 1;
            }
        }
    }
    Ok(c)
}

/// Element-wise exclusive-or of two matrices of equal shape.
///
/// # Errors
///
/// Returns `McElieceError::DimensionMismatch` when the shapes differ.
pub fn matrix_add(a: &BitMatrix, b: &BitMatrix) -> Result<BitMatrix, McElieceError> {
    let shape_a = shape(a, "A")?;
    let shape_b = shape(b, "B")?;
    if shape_a != shape_b {
        return Err(McElieceError::DimensionMismatch(format!(
            "Matrix shapes must match for addition ({}x{} vs {}x{})",
            shape_a.0, shape_a.1, shape_b.0, shape_b.1
        )));
    }
    a.iter()
        .zip(b)
        .map(|(ra, rb)| vector_add(ra, rb))
        .collect()
}

/// Transposes a rectangular matrix. Ragged input is truncated to the width of its
/// shortest row.
pub fn transpose(a: &BitMatrix) -> BitMatrix {
    let cols = a.iter().map(|row| row.len()).min().unwrap_or(0);
    (0..cols)
        .map(|j| a.iter().map(|row| row[j]).collect())
        .collect()
}

/// Creates an identity matrix of size `n`.
pub fn identity_matrix(n: usize) -> BitMatrix {
    let mut identity = vec![vec![0; n]; n];
    for (i, row) in identity.iter_mut().enumerate() {
        row[i] = 1;
    }
    identity
}

/// Places `b` to the right of `a`, producing `[A | B]`.
pub fn concat_columns(a: &BitMatrix, b: &BitMatrix) -> Result<BitMatrix, McElieceError> {
    if a.len() != b.len() {
        return Err(McElieceError::DimensionMismatch(format!(
            "Row counts must match to concatenate ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    shape(a, "A")?;
    shape(b, "B")?;
    Ok(a.iter()
        .zip(b)
        .map(|(ra, rb)| ra.iter().chain(rb).copied().collect())
        .collect())
}

/// Number of set bits in `v`.
pub fn hamming_weight(v: &[Bit]) -> usize {
    v.iter().filter(|&&bit| bit & 1 == 1).count()
}

pub fn is_zero(v: &[Bit]) -> bool {
    v.iter().all(|&bit| bit & 1 == 0)
}

/// Inverts a square matrix over GF(2) by Gauss–Jordan elimination on `[A | I]`.
///
/// The input is copied; only the scratch copy is reduced.
///
/// # Errors
///
/// Returns `McElieceError::DimensionMismatch` for a non-square matrix and
/// `McElieceError::Singular` when some column has no pivot.
pub fn matrix_inverse(matrix: &BitMatrix) -> Result<BitMatrix, McElieceError> {
    let n = matrix.len();
    if n == 0 {
        return Ok(Vec::new());
    }
    for row in matrix.iter() {
        if row.len() != n {
            return Err(McElieceError::DimensionMismatch(
                "matrix_inverse: matrix must be square".into(),
            ));
        }
    }

    let mut augmented = concat_columns(matrix, &identity_matrix(n))?;
    for row in augmented.iter_mut() {
        for bit in row.iter_mut() {
            *bit &= 1;
        }
    }

    for col in 0..n {
        let pivot = (col..n)
            .find(|&row| augmented[row][col] == 1)
            .ok_or(McElieceError::Singular)?;
        augmented.swap(col, pivot);

        let pivot_row = augmented[col].clone();
        for (r, row) in augmented.iter_mut().enumerate() {
            if r != col && row[col] == 1 {
                for (x, &p) in row.iter_mut().zip(&pivot_row) {
                    *x ^= p;
                }
            }
        }
    }

    Ok(augmented.into_iter().map(|row| row[n..].to_vec()).collect())
}

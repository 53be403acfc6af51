// ADJBENCH MATRIX GENERATOR
// SEEDED RANDOM SYMMETRIC 0/1 ADJACENCY MATRICES WITH ZERO DIAGONAL.
//
// ONE ChaCha8 STREAM PER generate() CALL, SEEDED ONCE, CONSUMED IN SIZE-SPEC
// DECLARATION ORDER. SAME SEED + SAME SPEC = BIT-IDENTICAL MATRICES.
// EVERY CELL OF THE N*N GRID CONSUMES ONE DRAW; ONLY row < col IS KEPT AND
// MIRRORED, SO THE LOWER TRIANGLE IS NEVER DRAWN INDEPENDENTLY.

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{GenerationError, ParseError};

// ---------------------------------------------------------------------------
// MATRIX
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    n: usize,
    cells: Vec<u8>,
}

impl Matrix {
    fn random<R: Rng>(rng: &mut R, n: usize) -> Self {
        let mut cells = vec![0u8; n * n];
        for i in 0..n {
            for j in 0..n {
                let bit = rng.gen_bool(0.5);
                if i < j && bit {
                    cells[i * n + j] = 1;
                    cells[j * n + i] = 1;
                }
            }
        }
        Self { n, cells }
    }

    // BUILD FROM AN UNDIRECTED EDGE LIST. SELF-LOOPS AND OUT-OF-RANGE
    // ENDPOINTS ARE IGNORED SO THE INVARIANTS ALWAYS HOLD.
    pub fn from_edges(n: usize, edges: &[(usize, usize)]) -> Self {
        let mut cells = vec![0u8; n * n];
        for &(a, b) in edges {
            if a == b || a >= n || b >= n {
                continue;
            }
            cells[a * n + b] = 1;
            cells[b * n + a] = 1;
        }
        Self { n, cells }
    }

    pub fn dim(&self) -> usize {
        self.n
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.n + col]
    }

    pub fn row(&self, row: usize) -> &[u8] {
        &self.cells[row * self.n..(row + 1) * self.n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks(0) PANICS (from_edges ACCEPTS N=0)
        self.cells.chunks(self.n.max(1)).take(self.n)
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.n).all(|i| (i + 1..self.n).all(|j| self.get(i, j) == self.get(j, i)))
    }

    pub fn has_zero_diagonal(&self) -> bool {
        (0..self.n).all(|i| self.get(i, i) == 0)
    }

    // PARSE THE CANONICAL TEXT FORMAT: DIMENSION LINE, THEN N ROWS OF N 0/1 VALUES.
    // TRAILING BLANK LINES ARE TOLERATED.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = text.lines();
        let dim_line = lines
            .next()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .ok_or(ParseError::MissingDimension)?;
        let n: usize = dim_line
            .parse()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| ParseError::InvalidDimension(dim_line.to_string()))?;

        let mut rows: Vec<&str> = lines.collect();
        while rows.last().is_some_and(|l| l.trim().is_empty()) {
            rows.pop();
        }
        if rows.len() != n {
            return Err(ParseError::RowCount { expected: n, found: rows.len() });
        }

        let mut cells = Vec::with_capacity(n * n);
        for (row, line) in rows.iter().enumerate() {
            let values: Vec<&str> = line.split_whitespace().collect();
            if values.len() != n {
                return Err(ParseError::RowLength { row, expected: n, found: values.len() });
            }
            for (col, v) in values.into_iter().enumerate() {
                match v {
                    "0" => cells.push(0),
                    "1" => cells.push(1),
                    _ => {
                        return Err(ParseError::InvalidValue {
                            row,
                            col,
                            value: v.to_string(),
                        })
                    }
                }
            }
        }
        Ok(Self { n, cells })
    }
}

// ---------------------------------------------------------------------------
// SIZE SPEC
// ---------------------------------------------------------------------------

// ORDERED label -> N. ORDER IS PART OF THE DETERMINISM CONTRACT.
// SIZES ARE SIGNED SO A NON-POSITIVE ENTRY SURVIVES UNTIL validate() REJECTS IT.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizeSpec {
    entries: Vec<(String, i64)>,
}

impl SizeSpec {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn with(mut self, label: impl Into<String>, size: i64) -> Self {
        self.entries.push((label.into(), size));
        self
    }

    // PARSE "label=N" TOKENS IN ORDER
    pub fn parse_entries<S: AsRef<str>>(tokens: &[S]) -> Result<Self, GenerationError> {
        let mut spec = Self::new();
        for token in tokens {
            let token = token.as_ref();
            let (label, size) = token
                .split_once('=')
                .ok_or_else(|| GenerationError::InvalidEntry(token.to_string()))?;
            let label = label.trim();
            if label.is_empty() {
                return Err(GenerationError::InvalidEntry(token.to_string()));
            }
            let size: i64 = size
                .trim()
                .parse()
                .map_err(|_| GenerationError::InvalidEntry(token.to_string()))?;
            spec = spec.with(label, size);
        }
        Ok(spec)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        let mut seen = HashSet::new();
        for (label, size) in &self.entries {
            let cells = usize::try_from(*size)
                .ok()
                .filter(|&n| n > 0)
                .and_then(|n| n.checked_mul(n));
            if cells.is_none() {
                return Err(GenerationError::InvalidSize {
                    label: label.clone(),
                    size: *size,
                });
            }
            if !seen.insert(label.as_str()) {
                return Err(GenerationError::DuplicateLabel(label.clone()));
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.entries.iter().map(|(l, s)| (l.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SizeSpec {
    fn default() -> Self {
        Self::new()
            .with("small", 100)
            .with("medium", 300)
            .with("large", 600)
    }
}

// ---------------------------------------------------------------------------
// GENERATION
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatrixSet {
    entries: Vec<(String, Matrix)>,
}

impl MatrixSet {
    pub fn get(&self, label: &str) -> Option<&Matrix> {
        self.entries.iter().find(|(l, _)| l == label).map(|(_, m)| m)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matrix)> {
        self.entries.iter().map(|(l, m)| (l.as_str(), m))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn generate(seed: u64, spec: &SizeSpec) -> Result<MatrixSet, GenerationError> {
    spec.validate()?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut entries = Vec::with_capacity(spec.len());
    for (label, size) in spec.iter() {
        // validate() GUARANTEES 1 <= size AND size*size FITS IN usize
        let n = size as usize;
        tracing::debug!(label, n, "generating matrix");
        entries.push((label.to_string(), Matrix::random(&mut rng, n)));
    }
    Ok(MatrixSet { entries })
}

// ADJBENCH MATRIX WRITER
// CANONICAL FORMAT: DIMENSION LINE, THEN ONE LINE PER ROW OF SPACE-SEPARATED 0/1.
// EVERY LINE IS NEWLINE-TERMINATED. EXISTING FILES ARE OVERWRITTEN.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{ReadError, WriteError};
use crate::matrix::{Matrix, MatrixSet};

fn push_row(row: &[u8], line: &mut String) {
    for (j, v) in row.iter().enumerate() {
        if j > 0 {
            line.push(' ');
        }
        line.push(if *v == 0 { '0' } else { '1' });
    }
    line.push('\n');
}

pub fn render_to<W: Write>(matrix: &Matrix, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", matrix.dim())?;
    let mut line = String::with_capacity(matrix.dim() * 2);
    for row in matrix.rows() {
        line.clear();
        push_row(row, &mut line);
        out.write_all(line.as_bytes())?;
    }
    Ok(())
}

pub fn render(matrix: &Matrix) -> String {
    let n = matrix.dim();
    let mut text = format!("{}\n", n);
    text.reserve(n * n * 2);
    for row in matrix.rows() {
        push_row(row, &mut text);
    }
    text
}

pub fn write(matrix: &Matrix, path: &Path) -> Result<(), WriteError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let to_err = |source| WriteError::Write {
        path: path.to_path_buf(),
        source,
    };
    let file = fs::File::create(path).map_err(to_err)?;
    let mut out = BufWriter::new(file);
    render_to(matrix, &mut out).map_err(to_err)?;
    out.flush().map_err(to_err)?;
    Ok(())
}

// WRITE <dir>/<label>.txt FOR EACH MATRIX IN ORDER.
// STOPS AT THE FIRST FAILURE: THE CALLER TREATS THE WHOLE BATCH AS FAILED.
pub fn write_all(set: &MatrixSet, dir: &Path) -> Result<Vec<PathBuf>, WriteError> {
    fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(set.len());
    for (label, matrix) in set.iter() {
        let path = dir.join(format!("{}.txt", label));
        write(matrix, &path)?;
        tracing::debug!(path = %path.display(), "matrix written");
        written.push(path);
    }
    Ok(written)
}

pub fn read_matrix(path: &Path) -> Result<Matrix, ReadError> {
    let text = fs::read_to_string(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Matrix::parse(&text).map_err(|source| ReadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_three_by_three() {
        let m = Matrix::from_edges(3, &[(0, 1), (1, 2)]);
        assert_eq!(render(&m), "3\n0 1 0\n1 0 1\n0 1 0\n");
    }

    #[test]
    fn render_single_cell() {
        let m = Matrix::from_edges(1, &[]);
        assert_eq!(render(&m), "1\n0\n");
    }

    #[test]
    fn render_matches_file_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.txt");
        let m = Matrix::from_edges(4, &[(0, 3), (1, 2), (2, 3)]);
        write(&m, &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), render(&m));
    }

    #[test]
    fn write_creates_parent_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/m.txt");

        write(&Matrix::from_edges(2, &[(0, 1)]), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "2\n0 1\n1 0\n");

        write(&Matrix::from_edges(1, &[]), &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n0\n");
    }

    #[test]
    fn write_fails_when_parent_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();

        let err = write(&Matrix::from_edges(2, &[]), &blocker.join("m.txt")).unwrap_err();
        assert!(matches!(err, WriteError::CreateDir { .. }));
    }

    #[test]
    fn read_matrix_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "x\n").unwrap();
        let err = read_matrix(&path).unwrap_err();
        assert!(err.to_string().contains("bad.txt"));
        assert!(matches!(err, ReadError::Parse { .. }));
    }
}

//! # Certifying a small mixed integer program
//!
//! The problem has integer, binary and free variables, a ranged row, an indicator constraint and a
//! special ordered set. Variations of the solution are written to temporary files.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tempfile::TempDir;

/// # Reading, loading and checking
mod test;

/// Folder where the problem and solution files are stored.
///
/// The path is relative to the project root folder.
fn file_directory() -> PathBuf {
    Path::new(file!()).parent().unwrap().to_path_buf()
}

/// Path of a file stored next to the tests.
fn get_test_file_path(name: &str) -> PathBuf {
    file_directory().join(name)
}

/// Write a file into a temporary directory.
fn write(directory: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = directory.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Write a gzip compressed file into a temporary directory.
fn write_compressed(directory: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = directory.path().join(name);
    let mut encoder = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    encoder.write_all(contents.as_bytes()).unwrap();
    encoder.finish().unwrap();
    path
}

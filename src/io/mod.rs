//! # Reading of problem and solution files
//!
//! This module provides read functionality for problems in the MPS format, and for solutions
//! listing a value per variable.
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;

use crate::data::problem::Problem;
use crate::io::error::Import;

pub mod error;
pub mod mps;
pub mod solution;

/// Extension of files that are compressed with gzip.
const COMPRESSED: &str = "gz";

/// Import a problem from a file.
///
/// Currently only supports the MPS filetype, optionally compressed with gzip.
///
/// # Errors
///
/// When a file extension is unknown, a file cannot be found or read, there is an inconsistency in
/// the problem file, etc. an error type is returned.
pub fn import(file_path: &Path) -> Result<Problem, Import> {
    let (compressed, extension) = extensions(file_path);

    // Choose the right parser
    match extension {
        Some(extension) => match extension.to_str() {
            Some("mps" | "MPS" | "SIF") => {
                tracing::debug!(
                    component = "io",
                    operation = "import",
                    path = %file_path.display(),
                    compressed,
                    "Reading problem file"
                );
                mps::parse(open(file_path)?)
            },
            Some(extension_string) => Err(Import::FileExtension(format!(
                "Could not recognise file extension \"{}\" of file: {:?}",
                extension_string, file_path
            ))),
            None => Err(Import::FileExtension(format!(
                "Could not convert OsStr to &str, probably invalid unicode: {:?}",
                extension
            ))),
        },
        None => Err(Import::FileExtension(format!(
            "Could not read extension from file path: {:?}",
            file_path
        ))),
    }
}

/// Open a file for reading line by line, decompressing it if its name ends in `.gz`.
///
/// # Errors
///
/// If the file can't be opened.
pub(crate) fn open(file_path: &Path) -> Result<Box<dyn BufRead>, Import> {
    let file = File::open(file_path)?;

    Ok(if extensions(file_path).0 {
        Box::new(BufReader::new(GzDecoder::new(file)))
    } else {
        Box::new(BufReader::new(file))
    })
}

/// Whether the file is compressed, and the extension of the file after decompression.
fn extensions(file_path: &Path) -> (bool, Option<&std::ffi::OsStr>) {
    match file_path.extension() {
        Some(extension) if extension == COMPRESSED => {
            (true, file_path.file_stem().map(Path::new).and_then(Path::extension))
        },
        extension => (false, extension),
    }
}

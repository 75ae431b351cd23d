//! # Reading lines
//!
//! MPS files come in two layouts. In the fixed layout, fields start at fixed columns and names may
//! contain blanks. In the free layout, fields are separated by whitespace. Files don't say which
//! layout they use, so it is derived line by line: as long as lines fit the fixed layout, they are
//! read as such. Once a line doesn't, the rest of the file is read in the free layout.
use std::io::BufRead;
use std::ops::RangeInclusive;

use crate::io::error::{FileLocation, Import, ParseError};
use crate::io::mps::Section;
use crate::io::mps::token::{
    COLUMN_SECTION_MARKER, COMMENT_INDICATOR, END_OF_INTEGER, INLINE_COMMENT_INDICATOR, PATCH,
    START_OF_INTEGER,
};

/// Lines are padded with blanks up to this length before inspecting fixed positions.
const MINIMUM_LINE_LENGTH: usize = 80;

/// Positions that are blank in every line of the fixed layout.
const SEPARATORS: [usize; 12] = [12, 13, 22, 23, 36, 37, 38, 47, 48, 61, 62, 63];

/// The first numeric field of the fixed layout.
const NUMBER_FIELD: RangeInclusive<usize> = 24..=35;

/// The name fields of the fixed layout, which may contain blanks.
const NAME_FIELDS: [RangeInclusive<usize>; 3] = [4..=12, 14..=22, 39..=47];

/// At most this many fields after the first column are read.
const MAXIMUM_FIELDS: usize = 5;

/// Whether lines are still read in the fixed layout.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum Layout {
    /// All lines so far fit the fixed layout.
    Undecided,
    /// A line didn't fit the fixed layout, this never reverts.
    Free,
}

/// Contents of a meaningful line.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) enum Content {
    /// A line starting in the first column announces a section.
    Section {
        header: String,
        argument: Option<String>,
    },
    /// Up to five fields, never empty.
    Data(Vec<String>),
    /// Switches the type of new columns.
    Marker(Marker),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(super) enum Marker {
    IntegerStart,
    IntegerEnd,
}

/// A meaningful line, with its location for error reporting.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Line {
    pub number: u64,
    pub text: String,
    pub content: Content,
}

impl Line {
    pub fn location(&self) -> FileLocation<'_> {
        (self.number, &self.text)
    }
}

/// Reads a problem file line by line, skipping comments and empty lines.
pub(super) struct Lines<R> {
    reader: R,
    buffer: Vec<u8>,
    line_number: u64,
    layout: Layout,
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::with_capacity(MINIMUM_LINE_LENGTH + 1),
            line_number: 0,
            layout: Layout::Undecided,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Read the next meaningful line.
    ///
    /// # Arguments
    ///
    /// * `section`: The section currently being read. Only in sections with numeric fields, a line
    /// without a number at the fixed position decides the layout to be free.
    ///
    /// # Return value
    ///
    /// `None` at the end of the input.
    ///
    /// # Errors
    ///
    /// If reading fails, or if a marker line has an unknown marker type.
    pub fn next(&mut self, section: Section) -> Result<Option<Line>, Import> {
        loop {
            self.buffer.clear();
            let length = self.reader.read_until(b'\n', &mut self.buffer)?;
            if length == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if self.buffer[0] == COMMENT_INDICATOR {
                continue;
            }

            let text = String::from_utf8_lossy(&self.buffer).trim_end_matches(['\n', '\r']).to_string();
            for byte in &mut self.buffer {
                if matches!(*byte, b'\t' | b'\n' | b'\r') {
                    *byte = b' ';
                }
            }
            if self.buffer.len() < MINIMUM_LINE_LENGTH {
                self.buffer.resize(MINIMUM_LINE_LENGTH, b' ');
            }

            if self.buffer[0] != b' ' {
                let mut words = words(&self.buffer);
                let header = words.next().unwrap_or_default();
                let argument = words.next();
                return Ok(Some(Line {
                    number: self.line_number,
                    text,
                    content: Content::Section { header, argument },
                }));
            }

            if self.layout == Layout::Undecided {
                self.inspect_fixed(section, length);
            }

            let fields = fields(&self.buffer[1..]);
            if fields.is_empty() {
                continue;
            }

            let content = match marker(&fields).map(|marker| marker.map_err(str::to_string)) {
                None => Content::Data(fields),
                Some(Ok(marker)) => Content::Marker(marker),
                Some(Err(kind)) => return Err(ParseError::with_location(
                    format!("Marker type \"{}\" unknown", kind), (self.line_number, &text),
                ).into()),
            };

            return Ok(Some(Line { number: self.line_number, text, content }));
        }
    }

    /// Prepare a line for reading in the fixed layout, or decide that the layout is free.
    ///
    /// In the fixed layout, inline comments are removed, and blanks inside of names are replaced
    /// such that the line can be split on blanks.
    fn inspect_fixed(&mut self, section: Section, length: usize) {
        let buffer = &mut self.buffer;

        if buffer[14] == INLINE_COMMENT_INDICATOR && buffer[13] == b' ' {
            buffer[14..].fill(b' ');
        } else if buffer[39] == INLINE_COMMENT_INDICATOR && buffer[38] == b' ' {
            buffer[39..].fill(b' ');
        }

        if SEPARATORS.iter().all(|&i| buffer[i] == b' ') {
            let has_number = buffer[NUMBER_FIELD].iter().any(u8::is_ascii_digit);
            let numeric = matches!(section, Section::Columns | Section::Rhs | Section::Ranges | Section::Bounds);
            // short lines outside of the numeric sections are e.g. row declarations
            if has_number || (length < 13 && !numeric) {
                for field in NAME_FIELDS {
                    patch(&mut buffer[field]);
                }
            } else if numeric {
                self.switch_to_free();
            }
        } else {
            self.switch_to_free();
        }
    }

    fn switch_to_free(&mut self) {
        tracing::debug!(
            component = "mps",
            operation = "detect_layout",
            line = self.line_number,
            "Switching to the free layout"
        );
        self.layout = Layout::Free;
    }
}

/// Replace the blanks inside of a field, leaving leading and trailing blanks.
fn patch(field: &mut [u8]) {
    let start = field.iter().position(|&byte| byte != b' ');
    let end = field.iter().rposition(|&byte| byte != b' ');
    if let (Some(start), Some(end)) = (start, end) {
        for byte in &mut field[start..=end] {
            if *byte == b' ' {
                *byte = PATCH;
            }
        }
    }
}

fn words(buffer: &[u8]) -> impl Iterator<Item = String> + '_ {
    buffer.split(|&byte| byte == b' ')
        .filter(|word| !word.is_empty())
        .map(|word| String::from_utf8_lossy(word).into_owned())
}

/// Split a data line into fields.
///
/// Everything from a field starting with the inline comment indicator is ignored, except when it
/// is the first field.
fn fields(buffer: &[u8]) -> Vec<String> {
    let mut words = words(buffer);

    let mut fields = Vec::with_capacity(MAXIMUM_FIELDS);
    fields.extend(words.next());
    fields.extend(words
        .take_while(|word| !word.starts_with(char::from(INLINE_COMMENT_INDICATOR)))
        .take(MAXIMUM_FIELDS - 1));

    fields
}

/// Recognize a marker line.
///
/// The marker keyword is in the second or third field, followed by the marker type.
///
/// # Return value
///
/// `None` if this is not a marker line, the marker type text as an error if it is unknown.
fn marker(fields: &[String]) -> Option<Result<Marker, &str>> {
    let position = fields.iter()
        .take(3)
        .skip(1)
        .position(|field| field == COLUMN_SECTION_MARKER)?;

    match fields.get(position + 2).map(String::as_str) {
        Some(START_OF_INTEGER) => Some(Ok(Marker::IntegerStart)),
        Some(END_OF_INTEGER) => Some(Ok(Marker::IntegerEnd)),
        Some(other) => Some(Err(other)),
        None => Some(Err("")),
    }
}

//! # Tokens used in MPS files

/// Indicates the start of a comment, only as the first character of a line.
pub const COMMENT_INDICATOR: u8 = b'*';

/// Indicates the start of an inline comment.
pub const INLINE_COMMENT_INDICATOR: u8 = b'$';

/// Should be on the start of the first line of the non comment lines.
pub const NAME: &str = "NAME";

/// Name of the problem when the `NAME` line doesn't give one.
pub const DEFAULT_NAME: &str = "_MPS_";

/// Indicates a line denoting a change in variable type.
///
/// This change is either from continuous to integer, or vice versa.
///
/// # Note
///
/// This token is expected only in the COLUMN section.
pub const COLUMN_SECTION_MARKER: &str = "'MARKER'";

/// Marks the start of the integer variables.
///
/// # Note
///
/// Expected only on a line with a `COLUMN_SECTION_MARKER`.
pub const START_OF_INTEGER: &str = "'INTORG'";

/// Indicates the end of the integer variables.
///
/// More data for continuous variables may follow.
///
/// # Note
///
/// Expected only on a line with a `COLUMN_SECTION_MARKER`.
pub const END_OF_INTEGER: &str = "'INTEND'";

/// Set name inserted when a line in the RHS section omits it.
pub const DEFAULT_RHS_SET: &str = "_RHS_";
/// Set name inserted when a line in the RANGES section omits it.
pub const DEFAULT_RANGE_SET: &str = "_RNG_";
/// Set name inserted when a line in the BOUNDS section omits it.
pub const DEFAULT_BOUND_SET: &str = "_BND_";

/// Every line of the INDICATORS section starts with this.
pub const INDICATOR: &str = "IF";

/// Replaces blanks inside of names in fixed format lines.
pub const PATCH: u8 = b'_';

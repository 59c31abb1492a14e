//! Exit code registry for `sanity-check`.
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! | 0    | Success                                  |
//! | 1    | General error                            |
//! | 2    | Usage error (bad or missing arguments)   |
//! | 3    | Input path is not a `.csv` file          |
//! | 4    | Input file not found                     |
//! | 5    | Input file is not valid CSV              |
//! | 6    | Required column missing                  |
//! | 7    | A prediction was rejected by the parser  |

use crate::error::SanityError;

pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error. clap exits with this code on its own.
pub const EXIT_USAGE: u8 = 2;

pub const EXIT_INVALID_FORMAT: u8 = 3;
pub const EXIT_NOT_FOUND: u8 = 4;
pub const EXIT_PARSE: u8 = 5;
pub const EXIT_SCHEMA: u8 = 6;
pub const EXIT_PREDICTION: u8 = 7;

/// Map a fatal error onto its exit code.
pub fn exit_code(err: &SanityError) -> u8 {
    match err {
        SanityError::InvalidFormat { .. } => EXIT_INVALID_FORMAT,
        SanityError::NotFound { .. } => EXIT_NOT_FOUND,
        SanityError::Parse { .. } => EXIT_PARSE,
        SanityError::Schema(_) => EXIT_SCHEMA,
        SanityError::Prediction { .. } => EXIT_PREDICTION,
        SanityError::Io(_) => EXIT_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    #[test]
    fn codes_are_distinct() {
        let codes = [
            EXIT_SUCCESS,
            EXIT_ERROR,
            EXIT_USAGE,
            EXIT_INVALID_FORMAT,
            EXIT_NOT_FOUND,
            EXIT_PARSE,
            EXIT_SCHEMA,
            EXIT_PREDICTION,
        ];
        let unique: BTreeSet<u8> = codes.iter().copied().collect();
        assert_eq!(unique.len(), codes.len());
    }
}

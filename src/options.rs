//! Parse options shared by the DF and DG decoders.
//!
//! Adapted from goblin's own `ParseMode`/`ParseOptions` convention: most
//! tag-dispatch failures have no safe recovery (an unknown tag's payload
//! length isn't knowable without its table entry), but a DF declared
//! count exceeded by its actual children is safely skippable, and
//! permissive mode is this crate's one use for it (see
//! `df::decode_data_file_with_options`).

/// Binary parsing mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Fail on the first recoverable inconsistency.
    #[default]
    Strict,
    /// Log a warning and continue past recoverable inconsistencies.
    Permissive,
}

/// Options threaded through the DF decoder's entry points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub parse_mode: ParseMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions { parse_mode: ParseMode::Strict }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn permissive() -> Self {
        ParseOptions { parse_mode: ParseMode::Permissive }
    }

    pub fn strict() -> Self {
        ParseOptions { parse_mode: ParseMode::Strict }
    }
}

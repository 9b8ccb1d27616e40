//! Tag tables: per-context `tag byte -> {name, wire kind, child context}`
//! (spec component B).
//!
//! Tag IDs are assigned once, densely, per context; they may be appended
//! to but never renumbered. The numeric values below are this crate's own
//! assignment (see `SPEC_FULL.md` §6, Open Questions) since the legacy
//! header that carried the original numeric tag IDs was not present in
//! the retrieved source pack — only their names and relative order were.

/// The wire-level kind that drives dispatch on both sides of the codec
/// (spec §3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireKind {
    Structure,
    Flag,
    Char,
    Short,
    Long,
    Float,
    Version,
    String,
    StringArray,
    CharArray,
    ShortArray,
    LongArray,
    FloatArray,
    ListArray,
    VoidArray,
}

/// The terminal tag value shared by every context.
pub const END_STRUCT: u8 = 0xFF;

/// A single row of a tag table.
#[derive(Debug, Clone, Copy)]
pub struct TagEntry {
    pub tag: u8,
    pub name: &'static str,
    pub kind: WireKind,
    /// Meaningful only for `WireKind::Structure`: the context to push
    /// after emitting/consuming the opening tag.
    pub child: Option<Context>,
}

/// Identifies which table is in force during encode/decode (spec
/// component B/C "context").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    TopLevel,
    DataFile,
    DfInfo,
    ObsPeriod,
    ObsInfo,
    EvData,
    EvList,
    EmData,
    SpData,
    SpChannel,
    CellInfo,
    DynGroup,
    DynList,
}

impl Context {
    pub fn name(self) -> &'static str {
        match self {
            Context::TopLevel => "TOP_LEVEL",
            Context::DataFile => "DATA_FILE",
            Context::DfInfo => "DF_INFO",
            Context::ObsPeriod => "OBS_PERIOD",
            Context::ObsInfo => "OBS_INFO",
            Context::EvData => "EVENT_DATA",
            Context::EvList => "EV_LIST",
            Context::EmData => "EM_DATA",
            Context::SpData => "SPIKE_DATA",
            Context::SpChannel => "SP_CHANNEL",
            Context::CellInfo => "CELL_INFO",
            Context::DynGroup => "DYN_GROUP",
            Context::DynList => "DYN_LIST",
        }
    }

    /// Look up a tag's table entry for this context.
    pub fn lookup(self, tag: u8) -> Option<&'static TagEntry> {
        table_for(self).iter().find(|e| e.tag == tag)
    }
}

macro_rules! tag_table {
    ($name:ident, $([$tag:expr, $nm:expr, $kind:expr, $child:expr]),+ $(,)?) => {
        pub static $name: &[TagEntry] = &[
            $(TagEntry { tag: $tag, name: $nm, kind: $kind, child: $child }),+
        ];
    };
}

use WireKind::*;

tag_table!(TOP_LEVEL_TAGS,
    [0x01, "VERSION", Version, None],
    [0x02, "DATA_FILE", Structure, Some(Context::DataFile)],
    [0x03, "DYN_GROUP", Structure, Some(Context::DynGroup)],
);

tag_table!(DATA_FILE_TAGS,
    [0x01, "DF_INFO", Structure, Some(Context::DfInfo)],
    [0x02, "NOBS_PERIODS", Long, None],
    [0x03, "OBS_PERIOD", Structure, Some(Context::ObsPeriod)],
    [0x04, "NCELL_INFOS", Long, None],
    [0x05, "CELL_INFO", Structure, Some(Context::CellInfo)],
);

tag_table!(DF_INFO_TAGS,
    [0x01, "FILENAME", String, None],
    [0x02, "TIME", Long, None],
    [0x03, "FILENUM", Long, None],
    [0x04, "COMMENTS", String, None],
    [0x05, "EXP_ID", Long, None],
    [0x06, "TEST_MODE", Long, None],
    [0x07, "EM_ON", Char, None],
    [0x08, "SPIKE_ON", Char, None],
    [0x09, "NSTIMTYPES", Long, None],
    [0x0A, "AUXFILES", StringArray, None],
);

tag_table!(OBS_PERIOD_TAGS,
    [0x01, "OBSP_INFO", Structure, Some(Context::ObsInfo)],
    [0x02, "EVENT_DATA", Structure, Some(Context::EvData)],
    [0x03, "SPIKE_DATA", Structure, Some(Context::SpData)],
    [0x04, "EM_DATA", Structure, Some(Context::EmData)],
);

tag_table!(OBS_INFO_TAGS,
    [0x01, "BLOCK_NUM", Long, None],
    [0x02, "OBS_NUM", Long, None],
    [0x03, "OBS_STATUS", Long, None],
    [0x04, "DURATION", Long, None],
    [0x05, "NTRIALS", Long, None],
    [0x06, "FILENUM", Long, None],
    [0x07, "OBSINDEX", Long, None],
);

// The ~30 DF event kinds (spec §3.6, grounded on df.c's EvDataTags /
// dfRecordEvData). Each is a structure carrying an EV_LIST.
tag_table!(EV_DATA_TAGS,
    [0x01, "FIXON", Structure, Some(Context::EvList)],
    [0x02, "FIXOFF", Structure, Some(Context::EvList)],
    [0x03, "STIMON", Structure, Some(Context::EvList)],
    [0x04, "STIMOFF", Structure, Some(Context::EvList)],
    [0x05, "RESPONSE", Structure, Some(Context::EvList)],
    [0x06, "PATON", Structure, Some(Context::EvList)],
    [0x07, "PATOFF", Structure, Some(Context::EvList)],
    [0x08, "STIMTYPE", Structure, Some(Context::EvList)],
    [0x09, "PATTERN", Structure, Some(Context::EvList)],
    [0x0A, "REWARD", Structure, Some(Context::EvList)],
    [0x0B, "PROBEON", Structure, Some(Context::EvList)],
    [0x0C, "PROBEOFF", Structure, Some(Context::EvList)],
    [0x0D, "SAMPON", Structure, Some(Context::EvList)],
    [0x0E, "SAMPOFF", Structure, Some(Context::EvList)],
    [0x0F, "FIXATE", Structure, Some(Context::EvList)],
    [0x10, "DECIDE", Structure, Some(Context::EvList)],
    [0x11, "STIMULUS", Structure, Some(Context::EvList)],
    [0x12, "DELAY", Structure, Some(Context::EvList)],
    [0x13, "ISI", Structure, Some(Context::EvList)],
    [0x14, "UNIT", Structure, Some(Context::EvList)],
    [0x15, "INFO", Structure, Some(Context::EvList)],
    [0x16, "CUE", Structure, Some(Context::EvList)],
    [0x17, "TARGET", Structure, Some(Context::EvList)],
    [0x18, "DISTRACTOR", Structure, Some(Context::EvList)],
    [0x19, "CORRECT", Structure, Some(Context::EvList)],
    [0x1A, "TRIALTYPE", Structure, Some(Context::EvList)],
    [0x1B, "ABORT", Structure, Some(Context::EvList)],
    [0x1C, "WRONG", Structure, Some(Context::EvList)],
    [0x1D, "PUNISH", Structure, Some(Context::EvList)],
    [0x1E, "BLANKING", Structure, Some(Context::EvList)],
    [0x1F, "SACCADE", Structure, Some(Context::EvList)],
);

/// The 30 event kinds in table order; used by the DF walker to drive a
/// single loop over `EV_DATA` rather than 30 hand-written arms.
pub static EVENT_KINDS: &[&str] = &[
    "FIXON", "FIXOFF", "STIMON", "STIMOFF", "RESPONSE", "PATON", "PATOFF",
    "STIMTYPE", "PATTERN", "REWARD", "PROBEON", "PROBEOFF", "SAMPON",
    "SAMPOFF", "FIXATE", "DECIDE", "STIMULUS", "DELAY", "ISI", "UNIT",
    "INFO", "CUE", "TARGET", "DISTRACTOR", "CORRECT", "TRIALTYPE", "ABORT",
    "WRONG", "PUNISH", "BLANKING", "SACCADE",
];

tag_table!(EV_LIST_TAGS,
    [0x01, "VALUES", LongArray, None],
    [0x02, "TIMES", LongArray, None],
);

tag_table!(EM_DATA_TAGS,
    [0x01, "EMSTART", Long, None],
    [0x02, "EMRATE", Float, None],
    [0x03, "FIXPOS", ShortArray, None],
    [0x04, "WINDOW", ShortArray, None],
    [0x05, "PNT_DEG", Long, None],
    [0x06, "H_EYE_POS", ShortArray, None],
    [0x07, "V_EYE_POS", ShortArray, None],
    [0x08, "REFIX_WIN", ShortArray, None],
);

tag_table!(SP_DATA_TAGS,
    [0x01, "NSP_CHANNELS", Long, None],
    [0x02, "SP_CHANNEL", Structure, Some(Context::SpChannel)],
);

tag_table!(SP_CHANNEL_TAGS,
    [0x01, "SPIKE_DATA", FloatArray, None],
    [0x02, "SPIKE_SOURCE", Char, None],
    [0x03, "CELLNUM", Long, None],
);

tag_table!(CELL_INFO_TAGS,
    [0x01, "CELLNUM", Long, None],
    [0x02, "DISCRIM", Float, None],
    [0x03, "EV_COORD", FloatArray, None],
    [0x04, "XY_COORD", FloatArray, None],
    [0x05, "RF_COORD", FloatArray, None],
    [0x06, "DEPTH", Float, None],
    [0x07, "BOX_TL", FloatArray, None],
    [0x08, "BOX_BL", FloatArray, None],
    [0x09, "BOX_BR", FloatArray, None],
    [0x0A, "BOX_TR", FloatArray, None],
);

tag_table!(DYN_GROUP_TAGS,
    [0x01, "NAME", String, None],
    [0x02, "NDYNLISTS", Long, None],
    [0x03, "DYN_LIST", Structure, Some(Context::DynList)],
);

tag_table!(DYN_LIST_TAGS,
    [0x01, "NAME", String, None],
    [0x02, "INCREMENT", Long, None],
    [0x03, "FLAGS", Long, None],
    [0x04, "DATA", VoidArray, None],
    [0x05, "STRING_DATA", StringArray, None],
    [0x06, "CHAR_DATA", CharArray, None],
    [0x07, "SHORT_DATA", ShortArray, None],
    [0x08, "LONG_DATA", LongArray, None],
    [0x09, "FLOAT_DATA", FloatArray, None],
    [0x0A, "LIST_DATA", ListArray, None],
    [0x0B, "SUBLIST", Structure, Some(Context::DynList)],
);

fn table_for(ctx: Context) -> &'static [TagEntry] {
    match ctx {
        Context::TopLevel => TOP_LEVEL_TAGS,
        Context::DataFile => DATA_FILE_TAGS,
        Context::DfInfo => DF_INFO_TAGS,
        Context::ObsPeriod => OBS_PERIOD_TAGS,
        Context::ObsInfo => OBS_INFO_TAGS,
        Context::EvData => EV_DATA_TAGS,
        Context::EvList => EV_LIST_TAGS,
        Context::EmData => EM_DATA_TAGS,
        Context::SpData => SP_DATA_TAGS,
        Context::SpChannel => SP_CHANNEL_TAGS,
        Context::CellInfo => CELL_INFO_TAGS,
        Context::DynGroup => DYN_GROUP_TAGS,
        Context::DynList => DYN_LIST_TAGS,
    }
}

/// Find a tag entry by name within a context; used by writers so tag
/// bytes never need to be spelled out at call sites.
pub fn tag_by_name(ctx: Context, name: &str) -> TagEntry {
    *table_for(ctx)
        .iter()
        .find(|e| e.name == name)
        .unwrap_or_else(|| panic!("no tag named {name} in context {ctx:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_context_table_has_unique_tags() {
        for ctx in [
            Context::TopLevel, Context::DataFile, Context::DfInfo,
            Context::ObsPeriod, Context::ObsInfo, Context::EvData,
            Context::EvList, Context::EmData, Context::SpData,
            Context::SpChannel, Context::CellInfo, Context::DynGroup,
            Context::DynList,
        ] {
            let table = table_for(ctx);
            let mut seen = std::collections::HashSet::new();
            for entry in table {
                assert!(seen.insert(entry.tag), "duplicate tag in {ctx:?}");
                assert_ne!(entry.tag, END_STRUCT);
            }
        }
    }

    #[test]
    fn event_kinds_match_ev_data_table() {
        assert_eq!(EVENT_KINDS.len(), EV_DATA_TAGS.len());
        for (kind, entry) in EVENT_KINDS.iter().zip(EV_DATA_TAGS.iter()) {
            assert_eq!(*kind, entry.name);
        }
    }
}

//! DF schema walker: the fixed, domain-specific container (spec §3.6,
//! component G).
//!
//! Field tables grounded on `examples/original_source/c/src/df.c`
//! (`DFInfoTags`, `ObsInfoTags`, `EvDataTags`, `EMDataTags`,
//! `SPDataTags`, `SPChannelTags`, `CellTags`) — see `SPEC_FULL.md` §4 for
//! the mapping from spec.md's abbreviated field lists to these concrete
//! ones.

use crate::buffer::RecordBuffer;
use crate::error::{Error, Result};
use crate::options::{ParseMode, ParseOptions};
use crate::reader::{Decoder, Source};
use crate::tag::{Context, EVENT_KINDS, END_STRUCT};

pub const DF_MAGIC: [u8; 4] = [0x20, 0x10, 0x30, 0x60];
pub const DF_VERSION: f32 = 1.0;

/// One event kind's recorded values/times (spec §3.6 `EV_LIST`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvList {
    pub vals: Vec<i32>,
    pub times: Vec<i32>,
}

/// All ~30 event kinds for one observation period, in `EVENT_KINDS`
/// order (spec §3.6 `EV_DATA`).
#[derive(Debug, Clone, PartialEq)]
pub struct EvData {
    kinds: Vec<EvList>,
}

impl EvData {
    pub fn empty() -> Self {
        EvData { kinds: vec![EvList::default(); EVENT_KINDS.len()] }
    }

    fn index_of(name: &str) -> usize {
        EVENT_KINDS.iter().position(|k| *k == name).expect("unknown event kind")
    }

    pub fn get(&self, name: &str) -> &EvList {
        &self.kinds[Self::index_of(name)]
    }

    pub fn get_mut(&mut self, name: &str) -> &mut EvList {
        let idx = Self::index_of(name);
        &mut self.kinds[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &EvList)> {
        EVENT_KINDS.iter().copied().zip(self.kinds.iter())
    }
}

/// Eye-movement sampling data for one observation period (spec §3.6
/// `EM_DATA`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmData {
    pub ontime: i32,
    pub rate: f32,
    pub fixpos: [i16; 2],
    pub window: [i16; 4],
    pub window2: [i16; 4],
    pub pnt_deg: i32,
    pub samps_h: Vec<i16>,
    pub samps_v: Vec<i16>,
}

/// One spike channel (spec §3.6 `SP_DATA` → channel).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpChannel {
    pub cellnum: i32,
    pub source: i8,
    pub sptimes: Vec<f32>,
}

/// Spike data for one observation period.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpData {
    pub channels: Vec<SpChannel>,
}

/// Per-observation-period bookkeeping (spec §3.6 `OBS_INFO`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObsInfo {
    pub filenum: i32,
    pub index: i32,
    pub block: i32,
    pub obsp: i32,
    pub status: i32,
    pub duration: i32,
    pub ntrials: i32,
}

/// One observation period (spec §3.6 `OBS_P`).
#[derive(Debug, Clone, PartialEq)]
pub struct ObsPeriod {
    pub info: ObsInfo,
    pub ev_data: EvData,
    pub em_data: Option<EmData>,
    pub sp_data: Option<SpData>,
}

impl ObsPeriod {
    pub fn empty() -> Self {
        ObsPeriod { info: ObsInfo::default(), ev_data: EvData::empty(), em_data: None, sp_data: None }
    }
}

/// One recorded cell (spec §3.6 `CELL_INFO`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellInfo {
    pub number: i32,
    pub discrim: f32,
    pub depth: f32,
    pub ev_coord: [f32; 2],
    pub xy_coord: [f32; 2],
    pub rf_center: [f32; 2],
    pub rf_quad_ul: [f32; 2],
    pub rf_quad_ll: [f32; 2],
    pub rf_quad_lr: [f32; 2],
    pub rf_quad_ur: [f32; 2],
}

/// File-level metadata (spec §3.6 `DF_INFO`).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DfInfo {
    pub filename: String,
    pub auxfiles: Vec<String>,
    pub time: i32,
    pub filenum: i32,
    pub comment: String,
    pub exp: i32,
    pub testmode: i32,
    pub nstimtypes: i32,
    pub emcollect: i8,
    pub spcollect: i8,
}

/// The top-level DF entity graph (spec §3.6 `DATA_FILE`).
#[derive(Debug, Clone, PartialEq)]
pub struct DataFile {
    pub info: DfInfo,
    pub obs_periods: Vec<ObsPeriod>,
    pub cell_infos: Vec<CellInfo>,
}

impl DataFile {
    pub fn empty() -> Self {
        DataFile { info: DfInfo::default(), obs_periods: Vec::new(), cell_infos: Vec::new() }
    }
}

// =========================================================================
// Encode
// =========================================================================

pub fn encode_data_file(df: &DataFile) -> Result<Vec<u8>> {
    let mut buf = RecordBuffer::new();
    buf.record_magic(DF_MAGIC)?;
    buf.record_version(DF_VERSION)?;
    buf.begin_struct("DATA_FILE")?;
    encode_df_info(&mut buf, &df.info)?;
    buf.record_long("NOBS_PERIODS", df.obs_periods.len() as i32)?;
    for obsp in &df.obs_periods {
        buf.begin_struct("OBS_PERIOD")?;
        encode_obs_info(&mut buf, &obsp.info)?;
        encode_ev_data(&mut buf, &obsp.ev_data)?;
        if let Some(sp) = &obsp.sp_data {
            encode_sp_data(&mut buf, sp)?;
        }
        if let Some(em) = &obsp.em_data {
            encode_em_data(&mut buf, em)?;
        }
        buf.end_struct()?;
    }
    buf.record_long("NCELL_INFOS", df.cell_infos.len() as i32)?;
    for cell in &df.cell_infos {
        encode_cell_info(&mut buf, cell)?;
    }
    buf.end_struct()?;
    Ok(buf.into_bytes())
}

fn encode_df_info(buf: &mut RecordBuffer, info: &DfInfo) -> Result<()> {
    buf.begin_struct("DF_INFO")?;
    buf.record_string("FILENAME", Some(&info.filename))?;
    buf.record_long("TIME", info.time)?;
    buf.record_long("FILENUM", info.filenum)?;
    buf.record_string("COMMENTS", Some(&info.comment))?;
    buf.record_long("EXP_ID", info.exp)?;
    buf.record_long("TEST_MODE", info.testmode)?;
    buf.record_char("EM_ON", info.emcollect)?;
    buf.record_char("SPIKE_ON", info.spcollect)?;
    buf.record_long("NSTIMTYPES", info.nstimtypes)?;
    if !info.auxfiles.is_empty() {
        buf.record_string_array("AUXFILES", &info.auxfiles)?;
    }
    buf.end_struct()
}

fn encode_obs_info(buf: &mut RecordBuffer, info: &ObsInfo) -> Result<()> {
    buf.begin_struct("OBSP_INFO")?;
    buf.record_long("BLOCK_NUM", info.block)?;
    buf.record_long("OBS_NUM", info.obsp)?;
    buf.record_long("OBS_STATUS", info.status)?;
    buf.record_long("DURATION", info.duration)?;
    buf.record_long("NTRIALS", info.ntrials)?;
    buf.record_long("FILENUM", info.filenum)?;
    buf.record_long("OBSINDEX", info.index)?;
    buf.end_struct()
}

/// Writer skips empty event lists (vals is empty); documented legacy
/// behaviour carried into the round-trip contract (spec §8 DF round-trip).
fn encode_ev_data(buf: &mut RecordBuffer, ev: &EvData) -> Result<()> {
    buf.begin_struct("EVENT_DATA")?;
    for (kind, list) in ev.iter() {
        if list.vals.is_empty() {
            continue;
        }
        buf.begin_struct(kind)?;
        buf.record_long_array("VALUES", &list.vals)?;
        buf.record_long_array("TIMES", &list.times)?;
        buf.end_struct()?;
    }
    buf.end_struct()
}

fn encode_em_data(buf: &mut RecordBuffer, em: &EmData) -> Result<()> {
    buf.begin_struct("EM_DATA")?;
    buf.record_long("EMSTART", em.ontime)?;
    buf.record_float("EMRATE", em.rate)?;
    buf.record_short_array("FIXPOS", &em.fixpos)?;
    buf.record_short_array("WINDOW", &em.window)?;
    buf.record_long("PNT_DEG", em.pnt_deg)?;
    buf.record_short_array("H_EYE_POS", &em.samps_h)?;
    buf.record_short_array("V_EYE_POS", &em.samps_v)?;
    buf.record_short_array("REFIX_WIN", &em.window2)?;
    buf.end_struct()
}

fn encode_sp_data(buf: &mut RecordBuffer, sp: &SpData) -> Result<()> {
    buf.begin_struct("SPIKE_DATA")?;
    buf.record_long("NSP_CHANNELS", sp.channels.len() as i32)?;
    for ch in &sp.channels {
        buf.begin_struct("SP_CHANNEL")?;
        buf.record_float_array("SPIKE_DATA", &ch.sptimes)?;
        buf.record_char("SPIKE_SOURCE", ch.source)?;
        buf.record_long("CELLNUM", ch.cellnum)?;
        buf.end_struct()?;
    }
    buf.end_struct()
}

fn encode_cell_info(buf: &mut RecordBuffer, cell: &CellInfo) -> Result<()> {
    buf.begin_struct("CELL_INFO")?;
    buf.record_long("CELLNUM", cell.number)?;
    buf.record_float("DISCRIM", cell.discrim)?;
    buf.record_float_array("EV_COORD", &cell.ev_coord)?;
    buf.record_float_array("XY_COORD", &cell.xy_coord)?;
    buf.record_float_array("RF_COORD", &cell.rf_center)?;
    buf.record_float("DEPTH", cell.depth)?;
    buf.record_float_array("BOX_TL", &cell.rf_quad_ul)?;
    buf.record_float_array("BOX_BL", &cell.rf_quad_ll)?;
    buf.record_float_array("BOX_BR", &cell.rf_quad_lr)?;
    buf.record_float_array("BOX_TR", &cell.rf_quad_ur)?;
    buf.end_struct()
}

// =========================================================================
// Decode
// =========================================================================

pub fn decode_data_file<S: Source>(source: S) -> Result<DataFile> {
    decode_data_file_with_options(source, ParseOptions::default())
}

/// Same as [`decode_data_file`], but in `ParseMode::Permissive` a DF
/// declared count (`NOBS_PERIODS`/`NCELL_INFOS`/`NSP_CHANNELS`) exceeded
/// by the actual children logs a warning and drops the excess instead of
/// aborting — the `Permissive` adaptation of goblin's own parse-options
/// convention to this format's one genuinely skippable failure mode.
pub fn decode_data_file_with_options<S: Source>(source: S, options: ParseOptions) -> Result<DataFile> {
    let mut dec = Decoder::new(source);
    dec.read_magic_and_version(DF_MAGIC, DF_VERSION)?;

    let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "TOP_LEVEL", tag: 0 })?;
    let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "TOP_LEVEL", tag })?;
    if entry.name != "DATA_FILE" {
        return Err(Error::UnexpectedTag { expected: "DATA_FILE", found: tag });
    }
    dec.begin_struct(Context::DataFile);
    let df = decode_data_file_body(&mut dec, &options)?;

    if let Some(trailing) = dec.next_tag()? {
        if trailing != END_STRUCT {
            return Err(Error::UnknownTag { context: "TOP_LEVEL", tag: trailing });
        }
    }
    Ok(df)
}

fn declared_limit_exceeded(options: &ParseOptions, context: &'static str, declared: usize) -> Result<bool> {
    if options.parse_mode == ParseMode::Permissive {
        #[cfg(feature = "log")]
        log::warn!("{context}: more children than the declared count {declared}, dropping the rest");
        Ok(true)
    } else {
        Err(Error::TooManyChildren { context, declared })
    }
}

fn decode_data_file_body<S: Source>(dec: &mut Decoder<S>, options: &ParseOptions) -> Result<DataFile> {
    let mut df = DataFile::empty();
    let mut declared_nobsp: Option<usize> = None;
    let mut declared_ncinfo: Option<usize> = None;

    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "DATA_FILE", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "DATA_FILE", tag })?;
        match entry.name {
            "DF_INFO" => {
                dec.begin_struct(Context::DfInfo);
                df.info = decode_df_info(dec)?;
            }
            "NOBS_PERIODS" => declared_nobsp = Some(dec.read_i32()?.max(0) as usize),
            "OBS_PERIOD" => {
                if let Some(limit) = declared_nobsp {
                    if df.obs_periods.len() >= limit && declared_limit_exceeded(options, "DATA_FILE", limit)? {
                        dec.begin_struct(Context::ObsPeriod);
                        decode_obs_period(dec, options)?;
                        continue;
                    }
                }
                dec.begin_struct(Context::ObsPeriod);
                df.obs_periods.push(decode_obs_period(dec, options)?);
            }
            "NCELL_INFOS" => declared_ncinfo = Some(dec.read_i32()?.max(0) as usize),
            "CELL_INFO" => {
                if let Some(limit) = declared_ncinfo {
                    if df.cell_infos.len() >= limit && declared_limit_exceeded(options, "DATA_FILE", limit)? {
                        dec.begin_struct(Context::CellInfo);
                        decode_cell_info(dec)?;
                        continue;
                    }
                }
                dec.begin_struct(Context::CellInfo);
                df.cell_infos.push(decode_cell_info(dec)?);
            }
            _ => return Err(Error::UnknownTag { context: "DATA_FILE", tag }),
        }
    }
    Ok(df)
}

fn decode_df_info<S: Source>(dec: &mut Decoder<S>) -> Result<DfInfo> {
    let mut info = DfInfo::default();
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "DF_INFO", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "DF_INFO", tag })?;
        match entry.name {
            "FILENAME" => info.filename = dec.read_string()?,
            "TIME" => info.time = dec.read_i32()?,
            "FILENUM" => info.filenum = dec.read_i32()?,
            "COMMENTS" => info.comment = dec.read_string()?,
            "EXP_ID" => info.exp = dec.read_i32()?,
            "TEST_MODE" => info.testmode = dec.read_i32()?,
            "EM_ON" => info.emcollect = dec.read_i8()?,
            "SPIKE_ON" => info.spcollect = dec.read_i8()?,
            "NSTIMTYPES" => info.nstimtypes = dec.read_i32()?,
            "AUXFILES" => info.auxfiles = dec.read_string_array()?,
            _ => return Err(Error::UnknownTag { context: "DF_INFO", tag }),
        }
    }
    Ok(info)
}

fn decode_obs_period<S: Source>(dec: &mut Decoder<S>, options: &ParseOptions) -> Result<ObsPeriod> {
    let mut obsp = ObsPeriod::empty();
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "OBS_PERIOD", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "OBS_PERIOD", tag })?;
        match entry.name {
            "OBSP_INFO" => {
                dec.begin_struct(Context::ObsInfo);
                obsp.info = decode_obs_info(dec)?;
            }
            "EVENT_DATA" => {
                dec.begin_struct(Context::EvData);
                obsp.ev_data = decode_ev_data(dec)?;
            }
            "SPIKE_DATA" => {
                dec.begin_struct(Context::SpData);
                obsp.sp_data = Some(decode_sp_data(dec, options)?);
            }
            "EM_DATA" => {
                dec.begin_struct(Context::EmData);
                obsp.em_data = Some(decode_em_data(dec)?);
            }
            _ => return Err(Error::UnknownTag { context: "OBS_PERIOD", tag }),
        }
    }
    Ok(obsp)
}

fn decode_obs_info<S: Source>(dec: &mut Decoder<S>) -> Result<ObsInfo> {
    let mut info = ObsInfo::default();
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "OBS_INFO", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "OBS_INFO", tag })?;
        match entry.name {
            "BLOCK_NUM" => info.block = dec.read_i32()?,
            "OBS_NUM" => info.obsp = dec.read_i32()?,
            "OBS_STATUS" => info.status = dec.read_i32()?,
            "DURATION" => info.duration = dec.read_i32()?,
            "NTRIALS" => info.ntrials = dec.read_i32()?,
            "FILENUM" => info.filenum = dec.read_i32()?,
            "OBSINDEX" => info.index = dec.read_i32()?,
            _ => return Err(Error::UnknownTag { context: "OBS_INFO", tag }),
        }
    }
    Ok(info)
}

fn decode_ev_data<S: Source>(dec: &mut Decoder<S>) -> Result<EvData> {
    let mut ev = EvData::empty();
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "EVENT_DATA", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "EVENT_DATA", tag })?;
        if !EVENT_KINDS.contains(&entry.name) {
            return Err(Error::UnknownTag { context: "EVENT_DATA", tag });
        }
        dec.begin_struct(Context::EvList);
        let list = decode_ev_list(dec)?;
        *ev.get_mut(entry.name) = list;
    }
    Ok(ev)
}

fn decode_ev_list<S: Source>(dec: &mut Decoder<S>) -> Result<EvList> {
    let mut list = EvList::default();
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "EV_LIST", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "EV_LIST", tag })?;
        match entry.name {
            "VALUES" => list.vals = dec.read_long_array()?,
            "TIMES" => list.times = dec.read_long_array()?,
            _ => return Err(Error::UnknownTag { context: "EV_LIST", tag }),
        }
    }
    // EV_LIST_NTIMES is tracked separately in the legacy writer but
    // always equal to EV_LIST_N; tolerate a mismatch by treating `vals`
    // as authoritative (spec §9 bullet 2) rather than erroring.
    Ok(list)
}

fn decode_em_data<S: Source>(dec: &mut Decoder<S>) -> Result<EmData> {
    let mut em = EmData::default();
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "EM_DATA", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "EM_DATA", tag })?;
        match entry.name {
            "EMSTART" => em.ontime = dec.read_i32()?,
            "EMRATE" => em.rate = dec.read_f32()?,
            "FIXPOS" => em.fixpos = fixed_short_array(dec.read_short_array()?, "FIXPOS")?,
            "WINDOW" => em.window = fixed_short_array(dec.read_short_array()?, "WINDOW")?,
            "PNT_DEG" => em.pnt_deg = dec.read_i32()?,
            "H_EYE_POS" => em.samps_h = dec.read_short_array()?,
            "V_EYE_POS" => em.samps_v = dec.read_short_array()?,
            "REFIX_WIN" => em.window2 = fixed_short_array(dec.read_short_array()?, "REFIX_WIN")?,
            _ => return Err(Error::UnknownTag { context: "EM_DATA", tag }),
        }
    }
    if em.samps_h.len() != em.samps_v.len() {
        return Err(Error::InvalidFixedArray {
            tag: "H_EYE_POS/V_EYE_POS",
            expected: em.samps_h.len(),
            got: em.samps_v.len(),
        });
    }
    Ok(em)
}

fn fixed_short_array<const N: usize>(v: Vec<i16>, name: &'static str) -> Result<[i16; N]> {
    if v.len() != N {
        return Err(Error::InvalidFixedArray { tag: name, expected: N, got: v.len() });
    }
    let mut out = [0i16; N];
    out.copy_from_slice(&v);
    Ok(out)
}

fn fixed_float_array<const N: usize>(v: Vec<f32>, name: &'static str) -> Result<[f32; N]> {
    if v.len() != N {
        return Err(Error::InvalidFixedArray { tag: name, expected: N, got: v.len() });
    }
    let mut out = [0f32; N];
    out.copy_from_slice(&v);
    Ok(out)
}

fn decode_sp_data<S: Source>(dec: &mut Decoder<S>, options: &ParseOptions) -> Result<SpData> {
    let mut sp = SpData::default();
    let mut declared: Option<usize> = None;
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "SPIKE_DATA", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "SPIKE_DATA", tag })?;
        match entry.name {
            "NSP_CHANNELS" => declared = Some(dec.read_i32()?.max(0) as usize),
            "SP_CHANNEL" => {
                if let Some(limit) = declared {
                    if sp.channels.len() >= limit && declared_limit_exceeded(options, "SPIKE_DATA", limit)? {
                        dec.begin_struct(Context::SpChannel);
                        decode_sp_channel(dec)?;
                        continue;
                    }
                }
                dec.begin_struct(Context::SpChannel);
                sp.channels.push(decode_sp_channel(dec)?);
            }
            _ => return Err(Error::UnknownTag { context: "SPIKE_DATA", tag }),
        }
    }
    Ok(sp)
}

fn decode_sp_channel<S: Source>(dec: &mut Decoder<S>) -> Result<SpChannel> {
    let mut ch = SpChannel::default();
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "SP_CHANNEL", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "SP_CHANNEL", tag })?;
        match entry.name {
            "SPIKE_DATA" => ch.sptimes = dec.read_float_array()?,
            "SPIKE_SOURCE" => ch.source = dec.read_i8()?,
            "CELLNUM" => ch.cellnum = dec.read_i32()?,
            _ => return Err(Error::UnknownTag { context: "SP_CHANNEL", tag }),
        }
    }
    Ok(ch)
}

fn decode_cell_info<S: Source>(dec: &mut Decoder<S>) -> Result<CellInfo> {
    let mut cell = CellInfo::default();
    loop {
        let tag = dec.next_tag()?.ok_or(Error::UnknownTag { context: "CELL_INFO", tag: 0 })?;
        if tag == END_STRUCT {
            dec.pop();
            break;
        }
        let entry = dec.lookup(tag).ok_or(Error::UnknownTag { context: "CELL_INFO", tag })?;
        match entry.name {
            "CELLNUM" => cell.number = dec.read_i32()?,
            "DISCRIM" => cell.discrim = dec.read_f32()?,
            "EV_COORD" => cell.ev_coord = fixed_float_array(dec.read_float_array()?, "EV_COORD")?,
            "XY_COORD" => cell.xy_coord = fixed_float_array(dec.read_float_array()?, "XY_COORD")?,
            "RF_COORD" => cell.rf_center = fixed_float_array(dec.read_float_array()?, "RF_COORD")?,
            "DEPTH" => cell.depth = dec.read_f32()?,
            "BOX_TL" => cell.rf_quad_ul = fixed_float_array(dec.read_float_array()?, "BOX_TL")?,
            "BOX_BL" => cell.rf_quad_ll = fixed_float_array(dec.read_float_array()?, "BOX_BL")?,
            "BOX_BR" => cell.rf_quad_lr = fixed_float_array(dec.read_float_array()?, "BOX_BR")?,
            "BOX_TR" => cell.rf_quad_ur = fixed_float_array(dec.read_float_array()?, "BOX_TR")?,
            _ => return Err(Error::UnknownTag { context: "CELL_INFO", tag }),
        }
    }
    Ok(cell)
}

//! DF schema walker scenarios (spec §8): round-trip, declared-count
//! mismatch behaviour, and fixed-size array validation.

use dgrs::df::{
    decode_data_file, decode_data_file_with_options, encode_data_file, CellInfo, DataFile, DfInfo,
    EmData, ObsInfo, ObsPeriod, SpChannel, SpData,
};
use dgrs::error::Error;
use dgrs::options::ParseOptions;
use dgrs::reader::SliceSource;

fn sample_obs_period() -> ObsPeriod {
    let mut obsp = ObsPeriod::empty();
    obsp.info = ObsInfo { filenum: 1, index: 0, block: 1, obsp: 0, status: 1, duration: 1000, ntrials: 3 };
    obsp.ev_data.get_mut("FIXON").vals = vec![1, 2];
    obsp.ev_data.get_mut("FIXON").times = vec![100, 200];
    obsp.sp_data = Some(SpData {
        channels: vec![SpChannel { cellnum: 1, source: 0, sptimes: vec![0.1, 0.2, 0.3] }],
    });
    obsp.em_data = Some(EmData {
        ontime: 50,
        rate: 250.0,
        fixpos: [1, 2],
        window: [0, 0, 10, 10],
        window2: [0, 0, 5, 5],
        pnt_deg: 30,
        samps_h: vec![1, 2, 3],
        samps_v: vec![4, 5, 6],
    });
    obsp
}

fn sample_data_file() -> DataFile {
    let mut df = DataFile::empty();
    df.info = DfInfo {
        filename: "session001".into(),
        auxfiles: vec!["aux1.txt".into(), "aux2.txt".into()],
        time: 1_700_000_000,
        filenum: 1,
        comment: "test session".into(),
        exp: 7,
        testmode: 0,
        nstimtypes: 2,
        emcollect: 1,
        spcollect: 1,
    };
    df.obs_periods.push(sample_obs_period());
    df.cell_infos.push(CellInfo {
        number: 1,
        discrim: 0.9,
        depth: 1200.0,
        ev_coord: [1.0, 2.0],
        xy_coord: [3.0, 4.0],
        rf_center: [5.0, 6.0],
        rf_quad_ul: [0.0, 1.0],
        rf_quad_ll: [0.0, -1.0],
        rf_quad_lr: [1.0, -1.0],
        rf_quad_ur: [1.0, 1.0],
    });
    df
}

#[test]
fn data_file_round_trips() {
    let df = sample_data_file();
    let bytes = encode_data_file(&df).unwrap();
    let back = decode_data_file(SliceSource::new(&bytes)).unwrap();
    assert_eq!(back.info.filename, "session001");
    assert_eq!(back.info.auxfiles, vec!["aux1.txt", "aux2.txt"]);
    assert_eq!(back.obs_periods.len(), 1);
    assert_eq!(back.obs_periods[0].info.duration, 1000);
    assert_eq!(back.obs_periods[0].ev_data.get("FIXON").vals, vec![1, 2]);
    assert_eq!(back.cell_infos[0].number, 1);
    assert_eq!(back.cell_infos[0].rf_quad_ur, [1.0, 1.0]);
}

/// Event lists the writer never populated are skipped entirely rather
/// than round-tripping as present-but-empty (spec §8 DF round-trip).
#[test]
fn empty_event_kinds_are_not_written() {
    let df = sample_data_file();
    let bytes = encode_data_file(&df).unwrap();
    let back = decode_data_file(SliceSource::new(&bytes)).unwrap();
    assert!(back.obs_periods[0].ev_data.get("STIMON").vals.is_empty());
}

/// A declared count the actual children *undershoot* is tolerated (spec
/// §8 scenario 4): fewer than declared is fine.
#[test]
fn fewer_children_than_declared_is_ok() {
    let mut buf = dgrs::buffer::RecordBuffer::new();
    buf.record_magic(dgrs::df::DF_MAGIC).unwrap();
    buf.record_version(dgrs::df::DF_VERSION).unwrap();
    buf.begin_struct("DATA_FILE").unwrap();
    buf.begin_struct("DF_INFO").unwrap();
    buf.record_string("FILENAME", Some("x")).unwrap();
    buf.record_string("COMMENTS", Some("")).unwrap();
    buf.end_struct().unwrap();
    buf.record_long("NOBS_PERIODS", 5).unwrap();
    buf.record_long("NCELL_INFOS", 0).unwrap();
    buf.end_struct().unwrap();

    let bytes = buf.into_bytes();
    let back = decode_data_file(SliceSource::new(&bytes)).unwrap();
    assert_eq!(back.obs_periods.len(), 0);
}

/// A declared count the actual children *exceed* aborts in strict mode
/// (spec §8 scenario 4).
#[test]
fn more_children_than_declared_errors_in_strict_mode() {
    let mut buf = dgrs::buffer::RecordBuffer::new();
    buf.record_magic(dgrs::df::DF_MAGIC).unwrap();
    buf.record_version(dgrs::df::DF_VERSION).unwrap();
    buf.begin_struct("DATA_FILE").unwrap();
    buf.record_long("NOBS_PERIODS", 0).unwrap();
    buf.begin_struct("OBS_PERIOD").unwrap();
    buf.end_struct().unwrap();
    buf.record_long("NCELL_INFOS", 0).unwrap();
    buf.end_struct().unwrap();

    let bytes = buf.into_bytes();
    let err = decode_data_file(SliceSource::new(&bytes)).unwrap_err();
    assert!(matches!(err, Error::TooManyChildren { declared: 0, .. }));
}

/// In permissive mode the same file decodes, dropping the excess
/// observation period instead of aborting.
#[test]
fn more_children_than_declared_is_dropped_in_permissive_mode() {
    let mut buf = dgrs::buffer::RecordBuffer::new();
    buf.record_magic(dgrs::df::DF_MAGIC).unwrap();
    buf.record_version(dgrs::df::DF_VERSION).unwrap();
    buf.begin_struct("DATA_FILE").unwrap();
    buf.record_long("NOBS_PERIODS", 0).unwrap();
    buf.begin_struct("OBS_PERIOD").unwrap();
    buf.end_struct().unwrap();
    buf.record_long("NCELL_INFOS", 0).unwrap();
    buf.end_struct().unwrap();

    let bytes = buf.into_bytes();
    let back = decode_data_file_with_options(SliceSource::new(&bytes), ParseOptions::permissive()).unwrap();
    assert_eq!(back.obs_periods.len(), 0);
}

#[test]
fn wrong_size_fixed_array_is_rejected() {
    let mut buf = dgrs::buffer::RecordBuffer::new();
    buf.record_magic(dgrs::df::DF_MAGIC).unwrap();
    buf.record_version(dgrs::df::DF_VERSION).unwrap();
    buf.begin_struct("DATA_FILE").unwrap();
    buf.record_long("NOBS_PERIODS", 1).unwrap();
    buf.begin_struct("OBS_PERIOD").unwrap();
    buf.begin_struct("EM_DATA").unwrap();
    buf.record_short_array("FIXPOS", &[1, 2, 3]).unwrap();
    buf.end_struct().unwrap();
    buf.end_struct().unwrap();
    buf.record_long("NCELL_INFOS", 0).unwrap();
    buf.end_struct().unwrap();

    let bytes = buf.into_bytes();
    let err = decode_data_file(SliceSource::new(&bytes)).unwrap_err();
    assert!(matches!(err, Error::InvalidFixedArray { tag: "FIXPOS", expected: 2, got: 3 }));
}

use std::{
    fs,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use camino::Utf8PathBuf;
use spkchain::kernel::descriptor::SegmentDescriptor;

const RECORD: usize = 1024;
const PER_RECORD: usize = 25;

pub fn segment(target: i32, center: i32, start: f64, end: f64) -> SegmentDescriptor {
    SegmentDescriptor {
        start_epoch: start,
        end_epoch: end,
        target,
        center,
        frame_id: 1,
        data_type: 2,
        initial_addr: 1,
        final_addr: 2,
    }
}

/// Bytes of a little-endian DAF/SPK kernel holding `descriptors`.
///
/// Summary records hold at most 25 descriptors each and are followed by a
/// blank name record, as in kernels written by the NAIF toolkit.
pub fn spk_bytes(name: &str, descriptors: &[SegmentDescriptor]) -> Vec<u8> {
    let chunks: Vec<&[SegmentDescriptor]> = descriptors.chunks(PER_RECORD).collect();
    // Summary record i sits at record 2 + 2 * i.
    let record_of = |i: usize| (2 + 2 * i) as i32;
    let (fward, bward) = if chunks.is_empty() {
        (0, 0)
    } else {
        (record_of(0), record_of(chunks.len() - 1))
    };

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"DAF/SPK ");
    bytes.extend_from_slice(&2i32.to_le_bytes());
    bytes.extend_from_slice(&6i32.to_le_bytes());
    bytes.extend_from_slice(format!("{name:<60}").as_bytes());
    bytes.extend_from_slice(&fward.to_le_bytes());
    bytes.extend_from_slice(&bward.to_le_bytes());
    bytes.extend_from_slice(&((2 * chunks.len() + 1) as i32 * 128 + 1).to_le_bytes());
    bytes.extend_from_slice(b"LTL-IEEE");
    bytes.resize(RECORD, 0);

    for (i, chunk) in chunks.iter().enumerate() {
        let next = if i + 1 < chunks.len() { record_of(i + 1) } else { 0 };
        let prev = if i == 0 { 0 } else { record_of(i - 1) };
        let start = bytes.len();
        for w in [next as f64, prev as f64, chunk.len() as f64] {
            bytes.extend_from_slice(&w.to_le_bytes());
        }
        for d in chunk.iter() {
            bytes.extend_from_slice(&d.to_bytes());
        }
        bytes.resize(start + RECORD, 0);
        bytes.extend(std::iter::repeat(b' ').take(RECORD));
    }
    bytes
}

pub fn unique_temp_dir(test_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "spkchain-{}-{}-{}",
        test_name,
        std::process::id(),
        nanos
    ));
    fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

pub fn write_kernel(
    dir: &Path,
    file: &str,
    name: &str,
    descriptors: &[SegmentDescriptor],
) -> Utf8PathBuf {
    let path = Utf8PathBuf::from_path_buf(dir.join(file)).expect("temp dir is not UTF-8");
    fs::write(&path, spk_bytes(name, descriptors)).expect("Failed to write kernel");
    path
}

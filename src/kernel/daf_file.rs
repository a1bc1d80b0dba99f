//! Reader for the segment descriptors of a DAF/SPK kernel.
//!
//! Only the parts of the file needed to locate segments are decoded:
//!
//! 1. the **file record** ([`DafHeader`]), which gives the summary layout and
//!    the record number of the first summary record;
//! 2. the **summary records**, a doubly linked list of 1024-byte records.
//!    Each one starts with three control words (next record, previous
//!    record, number of summaries) followed by packed descriptors.
//!
//! Name records, comment records and segment data are never read.
//!
//! Descriptors are kept in file order. Priority between descriptors of the
//! same file (last one wins) is applied by the registry, not here.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
};

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use nom::number::complete::le_f64;

use crate::{
    constants::{DAF_RECORD_BYTES, DESCRIPTOR_WORDS, MAX_SUMMARIES_PER_RECORD, SUMMARY_CONTROL_WORDS},
    spkchain_errors::SpkChainError,
};

use super::{daf_header::DafHeader, descriptor::SegmentDescriptor};

/// Decoded summary area of one DAF/SPK kernel.
#[derive(Debug, Clone)]
pub struct DafFile {
    pub(crate) path: Option<Utf8PathBuf>,
    pub(crate) header: DafHeader,
    pub(crate) descriptors: Vec<SegmentDescriptor>,
}

impl DafFile {
    /// Open a kernel on disk and read all of its descriptors.
    ///
    /// Arguments
    /// -----------------
    /// * `path`: location of the SPK kernel.
    ///
    /// Return
    /// ----------
    /// * The decoded [`DafFile`], or the I/O or format error that stopped the read.
    pub fn open(path: &Utf8Path) -> Result<Self, SpkChainError> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut daf = DafFile::read(&mut reader)?;
        daf.path = Some(path.to_path_buf());
        Ok(daf)
    }

    /// Read a kernel from any seekable byte source.
    ///
    /// See also
    /// ------------
    /// * [`DafHeader::validate`] – Conditions under which the kernel is rejected.
    pub fn read<R: Read + Seek>(reader: &mut R) -> Result<Self, SpkChainError> {
        let file_len = reader.seek(SeekFrom::End(0))? as usize;
        let n_records = file_len.div_ceil(DAF_RECORD_BYTES);

        let mut record = [0u8; DAF_RECORD_BYTES];
        reader.seek(SeekFrom::Start(0))?;
        reader.read_exact(&mut record)?;
        let (_, header) = DafHeader::parse(&record)?;
        header.validate()?;

        let mut descriptors = Vec::new();
        let mut visited = HashSet::new();
        let mut current = header.fward as i64;

        while current != 0 {
            // Record 1 is the file record; summaries live after it.
            if current < 2 || current as usize > n_records {
                return Err(SpkChainError::CorruptSummaryRecord(format!(
                    "record number {current} is outside the file ({n_records} records)"
                )));
            }
            if !visited.insert(current) {
                return Err(SpkChainError::CorruptSummaryRecord(format!(
                    "record {current} is linked twice"
                )));
            }

            reader.seek(SeekFrom::Start(
                (current as u64 - 1) * DAF_RECORD_BYTES as u64,
            ))?;
            reader.read_exact(&mut record)?;

            let (input, next) = le_f64::<_, nom::error::Error<_>>(record.as_slice())?;
            let (input, _prev) = le_f64::<_, nom::error::Error<_>>(input)?;
            let (_, nsum) = le_f64::<_, nom::error::Error<_>>(input)?;

            let nsum = control_word(nsum, "summary count")?;
            if nsum > MAX_SUMMARIES_PER_RECORD as i64 {
                return Err(SpkChainError::CorruptSummaryRecord(format!(
                    "record {current} claims {nsum} summaries, at most {MAX_SUMMARIES_PER_RECORD} fit"
                )));
            }

            let first = SUMMARY_CONTROL_WORDS * 8;
            let size = DESCRIPTOR_WORDS * 8;
            for i in 0..nsum as usize {
                let start = first + i * size;
                let (_, descriptor) = SegmentDescriptor::parse(&record[start..start + size])?;
                descriptor.validate()?;
                descriptors.push(descriptor);
            }

            debug!("summary record {current}: {nsum} descriptors");
            current = control_word(next, "next record pointer")?;
        }

        Ok(DafFile {
            path: None,
            header,
            descriptors,
        })
    }

    /// File record, as read.
    pub fn header(&self) -> &DafHeader {
        &self.header
    }

    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    pub fn internal_filename(&self) -> &str {
        &self.header.internal_filename
    }

    /// Descriptors in file order.
    pub fn descriptors(&self) -> &[SegmentDescriptor] {
        &self.descriptors
    }
}

/// Control words are integers stored as doubles.
fn control_word(value: f64, what: &str) -> Result<i64, SpkChainError> {
    if value.is_finite() && value.fract() == 0.0 && value >= 0.0 && value <= i32::MAX as f64 {
        Ok(value as i64)
    } else {
        Err(SpkChainError::CorruptSummaryRecord(format!(
            "invalid {what}: {value}"
        )))
    }
}

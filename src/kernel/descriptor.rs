//! SPK segment descriptors (DAF array summaries with ND = 2, NI = 6).
//!
//! A descriptor is the compact summary of one segment: the time span it
//! covers and six integers identifying the body, its center of motion, the
//! reference frame, the SPK data type and the address range of the segment
//! data inside the file.
//!
//! # Layout
//!
//! On disk a descriptor occupies [`DESCRIPTOR_WORDS`] double-precision words:
//!
//! ```text
//! word 0      word 1      word 2          word 3          word 4
//! start (f64) end (f64)   target | center frame  | type   begin | end
//! ```
//!
//! Integers are packed two per word, both little-endian.
//!
//! # See also
//! ------------
//! * [`crate::kernel::daf_file::DafFile`] – Reads descriptors from summary records.
//! * [`crate::kernel::registry::KernelRegistry`] – Searches descriptors by body and epoch.

use std::fmt;

use hifitime::Epoch;
use nom::{
    multi::fill,
    number::complete::{le_f64, le_i32},
    sequence::pair,
    IResult,
};

use crate::{
    constants::{DESCRIPTOR_WORDS, SPK_NI},
    kernel::{body_ids::BodyLabel, spk_type::SpkDataType},
    spkchain_errors::SpkChainError,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentDescriptor {
    /// First epoch covered, ET seconds past J2000.
    pub start_epoch: f64,
    /// Last epoch covered, ET seconds past J2000.
    pub end_epoch: f64,
    pub target: i32,
    /// Center of motion: the body the target's state is expressed relative to.
    pub center: i32,
    pub frame_id: i32,
    pub data_type: i32,
    /// First DP-word address of the segment data (1-based).
    pub initial_addr: i32,
    /// Last DP-word address of the segment data (1-based).
    pub final_addr: i32,
}

impl SegmentDescriptor {
    /// Decode one descriptor from its packed little-endian byte form.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: at least `8 * DESCRIPTOR_WORDS` bytes.
    ///
    /// Return
    /// ----------
    /// * The remaining input and the decoded descriptor.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, (start_epoch, end_epoch)) = pair(le_f64, le_f64)(input)?;
        let mut ints = [0i32; SPK_NI as usize];
        let (input, ()) = fill(le_i32, &mut ints)(input)?;
        let [target, center, frame_id, data_type, initial_addr, final_addr] = ints;
        Ok((
            input,
            SegmentDescriptor {
                start_epoch,
                end_epoch,
                target,
                center,
                frame_id,
                data_type,
                initial_addr,
                final_addr,
            },
        ))
    }

    /// Packed little-endian byte form, `8 * DESCRIPTOR_WORDS` bytes long.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(8 * DESCRIPTOR_WORDS);
        bytes.extend_from_slice(&self.start_epoch.to_le_bytes());
        bytes.extend_from_slice(&self.end_epoch.to_le_bytes());
        for value in [
            self.target,
            self.center,
            self.frame_id,
            self.data_type,
            self.initial_addr,
            self.final_addr,
        ] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    /// Pack the descriptor into its double-precision word form.
    pub fn to_words(&self) -> [f64; DESCRIPTOR_WORDS] {
        let mut words = [0.0; DESCRIPTOR_WORDS];
        for (word, chunk) in words.iter_mut().zip(self.to_bytes().chunks_exact(8)) {
            let mut raw = [0u8; 8];
            raw.copy_from_slice(chunk);
            *word = f64::from_le_bytes(raw);
        }
        words
    }

    /// Unpack a descriptor from its double-precision word form.
    ///
    /// Return
    /// ----------
    /// * The descriptor, or [`SpkChainError::CorruptDescriptor`] if its time
    ///   span is reversed.
    pub fn from_words(words: &[f64; DESCRIPTOR_WORDS]) -> Result<Self, SpkChainError> {
        let bytes: Vec<u8> = words.iter().flat_map(|w| w.to_le_bytes()).collect();
        let (_, descriptor) = SegmentDescriptor::parse(&bytes)?;
        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Reject descriptors whose start epoch lies after their end epoch.
    pub fn validate(&self) -> Result<(), SpkChainError> {
        // NaN bounds fail this comparison too.
        if self.start_epoch <= self.end_epoch {
            Ok(())
        } else {
            Err(SpkChainError::CorruptDescriptor {
                target: self.target,
                start: self.start_epoch,
                end: self.end_epoch,
            })
        }
    }

    /// True if `et_seconds` lies in the closed interval `[start_epoch, end_epoch]`.
    pub fn covers(&self, et_seconds: f64) -> bool {
        self.start_epoch <= et_seconds && et_seconds <= self.end_epoch
    }

    /// Validated SPK data type, or [`SpkChainError::InvalidSpkDataType`].
    pub fn spk_type(&self) -> Result<SpkDataType, SpkChainError> {
        SpkDataType::try_from(self.data_type)
    }
}

impl fmt::Display for SegmentDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let start = Epoch::from_et_seconds(self.start_epoch);
        let end = Epoch::from_et_seconds(self.end_epoch);

        let data_type = match self.spk_type() {
            Ok(spk_type) => spk_type.to_string(),
            Err(_) => format!("type {}, unknown", self.data_type),
        };

        let fields = [
            ("start_epoch", format!("{start}")),
            ("end_epoch", format!("{end}")),
            ("target", BodyLabel(self.target).to_string()),
            ("center", BodyLabel(self.center).to_string()),
            ("frame_id", self.frame_id.to_string()),
            ("data_type", data_type),
            ("initial_addr", self.initial_addr.to_string()),
            ("final_addr", self.final_addr.to_string()),
        ];

        let label_width = fields.iter().map(|(k, _)| k.len()).max().unwrap_or(10);
        let value_width = fields.iter().map(|(_, v)| v.len()).max().unwrap_or(10);

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = label_width + 2,
            value = value_width + 2
        );

        writeln!(f, "{border}")?;
        writeln!(
            f,
            "| {:<label_width$} | {:<value_width$} |",
            "Field", "Value",
        )?;
        writeln!(f, "{border}")?;

        for (label, value) in fields {
            writeln!(f, "| {label:<label_width$} | {value:<value_width$} |")?;
        }

        writeln!(f, "{border}")
    }
}

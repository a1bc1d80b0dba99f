//! DAF file record parsing.
//!
//! The first 1024-byte record of a DAF container describes its layout:
//!
//! * **`idword`**: format identifier, `"DAF/SPK"` for SPK kernels.
//! * **`nd`** / **`ni`**: number of double and integer components of each
//!   array summary (`2` and `6` for SPK).
//! * **`fward`** / **`bward`**: record numbers (1-based) of the first and
//!   last summary record of the doubly linked summary list.
//! * **`free`**: first free DP-word address of the file.
//! * **`locfmt`**: binary format of the numeric data (`"LTL-IEEE"` or `"BIG-IEEE"`).
//!
//! Integers of the file record are read little-endian. Kernels whose
//! `locfmt` is not `"LTL-IEEE"` are rejected by [`DafHeader::validate`]
//! rather than translated.

use std::fmt;

use nom::{bytes::complete::take, number::complete::le_i32, IResult};

use crate::{
    constants::{LTL_IEEE, SPK_IDWORD, SPK_ND, SPK_NI},
    spkchain_errors::SpkChainError,
};

/// In-memory representation of the DAF file record.
#[derive(Debug, PartialEq, Clone)]
pub struct DafHeader {
    pub idword: String,
    pub internal_filename: String,
    pub nd: i32,
    pub ni: i32,
    /// Record number of the first summary record.
    pub fward: i32,
    /// Record number of the last summary record.
    pub bward: i32,
    pub free: i32,
    pub locfmt: String,
    pub ftpstr: String,
}

impl DafHeader {
    /// Parse the file record.
    ///
    /// Arguments
    /// -----------------
    /// * `input`: bytes starting at the beginning of the file.
    ///
    /// Return
    /// ----------
    /// * `(remaining, header)` with string fields trimmed of padding.
    pub fn parse(input: &[u8]) -> IResult<&[u8], Self> {
        let (input, idword) = take(8usize)(input)?;
        let (input, nd) = le_i32(input)?;
        let (input, ni) = le_i32(input)?;
        let (input, ifname) = take(60usize)(input)?;
        let (input, fward) = le_i32(input)?;
        let (input, bward) = le_i32(input)?;
        let (input, free) = le_i32(input)?;
        let (input, locfmt) = take(8usize)(input)?;
        let (input, _) = take(603usize)(input)?; // reserved
        let (input, ftpstr) = take(28usize)(input)?;
        Ok((
            input,
            DafHeader {
                idword: trimmed(idword),
                internal_filename: trimmed(ifname),
                nd,
                ni,
                fward,
                bward,
                free,
                locfmt: trimmed(locfmt),
                ftpstr: trimmed(ftpstr),
            },
        ))
    }

    /// Check that the record describes a native SPK kernel.
    ///
    /// Return
    /// ----------
    /// * [`SpkChainError::InvalidKernel`] for a non-SPK identification word,
    /// * [`SpkChainError::UnsupportedBinaryFormat`] for non little-endian data,
    /// * [`SpkChainError::InvalidSummaryFormat`] if ND/NI differ from 2/6.
    pub fn validate(&self) -> Result<(), SpkChainError> {
        if !self.idword.starts_with(SPK_IDWORD) {
            return Err(SpkChainError::InvalidKernel(self.idword.clone()));
        }
        if self.locfmt != LTL_IEEE {
            return Err(SpkChainError::UnsupportedBinaryFormat(self.locfmt.clone()));
        }
        if self.nd != SPK_ND || self.ni != SPK_NI {
            return Err(SpkChainError::InvalidSummaryFormat {
                nd: self.nd,
                ni: self.ni,
            });
        }
        Ok(())
    }
}

fn trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .trim_end_matches(['\0', ' '])
        .trim()
        .to_string()
}

impl fmt::Display for DafHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const LABEL_WIDTH: usize = 14;
        const VALUE_WIDTH: usize = 40;

        let border = format!(
            "+{:-<label$}+{:-<value$}+",
            "",
            "",
            label = LABEL_WIDTH + 1,
            value = VALUE_WIDTH + 1
        );

        let rows = [
            ("ID Word", self.idword.clone()),
            ("Internal Name", self.internal_filename.clone()),
            ("ND / NI", format!("{} / {}", self.nd, self.ni)),
            ("Summaries", format!("records {} to {}", self.fward, self.bward)),
            ("Free Addr", self.free.to_string()),
            ("Binary Format", self.locfmt.clone()),
        ];

        writeln!(f, "{border}")?;
        for (label, value) in rows {
            writeln!(
                f,
                "| {:<lw$}| {:<vw$}|",
                label,
                value,
                lw = LABEL_WIDTH,
                vw = VALUE_WIDTH
            )?;
        }
        writeln!(f, "{border}")
    }
}

#[cfg(test)]
mod test_daf_header {
    use super::*;

    fn file_record(idword: &str, nd: i32, ni: i32, locfmt: &str) -> Vec<u8> {
        let mut rec = Vec::with_capacity(1024);
        rec.extend_from_slice(format!("{idword:<8}").as_bytes());
        rec.extend_from_slice(&nd.to_le_bytes());
        rec.extend_from_slice(&ni.to_le_bytes());
        rec.extend_from_slice(format!("{:<60}", "TEST KERNEL").as_bytes());
        rec.extend_from_slice(&2i32.to_le_bytes());
        rec.extend_from_slice(&4i32.to_le_bytes());
        rec.extend_from_slice(&769i32.to_le_bytes());
        rec.extend_from_slice(format!("{locfmt:<8}").as_bytes());
        rec.resize(rec.len() + 603, 0);
        rec.extend_from_slice(format!("{:<28}", "FTPSTR:ENDFTP").as_bytes());
        rec.resize(1024, 0);
        rec
    }

    fn default_header() -> DafHeader {
        DafHeader {
            idword: "DAF/SPK".to_string(),
            internal_filename: "TEST KERNEL".to_string(),
            nd: 2,
            ni: 6,
            fward: 2,
            bward: 4,
            free: 769,
            locfmt: "LTL-IEEE".to_string(),
            ftpstr: "FTPSTR:ENDFTP".to_string(),
        }
    }

    #[test]
    fn test_parse_file_record() {
        let rec = file_record("DAF/SPK", 2, 6, "LTL-IEEE");
        let (rest, header) = DafHeader::parse(&rec).unwrap();
        assert_eq!(rest.len(), 1024 - 727);
        assert_eq!(header, default_header());
        assert!(header.validate().is_ok());
    }

    #[test]
    fn test_validate_rejections() {
        let (_, h) = DafHeader::parse(&file_record("DAF/CK", 2, 6, "LTL-IEEE")).unwrap();
        assert_eq!(
            h.validate(),
            Err(SpkChainError::InvalidKernel("DAF/CK".to_string()))
        );

        let (_, h) = DafHeader::parse(&file_record("DAF/SPK", 2, 6, "BIG-IEEE")).unwrap();
        assert_eq!(
            h.validate(),
            Err(SpkChainError::UnsupportedBinaryFormat("BIG-IEEE".to_string()))
        );

        let (_, h) = DafHeader::parse(&file_record("DAF/SPK", 1, 5, "LTL-IEEE")).unwrap();
        assert_eq!(
            h.validate(),
            Err(SpkChainError::InvalidSummaryFormat { nd: 1, ni: 5 })
        );
    }

    #[test]
    fn test_truncated_record_fails() {
        let rec = file_record("DAF/SPK", 2, 6, "LTL-IEEE");
        assert!(DafHeader::parse(&rec[..500]).is_err());
    }

    #[test]
    fn test_display_daf_header() {
        let expected = r#"+---------------+-----------------------------------------+
| ID Word       | DAF/SPK                                 |
| Internal Name | TEST KERNEL                             |
| ND / NI       | 2 / 6                                   |
| Summaries     | records 2 to 4                          |
| Free Addr     | 769                                     |
| Binary Format | LTL-IEEE                                |
+---------------+-----------------------------------------+
"#;
        assert_eq!(format!("{}", default_header()), expected);
    }
}

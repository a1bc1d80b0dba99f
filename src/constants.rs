//! Fixed sizes of the DAF/SPK layout and default bounds of the chain walk.

/// NAIF ID of the Solar System Barycenter, root of every center-of-motion chain.
pub const SSB: i32 = 0;

/// Default maximum number of segments in one resolved chain.
pub const MAXSEG: usize = 200;

/// Default maximum number of body IDs visited by one walk.
pub const MAX_CHAIN_BODIES: usize = 100;

/// Size of one DAF physical record, in bytes.
pub const DAF_RECORD_BYTES: usize = 1024;

/// Size of one DAF record, in double-precision words.
pub const DAF_RECORD_WORDS: usize = DAF_RECORD_BYTES / 8;

/// Number of double-precision components of an SPK segment summary.
pub const SPK_ND: i32 = 2;

/// Number of integer components of an SPK segment summary.
pub const SPK_NI: i32 = 6;

/// Size of a packed SPK descriptor in double-precision words: ND + ceil(NI / 2).
pub const DESCRIPTOR_WORDS: usize = 5;

/// Control words (next, previous, count) at the head of a summary record.
pub const SUMMARY_CONTROL_WORDS: usize = 3;

/// Largest number of SPK summaries a single summary record can hold.
pub const MAX_SUMMARIES_PER_RECORD: usize =
    (DAF_RECORD_WORDS - SUMMARY_CONTROL_WORDS) / DESCRIPTOR_WORDS;

/// Binary format tag of little-endian IEEE kernels.
pub const LTL_IEEE: &str = "LTL-IEEE";

/// Prefix of the identification word of SPK kernels.
pub const SPK_IDWORD: &str = "DAF/SPK";

//! Loaded SPK kernels: DAF file record and summary parsing, segment
//! descriptors, and the registry that searches them.

pub mod body_ids;
pub mod daf_file;
pub mod daf_header;
pub mod descriptor;
pub mod registry;
pub mod spk_type;

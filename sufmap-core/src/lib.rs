//! Six-frame exact-match peptide mapping.
//!
//! References are translated (DNA) or taken as-is (peptides), indexed in a
//! generalized suffix array that is persisted next to the reference, and
//! queried in parallel with every hit written as a GFF record.

#[macro_use]
mod par;

pub mod alphabets;
pub mod config;
pub mod coords;
pub mod error;
pub mod index;
pub mod io;
pub mod pipeline;
pub mod run;
pub mod seq;

pub use config::{InputType, MapConfig};
pub use error::{MapError, MapResult};
pub use run::{run, RunSummary};

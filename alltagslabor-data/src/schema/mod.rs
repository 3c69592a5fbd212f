//! Record types decoded from the remote files
//!
//! Every remote document passes through an explicit decode-and-validate step
//! here; a partially valid document is rejected as a whole.

pub mod experiment;
pub mod lookup;

pub use experiment::{decode_experiments, Experiment, ExperimentStep, Impressum};
pub use lookup::RegionTable;

pub mod satire;

pub use satire::{LengthMode, RequestParameters, SatireResponse, SatireResult, StyleMode};

pub mod fallback;
pub mod llm;
pub mod normalizer;

pub use llm::SatireService;
pub use normalizer::normalize;

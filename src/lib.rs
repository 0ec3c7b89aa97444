// Toxicity severity core for the water-quality dashboard — one classification
// rule and presentation table shared by the gauge, case carousel, live alerts
// and summary tiles.

pub mod config;
pub mod constants;
pub mod error;
pub mod invariants;
pub mod logic;
pub mod mbt;
pub mod simulator;
pub mod types;

pub use error::{Error, Result};
pub use logic::{classify, presentation_of};
pub use types::{SeverityPresentation, SeverityTier};

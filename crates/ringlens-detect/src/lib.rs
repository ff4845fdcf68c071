//! # Ringlens Detect
//!
//! Pattern detectors over the shared account graph:
//! - `LegitimacyClassifier` - flags payroll/merchant-shaped hub accounts
//! - `CycleDetector` - bounded simple directed cycles (length 3-5)
//! - `SmurfingDetector` - fan-in/fan-out structuring with temporal density
//! - `ShellChainDetector` - low-activity pass-through chains
//!
//! The three pattern detectors are independent and run over the same
//! immutable graph; legitimate accounts are excluded as seeds and as
//! eligible members everywhere, though their edges remain in the graph.

#![warn(missing_docs)]

pub mod cycles;
pub mod legitimacy;
pub mod shells;
pub mod smurfing;

pub use cycles::CycleDetector;
pub use legitimacy::LegitimacyClassifier;
pub use shells::ShellChainDetector;
pub use smurfing::{SmurfingDetector, SmurfingResult};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::cycles::CycleDetector;
    pub use crate::legitimacy::LegitimacyClassifier;
    pub use crate::shells::ShellChainDetector;
    pub use crate::smurfing::{SmurfingDetector, SmurfingResult};
}

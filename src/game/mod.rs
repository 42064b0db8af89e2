//! Tracker Logic Module
//!
//! All per-tick tracking code. Pure in-memory state, no I/O.
//!
//! ## Module Structure
//!
//! - `input`: Host signal capture and the grounding policy
//! - `state`: Player identity and tracked records
//! - `detector`: Air jump state machine
//! - `history`: Bounded per-player count history
//! - `registry`: Identity to record mapping
//! - `tick`: Per-tick update hook
//! - `events`: Events for host auditing

pub mod input;
pub mod state;
pub mod detector;
pub mod history;
pub mod registry;
pub mod tick;
pub mod events;

// Re-export key types
pub use input::{TickInput, JumpSample, GroundContact, PlayerButtons};
pub use state::{PlayerSlot, TrackedPlayer};
pub use detector::{JumpDetector, JumpPhase};
pub use history::{JumpHistory, HISTORY_CAPACITY};
pub use registry::{JumpRegistry, HistoryError};
pub use tick::TickResult;
pub use events::{JumpEvent, JumpEventData};

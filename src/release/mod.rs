//! Release domain logic
//!
//! # Core invariants
//!
//! 1. **A plan exists only after validation**
//!    - Every preflight check is read-only
//!    - The tag, archive, and push steps never re-decide anything
//!
//! 2. **Versions advance strictly** (major, then minor, then patch)
//!    - `--force` bypasses ordering and tag existence, never silently
//!
//! 3. **Tagging and archiving are not transactional**
//!    - The tag is the authoritative release marker
//!    - Archives are a derived convenience; their failure aborts the run
//!      but never rolls the tag back

pub mod archive;
pub mod plan;
pub mod request;
pub mod version;

pub use plan::ReleasePlan;
pub use request::{ReleaseFlags, ReleaseRequest};

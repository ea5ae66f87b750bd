//! The authorization decision.
//!
//! Deliberately a plain boolean: denial is not an error inside the core, it
//! is a decision the boundary turns into a rejection (401 for anonymous,
//! 403 for an authenticated identity lacking the permission).

use crate::{Permission, SecurityContext};

/// True iff `ctx` holds a non-anonymous identity whose permission set
/// intersects `required_any_of`.
///
/// - No IO
/// - No panics
/// - Pure policy check over the static role table
pub fn authorize(ctx: &SecurityContext, required_any_of: &[Permission]) -> bool {
    ctx.permissions()
        .iter()
        .any(|granted| required_any_of.contains(granted))
}

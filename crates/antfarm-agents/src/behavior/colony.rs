//! Colony behavior.
//!
//! The colony never moves and has nothing to do on its own turn. Its store
//! grows when a returning ant reaches home (see [`super::ant`]).

use super::PendingAction;

/// The colony's decision is always to idle.
pub const fn decide() -> PendingAction {
    PendingAction::ColonyIdle
}

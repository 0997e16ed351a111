//! Turn order.
//!
//! Whoever is furthest behind on the time track moves next. On a tie the
//! recorded tie-break player keeps the turn, which is the player who most
//! recently moved onto the shared space.

use crate::core::PlayerId;

/// Resolve the active player from both track positions.
///
/// ```
/// use patchwork_engine::core::PlayerId;
/// use patchwork_engine::rules::turn::active_player;
///
/// assert_eq!(active_player(3, 7, PlayerId::Two), PlayerId::One);
/// assert_eq!(active_player(9, 7, PlayerId::One), PlayerId::Two);
/// assert_eq!(active_player(7, 7, PlayerId::Two), PlayerId::Two);
/// ```
#[must_use]
pub fn active_player(one_time: u32, two_time: u32, tie_break: PlayerId) -> PlayerId {
    match one_time.cmp(&two_time) {
        std::cmp::Ordering::Less => PlayerId::One,
        std::cmp::Ordering::Greater => PlayerId::Two,
        std::cmp::Ordering::Equal => tie_break,
    }
}

//! Achievement scan: at most one notification is outstanding at a time.

use sim_core::{AchievementId, GameState, PlayerStats, ACHIEVEMENTS};
use tracing::debug;

/// First catalog entry not in `unlocked` whose predicate holds.
pub fn check_for_new_achievements(
    stats: &PlayerStats,
    state: &GameState,
    unlocked: &[AchievementId],
) -> Option<AchievementId> {
    ACHIEVEMENTS
        .iter()
        .filter(|a| !unlocked.contains(&a.id))
        .find(|a| (a.check)(stats, state))
        .map(|a| a.id)
}

/// Unlock the next qualifying achievement unless one is already pending.
///
/// Further qualifying entries are discovered on later calls, after the
/// pending one has been dismissed.
pub fn record_next_unlock(state: &mut GameState) -> Option<AchievementId> {
    if state.achievements.pending_unlock.is_some() {
        return None;
    }
    let found = check_for_new_achievements(
        &state.achievements.stats,
        state,
        &state.achievements.unlocked_ids,
    )?;
    debug!(achievement = ?found, "achievement unlocked");
    state.achievements.unlocked_ids.push(found);
    state.achievements.pending_unlock = Some(found);
    Some(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use sim_core::initial_state;

    fn fresh() -> GameState {
        initial_state(DateTime::from_timestamp(0, 0).unwrap())
    }

    #[test]
    fn nothing_qualifies_on_fresh_state() {
        let s = fresh();
        assert_eq!(
            check_for_new_achievements(&s.achievements.stats, &s, &[]),
            None
        );
    }

    #[test]
    fn earliest_catalog_entry_wins() {
        let mut s = fresh();
        s.achievements.stats.total_clicks = 1;
        s.achievements.stats.total_brains_earned = 1.0;
        assert_eq!(record_next_unlock(&mut s), Some(AchievementId::FirstBrain));
        assert_eq!(s.achievements.pending_unlock, Some(AchievementId::FirstBrain));
    }

    #[test]
    fn pending_blocks_further_unlocks() {
        let mut s = fresh();
        s.achievements.stats.total_clicks = 1;
        s.achievements.stats.total_brains_earned = 1.0;
        record_next_unlock(&mut s);
        assert_eq!(record_next_unlock(&mut s), None);
        assert_eq!(s.achievements.unlocked_ids, vec![AchievementId::FirstBrain]);

        s.achievements.pending_unlock = None;
        assert_eq!(record_next_unlock(&mut s), Some(AchievementId::FirstClick));
        assert_eq!(
            s.achievements.unlocked_ids,
            vec![AchievementId::FirstBrain, AchievementId::FirstClick]
        );
    }

    #[test]
    fn already_unlocked_entries_are_skipped() {
        let mut s = fresh();
        s.achievements.stats.total_visitors = 150;
        let unlocked = [AchievementId::FirstVisitor];
        assert_eq!(
            check_for_new_achievements(&s.achievements.stats, &s, &unlocked),
            Some(AchievementId::HundredVisitors)
        );
    }
}

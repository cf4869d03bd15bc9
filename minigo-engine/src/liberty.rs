//! Incremental tracking of stone groups and their liberties.
//!
//! Every stone on the board belongs to exactly one [`LibertyGroup`]. Groups
//! live in an id-keyed map; ids come from a counter that only ever grows, so a
//! merge or capture retires ids instead of recycling them and a stale id can
//! never name a live group.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::Position;
use crate::color::Color;
use crate::config::GameConfiguration;
use crate::error::IllegalMove;

pub type GroupId = usize;

/// A maximal connected set of same-colored stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibertyGroup {
    pub id: GroupId,
    pub color: Color,
    pub stones: HashSet<Position>,
    /// Empty points adjacent to any stone of the group.
    pub liberties: HashSet<Position>,
}

#[derive(Debug, Clone)]
pub struct LibertyTracker {
    size: usize,
    verbose: bool,
    next_group_id: GroupId,
    /// Row-major map from point to the id of the group occupying it.
    group_index: Vec<Option<GroupId>>,
    groups: HashMap<GroupId, LibertyGroup>,
}

impl LibertyTracker {
    pub fn new(config: &GameConfiguration) -> Self {
        LibertyTracker {
            size: config.size,
            verbose: config.is_verbose_debugging_enabled,
            next_group_id: 0,
            group_index: vec![None; config.point_count()],
            groups: HashMap::new(),
        }
    }

    /// The group occupying `position`, if any.
    pub fn group(&self, position: Position) -> Option<&LibertyGroup> {
        let id = self.group_id(position)?;
        match self.groups.get(&id) {
            Some(group) => Some(group),
            None => self.missing_group(id),
        }
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Place a stone of `color` at the empty `position`, merging friendly
    /// neighbors and removing opponent groups that lose their last liberty.
    ///
    /// Returns the captured stones. On `Err(Suicide)` the tracker has already
    /// been modified and must be discarded; callers always work on a copy.
    pub fn add_stone(
        &mut self,
        position: Position,
        color: Color,
    ) -> Result<HashSet<Position>, IllegalMove> {
        assert!(
            self.group_id(position).is_none(),
            "cannot add a stone on occupied point {position}"
        );
        self.log_index("before adding stone");

        let mut empty_neighbors = HashSet::new();
        let mut friendly_ids = BTreeSet::new();
        let mut opponent_ids = BTreeSet::new();

        for neighbor in position.neighbors(self.size) {
            match self.group(neighbor) {
                None => {
                    empty_neighbors.insert(neighbor);
                }
                Some(group) if group.color == color => {
                    friendly_ids.insert(group.id);
                }
                Some(group) => {
                    opponent_ids.insert(group.id);
                }
            }
        }

        if self.verbose {
            tracing::debug!(
                %position, ?color, ?empty_neighbors, ?friendly_ids, ?opponent_ids,
                "neighbors partitioned"
            );
        }

        let mut new_id = self.make_group(color, position, empty_neighbors);
        for friend_id in friendly_ids {
            new_id = self.merge_groups(new_id, friend_id);
        }

        let mut captured = HashSet::new();
        for opponent_id in opponent_ids {
            let liberty_count = match self.groups.get(&opponent_id) {
                Some(opponent) => opponent.liberties.len(),
                None => self.missing_group(opponent_id),
            };
            // The only liberty left is the point just filled.
            if liberty_count <= 1 {
                captured.extend(self.capture_group(opponent_id));
            } else if let Some(opponent) = self.groups.get_mut(&opponent_id) {
                opponent.liberties.remove(&position);
                debug_assert!(self.check_invariants());
            }
        }

        if self.verbose && !captured.is_empty() {
            tracing::debug!(?captured, "captured stones");
        }

        self.restore_liberties(&captured);
        self.log_index("after adding stone");

        let Some(new_group) = self.groups.get(&new_id) else {
            self.missing_group(new_id)
        };
        if new_group.liberties.is_empty() {
            return Err(IllegalMove::Suicide);
        }

        Ok(captured)
    }

    /// Whether the ids referenced by the point index are exactly the ids of
    /// the group map, and every group's stones point back at it.
    pub fn check_invariants(&self) -> bool {
        let indexed: HashSet<GroupId> = self.group_index.iter().flatten().copied().collect();
        let stored: HashSet<GroupId> = self.groups.keys().copied().collect();
        if indexed != stored {
            return false;
        }
        self.groups.values().all(|group| {
            group
                .stones
                .iter()
                .all(|&stone| self.group_id(stone) == Some(group.id))
        })
    }

    // -- Internal helpers --

    #[inline]
    fn idx(&self, position: Position) -> usize {
        debug_assert!(position.is_on_board(self.size));
        position.x * self.size + position.y
    }

    fn group_id(&self, position: Position) -> Option<GroupId> {
        self.group_index[self.idx(position)]
    }

    fn set_group_id(&mut self, position: Position, id: Option<GroupId>) {
        let i = self.idx(position);
        self.group_index[i] = id;
    }

    fn assign_new_group_id(&mut self) -> GroupId {
        let id = self.next_group_id;
        assert!(!self.groups.contains_key(&id), "group id {id} reused");
        self.next_group_id += 1;
        id
    }

    fn make_group(
        &mut self,
        color: Color,
        stone: Position,
        liberties: HashSet<Position>,
    ) -> GroupId {
        let id = self.assign_new_group_id();
        self.groups.insert(
            id,
            LibertyGroup {
                id,
                color,
                stones: HashSet::from([stone]),
                liberties,
            },
        );
        self.set_group_id(stone, Some(id));
        debug_assert!(self.check_invariants());
        id
    }

    /// Replace two groups by their union under a fresh id.
    fn merge_groups(&mut self, first: GroupId, second: GroupId) -> GroupId {
        let Some(a) = self.groups.remove(&first) else {
            self.missing_group(first)
        };
        let Some(b) = self.groups.remove(&second) else {
            self.missing_group(second)
        };
        assert_eq!(a.color, b.color, "merging groups of different colors");

        let id = self.assign_new_group_id();
        let stones: HashSet<Position> = a.stones.union(&b.stones).copied().collect();
        let liberties: HashSet<Position> = a
            .liberties
            .union(&b.liberties)
            .filter(|p| !stones.contains(p))
            .copied()
            .collect();

        for &stone in &stones {
            self.set_group_id(stone, Some(id));
        }
        self.groups.insert(
            id,
            LibertyGroup {
                id,
                color: a.color,
                stones,
                liberties,
            },
        );
        debug_assert!(self.check_invariants());
        id
    }

    fn capture_group(&mut self, id: GroupId) -> HashSet<Position> {
        let Some(dead) = self.groups.remove(&id) else {
            self.missing_group(id)
        };
        for &stone in &dead.stones {
            self.set_group_id(stone, None);
        }
        dead.stones
    }

    /// Captured points are empty again, so every group touching one gains it
    /// back as a liberty.
    fn restore_liberties(&mut self, captured: &HashSet<Position>) {
        for &stone in captured {
            for neighbor in stone.neighbors(self.size) {
                let Some(id) = self.group_id(neighbor) else {
                    continue;
                };
                match self.groups.get_mut(&id) {
                    Some(group) => {
                        group.liberties.insert(stone);
                    }
                    None => self.missing_group(id),
                }
            }
        }
        debug_assert!(self.check_invariants());
    }

    fn missing_group(&self, id: GroupId) -> ! {
        panic!(
            "liberty tracker corrupted: group {id} is indexed but not stored (groups: {:?})",
            self.groups.keys().collect::<Vec<_>>()
        );
    }

    fn log_index(&self, message: &str) {
        if !self.verbose {
            return;
        }
        let mut dump = String::new();
        for x in 0..self.size {
            for y in 0..self.size {
                match self.group_index[x * self.size + y] {
                    None => dump.push_str("   ."),
                    Some(id) => dump.push_str(&format!("{id:>4}")),
                }
            }
            dump.push('\n');
        }
        tracing::trace!("{message}\n{dump}");
        for group in self.groups.values() {
            tracing::trace!(id = group.id, liberties = ?group.liberties, "group");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(size: usize) -> LibertyTracker {
        LibertyTracker::new(&GameConfiguration::new(size, 0.0))
    }

    fn p(x: usize, y: usize) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn single_stone_gets_empty_neighbors_as_liberties() {
        let mut t = tracker(9);
        let captured = t.add_stone(p(4, 4), Color::Black).unwrap();
        assert!(captured.is_empty());

        let group = t.group(p(4, 4)).unwrap();
        assert_eq!(group.color, Color::Black);
        assert_eq!(group.stones, HashSet::from([p(4, 4)]));
        assert_eq!(
            group.liberties,
            HashSet::from([p(5, 4), p(3, 4), p(4, 5), p(4, 3)])
        );
        assert!(t.check_invariants());
    }

    #[test]
    fn opponent_stone_removes_liberty() {
        let mut t = tracker(9);
        t.add_stone(p(0, 0), Color::Black).unwrap();
        t.add_stone(p(0, 1), Color::White).unwrap();

        assert_eq!(t.group(p(0, 0)).unwrap().liberties, HashSet::from([p(1, 0)]));
        assert_eq!(
            t.group(p(0, 1)).unwrap().liberties,
            HashSet::from([p(1, 1), p(0, 2)])
        );
    }

    #[test]
    fn merging_assigns_fresh_id() {
        let mut t = tracker(9);
        t.add_stone(p(2, 2), Color::Black).unwrap();
        t.add_stone(p(2, 4), Color::Black).unwrap();
        let left = t.group(p(2, 2)).unwrap().id;
        let right = t.group(p(2, 4)).unwrap().id;

        t.add_stone(p(2, 3), Color::Black).unwrap();
        let merged = t.group(p(2, 3)).unwrap();

        assert_ne!(merged.id, left);
        assert_ne!(merged.id, right);
        assert!(merged.id > left.max(right));
        assert_eq!(merged.stones.len(), 3);
        assert_eq!(merged.liberties.len(), 8);
        assert!(!merged.liberties.contains(&p(2, 3)));
        assert_eq!(t.group(p(2, 2)).unwrap().id, merged.id);
        assert_eq!(t.group(p(2, 4)).unwrap().id, merged.id);
        assert_eq!(t.group_count(), 1);
    }

    #[test]
    fn group_touched_twice_merges_once() {
        let mut t = tracker(5);
        // An L shape touching (1, 1) from two sides.
        t.add_stone(p(0, 1), Color::White).unwrap();
        t.add_stone(p(0, 0), Color::White).unwrap();
        t.add_stone(p(1, 0), Color::White).unwrap();
        assert_eq!(t.group_count(), 1);

        t.add_stone(p(1, 1), Color::White).unwrap();
        let group = t.group(p(1, 1)).unwrap();
        assert_eq!(group.stones.len(), 4);
        assert_eq!(
            group.liberties,
            HashSet::from([p(0, 2), p(1, 2), p(2, 1), p(2, 0)])
        );
        assert!(t.check_invariants());
    }

    #[test]
    fn captures_group_and_restores_liberties() {
        let mut t = tracker(5);
        t.add_stone(p(0, 0), Color::White).unwrap();
        t.add_stone(p(0, 1), Color::Black).unwrap();
        let captured = t.add_stone(p(1, 0), Color::Black).unwrap();

        assert_eq!(captured, HashSet::from([p(0, 0)]));
        assert!(t.group(p(0, 0)).is_none());
        assert!(t.group(p(0, 1)).unwrap().liberties.contains(&p(0, 0)));
        assert!(t.group(p(1, 0)).unwrap().liberties.contains(&p(0, 0)));
        assert!(t.check_invariants());
    }

    #[test]
    fn captures_multi_stone_group() {
        let mut t = tracker(5);
        t.add_stone(p(0, 0), Color::White).unwrap();
        t.add_stone(p(0, 1), Color::White).unwrap();
        t.add_stone(p(1, 0), Color::Black).unwrap();
        t.add_stone(p(1, 1), Color::Black).unwrap();
        let captured = t.add_stone(p(0, 2), Color::Black).unwrap();

        assert_eq!(captured, HashSet::from([p(0, 0), p(0, 1)]));
        assert_eq!(t.group_count(), 2);
        assert!(t.check_invariants());
    }

    #[test]
    fn capture_rescues_would_be_suicide() {
        let mut t = tracker(3);
        // White at (0, 0) with its only liberty at (0, 1); black surrounds (0, 1).
        t.add_stone(p(0, 0), Color::White).unwrap();
        t.add_stone(p(1, 0), Color::Black).unwrap();
        t.add_stone(p(1, 1), Color::Black).unwrap();
        t.add_stone(p(0, 2), Color::White).unwrap();
        t.add_stone(p(1, 2), Color::Black).unwrap();

        let captured = t.add_stone(p(0, 1), Color::Black).unwrap();
        assert_eq!(captured, HashSet::from([p(0, 0), p(0, 2)]));
        assert_eq!(t.group(p(0, 1)).unwrap().liberties.len(), 5);
    }

    #[test]
    fn suicide_is_rejected() {
        let mut t = tracker(5);
        t.add_stone(p(0, 1), Color::Black).unwrap();
        t.add_stone(p(1, 0), Color::Black).unwrap();
        assert_eq!(t.add_stone(p(0, 0), Color::White), Err(IllegalMove::Suicide));
    }

    #[test]
    fn ids_are_never_reused() {
        let mut t = tracker(5);
        t.add_stone(p(4, 4), Color::Black).unwrap();
        t.add_stone(p(4, 3), Color::Black).unwrap();
        // 0 and 1 are retired by the merge.
        assert_eq!(t.group(p(4, 4)).unwrap().id, 2);

        t.add_stone(p(0, 0), Color::White).unwrap();
        let white_id = t.group(p(0, 0)).unwrap().id;
        t.add_stone(p(0, 1), Color::Black).unwrap();
        t.add_stone(p(1, 0), Color::Black).unwrap();
        assert!(t.group(p(0, 0)).is_none());

        t.add_stone(p(2, 2), Color::White).unwrap();
        let new_id = t.group(p(2, 2)).unwrap().id;
        assert_eq!(white_id, 3);
        assert_eq!(new_id, 6);
    }

    #[test]
    fn invariant_check_detects_corruption() {
        let mut t = tracker(5);
        t.add_stone(p(2, 2), Color::Black).unwrap();
        assert!(t.check_invariants());

        let id = t.group(p(2, 2)).unwrap().id;
        t.groups.remove(&id);
        assert!(!t.check_invariants());
    }

    #[test]
    #[should_panic(expected = "occupied")]
    fn adding_on_occupied_point_panics() {
        let mut t = tracker(5);
        t.add_stone(p(2, 2), Color::Black).unwrap();
        let _ = t.add_stone(p(2, 2), Color::White);
    }
}

use std::collections::{BTreeSet, HashSet};

use crate::Position;
use crate::board::Board;
use crate::color::Color;

impl Board {
    /// Area score from black's point of view: stones plus surrounded empty
    /// regions, minus `komi`.
    ///
    /// An empty region counts for a color only when every stone bordering it
    /// has that color. Regions touching both colors (dame, seki) and regions
    /// with no border at all (the empty board) count for nobody.
    pub fn score_for_black_player(&self, komi: f32) -> f32 {
        let mut scored = self.clone();
        let mut pending: BTreeSet<Position> =
            self.positions().filter(|&p| self.color(p).is_none()).collect();

        while let Some(start) = pending.pop_first() {
            let (territory, borders) = self.territory_and_borders(start);
            for p in &territory {
                pending.remove(p);
            }

            let mut border_colors = borders.iter().map(|&p| self.color(p));
            let Some(first) = border_colors.next().flatten() else {
                continue;
            };
            if border_colors.all(|c| c == Some(first)) {
                for &p in &territory {
                    scored.place_stone(p, first);
                }
            }
        }

        let [black, white] = Color::ALL.map(|color| scored.stone_count(color) as f32);
        black - white - komi
    }

    /// Flood-fill the empty region containing `start`.
    ///
    /// Returns the region (`territory`) and the occupied points adjacent to
    /// it (`borders`).
    pub fn territory_and_borders(
        &self,
        start: Position,
    ) -> (HashSet<Position>, HashSet<Position>) {
        assert!(
            self.color(start).is_none(),
            "territory must start from an empty point, {start} is occupied"
        );

        let mut territory = HashSet::new();
        let mut borders = HashSet::new();
        let mut stack = vec![start];

        while let Some(p) = stack.pop() {
            if !territory.insert(p) {
                continue;
            }
            for n in p.neighbors(self.size()) {
                if self.color(n).is_some() {
                    borders.insert(n);
                } else if !territory.contains(&n) {
                    stack.push(n);
                }
            }
        }

        debug_assert!(territory.iter().all(|&p| self.color(p).is_none()));
        debug_assert!(borders.iter().all(|&p| self.color(p).is_some()));
        (territory, borders)
    }
}

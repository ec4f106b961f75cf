use crate::{Board, CardId, Color, ManaCost, RuleError};
use serde::{Deserialize, Serialize};

/// Mana currently producible by a board's untapped basic lands.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManaPool {
    pub white: u32,
    pub blue: u32,
    pub black: u32,
    pub red: u32,
    pub green: u32,
    pub colorless: u32,
}

impl ManaPool {
    pub fn from_board(board: &Board) -> Self {
        let mut pool = Self::default();
        for land in board.untapped_lands() {
            if let Some(basic) = land.def.basic_land() {
                *pool.color_mut(basic.color()) += 1;
            }
        }
        pool
    }

    pub fn get(&self, color: Color) -> u32 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
        }
    }

    fn color_mut(&mut self, color: Color) -> &mut u32 {
        match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
        }
    }

    pub fn total(&self) -> u32 {
        self.white + self.blue + self.black + self.red + self.green + self.colorless
    }

    /// Each colored requirement must be met by its own color; the whole
    /// cost must fit in the total, since colored sources also pay generic.
    pub fn covers(&self, cost: &ManaCost) -> bool {
        Color::ALL
            .into_iter()
            .all(|color| cost.colored(color) <= self.get(color))
            && cost.weight() <= self.total()
    }
}

pub fn can_pay(board: &Board, cost: &ManaCost) -> bool {
    ManaPool::from_board(board).covers(cost)
}

/// Taps the first untapped lands in board order, one per unit of mana.
/// Land colors are not matched against the cost.
pub fn pay_cost(board: &mut Board, cost: &ManaCost) -> Result<Vec<CardId>, RuleError> {
    let needed = cost.weight() as usize;
    let lands: Vec<CardId> = board.untapped_lands().map(|card| card.id).take(needed).collect();
    if lands.len() < needed {
        return Err(RuleError::InsufficientMana {
            needed: cost.weight(),
            available: lands.len() as u32,
        });
    }
    for id in &lands {
        if let Some(card) = board.get_mut(*id) {
            card.tap();
        }
    }
    Ok(lands)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardDef, CardInstance, CardType};
    use std::sync::Arc;

    fn land(id: u32, slug: &str) -> CardInstance {
        let def = CardDef::new(slug, slug, ManaCost::default(), vec![CardType::Land]);
        CardInstance::new(CardId(id), 0, Arc::new(def))
    }

    fn board_with(lands: &[&str]) -> Board {
        let mut board = Board::default();
        for (idx, slug) in lands.iter().enumerate() {
            board.put(land(idx as u32 + 1, slug));
        }
        board
    }

    fn cost(text: &str) -> ManaCost {
        ManaCost::parse(text).expect("cost")
    }

    #[test]
    fn three_plains_pay_two_white() {
        let board = board_with(&["plains", "plains", "plains"]);
        assert!(can_pay(&board, &cost("2W")));
        assert_eq!(ManaPool::from_board(&board).white, 3);
    }

    #[test]
    fn two_plains_cannot_pay_two_white() {
        let board = board_with(&["plains", "plains"]);
        assert!(!can_pay(&board, &cost("2W")));
    }

    #[test]
    fn can_pay_is_repeatable_and_leaves_lands_untapped() {
        let board = board_with(&["plains", "plains", "island"]);
        let before = board.clone();
        let first = can_pay(&board, &cost("1W"));
        let second = can_pay(&board, &cost("1W"));
        assert!(first);
        assert_eq!(first, second);
        assert_eq!(board, before);
    }

    #[test]
    fn colored_requirement_needs_matching_color() {
        let board = board_with(&["island", "island", "island"]);
        assert!(!can_pay(&board, &cost("W")));
        assert!(can_pay(&board, &cost("1U")));
    }

    #[test]
    fn tapped_and_nonbasic_lands_produce_nothing() {
        let mut board = board_with(&["plains", "forest", "city-of-brass"]);
        board.cards[0].tap();
        let pool = ManaPool::from_board(&board);
        assert_eq!(pool.white, 0);
        assert_eq!(pool.green, 1);
        assert_eq!(pool.total(), 1);
    }

    #[test]
    fn pay_cost_taps_first_untapped_lands() {
        let mut board = board_with(&["island", "plains", "plains", "plains"]);
        let tapped = pay_cost(&mut board, &cost("1W")).expect("pay");
        assert_eq!(tapped, vec![CardId(1), CardId(2)]);
        assert!(board.cards[0].tapped);
        assert!(board.cards[1].tapped);
        assert!(!board.cards[2].tapped);
    }

    #[test]
    fn pay_cost_without_enough_lands_changes_nothing() {
        let mut board = board_with(&["plains"]);
        let err = pay_cost(&mut board, &cost("2W")).expect_err("short");
        assert_eq!(err, RuleError::InsufficientMana { needed: 3, available: 1 });
        assert!(!board.cards[0].tapped);
    }
}

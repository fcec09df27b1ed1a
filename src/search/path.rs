//! 父节点链还原

use std::collections::HashMap;

use crate::board::Position;
use crate::types::Move;

/// 局面 → (到达该局面的走法, 父局面)，起点映射为 None
pub type ParentMap = HashMap<Position, Option<(Move, Position)>>;

/// 从终局沿父节点链回溯到起点，返回正序走法
///
/// 终局不在表中时返回空序列
pub fn reconstruct_path(parents: &ParentMap, goal: &Position) -> Vec<Move> {
    let mut moves = Vec::new();
    let mut current = *goal;

    while let Some(Some((mv, parent))) = parents.get(&current) {
        moves.push(*mv);
        current = *parent;
    }

    moves.reverse();
    moves
}

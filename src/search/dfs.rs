//! 深度优先搜索策略（盲目）

use std::collections::HashSet;

use super::path::{reconstruct_path, ParentMap};
use super::{successors, SearchResult, SearchStrategy, Solution};
use crate::board::Position;
use crate::types::Move;

/// Depth-First Search - 显式栈 + visited 集合
///
/// 状态图有环（黑王可以来回走），visited 集合保证终止。
/// 返回遇到的第一个将死，不保证最短。
#[derive(Debug, Clone, Default)]
pub struct DepthFirstSearch;

impl DepthFirstSearch {
    pub fn new() -> Self {
        DepthFirstSearch
    }
}

impl SearchStrategy for DepthFirstSearch {
    fn name(&self) -> &'static str {
        "dfs"
    }

    fn search(&self, start: &Position) -> SearchResult {
        // 栈条目带上到达它的走法；父节点在首次出栈时登记，等价于随条目携带整条路径
        let mut stack: Vec<(Position, Option<(Move, Position)>)> = vec![(*start, None)];
        let mut visited: HashSet<Position> = HashSet::new();
        let mut parents = ParentMap::new();
        let mut expanded: u64 = 0;

        while let Some((current, link)) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            parents.insert(current, link);
            expanded += 1;

            if current.is_checkmate() {
                let moves = reconstruct_path(&parents, &current);
                log::debug!(
                    "dfs: checkmate after {} plies, {} expanded",
                    moves.len(),
                    expanded
                );
                return SearchResult::solved(
                    self.name(),
                    Solution {
                        moves,
                        final_position: current,
                    },
                    expanded,
                );
            }

            // 逆序压栈，出栈时恢复枚举顺序
            for (mv, next) in successors(&current).into_iter().rev() {
                stack.push((next, Some((mv, current))));
            }
        }

        log::debug!("dfs: stack exhausted, {} expanded", expanded);
        SearchResult::unsolved(self.name(), expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MoveKind, Side};

    #[test]
    fn test_dfs_follows_enumeration_order() {
        let result = DepthFirstSearch::new().search(&Position::start());
        let labels = result.move_labels();
        // 第一个白方走法就是枚举中的第一个
        assert_eq!(labels[0], "Ka1->a2");
        assert!(labels[1].starts_with('k'));
    }

    #[test]
    fn test_dfs_moves_alternate() {
        let result = DepthFirstSearch::new().search(&Position::start());
        let solution = result.solution.expect("DFS should find a mate from the start");
        assert!(solution.final_position.is_checkmate());

        let mut side = Side::White;
        for mv in &solution.moves {
            let is_white = mv.kind != MoveKind::DefenderKing;
            assert_eq!(is_white, side == Side::White, "{}", mv);
            side = side.opposite();
        }
    }
}

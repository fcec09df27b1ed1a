//! A* 搜索策略（最佳优先）

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use super::path::{reconstruct_path, ParentMap};
use super::{successors, SearchResult, SearchStrategy, Solution};
use crate::board::Position;

/// 开放表条目
///
/// 排序键为 (f, g, seq)，seq 仅用于让相同键的条目有确定的先后
#[derive(Debug, Clone, Copy)]
struct OpenEntry {
    f: u32,
    g: u32,
    seq: u64,
    position: Position,
}

impl OpenEntry {
    #[inline]
    fn key(&self) -> (u32, u32, u64) {
        (self.f, self.g, self.seq)
    }
}

impl PartialEq for OpenEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for OpenEntry {}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key().cmp(&other.key())
    }
}

/// A* Search - 以两王切比雪夫距离为启发
///
/// 启发函数未证明可采纳，结果的最短性只是经验上的
#[derive(Debug, Clone, Default)]
pub struct AStarSearch;

impl AStarSearch {
    pub fn new() -> Self {
        AStarSearch
    }

    /// 两王的切比雪夫距离
    pub fn heuristic(position: &Position) -> u32 {
        position.white_king().chebyshev(position.black_king()) as u32
    }
}

impl SearchStrategy for AStarSearch {
    fn name(&self) -> &'static str {
        "astar"
    }

    fn search(&self, start: &Position) -> SearchResult {
        let mut open: BinaryHeap<Reverse<OpenEntry>> = BinaryHeap::new();
        let mut g_score: HashMap<Position, u32> = HashMap::new();
        let mut parents = ParentMap::new();
        let mut closed: HashSet<Position> = HashSet::new();
        let mut seq: u64 = 0;
        let mut expanded: u64 = 0;

        g_score.insert(*start, 0);
        parents.insert(*start, None);
        open.push(Reverse(OpenEntry {
            f: Self::heuristic(start),
            g: 0,
            seq,
            position: *start,
        }));
        seq += 1;

        while let Some(Reverse(entry)) = open.pop() {
            let current = entry.position;

            // 过期条目：已展开或已有更低代价
            let stale = g_score.get(&current).map_or(false, |&best| entry.g > best);
            if stale || !closed.insert(current) {
                continue;
            }
            expanded += 1;

            if current.is_checkmate() {
                let moves = reconstruct_path(&parents, &current);
                log::debug!(
                    "astar: checkmate after {} plies, {} expanded, {} queued",
                    moves.len(),
                    expanded,
                    open.len()
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

            let g = entry.g + 1;
            for (mv, next) in successors(&current) {
                if g < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                    g_score.insert(next, g);
                    parents.insert(next, Some((mv, current)));
                    open.push(Reverse(OpenEntry {
                        f: g + Self::heuristic(&next),
                        g,
                        seq,
                        position: next,
                    }));
                    seq += 1;
                }
            }
        }

        log::debug!("astar: frontier exhausted, {} expanded", expanded);
        SearchResult::unsolved(self.name(), expanded)
    }
}

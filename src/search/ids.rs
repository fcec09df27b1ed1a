//! 迭代加深搜索策略

use std::collections::HashMap;

use super::path::{reconstruct_path, ParentMap};
use super::{successors, SearchConfig, SearchResult, SearchStrategy, Solution};
use crate::board::Position;

/// Iterative Deepening Search - 深度限制依次为 0, 1, 2, …
///
/// 每一轮都是全新的深度受限 DFS，不继承上一轮的记录。
/// 按深度递增且每轮在限制内穷尽，第一个成功的深度不超过最短强制杀。
#[derive(Debug, Clone)]
pub struct IterativeDeepeningSearch {
    max_depth: u32,
}

/// 单轮深度受限搜索的结果
struct LimitedRun {
    expanded: u64,
    solution: Option<Solution>,
}

impl IterativeDeepeningSearch {
    pub fn new(config: &SearchConfig) -> Self {
        IterativeDeepeningSearch {
            max_depth: config.max_depth,
        }
    }

    /// 深度受限 DFS
    ///
    /// 只有以更浅的深度到达某局面时才重新压栈，深度达到限制的局面不再展开
    fn depth_limited(start: &Position, limit: u32) -> LimitedRun {
        let mut best_depth: HashMap<Position, u32> = HashMap::new();
        let mut parents = ParentMap::new();
        let mut stack: Vec<(Position, u32)> = vec![(*start, 0)];
        let mut expanded: u64 = 0;

        best_depth.insert(*start, 0);
        parents.insert(*start, None);

        while let Some((current, depth)) = stack.pop() {
            expanded += 1;

            if current.is_checkmate() {
                let moves = reconstruct_path(&parents, &current);
                return LimitedRun {
                    expanded,
                    solution: Some(Solution {
                        moves,
                        final_position: current,
                    }),
                };
            }

            if depth >= limit {
                continue;
            }

            let next_depth = depth + 1;
            for (mv, next) in successors(&current).into_iter().rev() {
                let improves = best_depth
                    .get(&next)
                    .map_or(true, |&recorded| next_depth < recorded);
                if improves {
                    best_depth.insert(next, next_depth);
                    parents.insert(next, Some((mv, current)));
                    stack.push((next, next_depth));
                }
            }
        }

        LimitedRun {
            expanded,
            solution: None,
        }
    }
}

impl SearchStrategy for IterativeDeepeningSearch {
    fn name(&self) -> &'static str {
        "ids"
    }

    fn search(&self, start: &Position) -> SearchResult {
        let mut total_expanded: u64 = 0;
        let mut last_expanded: u64 = 0;
        let mut depth_reached = None;

        for limit in 0..self.max_depth {
            let run = Self::depth_limited(start, limit);
            total_expanded += run.expanded;
            last_expanded = run.expanded;
            depth_reached = Some(limit);
            log::debug!("ids: limit={} expanded={}", limit, run.expanded);

            if let Some(solution) = run.solution {
                return SearchResult {
                    total_expanded,
                    depth_reached,
                    ..SearchResult::solved(self.name(), solution, run.expanded)
                };
            }
        }

        log::debug!(
            "ids: no mate within depth {}, {} expanded in total",
            self.max_depth,
            total_expanded
        );
        SearchResult {
            total_expanded,
            depth_reached,
            ..SearchResult::unsolved(self.name(), last_expanded)
        }
    }
}

//! 将杀搜索模块
//!
//! 三种可互换的搜索策略共享同一张状态图：
//! 白方走时后继为全部合法走法，黑方走时至多一个后继（策略应着），所有边代价为 1。
//! 出栈/出队的局面满足将死即成功，探索耗尽即无解。

mod astar;
mod dfs;
mod ids;
mod path;

pub use astar::AStarSearch;
pub use dfs::DepthFirstSearch;
pub use ids::IterativeDeepeningSearch;
pub use path::{reconstruct_path, ParentMap};

use crate::board::Position;
use crate::policy::defender_reply;
use crate::types::{Move, Side};

/// 可用的策略名称
pub const AVAILABLE_STRATEGIES: &[&str] = &["astar", "dfs", "ids"];

/// 默认策略
pub const DEFAULT_STRATEGY: &str = "ids";

/// 迭代加深的深度上限
pub const DEFAULT_MAX_DEPTH: u32 = 50;

/// 搜索配置
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// 迭代加深尝试的深度限制为 `0..max_depth`
    pub max_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// 找到的将杀序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// 按顺序排列的走法（白方走法与黑方应着交替）
    pub moves: Vec<Move>,
    /// 最终的将死局面
    pub final_position: Position,
}

/// 搜索结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub strategy: &'static str,
    pub solution: Option<Solution>,
    /// 产生结果的那一轮搜索中展开的局面数
    pub expanded: u64,
    /// 所有轮次累计展开的局面数（只有迭代加深会多于 `expanded`）
    pub total_expanded: u64,
    /// 迭代加深最后尝试的深度限制
    pub depth_reached: Option<u32>,
}

impl SearchResult {
    pub(crate) fn solved(strategy: &'static str, solution: Solution, expanded: u64) -> Self {
        SearchResult {
            strategy,
            solution: Some(solution),
            expanded,
            total_expanded: expanded,
            depth_reached: None,
        }
    }

    pub(crate) fn unsolved(strategy: &'static str, expanded: u64) -> Self {
        SearchResult {
            strategy,
            solution: None,
            expanded,
            total_expanded: expanded,
            depth_reached: None,
        }
    }

    #[inline]
    pub fn found(&self) -> bool {
        self.solution.is_some()
    }

    /// 解的步数（ply），无解时为 None
    pub fn plies(&self) -> Option<usize> {
        self.solution.as_ref().map(|s| s.moves.len())
    }

    /// 走法记号列表
    pub fn move_labels(&self) -> Vec<String> {
        self.solution
            .as_ref()
            .map(|s| s.moves.iter().map(|m| m.to_label()).collect())
            .unwrap_or_default()
    }
}

/// 搜索策略接口
pub trait SearchStrategy {
    /// 策略名称
    fn name(&self) -> &'static str;

    /// 从起始局面搜索强制将杀
    fn search(&self, start: &Position) -> SearchResult;
}

/// 状态图的后继
pub(crate) fn successors(position: &Position) -> Vec<(Move, Position)> {
    match position.side_to_move() {
        Side::White => position.attacker_moves(),
        Side::Black => defender_reply(position).into_iter().collect(),
    }
}

/// 搜索引擎 - 统一的搜索接口
pub struct SearchEngine {
    strategy: Box<dyn SearchStrategy>,
}

impl SearchEngine {
    /// 创建 A* 搜索
    pub fn astar() -> Self {
        SearchEngine {
            strategy: Box::new(AStarSearch::new()),
        }
    }

    /// 创建深度优先搜索
    pub fn depth_first() -> Self {
        SearchEngine {
            strategy: Box::new(DepthFirstSearch::new()),
        }
    }

    /// 创建迭代加深搜索
    pub fn iterative_deepening(config: &SearchConfig) -> Self {
        SearchEngine {
            strategy: Box::new(IterativeDeepeningSearch::new(config)),
        }
    }

    /// 从策略名称创建
    pub fn from_strategy(name: &str, config: &SearchConfig) -> Result<Self, String> {
        match name.to_lowercase().as_str() {
            "astar" | "a*" | "best-first" => Ok(Self::astar()),
            "dfs" | "depth-first" => Ok(Self::depth_first()),
            "ids" | "iterative" | "iterative-deepening" => Ok(Self::iterative_deepening(config)),
            _ => Err(format!(
                "Unknown strategy: {}. Available: {}",
                name,
                AVAILABLE_STRATEGIES.join(", ")
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        self.strategy.name()
    }

    /// 从局面搜索
    pub fn solve(&self, start: &Position) -> SearchResult {
        let result = self.strategy.search(start);
        match result.plies() {
            Some(plies) => log::info!(
                "{}: mate in {} plies, {} expanded",
                result.strategy,
                plies,
                result.expanded
            ),
            None => log::info!(
                "{}: no solution, {} expanded",
                result.strategy,
                result.total_expanded
            ),
        }
        result
    }

    /// 从 FEN 搜索
    pub fn solve_fen(&self, fen: &str) -> Result<SearchResult, String> {
        let start = Position::from_fen(fen)?;
        Ok(self.solve(&start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions;

    #[test]
    fn test_all_strategies_from_name() {
        let config = SearchConfig::default();
        for name in AVAILABLE_STRATEGIES {
            let engine = SearchEngine::from_strategy(name, &config);
            assert!(engine.is_ok(), "Failed to create strategy: {}", name);
        }
        for alias in ["A*", "best-first", "depth-first", "iterative", "Iterative-Deepening"] {
            assert!(SearchEngine::from_strategy(alias, &config).is_ok(), "{}", alias);
        }
        assert!(SearchEngine::from_strategy("bfs", &config).is_err());
    }

    #[test]
    fn test_successors_alternate() {
        let start = Position::start();
        let white = successors(&start);
        assert_eq!(white.len(), start.attacker_moves().len());
        for (_, next) in &white {
            assert_eq!(next.side_to_move(), Side::Black);
            assert!(successors(next).len() <= 1);
        }
    }

    #[test]
    fn test_dead_end_has_no_successor() {
        let stalemate = Position::from_fen(test_positions::STALEMATE).unwrap();
        assert!(successors(&stalemate).is_empty());
    }

    #[test]
    fn test_mate_in_one() {
        let config = SearchConfig::default();
        for name in ["astar", "ids"] {
            let engine = SearchEngine::from_strategy(name, &config).unwrap();
            let result = engine.solve_fen(test_positions::MATE_IN_ONE).unwrap();
            assert_eq!(result.move_labels(), vec!["Re1->a1"], "{}", name);
        }

        let result = SearchEngine::depth_first()
            .solve_fen(test_positions::MATE_IN_ONE)
            .unwrap();
        let solution = result.solution.unwrap();
        assert!(solution.final_position.is_checkmate());
    }

    #[test]
    fn test_already_mated_start() {
        let config = SearchConfig::default();
        for name in AVAILABLE_STRATEGIES {
            let engine = SearchEngine::from_strategy(name, &config).unwrap();
            let result = engine.solve_fen(test_positions::CHECKMATE).unwrap();
            assert_eq!(result.plies(), Some(0), "{}", name);
            assert_eq!(result.expanded, 1, "{}", name);
        }
    }

    #[test]
    fn test_dead_start_has_no_solution() {
        let config = SearchConfig::default();
        for name in AVAILABLE_STRATEGIES {
            let engine = SearchEngine::from_strategy(name, &config).unwrap();
            let result = engine.solve_fen(test_positions::STALEMATE).unwrap();
            assert!(!result.found(), "{}", name);
            assert!(result.move_labels().is_empty());
        }
    }

    #[test]
    fn test_solve_fen_rejects_bad_input() {
        assert!(SearchEngine::astar().solve_fen("not a fen").is_err());
    }
}

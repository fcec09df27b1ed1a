//! Rook Mate Engine
//!
//! 5×5 棋盘上王车对单王的强制将杀搜索 - 支持 FEN 输入输出

pub mod board;
pub mod fen;
pub mod policy;
pub mod search;
pub mod test_positions;
pub mod types;

pub use board::{attack_squares, Position};
pub use fen::{parse_fen, position_to_fen};
pub use policy::defender_reply;
pub use search::{
    reconstruct_path, AStarSearch, DepthFirstSearch, IterativeDeepeningSearch, ParentMap,
    SearchConfig, SearchEngine, SearchResult, SearchStrategy, Solution, AVAILABLE_STRATEGIES,
    DEFAULT_MAX_DEPTH, DEFAULT_STRATEGY,
};
pub use types::{
    adjacent, in_bounds, GameResult, Move, MoveKind, RookSquare, Side, Square, BOARD_SIZE, CENTER,
};

//! 残局核心类型定义
//!
//! 定义 5×5 王车对单王残局中的基础数据类型：阵营、格子、车的位置、走法

use std::fmt;

/// 棋盘边长
pub const BOARD_SIZE: i8 = 5;

/// 棋盘中心格（黑方应着策略的目标）
pub const CENTER: Square = Square::new(BOARD_SIZE / 2, BOARD_SIZE / 2);

/// 王的八个方向
///
/// 枚举顺序是可观测的：决定黑方策略的同分裁决以及深度优先的遍历顺序
pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 车的四个方向
pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// 阵营：白方进攻（王 + 车），黑方防守（单王）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    /// 获取对方阵营
    pub fn opposite(&self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// 从 FEN 字符解析
    pub fn from_fen_char(c: char) -> Option<Side> {
        match c {
            'w' => Some(Side::White),
            'b' => Some(Side::Black),
            _ => None,
        }
    }

    /// 转换为 FEN 字符
    pub fn to_fen_char(&self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

/// 棋盘格 (file, rank)
///
/// file: 0-4 对应 a-e
/// rank: 0-4 对应 1-5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    pub file: i8,
    pub rank: i8,
}

impl Square {
    pub const fn new(file: i8, rank: i8) -> Self {
        Square { file, rank }
    }

    /// 检查是否在棋盘范围内
    #[inline]
    pub fn is_valid(&self) -> bool {
        in_bounds(*self)
    }

    /// 格子加偏移量（结果可能越界）
    #[inline]
    pub fn offset(&self, file_delta: i8, rank_delta: i8) -> Square {
        Square {
            file: self.file + file_delta,
            rank: self.rank + rank_delta,
        }
    }

    /// 切比雪夫距离
    #[inline]
    pub fn chebyshev(&self, other: Square) -> i8 {
        (self.file - other.file)
            .abs()
            .max((self.rank - other.rank).abs())
    }

    /// 曼哈顿距离
    #[inline]
    pub fn manhattan(&self, other: Square) -> i8 {
        (self.file - other.file).abs() + (self.rank - other.rank).abs()
    }

    /// 从代数坐标解析（如 "a1"）
    pub fn from_alg(s: &str) -> Option<Square> {
        let mut chars = s.chars();
        let (file_ch, rank_ch) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }
        let sq = Square::new(
            (file_ch as i8).wrapping_sub(b'a' as i8),
            (rank_ch as i8).wrapping_sub(b'1' as i8),
        );
        if file_ch.is_ascii() && rank_ch.is_ascii() && sq.is_valid() {
            Some(sq)
        } else {
            None
        }
    }

    /// 转换为代数坐标（如 "a1"）
    pub fn to_alg(&self) -> String {
        if !self.is_valid() {
            return "--".to_string();
        }
        let file_char = (b'a' + self.file as u8) as char;
        let rank_char = (b'1' + self.rank as u8) as char;
        format!("{}{}", file_char, rank_char)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_alg())
    }
}

/// 格子是否在棋盘内
#[inline]
pub fn in_bounds(sq: Square) -> bool {
    (0..BOARD_SIZE).contains(&sq.file) && (0..BOARD_SIZE).contains(&sq.rank)
}

/// 两格是否相邻（切比雪夫距离 ≤ 1，同一格也算相邻）
#[inline]
pub fn adjacent(a: Square, b: Square) -> bool {
    a.chebyshev(b) <= 1
}

/// 车的位置：在棋盘上，或已被吃掉
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RookSquare {
    OnBoard(Square),
    Captured,
}

impl RookSquare {
    /// 车所在的格子，被吃时为 None
    #[inline]
    pub fn square(&self) -> Option<Square> {
        match self {
            RookSquare::OnBoard(sq) => Some(*sq),
            RookSquare::Captured => None,
        }
    }

    #[inline]
    pub fn is_captured(&self) -> bool {
        matches!(self, RookSquare::Captured)
    }
}

impl fmt::Display for RookSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RookSquare::OnBoard(sq) => write!(f, "{}", sq),
            RookSquare::Captured => write!(f, "--"),
        }
    }
}

/// 走法类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    /// 白王
    King,
    /// 白车
    Rook,
    /// 黑王
    DefenderKing,
}

impl MoveKind {
    /// 走法记号前缀
    pub fn prefix(&self) -> char {
        match self {
            MoveKind::King => 'K',
            MoveKind::Rook => 'R',
            MoveKind::DefenderKing => 'k',
        }
    }
}

/// 走法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub kind: MoveKind,
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(kind: MoveKind, from: Square, to: Square) -> Self {
        Move { kind, from, to }
    }

    /// 走法记号，如 `Ka1->b2`、`Ra3->a4`、`ke5->d4`
    pub fn to_label(&self) -> String {
        format!("{}{}->{}", self.kind.prefix(), self.from, self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_label())
    }
}

/// 局面结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    Ongoing,
    /// 黑方被将死
    Checkmate,
    /// 行棋方无子可动且未被将军
    Stalemate,
    /// 车已被吃，只剩双王
    RookCaptured,
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameResult::Ongoing => "ongoing",
            GameResult::Checkmate => "checkmate",
            GameResult::Stalemate => "stalemate",
            GameResult::RookCaptured => "rook captured",
        };
        write!(f, "{}", name)
    }
}

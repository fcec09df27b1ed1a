//! 残局局面
//!
//! 局面是不可变的值类型（字段相等 + 哈希），直接作为搜索中状态图的节点。
//! 走法生成、车的攻击线以及将死判定都在这里。

use crate::fen::{parse_fen, position_to_fen};
use crate::types::{
    adjacent, GameResult, Move, MoveKind, RookSquare, Side, Square, BOARD_SIZE, KING_OFFSETS,
    ROOK_DIRECTIONS,
};

/// 局面：白王、白车（可能已被吃）、黑王、行棋方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    white_king: Square,
    rook: RookSquare,
    black_king: Square,
    side_to_move: Side,
}

impl Position {
    /// 创建局面并校验
    ///
    /// 拒绝越界格子、两王重叠或相邻、车与王同格
    pub fn new(
        white_king: Square,
        rook: RookSquare,
        black_king: Square,
        side_to_move: Side,
    ) -> Result<Position, String> {
        if !white_king.is_valid() {
            return Err(format!("White king off board: {:?}", white_king));
        }
        if !black_king.is_valid() {
            return Err(format!("Black king off board: {:?}", black_king));
        }
        if white_king == black_king {
            return Err(format!("Kings share square {}", white_king));
        }
        if adjacent(white_king, black_king) {
            return Err(format!(
                "Kings may not be adjacent: {} and {}",
                white_king, black_king
            ));
        }
        if let RookSquare::OnBoard(sq) = rook {
            if !sq.is_valid() {
                return Err(format!("Rook off board: {:?}", sq));
            }
            if sq == white_king || sq == black_king {
                return Err(format!("Rook shares square {} with a king", sq));
            }
        }
        Ok(Self::from_parts(white_king, rook, black_king, side_to_move))
    }

    /// 初始局面：白王 a1，白车 a3，黑王 e5，白方先走
    pub fn start() -> Position {
        Self::from_parts(
            Square::new(0, 0),
            RookSquare::OnBoard(Square::new(0, 2)),
            Square::new(4, 4),
            Side::White,
        )
    }

    /// 从 FEN 字符串创建局面
    pub fn from_fen(fen: &str) -> Result<Position, String> {
        parse_fen(fen)
    }

    /// 转换为 FEN 字符串
    pub fn to_fen(&self) -> String {
        position_to_fen(self)
    }

    /// 走法生成内部使用，后继局面由构造保证合法
    #[inline]
    fn from_parts(
        white_king: Square,
        rook: RookSquare,
        black_king: Square,
        side_to_move: Side,
    ) -> Position {
        Position {
            white_king,
            rook,
            black_king,
            side_to_move,
        }
    }

    #[inline]
    pub fn white_king(&self) -> Square {
        self.white_king
    }

    #[inline]
    pub fn rook(&self) -> RookSquare {
        self.rook
    }

    #[inline]
    pub fn black_king(&self) -> Square {
        self.black_king
    }

    #[inline]
    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    /// 某格上的棋子字符（K 白王，R 白车，k 黑王）
    pub fn piece_at(&self, sq: Square) -> Option<char> {
        if sq == self.white_king {
            Some('K')
        } else if sq == self.black_king {
            Some('k')
        } else if self.rook.square() == Some(sq) {
            Some('R')
        } else {
            None
        }
    }

    /// 车当前的攻击格
    pub fn rook_attacks(&self) -> Vec<Square> {
        attack_squares(self.rook, self.white_king, self.black_king)
    }

    /// 黑王是否被车将军
    pub fn is_black_in_check(&self) -> bool {
        self.rook_attacks().contains(&self.black_king)
    }

    /// 黑王的所有合法走法，结果局面轮到白方
    ///
    /// 不看行棋方字段：车的安全过滤也会在候选局面上调用它
    pub fn defender_moves(&self) -> Vec<(Move, Position)> {
        let mut moves = Vec::with_capacity(8);
        let from = self.black_king;

        for (df, dr) in KING_OFFSETS {
            let to = from.offset(df, dr);
            if !to.is_valid() || to == self.white_king || adjacent(to, self.white_king) {
                continue;
            }

            // 走到车上即吃车
            let rook = match self.rook {
                RookSquare::OnBoard(sq) if sq == to => RookSquare::Captured,
                other => other,
            };

            // 不能走进车的攻击线
            if attack_squares(rook, self.white_king, to).contains(&to) {
                continue;
            }

            moves.push((
                Move::new(MoveKind::DefenderKing, from, to),
                Position::from_parts(self.white_king, rook, to, Side::White),
            ));
        }

        moves
    }

    /// 白方的所有合法走法（先王后车），结果局面轮到黑方
    pub fn attacker_moves(&self) -> Vec<(Move, Position)> {
        let mut moves = Vec::with_capacity(24);
        let from = self.white_king;

        for (df, dr) in KING_OFFSETS {
            let to = from.offset(df, dr);
            if !to.is_valid()
                || self.rook.square() == Some(to)
                || to == self.black_king
                || adjacent(to, self.black_king)
            {
                continue;
            }
            moves.push((
                Move::new(MoveKind::King, from, to),
                Position::from_parts(to, self.rook, self.black_king, Side::Black),
            ));
        }

        if let RookSquare::OnBoard(rook_from) = self.rook {
            for (df, dr) in ROOK_DIRECTIONS {
                let mut to = rook_from.offset(df, dr);
                while to.is_valid() {
                    // 车不能越过或吃掉王
                    if to == self.white_king || to == self.black_king {
                        break;
                    }
                    let candidate = Position::from_parts(
                        self.white_king,
                        RookSquare::OnBoard(to),
                        self.black_king,
                        Side::Black,
                    );
                    if !candidate.rook_hangs() {
                        moves.push((Move::new(MoveKind::Rook, rook_from, to), candidate));
                    }
                    to = to.offset(df, dr);
                }
            }
        }

        moves
    }

    /// 黑方是否有任何一步合法应着能吃掉车
    fn rook_hangs(&self) -> bool {
        self.defender_moves()
            .iter()
            .any(|(_, next)| next.rook.is_captured())
    }

    /// 行棋方的所有合法走法
    pub fn legal_moves(&self) -> Vec<(Move, Position)> {
        match self.side_to_move {
            Side::White => self.attacker_moves(),
            Side::Black => self.defender_moves(),
        }
    }

    /// 是否将死：黑方走、车在、黑王被攻击且无路可走
    pub fn is_checkmate(&self) -> bool {
        if self.side_to_move != Side::Black || self.rook.is_captured() {
            return false;
        }
        self.is_black_in_check() && self.defender_moves().is_empty()
    }

    /// 判断局面结果
    pub fn game_result(&self) -> GameResult {
        if self.rook.is_captured() {
            return GameResult::RookCaptured;
        }
        if !self.legal_moves().is_empty() {
            return GameResult::Ongoing;
        }
        if self.is_checkmate() {
            GameResult::Checkmate
        } else {
            GameResult::Stalemate
        }
    }

    /// 文本棋盘（rank 5 在上）
    pub fn to_diagram(&self) -> String {
        let mut out = String::new();
        for rank in (0..BOARD_SIZE).rev() {
            out.push_str(&format!("{} ", rank + 1));
            for file in 0..BOARD_SIZE {
                out.push(' ');
                out.push(self.piece_at(Square::new(file, rank)).unwrap_or('.'));
            }
            out.push('\n');
        }
        out.push_str("   a b c d e\n");
        out
    }
}

/// 车的攻击格
///
/// 沿四个直线方向逐格延伸；遇到任一王时包含该格并停止。车被吃时为空。
/// 四条射线互不重叠，结果无重复。
pub fn attack_squares(rook: RookSquare, king_a: Square, king_b: Square) -> Vec<Square> {
    let origin = match rook {
        RookSquare::OnBoard(sq) => sq,
        RookSquare::Captured => return Vec::new(),
    };

    let mut attacks = Vec::with_capacity(8);
    for (df, dr) in ROOK_DIRECTIONS {
        let mut sq = origin.offset(df, dr);
        while sq.is_valid() {
            attacks.push(sq);
            if sq == king_a || sq == king_b {
                break;
            }
            sq = sq.offset(df, dr);
        }
    }
    attacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_positions;
    use std::collections::HashSet;

    fn sq(s: &str) -> Square {
        Square::from_alg(s).unwrap()
    }

    fn labels(moves: &[(Move, Position)]) -> Vec<String> {
        moves.iter().map(|(mv, _)| mv.to_label()).collect()
    }

    /// 枚举所有合法局面（两种行棋方）
    fn all_positions() -> Vec<Position> {
        let squares: Vec<Square> = (0..BOARD_SIZE)
            .flat_map(|f| (0..BOARD_SIZE).map(move |r| Square::new(f, r)))
            .collect();
        let mut rooks: Vec<RookSquare> = squares.iter().map(|&s| RookSquare::OnBoard(s)).collect();
        rooks.push(RookSquare::Captured);

        let mut positions = Vec::new();
        for &wk in &squares {
            for &bk in &squares {
                for &rook in &rooks {
                    for side in [Side::White, Side::Black] {
                        if let Ok(p) = Position::new(wk, rook, bk, side) {
                            positions.push(p);
                        }
                    }
                }
            }
        }
        positions
    }

    #[test]
    fn test_start_position() {
        let start = Position::start();
        assert_eq!(start.white_king(), sq("a1"));
        assert_eq!(start.rook(), RookSquare::OnBoard(sq("a3")));
        assert_eq!(start.black_king(), sq("e5"));
        assert_eq!(start.side_to_move(), Side::White);
        assert_eq!(start.game_result(), GameResult::Ongoing);
    }

    #[test]
    fn test_new_rejects_malformed() {
        let rook = RookSquare::OnBoard(sq("a3"));
        assert!(Position::new(sq("b2"), rook, sq("c3"), Side::White).is_err());
        assert!(Position::new(sq("b2"), rook, sq("b2"), Side::White).is_err());
        assert!(Position::new(Square::new(5, 0), rook, sq("e5"), Side::White).is_err());
        assert!(Position::new(sq("a1"), RookSquare::OnBoard(sq("a1")), sq("e5"), Side::White).is_err());
        assert!(Position::new(sq("a1"), RookSquare::OnBoard(Square::new(-1, -1)), sq("e5"), Side::White).is_err());
        assert!(Position::new(sq("a1"), RookSquare::Captured, sq("e5"), Side::Black).is_ok());
    }

    #[test]
    fn test_attack_squares_start() {
        let attacks: HashSet<Square> =
            attack_squares(RookSquare::OnBoard(sq("a3")), sq("a1"), sq("e5"))
                .into_iter()
                .collect();
        let expected: HashSet<Square> = ["a1", "a2", "a4", "a5", "b3", "c3", "d3", "e3"]
            .iter()
            .map(|s| sq(s))
            .collect();
        assert_eq!(attacks, expected);
    }

    #[test]
    fn test_attack_ray_stops_at_first_king() {
        // 车 a1，王 a3：a4、a5 被挡住
        let attacks = attack_squares(RookSquare::OnBoard(sq("a1")), sq("a3"), sq("e5"));
        assert!(attacks.contains(&sq("a2")));
        assert!(attacks.contains(&sq("a3")));
        assert!(!attacks.contains(&sq("a4")));
        assert!(!attacks.contains(&sq("a5")));
        assert!(attacks.contains(&sq("e1")));
    }

    #[test]
    fn test_attack_squares_captured_is_empty() {
        for p in all_positions() {
            assert!(attack_squares(RookSquare::Captured, p.white_king(), p.black_king()).is_empty());
        }
    }

    #[test]
    fn test_defender_move_captures_hanging_rook() {
        let p = Position::from_fen(test_positions::ROOK_EN_PRISE).unwrap();
        let moves = p.defender_moves();
        assert_eq!(labels(&moves), vec!["ke5->d4"]);
        assert!(moves[0].1.rook().is_captured());
        assert_eq!(moves[0].1.side_to_move(), Side::White);
    }

    #[test]
    fn test_defender_never_lands_near_white_king() {
        for p in all_positions() {
            for (mv, next) in p.defender_moves() {
                assert!(!adjacent(mv.to, p.white_king()), "{} from {}", mv, p.to_fen());
                assert_eq!(next.black_king(), mv.to);
                assert!(!next.rook_attacks().contains(&mv.to));
            }
        }
    }

    #[test]
    fn test_rook_moves_never_hang() {
        for p in all_positions() {
            for (mv, next) in p.attacker_moves() {
                if mv.kind != MoveKind::Rook {
                    continue;
                }
                let captured = next
                    .defender_moves()
                    .iter()
                    .any(|(_, reply)| reply.rook().is_captured());
                assert!(!captured, "{} from {} hangs the rook", mv, p.to_fen());
            }
        }
    }

    #[test]
    fn test_unprotected_rook_squares_filtered() {
        let p = Position::from_fen(test_positions::ROOK_UNGUARDED).unwrap();
        let rook_moves: Vec<String> = labels(&p.attacker_moves())
            .into_iter()
            .filter(|l| l.starts_with('R'))
            .collect();
        assert_eq!(rook_moves, vec!["Ra4->b4", "Ra4->c4", "Ra4->a5", "Ra4->a3", "Ra4->a2"]);
    }

    #[test]
    fn test_guarded_rook_squares_allowed() {
        let p = Position::from_fen(test_positions::ROOK_GUARDED).unwrap();
        let rook_moves: Vec<String> = labels(&p.attacker_moves())
            .into_iter()
            .filter(|l| l.starts_with('R'))
            .collect();
        assert!(rook_moves.contains(&"Ra4->d4".to_string()));
        assert!(rook_moves.contains(&"Ra4->e4".to_string()));
    }

    #[test]
    fn test_attacker_king_moves_start() {
        let moves = Position::start().attacker_moves();
        let kings: Vec<String> = labels(&moves)
            .into_iter()
            .filter(|l| l.starts_with('K'))
            .collect();
        assert_eq!(kings, vec!["Ka1->a2", "Ka1->b1", "Ka1->b2"]);
        for (_, next) in &moves {
            assert_eq!(next.side_to_move(), Side::Black);
        }
    }

    #[test]
    fn test_checkmate_detection() {
        let mate = Position::from_fen(test_positions::CHECKMATE).unwrap();
        assert!(mate.is_checkmate());
        assert!(mate.is_black_in_check());
        assert_eq!(mate.game_result(), GameResult::Checkmate);

        // 同一局面轮到白方不算将死
        let white = Position::new(mate.white_king(), mate.rook(), mate.black_king(), Side::White).unwrap();
        assert!(!white.is_checkmate());
    }

    #[test]
    fn test_stalemate_is_not_checkmate() {
        let p = Position::from_fen(test_positions::STALEMATE).unwrap();
        assert!(p.defender_moves().is_empty());
        assert!(!p.is_black_in_check());
        assert!(!p.is_checkmate());
        assert_eq!(p.game_result(), GameResult::Stalemate);
    }

    #[test]
    fn test_rook_captured_result() {
        let p = Position::from_fen(test_positions::ROOK_CAPTURED).unwrap();
        assert!(!p.is_checkmate());
        assert_eq!(p.game_result(), GameResult::RookCaptured);
    }

    #[test]
    fn test_checkmate_implies_no_moves_and_check() {
        let mut mates = 0;
        for p in all_positions() {
            if p.is_checkmate() {
                mates += 1;
                assert!(p.defender_moves().is_empty());
                assert!(p.rook_attacks().contains(&p.black_king()));
            } else if p.side_to_move() == Side::Black
                && !p.rook().is_captured()
                && p.defender_moves().is_empty()
            {
                assert!(!p.is_black_in_check(), "{} should be mate", p.to_fen());
            }
        }
        assert!(mates > 0);
    }

    #[test]
    fn test_diagram() {
        let diagram = Position::start().to_diagram();
        let lines: Vec<&str> = diagram.lines().collect();
        assert_eq!(lines[0], "5  . . . . k");
        assert_eq!(lines[2], "3  R . . . .");
        assert_eq!(lines[4], "1  K . . . .");
        assert_eq!(lines[5], "   a b c d e");
    }
}

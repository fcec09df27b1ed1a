//! FEN 解析和生成
//!
//! 格式: `<棋盘> <回合>`
//!
//! 棋盘从 rank 5 到 rank 1，行之间用 `/` 分隔：
//! - 白王：K
//! - 白车：R（缺省表示车已被吃）
//! - 黑王：k
//! - 空格：数字 (1-5)
//!
//! 回合：`w` 白方，`b` 黑方。初始局面为 `4k/5/R4/5/K4 w`。

use crate::board::Position;
use crate::types::{RookSquare, Side, Square, BOARD_SIZE};

/// 解析 FEN 字符串
pub fn parse_fen(fen: &str) -> Result<Position, String> {
    let parts: Vec<&str> = fen.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(format!(
            "Invalid FEN format: expected '<board> <turn>', got: {}",
            fen
        ));
    }

    let (white_king, rook, black_king) = parse_board(parts[0])?;

    let turn_str = parts[1];
    let mut turn_chars = turn_str.chars();
    let turn = match (turn_chars.next(), turn_chars.next()) {
        (Some(c), None) => Side::from_fen_char(c),
        _ => None,
    }
    .ok_or_else(|| format!("Invalid turn: {}", turn_str))?;

    Position::new(white_king, rook, black_king, turn)
}

/// 解析棋盘字符串
fn parse_board(board_str: &str) -> Result<(Square, RookSquare, Square), String> {
    let rows: Vec<&str> = board_str.split('/').collect();
    if rows.len() != BOARD_SIZE as usize {
        return Err(format!(
            "Invalid board: expected {} ranks, got {}",
            BOARD_SIZE,
            rows.len()
        ));
    }

    let mut white_king = None;
    let mut rook = None;
    let mut black_king = None;

    for (row_idx, row_str) in rows.iter().enumerate() {
        // FEN 从上往下是 rank 5 到 rank 1
        let rank = BOARD_SIZE - 1 - row_idx as i8;
        let mut file: i8 = 0;

        for ch in row_str.chars() {
            if file >= BOARD_SIZE {
                return Err(format!("Rank {} overflows the board: {}", rank + 1, row_str));
            }

            match ch {
                '1'..='5' => file += (ch as i8) - ('0' as i8),
                'K' | 'R' | 'k' => {
                    let slot = match ch {
                        'K' => &mut white_king,
                        'R' => &mut rook,
                        _ => &mut black_king,
                    };
                    if slot.is_some() {
                        return Err(format!("Duplicate piece: {}", ch));
                    }
                    *slot = Some(Square::new(file, rank));
                    file += 1;
                }
                _ => return Err(format!("Invalid piece char: {}", ch)),
            }
        }

        if file != BOARD_SIZE {
            return Err(format!(
                "Rank {} has {} files, expected {}: {}",
                rank + 1,
                file,
                BOARD_SIZE,
                row_str
            ));
        }
    }

    let white_king = white_king.ok_or_else(|| "Missing white king 'K'".to_string())?;
    let black_king = black_king.ok_or_else(|| "Missing black king 'k'".to_string())?;
    let rook = rook.map_or(RookSquare::Captured, RookSquare::OnBoard);

    Ok((white_king, rook, black_king))
}

/// 局面转换为 FEN 字符串
pub fn position_to_fen(position: &Position) -> String {
    let mut rows = Vec::with_capacity(BOARD_SIZE as usize);

    for rank in (0..BOARD_SIZE).rev() {
        let mut row = String::new();
        let mut empty = 0;
        for file in 0..BOARD_SIZE {
            match position.piece_at(Square::new(file, rank)) {
                Some(c) => {
                    if empty > 0 {
                        row.push_str(&empty.to_string());
                        empty = 0;
                    }
                    row.push(c);
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            row.push_str(&empty.to_string());
        }
        rows.push(row);
    }

    format!("{} {}", rows.join("/"), position.side_to_move().to_fen_char())
}

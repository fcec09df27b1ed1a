//! 黑方应着策略
//!
//! 贪心且确定：在所有合法应着中选择落点离棋盘中心曼哈顿距离最小的一步，
//! 距离相同时取走法枚举顺序中的第一个。不做任何前瞻。

use crate::board::Position;
use crate::types::{Move, CENTER};

/// 黑方的应着，无合法走法时返回 None（死路）
pub fn defender_reply(position: &Position) -> Option<(Move, Position)> {
    position
        .defender_moves()
        .into_iter()
        .min_by_key(|(_, next)| next.black_king().manhattan(CENTER))
}

//! 残局测试局面库
//!
//! 提供命名的 FEN 测试局面，方便测试和调试

/// 初始局面 - 白王 a1，白车 a3，黑王 e5，白方先走
pub const START: &str = "4k/5/R4/5/K4 w";

/// 一步杀：Re1->a1
pub const MATE_IN_ONE: &str = "k1K2/5/5/5/4R w";

/// 已将死：黑王 a5 被 a 线车将军，b4/b5 被白王控制
pub const CHECKMATE: &str = "k1K2/5/5/5/R4 b";

/// 逼和：黑王 a5 未被将军但无路可走
pub const STALEMATE: &str = "k4/1R3/1K3/5/5 b";

/// 车已被吃
pub const ROOK_CAPTURED: &str = "4k/5/5/5/K4 b";

/// 车挂在黑王旁边，黑方唯一应着是吃车
pub const ROOK_EN_PRISE: &str = "4k/3R1/5/5/K4 b";

/// 白王 d3 保护 d4/e4，车可以走到黑王旁边
pub const ROOK_GUARDED: &str = "4k/R4/3K1/5/5 w";

/// 白王远在 a1，车走到 d4/e4 会被吃
pub const ROOK_UNGUARDED: &str = "4k/R4/5/5/K4 w";

/// 黑方应着同分：d5 与 e4 离中心都是 3
pub const CENTER_TIE: &str = "4k/5/2K2/5/R4 b";

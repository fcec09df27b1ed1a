//! Rook Mate CLI
//!
//! 命令行界面，用于运行将杀搜索
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 通信

use clap::{Parser, Subcommand};
use rook_mate::test_positions::START;
use rook_mate::{
    Position, SearchConfig, SearchEngine, SearchResult, AVAILABLE_STRATEGIES, DEFAULT_MAX_DEPTH,
    DEFAULT_STRATEGY,
};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "rook-mate")]
#[command(about = "King and rook vs king mate search on a 5x5 board", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 搜索强制将杀
    Solve {
        /// FEN 字符串
        #[arg(long, default_value = START)]
        fen: String,

        /// 搜索策略 (astar, dfs, ids)
        #[arg(long, default_value = DEFAULT_STRATEGY)]
        strategy: String,

        /// 迭代加深的深度上限
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 依次运行所有策略并对比
    Compare {
        /// FEN 字符串
        #[arg(long, default_value = START)]
        fen: String,

        /// 迭代加深的深度上限
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: u32,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 获取合法走法
    Moves {
        /// FEN 字符串
        #[arg(long, default_value = START)]
        fen: String,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct SolveResponse {
    strategy: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    plies: Option<usize>,
    expanded: u64,
    total_expanded: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    depth_reached: Option<u32>,
    moves: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_fen: Option<String>,
    elapsed_ms: f64,
}

impl SolveResponse {
    fn from_result(result: &SearchResult, elapsed_ms: f64) -> Self {
        SolveResponse {
            strategy: result.strategy.to_string(),
            found: result.found(),
            plies: result.plies(),
            expanded: result.expanded,
            total_expanded: result.total_expanded,
            depth_reached: result.depth_reached,
            moves: result.move_labels(),
            final_fen: result.solution.as_ref().map(|s| s.final_position.to_fen()),
            elapsed_ms,
        }
    }
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: Option<String>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    max_depth: Option<u32>,
}

#[derive(Serialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(flatten)]
    solve: Option<SolveResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    legal_moves: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn success_solve(solve: SolveResponse) -> Self {
        Self {
            ok: true,
            solve: Some(solve),
            ..Default::default()
        }
    }

    fn success_moves(legal_moves: Vec<String>, result: String) -> Self {
        Self {
            ok: true,
            legal_moves: Some(legal_moves),
            result: Some(result),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Solve {
            fen,
            strategy,
            max_depth,
            json,
        } => run_solve(&fen, &strategy, max_depth).and_then(|response| {
            if json {
                print_json(&response, true)
            } else {
                print_report(&response);
                Ok(())
            }
        }),

        Commands::Compare {
            fen,
            max_depth,
            json,
        } => run_compare(&fen, max_depth).and_then(|responses| {
            if json {
                print_json(&responses, true)
            } else {
                print_comparison(&responses);
                Ok(())
            }
        }),

        Commands::Moves { fen } => Position::from_fen(&fen).map(|position| {
            print!("{}", position.to_diagram());
            println!("Side to move: {}", position.side_to_move());
            println!("Result: {}", position.game_result());
            let moves = position.legal_moves();
            println!("Legal moves ({}):", moves.len());
            for (mv, _) in &moves {
                println!("  {}", mv);
            }
        }),

        Commands::Server => {
            run_server();
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// 运行单个策略
fn run_solve(fen: &str, strategy: &str, max_depth: u32) -> Result<SolveResponse, String> {
    let config = SearchConfig { max_depth };
    let engine = SearchEngine::from_strategy(strategy, &config)?;
    let start = Position::from_fen(fen)?;

    let timer = Instant::now();
    let result = engine.solve(&start);
    let elapsed_ms = timer.elapsed().as_secs_f64() * 1000.0;

    Ok(SolveResponse::from_result(&result, elapsed_ms))
}

/// 依次运行所有策略
fn run_compare(fen: &str, max_depth: u32) -> Result<Vec<SolveResponse>, String> {
    AVAILABLE_STRATEGIES
        .iter()
        .map(|name| run_solve(fen, name, max_depth))
        .collect()
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<(), String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .map_err(|e| format!("JSON encoding failed: {}", e))?;
    println!("{}", text);
    Ok(())
}

fn print_report(response: &SolveResponse) {
    println!("Strategy: {}", response.strategy);
    match response.plies {
        Some(plies) => println!("Solution length: {} plies", plies),
        None => println!("No solution found."),
    }
    println!("Expanded: {}", response.expanded);
    if let Some(depth) = response.depth_reached {
        println!(
            "Total expanded: {} (last depth limit {})",
            response.total_expanded, depth
        );
    }
    if response.found {
        println!("Moves:");
        for (step, mv) in response.moves.iter().enumerate() {
            println!("  {:>3}. {}", step + 1, mv);
        }
    }
    println!("Time: {:.3}ms", response.elapsed_ms);
}

fn print_comparison(responses: &[SolveResponse]) {
    println!(
        "{:<8} {:>6} {:>10} {:>10} {:>10}",
        "strategy", "plies", "expanded", "total", "time(ms)"
    );
    for r in responses {
        let plies = r
            .plies
            .map_or_else(|| "-".to_string(), |p| p.to_string());
        println!(
            "{:<8} {:>6} {:>10} {:>10} {:>10.3}",
            r.strategy, plies, r.expanded, r.total_expanded, r.elapsed_ms
        );
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let response = match serde_json::from_str::<ServerRequest>(&line) {
            Ok(request) => match request.cmd.as_str() {
                "solve" => handle_solve_request(&request),
                "moves" => handle_moves_request(&request),
                "quit" => break,
                _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
            },
            Err(e) => ServerResponse::error(&format!("Invalid JSON: {}", e)),
        };

        // 返回响应
        if let Err(e) = print_json(&response, false) {
            log::error!("{}", e);
        }
        let _ = stdout.flush();
    }
}

/// 处理 solve 命令
fn handle_solve_request(request: &ServerRequest) -> ServerResponse {
    let fen = request.fen.as_deref().unwrap_or(START);
    let strategy = request.strategy.as_deref().unwrap_or(DEFAULT_STRATEGY);
    let max_depth = request.max_depth.unwrap_or(DEFAULT_MAX_DEPTH);

    match run_solve(fen, strategy, max_depth) {
        Ok(solve) => ServerResponse::success_solve(solve),
        Err(e) => ServerResponse::error(&format!("Search error: {}", e)),
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    let fen = request.fen.as_deref().unwrap_or(START);
    match Position::from_fen(fen) {
        Ok(position) => {
            let moves = position
                .legal_moves()
                .iter()
                .map(|(mv, _)| mv.to_label())
                .collect();
            ServerResponse::success_moves(moves, position.game_result().to_string())
        }
        Err(e) => ServerResponse::error(&format!("Invalid FEN: {}", e)),
    }
}

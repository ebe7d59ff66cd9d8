//! Interactive terminal driver: human (Blue) versus agent (Red).
//!
//! Commands at the prompt:
//!   r ROW COL          reveal an own hidden piece
//!   m ROW COL ROW COL  move or capture with a revealed piece
//!   q                  quit
//!
//! Illegal input is reported and re-prompted; it never consumes the turn.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use royal_chess::rules::apply_skip;
use royal_chess::{
    apply_action, has_any_action, load_table, terminal, AgentConfig, BoardState, GameAction,
    GameConfig, GameRng, Player, Pos, QLearningAgent, Visibility,
};

/// Play Royal Chess against a trained agent.
#[derive(Parser)]
#[command(name = "play", about = "Play Royal Chess against a trained agent")]
struct Cli {
    /// Value table for the agent (untrained if omitted or missing)
    #[arg(long)]
    table: Option<PathBuf>,

    /// Seed for setup and the agent's tie-breaking
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn render(board: &BoardState) -> String {
    let size = board.size();
    let mut out = String::new();
    out.push_str("    ");
    for col in 0..size {
        out.push_str(&format!("{col}  "));
    }
    out.push('\n');
    for row in 0..size {
        out.push_str(&format!("  {row} "));
        for col in 0..size {
            let cell = match board.piece_at(Pos::new(row, col)) {
                None => "..".to_string(),
                Some(piece) if piece.visibility == Visibility::Hidden => "??".to_string(),
                Some(piece) => {
                    let side = match piece.owner {
                        Player::Blue => 'b',
                        Player::Red => 'r',
                    };
                    format!("{side}{}", piece.rank.code())
                }
            };
            out.push_str(&cell);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

enum Command {
    Action(GameAction),
    Quit,
}

fn parse_command(line: &str, board: &BoardState) -> Result<Command, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let parse_pos = |row: &str, col: &str| -> Result<Pos, String> {
        let row = row.parse().map_err(|_| format!("bad row '{row}'"))?;
        let col = col.parse().map_err(|_| format!("bad column '{col}'"))?;
        Ok(Pos::new(row, col))
    };
    match fields.as_slice() {
        ["q"] | ["quit"] => Ok(Command::Quit),
        ["r", row, col] => Ok(Command::Action(GameAction::Reveal(parse_pos(row, col)?))),
        ["m", r1, c1, r2, c2] => {
            let from = parse_pos(r1, c1)?;
            let to = parse_pos(r2, c2)?;
            // Move and Capture apply identically; pick by destination.
            if board.piece_at(to).is_some() {
                Ok(Command::Action(GameAction::Capture { from, to }))
            } else {
                Ok(Command::Action(GameAction::Move { from, to }))
            }
        }
        _ => Err("commands: 'r ROW COL', 'm ROW COL ROW COL', 'q'".to_string()),
    }
}

fn human_turn(board: &mut BoardState, input: &mut impl BufRead) -> Result<bool> {
    if !has_any_action(board, board.current_player()) {
        println!("no legal action; turn skipped");
        apply_skip(board);
        return Ok(true);
    }

    loop {
        print!("your move> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(false);
        }
        let command = match parse_command(line.trim(), board) {
            Ok(command) => command,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        match command {
            Command::Quit => return Ok(false),
            Command::Action(action) => match apply_action(board, action) {
                Ok(_) => return Ok(true),
                Err(err) => println!("illegal: {err}"),
            },
        }
    }
}

fn agent_turn(board: &mut BoardState, agent: &mut QLearningAgent, rng: &mut GameRng) {
    if !has_any_action(board, board.current_player()) {
        println!("agent has no legal action; turn skipped");
        apply_skip(board);
        return;
    }

    // Greedy choice; the agent does not learn during interactive play.
    let (_, action) = agent.choose_action(board, rng);
    match action {
        GameAction::Reveal(pos) => println!("agent reveals {pos}"),
        GameAction::Move { from, to } => println!("agent moves {from} -> {to}"),
        GameAction::Capture { from, to } => println!("agent captures {from} -> {to}"),
        GameAction::Skip => println!("agent skips"),
    }
    if let Err(err) = apply_action(board, action) {
        debug_assert!(false, "agent proposed illegal action: {err}");
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut agent = QLearningAgent::new(AgentConfig::default().with_epsilon(0.0));
    if let Some(path) = &cli.table {
        let table = load_table(path)
            .with_context(|| format!("failed to load table {}", path.display()))?;
        println!("agent table: {} states", table.len());
        agent.set_table(table);
    }

    let config = GameConfig::default();
    let mut rng = GameRng::new(cli.seed);
    let mut board = BoardState::setup(&config, &mut rng)?;
    if rng.gen_bool(0.5) {
        board.set_current_player(Player::Red);
    }
    println!("you are Blue; {} moves first", board.current_player());

    let stdin = std::io::stdin();
    let mut input = stdin.lock();

    let result = loop {
        if let Some(result) = terminal(&board, &config) {
            break Some(result);
        }
        println!("\nturn {} — {} to move", board.turn_count() + 1, board.current_player());
        print!("{}", render(&board));

        match board.current_player() {
            Player::Blue => {
                if !human_turn(&mut board, &mut input)? {
                    break None;
                }
            }
            Player::Red => agent_turn(&mut board, &mut agent, &mut rng),
        }
    };

    match result {
        Some(royal_chess::GameResult::Winner(player)) => println!("\n{player} wins!"),
        Some(royal_chess::GameResult::Draw) => println!("\ndraw"),
        None => println!("\ngoodbye"),
    }
    Ok(())
}

use std::io::{self, Write};

use anyhow::Result;
use tracing::info;

use minimax_engine::MinimaxEngine;
use qirkat_core::{Board, BoardView, Engine, Move, PieceColor, SearchLimits};
use random_engine::RandomEngine;

use crate::settings::PlayerKind;

type Input = io::Lines<io::StdinLock<'static>>;

/// What a manual player's turn produced.
enum Turn {
    /// The player moved or undid; the turn loop re-examines the board.
    Acted,
    /// The player abandoned play; back to the command prompt.
    Quit,
}

/// An interactive Qirkat session: one board, a move source per side, and
/// the command loop that drives them.
pub struct Game {
    board: Board,
    display: BoardView,
    show_board: bool,
    legend: bool,
    white: PlayerKind,
    black: PlayerKind,
    minimax: MinimaxEngine,
    random: RandomEngine,
    limits: SearchLimits,
}

impl Game {
    pub fn new(
        white: PlayerKind,
        black: PlayerKind,
        limits: SearchLimits,
        seed: Option<u64>,
        legend: bool,
        show_board: bool,
    ) -> Game {
        let mut board = Board::new();
        let display = board.watch();
        let random = match seed {
            Some(seed) => RandomEngine::with_seed(seed),
            None => RandomEngine::new(),
        };
        Game {
            board,
            display,
            show_board,
            legend,
            white,
            black,
            minimax: MinimaxEngine::new(),
            random,
            limits,
        }
    }

    /// Read and execute commands until quit or end of input.
    pub fn run(&mut self) -> Result<()> {
        let mut lines = io::stdin().lines();
        println!("Qirkat. Type 'help' for a list of commands.");
        self.prompt("> ")?;
        while let Some(line) = lines.next() {
            let line = line?;
            if !self.command(line.trim(), &mut lines)? {
                break;
            }
            self.prompt("> ")?;
        }
        Ok(())
    }

    /// Execute one setup-prompt command. Returns false to exit.
    fn command(&mut self, line: &str, lines: &mut Input) -> Result<bool> {
        let mut parts = line.split_whitespace();
        let cmd = match parts.next() {
            Some(c) => c,
            None => return Ok(true),
        };
        match cmd {
            "quit" => return Ok(false),
            "help" => help(),
            "clear" => {
                self.board.clear();
                self.poll_display();
            }
            "start" => self.play(lines)?,
            "auto" => self.assign_player(parts.next(), PlayerKind::Minimax),
            "manual" => self.assign_player(parts.next(), PlayerKind::Manual),
            "random" => self.assign_player(parts.next(), PlayerKind::Random),
            "set" => {
                let color = parts.next();
                let cells: String = parts.collect::<Vec<_>>().join(" ");
                self.set_board(color, &cells);
            }
            "dump" => self.dump(),
            "seed" => match parts.next().and_then(|s| s.parse::<u64>().ok()) {
                Some(seed) => self.random.reseed(seed),
                None => println!("usage: seed <number>"),
            },
            "undo" => self.undo(),
            _ => self.try_move(line),
        }
        Ok(true)
    }

    /// Alternate turns until the game ends or the manual player stops.
    fn play(&mut self, lines: &mut Input) -> Result<()> {
        while !self.board.game_over() {
            let side = self.board.whose_move();
            let kind = match side {
                PieceColor::White => self.white,
                _ => self.black,
            };
            match kind {
                PlayerKind::Manual => match self.manual_turn(side, lines)? {
                    Turn::Acted => {}
                    Turn::Quit => return Ok(()),
                },
                PlayerKind::Minimax | PlayerKind::Random => {
                    let outcome = match kind {
                        PlayerKind::Minimax => self.minimax.search(&self.board, self.limits),
                        _ => self.random.search(&self.board, self.limits),
                    };
                    let mov = match outcome.best_move {
                        Some(mov) => mov,
                        None => {
                            // Only reachable with a zero time budget.
                            println!("{side} has run out of time to move.");
                            return Ok(());
                        }
                    };
                    println!("{side} moves {mov}.");
                    self.board.make_move(&mov);
                    self.poll_display();
                }
            }
        }
        let winner = self.board.whose_move().opposite();
        info!(%winner, moves = self.board.move_history().len(), "game over");
        println!("{winner} wins.");
        Ok(())
    }

    /// Prompt SIDE until it enters a legal move, undoes, or gives up.
    fn manual_turn(&mut self, side: PieceColor, lines: &mut Input) -> Result<Turn> {
        loop {
            self.prompt(&format!("{side}: "))?;
            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(Turn::Quit),
            };
            match line.trim() {
                "" => continue,
                "quit" => return Ok(Turn::Quit),
                "help" => help(),
                "dump" => self.dump(),
                "undo" => {
                    self.undo();
                    return Ok(Turn::Acted);
                }
                text => match text.parse::<Move>() {
                    Ok(mov) => {
                        if self.board.legal_move(&mov) {
                            self.board.make_move(&mov);
                            self.poll_display();
                            return Ok(Turn::Acted);
                        }
                        println!("Illegal move.");
                    }
                    Err(err) => println!("{err}"),
                },
            }
        }
    }

    /// Apply a move typed at the setup prompt.
    fn try_move(&mut self, text: &str) {
        match text.parse::<Move>() {
            Ok(mov) => {
                if self.board.legal_move(&mov) {
                    self.board.make_move(&mov);
                    self.poll_display();
                } else {
                    println!("Illegal move.");
                }
            }
            Err(err) => println!("unknown command or move: {err}"),
        }
    }

    fn assign_player(&mut self, color: Option<&str>, kind: PlayerKind) {
        match color.map(str::to_ascii_lowercase).as_deref() {
            Some("white" | "w") => self.white = kind,
            Some("black" | "b") => self.black = kind,
            _ => println!("usage: auto|manual|random white|black"),
        }
    }

    fn set_board(&mut self, color: Option<&str>, cells: &str) {
        let next_move = match color.map(str::to_ascii_lowercase).as_deref() {
            Some("white" | "w") => PieceColor::White,
            Some("black" | "b") => PieceColor::Black,
            _ => {
                println!("usage: set white|black <25 cells of b, w, ->");
                return;
            }
        };
        match self.board.set_pieces(cells, next_move) {
            Ok(()) => self.poll_display(),
            Err(err) => println!("{err}"),
        }
    }

    fn undo(&mut self) {
        if self.board.move_history().is_empty() {
            println!("nothing to undo");
        } else {
            self.board.undo();
            self.poll_display();
        }
    }

    fn dump(&self) {
        println!("===");
        println!("{}", self.board.to_text(self.legend));
        println!("===");
    }

    /// Mirror pending board changes to the screen when enabled.
    fn poll_display(&mut self) {
        if self.display.refresh() && self.show_board {
            println!("{}", self.display.to_text(self.legend));
        }
    }

    fn prompt(&self, text: &str) -> Result<()> {
        print!("{text}");
        io::stdout().flush()?;
        Ok(())
    }
}

fn help() {
    println!("Commands:");
    println!("  start                begin play from the current position");
    println!("  <move>               apply a move, e.g. c2-c3 or a3-c5-c3");
    println!("  clear                reset the board to the start position");
    println!("  auto <color>         let the search engine play that side");
    println!("  random <color>       let the random engine play that side");
    println!("  manual <color>       take over that side yourself");
    println!("  set <color> <cells>  load a position, <color> to move");
    println!("  dump                 print the current board");
    println!("  seed <number>        reseed the random engine");
    println!("  undo                 retract the last move");
    println!("  quit                 exit");
}

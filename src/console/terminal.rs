use std::io::{BufRead, Write};

use log::debug;

use super::display::{DisplayError, TerminalDisplay};
use super::script::parse_moves;
use crate::BoardDisplay;
use crate::board::Position;
use crate::feedback::compute_feedback;
use crate::game_logic::GameState;

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

const COMMANDS: &[&str] = &[
    "Possible commands: ",
    "    'help'                       Show this menu",
    "    'quit'                       Quit Chess",
    "    'new'                        Create a new game",
    "    'board'                      Show the chess board",
    "    'list'                       List all possible moves",
    "    'move <colrow> <colrow>'     Make a move",
    "    'show <colrow>'              Highlight the moves of one piece",
    "    'play <moves>'               Play a sequence such as 'f2f3 e7e6'",
    "    'load <fen>|startpos'        Load a position",
    "    'fen'                        Print the current position as FEN",
];

/// Whether the command loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Interactive text console for a two-player game.
///
/// Reads one command per line from `input` until `quit` or end of input.
pub struct Console<R, W> {
    input: R,
    display: TerminalDisplay<W>,
    state: GameState,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Console with colors chosen from the environment.
    pub fn new(input: R, writer: W) -> Self {
        Self::with_display(input, TerminalDisplay::from_env(writer))
    }

    pub fn with_display(input: R, display: TerminalDisplay<W>) -> Self {
        Self {
            input,
            display,
            state: GameState::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_writer(self) -> W {
        self.display.into_inner()
    }

    /// Runs the command loop on a fresh game.
    pub fn run(&mut self) -> Result<(), DisplayError> {
        self.display.say("Welcome to Chess!")?;
        self.display.say("Type 'help' for a list of commands.")?;
        self.state.reset();

        loop {
            if !self.state.is_over() {
                self.show_board(None)?;
                let side = self.state.current_player();
                self.display.say(&format!("{side}'s Move"))?;
            }

            self.display.prompt()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                debug!("end of input");
                break;
            }

            if self.execute(line.trim())? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn execute(&mut self, line: &str) -> Result<Flow, DisplayError> {
        let (command, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let args = args.trim();

        match command {
            "" => {}
            "help" => {
                for text in COMMANDS {
                    self.display.say(text)?;
                }
            }
            "new" => self.state.reset(),
            "quit" => {
                self.display.say("Goodbye!")?;
                return Ok(Flow::Quit);
            }
            "board" => {
                self.display.say("Current Game:")?;
                if self.state.is_over() {
                    self.show_board(None)?;
                }
            }
            "list" => self.list_moves()?,
            "move" => self.move_command(args)?,
            "show" => match args.parse::<Position>() {
                Ok(square) => self.show_board(Some(square))?,
                Err(e) => self.display.say(&e.to_string())?,
            },
            "play" => self.play_script(args)?,
            "load" => self.load(args)?,
            "fen" => {
                let fen = self.state.to_fen();
                self.display.say(&fen)?;
            }
            _ => self
                .display
                .say("I didn't understand that.  Type 'help' for a list of commands.")?,
        }
        Ok(Flow::Continue)
    }

    fn list_moves(&mut self) -> Result<(), DisplayError> {
        let moves = self.state.current_legal_moves();
        if moves.is_empty() {
            return self.display.say("No possible moves.");
        }
        for (from, destinations) in &moves {
            for to in destinations {
                self.display.say(&format!("{from} {to}"))?;
            }
        }
        Ok(())
    }

    fn move_command(&mut self, args: &str) -> Result<(), DisplayError> {
        if self.state.is_over() {
            self.show_board(None)?;
            return self.display.say("The game was over.");
        }
        let squares: Vec<&str> = args.split_whitespace().collect();
        let [from, to] = squares.as_slice() else {
            return self
                .display
                .say("Invalid command. Command format is 'move b2 b3'.");
        };
        match self.state.move_piece(from, to) {
            Ok(true) => self.announce_winner(),
            Ok(false) => self.display.say("Illegal move!"),
            Err(e) => self.display.say(&e.to_string()),
        }
    }

    fn play_script(&mut self, script: &str) -> Result<(), DisplayError> {
        if self.state.is_over() {
            return self.display.say("The game was over.");
        }
        let moves = match parse_moves(script) {
            Ok(moves) => moves,
            Err(e) => return self.display.say(&e.to_string()),
        };
        for (from, to) in moves {
            if self.state.is_over() {
                return self.display.say("The game was over.");
            }
            if !self.state.try_move(from, to) {
                return self.display.say(&format!("Illegal move! ({from} {to})"));
            }
        }
        self.announce_winner()
    }

    fn load(&mut self, args: &str) -> Result<(), DisplayError> {
        let fen = match args {
            "" => return self.display.say("Usage: load <fen> | load startpos"),
            "startpos" => STARTPOS,
            fen => fen,
        };
        match GameState::from_fen(fen) {
            Ok(state) => {
                self.state = state;
                self.display.say("Position loaded.")?;
                self.announce_winner()
            }
            Err(e) => self.display.say(&e.to_string()),
        }
    }

    /// Prints the congratulation and final board once the game has ended.
    fn announce_winner(&mut self) -> Result<(), DisplayError> {
        if let Some(winner) = self.state.winner() {
            self.display
                .say(&format!("The game is over. Congrats to {winner}."))?;
            self.show_board(None)?;
        }
        Ok(())
    }

    /// Draws the board with check highlights, plus the moves of `selected`.
    fn show_board(&mut self, selected: Option<Position>) -> Result<(), DisplayError> {
        let feedback = compute_feedback(&self.state.snapshot(), selected);
        self.display.show(self.state.board(), &feedback)
    }
}

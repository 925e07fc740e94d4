//! PGN move-sequence producer.
//!
//! Games are streamed with `pgn-reader` and the mainline of each one is
//! replayed on a `shakmaty` board. Every move is re-rendered as SAN from the
//! position it was played in, so labels are canonical regardless of how the
//! source file spelled them. A null move (`--`) hands the turn to the other
//! side and is kept as a label of its own. The first move that does not
//! resolve on the board ends the game's line.

use std::io::{self, Read};
use std::ops::ControlFlow;

use pgn_reader::{RawTag, Reader, SanPlus, Skip, Visitor};
use shakmaty::{fen::Fen, san::San, CastlingMode, Chess, Position};

/// One game's mainline as SAN labels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedGame {
    pub moves: Vec<String>,
    /// The line was cut short by an unplayable move or an unusable FEN tag.
    pub truncated: bool,
}

impl ParsedGame {
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Tags collected during header parsing.
#[derive(Default)]
struct GameTags {
    fen: Option<String>,
}

/// State during movetext parsing.
struct GameState {
    board: Chess,
    moves: Vec<String>,
    truncated: bool,
}

/// Visitor that turns each game into its list of SAN labels.
struct LineCollector;

impl LineCollector {
    fn start_position(tags: &GameTags) -> Option<Chess> {
        match &tags.fen {
            None => Some(Chess::default()),
            Some(fen) => fen
                .parse::<Fen>()
                .ok()?
                .into_position::<Chess>(CastlingMode::Standard)
                .ok(),
        }
    }
}

impl Visitor for LineCollector {
    type Tags = GameTags;
    type Movetext = GameState;
    type Output = ParsedGame;

    fn begin_tags(&mut self) -> ControlFlow<ParsedGame, GameTags> {
        ControlFlow::Continue(GameTags::default())
    }

    fn tag(&mut self, tags: &mut GameTags, name: &[u8], value: RawTag<'_>) -> ControlFlow<ParsedGame> {
        if name == b"FEN" {
            tags.fen = Some(value.decode_utf8_lossy().into_owned());
        }
        ControlFlow::Continue(())
    }

    fn begin_movetext(&mut self, tags: GameTags) -> ControlFlow<ParsedGame, GameState> {
        let (board, truncated) = match Self::start_position(&tags) {
            Some(board) => (board, false),
            None => (Chess::default(), true),
        };

        ControlFlow::Continue(GameState {
            board,
            moves: Vec::new(),
            truncated,
        })
    }

    fn begin_variation(&mut self, _state: &mut GameState) -> ControlFlow<ParsedGame, Skip> {
        // Stay in the mainline
        ControlFlow::Continue(Skip(true))
    }

    fn san(&mut self, state: &mut GameState, san_plus: SanPlus) -> ControlFlow<ParsedGame> {
        if state.truncated {
            return ControlFlow::Continue(());
        }

        if let San::Null = san_plus.san {
            // Not allowed while the side to move is in check
            match std::mem::take(&mut state.board).swap_turn() {
                Ok(board) => {
                    state.board = board;
                    state.moves.push(san_plus.san.to_string());
                }
                Err(_) => state.truncated = true,
            }
            return ControlFlow::Continue(());
        }

        match san_plus.san.to_move(&state.board) {
            Ok(mv) => {
                let label = SanPlus::from_move_and_play_unchecked(&mut state.board, mv);
                state.moves.push(label.to_string());
            }
            Err(_) => state.truncated = true,
        }

        ControlFlow::Continue(())
    }

    fn end_game(&mut self, state: GameState) -> ParsedGame {
        ParsedGame {
            moves: state.moves,
            truncated: state.truncated,
        }
    }
}

/// Iterator over the games of a PGN stream.
///
/// Yields one [`ParsedGame`] per game and stops at end of input. Errors from
/// the underlying reader are passed through.
pub struct GameReader<R: Read> {
    reader: Reader<R>,
    collector: LineCollector,
}

impl<R: Read> GameReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            reader: Reader::new(inner),
            collector: LineCollector,
        }
    }
}

impl<R: Read> Iterator for GameReader<R> {
    type Item = io::Result<ParsedGame>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read_game(&mut self.collector).transpose()
    }
}

//! Plain-text puzzle files.
//!
//! A puzzle file lists the board and the batch of pieces in sections:
//!
//! ```text
//! ; anything after a semicolon is a comment
//! [board]
//! ##......
//! ........
//! ...
//! [piece]
//! ###
//! .#.
//! [piece square]     ; a stock shape by name, no rows
//! [tray]             ; every connected shape becomes a piece
//! #..##
//! #....
//! ```
//!
//! Pieces keep file order; shapes inside a `[tray]` are taken in row-major
//! order of their first cell.

use std::str::FromStr;

use crate::error::{Error, Result};
use crate::grid::{parse_row, Board};
use crate::pieces::{extract_shapes, stock, Piece};
use crate::solver::{SearchConfig, SearchResult, Solver};

/// A board and the batch of pieces to place on it.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Puzzle {
    pub board: Board,
    pub pieces: Vec<Piece>,
}

enum Kind {
    Board,
    Piece,
    Stock(Piece),
    Tray,
}

impl Kind {
    fn name(&self) -> &'static str {
        match self {
            Kind::Board => "board",
            Kind::Piece | Kind::Stock(_) => "piece",
            Kind::Tray => "tray",
        }
    }
}

struct Section {
    kind: Kind,
    line: usize,
    rows: Vec<Vec<bool>>,
}

impl Section {
    fn open(header: &str, line: usize) -> Result<Self> {
        let parse_error = |message: String| Error::Parse { line, message };

        let mut words = header.split_whitespace();
        let kind = match (words.next(), words.next(), words.next()) {
            (Some("board"), None, _) => Kind::Board,
            (Some("tray"), None, _) => Kind::Tray,
            (Some("piece"), None, _) => Kind::Piece,
            (Some("piece"), Some(name), None) => stock(name)
                .map(Kind::Stock)
                .ok_or_else(|| parse_error(format!("unknown stock piece {name:?}")))?,
            _ => return Err(parse_error(format!("unknown section [{header}]"))),
        };

        Ok(Self {
            kind,
            line,
            rows: Vec::new(),
        })
    }
}

impl Puzzle {
    /// Parses a puzzle file.
    pub fn parse(text: &str) -> Result<Self> {
        let mut sections: Vec<Section> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line = index + 1;
            let content = raw.split_once(';').map_or(raw, |(before, _)| before).trim();
            if content.is_empty() {
                continue;
            }

            if let Some(header) = content.strip_prefix('[') {
                let header = header.strip_suffix(']').ok_or_else(|| Error::Parse {
                    line,
                    message: "unterminated section header".to_string(),
                })?;
                sections.push(Section::open(header.trim(), line)?);
                continue;
            }

            let section = match sections.last_mut() {
                Some(section) if matches!(section.kind, Kind::Stock(_)) => {
                    return Err(Error::Parse {
                        line,
                        message: "stock piece sections take no rows".to_string(),
                    })
                }
                Some(section) => section,
                None => {
                    return Err(Error::Parse {
                        line,
                        message: "cell row outside of a section".to_string(),
                    })
                }
            };

            let row = parse_row(content).map_err(|ch| Error::Parse {
                line,
                message: format!("unexpected cell character {ch:?}"),
            })?;
            section.rows.push(row);
        }

        Self::assemble(sections, text.lines().count())
    }

    fn assemble(sections: Vec<Section>, last_line: usize) -> Result<Self> {
        let mut board: Option<Board> = None;
        let mut pieces = Vec::new();

        for section in sections {
            let (name, line) = (section.kind.name(), section.line);
            let invalid = move |source: Error| Error::InvalidSection {
                section: name,
                line,
                source: Box::new(source),
            };

            match section.kind {
                Kind::Board if board.is_some() => {
                    return Err(Error::Parse {
                        line,
                        message: "duplicate [board] section".to_string(),
                    })
                }
                Kind::Board => board = Some(Board::from_matrix(&section.rows).map_err(invalid)?),
                Kind::Piece => pieces.push(Piece::from_matrix(&section.rows).map_err(invalid)?),
                Kind::Stock(piece) => pieces.push(piece),
                Kind::Tray => pieces.extend(extract_shapes(&section.rows).map_err(invalid)?),
            }
        }

        let board = board.ok_or_else(|| Error::Parse {
            line: last_line.max(1),
            message: "missing [board] section".to_string(),
        })?;

        Ok(Self { board, pieces })
    }

    /// Searches for the best placement order of this puzzle's pieces.
    pub fn solve(&self, config: SearchConfig) -> SearchResult {
        Solver::new(config).solve(&self.board, &self.pieces)
    }
}

impl FromStr for Puzzle {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        Self::parse(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENING: &str = include_str!("../puzzles/opening.txt");

    #[test]
    fn test_parse_bundled_puzzle() {
        let puzzle = Puzzle::parse(OPENING).unwrap();
        assert_eq!(puzzle.board.size(), Board::DEFAULT_SIZE);
        assert_eq!(puzzle.pieces.len(), 3);
    }

    #[test]
    fn test_parse_sections_in_order() {
        let text = "\
; three pieces, one from each kind of section
[board]
#..
...
..#

[piece]
.#.
##.   ; trailing comment

[piece line3]
[tray]
#.#
";
        let puzzle: Puzzle = text.parse().unwrap();

        assert_eq!(puzzle.board.to_string(), "#..\n...\n..#\n");
        let shapes: Vec<String> = puzzle.pieces.iter().map(|piece| piece.to_string()).collect();
        assert_eq!(shapes, vec![".#\n##\n", "###\n", "#\n", "#\n"]);
    }

    #[test]
    fn test_solve_uses_config() {
        let puzzle: Puzzle = "[board]\n##.\n...\n...\n[piece dot]".parse().unwrap();
        let result = puzzle.solve(SearchConfig::default());
        assert_eq!(result.score, 1);
    }

    #[test]
    fn test_missing_board() {
        let result = Puzzle::parse("[piece]\n#\n");
        assert_eq!(
            result,
            Err(Error::Parse {
                line: 2,
                message: "missing [board] section".to_string()
            })
        );
    }

    #[test]
    fn test_duplicate_board() {
        let result = Puzzle::parse("[board]\n#\n[board]\n.\n");
        assert!(matches!(result, Err(Error::Parse { line: 3, .. })));
    }

    #[test]
    fn test_unknown_section_and_stock_name() {
        assert!(matches!(
            Puzzle::parse("[boards]\n#"),
            Err(Error::Parse { line: 1, .. })
        ));

        let result = Puzzle::parse("[board]\n.\n[piece hexomino]");
        assert_eq!(
            result,
            Err(Error::Parse {
                line: 3,
                message: "unknown stock piece \"hexomino\"".to_string()
            })
        );
    }

    #[test]
    fn test_rows_must_belong_to_a_section() {
        let result = Puzzle::parse("#..\n[board]\n.");
        assert!(matches!(result, Err(Error::Parse { line: 1, .. })));

        let result = Puzzle::parse("[board]\n.\n[piece dot]\n#");
        assert!(matches!(result, Err(Error::Parse { line: 4, .. })));
    }

    #[test]
    fn test_bad_cell_character() {
        let result = Puzzle::parse("[board]\n.o\n..");
        assert_eq!(
            result,
            Err(Error::Parse {
                line: 2,
                message: "unexpected cell character 'o'".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_section_wraps_shape_error() {
        let result = Puzzle::parse("[board]\n..\n..\n[piece]\n##\n#\n");
        match result {
            Err(Error::InvalidSection {
                section,
                line,
                source,
            }) => {
                assert_eq!(section, "piece");
                assert_eq!(line, 4);
                assert!(matches!(*source, Error::JaggedPiece { row: 1, .. }));
            }
            other => panic!("expected an invalid section, got {other:?}"),
        }

        let result = Puzzle::parse("[board]\n..\n.\n");
        assert!(matches!(
            result,
            Err(Error::InvalidSection {
                section: "board",
                ..
            })
        ));
    }

    #[test]
    fn test_unterminated_header() {
        let result = Puzzle::parse("[board\n.");
        assert!(matches!(result, Err(Error::Parse { line: 1, .. })));
    }
}

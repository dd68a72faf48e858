//! Tokenizer and command grouping for path data.
//!
//! Parsing runs in two passes: a `winnow` tokenizer splits the source into
//! command letters and numbers (with byte offsets), then [`parse`] groups the
//! numbers into typed commands, expanding implicit repetition.
//!
//! Only absolute (upper-case) commands are supported. Relative letters are
//! rejected rather than read as absolute, and numbers must be finite.

use log::trace;
use winnow::{
    Parser as _,
    ascii::float,
    combinator::alt,
    error::{ContextError, ModalResult},
    stream::{LocatingSlice, Location},
    token::{one_of, take_while},
};

use oddity_core::geometry::Point;

use crate::{
    command::{ArcSegment, PathCommand, PathData},
    error::PathError,
};

type Input<'a> = LocatingSlice<&'a str>;
type PResult<O> = ModalResult<O, ContextError>;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Command(char),
    Number(f64),
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PositionedToken {
    token: Token,
    offset: usize,
}

/// Whitespace and commas are interchangeable separators.
fn separators(input: &mut Input<'_>) -> PResult<()> {
    take_while(0.., |c: char| c.is_whitespace() || c == ',')
        .void()
        .parse_next(input)
}

fn command_letter(input: &mut Input<'_>) -> PResult<Token> {
    one_of(|c: char| c.is_ascii_alphabetic())
        .map(Token::Command)
        .parse_next(input)
}

fn number(input: &mut Input<'_>) -> PResult<Token> {
    float.map(Token::Number).parse_next(input)
}

fn token(input: &mut Input<'_>) -> PResult<Token> {
    alt((number, command_letter)).parse_next(input)
}

fn tokenize(source: &str) -> Result<Vec<PositionedToken>, PathError> {
    let mut input = LocatingSlice::new(source);
    let mut tokens = Vec::new();

    loop {
        // A zero-or-more separator run cannot fail
        let _ = separators(&mut input);
        if input.is_empty() {
            break;
        }
        let offset = input.current_token_start();
        match token(&mut input) {
            Ok(Token::Number(value)) if !value.is_finite() => {
                return Err(PathError::NonFiniteNumber { offset });
            }
            Ok(token) => tokens.push(PositionedToken { token, offset }),
            Err(_) => {
                let found = source[offset..].chars().next().unwrap_or('\0');
                return Err(PathError::UnexpectedCharacter { found, offset });
            }
        }
    }

    Ok(tokens)
}

/// Number of numeric arguments per command letter, `None` for unsupported letters
fn arity(letter: char) -> Option<usize> {
    match letter {
        'M' | 'L' => Some(2),
        'H' | 'V' => Some(1),
        'C' => Some(6),
        'Q' => Some(4),
        'A' => Some(7),
        'Z' => Some(0),
        _ => None,
    }
}

fn flag(value: f64, offset: usize) -> Result<bool, PathError> {
    if value == 0.0 {
        Ok(false)
    } else if value == 1.0 {
        Ok(true)
    } else {
        Err(PathError::InvalidFlag { value, offset })
    }
}

fn build_command(
    letter: char,
    args: &[f64],
    arg_offsets: &[usize],
) -> Result<PathCommand, PathError> {
    let point = |i: usize| Point::new(args[i], args[i + 1]);
    let command = match letter {
        'M' => PathCommand::MoveTo(point(0)),
        'L' => PathCommand::LineTo(point(0)),
        'H' => PathCommand::HorizontalTo(args[0]),
        'V' => PathCommand::VerticalTo(args[0]),
        'C' => PathCommand::CubicTo {
            control1: point(0),
            control2: point(2),
            end: point(4),
        },
        'Q' => PathCommand::QuadTo {
            control: point(0),
            end: point(2),
        },
        'A' => PathCommand::ArcTo(ArcSegment {
            rx: args[0],
            ry: args[1],
            x_axis_rotation: args[2],
            large_arc: flag(args[3], arg_offsets[3])?,
            sweep: flag(args[4], arg_offsets[4])?,
            end: point(5),
        }),
        _ => PathCommand::Close,
    };
    Ok(command)
}

/// Parses path data into absolute commands.
///
/// # Errors
///
/// Returns a [`PathError`] for empty input, characters that are neither
/// separators, numbers nor command letters, unsupported or relative
/// commands, `nan`/`inf` numbers, numbers before the first command,
/// truncated argument lists and arc flags other than `0`/`1`.
///
/// # Examples
///
/// ```
/// use oddity_path::{PathCommand, parse};
///
/// // Extra pairs after a move-to are line-tos
/// let path = parse("M 0,0 10,0 10,10 Z").unwrap();
/// assert_eq!(path.commands().len(), 4);
/// assert!(matches!(path.commands()[1], PathCommand::LineTo(_)));
/// ```
pub fn parse(source: &str) -> Result<PathData, PathError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(PathError::Empty);
    }

    let mut commands = Vec::new();
    let mut current: Option<char> = None;
    let mut i = 0;

    while i < tokens.len() {
        let PositionedToken { token, offset } = tokens[i];
        let letter = match token {
            Token::Command(c) => {
                i += 1;
                if arity(c).is_none() {
                    return Err(PathError::UnknownCommand { command: c, offset });
                }
                c
            }
            // Implicit repetition of the previous command
            Token::Number(_) => match current {
                Some('M') => 'L',
                Some('Z') | None => return Err(PathError::MissingCommand { offset }),
                Some(c) => c,
            },
        };
        current = Some(letter);

        let expected = arity(letter).unwrap_or(0);
        let mut args = Vec::with_capacity(expected);
        let mut arg_offsets = Vec::with_capacity(expected);
        while args.len() < expected {
            match tokens.get(i) {
                Some(PositionedToken {
                    token: Token::Number(value),
                    offset,
                }) => {
                    args.push(*value);
                    arg_offsets.push(*offset);
                    i += 1;
                }
                _ => {
                    return Err(PathError::MissingArguments {
                        command: letter,
                        expected,
                        offset,
                    });
                }
            }
        }

        commands.push(build_command(letter, &args, &arg_offsets)?);
    }

    trace!(commands = commands.len(); "Parsed path data");
    Ok(PathData::new(commands))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_circle_outline() {
        let path = parse("M 50 15 A 35 35 0 0 1 50 85 A 35 35 0 0 1 50 15 Z").unwrap();
        assert_eq!(path.commands().len(), 4);
        match path.commands()[1] {
            PathCommand::ArcTo(arc) => {
                assert_eq!(arc.rx, 35.0);
                assert!(!arc.large_arc);
                assert!(arc.sweep);
                assert_eq!(arc.end, Point::new(50.0, 85.0));
            }
            other => panic!("expected arc, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_commas_are_whitespace() {
        let spaced = parse("M 1 2 L 3 4").unwrap();
        let commas = parse("M1,2,L3,4").unwrap();
        assert_eq!(spaced, commas);
    }

    #[test]
    fn test_parse_compact_numbers() {
        let path = parse("M10-5L.5.5").unwrap();
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::new(10.0, -5.0)),
                PathCommand::LineTo(Point::new(0.5, 0.5)),
            ]
        );
    }

    #[test]
    fn test_parse_implicit_repetition() {
        let path = parse("M 0 0 H 10 20 C 1 1 2 2 3 3 4 4 5 5 6 6").unwrap();
        let letters: String = path.commands().iter().map(|c| c.letter()).collect();
        assert_eq!(letters, "MHHCC");
    }

    #[test]
    fn test_parse_rejects_relative_commands() {
        assert_eq!(
            parse("M 10 10 l 5 0"),
            Err(PathError::UnknownCommand {
                command: 'l',
                offset: 8
            })
        );
        assert!(matches!(
            parse("m 1 2"),
            Err(PathError::UnknownCommand { command: 'm', .. })
        ));
    }

    #[test]
    fn test_parse_rejects_non_finite_numbers() {
        assert_eq!(
            parse("M nan 0 L 1 1"),
            Err(PathError::NonFiniteNumber { offset: 2 })
        );
        assert_eq!(
            parse("M 0 0 L inf 1"),
            Err(PathError::NonFiniteNumber { offset: 8 })
        );
        assert!(matches!(
            parse("M 0 0 L 1 -infinity"),
            Err(PathError::NonFiniteNumber { .. })
        ));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(parse("  , "), Err(PathError::Empty));
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            parse("M 0 0 T 5 5"),
            Err(PathError::UnknownCommand {
                command: 'T',
                offset: 6
            })
        );
    }

    #[test]
    fn test_parse_unexpected_character() {
        assert_eq!(
            parse("M 0 0 L 5 # 5"),
            Err(PathError::UnexpectedCharacter {
                found: '#',
                offset: 10
            })
        );
    }

    #[test]
    fn test_parse_number_before_command() {
        assert_eq!(
            parse("10 20 L 5 5"),
            Err(PathError::MissingCommand { offset: 0 })
        );
    }

    #[test]
    fn test_parse_number_after_close() {
        assert!(matches!(
            parse("M 0 0 L 1 1 Z 4 4"),
            Err(PathError::MissingCommand { offset: 14 })
        ));
    }

    #[test]
    fn test_parse_truncated_arguments() {
        assert!(matches!(
            parse("M 0 0 C 1 1 2 2"),
            Err(PathError::MissingArguments {
                command: 'C',
                expected: 6,
                ..
            })
        ));
    }

    #[test]
    fn test_parse_invalid_arc_flag() {
        assert!(matches!(
            parse("M 0 0 A 5 5 0 2 1 10 0"),
            Err(PathError::InvalidFlag { value, .. }) if value == 2.0
        ));
    }
}

#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn coordinate_strategy() -> impl Strategy<Value = f64> {
        // Two-decimal values survive serialization exactly
        (-10000i32..10000).prop_map(|v| f64::from(v) / 100.0)
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (coordinate_strategy(), coordinate_strategy()).prop_map(|(x, y)| Point::new(x, y))
    }

    fn command_strategy() -> impl Strategy<Value = PathCommand> {
        prop_oneof![
            point_strategy().prop_map(PathCommand::LineTo),
            coordinate_strategy().prop_map(PathCommand::HorizontalTo),
            coordinate_strategy().prop_map(PathCommand::VerticalTo),
            (point_strategy(), point_strategy()).prop_map(|(control, end)| PathCommand::QuadTo {
                control,
                end
            }),
            (point_strategy(), point_strategy(), point_strategy()).prop_map(
                |(control1, control2, end)| PathCommand::CubicTo {
                    control1,
                    control2,
                    end
                }
            ),
            (
                1u32..100,
                1u32..100,
                any::<bool>(),
                any::<bool>(),
                point_strategy()
            )
                .prop_map(|(rx, ry, large_arc, sweep, end)| {
                    PathCommand::ArcTo(ArcSegment {
                        rx: f64::from(rx),
                        ry: f64::from(ry),
                        x_axis_rotation: 0.0,
                        large_arc,
                        sweep,
                        end,
                    })
                }),
        ]
    }

    fn path_strategy() -> impl Strategy<Value = PathData> {
        (
            point_strategy(),
            prop::collection::vec(command_strategy(), 0..12),
            any::<bool>(),
        )
            .prop_map(|(start, body, close)| {
                let mut commands = vec![PathCommand::MoveTo(start)];
                commands.extend(body);
                if close {
                    commands.push(PathCommand::Close);
                }
                PathData::new(commands)
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Serialized paths parse back to the same commands.
    fn check_display_then_parse(path: PathData) -> Result<(), TestCaseError> {
        let reparsed = parse(&path.to_string());
        prop_assert_eq!(reparsed, Ok(path));
        Ok(())
    }

    /// The tokenizer never panics on arbitrary input.
    fn check_parse_never_panics(source: &str) -> Result<(), TestCaseError> {
        let _ = parse(source);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn display_then_parse(path in path_strategy()) {
            check_display_then_parse(path)?;
        }

        #[test]
        fn parse_never_panics(source in "[MLHVCQAZmlnaif0-9 ,.eE+-]{0,40}") {
            check_parse_never_panics(&source)?;
        }
    }
}

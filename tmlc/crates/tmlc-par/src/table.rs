//! The grammar, expressed as data.
//!
//! One row per parse mode; each row lists the token kinds it accepts, the
//! action to run, and the mode to move to. The engine matches the current
//! mode's row first-win and fails with a syntax error when nothing matches.
//! A `next` of `None` means the action itself picks the following mode
//! (only `Pop` does, restoring the mode saved on the frame it removes).

use static_assertions::const_assert_eq;
use tmlc_lex::TokenKind;

/// Parse modes of the pushdown automaton. `Done` is terminal and only
/// reachable via EOF.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub(crate) enum Mode {
    StartLine = 0,
    TableOrAtable,
    TableId,
    TableDotOrEnd,
    AtableId,
    AtableDotOrEnd,
    AtableClose,
    Newline,
    ValueEquals,
    Value,
    IarrayValOrEnd,
    IarrayComOrEnd,
    IarrayVal,
    ItableIdOrEnd,
    ItableId,
    ItableColon,
    ItableVal,
    ItableComOrEnd,
    Done,
}

// Every non-terminal mode owns a row below.
const_assert_eq!(Mode::Done as usize, 18);

/// Grammar actions; semantics live in the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    /// No structural effect.
    None,
    /// Select-or-create a child for `key = ...` and inline-table keys;
    /// pushes a frame.
    Name,
    /// Select-or-create a path segment of a `[...]` header in place.
    Subfield,
    /// Declare the table addressed by a `[...]` header.
    EndTable,
    /// Declare-or-extend the list addressed by a `[[...]]` header.
    SubTable,
    /// Collapse the stack back to the root frame.
    ResetToRoot,
    /// Store a scalar into the top frame and pop it.
    Save,
    /// Append a scalar element to the list at the top frame.
    Append,
    /// Enter an inline array.
    PushList,
    /// Enter an inline table.
    PushTable,
    /// Leave an inline array or table; restores the saved mode.
    Pop,
}

/// One accepted (token, action, next-mode) entry.
pub(crate) struct Transition {
    pub token: TokenKind,
    pub action: Action,
    pub next: Option<Mode>,
}

/// A mode's row: the transitions tried in order.
pub(crate) struct Row {
    pub mode: Mode,
    pub transitions: &'static [Transition],
}

const fn t(token: TokenKind, action: Action, next: Mode) -> Transition {
    Transition {
        token,
        action,
        next: Some(next),
    }
}

/// A transition whose action decides the next mode.
const fn t_dyn(token: TokenKind, action: Action) -> Transition {
    Transition {
        token,
        action,
        next: None,
    }
}

pub(crate) static GRAMMAR: [Row; Mode::Done as usize] = [
    Row {
        mode: Mode::StartLine,
        transitions: &[
            t(TokenKind::BracketOpen, Action::ResetToRoot, Mode::TableOrAtable),
            t(TokenKind::Identifier, Action::Name, Mode::ValueEquals),
            t(TokenKind::String, Action::Name, Mode::ValueEquals),
            t(TokenKind::Newline, Action::None, Mode::StartLine),
            t(TokenKind::Eof, Action::None, Mode::Done),
        ],
    },
    Row {
        mode: Mode::TableOrAtable,
        transitions: &[
            t(TokenKind::BracketOpen, Action::None, Mode::AtableId),
            t(TokenKind::Identifier, Action::Subfield, Mode::TableDotOrEnd),
            t(TokenKind::String, Action::Subfield, Mode::TableDotOrEnd),
        ],
    },
    Row {
        mode: Mode::TableId,
        transitions: &[
            t(TokenKind::Identifier, Action::Subfield, Mode::TableDotOrEnd),
            t(TokenKind::String, Action::Subfield, Mode::TableDotOrEnd),
        ],
    },
    Row {
        mode: Mode::TableDotOrEnd,
        transitions: &[
            t(TokenKind::Dot, Action::None, Mode::TableId),
            t(TokenKind::BracketClose, Action::EndTable, Mode::Newline),
        ],
    },
    Row {
        mode: Mode::AtableId,
        transitions: &[
            t(TokenKind::Identifier, Action::Subfield, Mode::AtableDotOrEnd),
            t(TokenKind::String, Action::Subfield, Mode::AtableDotOrEnd),
        ],
    },
    Row {
        mode: Mode::AtableDotOrEnd,
        transitions: &[
            t(TokenKind::Dot, Action::None, Mode::AtableId),
            t(TokenKind::BracketClose, Action::None, Mode::AtableClose),
        ],
    },
    Row {
        mode: Mode::AtableClose,
        transitions: &[t(TokenKind::BracketClose, Action::SubTable, Mode::Newline)],
    },
    Row {
        mode: Mode::Newline,
        transitions: &[
            t(TokenKind::Newline, Action::None, Mode::StartLine),
            t(TokenKind::Eof, Action::None, Mode::Done),
        ],
    },
    Row {
        mode: Mode::ValueEquals,
        transitions: &[t(TokenKind::Equals, Action::None, Mode::Value)],
    },
    Row {
        mode: Mode::Value,
        transitions: &[
            t(TokenKind::Identifier, Action::Save, Mode::Newline),
            t(TokenKind::String, Action::Save, Mode::Newline),
            t(TokenKind::Int, Action::Save, Mode::Newline),
            t(TokenKind::Double, Action::Save, Mode::Newline),
            t(TokenKind::Date, Action::Save, Mode::Newline),
            t(TokenKind::BracketOpen, Action::PushList, Mode::IarrayValOrEnd),
            t(TokenKind::BraceOpen, Action::PushTable, Mode::ItableIdOrEnd),
        ],
    },
    Row {
        mode: Mode::IarrayValOrEnd,
        transitions: &[
            t(TokenKind::Identifier, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::String, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::Int, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::Double, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::Date, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::BracketOpen, Action::PushList, Mode::IarrayValOrEnd),
            t(TokenKind::BraceOpen, Action::PushTable, Mode::ItableIdOrEnd),
            t_dyn(TokenKind::BracketClose, Action::Pop),
            t(TokenKind::Newline, Action::None, Mode::IarrayValOrEnd),
        ],
    },
    Row {
        mode: Mode::IarrayComOrEnd,
        transitions: &[
            t(TokenKind::Comma, Action::None, Mode::IarrayVal),
            t_dyn(TokenKind::BracketClose, Action::Pop),
            t(TokenKind::Newline, Action::None, Mode::IarrayComOrEnd),
        ],
    },
    Row {
        mode: Mode::IarrayVal,
        transitions: &[
            t(TokenKind::Identifier, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::String, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::Int, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::Double, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::Date, Action::Append, Mode::IarrayComOrEnd),
            t(TokenKind::BracketOpen, Action::PushList, Mode::IarrayValOrEnd),
            t(TokenKind::BraceOpen, Action::PushTable, Mode::ItableIdOrEnd),
            t_dyn(TokenKind::BracketClose, Action::Pop),
            t(TokenKind::Newline, Action::None, Mode::IarrayVal),
        ],
    },
    Row {
        mode: Mode::ItableIdOrEnd,
        transitions: &[
            t(TokenKind::String, Action::Name, Mode::ItableColon),
            t_dyn(TokenKind::BraceClose, Action::Pop),
            t(TokenKind::Newline, Action::None, Mode::ItableIdOrEnd),
        ],
    },
    Row {
        mode: Mode::ItableId,
        transitions: &[
            t(TokenKind::String, Action::Name, Mode::ItableColon),
            t_dyn(TokenKind::BraceClose, Action::Pop),
            t(TokenKind::Newline, Action::None, Mode::ItableId),
        ],
    },
    Row {
        mode: Mode::ItableColon,
        transitions: &[
            t(TokenKind::Colon, Action::None, Mode::ItableVal),
            t(TokenKind::Newline, Action::None, Mode::ItableColon),
        ],
    },
    Row {
        mode: Mode::ItableVal,
        transitions: &[
            t(TokenKind::Identifier, Action::Save, Mode::ItableComOrEnd),
            t(TokenKind::String, Action::Save, Mode::ItableComOrEnd),
            t(TokenKind::Int, Action::Save, Mode::ItableComOrEnd),
            t(TokenKind::Double, Action::Save, Mode::ItableComOrEnd),
            t(TokenKind::Date, Action::Save, Mode::ItableComOrEnd),
            t(TokenKind::BracketOpen, Action::PushList, Mode::IarrayValOrEnd),
            t(TokenKind::BraceOpen, Action::PushTable, Mode::ItableIdOrEnd),
            t(TokenKind::Newline, Action::None, Mode::ItableVal),
        ],
    },
    Row {
        mode: Mode::ItableComOrEnd,
        transitions: &[
            t(TokenKind::Comma, Action::None, Mode::ItableId),
            t_dyn(TokenKind::BraceClose, Action::Pop),
            t(TokenKind::Newline, Action::None, Mode::ItableComOrEnd),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_align_with_mode_discriminants() {
        for (i, row) in GRAMMAR.iter().enumerate() {
            assert_eq!(row.mode as usize, i, "row {i} holds {:?}", row.mode);
        }
    }

    #[test]
    fn test_only_pop_defers_next_mode() {
        for row in GRAMMAR.iter() {
            for tr in row.transitions {
                assert_eq!(
                    tr.next.is_none(),
                    tr.action == Action::Pop,
                    "{:?}/{:?}",
                    row.mode,
                    tr.token
                );
            }
        }
    }

    #[test]
    fn test_done_is_only_reachable_via_eof() {
        for row in GRAMMAR.iter() {
            for tr in row.transitions {
                if tr.next == Some(Mode::Done) {
                    assert_eq!(tr.token, TokenKind::Eof);
                }
            }
        }
    }

    #[test]
    fn test_no_row_accepts_comments() {
        // The driver skips comments before matching; rows never list them.
        for row in GRAMMAR.iter() {
            for tr in row.transitions {
                assert_ne!(tr.token, TokenKind::Comment);
            }
        }
    }
}

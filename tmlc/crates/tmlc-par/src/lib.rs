//! tmlc-par - Pushdown grammar engine and document tree for TOML 0.4.
//!
//! The engine is table-driven: a static map from (parse mode, token kind) to
//! (action, next mode) encodes the grammar, and a frame stack tracks the
//! node under construction plus the mode to restore when an inline array or
//! table closes. Cross-cutting TOML rules that the token grammar cannot
//! express - single assignment, table redeclaration, list homogeneity -
//! live in the actions.
//!
//! Nodes are built in a flat arena while the parse runs; the frame stack
//! holds arena indices, so headers can revisit tables created earlier
//! without aliasing. When the automaton reaches its terminal mode the arena
//! folds into the owned [`Doc`] tree, sorting each table's children by name.
//!
//! ```
//! let doc = tmlc_par::parse(b"[server]\nport = 8080\n").unwrap();
//! assert_eq!(doc.get_path("server.port").unwrap().as_int(), 8080);
//! ```

mod doc;
mod edge_cases;
mod table;

pub use doc::{Doc, Iter, NodeKind};
pub use tmlc_util::{Date, ErrorKind, Result, Span, TomlError};

use std::mem;

use tmlc_lex::{Lexer, Token, TokenKind};

use doc::NodeValue;
use table::{Action, Mode, GRAMMAR};

/// Parses a complete TOML 0.4 document.
///
/// The whole input is consumed in one call; on success the returned root is
/// a table owning the entire tree. Any failure - decoding, lexing, or a
/// grammar action - aborts the parse and reports a single positioned error.
pub fn parse(input: &[u8]) -> Result<Doc> {
    let lexer = Lexer::new(input)?;
    Parser::new(lexer).run()
}

/// Index of a node in the construction arena.
type NodeId = usize;

const ROOT: NodeId = 0;

/// Whether a container was materialized by an explicit header or inline
/// literal, or autovivified by a dotted path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Origin {
    Implicit,
    Explicit,
}

/// A node while the parse is still running. Children are arena indices.
struct RawNode {
    name: String,
    value: RawValue,
}

enum RawValue {
    /// Created but not yet given a type; never survives a successful parse.
    Untyped,
    Table {
        children: Vec<NodeId>,
        origin: Origin,
    },
    List {
        items: Vec<NodeId>,
        origin: Origin,
    },
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Date(Date),
}

impl RawNode {
    fn unnamed(value: RawValue) -> Self {
        Self {
            name: String::new(),
            value,
        }
    }
}

impl Default for RawNode {
    fn default() -> Self {
        Self::unnamed(RawValue::Untyped)
    }
}

/// One entry of the engine's stack: the node being built and the mode to
/// restore when the frame pops.
struct Frame {
    node: NodeId,
    saved_mode: Mode,
}

/// Action outcomes carry an optional mode override; errors are unpositioned
/// here and stamped with the current token by the driver.
type ActResult = std::result::Result<Option<Mode>, ErrorKind>;

struct Parser<'a> {
    lexer: Lexer<'a>,
    arena: Vec<RawNode>,
    stack: Vec<Frame>,
    mode: Mode,
}

impl<'a> Parser<'a> {
    fn new(lexer: Lexer<'a>) -> Self {
        let root = RawNode::unnamed(RawValue::Table {
            children: Vec::new(),
            origin: Origin::Implicit,
        });

        // The root frame is pushed twice: an anchor that reset-to-root
        // preserves, plus the working copy actions replace.
        let stack = vec![
            Frame {
                node: ROOT,
                saved_mode: Mode::StartLine,
            },
            Frame {
                node: ROOT,
                saved_mode: Mode::StartLine,
            },
        ];

        Self {
            lexer,
            arena: vec![root],
            stack,
            mode: Mode::StartLine,
        }
    }

    /// The driver loop: fetch, match, act, until the terminal mode.
    fn run(mut self) -> Result<Doc> {
        loop {
            let tok = self.lexer.next_token()?;
            if tok.kind == TokenKind::Comment {
                continue;
            }

            let row = &GRAMMAR[self.mode as usize];
            let Some(tr) = row.transitions.iter().find(|t| t.token == tok.kind) else {
                return Err(TomlError::at(ErrorKind::Parse, tok.span));
            };

            let next = self
                .apply(tr.action, &tok)
                .map_err(|kind| TomlError::at(kind, tok.span))?;

            self.mode = match next.or(tr.next) {
                Some(mode) => mode,
                None => return Err(TomlError::at(ErrorKind::Internal, tok.span)),
            };

            if self.mode == Mode::Done {
                return self.fold();
            }
        }
    }

    fn apply(&mut self, action: Action, tok: &Token) -> ActResult {
        match action {
            Action::None => Ok(None),
            Action::Name => self.act_name(tok),
            Action::Subfield => self.act_subfield(tok),
            Action::EndTable => self.act_endtable(),
            Action::SubTable => self.act_subtable(),
            Action::ResetToRoot => self.act_reset(),
            Action::Save => self.act_save(tok),
            Action::Append => self.act_append(tok),
            // Inline lists stay Implicit: a later [[x]] header must be able
            // to tell them apart from lists it declared itself.
            Action::PushList => self.act_push(RawValue::List {
                items: Vec::new(),
                origin: Origin::Implicit,
            }),
            Action::PushTable => self.act_push(RawValue::Table {
                children: Vec::new(),
                origin: Origin::Explicit,
            }),
            Action::Pop => self.act_pop(),
        }
    }

    // ---- stack and arena helpers ----

    fn top(&self) -> std::result::Result<NodeId, ErrorKind> {
        self.stack
            .last()
            .map(|f| f.node)
            .ok_or(ErrorKind::Internal)
    }

    fn set_top(&mut self, node: NodeId) -> std::result::Result<(), ErrorKind> {
        match self.stack.last_mut() {
            Some(frame) => {
                frame.node = node;
                Ok(())
            }
            None => Err(ErrorKind::Internal),
        }
    }

    fn alloc(&mut self, node: RawNode) -> NodeId {
        self.arena.push(node);
        self.arena.len() - 1
    }

    /// Promotes an untyped node to an implicit table; an existing table
    /// passes through, anything else reports `conflict`.
    fn ensure_table(&mut self, id: NodeId, conflict: ErrorKind) -> std::result::Result<(), ErrorKind> {
        match &mut self.arena[id].value {
            v @ RawValue::Untyped => {
                *v = RawValue::Table {
                    children: Vec::new(),
                    origin: Origin::Implicit,
                };
                Ok(())
            }
            RawValue::Table { .. } => Ok(()),
            _ => Err(conflict),
        }
    }

    fn find_child(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        match &self.arena[parent].value {
            RawValue::Table { children, .. } => children
                .iter()
                .copied()
                .find(|&c| self.arena[c].name == name),
            _ => None,
        }
    }

    fn find_or_add_child(
        &mut self,
        parent: NodeId,
        name: &str,
    ) -> std::result::Result<NodeId, ErrorKind> {
        if let Some(existing) = self.find_child(parent, name) {
            return Ok(existing);
        }

        let id = self.alloc(RawNode {
            name: name.to_string(),
            value: RawValue::Untyped,
        });
        match &mut self.arena[parent].value {
            RawValue::Table { children, .. } => {
                children.push(id);
                Ok(id)
            }
            _ => Err(ErrorKind::Internal),
        }
    }

    /// Decodes a scalar token into a node payload. Identifiers are only
    /// valid as the boolean literals.
    fn scalar_value(tok: &Token) -> std::result::Result<RawValue, ErrorKind> {
        match tok.kind {
            TokenKind::Identifier => match tok.text() {
                "true" => Ok(RawValue::Bool(true)),
                "false" => Ok(RawValue::Bool(false)),
                _ => Err(ErrorKind::MisplacedIdentifier),
            },
            TokenKind::String => Ok(RawValue::Str(tok.text().to_string())),
            TokenKind::Int => Ok(RawValue::Int(tok.int_value())),
            TokenKind::Double => Ok(RawValue::Float(tok.float_value())),
            TokenKind::Date => Ok(RawValue::Date(tok.date_value())),
            _ => Err(ErrorKind::Internal),
        }
    }

    // ---- actions ----

    /// `key` in `key = ...` or an inline-table key: select or create the
    /// child and push a frame for it. The grammar only runs this with a
    /// table on top.
    fn act_name(&mut self, tok: &Token) -> ActResult {
        let parent = self.top()?;
        self.ensure_table(parent, ErrorKind::Internal)?;

        let child = self.find_or_add_child(parent, tok.text())?;
        self.stack.push(Frame {
            node: child,
            saved_mode: self.mode,
        });
        Ok(None)
    }

    /// One segment of a `[...]`/`[[...]]` header path: replace the top frame
    /// with the selected child. On a declared list the path descends into
    /// the last element, so `[foo.bar]` after `[[foo]]` targets the newest
    /// table of the array.
    fn act_subfield(&mut self, tok: &Token) -> ActResult {
        let mut cur = self.top()?;

        if let RawValue::List { items, origin } = &self.arena[cur].value {
            if *origin == Origin::Implicit {
                return Err(ErrorKind::ListReassigned);
            }
            cur = *items.last().ok_or(ErrorKind::ListReassigned)?;
        }

        self.ensure_table(cur, ErrorKind::TableReassigned)?;
        let child = self.find_or_add_child(cur, tok.text())?;
        self.set_top(child)?;
        Ok(None)
    }

    /// The `]` closing a `[a.b.c]` header: declare the table, exactly once.
    fn act_endtable(&mut self) -> ActResult {
        let cur = self.top()?;
        match &mut self.arena[cur].value {
            v @ RawValue::Untyped => {
                *v = RawValue::Table {
                    children: Vec::new(),
                    origin: Origin::Explicit,
                };
            }
            RawValue::Table { origin, .. } => {
                if *origin == Origin::Explicit {
                    return Err(ErrorKind::TableReassigned);
                }
                *origin = Origin::Explicit;
            }
            _ => return Err(ErrorKind::TableReassigned),
        }
        Ok(None)
    }

    /// The final `]` of `[[a.b.c]]`: declare the list if new, then append a
    /// fresh table element and make it current.
    fn act_subtable(&mut self) -> ActResult {
        let cur = self.top()?;
        match &mut self.arena[cur].value {
            v @ RawValue::Untyped => {
                *v = RawValue::List {
                    items: Vec::new(),
                    origin: Origin::Explicit,
                };
            }
            RawValue::List {
                origin: Origin::Explicit,
                ..
            } => {}
            _ => return Err(ErrorKind::ListReassigned),
        }

        let elem = self.alloc(RawNode::unnamed(RawValue::Table {
            children: Vec::new(),
            origin: Origin::Explicit,
        }));
        match &mut self.arena[cur].value {
            RawValue::List { items, .. } => items.push(elem),
            _ => return Err(ErrorKind::Internal),
        }
        self.set_top(elem)?;
        Ok(None)
    }

    /// The `[` opening a line header: collapse back to the root frame.
    fn act_reset(&mut self) -> ActResult {
        self.stack.truncate(1);
        self.stack.push(Frame {
            node: ROOT,
            saved_mode: self.mode,
        });
        Ok(None)
    }

    /// Store a scalar into the (still untyped) top frame, then pop it.
    fn act_save(&mut self, tok: &Token) -> ActResult {
        let cur = self.top()?;
        if !matches!(self.arena[cur].value, RawValue::Untyped) {
            return Err(ErrorKind::ValueReassigned);
        }

        self.arena[cur].value = Self::scalar_value(tok)?;
        self.stack.pop().ok_or(ErrorKind::Internal)?;
        if self.stack.is_empty() {
            return Err(ErrorKind::Internal);
        }
        Ok(None)
    }

    /// Append one scalar element to the list on top, keeping it homogeneous
    /// with its first element.
    fn act_append(&mut self, tok: &Token) -> ActResult {
        let cur = self.top()?;
        if matches!(self.arena[cur].value, RawValue::Untyped) {
            self.arena[cur].value = RawValue::List {
                items: Vec::new(),
                origin: Origin::Implicit,
            };
        }

        let value = Self::scalar_value(tok)?;
        match &self.arena[cur].value {
            RawValue::List { items, .. } => {
                if let Some(&first) = items.first() {
                    if mem::discriminant(&self.arena[first].value) != mem::discriminant(&value) {
                        return Err(ErrorKind::MixedList);
                    }
                }
            }
            _ => return Err(ErrorKind::Internal),
        }

        let elem = self.alloc(RawNode::unnamed(value));
        match &mut self.arena[cur].value {
            RawValue::List { items, .. } => items.push(elem),
            _ => return Err(ErrorKind::Internal),
        }
        Ok(None)
    }

    /// `[` or `{` in value position: give the top frame its container type,
    /// or append a container element when the top is the inline array this
    /// value expression is building. Records the current mode for the
    /// matching pop.
    fn act_push(&mut self, make: RawValue) -> ActResult {
        let cur = self.top()?;

        // Only in the inline-array modes is the top frame a list this same
        // expression created; everywhere else the frame came from a key
        // lookup, and a key that already holds a value - list included -
        // cannot be assigned again.
        let building_list = matches!(self.mode, Mode::IarrayValOrEnd | Mode::IarrayVal);

        if !building_list {
            if !matches!(self.arena[cur].value, RawValue::Untyped) {
                return Err(ErrorKind::ValueReassigned);
            }
            self.arena[cur].value = make;
            let mode = self.mode;
            match self.stack.last_mut() {
                Some(frame) => frame.saved_mode = mode,
                None => return Err(ErrorKind::Internal),
            }
            return Ok(None);
        }

        match &self.arena[cur].value {
            RawValue::List { items, .. } => {
                if let Some(&first) = items.first() {
                    if mem::discriminant(&self.arena[first].value) != mem::discriminant(&make) {
                        return Err(ErrorKind::MixedList);
                    }
                }
            }
            _ => return Err(ErrorKind::Internal),
        }

        let saved = self.mode;
        let elem = self.alloc(RawNode::unnamed(make));
        match &mut self.arena[cur].value {
            RawValue::List { items, .. } => items.push(elem),
            _ => return Err(ErrorKind::Internal),
        }
        self.stack.push(Frame {
            node: elem,
            saved_mode: saved,
        });
        Ok(None)
    }

    /// `]` or `}` closing an inline container: pop the frame and resume
    /// from the mode that was active when it was pushed.
    fn act_pop(&mut self) -> ActResult {
        let frame = self.stack.pop().ok_or(ErrorKind::Internal)?;
        if self.stack.is_empty() {
            return Err(ErrorKind::Internal);
        }

        let next = match frame.saved_mode {
            Mode::Value => Mode::Newline,
            Mode::IarrayValOrEnd | Mode::IarrayVal => Mode::IarrayComOrEnd,
            Mode::ItableVal => Mode::ItableComOrEnd,
            _ => return Err(ErrorKind::Internal),
        };
        Ok(Some(next))
    }

    // ---- tree construction ----

    /// Folds the arena into the owned tree, sorting table children by name.
    fn fold(mut self) -> Result<Doc> {
        fn build(
            arena: &mut Vec<RawNode>,
            id: NodeId,
        ) -> std::result::Result<Doc, ErrorKind> {
            let RawNode { name, value } = mem::take(&mut arena[id]);

            let value = match value {
                RawValue::Untyped => return Err(ErrorKind::Internal),
                RawValue::Table { children, .. } => {
                    let mut built = Vec::with_capacity(children.len());
                    for child in children {
                        built.push(build(arena, child)?);
                    }
                    built.sort_by(|a, b| a.name().cmp(b.name()));
                    NodeValue::Table(built)
                }
                RawValue::List { items, .. } => {
                    let mut built = Vec::with_capacity(items.len());
                    for item in items {
                        built.push(build(arena, item)?);
                    }
                    NodeValue::List(built)
                }
                RawValue::Str(s) => NodeValue::Str(s),
                RawValue::Int(v) => NodeValue::Int(v),
                RawValue::Float(v) => NodeValue::Float(v),
                RawValue::Bool(v) => NodeValue::Bool(v),
                RawValue::Date(d) => NodeValue::Date(d),
            };

            Ok(Doc::new(name, value))
        }

        build(&mut self.arena, ROOT)
            .map_err(|kind| TomlError::new(kind, self.lexer.line(), self.lexer.column()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(source: &str) -> Doc {
        parse(source.as_bytes()).unwrap()
    }

    fn parse_err(source: &str) -> ErrorKind {
        parse(source.as_bytes()).unwrap_err().kind
    }

    #[test]
    fn test_empty_document() {
        let doc = parse_ok("");
        assert_eq!(doc.kind(), NodeKind::Table);
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.name(), "");
    }

    #[test]
    fn test_root_value() {
        let doc = parse_ok("int=1\n");
        assert_eq!(doc.len(), 1);
        let child = doc.get("int").unwrap();
        assert_eq!(child.kind(), NodeKind::Int);
        assert_eq!(child.as_int(), 1);
    }

    #[test]
    fn test_basic_table() {
        let doc = parse_ok("[foo]\nbar = 42");
        assert_eq!(doc.len(), 1);
        let foo = doc.get("foo").unwrap();
        assert_eq!(foo.kind(), NodeKind::Table);
        assert_eq!(foo.len(), 1);
        assert_eq!(doc.get_path("foo.bar").unwrap().as_int(), 42);
        assert_eq!(doc.index(0).unwrap().name(), "foo");
        assert_eq!(doc.index(0).unwrap().index(0).unwrap().name(), "bar");
    }

    #[test]
    fn test_newlines_and_indentation() {
        let doc = parse_ok("\n\n [foo]\nbar=3\n\n\n");
        assert_eq!(doc.get_path("foo.bar").unwrap().as_int(), 3);
    }

    #[test]
    fn test_comments_everywhere() {
        let doc = parse_ok("#hurr\n[foo]#foo\n#bar=3\nbar=4#ok");
        assert_eq!(doc.get_path("foo.bar").unwrap().as_int(), 4);
    }

    #[test]
    fn test_two_tables() {
        let doc = parse_ok("[foo]\nfoo=2\n[bar]\nfoo=4");
        assert_eq!(doc.get_path("foo.foo").unwrap().as_int(), 2);
        assert_eq!(doc.get_path("bar.foo").unwrap().as_int(), 4);
    }

    #[test]
    fn test_array_of_tables() {
        let doc = parse_ok("[[foo]]\nbar=10\n[[foo]]\nbar=20");
        let foo = doc.get("foo").unwrap();
        assert_eq!(foo.kind(), NodeKind::List);
        assert_eq!(foo.len(), 2);
        assert_eq!(foo.index(0).unwrap().get("bar").unwrap().as_int(), 10);
        assert_eq!(foo.index(1).unwrap().get("bar").unwrap().as_int(), 20);
    }

    #[test]
    fn test_array_of_tables_under_table() {
        let doc = parse_ok("[foo]\nbar=10\n[[foo.baz]]\nbar=20\n[[foo.baz]]\nbar=30");
        assert_eq!(doc.get_path("foo.bar").unwrap().as_int(), 10);
        assert_eq!(doc.get_path("foo.baz").unwrap().len(), 2);
        assert_eq!(doc.get_path("foo.baz.0.bar").unwrap().as_int(), 20);
        assert_eq!(doc.get_path("foo.baz.1.bar").unwrap().as_int(), 30);
    }

    #[test]
    fn test_inline_array() {
        let doc = parse_ok("x = [1, 2, 3]");
        let x = doc.get("x").unwrap();
        assert_eq!(x.kind(), NodeKind::List);
        assert_eq!(x.len(), 3);
        for (i, item) in x.iter().enumerate() {
            assert_eq!(item.kind(), NodeKind::Int);
            assert_eq!(item.as_int(), i as i64 + 1);
            assert_eq!(item.name(), "");
        }
    }

    #[test]
    fn test_inline_table() {
        let doc = parse_ok("x = {'a':42, 'b':24}");
        assert_eq!(doc.len(), 1);
        let x = doc.get("x").unwrap();
        assert_eq!(x.kind(), NodeKind::Table);
        assert_eq!(x.len(), 2);
        assert_eq!(doc.get_path("x.a").unwrap().as_int(), 42);
        assert_eq!(doc.get_path("x.b").unwrap().as_int(), 24);
    }

    #[test]
    fn test_empty_inline_containers() {
        let doc = parse_ok("x = []");
        assert_eq!(doc.get("x").unwrap().kind(), NodeKind::List);
        assert_eq!(doc.get("x").unwrap().len(), 0);

        let doc = parse_ok("x = {}");
        assert_eq!(doc.get("x").unwrap().kind(), NodeKind::Table);
        assert_eq!(doc.get("x").unwrap().len(), 0);
    }

    #[test]
    fn test_table_nested_in_array() {
        let doc = parse_ok("x = [ { 'y' : 4 } ]");
        assert_eq!(doc.get("x").unwrap().kind(), NodeKind::List);
        assert_eq!(doc.get_path("x.0").unwrap().kind(), NodeKind::Table);
        assert_eq!(doc.get_path("x.0.y").unwrap().as_int(), 4);
    }

    #[test]
    fn test_array_nested_in_table() {
        let doc = parse_ok("x = { 'y' : [4] }");
        assert_eq!(doc.get("x").unwrap().kind(), NodeKind::Table);
        assert_eq!(doc.get_path("x.y").unwrap().kind(), NodeKind::List);
        assert_eq!(doc.get_path("x.y.0").unwrap().as_int(), 4);
    }

    #[test]
    fn test_deep_inline_nesting() {
        let doc = parse_ok("x = [[[1]], [{'a':{'b':[2]}}]]");
        assert_eq!(doc.get_path("x.0.0.0").unwrap().as_int(), 1);
        assert_eq!(doc.get_path("x.1.0.a.b.0").unwrap().as_int(), 2);
    }

    #[test]
    fn test_booleans_from_identifiers() {
        let doc = parse_ok("a = true\nb = false");
        assert_eq!(doc.get("a").unwrap().kind(), NodeKind::Bool);
        assert!(doc.get("a").unwrap().as_bool());
        assert!(!doc.get("b").unwrap().as_bool());
    }

    #[test]
    fn test_datetime_value() {
        let doc = parse_ok("date = 1987-07-05T17:45:00Z");
        let date = doc.get("date").unwrap();
        assert_eq!(date.kind(), NodeKind::Date);
        let d = date.as_date();
        assert_eq!(d.year, 1987);
        assert_eq!(d.month, 6);
        assert_eq!(d.day, 5);
        assert_eq!(d.hour, 17);
        assert_eq!(d.minute, 45);
        assert_eq!(d.second, 0);
        assert_eq!(d.offset, 0);
    }

    #[test]
    fn test_string_key_and_unicode_value() {
        let doc = parse_ok("k = \"\\U0001F419\"");
        assert_eq!(
            doc.get("k").unwrap().as_str().as_bytes(),
            [0xF0, 0x9F, 0x90, 0x99]
        );
    }

    #[test]
    fn test_quoted_keys() {
        let doc = parse_ok("[material]\nname = \"diorite\"\n\n[render.\"1d\"]\ntile = \"16/materials/diorite.png\"");
        assert_eq!(doc.get_path("material.name").unwrap().as_str(), "diorite");
        assert_eq!(doc.get_path("render.1d").unwrap().kind(), NodeKind::Table);
        assert_eq!(
            doc.get_path("render.1d.tile").unwrap().as_str(),
            "16/materials/diorite.png"
        );
    }

    #[test]
    fn test_empty_subtables() {
        let doc = parse_ok("[a]\n[a.b]\n");
        assert_eq!(doc.get_path("a").unwrap().kind(), NodeKind::Table);
        assert_eq!(doc.get_path("a.b").unwrap().kind(), NodeKind::Table);
        assert_eq!(doc.get_path("a").unwrap().len(), 1);
        assert_eq!(doc.get_path("a.b").unwrap().len(), 0);
    }

    #[test]
    fn test_header_order_is_free() {
        let doc = parse_ok("[a.b.c]\n[a]\n");
        assert_eq!(doc.get_path("a").unwrap().len(), 1);
        assert_eq!(doc.get_path("a.b").unwrap().len(), 1);
        assert_eq!(doc.get_path("a.b.c").unwrap().len(), 0);
    }

    #[test]
    fn test_err_mixed_inline_list() {
        assert_eq!(parse_err("x = [1, '2']"), ErrorKind::MixedList);
    }

    #[test]
    fn test_err_mixed_container_list() {
        assert_eq!(parse_err("x = [1, [2]]"), ErrorKind::MixedList);
        assert_eq!(parse_err("x = [[1], {'a':2}]"), ErrorKind::MixedList);
    }

    #[test]
    fn test_err_dupe_table() {
        assert_eq!(parse_err("[a]\n[a]\n"), ErrorKind::TableReassigned);
    }

    #[test]
    fn test_err_inline_table_after_header() {
        assert_eq!(parse_err("[a.b]\n[a]\nb={}\n"), ErrorKind::ValueReassigned);
    }

    #[test]
    fn test_err_header_after_inline_table() {
        assert_eq!(parse_err("[a]\nb={}\n[a.b]\n"), ErrorKind::TableReassigned);
    }

    #[test]
    fn test_err_value_reassigned() {
        assert_eq!(parse_err("a = 1\na = 2"), ErrorKind::ValueReassigned);
    }

    #[test]
    fn test_err_list_value_reassigned() {
        assert_eq!(parse_err("x = [[1]]\nx = [[2]]\n"), ErrorKind::ValueReassigned);
        assert_eq!(parse_err("x = []\nx = [3]\n"), ErrorKind::ValueReassigned);
        assert_eq!(parse_err("x = [1]\nx = [2]\n"), ErrorKind::ValueReassigned);
    }

    #[test]
    fn test_err_atable_reassigned_as_value() {
        // Regaining the parent scope must not let a declared array of
        // tables be extended through a plain key assignment.
        assert_eq!(
            parse_err("[[t.x]]\nbar=1\n[t]\nx = {'a':1}\n"),
            ErrorKind::ValueReassigned
        );
        assert_eq!(
            parse_err("[[t.x]]\nbar=1\n[t]\nx = [2]\n"),
            ErrorKind::ValueReassigned
        );
    }

    #[test]
    fn test_key_inside_atable_element_is_its_own() {
        // After [[x]] the active scope is the new element, so a key named
        // x there is a fresh key, not the array itself.
        let doc = parse_ok("[[x]]\nbar=1\nx = {'a':1}\n");
        assert_eq!(doc.get("x").unwrap().kind(), NodeKind::List);
        assert_eq!(doc.get_path("x.0.bar").unwrap().as_int(), 1);
        assert_eq!(doc.get_path("x.0.x.a").unwrap().as_int(), 1);
        assert_eq!(doc.get("x").unwrap().len(), 1);
    }

    #[test]
    fn test_inline_table_repeated_key_with_container_value() {
        assert_eq!(
            parse_err("x = {'a':[1], 'a':[2]}"),
            ErrorKind::ValueReassigned
        );
    }

    #[test]
    fn test_err_misplaced_identifier() {
        assert_eq!(parse_err("a = yes"), ErrorKind::MisplacedIdentifier);
        assert_eq!(parse_err("a = [maybe]"), ErrorKind::MisplacedIdentifier);
    }

    #[test]
    fn test_err_invalid_underscore_value() {
        assert_eq!(parse_err("k = 4__2"), ErrorKind::InvalidUnderscore);
    }

    #[test]
    fn test_idempotent_parse() {
        let source = "[a]\nb = [1, 2]\nc = {'d': 'e'}\n[[f]]\ng = 1.5\n";
        assert_eq!(parse_ok(source), parse_ok(source));
    }

    #[test]
    fn test_error_positions_are_in_extent() {
        let source = "[a]\n[a]\n";
        let err = parse(source.as_bytes()).unwrap_err();
        assert_eq!(err.line, 2);
        assert_eq!(err.column, 3);
    }
}

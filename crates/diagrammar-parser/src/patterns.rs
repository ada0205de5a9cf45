//! Recognition patterns shared by the dialect extractors.
//!
//! Everything in here is stateless: small winnow matchers for the recurring
//! fragment shapes (identifiers, bracketed labels, arrows, keywords) and the
//! operator lookup tables that map an arrow spelling to its meaning. The
//! tables are ordered longest spelling first so that a shorter operator never
//! shadows a longer one sharing its prefix.

use winnow::{
    Parser as _,
    ascii::space0,
    combinator::{alt, delimited, not, opt, peek, preceded, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::Stream,
    token::{one_of, rest, take_till, take_until, take_while},
};

use diagrammar_core::EdgeKind;

/// Comment prefix shared by all dialects.
const COMMENT_PREFIX: &str = "%%";

/// Label delimiters for flowchart entities, longest opening first.
///
/// The shape a delimiter pair draws is not preserved: every pair yields a
/// plain entity whose label is the enclosed text.
pub(crate) const FLOW_BRACKETS: &[(&str, &str)] = &[
    ("(((", ")))"),
    ("((", "))"),
    ("([", "])"),
    ("[[", "]]"),
    ("[(", ")]"),
    ("{{", "}}"),
    ("[/", "/]"),
    ("[/", "\\]"),
    ("[\\", "\\]"),
    ("[\\", "/]"),
    ("[", "]"),
    ("(", ")"),
    ("{", "}"),
    (">", "]"),
];

/// Inline-label link forms: opening token, closing tokens, and the style of
/// an edge created from the form.
pub(crate) const FLOW_LABELED_LINKS: &[(&str, &[&str], EdgeKind)] = &[
    ("--", &["-->", "---"], EdgeKind::Solid),
    ("-.", &[".->", ".-"], EdgeKind::Dashed),
    ("==", &["==>", "==="], EdgeKind::Thick),
];

/// How a sequence arrow reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MessageArrow {
    pub kind: EdgeKind,
    /// The arrow points from the right-hand name to the left-hand one.
    pub reversed: bool,
}

const fn message(kind: EdgeKind, reversed: bool) -> MessageArrow {
    MessageArrow { kind, reversed }
}

/// Sequence arrow spellings.
///
/// A double chevron (or an open `)` head) marks an asynchronous message, an
/// `x` head marks a lost one, anything else is synchronous. Spellings opening
/// with `<` point right-to-left.
pub(crate) const SEQUENCE_ARROWS: &[(&str, MessageArrow)] = &[
    ("-->>", message(EdgeKind::Async, false)),
    ("==>>", message(EdgeKind::Async, false)),
    ("<<--", message(EdgeKind::Async, true)),
    ("->>", message(EdgeKind::Async, false)),
    ("-->", message(EdgeKind::Sync, false)),
    ("==>", message(EdgeKind::Sync, false)),
    ("--x", message(EdgeKind::Lost, false)),
    ("--X", message(EdgeKind::Lost, false)),
    ("--)", message(EdgeKind::Async, false)),
    ("x-x", message(EdgeKind::Lost, false)),
    ("<<-", message(EdgeKind::Async, true)),
    ("<--", message(EdgeKind::Sync, true)),
    ("->", message(EdgeKind::Sync, false)),
    ("-x", message(EdgeKind::Lost, false)),
    ("-X", message(EdgeKind::Lost, false)),
    ("-)", message(EdgeKind::Async, false)),
    ("<-", message(EdgeKind::Sync, true)),
];

/// How a class relation operator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RelationOperator {
    pub kind: EdgeKind,
    /// The decorated end is written on the left, so endpoints are swapped
    /// to keep the decoration at the edge target.
    pub swap: bool,
}

const fn relation(kind: EdgeKind, swap: bool) -> RelationOperator {
    RelationOperator { kind, swap }
}

/// Class relation operators.
pub(crate) const CLASS_RELATIONS: &[(&str, RelationOperator)] = &[
    ("<|--", relation(EdgeKind::Inheritance, true)),
    ("--|>", relation(EdgeKind::Inheritance, false)),
    ("<|..", relation(EdgeKind::Realization, true)),
    ("..|>", relation(EdgeKind::Realization, false)),
    ("*--", relation(EdgeKind::Composition, true)),
    ("--*", relation(EdgeKind::Composition, false)),
    ("o--", relation(EdgeKind::Aggregation, true)),
    ("--o", relation(EdgeKind::Aggregation, false)),
    ("<..", relation(EdgeKind::Dependency, true)),
    ("..>", relation(EdgeKind::Dependency, false)),
    ("<--", relation(EdgeKind::Dependency, true)),
    ("-->", relation(EdgeKind::Association, false)),
    ("--", relation(EdgeKind::Association, false)),
    ("..", relation(EdgeKind::Dotted, false)),
];

/// Returns `true` for characters allowed in a bare identifier.
pub(crate) fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Iterate the meaningful lines of a source: trimmed, non-blank, and not
/// full-line `%%` comments.
pub(crate) fn lines(source: &str) -> impl Iterator<Item = &str> {
    source
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
}

/// Split a line into `;`-separated statements, ignoring separators inside
/// brackets or quotes.
pub(crate) fn split_statements(line: &str) -> Vec<&str> {
    let mut statements = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, c) in line.char_indices() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), _) => {}
            (None, '"') => quote = Some('"'),
            (None, '[' | '(' | '{') => depth += 1,
            (None, ']' | ')' | '}') => depth = depth.saturating_sub(1),
            (None, ';') if depth == 0 => {
                statements.push(line[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    statements.push(line[start..].trim());
    statements.retain(|statement| !statement.is_empty());
    statements
}

/// Strip one pair of matching surrounding quotes, if present.
pub(crate) fn unquote(text: &str) -> &str {
    let text = text.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|inner| inner.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    text
}

/// Match a literal keyword that is not immediately followed by an
/// identifier character.
pub(crate) fn keyword<'s>(
    word: &'static str,
) -> impl winnow::Parser<&'s str, &'s str, ErrMode<ContextError>> {
    terminated(word, peek(not(one_of(is_ident_char))))
}

/// Match any of `words` as a keyword.
pub(crate) fn keywords<'s>(
    words: &'static [&'static str],
) -> impl FnMut(&mut &'s str) -> ModalResult<&'s str> {
    move |input: &mut &'s str| {
        for &word in words {
            let checkpoint = input.checkpoint();
            match keyword(word).parse_next(input) {
                Ok(matched) => return Ok(matched),
                Err(ErrMode::Backtrack(_)) => input.reset(&checkpoint),
                Err(err) => return Err(err),
            }
        }
        Err(backtrack())
    }
}

/// A bare identifier: one or more identifier characters.
pub(crate) fn bare_identifier<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., is_ident_char).parse_next(input)
}

/// Text between matching single or double quotes on one line.
pub(crate) fn quoted<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    alt((
        delimited('"', take_till(0.., ['"', '\n']), '"'),
        delimited('\'', take_till(0.., ['\'', '\n']), '\''),
    ))
    .parse_next(input)
}

/// An identifier, quoted or bare. Quotes are stripped.
pub(crate) fn identifier<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    alt((
        quoted.verify(|id: &str| !id.trim().is_empty()).map(str::trim),
        bare_identifier,
    ))
    .parse_next(input)
}

/// Everything up to the end of the input, trimmed.
pub(crate) fn rest_text<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    rest.map(str::trim).parse_next(input)
}

/// Optional `: text` suffix; empty text counts as absent.
pub(crate) fn colon_text<'s>(input: &mut &'s str) -> ModalResult<Option<&'s str>> {
    opt(preceded((space0, ':'), rest_text))
        .map(|text| text.filter(|text| !text.is_empty()))
        .parse_next(input)
}

/// A `<<stereotype>>` annotation, returning the trimmed inner text.
pub(crate) fn stereotype<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    delimited("<<", take_until(0.., ">>"), ">>")
        .map(str::trim)
        .parse_next(input)
}

/// A flowchart label in any of the [`FLOW_BRACKETS`] delimiters.
pub(crate) fn bracket_label<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    for (open, close) in FLOW_BRACKETS {
        let checkpoint = input.checkpoint();
        let result: ModalResult<&str> =
            delimited(*open, take_until(0.., *close), *close).parse_next(input);
        match result {
            Ok(label) => return Ok(label),
            Err(ErrMode::Backtrack(_)) => input.reset(&checkpoint),
            Err(err) => return Err(err),
        }
    }
    Err(backtrack())
}

/// A flowchart arrow without an inline label, returning its style.
///
/// Shape: optional head (`<`, `o`, `x`), then a body of two or more `-`,
/// a `-` `.`… `-` run, or two or more `=`, then an optional head (`>`, `o`,
/// `x`). Dotted bodies are dashed, `=` bodies are thick, the rest solid.
pub(crate) fn flow_arrow(input: &mut &str) -> ModalResult<EdgeKind> {
    let checkpoint = input.checkpoint();
    let _ = opt(terminated(one_of(['<', 'o', 'x']), peek(one_of(['-', '=']))))
        .parse_next(input)?;

    let style = alt((
        (
            '-',
            take_while(1.., '.'),
            take_while(1.., '-'),
        )
            .value(EdgeKind::Dashed),
        take_while(2.., '-').value(EdgeKind::Solid),
        take_while(2.., '=').value(EdgeKind::Thick),
    ))
    .parse_next(input)
    .inspect_err(|_| input.reset(&checkpoint))?;

    let _ = alt((
        '>'.void(),
        terminated(one_of(['o', 'x']), peek(not(one_of(is_ident_char)))).void(),
        "".void(),
    ))
    .parse_next(input)?;

    Ok(style)
}

/// A flowchart arrow with its label written inside the arrow
/// (`-- text -->`), returning the label and the style of the form.
pub(crate) fn flow_inline_label<'s>(input: &mut &'s str) -> ModalResult<(&'s str, EdgeKind)> {
    let current: &'s str = *input;
    for &(open, closes, style) in FLOW_LABELED_LINKS {
        let Some(after_open) = current.strip_prefix(open) else {
            continue;
        };
        // `-->`, `---`, `-.->` and friends are plain arrows, not label openers.
        if after_open.starts_with(['-', '.', '=', '>']) {
            continue;
        }
        let close = closes
            .iter()
            .filter_map(|&close| after_open.find(close).map(|idx| (idx, close)))
            .min_by_key(|(idx, close)| (*idx, std::cmp::Reverse(close.len())));
        let Some((idx, close)) = close else {
            continue;
        };
        let label = after_open[..idx].trim();
        if label.is_empty() {
            continue;
        }
        // Longer closing runs such as `--->` still end the label.
        *input = after_open[idx + close.len()..].trim_start_matches(['-', '.', '=', '>']);
        return Ok((label, style));
    }
    Err(backtrack())
}

/// A `|text|` label written right after a flowchart arrow.
pub(crate) fn pipe_label<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    preceded(space0, delimited('|', take_till(0.., '|'), '|'))
        .map(str::trim)
        .parse_next(input)
}

/// Match the longest spelling of `table` at the start of the input.
///
/// With `word_boundary` set, spellings that end in an identifier character
/// (such as `--o`) only match when the following character does not continue
/// an identifier, so `A -- owner` is never read as an aggregation.
pub(crate) fn operator<'s, T: Copy>(
    table: &'static [(&'static str, T)],
    word_boundary: bool,
) -> impl FnMut(&mut &'s str) -> ModalResult<T> {
    move |input: &mut &'s str| {
        let current: &'s str = *input;
        for &(spelling, value) in table {
            let Some(after) = current.strip_prefix(spelling) else {
                continue;
            };
            if word_boundary && spelling.ends_with(is_ident_char) && after.starts_with(is_ident_char)
            {
                continue;
            }
            *input = after;
            return Ok(value);
        }
        Err(backtrack())
    }
}

#[cfg(test)]
mod tests {
    use winnow::Parser as _;

    use super::*;

    fn assert_no_shadowing<T>(table: &[(&str, T)]) {
        for (idx, &(earlier, _)) in table.iter().enumerate() {
            for &(later, _) in &table[idx + 1..] {
                assert!(
                    !later.starts_with(earlier) || later == earlier,
                    "`{earlier}` shadows `{later}`"
                );
            }
        }
    }

    #[test]
    fn test_tables_are_longest_first() {
        assert_no_shadowing(SEQUENCE_ARROWS);
        assert_no_shadowing(CLASS_RELATIONS);
    }

    #[test]
    fn test_lines_skip_comments_and_blanks() {
        let source = "flowchart\n\n  %% comment\n  A --> B  \n";
        let collected: Vec<_> = lines(source).collect();
        assert_eq!(collected, vec!["flowchart", "A --> B"]);
    }

    #[test]
    fn test_split_statements() {
        assert_eq!(split_statements("graph TD; A-->B;"), vec!["graph TD", "A-->B"]);
        assert_eq!(split_statements("A[\"x; y\"] --> B"), vec!["A[\"x; y\"] --> B"]);
        assert_eq!(split_statements("A[x;y]"), vec!["A[x;y]"]);
    }

    #[test]
    fn test_unquote() {
        assert_eq!(unquote("\"My Node\""), "My Node");
        assert_eq!(unquote("'a'"), "a");
        assert_eq!(unquote("plain"), "plain");
        assert_eq!(unquote("\"unbalanced"), "\"unbalanced");
    }

    #[test]
    fn test_identifier() {
        let mut input = "Alice->>Bob";
        assert_eq!(identifier(&mut input).ok(), Some("Alice"));
        assert_eq!(input, "->>Bob");

        let mut input = "\"Big Box\" --> B";
        assert_eq!(identifier(&mut input).ok(), Some("Big Box"));
        assert_eq!(input, " --> B");

        let mut input = "--> B";
        assert!(identifier(&mut input).is_err());
    }

    #[test]
    fn test_keyword_word_boundary() {
        let mut input = "participant Alice";
        assert_eq!(keyword("participant").parse_next(&mut input).ok(), Some("participant"));

        let mut input = "participants";
        assert!(keyword("participant").parse_next(&mut input).is_err());

        let mut input = "end";
        assert_eq!(keywords(&["loop", "end"])(&mut input).ok(), Some("end"));
    }

    #[test]
    fn test_bracket_label_shapes() {
        for (source, expected) in [
            ("[Start]", "Start"),
            ("(Rounded)", "Rounded"),
            ("{Decision?}", "Decision?"),
            ("((Circle))", "Circle"),
            ("([Stadium])", "Stadium"),
            ("[(Database)]", "Database"),
            ("[[Subroutine]]", "Subroutine"),
            ("{{Hexagon}}", "Hexagon"),
            (">Flag]", "Flag"),
            ("[/Lean/]", "Lean"),
            ("[/Trapezoid\\]", "Trapezoid"),
        ] {
            let mut input = source;
            assert_eq!(bracket_label(&mut input).ok(), Some(expected), "shape {source}");
            assert!(input.is_empty(), "shape {source} left {input:?}");
        }
    }

    #[test]
    fn test_flow_arrow_styles() {
        for (source, expected) in [
            ("-->", EdgeKind::Solid),
            ("---", EdgeKind::Solid),
            ("--->", EdgeKind::Solid),
            ("-.->", EdgeKind::Dashed),
            ("-.-", EdgeKind::Dashed),
            ("-..->", EdgeKind::Dashed),
            ("==>", EdgeKind::Thick),
            ("===", EdgeKind::Thick),
            ("<-->", EdgeKind::Solid),
            ("--o", EdgeKind::Solid),
            ("--x", EdgeKind::Solid),
        ] {
            let mut input = source;
            assert_eq!(flow_arrow(&mut input).ok(), Some(expected), "arrow {source}");
            assert!(input.is_empty(), "arrow {source} left {input:?}");
        }
    }

    #[test]
    fn test_flow_arrow_rejects_single_dash() {
        let mut input = "- B";
        assert!(flow_arrow(&mut input).is_err());
        assert_eq!(input, "- B");
    }

    #[test]
    fn test_flow_arrow_head_needs_boundary() {
        let mut input = "--owner";
        assert_eq!(flow_arrow(&mut input).ok(), Some(EdgeKind::Solid));
        assert_eq!(input, "owner");
    }

    #[test]
    fn test_flow_inline_label() {
        let mut input = "-- ok --> C";
        assert_eq!(flow_inline_label(&mut input).ok(), Some(("ok", EdgeKind::Solid)));
        assert_eq!(input, " C");

        let mut input = "-. maybe .-> C";
        assert_eq!(flow_inline_label(&mut input).ok(), Some(("maybe", EdgeKind::Dashed)));

        let mut input = "== sure ==> C";
        assert_eq!(flow_inline_label(&mut input).ok(), Some(("sure", EdgeKind::Thick)));
    }

    #[test]
    fn test_flow_inline_label_ignores_plain_arrows() {
        for source in ["--> B -- x --> C", "-.-> B", "==> B", "--- B"] {
            let mut input = source;
            assert!(flow_inline_label(&mut input).is_err(), "{source}");
        }
    }

    #[test]
    fn test_pipe_label() {
        let mut input = "|yes| B";
        assert_eq!(pipe_label(&mut input).ok(), Some("yes"));
        assert_eq!(input, " B");
    }

    #[test]
    fn test_colon_text() {
        let mut input = " : hello there ";
        assert_eq!(colon_text(&mut input).ok(), Some(Some("hello there")));

        let mut input = ":";
        assert_eq!(colon_text(&mut input).ok(), Some(None));

        let mut input = "";
        assert_eq!(colon_text(&mut input).ok(), Some(None));
    }

    #[test]
    fn test_stereotype() {
        let mut input = "<< interface >> rest";
        assert_eq!(stereotype(&mut input).ok(), Some("interface"));
        assert_eq!(input, " rest");
    }

    #[test]
    fn test_operator_prefers_longest() {
        let mut parse = operator(SEQUENCE_ARROWS, false);
        let mut input = "-->>B";
        assert_eq!(parse(&mut input).ok(), Some(message(EdgeKind::Async, false)));
        assert_eq!(input, "B");

        let mut parse = operator(CLASS_RELATIONS, true);
        let mut input = "<|-- Derived";
        assert_eq!(parse(&mut input).ok(), Some(relation(EdgeKind::Inheritance, true)));
    }

    #[test]
    fn test_operator_word_boundary() {
        let mut parse = operator(CLASS_RELATIONS, true);
        let mut input = "--owner";
        assert_eq!(parse(&mut input).ok(), Some(relation(EdgeKind::Association, false)));
        assert_eq!(input, "owner");
    }
}

//! Lexer and parser for payload templates.
//!
//! Two passes: [`lex`] cuts the source into text and tag tokens (dropping
//! comments, expanding `raw` blocks and applying standalone-line trimming),
//! then [`parse`] folds the tokens into a tree of [`Node`]s.

use crate::domain::error::DomainError;

/// 1-based source position of a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pos {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text(String),
    Expr {
        name: String,
        helpers: Vec<String>,
        pos: Pos,
    },
    If {
        name: String,
        negated: bool,
        then: Vec<Node>,
        otherwise: Vec<Node>,
        pos: Pos,
    },
}

#[derive(Debug, PartialEq, Eq)]
enum Token<'a> {
    Text(&'a str),
    Expr(&'a str, Pos),
    Block(&'a str, Pos),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Expr,
    Block,
    Comment,
}

impl TagKind {
    fn from_opener(c: u8) -> Option<Self> {
        match c {
            b'{' => Some(Self::Expr),
            b'%' => Some(Self::Block),
            b'#' => Some(Self::Comment),
            _ => None,
        }
    }

    const fn closer(self) -> &'static str {
        match self {
            Self::Expr => "}}",
            Self::Block => "%}",
            Self::Comment => "#}",
        }
    }
}

fn syntax(src: &str, offset: usize, message: impl Into<String>) -> DomainError {
    let Pos { line, column } = position(src, offset);
    DomainError::TemplateSyntax {
        line,
        column,
        message: message.into(),
    }
}

fn position(src: &str, offset: usize) -> Pos {
    let before = &src[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |n| n + 1);
    Pos {
        line,
        column: before[line_start..].chars().count() + 1,
    }
}

fn is_inline_space(c: char) -> bool {
    c == ' ' || c == '\t' || c == '\r'
}

/// If the tag at `start..end` is the only thing on its line, returns the
/// widened span covering the whole line including its newline.
///
/// `floor` is where the current text run begins; text before it belongs to
/// an earlier token and is never swallowed.
fn standalone_span(src: &str, start: usize, end: usize, floor: usize) -> Option<(usize, usize)> {
    let line_start = src[..start].rfind('\n').map_or(0, |n| n + 1);
    if line_start < floor || !src[line_start..start].chars().all(is_inline_space) {
        return None;
    }

    let after = &src[end..];
    let (tail, consumed) = match after.find('\n') {
        Some(n) => (&after[..n], n + 1),
        None => (after, after.len()),
    };
    if !tail.chars().all(is_inline_space) {
        return None;
    }

    Some((line_start, end + consumed))
}

/// Finds the `{% endraw %}` closing a raw block opened before `from`.
fn find_endraw(src: &str, from: usize) -> Option<(usize, usize)> {
    let mut cursor = from;
    while let Some(rel) = src[cursor..].find("{%") {
        let start = cursor + rel;
        let body_start = start + 2;
        let close = src[body_start..].find("%}")?;
        let end = body_start + close + 2;
        if src[body_start..body_start + close].trim() == "endraw" {
            return Some((start, end));
        }
        cursor = end;
    }
    None
}

fn lex(src: &str) -> Result<Vec<Token<'_>>, DomainError> {
    let bytes = src.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut cursor = 0;

    while let Some(rel) = src[cursor..].find('{') {
        let start = cursor + rel;
        let Some(kind) = bytes.get(start + 1).copied().and_then(TagKind::from_opener) else {
            cursor = start + 1;
            continue;
        };

        let body_start = start + 2;
        let Some(close) = src[body_start..].find(kind.closer()) else {
            return Err(syntax(src, start, format!("unclosed tag, expected '{}'", kind.closer())));
        };
        let body = &src[body_start..body_start + close];
        let end = body_start + close + 2;

        let (text_end, mut next) = match kind {
            TagKind::Expr => (start, end),
            _ => standalone_span(src, start, end, text_start).unwrap_or((start, end)),
        };

        if text_end > text_start {
            tokens.push(Token::Text(&src[text_start..text_end]));
        }

        match kind {
            TagKind::Comment => {}
            TagKind::Expr => tokens.push(Token::Expr(body, position(src, start))),
            TagKind::Block if body.trim() == "raw" => {
                let (raw_end, raw_close) = find_endraw(src, next)
                    .ok_or_else(|| syntax(src, start, "unterminated 'raw' block"))?;
                let (content_end, after) = standalone_span(src, raw_end, raw_close, next)
                    .unwrap_or((raw_end, raw_close));
                if content_end > next {
                    tokens.push(Token::Text(&src[next..content_end]));
                }
                next = after;
            }
            TagKind::Block => tokens.push(Token::Block(body, position(src, start))),
        }

        text_start = next;
        cursor = next;
    }

    if text_start < src.len() {
        tokens.push(Token::Text(&src[text_start..]));
    }

    Ok(tokens)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn tag_error(pos: Pos, message: impl Into<String>) -> DomainError {
    DomainError::TemplateSyntax {
        line: pos.line,
        column: pos.column,
        message: message.into(),
    }
}

fn parse_expr(body: &str, pos: Pos) -> Result<Node, DomainError> {
    let mut parts = body.split('|').map(str::trim);

    let name = parts.next().unwrap_or_default();
    if name.is_empty() {
        return Err(tag_error(pos, "empty expression"));
    }
    if !is_identifier(name) {
        return Err(tag_error(pos, format!("'{name}' is not a valid name")));
    }

    let helpers = parts
        .map(|h| {
            if h.is_empty() {
                Err(tag_error(pos, "empty helper after '|'"))
            } else if !is_identifier(h) {
                Err(tag_error(pos, format!("'{h}' is not a valid helper name")))
            } else {
                Ok(h.to_string())
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Node::Expr {
        name: name.to_string(),
        helpers,
        pos,
    })
}

enum Directive {
    If { name: String, negated: bool },
    Else,
    EndIf,
}

fn parse_directive(body: &str, pos: Pos) -> Result<Directive, DomainError> {
    let words: Vec<&str> = body.split_whitespace().collect();
    let condition = |name: &str, negated| {
        if is_identifier(name) {
            Ok(Directive::If {
                name: name.to_string(),
                negated,
            })
        } else {
            Err(tag_error(pos, format!("'{name}' is not a valid name")))
        }
    };

    match words.as_slice() {
        ["if", "not"] => Err(tag_error(pos, "missing name after 'if not'")),
        ["if", "not", name] => condition(name, true),
        ["if", name] => condition(name, false),
        ["if", ..] => Err(tag_error(pos, "expected '{% if name %}' or '{% if not name %}'")),
        ["else"] => Ok(Directive::Else),
        ["endif"] => Ok(Directive::EndIf),
        ["endraw"] => Err(tag_error(pos, "'endraw' without matching 'raw'")),
        [] => Err(tag_error(pos, "empty block tag")),
        [other, ..] => Err(tag_error(pos, format!("unknown block tag '{other}'"))),
    }
}

struct Frame {
    name: String,
    negated: bool,
    then: Vec<Node>,
    otherwise: Option<Vec<Node>>,
    pos: Pos,
}

fn current<'a>(root: &'a mut Vec<Node>, stack: &'a mut [Frame]) -> &'a mut Vec<Node> {
    match stack.last_mut() {
        Some(Frame {
            otherwise: Some(branch),
            ..
        }) => branch,
        Some(frame) => &mut frame.then,
        None => root,
    }
}

pub fn parse(src: &str) -> Result<Vec<Node>, DomainError> {
    let mut root = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for token in lex(src)? {
        match token {
            Token::Text(text) => {
                current(&mut root, &mut stack).push(Node::Text(text.to_string()));
            }
            Token::Expr(body, pos) => {
                let node = parse_expr(body, pos)?;
                current(&mut root, &mut stack).push(node);
            }
            Token::Block(body, pos) => match parse_directive(body, pos)? {
                Directive::If { name, negated } => stack.push(Frame {
                    name,
                    negated,
                    then: Vec::new(),
                    otherwise: None,
                    pos,
                }),
                Directive::Else => match stack.last_mut() {
                    Some(frame) if frame.otherwise.is_none() => {
                        frame.otherwise = Some(Vec::new());
                    }
                    Some(_) => return Err(tag_error(pos, "duplicate 'else' in 'if' block")),
                    None => return Err(tag_error(pos, "'else' without matching 'if'")),
                },
                Directive::EndIf => {
                    let frame = stack
                        .pop()
                        .ok_or_else(|| tag_error(pos, "'endif' without matching 'if'"))?;
                    let node = Node::If {
                        name: frame.name,
                        negated: frame.negated,
                        then: frame.then,
                        otherwise: frame.otherwise.unwrap_or_default(),
                        pos: frame.pos,
                    };
                    current(&mut root, &mut stack).push(node);
                }
            },
        }
    }

    if let Some(open) = stack.last() {
        return Err(tag_error(open.pos, "unterminated 'if' block, missing '{% endif %}'"));
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(nodes: &[Node]) -> String {
        nodes
            .iter()
            .map(|n| match n {
                Node::Text(t) => t.clone(),
                other => panic!("expected text, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn plain_text_is_one_node() {
        let nodes = parse("hello\nworld { not a tag }").unwrap();
        assert_eq!(text(&nodes), "hello\nworld { not a tag }");
    }

    #[test]
    fn expression_with_helpers() {
        let nodes = parse("x{{ name | snake_case|upper }}y").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(
            nodes[1],
            Node::Expr {
                name: "name".into(),
                helpers: vec!["snake_case".into(), "upper".into()],
                pos: Pos { line: 1, column: 2 },
            }
        );
    }

    #[test]
    fn comments_are_dropped() {
        let nodes = parse("a{# note #}b").unwrap();
        assert_eq!(text(&nodes), "ab");
    }

    #[test]
    fn standalone_comment_line_is_removed() {
        let nodes = parse("a\n  {# note #}\nb\n").unwrap();
        assert_eq!(text(&nodes), "a\nb\n");
    }

    #[test]
    fn raw_block_keeps_tags_literally() {
        let nodes = parse("{% raw %}{{ x }}{% if %}{% endraw %}").unwrap();
        assert_eq!(text(&nodes), "{{ x }}{% if %}");
    }

    #[test]
    fn standalone_raw_lines_are_removed() {
        let nodes = parse("a\n{% raw %}\n{{ x }}\n{% endraw %}\nb").unwrap();
        assert_eq!(text(&nodes), "a\n{{ x }}\nb");
    }

    #[test]
    fn nested_if_with_else() {
        let nodes = parse("{% if a %}{% if not b %}x{% endif %}{% else %}y{% endif %}").unwrap();
        let [Node::If { name, then, otherwise, .. }] = nodes.as_slice() else {
            panic!("expected a single if node: {nodes:?}");
        };
        assert_eq!(name, "a");
        assert!(matches!(&then[0], Node::If { negated: true, .. }));
        assert_eq!(text(otherwise), "y");
    }

    #[test]
    fn unclosed_expression_reports_position() {
        let err = parse("line one\n  {{ name").unwrap_err();
        assert_eq!(
            err,
            DomainError::TemplateSyntax {
                line: 2,
                column: 3,
                message: "unclosed tag, expected '}}'".into(),
            }
        );
    }

    #[test]
    fn structural_errors() {
        for src in [
            "{{ }}",
            "{{ a | }}",
            "{{ a b }}",
            "{% endif %}",
            "{% else %}",
            "{% if a %}",
            "{% if a %}{% else %}{% else %}{% endif %}",
            "{% for x in y %}",
            "{% raw %}never closed",
            "{% endraw %}",
            "{%  %}",
        ] {
            assert!(
                matches!(parse(src), Err(DomainError::TemplateSyntax { .. })),
                "accepted {src:?}"
            );
        }
    }

    #[test]
    fn unterminated_if_points_at_opening_tag() {
        let err = parse("ok\n{% if a %}\nbody\n").unwrap_err();
        assert!(matches!(err, DomainError::TemplateSyntax { line: 2, column: 1, .. }));
    }
}

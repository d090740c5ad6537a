//! Route path patterns and their parsed representation.
//!
//! Grammar:
//!
//! - `/` and `.` are separators
//! - `:name` is a named parameter, `*name` a glob parameter
//! - `( ... )` is an optional group and may nest
//! - everything else is literal text

use crate::error::PatternError;
use std::fmt;

/// One node of a parsed path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Slash,
    Dot,
    Literal(String),
    Symbol(String),
    Star(String),
    Group(Vec<Node>),
}

/// A parsed path pattern (e.g. `/users/:id(.:format)`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    nodes: Vec<Node>,
}

impl PathPattern {
    /// Parse a path pattern.
    ///
    /// # Example
    /// ```
    /// use route_translator::path::{Node, PathPattern};
    ///
    /// let pattern = PathPattern::parse("/users/:id").unwrap();
    /// assert_eq!(pattern.nodes()[3], Node::Symbol("id".to_string()));
    /// assert_eq!(pattern.to_string(), "/users/:id");
    /// ```
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let mut parser = Parser {
            pattern,
            chars: pattern.char_indices().peekable(),
        };
        let nodes = parser.parse_sequence(false)?;
        Ok(PathPattern { nodes })
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Names of all `:name` and `*name` parameters, in order of appearance.
    pub fn parameter_names(&self) -> Vec<&str> {
        fn collect<'a>(nodes: &'a [Node], out: &mut Vec<&'a str>) {
            for node in nodes {
                match node {
                    Node::Symbol(name) | Node::Star(name) => out.push(name),
                    Node::Group(children) => collect(children, out),
                    _ => {}
                }
            }
        }

        let mut names = Vec::new();
        collect(&self.nodes, &mut names);
        names
    }

    /// Whether the pattern contains an optional group.
    pub fn has_optional(&self) -> bool {
        self.nodes.iter().any(|node| matches!(node, Node::Group(_)))
    }
}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(f, &self.nodes)
    }
}

fn write_nodes(f: &mut fmt::Formatter<'_>, nodes: &[Node]) -> fmt::Result {
    for node in nodes {
        match node {
            Node::Slash => f.write_str("/")?,
            Node::Dot => f.write_str(".")?,
            Node::Literal(text) => f.write_str(text)?,
            Node::Symbol(name) => write!(f, ":{}", name)?,
            Node::Star(name) => write!(f, "*{}", name)?,
            Node::Group(children) => {
                f.write_str("(")?;
                write_nodes(f, children)?;
                f.write_str(")")?;
            }
        }
    }
    Ok(())
}

struct Parser<'a> {
    pattern: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl Parser<'_> {
    fn parse_sequence(&mut self, in_group: bool) -> Result<Vec<Node>, PatternError> {
        let mut nodes = Vec::new();

        while let Some((position, c)) = self.chars.next() {
            match c {
                '/' => nodes.push(Node::Slash),
                '.' => nodes.push(Node::Dot),
                '(' => nodes.push(Node::Group(self.parse_sequence(true)?)),
                ')' if in_group => return Ok(nodes),
                ')' => {
                    return Err(PatternError::UnexpectedGroupEnd {
                        pattern: self.pattern.to_string(),
                        position,
                    })
                }
                ':' => nodes.push(Node::Symbol(self.parameter_name(position)?)),
                '*' => nodes.push(Node::Star(self.parameter_name(position)?)),
                _ => {
                    let mut text = String::from(c);
                    while let Some(&(_, next)) = self.chars.peek() {
                        if matches!(next, '/' | '.' | '(' | ')' | ':' | '*') {
                            break;
                        }
                        text.push(next);
                        self.chars.next();
                    }
                    nodes.push(Node::Literal(text));
                }
            }
        }

        if in_group {
            return Err(PatternError::UnclosedGroup {
                pattern: self.pattern.to_string(),
            });
        }
        Ok(nodes)
    }

    fn parameter_name(&mut self, position: usize) -> Result<String, PatternError> {
        let mut name = String::new();
        while let Some(&(_, next)) = self.chars.peek() {
            if !(next.is_ascii_alphanumeric() || next == '_') {
                break;
            }
            name.push(next);
            self.chars.next();
        }

        if name.is_empty() {
            return Err(PatternError::EmptyParameter {
                pattern: self.pattern.to_string(),
                position,
            });
        }
        Ok(name)
    }
}

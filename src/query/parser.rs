//! Parser for the `query_string` and `simple_query_string` languages.
//!
//! The parser turns query text into a list of [`Clause`]s. It knows nothing
//! about mappings or analyzers: fields stay names, terms stay raw text, and
//! the DSL translator decides what each node becomes.
//!
//! Supported syntax ([`Syntax::Standard`]):
//! - Terms: `hello`, escapes `foo\:bar`
//! - Field-specific clauses: `title:hello`, `title:(a b)`
//! - Phrases: `"hello world"`, with slop `"hello world"~2`
//! - Required / prohibited: `+required -forbidden`, `NOT x`, `!x`
//! - Boolean operators: `AND`, `OR`, `&&`, `||`, parentheses
//! - Prefix and wildcards: `qu*`, `te?t*`
//! - Regular expressions: `/jo.n/`
//! - Fuzzy terms and boosts: `roam~1`, `title:rust^2`
//! - Ranges: `[1 TO 5]`, `{a TO *}`, `age:>=18`, `date:<2024-01-01`
//!
//! [`Syntax::Simple`] understands `|` (OR), `+` (AND), `-` (NOT), phrases,
//! parentheses, trailing `*` and `~N`, and never fails on bad syntax.
//!
//! # Examples
//!
//! ```
//! use querydsl::query::parser::{Node, QueryParser};
//! use querydsl::query::Occur;
//!
//! let clauses = QueryParser::new().parse("+title:rust -draft").unwrap();
//! assert_eq!(clauses.len(), 2);
//! assert_eq!(clauses[0].occur, Occur::Must);
//! assert!(matches!(&clauses[1].node, Node::Term { text, .. } if text == "draft"));
//! ```

use crate::error::{QueryDslError, Result};
use crate::query::{Boost, Occur, Operator};

/// Default nesting limit for parentheses.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Which query language to parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Syntax {
    /// The full `query_string` language.
    #[default]
    Standard,
    /// The forgiving `simple_query_string` language.
    Simple,
}

/// A node with its occurrence in the enclosing group.
#[derive(Debug, Clone, PartialEq)]
pub struct Clause {
    pub occur: Occur,
    pub node: Node,
}

/// One parsed clause body. A `None` field means "the default fields".
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// `*` or `*:*`.
    MatchAll,
    /// `field:*`.
    Exists { field: String },
    Term {
        field: Option<String>,
        text: String,
        fuzziness: Option<u32>,
        boost: Boost,
    },
    Phrase {
        field: Option<String>,
        text: String,
        slop: u32,
        boost: Boost,
    },
    Prefix {
        field: Option<String>,
        prefix: String,
        boost: Boost,
    },
    Wildcard {
        field: Option<String>,
        pattern: String,
        boost: Boost,
    },
    Regexp {
        field: Option<String>,
        pattern: String,
        boost: Boost,
    },
    /// `[a TO b]`, `{a TO b}` or a comparison; `None` bounds are open.
    Range {
        field: Option<String>,
        lower: Option<String>,
        upper: Option<String>,
        include_lower: bool,
        include_upper: bool,
        boost: Boost,
    },
    Group { clauses: Vec<Clause>, boost: Boost },
}

impl Node {
    fn set_boost(&mut self, value: Boost) {
        match self {
            Node::Term { boost, .. }
            | Node::Phrase { boost, .. }
            | Node::Prefix { boost, .. }
            | Node::Wildcard { boost, .. }
            | Node::Regexp { boost, .. }
            | Node::Range { boost, .. }
            | Node::Group { boost, .. } => *boost = value,
            Node::MatchAll | Node::Exists { .. } => {}
        }
    }
}

/// Query string parser.
#[derive(Debug, Clone)]
pub struct QueryParser {
    syntax: Syntax,
    default_operator: Operator,
    max_depth: usize,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryParser {
    /// A `query_string` parser with the OR default operator.
    pub fn new() -> Self {
        QueryParser {
            syntax: Syntax::Standard,
            default_operator: Operator::Or,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// A `simple_query_string` parser.
    pub fn simple() -> Self {
        QueryParser {
            syntax: Syntax::Simple,
            ..Self::new()
        }
    }

    /// Set the operator joining clauses that have no explicit one.
    pub fn with_default_operator(mut self, operator: Operator) -> Self {
        self.default_operator = operator;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    pub fn default_operator(&self) -> Operator {
        self.default_operator
    }

    /// Parse `text` into top-level clauses. Blank text gives no clauses.
    pub fn parse(&self, text: &str) -> Result<Vec<Clause>> {
        let mut parser = QueryStringParser {
            source: text,
            chars: text.chars().collect(),
            pos: 0,
            syntax: self.syntax,
            default_operator: self.default_operator,
            max_depth: self.max_depth,
        };
        let clauses = parser.parse_clauses(None, 0)?;
        parser.skip_whitespace();
        if parser.pos < parser.chars.len() {
            return Err(parser.error("unexpected ')'"));
        }
        Ok(clauses)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conjunction {
    And,
    Or,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    Required,
    Prohibited,
}

/// Internal parser state.
struct QueryStringParser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
    syntax: Syntax,
    default_operator: Operator,
    max_depth: usize,
}

impl QueryStringParser<'_> {
    fn error(&self, detail: &str) -> QueryDslError {
        QueryDslError::parsing(format!(
            "[query_string] Cannot parse '{}': {detail} at position {}",
            self.source, self.pos
        ))
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn simple(&self) -> bool {
        self.syntax == Syntax::Simple
    }

    /// Whether `keyword` starts here as a whole word.
    fn at_keyword(&self, keyword: &str) -> bool {
        let len = keyword.chars().count();
        keyword.chars().enumerate().all(|(i, c)| self.peek_at(i) == Some(c))
            && self
                .peek_at(len)
                .is_none_or(|c| c.is_whitespace() || c == '(' || c == '"')
    }

    fn is_word_char(&self, c: char) -> bool {
        if c.is_whitespace() {
            return false;
        }
        match self.syntax {
            Syntax::Standard => !matches!(
                c,
                '(' | ')' | ':' | '^' | '~' | '"' | '[' | ']' | '{' | '}' | '/'
            ),
            Syntax::Simple => !matches!(c, '(' | ')' | '|' | '+' | '"' | '~'),
        }
    }

    fn parse_clauses(&mut self, field: Option<&str>, depth: usize) -> Result<Vec<Clause>> {
        if depth > self.max_depth {
            return Err(self.error("query nested too deeply"));
        }

        let mut clauses = Vec::new();
        loop {
            self.skip_whitespace();
            match self.peek() {
                None => break,
                Some(')') if depth > 0 => break,
                Some(')') if self.simple() => {
                    self.pos += 1;
                    continue;
                }
                Some(')') => break,
                _ => {}
            }

            let conjunction = self.parse_conjunction();
            self.skip_whitespace();
            if conjunction.is_some() {
                if clauses.is_empty() && !self.simple() {
                    return Err(self.error("operator without a left-hand clause"));
                }
                if self.peek().is_none_or(|c| c == ')') {
                    if self.simple() {
                        continue;
                    }
                    return Err(self.error("operator without a right-hand clause"));
                }
            }

            let modifier = self.parse_modifier();
            self.skip_whitespace();
            if self.peek().is_none_or(|c| c == ')') {
                if self.simple() {
                    continue;
                }
                return Err(self.error("modifier without a clause"));
            }

            match self.parse_clause(field, depth)? {
                Some(node) => self.add_clause(&mut clauses, conjunction, modifier, node),
                None => continue,
            }
        }
        Ok(clauses)
    }

    fn parse_conjunction(&mut self) -> Option<Conjunction> {
        let conjunction = match self.syntax {
            Syntax::Standard => {
                if self.at_keyword("AND") {
                    self.pos += 3;
                    Conjunction::And
                } else if self.at_keyword("OR") {
                    self.pos += 2;
                    Conjunction::Or
                } else if self.peek() == Some('&') && self.peek_at(1) == Some('&') {
                    self.pos += 2;
                    Conjunction::And
                } else if self.peek() == Some('|') && self.peek_at(1) == Some('|') {
                    self.pos += 2;
                    Conjunction::Or
                } else {
                    return None;
                }
            }
            Syntax::Simple => {
                if self.eat('|') {
                    Conjunction::Or
                } else if self.eat('+') {
                    Conjunction::And
                } else {
                    return None;
                }
            }
        };
        Some(conjunction)
    }

    fn parse_modifier(&mut self) -> Option<Modifier> {
        match self.peek() {
            Some('-') => {
                self.pos += 1;
                Some(Modifier::Prohibited)
            }
            Some('+') if !self.simple() => {
                self.pos += 1;
                Some(Modifier::Required)
            }
            Some('!') if !self.simple() => {
                self.pos += 1;
                Some(Modifier::Prohibited)
            }
            _ if !self.simple() && self.at_keyword("NOT") => {
                self.pos += 3;
                Some(Modifier::Prohibited)
            }
            _ => None,
        }
    }

    /// Lucene's clause occurrence rules: an explicit conjunction may also
    /// change the occurrence of the previous clause.
    fn add_clause(
        &self,
        clauses: &mut Vec<Clause>,
        conjunction: Option<Conjunction>,
        modifier: Option<Modifier>,
        node: Node,
    ) {
        if let Some(last) = clauses.last_mut() {
            if last.occur != Occur::MustNot {
                match (conjunction, self.default_operator) {
                    (Some(Conjunction::And), _) => last.occur = Occur::Must,
                    (Some(Conjunction::Or), Operator::And) => last.occur = Occur::Should,
                    _ => {}
                }
            }
        }

        let prohibited = modifier == Some(Modifier::Prohibited);
        let required = match self.default_operator {
            Operator::Or => {
                modifier == Some(Modifier::Required)
                    || (conjunction == Some(Conjunction::And) && !prohibited)
            }
            Operator::And => !prohibited && conjunction != Some(Conjunction::Or),
        };
        let occur = if prohibited {
            Occur::MustNot
        } else if required {
            Occur::Must
        } else {
            Occur::Should
        };
        clauses.push(Clause { occur, node });
    }

    fn parse_clause(&mut self, inherited: Option<&str>, depth: usize) -> Result<Option<Node>> {
        let mut field = inherited.map(str::to_string);
        if !self.simple() {
            let start = self.pos;
            let (name, _) = self.read_word();
            if !name.is_empty() && self.peek() == Some(':') {
                self.pos += 1;
                self.skip_whitespace();
                field = Some(name);
            } else {
                self.pos = start;
            }
        }

        let mut node = match self.peek() {
            Some('(') => {
                self.pos += 1;
                let clauses = self.parse_clauses(field.as_deref(), depth + 1)?;
                self.skip_whitespace();
                if !self.eat(')') && !self.simple() {
                    return Err(self.error("missing ')'"));
                }
                Node::Group {
                    clauses,
                    boost: Boost::UNSET,
                }
            }
            Some('"') => self.parse_phrase(field)?,
            Some('/') if !self.simple() => self.parse_regexp(field)?,
            Some('[') | Some('{') if !self.simple() => self.parse_range(field)?,
            Some('>') | Some('<') if !self.simple() => self.parse_comparison(field)?,
            _ => match self.parse_term(field)? {
                Some(node) => node,
                None => return Ok(None),
            },
        };

        if !self.simple() && self.eat('^') {
            let boost = self
                .read_number()
                .filter(|_| !self.peek().is_some_and(char::is_alphanumeric))
                .ok_or_else(|| self.error("invalid boost"))?;
            node.set_boost(Boost::new(boost));
        }
        Ok(Some(node))
    }

    /// Read a bare word, unescaping it. The second value marks the
    /// characters that were escaped.
    fn read_word(&mut self) -> (String, Vec<bool>) {
        let mut text = String::new();
        let mut escaped = Vec::new();
        while let Some(c) = self.peek() {
            if c == '\\' {
                match self.peek_at(1) {
                    Some(next) => {
                        text.push(next);
                        escaped.push(true);
                        self.pos += 2;
                    }
                    None => {
                        self.pos += 1;
                    }
                }
                continue;
            }
            if !self.is_word_char(c) {
                break;
            }
            // A conjunction glued to a word still ends it.
            if !self.simple() && ((c == '&' && self.peek_at(1) == Some('&')) || (c == '|' && self.peek_at(1) == Some('|'))) {
                break;
            }
            text.push(c);
            escaped.push(false);
            self.pos += 1;
        }
        (text, escaped)
    }

    fn read_number(&mut self) -> Option<f64> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == '.') {
            self.pos += 1;
        }
        let number: String = self.chars[start..self.pos].iter().collect();
        number.parse().ok()
    }

    fn parse_term(&mut self, field: Option<String>) -> Result<Option<Node>> {
        let (text, escaped) = self.read_word();
        if text.is_empty() {
            if self.simple() {
                // Stray operator character: skip it.
                self.pos += 1;
                return Ok(None);
            }
            return Err(match self.peek() {
                Some(c) => self.error(&format!("unexpected '{c}'")),
                None => self.error("unexpected end of query"),
            });
        }

        let fuzziness = if self.eat('~') {
            Some(self.read_number().map_or(2, |n| n.clamp(0.0, 2.0) as u32))
        } else {
            None
        };

        let wildcard = |c: &char| *c == '*' || (*c == '?' && self.syntax == Syntax::Standard);
        let chars: Vec<char> = text.chars().collect();
        let unescaped_wildcards: Vec<usize> = chars
            .iter()
            .enumerate()
            .filter(|(i, c)| wildcard(c) && !escaped[*i])
            .map(|(i, _)| i)
            .collect();

        let node = match unescaped_wildcards.as_slice() {
            _ if fuzziness.is_some() => Node::Term {
                field,
                text,
                fuzziness,
                boost: Boost::UNSET,
            },
            [] => Node::Term {
                field,
                text,
                fuzziness: None,
                boost: Boost::UNSET,
            },
            [0] if chars.len() == 1 => match field {
                Some(field) if field != "*" => Node::Exists { field },
                _ => Node::MatchAll,
            },
            [last] if *last == chars.len() - 1 && chars[*last] == '*' => Node::Prefix {
                field,
                prefix: chars[..*last].iter().collect(),
                boost: Boost::UNSET,
            },
            _ if self.simple() => Node::Term {
                field,
                text,
                fuzziness: None,
                boost: Boost::UNSET,
            },
            _ => {
                // Re-escape literal wildcard characters for the pattern.
                let pattern = chars
                    .iter()
                    .zip(&escaped)
                    .map(|(c, escaped)| match (c, escaped) {
                        ('*' | '?' | '\\', true) => format!("\\{c}"),
                        _ => c.to_string(),
                    })
                    .collect();
                Node::Wildcard {
                    field,
                    pattern,
                    boost: Boost::UNSET,
                }
            }
        };
        Ok(Some(node))
    }

    fn parse_phrase(&mut self, field: Option<String>) -> Result<Node> {
        self.pos += 1;
        let mut text = String::new();
        loop {
            match self.peek() {
                Some('"') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') if self.peek_at(1).is_some() => {
                    text.extend(self.peek_at(1));
                    self.pos += 2;
                }
                Some(c) => {
                    text.push(c);
                    self.pos += 1;
                }
                None if self.simple() => break,
                None => return Err(self.error("unterminated phrase")),
            }
        }

        let slop = if self.eat('~') {
            self.read_number().map_or(0, |n| n.max(0.0) as u32)
        } else {
            0
        };
        Ok(Node::Phrase {
            field,
            text,
            slop,
            boost: Boost::UNSET,
        })
    }

    fn parse_regexp(&mut self, field: Option<String>) -> Result<Node> {
        self.pos += 1;
        let mut pattern = String::new();
        loop {
            match self.peek() {
                Some('/') => {
                    self.pos += 1;
                    break;
                }
                Some('\\') if self.peek_at(1) == Some('/') => {
                    pattern.push('/');
                    self.pos += 2;
                }
                Some(c) => {
                    pattern.push(c);
                    self.pos += 1;
                }
                None => return Err(self.error("unterminated regular expression")),
            }
        }
        Ok(Node::Regexp {
            field,
            pattern,
            boost: Boost::UNSET,
        })
    }

    fn read_bound(&mut self) -> Result<Option<String>> {
        self.skip_whitespace();
        let bound = if self.peek() == Some('"') {
            match self.parse_phrase(None)? {
                Node::Phrase { text, .. } => text,
                _ => String::new(),
            }
        } else {
            let mut text = String::new();
            while let Some(c) = self.peek() {
                if c.is_whitespace() || c == ']' || c == '}' {
                    break;
                }
                if c == '\\' && self.peek_at(1).is_some() {
                    text.extend(self.peek_at(1));
                    self.pos += 2;
                    continue;
                }
                text.push(c);
                self.pos += 1;
            }
            text
        };
        if bound.is_empty() {
            return Err(self.error("missing range bound"));
        }
        Ok((bound != "*").then_some(bound))
    }

    fn parse_range(&mut self, field: Option<String>) -> Result<Node> {
        let include_lower = self.peek() == Some('[');
        self.pos += 1;
        let lower = self.read_bound()?;
        self.skip_whitespace();
        if !self.at_keyword("TO") {
            return Err(self.error("expected 'TO' in range"));
        }
        self.pos += 2;
        let upper = self.read_bound()?;
        self.skip_whitespace();
        let include_upper = match self.peek() {
            Some(']') => true,
            Some('}') => false,
            _ => return Err(self.error("unterminated range")),
        };
        self.pos += 1;
        Ok(Node::Range {
            field,
            lower,
            upper,
            include_lower,
            include_upper,
            boost: Boost::UNSET,
        })
    }

    fn parse_comparison(&mut self, field: Option<String>) -> Result<Node> {
        let greater = self.peek() == Some('>');
        self.pos += 1;
        let inclusive = self.eat('=');
        let (value, _) = self.read_word();
        if value.is_empty() {
            return Err(self.error("missing comparison value"));
        }
        let value = (value != "*").then_some(value);
        let (lower, upper) = if greater { (value, None) } else { (None, value) };
        Ok(Node::Range {
            field,
            lower,
            upper,
            include_lower: greater && inclusive,
            include_upper: !greater && inclusive,
            boost: Boost::UNSET,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(field: Option<&str>, text: &str) -> Node {
        Node::Term {
            field: field.map(str::to_string),
            text: text.to_string(),
            fuzziness: None,
            boost: Boost::UNSET,
        }
    }

    fn occurs(clauses: &[Clause]) -> Vec<Occur> {
        clauses.iter().map(|c| c.occur).collect()
    }

    #[test]
    fn test_parse_simple_term() {
        let clauses = QueryParser::new().parse("hello").unwrap();
        assert_eq!(
            clauses,
            vec![Clause {
                occur: Occur::Should,
                node: term(None, "hello")
            }]
        );
    }

    #[test]
    fn test_parse_empty_query() {
        assert!(QueryParser::new().parse("").unwrap().is_empty());
        assert!(QueryParser::new().parse("   ").unwrap().is_empty());
    }

    #[test]
    fn test_parse_field_term() {
        let clauses = QueryParser::new().parse("title:hello").unwrap();
        assert_eq!(clauses[0].node, term(Some("title"), "hello"));
    }

    #[test]
    fn test_parse_boolean_and() {
        let clauses = QueryParser::new().parse("title:hello AND body:world").unwrap();
        assert_eq!(occurs(&clauses), vec![Occur::Must, Occur::Must]);
    }

    #[test]
    fn test_parse_boolean_or_with_and_default() {
        let parser = QueryParser::new().with_default_operator(Operator::And);
        let clauses = parser.parse("a OR b c").unwrap();
        assert_eq!(occurs(&clauses), vec![Occur::Should, Occur::Should, Occur::Must]);
    }

    #[test]
    fn test_implicit_operator() {
        let clauses = QueryParser::new().parse("a b").unwrap();
        assert_eq!(occurs(&clauses), vec![Occur::Should, Occur::Should]);

        let parser = QueryParser::new().with_default_operator(Operator::And);
        let clauses = parser.parse("a b").unwrap();
        assert_eq!(occurs(&clauses), vec![Occur::Must, Occur::Must]);
    }

    #[test]
    fn test_mixed_operators() {
        let clauses = QueryParser::new()
            .parse("+title:required -title:forbidden NOT x !y title:optional")
            .unwrap();
        assert_eq!(
            occurs(&clauses),
            vec![
                Occur::Must,
                Occur::MustNot,
                Occur::MustNot,
                Occur::MustNot,
                Occur::Should
            ]
        );
        assert_eq!(clauses[4].node, term(Some("title"), "optional"));
    }

    #[test]
    fn test_and_keeps_prohibited() {
        let clauses = QueryParser::new().parse("-a AND b").unwrap();
        assert_eq!(occurs(&clauses), vec![Occur::MustNot, Occur::Must]);
    }

    #[test]
    fn test_symbolic_operators() {
        let clauses = QueryParser::new().parse("a && b || c").unwrap();
        assert_eq!(occurs(&clauses), vec![Occur::Must, Occur::Must, Occur::Should]);
    }

    #[test]
    fn test_group_inherits_field() {
        let clauses = QueryParser::new()
            .parse("title:(quick OR \"brown fox\")^2")
            .unwrap();
        let Node::Group { clauses: inner, boost } = &clauses[0].node else {
            panic!("expected a group");
        };
        assert_eq!(boost.value(), Some(2.0));
        assert_eq!(inner[0].node, term(Some("title"), "quick"));
        assert!(matches!(
            &inner[1].node,
            Node::Phrase { field: Some(f), text, slop: 0, .. } if f == "title" && text == "brown fox"
        ));
    }

    #[test]
    fn test_phrase_slop_and_boost() {
        let clauses = QueryParser::new().parse("\"hello world\"~3^1.5").unwrap();
        assert_eq!(
            clauses[0].node,
            Node::Phrase {
                field: None,
                text: "hello world".to_string(),
                slop: 3,
                boost: Boost::new(1.5)
            }
        );
    }

    #[test]
    fn test_wildcards() {
        let clauses = QueryParser::new().parse("qu* te?t* a\\*b *:* name:*").unwrap();
        assert!(matches!(&clauses[0].node, Node::Prefix { prefix, .. } if prefix == "qu"));
        assert!(matches!(&clauses[1].node, Node::Wildcard { pattern, .. } if pattern == "te?t*"));
        assert_eq!(clauses[2].node, term(None, "a*b"));
        assert_eq!(clauses[3].node, Node::MatchAll);
        assert_eq!(
            clauses[4].node,
            Node::Exists {
                field: "name".to_string()
            }
        );
    }

    #[test]
    fn test_fuzzy_and_regexp() {
        let clauses = QueryParser::new().parse("roam~1 color~ name:/jo.n/").unwrap();
        assert!(matches!(&clauses[0].node, Node::Term { fuzziness: Some(1), .. }));
        assert!(matches!(&clauses[1].node, Node::Term { fuzziness: Some(2), .. }));
        assert!(matches!(
            &clauses[2].node,
            Node::Regexp { field: Some(f), pattern, .. } if f == "name" && pattern == "jo.n"
        ));
    }

    #[test]
    fn test_ranges() {
        let clauses = QueryParser::new()
            .parse("age:[18 TO 65} count:{* TO 10] age:>=21 price:<5")
            .unwrap();
        assert_eq!(
            clauses[0].node,
            Node::Range {
                field: Some("age".to_string()),
                lower: Some("18".to_string()),
                upper: Some("65".to_string()),
                include_lower: true,
                include_upper: false,
                boost: Boost::UNSET
            }
        );
        assert!(matches!(
            &clauses[1].node,
            Node::Range { lower: None, upper: Some(u), include_upper: true, .. } if u == "10"
        ));
        assert!(matches!(
            &clauses[2].node,
            Node::Range { lower: Some(l), upper: None, include_lower: true, .. } if l == "21"
        ));
        assert!(matches!(
            &clauses[3].node,
            Node::Range { lower: None, upper: Some(u), include_upper: false, .. } if u == "5"
        ));
    }

    #[test]
    fn test_hyphenated_term() {
        let clauses = QueryParser::new().parse("wi-fi").unwrap();
        assert_eq!(clauses[0].node, term(None, "wi-fi"));
    }

    #[test]
    fn test_syntax_errors() {
        let parser = QueryParser::new();
        for bad in ["(a b", "a)", "\"open", "AND a", "a OR", "[1 TO", "x^", "/abc", "a^1e5", "a^2x"] {
            let err = parser.parse(bad).unwrap_err();
            assert!(
                err.reason().starts_with("[query_string] Cannot parse"),
                "{bad}: {}",
                err.reason()
            );
        }
    }

    #[test]
    fn test_depth_limit() {
        let parser = QueryParser::new().with_max_depth(2);
        assert!(parser.parse("((a))").is_ok());
        let err = parser.parse("(((a)))").unwrap_err();
        assert!(err.reason().contains("nested too deeply"));
    }

    #[test]
    fn test_simple_syntax() {
        let parser = QueryParser::simple();
        let clauses = parser.parse("fox + dog | -cat \"big bird\" qu*").unwrap();
        assert_eq!(
            occurs(&clauses),
            vec![
                Occur::Must,
                Occur::Must,
                Occur::MustNot,
                Occur::Should,
                Occur::Should
            ]
        );
        assert_eq!(clauses[0].node, term(None, "fox"));
        assert!(matches!(&clauses[3].node, Node::Phrase { text, .. } if text == "big bird"));
        assert!(matches!(&clauses[4].node, Node::Prefix { prefix, .. } if prefix == "qu"));
    }

    #[test]
    fn test_simple_syntax_is_lenient() {
        let parser = QueryParser::simple();
        let clauses = parser.parse("(a b \"open").unwrap();
        assert_eq!(clauses.len(), 1);
        let Node::Group { clauses: inner, .. } = &clauses[0].node else {
            panic!("expected a group");
        };
        assert_eq!(inner.len(), 3);
        assert!(matches!(&inner[2].node, Node::Phrase { text, .. } if text == "open"));

        let clauses = parser.parse("a) | title:x?").unwrap();
        assert_eq!(clauses.len(), 2);
        assert_eq!(clauses[1].node, term(None, "title:x?"));
    }
}

use std::fmt;
use std::path::Path;
use std::str::{FromStr, SplitAsciiWhitespace};

use itertools::Itertools;

use crate::error::{ConfigError, Error, ModelError, ParseError};
use crate::incidence::{Cost, IncidenceModel};

/// The two OR-Library encodings of a set cover instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `N M`, the M set costs, then per element a count and its 1-based sets.
    Rows,
    /// `N M`, then per set its cost, a count and its 1-based elements.
    Cols,
}

impl FromStr for Layout {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Layout, ConfigError> {
        match s {
            "rows" => Ok(Layout::Rows),
            "cols" | "columns" => Ok(Layout::Cols),
            _ => Err(ConfigError::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Layout::Rows => write!(f, "rows"),
            Layout::Cols => write!(f, "cols"),
        }
    }
}

/// Largest element or set count a header may declare.
pub const MAX_COUNT: usize = i32::MAX as usize;

/// Cursor over the whitespace separated integers of an instance.
pub struct TokenStream<'a> {
    tokens: SplitAsciiWhitespace<'a>,
    position: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(input: &'a str) -> TokenStream<'a> {
        TokenStream { tokens: input.split_ascii_whitespace(), position: 0 }
    }

    /// Index of the next token to be read.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn next_u64(&mut self, expected: &'static str) -> Result<u64, ParseError> {
        let position = self.position;
        let token = self.tokens.next().ok_or(ParseError::UnexpectedEnd { expected, position })?;
        self.position += 1;
        token
            .parse::<u64>()
            .map_err(|_| ParseError::InvalidToken { token: token.to_string(), expected, position })
    }

    pub fn next_usize(&mut self, expected: &'static str) -> Result<usize, ParseError> {
        let position = self.position;
        let value = self.next_u64(expected)?;
        usize::try_from(value)
            .map_err(|_| ParseError::InvalidToken { token: value.to_string(), expected, position })
    }

    /// Reads a header count, at most [`MAX_COUNT`].
    pub fn next_count(&mut self, what: &'static str) -> Result<usize, ParseError> {
        let position = self.position;
        let value = self.next_usize(what)?;
        if value > MAX_COUNT {
            return Err(ParseError::CountTooLarge { what, value, max: MAX_COUNT, position });
        }
        Ok(value)
    }

    pub fn next_cost(&mut self) -> Result<Cost, ParseError> {
        let position = self.position;
        let expected = "set cost";
        let value = self.next_u64(expected)?;
        Cost::try_from(value).map_err(|_| ParseError::InvalidToken { token: value.to_string(), expected, position })
    }

    /// Reads a 1-based index in `1..=max` and returns it 0-based.
    pub fn next_index(&mut self, kind: &'static str, max: usize) -> Result<usize, ParseError> {
        let position = self.position;
        let index = self.next_u64(kind)?;
        if index == 0 || index > max as u64 {
            return Err(ParseError::IndexOutOfRange { kind, index, max, position });
        }
        Ok(index as usize - 1)
    }

    /// Fails if any token is left.
    pub fn finish(mut self) -> Result<(), ParseError> {
        match self.tokens.next() {
            None => Ok(()),
            Some(token) => Err(ParseError::TrailingToken { token: token.to_string(), position: self.position }),
        }
    }
}

/// Parses an instance given as text in the given layout.
///
/// Storage grows with the tokens actually read, never with the header alone.
/// A `cols` header may declare more elements than the whole stream has
/// tokens; such an instance cannot be covered and is rejected naming the
/// first element no set contains, without building the model.
pub fn parse_instance(input: &str, layout: Layout) -> Result<IncidenceModel, Error> {
    let mut tokens = TokenStream::new(input);
    let n = tokens.next_count("number of elements")?;
    let m = tokens.next_count("number of sets")?;
    let mut costs: Vec<Cost> = Vec::new();
    let mut memberships: Vec<(usize, usize)> = Vec::new();
    match layout {
        Layout::Rows => {
            for _ in 0..m {
                costs.push(tokens.next_cost()?);
            }
            for e in 0..n {
                let k = tokens.next_usize("number of sets containing the element")?;
                for _ in 0..k {
                    let s = tokens.next_index("set", m)?;
                    memberships.push((e, s));
                }
            }
        }
        Layout::Cols => {
            for s in 0..m {
                costs.push(tokens.next_cost()?);
                let k = tokens.next_usize("number of elements in the set")?;
                for _ in 0..k {
                    let e = tokens.next_index("element", n)?;
                    memberships.push((e, s));
                }
            }
        }
    }
    let read = tokens.position();
    tokens.finish()?;
    if n > read {
        let element = first_uncovered(&memberships);
        tracing::error!("No set contains element {}", element + 1);
        return Err(ModelError::Infeasible { elements: vec![element] }.into());
    }
    let model = IncidenceModel::from_memberships(n, costs, memberships)?;
    tracing::debug!(n = model.n, m = model.m, incidences = model.incidences(), %layout, "parsed instance");
    Ok(model)
}

// smallest element index missing from the memberships
fn first_uncovered(memberships: &[(usize, usize)]) -> usize {
    let elements: Vec<usize> = memberships.iter().map(|(e, _)| *e).sorted_unstable().dedup().collect();
    elements.iter().enumerate().find(|(i, e)| *i != **e).map_or(elements.len(), |(i, _)| i)
}

/// Reads and parses an instance file.
pub fn read_instance(path: impl AsRef<Path>, layout: Layout) -> Result<IncidenceModel, Error> {
    let path = path.as_ref();
    tracing::debug!("Reading instance from {}", path.display());
    let input = std::fs::read_to_string(path)?;
    parse_instance(&input, layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_err(input: &str, layout: Layout) -> ParseError {
        match parse_instance(input, layout) {
            Err(Error::Parse(e)) => e,
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn both_layouts_describe_the_same_model() {
        // set 1 (cost 2) = {1, 2}, set 2 (cost 1) = {2, 3}
        let rows = "3 2\n2 1\n1\n1\n2\n1 2\n1\n2\n";
        let cols = "3 2\n2 2 1 2\n1 2 2 3\n";
        let a = parse_instance(rows, Layout::Rows).unwrap();
        let b = parse_instance(cols, Layout::Cols).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.costs, vec![2, 1]);
        assert_eq!(a.elements_of(0), &[0, 1]);
        assert_eq!(a.sets_of(1), &[0, 1]);
    }

    #[test]
    fn layout_names() {
        assert_eq!("rows".parse::<Layout>(), Ok(Layout::Rows));
        assert_eq!("cols".parse::<Layout>(), Ok(Layout::Cols));
        assert_eq!("columns".parse::<Layout>(), Ok(Layout::Cols));
        assert_eq!("csv".parse::<Layout>(), Err(ConfigError::UnknownLayout("csv".into())));
        assert_eq!(Layout::Cols.to_string(), "cols");
    }

    #[test]
    fn truncated_stream() {
        assert_eq!(
            parse_err("2 1\n5 2 1", Layout::Cols),
            ParseError::UnexpectedEnd { expected: "element", position: 5 }
        );
        assert_eq!(
            parse_err("", Layout::Rows),
            ParseError::UnexpectedEnd { expected: "number of elements", position: 0 }
        );
    }

    #[test]
    fn out_of_range_indices() {
        assert_eq!(
            parse_err("2 1\n5 1 3", Layout::Cols),
            ParseError::IndexOutOfRange { kind: "element", index: 3, max: 2, position: 4 }
        );
        assert_eq!(
            parse_err("1 1\n5\n1 0", Layout::Rows),
            ParseError::IndexOutOfRange { kind: "set", index: 0, max: 1, position: 4 }
        );
    }

    #[test]
    fn rejects_garbage_and_leftovers() {
        assert_eq!(
            parse_err("1 1 x", Layout::Rows),
            ParseError::InvalidToken { token: "x".into(), expected: "set cost", position: 2 }
        );
        assert_eq!(
            parse_err("1 1 -3", Layout::Rows),
            ParseError::InvalidToken { token: "-3".into(), expected: "set cost", position: 2 }
        );
        assert_eq!(
            parse_err("1 1\n4 1 1\n9", Layout::Cols),
            ParseError::TrailingToken { token: "9".into(), position: 5 }
        );
    }

    #[test]
    fn cost_must_fit() {
        assert_eq!(
            parse_err("1 1\n4294967296 1 1", Layout::Cols),
            ParseError::InvalidToken { token: "4294967296".into(), expected: "set cost", position: 2 }
        );
    }

    #[test]
    fn oversized_header_counts() {
        assert_eq!(
            parse_err("1 4611686018427387904", Layout::Cols),
            ParseError::CountTooLarge {
                what: "number of sets",
                value: 4_611_686_018_427_387_904,
                max: MAX_COUNT,
                position: 1
            }
        );
        assert_eq!(
            parse_err("1000000000000000000 0", Layout::Cols),
            ParseError::CountTooLarge {
                what: "number of elements",
                value: 1_000_000_000_000_000_000,
                max: MAX_COUNT,
                position: 0
            }
        );
        assert_eq!(
            parse_err("1000000000000000000 0", Layout::Rows),
            ParseError::CountTooLarge {
                what: "number of elements",
                value: 1_000_000_000_000_000_000,
                max: MAX_COUNT,
                position: 0
            }
        );
    }

    #[test]
    fn large_header_with_short_stream() {
        assert_eq!(
            parse_err("1 2147483647", Layout::Cols),
            ParseError::UnexpectedEnd { expected: "set cost", position: 2 }
        );
        assert_eq!(
            parse_err("2147483647 1\n3", Layout::Rows),
            ParseError::UnexpectedEnd { expected: "number of sets containing the element", position: 3 }
        );
    }

    #[test]
    fn more_elements_than_tokens_is_infeasible() {
        match parse_instance("2147483647 0", Layout::Cols) {
            Err(Error::Model(ModelError::Infeasible { elements })) => assert_eq!(elements, vec![0]),
            other => panic!("expected infeasible instance, got {:?}", other),
        }
        // elements 1 and 2 are covered, 3 is the first gap
        match parse_instance("100 2\n4 2 2 1\n1 1 2", Layout::Cols) {
            Err(Error::Model(ModelError::Infeasible { elements })) => assert_eq!(elements, vec![2]),
            other => panic!("expected infeasible instance, got {:?}", other),
        }
    }

    #[test]
    fn parsing_does_not_check_feasibility() {
        let g = parse_instance("2 1\n1 1 1\n", Layout::Cols).unwrap();
        assert_eq!(g.uncovered_elements(), vec![1]);
    }
}

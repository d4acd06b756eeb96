//! Line splitting and field conversion shared by all table readers.
//!
//! A table is plain text with one record per line. Fields are separated by
//! tabs or commas and trimmed of surrounding spaces. Blank lines and lines
//! starting with `#` are skipped. Line numbers are 1-based and count every
//! physical line, skipped ones included.

use winnow::{
    Parser as _,
    ascii::{dec_uint, float},
    combinator::separated,
    error::{ContextError, ErrMode},
    token::{one_of, take_till},
};

use bioplot_core::{color::Color, model::MarkerSymbol};

use crate::error::{Diagnostic, ErrorCode};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

const DELIMITERS: [char; 2] = ['\t', ','];

const COMMENT_PREFIX: char = '#';

/// One non-blank, non-comment line split into fields.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Row<'src> {
    line: usize,
    fields: Vec<&'src str>,
}

/// Parse a single field up to the next delimiter
fn field<'src>(input: &mut &'src str) -> IResult<&'src str> {
    take_till(0.., DELIMITERS).map(str::trim).parse_next(input)
}

/// Parse all delimiter-separated fields of a line
fn fields<'src>(input: &mut &'src str) -> IResult<Vec<&'src str>> {
    separated(1.., field, one_of(DELIMITERS)).parse_next(input)
}

fn integer(input: &mut &str) -> IResult<u64> {
    dec_uint.parse_next(input)
}

fn number(input: &mut &str) -> IResult<f64> {
    float.parse_next(input)
}

/// Runs `parser` over the whole of `text`, rejecting leftovers.
fn parse_complete<O>(text: &str, mut parser: impl FnMut(&mut &str) -> IResult<O>) -> Option<O> {
    let mut input = text;
    let value = parser(&mut input).ok()?;
    input.is_empty().then_some(value)
}

/// Splits `src` into rows, skipping blank and comment lines.
pub(crate) fn rows(src: &str) -> impl Iterator<Item = Result<Row<'_>, Diagnostic>> {
    src.lines().enumerate().filter_map(|(index, text)| {
        let line = index + 1;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            return None;
        }

        let mut input = trimmed;
        Some(match fields(&mut input) {
            Ok(fields) if input.is_empty() => Ok(Row { line, fields }),
            _ => Err(Diagnostic::error("cannot split line into fields")
                .with_code(ErrorCode::E100)
                .at_line(line)),
        })
    })
}

impl<'src> Row<'src> {
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    /// Checks the column count against a layout such as `id, length`.
    pub(crate) fn expect_columns(&self, layout: &[&str]) -> Result<(), Diagnostic> {
        if self.fields.len() == layout.len() {
            return Ok(());
        }
        Err(Diagnostic::error(format!(
            "expected {} columns, found {}",
            layout.len(),
            self.fields.len()
        ))
        .with_code(ErrorCode::E100)
        .at_line(self.line)
        .with_help(format!(
            "rows of this table read `{}`, separated by tabs or commas",
            layout.join(", ")
        )))
    }

    /// Returns the chromosome id in the first column.
    pub(crate) fn id(&self) -> Result<&'src str, Diagnostic> {
        match self.fields.first() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(Diagnostic::error("missing chromosome id")
                .with_code(ErrorCode::E100)
                .at_line(self.line)),
        }
    }

    fn text(&self, column: usize) -> &'src str {
        self.fields.get(column).copied().unwrap_or_default()
    }

    /// Parses a base-pair count.
    pub(crate) fn integer(&self, column: usize, name: &str) -> Result<u64, Diagnostic> {
        let text = self.text(column);
        parse_complete(text, integer).ok_or_else(|| {
            Diagnostic::error(format!("invalid {name} `{text}`"))
                .with_code(ErrorCode::E101)
                .at_line(self.line)
                .with_help(format!("{name} must be a whole number of base pairs"))
        })
    }

    /// Parses a finite decimal value.
    pub(crate) fn number(&self, column: usize, name: &str) -> Result<f64, Diagnostic> {
        let text = self.text(column);
        parse_complete(text, number)
            .filter(|value| value.is_finite())
            .ok_or_else(|| {
                Diagnostic::error(format!("invalid {name} `{text}`"))
                    .with_code(ErrorCode::E102)
                    .at_line(self.line)
                    .with_help(format!("{name} must be a finite decimal number"))
            })
    }

    pub(crate) fn color(&self, column: usize) -> Result<Color, Diagnostic> {
        Color::new(self.text(column)).map_err(|err| {
            Diagnostic::error(err)
                .with_code(ErrorCode::E103)
                .at_line(self.line)
        })
    }

    pub(crate) fn marker(&self, column: usize) -> Result<MarkerSymbol, Diagnostic> {
        self.text(column).parse().map_err(|err: String| {
            Diagnostic::error(err)
                .with_code(ErrorCode::E104)
                .at_line(self.line)
        })
    }
}

//! Readers for the chromosome, centromere, order and annotation tables.

use indexmap::IndexMap;
use log::{debug, info};

use bioplot_core::model::{Annotation, Chromosome, Mark, Marker, Panel, Track, ValueType};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode, ParseError},
    row::{Row, rows},
};

const LENGTH_LAYOUT: &[&str] = &["id", "length"];
const CENTROMERE_LAYOUT: &[&str] = &["id", "position"];
const ORDER_LAYOUT: &[&str] = &["id"];
const NUMERIC_LAYOUT: &[&str] = &["id", "start", "end", "value"];
const COLOR_LAYOUT: &[&str] = &["id", "start", "end", "color"];
const MARKER_LAYOUT: &[&str] = &["id", "start", "end", "marker", "color"];

/// A value keyed by chromosome id, remembering the line it came from.
#[derive(Debug, Clone, Copy)]
struct Keyed {
    line: usize,
    value: u64,
}

fn duplicate(id: &str, line: usize, first_line: usize) -> Diagnostic {
    Diagnostic::error(format!("chromosome `{id}` listed twice"))
        .with_code(ErrorCode::E200)
        .at_line(line)
        .with_help(format!("first listed on line {first_line}"))
}

/// Reads an `id, integer` table, reporting malformed and duplicate rows.
fn read_keyed(
    src: &str,
    layout: &[&str],
    collector: &mut DiagnosticCollector,
) -> IndexMap<String, Keyed> {
    let mut table: IndexMap<String, Keyed> = IndexMap::new();

    for row in rows(src) {
        let parsed = row.and_then(|row| {
            row.expect_columns(layout)?;
            let id = row.id()?;
            let value = row.integer(1, layout[1])?;
            Ok((row.line(), id, value))
        });

        match parsed {
            Ok((line, id, value)) => {
                if let Some(first) = table.get(id) {
                    collector.emit(duplicate(id, line, first.line));
                    continue;
                }
                table.insert(id.to_string(), Keyed { line, value });
            }
            Err(diagnostic) => collector.emit(diagnostic),
        }
    }

    table
}

/// Reads a chromosome length table.
///
/// Each row is `id, length`. Ids must be unique and lengths positive. The
/// returned map keeps file order.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying one diagnostic per broken row.
///
/// # Examples
///
/// ```
/// let lengths = bioplot_parser::parse_chromosome_lengths("Chr01\t2000000\nChr02\t1800000\n")?;
/// assert_eq!(lengths["Chr02"], 1_800_000);
/// # Ok::<(), bioplot_parser::error::ParseError>(())
/// ```
pub fn parse_chromosome_lengths(src: &str) -> Result<IndexMap<String, u64>, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let table = read_keyed(src, LENGTH_LAYOUT, &mut collector);

    let mut lengths = IndexMap::with_capacity(table.len());
    for (id, keyed) in table {
        if keyed.value == 0 {
            collector.emit(
                Diagnostic::error(format!("chromosome `{id}` must have a positive length"))
                    .with_code(ErrorCode::E202)
                    .at_line(keyed.line),
            );
            continue;
        }
        lengths.insert(id, keyed.value);
    }

    debug!(chromosomes = lengths.len(); "Read chromosome lengths");
    collector.finish(lengths)
}

/// Reads a centromere table of `id, position` rows.
///
/// Positions are not checked against lengths here; see [`parse_panel`].
///
/// # Errors
///
/// Returns a [`ParseError`] carrying one diagnostic per broken row.
pub fn parse_centromeres(src: &str) -> Result<IndexMap<String, u64>, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let centromeres = read_keyed(src, CENTROMERE_LAYOUT, &mut collector)
        .into_iter()
        .map(|(id, keyed)| (id, keyed.value))
        .collect::<IndexMap<_, _>>();

    debug!(centromeres = centromeres.len(); "Read centromere positions");
    collector.finish(centromeres)
}

/// Reads a display order: one chromosome id per row.
///
/// # Errors
///
/// Returns a [`ParseError`] for rows with extra columns or repeated ids.
pub fn parse_display_order(src: &str) -> Result<Vec<String>, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut order: IndexMap<String, usize> = IndexMap::new();

    for row in rows(src) {
        let parsed = row.and_then(|row| {
            row.expect_columns(ORDER_LAYOUT)?;
            Ok((row.line(), row.id()?))
        });
        match parsed {
            Ok((line, id)) => match order.get(id) {
                Some(&first_line) => collector.emit(duplicate(id, line, first_line)),
                None => {
                    order.insert(id.to_string(), line);
                }
            },
            Err(diagnostic) => collector.emit(diagnostic),
        }
    }

    collector.finish(order.into_keys().collect())
}

fn annotation_layout(value_type: ValueType) -> &'static [&'static str] {
    match value_type {
        ValueType::Numeric => NUMERIC_LAYOUT,
        ValueType::Color => COLOR_LAYOUT,
        ValueType::Marker => MARKER_LAYOUT,
    }
}

fn read_annotation(row: &Row<'_>, value_type: ValueType) -> Result<Annotation, Diagnostic> {
    row.expect_columns(annotation_layout(value_type))?;
    let id = row.id()?;
    let start = row.integer(1, "start")?;
    let end = row.integer(2, "end")?;

    let mark = match value_type {
        ValueType::Numeric => Mark::Value(row.number(3, "value")?),
        ValueType::Color => Mark::Fill(row.color(3)?),
        ValueType::Marker => Mark::Marker(Marker::new(row.marker(3)?, row.color(4)?)),
    };

    Annotation::new(id, start, end, mark).map_err(|err| {
        Diagnostic::error(err.to_string())
            .with_code(ErrorCode::E105)
            .at_line(row.line())
    })
}

/// Reads an annotation table whose rows all carry `value_type` marks.
///
/// Row layouts:
/// - numeric: `id, start, end, value`
/// - color: `id, start, end, color`
/// - marker: `id, start, end, marker, color`
///
/// Chromosome ids are not checked here; annotations on chromosomes missing
/// from a panel are skipped at layout time.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying one diagnostic per broken row.
pub fn parse_annotations(src: &str, value_type: ValueType) -> Result<Track, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let mut annotations = Vec::new();

    for row in rows(src) {
        match row.and_then(|row| read_annotation(&row, value_type)) {
            Ok(annotation) => annotations.push(annotation),
            Err(diagnostic) => collector.emit(diagnostic),
        }
    }

    debug!(value_type = value_type.as_str(), annotations = annotations.len(); "Read annotations");
    let annotations = collector.finish(annotations)?;
    Track::new(value_type, annotations).map_err(|err| Diagnostic::error(err.to_string()).into())
}

/// Assembles a [`Panel`] from a length table and an optional centromere table.
///
/// Centromeres must lie strictly inside their chromosome. Centromere rows for
/// chromosomes missing from the length table are skipped with a warning.
///
/// # Errors
///
/// Returns a [`ParseError`] carrying the diagnostics of both tables.
///
/// # Examples
///
/// ```
/// let panel = bioplot_parser::parse_panel(
///     "Chr01\t2000000\nChr02\t1500000\n",
///     Some("Chr01\t1000000\n"),
/// )?;
/// assert_eq!(panel.chromosome("Chr01").unwrap().centromere(), Some(1_000_000));
/// assert_eq!(panel.chromosome("Chr02").unwrap().centromere(), None);
/// # Ok::<(), bioplot_parser::error::ParseError>(())
/// ```
pub fn parse_panel(lengths: &str, centromeres: Option<&str>) -> Result<Panel, ParseError> {
    let mut collector = DiagnosticCollector::new();
    let lengths = read_keyed(lengths, LENGTH_LAYOUT, &mut collector);
    let centromeres = centromeres
        .map(|src| read_keyed(src, CENTROMERE_LAYOUT, &mut collector))
        .unwrap_or_default();

    for (id, keyed) in &centromeres {
        if !lengths.contains_key(id) {
            collector.emit(
                Diagnostic::warning(format!("centromere for unknown chromosome `{id}` ignored"))
                    .with_code(ErrorCode::E201)
                    .at_line(keyed.line),
            );
        }
    }

    let mut chromosomes = Vec::with_capacity(lengths.len());
    for (id, keyed) in &lengths {
        let chromosome = Chromosome::new(id.as_str(), keyed.value).map_err(|err| (err, keyed.line));
        let chromosome = match (chromosome, centromeres.get(id)) {
            (Ok(chromosome), Some(centromere)) => chromosome
                .with_centromere(centromere.value)
                .map_err(|err| (err, centromere.line)),
            (result, _) => result,
        };

        match chromosome {
            Ok(chromosome) => chromosomes.push(chromosome),
            Err((err, line)) => collector.emit(
                Diagnostic::error(err.to_string())
                    .with_code(ErrorCode::E202)
                    .at_line(line),
            ),
        }
    }

    let chromosomes = collector.finish(chromosomes)?;
    info!(chromosomes = chromosomes.len(); "Read chromosome panel");
    Panel::new(chromosomes).map_err(|err| Diagnostic::error(err.to_string()).into())
}

#[cfg(test)]
mod tests {
    use bioplot_core::model::MarkerSymbol;

    use super::*;

    #[test]
    fn test_parse_chromosome_lengths_keeps_file_order() {
        let lengths = parse_chromosome_lengths("ChrB\t20\nChrA,10\n").unwrap();
        let ids: Vec<_> = lengths.keys().cloned().collect();
        assert_eq!(ids, vec!["ChrB", "ChrA"]);
        assert_eq!(lengths["ChrA"], 10);
    }

    #[test]
    fn test_parse_chromosome_lengths_reports_every_row() {
        let src = "Chr01\t100\nChr02\tabc\nChr01\t5\nChr03\t0\nChr04\n";
        let err = parse_chromosome_lengths(src).unwrap_err();
        let codes: Vec<_> = err
            .diagnostics()
            .iter()
            .map(|d| (d.line(), d.code()))
            .collect();
        assert_eq!(
            codes,
            vec![
                (Some(2), Some(ErrorCode::E101)),
                (Some(3), Some(ErrorCode::E200)),
                (Some(5), Some(ErrorCode::E100)),
                (Some(4), Some(ErrorCode::E202)),
            ]
        );
    }

    #[test]
    fn test_parse_centromeres() {
        let centromeres = parse_centromeres("# id\tposition\nChr01\t600000\n").unwrap();
        assert_eq!(centromeres.get("Chr01"), Some(&600_000));
    }

    #[test]
    fn test_parse_display_order() {
        let order = parse_display_order("Chr02\nChr01\n").unwrap();
        assert_eq!(order, vec!["Chr02", "Chr01"]);

        let err = parse_display_order("Chr02\nChr02\n").unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
    }

    #[test]
    fn test_parse_numeric_annotations() {
        let track = parse_annotations("Chr01\t500000\t500010\t0.75\n", ValueType::Numeric).unwrap();
        assert_eq!(track.value_type(), ValueType::Numeric);
        let annotation = &track.annotations()[0];
        assert_eq!(annotation.chromosome(), "Chr01");
        assert_eq!(annotation.start(), 500_000);
        assert_eq!(annotation.end(), 500_010);
        assert_eq!(*annotation.mark(), Mark::Value(0.75));
    }

    #[test]
    fn test_parse_marker_annotations() {
        let track = parse_annotations("Chr01,10,20,s,blue\n", ValueType::Marker).unwrap();
        match track.annotations()[0].mark() {
            Mark::Marker(marker) => {
                assert_eq!(marker.symbol(), MarkerSymbol::Square);
                assert_eq!(marker.color().to_hex(), "#0000ff");
            }
            other => panic!("expected marker, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_annotations_rejects_inverted_interval() {
        let err = parse_annotations("Chr01\t20\t10\tred\n", ValueType::Color).unwrap_err();
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E105));
        assert_eq!(diagnostic.line(), Some(1));
    }

    #[test]
    fn test_parse_annotations_wrong_layout_for_type() {
        let err = parse_annotations("Chr01\t10\t20\t0.5\n", ValueType::Marker).unwrap_err();
        assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E100));
    }

    #[test]
    fn test_parse_panel_centromere_out_of_range() {
        let err = parse_panel("Chr01\t100\n", Some("\nChr01\t100\n")).unwrap_err();
        let diagnostic = &err.diagnostics()[0];
        assert_eq!(diagnostic.code(), Some(ErrorCode::E202));
        assert_eq!(diagnostic.line(), Some(2));
    }

    #[test]
    fn test_parse_panel_ignores_unknown_centromere() {
        let panel = parse_panel("Chr01\t100\n", Some("ChrX\t50\n")).unwrap();
        assert_eq!(panel.chromosomes().len(), 1);
        assert_eq!(panel.chromosomes()[0].centromere(), None);
    }
}

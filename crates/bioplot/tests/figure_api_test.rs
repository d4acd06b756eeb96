//! Integration tests for the FigureBuilder API

use std::fs;

use bioplot::{
    BioplotError, FigureBuilder,
    color::Color,
    config::{AppConfig, CanvasConfig, IdiogramConfig, StyleConfig},
    genecluster::{Gene, Strand},
    model::{Chromosome, Orientation, Panel, ValueType},
};

const LENGTHS: &str = "# id\tlength\nChr01\t2000000\nChr02\t1500000\nChr03\t900000\n";
const CENTROMERES: &str = "Chr01\t1000000\nChr02\t600000\n";

fn panel(builder: &FigureBuilder) -> Panel {
    builder
        .parse_panel(LENGTHS, Some(CENTROMERES), None)
        .expect("Failed to read panel")
}

#[test]
fn test_render_panel_from_tables() {
    let builder = FigureBuilder::default();
    let track = builder
        .parse_track(
            "Chr01\t100000\t300000\t0.2\nChr02\t50000\t90000\t0.9\nChr03\t0\t1000\t0.5\n",
            ValueType::Numeric,
        )
        .unwrap();
    let svg = builder.render_svg(&panel(&builder).with_inner(track)).unwrap();

    assert!(svg.contains("<svg"), "Output should contain SVG tag");
    assert!(svg.contains("</svg>"), "Output should be complete SVG");
    for id in ["Chr01", "Chr02", "Chr03"] {
        assert!(svg.contains(id), "missing label for {id}");
    }
    assert!(svg.contains("data-layer=\"legend\""));
}

#[test]
fn test_outline_counts() {
    let builder = FigureBuilder::default();
    let geometry = builder.layout(&panel(&builder)).unwrap();

    let counts: Vec<_> = geometry
        .outlines()
        .iter()
        .map(|outline| (outline.chromosome(), outline.segments().len(), outline.arcs().len()))
        .collect();
    assert_eq!(
        counts,
        [("Chr01", 4, 8), ("Chr02", 4, 8), ("Chr03", 2, 4)]
    );
}

#[test]
fn test_display_order_table() {
    let builder = FigureBuilder::default();
    let panel = builder
        .parse_panel(LENGTHS, None, Some("Chr03\nChr01\nChr02\n"))
        .unwrap();
    let geometry = builder.layout(&panel).unwrap();

    let labels: Vec<_> = geometry.ticks().x().iter().map(|tick| tick.label()).collect();
    assert_eq!(labels, ["Chr03", "Chr01", "Chr02"]);
}

#[test]
fn test_order_with_unknown_chromosome() {
    let builder = FigureBuilder::default();
    let err = builder
        .parse_panel(LENGTHS, None, Some("Chr03\nChr01\nChr09\n"))
        .unwrap_err();
    assert!(matches!(err, BioplotError::Model(_)));
}

#[test]
fn test_malformed_table() {
    let builder = FigureBuilder::default();
    let err = builder.parse_panel("Chr01\tlong\n", None, None).unwrap_err();
    assert!(matches!(err, BioplotError::Parse(_)));
}

#[test]
fn test_horizontal_layout() {
    let config = AppConfig::from_toml_str("[idiogram]\norientation = \"horizontal\"\n").unwrap();
    let builder = FigureBuilder::new(config);
    let geometry = builder.layout(&panel(&builder)).unwrap();

    assert_eq!(geometry.orientation(), Orientation::Horizontal);
    // Chromosomes run along x, so the extent is wider in x than in slots
    assert!(geometry.extent().width() > geometry.extent().height());
    assert!(geometry.ticks().y().iter().any(|tick| tick.label() == "Chr02"));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = AppConfig::from_toml_str("[idiogram]\ncmap_parts = 0\n");
    assert!(config.is_err());

    let config = AppConfig::new(
        IdiogramConfig::default().with_cmap_parts(-3),
        StyleConfig::default(),
        CanvasConfig::default(),
    );
    let builder = FigureBuilder::new(config);
    let err = builder.layout(&panel(&builder)).unwrap_err();
    assert!(matches!(err, BioplotError::Config(_)));
}

#[test]
fn test_empty_panel() {
    let builder = FigureBuilder::default();
    let err = builder.render_svg(&Panel::default()).unwrap_err();
    assert!(matches!(err, BioplotError::Layout(_)));
}

#[test]
fn test_write_svg() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("idiogram.svg");

    let builder = FigureBuilder::default();
    let panel = Panel::new(vec![Chromosome::new("Chr01", 2_000_000).unwrap()]).unwrap();
    builder.write_svg(&panel, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.contains("<svg"));
    assert!(content.contains("Chr01"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_write_svg_to_non_utf8_path() {
    use std::{ffi::OsStr, os::unix::ffi::OsStrExt};

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(OsStr::from_bytes(b"idiogram\xFF.svg"));

    let builder = FigureBuilder::default();
    let panel = Panel::new(vec![Chromosome::new("Chr01", 2_000_000).unwrap()]).unwrap();
    builder.write_svg(&panel, &path).unwrap();

    assert!(fs::read_to_string(&path).unwrap().contains("Chr01"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_gene_cluster() {
    let genes = vec![
        Gene::new("dnaA", 1, 1400, Strand::Forward, Color::new("#1f77b4").unwrap()).unwrap(),
        Gene::new("dnaN", 1600, 2700, "-".parse().unwrap(), Color::new("#ff7f0e").unwrap())
            .unwrap(),
    ];
    let builder = FigureBuilder::default();

    let geometry = builder.layout_gene_cluster(&genes).unwrap();
    assert_eq!(geometry.arrows().len(), 2);

    let svg = builder.render_gene_cluster_svg(&genes).unwrap();
    assert!(svg.contains("dnaA"));
    assert!(svg.contains("dnaN"));

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cluster.svg");
    builder.write_gene_cluster_svg(&genes, &path).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("<polygon"));
}

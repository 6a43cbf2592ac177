use dnaseg_core::{IsochoreParams, IsochoreRow, IsochoreSeriesBuilder};
use dnaseg_render::charts::{isochore_simple_average_chart, ChartColors};
use dnaseg_render::{ChartExporter, ExportConfig};

fn demo_rows() -> Vec<IsochoreRow> {
    (0..300u64)
        .map(|i| IsochoreRow::new(i * 10_000, 35.0 + ((i * 7) % 25) as f64))
        .collect()
}

#[test]
fn svg_export_is_deterministic() {
    let params = IsochoreParams::default();
    let views = IsochoreSeriesBuilder::new(params.clone()).unwrap().build(&demo_rows());
    let chart = isochore_simple_average_chart("isochores_output_demo.csv", &views, &params, &ChartColors::default());

    let cfg = ExportConfig {
        width: 800,
        height: 600,
        show_footer: false, // disable dynamic timestamp
        provenance_comment: Some("Determinism Test".into()),
        ..ExportConfig::default()
    };
    let exporter = ChartExporter::new(cfg);

    let dir = tempfile::tempdir().unwrap();
    let f1 = dir.path().join("a.svg");
    let f2 = dir.path().join("b.svg");

    exporter.export_svg(&f1, &chart).unwrap();
    exporter.export_svg(&f2, &chart).unwrap();

    let b1 = std::fs::read(&f1).unwrap();
    let b2 = std::fs::read(&f2).unwrap();
    assert_eq!(b1, b2, "SVG bytes differ between identical renders");

    let text = String::from_utf8(b1).unwrap();
    assert!(text.starts_with("<?xml"));
    assert!(text.contains("<!-- Determinism Test -->"));
    assert!(text.contains("Simple Average (100 points)"));
    assert!(text.trim_end().ends_with("</svg>"));
}

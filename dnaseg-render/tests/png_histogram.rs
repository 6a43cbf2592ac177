use dnaseg_core::{ScatterGroup, WordCount};
use dnaseg_render::charts::{scatter_chart, word_frequency_chart, ChartColors};
use dnaseg_render::{ChartExporter, ExportConfig, ImageFormat};

fn demo_groups() -> Vec<ScatterGroup> {
    // A small dense cloud per word to exercise point drawing
    ["ACG", "TTT", "GGA"]
        .iter()
        .enumerate()
        .map(|(w, word)| ScatterGroup {
            word: word.to_string(),
            points: (0..300u64).map(|i| (i * 1000 + w as u64 * 333, 50 + (i * 13 + w as u64 * 7) % 200)).collect(),
        })
        .collect()
}

fn histogram(png_bytes: &[u8]) -> [u32; 256] {
    let img = image::load_from_memory(png_bytes).unwrap().to_rgba8();
    let mut hist = [0u32; 256];
    for p in img.pixels() {
        // bucket by red channel for stability across tiny color diffs
        hist[p[0] as usize] += 1;
    }
    hist
}

#[test]
fn png_histogram_is_stable() {
    let chart = scatter_chart("segments_output_demo.csv", &demo_groups(), &ChartColors::default());

    let cfg = ExportConfig {
        width: 640,
        height: 480,
        show_footer: false,
        ..ExportConfig::default()
    };
    let exporter = ChartExporter::new(cfg);

    let dir = tempfile::tempdir().unwrap();
    let f1 = dir.path().join("d1.png");
    let f2 = dir.path().join("d2.png");

    exporter.export(&f1, &chart, ImageFormat::Png).unwrap();
    exporter.export(&f2, &chart, ImageFormat::Png).unwrap();
    let b1 = std::fs::read(&f1).unwrap();
    let b2 = std::fs::read(&f2).unwrap();

    let h1 = histogram(&b1);
    let h2 = histogram(&b2);
    assert_eq!(h1, h2, "Red histogram differs between identical renders");

    let img = image::load_from_memory(&b1).unwrap();
    assert_eq!((img.width(), img.height()), (640, 480));
    // Something besides the white background was drawn
    assert!(h1[255] < 640 * 480);
}

#[test]
fn png_bar_chart_draws_bar_color() {
    let words = vec![WordCount::new("ACG", 40), WordCount::new("TTT", 25)];
    let chart = word_frequency_chart("segments_output_1.csv", &words, &ChartColors::default());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("words.png");
    ChartExporter::new(ExportConfig { width: 400, height: 300, ..ExportConfig::default() })
        .export(&path, &chart, ImageFormat::Png)
        .unwrap();

    let img = image::open(&path).unwrap().to_rgba8();
    let green = img.pixels().filter(|p| p[0] == 0 && p[1] == 128 && p[2] == 0).count();
    assert!(green > 100, "expected bar pixels, found {}", green);
}

#[test]
fn png_text_follows_chart_labels() {
    let colors = ChartColors::default();
    let first = word_frequency_chart(
        "segments_output_1.csv",
        &[WordCount::new("ACG", 40), WordCount::new("TTT", 25)],
        &colors,
    );
    let second = word_frequency_chart(
        "other_file.csv",
        &[WordCount::new("GGG", 40), WordCount::new("CCC", 25)],
        &colors,
    );

    let dir = tempfile::tempdir().unwrap();
    let p1 = dir.path().join("first.png");
    let p2 = dir.path().join("second.png");
    let exporter = ChartExporter::new(ExportConfig { show_footer: false, ..ExportConfig::default() });
    exporter.export(&p1, &first, ImageFormat::Png).unwrap();
    exporter.export(&p2, &second, ImageFormat::Png).unwrap();

    let a = image::open(&p1).unwrap().to_rgba8();
    let b = image::open(&p2).unwrap().to_rgba8();
    assert_eq!(a.dimensions(), b.dimensions());
    assert!(a.pixels().zip(b.pixels()).any(|(x, y)| x != y), "titles and word labels were not drawn");

    // Title band above the plot area holds dark text pixels
    let title_ink = (0..40)
        .flat_map(|y| (0..a.width()).map(move |x| (x, y)))
        .filter(|&(x, y)| a.get_pixel(x, y)[0] < 100)
        .count();
    assert!(title_ink > 50, "expected title text, found {} dark pixels", title_ink);
}

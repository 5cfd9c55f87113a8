/// Integration tests for bench-plot.
///
/// They cover:
///   - Loading and filtering a benchmark csv from disk
///   - Grid planning for the filtered packages
///   - Subplot series (descending id order, shortened commits)
///   - Writing figures (degenerate empty figure, SVG and PNG output)
///   - Running the whole pipeline without a viewer
use bench_plot::prelude::*;
use std::io::Write;
use std::path::Path;
use tempfile::{tempdir, NamedTempFile};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const TWO_PACKAGES: &str = "\
ID,pkg,commit,name,n,ns_per_op
1,a,1a2b3c4d5e6f,Bench1,1000,100
2,a,2b3c4d5e6f7a,Bench1,1000,90
3,a,3c4d5e6f7a8b,Bench1,1000,80
1,b,1a2b3c4d5e6f,Bench1,1000,50
2,b,2b3c4d5e6f7a,Bench1,1000,55
3,b,3c4d5e6f7a8b,Bench1,1000,60
";

fn csv_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp csv");
    file.write_all(contents.as_bytes()).expect("write csv");
    file
}

fn config(csv: &Path) -> PlotConfigBuilder {
    PlotConfig::builder().csv_path(csv)
}

/// Text rendering needs a system font; hosts without one report a render error.
fn rendered_or_no_fonts(result: Result<()>, path: &Path) {
    match result {
        Ok(()) => assert!(path.exists(), "figure was not written"),
        Err(Error::Render(msg)) => eprintln!("skipping figure check: {msg}"),
        Err(err) => panic!("unexpected error: {err}"),
    }
}

// ===========================================================================
// End to end
// ===========================================================================

#[test]
fn two_packages_one_benchmark() {
    let csv = csv_file(TWO_PACKAGES);
    let spec = prepare(&config(csv.path()).build()).unwrap();

    assert_eq!(spec.packages, vec!["a", "b"]);
    assert_eq!(spec.names, vec!["Bench1"]);
    assert_eq!(spec.grid, GridLayout { rows: 1, columns: 2 });
    assert_eq!(spec.subplots.len(), 2);

    let a = &spec.subplots[0];
    assert_eq!(a.title, "Benchmarks: a");
    assert_eq!(a.commits, vec!["3c4d5e", "2b3c4d", "1a2b3c"]);
    assert_eq!(a.lines.len(), 1);
    assert_eq!(a.lines[0].name, "Bench1");
    assert_eq!(a.lines[0].points, vec![(0, 80.0), (1, 90.0), (2, 100.0)]);

    let b = &spec.subplots[1];
    assert_eq!(b.title, "Benchmarks: b");
    assert_eq!(b.lines[0].points, vec![(0, 60.0), (1, 55.0), (2, 50.0)]);
}

#[test]
fn column_cap_of_one_stacks_subplots() {
    let csv = csv_file(TWO_PACKAGES);
    let spec = prepare(&config(csv.path()).max_columns(1).build()).unwrap();
    assert_eq!(spec.grid, GridLayout { rows: 2, columns: 1 });
}

#[test]
fn pkg_regex_without_match_gives_no_subplots() {
    let csv = csv_file(TWO_PACKAGES);
    let spec = prepare(
        &config(csv.path())
            .pkg_regex(Some("^nothing$".into()))
            .build(),
    )
    .unwrap();

    assert!(spec.packages.is_empty());
    assert!(spec.names.is_empty());
    assert!(spec.subplots.is_empty());
    assert!(spec.grid.is_empty());
}

#[test]
fn bench_regex_is_a_substring_match() {
    let csv = csv_file(
        "ID,pkg,commit,name,ns_per_op\n\
         1,kv,c1,BenchmarkGetSmall,10\n\
         1,kv,c1,BenchmarkPutSmall,20\n\
         1,kv,c1,BenchmarkGetLarge,30\n",
    );
    let spec = prepare(&config(csv.path()).bench_regex(Some("Get".into())).build()).unwrap();
    assert_eq!(spec.names, vec!["BenchmarkGetSmall", "BenchmarkGetLarge"]);
    assert_eq!(spec.subplots[0].lines.len(), 2);
}

#[test]
fn package_without_a_retained_benchmark_keeps_its_subplot() {
    let csv = csv_file(
        "ID,pkg,commit,name,ns_per_op\n\
         1,kv,c1,BenchmarkGet,10\n\
         1,log,c1,BenchmarkAppend,20\n",
    );
    let spec = prepare(&config(csv.path()).bench_regex(Some("Get".into())).build()).unwrap();
    assert_eq!(spec.packages, vec!["kv", "log"]);
    assert_eq!(spec.subplots.len(), 2);
    assert!(spec.subplots[1].lines[0].points.is_empty());
}

#[test]
fn invalid_patterns_are_rejected_before_loading() {
    let missing = Path::new("/no/such/bench.csv");

    let err = prepare(&config(missing).pkg_regex(Some("(".into())).build()).unwrap_err();
    assert!(err.to_string().contains("Invalid pkg-filter-regex:"));

    let err = prepare(&config(missing).bench_regex(Some("(".into())).build()).unwrap_err();
    assert!(err.to_string().contains("Invalid bench-regex:"));
}

#[test]
fn zero_columns_is_rejected() {
    let csv = csv_file(TWO_PACKAGES);
    let err = prepare(&config(csv.path()).max_columns(0).build()).unwrap_err();
    assert!(matches!(err, Error::MaxColumns));
}

#[test]
fn missing_file_propagates() {
    let err = prepare(&config(Path::new("/no/such/bench.csv")).build()).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(!err.is_usage());
}

#[test]
fn malformed_csv_propagates() {
    let csv = csv_file("ID,pkg,commit,name,ns_per_op\nfirst,a,c,B,1\n");
    let err = prepare(&config(csv.path()).build()).unwrap_err();
    assert!(matches!(err, Error::Csv(_)));
}

// ===========================================================================
// Filtering
// ===========================================================================

#[test]
fn filtering_is_idempotent_on_loaded_data() {
    let csv = csv_file(TWO_PACKAGES);
    let dataset = Dataset::load(csv.path()).unwrap();
    let filter = Filter::compile(Some("a"), Some("1$")).unwrap();

    let once = dataset.apply(&filter);
    let twice = once.dataset.apply(&filter);
    assert_eq!(once, twice);
    assert_eq!(once.packages, vec!["a"]);
}

// ===========================================================================
// Figures
// ===========================================================================

#[test]
fn empty_figure_is_written() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("empty.png");
    let config = PlotConfig::builder().output(&output).width(200).build();

    render(&[], GridLayout::plan(0, 3), &config, &output).unwrap();
    assert!(output.exists());
}

#[test]
fn empty_svg_figure_is_written() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("empty.svg");
    let config = PlotConfig::builder().output(&output).width(200).build();

    render(&[], GridLayout::plan(0, 3), &config, &output).unwrap();
    let svg = std::fs::read_to_string(&output).unwrap();
    assert!(svg.contains("<svg"));
}

#[test]
fn svg_figure_has_a_subplot_per_package() {
    let csv = csv_file(TWO_PACKAGES);
    let dir = tempdir().unwrap();
    let output = dir.path().join("bench.svg");
    let config = config(csv.path()).output(&output).show_legend(true).build();

    let spec = prepare(&config).unwrap();
    let result = render(&spec.subplots, spec.grid, &config, &output);
    let rendered = result.is_ok();
    rendered_or_no_fonts(result, &output);

    if rendered {
        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.contains("Benchmarks: a"));
        assert!(svg.contains("Benchmarks: b"));
        assert!(svg.contains("ns per op"));
    }
}

#[test]
fn png_figure_is_written() {
    let csv = csv_file(TWO_PACKAGES);
    let dir = tempdir().unwrap();
    let output = dir.path().join("bench.png");
    let config = config(csv.path()).output(&output).width(600).build();

    let spec = prepare(&config).unwrap();
    rendered_or_no_fonts(render(&spec.subplots, spec.grid, &config, &output), &output);
}

// ===========================================================================
// Pipeline
// ===========================================================================

#[test]
fn run_without_viewer_keeps_the_requested_output() {
    let csv = csv_file(TWO_PACKAGES);
    let dir = tempdir().unwrap();
    let output = dir.path().join("history.svg");
    let config = config(csv.path()).output(&output).show(false).build();

    match run(&config) {
        Ok(spec) => {
            assert_eq!(spec.packages, vec!["a", "b"]);
            assert!(output.exists());
        }
        Err(Error::Render(msg)) => eprintln!("skipping figure check: {msg}"),
        Err(err) => panic!("unexpected error: {err}"),
    }
}

#[test]
fn run_with_zero_sized_figure_fails_before_writing() {
    let csv = csv_file(TWO_PACKAGES);
    let dir = tempdir().unwrap();
    let output = dir.path().join("history.png");
    let config = config(csv.path())
        .output(&output)
        .height(Some(0))
        .show(false)
        .build();

    assert!(matches!(run(&config), Err(Error::Render(_))));
    assert!(!output.exists());
}

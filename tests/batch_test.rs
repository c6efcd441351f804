//! Directory batch runs over generated PDFs.

mod common;

use std::fs;
use std::path::Path;

use common::{body, run, Font, PdfBuilder};
use pdfoutline::batch::{self, BatchOptions};
use pdfoutline::{DocumentOutline, Error, HeadingLevel};

fn heading_pdf(title: &'static str) -> PdfBuilder {
    let mut runs = vec![run(title, Font::Regular, 24, 72, 700)];
    runs.extend(body(4, 600));
    PdfBuilder::new().page(runs)
}

fn populate(input: &Path) {
    fs::create_dir_all(input).unwrap();
    heading_pdf("Alpha Report").save(&input.join("alpha.pdf"));
    heading_pdf("Beta Study").save(&input.join("beta.PDF"));
    heading_pdf("Gamma Notes").save(&input.join("gamma.v2.pdf"));
    fs::write(input.join("readme.txt"), "not a pdf").unwrap();
    fs::write(input.join("broken.pdf"), "%PDF-1.4\nthis file is cut short").unwrap();
}

fn file_names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn test_batch_writes_one_json_per_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("nested").join("output");
    populate(&input);

    let report = batch::run(&BatchOptions::new(&input, &output)).unwrap();

    assert_eq!(
        file_names(&report.written),
        vec!["alpha.json", "beta.json", "gamma.v2.json"]
    );
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].path.ends_with("broken.pdf"));
    assert!(!report.is_success());
    assert_eq!(report.total(), 4);

    assert!(!output.join("broken.json").exists());
    assert!(!output.join("readme.json").exists());

    let json = fs::read_to_string(output.join("alpha.json")).unwrap();
    let outline: DocumentOutline = serde_json::from_str(&json).unwrap();
    assert_eq!(outline.title, "Alpha Report");
    assert_eq!(outline.outline.len(), 1);
    assert_eq!(outline.outline[0].level, HeadingLevel::H1);
    assert_eq!(outline.outline[0].page, 1);
}

#[test]
fn test_batch_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    populate(&input);

    let parallel_out = dir.path().join("parallel");
    let sequential_out = dir.path().join("sequential");
    batch::run(&BatchOptions::new(&input, &parallel_out)).unwrap();
    batch::run(&BatchOptions::new(&input, &sequential_out).sequential()).unwrap();
    batch::run(&BatchOptions::new(&input, &parallel_out)).unwrap();

    for name in ["alpha.json", "beta.json", "gamma.v2.json"] {
        let a = fs::read(parallel_out.join(name)).unwrap();
        let b = fs::read(sequential_out.join(name)).unwrap();
        assert_eq!(a, b, "{} differs", name);
    }
}

#[test]
fn test_progress_called_for_every_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    populate(&input);

    let seen = std::sync::Mutex::new(Vec::new());
    let report = batch::run_with_progress(&BatchOptions::new(&input, dir.path().join("out")), |p| {
        seen.lock().unwrap().push(p.to_path_buf());
    })
    .unwrap();

    let seen = seen.into_inner().unwrap();
    assert_eq!(seen.len(), report.total());
}

#[test]
fn test_empty_input_dir() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    fs::create_dir(&input).unwrap();

    let report = batch::run(&BatchOptions::new(&input, dir.path().join("out"))).unwrap();
    assert_eq!(report.total(), 0);
    assert!(report.is_success());
}

#[test]
fn test_unwritable_output_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    populate(&input);
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "a file where the output directory should be").unwrap();

    let err = batch::run(&BatchOptions::new(&input, &blocker)).unwrap_err();
    assert!(matches!(err, Error::OutputWrite { .. }));
    assert!(!err.is_document_error());
}

#[test]
fn test_failing_file_keeps_other_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir_all(&input).unwrap();
    heading_pdf("Alpha Report").save(&input.join("a.pdf"));
    fs::write(input.join("m.pdf"), "%PDF-1.7\n1 0 obj\n<<").unwrap();
    heading_pdf("Zeta Summary").save(&input.join("z.pdf"));

    let report = batch::run(&BatchOptions::new(&input, &output).sequential()).unwrap();

    assert_eq!(file_names(&report.written), vec!["a.json", "z.json"]);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].path.ends_with("m.pdf"));
    assert!(output.join("a.json").is_file());
    assert!(output.join("z.json").is_file());
    assert!(!output.join("m.json").exists());
}

#[test]
fn test_fatal_write_keeps_earlier_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input");
    let output = dir.path().join("output");
    fs::create_dir_all(&input).unwrap();
    heading_pdf("Alpha Report").save(&input.join("a.pdf"));
    heading_pdf("Zeta Summary").save(&input.join("z.pdf"));
    // A directory squatting on the second output path makes its write fail
    fs::create_dir_all(output.join("z.json")).unwrap();

    let err = batch::run(&BatchOptions::new(&input, &output).sequential()).unwrap_err();
    assert!(matches!(err, Error::OutputWrite { ref path, .. } if path.ends_with("z.json")));

    let json = fs::read_to_string(output.join("a.json")).unwrap();
    let outline: DocumentOutline = serde_json::from_str(&json).unwrap();
    assert_eq!(outline.title, "Alpha Report");
}

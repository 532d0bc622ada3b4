//! Integration tests for a full generation run over a directory

use std::fs;
use std::path::{Path, PathBuf};

use erbgen::{Config, ErrorPolicy, FormatterConfig, GenerateError, Generator};
use pretty_assertions::assert_eq;

const EXPECTED: &str = include_str!("fixtures/greeting_gen.rs");

/// A temporary copy of the fixture sources and templates, without output
fn fixture_dir() -> tempfile::TempDir {
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let dir = tempfile::tempdir().expect("Should create temp dir");
    for name in ["greeting.rs", "Layout.erb", "Trio.erb"] {
        fs::copy(fixtures.join(name), dir.path().join(name)).expect("Should copy fixture");
    }
    dir
}

fn generator() -> Generator {
    Generator::new(Config::new().without_formatter())
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("Should write file");
}

fn generated_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.to_string_lossy().ends_with("_gen.rs"))
        .collect();
    files.sort();
    files
}

const PAGE_ALIAS: &str =
    "// +erb\npub type Page = fn(writer: &mut dyn std::io::Write) -> std::io::Result<()>;\n";

#[test]
fn test_output_matches_checked_in_file() {
    let dir = fixture_dir();
    let written = generator().run(dir.path()).expect("Should generate");

    let output = dir.path().join("greeting_gen.rs");
    assert_eq!(written, vec![output.clone()]);
    assert_eq!(fs::read_to_string(output).unwrap(), EXPECTED);
}

#[test]
fn test_runs_are_idempotent() {
    let dir = fixture_dir();
    let output = dir.path().join("greeting_gen.rs");
    write(dir.path(), "greeting_gen.rs", "stale output");

    generator().run(dir.path()).expect("Should generate");
    let first = fs::read(&output).unwrap();
    generator().run(dir.path()).expect("Should generate again");
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
    assert_eq!(String::from_utf8(first).unwrap(), EXPECTED);
}

#[test]
fn test_missing_template_aborts() {
    let dir = fixture_dir();
    fs::remove_file(dir.path().join("Trio.erb")).unwrap();

    let err = generator().run(dir.path()).unwrap_err();
    match err {
        GenerateError::TemplateNotFound { name, path } => {
            assert_eq!(name, "Trio");
            assert_eq!(path, dir.path().join("Trio.erb"));
        }
        other => panic!("Expected TemplateNotFound, got {:?}", other),
    }
    assert!(generated_files(dir.path()).is_empty());
}

#[test]
fn test_no_annotations_no_output() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "plain.rs",
        "// +erb\n\npub type Page = fn(writer: &mut dyn std::io::Write) -> std::io::Result<()>;\n\n// +erb\nfn main() {}\n",
    );
    write(dir.path(), "Page.erb", "unused");

    let written = generator().run(dir.path()).expect("Should succeed");
    assert!(written.is_empty());
    assert!(generated_files(dir.path()).is_empty());
}

#[test]
fn test_empty_template_generates_empty_body() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "views.rs", PAGE_ALIAS);
    write(dir.path(), "Page.erb", "");

    generator().run(dir.path()).expect("Should generate");
    let output = fs::read_to_string(dir.path().join("views_gen.rs")).unwrap();
    assert!(output.contains(
        "pub fn WritePage(writer: &mut dyn std::io::Write) -> std::io::Result<()> {\n\
         let mut __erb_result: ::std::io::Result<()> = ::std::result::Result::Ok(());\n\
         __erb_result.map_err(::std::convert::Into::into)\n}\n"
    ));
}

#[test]
fn test_files_are_processed_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    for stem in ["b", "a", "c"] {
        write(dir.path(), &format!("{}.rs", stem), PAGE_ALIAS);
    }
    write(dir.path(), "Page.erb", "x");

    let written = generator().run(dir.path()).expect("Should generate");
    let names: Vec<_> = written
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["a_gen.rs", "b_gen.rs", "c_gen.rs"]);
}

#[test]
fn test_fail_fast_stops_at_first_file() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.rs",
        "// +erb\ntype Missing = fn(writer: &mut dyn std::io::Write) -> std::io::Result<()>;\n",
    );
    write(dir.path(), "b.rs", PAGE_ALIAS);
    write(dir.path(), "Page.erb", "page");

    let err = generator().run(dir.path()).unwrap_err();
    assert!(matches!(err, GenerateError::TemplateNotFound { ref name, .. } if name == "Missing"));
    assert!(generated_files(dir.path()).is_empty());
}

#[test]
fn test_collect_all_continues() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "a.rs",
        "// +erb\ntype Missing = fn(writer: &mut dyn std::io::Write) -> std::io::Result<()>;\n",
    );
    write(dir.path(), "b.rs", PAGE_ALIAS);
    write(dir.path(), "c.rs", "// +erb\ntype Broken = fn(writer: &mut Vec<u8>) -> std::io::Result<()>;\n");
    write(dir.path(), "Page.erb", "page");
    write(dir.path(), "Broken.erb", "<%= %>");

    let config = Config::new()
        .without_formatter()
        .with_errors(ErrorPolicy::CollectAll);
    let err = Generator::new(config).run(dir.path()).unwrap_err();

    match err {
        GenerateError::Multiple(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(matches!(errors[0], GenerateError::TemplateNotFound { .. }));
            assert!(matches!(errors[1], GenerateError::Template { .. }));
        }
        other => panic!("Expected Multiple, got {:?}", other),
    }
    assert_eq!(generated_files(dir.path()), vec![dir.path().join("b_gen.rs")]);
}

#[test]
fn test_config_file_settings() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "erbgen.toml",
        "annotation = \"// @template\"\noutput_suffix = \"_tmpl\"\ntemplate_extension = \"html.erb\"\n\n[formatter]\nenabled = false\n",
    );
    write(
        dir.path(),
        "views.rs",
        "// @template\npub type Page = fn(writer: &mut dyn std::io::Write) -> std::io::Result<()>;\n\
         // +erb\npub type Other = fn(writer: &mut dyn std::io::Write) -> std::io::Result<()>;\n",
    );
    write(dir.path(), "Page.html.erb", "<p>hi</p>");

    let config = Config::load(dir.path()).expect("Should load config");
    let written = Generator::new(config).run(dir.path()).expect("Should generate");

    let output = dir.path().join("views_tmpl.rs");
    assert_eq!(written, vec![output.clone()]);
    let text = fs::read_to_string(output).unwrap();
    assert!(text.contains("pub fn WritePage("));
    assert!(!text.contains("WriteOther"));
}

#[cfg(unix)]
#[test]
fn test_formatter_runs_on_output() {
    let dir = fixture_dir();
    let config = Config::new().with_formatter(FormatterConfig {
        enabled: true,
        command: "true".to_string(),
        args: Vec::new(),
    });
    let written = Generator::new(config).run(dir.path()).expect("Should generate");
    assert_eq!(written.len(), 1);
}

#[cfg(unix)]
#[test]
fn test_formatter_failure_is_fatal() {
    let dir = fixture_dir();
    let config = Config::new().with_formatter(FormatterConfig {
        enabled: true,
        command: "false".to_string(),
        args: Vec::new(),
    });
    let err = Generator::new(config).run(dir.path()).unwrap_err();
    assert!(matches!(err, GenerateError::Format { .. }));
}

#[test]
fn test_missing_formatter_is_fatal() {
    let dir = fixture_dir();
    let config = Config::new().with_formatter(FormatterConfig {
        enabled: true,
        command: "erbgen-no-such-formatter".to_string(),
        args: Vec::new(),
    });
    let err = Generator::new(config).run(dir.path()).unwrap_err();
    assert!(matches!(err, GenerateError::Format { .. }));
}

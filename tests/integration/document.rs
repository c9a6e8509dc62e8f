use anyhow::Result;
use inistore::{Document, IniError, LineFault};
use std::{
    fs,
    sync::{Arc, Mutex},
    thread,
};
use tempfile::tempdir;

use crate::setup_test_env;

#[test]
fn test_load_fixture() -> Result<()> {
    setup_test_env();
    let doc = Document::load("tests/fixtures/team.ini")?;

    assert_eq!(doc.sections(), ["Developer", "Reviewer"]);
    assert_eq!(doc.parameters("Developer")?, ["name", "editor"]);
    assert_eq!(doc.get("Developer", "name")?, "Alice");
    assert_eq!(doc.get("Reviewer", "access")?, "read");

    insta::assert_yaml_snapshot!(doc, @r###"
    Developer:
      name: Alice
      editor: vim
    Reviewer:
      name: Bob
      access: read
    "###);
    Ok(())
}

#[test]
fn test_lookup_errors() -> Result<()> {
    setup_test_env();
    let doc = Document::load("tests/fixtures/team.ini")?;

    assert!(matches!(
        doc.get("Manager", "name"),
        Err(IniError::SectionNotFound(_))
    ));
    assert!(matches!(
        doc.get("Developer", "email"),
        Err(IniError::ParameterNotFound { .. })
    ));
    Ok(())
}

#[test]
fn test_invalid_parameter_line() {
    setup_test_env();
    let err = Document::load("tests/fixtures/invalid_parameter.ini").unwrap_err();

    let IniError::Parse(parse_err) = err else {
        panic!("expected a parse error");
    };
    assert_eq!(parse_err.line, 5);
    assert_eq!(parse_err.fault, LineFault::InvalidParameter);
    assert_eq!(parse_err.partial().get("Developer", "name").unwrap(), "Alice");
}

#[test]
fn test_unterminated_section() {
    setup_test_env();
    let err = Document::load("tests/fixtures/unterminated_section.ini").unwrap_err();

    assert!(matches!(
        err,
        IniError::Parse(ref e) if e.line == 3 && e.fault == LineFault::UnterminatedSection
    ));
    assert_eq!(
        err.to_string(),
        "cannot parse INI data: invalid section, missing closing bracket at line 3: \"[Reviewer\""
    );
}

#[test]
fn test_non_utf8_value() {
    setup_test_env();
    let err = Document::load("tests/fixtures/non_utf8.ini").unwrap_err();

    let IniError::Parse(parse_err) = err else {
        panic!("expected a parse error");
    };
    assert_eq!(parse_err.line, 3);
    assert_eq!(parse_err.fault, LineFault::InvalidUtf8);
    assert_eq!(parse_err.partial().get("Developer", "name").unwrap(), "Alice");
}

#[test]
fn test_missing_file() -> Result<()> {
    setup_test_env();
    let dir = tempdir()?;
    let path = dir.path().join("missing.ini");

    let err = Document::load(&path).unwrap_err();
    assert!(matches!(err, IniError::Load { path: ref p, .. } if *p == path));
    assert!(err.to_string().contains("missing.ini"));
    Ok(())
}

#[test]
fn test_save_then_load() -> Result<()> {
    setup_test_env();
    let dir = tempdir()?;
    let path = dir.path().join("out.ini");

    let mut doc = Document::new();
    doc.insert_section("Developer");
    doc.set("Developer", "name", "Alice")?;
    doc.set("Developer", "home", "/home/alice")?;
    doc.insert_section("build");
    doc.set("build", "jobs", "8")?;
    doc.save(&path)?;

    insta::assert_snapshot!(fs::read_to_string(&path)?, @r###"
    [developer]
    name=Alice
    home=/home/alice
    [build]
    jobs=8
    "###);

    // Section names come back lower-cased, keys and values are exact.
    let reloaded = Document::load(&path)?;
    assert_eq!(reloaded.sections(), ["developer", "build"]);
    assert_eq!(reloaded.section("developer"), doc.section("Developer"));
    assert_eq!(reloaded.section("build"), doc.section("build"));

    dir.close()?;
    Ok(())
}

#[test]
fn test_load_edit_save() -> Result<()> {
    setup_test_env();
    let dir = tempdir()?;
    let path = dir.path().join("team.ini");
    fs::copy("tests/fixtures/team.ini", &path)?;

    let mut doc = Document::load(&path)?;
    doc.set("Developer", "editor", "helix")?;
    doc.insert_section("Reviewer");
    doc.save(&path)?;

    let doc = Document::load(&path)?;
    assert_eq!(doc.get("developer", "editor")?, "helix");
    assert!(doc.parameters("reviewer")?.is_empty());

    dir.close()?;
    Ok(())
}

#[test]
fn test_save_into_missing_directory() -> Result<()> {
    setup_test_env();
    let dir = tempdir()?;
    let path = dir.path().join("no/such/dir/out.ini");

    let err = Document::new().save(&path).unwrap_err();
    assert!(matches!(err, IniError::Save { .. }));
    Ok(())
}

#[test]
fn test_mutations_behind_a_lock() -> Result<()> {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Document>();

    let doc = Arc::new(Mutex::new(Document::new()));
    doc.lock().unwrap().insert_section("workers");

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let doc = Arc::clone(&doc);
            thread::spawn(move || {
                for j in 0..50 {
                    doc.lock()
                        .unwrap()
                        .set("workers", format!("w{i}x{j}"), j.to_string())
                        .unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let doc = doc.lock().unwrap();
    assert_eq!(doc.parameters("workers")?.len(), 8 * 50);
    assert_eq!(doc.get("workers", "w3x49")?, "49");
    Ok(())
}

use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_check_clean_project() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <div className="flex items-center p-2" />;"#,
    )?;

    let output = test.run(&["check"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("Checked 1 file - no issues found"));
    Ok(())
}

#[test]
fn test_check_reports_invalid_class() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <div className="flex itemscenter" />;"#,
    )?;

    let output = test.run(&["check"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("error: unknown class `itemscenter`"), "{out}");
    assert!(out.contains("invalid-class"), "{out}");
    assert!(out.contains("1 problem (1 error, 0 warnings, 0 hints)"), "{out}");
    Ok(())
}

#[test]
fn test_warnings_alone_do_not_fail_the_run() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <div className="flex flex" />;"#,
    )?;

    let output = test.run(&["check"]);
    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.contains("warning: duplicate class `flex`"), "{out}");
    Ok(())
}

#[test]
fn test_conflict_shows_both_sides_and_axis() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <div className="p-2 p-4" />;"#,
    )?;

    let output = test.run(&["check"]);
    let out = stdout(&output);
    assert!(out.contains("`p-2` conflicts with `p-4`"), "{out}");
    assert!(out.contains("`p-4` conflicts with `p-2`"), "{out}");
    assert!(out.contains("both set `padding`"), "{out}");
    Ok(())
}

#[test]
fn test_missing_stylesheet_is_a_hard_error() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".twlintrc.json", "{}")?;
    test.write_file("src/app.tsx", r#"export const App = () => <div />;"#)?;

    let output = test.run(&["check"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("is the stylesheet compiled?"));
    Ok(())
}

#[test]
fn test_check_with_path_argument() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("proj/.twlintrc.json", "{}")?;
    test.write_file("proj/dist/output.css", ".flex { display: flex; }")?;
    test.write_file(
        "proj/src/app.tsx",
        r#"export const App = () => <div className="flexx" />;"#,
    )?;

    let output = test.run(&["check", "--path", "proj"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).contains("unknown class `flexx`"));
    Ok(())
}

#[test]
fn test_stylesheet_flag_overrides_config() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".twlintrc.json", "{}")?;
    test.write_file("theme.css", ".flex { display: flex; }")?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <div className="flex" />;"#,
    )?;

    let output = test.run(&["check", "--stylesheet", "theme.css"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("no issues found"));
    Ok(())
}

#[test]
fn test_unparseable_file_is_reported_not_fatal() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file("src/broken.tsx", "const = <div;")?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <div className="flex" />;"#,
    )?;

    let output = test.run(&["check"]);
    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    assert!(out.contains("parse-error"), "{out}");
    assert!(out.contains("broken.tsx"), "{out}");
    Ok(())
}

#[test]
fn test_test_files_are_skipped_by_default() -> Result<()> {
    let test = CliTest::with_project()?;
    test.write_file(
        "src/app.test.tsx",
        r#"export const App = () => <div className="itemscenter" />;"#,
    )?;

    let output = test.run(&["check"]);
    assert_eq!(output.status.code(), Some(0), "{}", stdout(&output));
    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = test.run(&[]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage"));
    Ok(())
}

use anyhow::Result;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.run(&["init"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Created .twlintrc.json"));

    let written = std::fs::read_to_string(test.root().join(".twlintrc.json"))?;
    let json: serde_json::Value = serde_json::from_str(&written)?;
    assert!(json.get("includes").is_some());
    assert!(json.get("stylesheet").is_some());
    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".twlintrc.json", r#"{ "includes": ["app"] }"#)?;

    let output = test.run(&["init"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("already exists"));

    let kept = std::fs::read_to_string(test.root().join(".twlintrc.json"))?;
    assert!(kept.contains("app"));
    Ok(())
}

#[test]
fn test_initialized_project_checks_cleanly() -> Result<()> {
    let test = CliTest::new()?;
    test.run(&["init"]);
    test.write_file("dist/output.css", ".flex { display: flex; }")?;
    test.write_file(
        "src/app.tsx",
        r#"export const App = () => <div className="flex" />;"#,
    )?;

    let output = test.run(&["check"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    Ok(())
}

use std::{path::Path, process::Command};

// The page script is exercised by web/tests/app.test.js under node's own test
// runner, against a fake DOM and fetch.
#[test]
fn client_workflow_behaves_in_a_fake_browser() {
    let suite = Path::new(env!("CARGO_MANIFEST_DIR")).join("web/tests/app.test.js");

    let output = match Command::new("node").arg("--test").arg(&suite).output() {
        Ok(output) => output,
        Err(error) => {
            eprintln!("skipping client workflow tests, node is not available: {error}");
            return;
        }
    };

    assert!(
        output.status.success(),
        "client workflow tests failed\n--- stdout ---\n{}\n--- stderr ---\n{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
}

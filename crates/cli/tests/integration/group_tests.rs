//! Group filter integration tests.

use predicates::prelude::*;

use super::common::TestEnv;

const GROUPS: &str = r#"
dev:
  input: [base.yaml]
  output: [dev.yaml]
prod:
  input: [base.yaml, overlay.yaml]
  output: [prod.yaml]
staging:
  input: [overlay.yaml]
  output: [staging.yaml]
"#;

#[test]
fn builds_only_selected_groups() {
  let env = TestEnv::with_mapping(GROUPS);

  env
    .confmerge_cmd()
    .arg("--group")
    .arg("prod")
    .arg("-g")
    .arg("staging")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 2 outputs"));

  assert!(!env.path("dev.yaml").exists());
  assert!(env.path("prod.yaml").exists());
  assert!(env.path("staging.yaml").exists());
}

#[test]
fn without_filter_builds_everything() {
  let env = TestEnv::with_mapping(GROUPS);

  env.confmerge_cmd().assert().success();

  for output in ["dev.yaml", "prod.yaml", "staging.yaml"] {
    assert!(env.path(output).exists(), "{} not built", output);
  }
}

#[test]
fn unknown_group_fails() {
  let env = TestEnv::with_mapping(GROUPS);

  env
    .confmerge_cmd()
    .arg("--group")
    .arg("qa")
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown group 'qa'"))
    .stderr(predicate::str::contains("dev, prod, staging"));

  assert!(!env.path("dev.yaml").exists());
}

/*!
 * Integration tests for multi-file runs through the controller
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use jsonbabel::app_config::Config;
use jsonbabel::app_controller::{Controller, NO_FILES_MESSAGE};
use crate::common;

fn controller(config: Config) -> Controller {
    Controller::with_provider(
        config,
        common::memory_store(),
        Arc::new(common::greeting_provider()),
    )
}

/// Test the controller initialization with the mock provider from config
#[test]
fn test_controller_initialization_withMockConfig_shouldSucceed() -> Result<()> {
    let controller = Controller::with_config(common::test_config(), common::memory_store())?;

    assert_eq!(controller.config().target_language, "es");
    assert_eq!(controller.quota()?, 100);

    Ok(())
}

/// Test a folder run where every file succeeds
#[tokio::test]
async fn test_run_withFolder_shouldTranslateEveryJsonFile() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input_dir = temp_dir.path().join("in");
    fs::create_dir(&input_dir)?;
    common::create_test_file(&input_dir, "a.json", common::GREETING_JSON)?;
    common::create_test_file(&input_dir, "b.json", r#"{"x": "World"}"#)?;
    common::create_test_file(&input_dir, "ignored.txt", "Hello")?;
    let output_dir = temp_dir.path().join("out");

    let controller = controller(common::test_config());
    let report = controller.run(&[input_dir], &output_dir).await?;

    assert!(!report.finished_with_errors);
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.status_message(), "Finished translation!");
    assert_eq!(
        fs::read_to_string(output_dir.join("a_es.json"))?,
        r#"{"a": "Hola", "b": 5, "c": "Mundo"}"#
    );
    assert_eq!(fs::read_to_string(output_dir.join("b_es.json"))?, r#"{"x": "Mundo"}"#);
    assert_eq!(controller.quota()?, 98);

    Ok(())
}

/// Test that the run stops at the first failing file
#[tokio::test]
async fn test_run_withFailingFile_shouldStopAndReportLastError() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let first = common::create_test_file(temp_dir.path(), "1.json", common::GREETING_JSON)?;
    let second = common::create_test_file(
        temp_dir.path(),
        "2.json",
        r#"{"long": "A value that is much longer than twenty characters"}"#,
    )?;
    let third = common::create_test_file(temp_dir.path(), "3.json", r#"{"x": "World"}"#)?;
    let output_dir = temp_dir.path().join("out");

    let mut config = common::test_config();
    config.translation.max_chars_per_request = 20;
    let controller = controller(config);

    let report = controller.run(&[first, second, third], &output_dir).await?;

    assert!(report.finished_with_errors);
    assert_eq!(report.results.len(), 2);
    assert_eq!(report.skipped, 1);
    assert!(report.results[0].success);
    assert!(!report.results[1].success);
    assert!(report.status_message().starts_with("Finished with errors: Value #0"));
    assert!(output_dir.join("1_es.json").exists());
    assert!(!output_dir.join("2_es.json").exists());
    assert!(!output_dir.join("3_es.json").exists());

    Ok(())
}

/// Test that an empty selection is rejected with the status message
#[tokio::test]
async fn test_run_withEmptyFolder_shouldReportNoFilesSelected() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let controller = controller(common::test_config());

    let error = controller
        .run(&[temp_dir.path().to_path_buf()], temp_dir.path())
        .await
        .expect_err("empty selection must fail");

    assert_eq!(error.to_string(), NO_FILES_MESSAGE);

    let no_inputs: Vec<PathBuf> = Vec::new();
    assert!(controller.run(no_inputs.as_slice(), temp_dir.path()).await.is_err());

    Ok(())
}

/// Test that the quota shrinks only for requests that reached the provider
#[test]
fn test_quota_afterRepeatedRun_shouldCountProviderCallsOnly() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let input = common::create_test_file(temp_dir.path(), "greeting.json", common::GREETING_JSON)?;
    let output_dir = temp_dir.path().join("out");
    let controller = controller(common::test_config());

    let reports = tokio_test::block_on(async {
        let first = controller.run(&[input.clone()], &output_dir).await?;
        let second = controller.run(&[input.clone()], &output_dir).await?;
        Ok::<_, anyhow::Error>((first, second))
    })?;

    assert!(!reports.0.finished_with_errors);
    assert!(!reports.1.finished_with_errors);
    assert_eq!(controller.quota()?, 99);

    Ok(())
}

/// Test the output naming for the configured suffix
#[test]
fn test_outputPathFor_shouldUseConfiguredSuffix() {
    let mut config = common::test_config();
    config.output_suffix = "_translated".to_string();
    let controller = controller(config);

    assert_eq!(
        controller.output_path_for(std::path::Path::new("data/menu.json"), std::path::Path::new("out")),
        PathBuf::from("out/menu_translated.json")
    );
}

//! Batch driver scenarios: discovery, concurrency bound, failure isolation.
//!
//! Run with: `cargo test --test batch`

mod common;

use std::time::Duration;

use common::{Call, FakeToolkit, list_dir, touch};
use jpeg_optimizer_lib::{BatchProcessor, OptimizerConfig};

#[tokio::test]
async fn resizes_only_the_oversized_file_and_keeps_originals() {
    let dir = tempfile::tempdir().unwrap();
    let a = touch(dir.path(), "a.jpg");
    let b = touch(dir.path(), "b.jpeg");
    let toolkit = FakeToolkit::new();
    toolkit.set_size(&a, 4000, 3000);
    toolkit.set_size(&b, 10000, 8000);

    let processor = BatchProcessor::new(
        toolkit.clone(),
        OptimizerConfig::new(dir.path(), false, false),
    );
    let summary = processor.run().await.unwrap();

    assert_eq!(summary.total_files, 2);
    assert_eq!(summary.processed, 2);
    assert_eq!(summary.resized, 1);
    assert_eq!(list_dir(dir.path()), ["a-IM.jpg", "a.jpg", "b-IM.jpg", "b.jpeg"]);

    let resizes = toolkit.resize_calls();
    assert_eq!(resizes.len(), 1);
    assert!(matches!(&resizes[0], Call::Resize { input, .. } if input == &b));
}

#[tokio::test]
async fn already_processed_file_is_only_skipped() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "photo-IM.jpg");
    let toolkit = FakeToolkit::new();

    let processor = BatchProcessor::new(
        toolkit.clone(),
        OptimizerConfig::new(dir.path(), true, true),
    );
    let summary = processor.run().await.unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.processed, 0);
    assert_eq!(toolkit.transform_count(), 0);
    assert!(toolkit.calls().is_empty());
    assert_eq!(list_dir(dir.path()), ["photo-IM.jpg"]);
}

#[tokio::test]
async fn missing_directory_fails_before_any_work() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist");
    let toolkit = FakeToolkit::new();

    let processor = BatchProcessor::new(toolkit.clone(), OptimizerConfig::new(&missing, true, false));
    let err = processor.run().await.unwrap_err();

    assert!(err.is_fatal());
    assert!(toolkit.calls().is_empty());
    assert!(!missing.exists());
    assert!(list_dir(dir.path()).is_empty());
}

#[tokio::test]
async fn ignores_other_files_and_subdirectories() {
    let dir = tempfile::tempdir().unwrap();
    let a = touch(dir.path(), "a.jpg");
    touch(dir.path(), "upper.JPG");
    touch(dir.path(), "notes.txt");
    std::fs::create_dir(dir.path().join("nested")).unwrap();
    let nested = touch(&dir.path().join("nested"), "inner.jpg");
    let toolkit = FakeToolkit::new();
    toolkit.set_size(&a, 100, 100);
    toolkit.set_size(&nested, 100, 100);

    let summary = BatchProcessor::new(toolkit.clone(), OptimizerConfig::new(dir.path(), false, false))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.total_files, 1);
    assert_eq!(summary.processed, 1);
    assert_eq!(list_dir(&dir.path().join("nested")), ["inner.jpg"]);
}

#[tokio::test]
async fn one_broken_file_does_not_stop_the_others() {
    let dir = tempfile::tempdir().unwrap();
    let good = touch(dir.path(), "good.jpg");
    touch(dir.path(), "unreadable.jpg");
    let retry = touch(dir.path(), "retry.jpeg");
    let toolkit = FakeToolkit::new();
    toolkit.set_size(&good, 800, 600);
    toolkit.set_size(&retry, 800, 600);
    toolkit.fail_primary("retry.jpeg");

    let summary = BatchProcessor::new(toolkit.clone(), OptimizerConfig::new(dir.path(), true, true))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.processed, 2);
    assert_eq!(summary.failed, 1);
    assert!(summary.has_failures());
    assert_eq!(list_dir(dir.path()), ["good-IM.jpg", "retry-IM.jpg", "unreadable.jpg"]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn never_runs_more_than_thirty_two_pipelines_at_once() {
    let dir = tempfile::tempdir().unwrap();
    let toolkit = FakeToolkit::new().with_encode_delay(Duration::from_millis(50));
    for i in 0..100 {
        let path = touch(dir.path(), &format!("img{i:03}.jpg"));
        toolkit.set_size(&path, 640, 480);
    }

    let processor = BatchProcessor::new(toolkit.clone(), OptimizerConfig::new(dir.path(), false, false));
    let summary = processor.run().await.unwrap();

    // Every task has finished by the time `run` returns.
    assert_eq!(summary.processed, 100);
    assert_eq!(toolkit.reencode_calls().len(), 100);
    assert_eq!(processor.pool().active_workers(), 0);

    // The cap is reached but never exceeded.
    assert!(toolkit.peak_concurrency() <= 32);
    assert_eq!(processor.pool().peak_workers(), 32);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn respects_a_smaller_worker_count() {
    let dir = tempfile::tempdir().unwrap();
    let toolkit = FakeToolkit::new().with_encode_delay(Duration::from_millis(10));
    for i in 0..12 {
        let path = touch(dir.path(), &format!("p{i}.jpeg"));
        toolkit.set_size(&path, 10, 10);
    }

    let config = OptimizerConfig::new(dir.path(), false, false).with_max_workers(3);
    let processor = BatchProcessor::new(toolkit.clone(), config);
    let summary = processor.run().await.unwrap();

    assert_eq!(summary.processed, 12);
    assert!(toolkit.peak_concurrency() <= 3);
}

#[tokio::test]
async fn empty_directory_is_a_successful_run() {
    let dir = tempfile::tempdir().unwrap();
    let summary = BatchProcessor::new(FakeToolkit::new(), OptimizerConfig::new(dir.path(), false, false))
        .run()
        .await
        .unwrap();

    assert_eq!(summary.total_files, 0);
    assert!(!summary.has_failures());
}

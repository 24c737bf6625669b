//! Firestore emulator integration tests
//!
//! These tests require a running Firestore emulator.
//! Set FIRESTORE_EMULATOR_HOST (e.g. `localhost:8080`) to run.

use docstore_loader::config::{LoadConfig, StoreConfig};
use docstore_loader::pipeline::Loader;
use std::io::Write;

/// Get emulator host from environment or skip
fn get_emulator_host() -> Option<String> {
    std::env::var("FIRESTORE_EMULATOR_HOST").ok()
}

#[tokio::test]
async fn test_emulator_load() {
    let Some(host) = get_emulator_host() else {
        println!("Skipping: FIRESTORE_EMULATOR_HOST not set");
        return;
    };

    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "1,ا,alif,letter,first letter").unwrap();
    writeln!(file, "2,ب,ba,letter,second letter").unwrap();

    let collection = format!("names_test_{}", std::process::id());
    let config = LoadConfig::new(file.path()).with_collection(collection);
    let store = StoreConfig::emulator(&host, "demo-loader");

    let mut loader = Loader::connect(config, &store).unwrap();
    let report = loader.run().await.unwrap();

    assert_eq!(report.written, 2);
    assert_ne!(report.keys[0], report.keys[1]);
}

//! Primary and auxiliary runtime resolution.

mod common;

use common::write;
use kodegen_bundler_portable::bundler::{
    AuxiliaryOutcome, AuxiliarySettings, BundleLayout, DiscoveryMethod, Error,
    runtime::{locate_auxiliary_runtime, locate_primary_runtime, resolve_auxiliary_runtime},
};

#[test]
fn primary_runtime_uses_parent_of_bin_home() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("python");
    std::fs::create_dir_all(home.join("bin")).unwrap();
    std::fs::create_dir_all(home.join("lib").join("python3.12")).unwrap();
    let cfg = dir.path().join("pyvenv.cfg");
    write(&cfg, &format!("home = {}\n", home.join("bin").display()));

    let runtime = locate_primary_runtime(&cfg).unwrap();

    assert_eq!(runtime.path(), home);
    assert_eq!(runtime.method(), DiscoveryMethod::ConfigFile);
}

#[test]
fn primary_runtime_rejects_bin_without_stdlib() {
    let dir = tempfile::tempdir().unwrap();
    let prefix = dir.path().join("prefix");
    std::fs::create_dir_all(prefix.join("bin")).unwrap();
    std::fs::create_dir_all(prefix.join("share")).unwrap();
    let cfg = dir.path().join("pyvenv.cfg");
    write(&cfg, &format!("home = {}\n", prefix.join("bin").display()));

    match locate_primary_runtime(&cfg) {
        Err(Error::PrimaryRuntime { path, reason }) => {
            assert_eq!(path, prefix.join("bin"));
            assert!(reason.contains("not a standalone runtime"), "{reason}");
        }
        other => panic!("expected primary runtime error, got {other:?}"),
    }
}

#[cfg(unix)]
#[test]
fn primary_runtime_rejects_system_prefix() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = dir.path().join("pyvenv.cfg");
    write(&cfg, "home = /usr/bin\n");

    assert!(matches!(
        locate_primary_runtime(&cfg),
        Err(Error::PrimaryRuntime { .. })
    ));
}

#[test]
fn primary_runtime_keeps_non_bin_home() {
    let dir = tempfile::tempdir().unwrap();
    let home = dir.path().join("Python311");
    std::fs::create_dir_all(&home).unwrap();
    let cfg = dir.path().join("pyvenv.cfg");
    write(&cfg, &format!("home = {}\nversion = 3.11.9\n", home.display()));

    assert_eq!(locate_primary_runtime(&cfg).unwrap().path(), home);
}

#[test]
fn primary_runtime_failures_are_fatal() {
    let dir = tempfile::tempdir().unwrap();

    let missing = locate_primary_runtime(&dir.path().join("pyvenv.cfg"));
    assert!(matches!(missing, Err(Error::PrimaryRuntime { .. })));

    let no_home = dir.path().join("no-home.cfg");
    write(&no_home, "version = 3.11.9\n");
    assert!(matches!(
        locate_primary_runtime(&no_home),
        Err(Error::PrimaryRuntime { .. })
    ));

    let dangling = dir.path().join("dangling.cfg");
    write(&dangling, &format!("home = {}\n", dir.path().join("gone").display()));
    assert!(matches!(
        locate_primary_runtime(&dangling),
        Err(Error::PrimaryRuntime { .. })
    ));
}

#[cfg(unix)]
#[test]
fn auxiliary_runtime_found_on_search_path() {
    let dir = tempfile::tempdir().unwrap();
    common::write_executable(&dir.path().join("node"), "#!/bin/sh\necho v20\n");
    let settings = AuxiliarySettings {
        search_path: Some(dir.path().display().to_string()),
        ..Default::default()
    };

    let found = locate_auxiliary_runtime(&settings).unwrap();

    assert_eq!(found.path(), dir.path().join("node"));
    assert_eq!(found.method(), DiscoveryMethod::SearchPath);
}

#[test]
fn auxiliary_runtime_absent_from_search_path() {
    let dir = tempfile::tempdir().unwrap();
    let settings = AuxiliarySettings {
        search_path: Some(dir.path().display().to_string()),
        ..Default::default()
    };
    assert!(locate_auxiliary_runtime(&settings).is_none());
}

#[cfg(unix)]
#[tokio::test]
async fn local_auxiliary_runtime_is_copied_into_bin() {
    let dir = tempfile::tempdir().unwrap();
    let tools = dir.path().join("tools");
    common::write_executable(&tools.join("node"), "#!/bin/sh\necho v20\n");
    let layout = BundleLayout::new(dir.path().join("bundle"), "solidlsp", "language_servers");
    layout.recreate().await.unwrap();
    let settings = AuxiliarySettings {
        search_path: Some(tools.display().to_string()),
        platform: Some("linux-x64".into()),
        download: false,
        ..Default::default()
    };

    let outcome = resolve_auxiliary_runtime(&settings, &layout).await;

    match outcome {
        AuxiliaryOutcome::Installed {
            source,
            destination,
        } => {
            assert_eq!(source.method(), DiscoveryMethod::SearchPath);
            assert_eq!(destination, layout.bin_dir().join("node"));
            assert!(destination.is_file());
        }
        other => panic!("expected installed runtime, got {other:?}"),
    }
}

#[tokio::test]
async fn auxiliary_runtime_degrades_when_every_strategy_fails() {
    let dir = tempfile::tempdir().unwrap();
    let layout = BundleLayout::new(dir.path().join("bundle"), "solidlsp", "language_servers");
    layout.recreate().await.unwrap();
    let settings = AuxiliarySettings {
        search_path: Some(dir.path().join("empty").display().to_string()),
        download: false,
        ..Default::default()
    };

    let outcome = resolve_auxiliary_runtime(&settings, &layout).await;

    match outcome {
        AuxiliaryOutcome::Unavailable { reasons } => assert_eq!(reasons.len(), 1),
        other => panic!("expected unavailable runtime, got {other:?}"),
    }
    assert_eq!(std::fs::read_dir(layout.bin_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn disabled_auxiliary_runtime_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let layout = BundleLayout::new(dir.path().join("bundle"), "solidlsp", "language_servers");
    let settings = AuxiliarySettings {
        enabled: false,
        ..Default::default()
    };

    let outcome = resolve_auxiliary_runtime(&settings, &layout).await;
    assert!(!outcome.is_installed());
}

//! First-party source injection.

mod common;

use common::write;
use kodegen_bundler_portable::bundler::{AppSettings, Error, source::inject_source};
use std::{fs, path::Path};

fn app() -> AppSettings {
    AppSettings {
        name: "my-app".into(),
        ..Default::default()
    }
}

fn project(root: &Path) {
    write(&root.join("src/my_app/__init__.py"), "");
    write(&root.join("src/my_app/cli.py"), "VERSION = 1\n");
    write(&root.join("src/tools/__init__.py"), "");
    write(&root.join("src/.git/HEAD"), "ref");
    write(&root.join("src/__pycache__/x.pyc"), "");
    write(&root.join("src/setup.cfg"), "");
}

#[tokio::test]
async fn copies_packages_and_writes_entry_point() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let resource = dir.path().join("resources/launcher.py");
    write(&resource, "def main(): pass\n");
    let lib = dir.path().join("lib");

    let injection = inject_source(&app(), &dir.path().join("src"), &lib, &resource)
        .await
        .unwrap();

    assert_eq!(injection.packages, vec!["my_app", "tools"]);
    assert!(!lib.join(".git").exists());
    assert!(!lib.join("__pycache__").exists());
    assert!(!lib.join("setup.cfg").exists());
    assert_eq!(injection.entry_point, lib.join("my_app/__main__.py"));
    assert_eq!(
        fs::read_to_string(&injection.entry_point).unwrap(),
        "from my_app.cli import top_level\nif __name__ == '__main__':\n    top_level()\n"
    );
    assert_eq!(injection.gui_module, Some(lib.join("my_app/launcher.py")));
    assert_eq!(
        fs::read_to_string(lib.join("my_app/launcher.py")).unwrap(),
        "def main(): pass\n"
    );
}

#[tokio::test]
async fn second_run_reflects_changed_source() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let src = dir.path().join("src");
    let lib = dir.path().join("lib");
    let resource = dir.path().join("missing.py");
    write(&lib.join("requests/__init__.py"), "installed");

    inject_source(&app(), &src, &lib, &resource).await.unwrap();
    write(&src.join("my_app/cli.py"), "VERSION = 2\n");
    fs::remove_file(src.join("tools/__init__.py")).unwrap();
    write(&src.join("tools/new.py"), "");
    inject_source(&app(), &src, &lib, &resource).await.unwrap();

    assert_eq!(
        fs::read_to_string(lib.join("my_app/cli.py")).unwrap(),
        "VERSION = 2\n"
    );
    assert!(lib.join("tools/new.py").is_file());
    assert!(!lib.join("tools/__init__.py").exists());
    // Installed dependencies are not source packages and stay untouched.
    assert_eq!(
        fs::read_to_string(lib.join("requests/__init__.py")).unwrap(),
        "installed"
    );
}

#[tokio::test]
async fn missing_gui_resource_is_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    project(dir.path());
    let lib = dir.path().join("lib");

    let injection = inject_source(
        &app(),
        &dir.path().join("src"),
        &lib,
        &dir.path().join("nope/launcher.py"),
    )
    .await
    .unwrap();

    assert_eq!(injection.gui_module, None);
    assert!(lib.join("my_app/__main__.py").is_file());
}

#[tokio::test]
async fn missing_application_package_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("src/other/__init__.py"), "");
    let app = AppSettings {
        name: "my-app".into(),
        ..Default::default()
    };

    let err = inject_source(
        &app,
        &dir.path().join("src"),
        &dir.path().join("lib"),
        &dir.path().join("launcher.py"),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::MissingAppPackage { ref package, .. } if package == "my_app"));
}

#[tokio::test]
async fn explicit_package_and_entry_override_defaults() {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("src/core/__init__.py"), "");
    let app = AppSettings {
        name: "fancy-tool".into(),
        package: Some("core".into()),
        entry_module: "main".into(),
        entry_function: "run".into(),
        ..Default::default()
    };
    let lib = dir.path().join("lib");

    inject_source(&app, &dir.path().join("src"), &lib, &dir.path().join("x.py"))
        .await
        .unwrap();

    assert!(
        fs::read_to_string(lib.join("core/__main__.py"))
            .unwrap()
            .starts_with("from core.main import run\n")
    );
}

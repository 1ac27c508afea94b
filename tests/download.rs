//! Auxiliary runtime download against a local HTTP server.

#![cfg(unix)]

mod common;

use common::Fixture;
use flate2::{Compression, write::GzEncoder};
use kodegen_bundler_portable::bundler::{
    AuxiliaryOutcome, AuxiliarySettings, BundleLayout, Bundler, DiscoveryMethod, Platform,
    runtime::{acquire_auxiliary_runtime, resolve_auxiliary_runtime},
};
use std::{
    collections::HashMap,
    io::{Cursor, Write},
    os::unix::fs::PermissionsExt,
    sync::{Arc, Once},
};
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpListener,
};

const VERSION: &str = "v20.10.0";
const NODE: &str = "#!/bin/sh\necho v20.10.0\n";

/// Loopback requests must not be routed through a proxy from the environment.
fn without_proxies() {
    static CLEAR: Once = Once::new();
    CLEAR.call_once(|| {
        for var in ["HTTP_PROXY", "http_proxy", "HTTPS_PROXY", "https_proxy", "ALL_PROXY", "all_proxy"] {
            // SAFETY: runs once, before any request in this test binary reads the environment.
            unsafe { std::env::remove_var(var) };
        }
    });
}

/// Serves `files` by request path; every other path is a 404.
async fn serve(files: HashMap<String, Vec<u8>>) -> String {
    without_proxies();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let files = Arc::new(files);

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            let files = Arc::clone(&files);
            tokio::spawn(async move {
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&request);
                let path = request.split_whitespace().nth(1).unwrap_or("/");
                let (status, body) = match files.get(path) {
                    Some(body) => ("200 OK", body.clone()),
                    None => ("404 Not Found", b"not found".to_vec()),
                };
                let head = format!(
                    "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                    body.len()
                );
                let _ = socket.write_all(head.as_bytes()).await;
                let _ = socket.write_all(&body).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{addr}")
}

/// Release tarball with the executable plus package-manager files around it.
fn node_tarball(stem: &str, with_node: bool) -> Vec<u8> {
    let mut builder = tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()));
    let mut entries = vec![
        (format!("{stem}/bin/npm"), "#!/bin/sh\n"),
        (format!("{stem}/lib/node_modules/npm/package.json"), "{}"),
    ];
    if with_node {
        entries.push((format!("{stem}/bin/node"), NODE));
    }
    for (path, contents) in entries {
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(contents.len() as u64);
        header.set_mode(0o644);
        builder
            .append_data(&mut header, path, contents.as_bytes())
            .unwrap();
    }
    builder.into_inner().unwrap().finish().unwrap()
}

fn node_zip(stem: &str) -> Vec<u8> {
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = zip::write::SimpleFileOptions::default();
    zip.start_file(format!("{stem}/node.exe"), options).unwrap();
    zip.write_all(b"MZ").unwrap();
    zip.start_file(format!("{stem}/npm.cmd"), options).unwrap();
    zip.write_all(b"@echo off").unwrap();
    zip.finish().unwrap().into_inner()
}

fn settings(base_url: String, platform: &str, search_path: &std::path::Path) -> AuxiliarySettings {
    AuxiliarySettings {
        base_url,
        platform: Some(platform.into()),
        search_path: Some(search_path.display().to_string()),
        ..Default::default()
    }
}

async fn layout_in(root: &std::path::Path) -> BundleLayout {
    let layout = BundleLayout::new(root.join("bundle"), "solidlsp", "language_servers");
    layout.recreate().await.unwrap();
    layout
}

#[tokio::test]
async fn downloaded_runtime_contributes_only_its_executable() {
    let dir = tempfile::tempdir().unwrap();
    let stem = format!("node-{VERSION}-linux-x64");
    let base = serve(HashMap::from([(
        format!("/{VERSION}/{stem}.tar.gz"),
        node_tarball(&stem, true),
    )]))
    .await;
    let layout = layout_in(dir.path()).await;
    let settings = settings(base, "linux-x64", &dir.path().join("empty"));

    let outcome = resolve_auxiliary_runtime(&settings, &layout).await;

    let node = layout.bin_dir().join("node");
    match outcome {
        AuxiliaryOutcome::Installed {
            source,
            destination,
        } => {
            assert_eq!(source.method(), DiscoveryMethod::Download);
            assert_eq!(destination, node);
        }
        other => panic!("expected downloaded runtime, got {other:?}"),
    }
    assert_eq!(std::fs::read_to_string(&node).unwrap(), NODE);
    let mode = std::fs::metadata(&node).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o755);
    assert_eq!(std::fs::read_dir(layout.bin_dir()).unwrap().count(), 1);
    assert!(!layout.scratch_dir().exists());
}

#[tokio::test]
async fn windows_archive_is_unpacked_from_zip() {
    let dir = tempfile::tempdir().unwrap();
    let stem = format!("node-{VERSION}-win-x64");
    let base = serve(HashMap::from([(
        format!("/{VERSION}/{stem}.zip"),
        node_zip(&stem),
    )]))
    .await;
    let layout = layout_in(dir.path()).await;
    let settings = settings(base, "win-x64", &dir.path().join("empty"));
    let platform: Platform = "win-x64".parse().unwrap();

    let runtime = acquire_auxiliary_runtime(
        &settings,
        platform,
        &layout.bin_dir(),
        &layout.scratch_dir(),
    )
    .await
    .unwrap();

    assert_eq!(runtime.path(), layout.bin_dir().join("node.exe"));
    assert_eq!(std::fs::read(runtime.path()).unwrap(), b"MZ");
    assert_eq!(std::fs::read_dir(layout.bin_dir()).unwrap().count(), 1);
    assert!(!layout.scratch_dir().exists());
}

#[tokio::test]
async fn archive_without_executable_cleans_scratch() {
    let dir = tempfile::tempdir().unwrap();
    let stem = format!("node-{VERSION}-linux-x64");
    let base = serve(HashMap::from([(
        format!("/{VERSION}/{stem}.tar.gz"),
        node_tarball(&stem, false),
    )]))
    .await;
    let layout = layout_in(dir.path()).await;
    let settings = settings(base, "linux-x64", &dir.path().join("empty"));

    let result = acquire_auxiliary_runtime(
        &settings,
        "linux-x64".parse().unwrap(),
        &layout.bin_dir(),
        &layout.scratch_dir(),
    )
    .await;

    assert!(result.is_err());
    assert!(!layout.scratch_dir().exists());
    assert_eq!(std::fs::read_dir(layout.bin_dir()).unwrap().count(), 0);
}

#[tokio::test]
async fn failed_download_degrades_assembly() {
    let fixture = Fixture::new();
    let base = serve(HashMap::new()).await;
    let settings = fixture
        .builder()
        .auxiliary(settings(base, "linux-x64", &fixture.root().join("empty")))
        .build()
        .unwrap();

    let summary = Bundler::new(settings).assemble().await.unwrap();

    match &summary.auxiliary_runtime {
        AuxiliaryOutcome::Unavailable { reasons } => {
            assert_eq!(reasons.len(), 2, "{reasons:?}");
            assert!(reasons[1].starts_with("Download"), "{reasons:?}");
            assert!(reasons[1].contains("404"), "{reasons:?}");
        }
        other => panic!("expected unavailable runtime, got {other:?}"),
    }
    assert!(
        summary
            .warnings
            .iter()
            .any(|w| w.starts_with("node is not bundled"))
    );
    assert_eq!(
        std::fs::read_dir(fixture.output().join("bin")).unwrap().count(),
        0
    );
    assert!(!fixture.output().join(".aux-scratch").exists());
    assert!(fixture.output().join("my-app.sh").is_file());
}

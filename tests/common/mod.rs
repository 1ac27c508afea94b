//! Shared fixtures: a fake project with an isolated environment, a fake
//! dependency tool and an asset cache, all inside one temporary directory.

#![allow(dead_code)]

use kodegen_bundler_portable::bundler::{
    AppSettings, AssetSettings, AuxiliarySettings, DependencySettings, LauncherFlavor,
    LauncherSettings, Settings, SettingsBuilder,
};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::TempDir;

pub const APP_NAME: &str = "my-app";
pub const PACKAGE: &str = "my_app";

/// Dependency tool stand-in: records every invocation, writes a lock file on
/// `export` and one installed package on `pip install`.
const FAKE_UV: &str = r#"#!/bin/sh
echo "$*" >> "__LOG__"
case "$1" in
  export)
    while [ $# -gt 0 ]; do
      if [ "$1" = "--output-file" ]; then printf 'requests==2.31.0\n' > "$2"; fi
      shift
    done
    ;;
  pip)
    while [ $# -gt 0 ]; do
      if [ "$1" = "--target" ]; then
        mkdir -p "$2/requests" && printf 'VERSION = "2.31.0"\n' > "$2/requests/__init__.py"
      fi
      shift
    done
    ;;
  *)
    echo "unexpected subcommand $1" >&2
    exit 2
    ;;
esac
"#;

/// Dependency tool whose install step fails.
const FAILING_UV: &str = r#"#!/bin/sh
case "$1" in
  export) echo "exported" ;;
  *) echo "resolver exploded" >&2; exit 1 ;;
esac
"#;

/// Interpreter stand-in: prints its arguments and bootstrap environment.
pub const FAKE_PYTHON: &str = r#"#!/bin/sh
for a in "$@"; do echo "arg:$a"; done
echo "PATH=$PATH"
echo "PYTHONPATH=$PYTHONPATH"
echo "SOLIDLSP_DIR=$SOLIDLSP_DIR"
exit "${FAKE_EXIT:-0}"
"#;

pub struct Fixture {
    pub dir: TempDir,
}

impl Fixture {
    pub fn new() -> Self {
        let fixture = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        fixture.write_project();
        fixture.write_runtime();
        fixture.write_tool(FAKE_UV);
        fixture.write_cache(&["java", "typescript"]);
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn project(&self) -> PathBuf {
        self.root().join("project")
    }

    pub fn output(&self) -> PathBuf {
        self.root().join("out").join("bundle")
    }

    pub fn cache(&self) -> PathBuf {
        self.root().join("cache")
    }

    pub fn tool(&self) -> PathBuf {
        self.root().join("tools").join("uv")
    }

    pub fn tool_log(&self) -> PathBuf {
        self.root().join("tools").join("uv.log")
    }

    pub fn runtime_home(&self) -> PathBuf {
        self.root().join("pyhome")
    }

    pub fn resource(&self) -> PathBuf {
        self.root().join("resources").join("launcher.py")
    }

    /// Invocations recorded by the fake dependency tool, one per line.
    pub fn tool_calls(&self) -> Vec<String> {
        fs::read_to_string(self.tool_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    pub fn use_failing_tool(&self) {
        self.write_tool(FAILING_UV);
    }

    fn write_project(&self) {
        let src = self.project().join("src");
        write(&src.join(PACKAGE).join("__init__.py"), "");
        write(&src.join(PACKAGE).join("cli.py"), "def top_level():\n    print('v1')\n");
        write(&src.join("helpers").join("__init__.py"), "");
        write(&src.join(".hidden").join("secret.py"), "");
        write(&src.join("__pycache__").join("cli.pyc"), "");
        write(&src.join("README.md"), "not a package");
        write(
            &self.project().join("pyproject.toml"),
            "[project]\nname = \"my-app\"\nversion = \"1.2.3\"\ndescription = \"Test app\"\n",
        );
        write(&self.resource(), "def main():\n    pass\n");
    }

    fn write_runtime(&self) {
        let bin = self.runtime_home().join("bin");
        write_executable(&bin.join("python3"), FAKE_PYTHON);
        write(
            &self.runtime_home().join("lib").join("python3.11").join("os.py"),
            "# stdlib\n",
        );
        write(
            &self.project().join(".venv").join("pyvenv.cfg"),
            &format!(
                "home = {}\ninclude-system-site-packages = false\nversion = 3.11.9\n",
                bin.display()
            ),
        );
    }

    fn write_tool(&self, script: &str) {
        let script = script.replace("__LOG__", &self.tool_log().display().to_string());
        write_executable(&self.tool(), &script);
    }

    pub fn write_cache(&self, names: &[&str]) {
        for name in names {
            write(
                &self.cache().join(name).join("server").join("run.sh"),
                &format!("echo {name}\n"),
            );
        }
    }

    /// Settings with a posix launcher, no auxiliary runtime and an explicit
    /// asset selection of one cached and one missing name.
    pub fn builder(&self) -> SettingsBuilder {
        SettingsBuilder::new()
            .project_root(self.project())
            .output_dir(self.output())
            .app(AppSettings {
                name: APP_NAME.into(),
                version: Some("1.2.3".into()),
                ..Default::default()
            })
            .dependencies(DependencySettings {
                tool: self.tool(),
                ..Default::default()
            })
            .auxiliary(AuxiliarySettings {
                enabled: false,
                ..Default::default()
            })
            .assets(AssetSettings {
                cache_root: Some(self.cache()),
                selection: Some(["java".to_string(), "ruby".to_string()].into()),
                ..Default::default()
            })
            .launcher(LauncherSettings {
                flavor: Some(LauncherFlavor::Posix),
                resource: Some(self.resource()),
                ..Default::default()
            })
    }

    pub fn settings(&self) -> Settings {
        self.builder().build().unwrap()
    }
}

pub fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

pub fn write_executable(path: &Path, contents: &str) {
    write(path, contents);
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
    }
}

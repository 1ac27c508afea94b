//! Launcher and README templates.
//!
//! Rendered with escaping disabled. Path values are shell expressions over
//! `BASE_DIR`, `RUNTIME_HOME` and `LIB_DIR`, which the scripts compute from
//! their own location at run time. A backslash directly before `{{` escapes
//! the mustache, so batch paths are joined before rendering.

/// `cmd.exe` launcher. Written with CRLF line endings.
pub const BATCH_TEMPLATE: &str = r#"@echo off
setlocal

set "BASE_DIR=%~dp0"
set "BASE_DIR=%BASE_DIR:~0,-1%"

set "RUNTIME_HOME=%BASE_DIR%\runtime"
set "AUX_HOME=%BASE_DIR%\bin"
set "LIB_DIR=%BASE_DIR%\lib"
set "{{data_env_var}}={{data_dir}}"

REM Runtime, auxiliary runtime and interop DLL directories
set "PATH=%RUNTIME_HOME%;{{script_dir}};%AUX_HOME%{{#each interop_bin_dirs}};{{this}}{{/each}};%PATH%"

REM Bundled libraries first, then interop libraries
set "{{module_path_var}}=%LIB_DIR%{{#each interop_lib_dirs}};{{this}}{{/each}};%{{module_path_var}}%"

"{{interpreter}}" -m {{module}} %*
set "EXIT_CODE=%ERRORLEVEL%"

if %EXIT_CODE% NEQ 0 (
    echo {{label}} exited with error code %EXIT_CODE%
    pause
)

endlocal & exit /b %EXIT_CODE%
"#;

/// POSIX `sh` launcher.
pub const POSIX_TEMPLATE: &str = r#"#!/bin/sh

BASE_DIR=$(CDPATH= cd -- "$(dirname -- "$0")" && pwd -P) || exit 1

RUNTIME_HOME="$BASE_DIR/runtime"
AUX_HOME="$BASE_DIR/bin"
LIB_DIR="$BASE_DIR/lib"
{{data_env_var}}="{{data_dir}}"
export {{data_env_var}}

PATH="$RUNTIME_HOME:{{script_dir}}:$AUX_HOME{{#each interop_bin_dirs}}:{{this}}{{/each}}:$PATH"
export PATH

{{module_path_var}}="$LIB_DIR{{#each interop_lib_dirs}}:{{this}}{{/each}}{{inherited_module_path}}"
export {{module_path_var}}

"{{interpreter}}" -m {{module}} "$@"
EXIT_CODE=$?

if [ "$EXIT_CODE" -ne 0 ]; then
    echo "{{label}} exited with error code $EXIT_CODE" >&2
    if [ -t 0 ] && [ -t 1 ]; then
        printf 'Press Enter to continue...' >&2
        read -r _ || true
    fi
fi

exit "$EXIT_CODE"
"#;

/// Bundle README.
pub const README_TEMPLATE: &str = r#"# {{name}} Standalone

This is a fully portable version of {{name}}{{#if version}} {{version}}{{/if}}.
{{#if description}}
{{description}}
{{/if}}
## Usage

- `{{console_launcher}}` runs the command line interface.
- `{{gui_launcher}}` runs the graphical launcher.

Arguments are passed through unchanged and the exit code is preserved.
The folder can be moved or copied anywhere: the launchers compute every
path from their own location.

## Layout

- `bin/` {{aux_executable}} and helper executables
- `runtime/` bundled interpreter
- `lib/` dependencies and {{name}} source
- `{{assets_dir}}/` optional assets
- `{{lock_file}}` pinned dependency list used for this build

## Optional assets
{{#if assets}}
{{#each assets}}
- {{this}}
{{/each}}
{{else}}
None were bundled.
{{/if}}
## Notes

{{#if aux_installed}}
{{aux_executable}} is included.
{{else}}
{{aux_executable}} is not included; assets that need it will not work.
{{/if}}
A downloaded {{aux_executable}} carries only its executable. Its package
manager and global tooling are not part of the bundle.
"#;

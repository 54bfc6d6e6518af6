//! Success-path tests that need root and `CAP_SYS_ADMIN`.
//!
//! Each test builds a minimal root filesystem holding `sh` and the shared
//! libraries `ldd` reports for it. Without root, or when the kernel
//! refuses the namespaces (e.g. an unprivileged container), the tests
//! return early.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const MARKER: &str = "NSROOT_MARKER";

/// A scratch working directory with a populated `rootfs/` inside.
struct Sandbox {
    dir: tempfile::TempDir,
}

impl Sandbox {
    /// Builds the sandbox, or returns `None` when isolation is unavailable.
    fn new() -> Option<Self> {
        if !nix::unistd::geteuid().is_root() {
            return None;
        }

        let dir = tempfile::tempdir().unwrap();
        let rootfs = dir.path().join("rootfs");
        std::fs::create_dir_all(&rootfs).unwrap();
        std::fs::write(rootfs.join(MARKER), b"").unwrap();

        let sh = find_sh()?;
        copy_into(&rootfs, &sh, Path::new("/bin/sh"));
        for lib in shared_libraries(&sh) {
            copy_into(&rootfs, &lib, &lib);
        }

        let sandbox = Self { dir };
        let check = sandbox.run(&["sh", "-c", "exit 0"]);
        if !check.status.success() {
            let stderr = String::from_utf8_lossy(&check.stderr);
            assert!(
                stderr.contains("namespace setup failed") || stderr.contains("making mounts private"),
                "isolation available but launch failed: {stderr}"
            );
            return None;
        }
        Some(sandbox)
    }

    fn run(&self, args: &[&str]) -> Output {
        let mut full = vec!["run"];
        full.extend_from_slice(args);
        Command::new(env!("CARGO_BIN_EXE_nsroot"))
            .args(&full)
            .current_dir(self.dir.path())
            .env("RUST_LOG", "error")
            .output()
            .expect("failed to start nsroot")
    }
}

fn find_sh() -> Option<PathBuf> {
    ["/bin/sh", "/usr/bin/sh"]
        .iter()
        .map(Path::new)
        .find(|p| p.exists())
        .and_then(|p| std::fs::canonicalize(p).ok())
}

/// Paths of the shared objects `binary` loads, as listed by `ldd`.
fn shared_libraries(binary: &Path) -> Vec<PathBuf> {
    let Ok(out) = Command::new("ldd").arg(binary).output() else {
        return Vec::new();
    };
    String::from_utf8_lossy(&out.stdout)
        .lines()
        .filter_map(|line| line.split_whitespace().find(|tok| tok.starts_with('/')))
        .map(PathBuf::from)
        .collect()
}

/// Copies host file `src` to `rootfs/<dest>`, creating parent directories.
fn copy_into(rootfs: &Path, src: &Path, dest: &Path) {
    let target = rootfs.join(dest.strip_prefix("/").unwrap_or(dest));
    std::fs::create_dir_all(target.parent().unwrap()).unwrap();
    let _ = std::fs::copy(src, &target).unwrap();
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).trim().to_string()
}

#[test]
fn command_runs_as_pid_one() {
    let Some(sandbox) = Sandbox::new() else {
        return;
    };
    let out = sandbox.run(&["sh", "-c", "echo $$"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout(&out), "1");
}

#[test]
fn root_listing_shows_rootfs_not_host() {
    let Some(sandbox) = Sandbox::new() else {
        return;
    };
    let out = sandbox.run(&["sh", "-c", "echo /*"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let entries: Vec<String> = stdout(&out).split_whitespace().map(String::from).collect();
    assert!(entries.contains(&format!("/{MARKER}")), "{entries:?}");
    assert!(entries.contains(&"/oldrootfs".to_string()), "{entries:?}");
    assert!(!entries.contains(&"/etc".to_string()), "{entries:?}");
}

#[test]
fn hostname_change_stays_inside() {
    let Some(sandbox) = Sandbox::new() else {
        return;
    };
    let before = nix::unistd::gethostname().unwrap();

    let out = sandbox.run(&[
        "--hostname",
        "nsroot-box",
        "--mount-proc",
        "sh",
        "-c",
        "read h < /proc/sys/kernel/hostname; echo $h",
    ]);

    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(stdout(&out), "nsroot-box");
    assert_eq!(nix::unistd::gethostname().unwrap(), before);
}

#[test]
fn exit_status_is_propagated() {
    let Some(sandbox) = Sandbox::new() else {
        return;
    };
    assert_eq!(sandbox.run(&["sh", "-c", "exit 0"]).status.code(), Some(0));

    let failed = sandbox.run(&["sh", "-c", "exit 7"]);
    assert_eq!(failed.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&failed.stderr).contains("exit status 7"));
}

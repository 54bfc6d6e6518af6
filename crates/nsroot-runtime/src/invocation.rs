//! The parsed form of one process invocation.

use std::ffi::{OsStr, OsString};
use std::fmt;

use nsroot_common::config::IsolationConfig;
use nsroot_common::constants::{CHILD_MODE, RUN_MODE, SELF_EXE};
use nsroot_common::error::{NsrootError, Result};

/// Which phase a process invocation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Launcher: create the isolated process and wait for it.
    Run,
    /// Isolation bootstrap: switch root and exec the command.
    Child,
}

impl Mode {
    /// The selector string used on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Run => RUN_MODE,
            Self::Child => CHILD_MODE,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A mode, its isolation settings and the command to run.
///
/// Built once from the program's arguments and never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    mode: Mode,
    config: IsolationConfig,
    command: Vec<OsString>,
}

impl Invocation {
    /// Creates an invocation after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`NsrootError::Config`] if `command` is empty or the
    /// configuration is invalid.
    pub fn new(mode: Mode, config: IsolationConfig, command: Vec<OsString>) -> Result<Self> {
        if command.is_empty() {
            return Err(NsrootError::Config {
                message: format!("`{mode}` needs a command to run"),
            });
        }
        config.validate()?;
        Ok(Self {
            mode,
            config,
            command,
        })
    }

    /// The phase this invocation runs.
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Isolation settings.
    pub const fn config(&self) -> &IsolationConfig {
        &self.config
    }

    /// The command and its arguments.
    pub fn command(&self) -> &[OsString] {
        &self.command
    }

    /// The command name, `command()[0]`.
    pub fn program(&self) -> &OsStr {
        self.command.first().map_or(OsStr::new(""), OsString::as_os_str)
    }

    /// Argument vector for re-executing this binary as the bootstrap.
    ///
    /// `argv[0]` is the self-exe path, followed by the `child` selector,
    /// any non-default isolation options, and the command unchanged. With
    /// default options this is exactly `child <command> [args...]`.
    #[must_use]
    pub fn child_args(&self) -> Vec<OsString> {
        let defaults = IsolationConfig::default();
        let mut args: Vec<OsString> = vec![SELF_EXE.into(), CHILD_MODE.into()];

        if self.config.rootfs != defaults.rootfs {
            args.push("--rootfs".into());
            args.push(self.config.rootfs.clone().into_os_string());
        }
        if let Some(hostname) = &self.config.hostname {
            args.push("--hostname".into());
            args.push(hostname.into());
        }
        if self.config.mount_proc {
            args.push("--mount-proc".into());
        }
        if self.program().as_encoded_bytes().starts_with(b"-") {
            args.push("--".into());
        }

        args.extend(self.command.iter().cloned());
        args
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn cmd(args: &[&str]) -> Vec<OsString> {
        args.iter().map(OsString::from).collect()
    }

    #[test]
    fn default_child_args_are_selector_then_command() {
        let inv = Invocation::new(Mode::Run, IsolationConfig::default(), cmd(&["ls", "-la", "/"]))
            .unwrap();
        assert_eq!(
            inv.child_args(),
            cmd(&["/proc/self/exe", "child", "ls", "-la", "/"])
        );
    }

    #[test]
    fn overrides_come_before_the_command() {
        let config = IsolationConfig {
            rootfs: PathBuf::from("/srv/alpine"),
            hostname: Some("box".into()),
            mount_proc: true,
            ..IsolationConfig::default()
        };
        let inv = Invocation::new(Mode::Run, config, cmd(&["sh"])).unwrap();
        assert_eq!(
            inv.child_args(),
            cmd(&[
                "/proc/self/exe",
                "child",
                "--rootfs",
                "/srv/alpine",
                "--hostname",
                "box",
                "--mount-proc",
                "sh",
            ])
        );
    }

    #[test]
    fn hyphen_command_is_separated() {
        let inv = Invocation::new(Mode::Run, IsolationConfig::default(), cmd(&["-x"])).unwrap();
        assert_eq!(inv.child_args(), cmd(&["/proc/self/exe", "child", "--", "-x"]));
    }

    #[test]
    fn empty_command_is_rejected() {
        let err = Invocation::new(Mode::Child, IsolationConfig::default(), Vec::new()).unwrap_err();
        assert!(err.to_string().contains("`child` needs a command"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = IsolationConfig {
            old_root: PathBuf::from("../escape"),
            ..IsolationConfig::default()
        };
        assert!(Invocation::new(Mode::Run, config, cmd(&["true"])).is_err());
    }

    #[test]
    fn mode_selectors() {
        assert_eq!(Mode::Run.to_string(), "run");
        assert_eq!(Mode::Child.as_str(), "child");
    }
}

//! Linux namespace management for process isolation.
//!
//! Namespaces are requested at creation time through `clone(2)` so the
//! child never runs outside them.

pub mod clone;
pub mod uts;

use nix::sched::CloneFlags;
use nsroot_common::types::NamespaceSet;

pub use clone::spawn_isolated;

/// Converts a [`NamespaceSet`] into the matching `CLONE_NEW*` flags.
#[must_use]
pub fn clone_flags(set: &NamespaceSet) -> CloneFlags {
    let mut flags = CloneFlags::empty();

    if set.uts {
        flags |= CloneFlags::CLONE_NEWUTS;
    }
    if set.pid {
        flags |= CloneFlags::CLONE_NEWPID;
    }
    if set.mount {
        flags |= CloneFlags::CLONE_NEWNS;
    }

    flags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_requests_uts_pid_and_mount() {
        let flags = clone_flags(&NamespaceSet::default());
        assert_eq!(
            flags,
            CloneFlags::CLONE_NEWUTS | CloneFlags::CLONE_NEWPID | CloneFlags::CLONE_NEWNS
        );
    }

    #[test]
    fn never_requests_excluded_namespaces() {
        let flags = clone_flags(&NamespaceSet::default());
        assert!(!flags.contains(CloneFlags::CLONE_NEWNET));
        assert!(!flags.contains(CloneFlags::CLONE_NEWIPC));
        assert!(!flags.contains(CloneFlags::CLONE_NEWUSER));
        assert!(!flags.contains(CloneFlags::CLONE_NEWCGROUP));
    }

    #[test]
    fn disabled_namespaces_are_left_out() {
        let set = NamespaceSet {
            uts: false,
            pid: true,
            mount: false,
        };
        assert_eq!(clone_flags(&set), CloneFlags::CLONE_NEWPID);
        assert!(clone_flags(&NamespaceSet {
            uts: false,
            pid: false,
            mount: false,
        })
        .is_empty());
    }
}

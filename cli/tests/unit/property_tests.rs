//! Property-based tests for the portproxy reconcile logic and `sshd_config`
//! rewriting.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::Ipv4Addr;

use proptest::prelude::*;
use wslkit_cli::application::services::ssh_setup::{ReconcileOutcome, SshPorts, SshSettings, update_portproxy};
use wslkit_cli::domain::config::SshConfig;
use wslkit_cli::domain::network::{ReconcilePlan, plan_reconcile};
use wslkit_cli::domain::sshd::{apply_directives, required_directives};

use crate::mocks::{MemIpStore, MockRunner, RecordingReporter, ok_output};

fn arb_ip() -> impl Strategy<Value = Ipv4Addr> {
    any::<u32>().prop_map(Ipv4Addr::from)
}

proptest! {
    /// The plan is a no-op exactly when the cached address equals the live one,
    /// and it always targets the live address.
    #[test]
    fn plan_targets_current_and_is_noop_only_on_match(
        saved in proptest::option::of(arb_ip()),
        current in arb_ip(),
    ) {
        let plan = plan_reconcile(saved, current);
        let target = match plan {
            ReconcilePlan::Unchanged(ip) | ReconcilePlan::Rebind { current: ip, .. } => ip,
        };
        prop_assert_eq!(target, current);
        prop_assert_eq!(matches!(plan, ReconcilePlan::Unchanged(_)), saved == Some(current));
    }

    /// After `update`, the cache holds the live address and a delete is issued
    /// only when there was a different previous address.
    #[test]
    fn update_leaves_cache_at_live_address(
        saved in proptest::option::of(arb_ip()),
        current in arb_ip(),
    ) {
        let runner = MockRunner::new()
            .respond("hostname -I", ok_output(format!("{current}\n").as_bytes()));
        let store = match saved {
            Some(ip) => MemIpStore::with(&ip.to_string()),
            None => MemIpStore::default(),
        };
        let reporter = RecordingReporter::new();
        let ssh = SshConfig::default();
        let ports = SshPorts { runner: &runner, store: &store, reporter: &reporter };
        let settings = SshSettings { powershell: "powershell.exe", ssh: &ssh };

        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let outcome = rt.block_on(update_portproxy(&ports, &settings)).unwrap();

        prop_assert_eq!(store.get(), Some(current.to_string()));
        let deleted = runner.lines().iter().any(|l| l.contains("portproxy delete"));
        match outcome {
            ReconcileOutcome::Unchanged(ip) => {
                prop_assert_eq!(ip, current);
                prop_assert_eq!(runner.lines().len(), 1);
            }
            ReconcileOutcome::Rebound { previous, .. } => {
                prop_assert_eq!(deleted, previous.is_some());
                prop_assert_ne!(previous, Some(current));
            }
        }
    }

    /// Rewriting an already rewritten config changes nothing.
    #[test]
    fn sshd_rewrite_is_idempotent(
        lines in proptest::collection::vec("#?[A-Za-z]{1,12} [a-z0-9]{1,6}", 0..12),
        port in 1u16..,
    ) {
        let directives = required_directives(port);
        let once = apply_directives(&lines.join("\n"), &directives);
        let twice = apply_directives(&once, &directives);
        prop_assert_eq!(&once, &twice);
        let port_line = format!("Port {port}");
        prop_assert!(once.lines().any(|l| l == port_line));
    }
}

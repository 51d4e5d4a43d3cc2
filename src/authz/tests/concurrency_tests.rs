//! Shared registry tests with concurrent readers and a writer

use rbac_acl::{EngineConfig, Outcome, SharedRegistry};
use std::thread;

fn shared_registry() -> SharedRegistry {
    let acl = SharedRegistry::new(EngineConfig::with_precedence(["admin", "normal-user"]));
    acl.add_role("admin", ["READ", "WRITE"]).unwrap();
    acl.add_role("normal-user", ["READ"]).unwrap();
    acl.add_resource("file").unwrap();
    acl.allow("admin", "WRITE", ["file"]).unwrap();
    acl.allow("normal-user", "READ", ["file"]).unwrap();
    acl
}

#[test]
fn test_concurrent_queries() {
    let acl = shared_registry();
    for i in 0..8 {
        acl.add_user(format!("user-{}", i), ["admin"]).unwrap();
    }

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let acl = acl.clone();
            thread::spawn(move || {
                let user = format!("user-{}", i);
                for _ in 0..100 {
                    assert_eq!(acl.is_allowed(&user, "write", "file").unwrap(), Outcome::Allowed);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(acl.get_metrics().total_requests, 800);
}

#[test]
fn test_queries_observe_only_whole_mutations() {
    let acl = shared_registry();
    acl.add_user("alice", ["admin", "normal-user"]).unwrap();

    let reader = {
        let acl = acl.clone();
        thread::spawn(move || {
            for _ in 0..500 {
                // Either before (admin → Allowed) or after (normal-user → Unknown)
                let outcome = acl.is_allowed("alice", "WRITE", "file").unwrap();
                assert_ne!(outcome, Outcome::Denied);
            }
        })
    };

    let writer = {
        let acl = acl.clone();
        thread::spawn(move || {
            acl.revoke_role_from_user("alice", "admin").unwrap();
        })
    };

    writer.join().unwrap();
    reader.join().unwrap();

    assert_eq!(acl.is_allowed("alice", "WRITE", "file").unwrap(), Outcome::Unknown);
}

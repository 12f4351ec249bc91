//! Benchmark utilities.

use bss_codec::{Domain, Segment, UserRecord};

/// Device id used for non-default domains.
const DEVICE_ID: &str = "6d92078a-8246-4ba4-ae5b-76104861e7dc";

/// Generate a user with `segments` segments; every fourth one is a removal.
pub fn generate_user(uid: u64, domain: Domain, segments: usize) -> UserRecord {
    let segments = (0..segments)
        .map(|i| {
            let id = 1000 + i as i32;
            let segment = Segment::with_code(format!("seg_{id}"), 958)
                .expiration(1440)
                .value(i as i32)
                .timestamp(1_700_000_000);
            let segment = Segment { id, ..segment };
            if i % 4 == 3 {
                segment.removed()
            } else {
                segment
            }
        })
        .collect();

    let uid = if domain.is_default() {
        uid.to_string()
    } else {
        DEVICE_ID.to_string()
    };
    UserRecord::new(uid, segments).with_domain(domain)
}

/// Generate a batch of users cycling through all domains.
pub fn generate_users(count: usize, segments: usize) -> Vec<UserRecord> {
    (0..count)
        .map(|i| {
            let domain = Domain::ALL[i % Domain::ALL.len()];
            generate_user(100_000 + i as u64, domain, segments)
        })
        .collect()
}

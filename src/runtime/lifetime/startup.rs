use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::storage::Storage;
use crate::utils::password::hash_password;

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
}

// The TOEIC section catalog is fixed; seeding is a no-op once present.
const TOEIC_PARTS: &[(&str, i32)] = &[
    ("Part 1: Photographs", 1),
    ("Part 2: Question-Response", 2),
    ("Part 3: Conversations", 3),
    ("Part 4: Talks", 4),
    ("Part 5: Incomplete Sentences", 5),
    ("Part 6: Text Completion", 6),
    ("Part 7: Reading Comprehension", 7),
];

fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// Create the bootstrap admin when the admin table is empty. The password
/// comes from `ADMIN_PASSWORD`, or is generated and logged once.
async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_admins().await {
        Ok(count) if count > 0 => {
            debug!("Admin table has {} account(s), skipping admin seed", count);
            return;
        }
        Ok(_) => {
            info!("No admin accounts found, creating the bootstrap admin...");
        }
        Err(e) => {
            warn!("Failed to count admins: {}, skipping admin seed", e);
            return;
        }
    }

    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    match storage
        .create_admin("Administrator", "admin@localhost", password_hash)
        .await
    {
        Ok(admin) => {
            info!("Bootstrap admin account created (ID: {})", admin.id);
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

async fn seed_parts(storage: &Arc<dyn Storage>) {
    if let Err(e) = storage.seed_parts(TOEIC_PARTS).await {
        warn!("Failed to seed the parts catalog: {}", e);
    }
}

/// Prepare everything the server needs before binding: storage (including
/// migrations), the bootstrap admin and the parts catalog.
pub async fn prepare_server_startup() -> StartupContext {
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let storage = crate::storage::create_storage()
        .await
        .expect("Failed to create storage backend");
    warn!("Storage backend initialized and migrations completed");

    seed_admin(&storage).await;
    seed_parts(&storage).await;

    StartupContext { storage }
}

//! Website embed key generation.

use rand::Rng;
use rand::distributions::Alphanumeric;

/// Length of the random portion of a website key.
const KEY_LENGTH: usize = 24;

/// Generates a fresh embed key for a website.
///
/// The key is the opaque value the on-page script carries in its data
/// attribute; it must be unguessable but needs no structure beyond that.
pub fn generate_website_key() -> String {
    let random: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(KEY_LENGTH)
        .map(char::from)
        .collect();
    format!("pk_{random}")
}

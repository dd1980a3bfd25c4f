use chrono::Utc;
use rand::Rng;

use crate::db_types::OrderId;

const ID_ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
const SUFFIX_LEN: usize = 6;

fn random_suffix() -> String {
    let mut rng = rand::thread_rng();
    (0..SUFFIX_LEN).map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char).collect()
}

/// Generates a fresh marketplace order id, e.g. `TMG-20240601-K7Q2XN`. Ids are checked for uniqueness at insert
/// time, so a (very unlikely) collision surfaces as a conflict rather than silent reuse.
pub fn new_order_id() -> OrderId {
    OrderId(format!("TMG-{}-{}", Utc::now().format("%Y%m%d"), random_suffix()))
}

/// Same scheme for custom commissions, with a `TMC` prefix so the two pipelines never clash.
pub fn new_custom_order_id() -> OrderId {
    OrderId(format!("TMC-{}-{}", Utc::now().format("%Y%m%d"), random_suffix()))
}

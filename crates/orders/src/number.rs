//! Order number generation.

use chrono::Utc;
use uuid::Uuid;

/// Generates a human-meaningful order number: `ORD-{unix-millis}-{suffix}`.
///
/// The wall-clock prefix plus a random suffix is a collision-avoidance
/// heuristic, not a guarantee; the order store enforces uniqueness on
/// insert.
pub fn generate_order_number() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(8);
    format!(
        "ORD-{}-{}",
        Utc::now().timestamp_millis(),
        suffix.to_uppercase()
    )
}

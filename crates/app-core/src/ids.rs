//! Id generation

use uuid::Uuid;

/// Generate a fresh opaque id, e.g. `p3f0c...` for a practice
pub fn new_id(prefix: &str) -> String {
    format!("{}{}", prefix, Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_prefix_and_uniqueness() {
        let a = new_id("p");
        let b = new_id("p");

        assert!(a.starts_with('p'));
        assert_eq!(a.len(), 33);
        assert_ne!(a, b);
    }
}

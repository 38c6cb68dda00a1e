use std::sync::atomic::{AtomicUsize, Ordering};

pub mod assets;
pub mod persistence;
pub mod version;

static ID_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Process-local ids for UI ephemera (toasts). Store records get their
/// ids from the backend, never from here.
pub fn generate_id(prefix: &str) -> String {
    let value = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{value}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let a = generate_id("toast");
        let b = generate_id("toast");
        assert_ne!(a, b);
        assert!(a.starts_with("toast-"));
    }
}

//! Shared helper functions for CLI commands

/// Mask a secret for display, keeping a short recognizable prefix
pub fn mask_secret(secret: &str) -> String {
    let prefix: String = secret.chars().take(8).collect();
    if secret.chars().count() <= 8 {
        prefix
    } else {
        format!("{}…", prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("short"), "short");
        assert_eq!(mask_secret("demo-01HQ3K4N5M"), "demo-01H…");
    }
}

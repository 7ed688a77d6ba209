//! Category display formatting

/// Format the configured categories, noting any that only appear in expenses
pub fn format_category_list(configured: &[String], used_only: &[String]) -> String {
    if configured.is_empty() && used_only.is_empty() {
        return "No categories found.\n\nRun 'expenses init' to create default categories."
            .to_string();
    }

    let mut output = String::new();
    output.push_str("Categories:\n");
    for name in configured {
        output.push_str(&format!("  {}\n", name));
    }

    if !used_only.is_empty() {
        output.push_str("\nUsed by expenses but not configured:\n");
        for name in used_only {
            output.push_str(&format!("  {}\n", name));
        }
    }

    output
}

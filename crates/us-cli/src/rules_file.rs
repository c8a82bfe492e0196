use std::fs;
use std::path::Path;

use us_core::io::{export_rule_groups, import_rule_groups};
use us_core::RuleGroup;

pub fn read_rule_groups(path: &Path) -> Result<Vec<RuleGroup>, String> {
    let text = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    import_rule_groups(&text)
        .map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))
}

pub fn write_rule_groups(path: &Path, groups: &[RuleGroup]) -> Result<(), String> {
    let json = export_rule_groups(groups)
        .map_err(|e| format!("Failed to serialize rule groups: {}", e))?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create '{}': {}", parent.display(), e))?;
    }
    fs::write(path, json + "\n")
        .map_err(|e| format!("Failed to write '{}': {}", path.display(), e))?;
    Ok(())
}

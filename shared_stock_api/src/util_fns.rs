use std::path::PathBuf;

/// Load a .env file into the process environment, checking the current
/// directory first and the parent second. KEY=VALUE lines only; comments
/// and blanks are skipped and variables already set win.
pub fn load_env() {
    let candidates = [PathBuf::from(".env"), PathBuf::from("..").join(".env")];
    let Some(path) = candidates.into_iter().find(|p| p.exists()) else {
        println!(".env not found in current or parent directory; continuing without loading .env");
        return;
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Failed to read .env at {}: {}", path.display(), e);
            return;
        }
    };

    println!("Loaded env from: {}", path.display());
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if std::env::var(key).is_ok() {
            continue;
        }
        std::env::set_var(key, strip_quotes(value.trim()));
    }
}

fn strip_quotes(value: &str) -> &str {
    let quoted = (value.starts_with('"') && value.ends_with('"'))
        || (value.starts_with('\'') && value.ends_with('\''));
    if quoted && value.len() >= 2 {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

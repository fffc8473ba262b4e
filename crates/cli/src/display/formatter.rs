use fzsl_core::RegisteredScanner;

/// One-line summary of a scanner for listings
pub fn format_scanner(entry: &RegisteredScanner) -> String {
    let scanner = &entry.scanner;
    let mut line = format!(
        "{} [priority {}] cmd: {}",
        entry.name,
        scanner.priority(),
        scanner.cmd()
    );

    if let Some(detect_cmd) = scanner.detect_cmd() {
        line.push_str(&format!(" | detect: {detect_cmd}"));
    }
    if let Some(root) = scanner.root_path() {
        line.push_str(&format!(" | root: {}", root.display()));
    }
    if !scanner.is_auto_selectable() {
        line.push_str(" | manual only");
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use fzsl_core::Scanner;

    fn entry(name: &str, scanner: Scanner) -> RegisteredScanner {
        RegisteredScanner {
            name: name.to_string(),
            scanner,
        }
    }

    #[test]
    fn test_format_detecting_scanner() {
        let scanner = Scanner::builder("git ls-files")
            .detect_cmd("git rev-parse --is-inside-work-tree")
            .priority(10)
            .build()
            .unwrap();

        assert_eq!(
            format_scanner(&entry("git", scanner)),
            "git [priority 10] cmd: git ls-files | detect: git rev-parse --is-inside-work-tree"
        );
    }

    #[test]
    fn test_format_manual_scanner() {
        let scanner = Scanner::builder("locate '*'").priority(-1).build().unwrap();

        assert_eq!(
            format_scanner(&entry("everything", scanner)),
            "everything [priority -1] cmd: locate '*' | manual only"
        );
    }
}

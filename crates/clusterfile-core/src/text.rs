//! Plain-text helpers for locating fields and changed lines.

use clusterfile_path::Segment;

/// Find the 0-based line of `path`'s key in serialized document text.
///
/// Scans `key:` lines top to bottom, consuming one key segment per match;
/// blank lines and `#` comments are skipped, and quoted keys match their
/// bare spelling. Index segments have no line of their own and are
/// ignored. Returns `None` when the path cannot be located.
pub fn find_line_for_path(text: &str, path: &[Segment]) -> Option<usize> {
    let keys: Vec<&str> = path.iter().filter_map(Segment::as_key).collect();
    if keys.is_empty() {
        return None;
    }

    let mut matched = 0usize;
    for (line_no, line) in text.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let key = match trimmed.split_once(':') {
            Some((k, _)) => k.trim(),
            None => continue,
        };
        let expected = keys[matched];
        if key == expected
            || key == format!("\"{expected}\"")
            || key == format!("'{expected}'")
        {
            matched += 1;
            if matched == keys.len() {
                return Some(line_no);
            }
        }
    }
    None
}

/// Positional line-by-line comparison.
///
/// Returns the indices where the two texts differ, counting past the end
/// of the shorter one. Used for change highlighting in rendered views.
pub fn changed_lines(before: &str, after: &str) -> Vec<usize> {
    let before: Vec<&str> = before.lines().collect();
    let after: Vec<&str> = after.lines().collect();
    let max = before.len().max(after.len());
    (0..max)
        .filter(|&i| before.get(i).copied().unwrap_or("") != after.get(i).copied().unwrap_or(""))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clusterfile_path::parse_path;

    const SAMPLE: &str = "\
# clusterfile
account:
  name: demo
  sshKeys:
    - ssh-ed25519 AAAA
hosts:
  \"node-1.example.com\":
    role: worker
";

    #[test]
    fn test_find_top_level_key() {
        assert_eq!(find_line_for_path(SAMPLE, &parse_path("account")), Some(1));
        assert_eq!(find_line_for_path(SAMPLE, &parse_path("hosts")), Some(5));
    }

    #[test]
    fn test_find_nested_key() {
        assert_eq!(
            find_line_for_path(SAMPLE, &parse_path("account.name")),
            Some(2)
        );
        assert_eq!(
            find_line_for_path(SAMPLE, &parse_path(r#"hosts["node-1.example.com"].role"#)),
            Some(7)
        );
    }

    #[test]
    fn test_index_segments_are_ignored() {
        assert_eq!(
            find_line_for_path(SAMPLE, &parse_path("account.sshKeys[0]")),
            Some(3)
        );
    }

    #[test]
    fn test_missing_key_is_none() {
        assert_eq!(find_line_for_path(SAMPLE, &parse_path("network.mtu")), None);
        assert_eq!(find_line_for_path(SAMPLE, &[]), None);
    }

    #[test]
    fn test_changed_lines_positional() {
        let before = "a: 1\nb: 2\nc: 3\n";
        let after = "a: 1\nb: 9\nc: 3\nd: 4\n";
        assert_eq!(changed_lines(before, after), vec![1, 3]);
        assert_eq!(changed_lines(before, before), Vec::<usize>::new());
    }
}

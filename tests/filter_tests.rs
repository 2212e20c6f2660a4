use folder_search::core::{SearchOptions, list};
use folder_search::error::ScanError;

use rand::{Rng, rng};
use std::collections::BTreeSet;
use std::fs;
use tempfile::tempdir;

fn as_set(entries: &[String]) -> BTreeSet<&str> {
    entries.iter().map(String::as_str).collect()
}

#[test]
fn default_options_drop_ignored_and_git() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["a", "b", "node_modules", ".git", ".github", ".gitlab-ci"] {
        fs::create_dir(dir.path().join(name))?;
    }

    let result = list(dir.path(), &SearchOptions::default());
    assert!(result.is_ok());
    assert_eq!(as_set(result.entries()), BTreeSet::from(["a", "b"]));
    Ok(())
}

#[test]
fn case_modes_for_same_pattern() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    fs::create_dir(dir.path().join("Test"))?;
    fs::create_dir(dir.path().join("test"))?;

    let sensitive = SearchOptions::default()
        .with_pattern("test")
        .with_case_sensitive(true);
    let insensitive = sensitive.with_case_sensitive(false);

    assert_eq!(as_set(list(dir.path(), &sensitive).entries()), BTreeSet::from(["test"]));
    assert_eq!(
        as_set(list(dir.path(), &insensitive).entries()),
        BTreeSet::from(["Test", "test"])
    );
    Ok(())
}

#[test]
fn listing_is_exactly_the_surviving_children() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let names = ["alpha", "beta", ".git", ".gitkeep-dir", "node_modules", "gamma", "node_modules_old"];
    for name in names {
        fs::create_dir(dir.path().join(name))?;
    }

    let result = list(dir.path(), &SearchOptions::default());
    let expected: BTreeSet<&str> = names
        .into_iter()
        .filter(|n| !n.starts_with(".git") && *n != "node_modules")
        .collect();
    assert_eq!(as_set(result.entries()), expected);
    Ok(())
}

#[test]
fn insensitive_is_superset_of_sensitive() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let alphabet = ['a', 'A', 'b', 'B', 'c'];
    let mut rng = rng();
    for i in 0..20 {
        let name: String = (0..4)
            .map(|_| alphabet[rng.random_range(0..alphabet.len())])
            .collect();
        // suffix keeps names unique on case-insensitive filesystems
        let _ = fs::create_dir(dir.path().join(format!("{name}{i}")));
    }

    for pattern in ["a", "A", "aB", "Bc", "cc", ""] {
        let sensitive = SearchOptions::default()
            .with_pattern(pattern)
            .with_case_sensitive(true);
        let insensitive = sensitive.with_case_sensitive(false);

        let strict = list(dir.path(), &sensitive);
        let loose = list(dir.path(), &insensitive);
        assert!(
            as_set(strict.entries()).is_subset(&as_set(loose.entries())),
            "pattern {pattern:?}: {:?} not within {:?}",
            strict.entries(),
            loose.entries()
        );
    }
    Ok(())
}

#[test]
fn custom_ignore_set_is_exact() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    for name in ["target", "target2", "dist", "node_modules"] {
        fs::create_dir(dir.path().join(name))?;
    }

    let options = SearchOptions::new("", false, ["target", "dist"]);
    let result = list(dir.path(), &options);
    assert_eq!(
        as_set(result.entries()),
        BTreeSet::from(["node_modules", "target2"])
    );
    Ok(())
}

#[test]
fn missing_directory_reports_error_without_entries() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let missing = dir.path().join("nope");

    let result = list(&missing, &SearchOptions::default());
    assert!(result.entries().is_empty());
    assert_eq!(result.error(), Some(&ScanError::NotFound(missing)));
    Ok(())
}

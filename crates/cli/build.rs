use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Version string from a release file, if it looks like one.
fn release_version(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let version = if path.extension().is_some_and(|ext| ext == "json") {
        // .release-please-manifest.json: { ".": "0.1.0" }
        let start = contents.find(r#"".": ""#)? + r#"".": ""#.len();
        let end = contents[start..].find('"')?;
        contents[start..start + end].trim().to_string()
    } else {
        contents.trim().to_string()
    };
    version
        .starts_with(|c: char| c.is_ascii_digit())
        .then_some(version)
}

fn main() {
    let cargo_version = env::var("CARGO_PKG_VERSION").unwrap_or_else(|_| "0.0.0".to_string());
    let repo_root = env::var("CARGO_MANIFEST_DIR")
        .ok()
        .map(PathBuf::from)
        .and_then(|dir| dir.parent().and_then(Path::parent).map(Path::to_path_buf));

    let mut version = cargo_version.clone();
    if let Some(root) = repo_root {
        for candidate in ["VERSION", ".release-please-manifest.json"] {
            let path = root.join(candidate);
            if let Some(found) = release_version(&path) {
                println!("cargo:rerun-if-changed={}", path.display());
                version = found;
                break;
            }
        }
    }

    println!("cargo:rustc-env=ADAPTERGEN_VERSION={version}");

    if version != cargo_version {
        println!(
            "cargo:warning=Using version {version} from VERSION file or manifest (Cargo.toml has {cargo_version})"
        );
    }
}

use crate::security::{PathValidatorError, SecurityViolation};
use std::path::{Path, PathBuf};

/// Traversal sequences matched case-insensitively against the raw path.
/// Covers the plain, single-encoded and double-encoded forms, so the check
/// must run before any percent-decoding.
const TRAVERSAL_PATTERNS: [&str; 6] = [
    "../",
    "..\\",
    "%2e%2e/",
    "%2e%2e\\",
    "%252e%252e%252f",
    "%252e%252e%255c",
];

/// Security checks for raw request paths and the filesystem paths they map to.
#[derive(Debug, Clone)]
pub struct PathValidator {
    web_root: PathBuf,
    check_symlinks: bool,
}

impl PathValidator {
    /// Fails if `web_root` does not canonicalize to an existing directory.
    pub fn new(web_root: &Path, check_symlinks: bool) -> Result<Self, PathValidatorError> {
        let real = web_root
            .canonicalize()
            .map_err(|source| PathValidatorError::InvalidWebRoot {
                path: web_root.to_path_buf(),
                source,
            })?;

        if !real.is_dir() {
            return Err(PathValidatorError::NotADirectory { path: real });
        }

        Ok(Self {
            web_root: real,
            check_symlinks,
        })
    }

    /// Canonical web root this validator enforces.
    pub fn web_root(&self) -> &Path {
        &self.web_root
    }

    /// Structural checks on a raw request path.
    ///
    /// Order matters: a NUL byte is also a control character but is reported
    /// as [`SecurityViolation::NullByte`].
    pub fn validate<'a>(&self, path: &'a str) -> Result<&'a str, SecurityViolation> {
        let bytes = path.as_bytes();

        if bytes.contains(&0) {
            return Err(SecurityViolation::NullByte);
        }

        let lowered = path.to_ascii_lowercase();
        if TRAVERSAL_PATTERNS.iter().any(|p| lowered.contains(p)) {
            return Err(SecurityViolation::Traversal);
        }

        if bytes.iter().any(|b| *b <= 0x1f || *b == 0x7f) {
            return Err(SecurityViolation::InvalidCharacter);
        }

        Ok(path)
    }

    /// Ensure a filesystem path stays inside the web root.
    ///
    /// With symlink checking disabled this is a plain prefix comparison and
    /// does NOT protect against symlinks pointing outside the root.
    pub fn validate_file_path(&self, path: &Path) -> Result<PathBuf, SecurityViolation> {
        if !self.check_symlinks {
            let candidate = normalize_separators(&path.to_string_lossy());
            let root = normalize_separators(&self.web_root.to_string_lossy());
            let inside = candidate == root
                || candidate
                    .strip_prefix(&root)
                    .is_some_and(|rest| rest.starts_with('/'));
            if !inside {
                return Err(SecurityViolation::OutsideRoot);
            }
            return Ok(path.to_path_buf());
        }

        match path.canonicalize() {
            Ok(real) => {
                if !self.contains(&real) {
                    return Err(SecurityViolation::OutsideRoot);
                }
                Ok(real)
            }
            Err(_) => {
                // Target missing: its parent must exist inside the root.
                let parent = path.parent().ok_or(SecurityViolation::OutsideRoot)?;
                let real_parent = parent
                    .canonicalize()
                    .map_err(|_| SecurityViolation::OutsideRoot)?;
                if !self.contains(&real_parent) {
                    return Err(SecurityViolation::OutsideRoot);
                }
                Ok(path.to_path_buf())
            }
        }
    }

    /// `Path::starts_with` compares whole components, so `/var/www-evil`
    /// is not inside `/var/www`.
    fn contains(&self, real: &Path) -> bool {
        real.starts_with(&self.web_root)
    }
}

/// True when any segment other than `.`, `..` or empty starts with a dot.
pub fn is_hidden_path(path: &str) -> bool {
    path.trim_matches('/')
        .split('/')
        .any(|part| part.starts_with('.') && part != "." && part != "..")
}

fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/").trim_end_matches('/').to_string()
}

//! Bearer token storage
//!
//! The token is obtained out-of-band (e.g. from the API's login endpoint) and
//! saved as plain text in a file named `token`. It is read once at startup
//! and never written by this program.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

/// Opaque bearer credential. Empty means "not logged in".
#[derive(Clone, Default, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("BearerToken(<empty>)")
        } else {
            f.write_str("BearerToken(<redacted>)")
        }
    }
}

/// File-backed token location
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub const FILE_NAME: &'static str = "token";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Token file inside the given data directory
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored token. A missing file yields an empty token.
    pub fn read(&self) -> io::Result<BearerToken> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim_end_matches(['\r', '\n']).to_string();
                info!(path = %self.path.display(), empty = token.is_empty(), "loaded bearer token");
                Ok(BearerToken(token))
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no stored bearer token");
                Ok(BearerToken::default())
            }
            Err(err) => Err(err),
        }
    }
}

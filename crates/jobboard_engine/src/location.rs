use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use url::Url;

/// The page address the filters are mirrored into.
pub trait Location: Send + Sync {
    fn path(&self) -> String;
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;
    /// Replaces path and query in place: no history entry, no scroll reset.
    fn replace(&self, path_and_query: &str);
    /// Full address, suitable for sharing.
    fn href(&self) -> String;
}

#[derive(Debug)]
struct Current {
    path: String,
    query: String,
}

/// Location kept in memory, seeded from an absolute URL.
#[derive(Debug)]
pub struct MemoryLocation {
    origin: String,
    current: Mutex<Current>,
    replacements: AtomicUsize,
}

impl MemoryLocation {
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(href)?;
        Ok(Self {
            origin: url.origin().ascii_serialization(),
            current: Mutex::new(Current {
                path: url.path().to_string(),
                query: url.query().unwrap_or_default().to_string(),
            }),
            replacements: AtomicUsize::new(0),
        })
    }

    /// Number of `replace` calls so far.
    pub fn replace_count(&self) -> usize {
        self.replacements.load(Ordering::SeqCst)
    }
}

impl Location for MemoryLocation {
    fn path(&self) -> String {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.path.clone()
    }

    fn query(&self) -> String {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.query.clone()
    }

    fn replace(&self, path_and_query: &str) {
        let (path, query) = path_and_query
            .split_once('?')
            .unwrap_or((path_and_query, ""));
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        current.path = if path.is_empty() { "/".to_string() } else { path.to_string() };
        current.query = query.to_string();
        self.replacements.fetch_add(1, Ordering::SeqCst);
    }

    fn href(&self) -> String {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.query.is_empty() {
            format!("{}{}", self.origin, current.path)
        } else {
            format!("{}{}?{}", self.origin, current.path, current.query)
        }
    }
}

//! Directory-backed blob store.
//!
//! Layout under the store root:
//!
//! ```text
//! <root>/<bucket>/<escaped key>
//! ```
//!
//! Every object is one file directly inside the bucket directory. Keys are
//! opaque, so `/`, `\`, `%`, NUL and a leading `.` are percent-escaped into
//! the file name; `a` and `a/b` are two unrelated files. Writes go through
//! [`crate::fs::atomic_write`] so a reader sees either the old object or the
//! new one, never a torn file. On a shared filesystem (NFS, SMB) several
//! machines can point at the same root.

use super::{BlobStore, StoreError};
use crate::deadline::Deadline;
use crate::fs::{atomic_write, exclusive_write, is_temp_file_name};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Blob store where buckets are directories and objects are files.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
}

impl FsBlobStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the bucket directory (and the root) if missing.
    pub fn create_bucket(&self, bucket: &str) -> Result<PathBuf, StoreError> {
        let dir = self.bucket_dir(bucket)?;
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    fn bucket_dir(&self, bucket: &str) -> Result<PathBuf, StoreError> {
        if bucket.is_empty()
            || bucket == "."
            || bucket == ".."
            || bucket.contains(['/', '\\'])
        {
            return Err(StoreError::NoSuchBucket(bucket.to_string()));
        }
        Ok(self.root.join(bucket))
    }

    /// Resolve `key` to a file path inside an existing bucket.
    fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
        let dir = self.bucket_dir(bucket)?;
        if !dir.is_dir() {
            return Err(StoreError::NoSuchBucket(bucket.to_string()));
        }
        if key.is_empty() {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(dir.join(encode_key(key)))
    }
}

/// Map a key to a single file name. Never starts with `.`, so it cannot
/// collide with temp files or `.`/`..`.
fn encode_key(key: &str) -> String {
    let mut name = String::with_capacity(key.len());
    for (i, c) in key.char_indices() {
        match c {
            '%' | '/' | '\\' | '\0' => push_escaped(&mut name, c),
            '.' if i == 0 => push_escaped(&mut name, c),
            _ => name.push(c),
        }
    }
    name
}

fn push_escaped(name: &mut String, c: char) {
    name.push_str(&format!("%{:02X}", c as u32));
}

/// Inverse of [`encode_key`]; `None` for names this store did not write.
fn decode_key(name: &str) -> Option<String> {
    if name.is_empty() || name.starts_with('.') {
        return None;
    }

    let mut key = String::with_capacity(name.len());
    let mut rest = name;
    while let Some(pos) = rest.find('%') {
        key.push_str(&rest[..pos]);
        let hex = rest.get(pos + 1..pos + 3)?;
        let byte = u8::from_str_radix(hex, 16).ok()?;
        key.push(char::from(byte));
        rest = &rest[pos + 3..];
    }
    key.push_str(rest);

    // Only the canonical spelling maps back, so each file is one key.
    (encode_key(&key) == name).then_some(key)
}

impl BlobStore for FsBlobStore {
    fn head_bucket(&self, bucket: &str, deadline: &Deadline) -> Result<(), StoreError> {
        deadline.check()?;
        let dir = self.bucket_dir(bucket)?;
        match fs::metadata(&dir) {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(StoreError::NoSuchBucket(bucket.to_string())),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StoreError::NoSuchBucket(bucket.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn put(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<(), StoreError> {
        deadline.check()?;
        let path = self.object_path(bucket, key)?;
        atomic_write(&path, bytes)?;
        Ok(())
    }

    fn put_if_absent(
        &self,
        bucket: &str,
        key: &str,
        bytes: &[u8],
        deadline: &Deadline,
    ) -> Result<bool, StoreError> {
        deadline.check()?;
        let path = self.object_path(bucket, key)?;
        Ok(exclusive_write(&path, bytes)?)
    }

    fn get(&self, bucket: &str, key: &str, deadline: &Deadline) -> Result<Vec<u8>, StoreError> {
        deadline.check()?;
        let path = self.object_path(bucket, key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&self, bucket: &str, key: &str, deadline: &Deadline) -> Result<(), StoreError> {
        deadline.check()?;
        let path = self.object_path(bucket, key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn list(&self, bucket: &str, deadline: &Deadline) -> Result<Vec<String>, StoreError> {
        self.head_bucket(bucket, deadline)?;
        let dir = self.bucket_dir(bucket)?;

        let mut keys = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if is_temp_file_name(name) {
                continue;
            }
            let Some(key) = decode_key(name) else {
                continue;
            };
            keys.push(key);
        }
        keys.sort();
        Ok(keys)
    }
}

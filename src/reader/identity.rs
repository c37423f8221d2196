//! Identitas file upload
//!
//! Nama file + hash SHA-256 isi. Dipakai untuk mendeteksi file baru (reset
//! state sesi) dan sebagai kunci memo hasil klasifikasi.

use chrono::{DateTime, Local};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone)]
pub struct FileIdentity {
    pub file_name: String,
    /// SHA-256 (hex) dari isi file
    pub content_hash: String,
    pub size: u64,
    pub loaded_at: DateTime<Local>,
}

impl FileIdentity {
    pub fn from_bytes(file_name: impl Into<String>, bytes: &[u8]) -> Self {
        Self {
            file_name: file_name.into(),
            content_hash: compute_hash(bytes),
            size: bytes.len() as u64,
            loaded_at: Local::now(),
        }
    }

    /// Sama jika nama dan isi sama (waktu muat diabaikan)
    pub fn same_file(&self, other: &FileIdentity) -> bool {
        self.file_name == other.file_name && self.content_hash == other.content_hash
    }

    pub fn short_hash(&self) -> &str {
        &self.content_hash[..12.min(self.content_hash.len())]
    }
}

/// SHA-256 hex
pub fn compute_hash(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_hash() {
        assert_eq!(
            compute_hash(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_same_file() {
        let a = FileIdentity::from_bytes("data.xlsx", b"isi");
        let b = FileIdentity::from_bytes("data.xlsx", b"isi");
        let renamed = FileIdentity::from_bytes("data2.xlsx", b"isi");
        let changed = FileIdentity::from_bytes("data.xlsx", b"isi baru");

        assert!(a.same_file(&b));
        assert!(!a.same_file(&renamed));
        assert!(!a.same_file(&changed));
        assert_eq!(a.short_hash().len(), 12);
    }
}

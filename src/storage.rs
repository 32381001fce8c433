use percent_encoding::percent_decode_str;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::{Error, Result};

/// Largest upload the media bucket accepts (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Extensions the bucket will store
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "pdf"];

/// A stored media file
#[derive(Debug, Clone, serde::Serialize)]
pub struct StoredFile {
	/// Name the file is stored and served under
	pub file_name: String,
	/// Public URL path for the file
	pub url: String,
	/// Size in bytes
	pub size: u64,
	/// SHA-256 of the contents, hex encoded
	pub checksum: String,
}

/// Filesystem-backed media bucket.
///
/// Uploads get a randomized stored name that keeps the original
/// extension, so collisions and overwrite attacks are off the table.
/// Reads validate the requested name before touching the filesystem.
pub struct MediaStorage {
	root: PathBuf,
	url_prefix: String,
}

impl MediaStorage {
	pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
		Self {
			root: root.into(),
			url_prefix: url_prefix.into(),
		}
	}

	/// Store an upload under a randomized name
	pub async fn store(&self, original_name: &str, data: &[u8]) -> Result<StoredFile> {
		if data.is_empty() {
			return Err(Error::BadRequest("empty upload".into()));
		}
		if data.len() > MAX_UPLOAD_BYTES {
			return Err(Error::BadRequest(format!(
				"upload exceeds {} bytes",
				MAX_UPLOAD_BYTES
			)));
		}
		validate_safe_filename(original_name)?;
		let extension = extension_of(original_name)?;

		let file_name = format!("{}.{}", Uuid::new_v4().simple(), extension);
		tokio::fs::create_dir_all(&self.root).await?;
		tokio::fs::write(self.root.join(&file_name), data).await?;

		let checksum = hex_digest(data);
		Ok(StoredFile {
			url: format!("{}/{}", self.url_prefix, file_name),
			file_name,
			size: data.len() as u64,
			checksum,
		})
	}

	/// Read a stored file back, with its content type
	pub async fn open(&self, file_name: &str) -> Result<(Vec<u8>, &'static str)> {
		validate_safe_filename(file_name)?;
		let path = self.root.join(file_name);
		let data = match tokio::fs::read(&path).await {
			Ok(data) => data,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(Error::NotFound(format!("media/{}", file_name)));
			}
			Err(e) => return Err(e.into()),
		};
		Ok((data, content_type_for(file_name)))
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

/// Reject file names that could escape the bucket directory.
///
/// Checks the raw name and its percent-decoded form, since encoded
/// traversal sequences decode to the same attack.
pub fn validate_safe_filename(name: &str) -> Result<()> {
	let decoded = percent_decode_str(name)
		.decode_utf8()
		.map_err(|_| Error::BadRequest("file name is not valid UTF-8".into()))?;

	for candidate in [name, decoded.as_ref()] {
		if candidate.is_empty() {
			return Err(Error::BadRequest("empty file name".into()));
		}
		if candidate.contains("..")
			|| candidate.contains('/')
			|| candidate.contains('\\')
			|| candidate.contains('\0')
		{
			return Err(Error::BadRequest("unsafe file name".into()));
		}
		if candidate.chars().any(|c| c.is_control()) {
			return Err(Error::BadRequest("unsafe file name".into()));
		}
	}
	Ok(())
}

fn extension_of(name: &str) -> Result<String> {
	let extension = name
		.rsplit_once('.')
		.map(|(_, ext)| ext.to_ascii_lowercase())
		.unwrap_or_default();
	if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
		return Err(Error::BadRequest(format!(
			"unsupported file type: {:?}",
			extension
		)));
	}
	Ok(extension)
}

fn content_type_for(name: &str) -> &'static str {
	match name.rsplit_once('.').map(|(_, ext)| ext) {
		Some("png") => "image/png",
		Some("jpg") | Some("jpeg") => "image/jpeg",
		Some("gif") => "image/gif",
		Some("webp") => "image/webp",
		Some("svg") => "image/svg+xml",
		Some("pdf") => "application/pdf",
		_ => "application/octet-stream",
	}
}

fn hex_digest(data: &[u8]) -> String {
	let digest = Sha256::digest(data);
	digest.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn storage() -> (tempfile::TempDir, MediaStorage) {
		let dir = tempfile::tempdir().unwrap();
		let storage = MediaStorage::new(dir.path(), "/media");
		(dir, storage)
	}

	#[tokio::test]
	async fn store_and_open_round_trip() {
		let (_dir, storage) = storage();
		let stored = storage.store("photo.png", b"PNGDATA").await.unwrap();
		assert!(stored.file_name.ends_with(".png"));
		assert!(stored.url.starts_with("/media/"));
		assert_eq!(stored.size, 7);

		let (data, content_type) = storage.open(&stored.file_name).await.unwrap();
		assert_eq!(data, b"PNGDATA");
		assert_eq!(content_type, "image/png");
	}

	#[tokio::test]
	async fn stored_names_are_randomized() {
		let (_dir, storage) = storage();
		let a = storage.store("photo.png", b"one").await.unwrap();
		let b = storage.store("photo.png", b"two").await.unwrap();
		assert_ne!(a.file_name, b.file_name);
	}

	#[tokio::test]
	async fn traversal_names_are_rejected() {
		let (_dir, storage) = storage();
		for name in [
			"../etc/passwd",
			"..%2f..%2fetc%2fpasswd",
			"a/b.png",
			"a\\b.png",
			"%2e%2e%2fsecret.png",
		] {
			let err = storage.store(name, b"data").await.unwrap_err();
			assert_eq!(err.status_code(), 400, "accepted {:?}", name);
		}
	}

	#[tokio::test]
	async fn unsupported_extensions_are_rejected() {
		let (_dir, storage) = storage();
		let err = storage.store("script.exe", b"MZ").await.unwrap_err();
		assert_eq!(err.status_code(), 400);
	}

	#[tokio::test]
	async fn oversize_uploads_are_rejected() {
		let (_dir, storage) = storage();
		let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
		let err = storage.store("big.png", &big).await.unwrap_err();
		assert_eq!(err.status_code(), 400);
	}

	#[tokio::test]
	async fn missing_files_are_not_found() {
		let (_dir, storage) = storage();
		let err = storage.open("nope.png").await.unwrap_err();
		assert_eq!(err.status_code(), 404);
	}

	#[test]
	fn checksum_is_hex_sha256() {
		let digest = hex_digest(b"abc");
		assert_eq!(
			digest,
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
		);
	}
}

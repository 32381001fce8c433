use bytes::Bytes;

use crate::error::{Error, Result};

/// One decoded part of a `multipart/form-data` body
#[derive(Debug, Clone)]
pub struct Part {
	pub name: String,
	pub file_name: Option<String>,
	pub content_type: Option<String>,
	pub data: Bytes,
}

/// Extract the boundary token from a Content-Type header value
///
/// # Examples
///
/// ```
/// use folio::multipart::boundary;
///
/// let b = boundary("multipart/form-data; boundary=----xyz").unwrap();
/// assert_eq!(b, "----xyz");
/// assert!(boundary("application/json").is_err());
/// ```
pub fn boundary(content_type: &str) -> Result<String> {
	if !content_type.starts_with("multipart/form-data") {
		return Err(Error::BadRequest("expected multipart/form-data".into()));
	}
	content_type
		.split(';')
		.map(|s| s.trim())
		.find_map(|s| s.strip_prefix("boundary="))
		.map(|b| b.trim_matches('"').to_string())
		.filter(|b| !b.is_empty())
		.ok_or_else(|| Error::BadRequest("missing multipart boundary".into()))
}

/// Parse a buffered multipart body into its parts.
///
/// Handles the delimiter framing and Content-Disposition headers the
/// browsers actually send; nested multipart is not supported.
pub fn parse(body: &[u8], boundary: &str) -> Result<Vec<Part>> {
	let delimiter = format!("--{}", boundary);
	let delimiter = delimiter.as_bytes();

	let mut parts = Vec::new();
	let mut pos = find(body, delimiter, 0)
		.ok_or_else(|| Error::BadRequest("malformed multipart body".into()))?;

	loop {
		pos += delimiter.len();
		// A trailing "--" after the delimiter closes the body.
		if body[pos..].starts_with(b"--") {
			break;
		}
		pos = skip_crlf(body, pos);

		let headers_end = find(body, b"\r\n\r\n", pos)
			.ok_or_else(|| Error::BadRequest("multipart part missing headers".into()))?;
		let headers = std::str::from_utf8(&body[pos..headers_end])
			.map_err(|_| Error::BadRequest("multipart headers are not UTF-8".into()))?;

		let data_start = headers_end + 4;
		let next = find(body, delimiter, data_start)
			.ok_or_else(|| Error::BadRequest("unterminated multipart part".into()))?;
		// Strip the CRLF that precedes the next delimiter.
		let data_end = next.saturating_sub(2).max(data_start);

		let (name, file_name, content_type) = parse_headers(headers)?;
		parts.push(Part {
			name,
			file_name,
			content_type,
			data: Bytes::copy_from_slice(&body[data_start..data_end]),
		});
		pos = next;
	}

	Ok(parts)
}

fn parse_headers(headers: &str) -> Result<(String, Option<String>, Option<String>)> {
	let mut name = None;
	let mut file_name = None;
	let mut content_type = None;

	for line in headers.lines() {
		let lower = line.to_ascii_lowercase();
		if lower.starts_with("content-disposition:") {
			for attr in line.split(';').map(|s| s.trim()) {
				if let Some(v) = attr.strip_prefix("name=") {
					name = Some(v.trim_matches('"').to_string());
				} else if let Some(v) = attr.strip_prefix("filename=") {
					file_name = Some(v.trim_matches('"').to_string());
				}
			}
		} else if let Some(v) = lower.strip_prefix("content-type:") {
			// Preserve the original casing of the value
			let offset = line.len() - v.len();
			content_type = Some(line[offset..].trim().to_string());
		}
	}

	let name =
		name.ok_or_else(|| Error::BadRequest("multipart part missing a field name".into()))?;
	Ok((name, file_name, content_type))
}

fn find(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
	if from > haystack.len() {
		return None;
	}
	haystack[from..]
		.windows(needle.len())
		.position(|w| w == needle)
		.map(|i| i + from)
}

fn skip_crlf(body: &[u8], pos: usize) -> usize {
	if body[pos..].starts_with(b"\r\n") {
		pos + 2
	} else {
		pos
	}
}

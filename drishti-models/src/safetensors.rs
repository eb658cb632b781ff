//! Parameter counting from safetensors headers
//!
//! A safetensors file starts with an 8-byte little-endian header length
//! followed by a JSON header describing every tensor's dtype, shape, and
//! data offsets. Counting parameters only needs the header, so the tensor
//! data itself is never read.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Headers larger than this are treated as corrupt
const MAX_HEADER_LEN: u64 = 100_000_000;

/// Sum of element counts across all tensors in the artifact
pub fn count_tensor_elements(path: &Path) -> io::Result<u64> {
    let mut file = File::open(path)?;

    let mut len_buf = [0u8; 8];
    file.read_exact(&mut len_buf)?;
    let header_len = u64::from_le_bytes(len_buf);
    if header_len == 0 || header_len > MAX_HEADER_LEN {
        return Err(invalid(format!(
            "safetensors header length out of range: {}",
            header_len
        )));
    }

    let mut header = vec![0u8; header_len as usize];
    file.read_exact(&mut header)?;

    let value: serde_json::Value = serde_json::from_slice(&header)
        .map_err(|e| invalid(format!("malformed safetensors header: {}", e)))?;
    let entries = value
        .as_object()
        .ok_or_else(|| invalid("safetensors header is not a JSON object".to_string()))?;

    let mut total: u64 = 0;
    for (name, entry) in entries {
        if name == "__metadata__" {
            continue;
        }
        let shape = entry
            .get("shape")
            .and_then(|s| s.as_array())
            .ok_or_else(|| invalid(format!("tensor '{}' has no shape", name)))?;

        // Scalar tensors have an empty shape and count as one element
        let mut elements: u64 = 1;
        for dim in shape {
            let dim = dim
                .as_u64()
                .ok_or_else(|| invalid(format!("tensor '{}' has a non-integer dimension", name)))?;
            elements = elements
                .checked_mul(dim)
                .ok_or_else(|| invalid(format!("element count overflow in tensor '{}'", name)))?;
        }
        total = total
            .checked_add(elements)
            .ok_or_else(|| invalid("total element count overflow".to_string()))?;
    }

    Ok(total)
}

fn invalid(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_header(dir: &TempDir, name: &str, header: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(&(header.len() as u64).to_le_bytes()).unwrap();
        file.write_all(header.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_counts_elements_across_tensors() {
        let temp = TempDir::new().unwrap();
        let header = r#"{"conv.weight":{"dtype":"F32","shape":[2,3,4],"data_offsets":[0,96]},"conv.bias":{"dtype":"F32","shape":[4],"data_offsets":[96,112]}}"#;
        let path = write_header(&temp, "model.safetensors", header);

        assert_eq!(count_tensor_elements(&path).unwrap(), 24 + 4);
    }

    #[test]
    fn test_metadata_entry_is_skipped() {
        let temp = TempDir::new().unwrap();
        let header = r#"{"__metadata__":{"format":"pt"},"w":{"dtype":"F32","shape":[10],"data_offsets":[0,40]}}"#;
        let path = write_header(&temp, "model.safetensors", header);

        assert_eq!(count_tensor_elements(&path).unwrap(), 10);
    }

    #[test]
    fn test_scalar_tensor_counts_as_one() {
        let temp = TempDir::new().unwrap();
        let header = r#"{"scale":{"dtype":"F32","shape":[],"data_offsets":[0,4]}}"#;
        let path = write_header(&temp, "model.safetensors", header);

        assert_eq!(count_tensor_elements(&path).unwrap(), 1);
    }

    #[test]
    fn test_rejects_malformed_header() {
        let temp = TempDir::new().unwrap();
        let path = write_header(&temp, "model.safetensors", "not json at all");

        assert!(count_tensor_elements(&path).is_err());
    }

    #[test]
    fn test_rejects_truncated_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("truncated.safetensors");
        std::fs::write(&path, [1, 2, 3]).unwrap();

        assert!(count_tensor_elements(&path).is_err());
    }

    #[test]
    fn test_rejects_oversized_header_length() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("huge.safetensors");
        let mut file = File::create(&path).unwrap();
        file.write_all(&u64::MAX.to_le_bytes()).unwrap();

        assert!(count_tensor_elements(&path).is_err());
    }
}

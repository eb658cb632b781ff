//! Built-in variant registry
//!
//! Maps the variant ids accepted on the command line to downloadable weight
//! artifacts. Checksums can be filled in once the upstream assets are pinned.

/// One downloadable model variant
#[derive(Debug, Clone, Copy)]
pub struct VariantSpec {
    pub id: &'static str,
    pub file_name: &'static str,
    pub url: &'static str,
    /// Hex sha256 digest; empty skips verification
    pub checksum: &'static str,
}

pub const BUILTIN_VARIANTS: &[VariantSpec] = &[
    VariantSpec {
        id: "yolov8n",
        file_name: "yolov8n.safetensors",
        url: "https://huggingface.co/lmz/candle-yolo-v8/resolve/main/yolov8n.safetensors",
        checksum: "",
    },
    VariantSpec {
        id: "yolov8s",
        file_name: "yolov8s.safetensors",
        url: "https://huggingface.co/lmz/candle-yolo-v8/resolve/main/yolov8s.safetensors",
        checksum: "",
    },
    VariantSpec {
        id: "yolov8m",
        file_name: "yolov8m.safetensors",
        url: "https://huggingface.co/lmz/candle-yolo-v8/resolve/main/yolov8m.safetensors",
        checksum: "",
    },
];

/// Find a built-in variant by id
pub fn lookup(id: &str) -> Option<&'static VariantSpec> {
    BUILTIN_VARIANTS.iter().find(|spec| spec.id == id)
}

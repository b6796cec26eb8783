use std::path::PathBuf;

/// Position of a circle among those detected in one source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircleIndex {
    /// 1-based position in detector order.
    pub index: usize,
    /// Number of circles detected in the image.
    pub count: usize,
}

impl CircleIndex {
    pub fn new(index: usize, count: usize) -> Self {
        debug_assert!(index >= 1 && index <= count);
        Self { index, count }
    }

    /// File names carry the index only when the image has several circles.
    pub fn is_only(&self) -> bool {
        self.count == 1
    }
}

/// Which member of a circle's file family is being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportVariant {
    /// Unresized crop.
    Large,
    /// Square resize with the given side.
    Resolution(u32),
}

impl ExportVariant {
    fn suffix(self) -> String {
        match self {
            Self::Large => "large".to_string(),
            Self::Resolution(r) => format!("{r}x{r}"),
        }
    }

    pub fn resolution(self) -> Option<u32> {
        match self {
            Self::Large => None,
            Self::Resolution(r) => Some(r),
        }
    }
}

/// Build an output file name.
///
/// `coin` + single circle + large ⇒ `coin_large.png`;
/// `coin` + circle 2 of 3 + 250 ⇒ `coin_2_250x250.png`.
pub fn output_file_name(stem: &str, index: CircleIndex, variant: ExportVariant, ext: &str) -> String {
    if index.is_only() {
        format!("{stem}_{}{ext}", variant.suffix())
    } else {
        format!("{stem}_{}_{}{ext}", index.index, variant.suffix())
    }
}

/// Logical identity of one written file.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OutputRecord {
    pub destination_path: PathBuf,
    /// 1-based circle index within the source image.
    pub circle_index: usize,
    /// Side of the square resize, `None` for the large crop.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution: Option<u32>,
}

//! Splitting the stored text into indexable chunks.

/// How the stored document is cut before embedding.
///
/// `WholeDocument` embeds the entire text as one chunk, so top-k retrieval
/// always returns the whole document. `FixedSize` windows give the index
/// something to rank.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChunkingPolicy {
    #[default]
    WholeDocument,
    /// Character windows of `size` chars; consecutive windows share `overlap` chars.
    FixedSize { size: usize, overlap: usize },
}

impl ChunkingPolicy {
    /// Splits `text` into chunks. Whitespace-only input (and whitespace-only
    /// windows) produce nothing.
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        match *self {
            ChunkingPolicy::WholeDocument => vec![text],
            ChunkingPolicy::FixedSize { size, overlap } => split_fixed(text, size, overlap),
        }
    }
}

fn split_fixed(text: &str, size: usize, overlap: usize) -> Vec<&str> {
    // Byte offsets of every char start, plus the end of the text.
    let bounds: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let n_chars = bounds.len() - 1;
    let size = size.max(1);
    let step = size.saturating_sub(overlap).max(1);

    let mut out = Vec::new();
    let mut start = 0;
    loop {
        let end = (start + size).min(n_chars);
        let window = &text[bounds[start]..bounds[end]];
        if !window.trim().is_empty() {
            out.push(window);
        }
        if end == n_chars {
            break;
        }
        start += step;
    }
    out
}

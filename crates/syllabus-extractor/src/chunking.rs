//! Fixed-size text chunking
//!
//! Splits a document into consecutive slices of at most `chunk_size`
//! characters. Cuts ignore word and sentence boundaries; objectives that
//! straddle a cut are stitched back together by the continuation protocol.

/// A contiguous slice of the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Zero-based position in the chunk sequence
    pub index: usize,
    /// Chunk text, borrowed from the document
    pub text: &'a str,
}

/// Splits text into fixed-size chunks
#[derive(Debug, Clone, Copy)]
pub struct TextChunker {
    chunk_size: usize,
}

impl TextChunker {
    /// Create a new text chunker
    ///
    /// A `chunk_size` of zero is treated as one.
    pub fn new(chunk_size: usize) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
        }
    }

    /// Chunk size in characters
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Chunk the given text
    ///
    /// The returned iterator is cheap to clone, so the sequence can be
    /// restarted.
    pub fn chunk<'a>(&self, text: &'a str) -> Chunks<'a> {
        Chunks {
            rest: text,
            chunk_size: self.chunk_size,
            next_index: 0,
        }
    }

    /// Number of chunks `text` will produce: `ceil(chars / chunk_size)`
    pub fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(self.chunk_size)
    }
}

/// Iterator over the chunks of one document
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    rest: &'a str,
    chunk_size: usize,
    next_index: usize,
}

impl<'a> Iterator for Chunks<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let cut = self
            .rest
            .char_indices()
            .nth(self.chunk_size)
            .map_or(self.rest.len(), |(byte_idx, _)| byte_idx);
        let (text, rest) = self.rest.split_at(cut);
        self.rest = rest;

        let chunk = Chunk {
            index: self.next_index,
            text,
        };
        self.next_index += 1;
        Some(chunk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_text_is_one_chunk() {
        let chunker = TextChunker::new(100);
        let chunks: Vec<_> = chunker.chunk("Short text here.").collect();
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Short text here.");
        assert_eq!(chunks[0].index, 0);
    }

    #[test]
    fn test_empty_text_has_no_chunks() {
        let chunker = TextChunker::new(100);
        assert_eq!(chunker.chunk("").count(), 0);
        assert_eq!(chunker.count(""), 0);
    }

    #[test]
    fn test_exact_multiple() {
        let chunker = TextChunker::new(5);
        let texts: Vec<_> = chunker.chunk("abcdefghij").map(|c| c.text).collect();
        assert_eq!(texts, vec!["abcde", "fghij"]);
    }

    #[test]
    fn test_final_chunk_may_be_shorter() {
        let chunker = TextChunker::new(4);
        let chunks: Vec<_> = chunker.chunk("objective").collect();
        let texts: Vec<_> = chunks.iter().map(|c| c.text).collect();
        assert_eq!(texts, vec!["obje", "ctiv", "e"]);
        assert_eq!(chunks.iter().map(|c| c.index).collect::<Vec<_>>(), vec![0, 1, 2]);
    }

    #[test]
    fn test_cuts_mid_word() {
        let chunker = TextChunker::new(10);
        let chunks: Vec<_> = chunker.chunk("Demonstrate knowledge").collect();
        assert_eq!(chunks[0].text, "Demonstrat");
        assert_eq!(chunks[1].text, "e knowledg");
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        let chunker = TextChunker::new(3);
        let texts: Vec<_> = chunker.chunk("Hébert’s").map(|c| c.text).collect();
        assert_eq!(texts, vec!["Héb", "ert", "’s"]);
    }

    #[test]
    fn test_restartable() {
        let chunker = TextChunker::new(3);
        let chunks = chunker.chunk("abcdefg");
        let first: Vec<_> = chunks.clone().collect();
        let second: Vec<_> = chunks.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_chunk_size_is_clamped() {
        let chunker = TextChunker::new(0);
        assert_eq!(chunker.chunk_size(), 1);
        assert_eq!(chunker.chunk("ab").count(), 2);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: concatenating the chunks reproduces the document
        #[test]
        fn test_chunks_are_lossless(text in "\\PC{0,300}", size in 1usize..64) {
            let chunker = TextChunker::new(size);
            let joined: String = chunker.chunk(&text).map(|c| c.text).collect();
            prop_assert_eq!(joined, text);
        }

        /// Property: chunk count is ceil(L / chunk_size) and no chunk is empty or oversized
        #[test]
        fn test_chunk_count(text in "\\PC{0,300}", size in 1usize..64) {
            let chunker = TextChunker::new(size);
            let chunks: Vec<_> = chunker.chunk(&text).collect();
            let len = text.chars().count();

            prop_assert_eq!(chunks.len(), len.div_ceil(size));
            prop_assert_eq!(chunks.len(), chunker.count(&text));
            for chunk in &chunks {
                let n = chunk.text.chars().count();
                prop_assert!(n > 0 && n <= size);
            }
        }
    }
}

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BBox {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl BBox {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// `min <= max` on both axes. NaN coordinates are never well formed.
    pub fn is_well_formed(&self) -> bool {
        self.min_x <= self.max_x && self.min_y <= self.max_y
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Euclidean distance between the two box centers.
    pub fn center_distance(&self, other: &BBox) -> f32 {
        let (x1, y1) = self.center();
        let (x2, y2) = other.center();
        ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
    }

    pub fn union(&self, other: &BBox) -> BBox {
        BBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// The two diagonal corners a highlight quad is drawn from.
    pub fn quad(&self) -> [(f32, f32); 2] {
        [(self.min_x, self.min_y), (self.max_x, self.max_y)]
    }
}

/// One extracted word on a page.
///
/// Accepts either a named-field object or the positional word tuple
/// `[x0, y0, x1, y1, "text", block_no, line_no, word_no]` that PDF text
/// extractors commonly emit (the trailing `word_no` is optional and ignored).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WordRecord")]
pub struct WordToken {
    pub bbox: BBox,
    pub text: String,
    pub block_id: u32,
    pub line_id: u32,
}

impl WordToken {
    pub fn new(bbox: BBox, text: impl Into<String>, block_id: u32, line_id: u32) -> Self {
        Self {
            bbox,
            text: text.into(),
            block_id,
            line_id,
        }
    }

    /// Text with a trailing line-wrap hyphen or em-dash removed, if present.
    pub fn dehyphenated(&self) -> Option<&str> {
        self.text
            .strip_suffix('-')
            .or_else(|| self.text.strip_suffix('\u{2014}'))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WordRecord {
    Named {
        bbox: BBox,
        text: String,
        block_id: u32,
        line_id: u32,
    },
    Tuple(f32, f32, f32, f32, String, u32, u32, u32),
    Short(f32, f32, f32, f32, String, u32, u32),
}

impl From<WordRecord> for WordToken {
    fn from(record: WordRecord) -> Self {
        match record {
            WordRecord::Named {
                bbox,
                text,
                block_id,
                line_id,
            } => WordToken::new(bbox, text, block_id, line_id),
            WordRecord::Tuple(x0, y0, x1, y1, text, block_id, line_id, _)
            | WordRecord::Short(x0, y0, x1, y1, text, block_id, line_id) => {
                WordToken::new(BBox::new(x0, y0, x1, y1), text, block_id, line_id)
            }
        }
    }
}

/// Whitespace-split words of a sentence to be located.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSentence {
    words: Vec<String>,
}

impl TargetSentence {
    pub fn new(sentence: &str) -> Self {
        Self {
            words: sentence.split_whitespace().map(str::to_string).collect(),
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(String::as_str)
    }
}

impl From<&str> for TargetSentence {
    fn from(sentence: &str) -> Self {
        TargetSentence::new(sentence)
    }
}

#[cfg(test)]
pub(crate) fn word(text: &str, bbox: (f32, f32, f32, f32), block_id: u32, line_id: u32) -> WordToken {
    WordToken::new(BBox::new(bbox.0, bbox.1, bbox.2, bbox.3), text, block_id, line_id)
}

/// Lays `texts` out left to right on one line, 10pt wide words with 2pt gaps.
#[cfg(test)]
pub(crate) fn line_of(texts: &[&str], line_id: u32) -> Vec<WordToken> {
    let top = line_id as f32 * 20.0;
    texts
        .iter()
        .enumerate()
        .map(|(i, t)| {
            let x = i as f32 * 12.0;
            word(t, (x, top, x + 10.0, top + 10.0), 0, line_id)
        })
        .collect()
}

//! Word cloud rendering.
//!
//! The renderer is a trait so the service can swap implementations (or
//! inject failing ones in tests). [`BitmapWordCloud`] draws words with a
//! built-in pixel font, sized by frequency and laid out on a spiral.

mod glyphs;

use std::io::Cursor;

use ahash::AHashMap;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};

use crate::analysis::normalizer::NormalizedTokens;
use crate::config::WordCloudConfig;
use crate::error::{JobGuardError, Result};

use self::glyphs::{GLYPH_HEIGHT, GLYPH_WIDTH, glyph};

/// Renders normalized tokens into PNG bytes.
pub trait WordCloudRenderer: Send + Sync {
    /// Render the tokens. Empty input is an error.
    fn render(&self, tokens: &NormalizedTokens) -> Result<Vec<u8>>;

    /// Get the name of this renderer for debugging and logging.
    fn name(&self) -> &str;
}

/// Viridis colour map sampled at ten points, darkest first.
const PALETTE: [[u8; 3]; 10] = [
    [0x44, 0x01, 0x54],
    [0x48, 0x28, 0x78],
    [0x3e, 0x4a, 0x89],
    [0x31, 0x68, 0x8e],
    [0x26, 0x82, 0x8e],
    [0x1f, 0x9e, 0x89],
    [0x35, 0xb7, 0x79],
    [0x6d, 0xcd, 0x59],
    [0xb4, 0xde, 0x2c],
    [0xfd, 0xe7, 0x25],
];

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

/// Horizontal advance of one character in font units (glyph plus gap).
const ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Maximum number of spiral positions tried per word.
const SPIRAL_STEPS: usize = 2500;

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

impl Rect {
    fn intersects(&self, other: &Rect) -> bool {
        self.x < other.x + other.w
            && other.x < self.x + self.w
            && self.y < other.y + other.h
            && other.y < self.y + self.h
    }
}

#[derive(Debug)]
struct PlacedWord<'a> {
    word: &'a str,
    scale: u32,
    rect: Rect,
    color: Rgb<u8>,
}

/// Frequency-scaled bitmap word cloud.
#[derive(Debug, Clone)]
pub struct BitmapWordCloud {
    width: u32,
    height: u32,
    max_words: usize,
}

impl Default for BitmapWordCloud {
    fn default() -> Self {
        Self::from_config(&WordCloudConfig::default())
    }
}

impl BitmapWordCloud {
    pub fn new(width: u32, height: u32, max_words: usize) -> Self {
        Self {
            width,
            height,
            max_words,
        }
    }

    pub fn from_config(config: &WordCloudConfig) -> Self {
        Self::new(config.width, config.height, config.max_words)
    }

    /// The most frequent words, ties broken lexicographically.
    fn ranked_words<'a>(&self, tokens: &'a NormalizedTokens) -> Vec<(&'a str, usize)> {
        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for token in tokens.iter() {
            *counts.entry(token).or_insert(0) += 1;
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.max_words);
        ranked
    }

    fn layout<'a>(&self, ranked: &[(&'a str, usize)]) -> Vec<PlacedWord<'a>> {
        let Some(&(_, top_count)) = ranked.first() else {
            return Vec::new();
        };

        let max_scale = (self.height / (GLYPH_HEIGHT * 4)).max(1);
        let min_scale = (max_scale / 6).max(1);
        let cx = self.width as f64 / 2.0;
        let cy = self.height as f64 / 2.0;

        let mut placed: Vec<PlacedWord<'a>> = Vec::with_capacity(ranked.len());
        for (rank, &(word, count)) in ranked.iter().enumerate() {
            let chars = word.chars().count() as u32;
            if chars == 0 {
                continue;
            }

            let relative = count as f64 / top_count as f64;
            let mut scale = min_scale + ((max_scale - min_scale) as f64 * relative).round() as u32;
            // shrink words that would not fit the canvas at all
            scale = scale.min(self.width / (chars * ADVANCE)).min(self.height / GLYPH_HEIGHT);
            if scale == 0 {
                continue;
            }

            let color = Rgb(PALETTE[rank * PALETTE.len() / ranked.len()]);

            // halve the size a few times before giving up on a crowded canvas
            while scale > 0 {
                let w = chars * ADVANCE * scale - scale;
                let h = GLYPH_HEIGHT * scale;
                if let Some(rect) = self.find_slot(w, h, cx, cy, &placed) {
                    placed.push(PlacedWord {
                        word,
                        scale,
                        rect,
                        color,
                    });
                    break;
                }
                if scale <= min_scale {
                    break;
                }
                scale = (scale / 2).max(min_scale);
            }
        }
        placed
    }

    /// First free position along an Archimedean spiral from the centre.
    fn find_slot(&self, w: u32, h: u32, cx: f64, cy: f64, placed: &[PlacedWord<'_>]) -> Option<Rect> {
        let aspect = self.height as f64 / self.width as f64;
        for step in 0..SPIRAL_STEPS {
            let theta = step as f64 * 0.25;
            let radius = 1.2 * theta;
            let x = cx + radius * theta.cos() - w as f64 / 2.0;
            let y = cy + radius * aspect * theta.sin() - h as f64 / 2.0;
            if x < 0.0 || y < 0.0 {
                continue;
            }
            let rect = Rect {
                x: x as u32,
                y: y as u32,
                w,
                h,
            };
            if rect.x + w > self.width || rect.y + h > self.height {
                continue;
            }
            if placed.iter().all(|p| !p.rect.intersects(&rect)) {
                return Some(rect);
            }
        }
        None
    }

    fn draw(&self, placed: &[PlacedWord<'_>]) -> RgbImage {
        let mut image = RgbImage::from_pixel(self.width, self.height, BACKGROUND);
        for word in placed {
            let mut origin_x = word.rect.x;
            for c in word.word.chars() {
                for (row, bits) in glyph(c).iter().enumerate() {
                    for col in 0..GLYPH_WIDTH {
                        if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                            continue;
                        }
                        let px = origin_x + col * word.scale;
                        let py = word.rect.y + row as u32 * word.scale;
                        for dy in 0..word.scale {
                            for dx in 0..word.scale {
                                if px + dx < self.width && py + dy < self.height {
                                    image.put_pixel(px + dx, py + dy, word.color);
                                }
                            }
                        }
                    }
                }
                origin_x += ADVANCE * word.scale;
            }
        }
        image
    }
}

impl WordCloudRenderer for BitmapWordCloud {
    fn render(&self, tokens: &NormalizedTokens) -> Result<Vec<u8>> {
        if tokens.is_empty() {
            return Err(JobGuardError::rendering("no words to render"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(JobGuardError::rendering("canvas has zero size"));
        }

        let ranked = self.ranked_words(tokens);
        let placed = self.layout(&ranked);
        if placed.is_empty() {
            return Err(JobGuardError::rendering("no word fits the canvas"));
        }
        let image = self.draw(&placed);

        let mut cursor = Cursor::new(Vec::new());
        PngEncoder::new(&mut cursor)
            .write_image(image.as_raw(), self.width, self.height, ExtendedColorType::Rgb8)
            .map_err(|err| JobGuardError::rendering(format!("failed to encode word cloud: {err}")))?;
        Ok(cursor.into_inner())
    }

    fn name(&self) -> &str {
        "bitmap"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn tokens(text: &str) -> NormalizedTokens {
        NormalizedTokens::from(text.split_whitespace().collect::<Vec<_>>())
    }

    #[test]
    fn test_render_produces_png() {
        let renderer = BitmapWordCloud::default();
        let png = renderer
            .render(&tokens("wire transfer wire fee earn money wire"))
            .unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), 800);
        assert_eq!(decoded.height(), 400);
    }

    #[test]
    fn test_empty_tokens_is_an_error() {
        let renderer = BitmapWordCloud::default();
        let err = renderer.render(&NormalizedTokens::default()).unwrap_err();
        assert!(matches!(err, JobGuardError::Rendering(_)));
    }

    #[test]
    fn test_ranking_and_max_words() {
        let renderer = BitmapWordCloud::new(200, 100, 2);
        let toks = tokens("beta alpha beta gamma alpha beta");
        let ranked = renderer.ranked_words(&toks);
        assert_eq!(ranked, vec![("beta", 3), ("alpha", 2)]);
    }

    #[test]
    fn test_layout_has_no_overlaps() {
        let renderer = BitmapWordCloud::default();
        let toks = tokens("salary salary benefits remote team insurance pension health office");
        let ranked = renderer.ranked_words(&toks);
        let placed = renderer.layout(&ranked);
        assert!(!placed.is_empty());
        for (i, a) in placed.iter().enumerate() {
            assert!(a.rect.x + a.rect.w <= 800 && a.rect.y + a.rect.h <= 400);
            for b in &placed[i + 1..] {
                assert!(!a.rect.intersects(&b.rect), "{} overlaps {}", a.word, b.word);
            }
        }
        // most frequent word is drawn at least as large as the rest
        assert!(placed.iter().all(|p| p.scale <= placed[0].scale));
    }

    #[test]
    fn test_long_word_is_shrunk_to_fit() {
        let renderer = BitmapWordCloud::new(60, 20, 10);
        let toks = tokens("extraordinarily");
        let png = renderer.render(&toks);
        // 15 chars × 6 columns do not fit in 60 pixels even at scale 1
        assert!(png.is_err());

        let toks = tokens("ok");
        assert!(renderer.render(&toks).is_ok());
    }
}

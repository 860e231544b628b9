use std::collections::BTreeMap;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Deserialize;

use crate::error::ConfigError;

pub const BLACK: &str = "black";
pub const WHITE: &str = "white";

/// A color as written in the palette file: hex string or `[r, g, b]`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawColor {
    Hex(String),
    Rgb([u8; 3]),
}

/// Named color groups, each an ordered list of 0xRRGGBB values.
///
/// `black` provides the background (entry 0) and panel color (entry 1),
/// `white` the text color. Every other group is a ring color family.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    groups: BTreeMap<String, Vec<u32>>,
}

impl Palette {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let raw: BTreeMap<String, Vec<RawColor>> = serde_json::from_str(json)?;

        let mut groups = BTreeMap::new();
        for (name, colors) in raw {
            let mut parsed = Vec::with_capacity(colors.len());
            for (index, color) in colors.into_iter().enumerate() {
                let rgb = match color {
                    RawColor::Rgb([r, g, b]) => u32::from_be_bytes([0, r, g, b]),
                    RawColor::Hex(text) => {
                        parse_hex(&text).ok_or_else(|| ConfigError::InvalidColor {
                            group: name.clone(),
                            index,
                            value: text.clone(),
                        })?
                    }
                };
                parsed.push(rgb);
            }
            groups.insert(name, parsed);
        }

        let palette = Self { groups };
        palette.validate()?;
        Ok(palette)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let palette = Self::from_json_str(&text)?;
        tracing::info!(
            path = %path.display(),
            groups = palette.groups.len(),
            "palette loaded"
        );
        Ok(palette)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (group, needed) in [(BLACK, 2), (WHITE, 1)] {
            if self.groups.get(group).map_or(0, Vec::len) < needed {
                return Err(ConfigError::MissingGroup {
                    group: group.to_string(),
                    needed,
                });
            }
        }
        if self.ring_groups().is_empty() {
            return Err(ConfigError::NoRingColors);
        }
        Ok(())
    }

    pub fn group(&self, name: &str) -> Option<&[u32]> {
        self.groups.get(name).map(Vec::as_slice)
    }

    pub fn background(&self) -> u32 {
        self.groups[BLACK][0]
    }

    pub fn panel(&self) -> u32 {
        self.groups[BLACK][1]
    }

    pub fn text(&self) -> u32 {
        self.groups[WHITE][0]
    }

    /// Ring color group names, sorted.
    pub fn ring_groups(&self) -> Vec<&str> {
        self.groups
            .iter()
            .filter(|(name, colors)| {
                name.as_str() != BLACK && name.as_str() != WHITE && !colors.is_empty()
            })
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// A random shade of a randomly picked ring group.
    pub fn random_ring_color<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        // validate() guarantees at least one non-empty ring group
        self.shuffled_groups(1, rng)
            .first()
            .and_then(|group| {
                let shades = self.group(group)?.len();
                self.gradients(group, shades, rng).ok()
            })
            .and_then(|shades| shades.first().copied())
            .unwrap_or_else(|| self.text())
    }

    /// Up to `n` distinct ring groups in random order.
    pub fn shuffled_groups<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Vec<&str> {
        let mut groups = self.ring_groups();
        groups.shuffle(rng);
        groups.truncate(n);
        groups
    }

    /// The first `n` shades of `group`, in random order.
    pub fn gradients<R: Rng + ?Sized>(
        &self,
        group: &str,
        n: usize,
        rng: &mut R,
    ) -> Result<Vec<u32>, ConfigError> {
        let colors = self
            .groups
            .get(group)
            .filter(|colors| colors.len() >= n)
            .ok_or_else(|| ConfigError::MissingGroup {
                group: group.to_string(),
                needed: n,
            })?;
        let mut shades = colors[..n].to_vec();
        shades.shuffle(rng);
        Ok(shades)
    }
}

/// Parse `#rrggbb`, `0xrrggbb` (or `0X`) or bare `rrggbb`.
pub fn parse_hex(text: &str) -> Option<u32> {
    let digits = text
        .strip_prefix('#')
        .or_else(|| text.strip_prefix("0x"))
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

//! Filename encoding repair.
//!
//! A repair is an ordered cascade of strict trial decodes: the first
//! candidate encoding that decodes the recovered bytes without error, and
//! whose output is clean, wins. Candidates are never scored against each
//! other, so the same input always yields the same output.

use std::fmt;

use encoding_rs::Encoding;

use crate::detect::{
    is_byte_representable, looks_damaged, looks_like_double_byte_legacy_pair,
    to_code_point_bytes,
};
use crate::entry::EntryName;
use crate::error::Error;

/// A legacy encoding the repair cascade may try.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    encoding: &'static Encoding,
}

impl Candidate {
    /// Korean double-byte encoding (windows-949, a superset of EUC-KR).
    pub fn korean() -> Self {
        Self {
            encoding: encoding_rs::EUC_KR,
        }
    }

    /// Japanese double-byte encoding (Shift_JIS / windows-31j).
    pub fn japanese() -> Self {
        Self {
            encoding: encoding_rs::SHIFT_JIS,
        }
    }

    /// Simplified-Chinese double-byte encoding (GBK).
    pub fn simplified_chinese() -> Self {
        Self {
            encoding: encoding_rs::GBK,
        }
    }

    /// Look up a candidate by WHATWG label, e.g. `euc-kr`, `sjis`, `gb2312`.
    pub fn from_label(label: &str) -> Result<Self, Error> {
        Encoding::for_label(label.trim().as_bytes())
            .map(|encoding| Self { encoding })
            .ok_or_else(|| Error::UnknownEncoding {
                label: label.to_string(),
            })
    }

    /// Canonical encoding name.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Strict decode: any malformed sequence rejects the candidate.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        self.encoding
            .decode_without_bom_handling_and_without_replacement(bytes)
            .map(|text| text.into_owned())
    }
}

impl fmt::Debug for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Candidate").field(&self.name()).finish()
    }
}

/// Outcome of a repair attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repair {
    /// The repaired name, or the input unchanged.
    pub fixed: String,
    pub was_fixed: bool,
    /// Name of the encoding that produced the fix.
    pub encoding: Option<&'static str>,
}

impl Repair {
    fn unchanged(path: &str) -> Self {
        Self {
            fixed: path.to_string(),
            was_fixed: false,
            encoding: None,
        }
    }

    fn fixed(text: String, candidate: &Candidate) -> Self {
        Self {
            fixed: text,
            was_fixed: true,
            encoding: Some(candidate.name()),
        }
    }
}

/// Ordered candidate list plus the repair algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repairer {
    candidates: Vec<Candidate>,
}

impl Default for Repairer {
    /// Korean, then Japanese, then simplified Chinese.
    fn default() -> Self {
        Self {
            candidates: vec![
                Candidate::korean(),
                Candidate::japanese(),
                Candidate::simplified_chinese(),
            ],
        }
    }
}

impl Repairer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the candidate order. An empty list disables repair.
    pub fn with_candidates(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }

    /// Build a candidate order from encoding labels.
    pub fn from_labels<S: AsRef<str>>(labels: &[S]) -> Result<Self, Error> {
        let candidates = labels
            .iter()
            .map(|label| Candidate::from_label(label.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_candidates(candidates))
    }

    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    /// Repair a bare string.
    ///
    /// A damaged string is assumed to be the UTF-8 reading of the original
    /// bytes, so they are recovered by re-encoding it as UTF-8.
    pub fn repair(&self, path: &str) -> Repair {
        self.repair_with(path, path.as_bytes(), true)
    }

    /// Repair an entry name, recovering damaged names from the stored bytes.
    ///
    /// A clean name stored as valid UTF-8 is real text and is never
    /// reinterpreted as legacy bytes; only names whose stored bytes were not
    /// UTF-8 carry one byte per code point.
    pub fn repair_name(&self, name: &EntryName) -> Repair {
        self.repair_with(name.as_str(), name.raw(), !name.is_utf8())
    }

    fn repair_with(&self, path: &str, recovered: &[u8], byte_view: bool) -> Repair {
        // Real multi-byte text is already decoded.
        let Some(smuggled) = to_code_point_bytes(path) else {
            return Repair::unchanged(path);
        };

        if !looks_damaged(path) {
            if !byte_view || !looks_like_double_byte_legacy_pair(&smuggled) {
                return Repair::unchanged(path);
            }
            let Some(primary) = self.candidates.first() else {
                return Repair::unchanged(path);
            };
            return match primary.decode(&smuggled).filter(|text| is_clean(text)) {
                Some(text) => Repair::fixed(text, primary),
                None => Repair::unchanged(path),
            };
        }

        match self.decode_cascade(recovered) {
            Some((text, candidate)) => Repair::fixed(text, &candidate),
            None => Repair::unchanged(path),
        }
    }

    /// Try every candidate in order and return the first clean decode.
    pub fn decode_cascade(&self, bytes: &[u8]) -> Option<(String, Candidate)> {
        self.candidates.iter().find_map(|candidate| {
            match candidate.decode(bytes) {
                Some(text) if is_clean(&text) => Some((text, *candidate)),
                Some(_) => {
                    tracing::trace!(encoding = candidate.name(), "decode produced damaged text");
                    None
                }
                None => {
                    tracing::trace!(encoding = candidate.name(), "strict decode rejected");
                    None
                }
            }
        })
    }
}

/// A decode is accepted only if it is free of damage signatures and holds
/// real multi-byte text, which also makes every fix a fixed point.
fn is_clean(text: &str) -> bool {
    !looks_damaged(text) && !is_byte_representable(text)
}

/// Repair with the default candidate order.
pub fn repair(path: &str) -> Repair {
    Repairer::default().repair(path)
}

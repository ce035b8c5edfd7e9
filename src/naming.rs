//! Artifact names and ordering.
//!
//! Slice indices are zero-padded to three digits but grow past that for
//! volumes with more than 1000 slices, so name comparisons must be
//! numeric-aware rather than lexicographic.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::Path;
use std::str::Chars;

pub(crate) fn dicom_slice_name(index: usize) -> String {
    format!("slice_{index:03}.dcm")
}

pub(crate) fn raster_slice_name(index: usize) -> String {
    format!("slice_{index:03}.png")
}

pub(crate) fn mask_slice_name(index: usize) -> String {
    format!("slice_{index:03}_OUT.png")
}

/// Patient identifier: the file name text before the first `.`.
pub(crate) fn patient_id(path: &Path) -> Option<&str> {
    path.file_name()?.to_str()?.split('.').next()
}

/// Natural (numeric-aware) ordering: digit runs compare by value, the rest
/// compares character-wise.
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ca = a.chars().peekable();
    let mut cb = b.chars().peekable();
    loop {
        match (ca.peek().copied(), cb.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                if x.is_ascii_digit() && y.is_ascii_digit() {
                    let na = take_number(&mut ca);
                    let nb = take_number(&mut cb);
                    match na.cmp(&nb) {
                        Ordering::Equal => {}
                        ord => return ord,
                    }
                } else {
                    match x.cmp(&y) {
                        Ordering::Equal => {
                            ca.next();
                            cb.next();
                        }
                        ord => return ord,
                    }
                }
            }
        }
    }
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> u128 {
    let mut value: u128 = 0;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        value = value.saturating_mul(10).saturating_add(u128::from(digit));
        chars.next();
    }
    value
}

//! Sparse labeled line serialization.
//!
//! Writes feature vectors in the classic sparse training format: a signed
//! integer label followed by space-separated `index:value` pairs with
//! 1-based, ascending indices, one example per line. Each vector's pairs
//! start at its `offset`, so vectors from different depth deciles or
//! bound directions occupy disjoint index ranges within one file.

use std::io::{self, Write};

use crate::feat::FeatureVector;

/// Writes one vector as a single labeled line.
///
/// Panics if the vector has not been calculated (`depth == 0`); the
/// check runs before any byte is written, so no partial line can leak
/// into the output.
pub fn write_example<W: Write>(out: &mut W, feat: &FeatureVector, label: i32) -> io::Result<()> {
    assert!(
        feat.depth() != 0,
        "refusing to serialize an uncalculated feature vector"
    );

    let offset = feat.offset();
    write!(out, "{}", label)?;
    for (i, v) in feat.values().iter().enumerate() {
        write!(out, " {}:{:.6}", i + offset + 1, v)?;
    }
    writeln!(out)
}

/// Writes the feature-wise difference `a - b` as a single labeled line.
///
/// The two vectors' index ranges are merged by offset: with equal
/// offsets the blocks are superimposed elementwise, otherwise the block
/// with the smaller offset is written first in full (b's values
/// negated), keeping indices ascending as the format requires. When
/// `negate` is set, the roles of `a` and `b` are swapped and the label's
/// sign is flipped, producing the mirror example of the same pair.
///
/// Panics if either vector is uncalculated or the sizes differ, before
/// any byte is written.
pub fn write_pair_example<W: Write>(
    out: &mut W,
    a: &FeatureVector,
    b: &FeatureVector,
    label: i32,
    negate: bool,
) -> io::Result<()> {
    assert!(
        a.depth() != 0 && b.depth() != 0,
        "refusing to serialize an uncalculated feature vector"
    );
    assert_eq!(
        a.size(),
        b.size(),
        "cannot diff feature vectors of different sizes"
    );

    let (a, b, label) = if negate { (b, a, -label) } else { (a, b, label) };
    let offset_a = a.offset();
    let offset_b = b.offset();

    write!(out, "{}", label)?;
    if offset_a == offset_b {
        for i in 0..a.size() {
            let diff = a.values()[i] - b.values()[i];
            write!(out, " {}:{:.6}", i + offset_a + 1, diff)?;
        }
    } else if offset_a < offset_b {
        write_block(out, a, offset_a, 1.0)?;
        write_block(out, b, offset_b, -1.0)?;
    } else {
        write_block(out, b, offset_b, -1.0)?;
        write_block(out, a, offset_a, 1.0)?;
    }
    writeln!(out)
}

/// Writes one vector's full block of `index:value` pairs, scaled by
/// `sign`.
fn write_block<W: Write>(
    out: &mut W,
    feat: &FeatureVector,
    offset: usize,
    sign: f64,
) -> io::Result<()> {
    for (i, v) in feat.values().iter().enumerate() {
        write!(out, " {}:{:.6}", i + offset + 1, sign * v)?;
    }
    Ok(())
}

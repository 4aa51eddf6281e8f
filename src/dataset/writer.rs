//! Counting example writer.
//!
//! Wraps an output stream and tracks how many training lines were
//! emitted. `preference` writes both orientations of a ranked pair, so
//! the training set stays balanced between positive and negative labels.

use std::io::{self, Write};

use crate::feat::FeatureVector;

use super::libsvm::{write_example, write_pair_example};

/// Writes labeled examples to an owned stream, counting lines.
pub struct ExampleWriter<W: Write> {
    out: W,
    lines_written: usize,
}

impl<W: Write> ExampleWriter<W> {
    /// Wraps the given stream.
    pub fn new(out: W) -> Self {
        ExampleWriter {
            out,
            lines_written: 0,
        }
    }

    /// Writes one vector as a labeled example.
    pub fn single(&mut self, feat: &FeatureVector, label: i32) -> io::Result<()> {
        write_example(&mut self.out, feat, label)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Writes the difference `a - b` as a labeled example.
    pub fn pair(
        &mut self,
        a: &FeatureVector,
        b: &FeatureVector,
        label: i32,
        negate: bool,
    ) -> io::Result<()> {
        write_pair_example(&mut self.out, a, b, label, negate)?;
        self.lines_written += 1;
        Ok(())
    }

    /// Writes both orientations of a ranked pair: `better - worse` with
    /// label 1 and its mirrored negation.
    pub fn preference(&mut self, better: &FeatureVector, worse: &FeatureVector) -> io::Result<()> {
        self.pair(better, worse, 1, false)?;
        self.pair(better, worse, 1, true)
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    /// Flushes the underlying stream.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    /// Unwraps the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::BoundType;

    fn manual_vector(values: &[f64], depth: u32, bound_type: BoundType) -> FeatureVector {
        let mut feat = FeatureVector::new(values.len());
        feat.set_max_depth(10);
        feat.vals.copy_from_slice(values);
        feat.depth = depth;
        feat.bound_type = bound_type;
        feat
    }

    #[test]
    fn counts_lines() {
        let a = manual_vector(&[1.0, 2.0], 4, BoundType::Lower);
        let b = manual_vector(&[0.5, 0.25], 4, BoundType::Upper);

        let mut writer = ExampleWriter::new(Vec::new());
        writer.single(&a, 1).unwrap();
        writer.pair(&a, &b, 1, false).unwrap();
        writer.preference(&a, &b).unwrap();
        assert_eq!(writer.lines_written(), 4);

        let text = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn preference_emits_mirrored_labels() {
        let a = manual_vector(&[1.0, 2.0], 4, BoundType::Lower);
        let b = manual_vector(&[0.5, 0.25], 2, BoundType::Lower);

        let mut writer = ExampleWriter::new(Vec::new());
        writer.preference(&a, &b).unwrap();
        let text = String::from_utf8(writer.into_inner()).unwrap();
        let labels: Vec<&str> = text
            .lines()
            .map(|l| l.split(' ').next().unwrap())
            .collect();
        assert_eq!(labels, ["1", "-1"]);
    }
}

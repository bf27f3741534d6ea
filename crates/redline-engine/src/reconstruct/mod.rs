//! # Reconstruction
//!
//! Merges per-block judgments back into the segmented document, producing the
//! annotated body a review session works on.
//!
//! Two answer conventions are supported, chosen per check:
//!
//! - [`OutputMode::FullBlock`]: each judgment is the whole block with tags in
//!   place. See [`full_block`].
//! - [`OutputMode::Compact`]: each judgment holds only the tag spans, plus a
//!   short anchor before insertion-only spans. See [`compact`].
//!
//! Reconstruction never fails. Whatever cannot be merged is passed through
//! unchanged and reported as a [`Warning`]. A missing judgment is treated
//! exactly like "no change"; a truncated answer and an intentional omission
//! are indistinguishable here.

pub mod compact;
pub mod full_block;
pub mod warning;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::segment::{BlockNumber, Segmented};
use crate::stream::Judgment;

pub use warning::Warning;

/// Which answer convention a check asks the service for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    #[default]
    FullBlock,
    Compact,
}

/// The outcome of merging one run's judgments into its document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction {
    /// The untouched header of the document the run started from.
    pub header: Option<String>,
    /// The body with every accepted judgment's change spans in place.
    pub annotated_body: String,
    pub warnings: Vec<Warning>,
}

impl Reconstruction {
    /// Header plus annotated body.
    pub fn document(&self) -> String {
        match &self.header {
            Some(header) => format!("{header}{}", self.annotated_body),
            None => self.annotated_body.clone(),
        }
    }
}

/// Merges `judgments` into `doc`.
pub fn reconstruct(
    doc: &Segmented,
    judgments: &BTreeMap<BlockNumber, Judgment>,
    mode: OutputMode,
) -> Reconstruction {
    let mut warnings: Vec<Warning> = judgments
        .keys()
        .filter(|n| doc.block(**n).is_none())
        .map(|n| Warning::UnknownBlock { block: *n })
        .collect();

    let annotated_body = doc.rejoin(|block| match judgments.get(&block.number) {
        None => {
            warnings.push(Warning::MissingJudgment {
                block: block.number,
            });
            block.text.clone()
        }
        Some(Judgment::Lgtm) => block.text.clone(),
        Some(Judgment::Revised(answer)) => match mode {
            OutputMode::FullBlock => full_block::apply(block, answer, &mut warnings),
            OutputMode::Compact => compact::apply(block, answer, &mut warnings),
        },
    });

    for warning in &warnings {
        log::warn!("{warning}");
    }

    Reconstruction {
        header: doc.header.clone(),
        annotated_body,
        warnings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::segment::segment;
    use pretty_assertions::assert_eq;

    fn judgments(entries: &[(usize, &str)]) -> BTreeMap<BlockNumber, Judgment> {
        entries
            .iter()
            .map(|(n, body)| {
                (
                    BlockNumber::new(*n).expect("block numbers start at 1"),
                    Judgment::from_body(body),
                )
            })
            .collect()
    }

    const DOC: &str = "---\ntitle: x\n---\nThe cat sat.\n\nA dog ran.\n\n\nThe end.\n";

    #[test]
    fn full_block_round_trip_keeps_separators() {
        let doc = segment(DOC);
        let j = judgments(&[
            (1, r#"The cat <del comment="tense" replace-with="sits">sat</del>."#),
            (2, "lgtm"),
            (3, "LGTM"),
        ]);
        let r = reconstruct(&doc, &j, OutputMode::FullBlock);
        assert!(r.warnings.is_empty());
        assert_eq!(codec::recover(&r.document()), DOC);
        assert_eq!(
            codec::accept_all_resolve(&r.document()),
            DOC.replace("sat", "sits")
        );
    }

    #[test]
    fn compact_mode_splices_into_blocks() {
        let doc = segment(DOC);
        let j = judgments(&[
            (1, "lgtm"),
            (2, r#""A dog" <ins comment="detail">quickly</ins>"#),
            (3, r#"<del comment="tone" replace-with="Fin.">The end.</del>"#),
        ]);
        let r = reconstruct(&doc, &j, OutputMode::Compact);
        assert!(r.warnings.is_empty(), "{:?}", r.warnings);
        assert_eq!(codec::recover(&r.document()), DOC);
        assert_eq!(
            codec::accept_all_resolve(&r.annotated_body),
            "The cat sat.\n\nA dog quickly ran.\n\n\nFin.\n"
        );
    }

    #[test]
    fn missing_judgments_pass_through_with_warnings() {
        let doc = segment(DOC);
        let r = reconstruct(&doc, &judgments(&[(2, "lgtm")]), OutputMode::Compact);
        assert_eq!(r.document(), DOC);
        let blocks: Vec<usize> = r.warnings.iter().map(|w| w.block().get()).collect();
        assert_eq!(blocks, vec![1, 3]);
        assert!(
            r.warnings
                .iter()
                .all(|w| matches!(w, Warning::MissingJudgment { .. }))
        );
    }

    #[test]
    fn unknown_blocks_are_reported() {
        let doc = segment("only block");
        let r = reconstruct(
            &doc,
            &judgments(&[(1, "lgtm"), (5, "lgtm")]),
            OutputMode::FullBlock,
        );
        assert_eq!(r.document(), "only block");
        assert_eq!(
            r.warnings,
            vec![Warning::UnknownBlock {
                block: BlockNumber::new(5).unwrap()
            }]
        );
    }
}

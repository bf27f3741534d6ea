use crate::codec;
use crate::rope::preview;
use crate::segment::Block;

use super::warning::Warning;

/// Uses the answer as the new block text, after normalizing its tags.
///
/// The answer is checked by rejecting every change and comparing with the
/// original block. A mismatch is only a warning: the answer still wins.
pub fn apply(block: &Block, answer: &str, warnings: &mut Vec<Warning>) -> String {
    let answer = answer.trim_end();
    if answer.trim_start().is_empty() {
        warnings.push(Warning::EmptyJudgment {
            block: block.number,
        });
        return block.text.clone();
    }

    let annotated = codec::normalize(answer);
    let recovered = codec::recover(&annotated);
    if recovered != block.text {
        warnings.push(Warning::RoundTripMismatch {
            block: block.number,
            expected: preview(&block.text, 80),
            recovered: preview(&recovered, 80),
        });
    }
    annotated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::segment::segment;
    use pretty_assertions::assert_eq;

    fn first_block(text: &str) -> Block {
        segment(text).blocks.remove(0)
    }

    #[test]
    fn matching_answer_is_normalized() {
        let block = first_block("The cat sat.");
        let mut warnings = vec![];
        let out = apply(
            &block,
            "The cat <del comment=\"tense\" replace-with=\"sits\">sat</del>.\n",
            &mut warnings,
        );
        assert!(warnings.is_empty());
        assert_eq!(
            out,
            r#"The cat <edit comment="tense"><del>sat</del><ins>sits</ins></edit>."#
        );
    }

    #[test]
    fn mismatch_is_trusted_but_reported() {
        let block = first_block("The cat sat.");
        let mut warnings = vec![];
        let out = apply(&block, "The dog <ins comment=\"x\">quietly </ins>sat.", &mut warnings);
        assert_eq!(codec::accept_all_resolve(&out), "The dog quietly sat.");
        assert!(matches!(
            &warnings[..],
            [Warning::RoundTripMismatch { recovered, .. }] if recovered == "The dog sat."
        ));
    }

    #[test]
    fn blank_answer_keeps_block() {
        let block = first_block("Keep me.");
        let mut warnings = vec![];
        assert_eq!(apply(&block, "  \n", &mut warnings), "Keep me.");
        assert_eq!(
            warnings,
            vec![Warning::EmptyJudgment {
                block: block.number
            }]
        );
    }
}

use std::collections::BTreeMap;

use crate::reconstruct::{OutputMode, reconstruct};
use crate::rope::preview;
use crate::segment::{BlockNumber, Segmented};

use super::{
    events::{GenerationEvent, Phase, RunSignal},
    judgment::{Judgment, parse_header},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Open,
    Closed,
}

/// The judgment currently receiving lines.
#[derive(Debug)]
struct Pending {
    block: BlockNumber,
    body: String,
}

/// One annotation run: consumes generation events, emits run signals.
///
/// The run owns the segmentation it was started from, so block numbers stay
/// fixed for its whole lifetime. All work happens synchronously inside
/// [`AnnotationRun::handle`]; the caller decides how events arrive.
#[derive(Debug)]
pub struct AnnotationRun {
    document: Segmented,
    mode: OutputMode,
    phase: Phase,
    state: State,
    /// Bytes received but not yet terminated by a newline.
    buffer: String,
    current: Option<Pending>,
    judgments: BTreeMap<BlockNumber, Judgment>,
}

impl AnnotationRun {
    pub fn new(document: Segmented, mode: OutputMode) -> Self {
        Self {
            document,
            mode,
            phase: Phase::Waiting,
            state: State::Open,
            buffer: String::new(),
            current: None,
            judgments: BTreeMap::new(),
        }
    }

    pub fn document(&self) -> &Segmented {
        &self.document
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// True once a terminal signal has been emitted.
    pub fn is_closed(&self) -> bool {
        self.state == State::Closed
    }

    /// Judgments completed so far.
    pub fn judgments(&self) -> &BTreeMap<BlockNumber, Judgment> {
        &self.judgments
    }

    /// Feeds one event and returns the signals it produced, in order.
    ///
    /// After a terminal signal every further event is ignored.
    pub fn handle(&mut self, event: GenerationEvent) -> Vec<RunSignal> {
        let mut out = vec![];
        if self.is_closed() {
            log::debug!("ignoring {event:?} after the run closed");
            return out;
        }

        match event {
            GenerationEvent::ReasoningStarted => self.enter(Phase::Reasoning, &mut out),
            GenerationEvent::AnswerStarted => self.enter(Phase::Answering, &mut out),
            GenerationEvent::Fragment(fragment) => {
                self.enter(Phase::Answering, &mut out);
                self.push_fragment(&fragment, &mut out);
            }
            GenerationEvent::Finished => self.finish(&mut out),
            GenerationEvent::Failed(message) => {
                log::warn!("generation failed: {message}");
                self.discard();
                out.push(RunSignal::Error(message));
            }
        }

        out
    }

    /// Drops everything buffered without emitting anything.
    ///
    /// Used when the consumer goes away mid-stream.
    pub fn cancel(&mut self) {
        if !self.is_closed() {
            log::debug!(
                "run cancelled with {} judgments buffered",
                self.judgments.len()
            );
            self.discard();
        }
    }

    fn discard(&mut self) {
        self.state = State::Closed;
        self.buffer.clear();
        self.current = None;
        self.judgments.clear();
    }

    fn enter(&mut self, phase: Phase, out: &mut Vec<RunSignal>) {
        if self.phase != phase {
            self.phase = phase;
            out.push(RunSignal::Status(phase));
        }
    }

    fn push_fragment(&mut self, fragment: &str, out: &mut Vec<RunSignal>) {
        self.buffer.push_str(fragment);
        while let Some(newline) = self.buffer.find('\n') {
            let line: String = self.buffer.drain(..=newline).collect();
            self.dispatch_line(line.trim_end_matches(['\n', '\r']), out);
        }
    }

    fn dispatch_line(&mut self, line: &str, out: &mut Vec<RunSignal>) {
        let header = parse_header(line)
            .and_then(|(n, rest)| Some((BlockNumber::new(n)?, rest)))
            .filter(|(n, _)| n.get() <= self.document.len());

        if let Some((block, rest)) = header {
            self.complete_current(out);
            self.current = Some(Pending {
                block,
                body: rest.to_string(),
            });
            return;
        }

        match &mut self.current {
            Some(pending) => {
                pending.body.push('\n');
                pending.body.push_str(line);
            }
            None => log::debug!("ignoring preamble line: {}", preview(line, 60)),
        }
    }

    fn complete_current(&mut self, out: &mut Vec<RunSignal>) {
        let Some(Pending { block, body }) = self.current.take() else {
            return;
        };
        let judgment = Judgment::from_body(&body);
        let verdict = judgment.verdict();
        log::debug!("block {block} judged {verdict:?}");

        if self.judgments.insert(block, judgment).is_some() {
            log::warn!("block {block} was judged twice; keeping the later judgment");
        }
        out.push(RunSignal::Progress {
            completed: self.judgments.len(),
            total: self.document.len(),
            block,
            verdict,
        });
    }

    fn finish(&mut self, out: &mut Vec<RunSignal>) {
        if !self.buffer.is_empty() {
            let tail = std::mem::take(&mut self.buffer);
            self.dispatch_line(tail.trim_end_matches('\r'), out);
        }
        self.complete_current(out);

        let reconstruction = reconstruct(&self.document, &self.judgments, self.mode);
        self.state = State::Closed;
        out.push(RunSignal::Done(reconstruction));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec;
    use crate::segment::segment;
    use crate::stream::Verdict;
    use pretty_assertions::assert_eq;

    fn fragment(s: &str) -> GenerationEvent {
        GenerationEvent::Fragment(s.to_string())
    }

    fn run_for(text: &str) -> AnnotationRun {
        AnnotationRun::new(segment(text), OutputMode::FullBlock)
    }

    fn progress(signals: &[RunSignal]) -> Vec<(usize, Verdict)> {
        signals
            .iter()
            .filter_map(|s| match s {
                RunSignal::Progress { block, verdict, .. } => Some((block.get(), *verdict)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn judgments_split_across_fragments() {
        let mut run = run_for("Hello there.\n\nSay hi.\n");
        let mut signals = vec![];
        signals.extend(run.handle(fragment("1 lg")));
        signals.extend(run.handle(fragment("tm\n2 ")));
        signals.extend(run.handle(fragment("<ins comment=\"x\">hi</ins>\n")));

        // block 1 completes when block 2 starts; block 2 waits for the end
        assert_eq!(signals[0], RunSignal::Status(Phase::Answering));
        assert_eq!(progress(&signals), vec![(1, Verdict::Lgtm)]);
        assert_eq!(run.judgments()[&BlockNumber::from_index(0)], Judgment::Lgtm);

        let done = run.handle(GenerationEvent::Finished);
        assert_eq!(progress(&done), vec![(2, Verdict::Changes)]);
        match done.last() {
            Some(RunSignal::Done(r)) => {
                let changes = codec::parse(&r.annotated_body);
                assert_eq!(changes.len(), 1);
                assert_eq!(changes[0].comment, "x");
                assert_eq!(changes[0].inserted.as_deref(), Some("hi"));
            }
            other => panic!("expected Done, got {other:?}"),
        }
        assert!(run.is_closed());
    }

    #[test]
    fn partial_last_line_is_finalized_without_newline() {
        let mut run = run_for("a\n\nb");
        let mut signals = run.handle(fragment("1 lgtm\n2 lgtm"));
        signals.extend(run.handle(GenerationEvent::Finished));
        assert_eq!(
            progress(&signals),
            vec![(1, Verdict::Lgtm), (2, Verdict::Lgtm)]
        );
        let Some(RunSignal::Done(r)) = signals.last() else {
            panic!("expected Done");
        };
        assert!(r.warnings.is_empty(), "{:?}", r.warnings);
        assert_eq!(r.annotated_body, "a\n\nb");
    }

    #[test]
    fn indented_headers_start_judgments() {
        let mut run = run_for("Alpha.\n\nBeta.");
        let mut signals = run.handle(fragment(" 1 lgtm\n\t2 lgtm\n"));
        signals.extend(run.handle(GenerationEvent::Finished));
        assert_eq!(
            progress(&signals),
            vec![(1, Verdict::Lgtm), (2, Verdict::Lgtm)]
        );
        let Some(RunSignal::Done(r)) = signals.last() else {
            panic!("expected Done");
        };
        assert!(r.warnings.is_empty(), "{:?}", r.warnings);
        assert_eq!(r.annotated_body, "Alpha.\n\nBeta.");
    }

    #[test]
    fn continuation_lines_join_the_previous_judgment() {
        let mut run = run_for("```\nlet x = 1;\n\nlet y = 2;\n```");
        run.handle(fragment("1 ```\nlet x = <del comment=\"c\">1</del>"));
        run.handle(fragment("<ins>2</ins>;\n\nlet y = 2;\n```\n"));
        let signals = run.handle(GenerationEvent::Finished);
        let Some(RunSignal::Done(r)) = signals.last() else {
            panic!("expected Done");
        };
        assert!(r.warnings.is_empty(), "{:?}", r.warnings);
        assert_eq!(codec::recover(&r.annotated_body), "```\nlet x = 1;\n\nlet y = 2;\n```");
        assert_eq!(
            codec::accept_all_resolve(&r.annotated_body),
            "```\nlet x = 2;\n\nlet y = 2;\n```"
        );
    }

    #[test]
    fn phase_signals_are_emitted_once_per_transition() {
        let mut run = run_for("a");
        let mut signals = vec![];
        signals.extend(run.handle(GenerationEvent::ReasoningStarted));
        signals.extend(run.handle(GenerationEvent::ReasoningStarted));
        signals.extend(run.handle(GenerationEvent::AnswerStarted));
        signals.extend(run.handle(fragment("1 lgtm")));
        assert_eq!(
            signals,
            vec![
                RunSignal::Status(Phase::Reasoning),
                RunSignal::Status(Phase::Answering),
            ]
        );
    }

    #[test]
    fn out_of_range_numbers_are_continuations() {
        let mut run = run_for("a\n\nb");
        run.handle(fragment("0 nope\n1 lgtm\n7 still block one\n"));
        let signals = run.handle(GenerationEvent::Finished);
        let Some(RunSignal::Done(r)) = signals.last() else {
            panic!("expected Done");
        };
        // block 1's judgment became a revision because of the continuation
        assert_eq!(progress(&signals), vec![(1, Verdict::Changes)]);
        assert_eq!(r.warnings.len(), 2);
    }

    #[test]
    fn nothing_after_error() {
        let mut run = run_for("a\n\nb");
        run.handle(fragment("1 lgtm\n"));
        let signals = run.handle(GenerationEvent::Failed("timeout".into()));
        assert_eq!(signals, vec![RunSignal::Error("timeout".into())]);
        assert!(run.handle(fragment("2 lgtm\n")).is_empty());
        assert!(run.handle(GenerationEvent::Finished).is_empty());
        assert!(run.judgments().is_empty());
    }

    #[test]
    fn cancel_discards_buffered_judgments() {
        let mut run = run_for("a\n\nb");
        run.handle(fragment("1 lgtm\n2 <ins>x"));
        run.cancel();
        assert!(run.is_closed());
        assert!(run.judgments().is_empty());
        assert!(run.handle(GenerationEvent::Finished).is_empty());
    }

    #[test]
    fn progress_reports_totals() {
        let mut run = run_for("a\n\nb\n\nc");
        let signals = run.handle(fragment("1 lgtm\n2 lgtm\n3 lgtm\n"));
        let totals: Vec<_> = signals
            .iter()
            .filter_map(|s| match s {
                RunSignal::Progress {
                    completed, total, ..
                } => Some((*completed, *total)),
                _ => None,
            })
            .collect();
        assert_eq!(totals, vec![(1, 3), (2, 3)]);
    }
}

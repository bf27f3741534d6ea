use anyhow::{Context, Result, anyhow};
use redline_config::Config;
use redline_engine::rope::preview;
use redline_engine::{
    ChangeRecord, CheckLookup, FileSink, GenerationEvent, GenerationRequest, Persisted,
    Reconstruction, Resolved, RunSignal, Session, io, validate,
};
use relative_path::RelativePathBuf;
use std::io::{BufRead, Write};
use std::{env, path::PathBuf, process};

/// Fragment size used when replaying a recorded response.
const REPLAY_CHUNK: usize = 64;

struct App {
    session: Session,
}

impl App {
    fn new(config: &Config, document: RelativePathBuf) -> Result<Self> {
        let text = io::read_file(&document, &config.documents_path)?;
        let sink = FileSink::new(&config.documents_path, document);
        Ok(Self {
            session: Session::new(&text, config.history_depth).with_sink(sink),
        })
    }

    /// Replays a recorded answer through a fresh run and commits it.
    fn annotate(&mut self, config: &Config, check_name: &str, response: &str) -> Result<()> {
        let checks = config.checks();
        let Some(check) = checks.lookup(check_name)? else {
            let known = checks.names()?.join(", ");
            return Err(anyhow!(
                "Unknown check '{check_name}' in {} (known: {known})",
                checks.path().display()
            ));
        };

        let ticket = self.session.begin_run()?;
        let request = GenerationRequest::new(&ticket.document, check);
        log::info!(
            "check '{check_name}' ({:?}) over {} blocks",
            request.mode,
            request.block_count
        );
        log::debug!("request body:\n{}", request.numbered_body);

        let mut run = ticket.annotation_run(request.mode);
        let mut signals = run.handle(GenerationEvent::AnswerStarted);
        let chars: Vec<char> = response.chars().collect();
        for piece in chars.chunks(REPLAY_CHUNK) {
            signals.extend(run.handle(GenerationEvent::Fragment(piece.iter().collect())));
        }
        signals.extend(run.handle(GenerationEvent::Finished));

        match terminal(signals) {
            Some(Ok(reconstruction)) => {
                for warning in &reconstruction.warnings {
                    println!("warning: {warning}");
                }
                let pending = self.session.complete_run(ticket, reconstruction)?;
                println!("{pending} changes to review");
                Ok(())
            }
            Some(Err(message)) => {
                self.session.abort_run(ticket)?;
                Err(anyhow!("Generation failed: {message}"))
            }
            None => {
                self.session.abort_run(ticket)?;
                Err(anyhow!("Run ended without a result"))
            }
        }
    }

    fn list(&self) {
        if self.session.pending() == 0 {
            println!("Nothing pending.");
            return;
        }
        for change in self.session.changes() {
            println!("{}", describe(change));
        }
    }

    fn validate(&self) {
        let problems = validate(self.session.annotated());
        if problems.is_empty() {
            println!("No problems.");
        }
        for problem in problems {
            println!("problem: {problem}");
        }
    }

    fn handle(&mut self, line: &str) -> Result<bool> {
        let mut parts = line.trim().splitn(3, ' ');
        let command = parts.next().unwrap_or_default();
        let index = parts.next().map(parse_index).transpose()?;

        let resolved = match (command, index) {
            ("q", _) => return Ok(false),
            ("l", _) => {
                self.list();
                return Ok(true);
            }
            ("v", _) => {
                self.validate();
                return Ok(true);
            }
            ("a", Some(i)) => self.session.accept(i)?,
            ("r", Some(i)) => self.session.reject(i)?,
            ("e", Some(i)) => {
                let text = parts.next().unwrap_or_default();
                self.session.accept_edited(i, text)?
            }
            ("A", _) => self.session.accept_all()?,
            ("R", _) => self.session.reject_all()?,
            ("u", _) => match self.session.undo() {
                Some(resolved) => resolved,
                None => {
                    println!("Nothing to undo.");
                    return Ok(true);
                }
            },
            ("", _) => return Ok(true),
            _ => {
                print_help();
                return Ok(true);
            }
        };
        report(&resolved);
        Ok(true)
    }
}

/// The run's terminal signal, if any.
fn terminal(signals: Vec<RunSignal>) -> Option<Result<Reconstruction, String>> {
    signals.into_iter().find_map(|signal| match signal {
        RunSignal::Done(reconstruction) => Some(Ok(reconstruction)),
        RunSignal::Error(message) => Some(Err(message)),
        RunSignal::Progress {
            completed,
            total,
            block,
            verdict,
        } => {
            log::debug!("[{completed}/{total}] block {block}: {verdict:?}");
            None
        }
        RunSignal::Status(_) => None,
    })
}

fn parse_index(s: &str) -> Result<usize> {
    s.parse()
        .with_context(|| format!("'{s}' is not a change number"))
}

fn describe(change: &ChangeRecord) -> String {
    let mut out = format!("[{}] {}", change.index, change.comment);
    if let Some(deleted) = &change.deleted {
        out.push_str(&format!("\n    - {}", preview(deleted, 60)));
    }
    if let Some(inserted) = &change.inserted {
        out.push_str(&format!("\n    + {}", preview(inserted, 60)));
    }
    out
}

fn report(resolved: &Resolved) {
    match &resolved.persisted {
        Persisted::Saved => println!("saved; {} pending", resolved.pending),
        Persisted::Failed(e) => println!("NOT saved ({e}); {} pending", resolved.pending),
        Persisted::Skipped => println!("{} pending", resolved.pending),
    }
}

fn print_help() {
    println!("l            list pending changes");
    println!("a N / r N    accept / reject change N");
    println!("e N TEXT     accept change N with TEXT instead");
    println!("A / R        accept / reject everything");
    println!("u            undo");
    println!("v            validate");
    println!("q            quit");
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    if args.len() != 4 {
        eprintln!("Usage: {} <document> <check> <response-file>", args[0]);
        process::exit(1);
    }

    let config = match Config::load() {
        Ok(Some(config)) => config,
        Ok(None) => {
            log::info!(
                "No config file at {}; using the current directory",
                config_path.display()
            );
            Config::new(".")
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = io::validate_documents_dir(&config.documents_path) {
        eprintln!(
            "Error: Documents path '{}' from config file '{}' is invalid: {e}",
            config.documents_path.display(),
            config_path.display()
        );
        process::exit(1);
    }

    let response_path = PathBuf::from(&args[3]);
    let response = std::fs::read_to_string(&response_path)
        .with_context(|| format!("Failed to read response {}", response_path.display()))?;

    let mut app = App::new(&config, RelativePathBuf::from(args[1].as_str()))?;
    app.annotate(&config, &args[2], &response)?;
    app.list();

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        match app.handle(&line?) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("error: {e}"),
        }
    }

    Ok(())
}

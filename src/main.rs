use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::LevelFilter;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use study_aid::{ai_worker::spawn_ai_worker, load_document, logger, validate_question_count};
use study_aid::{ModelConfig, StudyApp};

const TICK: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(version, about = "Summaries, flashcards and quizzes from your study notes", long_about = None)]
struct Args {
    /// Plain text document to study (already extracted from the PDF)
    document: PathBuf,

    /// Default number of quiz questions (1-20)
    #[arg(short, long, default_value_t = 5)]
    questions: usize,

    /// OpenRouter model id
    #[arg(short, long)]
    model: Option<String>,

    /// Shuffle the flashcard review order
    #[arg(long)]
    shuffle: bool,

    /// Log debug output to the log file
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    logger::init(if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let questions = validate_question_count(args.questions)?;
    let document = load_document(&args.document)?;
    let config = args
        .model
        .map(ModelConfig::with_model)
        .unwrap_or_default();
    log::info!(
        "Starting with {} (model {})",
        args.document.display(),
        config.model
    );

    let (request_tx, request_rx) = mpsc::channel();
    let (response_tx, response_rx) = mpsc::channel();
    let worker = spawn_ai_worker(response_tx, request_rx, config)?;

    let mut app = StudyApp::new(questions, args.shuffle, Some(request_tx));
    app.request_summary(document);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app, &response_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Closing the request channel stops the worker once its current call returns.
    let in_flight = app.is_waiting_on_ai();
    drop(app);
    if in_flight {
        log::info!("Exiting with an AI request in flight; not waiting for the worker");
    } else if worker.join().is_err() {
        log::error!("AI worker panicked");
    }

    result.map_err(Into::into)
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut StudyApp,
    responses: &mpsc::Receiver<study_aid::models::AiResponse>,
) -> io::Result<()> {
    loop {
        while let Ok(response) = responses.try_recv() {
            app.process_ai_response(response);
        }

        terminal.draw(|f| study_aid::draw(f, app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key)
        {
            return Ok(());
        }
    }
}

//! Interactive and one-shot drivers for the catalog view.
//!
//! # Design
//! The main thread owns the `CatalogView`. Fetches run on their own worker
//! threads, and stdin is read on a dedicated thread; both report back over
//! one `crossbeam-channel`. Fetches may overlap, and the view drops results
//! for superseded tickets, so nothing is cancelled here.

use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use catalog_core::{
    error_message, render, ApiError, Applied, CatalogView, FetchTicket, PageResult, Phase,
    ProductService, Theme,
};
use crossbeam_channel::{unbounded, Sender};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::command::{Command, CommandError, HELP};
use crate::transport::Transport;

const PROMPT: &str = "> ";

enum Event {
    Input(Result<Command, CommandError>),
    InputClosed,
    Fetched(FetchTicket, Result<PageResult, ApiError>),
}

/// What the loop should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Fetch(FetchTicket),
    Message(String),
    Quit,
}

/// Apply one user command to the view.
pub fn handle(view: &mut CatalogView, command: Command) -> Outcome {
    let result = match command {
        Command::Quit => return Outcome::Quit,
        Command::Help => return Outcome::Message(HELP.to_string()),
        Command::Next => {
            return view
                .next_page()
                .map_or_else(|| Outcome::Message("already on the last page".to_string()), Outcome::Fetch)
        }
        Command::Prev => {
            return view
                .prev_page()
                .map_or_else(|| Outcome::Message("already on the first page".to_string()), Outcome::Fetch)
        }
        Command::Goto(page) => view.change_page(page, view.page_size()),
        Command::PageSize(size) => view.set_page_size(size),
        Command::Reload => view.change_page(view.current_page(), view.page_size()),
    };
    match result {
        Ok(ticket) => Outcome::Fetch(ticket),
        Err(err) => Outcome::Message(error_message(&err)),
    }
}

/// What the interactive loop does after one event.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    /// Nothing to show; a newer fetch is still in flight.
    Wait,
    /// The latest fetch resolved.
    Draw,
    /// The latest fetch resolved after stdin closed: draw it and exit.
    DrawAndQuit,
    Dispatch(FetchTicket),
    Message(String),
    Quit,
}

/// Loop state that never touches the terminal.
struct Session {
    view: CatalogView,
    input_closed: bool,
}

impl Session {
    fn new(view: CatalogView) -> Self {
        Self {
            view,
            input_closed: false,
        }
    }

    fn step(&mut self, event: Event) -> Step {
        match event {
            Event::Fetched(ticket, outcome) => {
                if self.view.apply(ticket, outcome) == Applied::Stale {
                    return Step::Wait;
                }
                if self.input_closed {
                    Step::DrawAndQuit
                } else {
                    Step::Draw
                }
            }
            Event::Input(Ok(command)) => match handle(&mut self.view, command) {
                Outcome::Quit => Step::Quit,
                Outcome::Message(message) => Step::Message(message),
                Outcome::Fetch(ticket) => Step::Dispatch(ticket),
            },
            Event::Input(Err(CommandError::Empty)) => Step::Message(String::new()),
            Event::Input(Err(err)) => Step::Message(err.to_string()),
            Event::InputClosed => {
                self.input_closed = true;
                if self.view.is_loading() {
                    debug!("input closed, waiting for the pending fetch");
                    Step::Wait
                } else {
                    Step::Quit
                }
            }
        }
    }
}

pub struct App {
    service: ProductService,
    transport: Transport,
    theme: Theme,
    session: Session,
}

impl App {
    pub fn new(service: ProductService, theme: Theme, view: CatalogView) -> Self {
        Self {
            service,
            transport: Transport::new(),
            theme,
            session: Session::new(view),
        }
    }

    /// Fetch the starting page once, print it, and fail if the fetch failed.
    pub fn run_once(mut self) -> anyhow::Result<()> {
        let view = &mut self.session.view;
        let ticket = view.mount();
        let outcome = self.transport.fetch(&self.service, ticket);
        view.apply(ticket, outcome);
        print!("{}", render(view, &self.theme));
        io::stdout().flush().context("failed to write to stdout")?;

        if let Phase::Failed(message) = view.phase() {
            bail!("failed to load products: {message}");
        }
        Ok(())
    }

    pub fn run_interactive(mut self) -> anyhow::Result<()> {
        let (tx, rx) = unbounded();
        spawn_input(tx.clone());

        let ticket = self.session.view.mount();
        let mut spinner = Some(self.dispatch(ticket, &tx));
        println!("{HELP}");

        for event in rx.iter() {
            match self.session.step(event) {
                Step::Wait => {}
                Step::Draw => {
                    clear_spinner(&mut spinner);
                    self.draw()?;
                }
                Step::DrawAndQuit => {
                    clear_spinner(&mut spinner);
                    self.draw()?;
                    println!();
                    break;
                }
                Step::Dispatch(ticket) => {
                    if let Some(previous) = spinner.replace(self.dispatch(ticket, &tx)) {
                        previous.finish_and_clear();
                    }
                }
                Step::Message(message) => prompt(&message)?,
                Step::Quit => break,
            }
        }

        clear_spinner(&mut spinner);
        info!("viewer closed");
        Ok(())
    }

    /// Run `ticket`'s fetch on a worker thread and show a spinner meanwhile.
    fn dispatch(&self, ticket: FetchTicket, tx: &Sender<Event>) -> ProgressBar {
        let service = self.service.clone();
        let transport = self.transport.clone();
        let tx = tx.clone();
        thread::spawn(move || {
            let outcome = transport.fetch(&service, ticket);
            if tx.send(Event::Fetched(ticket, outcome)).is_err() {
                debug!(seq = ticket.seq(), "viewer gone before fetch finished");
            }
        });
        start_spinner(ticket)
    }

    fn draw(&self) -> anyhow::Result<()> {
        print!("{}", render(&self.session.view, &self.theme));
        prompt("")
    }
}

fn clear_spinner(spinner: &mut Option<ProgressBar>) {
    if let Some(spinner) = spinner.take() {
        spinner.finish_and_clear();
    }
}

fn prompt(message: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if !message.is_empty() {
        writeln!(stdout, "{message}")?;
    }
    write!(stdout, "{PROMPT}")?;
    stdout.flush().context("failed to write to stdout")
}

fn spawn_input(tx: Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(Event::Input(line.parse())).is_err() {
                return;
            }
        }
        let _ = tx.send(Event::InputClosed);
    });
}

fn start_spinner(ticket: FetchTicket) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    let request = ticket.request();
    spinner.set_message(format!(
        "Загрузка страницы {} ({} / стр.)...",
        request.page(),
        request.limit()
    ));
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

use std::io::{self, Write};
use std::panic;
use std::time::Duration;

use anyhow::{Context, Result};
use crossbeam_channel::{bounded, select, tick, unbounded, Receiver};
use crossterm::event::{Event, KeyEventKind};
use crossterm::{cursor, execute, terminal};
use tui::backend::CrosstermBackend;
use tui::Terminal;

mod app;
mod common;
mod draw;
mod event;
mod logging;
mod opts;
mod report;
mod service;
mod task;
mod theme;
mod widget;

const TICK_RATE: Duration = Duration::from_millis(250);

fn main() {
    better_panic::install();

    if let Err(e) = run() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let opts = opts::resolve_opts().context("Failed to read options")?;

    logging::init(opts.log_file.as_deref(), opts.print)?;

    let config = opts
        .comparison_config()
        .context("Invalid comparison configuration")?;

    if opts.print {
        let stdout = io::stdout();
        return report::print(&opts, &config, &mut stdout.lock());
    }

    let data_path = opts.data_path()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    setup_panic_hook();
    setup_terminal().context("Failed to set up terminal")?;

    let result = run_dashboard(&mut terminal, &opts, config, data_path);

    cleanup_terminal();

    result
}

fn run_dashboard<B: tui::backend::Backend>(
    terminal: &mut Terminal<B>,
    opts: &opts::Opts,
    config: engine::ComparisonConfig,
    data_path: std::path::PathBuf,
) -> Result<()> {
    let (redraw_requester, redraw_receiver) = bounded(1);

    let ticker = tick(TICK_RATE);
    let ui_events = setup_ui_events();
    let ctrl_c_events = setup_ctrl_c()?;

    let mut app = app::App::new(opts, config, data_path, redraw_requester);

    draw::draw(terminal, &mut app)?;

    loop {
        select! {
            recv(ctrl_c_events) -> _ => {
                break;
            }
            recv(redraw_receiver) -> _ => {
                app.update();
                draw::draw(terminal, &mut app)?;
            }
            recv(ticker) -> _ => {
                if app.loading {
                    app.tick();
                    draw::draw(terminal, &mut app)?;
                }
            }
            recv(ui_events) -> message => {
                match message {
                    Ok(Event::Key(key_event)) if key_event.kind == KeyEventKind::Press => {
                        if event::handle_key_bindings(key_event, &mut app) {
                            break;
                        }

                        draw::draw(terminal, &mut app)?;
                    }
                    Ok(Event::Resize(..)) => {
                        draw::draw(terminal, &mut app)?;
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> io::Result<()> {
    let mut stdout = io::stdout();

    execute!(stdout, terminal::EnterAlternateScreen)?;
    execute!(stdout, cursor::Hide)?;

    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;

    terminal::enable_raw_mode()
}

fn cleanup_terminal() {
    let mut stdout = io::stdout();

    let _ = execute!(stdout, cursor::MoveTo(0, 0));
    let _ = execute!(stdout, terminal::Clear(terminal::ClearType::All));

    let _ = execute!(stdout, terminal::LeaveAlternateScreen);
    let _ = execute!(stdout, cursor::Show);

    let _ = terminal::disable_raw_mode();
    let _ = stdout.flush();
}

fn setup_ui_events() -> Receiver<Event> {
    let (sender, receiver) = unbounded();
    std::thread::spawn(move || loop {
        match crossterm::event::read() {
            Ok(event) => {
                if sender.send(event).is_err() {
                    break;
                }
            }
            Err(e) => {
                log::error!("Failed to read terminal event: {}", e);
                break;
            }
        }
    });

    receiver
}

fn setup_ctrl_c() -> Result<Receiver<()>> {
    let (sender, receiver) = unbounded();
    ctrlc::set_handler(move || {
        let _ = sender.send(());
    })
    .context("Failed to install Ctrl-C handler")?;

    Ok(receiver)
}

fn setup_panic_hook() {
    panic::set_hook(Box::new(|panic_info| {
        cleanup_terminal();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));
}

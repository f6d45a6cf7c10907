use clap::Parser;
use hoverbar::comment::{CommentEvent, CommentSink};
use hoverbar::config::{ToolbarConfig, config_file_path, load_config};
use hoverbar::memory_surface::MemorySurface;
use hoverbar::overlay::OverlayState;
use hoverbar::selection::SelectionRange;
use hoverbar::toolbar::FloatingToolbar;
use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

#[derive(Parser, Debug)]
#[command(name = "hoverbar")]
#[command(about = "Floating formatting toolbar demo over an in-memory editor", long_about = None)]
struct Args {
    /// Initial document text
    #[arg(short, long, default_value = "Hello world")]
    text: String,

    /// Configuration file (defaults to the per-user location)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct StdoutCommentSink;

impl CommentSink for StdoutCommentSink {
    fn submit(&mut self, event: CommentEvent) {
        println!("Comment added: {}", event.text);
    }
}

fn print_help() {
    println!("Commands:");
    println!("  select <start> <len>  - select a range");
    println!("  blur                  - drop the selection");
    println!("  bold                  - toggle bold on the selection");
    println!("  bg <intensity>        - background color at intensity 0-100");
    println!("  undo / redo           - step through history");
    println!("  comment <text>        - record a comment");
    println!("  insert <offset> <text>- insert text");
    println!("  delete <start> <len>  - delete a range");
    println!("  tick <ms>             - advance the editor clock");
    println!("  show                  - print document and overlay state");
    println!("  help                  - show this help");
    println!("  quit                  - exit");
}

fn show(toolbar: &FloatingToolbar<MemorySurface, StdoutCommentSink>) {
    let surface = toolbar.surface();
    let surface = surface.borrow();
    println!("text: {:?}", surface.text());
    let dump = surface.dump();
    if !dump.is_empty() {
        println!("{dump}");
    }
    match toolbar.overlay_state() {
        OverlayState::Hidden => println!("overlay: hidden"),
        OverlayState::Visible { position } => {
            println!("overlay: visible at ({}, {})", position.x, position.y)
        }
    }
}

fn main() {
    let args = Args::parse();

    let config = args
        .config
        .or_else(config_file_path)
        .and_then(|path| load_config(&path))
        .unwrap_or_else(ToolbarConfig::default);

    let surface = Rc::new(RefCell::new(MemorySurface::with_text(
        &args.text,
        config.surface_config(),
    )));
    let mut toolbar = FloatingToolbar::with_comment_sink(surface.clone(), StdoutCommentSink);

    println!("hoverbar demo - floating toolbar over an in-memory editor");
    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let parts: Vec<&str> = line.trim().splitn(3, ' ').collect();
        match parts.as_slice() {
            [""] => {}
            ["select", start, len] => {
                match (start.parse::<usize>(), len.parse::<usize>()) {
                    (Ok(start), Ok(len)) => {
                        surface.borrow_mut().select(SelectionRange::new(start, len));
                        toolbar.pump();
                        show(&toolbar);
                    }
                    _ => println!("usage: select <start> <len>"),
                }
            }
            ["blur"] => {
                surface.borrow_mut().blur();
                toolbar.pump();
                show(&toolbar);
            }
            ["bold"] => {
                toolbar.toggle_bold();
                show(&toolbar);
            }
            ["bg", intensity] => match intensity.parse::<f64>() {
                Ok(intensity) => {
                    toolbar.set_background(intensity);
                    show(&toolbar);
                }
                Err(_) => println!("usage: bg <intensity>"),
            },
            ["undo"] => {
                toolbar.undo();
                show(&toolbar);
            }
            ["redo"] => {
                toolbar.redo();
                show(&toolbar);
            }
            ["comment", rest @ ..] => {
                let text = rest.join(" ");
                if !toolbar.add_comment(&text) {
                    println!("(empty comment discarded)");
                }
            }
            ["insert", offset, text] => match offset.parse::<usize>() {
                Ok(offset) => {
                    surface.borrow_mut().insert_text(offset, text);
                    toolbar.pump();
                    show(&toolbar);
                }
                Err(_) => println!("usage: insert <offset> <text>"),
            },
            ["delete", start, len] => {
                match (start.parse::<usize>(), len.parse::<usize>()) {
                    (Ok(start), Ok(len)) => {
                        surface.borrow_mut().delete_range(SelectionRange::new(start, len));
                        toolbar.pump();
                        show(&toolbar);
                    }
                    _ => println!("usage: delete <start> <len>"),
                }
            }
            ["tick", ms] => match ms.parse::<u64>() {
                Ok(ms) => surface.borrow_mut().advance_clock(ms),
                Err(_) => println!("usage: tick <ms>"),
            },
            ["show"] => show(&toolbar),
            ["help"] => print_help(),
            ["quit"] | ["exit"] => break,
            _ => println!("unknown command (try 'help')"),
        }
    }
}

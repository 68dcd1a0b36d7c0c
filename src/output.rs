//! User-facing console lines.
//! Results go to stdout, problems to stderr; tracing logs are separate.
//! Labels are colored only when the target stream is a TTY.

use owo_colors::OwoColorize;

#[derive(Clone, Copy)]
enum Stream {
    Out,
    Err,
}

#[derive(Clone, Copy)]
enum Label {
    Info,
    Ok,
    Warn,
    Error,
}

impl Label {
    fn text(self) -> &'static str {
        match self {
            Label::Info => "info:",
            Label::Ok => "ok:",
            Label::Warn => "warn:",
            Label::Error => "error:",
        }
    }

    fn stream(self) -> Stream {
        match self {
            Label::Info | Label::Ok => Stream::Out,
            Label::Warn | Label::Error => Stream::Err,
        }
    }
}

fn is_tty(stream: Stream) -> bool {
    match stream {
        Stream::Out => atty::is(atty::Stream::Stdout),
        Stream::Err => atty::is(atty::Stream::Stderr),
    }
}

fn emit(label: Label, msg: &str) {
    let stream = label.stream();
    let prefix = if is_tty(stream) {
        let text = label.text();
        match label {
            Label::Info => text.cyan().bold().to_string(),
            Label::Ok => text.green().bold().to_string(),
            Label::Warn => text.yellow().bold().to_string(),
            Label::Error => text.red().bold().to_string(),
        }
    } else {
        label.text().to_string()
    };
    match stream {
        Stream::Out => println!("{prefix} {msg}"),
        Stream::Err => eprintln!("{prefix} {msg}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Label::Info, msg);
}

pub fn print_success(msg: &str) {
    emit(Label::Ok, msg);
}

pub fn print_warn(msg: &str) {
    emit(Label::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Label::Error, msg);
}

/// Print a plain line with no label. Used for the per-file
/// `'<src>' -> '<dst>' done.` lines, which users may script against.
pub fn print_user(msg: &str) {
    println!("{msg}");
}

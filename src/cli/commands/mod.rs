pub mod logging;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_SESSION_COOKIE: &str = "session-cookie";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_GRACE_DELAY: &str = "grace-delay-ms";
pub const ARG_PROMPT: &str = "prompt";
pub const ARG_COURSE_ID: &str = "course-id";

fn prompt_arg() -> Arg {
    Arg::new(ARG_PROMPT)
        .short('p')
        .long("prompt")
        .help("What the generated content should teach")
        .required(true)
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("coursegen")
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_API_URL)
                .short('u')
                .long("api-url")
                .help("Base URL of the learning API, example: https://api.coursegen.dev")
                .env("COURSEGEN_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SESSION_COOKIE)
                .long("session-cookie")
                .help("Session cookie as name=value")
                .env("COURSEGEN_SESSION_COOKIE")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds")
                .default_value("10")
                .env("COURSEGEN_TIMEOUT_SECS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new(ARG_GRACE_DELAY)
                .long("grace-delay-ms")
                .help("Pause between navigating to new content and clearing creation state")
                .default_value("100")
                .env("COURSEGEN_GRACE_DELAY_MS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
        .subcommand(Command::new("status").about("Check whether the session is signed in"))
        .subcommand(
            Command::new("create-module")
                .about("Generate a single module and open its lesson")
                .arg(prompt_arg())
                .arg(
                    Arg::new(ARG_COURSE_ID)
                        .long("course-id")
                        .help("Attach the module to an existing course"),
                ),
        )
        .subcommand(
            Command::new("create-course")
                .about("Generate a full course outline and open it")
                .arg(prompt_arg()),
        )
        .subcommand(Command::new("lessons").about("List lessons"))
        .subcommand(Command::new("reviews").about("List reviews that are due"));

    logging::with_args(command)
}

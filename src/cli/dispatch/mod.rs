use crate::cli::{
    actions::{create, Action},
    commands::{
        ARG_API_URL, ARG_COURSE_ID, ARG_GRACE_DELAY, ARG_PROMPT, ARG_SESSION_COOKIE, ARG_TIMEOUT,
    },
    globals::GlobalArgs,
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    match matches.subcommand() {
        Some(("status", _)) => Ok(Action::Status(globals)),
        Some(("create-module", sub_m)) => Ok(Action::CreateModule(create::ModuleArgs {
            globals,
            prompt: required(sub_m, ARG_PROMPT)?,
            course_id: sub_m.get_one::<String>(ARG_COURSE_ID).cloned(),
        })),
        Some(("create-course", sub_m)) => Ok(Action::CreateCourse(create::CourseArgs {
            globals,
            prompt: required(sub_m, ARG_PROMPT)?,
        })),
        Some(("lessons", _)) => Ok(Action::Lessons(globals)),
        Some(("reviews", _)) => Ok(Action::Reviews(globals)),
        Some((name, _)) => Err(anyhow!("unknown command: {name}")),
        None => Err(anyhow!("missing command")),
    }
}

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let api_url = required(matches, ARG_API_URL)
        .context("missing required argument: --api-url (or COURSEGEN_API_URL)")?;

    let mut globals = GlobalArgs::new(api_url);

    if let Some(cookie) = matches.get_one::<String>(ARG_SESSION_COOKIE) {
        globals.set_session_cookie(SecretString::from(cookie.clone()));
    }
    if let Some(timeout) = matches.get_one::<u64>(ARG_TIMEOUT) {
        globals.timeout_secs = *timeout;
    }
    if let Some(delay) = matches.get_one::<u64>(ARG_GRACE_DELAY) {
        globals.grace_delay_ms = *delay;
    }

    Ok(globals)
}

fn required(matches: &clap::ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .ok_or_else(|| anyhow!("missing required argument: --{id}"))
}

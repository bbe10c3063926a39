//! Interactive credential setup: ask for an API key and persist it to a dotenv file.
//!
//! The key is never validated against the provider. An existing file is only
//! replaced after explicit confirmation (or `force`).

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::core::Credential;
use crate::provider::constants::openai::{API_KEY_ENV_VAR, ENV_FILE};

#[derive(Error, Debug)]
pub enum SetupError {
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid variable name {0:?}: use letters, digits and underscores")]
    InvalidVarName(String),

    #[error("API key contains a line break and cannot be stored in an env file")]
    UnrepresentableKey,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetupOptions {
    pub env_file: PathBuf,
    pub var_name: String,
    /// Replace an existing file without asking.
    pub force: bool,
    /// Turn off terminal echo while the key is typed. Only affects a stdin that is a terminal.
    pub hide_input: bool,
}

impl Default for SetupOptions {
    fn default() -> Self {
        Self {
            env_file: PathBuf::from(ENV_FILE),
            var_name: API_KEY_ENV_VAR.to_string(),
            force: false,
            hide_input: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SetupOutcome {
    Written(PathBuf),
    /// The file already existed and the user chose to keep it.
    Declined,
    /// The user entered nothing, so nothing was written.
    NoCredential,
}

/// Run the setup dialogue over `input`/`output`.
pub fn run<R, W>(
    input: &mut R,
    output: &mut W,
    options: &SetupOptions,
) -> Result<SetupOutcome, SetupError>
where
    R: BufRead,
    W: Write,
{
    validate_var_name(&options.var_name)?;

    writeln!(output, "--- ChatGPT Agent Setup ---")?;

    let path = &options.env_file;
    if path.exists() && !options.force {
        let question = format!("{} already exists. Overwrite? [y/N] ", path.display());
        if !confirm(input, output, &question)? {
            writeln!(output, "Aborted. {} was left unchanged.", path.display())?;
            info!(path = %path.display(), "Overwrite declined");
            return Ok(SetupOutcome::Declined);
        }
    }

    let question = "Please enter your OpenAI API Key: ";
    let answer = if options.hide_input {
        let _echo_off = EchoGuard::disable_stdin()?;
        let answer = prompt(input, output, question)?;
        // The typed newline was not echoed either.
        writeln!(output)?;
        answer
    } else {
        prompt(input, output, question)?
    };
    let credential = match Credential::new(answer) {
        Ok(credential) => credential,
        Err(_) => {
            writeln!(
                output,
                "No API Key provided. The agent will not be able to function."
            )?;
            return Ok(SetupOutcome::NoCredential);
        }
    };

    write_env_file(path, &options.var_name, &credential)?;

    writeln!(output, "API Key saved successfully to {}.", path.display())?;
    writeln!(output, "You can now run the agent with: chatgpt-agent \"<prompt>\"")?;
    Ok(SetupOutcome::Written(path.clone()))
}

/// Write `var=<key>` as the whole content of `path`, quoted so dotenv reads the key back verbatim.
pub fn write_env_file(
    path: &Path,
    var_name: &str,
    credential: &Credential,
) -> Result<(), SetupError> {
    validate_var_name(var_name)?;

    let content = format!("{var_name}={}\n", quote_value(credential.expose())?);
    write_private(path, content.as_bytes()).map_err(|source| SetupError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(path = %path.display(), var = %var_name, "Env file written");
    Ok(())
}

#[cfg(unix)]
fn write_private(path: &Path, content: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::OpenOptionsExt;

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    file.write_all(content)
}

#[cfg(not(unix))]
fn write_private(path: &Path, content: &[u8]) -> io::Result<()> {
    fs::write(path, content)
}

/// Quote `value` for dotenv.
///
/// Single quotes are literal in dotenv, so they are used whenever the value has
/// no `'` of its own. Otherwise the value is double-quoted with `\\`, `"`, `'`
/// and `$` escaped, which keeps `$VAR` from being substituted.
fn quote_value(value: &str) -> Result<String, SetupError> {
    if value.contains(['\n', '\r']) {
        return Err(SetupError::UnrepresentableKey);
    }

    if !value.contains('\'') {
        return Ok(format!("'{value}'"));
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '\'' | '$') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    Ok(quoted)
}

/// Restores the saved terminal attributes on drop.
struct EchoGuard {
    #[cfg(unix)]
    saved: Option<(std::os::fd::RawFd, libc::termios)>,
}

impl EchoGuard {
    #[cfg(unix)]
    fn disable_stdin() -> io::Result<Self> {
        Self::disable(libc::STDIN_FILENO)
    }

    #[cfg(unix)]
    fn disable(fd: std::os::fd::RawFd) -> io::Result<Self> {
        unsafe {
            if libc::isatty(fd) == 0 {
                return Ok(Self { saved: None });
            }
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(fd, &mut termios) < 0 {
                return Err(io::Error::last_os_error());
            }
            let saved = termios;

            termios.c_lflag &= !libc::ECHO;
            if libc::tcsetattr(fd, libc::TCSANOW, &termios) < 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(Self {
                saved: Some((fd, saved)),
            })
        }
    }

    #[cfg(not(unix))]
    fn disable_stdin() -> io::Result<Self> {
        Ok(Self {})
    }
}

#[cfg(unix)]
impl Drop for EchoGuard {
    fn drop(&mut self) {
        if let Some((fd, saved)) = self.saved {
            unsafe {
                libc::tcsetattr(fd, libc::TCSANOW, &saved);
            }
        }
    }
}

fn validate_var_name(name: &str) -> Result<(), SetupError> {
    let mut chars = name.chars();
    let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');

    if valid {
        Ok(())
    } else {
        Err(SetupError::InvalidVarName(name.to_string()))
    }
}

fn prompt<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<String, SetupError> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
) -> Result<bool, SetupError> {
    let answer = prompt(input, output, question)?.to_ascii_lowercase();
    Ok(matches!(answer.as_str(), "y" | "yes"))
}

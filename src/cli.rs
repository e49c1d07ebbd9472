// SPDX-License-Identifier: MIT

use std::io::IsTerminal;
use std::process::{Child, Command, Stdio};

use clap::Args;
use termcolor::{ColorChoice, StandardStream, WriteColor};

#[derive(Debug, Clone, Default, Args)]
pub struct Options {
    /// Whether the output should be run through a pager
    #[clap(long)]
    pub pager: Option<bool>,

    /// Whether the output should be colored
    #[clap(long)]
    pub color: Option<bool>,
}

/// `$PAGER` split on whitespace, or `less -FR`.
fn pager_command() -> Command {
    let pager = std::env::var("PAGER").unwrap_or_default();
    let mut words = pager.split_whitespace();
    match words.next() {
        Some(program) => {
            let mut command = Command::new(program);
            command.args(words);
            command
        }
        None => {
            let mut command = Command::new("less");
            command.arg("-FR");
            command
        }
    }
}

fn spawn_pager() -> Option<Child> {
    let mut command = pager_command();
    match command
        .stdin(Stdio::piped())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(child) => Some(child),
        Err(err) => {
            log::debug!("not using a pager: {err}");
            None
        }
    }
}

pub struct Cli {
    stream: Option<Box<dyn WriteColor>>,
    pager: Option<Child>,
}
impl Cli {
    pub fn new(options: Options) -> Cli {
        let is_terminal = std::io::stdout().is_terminal();

        let use_pager = options.pager.unwrap_or(is_terminal);
        let use_color = options.color.unwrap_or(is_terminal);

        let mut pager = if use_pager { spawn_pager() } else { None };

        let stdin = pager.as_mut().and_then(|pager| pager.stdin.take());
        let stream: Box<dyn WriteColor> = match stdin {
            Some(stdin) if use_color => Box::new(termcolor::Ansi::new(stdin)),
            Some(stdin) => Box::new(termcolor::NoColor::new(stdin)),
            None => {
                let color = if use_color { ColorChoice::Always } else { ColorChoice::Never };
                Box::new(StandardStream::stdout(color))
            }
        };

        Cli {
            stream: Some(stream),
            pager,
        }
    }

    pub fn stream(&mut self) -> &mut dyn WriteColor {
        match &mut self.stream {
            Some(stream) => stream,
            None => unreachable!("stream is only taken on drop"),
        }
    }
}

impl Drop for Cli {
    fn drop(&mut self) {
        // Close the stream to signal EOF to the pager, if any.
        self.stream = None;

        // Wait for the pager to exit, otherwise it ends up killed by the shell
        // and leaves the terminal in a bad state.
        if let Some(pager) = &mut self.pager {
            pager.wait().unwrap_or_default();
        }
    }
}

//! `mcsign send` command implementation.

use std::io::{self, Write};
use std::time::Duration;

use clap::Args;
use ureq::Agent;

use super::request::RequestArgs;
use crate::error::CliError;
use crate::output::Output;

/// Global request timeout in seconds.
const DEFAULT_TIMEOUT: u64 = 30;

/// Arguments for the send command.
#[derive(Args)]
pub(crate) struct SendArgs {
    #[command(flatten)]
    pub(crate) request: RequestArgs,
}

impl SendArgs {
    /// Execute the send command.
    ///
    /// The status line goes to stderr and the response body to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if signing or the HTTP exchange fails, or the server
    /// answers with a status of 400 or above.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (signer, mut request) = self.request.prepare()?;
        signer.sign(&mut request)?;

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT)))
            .http_status_as_error(false)
            .build()
            .into();

        output.detail(&format!("{} {}", request.method(), request.uri()));
        let response = agent.run(request)?;

        let status = response.status();
        let status_line = format!(
            "HTTP {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or_default()
        );
        if status.as_u16() >= 400 {
            output.error(&status_line);
        } else {
            output.success(&status_line);
        }

        let body = response.into_body().read_to_vec()?;
        let mut stdout = io::stdout();
        stdout.write_all(&body)?;
        stdout.flush()?;

        if status.as_u16() >= 400 {
            return Err(CliError::HttpStatus(status.as_u16()));
        }
        Ok(())
    }
}
